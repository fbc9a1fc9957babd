//! Character tables for the URI components.
//!
//! Every component shares the same base set of legal characters:
//! letters, digits, the marks `_-!.~'()*`, the punctuation `,;:$&+=`,
//! and any non-ASCII character that is neither a space nor a control
//! character. Each component table then adds its own extra characters.

/// A table specifying the characters allowed unencoded in a string.
///
/// A percent sign is never allowed by a component table. Percent-encoded
/// octets are always accepted during validation, independent of the table.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    ascii: u128,
    non_ascii: bool,
}

impl Table {
    /// Creates a table that only allows the given ASCII characters.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut ascii = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                *cur < 128 && *cur != b'%',
                "cannot allow non-ASCII byte or %"
            );
            ascii |= 1u128 << *cur;
            bytes = rem;
        }
        Self {
            ascii,
            non_ascii: false,
        }
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self {
            ascii: self.ascii | other.ascii,
            non_ascii: self.non_ascii | other.non_ascii,
        }
    }

    /// Marks this table as allowing every non-ASCII character
    /// that is neither a space nor a control character.
    #[must_use]
    pub const fn or_non_ascii(self) -> Self {
        Self {
            ascii: self.ascii,
            non_ascii: true,
        }
    }

    /// Checks whether the given ASCII byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_ascii(self, x: u8) -> bool {
        x < 128 && self.ascii & (1u128 << x) != 0
    }

    /// Checks whether the given unencoded character is allowed by the table.
    #[inline]
    #[must_use]
    pub fn allows(self, ch: char) -> bool {
        if ch.is_ascii() {
            self.allows_ascii(ch as u8)
        } else {
            self.non_ascii && !ch.is_whitespace() && !ch.is_control()
        }
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// Characters allowed in a domain name: letters, digits, `"-"` and `"."`.
pub const DOMAIN: Table = ALPHA.or(DIGIT).or(new(b"-."));

/// `mark = "_" / "-" / "!" / "." / "~" / "'" / "(" / ")" / "*"`
pub const MARK: Table = new(b"_-!.~'()*");

/// `punct = "," / ";" / ":" / "$" / "&" / "+" / "="`
pub const PUNCT: Table = new(b",;:$&+=");

/// Characters legal in every component.
pub const LEGAL: Table = ALPHA.or(DIGIT).or(MARK).or(PUNCT).or_non_ascii();

/// Table for the user information.
pub const USER_INFO: Table = LEGAL;

/// Table for the path.
pub const PATH: Table = LEGAL.or(new(b"/@"));

/// Table for the authority.
pub const AUTHORITY: Table = LEGAL.or(new(b"@[]"));

/// Table for a path joined with its query, as in the file part of a URL.
pub const FILE_AND_QUERY: Table = LEGAL.or(new(b"/@?"));

/// Table for the query, the fragment and the scheme-specific part.
pub const ALL_LEGAL: Table = LEGAL.or(new(b"?/[]@"));

/// Table retaining every ASCII character, percent sign included,
/// and nothing else.
pub const ASCII_ONLY: Table = Table {
    ascii: u128::MAX,
    non_ascii: false,
};
