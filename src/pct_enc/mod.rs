//! Percent-encoding utilities.

pub mod table;

pub use table::Table;

use crate::error::{Component, ParseError, ParseErrorKind, RawError};
use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{hash, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Percent-encoded string slices.
///
/// Every raw component returned by [`Uri`] is an `EStr` slice: the
/// underlying string is exactly as it appears in the URI, and every
/// percent sign in it starts a well-formed percent-encoded octet.
///
/// Call [`as_str`](Self::as_str) for the raw form and [`decode`](Self::decode)
/// for the decoded form.
///
/// # Comparison
///
/// `EStr` slices are compared by their raw bytes. Use [`Uri`]'s equality
/// for comparison that ignores the letter case of percent-encoded octets.
///
/// [`Uri`]: crate::Uri
///
/// # Examples
///
/// ```
/// use rfc2396_uri::Uri;
///
/// let uri = Uri::parse("http://example.com/caf%C3%A9%20menu?q=%E6%B5%8B")?;
/// assert_eq!(uri.path().unwrap().as_str(), "/caf%C3%A9%20menu");
/// assert_eq!(uri.path().unwrap().decode(), "/café menu");
/// assert_eq!(uri.query().unwrap().decode(), "q=测");
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None`
    /// if any percent sign in it does not start a well-formed octet.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                if i + 2 >= bytes.len() || !is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
                    return None;
                }
                i += 3;
            } else {
                i += 1;
            }
        }
        Some(Self::new_validated(s))
    }

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Panics
    ///
    /// Panics if any percent sign in the string does not start a well-formed
    /// octet. For a non-panicking variant, use [`new`](Self::new).
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Self {
        match Self::new(s) {
            Some(s) => s,
            None => panic!("improperly encoded string"),
        }
    }

    /// Yields the underlying string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the `EStr` slice.
    ///
    /// Runs of percent-encoded octets are decoded as UTF-8, replacing any
    /// invalid sequence with [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    /// `U+002B` (+) is **not** decoded as a space.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::pct_enc::EStr;
    ///
    /// let s = EStr::new_or_panic("%C2%A1Hola%21+amigo");
    /// assert_eq!(s.decode(), "¡Hola!+amigo");
    /// assert_eq!(EStr::new_or_panic("%FF").decode(), "\u{FFFD}");
    /// ```
    #[must_use]
    pub fn decode(&self) -> Cow<'_, str> {
        decode(&self.inner)
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EStr> for str {
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

const fn is_hexdig(x: u8) -> bool {
    x.is_ascii_hexdigit()
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) & is_hexdig(lo)
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Returns the octet encoded at `i`, if a well-formed triplet starts there.
fn octet_at(bytes: &[u8], i: usize) -> Option<u8> {
    match bytes.get(i..i + 3) {
        Some(&[b'%', hi, lo]) if is_hexdig_pair(hi, lo) => Some(decode_octet(hi, lo)),
        _ => None,
    }
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encodes a string with the given table, appending to a buffer.
///
/// Every character not allowed by the table is replaced by `%HH` triplets,
/// one for each byte of its UTF-8 encoding, with uppercase hexadecimal digits.
pub fn encode_to(s: &str, table: Table, buf: &mut String) {
    for ch in s.chars() {
        if table.allows(ch) {
            buf.push(ch);
        } else {
            for &x in ch.encode_utf8(&mut [0; 4]).as_bytes() {
                buf.push_str(encode_byte(x));
            }
        }
    }
}

/// Percent-encodes a string with the given table.
///
/// # Examples
///
/// ```
/// use rfc2396_uri::pct_enc::{encode, table};
///
/// assert_eq!(encode("a b/c?d", table::PATH), "a%20b/c%3Fd");
/// assert_eq!(encode("50%", table::USER_INFO), "50%25");
/// assert_eq!(encode("测试", table::ASCII_ONLY), "%E6%B5%8B%E8%AF%95");
/// ```
#[must_use]
pub fn encode(s: &str, table: Table) -> String {
    let mut buf = String::with_capacity(s.len());
    encode_to(s, table, &mut buf);
    buf
}

/// Decodes a percent-encoded string.
///
/// Runs of percent-encoded octets are grouped and decoded as UTF-8, replacing
/// any invalid sequence with [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
/// Characters outside such runs, including any malformed percent sign,
/// pass through unchanged.
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
#[must_use]
pub fn decode(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr::memchr(b'%', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len());
    buf.push_str(&s[..first]);

    let mut run = Vec::new();
    let mut i = first;
    while i < bytes.len() {
        if let Some(x) = octet_at(bytes, i) {
            run.push(x);
            i += 3;
            continue;
        }
        flush_run(&mut buf, &mut run);

        let next = memchr::memchr(b'%', &bytes[i + 1..]).map_or(bytes.len(), |j| i + 1 + j);
        buf.push_str(&s[i..next]);
        i = next;
    }
    flush_run(&mut buf, &mut run);
    Cow::Owned(buf)
}

fn flush_run(buf: &mut String, run: &mut Vec<u8>) {
    if !run.is_empty() {
        buf.push_str(&String::from_utf8_lossy(run));
        run.clear();
    }
}

/// Checks that every character of `s` is either a well-formed percent-encoded
/// octet or allowed by the table. Error indexes are shifted by `offset`.
pub(crate) fn check(
    s: &str,
    offset: usize,
    table: Table,
    component: Component,
) -> Result<(), RawError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' {
            if octet_at(bytes, i).is_none() {
                return Err(RawError {
                    index: Some(offset + i),
                    kind: ParseErrorKind::InvalidOctet(component),
                });
            }
            i += 3;
        } else if x < 128 {
            if !table.allows_ascii(x) {
                return Err(RawError {
                    index: Some(offset + i),
                    kind: ParseErrorKind::UnexpectedChar(component),
                });
            }
            i += 1;
        } else {
            match s[i..].chars().next() {
                Some(ch) if table.allows(ch) => i += ch.len_utf8(),
                _ => {
                    return Err(RawError {
                        index: Some(offset + i),
                        kind: ParseErrorKind::UnexpectedChar(component),
                    })
                }
            }
        }
    }
    Ok(())
}

/// Validates a raw string against the given table.
///
/// Every character must be either a well-formed percent-encoded octet or
/// allowed by the table. The error reports the index of the first violation
/// along with `component`.
///
/// # Errors
///
/// Returns `Err` if the string contains a malformed percent-encoded octet
/// or a character not allowed by the table.
///
/// # Examples
///
/// ```
/// use rfc2396_uri::{error::{Component, ParseErrorKind}, pct_enc::{table, validate}};
///
/// assert_eq!(validate("a%20b/c", table::PATH, Component::Path).unwrap(), "a%20b/c");
///
/// let e = validate("a b", table::PATH, Component::Path).unwrap_err();
/// assert_eq!(e.index(), Some(1));
/// assert_eq!(e.kind(), ParseErrorKind::UnexpectedChar(Component::Path));
/// ```
pub fn validate(s: &str, table: Table, component: Component) -> Result<&EStr, ParseError> {
    match check(s, 0, table, component) {
        Ok(()) => Ok(EStr::new_validated(s)),
        Err(e) => Err(e.with_input(s)),
    }
}
