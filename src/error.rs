//! Error types.

use alloc::string::String;

/// A URI component, used to point out where a [`ParseError`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    /// The scheme.
    Scheme,
    /// The scheme-specific part of an opaque URI.
    SchemeSpecificPart,
    /// The authority.
    Authority,
    /// The user information.
    UserInfo,
    /// The host.
    Host,
    /// The port.
    Port,
    /// The path.
    Path,
    /// The query.
    Query,
    /// The fragment.
    Fragment,
}

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet(Component),
    /// Character that is not allowed in the component.
    ///
    /// The error index points to the character.
    UnexpectedChar(Component),
    /// Empty scheme before the first colon.
    ExpectedScheme,
    /// Nothing after the colon of the scheme.
    ExpectedSchemeSpecificPart,
    /// Nothing after the `"//"` that starts an authority.
    ExpectedAuthority,
    /// Empty host in an authority decomposed as server-based.
    ExpectedHost,
    /// Port that is not a non-negative integer.
    InvalidPort,
    /// IP literal without a closing square bracket.
    UnclosedIpLiteral,
    /// Malformed IPv6 address inside square brackets.
    InvalidIpv6Addr,
    /// Malformed IPv4 address.
    InvalidIpv4Addr,
    /// Host that is neither a domain name nor an IP address.
    InvalidHostName,
    /// Non-empty path not starting with `'/'` supplied along with a scheme.
    RelativePath,
    /// Components of different URI shapes supplied together.
    ConflictingComponents,
}

/// An error occurred when parsing or building a URI.
///
/// The error keeps the input that failed, so that it can be reported
/// or recovered with [`into_input`](Self::into_input).
#[derive(Clone, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) input: String,
    pub(crate) index: Option<usize>,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, index: Option<usize>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.into(),
            index,
            kind,
        }
    }

    /// Returns the input that was attempted to parse.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Recovers the input that was attempted to parse.
    #[inline]
    #[must_use]
    pub fn into_input(self) -> String {
        self.input
    }

    /// Returns the index where the error occurred, if known.
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A [`ParseError`] with its input erased, raised while scanning.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawError {
    pub(crate) index: Option<usize>,
    pub(crate) kind: ParseErrorKind,
}

impl RawError {
    pub(crate) fn with_input(self, input: impl Into<String>) -> ParseError {
        ParseError::new(input, self.index, self.kind)
    }
}
