#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! A generic URI value type following IETF [RFC 2396].
//!
//! [RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396/
//!
//! See the documentation of [`Uri`] for more details.
//!
//! # Terminology
//!
//! - An *opaque* URI is an absolute URI whose scheme-specific part does not
//!   begin with `'/'`, such as `mailto:a@b.com`. It has no authority, path,
//!   or query.
//! - A *hierarchical* URI has a (possibly empty) path and an optional
//!   authority and query, such as `http://example.com/a?b` or `../c`.
//! - An authority is *server-based* when it decomposes into
//!   `[userinfo@]host[:port]` with a valid host and port, and *registry-based*
//!   otherwise, in which case only its raw text is kept.
//!
//! # Feature flags
//!
//! - `std` (default): Enables [`std::error::Error`] for [`ParseError`].
//!   The crate is `no_std` with `alloc` otherwise.
//!
//! - `serde`: Enables [`serde`] support. A `Uri` serializes as its string
//!   and deserializes by parsing.
//!
//! - `log`: Traces authority decomposition with the [`log`] crate.
//!
//! [`serde`]: https://docs.rs/serde
//! [`log`]: https://docs.rs/log

extern crate alloc;

pub mod component;
pub mod error;
pub mod pct_enc;

mod build;
mod cmp;
mod fmt;
mod host;
mod internal;
mod log;
mod normalize;
mod parse;
mod resolve;

pub use build::Builder;
pub use error::ParseError;

use crate::{
    component::{Authority, Host, Scheme, ServerAuthority},
    internal::{AuthMeta, Meta, Parse},
    pct_enc::{table::ASCII_ONLY, EStr},
};
use alloc::{borrow::ToOwned, string::String};
use borrow_or_share::{BorrowOrShare, Bos};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A URI as defined in RFC 2396, either absolute or relative.
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and
/// `Uri<String>` (owned).
///
/// `Uri<&'a str>` outputs references with lifetime `'a` where possible
/// (thanks to [`borrow-or-share`](borrow_or_share)):
///
/// ```
/// use rfc2396_uri::Uri;
///
/// // Keep a reference to the path after dropping the `Uri`.
/// let path = Uri::parse("foo:/bar")?.path().unwrap();
/// assert_eq!(path, "/bar");
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
///
/// # Comparison
///
/// `Uri`s are compared component by component: schemes and hosts ignore
/// ASCII case, and the hexadecimal digits of percent-encoded octets are
/// compared case-insensitively everywhere. Normalization is **not**
/// performed prior to comparison.
///
/// ```
/// use rfc2396_uri::Uri;
///
/// assert_eq!(Uri::parse("HTTP://Example.COM/%3a")?, Uri::parse("http://example.com/%3A")?);
/// assert_ne!(Uri::parse("http://x/A")?, Uri::parse("http://x/a")?);
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
///
/// # Examples
///
/// Parse and extract components from a URI:
///
/// ```
/// use rfc2396_uri::{component::Scheme, Uri};
///
/// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
///
/// let uri = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose")?;
///
/// assert_eq!(uri.scheme().unwrap(), SCHEME_FOO);
/// assert_eq!(uri.scheme_specific_part(), "//user@example.com:8042/over/there?name=ferret");
///
/// let auth = uri.authority().unwrap();
/// assert_eq!(auth.as_str(), "user@example.com:8042");
///
/// assert_eq!(uri.user_info().unwrap(), "user");
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some(8042));
/// assert_eq!(uri.path().unwrap(), "/over/there");
/// assert_eq!(uri.query().unwrap(), "name=ferret");
/// assert_eq!(uri.fragment().unwrap(), "nose");
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
///
/// Parse into and convert between `Uri<&str>` and `Uri<String>`:
///
/// ```
/// use rfc2396_uri::Uri;
///
/// let s = "http://example.com/";
///
/// // Parse into a `Uri<&str>` from a string slice.
/// let uri: Uri<&str> = Uri::parse(s)?;
///
/// // Parse into a `Uri<String>` from an owned string.
/// let uri_owned: Uri<String> = Uri::parse(s.to_owned())?;
///
/// // Convert a `Uri<&str>` to `Uri<String>`.
/// let uri_owned: Uri<String> = uri.to_owned();
///
/// // Borrow a `Uri<String>` as `Uri<&str>`.
/// let uri: Uri<&str> = uri_owned.borrow();
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    /// Value of the URI.
    pub(crate) val: T,
    /// Metadata of the URI.
    /// Should be identical to parser output with `val` as input.
    pub(crate) meta: Meta,
}

impl<T> Uri<T> {
    pub(crate) fn new(val: T, meta: Meta) -> Self {
        Self { val, meta }
    }

    /// Parses a URI from a string into a `Uri`.
    ///
    /// The return type is
    ///
    /// - `Result<Uri<&str>, ParseError>` for `I = &str`;
    /// - `Result<Uri<String>, ParseError>` for `I = String`.
    ///
    /// An authority that does not decompose into a valid host and port is
    /// accepted as registry-based. Call
    /// [`parse_server_authority`](Self::parse_server_authority) to require
    /// a server-based one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a well-formed URI. The error keeps
    /// the input, so that an owned string can be recovered with
    /// [`ParseError::into_input`].
    pub fn parse<I>(input: I) -> Result<Self, ParseError>
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }
}

impl<'a> Uri<&'a str> {
    /// Parses a URI from a string slice, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a well-formed URI.
    /// For a non-panicking variant, use [`parse`](Self::parse).
    #[must_use]
    pub fn parse_or_panic(s: &'a str) -> Self {
        match Self::parse(s) {
            Ok(uri) => uri,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates a new `Uri<String>` by cloning the contents of this `Uri<&str>`.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl Uri<String> {
    /// Creates a new builder for URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let uri = Uri::builder()
    ///     .scheme("http")
    ///     .host("example.com")
    ///     .path("/caf\u{e9} menu")
    ///     .build()?;
    /// assert_eq!(uri.as_str(), "http://example.com/caf\u{e9}%20menu");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[inline]
    pub fn builder<'a>() -> Builder<'a> {
        Builder::new()
    }

    /// Borrows this `Uri<String>` as `Uri<&str>`.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    #[must_use]
    pub fn borrow(&self) -> Uri<&str> {
        Uri {
            val: &self.val,
            meta: self.meta,
        }
    }

    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    /// Returns the URI as a string slice.
    ///
    /// This is the rendering of the URI, fixed when it was constructed.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    fn slice(&'i self, start: usize, end: usize) -> &'o str {
        &self.as_str()[start..end]
    }

    fn eslice(&'i self, start: usize, end: usize) -> &'o EStr {
        EStr::new_validated(self.slice(start, end))
    }

    /// Returns the optional scheme component.
    ///
    /// Note that the scheme component is *case-insensitive*.
    /// See the documentation of [`Scheme`] for more details on comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::{component::Scheme, Uri};
    ///
    /// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
    ///
    /// let uri = Uri::parse("HTTP://example.com/")?;
    /// assert_eq!(uri.scheme(), Some(SCHEME_HTTP));
    ///
    /// let uri = Uri::parse("/path/to/file")?;
    /// assert_eq!(uri.scheme(), None);
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        self.meta
            .scheme_end
            .map(|i| Scheme::new_validated(self.slice(0, i.get())))
    }

    /// Returns the scheme-specific part, which is everything between
    /// the scheme and the fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let uri = Uri::parse("mailto:a@b.com#top")?;
    /// assert_eq!(uri.scheme_specific_part(), "a@b.com");
    ///
    /// let uri = Uri::parse("//example.com/a?b")?;
    /// assert_eq!(uri.scheme_specific_part(), "//example.com/a?b");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn scheme_specific_part(&'i self) -> &'o EStr {
        let len = self.as_str().len();
        self.eslice(self.meta.ssp_start(), self.meta.ssp_end(len))
    }

    /// Returns the optional authority component.
    ///
    /// An empty authority, as in `file:///etc`, is treated as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::{component::Authority, Uri};
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// assert!(matches!(uri.authority(), Some(Authority::Server(_))));
    ///
    /// let uri = Uri::parse("http://host:notaport/path")?;
    /// assert!(matches!(uri.authority(), Some(Authority::Registry(s)) if s == "host:notaport"));
    ///
    /// let uri = Uri::parse("file:///etc/hosts")?;
    /// assert!(uri.authority().is_none());
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        let AuthMeta { bounds, server } = self.meta.auth_meta?;
        let val = self.slice(bounds.0, bounds.1);
        Some(match server {
            Some(meta) => Authority::Server(ServerAuthority::new(val, meta)),
            None => Authority::Registry(EStr::new_validated(val)),
        })
    }

    fn server_authority(&'i self) -> Option<ServerAuthority<'o>> {
        match self.authority()? {
            Authority::Server(auth) => Some(auth),
            Authority::Registry(_) => None,
        }
    }

    /// Returns the optional user information of a server-based authority.
    #[must_use]
    pub fn user_info(&'i self) -> Option<&'o EStr> {
        self.server_authority()?.user_info()
    }

    /// Returns the raw host of a server-based authority.
    ///
    /// An IPv6 address is returned with its surrounding square brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("http://[::1]:8080/")?.host(), Some("[::1]"));
    /// assert_eq!(Uri::parse("http://Example.COM")?.host(), Some("Example.COM"));
    /// assert_eq!(Uri::parse("http://host:notaport/")?.host(), None);
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn host(&'i self) -> Option<&'o str> {
        Some(self.server_authority()?.host())
    }

    /// Returns the parsed host of a server-based authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::{component::Host, Uri};
    /// use std::net::Ipv4Addr;
    ///
    /// let uri = Uri::parse("http://127.0.0.1/")?;
    /// assert_eq!(uri.host_parsed(), Some(Host::Ipv4(Ipv4Addr::LOCALHOST)));
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&'i self) -> Option<Host<'o>> {
        Some(self.server_authority()?.host_parsed())
    }

    /// Returns the port of a server-based authority.
    ///
    /// An empty port, as in `http://example.com:/`, is treated as absent.
    #[must_use]
    pub fn port(&'i self) -> Option<u32> {
        self.server_authority()?.port()
    }

    /// Returns the path component, or `None` if the URI is opaque.
    ///
    /// The path of a hierarchical URI is always present, though it may be empty.
    #[must_use]
    pub fn path(&'i self) -> Option<&'o EStr> {
        if self.meta.opaque {
            return None;
        }
        let (start, end) = self.meta.path_bounds;
        Some(self.eslice(start, end))
    }

    /// Returns the optional query component.
    #[must_use]
    pub fn query(&'i self) -> Option<&'o EStr> {
        let end = self.meta.query_end?.get();
        Some(self.eslice(self.meta.path_bounds.1 + 1, end))
    }

    /// Returns the optional fragment component.
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o EStr> {
        let start = self.meta.fragment_start?;
        Some(self.eslice(start + 1, self.as_str().len()))
    }

    /// Checks whether the URI has a scheme.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether the URI is opaque.
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.meta.opaque
    }

    /// Checks whether the URI has a server-based authority.
    #[must_use]
    pub fn has_server_authority(&self) -> bool {
        matches!(self.meta.auth_meta, Some(AuthMeta { server: Some(_), .. }))
    }

    /// Renders the URI with every non-ASCII character percent-encoded
    /// as UTF-8 octets.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/caf\u{e9}?q=\u{6d4b}")?;
    /// assert_eq!(uri.to_ascii_string(), "http://example.com/caf%C3%A9?q=%E6%B5%8B");
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn to_ascii_string(&'i self) -> String {
        pct_enc::encode(self.as_str(), ASCII_ONLY)
    }

    /// Decomposes the authority strictly into user information, host and port.
    ///
    /// Returns a URI sharing this one's string, whose authority is
    /// server-based if it has one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the authority is registry-based, with the reason
    /// it failed to decompose.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc2396_uri::{error::ParseErrorKind, Uri};
    ///
    /// let uri = Uri::parse("http://host:notaport/path")?;
    /// let e = uri.parse_server_authority().unwrap_err();
    /// assert_eq!(e.kind(), ParseErrorKind::InvalidPort);
    ///
    /// let uri = Uri::parse("http://host:80/path")?;
    /// assert_eq!(uri.parse_server_authority()?.port(), Some(80));
    /// # Ok::<_, rfc2396_uri::ParseError>(())
    /// ```
    pub fn parse_server_authority(&'i self) -> Result<Uri<&'o str>, ParseError> {
        let s = self.as_str();
        let mut meta = self.meta;
        if let Some(auth_meta) = &mut meta.auth_meta {
            if auth_meta.server.is_none() {
                let (start, end) = auth_meta.bounds;
                auth_meta.server = parse::decompose_authority(&s[start..end], start, true)
                    .map_err(|e| e.with_input(s))?;
            }
        }
        Ok(Uri::new(s, meta))
    }
}

impl<T: Bos<str>> Uri<T> {
    pub(crate) fn make_ref(&self) -> Uri<&str> {
        Uri::new(self.as_str(), self.meta)
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Uri::parse).
    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Uri::parse).
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl Default for Uri<&str> {
    /// Creates an empty relative reference.
    fn default() -> Self {
        Uri::new("", Meta::default())
    }
}

impl Default for Uri<String> {
    /// Creates an empty relative reference.
    fn default() -> Self {
        Uri::new(String::new(), Meta::default())
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| de::Error::custom(format_args!("failed to parse URI: {e}")))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(|e| de::Error::custom(format_args!("failed to parse URI: {e}")))
    }
}
