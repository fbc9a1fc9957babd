//! URI components.

use crate::{
    internal::{HostMeta, ServerMeta},
    pct_enc::{table, EStr},
};
use core::net::{Ipv4Addr, Ipv6Addr};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A scheme component.
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively. Use [`as_str`](Self::as_str)
/// for a case-sensitive comparison.
///
/// # Examples
///
/// ```
/// use rfc2396_uri::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Uri::parse("HTTP://EXAMPLE.COM/")?.scheme().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name, that is, an ASCII
    /// letter followed by any number of letters, digits, `'+'`, `'-'` or `'.'`.
    /// For a non-panicking variant, use [`new`](Self::new).
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || !table::ALPHA.allows_ascii(bytes[0]) {
            return None;
        }
        let mut i = 1;
        while i < bytes.len() {
            if !table::SCHEME.allows_ascii(bytes[i]) {
                return None;
            }
            i += 1;
        }
        Some(Scheme::new_validated(s))
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// An authority component.
///
/// An authority is server-based when it decomposes into user information,
/// a valid host and an optional port. Otherwise it is registry-based and
/// kept as raw text.
///
/// # Examples
///
/// ```
/// use rfc2396_uri::{component::Authority, Uri};
///
/// let uri = Uri::parse("http://user@example.com:8042/")?;
/// let Some(Authority::Server(auth)) = uri.authority() else { panic!() };
/// assert_eq!(auth.user_info().unwrap(), "user");
/// assert_eq!(auth.host(), "example.com");
/// assert_eq!(auth.port(), Some(8042));
///
/// let uri = Uri::parse("http://a_b:8042/")?;
/// assert_eq!(uri.authority().unwrap().as_str(), "a_b:8042");
/// assert!(uri.authority().unwrap().server().is_none());
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub enum Authority<'a> {
    /// A server-based authority.
    Server(ServerAuthority<'a>),
    /// A registry-based authority.
    Registry(&'a EStr),
}

impl<'a> Authority<'a> {
    /// Returns the raw authority as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.as_estr().as_str()
    }

    /// Returns the raw authority as an `EStr` slice.
    #[must_use]
    pub fn as_estr(&self) -> &'a EStr {
        match *self {
            Authority::Server(auth) => EStr::new_validated(auth.val),
            Authority::Registry(s) => s,
        }
    }

    /// Returns the server-based authority, if any.
    #[must_use]
    pub fn server(&self) -> Option<ServerAuthority<'a>> {
        match *self {
            Authority::Server(auth) => Some(auth),
            Authority::Registry(_) => None,
        }
    }
}

/// A server-based authority, decomposed into user information, host and port.
#[derive(Clone, Copy)]
pub struct ServerAuthority<'a> {
    val: &'a str,
    meta: ServerMeta,
}

impl<'a> ServerAuthority<'a> {
    pub(crate) fn new(val: &'a str, meta: ServerMeta) -> Self {
        Self { val, meta }
    }

    /// Returns the raw authority as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.val
    }

    /// Returns the optional user information.
    #[must_use]
    pub fn user_info(&self) -> Option<&'a EStr> {
        let end = self.meta.userinfo_end?;
        Some(EStr::new_validated(&self.val[..end]))
    }

    /// Returns the raw host, with the square brackets of an IPv6 address kept.
    #[must_use]
    pub fn host(&self) -> &'a str {
        let (start, end) = self.meta.host_bounds;
        &self.val[start..end]
    }

    /// Returns the parsed host.
    #[must_use]
    pub fn host_parsed(&self) -> Host<'a> {
        match self.meta.host_meta {
            HostMeta::Ipv4(addr) => Host::Ipv4(addr),
            HostMeta::Ipv6(addr) => Host::Ipv6(addr),
            HostMeta::Domain => Host::Domain(self.host()),
        }
    }

    /// Returns the optional port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u32> {
        self.meta.port
    }
}

/// A parsed host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Host<'a> {
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
    /// A domain name, such as `example.com`.
    ///
    /// Domain names are case-insensitive.
    Domain(&'a str),
}
