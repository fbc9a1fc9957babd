use crate::{
    component::Scheme,
    error::{Component, ParseError, ParseErrorKind},
    internal,
    pct_enc::{self, table::*},
    Uri,
};
use alloc::string::String;
use core::fmt::Write;

/// A builder for URI.
///
/// This struct is created by [`Uri::builder`]. Components are supplied
/// *decoded*: every character not allowed in a component is percent-encoded
/// as UTF-8 octets, a percent sign included.
///
/// # Shapes
///
/// A URI is composed in one of three shapes, depending on which
/// components are set:
///
/// - Opaque: [`scheme`], [`scheme_specific_part`] and [`fragment`].
/// - Server-based: [`scheme`], [`user_info`], [`host`], [`port`], [`path`],
///   [`query`] and [`fragment`]. The authority must decompose into a valid
///   host and port. A host containing `':'` without square brackets is
///   taken as an IPv6 address and enclosed in brackets.
/// - Registry-based: [`scheme`], [`authority`], [`path`], [`query`]
///   and [`fragment`]. The authority is kept as is if it does not decompose.
///
/// The composed string is then parsed as usual.
///
/// [`scheme`]: Self::scheme
/// [`scheme_specific_part`]: Self::scheme_specific_part
/// [`user_info`]: Self::user_info
/// [`host`]: Self::host
/// [`port`]: Self::port
/// [`authority`]: Self::authority
/// [`path`]: Self::path
/// [`query`]: Self::query
/// [`fragment`]: Self::fragment
///
/// # Examples
///
/// ```
/// use rfc2396_uri::Uri;
///
/// let uri = Uri::builder()
///     .scheme("foo")
///     .user_info("us er")
///     .host("example.com")
///     .port(8042)
///     .path("/over/there")
///     .query("name=ferret")
///     .fragment("nose")
///     .build()?;
///
/// assert_eq!(uri.as_str(), "foo://us%20er@example.com:8042/over/there?name=ferret#nose");
///
/// let uri = Uri::builder().scheme("mailto").scheme_specific_part("a@b.com").build()?;
/// assert!(uri.is_opaque());
///
/// let uri = Uri::builder().host("::1").build()?;
/// assert_eq!(uri.as_str(), "//[::1]");
/// # Ok::<_, rfc2396_uri::ParseError>(())
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Builder<'a> {
    scheme: Option<&'a str>,
    scheme_specific_part: Option<&'a str>,
    user_info: Option<&'a str>,
    host: Option<&'a str>,
    port: Option<u32>,
    authority: Option<&'a str>,
    path: Option<&'a str>,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> Builder<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme component.
    pub fn scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the scheme-specific part of an opaque URI.
    pub fn scheme_specific_part(mut self, ssp: &'a str) -> Self {
        self.scheme_specific_part = Some(ssp);
        self
    }

    /// Sets the user information of a server-based authority.
    pub fn user_info(mut self, user_info: &'a str) -> Self {
        self.user_info = Some(user_info);
        self
    }

    /// Sets the host of a server-based authority.
    pub fn host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the port of a server-based authority.
    pub fn port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the authority, which is kept registry-based if it does not decompose.
    pub fn authority(mut self, authority: &'a str) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Sets the path component.
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets the query component.
    pub fn query(mut self, query: &'a str) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the fragment component.
    pub fn fragment(mut self, fragment: &'a str) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Builds the URI.
    ///
    /// With nothing set, the result is an empty relative reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if
    ///
    /// - components of different shapes are set together
    ///   ([`ConflictingComponents`]);
    /// - the scheme is set along with a non-empty path not starting
    ///   with `'/'` ([`RelativePath`]);
    /// - the scheme is invalid or the composed string fails to parse,
    ///   including when a server-based authority does not decompose.
    ///
    /// [`ConflictingComponents`]: ParseErrorKind::ConflictingComponents
    /// [`RelativePath`]: ParseErrorKind::RelativePath
    pub fn build(self) -> Result<Uri<String>, ParseError> {
        let server = self.user_info.is_some() || self.host.is_some() || self.port.is_some();
        let hier = self.authority.is_some() || self.path.is_some() || self.query.is_some();
        if (self.scheme_specific_part.is_some() && (server || hier))
            || (server && self.authority.is_some())
        {
            return Err(ParseError::new(
                String::new(),
                None,
                ParseErrorKind::ConflictingComponents,
            ));
        }

        let mut buf = String::new();
        if let Some(scheme) = self.scheme {
            check_scheme(scheme)?;
            buf.push_str(scheme);
            buf.push(':');
        }

        if let Some(ssp) = self.scheme_specific_part {
            pct_enc::encode_to(ssp, ALL_LEGAL, &mut buf);
            self.push_fragment(&mut buf);
            return internal::parse_owned(buf, false);
        }

        if let (Some(_), Some(path)) = (self.scheme, self.path) {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(ParseError::new(path, None, ParseErrorKind::RelativePath));
            }
        }

        if server {
            buf.push_str("//");
            if let Some(user_info) = self.user_info {
                pct_enc::encode_to(user_info, USER_INFO, &mut buf);
                buf.push('@');
            }
            if let Some(host) = self.host {
                if host.contains(':') && !host.contains(&['[', ']'][..]) {
                    buf.push('[');
                    buf.push_str(host);
                    buf.push(']');
                } else {
                    buf.push_str(host);
                }
            }
            if let Some(port) = self.port {
                // Writing to a `String` never fails.
                let _ = write!(buf, ":{port}");
            }
        } else if let Some(authority) = self.authority {
            buf.push_str("//");
            pct_enc::encode_to(authority, AUTHORITY, &mut buf);
        }

        if let Some(path) = self.path {
            pct_enc::encode_to(path, PATH, &mut buf);
        }
        if let Some(query) = self.query {
            buf.push('?');
            pct_enc::encode_to(query, ALL_LEGAL, &mut buf);
        }
        self.push_fragment(&mut buf);

        internal::parse_owned(buf, server)
    }

    fn push_fragment(&self, buf: &mut String) {
        if let Some(fragment) = self.fragment {
            buf.push('#');
            pct_enc::encode_to(fragment, ALL_LEGAL, buf);
        }
    }
}

fn check_scheme(scheme: &str) -> Result<(), ParseError> {
    if Scheme::new(scheme).is_some() {
        return Ok(());
    }
    let (index, kind) = match scheme.char_indices().find(|&(i, ch)| {
        !ch.is_ascii() || !(if i == 0 { ALPHA } else { SCHEME }).allows_ascii(ch as u8)
    }) {
        Some((i, _)) => (Some(i), ParseErrorKind::UnexpectedChar(Component::Scheme)),
        None => (Some(0), ParseErrorKind::ExpectedScheme),
    };
    Err(ParseError::new(scheme, index, kind))
}
