use crate::{
    component::{Authority, Scheme, ServerAuthority},
    error::{Component, ParseError, ParseErrorKind},
    pct_enc::EStr,
    Uri,
};
use borrow_or_share::Bos;
use core::fmt;

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Scheme => "scheme",
            Component::SchemeSpecificPart => "scheme-specific part",
            Component::Authority => "authority",
            Component::UserInfo => "user information",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::InvalidOctet(c) => {
                return write!(f, "invalid percent-encoded octet in {c}")
            }
            ParseErrorKind::UnexpectedChar(c) => return write!(f, "illegal character in {c}"),
            ParseErrorKind::ExpectedScheme => "expected scheme name",
            ParseErrorKind::ExpectedSchemeSpecificPart => "expected scheme-specific part",
            ParseErrorKind::ExpectedAuthority => "expected authority",
            ParseErrorKind::ExpectedHost => "expected host",
            ParseErrorKind::InvalidPort => "invalid port",
            ParseErrorKind::UnclosedIpLiteral => "expected a closing square bracket",
            ParseErrorKind::InvalidIpv6Addr => "malformed IPv6 address",
            ParseErrorKind::InvalidIpv4Addr => "malformed IPv4 address",
            ParseErrorKind::InvalidHostName => "illegal character in host name",
            ParseErrorKind::RelativePath => "relative path in absolute URI",
            ParseErrorKind::ConflictingComponents => "conflicting URI components",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{} at index {}: {}", self.kind, i, self.input),
            None => write!(f, "{}: {}", self.kind, self.input),
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseError")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("input", &self.input)
            .finish()
    }
}

impl<T: Bos<str>> fmt::Debug for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("scheme_specific_part", &self.scheme_specific_part())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Uri<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Server(auth) => f.debug_tuple("Server").field(auth).finish(),
            Authority::Registry(auth) => f.debug_tuple("Registry").field(auth).finish(),
        }
    }
}

impl fmt::Display for Authority<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for ServerAuthority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerAuthority")
            .field("user_info", &self.user_info())
            .field("host", &self.host_parsed())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for ServerAuthority<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}
