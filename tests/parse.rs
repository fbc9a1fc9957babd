use std::net::{Ipv4Addr, Ipv6Addr};

use rfc2396_uri::{
    component::{Authority, Host, Scheme},
    error::{Component, ParseErrorKind::*},
    pct_enc::EStr,
    Uri,
};

#[test]
fn parse_absolute() {
    let u = Uri::parse("http://user:pw@Example.COM:80/a/b/../c?q=1#f").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "http");
    assert_eq!(u.scheme_specific_part(), "//user:pw@Example.COM:80/a/b/../c?q=1");
    let a = u.authority().unwrap().server().unwrap();
    assert_eq!(a.as_str(), "user:pw@Example.COM:80");
    assert_eq!(a.user_info(), Some(EStr::new_or_panic("user:pw")));
    assert_eq!(a.host(), "Example.COM");
    assert_eq!(a.host_parsed(), Host::Domain("Example.COM"));
    assert_eq!(a.port(), Some(80));
    assert_eq!(u.user_info().unwrap(), "user:pw");
    assert_eq!(u.host(), Some("Example.COM"));
    assert_eq!(u.port(), Some(80));
    assert_eq!(u.path().unwrap(), "/a/b/../c");
    assert_eq!(u.query().unwrap(), "q=1");
    assert_eq!(u.fragment().unwrap(), "f");
    assert!(u.is_absolute());
    assert!(!u.is_opaque());
    assert!(u.has_server_authority());

    let u = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "ftp");
    assert_eq!(u.host(), Some("ftp.is.co.za"));
    assert_eq!(u.user_info(), None);
    assert_eq!(u.port(), None);
    assert_eq!(u.path().unwrap(), "/rfc/rfc1808.txt");
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);

    let u = Uri::parse("http://[::1]:8080/").unwrap();
    assert_eq!(u.host(), Some("[::1]"));
    assert_eq!(u.host_parsed(), Some(Host::Ipv6(Ipv6Addr::LOCALHOST)));
    assert_eq!(u.port(), Some(8080));
    assert_eq!(u.path().unwrap(), "/");

    let u = Uri::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(
        u.host_parsed(),
        Some(Host::Ipv6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x7)))
    );
    assert_eq!(u.path().unwrap(), "/c=GB");
    assert_eq!(u.query().unwrap(), "objectClass?one");

    let u = Uri::parse("telnet://192.0.2.16:80/").unwrap();
    assert_eq!(
        u.host_parsed(),
        Some(Host::Ipv4(Ipv4Addr::new(192, 0, 2, 16)))
    );
    assert_eq!(u.port(), Some(80));

    let u = Uri::parse("file:///etc/hosts").unwrap();
    assert!(u.authority().is_none());
    assert_eq!(u.host(), None);
    assert_eq!(u.path().unwrap(), "/etc/hosts");

    let u = Uri::parse("http://example.com:/").unwrap();
    assert_eq!(u.host(), Some("example.com"));
    assert_eq!(u.port(), None);

    let u = Uri::parse("http://h:2147483647/").unwrap();
    assert_eq!(u.port(), Some(2147483647));

    // A single leading plus sign is allowed.
    let u = Uri::parse("http://h:+80/").unwrap();
    assert!(u.has_server_authority());
    assert_eq!(u.port(), Some(80));
    assert_eq!(u, Uri::parse("http://h:80/").unwrap());
}

#[test]
fn parse_opaque() {
    let u = Uri::parse("mailto:a@b.com").unwrap();
    assert!(u.is_opaque());
    assert!(u.is_absolute());
    assert_eq!(u.scheme().unwrap().as_str(), "mailto");
    assert_eq!(u.scheme_specific_part(), "a@b.com");
    assert!(u.authority().is_none());
    assert_eq!(u.host(), None);
    assert_eq!(u.path(), None);
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);

    let u = Uri::parse("news:comp.infosystems.www.servers.unix").unwrap();
    assert!(u.is_opaque());
    assert_eq!(
        u.scheme_specific_part(),
        "comp.infosystems.www.servers.unix"
    );

    let u = Uri::parse("urn:isbn:096139210x?not-a-query#frag").unwrap();
    assert!(u.is_opaque());
    assert_eq!(u.scheme_specific_part(), "isbn:096139210x?not-a-query");
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment().unwrap(), "frag");
}

#[test]
fn parse_relative() {
    let u = Uri::parse("").unwrap();
    assert!(!u.is_absolute());
    assert!(!u.is_opaque());
    assert_eq!(u.scheme(), None);
    assert_eq!(u.path().unwrap(), "");
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);

    let u = Uri::parse("../a/b?c#d").unwrap();
    assert_eq!(u.scheme(), None);
    assert!(u.authority().is_none());
    assert_eq!(u.path().unwrap(), "../a/b");
    assert_eq!(u.query().unwrap(), "c");
    assert_eq!(u.fragment().unwrap(), "d");

    let u = Uri::parse("//example.com").unwrap();
    assert_eq!(u.host(), Some("example.com"));
    assert_eq!(u.path().unwrap(), "");

    let u = Uri::parse("?").unwrap();
    assert_eq!(u.path().unwrap(), "");
    assert_eq!(u.query().unwrap(), "");

    let u = Uri::parse("#").unwrap();
    assert_eq!(u.fragment().unwrap(), "");

    // A colon after the first slash does not start a scheme.
    let u = Uri::parse("a/b:c").unwrap();
    assert_eq!(u.scheme(), None);
    assert_eq!(u.path().unwrap(), "a/b:c");

    let u = Uri::parse("/caf\u{e9}").unwrap();
    assert_eq!(u.path().unwrap(), "/caf\u{e9}");
    assert_eq!(u.to_ascii_string(), "/caf%C3%A9");
}

#[test]
fn parse_registry_authority() {
    let u = Uri::parse("http://host:notaport/path").unwrap();
    assert!(!u.has_server_authority());
    assert!(matches!(u.authority(), Some(Authority::Registry(s)) if s == "host:notaport"));
    assert_eq!(u.authority().unwrap().as_str(), "host:notaport");
    assert!(u.authority().unwrap().server().is_none());
    assert_eq!(u.host(), None);
    assert_eq!(u.port(), None);
    assert_eq!(u.user_info(), None);
    assert_eq!(u.path().unwrap(), "/path");

    let e = u.parse_server_authority().unwrap_err();
    assert_eq!(e.kind(), InvalidPort);
    assert_eq!(e.index(), Some(12));
    assert_eq!(e.input(), "http://host:notaport/path");

    for s in ["http://h:+/", "http://h:++80/", "http://h:8+0/"] {
        let u = Uri::parse(s).unwrap();
        assert!(!u.has_server_authority());
        assert_eq!(u.parse_server_authority().unwrap_err().kind(), InvalidPort);
    }

    let u = Uri::parse("http://h:2147483648/").unwrap();
    assert!(!u.has_server_authority());
    assert_eq!(u.parse_server_authority().unwrap_err().kind(), InvalidPort);

    let u = Uri::parse("http://a_b.com/").unwrap();
    assert!(!u.has_server_authority());
    assert_eq!(
        u.parse_server_authority().unwrap_err().kind(),
        InvalidHostName
    );

    let u = Uri::parse("http://1.2.3.256/").unwrap();
    assert!(!u.has_server_authority());
    assert_eq!(
        u.parse_server_authority().unwrap_err().kind(),
        InvalidIpv4Addr
    );

    let u = Uri::parse("http://user@/").unwrap();
    assert!(!u.has_server_authority());
    let e = u.parse_server_authority().unwrap_err();
    assert_eq!(e.kind(), ExpectedHost);
    assert_eq!(e.index(), Some(12));
}

#[test]
fn parse_server_authority() {
    let u = Uri::parse("http://user@example.com:8042/over/there").unwrap();
    let strict = u.parse_server_authority().unwrap();
    assert_eq!(strict.as_str(), u.as_str());
    assert_eq!(strict.port(), Some(8042));
    assert_eq!(strict, u);

    // Nothing to decompose.
    let u = Uri::parse("mailto:a@b.com").unwrap();
    assert_eq!(u.parse_server_authority().unwrap(), u);
    let u = Uri::parse("/a/b").unwrap();
    assert_eq!(u.parse_server_authority().unwrap(), u);
}

#[test]
fn parse_owned() {
    let u = Uri::parse(String::from("http://example.com/")).unwrap();
    assert_eq!(u.host(), Some("example.com"));
    assert_eq!(u.borrow().as_str(), "http://example.com/");
    assert_eq!(u.into_string(), "http://example.com/");

    let u: Uri<String> = "foo:bar".parse().unwrap();
    assert!(u.is_opaque());

    let e = Uri::parse(String::from("a b")).unwrap_err();
    assert_eq!(e.into_input(), "a b");

    let u = Uri::parse("http://example.com/").unwrap().to_owned();
    assert_eq!(u.as_str(), "http://example.com/");
}

#[test]
fn scheme() {
    const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");

    let u = Uri::parse("HTTP://example.com/").unwrap();
    assert_eq!(u.scheme(), Some(SCHEME_HTTP));
    assert_eq!(u.scheme().unwrap().as_str(), "HTTP");

    assert!(Scheme::new("a+b-c.d").is_some());
    assert!(Scheme::new("1a").is_none());
    assert!(Scheme::new("").is_none());
}

#[test]
fn parse_error() {
    let e = Uri::parse(":hello").unwrap_err();
    assert_eq!(e.index(), Some(0));
    assert_eq!(e.kind(), ExpectedScheme);

    let e = Uri::parse("3ttp://a.com").unwrap_err();
    assert_eq!(e.index(), Some(0));
    assert_eq!(e.kind(), UnexpectedChar(Component::Scheme));

    let e = Uri::parse("exam=ple:foo").unwrap_err();
    assert_eq!(e.index(), Some(4));
    assert_eq!(e.kind(), UnexpectedChar(Component::Scheme));

    let e = Uri::parse("http:").unwrap_err();
    assert_eq!(e.index(), Some(5));
    assert_eq!(e.kind(), ExpectedSchemeSpecificPart);

    let e = Uri::parse("http://").unwrap_err();
    assert_eq!(e.index(), Some(7));
    assert_eq!(e.kind(), ExpectedAuthority);

    let e = Uri::parse("foo%xxd").unwrap_err();
    assert_eq!(e.index(), Some(3));
    assert_eq!(e.kind(), InvalidOctet(Component::Path));

    let e = Uri::parse("%").unwrap_err();
    assert_eq!(e.index(), Some(0));
    assert_eq!(e.kind(), InvalidOctet(Component::Path));

    let e = Uri::parse("http://a/b c").unwrap_err();
    assert_eq!(e.index(), Some(10));
    assert_eq!(e.kind(), UnexpectedChar(Component::Path));

    let e = Uri::parse("http://a/b?c d").unwrap_err();
    assert_eq!(e.index(), Some(12));
    assert_eq!(e.kind(), UnexpectedChar(Component::Query));

    let e = Uri::parse("http://a/b#c#d").unwrap_err();
    assert_eq!(e.index(), Some(12));
    assert_eq!(e.kind(), UnexpectedChar(Component::Fragment));

    let e = Uri::parse("mailto:a b").unwrap_err();
    assert_eq!(e.index(), Some(8));
    assert_eq!(e.kind(), UnexpectedChar(Component::SchemeSpecificPart));

    let e = Uri::parse("http://a b/").unwrap_err();
    assert_eq!(e.index(), Some(8));
    assert_eq!(e.kind(), UnexpectedChar(Component::Authority));

    let e = Uri::parse("http://us[er@host/").unwrap_err();
    assert_eq!(e.index(), Some(9));
    assert_eq!(e.kind(), UnexpectedChar(Component::UserInfo));

    let e = Uri::parse("http://a]b/").unwrap_err();
    assert_eq!(e.index(), Some(8));
    assert_eq!(e.kind(), UnexpectedChar(Component::Host));

    let e = Uri::parse("http://[::1/").unwrap_err();
    assert_eq!(e.index(), Some(7));
    assert_eq!(e.kind(), UnclosedIpLiteral);

    let e = Uri::parse("http://[1:2]/").unwrap_err();
    assert_eq!(e.index(), Some(7));
    assert_eq!(e.kind(), InvalidIpv6Addr);

    let e = Uri::parse("example://[44:55::66::77]").unwrap_err();
    assert_eq!(e.kind(), InvalidIpv6Addr);
}

#[test]
fn error_display() {
    let e = Uri::parse("a b").unwrap_err();
    assert_eq!(e.to_string(), "illegal character in path at index 1: a b");

    let e = Uri::parse("http://host:notaport/")
        .unwrap()
        .parse_server_authority()
        .unwrap_err();
    assert_eq!(e.to_string(), "invalid port at index 12: http://host:notaport/");
}

#[test]
#[should_panic = "illegal character in path"]
fn parse_or_panic() {
    let u = Uri::parse_or_panic("http://example.com/");
    assert_eq!(u.host(), Some("example.com"));
    let _ = Uri::parse_or_panic("a b");
}

#[test]
fn round_trip() {
    for s in [
        "http://user:pw@Example.COM:80/a/b/../c?q=1#f",
        "mailto:a@b.com",
        "http://host:notaport/path",
        "http://[::1]:8080/",
        "../a%20b?c#d",
        "file:///etc/hosts",
        "",
    ] {
        let u = Uri::parse(s).unwrap();
        let v = Uri::parse(u.to_string()).unwrap();
        assert_eq!(u, v);
        assert_eq!(v.as_str(), s);
    }
}
