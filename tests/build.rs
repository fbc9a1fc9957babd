use rfc2396_uri::{
    component::Host,
    error::{Component, ParseErrorKind::*},
    Uri,
};
use std::net::Ipv6Addr;

#[test]
fn build() {
    let u = Uri::builder()
        .scheme("foo")
        .user_info("us er")
        .host("example.com")
        .port(8042)
        .path("/over/there")
        .query("name=ferret")
        .fragment("nose")
        .build()
        .unwrap();
    assert_eq!(
        u.as_str(),
        "foo://us%20er@example.com:8042/over/there?name=ferret#nose"
    );
    assert_eq!(u.user_info().unwrap().decode(), "us er");
    assert_eq!(u.port(), Some(8042));

    let u = Uri::builder()
        .scheme("mailto")
        .scheme_specific_part("a b@c.com")
        .fragment("x#y")
        .build()
        .unwrap();
    assert!(u.is_opaque());
    assert_eq!(u.as_str(), "mailto:a%20b@c.com#x%23y");
    assert_eq!(u.fragment().unwrap().decode(), "x#y");

    let u = Uri::builder().host("::1").port(8080).build().unwrap();
    assert_eq!(u.as_str(), "//[::1]:8080");
    assert_eq!(u.host_parsed(), Some(Host::Ipv6(Ipv6Addr::LOCALHOST)));

    let u = Uri::builder().host("[::1]").build().unwrap();
    assert_eq!(u.as_str(), "//[::1]");

    let u = Uri::builder()
        .scheme("http")
        .authority("host:not a port")
        .path("/a b")
        .query("q r?s")
        .build()
        .unwrap();
    assert_eq!(u.as_str(), "http://host:not%20a%20port/a%20b?q%20r?s");
    assert!(!u.has_server_authority());

    let u = Uri::builder().user_info("a@b:c").host("h").build().unwrap();
    assert_eq!(u.as_str(), "//a%40b:c@h");

    let u = Uri::builder().path("a/b%").build().unwrap();
    assert_eq!(u.as_str(), "a/b%25");
    assert_eq!(u.path().unwrap().decode(), "a/b%");

    let u = Uri::builder().build().unwrap();
    assert_eq!(u.as_str(), "");
}

#[test]
fn build_error() {
    let e = Uri::builder()
        .scheme("mailto")
        .scheme_specific_part("a@b.com")
        .host("example.com")
        .build()
        .unwrap_err();
    assert_eq!(e.kind(), ConflictingComponents);
    assert_eq!(e.index(), None);

    let e = Uri::builder()
        .host("example.com")
        .authority("example.com")
        .build()
        .unwrap_err();
    assert_eq!(e.kind(), ConflictingComponents);

    let e = Uri::builder()
        .scheme("http")
        .path("a/b")
        .build()
        .unwrap_err();
    assert_eq!(e.kind(), RelativePath);
    assert_eq!(e.input(), "a/b");
    assert_eq!(e.index(), None);

    let e = Uri::builder().scheme("ht tp").build().unwrap_err();
    assert_eq!(e.kind(), UnexpectedChar(Component::Scheme));
    assert_eq!(e.index(), Some(2));

    let e = Uri::builder().scheme("1http").build().unwrap_err();
    assert_eq!(e.index(), Some(0));

    let e = Uri::builder().scheme("").build().unwrap_err();
    assert_eq!(e.kind(), ExpectedScheme);

    // A server-based authority must decompose.
    let e = Uri::builder().host("a_b").port(80).build().unwrap_err();
    assert_eq!(e.kind(), InvalidHostName);
    assert_eq!(e.input(), "//a_b:80");
    assert_eq!(e.index(), Some(2));

    let e = Uri::builder().port(80).build().unwrap_err();
    assert_eq!(e.kind(), ExpectedHost);

    let e = Uri::builder().host("1:2").build().unwrap_err();
    assert_eq!(e.kind(), InvalidIpv6Addr);
}
