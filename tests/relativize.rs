use rfc2396_uri::Uri;

#[track_caller]
fn check(base: &str, target: &str, expected: &str) {
    let base = Uri::parse(base).unwrap();
    let target = Uri::parse(target).unwrap();
    let rel = base.relativize(&target);
    assert_eq!(rel.as_str(), expected);
    assert_eq!(Uri::parse(rel.as_str()).unwrap(), rel);
}

#[track_caller]
fn round_trip(base: &str, target: &str) {
    let base = Uri::parse(base).unwrap();
    let target = Uri::parse(target).unwrap();
    let rel = base.relativize(&target);
    assert!(!rel.is_absolute());
    assert_eq!(base.resolve(&rel), target);
}

#[test]
fn relativize() {
    check("http://a/b/c/d", "http://a/b/c/e/f?q", "e/f?q");
    check("http://a/b/c/d", "http://a/b/c/d#s", "#s");
    check("http://a/b/c/d", "http://a/b/c/d?q", "?q");
    check("http://a/b/c/d", "http://a/b/c/d", "");
    check("http://a/b/c/", "http://a/b/c/g", "g");
    check("http://a/b/c/d", "http://a/b/c/", "");
    check("HTTP://a/b/c/d", "http://a/b/c/e", "e");

    // Dot segments are removed before comparison.
    check("http://a/b/x/../c/d", "http://a/b/c/./e", "e");

    // Guarded against being taken as a scheme or an authority.
    check("http://a/b/c/d", "http://a/b/c/g:h", "./g:h");
    check("http://a/b/c/", "http://a/b/c//g", ".//g");
    check("http://a", "http://a/g", "/g");

    check("a/b", "a/c", "c");
    check("/a/b", "/a/b/c", "b/c");
}

#[test]
fn relativize_unrelated() {
    check("http://a/b/c/d", "http://a/b/x", "http://a/b/x");
    check("http://a/b/c/d", "https://a/b/c/e", "https://a/b/c/e");
    check("http://a/b/c/d", "http://A/b/c/e", "http://A/b/c/e");
    check("http://a/b/c/d", "http://a:80/b/c/e", "http://a:80/b/c/e");
    check("http://a/b/c/d", "/b/c/e", "/b/c/e");
    check("mailto:a@b.com", "mailto:a@b.com/x", "mailto:a@b.com/x");
    check("http://a/b/c/d", "mailto:a@b.com", "mailto:a@b.com");
}

#[test]
fn relativize_then_resolve() {
    round_trip("http://a/b/c/d", "http://a/b/c/e/f?q#s");
    round_trip("http://a/b/c/d", "http://a/b/c/d#s");
    round_trip("http://a/b/c/d", "http://a/b/c/d?q");
    round_trip("http://a/b/c/d", "http://a/b/c/g:h");
    round_trip("http://a/b/c/", "http://a/b/c//g");
    round_trip("http://a", "http://a/g");
    round_trip("http://user@h:80/b/c", "http://user@h:80/b/x/y");
    round_trip("foo:/x/y", "foo:/x/z");
}
