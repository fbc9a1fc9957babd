use rfc2396_uri::Uri;

trait Test {
    fn pass(&self, r: &str, expected: &str);
}

impl Test for Uri<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let res = self.resolve(&Uri::parse(r).unwrap());
        assert_eq!(res.as_str(), expected);
        assert_eq!(self.resolve_str(r).unwrap().as_str(), expected);
        assert_eq!(Uri::parse(res.as_str()).unwrap(), res);
    }
}

#[test]
fn resolve() {
    // Examples from Appendix C of RFC 2396.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");

    // An empty path with a query keeps the whole base path.
    base.pass("?y", "http://a/b/c/d;p?y");

    // Excess ".." segments are discarded at the root.
    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");
    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");

    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");
    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");
    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    // An absolute reference is taken as is, even with the same scheme.
    base.pass("http:g", "http:g");
    base.pass("http:/g", "http:/g");
}

#[test]
fn resolve_edge_cases() {
    // The path is made absolute when there is an authority.
    let base = Uri::parse("http://a").unwrap();
    base.pass("g", "http://a/g");
    base.pass("?q", "http://a?q");
    base.pass(".", "http://a");
    base.pass("./", "http://a");
    base.pass("../g", "http://a/g");
    base.pass("#s", "http://a#s");
    let base = Uri::parse("http://a?x").unwrap();
    base.pass("./g:h", "http://a/g:h");

    // The authority of the reference keeps its decomposition.
    let base = Uri::parse("foo:/x").unwrap();
    let res = base.resolve(&Uri::parse("//user@h:8080/p").unwrap());
    assert_eq!(res.as_str(), "foo://user@h:8080/p");
    assert_eq!(res.port(), Some(8080));
    assert_eq!(res.user_info().unwrap(), "user");

    // A path starting with "//" is guarded when there is no authority.
    let base = Uri::parse("foo:/").unwrap();
    base.pass(".//a", "foo:/.//a");

    // Relative bases.
    let base = Uri::parse("a/b").unwrap();
    base.pass("c", "a/c");
    base.pass("../../c", "c");
    base.pass("./x:y", "a/x:y");
    base.pass("../x:y", "./x:y");

    // Opaque bases resolve nothing.
    let base = Uri::parse("mailto:a@b.com").unwrap();
    base.pass("g", "g");
    base.pass("#s", "#s");
}

#[test]
fn resolve_error() {
    let base = Uri::parse("http://a/").unwrap();
    let e = base.resolve_str("a b").unwrap_err();
    assert_eq!(e.index(), Some(1));
    assert_eq!(e.input(), "a b");
}
