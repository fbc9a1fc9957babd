use rfc2396_uri::Uri;

/// Checks that re-parsing the string of a URI yields the same components.
pub fn assert_reparses(u1: &Uri<String>) {
    let u2 = Uri::parse(u1.as_str()).unwrap();

    assert_eq!(u1.scheme(), u2.scheme());
    assert_eq!(u1.is_opaque(), u2.is_opaque());
    assert_eq!(u1.scheme_specific_part(), u2.scheme_specific_part());
    assert_eq!(u1.authority().is_some(), u2.authority().is_some());

    if let Some(a1) = u1.authority() {
        let a2 = u2.authority().unwrap();
        assert_eq!(a1.as_str(), a2.as_str());
        assert_eq!(u1.has_server_authority(), u2.has_server_authority());
        assert_eq!(u1.user_info(), u2.user_info());
        assert_eq!(u1.host(), u2.host());
        assert_eq!(u1.host_parsed(), u2.host_parsed());
        assert_eq!(u1.port(), u2.port());
    }

    assert_eq!(u1.path(), u2.path());
    assert_eq!(u1.query(), u2.query());
    assert_eq!(u1.fragment(), u2.fragment());
    assert_eq!(*u1, u2);
}
