#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::Uri;
use rfc2396_uri_fuzz::assert_reparses;

fn is_normalized(u: &Uri<&str>) -> bool {
    u.normalize().as_str() == u.as_str()
}

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(target)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    let rel = base.relativize(&target);
    assert_reparses(&rel);
    if rel.as_str() == target.as_str() {
        return;
    }
    assert!(!rel.is_absolute() && rel.authority().is_none());

    // Resolving the relative reference against the base gives back the target
    // when both paths are free of dot segments and the base has no query.
    let Some(target_path) = target.path() else {
        return;
    };
    if is_normalized(&base)
        && is_normalized(&target)
        && base.query().is_none()
        && !target_path.as_str().starts_with("..")
        && !target_path.as_str().starts_with("/.")
    {
        assert_eq!(base.resolve(&rel), target);
    }
});
