#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::Uri;
use rfc2396_uri_fuzz::assert_reparses;

fuzz_target!(|data: &str| {
    let Ok(u) = Uri::parse(data) else {
        return;
    };

    let u1 = u.normalize();
    assert_reparses(&u1);

    // `normalize` is idempotent.
    assert_eq!(u1.normalize().as_str(), u1.as_str());
});
