#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::Uri;
use rfc2396_uri_fuzz::assert_reparses;

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(r)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    let u1 = base.resolve(&r);
    assert_reparses(&u1);
    assert_eq!(base.resolve_str(data.1).unwrap().as_str(), u1.as_str());
});
