#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::{
    error::Component,
    pct_enc::{decode, encode, table, validate},
};

fuzz_target!(|data: &str| {
    for t in [
        table::USER_INFO,
        table::PATH,
        table::AUTHORITY,
        table::FILE_AND_QUERY,
        table::ALL_LEGAL,
    ] {
        let encoded = encode(data, t);
        assert!(validate(&encoded, t, Component::Path).is_ok());
        assert_eq!(decode(&encoded), data);
    }

    let ascii = encode(data, table::ASCII_ONLY);
    assert!(ascii.is_ascii());

    let _ = decode(data);
});
