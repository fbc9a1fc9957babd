#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::Uri;
use std::{
    cmp::Ordering,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash(u: &Uri<&str>) -> u64 {
    let mut hasher = DefaultHasher::new();
    u.hash(&mut hasher);
    hasher.finish()
}

fuzz_target!(|data: (&str, &str)| {
    let (Ok(x), Ok(y)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    assert_eq!(x == y, x.cmp(&y) == Ordering::Equal);
    assert_eq!(x.cmp(&y), y.cmp(&x).reverse());
    if x == y {
        assert_eq!(hash(&x), hash(&y));
    }
});
