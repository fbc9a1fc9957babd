#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc2396_uri::{component::Authority, Uri};

fuzz_target!(|data: &str| {
    let Ok(u) = Uri::parse(data) else {
        return;
    };

    let mut buf = String::with_capacity(data.len());
    if let Some(s) = u.scheme() {
        buf.push_str(s.as_str());
        buf.push(':');
    }
    match u.path() {
        None => {
            assert!(u.is_opaque());
            buf.push_str(u.scheme_specific_part().as_str());
        }
        Some(path) => {
            if let Some(a) = u.authority() {
                buf.push_str("//");
                buf.push_str(a.as_str());

                if let Authority::Server(a) = a {
                    let s = a.as_str();
                    let host_start = a.user_info().map_or(0, |ui| {
                        assert!(s.starts_with(ui.as_str()));
                        ui.len() + 1
                    });
                    assert!(s[host_start..].starts_with(a.host()));
                    let rest = &s[host_start + a.host().len()..];
                    match a.port() {
                        Some(p) => assert_eq!(rest[1..].parse::<u32>(), Ok(p)),
                        None => assert!(rest.is_empty() || rest == ":"),
                    }
                }
            } else if data[buf.len()..].starts_with("//") {
                // An empty authority.
                buf.push_str("//");
            }
            buf.push_str(path.as_str());
            if let Some(q) = u.query() {
                buf.push('?');
                buf.push_str(q.as_str());
            }
        }
    }
    if let Some(f) = u.fragment() {
        buf.push('#');
        buf.push_str(f.as_str());
    }
    assert_eq!(data, buf);

    match u.parse_server_authority() {
        Ok(strict) => assert_eq!(strict, u),
        Err(_) => assert!(!u.has_server_authority()),
    }
});
