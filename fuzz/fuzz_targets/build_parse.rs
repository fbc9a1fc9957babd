#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use rfc2396_uri::{pct_enc::EStr, Uri};

#[derive(arbitrary::Arbitrary, Debug)]
struct Server<'a> {
    user_info: Option<&'a str>,
    host: Option<&'a str>,
    port: Option<u32>,
}

#[derive(arbitrary::Arbitrary, Debug)]
enum Shape<'a> {
    Opaque(&'a str),
    Server(Server<'a>),
    Registry(Option<&'a str>),
}

#[derive(arbitrary::Arbitrary, Debug)]
struct UriComponents<'a> {
    scheme: Option<&'a str>,
    shape: Shape<'a>,
    path: Option<&'a str>,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fuzz_target!(|c: UriComponents<'_>| {
    let mut b = Uri::builder();
    if let Some(s) = c.scheme {
        b = b.scheme(s);
    }
    match c.shape {
        Shape::Opaque(ssp) => b = b.scheme_specific_part(ssp),
        Shape::Server(s) => {
            if let Some(ui) = s.user_info {
                b = b.user_info(ui);
            }
            if let Some(h) = s.host {
                b = b.host(h);
            }
            if let Some(p) = s.port {
                b = b.port(p);
            }
        }
        Shape::Registry(a) => {
            if let Some(a) = a {
                b = b.authority(a);
            }
        }
    }
    if let Some(p) = c.path {
        b = b.path(p);
    }
    if let Some(q) = c.query {
        b = b.query(q);
    }
    if let Some(f) = c.fragment {
        b = b.fragment(f);
    }

    let Ok(u1) = b.build() else {
        return;
    };

    if let Some(f) = c.fragment {
        assert_eq!(u1.fragment().map(EStr::decode).as_deref(), Some(f));
    }

    rfc2396_uri_fuzz::assert_reparses(&u1);
});
