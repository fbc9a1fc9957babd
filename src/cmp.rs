use crate::{
    component::{Authority, ServerAuthority},
    pct_enc::EStr,
    Uri,
};
use borrow_or_share::Bos;
use core::{
    cmp::Ordering,
    fmt::{self, Write},
    hash,
};

/// Yields the bytes of an `EStr` slice with the hexadecimal digits
/// of percent-encoded octets lowercased.
fn canonical_bytes(s: &EStr) -> impl Iterator<Item = u8> + '_ {
    let mut hex_left = 0;
    s.as_str().bytes().map(move |x| {
        if hex_left > 0 {
            hex_left -= 1;
            x.to_ascii_lowercase()
        } else {
            if x == b'%' {
                hex_left = 2;
            }
            x
        }
    })
}

fn escaped_eq(a: &EStr, b: &EStr) -> bool {
    a.len() == b.len() && canonical_bytes(a).eq(canonical_bytes(b))
}

fn escaped_cmp(a: &EStr, b: &EStr) -> Ordering {
    canonical_bytes(a).cmp(canonical_bytes(b))
}

fn opt_escaped_eq(a: Option<&EStr>, b: Option<&EStr>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => escaped_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

// `None` comes first.
fn opt_escaped_cmp(a: Option<&EStr>, b: Option<&EStr>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => escaped_cmp(a, b),
        _ => a.is_some().cmp(&b.is_some()),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|x| x.to_ascii_lowercase());
    let b = b.bytes().map(|x| x.to_ascii_lowercase());
    a.cmp(b)
}

fn server_eq(a: ServerAuthority<'_>, b: ServerAuthority<'_>) -> bool {
    a.host().eq_ignore_ascii_case(b.host())
        && a.port() == b.port()
        && opt_escaped_eq(a.user_info(), b.user_info())
}

fn authority_eq(a: Option<Authority<'_>>, b: Option<Authority<'_>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Authority::Server(a)), Some(Authority::Server(b))) => server_eq(a, b),
        (Some(Authority::Registry(a)), Some(Authority::Registry(b))) => escaped_eq(a, b),
        _ => false,
    }
}

fn authority_cmp(a: Option<Authority<'_>>, b: Option<Authority<'_>>) -> Ordering {
    match (a, b) {
        (Some(Authority::Server(a)), Some(Authority::Server(b))) => {
            opt_escaped_cmp(a.user_info(), b.user_info())
                .then_with(|| cmp_ignore_case(a.host(), b.host()))
                .then_with(|| a.port().cmp(&b.port()))
        }
        (Some(a), Some(b)) => escaped_cmp(a.as_estr(), b.as_estr()),
        _ => a.is_some().cmp(&b.is_some()),
    }
}

fn eq(a: Uri<&str>, b: Uri<&str>) -> bool {
    if !opt_escaped_eq(a.fragment(), b.fragment()) || a.scheme() != b.scheme() {
        return false;
    }
    match (a.path(), b.path()) {
        (None, None) => escaped_eq(a.scheme_specific_part(), b.scheme_specific_part()),
        (Some(a_path), Some(b_path)) => {
            escaped_eq(a_path, b_path)
                && opt_escaped_eq(a.query(), b.query())
                && authority_eq(a.authority(), b.authority())
        }
        _ => false,
    }
}

fn cmp(a: Uri<&str>, b: Uri<&str>) -> Ordering {
    let ord = match (a.scheme(), b.scheme()) {
        (Some(x), Some(y)) => cmp_ignore_case(x.as_str(), y.as_str()),
        (x, y) => x.is_some().cmp(&y.is_some()),
    };
    ord.then_with(|| match (a.path(), b.path()) {
        (None, None) => escaped_cmp(a.scheme_specific_part(), b.scheme_specific_part()),
        (Some(a_path), Some(b_path)) => authority_cmp(a.authority(), b.authority())
            .then_with(|| escaped_cmp(a_path, b_path))
            .then_with(|| opt_escaped_cmp(a.query(), b.query())),
        // Hierarchical before opaque.
        (x, y) => y.is_some().cmp(&x.is_some()),
    })
    .then_with(|| opt_escaped_cmp(a.fragment(), b.fragment()))
}

/// Streams a canonical rendering into a hasher through a fixed buffer,
/// so that equal renderings always produce the same sequence of writes.
struct HashWriter<'a, H> {
    state: &'a mut H,
    buf: [u8; 64],
    len: usize,
}

impl<'a, H: hash::Hasher> HashWriter<'a, H> {
    fn new(state: &'a mut H) -> Self {
        Self {
            state,
            buf: [0; 64],
            len: 0,
        }
    }

    fn push(&mut self, x: u8) {
        if self.len == self.buf.len() {
            self.flush();
        }
        self.buf[self.len] = x;
        self.len += 1;
    }

    fn push_bytes(&mut self, bytes: impl Iterator<Item = u8>) {
        for x in bytes {
            self.push(x);
        }
    }

    fn flush(&mut self) {
        self.state.write(&self.buf[..self.len]);
        self.len = 0;
    }

    fn finish(mut self) {
        self.flush();
    }
}

impl<H: hash::Hasher> Write for HashWriter<'_, H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.bytes());
        Ok(())
    }
}

fn hash<H: hash::Hasher>(uri: Uri<&str>, state: &mut H) {
    let mut w = HashWriter::new(state);

    if let Some(scheme) = uri.scheme() {
        w.push_bytes(scheme.as_str().bytes().map(|x| x.to_ascii_lowercase()));
        w.push(b':');
    }

    match uri.path() {
        None => w.push_bytes(canonical_bytes(uri.scheme_specific_part())),
        Some(path) => {
            match uri.authority() {
                Some(Authority::Server(auth)) => {
                    w.push_bytes(b"//".iter().copied());
                    if let Some(user_info) = auth.user_info() {
                        w.push_bytes(canonical_bytes(user_info));
                        w.push(b'@');
                    }
                    w.push_bytes(auth.host().bytes().map(|x| x.to_ascii_lowercase()));
                    if let Some(port) = auth.port() {
                        // Writing to a `HashWriter` never fails.
                        let _ = write!(w, ":{port}");
                    }
                }
                Some(Authority::Registry(auth)) => {
                    w.push_bytes(b"//".iter().copied());
                    w.push_bytes(canonical_bytes(auth));
                }
                None => {}
            }
            w.push_bytes(canonical_bytes(path));
            if let Some(query) = uri.query() {
                w.push(b'?');
                w.push_bytes(canonical_bytes(query));
            }
        }
    }

    if let Some(fragment) = uri.fragment() {
        w.push(b'#');
        w.push_bytes(canonical_bytes(fragment));
    }
    w.finish();
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    /// Compares two URIs component by component.
    ///
    /// Schemes and hosts are compared ignoring ASCII case, ports as integers,
    /// and every other component by its raw string, except that the
    /// hexadecimal digits of percent-encoded octets are compared
    /// case-insensitively.
    fn eq(&self, other: &Uri<U>) -> bool {
        eq(self.make_ref(), other.make_ref())
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

/// Compares the raw string of a URI with a string slice.
impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    /// Hashes a canonical rendering of the URI, consistent with equality:
    /// the scheme and the host are lowercased, the port is rendered as
    /// an integer, and the hexadecimal digits of percent-encoded octets
    /// are lowercased.
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash(self.make_ref(), state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    /// Orders URIs component by component, consistent with equality.
    ///
    /// URIs are ordered by scheme (ignoring case), with hierarchical ones
    /// before opaque ones. Opaque URIs are then ordered by scheme-specific
    /// part. Hierarchical ones are ordered by authority, path and query.
    /// The fragment comes last. An absent component comes before a present one.
    fn cmp(&self, other: &Self) -> Ordering {
        cmp(self.make_ref(), other.make_ref())
    }
}
