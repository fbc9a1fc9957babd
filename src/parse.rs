use crate::{
    error::{Component, ParseErrorKind, RawError},
    host,
    internal::{AuthMeta, Meta, ServerMeta},
    log,
    pct_enc::{self, table::*},
};
use core::num::NonZeroUsize;

type Result<T> = core::result::Result<T, RawError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:expr) => {
        return Err(RawError {
            index: Some($index),
            kind: $kind,
        })
    };
}

pub(crate) use err;

pub(crate) fn parse(s: &str, force_server_authority: bool) -> Result<Meta> {
    let bytes = s.as_bytes();
    let mut out = Meta::default();

    // Everything after the first '#' is the fragment.
    let end = match memchr::memchr(b'#', bytes) {
        Some(i) => {
            pct_enc::check(&s[i + 1..], i + 1, ALL_LEGAL, Component::Fragment)?;
            out.fragment_start = Some(i);
            i
        }
        None => s.len(),
    };

    let mut parser = Parser {
        s,
        force_server_authority,
        reader: Reader::new(&bytes[..end]),
        out,
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// # Preconditions and guarantees
///
/// Before parsing, ensure that `pos == 0` and that `reader` covers the input
/// up to the fragment boundary. Start and finish parsing by calling
/// `parse_from_scheme`. When parsing succeeds, all output indexes are within
/// bounds, correctly ordered, and every component they define is validated.
struct Parser<'a> {
    s: &'a str,
    force_server_authority: bool,
    reader: Reader<'a>,
    out: Meta,
}

/// A scanner over the bytes of a URI.
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    pub(crate) fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    pub(crate) fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    pub(crate) fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Returns the index of the first remaining byte that is one of the
    /// ASCII delimiters, or the length if there is none.
    pub(crate) fn find(&self, delims: &[u8]) -> usize {
        let rem = &self.bytes[self.pos..];
        let i = match *delims {
            [] => None,
            [a] => memchr::memchr(a, rem),
            [a, b] => memchr::memchr2(a, b, rem),
            [a, b, c] => memchr::memchr3(a, b, c, rem),
            _ => rem.iter().position(|x| delims.contains(x)),
        };
        i.map_or(self.len(), |i| self.pos + i)
    }

    /// Consumes bytes up to the first delimiter (exclusive) or the end,
    /// returning the bounds of the consumed span.
    pub(crate) fn consume_until(&mut self, delims: &[u8]) -> (usize, usize) {
        let start = self.pos;
        // INVARIANT: A delimiter is ASCII, so skipping up to it is fine.
        self.skip(self.find(delims) - start);
        (start, self.pos)
    }
}

impl Parser<'_> {
    fn check(&self, (start, end): (usize, usize), table: Table, c: Component) -> Result<()> {
        pct_enc::check(&self.s[start..end], start, table, c)
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        let colon = self.reader.find(b":/?");
        if self.reader.bytes.get(colon) != Some(&b':') {
            // Relative reference.
            return self.parse_from_authority();
        }

        if colon == 0 {
            err!(0, ParseErrorKind::ExpectedScheme);
        }
        for (i, &x) in self.reader.bytes[..colon].iter().enumerate() {
            let valid = if i == 0 {
                ALPHA.allows_ascii(x)
            } else {
                SCHEME.allows_ascii(x)
            };
            if !valid {
                err!(i, ParseErrorKind::UnexpectedChar(Component::Scheme));
            }
        }
        self.out.scheme_end = NonZeroUsize::new(colon);

        // INVARIANT: Skipping the scheme and ":" is fine.
        self.reader.skip(colon + 1);
        if !self.reader.has_remaining() {
            err!(self.reader.pos, ParseErrorKind::ExpectedSchemeSpecificPart);
        }

        if self.reader.peek(0) != Some(b'/') {
            let ssp = self.reader.consume_until(&[]);
            self.check(ssp, ALL_LEGAL, Component::SchemeSpecificPart)?;
            self.out.opaque = true;
            return Ok(());
        }
        self.parse_from_authority()
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        let mut auth = None;
        if self.reader.read_str("//") {
            if self.reader.pos == self.s.len() {
                err!(self.reader.pos, ParseErrorKind::ExpectedAuthority);
            }
            let bounds = self.reader.consume_until(b"/?");
            if bounds.0 < bounds.1 {
                self.check(bounds, AUTHORITY, Component::Authority)?;
                auth = Some(bounds);
            }
        }

        let path = self.reader.consume_until(b"?");
        self.check(path, PATH, Component::Path)?;
        self.out.path_bounds = path;

        if self.reader.read_str("?") {
            let query = self.reader.consume_until(&[]);
            self.check(query, ALL_LEGAL, Component::Query)?;
            self.out.query_end = NonZeroUsize::new(query.1);
        }

        if let Some(bounds) = auth {
            let server = decompose_authority(
                &self.s[bounds.0..bounds.1],
                bounds.0,
                self.force_server_authority,
            )?;
            self.out.auth_meta = Some(AuthMeta { bounds, server });
        }
        Ok(())
    }
}

/// Decomposes an authority into user information, host and port.
///
/// `offset` is the index of the authority in the whole input, used for errors.
/// Returns `Ok(None)` if the authority is registry-based and `force` is `false`.
pub(crate) fn decompose_authority(
    auth: &str,
    offset: usize,
    force: bool,
) -> Result<Option<ServerMeta>> {
    let bytes = auth.as_bytes();

    let (userinfo_end, host_start) = match memchr::memchr(b'@', bytes) {
        Some(i) => {
            if let Some(j) = memchr::memchr2(b'[', b']', &bytes[..i]) {
                err!(offset + j, ParseErrorKind::UnexpectedChar(Component::UserInfo));
            }
            (Some(i), i + 1)
        }
        None => (None, 0),
    };

    let rest = &bytes[host_start..];
    let host_end = match (memchr::memrchr(b':', rest), memchr::memchr(b']', rest)) {
        (Some(colon), bracket) if bracket.map_or(true, |b| b < colon) => host_start + colon,
        _ => bytes.len(),
    };

    let mut port = None;
    if host_end < bytes.len() {
        let port_str = &auth[host_end + 1..];
        if !port_str.is_empty() {
            match parse_port(port_str) {
                Some(p) => port = Some(p),
                None => {
                    let e = RawError {
                        index: Some(offset + host_end + 1),
                        kind: ParseErrorKind::InvalidPort,
                    };
                    return abandon(auth, e, force);
                }
            }
        }
    }

    let host = &auth[host_start..host_end];
    if host.is_empty() {
        let e = RawError {
            index: Some(offset + host_start),
            kind: ParseErrorKind::ExpectedHost,
        };
        return abandon(auth, e, force);
    }

    let host_meta = match host::validate(host, offset + host_start)? {
        Ok(meta) => meta,
        Err(e) => return abandon(auth, e, force),
    };

    Ok(Some(ServerMeta {
        userinfo_end,
        host_bounds: (host_start, host_end),
        host_meta,
        port,
    }))
}

/// Gives up decomposing the authority, failing only if decomposition is forced.
#[cfg_attr(not(feature = "log"), allow(unused_variables))]
fn abandon(auth: &str, e: RawError, force: bool) -> Result<Option<ServerMeta>> {
    if force {
        return Err(e);
    }
    log::trace!(
        "registry-based authority {:?}: {:?} at {:?}",
        auth,
        e.kind,
        e.index
    );
    Ok(None)
}

/// Parses a port made of ASCII digits, optionally preceded by a single `'+'`,
/// into a non-negative 31-bit integer.
fn parse_port(s: &str) -> Option<u32> {
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    let mut port: u32 = 0;
    for x in s.bytes() {
        if !x.is_ascii_digit() {
            return None;
        }
        port = port.checked_mul(10)?.checked_add(u32::from(x - b'0'))?;
        if port > i32::MAX as u32 {
            return None;
        }
    }
    Some(port)
}
