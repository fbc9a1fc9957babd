//! Host validation.

use crate::{
    error::{Component, ParseErrorKind, RawError},
    internal::HostMeta,
    parse::{err, Reader},
    pct_enc::table::DOMAIN,
};
use core::net::{Ipv4Addr, Ipv6Addr};

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

/// Classifies and validates a non-empty host.
///
/// The outer `Err` is a hard failure, raised for malformed IP literals and
/// misplaced square brackets. The inner `Err` means the host is neither
/// a domain name nor an IPv4 address, which leaves the authority
/// registry-based unless decomposition is forced.
///
/// `offset` is the index of the host in the whole input, used for errors.
pub(crate) fn validate(host: &str, offset: usize) -> Result<Result<HostMeta, RawError>, RawError> {
    let bytes = host.as_bytes();

    if let Some(inner) = host.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            err!(offset, ParseErrorKind::UnclosedIpLiteral);
        };
        return match parse_v6(inner.as_bytes()) {
            Some(addr) => Ok(Ok(HostMeta::Ipv6(addr))),
            None => err!(offset, ParseErrorKind::InvalidIpv6Addr),
        };
    }

    // Square brackets may only enclose an IP literal.
    if let Some(i) = memchr::memchr2(b'[', b']', bytes) {
        err!(offset + i, ParseErrorKind::UnexpectedChar(Component::Host));
    }

    let last_label_is_numeric = match memchr::memrchr(b'.', bytes) {
        Some(i) => bytes.get(i + 1).is_some_and(u8::is_ascii_digit),
        None => false,
    };

    Ok(if !last_label_is_numeric {
        if is_valid_domain(host) {
            Ok(HostMeta::Domain)
        } else {
            Err(RawError {
                index: Some(offset),
                kind: ParseErrorKind::InvalidHostName,
            })
        }
    } else {
        match parse_v4(bytes) {
            Some(addr) => Ok(HostMeta::Ipv4(addr)),
            None => Err(RawError {
                index: Some(offset),
                kind: ParseErrorKind::InvalidIpv4Addr,
            }),
        }
    })
}

fn is_valid_domain(host: &str) -> bool {
    if !host.bytes().all(|x| DOMAIN.allows_ascii(x)) {
        return false;
    }

    // Trailing empty labels are ignored.
    let trimmed = host.trim_end_matches('.');
    if trimmed.is_empty() {
        return false;
    }

    let mut last = "";
    for label in trimmed.split('.') {
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        last = label;
    }

    // A numeric last label is only fine when it is the whole host.
    last == host || !last.starts_with(|c: char| c.is_ascii_digit())
}

/// Parses an IPv4 address of four decimal octets without leading zeros.
pub(crate) fn parse_v4(bytes: &[u8]) -> Option<Ipv4Addr> {
    let mut reader = Reader::new(bytes);
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => Some(addr.into()),
        _ => None,
    }
}

/// Parses an IPv6 address in its text form, without square brackets.
pub(crate) fn parse_v6(bytes: &[u8]) -> Option<Ipv6Addr> {
    let mut reader = Reader::new(bytes);
    match reader.read_v6() {
        Some(segs) if !reader.has_remaining() => Some(segs.into()),
        _ => None,
    }
}

impl Reader<'_> {
    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_i = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_i) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_i != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_i = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == ellipsis_i) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_i == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_i..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let Some(first) = self.peek(0) else {
            return colon.then_some(Seg::SingleColon);
        };

        let mut x = match hex_value(first) {
            Some(v) => v,
            None => {
                return colon.then(|| {
                    if first == b':' {
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            let Some(b) = self.peek(i) else {
                // INVARIANT: Skipping `i` hexadecimal digits is fine.
                self.skip(i);
                return Some(Seg::Normal(x, colon));
            };
            match hex_value(b) {
                Some(v) => {
                    x = (x << 4) | v;
                    i += 1;
                    continue;
                }
                None if b == b'.' => return Some(Seg::MaybeV4(colon)),
                None => break,
            }
        }
        // INVARIANT: Skipping `i` hexadecimal digits is fine.
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            // INVARIANT: Skipping "0" is fine.
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                // INVARIANT: Skipping `i` digits is fine.
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        // INVARIANT: Skipping 3 digits is fine.
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }
}

fn hex_value(x: u8) -> Option<u16> {
    (x as char).to_digit(16).map(|v| v as u16)
}
