#![allow(missing_debug_implementations)]

use crate::{error::ParseError, parse, Uri};
use alloc::string::String;
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
};

pub trait Parse {
    type Val;

    fn parse(self) -> Result<Uri<Self::Val>, ParseError>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;

    fn parse(self) -> Result<Uri<&'a str>, ParseError> {
        match parse::parse(self, false) {
            Ok(meta) => Ok(Uri::new(self, meta)),
            Err(e) => Err(e.with_input(self)),
        }
    }
}

impl Parse for String {
    type Val = String;

    fn parse(self) -> Result<Uri<String>, ParseError> {
        parse_owned(self, false)
    }
}

pub(crate) fn parse_owned(s: String, force_server_authority: bool) -> Result<Uri<String>, ParseError> {
    match parse::parse(&s, force_server_authority) {
        Ok(meta) => Ok(Uri::new(s, meta)),
        Err(e) => Err(e.with_input(s)),
    }
}

/// Component bounds of a URI, as produced by the parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct Meta {
    // The index of the trailing colon.
    pub scheme_end: Option<NonZeroUsize>,
    pub opaque: bool,
    pub auth_meta: Option<AuthMeta>,
    // Unused when opaque.
    pub path_bounds: (usize, usize),
    // One byte past the last byte of query.
    pub query_end: Option<NonZeroUsize>,
    // The index of the number sign.
    pub fragment_start: Option<usize>,
}

impl Meta {
    #[inline]
    pub fn ssp_start(&self) -> usize {
        self.scheme_end.map_or(0, |i| i.get() + 1)
    }

    #[inline]
    pub fn ssp_end(&self, len: usize) -> usize {
        self.fragment_start.unwrap_or(len)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AuthMeta {
    pub bounds: (usize, usize),
    // `None` for a registry-based authority.
    pub server: Option<ServerMeta>,
}

/// Decomposition of a server-based authority.
///
/// All indexes are relative to the start of the authority.
#[derive(Clone, Copy, Debug)]
pub struct ServerMeta {
    // The index of the commercial at.
    pub userinfo_end: Option<usize>,
    pub host_bounds: (usize, usize),
    pub host_meta: HostMeta,
    pub port: Option<u32>,
}

#[derive(Clone, Copy, Debug)]
pub enum HostMeta {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Domain,
}
