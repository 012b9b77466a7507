// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Validation and normalization of domainparts.
//!
//! A domainpart is one of:
//!
//! - an IPv6 literal enclosed in brackets (`[::1]`),
//! - an IPv4 address in dotted quad form (`127.0.0.1`),
//! - a sequence of hostname labels, possibly internationalized.
//!
//! Literal addresses are kept verbatim. Hostnames are stored in their
//! Unicode form: ACE labels (`xn--…`) are decoded and ASCII is lower cased,
//! so `XN--BCHER-KVA.ch.` and `bücher.ch` compare equal. Use [`to_ascii`]
//! to get the form that goes on the wire.

use std::net::{Ipv4Addr, Ipv6Addr};

use idna::punycode;

use crate::error::{Error, ErrorKind};
use crate::prep::{MAX_LABEL_LEN, MAX_PART_LEN};

/// The shape of a validated domainpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A (possibly internationalized) host name.
    Hostname,
    /// A dotted quad IPv4 address.
    Ipv4,
    /// A bracketed IPv6 literal.
    Ipv6,
}

impl Kind {
    /// Classifies an already normalized domainpart.
    pub fn of(domain: &str) -> Kind {
        if domain.starts_with('[') {
            Kind::Ipv6
        } else if domain.parse::<Ipv4Addr>().is_ok() {
            Kind::Ipv4
        } else {
            Kind::Hostname
        }
    }
}

/// Validates a domainpart and returns its canonical form.
///
/// # Examples
///
/// ```
/// use xmpp_jid::{domain, ErrorKind};
///
/// assert_eq!(domain::normalize("Example.COM.").unwrap(), "example.com");
/// assert_eq!(domain::normalize("[::1]").unwrap(), "[::1]");
///
/// let err = domain::normalize("example.com:5222").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Port);
/// assert_eq!(err.input(), "example.com:5222");
/// ```
pub fn normalize(domain: &str) -> Result<String, Error> {
    prepare(domain).map_err(|kind| Error::new(domain, kind))
}

/// Converts a normalized domainpart to its ASCII compatible encoding.
///
/// Literal addresses are returned as they are.
pub fn to_ascii(domain: &str) -> Result<String, Error> {
    encode(domain).map_err(|kind| Error::new(domain, kind))
}

pub(crate) fn prepare(domain: &str) -> Result<String, ErrorKind> {
    if domain.is_empty() {
        return Err(ErrorKind::EmptyDomain);
    }
    if domain.starts_with('[') || domain.ends_with(']') {
        return ipv6_literal(domain).map(str::to_owned);
    }
    if domain.parse::<Ipv4Addr>().is_ok() {
        return Ok(domain.to_owned());
    }
    if domain.parse::<Ipv6Addr>().is_ok() {
        return Err(ErrorKind::UnbracketedIpv6);
    }
    hostname(domain)
}

pub(crate) fn encode(domain: &str) -> Result<String, ErrorKind> {
    match Kind::of(domain) {
        Kind::Hostname => idna::domain_to_ascii(domain).map_err(|_| ErrorKind::Idna),
        Kind::Ipv4 | Kind::Ipv6 => Ok(domain.to_owned()),
    }
}

fn ipv6_literal(domain: &str) -> Result<&str, ErrorKind> {
    let inner = domain
        .strip_prefix('[')
        .and_then(|d| d.strip_suffix(']'))
        .ok_or(ErrorKind::MalformedIpv6)?;
    inner
        .parse::<Ipv6Addr>()
        .map_err(|_| ErrorKind::MalformedIpv6)?;
    Ok(domain)
}

fn hostname(domain: &str) -> Result<String, ErrorKind> {
    // RFC 7622 §3.2: a single trailing dot is not part of the domain.
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    check_labels(domain)?;

    let (unicode, result) = idna::domain_to_unicode(domain);
    result.map_err(|_| ErrorKind::Idna)?;
    // The mapping folds compatibility characters, so fullwidth or ideographic
    // forms may have turned into `.`, `@`, `/`, `:` or spaces.
    check_labels(&unicode)?;
    if unicode.len() > MAX_PART_LEN {
        return Err(ErrorKind::LongDomain);
    }
    Ok(unicode)
}

fn check_labels(domain: &str) -> Result<(), ErrorKind> {
    if domain.is_empty() {
        return Err(ErrorKind::EmptyDomain);
    }
    if has_port(domain) {
        return Err(ErrorKind::Port);
    }
    domain.split('.').try_for_each(check_label)
}

fn has_port(domain: &str) -> bool {
    match domain.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

fn check_label(label: &str) -> Result<(), ErrorKind> {
    if label.is_empty() {
        return Err(ErrorKind::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(ErrorKind::LongLabel);
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(ErrorKind::HyphenLabel);
    }
    if label.chars().any(|c| {
        if c.is_ascii() {
            !(c.is_ascii_alphanumeric() || c == '-')
        } else {
            c.is_whitespace() || c.is_control()
        }
    }) {
        return Err(ErrorKind::ForbiddenDomainChar);
    }
    if let Some(encoded) = ace_payload(label) {
        punycode::decode_to_string(encoded).ok_or(ErrorKind::Idna)?;
    }
    Ok(())
}

fn ace_payload(label: &str) -> Option<&str> {
    match label.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("xn--") => Some(&label[4..]),
        _ => None,
    }
}
