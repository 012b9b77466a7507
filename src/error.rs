// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors returned when an address fails validation.

use thiserror::Error as ThisError;

/// An invalid address.
///
/// Carries the raw input that was rejected and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("invalid address {input:?}: {kind}")]
pub struct Error {
    input: String,
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(input: impl Into<String>, kind: ErrorKind) -> Error {
        Error {
            input: input.into(),
            kind,
        }
    }

    /// The raw string that failed validation.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Why the input was rejected.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The reason an address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ThisError)]
pub enum ErrorKind {
    /// An `@` was present with nothing before it.
    #[error("localpart must not be empty")]
    EmptyLocal,
    /// The localpart is longer than 1023 octets.
    #[error("localpart must be smaller than 1024 bytes")]
    LongLocal,
    /// The localpart contains a character that must be escaped.
    #[error("localpart contains forbidden characters")]
    ForbiddenLocalChar,
    /// Normalizing the localpart did not reach a stable form.
    #[error("localpart does not normalize to a stable form")]
    UnstableLocal,

    /// The domainpart is missing.
    #[error("domainpart must not be empty")]
    EmptyDomain,
    /// The domainpart is longer than 1023 octets.
    #[error("domainpart must be smaller than 1024 bytes")]
    LongDomain,
    /// The domainpart has an empty label (`a..b`).
    #[error("domainpart contains an empty label")]
    EmptyLabel,
    /// A domain label is longer than 63 octets.
    #[error("domain labels must be smaller than 64 bytes")]
    LongLabel,
    /// A domain label starts or ends with `-`.
    #[error("domain labels must not start or end with a hyphen")]
    HyphenLabel,
    /// A domain label contains a character that is not allowed in hostnames.
    #[error("domainpart contains forbidden characters")]
    ForbiddenDomainChar,
    /// The domainpart carries a port (`example.com:5222`).
    #[error("domainpart must not contain a port")]
    Port,
    /// A bracketed IPv6 literal is unbalanced or its contents are invalid.
    #[error("malformed IPv6 literal")]
    MalformedIpv6,
    /// An IPv6 address was given without brackets.
    #[error("IPv6 literals must be enclosed in brackets")]
    UnbracketedIpv6,
    /// An internationalized label could not be decoded or mapped.
    #[error("domainpart failed IDNA processing")]
    Idna,

    /// A `/` was present with nothing after it.
    #[error("resourcepart must not be empty")]
    EmptyResource,
    /// The resourcepart is longer than 1023 octets.
    #[error("resourcepart must be smaller than 1024 bytes")]
    LongResource,

    /// A bare address was expected but a resource was given.
    #[error("bare address must not contain a resourcepart")]
    ResourceInBare,
    /// The address has no domainpart to attach a localpart or resource to.
    #[error("address has no domainpart")]
    NoDomain,
}
