// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::domain::{self, Kind};
use crate::error::{Error, ErrorKind};
use crate::escape::{escape, unescape};
use crate::prep;

/// The candidate segments of an address before validation.
struct Parts<'a> {
    local: Option<&'a str>,
    domain: &'a str,
    resource: Option<&'a str>,
}

impl<'a> Parts<'a> {
    /// Splits on the first `/`, then on the first `@` before it.
    fn split(s: &'a str) -> Parts<'a> {
        let (bare, resource) = match s.find('/') {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };
        let (local, domain) = match bare.find('@') {
            Some(pos) => (Some(&bare[..pos]), &bare[pos + 1..]),
            None => (None, bare),
        };
        Parts {
            local,
            domain,
            resource,
        }
    }

    fn prepare(self) -> Result<Jid, ErrorKind> {
        let local = self.local.map(prep::prepare_local).transpose()?;
        let domain = domain::prepare(self.domain)?;
        let resource = self
            .resource
            .map(prep::check_resource)
            .transpose()?
            .map(str::to_owned);
        Ok(Jid::assemble(local, domain, resource))
    }
}

fn compose(local: Option<&str>, domain: &str, resource: Option<&str>) -> String {
    let mut s = String::with_capacity(
        local.map_or(0, |l| l.len() + 1) + domain.len() + resource.map_or(0, |r| r.len() + 1),
    );
    if let Some(local) = local {
        s.push_str(local);
        s.push('@');
    }
    s.push_str(domain);
    if let Some(resource) = resource {
        s.push('/');
        s.push_str(resource);
    }
    s
}

/// An XMPP address, also known as a Jabber ID.
///
/// A JID is made of an optional localpart, a domainpart and an optional
/// resourcepart: `local@domain/resource`. Every part is validated and
/// normalized when the JID is built or changed, and the bare
/// (`local@domain`) and full (`local@domain/resource`) string forms are kept
/// up to date alongside them.
///
/// Two JIDs are equal if their normalized parts are equal.
///
/// # Examples
///
/// ```
/// use xmpp_jid::Jid;
///
/// let mut j = Jid::parse("Juliet@Example.com/balcony").unwrap();
/// assert_eq!(j.local(), Some("juliet"));
/// assert_eq!(j.domain(), "example.com");
/// assert_eq!(j.resource(), Some("balcony"));
/// assert_eq!(j.bare(), "juliet@example.com");
///
/// j.set_resource(Some("orchard")).unwrap();
/// assert_eq!(j.full(), "juliet@example.com/orchard");
/// ```
#[derive(Clone, Default)]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
    bare: String,
    full: String,
}

impl Jid {
    fn assemble(local: Option<String>, domain: String, resource: Option<String>) -> Jid {
        let mut jid = Jid {
            local,
            domain,
            resource,
            bare: String::new(),
            full: String::new(),
        };
        jid.recompute();
        jid
    }

    fn recompute(&mut self) {
        self.bare = compose(self.local.as_deref(), &self.domain, None);
        self.full = match self.resource {
            Some(ref resource) => compose(None, &self.bare, Some(resource.as_str())),
            None => self.bare.clone(),
        };
    }

    /// Parses an address.
    ///
    /// The empty string parses to the empty JID (see [`Jid::is_empty`]).
    ///
    /// # Errors
    ///
    /// Fails if any part is empty when its separator is present, longer
    /// than 1023 bytes, or otherwise invalid.
    pub fn parse(s: &str) -> Result<Jid, Error> {
        if s.is_empty() {
            return Ok(Jid::default());
        }
        Parts::split(s).prepare().map_err(|kind| Error::new(s, kind))
    }

    /// Builds a JID from its parts.
    ///
    /// The localpart is taken as is: it must already be in its escaped form.
    /// Use [`Jid::from_display_parts`] to build a JID from a localpart
    /// containing characters such as spaces or `@`.
    ///
    /// ```
    /// use xmpp_jid::Jid;
    ///
    /// let j = Jid::new(Some("juliet"), "example.com", Some("test")).unwrap();
    /// assert_eq!(j.full(), "juliet@example.com/test");
    /// ```
    pub fn new(local: Option<&str>, domain: &str, resource: Option<&str>) -> Result<Jid, Error> {
        let parts = Parts {
            local,
            domain,
            resource,
        };
        parts
            .prepare()
            .map_err(|kind| Error::new(compose(local, domain, resource), kind))
    }

    /// Builds a JID from a localpart in display form, escaping it first.
    ///
    /// ```
    /// use xmpp_jid::Jid;
    ///
    /// let j = Jid::from_display_parts(Some("d'artagnan"), "musketeers.lit", None).unwrap();
    /// assert_eq!(j.local(), Some(r"d\27artagnan"));
    /// assert_eq!(j.unescape().to_string(), "d'artagnan@musketeers.lit");
    /// ```
    pub fn from_display_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Jid, Error> {
        let escaped = local.map(escape);
        Jid::new(escaped.as_deref(), domain, resource)
    }

    /// The localpart, if any.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Alias of [`Jid::local`].
    pub fn user(&self) -> Option<&str> {
        self.local()
    }

    /// The domainpart. Empty only for the empty JID.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Alias of [`Jid::domain`].
    pub fn server(&self) -> &str {
        self.domain()
    }

    /// Alias of [`Jid::domain`].
    pub fn host(&self) -> &str {
        self.domain()
    }

    /// The resourcepart, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// The address without its resource: `local@domain` or `domain`.
    pub fn bare(&self) -> &str {
        &self.bare
    }

    /// The complete address.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Same as [`Jid::full`].
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Whether this JID has no resourcepart.
    pub fn is_bare(&self) -> bool {
        self.resource.is_none()
    }

    /// Whether this JID has a resourcepart.
    pub fn is_full(&self) -> bool {
        self.resource.is_some()
    }

    /// Whether this is the empty JID.
    ///
    /// The empty JID is what `Jid::default()` and `Jid::parse("")` return.
    /// It stands for "no address" and is not equal to any valid JID.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// The shape of the domainpart, or `None` for the empty JID.
    pub fn domain_kind(&self) -> Option<Kind> {
        if self.is_empty() {
            None
        } else {
            Some(Kind::of(&self.domain))
        }
    }

    /// The domainpart in ASCII compatible encoding, for use on the wire.
    ///
    /// ```
    /// use xmpp_jid::Jid;
    ///
    /// let j = Jid::parse("user@xn--bcher-kva.ch").unwrap();
    /// assert_eq!(j.domain(), "bücher.ch");
    /// assert_eq!(j.ascii_domain().unwrap(), "xn--bcher-kva.ch");
    /// ```
    pub fn ascii_domain(&self) -> Result<String, Error> {
        domain::to_ascii(&self.domain)
    }

    /// The full address with its domainpart in ASCII compatible encoding.
    pub fn to_ascii_string(&self) -> Result<String, Error> {
        let domain = self.ascii_domain()?;
        Ok(compose(self.local(), &domain, self.resource()))
    }

    /// A copy of this JID without its resourcepart.
    pub fn to_bare(&self) -> Jid {
        Jid::assemble(self.local.clone(), self.domain.clone(), None)
    }

    /// A copy of this JID with the given resourcepart.
    pub fn with_resource(&self, resource: &str) -> Result<Jid, Error> {
        let mut jid = self.clone();
        jid.set_resource(Some(resource))?;
        Ok(jid)
    }

    /// Converts the localpart back to display form.
    ///
    /// The result is for presentation only and cannot be used as an address.
    pub fn unescape(&self) -> UnescapedJid {
        UnescapedJid {
            local: self.local.as_deref().map(|l| unescape(l).into_owned()),
            domain: self.domain.clone(),
            resource: self.resource.clone(),
        }
    }

    /// Replaces the localpart, leaving the domain and resource untouched.
    ///
    /// # Errors
    ///
    /// Fails if the localpart is invalid or if this is the empty JID. On
    /// failure the JID is unchanged.
    pub fn set_local(&mut self, local: Option<&str>) -> Result<(), Error> {
        let local = match local {
            Some(l) => {
                if self.is_empty() {
                    return Err(Error::new(l, ErrorKind::NoDomain));
                }
                Some(prep::normalize_local(l)?)
            }
            None => None,
        };
        self.local = local;
        self.recompute();
        Ok(())
    }

    /// Alias of [`Jid::set_local`].
    pub fn set_user(&mut self, user: Option<&str>) -> Result<(), Error> {
        self.set_local(user)
    }

    /// Replaces the domainpart, leaving the local and resource untouched.
    ///
    /// # Errors
    ///
    /// Fails if the domain is invalid, leaving the JID unchanged.
    pub fn set_domain(&mut self, domain: &str) -> Result<(), Error> {
        self.domain = domain::normalize(domain)?;
        self.recompute();
        Ok(())
    }

    /// Alias of [`Jid::set_domain`].
    pub fn set_server(&mut self, server: &str) -> Result<(), Error> {
        self.set_domain(server)
    }

    /// Alias of [`Jid::set_domain`].
    pub fn set_host(&mut self, host: &str) -> Result<(), Error> {
        self.set_domain(host)
    }

    /// Replaces the resourcepart, leaving the local and domain untouched.
    ///
    /// # Errors
    ///
    /// Fails if the resource is invalid or if this is the empty JID. On
    /// failure the JID is unchanged.
    pub fn set_resource(&mut self, resource: Option<&str>) -> Result<(), Error> {
        let resource = match resource {
            Some(r) => {
                if self.is_empty() {
                    return Err(Error::new(r, ErrorKind::NoDomain));
                }
                Some(prep::check_resource(r).map_err(|kind| Error::new(r, kind))?)
            }
            None => None,
        };
        self.resource = resource.map(str::to_owned);
        self.recompute();
        Ok(())
    }

    /// Replaces the localpart and domainpart from `local@domain` or `domain`.
    ///
    /// The resource is kept. Without an `@` the localpart is cleared.
    ///
    /// ```
    /// use xmpp_jid::Jid;
    ///
    /// let mut j = Jid::parse("user@domain/resource").unwrap();
    /// j.set_bare("otherdomain").unwrap();
    /// assert_eq!(j.full(), "otherdomain/resource");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if `bare` is empty, invalid, or contains a resourcepart. On
    /// failure the JID is unchanged.
    pub fn set_bare(&mut self, bare: &str) -> Result<(), Error> {
        let err = |kind| Error::new(bare, kind);
        if bare.is_empty() {
            return Err(err(ErrorKind::EmptyDomain));
        }
        let parts = Parts::split(bare);
        if parts.resource.is_some() {
            return Err(err(ErrorKind::ResourceInBare));
        }
        let local = parts
            .local
            .map(prep::prepare_local)
            .transpose()
            .map_err(err)?;
        let domain = domain::prepare(parts.domain).map_err(err)?;
        self.local = local;
        self.domain = domain;
        self.recompute();
        Ok(())
    }

    /// Replaces every part from `local@domain/resource`, `domain/resource`
    /// or `domain`. Missing parts are cleared.
    ///
    /// # Errors
    ///
    /// Fails if `full` is empty or invalid, leaving the JID unchanged.
    pub fn set_full(&mut self, full: &str) -> Result<(), Error> {
        if full.is_empty() {
            return Err(Error::new(full, ErrorKind::EmptyDomain));
        }
        *self = Jid::parse(full)?;
        Ok(())
    }
}

impl PartialEq for Jid {
    fn eq(&self, other: &Jid) -> bool {
        self.local == other.local && self.domain == other.domain && self.resource == other.resource
    }
}

impl Eq for Jid {}

impl Hash for Jid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local.hash(state);
        self.domain.hash(state);
        self.resource.hash(state);
    }
}

impl PartialOrd for Jid {
    fn partial_cmp(&self, other: &Jid) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Jid {
    fn cmp(&self, other: &Jid) -> Ordering {
        (&self.local, &self.domain, &self.resource).cmp(&(
            &other.local,
            &other.domain,
            &other.resource,
        ))
    }
}

impl PartialEq<str> for Jid {
    fn eq(&self, other: &str) -> bool {
        self.full == other
    }
}

impl<'a> PartialEq<&'a str> for Jid {
    fn eq(&self, other: &&'a str) -> bool {
        self.full == *other
    }
}

impl fmt::Debug for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Jid").field(&self.full).finish()
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for Jid {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

impl FromStr for Jid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Jid, Error> {
        Jid::parse(s)
    }
}

impl<'a> TryFrom<&'a str> for Jid {
    type Error = Error;

    fn try_from(s: &'a str) -> Result<Jid, Error> {
        Jid::parse(s)
    }
}

impl TryFrom<String> for Jid {
    type Error = Error;

    fn try_from(s: String) -> Result<Jid, Error> {
        Jid::parse(&s)
    }
}

impl From<Jid> for String {
    fn from(jid: Jid) -> String {
        jid.full
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Jid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.full)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Jid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Jid::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A JID whose localpart has been unescaped for display.
///
/// See [`Jid::unescape`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnescapedJid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl UnescapedJid {
    /// The localpart in display form.
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// The domainpart.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The resourcepart.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl fmt::Display for UnescapedJid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose(self.local(), &self.domain, self.resource()))
    }
}
