// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matching responses to requests by stanza id and sender.

use tracing::trace;

use crate::Jid;

/// Selects stanzas that answer a request we sent.
///
/// A stanza matches when its `id` is the one we used and its sender is an
/// entity that may answer on the peer's behalf: the peer itself (full,
/// bare or domain), our own bare address or domain, or nobody (a stanza
/// without a `from`, which the server sends for our own account).
///
/// ```
/// use xmpp_jid::{IdSenderMatcher, Jid};
///
/// let me = Jid::parse("juliet@capulet.lit/balcony").unwrap();
/// let peer = Jid::parse("romeo@montague.lit/orchard").unwrap();
/// let matcher = IdSenderMatcher::new("ping1", me, peer);
///
/// let from = Jid::parse("romeo@montague.lit").unwrap();
/// assert!(matcher.matches("ping1", &from));
/// assert!(!matcher.matches("ping2", &from));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSenderMatcher {
    id: String,
    self_jid: Jid,
    peer_jid: Jid,
}

impl IdSenderMatcher {
    /// Creates a matcher for the request `id` sent from `self_jid` to
    /// `peer_jid`.
    pub fn new(id: impl Into<String>, self_jid: Jid, peer_jid: Jid) -> IdSenderMatcher {
        IdSenderMatcher {
            id: id.into(),
            self_jid,
            peer_jid,
        }
    }

    /// The stanza id this matcher waits for.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn allowed(&self) -> [&str; 6] {
        [
            "",
            self.self_jid.bare(),
            self.self_jid.domain(),
            self.peer_jid.full(),
            self.peer_jid.bare(),
            self.peer_jid.domain(),
        ]
    }

    /// Whether a stanza with the given id and sender matches.
    pub fn matches(&self, id: &str, from: &Jid) -> bool {
        if id != self.id {
            trace!(expected = %self.id, got = %id, "stanza id mismatch");
            return false;
        }
        if !self.allowed().contains(&from.full()) {
            trace!(id = %self.id, from = %from, "sender not allowed to answer");
            return false;
        }
        true
    }

    /// Like [`IdSenderMatcher::matches`], treating a missing sender as the
    /// empty JID.
    pub fn matches_stanza(&self, id: &str, from: Option<&Jid>) -> bool {
        match from {
            Some(from) => self.matches(id, from),
            None => self.matches(id, &Jid::default()),
        }
    }
}
