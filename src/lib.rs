// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing, validation and normalization of XMPP addresses (Jabber IDs).
//!
//! An address has the form `[ local "@" ] domain [ "/" resource ]`. The
//! [`Jid`] type validates each part when it is parsed or changed, so a
//! `Jid` value is always valid (or the explicit empty JID).
//!
//! ```
//! use xmpp_jid::Jid;
//!
//! let j: Jid = "mercutio@example.net/rp@rp/rp".parse().unwrap();
//! assert_eq!(j.local(), Some("mercutio"));
//! assert_eq!(j.domain(), "example.net");
//! assert_eq!(j.resource(), Some("rp@rp/rp"));
//!
//! assert!(Jid::parse("example.com:5222").is_err());
//! ```
//!
//! # Features
//!
//! - `serde`: serialize and deserialize [`Jid`] as its string form.

#![doc(html_root_url = "https://docs.rs/xmpp-jid/0.14.0")]
#![deny(missing_docs)]

pub mod domain;
mod error;
mod escape;
mod jid;
mod matcher;
mod prep;

pub use crate::error::{Error, ErrorKind};
pub use crate::escape::{escape, unescape};
pub use crate::jid::{Jid, UnescapedJid};
pub use crate::matcher::IdSenderMatcher;
pub use crate::prep::{normalize_local, MAX_LABEL_LEN, MAX_PART_LEN};
