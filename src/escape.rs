// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! JID escaping as defined in [XEP-0106].
//!
//! Some characters may not appear in a localpart. XEP-0106 lets clients
//! display them anyway by transporting each one as a backslash followed by
//! its two digit hexadecimal code. Escaping is never applied by the parser;
//! callers decide whether they hold the display form or the escaped form.
//!
//! ```
//! use xmpp_jid::{escape, unescape};
//!
//! let escaped = escape("d'artagnan");
//! assert_eq!(escaped, r"d\27artagnan");
//! assert_eq!(unescape(&escaped), "d'artagnan");
//! ```
//!
//! [XEP-0106]: https://xmpp.org/extensions/xep-0106.html

use std::borrow::Cow;

const ESCAPES: [(char, &str); 10] = [
    (' ', "20"),
    ('"', "22"),
    ('&', "26"),
    ('\'', "27"),
    ('/', "2f"),
    (':', "3a"),
    ('<', "3c"),
    ('>', "3e"),
    ('@', "40"),
    ('\\', "5c"),
];

fn code(c: char) -> Option<&'static str> {
    ESCAPES.iter().find(|&&(e, _)| e == c).map(|&(_, code)| code)
}

fn decode(code: &str) -> Option<char> {
    ESCAPES.iter().find(|&&(_, c)| c == code).map(|&(e, _)| e)
}

/// Escapes a display localpart into its transport form.
///
/// Every literal backslash is escaped as `\5c`, so [`unescape`] always
/// recovers the original input.
pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.chars().any(|c| code(c).is_some()) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match code(c) {
            Some(code) => {
                out.push('\\');
                out.push_str(code);
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Converts an escaped localpart back into its display form.
///
/// Triplets are consumed left to right and never re-read, so `\5c20`
/// becomes `\20`, not a space. A backslash that does not start one of the
/// ten known (lower case) codes is kept as is.
pub fn unescape(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(1..3).and_then(decode) {
            Some(c) => {
                out.push(c);
                rest = &tail[3..];
            }
            None => {
                out.push('\\');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
