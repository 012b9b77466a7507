// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Preparation of localparts and resourceparts.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, ErrorKind};

/// The maximum length in bytes of a localpart, domainpart or resourcepart.
pub const MAX_PART_LEN: usize = 1023;

/// The maximum length in bytes of a single domain label.
pub const MAX_LABEL_LEN: usize = 63;

// NFKC and lower casing do not commute for a handful of compatibility
// characters (eg. U+2109 maps to "°F"), so the pair is applied until the
// value stops changing.
const MAX_PASSES: usize = 4;

fn forbidden(c: char) -> bool {
    matches!(c, '"' | '&' | '\'' | '/' | ':' | '<' | '>' | '@')
        || c.is_whitespace()
        || c.is_control()
}

/// Normalizes a localpart.
///
/// The result is width and case folded (NFKC followed by lower casing) and
/// feeding it back into `normalize_local` returns it unchanged.
///
/// # Examples
///
/// ```
/// use xmpp_jid::{normalize_local, ErrorKind};
///
/// assert_eq!(normalize_local("ＲＯＭＥＯ").unwrap(), "romeo");
///
/// let err = normalize_local("b<d").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ForbiddenLocalChar);
/// assert_eq!(err.input(), "b<d");
/// ```
pub fn normalize_local(local: &str) -> Result<String, Error> {
    prepare_local(local).map_err(|kind| Error::new(local, kind))
}

pub(crate) fn prepare_local(local: &str) -> Result<String, ErrorKind> {
    if local.is_empty() {
        return Err(ErrorKind::EmptyLocal);
    }

    let mut current: String = local.nfkc().collect();
    let mut stable = false;
    for _ in 0..MAX_PASSES {
        let next: String = current.to_lowercase().nfkc().collect();
        if next == current {
            stable = true;
            break;
        }
        current = next;
    }
    if !stable {
        return Err(ErrorKind::UnstableLocal);
    }

    if current.is_empty() {
        return Err(ErrorKind::EmptyLocal);
    }
    if current.len() > MAX_PART_LEN {
        return Err(ErrorKind::LongLocal);
    }
    if current.chars().any(forbidden) {
        return Err(ErrorKind::ForbiddenLocalChar);
    }
    Ok(current)
}

/// Checks a resourcepart.
///
/// Resources are opaque, so nothing is mapped; only the length is enforced.
pub(crate) fn check_resource(resource: &str) -> Result<&str, ErrorKind> {
    if resource.is_empty() {
        Err(ErrorKind::EmptyResource)
    } else if resource.len() > MAX_PART_LEN {
        Err(ErrorKind::LongResource)
    } else {
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_is_case_folded() {
        assert_eq!(prepare_local("Juliet").unwrap(), "juliet");
        assert_eq!(prepare_local("ＲＯＭＥＯ").unwrap(), "romeo");
    }

    #[test]
    fn local_is_idempotent() {
        for local in ["ᴹᴵᴷᴬᴱᴸ", "℉", "ǅemal", "İstanbul", "Straße"] {
            let once = prepare_local(local).unwrap();
            assert_eq!(prepare_local(&once).unwrap(), once, "{}", local);
        }
    }

    #[test]
    fn local_modifier_letters() {
        assert_eq!(prepare_local("ᴹᴵᴷᴬᴱᴸ").unwrap(), "mikael");
    }

    #[test]
    fn local_bounds() {
        assert_eq!(prepare_local(""), Err(ErrorKind::EmptyLocal));
        assert!(prepare_local(&"a".repeat(1023)).is_ok());
        assert_eq!(
            prepare_local(&"a".repeat(1024)),
            Err(ErrorKind::LongLocal)
        );
    }

    #[test]
    fn local_forbidden_chars() {
        for local in [" foo", "bar ", r#"b"d"#, "b&d", "b'd", "b:d", "b<d", "b>d", "a\tb", "a\u{0}b"] {
            assert_eq!(
                prepare_local(local),
                Err(ErrorKind::ForbiddenLocalChar),
                "{:?}",
                local
            );
        }
    }

    #[test]
    fn local_allows_escapes() {
        assert_eq!(prepare_local(r"d\27Artagnan").unwrap(), r"d\27artagnan");
    }

    #[test]
    fn resource_is_opaque() {
        assert_eq!(check_resource("Some/Resource ™"), Ok("Some/Resource ™"));
        assert_eq!(check_resource(""), Err(ErrorKind::EmptyResource));
        assert!(check_resource(&"r".repeat(1023)).is_ok());
        assert_eq!(
            check_resource(&"r".repeat(1024)),
            Err(ErrorKind::LongResource)
        );
    }

    #[test]
    fn local_errors_carry_input() {
        let err = normalize_local("ju liet").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ForbiddenLocalChar);
        assert_eq!(err.input(), "ju liet");
        assert_eq!(normalize_local("Juliet").unwrap(), "juliet");
    }
}
