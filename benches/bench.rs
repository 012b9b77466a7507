// Copyright 2017 The Mellium Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use xmpp_jid::{escape, unescape, Jid};

fn parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, input) in [
        ("full", "juliet@example.com/test"),
        ("bare", "juliet@example.com"),
        ("domain", "example.com"),
        ("ipv6_full", "juliet@[::1]/test"),
        ("ipv6_bare", "juliet@[::1]"),
        ("ipv6_domain", "[::1]"),
        ("ace_full", "juliet@xn--bcher-kva.ch/test"),
    ] {
        group.bench_function(name, |b| b.iter(|| Jid::parse(black_box(input))));
    }
    group.finish();
}

fn string_full(c: &mut Criterion) {
    let j = Jid::parse("juliet@example.com/test").unwrap();
    c.bench_function("string_full", |b| b.iter(|| format!("{}", black_box(&j))));
}

fn new_full(c: &mut Criterion) {
    c.bench_function("new_full", |b| {
        b.iter(|| Jid::new(Some("juliet"), "example.com", Some("test")))
    });
}

fn set_resource(c: &mut Criterion) {
    let j = Jid::parse("juliet@example.com/test").unwrap();
    c.bench_function("set_resource", |b| {
        b.iter(|| {
            let mut j = j.clone();
            j.set_resource(Some(black_box("orchard")))
        })
    });
}

fn escaping(c: &mut Criterion) {
    let raw = r#"here's_a_wild_&_/cr%zy/_@ddress for:<wv>("imps")\"#;
    let escaped = escape(raw).into_owned();
    c.bench_function("escape", |b| b.iter(|| escape(black_box(raw))));
    c.bench_function("unescape", |b| b.iter(|| unescape(black_box(&escaped))));
}

criterion_group!(benches, parse, string_full, new_full, set_resource, escaping);
criterion_main!(benches);
