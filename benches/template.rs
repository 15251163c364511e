//! Capability string compilation and expansion benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use std::hint::black_box;

use cellterm::terminfo::captoinfo::captoinfo;
use cellterm::terminfo::template::compile;
use cellterm::terminfo::{StaticRegisters, termcap};
use cellterm::Param;
use criterion::{Criterion, criterion_group, criterion_main};

const CUP: &[u8] = b"\x1b[%i%p1%d;%p2%dH";
const SETAF: &[u8] = b"\x1b[%?%p1%{8}%<%t3%p1%d%e%p1%{16}%<%t9%p1%{8}%-%d%e38;5;%p1%d%;m";
const SGR: &[u8] = b"%?%p9%t\x1b(0%e\x1b(B%;\x1b[0%?%p6%t;1%;%?%p5%t;2%;%?%p2%t;4%;%?%p1%p3%|%t;7%;%?%p4%t;5%;%?%p7%t;8%;m";

fn compile_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, src) in [("cup", CUP), ("setaf", SETAF), ("sgr", SGR)] {
        group.bench_function(name, |b| b.iter(|| compile(name, black_box(src))));
    }
    group.finish();
}

fn expand_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    let cup = compile("cup", CUP);
    let params = [Param::Int(23), Param::Int(79)];
    group.bench_function("cup", |b| {
        let mut statics = StaticRegisters::default();
        b.iter(|| cup.expand(black_box(&params), &mut statics));
    });

    let setaf = compile("setaf", SETAF);
    group.bench_function("setaf_256", |b| {
        let mut statics = StaticRegisters::default();
        b.iter(|| setaf.expand(black_box(&[Param::Int(196)]), &mut statics));
    });

    let sgr = compile("sgr", SGR);
    let params: Vec<Param> = [1, 1, 0, 0, 0, 1, 0, 0, 1].into_iter().map(Param::Int).collect();
    group.bench_function("sgr", |b| {
        let mut statics = StaticRegisters::default();
        b.iter(|| sgr.expand(black_box(&params), &mut statics));
    });

    group.finish();
}

fn translate_termcap(c: &mut Criterion) {
    c.bench_function("captoinfo_cm", |b| {
        b.iter(|| captoinfo(black_box(br"\E[%i%d;%dH")))
    });

    let db = r"base|shared base:\
	:am:co#80:li#24:cl=\E[H\E[2J:cm=\E[%i%d;%dH:ce=\E[K:so=\E[7m:se=\E[m:
child|derived:co#132:am@:tc=base:
";
    c.bench_function("termcap_find_with_tc", |b| {
        b.iter(|| termcap::find(black_box(db), "child").unwrap())
    });
}

criterion_group!(benches, compile_templates, expand_templates, translate_termcap);
criterion_main!(benches);
