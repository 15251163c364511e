//! Frame diffing and capability-driven output benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use std::hint::black_box;
use std::io;

use cellterm::terminfo::fallback;
use cellterm::{
    Attr, AttrFlags, BoxStyle, CapabilitySet, Cell, LoadOptions, Renderer, RendererOptions,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn renderer(width: u16, height: u16) -> Renderer<io::Sink> {
    let caps = CapabilitySet::from_entry(
        fallback::xterm(),
        &LoadOptions::default().with_force_unicode(true),
    );
    Renderer::new(caps, io::sink(), width, height, RendererOptions::default())
        .expect("valid dimensions")
        .without_padding_sleep()
}

fn fill_text(r: &mut Renderer<io::Sink>, width: u16, height: u16) {
    let attr = Attr::DEFAULT.with_fg(2);
    let line: String = ('a'..='z').cycle().take(usize::from(width)).collect();
    for y in 0..height {
        r.buffer().draw_text(0, y, &line, attr);
    }
}

fn render_unchanged(c: &mut Criterion) {
    let mut r = renderer(80, 24);
    fill_text(&mut r, 80, 24);
    r.render().unwrap();

    c.bench_function("render_unchanged_80x24", |b| {
        b.iter(|| black_box(r.render().unwrap()));
    });
}

fn render_single_cell(c: &mut Criterion) {
    let mut r = renderer(80, 24);
    fill_text(&mut r, 80, 24);
    r.render().unwrap();
    let mut toggle = false;

    c.bench_function("render_single_cell_80x24", |b| {
        b.iter(|| {
            toggle = !toggle;
            let ch = if toggle { 'X' } else { 'Y' };
            r.buffer().set(40, 12, Cell::new(ch, Attr::DEFAULT));
            black_box(r.render().unwrap())
        });
    });
}

fn render_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_full_frame");

    for (w, h) in [(80u16, 24u16), (200, 50)] {
        let mut r = renderer(w, h);
        fill_text(&mut r, w, h);
        group.bench_function(format!("{w}x{h}"), |b| {
            b.iter(|| {
                r.force_redraw();
                black_box(r.render().unwrap())
            });
        });
    }

    group.finish();
}

fn render_styled_boxes(c: &mut Criterion) {
    let mut r = renderer(80, 24);
    let styles = [
        BoxStyle::single(Attr::DEFAULT.with_flags(AttrFlags::BOLD)),
        BoxStyle::single(Attr::DEFAULT.with_fg(4)),
    ];

    c.bench_function("render_joined_boxes_80x24", |b| {
        b.iter(|| {
            r.buffer().clear(Attr::DEFAULT);
            for (i, x) in (0..80).step_by(10).enumerate() {
                r.buffer().draw_box(x, 0, 11, 12, &styles[i % 2]);
                r.buffer().draw_box(x, 11, 11, 13, &styles[0]);
            }
            black_box(r.render().unwrap())
        });
    });
}

criterion_group!(
    benches,
    render_unchanged,
    render_single_cell,
    render_full_frame,
    render_styled_boxes,
);
criterion_main!(benches);
