use criterion::{criterion_group, criterion_main, Criterion};

use mandelview::{CancelToken, Complex, EscapeTimeRenderer, RenderParams};

fn renderer() -> EscapeTimeRenderer {
    EscapeTimeRenderer::new(
        Complex::new(-2.1, -1.2),
        Complex::new(0.6, 1.2),
        320,
        240,
        RenderParams::new(2.0, 500).unwrap(),
    )
    .unwrap()
}

fn single_threaded(c: &mut Criterion) {
    let renderer = renderer();
    c.bench_function("render 320x240 on one thread", move |b| {
        b.iter(|| renderer.render())
    });
}

fn threaded(c: &mut Criterion) {
    let renderer = renderer();
    let threads = num_cpus::get();
    c.bench_function("render 320x240 on all cores", move |b| {
        b.iter(|| renderer.render_threaded(threads, &CancelToken::new()).unwrap())
    });
}

criterion_group!(benches, single_threaded, threaded);
criterion_main!(benches);
