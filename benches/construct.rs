use std::ops::Range;

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::distributions::Uniform;
use rand::{thread_rng, Rng};

use sain_sa::{sort_suffixes_plain, NoopTimer};

const LEN_SAMPLES: usize = 20;

criterion_group!(
    benches,
    small_len_small_scale,
    small_len_big_scale,
    median_len_small_scale,
    median_len_big_scale,
    large_len_small_scale,
    large_len_big_scale,
);
criterion_main!(benches);

macro_rules! bench_with_cfg {
    (str: $ss:tt .. $se:tt, scale: $scs:tt .. $sce:tt) => {
        |b| bench_by(b, $ss..$se, $scs..$sce)
    };
}

fn small_len_small_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len-/scale-",
        bench_with_cfg!(str: 1..128, scale: 1..8),
    );
}

fn small_len_big_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len-/scale+",
        bench_with_cfg!(str: 1..128, scale: 1..128),
    );
}

fn median_len_small_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len=/scale-",
        bench_with_cfg!(str: 128..1024, scale: 4..16),
    );
}

fn median_len_big_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len=/scale+",
        bench_with_cfg!(str: 128..1024, scale: 128..192),
    );
}

fn large_len_small_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len+/scale-",
        bench_with_cfg!(str: 1024..4096, scale: 8..32),
    );
}

fn large_len_big_scale(c: &mut Criterion) {
    c.bench_function(
        "construct len+/scale+",
        bench_with_cfg!(str: 1024..4096, scale: 192..255),
    );
}

// TODO: also bench the round-table fast-naming path specifically (needs
// len > 1024 and scale < len/4, which large_len_small_scale already
// mostly exercises, but not as a dedicated isolated case).

fn bench_by(b: &mut Bencher, len: Range<usize>, scale: Range<u8>) {
    let mut samples = Vec::with_capacity(LEN_SAMPLES);
    for _ in 0..LEN_SAMPLES {
        samples.push(gen_bytes(len.clone(), scale.clone()));
    }

    b.iter(|| {
        let mut timer = NoopTimer;
        for s in samples.iter() {
            sort_suffixes_plain(s, s.len(), false, &mut timer);
        }
    });
}

fn gen_bytes(len: Range<usize>, scale: Range<u8>) -> Vec<u8> {
    let mut rng = thread_rng();
    let n = rng.sample(Uniform::from(len));
    let hi = scale.end.saturating_sub(1).max(scale.start);
    let byte_uni = Uniform::from(scale.start..=hi);
    (0..n).map(|_| rng.sample(byte_uni)).collect()
}
