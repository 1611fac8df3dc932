use criterion::{Criterion, criterion_group, criterion_main};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;
use zq_field::PrimeField;
use zq_ntt::NttEngine;

const P254: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

fn bench_fft(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let p = BigUint::parse_bytes(P254.as_bytes(), 10).unwrap();
    let field = PrimeField::new(p, &mut rng);
    let ntt = NttEngine::over_field(&field);

    for log_n in [8, 10, 12] {
        let coeffs: Vec<BigUint> = (0..1usize << log_n)
            .map(|_| field.from_rng(&mut rng))
            .collect();
        c.bench_function(&format!("fft/bn254/2^{log_n}"), |b| {
            b.iter(|| ntt.fft(black_box(&coeffs)))
        });
        c.bench_function(&format!("ifft/bn254/2^{log_n}"), |b| {
            b.iter(|| ntt.ifft(black_box(&coeffs)))
        });
    }
}

criterion_group!(benches, bench_fft);
criterion_main!(benches);
