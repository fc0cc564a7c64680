use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dcm_ahrs::{
    Conventions, Dcm, Estimator, ImuScaling, InertialScale, MockTicks, RawSample, RollOrientation,
    TimerSettings, euler, orthonormalize,
};
use nalgebra::{Matrix3, Vector3};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;

// Pre-generated sensor data to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    samples: Vec<(Vector3<f32>, Vector3<f32>)>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.02; // 50Hz sample rate
            let motion_phase = time * 0.5 * 2.0 * PI;

            // rad/s
            let gyroscope = Vector3::new(
                0.2 * motion_phase.sin() + rng.random_range(-0.01..0.01),
                0.2 * (motion_phase * 1.3).cos() + rng.random_range(-0.01..0.01),
                0.2 * (motion_phase * 0.7).sin() + rng.random_range(-0.01..0.01),
            );

            // g
            let accelerometer = Vector3::new(
                -0.1 * motion_phase.sin() + rng.random_range(-0.002..0.002),
                0.1 * motion_phase.cos() + rng.random_range(-0.002..0.002),
                1.0 + rng.random_range(-0.002..0.002),
            );

            samples.push((gyroscope, accelerometer));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> (Vector3<f32>, Vector3<f32>) {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

/// Benchmark one full filter cycle
fn bench_update(c: &mut Criterion) {
    let mut dcm = Dcm::new();
    let mut data = PreGeneratedData::new(1_000, 42);
    let delta_time = 0.02f32; // 20ms (50Hz)

    c.bench_function("dcm_update", |b| {
        b.iter(|| {
            let (gyroscope, accelerometer) = data.next();
            dcm.update(
                black_box(gyroscope),
                black_box(accelerometer),
                black_box(delta_time),
            )
        })
    });
}

/// Benchmark batch processing of sensor updates
fn bench_batch_updates(c: &mut Criterion) {
    let mut dcm = Dcm::new();
    let mut data = PreGeneratedData::new(100, 7);

    c.bench_function("dcm_batch_100_updates", |b| {
        b.iter(|| {
            for _ in 0..100 {
                let (gyroscope, accelerometer) = data.next();
                dcm.update(black_box(gyroscope), black_box(accelerometer), 0.02);
            }
        })
    });
}

/// Benchmark the orthonormalization step alone
fn bench_orthonormalize(c: &mut Criterion) {
    let skewed = Matrix3::new(1.001, 0.002, -0.001, -0.002, 0.999, 0.003, 0.001, -0.003, 1.0);

    c.bench_function("dcm_orthonormalize", |b| {
        b.iter(|| {
            let mut m = black_box(skewed);
            orthonormalize(&mut m);
            m
        })
    });
}

/// Benchmark Euler extraction under a non-default convention
fn bench_extraction(c: &mut Criterion) {
    let m = dcm_ahrs::rotation_from_euler(0.3, 0.2, -0.4);
    let conventions = Conventions {
        roll: RollOrientation::ZX,
        pitch: RollOrientation::ZX.pitch_orientation(),
        ..Default::default()
    };

    c.bench_function("dcm_extract_euler", |b| {
        b.iter(|| {
            let m = black_box(&m);
            (
                euler::yaw(m),
                euler::pitch(m, &conventions),
                euler::roll(m, &conventions),
            )
        })
    });
}

/// Benchmark a complete control-loop cycle against a synthetic clock
fn bench_estimator_cycle(c: &mut Criterion) {
    let scaling = ImuScaling {
        gyroscope: InertialScale::uniform(0.001),
        accelerometer: InertialScale::uniform(1.0 / 16384.0),
    };
    // Counter jumps a whole period per read, so the wait never spins
    let mut estimator = Estimator::new(
        MockTicks::new(1_000_000, 20_000),
        TimerSettings { sample_rate: 49 },
        Default::default(),
        scaling,
    );
    let mut imu = || RawSample {
        gyroscope: Vector3::new(12, -7, 3),
        accelerometer: Vector3::new(160, -80, 16380),
    };
    estimator.full_reset(&mut imu);

    c.bench_function("estimator_cycle", |b| {
        b.iter(|| estimator.cycle(black_box(&mut imu)))
    });
}

/// Benchmark filter creation and full reset
fn bench_full_reset(c: &mut Criterion) {
    let accelerometer = Vector3::new(0.1, -0.2, 0.97);

    c.bench_function("dcm_full_reset", |b| {
        b.iter(|| {
            let mut dcm = Dcm::new();
            dcm.full_reset(black_box(&accelerometer));
            dcm
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_batch_updates,
    bench_orthonormalize,
    bench_extraction,
    bench_estimator_cycle,
    bench_full_reset
);

criterion_main!(benches);
