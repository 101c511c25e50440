// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;
use ndarray::prelude::*;

use pictor_hi::{
    estimate_k_factor_simple, estimate_snr_simple, HiCalibration, ObservationParams,
    ReductionOptions,
};

fn synthetic_power(num_subints: usize, num_channels: usize, level: f64) -> Array2<f64> {
    Array2::from_shape_fn((num_subints, num_channels), |(t, c)| {
        level * (1.0 + 0.01 * ((t * 31 + c * 17) % 11) as f64)
    })
}

fn calibration(c: &mut Criterion) {
    let obs = ObservationParams::default();
    let opts = ReductionOptions::default();
    let on = synthetic_power(1000, obs.num_channels, 500.0);
    let off = synthetic_power(100, obs.num_channels, 250.0);

    c.bench_function("calibrate 1000 sub-integrations", |b| {
        b.iter_batched(
            || on.clone(),
            |on| HiCalibration::new(on, off.view(), &obs, &opts),
            BatchSize::LargeInput,
        )
    });

    let cal = HiCalibration::new(on, off.view(), &obs, &opts).unwrap();
    c.bench_function("k factor", |b| {
        b.iter(|| {
            estimate_k_factor_simple(
                cal.on_spectrum.view(),
                cal.off_spectrum.view(),
                Some(&cal.mask),
            )
        })
    });
    c.bench_function("S/N", |b| {
        b.iter(|| estimate_snr_simple(cal.spectrum.view(), Some(&cal.mask)))
    });
}

criterion_group!(benches, calibration);
criterion_main!(benches);
