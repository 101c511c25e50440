// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Collapsing dynamic spectra (sub-integrations × channels) into a mean
//! spectrum and a time series, after flagging interference.

#[cfg(test)]
mod tests;

use log::debug;
use ndarray::prelude::*;

use crate::math::nanmean;

/// Replace every sample strictly greater than `threshold` with NaN. Returns
/// the number of samples that were flagged.
///
/// Samples that are already NaN are left alone and are not counted.
pub fn flag_rfi(power: &mut Array2<f64>, threshold: f64) -> usize {
    let mut num_flagged = 0;
    power.map_inplace(|p| {
        if *p > threshold {
            *p = f64::NAN;
            num_flagged += 1;
        }
    });
    debug!(
        "Flagged {num_flagged} of {} samples above {threshold}",
        power.len()
    );
    num_flagged
}

/// The channel-wise mean of a dynamic spectrum, ignoring NaNs. A channel
/// that is NaN in every sub-integration has a NaN mean.
pub fn mean_spectrum(power: ArrayView2<f64>) -> Array1<f64> {
    power.map_axis(Axis(0), |chan| nanmean(chan.iter().copied()))
}

/// The mean power of each sub-integration, ignoring NaNs. A sub-integration
/// that is entirely NaN has a NaN mean.
pub fn time_series(power: ArrayView2<f64>) -> Array1<f64> {
    power.map_axis(Axis(1), |subint| nanmean(subint.iter().copied()))
}

/// Does the dynamic spectrum contain any NaN?
pub fn contains_nan(power: ArrayView2<f64>) -> bool {
    power.iter().any(|p| p.is_nan())
}
