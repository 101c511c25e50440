// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Signal-to-noise estimation of a spectrum without a separate noise
//! measurement.

use std::f64::consts::SQRT_2;

use ndarray::prelude::*;

use super::unmasked;
use crate::{
    mask::ChannelMask,
    math::{nanmean, std_dev},
};

/// With fewer unmasked channels than this, the noise can't be estimated.
pub const MIN_UNMASKED_CHANNELS: usize = 3;

/// Estimate the per-channel signal-to-noise ratio of a spectrum.
///
/// The noise is the standard deviation of `spectrum[j + 2] - spectrum[j]`
/// over the unmasked middle channels `j + 1`, divided by √2 (differencing two
/// independent samples doubles the variance; this assumes white noise). The
/// background is the NaN-ignoring mean of the unmasked channels. Every channel,
/// masked or not, gets a value; the mask only affects the noise and background
/// estimates.
///
/// Without a mask, all channels are used in estimating noise. This will
/// drastically underestimate S/N if the spectrum contains a line!
///
/// If there are fewer than [`MIN_UNMASKED_CHANNELS`] unmasked channels, every
/// value is NaN. A flat spectrum has zero noise, and so also gives NaNs (0/0).
///
/// # Panics
///
/// Panics if `mask` isn't the same length as `spectrum`.
pub fn estimate_snr_simple(spectrum: ArrayView1<f64>, mask: Option<&ChannelMask>) -> Array1<f64> {
    let num_channels = spectrum.len();
    let num_unmasked = match mask {
        Some(m) => {
            assert_eq!(m.len(), num_channels, "mask and spectrum lengths differ");
            m.num_unmasked()
        }
        None => num_channels,
    };
    if num_channels < 3 || num_unmasked < MIN_UNMASKED_CHANNELS {
        return Array1::from_elem(num_channels, f64::NAN);
    }

    let residuals = &spectrum.slice(s![2..]) - &spectrum.slice(s![..-2]);
    let noise = std_dev(
        residuals
            .iter()
            .enumerate()
            .filter(|(j, _)| !mask.is_some_and(|m| m.is_masked(j + 1)))
            .map(|(_, &r)| r),
    ) / SQRT_2;
    let background = nanmean(unmasked(spectrum.view(), mask));

    spectrum.mapv(|s| (s - background) / noise)
}
