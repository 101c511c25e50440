// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that are kept modular to be used in multiple aspects of
//! `pictor-hi`.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod calibrate;

pub use calibrate::{CalibrateError, CalibrateParams};

use ndarray::Array1;

use crate::{
    constants::*,
    mask::{frequency_axis, FreqBand},
};

/// Receiver settings of an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationParams {
    /// The centre frequency of the band \[Hz\].
    pub centre_freq_hz: f64,

    /// The sampling rate, which is also the bandwidth \[Hz\].
    pub samp_rate_hz: f64,

    /// The number of frequency channels.
    pub num_channels: usize,

    /// The number of FFT bins integrated into each ON sub-integration.
    pub num_bins: usize,
}

impl Default for ObservationParams {
    fn default() -> Self {
        Self {
            centre_freq_hz: DEFAULT_CENTRE_FREQ_HZ,
            samp_rate_hz: DEFAULT_SAMP_RATE_HZ,
            num_channels: DEFAULT_NUM_CHANNELS,
            num_bins: DEFAULT_NUM_BINS,
        }
    }
}

impl ObservationParams {
    /// The channel frequencies \[Hz\].
    pub fn frequency_axis(&self) -> Array1<f64> {
        frequency_axis(self.centre_freq_hz, self.samp_rate_hz, self.num_channels)
    }

    /// The width of a frequency channel \[Hz\].
    pub fn channel_width(&self) -> f64 {
        self.samp_rate_hz / self.num_channels as f64
    }

    /// The duration of a sub-integration \[seconds\].
    pub fn subint_duration(&self) -> f64 {
        self.num_bins as f64 * self.num_channels as f64 / self.samp_rate_hz
    }

    /// The start times of `num_subints` sub-integrations, relative to the
    /// first \[seconds\].
    pub fn time_axis(&self, num_subints: usize) -> Array1<f64> {
        let tint = self.subint_duration();
        Array1::from_shape_fn(num_subints, |i| tint * i as f64)
    }
}

/// Settings controlling flagging and masking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionOptions {
    /// ON samples above this value are replaced with NaN. If `None`, nothing
    /// is flagged.
    pub rfi_threshold: Option<f64>,

    /// Always exclude these bands from the estimators.
    pub mask_bands: Vec<FreqBand>,

    /// Exclude these bands from the estimators only if the ON data contains
    /// NaNs.
    pub rfi_mask_bands: Vec<FreqBand>,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        let (low, high) = DEFAULT_MASK_BAND_HZ;
        let (rfi_low, rfi_high) = DEFAULT_RFI_MASK_BAND_HZ;
        Self {
            rfi_threshold: Some(DEFAULT_RFI_THRESHOLD),
            mask_bands: vec![FreqBand::new(low, high)],
            rfi_mask_bands: vec![FreqBand::new(rfi_low, rfi_high)],
        }
    }
}
