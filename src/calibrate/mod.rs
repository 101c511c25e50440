// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calibration of ON/OFF hydrogen-line observations.
//!
//! The OFF observation measures the bandpass of the receiver without the
//! source. Dividing the ON data by the mean OFF spectrum flattens the
//! bandpass, leaving the line. The "k" factor relating the two is estimated
//! too, but it is not folded into the calibrated spectrum; it's reported as a
//! diagnostic.

mod error;
mod gain;
mod snr;

pub use error::ReductionError;
pub use gain::estimate_k_factor_simple;
pub use snr::{estimate_snr_simple, MIN_UNMASKED_CHANNELS};

use log::{debug, trace};
use ndarray::prelude::*;

use crate::{
    mask::ChannelMask,
    params::{ObservationParams, ReductionOptions},
    reduce::{contains_nan, flag_rfi, mean_spectrum, time_series},
};

/// Iterate over the values of channels not excluded by the mask.
fn unmasked<'a>(
    values: ArrayView1<'a, f64>,
    mask: Option<&'a ChannelMask>,
) -> impl Iterator<Item = f64> + 'a {
    if let Some(m) = mask {
        assert_eq!(m.len(), values.len(), "mask and spectrum lengths differ");
    }
    values
        .into_iter()
        .enumerate()
        .filter(move |(i, _)| !mask.is_some_and(|m| m.is_masked(*i)))
        .map(|(_, &v)| v)
}

/// Divide an ON spectrum by an OFF spectrum.
pub fn calibrate_spectrum(on_spectrum: ArrayView1<f64>, off_spectrum: ArrayView1<f64>) -> Array1<f64> {
    &on_spectrum / &off_spectrum
}

/// Divide every sub-integration of an ON dynamic spectrum by an OFF spectrum.
///
/// # Panics
///
/// Panics if the number of channels in `on` isn't the length of
/// `off_spectrum`.
pub fn calibrate_dynamic_spectrum(
    on: ArrayView2<f64>,
    off_spectrum: ArrayView1<f64>,
) -> Array2<f64> {
    &on / &off_spectrum
}

/// Everything derived from an ON/OFF observation pair.
#[derive(Debug, Clone)]
pub struct HiCalibration {
    /// The channel frequencies \[Hz\].
    pub freqs_hz: Array1<f64>,

    /// The width of each channel \[Hz\].
    pub chan_width_hz: f64,

    /// The start time of each ON sub-integration, relative to the first
    /// \[seconds\].
    pub times_s: Array1<f64>,

    /// The duration of each sub-integration \[seconds\].
    pub subint_duration_s: f64,

    /// The ON dynamic spectrum, after RFI flagging.
    pub on_power: Array2<f64>,

    /// The mean ON spectrum.
    pub on_spectrum: Array1<f64>,

    /// The mean OFF spectrum.
    pub off_spectrum: Array1<f64>,

    /// The mean ON power of each sub-integration.
    pub time_series: Array1<f64>,

    /// The channels excluded from the k and S/N estimators.
    pub mask: ChannelMask,

    /// Were the RFI mask bands added to the mask?
    pub rfi_mask_applied: bool,

    /// The number of ON samples flagged as RFI.
    pub num_rfi_flagged: usize,

    pub k: f64,

    /// ON spectrum / OFF spectrum.
    pub spectrum: Array1<f64>,

    /// ON dynamic spectrum / OFF spectrum.
    pub dynamic_spectrum: Array2<f64>,

    /// The signal-to-noise ratio of `spectrum`.
    pub snr: Array1<f64>,
}

impl HiCalibration {
    /// Run the whole reduction. `on` is consumed because samples above the
    /// RFI threshold are replaced with NaN.
    pub fn new(
        mut on: Array2<f64>,
        off: ArrayView2<f64>,
        obs: &ObservationParams,
        opts: &ReductionOptions,
    ) -> Result<HiCalibration, ReductionError> {
        for (kind, power) in [("ON", on.view()), ("OFF", off.view())] {
            if power.ncols() != obs.num_channels {
                return Err(ReductionError::ChannelMismatch {
                    kind,
                    got: power.ncols(),
                    expected: obs.num_channels,
                });
            }
            if power.nrows() == 0 {
                return Err(ReductionError::NoSubintegrations(kind));
            }
        }

        let num_rfi_flagged = match opts.rfi_threshold {
            Some(threshold) => flag_rfi(&mut on, threshold),
            None => 0,
        };

        let on_spectrum = mean_spectrum(on.view());
        let off_spectrum = mean_spectrum(off);
        let time_series = time_series(on.view());

        let freqs_hz = obs.frequency_axis();
        let mut mask = ChannelMask::from_bands(freqs_hz.view(), &opts.mask_bands);
        // NaNs in the ON data mean that RFI flagging kicked in.
        let rfi_mask_applied = contains_nan(on.view());
        if rfi_mask_applied {
            debug!("ON data contains NaNs; adding the RFI mask bands");
            mask.add_bands(freqs_hz.view(), &opts.rfi_mask_bands);
        }
        trace!("Masked channels: {:?}", mask.masked_indices());

        let k = estimate_k_factor_simple(on_spectrum.view(), off_spectrum.view(), Some(&mask));
        let spectrum = calibrate_spectrum(on_spectrum.view(), off_spectrum.view());
        let dynamic_spectrum = calibrate_dynamic_spectrum(on.view(), off_spectrum.view());
        let snr = estimate_snr_simple(spectrum.view(), Some(&mask));
        let times_s = obs.time_axis(on.nrows());

        Ok(HiCalibration {
            freqs_hz,
            chan_width_hz: obs.channel_width(),
            times_s,
            subint_duration_s: obs.subint_duration(),
            on_power: on,
            on_spectrum,
            off_spectrum,
            time_series,
            mask,
            rfi_mask_applied,
            num_rfi_flagged,
            k,
            spectrum,
            dynamic_spectrum,
            snr,
        })
    }

    /// The channel frequencies \[MHz\].
    pub fn freqs_mhz(&self) -> Array1<f64> {
        &self.freqs_hz / 1e6
    }

    /// The channel with the biggest S/N, along with the S/N. NaNs are
    /// ignored; `None` if every S/N is NaN.
    pub fn peak_snr(&self) -> Option<(usize, f64)> {
        self.snr
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, s)| !s.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}
