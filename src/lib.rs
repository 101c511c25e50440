// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Calibration and signal-to-noise estimation of hydrogen-line (HI) observations
made with ON/OFF switching.

An ON observation points at the source; an OFF observation measures the
receiver's bandpass without it. The mean OFF spectrum calibrates the ON data,
and the S/N of the calibrated spectrum is estimated from channel-to-channel
differences, ignoring masked channels.
 */

pub mod calibrate;
mod cli;
pub mod constants;
pub mod io;
pub mod mask;
pub mod math;
pub mod params;
#[cfg(feature = "plotting")]
pub mod plotting;
pub mod reduce;

// Re-exports.
pub use calibrate::{
    calibrate_dynamic_spectrum, calibrate_spectrum, estimate_k_factor_simple, estimate_snr_simple,
    HiCalibration,
};
pub use cli::{PictorError, PictorHi};
pub use io::read::{read_power_file, PowerReadError, PowerScaling};
pub use mask::{frequency_axis, ChannelMask, FreqBand};
pub use params::{CalibrateParams, ObservationParams, ReductionOptions};
