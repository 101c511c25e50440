// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Raw data is single precision, but it
is promoted to double precision as soon as it is read.
 */

/// The rest frequency of the neutral hydrogen hyperfine transition \[MHz\].
pub const HI_REST_FREQ_MHZ: f64 = 1420.4057517667;

/// The default centre frequency of the receiver \[Hz\].
pub const DEFAULT_CENTRE_FREQ_HZ: f64 = 1_420_000_000.0;

/// The default sampling rate of the receiver, which is also the bandwidth of
/// the spectrum \[Hz\].
pub const DEFAULT_SAMP_RATE_HZ: f64 = 2_400_000.0;

/// The default number of frequency channels.
pub const DEFAULT_NUM_CHANNELS: usize = 1024;

/// The default number of FFT bins integrated into each ON sub-integration. The
/// raw ON data is divided by this value.
pub const DEFAULT_NUM_BINS: usize = 1000;

/// The raw OFF data is divided by this value.
pub const DEFAULT_OFF_DIVISOR: f64 = 10000.0;

/// Both the ON and OFF data are multiplied by this value after normalisation.
pub const DEFAULT_DISPLAY_MULTIPLIER: f64 = 10000.0;

/// ON samples (after scaling) above this value are considered to be
/// interference and are replaced with NaN.
pub const DEFAULT_RFI_THRESHOLD: f64 = 2000.0;

/// Channels in this band are always excluded from the k-factor and S/N
/// estimators; the hydrogen line lives here \[Hz\].
pub const DEFAULT_MASK_BAND_HZ: (f64, f64) = (1_420_300_000.0, 1_421_200_000.0);

/// Channels in this band are excluded only if RFI flagging produced NaNs in the
/// ON data \[Hz\].
pub const DEFAULT_RFI_MASK_BAND_HZ: (f64, f64) = (1_419_400_000.0, 1_419_750_000.0);

/// The default name of the output figure.
pub const DEFAULT_OUTPUT_PLOT: &str = "plot_hi.png";
