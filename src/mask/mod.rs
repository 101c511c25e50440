// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Frequency axes and channel masks.
//!
//! A [`ChannelMask`] marks channels that must not be used by the k-factor and
//! S/N estimators, e.g. channels containing the hydrogen line itself or known
//! interference. Masking never removes channels from outputs; it only affects
//! which channels feed the statistics.


use std::fmt::Display;

use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// Get the centre frequencies of `num_channels` channels spanning
/// `samp_rate_hz` around `centre_freq_hz` \[Hz\]. The first channel starts at
/// the lower band edge; the upper band edge is excluded.
pub fn frequency_axis(centre_freq_hz: f64, samp_rate_hz: f64, num_channels: usize) -> Array1<f64> {
    let start = centre_freq_hz - 0.5 * samp_rate_hz;
    let step = samp_rate_hz / num_channels as f64;
    Array1::from_shape_fn(num_channels, |i| start + step * i as f64)
}

/// A band of frequencies \[Hz\]. Both edges are exclusive; a frequency exactly
/// on an edge is not inside the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreqBand {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl FreqBand {
    pub fn new(low_hz: f64, high_hz: f64) -> FreqBand {
        FreqBand { low_hz, high_hz }
    }

    pub fn from_mhz(low_mhz: f64, high_mhz: f64) -> FreqBand {
        FreqBand::new(low_mhz * 1e6, high_mhz * 1e6)
    }

    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz > self.low_hz && freq_hz < self.high_hz
    }

    /// Is this band usable? Both edges must be finite and `low < high`.
    pub fn is_valid(&self) -> bool {
        self.low_hz.is_finite() && self.high_hz.is_finite() && self.low_hz < self.high_hz
    }
}

impl Display for FreqBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.4}-{:.4} MHz",
            self.low_hz / 1e6,
            self.high_hz / 1e6
        )
    }
}

/// Channels to be ignored by estimators. `true` means "don't use this
/// channel".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMask {
    flags: Array1<bool>,
}

impl ChannelMask {
    /// A mask that doesn't exclude anything.
    pub fn none(num_channels: usize) -> ChannelMask {
        ChannelMask {
            flags: Array1::from_elem(num_channels, false),
        }
    }

    /// Exclude every channel whose frequency is strictly inside any of the
    /// bands.
    pub fn from_bands(freqs_hz: ArrayView1<f64>, bands: &[FreqBand]) -> ChannelMask {
        let mut mask = ChannelMask::none(freqs_hz.len());
        mask.add_bands(freqs_hz, bands);
        mask
    }

    /// Additionally exclude every channel whose frequency is strictly inside
    /// any of the bands. Channels already excluded stay excluded.
    ///
    /// # Panics
    ///
    /// Panics if `freqs_hz` isn't the same length as the mask.
    pub fn add_bands(&mut self, freqs_hz: ArrayView1<f64>, bands: &[FreqBand]) {
        assert_eq!(
            freqs_hz.len(),
            self.flags.len(),
            "frequency axis and mask lengths differ"
        );
        ndarray::Zip::from(&mut self.flags)
            .and(&freqs_hz)
            .for_each(|flag, &freq| {
                if bands.iter().any(|band| band.contains(freq)) {
                    *flag = true;
                }
            });
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Is this channel excluded?
    pub fn is_masked(&self, chan: usize) -> bool {
        self.flags[chan]
    }

    pub fn num_masked(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn num_unmasked(&self) -> usize {
        self.len() - self.num_masked()
    }

    /// The indices of the excluded channels, ascending.
    pub fn masked_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &f)| f)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn flags(&self) -> ArrayView1<bool> {
        self.flags.view()
    }

    /// The mask as 0 (use) and 1 (exclude), as an indicator array.
    pub fn to_indicator(&self) -> Array1<u8> {
        self.flags.mapv(u8::from)
    }
}

impl From<Array1<bool>> for ChannelMask {
    fn from(flags: Array1<bool>) -> ChannelMask {
        ChannelMask { flags }
    }
}
