// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read raw power files.
//!
//! These files are flat sequences of little-endian 32-bit floats with no
//! header. Consecutive groups of `num_channels` floats are the channel powers
//! of one sub-integration, so the data is reshaped to (sub-integrations ×
//! channels). Samples are promoted to double precision and normalised on the
//! way in.

mod error;

pub use error::PowerReadError;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// How raw samples are converted to display units: each sample is divided by
/// `divisor` then multiplied by `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerScaling {
    pub divisor: f64,
    pub multiplier: f64,
}

impl PowerScaling {
    pub fn new(divisor: f64, multiplier: f64) -> PowerScaling {
        PowerScaling {
            divisor,
            multiplier,
        }
    }

    /// Scaling that leaves the raw samples untouched.
    pub fn identity() -> PowerScaling {
        PowerScaling::new(1.0, 1.0)
    }

    fn apply(&self, sample: f32) -> f64 {
        f64::from(sample) / self.divisor * self.multiplier
    }
}

/// Read a raw power file into a (sub-integrations × channels) array.
pub fn read_power_file(
    file: &Path,
    num_channels: usize,
    scaling: PowerScaling,
) -> Result<Array2<f64>, PowerReadError> {
    let file_str = file.display().to_string();
    if !file.exists() {
        return Err(PowerReadError::DoesNotExist(file_str));
    }

    let mut bytes = vec![];
    File::open(file)
        .map(BufReader::new)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(|err| PowerReadError::IO {
            file: file_str.clone(),
            err,
        })?;
    debug!("Read {} bytes from {file_str}", bytes.len());

    power_from_bytes(&bytes, &file_str, num_channels, scaling)
}

/// Convert raw bytes into a (sub-integrations × channels) array. `file` is
/// only used in error messages.
pub fn power_from_bytes(
    bytes: &[u8],
    file: &str,
    num_channels: usize,
    scaling: PowerScaling,
) -> Result<Array2<f64>, PowerReadError> {
    if num_channels == 0 {
        return Err(PowerReadError::ZeroChannels);
    }
    if bytes.is_empty() {
        return Err(PowerReadError::Empty {
            file: file.to_string(),
        });
    }
    if bytes.len() % std::mem::size_of::<f32>() != 0 {
        return Err(PowerReadError::NotFloat32 {
            file: file.to_string(),
            num_bytes: bytes.len(),
        });
    }
    let num_samples = bytes.len() / std::mem::size_of::<f32>();
    if num_samples % num_channels != 0 {
        return Err(PowerReadError::ChannelMismatch {
            file: file.to_string(),
            num_samples,
            num_channels,
        });
    }

    let mut samples = vec![0.0; num_samples];
    LittleEndian::read_f32_into(bytes, &mut samples);
    let num_subints = num_samples / num_channels;
    debug!("{file}: {num_subints} sub-integrations of {num_channels} channels");

    let power = Array2::from_shape_vec(
        (num_subints, num_channels),
        samples.into_iter().map(|s| scaling.apply(s)).collect(),
    )?;
    Ok(power)
}
