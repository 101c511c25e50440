// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading raw power files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerReadError {
    #[error("Power file '{0}' does not exist")]
    DoesNotExist(String),

    #[error("Cannot read power data with 0 channels")]
    ZeroChannels,

    #[error("Power file '{file}' contains no samples")]
    Empty { file: String },

    #[error("Power file '{file}' is {num_bytes} bytes long, which isn't a whole number of 32-bit floats")]
    NotFloat32 { file: String, num_bytes: usize },

    #[error("Power file '{file}' contains {num_samples} samples, which can't be evenly split into {num_channels} channels")]
    ChannelMismatch {
        file: String,
        num_samples: usize,
        num_channels: usize,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error("Couldn't read power file '{file}': {err}")]
    IO {
        file: String,
        #[source]
        err: std::io::Error,
    },
}
