// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all pictor-hi-related errors. This should be the *only*
//! error enum that is publicly visible from the binary.

use thiserror::Error;

use super::calibrate::CalibrateArgsError;
use crate::{
    calibrate::ReductionError,
    io::read::PowerReadError,
    params::CalibrateError,
};

/// The *only* publicly visible error from the pictor-hi binary. Each error
/// message should include a hint of where to look next, unless it's
/// "generic".
#[derive(Error, Debug)]
pub enum PictorError {
    /// An error related to the calibrate arguments.
    #[error("{0}\n\nSee for more info: pictor-hi calibrate --help")]
    CalibrateArgs(String),

    /// An error related to reading raw power files.
    #[error("{0}\n\nPower files are headerless sequences of little-endian 32-bit floats, one sub-integration of --nchan channels after another.")]
    PowerRead(String),

    /// An error raised while reducing the observation.
    #[error("{0}")]
    Reduction(String),

    /// An error related to drawing the figure.
    #[error("{0}\n\nTry --no-plot to skip the figure.")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files use the same names as the long command-line arguments, e.g. nchan = 1024")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CalibrateArgsError> for PictorError {
    fn from(e: CalibrateArgsError) -> Self {
        Self::CalibrateArgs(e.to_string())
    }
}

impl From<PowerReadError> for PictorError {
    fn from(e: PowerReadError) -> Self {
        let s = e.to_string();
        match e {
            PowerReadError::DoesNotExist(_)
            | PowerReadError::ZeroChannels
            | PowerReadError::Empty { .. }
            | PowerReadError::NotFloat32 { .. }
            | PowerReadError::ChannelMismatch { .. }
            | PowerReadError::Shape(_) => Self::PowerRead(s),
            PowerReadError::IO { .. } => Self::Generic(s),
        }
    }
}

impl From<ReductionError> for PictorError {
    fn from(e: ReductionError) -> Self {
        Self::Reduction(e.to_string())
    }
}

impl From<CalibrateError> for PictorError {
    fn from(e: CalibrateError) -> Self {
        match e {
            CalibrateError::PowerRead(e) => Self::from(e),
            CalibrateError::Reduction(e) => Self::from(e),
            #[cfg(feature = "plotting")]
            CalibrateError::Plot(e) => Self::from(e),
        }
    }
}

#[cfg(feature = "plotting")]
impl From<crate::plotting::PlotError> for PictorError {
    fn from(e: crate::plotting::PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<toml::ser::Error> for PictorError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(format!("Couldn't serialise arguments to toml: {e}"))
    }
}

impl From<std::io::Error> for PictorError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
