// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common code for command-line interfaces: argument files, help texts
//! carrying default values, and pretty printers.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{constants::*, mask::FreqBand};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref FREQ_HELP: String =
        format!("The centre frequency of the receiver [Hz]. Default: {DEFAULT_CENTRE_FREQ_HZ}");

    pub(super) static ref SAMP_RATE_HELP: String =
        format!("The sampling rate of the receiver, which is also the observed bandwidth [Hz]. Default: {DEFAULT_SAMP_RATE_HZ}");

    pub(super) static ref NCHAN_HELP: String =
        format!("The number of frequency channels in each sub-integration. Default: {DEFAULT_NUM_CHANNELS}");

    pub(super) static ref NBIN_HELP: String =
        format!("The number of FFT bins integrated into each ON sub-integration. Raw ON samples are divided by this. Default: {DEFAULT_NUM_BINS}");

    pub(super) static ref OFF_DIVISOR_HELP: String =
        format!("Raw OFF samples are divided by this. Default: {DEFAULT_OFF_DIVISOR}");

    pub(super) static ref DISPLAY_MULTIPLIER_HELP: String =
        format!("Normalised ON and OFF samples are multiplied by this. Default: {DEFAULT_DISPLAY_MULTIPLIER}");

    pub(super) static ref RFI_THRESHOLD_HELP: String =
        format!("Scaled ON samples above this value are treated as interference and flagged. Default: {DEFAULT_RFI_THRESHOLD}");

    pub(super) static ref MASK_BAND_HELP: String = {
        let (low, high) = DEFAULT_MASK_BAND_HZ;
        format!("A band of frequencies to exclude from the k-factor and S/N estimators [MHz]. May be given multiple times; replaces the default band. Default: {}", FreqBand::new(low, high))
    };

    pub(super) static ref RFI_MASK_BAND_HELP: String = {
        let (low, high) = DEFAULT_RFI_MASK_BAND_HZ;
        format!("A band of frequencies to exclude only if interference was flagged in the ON data [MHz]. May be given multiple times; replaces the default band. Default: {}", FreqBand::new(low, high))
    };

    pub(super) static ref OUTPUT_HELP: String =
        format!("The path to the output figure. Only PNG files are supported. Default: {DEFAULT_OUTPUT_PLOT}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(PictorError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(PictorError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(PictorError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Group a flat list of edges \[MHz\] into bands. `None` is returned if there
/// is an odd number of edges.
pub(super) fn bands_from_mhz_pairs(edges: &[f64]) -> Option<Vec<FreqBand>> {
    if edges.len() % 2 != 0 {
        return None;
    }
    Some(
        edges
            .iter()
            .tuples()
            .map(|(&low, &high)| FreqBand::from_mhz(low, high))
            .collect(),
    )
}
