// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parse calibration arguments into parameters.


use std::path::{Path, PathBuf};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    bands_from_mhz_pairs, display_warnings, InfoPrinter, Warn, ARG_FILE_HELP,
    DISPLAY_MULTIPLIER_HELP, FREQ_HELP, MASK_BAND_HELP, NBIN_HELP, NCHAN_HELP, OFF_DIVISOR_HELP,
    OUTPUT_HELP, RFI_MASK_BAND_HELP, RFI_THRESHOLD_HELP, SAMP_RATE_HELP,
};
use crate::{
    constants::*,
    io::read::PowerScaling,
    mask::FreqBand,
    params::{CalibrateParams, ObservationParams, ReductionOptions},
    PictorError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CalibrateArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The ON (source) observation.
    #[clap(long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) on: Option<PathBuf>,

    /// The OFF (background) observation. Default: off<NCHAN>.dat, next to the
    /// ON observation.
    #[clap(long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) off: Option<PathBuf>,

    #[clap(long, help = FREQ_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) freq: Option<f64>,

    #[clap(long, help = SAMP_RATE_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) samp_rate: Option<f64>,

    #[clap(long, help = NCHAN_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) nchan: Option<usize>,

    #[clap(long, help = NBIN_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) nbin: Option<usize>,

    #[clap(long, help = OFF_DIVISOR_HELP.as_str(), help_heading = "SCALING")]
    pub(super) off_divisor: Option<f64>,

    #[clap(long, help = DISPLAY_MULTIPLIER_HELP.as_str(), help_heading = "SCALING")]
    pub(super) display_multiplier: Option<f64>,

    #[clap(long, help = RFI_THRESHOLD_HELP.as_str(), help_heading = "FLAGGING AND MASKING")]
    pub(super) rfi_threshold: Option<f64>,

    /// Don't flag any ON samples as interference. The RFI mask bands are still
    /// used if the ON data already contains NaNs.
    #[clap(long, help_heading = "FLAGGING AND MASKING")]
    #[serde(default)]
    pub(super) no_rfi_flagging: bool,

    #[clap(
        long,
        multiple_occurrences(true),
        number_of_values = 2,
        value_names = &["LOW_MHZ", "HIGH_MHZ"],
        help = MASK_BAND_HELP.as_str(),
        help_heading = "FLAGGING AND MASKING"
    )]
    pub(super) mask_band: Option<Vec<f64>>,

    #[clap(
        long,
        multiple_occurrences(true),
        number_of_values = 2,
        value_names = &["LOW_MHZ", "HIGH_MHZ"],
        help = RFI_MASK_BAND_HELP.as_str(),
        help_heading = "FLAGGING AND MASKING"
    )]
    pub(super) rfi_mask_band: Option<Vec<f64>>,

    #[clap(short = 'o', long, parse(from_os_str), help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT")]
    pub(super) output: Option<PathBuf>,

    /// Don't draw the figure; only report the k factor and S/N.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) no_plot: bool,
}

impl CalibrateArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<CalibrateArgs, PictorError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let CalibrateArgs {
                args_file: _,
                on,
                off,
                freq,
                samp_rate,
                nchan,
                nbin,
                off_divisor,
                display_multiplier,
                rfi_threshold,
                no_rfi_flagging,
                mask_band,
                rfi_mask_band,
                output,
                no_plot,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(CalibrateArgs {
                args_file: None,
                on: cli_args.on.or(on),
                off: cli_args.off.or(off),
                freq: cli_args.freq.or(freq),
                samp_rate: cli_args.samp_rate.or(samp_rate),
                nchan: cli_args.nchan.or(nchan),
                nbin: cli_args.nbin.or(nbin),
                off_divisor: cli_args.off_divisor.or(off_divisor),
                display_multiplier: cli_args.display_multiplier.or(display_multiplier),
                rfi_threshold: cli_args.rfi_threshold.or(rfi_threshold),
                no_rfi_flagging: cli_args.no_rfi_flagging || no_rfi_flagging,
                mask_band: cli_args.mask_band.or(mask_band),
                rfi_mask_band: cli_args.rfi_mask_band.or(rfi_mask_band),
                output: cli_args.output.or(output),
                no_plot: cli_args.no_plot || no_plot,
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<CalibrateParams, PictorError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            on,
            off,
            freq,
            samp_rate,
            nchan,
            nbin,
            off_divisor,
            display_multiplier,
            rfi_threshold,
            no_rfi_flagging,
            mask_band,
            rfi_mask_band,
            output,
            no_plot,
        } = self;

        let obs = ObservationParams {
            centre_freq_hz: freq.unwrap_or(DEFAULT_CENTRE_FREQ_HZ),
            samp_rate_hz: samp_rate.unwrap_or(DEFAULT_SAMP_RATE_HZ),
            num_channels: nchan.unwrap_or(DEFAULT_NUM_CHANNELS),
            num_bins: nbin.unwrap_or(DEFAULT_NUM_BINS),
        };
        if obs.num_channels == 0 {
            return Err(CalibrateArgsError::ZeroChannels.into());
        }
        if obs.num_bins == 0 {
            return Err(CalibrateArgsError::ZeroBins.into());
        }
        check_positive("--freq", obs.centre_freq_hz)?;
        check_positive("--samp-rate", obs.samp_rate_hz)?;

        let off_divisor = off_divisor.unwrap_or(DEFAULT_OFF_DIVISOR);
        check_positive("--off-divisor", off_divisor)?;
        let display_multiplier = display_multiplier.unwrap_or(DEFAULT_DISPLAY_MULTIPLIER);
        check_positive("--display-multiplier", display_multiplier)?;

        let rfi_threshold = if no_rfi_flagging {
            if let Some(t) = rfi_threshold {
                format!("Not flagging RFI; ignoring the RFI threshold {t}").warn();
            }
            None
        } else {
            let t = rfi_threshold.unwrap_or(DEFAULT_RFI_THRESHOLD);
            check_positive("--rfi-threshold", t)?;
            Some(t)
        };

        let mask_bands = match mask_band {
            Some(edges) => parse_bands("--mask-band", &edges)?,
            None => {
                let (low, high) = DEFAULT_MASK_BAND_HZ;
                vec![FreqBand::new(low, high)]
            }
        };
        let rfi_mask_bands = match rfi_mask_band {
            Some(edges) => parse_bands("--rfi-mask-band", &edges)?,
            None => {
                let (low, high) = DEFAULT_RFI_MASK_BAND_HZ;
                vec![FreqBand::new(low, high)]
            }
        };
        let band_low = obs.centre_freq_hz - 0.5 * obs.samp_rate_hz;
        let band_high = obs.centre_freq_hz + 0.5 * obs.samp_rate_hz;
        for band in mask_bands.iter().chain(rfi_mask_bands.iter()) {
            if band.high_hz <= band_low || band.low_hz >= band_high {
                format!("The mask band {band} doesn't overlap the observed band; it won't mask anything").warn();
            }
        }

        let on_file = on.ok_or(CalibrateArgsError::NoOnFile)?;
        let off_file = off.unwrap_or_else(|| default_off_file(&on_file, obs.num_channels));
        for (kind, file) in [("ON", &on_file), ("OFF", &off_file)] {
            if !file.exists() {
                return Err(CalibrateArgsError::FileDoesNotExist {
                    kind,
                    file: file.clone(),
                }
                .into());
            }
        }

        let output_plot = if no_plot {
            if let Some(output) = output {
                format!("Not plotting; ignoring the output {}", output.display()).warn();
            }
            None
        } else {
            let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PLOT));
            let is_png = output
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("png"))
                .unwrap_or(false);
            if !is_png {
                return Err(CalibrateArgsError::OutputNotPng(output).into());
            }
            Some(output)
        };
        #[cfg(not(feature = "plotting"))]
        let output_plot = output_plot.and_then(|output| {
            format!(
                "pictor-hi was not compiled with the \"plotting\" feature; not writing {}",
                output.display()
            )
            .warn();
            None
        });

        let on_scaling = PowerScaling::new(obs.num_bins as f64, display_multiplier);
        let off_scaling = PowerScaling::new(off_divisor, display_multiplier);

        let mut printer = InfoPrinter::new("Calibration set up".into());
        printer.push_block(vec![
            format!("ON:  {}", on_file.display()).into(),
            format!("OFF: {}", off_file.display()).into(),
        ]);
        printer.push_block(vec![
            format!("Centre frequency: {} MHz", obs.centre_freq_hz / 1e6).into(),
            format!(
                "Bandwidth: {} MHz over {} channels ({:.3} kHz each)",
                obs.samp_rate_hz / 1e6,
                obs.num_channels,
                obs.channel_width() / 1e3
            )
            .into(),
            format!(
                "{} FFT bins per sub-integration ({:.4} s)",
                obs.num_bins,
                obs.subint_duration()
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("ON samples are divided by {}", on_scaling.divisor).into(),
            format!("OFF samples are divided by {}", off_scaling.divisor).into(),
            format!("Both are multiplied by {display_multiplier}").into(),
        ]);
        match rfi_threshold {
            Some(t) => printer.push_line(format!("Flagging ON samples above {t}").into()),
            None => printer.push_line("Not flagging RFI".into()),
        }
        printer.push_block(vec![
            format!("Masking {}", mask_bands.iter().join(", ")).into(),
            format!(
                "Masking {} if any RFI is flagged",
                rfi_mask_bands.iter().join(", ")
            )
            .into(),
        ]);
        match output_plot.as_ref() {
            Some(output) => {
                printer.push_line(format!("Writing the figure to {}", output.display()).into())
            }
            None => printer.push_line("Not writing a figure".into()),
        }
        printer.display();
        display_warnings();

        Ok(CalibrateParams {
            on_file,
            off_file,
            obs,
            on_scaling,
            off_scaling,
            reduction: ReductionOptions {
                rfi_threshold,
                mask_bands,
                rfi_mask_bands,
            },
            output_plot,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), PictorError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

/// The OFF observation made alongside `on_file`, when none is given.
fn default_off_file(on_file: &Path, num_channels: usize) -> PathBuf {
    let name = format!("off{num_channels}.dat");
    match on_file.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn check_positive(arg: &'static str, value: f64) -> Result<(), CalibrateArgsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalibrateArgsError::NotPositive { arg, value })
    }
}

fn parse_bands(arg: &'static str, edges: &[f64]) -> Result<Vec<FreqBand>, CalibrateArgsError> {
    let bands = bands_from_mhz_pairs(edges).ok_or(CalibrateArgsError::OddBandEdges {
        arg,
        num: edges.len(),
    })?;
    if let Some(band) = bands.iter().find(|b| !b.is_valid()) {
        return Err(CalibrateArgsError::InvalidBand {
            arg,
            band: band.to_string(),
        });
    }
    Ok(bands)
}

#[derive(thiserror::Error, Debug)]
pub(super) enum CalibrateArgsError {
    #[error("No ON observation was specified (--on)")]
    NoOnFile,

    #[error("The {kind} observation '{}' does not exist", file.display())]
    FileDoesNotExist { kind: &'static str, file: PathBuf },

    #[error("The number of channels (--nchan) cannot be 0")]
    ZeroChannels,

    #[error("The number of FFT bins (--nbin) cannot be 0")]
    ZeroBins,

    #[error("{arg} must be a positive number, but got {value}")]
    NotPositive { arg: &'static str, value: f64 },

    #[error("{arg} needs pairs of frequencies, but {num} values were given")]
    OddBandEdges { arg: &'static str, num: usize },

    #[error("{arg} was given the band {band}; the lower edge must be below the upper edge")]
    InvalidBand { arg: &'static str, band: String },

    #[error("The output figure '{}' must be a PNG file", .0.display())]
    OutputNotPng(PathBuf),
}
