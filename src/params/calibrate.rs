// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use log::{debug, info, warn};
use thiserror::Error;

use super::{ObservationParams, ReductionOptions};
use crate::{
    calibrate::{HiCalibration, ReductionError},
    io::read::{read_power_file, PowerReadError, PowerScaling},
};

/// Parameters needed to calibrate an ON/OFF observation pair.
#[derive(Debug, Clone)]
pub struct CalibrateParams {
    /// The ON (source) observation.
    pub on_file: PathBuf,

    /// The OFF (background) observation.
    pub off_file: PathBuf,

    pub obs: ObservationParams,

    /// How to convert raw ON samples.
    pub on_scaling: PowerScaling,

    /// How to convert raw OFF samples.
    pub off_scaling: PowerScaling,

    pub reduction: ReductionOptions,

    /// Where to write the figure. If `None`, no figure is made.
    pub output_plot: Option<PathBuf>,
}

impl CalibrateParams {
    pub fn run(&self) -> Result<HiCalibration, CalibrateError> {
        let CalibrateParams {
            on_file,
            off_file,
            obs,
            on_scaling,
            off_scaling,
            reduction,
            output_plot,
        } = self;

        info!("Reading ON data from {}", on_file.display());
        let on = read_power_file(on_file, obs.num_channels, *on_scaling)?;
        info!("Reading OFF data from {}", off_file.display());
        let off = read_power_file(off_file, obs.num_channels, *off_scaling)?;
        debug!(
            "ON: {} sub-integrations, OFF: {} sub-integrations",
            on.nrows(),
            off.nrows()
        );

        let cal = HiCalibration::new(on, off.view(), obs, reduction)?;
        if cal.num_rfi_flagged > 0 {
            info!(
                "Flagged {} of {} ON samples as RFI",
                cal.num_rfi_flagged,
                cal.on_power.len()
            );
        }
        info!(
            "Masked {} of {} channels{}",
            cal.mask.num_masked(),
            cal.mask.len(),
            if cal.rfi_mask_applied {
                " (including RFI mask bands)"
            } else {
                ""
            }
        );
        if cal.k.is_nan() {
            warn!("Couldn't estimate k; no unmasked channels have a finite OFF/ON ratio");
        } else {
            // k is only a diagnostic; the calibrated spectrum is ON/OFF.
            info!("Estimated k factor: {:.6}", cal.k);
        }
        match cal.peak_snr() {
            Some((chan, snr)) => info!(
                "Peak S/N: {snr:.2} at {:.4} MHz (channel {chan})",
                cal.freqs_hz[chan] / 1e6
            ),
            None => warn!("The S/N of every channel is NaN"),
        }

        match output_plot {
            #[cfg(feature = "plotting")]
            Some(output) => {
                crate::plotting::plot_hi(&cal, output)?;
                info!("Wrote {}", output.display());
            }
            #[cfg(not(feature = "plotting"))]
            Some(output) => {
                warn!(
                    "Not writing {}; pictor-hi was compiled without the \"plotting\" feature",
                    output.display()
                );
            }
            None => debug!("Not plotting"),
        }

        Ok(cal)
    }
}

#[derive(Error, Debug)]
pub enum CalibrateError {
    #[error(transparent)]
    PowerRead(#[from] PowerReadError),

    #[error(transparent)]
    Reduction(#[from] ReductionError),

    #[cfg(feature = "plotting")]
    #[error(transparent)]
    Plot(#[from] crate::plotting::PlotError),
}
