// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Cannot plot an observation with no channels or no sub-integrations")]
    NothingToPlot,

    #[error("While plotting the {panel} panel: {err}")]
    Panel { panel: &'static str, err: String },

    #[error("Couldn't write the figure to {file}: {err}")]
    Output { file: PathBuf, err: String },

    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error + Send + Sync>),
}
