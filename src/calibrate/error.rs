// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReductionError {
    #[error("The {kind} data has {got} channels, but {expected} channels were expected")]
    ChannelMismatch {
        kind: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("The {0} data contains no sub-integrations")]
    NoSubintegrations(&'static str),
}
