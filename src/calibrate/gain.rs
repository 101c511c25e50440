// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Estimation of the "k" factor relating ON and OFF bandpasses.

use ndarray::prelude::*;

use super::unmasked;
use crate::{mask::ChannelMask, math::finite_median};

/// Estimate the "k" factor by the median of OFF/ON ratios.
///
/// k is assumed to be applied to the ON measurement; take 1/k if it's applied
/// to the OFF measurement. Channels excluded by `mask` don't contribute, and
/// nor do non-finite ratios (e.g. from a zero or NaN ON value). If nothing is
/// left, k is NaN.
///
/// The median keeps k sane in the presence of a few channels with residual
/// interference or signal. It will likely fail if a significant part of the
/// unmasked spectrum contains signal; the mask must cover the line.
///
/// # Panics
///
/// Panics if `on`, `off` and `mask` don't all have the same length.
pub fn estimate_k_factor_simple(
    on: ArrayView1<f64>,
    off: ArrayView1<f64>,
    mask: Option<&ChannelMask>,
) -> f64 {
    assert_eq!(on.len(), off.len(), "ON and OFF spectra lengths differ");
    let ratios = &off / &on;
    finite_median(unmasked(ratios.view(), mask))
}
