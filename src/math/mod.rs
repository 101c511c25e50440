// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper statistics.
//!
//! Radio data is riddled with NaNs (flagged samples), so most of these
//! functions ignore them. A statistic with no valid input is NaN, never a
//! panic.


use std::cmp::Ordering;

/// The mean of the supplied values, ignoring NaNs. If there are no non-NaN
/// values, the result is NaN. Infinities are *not* ignored.
pub fn nanmean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// The median of the supplied values, ignoring anything that isn't finite.
/// For an even number of values, the two middle values are averaged. If there
/// are no finite values, the result is NaN.
pub fn finite_median<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = finite.len() / 2;
    if finite.len() % 2 == 0 {
        (finite[mid - 1] + finite[mid]) / 2.0
    } else {
        finite[mid]
    }
}

/// The population standard deviation (i.e. normalised by N, not N - 1) of the
/// supplied values. NaNs are *not* ignored; any NaN makes the result NaN. No
/// values also gives NaN.
pub fn std_dev<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return f64::NAN;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
