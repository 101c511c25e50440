// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use ndarray::prelude::*;

use super::*;

#[test]
fn test_mean_spectrum_and_time_series() {
    let power = array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]];
    assert_abs_diff_eq!(mean_spectrum(power.view()), array![2.0, 3.0, 4.0]);
    assert_abs_diff_eq!(time_series(power.view()), array![2.0, 4.0]);
}

#[test]
fn test_mean_spectrum_ignores_nans() {
    let power = array![
        [1.0, f64::NAN, f64::NAN],
        [3.0, 4.0, f64::NAN],
        [5.0, 6.0, f64::NAN]
    ];
    let spectrum = mean_spectrum(power.view());
    assert_abs_diff_eq!(spectrum[0], 3.0);
    assert_abs_diff_eq!(spectrum[1], 5.0);
    // An all-NaN channel is NaN, not an error.
    assert!(spectrum[2].is_nan());

    let series = time_series(power.view());
    assert_abs_diff_eq!(series[0], 1.0);
    assert_abs_diff_eq!(series[1], 3.5);
    assert_abs_diff_eq!(series[2], 5.5);
}

#[test]
fn test_flag_rfi() {
    let mut power = array![[100.0, 2500.0, 300.0], [150.0, 250.0, 350.0]];
    let num_flagged = flag_rfi(&mut power, 2000.0);
    assert_eq!(num_flagged, 1);
    assert!(power[(0, 1)].is_nan());
    assert!(contains_nan(power.view()));

    // The flagged sample doesn't contaminate the rest of its row or column.
    let spectrum = mean_spectrum(power.view());
    assert_abs_diff_eq!(spectrum, array![125.0, 250.0, 325.0]);
    let series = time_series(power.view());
    assert_abs_diff_eq!(series, array![200.0, 250.0]);
}

#[test]
fn test_flag_rfi_threshold_is_exclusive() {
    let mut power = array![[2000.0, 2000.000001]];
    assert_eq!(flag_rfi(&mut power, 2000.0), 1);
    assert_abs_diff_eq!(power[(0, 0)], 2000.0);
    assert!(power[(0, 1)].is_nan());
}

#[test]
fn test_flag_rfi_whole_column() {
    let mut power = array![[1.0, 3000.0], [2.0, 4000.0]];
    assert_eq!(flag_rfi(&mut power, 2000.0), 2);
    let spectrum = mean_spectrum(power.view());
    assert_abs_diff_eq!(spectrum[0], 1.5);
    assert!(spectrum[1].is_nan());
}

#[test]
fn test_no_nans() {
    let mut power = Array2::from_elem((4, 8), 500.0);
    assert_eq!(flag_rfi(&mut power, 2000.0), 0);
    assert!(!contains_nan(power.view()));
}
