// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, make_observation, pictor_hi, Files};

#[test]
fn test_calibrate_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, off } = make_observation(tmp_dir.path());

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "8", "--no-plot", "--on"])
        .arg(&on)
        .arg("--off")
        .arg(&off)
        .ok();
    assert!(
        cmd.is_ok(),
        "calibrate failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
#[cfg(feature = "plotting")]
fn test_calibrate_plot_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, off } = make_observation(tmp_dir.path());
    let plot = tmp_dir.path().join("plot.png");

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "8", "--on"])
        .arg(&on)
        .arg("--off")
        .arg(&off)
        .arg("-o")
        .arg(&plot)
        .ok();
    assert!(
        cmd.is_ok(),
        "calibrate failed to plot simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(plot.exists());
}

#[test]
fn test_dry_run_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());

    let cmd = pictor_hi()
        .args(["calibrate", "--dry-run", "--nchan", "8", "--on"])
        .arg(&on)
        .ok();
    assert!(
        cmd.is_ok(),
        "calibrate --dry-run failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
