// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for calibration testing.

mod arg_files;

use ndarray::prelude::*;
use tempfile::TempDir;

use crate::{get_cmd_output, make_observation, pictor_hi, write_power_file, Files};

#[test]
fn test_calibrate_without_plot() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "8", "--no-plot", "--on"])
        .arg(&on)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Estimated k factor"), "{stdout}");
    assert!(stdout.contains("pictor-hi calibrate complete."), "{stdout}");
    assert!(!tmp_dir.path().join("plot_hi.png").exists());
}

#[test]
fn test_plot_hi_alias() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, off } = make_observation(tmp_dir.path());

    let cmd = pictor_hi()
        .args(["plot-hi", "--nchan", "8", "--no-plot", "--on"])
        .arg(&on)
        .arg("--off")
        .arg(&off)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
}

#[test]
fn test_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());
    let output = tmp_dir.path().join("figure.png");

    let cmd = pictor_hi()
        .args(["calibrate", "--dry-run", "--nchan", "8", "--on"])
        .arg(&on)
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run -- exiting now."), "{stdout}");
    assert!(!stdout.contains("Estimated k factor"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_missing_off_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, off } = make_observation(tmp_dir.path());
    std::fs::remove_file(&off).unwrap();

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "8", "--no-plot", "--on"])
        .arg(&on)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("OFF observation"), "{stderr}");
    assert!(stderr.contains("off8.dat"), "{stderr}");
}

#[test]
fn test_channel_mismatch() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());
    // The OFF file is fine, but the ON file's 48 samples can't be split into
    // 5 channels.
    write_power_file(
        &tmp_dir.path().join("off5.dat"),
        Array2::from_elem((2, 5), 1.0).view(),
    );

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "5", "--no-plot", "--on"])
        .arg(&on)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("can't be evenly split into 5 channels"),
        "{stderr}"
    );
}

#[test]
fn test_invalid_nchan() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());

    let cmd = pictor_hi()
        .args(["calibrate", "--nchan", "0", "--on"])
        .arg(&on)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--nchan"), "{stderr}");
}

#[test]
fn test_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());
    let toml = tmp_dir.path().join("args.toml");

    let cmd = pictor_hi()
        .args(["calibrate", "--dry-run", "--nchan", "8", "--on"])
        .arg(&on)
        .arg("--save-toml")
        .arg(&toml)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&toml).unwrap();
    assert!(contents.contains("nchan = 8"), "{contents}");

    // The saved arguments reproduce the run.
    let cmd = pictor_hi()
        .args(["calibrate", "--no-plot"])
        .arg(&toml)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
}

#[test]
fn test_bump_channels_are_masked() {
    use pictor_hi::{ChannelMask, ObservationParams, ReductionOptions};

    let obs = ObservationParams {
        num_channels: 8,
        ..Default::default()
    };
    let freqs = obs.frequency_axis();
    let mask = ChannelMask::from_bands(freqs.view(), &ReductionOptions::default().mask_bands);
    assert_eq!(mask.masked_indices(), vec![6, 7]);
}
