// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::Write};

use indoc::formatdoc;
use tempfile::TempDir;

use crate::{get_cmd_output, make_observation, pictor_hi, Files};

#[test]
fn test_calibrate_with_toml_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, off } = make_observation(tmp_dir.path());
    let arg_file = tmp_dir.path().join("calibrate.toml");
    let mut f = File::create(&arg_file).unwrap();
    write!(
        f,
        "{}",
        formatdoc! {r#"
            on = "{}"
            off = "{}"
            nchan = 8
            no_plot = true
            mask_band = [1420.3, 1421.2]
        "#,
            on.display(),
            off.display()
        }
    )
    .unwrap();
    drop(f);

    let cmd = pictor_hi().arg("calibrate").arg(&arg_file).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Estimated k factor"), "{stdout}");
}

#[test]
fn test_calibrate_with_json_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());
    let arg_file = tmp_dir.path().join("calibrate.json");
    let mut f = File::create(&arg_file).unwrap();
    write!(
        f,
        r#"{{"on": "{}", "nchan": 8, "no_plot": true}}"#,
        on.display()
    )
    .unwrap();
    drop(f);

    let cmd = pictor_hi().arg("calibrate").arg(&arg_file).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
}

#[test]
fn test_cli_overrides_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files { on, .. } = make_observation(tmp_dir.path());
    let arg_file = tmp_dir.path().join("calibrate.toml");
    let mut f = File::create(&arg_file).unwrap();
    write!(
        f,
        "{}",
        formatdoc! {r#"
            on = "{}"
            nchan = 0
            no_plot = true
        "#,
            on.display()
        }
    )
    .unwrap();
    drop(f);

    // nchan = 0 in the file is invalid...
    let cmd = pictor_hi().arg("calibrate").arg(&arg_file).ok();
    assert!(cmd.is_err());

    // ... but the CLI wins.
    let cmd = pictor_hi()
        .arg("calibrate")
        .arg(&arg_file)
        .args(["--nchan", "8"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
}

#[test]
fn test_unrecognised_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("calibrate.yaml");
    File::create(&arg_file).unwrap();

    let cmd = pictor_hi().arg("calibrate").arg(&arg_file).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("doesn't have a recognised file extension"),
        "{stderr}"
    );
}
