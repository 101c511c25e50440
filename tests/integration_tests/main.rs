// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod calibrate;
mod no_stderr;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use byteorder::{LittleEndian, WriteBytesExt};
use ndarray::prelude::*;

fn pictor_hi() -> Command {
    Command::cargo_bin("pictor-hi").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write raw (sub-integrations × channels) power as little-endian floats.
fn write_power_file(file: &Path, power: ArrayView2<f32>) {
    let mut f = BufWriter::new(File::create(file).unwrap());
    for &p in power.iter() {
        f.write_f32::<LittleEndian>(p).unwrap();
    }
    f.flush().unwrap();
}

struct Files {
    on: PathBuf,
    off: PathBuf,
}

/// Make a small observation pair in `dir`. The OFF file is put where
/// `pictor-hi` looks for it by default. A bump is added to the ON data in
/// channels 6 and 7, which sit inside the default mask band when there are
/// 8 channels.
fn make_observation(dir: &Path) -> Files {
    const NUM_CHANNELS: usize = 8;
    // Raw ON values are divided by --nbin (1000) and raw OFF values by
    // --off-divisor (10000) by default, so these become 100 and 200 after
    // scaling.
    let mut on = Array2::from_shape_fn((6, NUM_CHANNELS), |(t, c)| {
        10.0 + 0.01 * ((t * 3 + c * 7) % 5) as f32
    });
    on.slice_mut(s![.., 6..8]).mapv_inplace(|p| p * 1.5);
    let off = Array2::from_shape_fn((4, NUM_CHANNELS), |(t, c)| {
        200.0 + ((t + c) % 3) as f32
    });

    let files = Files {
        on: dir.join("observation.dat"),
        off: dir.join(format!("off{NUM_CHANNELS}.dat")),
    };
    write_power_file(&files.on, on.view());
    write_power_file(&files.off, off.view());
    files
}
