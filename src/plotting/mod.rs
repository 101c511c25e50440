// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot a calibrated hydrogen-line observation.
//!
//! The figure has three rows: the averaged ON spectrum and the S/N of the
//! calibrated spectrum, the ON and calibrated dynamic spectra ("waterfalls"),
//! then the ON power against time.

mod error;

pub use error::PlotError;

use std::path::Path;

use log::{debug, trace};
use ndarray::prelude::*;
use plotters::{coord::Shift, prelude::*};

use crate::{calibrate::HiCalibration, constants::HI_REST_FREQ_MHZ};

/// The number of X pixels on the figure.
const X_PIXELS: u32 = 3000;
/// The number of Y pixels on the figure.
const Y_PIXELS: u32 = 1400;

const LINE_COLOUR: RGBColor = RGBColor(31, 119, 180);
const REST_FREQ_COLOUR: RGBColor = RGBColor(165, 42, 42);
const NO_DATA_COLOUR: RGBColor = RGBColor(220, 220, 220);

/// Anchors of the heat-map colour scale, from the lowest value to the highest.
const MAGMA: [(u8, u8, u8); 6] = [
    (0, 0, 4),
    (59, 15, 112),
    (140, 41, 129),
    (222, 73, 104),
    (254, 159, 109),
    (252, 253, 191),
];

/// Render the six-panel figure for `cal` into a PNG at `output`.
pub fn plot_hi(cal: &HiCalibration, output: &Path) -> Result<(), PlotError> {
    let num_chans = cal.freqs_hz.len();
    let num_subints = cal.times_s.len();
    if num_chans == 0 || num_subints == 0 {
        return Err(PlotError::NothingToPlot);
    }
    debug!("Plotting {num_subints} sub-integrations of {num_chans} channels");

    let freqs_mhz = cal.freqs_mhz();
    let chan_width_mhz = cal.chan_width_hz / 1e6;
    let freq_range = (freqs_mhz[0], freqs_mhz[num_chans - 1] + chan_width_mhz);
    let time_range = (0.0, cal.times_s[num_subints - 1] + cal.subint_duration_s);
    trace!("Frequency range: {freq_range:?} MHz, time range: {time_range:?} s");

    let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::Plotters(Box::new(e)))?;

    let rows = root.split_evenly((3, 1));
    let top = rows[0].split_evenly((1, 2));
    let middle = rows[1].split_evenly((1, 2));

    plot_line(
        &top[0],
        LinePanel {
            title: "Averaged Spectrum",
            x_desc: "Frequency (MHz)",
            y_desc: "Relative Power",
            x_range: freq_range,
            mark_rest_freq: true,
        },
        freqs_mhz.view(),
        cal.on_spectrum.view(),
    )?;
    plot_line(
        &top[1],
        LinePanel {
            title: "Calibrated Spectrum",
            x_desc: "Frequency (MHz)",
            y_desc: "Signal-to-Noise Ratio (S/N)",
            x_range: freq_range,
            mark_rest_freq: true,
        },
        freqs_mhz.view(),
        cal.snr.view(),
    )?;

    let waterfall_axes = WaterfallAxes {
        freqs_mhz: freqs_mhz.view(),
        chan_width_mhz,
        times_s: cal.times_s.view(),
        subint_duration_s: cal.subint_duration_s,
        freq_range,
        time_range,
    };
    plot_waterfall(
        &middle[0],
        "Dynamic Spectrum (Waterfall)",
        &waterfall_axes,
        cal.on_power.view(),
    )?;
    plot_waterfall(
        &middle[1],
        "Calibrated Dynamic Spectrum (Waterfall)",
        &waterfall_axes,
        cal.dynamic_spectrum.view(),
    )?;

    plot_line(
        &rows[2],
        LinePanel {
            title: "Power vs Time",
            x_desc: "Time (s)",
            y_desc: "Relative Power",
            x_range: time_range,
            mark_rest_freq: false,
        },
        cal.times_s.view(),
        cal.time_series.view(),
    )?;

    root.present().map_err(|e| PlotError::Output {
        file: output.to_path_buf(),
        err: e.to_string(),
    })?;

    Ok(())
}

struct LinePanel {
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
    x_range: (f64, f64),
    /// Draw a dashed line at the hydrogen rest frequency?
    mark_rest_freq: bool,
}

struct WaterfallAxes<'a> {
    freqs_mhz: ArrayView1<'a, f64>,
    chan_width_mhz: f64,
    times_s: ArrayView1<'a, f64>,
    subint_duration_s: f64,
    freq_range: (f64, f64),
    time_range: (f64, f64),
}

fn panel_err<E: std::fmt::Display>(panel: &'static str, e: E) -> PlotError {
    PlotError::Panel {
        panel,
        err: e.to_string(),
    }
}

/// For a single drawing area, plot `ys` against `xs`. Non-finite values
/// leave gaps in the line.
fn plot_line<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    panel: LinePanel,
    xs: ArrayView1<f64>,
    ys: ArrayView1<f64>,
) -> Result<(), PlotError> {
    let LinePanel {
        title,
        x_desc,
        y_desc,
        x_range,
        mark_rest_freq,
    } = panel;
    let (y_min, y_max) = match finite_range(ys.iter().copied()) {
        Some(r) => padded(r),
        None => (0.0, 1.0),
    };

    let mut cc = ChartBuilder::on(drawing_area)
        .caption(title, ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(x_range.0..x_range.1, y_min..y_max)
        .map_err(|e| panel_err(title, e))?;

    cc.configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .x_label_formatter(&|x| format!("{x:.2}"))
        .draw()
        .map_err(|e| panel_err(title, e))?;

    let segments = finite_segments(xs, ys);
    if segments.is_empty() {
        cc.plotting_area()
            .fill(&NO_DATA_COLOUR)
            .map_err(|e| panel_err(title, e))?;
        return Ok(());
    }
    for segment in segments {
        cc.draw_series(LineSeries::new(segment, LINE_COLOUR.stroke_width(2)))
            .map_err(|e| panel_err(title, e))?;
    }

    if mark_rest_freq && HI_REST_FREQ_MHZ > x_range.0 && HI_REST_FREQ_MHZ < x_range.1 {
        const NUM_DASHES: usize = 25;
        let style = REST_FREQ_COLOUR.stroke_width(2);
        let dash = (y_max - y_min) / (2 * NUM_DASHES) as f64;
        cc.draw_series((0..NUM_DASHES).map(|i| {
            let y = y_min + 2.0 * dash * i as f64;
            PathElement::new(
                vec![(HI_REST_FREQ_MHZ, y), (HI_REST_FREQ_MHZ, y + dash)],
                style,
            )
        }))
        .map_err(|e| panel_err(title, e))?;

        let label_style = ("sans-serif", 20).into_font().color(&REST_FREQ_COLOUR);
        let label_x = HI_REST_FREQ_MHZ + 0.01 * (x_range.1 - x_range.0);
        cc.draw_series([
            Text::new(
                "Hydrogen Line",
                (label_x, y_min + 0.12 * (y_max - y_min)),
                label_style.clone(),
            ),
            Text::new(
                "Reference Frequency",
                (label_x, y_min + 0.07 * (y_max - y_min)),
                label_style,
            ),
        ])
        .map_err(|e| panel_err(title, e))?;
    }

    Ok(())
}

/// For a single drawing area, plot a (time, frequency) heat map. NaN samples
/// aren't drawn.
fn plot_waterfall<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    title: &'static str,
    axes: &WaterfallAxes,
    data: ArrayView2<f64>,
) -> Result<(), PlotError> {
    let mut cc = ChartBuilder::on(drawing_area)
        .caption(title, ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(
            axes.freq_range.0..axes.freq_range.1,
            axes.time_range.0..axes.time_range.1,
        )
        .map_err(|e| panel_err(title, e))?;

    cc.configure_mesh()
        .disable_mesh()
        .x_desc("Frequency (MHz)")
        .y_desc("Time (s)")
        .axis_desc_style(("sans-serif", 22))
        .label_style(("sans-serif", 18))
        .x_label_formatter(&|x| format!("{x:.2}"))
        .draw()
        .map_err(|e| panel_err(title, e))?;

    let (min, max) = match finite_range(data.iter().copied()) {
        Some(r) => r,
        None => {
            cc.plotting_area()
                .fill(&NO_DATA_COLOUR)
                .map_err(|e| panel_err(title, e))?;
            return Ok(());
        }
    };
    let span = max - min;

    let freqs = axes.freqs_mhz;
    let times = axes.times_s;
    let (width, height) = (axes.chan_width_mhz, axes.subint_duration_s);
    cc.draw_series(
        data.indexed_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|((i_time, i_chan), &v)| {
                let frac = if span > 0.0 { (v - min) / span } else { 0.5 };
                let (x, y) = (freqs[i_chan], times[i_time]);
                Rectangle::new([(x, y), (x + width, y + height)], magma(frac).filled())
            }),
    )
    .map_err(|e| panel_err(title, e))?;

    Ok(())
}

/// The smallest and largest finite values, if there are any.
fn finite_range<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widen a range so that lines don't sit on the plot edges. A range of a
/// single value is widened around that value.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = if hi > lo {
        0.05 * (hi - lo)
    } else {
        0.5 * lo.abs().max(1.0)
    };
    (lo - pad, hi + pad)
}

/// Split (x, y) pairs into runs with finite y values.
fn finite_segments(xs: ArrayView1<f64>, ys: ArrayView1<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = vec![];
    let mut current = vec![];
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Map `frac` (0 to 1, clamped) onto the heat-map colour scale.
fn magma(frac: f64) -> RGBColor {
    let frac = if frac.is_nan() { 0.0 } else { frac.clamp(0.0, 1.0) };
    let pos = frac * (MAGMA.len() - 1) as f64;
    let i = (pos.floor() as usize).min(MAGMA.len() - 2);
    let t = pos - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    let (r0, g0, b0) = MAGMA[i];
    let (r1, g1, b1) = MAGMA[i + 1];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
