//! Chart rendering for flightplot.
//!
//! Draws four vertically stacked panels (altitude, relative altitude, speed,
//! speed alarms) onto one PNG canvas. Smoothed series are drawn solid with
//! the raw series behind them at reduced opacity, sharing axes; the alarm
//! panel is a marker-only scatter.

use std::io::IsTerminal;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{debug, info, warn};

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::reader::FlightLog;
use crate::smoothing::{moving_average, smoothed_axis};

/// Caption font used by every panel.
const CAPTION_FONT: (&str, i32) = ("sans-serif", 20);

/// Opacity of the raw series drawn behind the smoothed lines.
const RAW_ALPHA: f64 = 0.2;

/// Marker radius for alarm scatter points.
const ALARM_MARKER_SIZE: i32 = 3;

type DrawResult<DB> =
    std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// One raw/smoothed series pair drawn on a shared panel.
struct SeriesPair<'a> {
    label: &'a str,
    raw: &'a [f64],
    smoothed: &'a [f64],
    color: RGBColor,
}

/// Render the four-panel chart for `log` and write it to the configured
/// output path, overwriting any existing file.
///
/// Returns the path the PNG was written to.
///
/// # Errors
///
/// Returns [`Error::LogEmpty`] for a log with no records,
/// [`Error::InvalidWindow`] if the smoothing window does not fit the record
/// count, and [`Error::Render`] if the backend fails to draw or write.
pub fn render(log: &FlightLog, config: &PlotConfig) -> Result<PathBuf> {
    if log.is_empty() {
        return Err(Error::LogEmpty);
    }

    let window = config.window;
    let timestamps = log.timestamps();
    let current = log.current_altitudes();
    let zero = log.zero_altitudes();
    let relative = log.relative_altitudes();
    let speeds = log.speeds();

    let smoothed_current = moving_average(&current, window)?;
    let smoothed_zero = moving_average(&zero, window)?;
    let smoothed_relative = moving_average(&relative, window)?;
    let smoothed_speeds = moving_average(&speeds, window)?;
    let axis = smoothed_axis(&timestamps, window);

    debug!(
        "Rendering {} records (window {window}) to {}",
        log.len(),
        config.output_path.display()
    );

    let root = BitMapBackend::new(&config.output_path, (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| Error::render(e.to_string()))?;

    let areas = root.split_evenly((4, 1));

    draw_series_panel(
        &areas[0],
        "Altitude (Current and Zero Reference)",
        &timestamps,
        axis,
        &[
            SeriesPair {
                label: "Current Altitude",
                raw: &current,
                smoothed: &smoothed_current,
                color: BLUE,
            },
            SeriesPair {
                label: "Zero Reference",
                raw: &zero,
                smoothed: &smoothed_zero,
                color: RED,
            },
        ],
    )
    .map_err(|e| Error::render(e.to_string()))?;

    draw_series_panel(
        &areas[1],
        "Relative Altitude",
        &timestamps,
        axis,
        &[SeriesPair {
            label: "Relative Altitude",
            raw: &relative,
            smoothed: &smoothed_relative,
            color: GREEN,
        }],
    )
    .map_err(|e| Error::render(e.to_string()))?;

    draw_series_panel(
        &areas[2],
        "Speed",
        &timestamps,
        axis,
        &[SeriesPair {
            label: "Speed",
            raw: &speeds,
            smoothed: &smoothed_speeds,
            color: BLUE,
        }],
    )
    .map_err(|e| Error::render(e.to_string()))?;

    draw_alarm_panel(&areas[3], &timestamps, &log.alarm_times())
        .map_err(|e| Error::render(e.to_string()))?;

    root.present().map_err(|e| Error::render(e.to_string()))?;

    info!("Wrote chart to {}", config.output_path.display());
    Ok(config.output_path.clone())
}

/// Draw one line panel: smoothed series solid, raw series behind at
/// [`RAW_ALPHA`], shared y-axis autoscaled from the raw values.
fn draw_series_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    timestamps: &[DateTime<Utc>],
    axis: &[DateTime<Utc>],
    pairs: &[SeriesPair<'_>],
) -> DrawResult<DB>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_range = value_range(pairs.iter().flat_map(|p| p.raw.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(time_range(timestamps), y_range)?;

    chart.configure_mesh().draw()?;

    for pair in pairs {
        let color = pair.color;
        chart
            .draw_series(LineSeries::new(
                axis.iter().copied().zip(pair.smoothed.iter().copied()),
                &color,
            ))?
            .label(format!("{} (Smoothed)", pair.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], color));

        let faded = color.mix(RAW_ALPHA);
        chart
            .draw_series(LineSeries::new(
                timestamps.iter().copied().zip(pair.raw.iter().copied()),
                &faded,
            ))?
            .label(format!("Raw {}", pair.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], faded));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

/// Draw the alarm scatter panel: one marker at `y = 1` per raised alarm,
/// fixed y-range `[0, 2]`.
fn draw_alarm_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    timestamps: &[DateTime<Utc>],
    alarms: &[DateTime<Utc>],
) -> DrawResult<DB>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption("Speed Alarms", CAPTION_FONT)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(time_range(timestamps), 0f64..2f64)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(
        alarms
            .iter()
            .map(|t| Circle::new((*t, 1.0), ALARM_MARKER_SIZE, RED.filled())),
    )?;

    Ok(())
}

/// The x-axis range, padded to stay drawable for single-instant logs.
fn time_range(timestamps: &[DateTime<Utc>]) -> Range<DateTime<Utc>> {
    let start = timestamps[0];
    let mut end = timestamps[timestamps.len() - 1];
    if end <= start {
        end = start + chrono::Duration::seconds(1);
    }
    start..end
}

/// Autoscaled y-range over the given values, padded when flat so plotters
/// keeps a non-degenerate coordinate system.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    min..max
}

/// Hand the rendered chart to the desktop viewer.
///
/// Skipped when stdout is not a terminal or no display is reachable, so
/// headless and test runs never block on a viewer. Spawn failures are
/// logged and otherwise ignored; they never affect the exit status.
pub fn open_in_viewer(path: &Path) {
    if !std::io::stdout().is_terminal() {
        debug!("stdout is not a terminal, skipping viewer hand-off");
        return;
    }

    #[cfg(target_os = "linux")]
    if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
        debug!("no display reachable, skipping viewer hand-off");
        return;
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    match Command::new(opener)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => debug!("Opened {} with {opener}", path.display()),
        Err(e) => warn!("Failed to open {} with {opener}: {e}", path.display()),
    }
}
