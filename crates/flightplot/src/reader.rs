//! Flight log ingestion.
//!
//! This module reads the line-delimited JSON flight log into a [`FlightLog`]
//! and exposes the index-aligned series the renderer plots. Ingestion is
//! all-or-nothing: the first unreadable or malformed line aborts the read
//! with no per-line recovery.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::FlightRecord;

/// An ordered collection of flight telemetry records.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLog {
    /// Records in file order.
    records: Vec<FlightRecord>,
}

impl FlightLog {
    /// Build a log from already-parsed records.
    #[must_use]
    pub fn from_records(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    /// Read and parse a flight log file.
    ///
    /// The file handle is released before this returns, on success and on
    /// every error path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogOpen`] if the file cannot be opened,
    /// [`Error::LogRead`] if a line cannot be read, and the parse errors of
    /// [`FlightRecord::parse`] for the first bad line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading flight log from {}", path.display());

        let file = File::open(path).map_err(|source| Error::LogOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let text = line.map_err(|source| Error::LogRead {
                line: line_no,
                source,
            })?;
            // Tolerate blank lines (trailing newline and the like)
            if text.trim().is_empty() {
                continue;
            }
            records.push(FlightRecord::parse(line_no, &text)?);
        }

        info!("Read {} records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// The number of records in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    /// The timestamp axis, one entry per record.
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    /// The current-altitude series.
    #[must_use]
    pub fn current_altitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.current_altitude as f64).collect()
    }

    /// The zero-reference altitude series.
    #[must_use]
    pub fn zero_altitudes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.zero_altitude as f64).collect()
    }

    /// The relative-altitude series (`current - zero`, per record).
    #[must_use]
    pub fn relative_altitudes(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.relative_altitude() as f64)
            .collect()
    }

    /// The speed series.
    #[must_use]
    pub fn speeds(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.speed).collect()
    }

    /// Timestamps of every record whose speed alarm was raised.
    #[must_use]
    pub fn alarm_times(&self) -> Vec<DateTime<Utc>> {
        self.records
            .iter()
            .filter(|r| r.speed_alarm)
            .map(|r| r.timestamp)
            .collect()
    }

    /// Summarize the log.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogEmpty`] if the log holds no records.
    pub fn stats(&self) -> Result<FlightStats> {
        let (first, last) = match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::LogEmpty),
        };

        let min_altitude = self.records.iter().map(|r| r.current_altitude).min().unwrap_or(0);
        let max_altitude = self.records.iter().map(|r| r.current_altitude).max().unwrap_or(0);
        let min_relative_altitude = self
            .records
            .iter()
            .map(FlightRecord::relative_altitude)
            .min()
            .unwrap_or(0);
        let max_relative_altitude = self
            .records
            .iter()
            .map(FlightRecord::relative_altitude)
            .max()
            .unwrap_or(0);

        let min_speed = self.speeds().into_iter().fold(f64::INFINITY, f64::min);
        let max_speed = self.speeds().into_iter().fold(f64::NEG_INFINITY, f64::max);
        let mean_speed = self.speeds().iter().sum::<f64>() / self.len() as f64;

        Ok(FlightStats {
            records: self.len(),
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
            duration_seconds: (last.timestamp - first.timestamp).num_milliseconds() as f64
                / 1000.0,
            min_altitude,
            max_altitude,
            min_relative_altitude,
            max_relative_altitude,
            min_speed,
            max_speed,
            mean_speed,
            alarm_count: self.alarm_times().len(),
        })
    }
}

/// Summary statistics over a flight log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightStats {
    /// Total record count.
    pub records: usize,
    /// Timestamp of the first record.
    pub first_timestamp: DateTime<Utc>,
    /// Timestamp of the last record.
    pub last_timestamp: DateTime<Utc>,
    /// Elapsed time between the first and last record.
    pub duration_seconds: f64,
    /// Lowest current-altitude reading.
    pub min_altitude: i64,
    /// Highest current-altitude reading.
    pub max_altitude: i64,
    /// Lowest relative altitude.
    pub min_relative_altitude: i64,
    /// Highest relative altitude.
    pub max_relative_altitude: i64,
    /// Lowest speed.
    pub min_speed: f64,
    /// Highest speed.
    pub max_speed: f64,
    /// Arithmetic mean speed.
    pub mean_speed: f64,
    /// Number of records with the speed alarm raised.
    pub alarm_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn log_line(second: u32, current: i64, zero: i64, speed: f64, alarm: u8) -> String {
        format!(
            r#"{{"timestamp": "2024-05-17 10:30:{second:02}.000000", "message": {{"Altitude": {{"current": {current}, "zero": {zero}}}, "Flight": {{"speed": {speed}, "speedAlarm": {alarm}}}}}}}"#
        )
    }

    fn write_log(lines: &[String]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight_log.json");
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_from_path_reads_all_records() {
        let lines: Vec<String> = (0..6).map(|s| log_line(s, 100, 0, 1.5, 0)).collect();
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        assert_eq!(log.len(), 6);
        assert_eq!(log.timestamps().len(), 6);
        assert_eq!(log.current_altitudes(), vec![100.0; 6]);
        assert_eq!(log.zero_altitudes(), vec![0.0; 6]);
        assert_eq!(log.speeds(), vec![1.5; 6]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FlightLog::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::LogOpen { .. }));
    }

    #[test]
    fn test_from_path_skips_blank_lines() {
        let lines = vec![log_line(0, 10, 0, 0.0, 0), String::new(), log_line(2, 11, 0, 0.0, 0)];
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_from_path_aborts_on_malformed_line() {
        let lines = vec![
            log_line(0, 10, 0, 0.0, 0),
            "{\"timestamp\": \"2024-05-17 10:30:01.000000\"}".to_string(),
            log_line(2, 11, 0, 0.0, 0),
        ];
        let (_dir, path) = write_log(&lines);

        let err = FlightLog::from_path(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_relative_altitudes() {
        let lines = vec![log_line(0, 120, 20, 0.0, 0), log_line(1, 80, 20, 0.0, 0)];
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        assert_eq!(log.relative_altitudes(), vec![100.0, 60.0]);
    }

    #[test]
    fn test_alarm_times_extraction() {
        let lines = vec![
            log_line(0, 10, 0, 1.0, 0),
            log_line(1, 10, 0, 9.0, 1),
            log_line(2, 10, 0, 9.5, 1),
            log_line(3, 10, 0, 1.0, 0),
        ];
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        let alarms = log.alarm_times();
        let timestamps = log.timestamps();
        assert_eq!(alarms, vec![timestamps[1], timestamps[2]]);
    }

    #[test]
    fn test_stats() {
        let lines = vec![
            log_line(0, 100, 20, 2.0, 0),
            log_line(10, 140, 20, 4.0, 1),
            log_line(20, 120, 20, 6.0, 0),
        ];
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        let stats = log.stats().unwrap();

        assert_eq!(stats.records, 3);
        assert!((stats.duration_seconds - 20.0).abs() < 1e-9);
        assert_eq!(stats.min_altitude, 100);
        assert_eq!(stats.max_altitude, 140);
        assert_eq!(stats.min_relative_altitude, 80);
        assert_eq!(stats.max_relative_altitude, 120);
        assert!((stats.min_speed - 2.0).abs() < f64::EPSILON);
        assert!((stats.max_speed - 6.0).abs() < f64::EPSILON);
        assert!((stats.mean_speed - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats.alarm_count, 1);
    }

    #[test]
    fn test_constant_log_smooths_to_constant() {
        let lines: Vec<String> = (0..6).map(|s| log_line(s, 100, 0, 1.5, 0)).collect();
        let (_dir, path) = write_log(&lines);

        let log = FlightLog::from_path(&path).unwrap();
        let raw = log.current_altitudes();
        assert_eq!(raw, vec![100.0; 6]);

        let smoothed = crate::smoothing::moving_average(&raw, 5).unwrap();
        assert_eq!(smoothed.len(), 2);
        for value in smoothed {
            assert!((value - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_stats_empty_log() {
        let log = FlightLog::from_records(Vec::new());
        assert!(matches!(log.stats().unwrap_err(), Error::LogEmpty));
    }

    #[test]
    fn test_stats_serializes_to_json() {
        let lines = vec![log_line(0, 100, 0, 2.0, 0)];
        let (_dir, path) = write_log(&lines);

        let stats = FlightLog::from_path(&path).unwrap().stats().unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("alarm_count"));
    }
}
