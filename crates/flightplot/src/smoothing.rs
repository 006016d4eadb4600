//! Moving-average smoothing for telemetry series.
//!
//! Valid-mode semantics: only positions where the full window fits inside
//! the input are emitted, so the output is `window - 1` entries shorter
//! than the input.

use crate::error::{Error, Result};

/// Compute the valid-mode moving average of `series`.
///
/// Output index `i` holds the arithmetic mean of `series[i..i + window]`;
/// the output length is `series.len() - window + 1`.
///
/// # Errors
///
/// Returns [`Error::InvalidWindow`] if `window` is zero or larger than the
/// series.
pub fn moving_average(series: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 || window > series.len() {
        return Err(Error::InvalidWindow {
            window,
            len: series.len(),
        });
    }

    let mut out = Vec::with_capacity(series.len() - window + 1);
    for i in 0..=series.len() - window {
        let sum: f64 = series[i..i + window].iter().sum();
        out.push(sum / window as f64);
    }
    Ok(out)
}

/// The timestamp axis a smoothed series aligns to: the raw axis with the
/// first `window - 1` entries dropped.
///
/// # Panics
///
/// Panics if `window` is zero or exceeds the axis length; callers are
/// expected to have validated the window via [`moving_average`] first.
#[must_use]
pub fn smoothed_axis<T>(axis: &[T], window: usize) -> &[T] {
    &axis[window - 1..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length() {
        let series: Vec<f64> = (0..10).map(f64::from).collect();
        for window in 1..=series.len() {
            let smoothed = moving_average(&series, window).unwrap();
            assert_eq!(smoothed.len(), series.len() - window + 1);
        }
    }

    #[test]
    fn test_window_one_is_identity() {
        let series = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(moving_average(&series, 1).unwrap(), series);
    }

    #[test]
    fn test_constant_series() {
        let series = vec![7.5; 12];
        let smoothed = moving_average(&series, 5).unwrap();
        assert_eq!(smoothed.len(), 8);
        for value in smoothed {
            assert!((value - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_known_values() {
        let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = moving_average(&series, 3).unwrap();
        assert_eq!(smoothed, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_window_equals_length() {
        let series = vec![2.0, 4.0, 6.0];
        let smoothed = moving_average(&series, 3).unwrap();
        assert_eq!(smoothed, vec![4.0]);
    }

    #[test]
    fn test_window_zero_rejected() {
        let err = moving_average(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { window: 0, len: 2 }));
    }

    #[test]
    fn test_window_larger_than_series_rejected() {
        let err = moving_average(&[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { window: 3, len: 2 }));
    }

    #[test]
    fn test_smoothed_axis_alignment() {
        let axis = vec![10, 20, 30, 40, 50, 60];
        assert_eq!(smoothed_axis(&axis, 5), &[50, 60]);
        assert_eq!(smoothed_axis(&axis, 1), axis.as_slice());
    }
}
