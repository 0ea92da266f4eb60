//! Track payload parsing and resampling.
//!
//! A track download is a two-column CSV (`Time,<track name>`). Numeric tracks
//! carry a timestamp on every row. Wave tracks carry timestamps only on some
//! rows and list the remaining samples without one.

use csv::ReaderBuilder;

use crate::error::Result;

/// Raw rows of one downloaded track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSamples {
    /// Seconds from case start; `None` where the row has no timestamp.
    pub times: Vec<Option<f64>>,
    /// Sample values; NaN where missing or unparsable.
    pub values: Vec<f64>,
}

/// Parses a cell value, mapping empty and unparsable cells (`-nan(ind)`) to NaN.
pub fn parse_sample_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses a decompressed track download.
pub fn parse_track_payload(bytes: &[u8]) -> Result<TrackSamples> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let mut samples = TrackSamples::default();
    for record in reader.records() {
        let record = record?;
        let time = record
            .get(0)
            .map(parse_sample_value)
            .filter(|t| !t.is_nan());
        let value = record.get(1).map_or(f64::NAN, parse_sample_value);
        samples.times.push(time);
        samples.values.push(value);
    }
    Ok(samples)
}

impl TrackSamples {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when at least one row has no timestamp.
    pub fn is_wave(&self) -> bool {
        self.times.iter().any(Option::is_none)
    }

    /// Places the samples on a grid of `interval` seconds.
    ///
    /// The grid spans `floor(max_time / interval) + 1` cells. Numeric samples
    /// land in the cell of their timestamp (later rows overwrite earlier
    /// ones) and untouched cells stay NaN. Wave samples are taken as-is when
    /// the row count matches the grid, otherwise picked at evenly spaced row
    /// positions. A track without any timestamp resamples to nothing.
    pub fn resample(&self, interval: f64) -> Vec<f64> {
        if self.is_empty() || interval.is_nan() || interval <= 0.0 {
            return Vec::new();
        }
        let max_time = self
            .times
            .iter()
            .flatten()
            .map(|t| t / interval)
            .fold(f64::NAN, f64::max);
        if max_time.is_nan() || max_time < 0.0 {
            return Vec::new();
        }
        let cells = max_time as usize + 1;

        if self.is_wave() {
            let rows = self.values.len();
            if cells == rows {
                return self.values.clone();
            }
            return evenly_spaced_rows(rows, cells)
                .map(|row| self.values[row])
                .collect();
        }

        let mut grid = vec![f64::NAN; cells];
        for (time, value) in self.times.iter().zip(&self.values) {
            let Some(time) = time else {
                continue;
            };
            let scaled = time / interval;
            if scaled < 0.0 {
                continue;
            }
            if let Some(slot) = grid.get_mut(scaled as usize) {
                *slot = *value;
            }
        }
        grid
    }
}

/// `cells` row indices spread evenly over `0..rows`, first and last included.
/// A single cell picks the first row.
fn evenly_spaced_rows(rows: usize, cells: usize) -> impl Iterator<Item = usize> {
    let last = rows.saturating_sub(1);
    let step = if cells > 1 {
        last as f64 / (cells - 1) as f64
    } else {
        0.0
    };
    (0..cells).map(move |i| {
        if cells > 1 && i + 1 == cells {
            last
        } else {
            ((i as f64 * step) as usize).min(last)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evenly_spaced_rows_hits_both_ends() {
        let rows: Vec<usize> = evenly_spaced_rows(10, 4).collect();
        assert_eq!(rows, vec![0, 3, 6, 9]);
        let single: Vec<usize> = evenly_spaced_rows(5, 1).collect();
        assert_eq!(single, vec![0]);
    }

    #[test]
    fn parse_sample_value_maps_placeholders_to_nan() {
        assert!(parse_sample_value("-nan(ind)").is_nan());
        assert!(parse_sample_value("").is_nan());
        assert!(parse_sample_value("nan").is_nan());
        assert_eq!(parse_sample_value(" 2.5 "), 2.5);
    }
}
