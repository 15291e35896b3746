//! CSV bar history adapter.
//!
//! Files hold `time,open,high,low,close,volume` rows with a header line.
//! `time` is `YYYY-MM-DD HH:MM[:SS]` or a bare `YYYY-MM-DD` (midnight).

use crate::adapters::bar_series::BarSeries;
use crate::domain::chart::Chart;
use crate::domain::error::PipsignalError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::pip::SymbolInfo;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// `<base>/<SYMBOL>_<TIMEFRAME>.csv`, e.g. `EURUSD_H1.csv`.
    pub fn csv_path(&self, chart: &Chart) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", chart.symbol, chart.timeframe))
    }

    pub fn fetch_bars(&self, chart: &Chart) -> Result<Vec<OhlcvBar>, PipsignalError> {
        read_bars(self.csv_path(chart))
    }

    pub fn load_series(&self, chart: &Chart, info: SymbolInfo) -> Result<BarSeries, PipsignalError> {
        let bars = self.fetch_bars(chart)?;
        if bars.is_empty() {
            return Err(PipsignalError::NoData {
                symbol: chart.symbol.clone(),
            });
        }
        Ok(BarSeries::new(chart.clone(), bars, info))
    }
}

/// Reads one CSV file, returning bars sorted oldest first.
pub fn read_bars<P: AsRef<Path>>(path: P) -> Result<Vec<OhlcvBar>, PipsignalError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PipsignalError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut bars = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| PipsignalError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        let time_str = record.get(0).ok_or_else(|| PipsignalError::Data {
            reason: format!("row {}: missing time column", row + 1),
        })?;
        let time = parse_time(time_str).ok_or_else(|| PipsignalError::Data {
            reason: format!("row {}: invalid time '{}'", row + 1, time_str),
        })?;

        bars.push(OhlcvBar {
            time,
            open: field(&record, 1, "open", row)?,
            high: field(&record, 2, "high", row)?,
            low: field(&record, 3, "low", row)?,
            close: field(&record, 4, "close", row)?,
            volume: match record.get(5) {
                Some(v) if !v.trim().is_empty() => field(&record, 5, "volume", row)?,
                _ => 0,
            },
        });
    }

    bars.sort_by_key(|b| b.time);
    Ok(bars)
}

fn field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<T, PipsignalError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| PipsignalError::Data {
            reason: format!("row {}: missing {} column", row + 1, name),
        })?
        .trim()
        .parse()
        .map_err(|e| PipsignalError::Data {
            reason: format!("row {}: invalid {} value: {}", row + 1, name, e),
        })
}

fn parse_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y.%m.%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
