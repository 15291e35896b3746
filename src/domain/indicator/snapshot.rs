//! Every indicator evaluated once at a given shift.

use std::fmt;

use crate::domain::chart::Chart;
use crate::domain::indicator::{
    average_true_range, hl_band, moving_average, trend_duration, z_score, HlBand, MaSpec,
};
use crate::ports::market_data_port::MarketDataPort;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSettings {
    pub period: usize,
    pub atr_period: usize,
    pub ma: MaSpec,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            period: 20,
            atr_period: 14,
            ma: MaSpec::sma(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub shift: usize,
    pub trend_duration: Option<f64>,
    pub z_score: Option<f64>,
    pub moving_average: Option<f64>,
    pub average_true_range: Option<f64>,
    pub hl_band: Option<HlBand>,
}

impl IndicatorSnapshot {
    pub fn evaluate(
        data: &dyn MarketDataPort,
        chart: &Chart,
        settings: &IndicatorSettings,
        shift: usize,
    ) -> Self {
        IndicatorSnapshot {
            shift,
            trend_duration: trend_duration(data, chart, settings.period, shift),
            z_score: z_score(data, chart, settings.period, shift),
            moving_average: moving_average(data, chart, &settings.ma, shift),
            average_true_range: average_true_range(data, chart, settings.atr_period, shift),
            hl_band: hl_band(data, chart, settings.period, shift),
        }
    }

    /// True once every indicator has enough history.
    pub fn is_complete(&self) -> bool {
        self.trend_duration.is_some()
            && self.z_score.is_some()
            && self.moving_average.is_some()
            && self.average_true_range.is_some()
            && self.hl_band.is_some()
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, name: &str, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{:<16}{:.6}", name, v),
        None => writeln!(f, "{:<16}n/a", name),
    }
}

impl fmt::Display for IndicatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16}{}", "shift", self.shift)?;
        write_value(f, "trend_duration", self.trend_duration)?;
        write_value(f, "z_score", self.z_score)?;
        write_value(f, "moving_average", self.moving_average)?;
        write_value(f, "atr", self.average_true_range)?;
        write_value(f, "band_high", self.hl_band.map(|b| b.high))?;
        write_value(f, "band_low", self.hl_band.map(|b| b.low))
    }
}
