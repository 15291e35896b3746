//! Z-score of the close against its moving average.
//!
//! Z(n)[s] = (C[s] - SMA(n)[s]) / STDDEV(n)[s]
//! A flat window (STDDEV == 0) scores 0.0.

use crate::domain::chart::Chart;
use crate::domain::indicator::{AppliedPrice, MaMethod, NEUTRAL};
use crate::ports::market_data_port::MarketDataPort;

pub fn z_score(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let close = data.close(chart, shift)?;
    let mean = data.moving_average(chart, period, MaMethod::Simple, AppliedPrice::Close, shift)?;
    let stddev = data.standard_deviation(chart, period, shift)?;

    if stddev == 0.0 {
        return Some(0.0);
    }
    let z = (close - mean) / stddev;
    // NaN inputs from a misbehaving feed are treated as missing data.
    if z.is_finite() { Some(z) } else { None }
}

pub fn i_z_score(data: &dyn MarketDataPort, chart: &Chart, period: usize, shift: usize) -> f64 {
    z_score(data, chart, period, shift).unwrap_or(NEUTRAL)
}
