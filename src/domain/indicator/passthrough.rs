//! Moving average and ATR lookups, forwarded to the market data port.

use crate::domain::chart::Chart;
use crate::domain::indicator::{MaSpec, NEUTRAL};
use crate::ports::market_data_port::MarketDataPort;

/// The requested moving average at `shift + spec.ma_shift`.
pub fn moving_average(
    data: &dyn MarketDataPort,
    chart: &Chart,
    spec: &MaSpec,
    shift: usize,
) -> Option<f64> {
    if spec.period == 0 {
        return None;
    }
    let at = shift.checked_add(spec.ma_shift)?;
    data.moving_average(chart, spec.period, spec.method, spec.applied_price, at)
}

pub fn i_moving_average(
    data: &dyn MarketDataPort,
    chart: &Chart,
    spec: &MaSpec,
    shift: usize,
) -> f64 {
    moving_average(data, chart, spec, shift).unwrap_or(NEUTRAL)
}

pub fn average_true_range(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> Option<f64> {
    if period == 0 {
        return None;
    }
    data.average_true_range(chart, period, shift)
}

pub fn i_average_true_range(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> f64 {
    average_true_range(data, chart, period, shift).unwrap_or(NEUTRAL)
}
