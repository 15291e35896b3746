//! Trend duration.
//!
//! Scans `2 * period` bars ending at `shift`, oldest first, tracking the
//! current streak of bars whose low sits above the simple moving average
//! (`up`) and whose high sits below it (`down`). Any break resets the streak.
//!
//! TREND(n)[s] = (up - down) / n

use crate::domain::chart::Chart;
use crate::domain::indicator::{AppliedPrice, MaMethod, NEUTRAL};
use crate::ports::market_data_port::MarketDataPort;

pub fn trend_duration(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let oldest = period.checked_mul(2).and_then(|w| shift.checked_add(w - 1))?;

    let mut up: u32 = 0;
    let mut down: u32 = 0;
    for i in (shift..=oldest).rev() {
        let ma = data.moving_average(chart, period, MaMethod::Simple, AppliedPrice::Close, i)?;
        let high = data.high(chart, i)?;
        let low = data.low(chart, i)?;

        if low > ma {
            up += 1;
        } else {
            up = 0;
        }
        if high < ma {
            down += 1;
        } else {
            down = 0;
        }
    }

    Some((f64::from(up) - f64::from(down)) / period as f64)
}

pub fn i_trend_duration(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> f64 {
    trend_duration(data, chart, period, shift).unwrap_or(NEUTRAL)
}
