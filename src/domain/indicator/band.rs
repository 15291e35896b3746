//! High/low band: highest and lowest close over the last `period` bars.

use crate::domain::chart::Chart;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HlBand {
    pub high: f64,
    pub low: f64,
}

impl HlBand {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Whether `price` lies inside the band, edges included.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }
}

pub fn hl_band(
    data: &dyn MarketDataPort,
    chart: &Chart,
    period: usize,
    shift: usize,
) -> Option<HlBand> {
    if period == 0 {
        return None;
    }
    let oldest = shift.checked_add(period - 1)?;

    let mut high = f64::NEG_INFINITY;
    let mut low = f64::INFINITY;
    for i in shift..=oldest {
        let close = data.close(chart, i)?;
        high = high.max(close);
        low = low.min(close);
    }
    Some(HlBand { high, low })
}
