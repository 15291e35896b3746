//! In-memory market data adapter over a loaded bar history.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::chart::Chart;
use crate::domain::indicator::{AppliedPrice, MaMethod};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::pip::SymbolInfo;
use crate::domain::rolling;
use crate::ports::market_data_port::MarketDataPort;

/// Bid/ask snapshot for the series' symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
}

/// Indicator series computed over the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SeriesKey {
    MovingAverage(usize, MaMethod, AppliedPrice),
    StdDev(usize),
    Atr(usize),
}

/// Bars of a single chart, oldest first, plus the symbol's current quote.
///
/// Requests for any other chart or symbol report no data. Indicator series
/// are computed once per key and dropped when a bar is pushed.
#[derive(Debug, Clone)]
pub struct BarSeries {
    chart: Chart,
    bars: Vec<OhlcvBar>,
    quote: Option<Quote>,
    info: SymbolInfo,
    cache: RefCell<HashMap<SeriesKey, Vec<Option<f64>>>>,
}

impl BarSeries {
    pub fn new(chart: Chart, mut bars: Vec<OhlcvBar>, info: SymbolInfo) -> Self {
        bars.sort_by_key(|b| b.time);
        BarSeries {
            chart,
            bars,
            quote: None,
            info,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_quote(mut self, bid: f64, ask: f64) -> Self {
        self.quote = Some(Quote { bid, ask });
        self
    }

    /// Uses the last close as both bid and ask plus `spread_points` on the ask.
    pub fn with_quote_from_last_close(self, spread_points: f64) -> Self {
        match self.bars.last().map(|b| b.close) {
            Some(close) => {
                let ask = close + spread_points * self.info.point;
                self.with_quote(close, ask)
            }
            None => self,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Appends a newly closed bar; it becomes shift 0.
    pub fn push(&mut self, bar: OhlcvBar) {
        self.bars.push(bar);
        self.cache.get_mut().clear();
    }

    fn index(&self, chart: &Chart, shift: usize) -> Option<usize> {
        if *chart != self.chart {
            return None;
        }
        shift
            .checked_add(1)
            .and_then(|n| self.bars.len().checked_sub(n))
    }

    fn bar(&self, chart: &Chart, shift: usize) -> Option<&OhlcvBar> {
        self.index(chart, shift).map(|i| &self.bars[i])
    }

    fn applied(&self, price: AppliedPrice) -> Vec<f64> {
        self.bars
            .iter()
            .map(|b| match price {
                AppliedPrice::Close => b.close,
                AppliedPrice::Open => b.open,
                AppliedPrice::High => b.high,
                AppliedPrice::Low => b.low,
                AppliedPrice::Median => b.median_price(),
                AppliedPrice::Typical => b.typical_price(),
                AppliedPrice::Weighted => b.weighted_price(),
            })
            .collect()
    }

    fn compute(&self, key: SeriesKey) -> Vec<Option<f64>> {
        match key {
            SeriesKey::MovingAverage(period, method, price) => {
                let prices = self.applied(price);
                match method {
                    MaMethod::Simple => rolling::sma(&prices, period),
                    MaMethod::Exponential => rolling::ema(&prices, period),
                    MaMethod::Smoothed => rolling::smma(&prices, period),
                    MaMethod::LinearWeighted => rolling::lwma(&prices, period),
                }
            }
            SeriesKey::StdDev(period) => rolling::stddev(&self.applied(AppliedPrice::Close), period),
            SeriesKey::Atr(period) => rolling::atr(&self.bars, period),
        }
    }

    /// Every rolling series is causal, so the value at `i` computed over the
    /// full history equals the one computed over `bars[..=i]`.
    fn cached(&self, key: SeriesKey, i: usize) -> Option<f64> {
        let mut cache = self.cache.borrow_mut();
        let series = cache.entry(key).or_insert_with(|| self.compute(key));
        series.get(i).copied().flatten()
    }
}

impl MarketDataPort for BarSeries {
    fn open(&self, chart: &Chart, shift: usize) -> Option<f64> {
        self.bar(chart, shift).map(|b| b.open)
    }

    fn high(&self, chart: &Chart, shift: usize) -> Option<f64> {
        self.bar(chart, shift).map(|b| b.high)
    }

    fn low(&self, chart: &Chart, shift: usize) -> Option<f64> {
        self.bar(chart, shift).map(|b| b.low)
    }

    fn close(&self, chart: &Chart, shift: usize) -> Option<f64> {
        self.bar(chart, shift).map(|b| b.close)
    }

    fn moving_average(
        &self,
        chart: &Chart,
        period: usize,
        method: MaMethod,
        applied_price: AppliedPrice,
        shift: usize,
    ) -> Option<f64> {
        let i = self.index(chart, shift)?;
        self.cached(SeriesKey::MovingAverage(period, method, applied_price), i)
    }

    fn standard_deviation(&self, chart: &Chart, period: usize, shift: usize) -> Option<f64> {
        let i = self.index(chart, shift)?;
        self.cached(SeriesKey::StdDev(period), i)
    }

    fn average_true_range(&self, chart: &Chart, period: usize, shift: usize) -> Option<f64> {
        let i = self.index(chart, shift)?;
        self.cached(SeriesKey::Atr(period), i)
    }

    fn ask(&self, symbol: &str) -> Option<f64> {
        (symbol == self.chart.symbol).then_some(self.quote?.ask)
    }

    fn bid(&self, symbol: &str) -> Option<f64> {
        (symbol == self.chart.symbol).then_some(self.quote?.bid)
    }

    fn symbol_info(&self, symbol: &str) -> Option<SymbolInfo> {
        (symbol == self.chart.symbol).then_some(self.info)
    }
}
