//! Scripted market data for indicator unit tests. Each vector is indexed by
//! shift (index 0 = most recent bar).

use crate::domain::chart::Chart;
use crate::domain::indicator::{AppliedPrice, MaMethod};
use crate::domain::pip::SymbolInfo;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Debug, Default)]
pub struct ScriptedData {
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub ma: Vec<f64>,
    pub stddev: Vec<f64>,
    pub atr: Vec<f64>,
    pub ma_calls: std::cell::RefCell<Vec<(usize, MaMethod, AppliedPrice, usize)>>,
}

fn at(values: &[f64], shift: usize) -> Option<f64> {
    values.get(shift).copied()
}

impl MarketDataPort for ScriptedData {
    fn open(&self, _chart: &Chart, shift: usize) -> Option<f64> {
        at(&self.close, shift)
    }

    fn high(&self, _chart: &Chart, shift: usize) -> Option<f64> {
        at(&self.high, shift)
    }

    fn low(&self, _chart: &Chart, shift: usize) -> Option<f64> {
        at(&self.low, shift)
    }

    fn close(&self, _chart: &Chart, shift: usize) -> Option<f64> {
        at(&self.close, shift)
    }

    fn moving_average(
        &self,
        _chart: &Chart,
        period: usize,
        method: MaMethod,
        applied_price: AppliedPrice,
        shift: usize,
    ) -> Option<f64> {
        self.ma_calls
            .borrow_mut()
            .push((period, method, applied_price, shift));
        at(&self.ma, shift)
    }

    fn standard_deviation(&self, _chart: &Chart, _period: usize, shift: usize) -> Option<f64> {
        at(&self.stddev, shift)
    }

    fn average_true_range(&self, _chart: &Chart, _period: usize, shift: usize) -> Option<f64> {
        at(&self.atr, shift)
    }

    fn ask(&self, _symbol: &str) -> Option<f64> {
        None
    }

    fn bid(&self, _symbol: &str) -> Option<f64> {
        None
    }

    fn symbol_info(&self, _symbol: &str) -> Option<SymbolInfo> {
        None
    }
}
