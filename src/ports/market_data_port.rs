//! Market data port trait.
//!
//! Bars are addressed by `shift`, counted backward from the most recent bar
//! (0 = most recent). Every accessor returns `None` when the history or the
//! indicator buffer cannot supply the value.

use crate::domain::chart::Chart;
use crate::domain::indicator::{AppliedPrice, MaMethod};
use crate::domain::pip::SymbolInfo;

pub trait MarketDataPort {
    fn open(&self, chart: &Chart, shift: usize) -> Option<f64>;
    fn high(&self, chart: &Chart, shift: usize) -> Option<f64>;
    fn low(&self, chart: &Chart, shift: usize) -> Option<f64>;
    fn close(&self, chart: &Chart, shift: usize) -> Option<f64>;

    fn moving_average(
        &self,
        chart: &Chart,
        period: usize,
        method: MaMethod,
        applied_price: AppliedPrice,
        shift: usize,
    ) -> Option<f64>;

    /// Population standard deviation of closes around their simple moving
    /// average over `period` bars.
    fn standard_deviation(&self, chart: &Chart, period: usize, shift: usize) -> Option<f64>;

    fn average_true_range(&self, chart: &Chart, period: usize, shift: usize) -> Option<f64>;

    fn ask(&self, symbol: &str) -> Option<f64>;
    fn bid(&self, symbol: &str) -> Option<f64>;
    fn symbol_info(&self, symbol: &str) -> Option<SymbolInfo>;
}
