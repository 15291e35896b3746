//! Order commands, order configuration and caller-supplied signals.

use crate::domain::position::Side;

/// Order parameters shared by every open issued for a strategy.
///
/// Stop-loss and take-profit distances are optional; `market_only` gives the
/// variant that opens with neither attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfig {
    pub lot: f64,
    pub magic: i64,
    pub stop_loss_pips: Option<f64>,
    pub take_profit_pips: Option<f64>,
    /// Maximum price deviation accepted on close, in points.
    pub deviation_points: u32,
    /// Opens are skipped while the spread is wider than this.
    pub max_spread_pips: Option<f64>,
}

impl OrderConfig {
    pub fn market_only(lot: f64, magic: i64) -> Self {
        OrderConfig {
            lot,
            magic,
            ..Default::default()
        }
    }

    pub fn with_stops(lot: f64, magic: i64, stop_loss_pips: f64, take_profit_pips: f64) -> Self {
        OrderConfig {
            lot,
            magic,
            stop_loss_pips: Some(stop_loss_pips),
            take_profit_pips: Some(take_profit_pips),
            ..Default::default()
        }
    }

    /// Whether opening needs symbol metadata: a positive stop distance or a
    /// spread cap is set.
    pub fn needs_symbol_info(&self) -> bool {
        let positive = |pips: Option<f64>| pips.is_some_and(|p| p > 0.0);
        positive(self.stop_loss_pips)
            || positive(self.take_profit_pips)
            || self.max_spread_pips.is_some()
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        OrderConfig {
            lot: 0.1,
            magic: 0,
            stop_loss_pips: None,
            take_profit_pips: None,
            deviation_points: 10,
            max_spread_pips: None,
        }
    }
}

/// Market order sent to the execution backend.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub lot: f64,
    pub price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub magic: i64,
}

impl OrderRequest {
    /// Stop-loss in the host convention where 0.0 means "none".
    pub fn stop_loss_or_zero(&self) -> f64 {
        self.stop_loss.unwrap_or(0.0)
    }

    /// Take-profit in the host convention where 0.0 means "none".
    pub fn take_profit_or_zero(&self) -> f64 {
        self.take_profit.unwrap_or(0.0)
    }
}

/// Entry/exit flags per side, re-evaluated by the caller every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalSet {
    pub buy_entry: bool,
    pub buy_exit: bool,
    pub sell_entry: bool,
    pub sell_exit: bool,
}

impl SignalSet {
    pub fn is_idle(&self) -> bool {
        !(self.buy_entry || self.buy_exit || self.sell_entry || self.sell_exit)
    }
}
