//! Position side and the read-only view of a located position.

use std::fmt;

use crate::domain::pip::{price_to_pips, SymbolInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// A registry position matching the strategy's (symbol, magic) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPosition {
    pub index: usize,
    pub side: Side,
    pub open_price: Option<f64>,
}

impl LocatedPosition {
    pub fn is_long(&self) -> bool {
        self.side == Side::Long
    }

    pub fn is_short(&self) -> bool {
        self.side == Side::Short
    }

    /// Unrealized result in pips at the price the position would close at:
    /// the bid for longs, the ask for shorts.
    pub fn unrealized_pips(&self, bid: f64, ask: f64, symbol: &SymbolInfo) -> Option<f64> {
        let open = self.open_price?;
        let distance = match self.side {
            Side::Long => bid - open,
            Side::Short => open - ask,
        };
        Some(price_to_pips(distance, symbol))
    }
}
