//! Indicator engine.
//!
//! Every indicator comes in two forms:
//! - a rich form returning `Option<f64>`, where `None` means the market data
//!   needed for the value is not available yet;
//! - an `i_*` form returning `f64`, where missing data collapses to the
//!   neutral `0.0`. A trading loop can call these on every bar without
//!   special-casing the edges of history.

pub mod band;
pub mod passthrough;
pub mod snapshot;
pub mod trend;
pub mod zscore;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

pub use band::{hl_band, HlBand};
pub use passthrough::{
    average_true_range, i_average_true_range, i_moving_average, moving_average,
};
pub use snapshot::{IndicatorSettings, IndicatorSnapshot};
pub use trend::{i_trend_duration, trend_duration};
pub use zscore::{i_z_score, z_score};

/// Value reported by the `i_*` functions when data is unavailable.
pub const NEUTRAL: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaMethod {
    #[default]
    Simple,
    Exponential,
    Smoothed,
    LinearWeighted,
}

impl MaMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sma" | "simple" => Some(MaMethod::Simple),
            "ema" | "exponential" => Some(MaMethod::Exponential),
            "smma" | "smoothed" => Some(MaMethod::Smoothed),
            "lwma" | "wma" | "linear_weighted" => Some(MaMethod::LinearWeighted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppliedPrice {
    #[default]
    Close,
    Open,
    High,
    Low,
    Median,
    Typical,
    Weighted,
}

impl AppliedPrice {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "close" => Some(AppliedPrice::Close),
            "open" => Some(AppliedPrice::Open),
            "high" => Some(AppliedPrice::High),
            "low" => Some(AppliedPrice::Low),
            "median" => Some(AppliedPrice::Median),
            "typical" => Some(AppliedPrice::Typical),
            "weighted" => Some(AppliedPrice::Weighted),
            _ => None,
        }
    }
}

/// Moving average variant requested through [`moving_average`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaSpec {
    pub period: usize,
    /// Additional bars to look back, on top of the call's shift.
    pub ma_shift: usize,
    pub method: MaMethod,
    pub applied_price: AppliedPrice,
}

impl MaSpec {
    /// Simple moving average of closes, no extra shift.
    pub fn sma(period: usize) -> Self {
        MaSpec {
            period,
            ma_shift: 0,
            method: MaMethod::Simple,
            applied_price: AppliedPrice::Close,
        }
    }
}

impl fmt::Display for MaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.method {
            MaMethod::Simple => "SMA",
            MaMethod::Exponential => "EMA",
            MaMethod::Smoothed => "SMMA",
            MaMethod::LinearWeighted => "LWMA",
        };
        write!(f, "{}({})", name, self.period)?;
        if self.ma_shift > 0 {
            write!(f, "+{}", self.ma_shift)?;
        }
        Ok(())
    }
}
