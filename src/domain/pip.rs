//! Pip conversion.
//!
//! Symbols quoted with 3 or 5 digits carry an extra fractional digit, so one
//! pip is 10 points there and 1 point everywhere else.

/// Quote precision of a symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolInfo {
    /// Decimal places the price is quoted with.
    pub digits: u32,
    /// Minimum price increment.
    pub point: f64,
}

impl SymbolInfo {
    pub fn new(digits: u32, point: f64) -> Self {
        SymbolInfo { digits, point }
    }

    /// Derives the point from the digit count (`10^-digits`).
    pub fn from_digits(digits: u32) -> Self {
        SymbolInfo {
            digits,
            point: 10f64.powi(-(digits as i32)),
        }
    }

    /// Price distance of one pip.
    pub fn pip_size(&self) -> f64 {
        self.point * pip_multiplier(self.digits) as f64
    }
}

pub fn pip_multiplier(digits: u32) -> u32 {
    if digits == 3 || digits == 5 { 10 } else { 1 }
}

/// Price offset for a distance in pips.
///
/// `None` means "no stop / no target": non-positive distances never become a
/// zero-width level.
pub fn pip_offset(pips: f64, symbol: &SymbolInfo) -> Option<f64> {
    if !pips.is_finite() || pips <= 0.0 {
        return None;
    }
    Some(pips * symbol.pip_size())
}

/// Inverse of [`pip_offset`]: a price distance expressed in pips.
pub fn price_to_pips(distance: f64, symbol: &SymbolInfo) -> f64 {
    let pip = symbol.pip_size();
    if pip == 0.0 {
        return 0.0;
    }
    distance / pip
}
