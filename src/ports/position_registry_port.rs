//! Open-position registry port trait.

use crate::domain::position::Side;

/// Read-only, index-addressed view of the account's open positions.
/// Accessors return `None` for an index past `position_count()`.
pub trait PositionRegistryPort {
    fn position_count(&self) -> usize;
    fn position_symbol(&self, index: usize) -> Option<String>;
    fn position_magic(&self, index: usize) -> Option<i64>;
    fn position_side(&self, index: usize) -> Option<Side>;

    fn position_open_price(&self, _index: usize) -> Option<f64> {
        None
    }
}
