//! Position locator: finds the open position a strategy manages, identified
//! by (symbol, magic number). First match wins.

use crate::domain::position::LocatedPosition;
use crate::ports::position_registry_port::PositionRegistryPort;

fn is_managed(registry: &dyn PositionRegistryPort, index: usize, symbol: &str, magic: i64) -> bool {
    registry.position_symbol(index).as_deref() == Some(symbol)
        && registry.position_magic(index) == Some(magic)
}

/// First managed position with a readable side. Matches whose side cannot
/// be read are skipped.
pub fn locate_position(
    registry: &dyn PositionRegistryPort,
    symbol: &str,
    magic: i64,
) -> Option<LocatedPosition> {
    let count = registry.position_count();
    for index in 0..count {
        if !is_managed(registry, index, symbol, magic) {
            continue;
        }
        let Some(side) = registry.position_side(index) else {
            tracing::warn!(symbol, magic, index, "matching position has no side; skipping");
            continue;
        };
        tracing::debug!(symbol, magic, index, %side, "position located");
        return Some(LocatedPosition {
            index,
            side,
            open_price: registry.position_open_price(index),
        });
    }
    tracing::trace!(symbol, magic, scanned = count, "no matching position");
    None
}

/// True on the first (symbol, magic) match, whether or not its side can be
/// read.
pub fn select_position(registry: &dyn PositionRegistryPort, symbol: &str, magic: i64) -> bool {
    (0..registry.position_count()).any(|index| is_managed(registry, index, symbol, magic))
}
