//! Order execution port trait.

use crate::domain::error::PipsignalError;
use crate::domain::order::OrderRequest;

/// Backend that places and closes market positions.
///
/// Callers fire each command once. An `Err` is the backend's report of a
/// rejection; the controller logs it and does not retry.
pub trait ExecutionPort {
    fn open_position(&mut self, order: &OrderRequest) -> Result<(), PipsignalError>;

    fn close_position(&mut self, symbol: &str, deviation_points: u32) -> Result<(), PipsignalError>;
}
