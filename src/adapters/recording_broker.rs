//! In-memory broker that records every command it receives.
//!
//! Opens add a position to its registry and closes remove the first position
//! on the symbol. No fills are simulated beyond that.

use crate::domain::error::PipsignalError;
use crate::domain::order::OrderRequest;
use crate::domain::position::Side;
use crate::ports::execution_port::ExecutionPort;
use crate::ports::position_registry_port::PositionRegistryPort;

#[derive(Debug, Clone, PartialEq)]
pub enum BrokerCommand {
    Open(OrderRequest),
    Close { symbol: String, deviation_points: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrokerPosition {
    pub symbol: String,
    pub magic: i64,
    pub side: Side,
    pub open_price: f64,
    pub lot: f64,
}

#[derive(Debug, Default)]
pub struct RecordingBroker {
    commands: Vec<BrokerCommand>,
    positions: Vec<BrokerPosition>,
    reject_reason: Option<String>,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: BrokerPosition) -> Self {
        self.positions.push(position);
        self
    }

    /// Every subsequent command is recorded and then rejected with `reason`.
    pub fn rejecting(mut self, reason: &str) -> Self {
        self.reject_reason = Some(reason.to_string());
        self
    }

    pub fn commands(&self) -> &[BrokerCommand] {
        &self.commands
    }

    pub fn positions(&self) -> &[BrokerPosition] {
        &self.positions
    }

    pub fn opened(&self) -> Vec<&OrderRequest> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                BrokerCommand::Open(order) => Some(order),
                BrokerCommand::Close { .. } => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BrokerCommand::Close { .. }))
            .count()
    }

    fn check_rejection(&self, action: &str, symbol: &str) -> Result<(), PipsignalError> {
        match &self.reject_reason {
            Some(reason) => Err(PipsignalError::Execution {
                action: action.to_string(),
                symbol: symbol.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl ExecutionPort for RecordingBroker {
    fn open_position(&mut self, order: &OrderRequest) -> Result<(), PipsignalError> {
        self.commands.push(BrokerCommand::Open(order.clone()));
        self.check_rejection("open", &order.symbol)?;
        self.positions.push(BrokerPosition {
            symbol: order.symbol.clone(),
            magic: order.magic,
            side: order.side,
            open_price: order.price,
            lot: order.lot,
        });
        Ok(())
    }

    fn close_position(&mut self, symbol: &str, deviation_points: u32) -> Result<(), PipsignalError> {
        self.commands.push(BrokerCommand::Close {
            symbol: symbol.to_string(),
            deviation_points,
        });
        self.check_rejection("close", symbol)?;
        match self.positions.iter().position(|p| p.symbol == symbol) {
            Some(i) => {
                self.positions.remove(i);
                Ok(())
            }
            None => Err(PipsignalError::Execution {
                action: "close".to_string(),
                symbol: symbol.to_string(),
                reason: "no open position".to_string(),
            }),
        }
    }
}

impl PositionRegistryPort for RecordingBroker {
    fn position_count(&self) -> usize {
        self.positions.len()
    }

    fn position_symbol(&self, index: usize) -> Option<String> {
        self.positions.get(index).map(|p| p.symbol.clone())
    }

    fn position_magic(&self, index: usize) -> Option<i64> {
        self.positions.get(index).map(|p| p.magic)
    }

    fn position_side(&self, index: usize) -> Option<Side> {
        self.positions.get(index).map(|p| p.side)
    }

    fn position_open_price(&self, index: usize) -> Option<f64> {
        self.positions.get(index).map(|p| p.open_price)
    }
}
