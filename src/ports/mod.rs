//! Port traits the domain talks to.

pub mod config_port;
pub mod execution_port;
pub mod market_data_port;
pub mod position_registry_port;
