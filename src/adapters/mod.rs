//! Concrete adapter implementations for ports.

pub mod bar_series;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod recording_broker;
