//! Core domain types and logic.

pub mod chart;
pub mod config_validation;
pub mod controller;
pub mod error;
pub mod indicator;
pub mod locator;
pub mod ohlcv;
pub mod order;
pub mod pip;
pub mod position;
pub mod rolling;
