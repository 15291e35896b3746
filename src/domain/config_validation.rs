//! Configuration validation.
//!
//! Checks the `[chart]`, `[indicators]` and `[orders]` sections before any
//! indicator or order call is made.

use crate::domain::chart::Timeframe;
use crate::domain::error::PipsignalError;
use crate::domain::indicator::{AppliedPrice, MaMethod};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    validate_chart_config(config)?;
    validate_indicator_config(config)?;
    validate_order_config(config)?;
    Ok(())
}

pub fn validate_chart_config(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    validate_symbol(config)?;
    validate_timeframe(config)?;
    validate_digits(config)?;
    validate_point(config)?;
    Ok(())
}

pub fn validate_indicator_config(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    validate_period(config, "period")?;
    validate_period(config, "atr_period")?;
    validate_period(config, "ma_period")?;
    validate_non_negative_int(config, "indicators", "ma_shift")?;
    validate_ma_method(config)?;
    validate_applied_price(config)?;
    Ok(())
}

pub fn validate_order_config(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    validate_lot(config)?;
    validate_magic(config)?;
    validate_pips(config, "stop_loss_pips", true)?;
    validate_pips(config, "take_profit_pips", true)?;
    validate_pips(config, "max_spread_pips", false)?;
    validate_non_negative_int(config, "orders", "deviation_points")?;
    Ok(())
}

pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> PipsignalError {
    PipsignalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn missing(section: &str, key: &str) -> PipsignalError {
    PipsignalError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    match config.get_string("chart", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(missing("chart", "symbol")),
    }
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    match config.get_string("chart", "timeframe") {
        None => Err(missing("chart", "timeframe")),
        Some(s) => match Timeframe::parse(&s) {
            Some(_) => Ok(()),
            None => Err(invalid(
                "chart",
                "timeframe",
                format!("'{}' is not a timeframe label or positive minute count", s.trim()),
            )),
        },
    }
}

fn validate_digits(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    if config.get_string("chart", "digits").is_none() {
        return Err(missing("chart", "digits"));
    }
    let digits = config.get_int("chart", "digits", -1);
    if !(0..=10).contains(&digits) {
        return Err(invalid("chart", "digits", "digits must be between 0 and 10"));
    }
    Ok(())
}

fn validate_point(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    match config.get_optional_double("chart", "point") {
        None => Ok(()),
        Some(Ok(p)) if p > 0.0 => Ok(()),
        Some(_) => Err(invalid("chart", "point", "point must be positive")),
    }
}

fn validate_period(config: &dyn ConfigPort, key: &str) -> Result<(), PipsignalError> {
    if config.get_string("indicators", key).is_none() {
        return Ok(());
    }
    if config.get_int("indicators", key, 0) < 1 {
        return Err(invalid("indicators", key, format!("{} must be at least 1", key)));
    }
    Ok(())
}

fn validate_non_negative_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), PipsignalError> {
    if config.get_string(section, key).is_none() {
        return Ok(());
    }
    if config.get_int(section, key, -1) < 0 {
        return Err(invalid(
            section,
            key,
            format!("{} must be a non-negative integer", key),
        ));
    }
    Ok(())
}

fn validate_ma_method(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    match config.get_string("indicators", "ma_method") {
        None => Ok(()),
        Some(s) if MaMethod::parse(&s).is_some() => Ok(()),
        Some(s) => Err(invalid(
            "indicators",
            "ma_method",
            format!("unknown moving average method '{}'", s.trim()),
        )),
    }
}

fn validate_applied_price(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    match config.get_string("indicators", "applied_price") {
        None => Ok(()),
        Some(s) if AppliedPrice::parse(&s).is_some() => Ok(()),
        Some(s) => Err(invalid(
            "indicators",
            "applied_price",
            format!("unknown applied price '{}'", s.trim()),
        )),
    }
}

fn validate_lot(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    if config.get_string("orders", "lot").is_none() {
        return Err(missing("orders", "lot"));
    }
    let lot = config.get_double("orders", "lot", 0.0);
    if lot <= 0.0 {
        return Err(invalid("orders", "lot", "lot must be positive"));
    }
    Ok(())
}

fn validate_magic(config: &dyn ConfigPort) -> Result<(), PipsignalError> {
    let Some(raw) = config.get_string("orders", "magic") else {
        return Err(missing("orders", "magic"));
    };
    if raw.trim().parse::<i64>().is_err() {
        return Err(invalid("orders", "magic", "magic must be an integer"));
    }
    Ok(())
}

/// Stop and target distances may be zero ("none"); the spread cap may not.
fn validate_pips(config: &dyn ConfigPort, key: &str, zero_allowed: bool) -> Result<(), PipsignalError> {
    match config.get_optional_double("orders", key) {
        None => Ok(()),
        Some(Err(raw)) => Err(invalid(
            "orders",
            key,
            format!("'{}' is not a number", raw.trim()),
        )),
        Some(Ok(v)) if v < 0.0 => Err(invalid("orders", key, format!("{} must be non-negative", key))),
        Some(Ok(v)) if v == 0.0 && !zero_allowed => {
            Err(invalid("orders", key, format!("{} must be positive", key)))
        }
        Some(Ok(_)) => Ok(()),
    }
}
