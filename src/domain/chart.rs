//! Chart context: the (symbol, timeframe) pair every indicator and order
//! call is evaluated against.

use std::fmt;

use crate::domain::error::PipsignalError;

/// Bar duration of a chart, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    minutes: u32,
}

impl Timeframe {
    pub const M1: Timeframe = Timeframe { minutes: 1 };
    pub const M5: Timeframe = Timeframe { minutes: 5 };
    pub const M15: Timeframe = Timeframe { minutes: 15 };
    pub const M30: Timeframe = Timeframe { minutes: 30 };
    pub const H1: Timeframe = Timeframe { minutes: 60 };
    pub const H4: Timeframe = Timeframe { minutes: 240 };
    pub const D1: Timeframe = Timeframe { minutes: 1440 };
    pub const W1: Timeframe = Timeframe { minutes: 10080 };
    pub const MN1: Timeframe = Timeframe { minutes: 43200 };

    pub fn from_minutes(minutes: i64) -> Result<Self, PipsignalError> {
        match u32::try_from(minutes) {
            Ok(m) if m > 0 => Ok(Timeframe { minutes: m }),
            _ => Err(PipsignalError::InvalidTimeframe { minutes }),
        }
    }

    /// Parses either a label (`M15`, `H1`, `D1`, ...) or a plain minute count.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let named = match value.to_uppercase().as_str() {
            "M1" => Some(Self::M1),
            "M5" => Some(Self::M5),
            "M15" => Some(Self::M15),
            "M30" => Some(Self::M30),
            "H1" => Some(Self::H1),
            "H4" => Some(Self::H4),
            "D1" => Some(Self::D1),
            "W1" => Some(Self::W1),
            "MN1" => Some(Self::MN1),
            _ => None,
        };
        named.or_else(|| {
            value
                .parse::<i64>()
                .ok()
                .and_then(|m| Self::from_minutes(m).ok())
        })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Number of whole bars of this timeframe in `minutes`.
    pub fn bars_in(&self, minutes: i64) -> i64 {
        minutes / i64::from(self.minutes)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes {
            43200 => write!(f, "MN1"),
            10080 => write!(f, "W1"),
            m if m % 1440 == 0 => write!(f, "D{}", m / 1440),
            m if m % 60 == 0 => write!(f, "H{}", m / 60),
            m => write!(f, "M{}", m),
        }
    }
}

/// Expresses `minutes` in bars of a chart whose bars last
/// `timeframe_minutes`. Truncates toward zero.
pub fn minutes_to_bar_count(minutes: i64, timeframe_minutes: i64) -> Result<i64, PipsignalError> {
    if timeframe_minutes <= 0 {
        return Err(PipsignalError::InvalidTimeframe {
            minutes: timeframe_minutes,
        });
    }
    Ok(minutes / timeframe_minutes)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chart {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl Chart {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Chart {
            symbol: symbol.into(),
            timeframe,
        }
    }

    /// `minutes` expressed in bars of this chart.
    pub fn bars_in(&self, minutes: i64) -> i64 {
        self.timeframe.bars_in(minutes)
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, self.timeframe)
    }
}
