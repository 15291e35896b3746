#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pipsignal::domain::chart::Chart;
use pipsignal::domain::error::PipsignalError;
use pipsignal::domain::indicator::{AppliedPrice, MaMethod};
pub use pipsignal::domain::ohlcv::OhlcvBar;
use pipsignal::domain::order::OrderRequest;
use pipsignal::domain::pip::SymbolInfo;
use pipsignal::domain::position::Side;
use pipsignal::ports::execution_port::ExecutionPort;
use pipsignal::ports::market_data_port::MarketDataPort;
use pipsignal::ports::position_registry_port::PositionRegistryPort;
use std::io::Write;

/// Quote-only market: no bar history, a fixed bid/ask and symbol metadata.
pub struct MockMarket {
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub info: Option<SymbolInfo>,
}

impl MockMarket {
    pub fn new(bid: f64, ask: f64, digits: u32) -> Self {
        Self {
            bid: Some(bid),
            ask: Some(ask),
            info: Some(SymbolInfo::from_digits(digits)),
        }
    }

    pub fn without_quote(mut self) -> Self {
        self.bid = None;
        self.ask = None;
        self
    }

    pub fn without_info(mut self) -> Self {
        self.info = None;
        self
    }
}

impl MarketDataPort for MockMarket {
    fn open(&self, _chart: &Chart, _shift: usize) -> Option<f64> {
        None
    }

    fn high(&self, _chart: &Chart, _shift: usize) -> Option<f64> {
        None
    }

    fn low(&self, _chart: &Chart, _shift: usize) -> Option<f64> {
        None
    }

    fn close(&self, _chart: &Chart, _shift: usize) -> Option<f64> {
        None
    }

    fn moving_average(
        &self,
        _chart: &Chart,
        _period: usize,
        _method: MaMethod,
        _applied_price: AppliedPrice,
        _shift: usize,
    ) -> Option<f64> {
        None
    }

    fn standard_deviation(&self, _chart: &Chart, _period: usize, _shift: usize) -> Option<f64> {
        None
    }

    fn average_true_range(&self, _chart: &Chart, _period: usize, _shift: usize) -> Option<f64> {
        None
    }

    fn ask(&self, _symbol: &str) -> Option<f64> {
        self.ask
    }

    fn bid(&self, _symbol: &str) -> Option<f64> {
        self.bid
    }

    fn symbol_info(&self, _symbol: &str) -> Option<SymbolInfo> {
        self.info
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(OrderRequest),
    Close { symbol: String, deviation_points: u32 },
}

/// Execution backend that records calls and optionally fails every one.
#[derive(Default)]
pub struct MockExecution {
    pub calls: Vec<Call>,
    pub fail_with: Option<String>,
}

impl MockExecution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn opens(&self) -> Vec<&OrderRequest> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Open(o) => Some(o),
                Call::Close { .. } => None,
            })
            .collect()
    }

    pub fn closes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Close { .. }))
            .count()
    }

    fn result(&self, action: &str, symbol: &str) -> Result<(), PipsignalError> {
        match &self.fail_with {
            Some(reason) => Err(PipsignalError::Execution {
                action: action.into(),
                symbol: symbol.into(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl ExecutionPort for MockExecution {
    fn open_position(&mut self, order: &OrderRequest) -> Result<(), PipsignalError> {
        self.calls.push(Call::Open(order.clone()));
        self.result("open", &order.symbol)
    }

    fn close_position(&mut self, symbol: &str, deviation_points: u32) -> Result<(), PipsignalError> {
        self.calls.push(Call::Close {
            symbol: symbol.to_string(),
            deviation_points,
        });
        self.result("close", symbol)
    }
}

/// Registry entry; `side: None` models a position whose type cannot be read.
#[derive(Debug, Clone)]
pub struct Entry {
    pub symbol: String,
    pub magic: i64,
    pub side: Option<Side>,
    pub open_price: f64,
}

#[derive(Default)]
pub struct MockRegistry {
    pub entries: Vec<Entry>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, magic: i64, side: Option<Side>, open_price: f64) -> Self {
        self.entries.push(Entry {
            symbol: symbol.to_string(),
            magic,
            side,
            open_price,
        });
        self
    }
}

impl PositionRegistryPort for MockRegistry {
    fn position_count(&self) -> usize {
        self.entries.len()
    }

    fn position_symbol(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| e.symbol.clone())
    }

    fn position_magic(&self, index: usize) -> Option<i64> {
        self.entries.get(index).map(|e| e.magic)
    }

    fn position_side(&self, index: usize) -> Option<Side> {
        self.entries.get(index).and_then(|e| e.side)
    }

    fn position_open_price(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.open_price)
    }
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Hourly bars from explicit (high, low, close) triples, oldest first.
pub fn bars_from(hlc: &[(f64, f64, f64)]) -> Vec<OhlcvBar> {
    hlc.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| OhlcvBar {
            time: start_time() + Duration::hours(i as i64),
            open: close,
            high,
            low,
            close,
            volume: 100,
        })
        .collect()
}

/// Hourly bars rising by `step` per bar with a fixed half-range.
pub fn rising_bars(count: usize, start: f64, step: f64, half_range: f64) -> Vec<OhlcvBar> {
    let hlc: Vec<(f64, f64, f64)> = (0..count)
        .map(|i| {
            let close = start + step * i as f64;
            (close + half_range, close - half_range, close)
        })
        .collect();
    bars_from(&hlc)
}

pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("time,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.time.format("%Y-%m-%d %H:%M:%S"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const VALID_INI: &str = r#"
[chart]
symbol = EURUSD
timeframe = H1
digits = 5

[indicators]
period = 3
atr_period = 3
ma_method = sma
applied_price = close

[orders]
lot = 0.1
magic = 1001
stop_loss_pips = 20
take_profit_pips = 40
deviation_points = 5
"#;
