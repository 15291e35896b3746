//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::bar_series::BarSeries;
use crate::adapters::csv_adapter::{read_bars, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::recording_broker::{BrokerCommand, BrokerPosition, RecordingBroker};
use crate::domain::chart::{Chart, Timeframe};
use crate::domain::config_validation::{
    invalid, missing, validate_chart_config, validate_config, validate_indicator_config,
    validate_order_config,
};
use crate::domain::controller::on_signals;
use crate::domain::error::PipsignalError;
use crate::domain::indicator::{
    AppliedPrice, IndicatorSettings, IndicatorSnapshot, MaMethod, MaSpec,
};
use crate::domain::locator::locate_position;
use crate::domain::order::{OrderConfig, SignalSet};
use crate::domain::pip::{pip_multiplier, pip_offset, price_to_pips, SymbolInfo};
use crate::domain::position::Side;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "pipsignal", about = "Forex indicator and order signal toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate every indicator at a shift
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        /// CSV file, or a directory holding <SYMBOL>_<TF>.csv
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long, default_value_t = 0)]
        shift: usize,
    },
    /// Convert a pip distance to a price offset
    Pips {
        #[arg(long)]
        digits: u32,
        #[arg(long)]
        point: Option<f64>,
        #[arg(long)]
        pips: f64,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run the order controller once and print the commands it sends
    Plan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        buy_entry: bool,
        #[arg(long)]
        buy_exit: bool,
        #[arg(long)]
        sell_entry: bool,
        #[arg(long)]
        sell_exit: bool,
        /// Ask minus bid, in points, applied to the last close
        #[arg(long, default_value_t = 0.0)]
        spread_points: f64,
        /// Pretend a position with the configured magic is already open
        #[arg(long, value_enum)]
        position: Option<PositionArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionArg {
    Long,
    Short,
}

impl From<PositionArg> for Side {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Long => Side::Long,
            PositionArg::Short => Side::Short,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Indicators {
            config,
            data,
            shift,
        } => run_indicators(&config, &data, shift),
        Command::Pips {
            digits,
            point,
            pips,
        } => run_pips(digits, point, pips),
        Command::Validate { config } => run_validate(&config),
        Command::Plan {
            config,
            data,
            buy_entry,
            buy_exit,
            sell_entry,
            sell_exit,
            spread_points,
            position,
        } => {
            let signals = SignalSet {
                buy_entry,
                buy_exit,
                sell_entry,
                sell_exit,
            };
            run_plan(&config, &data, &signals, spread_points, position.map(Side::from))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PipsignalError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Chart from `[chart]`, after `validate_chart_config` has accepted it.
pub fn build_chart(config: &dyn ConfigPort) -> Result<Chart, PipsignalError> {
    validate_chart_config(config)?;
    let symbol = config
        .get_string("chart", "symbol")
        .map(|s| s.trim().to_string())
        .ok_or_else(|| missing("chart", "symbol"))?;
    let timeframe = config
        .get_string("chart", "timeframe")
        .and_then(|raw| Timeframe::parse(&raw))
        .ok_or_else(|| missing("chart", "timeframe"))?;
    Ok(Chart::new(symbol, timeframe))
}

pub fn build_symbol_info(config: &dyn ConfigPort) -> Result<SymbolInfo, PipsignalError> {
    validate_chart_config(config)?;
    let digits = u32::try_from(config.get_int("chart", "digits", 0))
        .map_err(|_| invalid("chart", "digits", "digits must be between 0 and 10"))?;
    Ok(match config.get_optional_double("chart", "point") {
        Some(Ok(point)) => SymbolInfo::new(digits, point),
        _ => SymbolInfo::from_digits(digits),
    })
}

pub fn build_order_config(config: &dyn ConfigPort) -> Result<OrderConfig, PipsignalError> {
    validate_order_config(config)?;
    let defaults = OrderConfig::default();
    let pips = |key: &str| config.get_optional_double("orders", key).and_then(Result::ok);

    let deviation = config.get_int("orders", "deviation_points", defaults.deviation_points as i64);
    Ok(OrderConfig {
        lot: config.get_double("orders", "lot", defaults.lot),
        magic: config
            .get_string("orders", "magic")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(defaults.magic),
        stop_loss_pips: pips("stop_loss_pips"),
        take_profit_pips: pips("take_profit_pips"),
        deviation_points: u32::try_from(deviation).unwrap_or(defaults.deviation_points),
        max_spread_pips: pips("max_spread_pips"),
    })
}

pub fn build_indicator_settings(config: &dyn ConfigPort) -> Result<IndicatorSettings, PipsignalError> {
    validate_indicator_config(config)?;
    let defaults = IndicatorSettings::default();

    let period = config.get_int("indicators", "period", defaults.period as i64) as usize;
    let atr_period = config.get_int("indicators", "atr_period", defaults.atr_period as i64) as usize;
    let ma_period = config.get_int("indicators", "ma_period", period as i64) as usize;
    let ma_shift = config.get_int("indicators", "ma_shift", 0) as usize;
    let method = config
        .get_string("indicators", "ma_method")
        .and_then(|s| MaMethod::parse(&s))
        .unwrap_or(MaMethod::Simple);
    let applied_price = config
        .get_string("indicators", "applied_price")
        .and_then(|s| AppliedPrice::parse(&s))
        .unwrap_or(AppliedPrice::Close);

    Ok(IndicatorSettings {
        period,
        atr_period,
        ma: MaSpec {
            period: ma_period,
            ma_shift,
            method,
            applied_price,
        },
    })
}

/// Loads bars for `chart` from a CSV file or a directory of per-chart files.
pub fn load_series(data: &Path, chart: &Chart, info: SymbolInfo) -> Result<BarSeries, PipsignalError> {
    if data.is_dir() {
        return CsvAdapter::new(data.to_path_buf()).load_series(chart, info);
    }
    let bars = read_bars(data)?;
    if bars.is_empty() {
        return Err(PipsignalError::NoData {
            symbol: chart.symbol.clone(),
        });
    }
    Ok(BarSeries::new(chart.clone(), bars, info))
}

fn run_indicators(config_path: &Path, data: &Path, shift: usize) -> Result<(), PipsignalError> {
    let config = load_config(config_path)?;
    let chart = build_chart(&config)?;
    let info = build_symbol_info(&config)?;
    let settings = build_indicator_settings(&config)?;
    let series = load_series(data, &chart, info)?;
    tracing::info!(%chart, bars = series.len(), shift, "evaluating indicators");

    let snapshot = IndicatorSnapshot::evaluate(&series, &chart, &settings, shift);
    if !snapshot.is_complete() {
        tracing::warn!(%chart, shift, "not enough history for every indicator");
    }

    println!("{}  period={} atr={} ma={}", chart, settings.period, settings.atr_period, settings.ma);
    print!("{}", snapshot);
    Ok(())
}

fn run_pips(digits: u32, point: Option<f64>, pips: f64) -> Result<(), PipsignalError> {
    let info = match point {
        Some(p) if p > 0.0 => SymbolInfo::new(digits, p),
        Some(_) => return Err(invalid("pips", "point", "point must be positive")),
        None => SymbolInfo::from_digits(digits),
    };

    println!("digits       {}", info.digits);
    println!("point        {}", info.point);
    println!("multiplier   {}", pip_multiplier(info.digits));
    println!("pip size     {}", info.pip_size());
    match pip_offset(pips, &info) {
        Some(offset) => println!("offset       {}", offset),
        None => println!("offset       none"),
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PipsignalError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let chart = build_chart(&config)?;
    let info = build_symbol_info(&config)?;
    let settings = build_indicator_settings(&config)?;
    let orders = build_order_config(&config)?;

    println!("chart        {}", chart);
    println!("pip size     {}", info.pip_size());
    println!("indicators   period={} atr={} ma={}", settings.period, settings.atr_period, settings.ma);
    println!("orders       lot={} magic={}", orders.lot, orders.magic);
    println!("config OK");
    Ok(())
}

fn run_plan(
    config_path: &Path,
    data: &Path,
    signals: &SignalSet,
    spread_points: f64,
    position: Option<Side>,
) -> Result<(), PipsignalError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    let chart = build_chart(&config)?;
    let info = build_symbol_info(&config)?;
    let orders = build_order_config(&config)?;
    let series = load_series(data, &chart, info)?.with_quote_from_last_close(spread_points);

    let mut broker = RecordingBroker::new();
    if let Some(side) = position {
        let open_price = series.bars().first().map(|b| b.close).unwrap_or_default();
        broker = broker.with_position(BrokerPosition {
            symbol: chart.symbol.clone(),
            magic: orders.magic,
            side,
            open_price,
            lot: orders.lot,
        });
    }

    let located = locate_position(&broker, &chart.symbol, orders.magic);
    if let Some(pos) = &located {
        let pnl = match (series.bid(&chart.symbol), series.ask(&chart.symbol)) {
            (Some(bid), Some(ask)) => pos.unrealized_pips(bid, ask, &info),
            _ => None,
        };
        match pnl {
            Some(p) => println!("position     {} {:+.1} pips", pos.side, p),
            None => println!("position     {}", pos.side),
        }
    }

    if signals.is_idle() {
        tracing::info!(%chart, "no signals set");
    }
    let (closed, opened) = on_signals(
        &series,
        &mut broker,
        &chart,
        located.map(|p| p.side),
        signals,
        &orders,
    );
    tracing::info!(%chart, closed = ?closed, opened = opened.len(), "plan finished");

    if broker.commands().is_empty() {
        println!("no commands");
    }
    for command in broker.commands() {
        match command {
            BrokerCommand::Open(order) => {
                let distance = |level: Option<f64>| match level {
                    Some(l) => format!("{:.1}", price_to_pips((l - order.price).abs(), &info)),
                    None => "-".to_string(),
                };
                println!(
                    "open  {} {} lot={} price={} sl={} ({} pips) tp={} ({} pips) magic={}",
                    order.side,
                    order.symbol,
                    order.lot,
                    order.price,
                    order.stop_loss_or_zero(),
                    distance(order.stop_loss),
                    order.take_profit_or_zero(),
                    distance(order.take_profit),
                    order.magic,
                );
            }
            BrokerCommand::Close {
                symbol,
                deviation_points,
            } => println!("close {} deviation={}", symbol, deviation_points),
        }
    }
    Ok(())
}
