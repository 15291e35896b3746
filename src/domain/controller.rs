//! Order controller: turns entry/exit flags into execution commands.
//!
//! Commands are fire-and-forget. Each branch issues at most one command, a
//! backend rejection is logged and not retried, and the resulting position
//! is never read back.

use crate::domain::chart::Chart;
use crate::domain::order::{OrderConfig, OrderRequest, SignalSet};
use crate::domain::pip::{pip_offset, price_to_pips, SymbolInfo};
use crate::domain::position::Side;
use crate::ports::execution_port::ExecutionPort;
use crate::ports::market_data_port::MarketDataPort;

/// Closes the selected position when the exit flag for its side is set.
///
/// Returns the side that was closed. Without a selected position nothing is
/// sent, whatever the flags say.
pub fn check_for_close(
    execution: &mut dyn ExecutionPort,
    chart: &Chart,
    selected: Option<Side>,
    buy_exit: bool,
    sell_exit: bool,
    deviation_points: u32,
) -> Option<Side> {
    let side = match selected {
        Some(Side::Long) if buy_exit => Side::Long,
        Some(Side::Short) if sell_exit => Side::Short,
        _ => return None,
    };

    tracing::info!(symbol = %chart.symbol, %side, deviation_points, "closing position");
    if let Err(e) = execution.close_position(&chart.symbol, deviation_points) {
        tracing::warn!(symbol = %chart.symbol, %side, error = %e, "close rejected by backend");
    }
    Some(side)
}

/// Opens a long at the ask and/or a short at the bid.
///
/// Both flags set means two independent orders; keeping them exclusive is
/// the caller's job. Symbol metadata is only looked up when the config asks
/// for protective levels or a spread cap. Returns the orders that were sent.
pub fn check_for_open(
    market: &dyn MarketDataPort,
    execution: &mut dyn ExecutionPort,
    chart: &Chart,
    buy_entry: bool,
    sell_entry: bool,
    config: &OrderConfig,
) -> Vec<OrderRequest> {
    let mut sent = Vec::new();
    if !buy_entry && !sell_entry {
        return sent;
    }

    let symbol = &chart.symbol;
    let info = if config.needs_symbol_info() {
        match market.symbol_info(symbol) {
            Some(info) => Some(info),
            None => {
                tracing::warn!(%symbol, "symbol metadata unavailable; skipping entries");
                return sent;
            }
        }
    } else {
        None
    };

    if let (Some(max_spread), Some(info)) = (config.max_spread_pips, info.as_ref()) {
        if let (Some(ask), Some(bid)) = (market.ask(symbol), market.bid(symbol)) {
            let spread = price_to_pips(ask - bid, info);
            if spread > max_spread {
                tracing::info!(%symbol, spread, max_spread, "spread too wide; skipping entries");
                return sent;
            }
        }
    }

    if buy_entry {
        match market.ask(symbol) {
            Some(ask) => sent.push(send_open(execution, chart, Side::Long, ask, info.as_ref(), config)),
            None => tracing::warn!(%symbol, "ask unavailable; skipping long entry"),
        }
    }
    if sell_entry {
        match market.bid(symbol) {
            Some(bid) => sent.push(send_open(execution, chart, Side::Short, bid, info.as_ref(), config)),
            None => tracing::warn!(%symbol, "bid unavailable; skipping short entry"),
        }
    }
    sent
}

/// Runs the close check for the selected position, then the entry check.
/// Closing first lets a single call reverse a position.
pub fn on_signals(
    market: &dyn MarketDataPort,
    execution: &mut dyn ExecutionPort,
    chart: &Chart,
    selected: Option<Side>,
    signals: &SignalSet,
    config: &OrderConfig,
) -> (Option<Side>, Vec<OrderRequest>) {
    let closed = check_for_close(
        execution,
        chart,
        selected,
        signals.buy_exit,
        signals.sell_exit,
        config.deviation_points,
    );
    let opened = check_for_open(
        market,
        execution,
        chart,
        signals.buy_entry,
        signals.sell_entry,
        config,
    );
    (closed, opened)
}

/// Stop-loss and take-profit levels for an entry at `price`.
pub fn protective_levels(
    side: Side,
    price: f64,
    info: &SymbolInfo,
    config: &OrderConfig,
) -> (Option<f64>, Option<f64>) {
    let sl = config.stop_loss_pips.and_then(|p| pip_offset(p, info));
    let tp = config.take_profit_pips.and_then(|p| pip_offset(p, info));
    match side {
        Side::Long => (sl.map(|o| price - o), tp.map(|o| price + o)),
        Side::Short => (sl.map(|o| price + o), tp.map(|o| price - o)),
    }
}

fn send_open(
    execution: &mut dyn ExecutionPort,
    chart: &Chart,
    side: Side,
    price: f64,
    info: Option<&SymbolInfo>,
    config: &OrderConfig,
) -> OrderRequest {
    let (stop_loss, take_profit) = match info {
        Some(info) => protective_levels(side, price, info, config),
        None => (None, None),
    };
    let order = OrderRequest {
        symbol: chart.symbol.clone(),
        side,
        lot: config.lot,
        price,
        stop_loss,
        take_profit,
        magic: config.magic,
    };

    tracing::info!(
        symbol = %order.symbol,
        %side,
        lot = order.lot,
        price,
        stop_loss = order.stop_loss_or_zero(),
        take_profit = order.take_profit_or_zero(),
        magic = order.magic,
        "opening position"
    );
    if let Err(e) = execution.open_position(&order) {
        tracing::warn!(symbol = %order.symbol, %side, error = %e, "open rejected by backend");
    }
    order
}
