//! CLI integration tests.
//!
//! Tests cover:
//! - Config builders (chart, symbol metadata, orders, indicator settings)
//! - Commands run end to end on INI and CSV files written to disk
//! - Exit codes for config and data errors

mod common;

use clap::Parser;
use common::*;
use pipsignal::adapters::file_config_adapter::FileConfigAdapter;
use pipsignal::cli::{self, Cli};
use pipsignal::domain::chart::Timeframe;
use pipsignal::domain::error::PipsignalError;
use pipsignal::domain::indicator::{AppliedPrice, MaMethod};
use std::process::ExitCode;

fn config(content: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(content).unwrap()
}

fn exit_code(args: &[&str]) -> ExitCode {
    cli::run(Cli::try_parse_from(args).unwrap())
}

fn same_code(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

mod builders {
    use super::*;

    #[test]
    fn chart_from_config() {
        let chart = cli::build_chart(&config(VALID_INI)).unwrap();
        assert_eq!(chart.symbol, "EURUSD");
        assert_eq!(chart.timeframe, Timeframe::H1);
    }

    #[test]
    fn chart_accepts_minute_count() {
        let chart = cli::build_chart(&config(&VALID_INI.replace("timeframe = H1", "timeframe = 240")))
            .unwrap();
        assert_eq!(chart.timeframe, Timeframe::H4);
    }

    #[test]
    fn chart_requires_symbol() {
        let result = cli::build_chart(&config(&VALID_INI.replace("symbol = EURUSD\n", "")));
        assert!(matches!(result, Err(PipsignalError::ConfigMissing { .. })));
    }

    #[test]
    fn symbol_info_from_digits() {
        let info = cli::build_symbol_info(&config(VALID_INI)).unwrap();
        assert_eq!(info.digits, 5);
        assert!((info.pip_size() - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn symbol_info_with_explicit_point() {
        let ini = VALID_INI.replace("digits = 5", "digits = 2\npoint = 0.01");
        let info = cli::build_symbol_info(&config(&ini)).unwrap();
        assert_eq!(info.point, 0.01);
        assert_eq!(info.pip_size(), 0.01);
    }

    #[test]
    fn order_config_from_config() {
        let orders = cli::build_order_config(&config(VALID_INI)).unwrap();
        assert_eq!(orders.lot, 0.1);
        assert_eq!(orders.magic, 1001);
        assert_eq!(orders.stop_loss_pips, Some(20.0));
        assert_eq!(orders.take_profit_pips, Some(40.0));
        assert_eq!(orders.deviation_points, 5);
        assert_eq!(orders.max_spread_pips, None);
    }

    #[test]
    fn order_config_without_stops_is_market_only() {
        let ini = "[orders]\nlot = 0.5\nmagic = 3\n";
        let orders = cli::build_order_config(&config(ini)).unwrap();
        assert_eq!(orders.stop_loss_pips, None);
        assert_eq!(orders.take_profit_pips, None);
        assert_eq!(orders.deviation_points, 10);
    }

    #[test]
    fn order_config_rejects_bad_magic() {
        let ini = VALID_INI.replace("magic = 1001", "magic = one");
        assert!(matches!(
            cli::build_order_config(&config(&ini)),
            Err(PipsignalError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn builders_report_validation_errors() {
        let bad_digits = config(&VALID_INI.replace("digits = 5", "digits = 12"));
        assert!(matches!(
            cli::build_symbol_info(&bad_digits),
            Err(PipsignalError::ConfigInvalid { key, .. }) if key == "digits"
        ));

        let bad_timeframe = config(&VALID_INI.replace("timeframe = H1", "timeframe = H7x"));
        assert!(matches!(
            cli::build_chart(&bad_timeframe),
            Err(PipsignalError::ConfigInvalid { key, .. }) if key == "timeframe"
        ));

        let zero_cap = config(&format!("{VALID_INI}max_spread_pips = 0\n"));
        assert!(matches!(
            cli::build_order_config(&zero_cap),
            Err(PipsignalError::ConfigInvalid { key, .. }) if key == "max_spread_pips"
        ));

        let bad_deviation = config(&VALID_INI.replace("deviation_points = 5", "deviation_points = -3"));
        assert!(matches!(
            cli::build_order_config(&bad_deviation),
            Err(PipsignalError::ConfigInvalid { key, .. }) if key == "deviation_points"
        ));
    }

    #[test]
    fn indicator_settings_from_config() {
        let ini = VALID_INI.replace("ma_method = sma", "ma_method = ema\nma_period = 8\nma_shift = 1");
        let settings = cli::build_indicator_settings(&config(&ini)).unwrap();
        assert_eq!(settings.period, 3);
        assert_eq!(settings.atr_period, 3);
        assert_eq!(settings.ma.period, 8);
        assert_eq!(settings.ma.ma_shift, 1);
        assert_eq!(settings.ma.method, MaMethod::Exponential);
        assert_eq!(settings.ma.applied_price, AppliedPrice::Close);
    }

    #[test]
    fn indicator_settings_default_ma_period_to_period() {
        let settings = cli::build_indicator_settings(&config(VALID_INI)).unwrap();
        assert_eq!(settings.ma.period, 3);
    }
}

mod commands {
    use super::*;

    #[test]
    fn validate_accepts_valid_config() {
        let ini = write_temp(VALID_INI, ".ini");
        let code = exit_code(&["pipsignal", "validate", "-c", ini.path().to_str().unwrap()]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn validate_reports_config_error() {
        let ini = write_temp(&VALID_INI.replace("lot = 0.1", "lot = -1"), ".ini");
        let code = exit_code(&["pipsignal", "validate", "-c", ini.path().to_str().unwrap()]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn validate_missing_file() {
        let code = exit_code(&["pipsignal", "validate", "-c", "/nonexistent/pipsignal.ini"]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn indicators_on_csv_file() {
        let ini = write_temp(VALID_INI, ".ini");
        let csv = write_temp(&bars_to_csv(&rising_bars(20, 1.1000, 0.0010, 0.0002)), ".csv");
        let code = exit_code(&[
            "pipsignal",
            "indicators",
            "-c",
            ini.path().to_str().unwrap(),
            "-d",
            csv.path().to_str().unwrap(),
            "--shift",
            "1",
        ]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn indicators_on_empty_csv_is_a_data_error() {
        let ini = write_temp(VALID_INI, ".ini");
        let csv = write_temp("time,open,high,low,close,volume\n", ".csv");
        let code = exit_code(&[
            "pipsignal",
            "indicators",
            "-c",
            ini.path().to_str().unwrap(),
            "-d",
            csv.path().to_str().unwrap(),
        ]);
        assert!(same_code(code, ExitCode::from(3)));
    }

    #[test]
    fn pips_command() {
        let code = exit_code(&["pipsignal", "pips", "--digits", "5", "--pips", "20"]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn plan_with_existing_position() {
        let ini = write_temp(VALID_INI, ".ini");
        let csv = write_temp(&bars_to_csv(&rising_bars(10, 1.1000, 0.0010, 0.0002)), ".csv");
        let code = exit_code(&[
            "pipsignal",
            "plan",
            "-c",
            ini.path().to_str().unwrap(),
            "-d",
            csv.path().to_str().unwrap(),
            "--position",
            "long",
            "--buy-exit",
            "--sell-entry",
            "--spread-points",
            "15",
        ]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn load_series_from_file() {
        let bars = rising_bars(4, 1.1, 0.001, 0.0005);
        let csv = write_temp(&bars_to_csv(&bars), ".csv");
        let chart = cli::build_chart(&config(VALID_INI)).unwrap();
        let info = cli::build_symbol_info(&config(VALID_INI)).unwrap();
        let series = cli::load_series(csv.path(), &chart, info).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.chart(), &chart);
    }
}
