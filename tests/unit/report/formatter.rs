//! Unit tests for report formatting

use chrono::NaiveDate;
use etf_alert::models::{EmaLevel, IndicatorParameters, Signal, SignalResult, TickerReport, Zone, ZoneAssessment};
use etf_alert::report::{ReportFormatter, NO_SIGNALS};

fn mid_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn formatter(date: NaiveDate) -> ReportFormatter {
    ReportFormatter::new(date, IndicatorParameters::new(20, 50).unwrap())
}

fn result(ticker: &str, signal: Signal) -> TickerReport {
    TickerReport::Signal(SignalResult {
        ticker: ticker.to_string(),
        fast_ema: 101.25,
        slow_ema: 99.5,
        signal,
        as_of_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        last_close: 102.0,
        volatility: Some(14.2),
        zone: None,
    })
}

#[test]
fn test_empty_report_says_no_signals() {
    let report = formatter(mid_month()).format(&[]);
    assert!(report.plain_text.contains(NO_SIGNALS));
    assert!(report.html.contains(NO_SIGNALS));
    assert!(report.html.trim_end().ends_with("</html>"));
    assert_eq!(report.subject, "ETF Signal Report - 15 Mar 2024");
}

#[test]
fn test_every_entry_mentioned_once_in_order() {
    let entries = vec![
        result("ZETA", Signal::Hold),
        TickerReport::no_data("ALPHA.NS", "unknown ticker"),
        result("MIKE", Signal::Sell),
    ];
    let report = formatter(mid_month()).format(&entries);

    for body in [&report.plain_text, &report.html] {
        let positions: Vec<usize> = entries
            .iter()
            .map(|e| {
                assert_eq!(body.matches(e.ticker()).count(), 1, "{} in {}", e.ticker(), body);
                body.find(e.ticker()).unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!body.contains(NO_SIGNALS));
    }
}

#[test]
fn test_signal_rows_show_signal_and_both_emas() {
    let report = formatter(mid_month()).format(&[result("SPY", Signal::Buy)]);
    for body in [&report.plain_text, &report.html] {
        assert!(body.contains("BUY"));
        assert!(body.contains("101.25"));
        assert!(body.contains("99.50"));
        assert!(body.contains("EMA20"));
        assert!(body.contains("EMA50"));
    }
    // close 102 vs slow 99.5
    assert!(report.plain_text.contains("+2.5% vs EMA50"));
    assert!(report.plain_text.contains("vol 14.2%"));
}

#[test]
fn test_no_data_rows_show_reason_escaped() {
    let entries = vec![TickerReport::no_data("<BAD>", "provider said <nope>")];
    let report = formatter(mid_month()).format(&entries);
    assert!(report.plain_text.contains("NO DATA"));
    assert!(report.plain_text.contains("provider said <nope>"));
    assert!(report.html.contains("&lt;BAD&gt;"));
    assert!(report.html.contains("provider said &lt;nope&gt;"));
    assert!(!report.html.contains("<BAD>"));
}

#[test]
fn test_subject_flags_crossovers() {
    let entries = vec![
        result("SPY", Signal::Buy),
        result("QQQ", Signal::Hold),
        result("GLD", Signal::Sell),
    ];
    let report = formatter(mid_month()).format(&entries);
    assert_eq!(report.subject, "Crossover alert (2): ETF Signal Report - 15 Mar 2024");
}

#[test]
fn test_month_end_reminder() {
    let month_end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let report = formatter(month_end).format(&[result("SPY", Signal::Buy)]);
    assert!(report.subject.starts_with("Monthly reminder: "));
    assert!(report.plain_text.contains("last day of the month"));
    assert!(report.html.contains("last day of the month"));

    let normal = formatter(mid_month()).format(&[result("SPY", Signal::Hold)]);
    assert!(!normal.plain_text.contains("last day of the month"));
}

#[test]
fn test_missing_volatility_renders_placeholder() {
    let mut entry = result("SPY", Signal::Hold);
    if let TickerReport::Signal(ref mut r) = entry {
        r.volatility = None;
    }
    let report = formatter(mid_month()).format(&[entry]);
    assert!(report.plain_text.contains("vol n/a"));
}

fn with_zone(zone: Zone, within: bool, accumulate: bool) -> TickerReport {
    let mut entry = result("SPY", Signal::Hold);
    if let TickerReport::Signal(ref mut r) = entry {
        r.zone = Some(ZoneAssessment {
            levels: [(20, 1.6), (50, -21.2), (100, -40.0), (200, -48.5)]
                .iter()
                .map(|&(period, distance_pct)| EmaLevel {
                    period,
                    value: 100.0,
                    distance_pct,
                })
                .collect(),
            zone,
            within_volatility_threshold: within,
            accumulate,
        });
    }
    entry
}

#[test]
fn test_zone_and_accumulate_flag_rendered() {
    let report = formatter(mid_month()).format(&[with_zone(Zone::Great, true, true)]);
    for body in [&report.plain_text, &report.html] {
        assert!(body.contains("Great Price (below 50 EMA) (75)"));
        assert!(body.contains("EMA20 +1.6% EMA50 -21.2% EMA100 -40.0% EMA200 -48.5%"));
        assert!(body.contains("ACCUMULATE"));
        assert!(!body.contains("above 2.5%"));
    }
}

#[test]
fn test_volatility_over_threshold_is_flagged() {
    let report = formatter(mid_month()).format(&[with_zone(Zone::Great, false, false)]);
    for body in [&report.plain_text, &report.html] {
        assert!(body.contains("14.2% (above 2.5%)"));
        assert!(!body.contains("ACCUMULATE"));
    }
}
