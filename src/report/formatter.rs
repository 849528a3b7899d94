//! Plain-text and HTML rendering of the daily signal report.

use crate::common::calendar::is_last_day_of_month;
use crate::common::math::percentage_distance;
use crate::models::signal::{IndicatorParameters, Signal, SignalResult, TickerReport};
use crate::models::zone::ZoneAssessment;
use crate::signals::zone::VOLATILITY_THRESHOLD;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NO_SIGNALS: &str = "No signals for this run.";

const MONTH_END_NOTICE: &str =
    "Monthly reminder: today is the last day of the month. Accumulate if not done already.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedReport {
    pub subject: String,
    pub plain_text: String,
    pub html: String,
}

pub struct ReportFormatter {
    report_date: NaiveDate,
    params: IndicatorParameters,
}

impl ReportFormatter {
    pub fn new(report_date: NaiveDate, params: IndicatorParameters) -> Self {
        Self {
            report_date,
            params,
        }
    }

    /// Render every entry once, in input order.
    pub fn format(&self, entries: &[TickerReport]) -> FormattedReport {
        FormattedReport {
            subject: self.subject(entries),
            plain_text: self.plain_text(entries),
            html: self.html(entries),
        }
    }

    pub fn subject(&self, entries: &[TickerReport]) -> String {
        let base = format!("ETF Signal Report - {}", self.report_date.format("%d %b %Y"));
        let crossovers = entries
            .iter()
            .filter(|e| e.signal().is_some_and(|s| s.is_crossover()))
            .count();

        if self.is_month_end() {
            format!("Monthly reminder: {}", base)
        } else if crossovers > 0 {
            format!("Crossover alert ({}): {}", crossovers, base)
        } else {
            base
        }
    }

    fn is_month_end(&self) -> bool {
        is_last_day_of_month(self.report_date)
    }

    fn fast_label(&self) -> String {
        format!("EMA{}", self.params.fast_period())
    }

    fn slow_label(&self) -> String {
        format!("EMA{}", self.params.slow_period())
    }

    fn plain_text(&self, entries: &[TickerReport]) -> String {
        let mut out = format!(
            "ETF Signal Report - {}\nEMA {}/{} crossover\n\n",
            self.report_date.format("%d %B %Y"),
            self.params.fast_period(),
            self.params.slow_period()
        );

        if self.is_month_end() {
            out.push_str(MONTH_END_NOTICE);
            out.push_str("\n\n");
        }

        if entries.is_empty() {
            out.push_str(NO_SIGNALS);
            out.push('\n');
            return out;
        }

        for entry in entries {
            match entry {
                TickerReport::Signal(result) => out.push_str(&self.plain_row(result)),
                TickerReport::NoData { ticker, reason } => {
                    out.push_str(&format!("{:<7} {:<14} {}\n", "NO DATA", ticker, reason))
                }
            }
        }
        out
    }

    fn plain_row(&self, r: &SignalResult) -> String {
        let zone = match &r.zone {
            Some(z) => format!(
                "  zone {} ({})  [{}]{}",
                z.label(),
                z.score(),
                level_distances(z),
                if z.accumulate { "  ACCUMULATE" } else { "" }
            ),
            None => String::new(),
        };
        format!(
            "{:<7} {:<14} close {:.2}  {} {:.2}  {} {:.2}  ({:+.1}% vs {})  vol {}{}  as of {}\n",
            r.signal.as_str(),
            r.ticker,
            r.last_close,
            self.fast_label(),
            r.fast_ema,
            self.slow_label(),
            r.slow_ema,
            percentage_distance(r.last_close, r.slow_ema),
            self.slow_label(),
            volatility_cell(r),
            zone,
            r.as_of_date
        )
    }

    fn html(&self, entries: &[TickerReport]) -> String {
        let mut out = String::from(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
<title>ETF Signal Report</title>\n<style>\n\
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #1e293b; background: #f8fafc; padding: 20px; }\n\
table { border-collapse: collapse; width: 100%; background: #fff; }\n\
th, td { padding: 10px 12px; text-align: left; border-bottom: 1px solid #e2e8f0; }\n\
th { color: #64748b; background: #f8fafc; }\n\
.buy { color: #065f46; font-weight: 700; }\n\
.sell { color: #991b1b; font-weight: 700; }\n\
.hold { color: #92400e; }\n\
.nodata { color: #991b1b; }\n\
.notice { background: #fffbeb; padding: 12px; border: 1px solid #fde68a; }\n\
.accumulate { color: #065f46; font-weight: 700; }\n\
</style>\n</head>\n<body>\n",
        );

        out.push_str(&format!(
            "<h1>ETF Signal Report</h1>\n<p>{} &middot; EMA {}/{} crossover</p>\n",
            self.report_date.format("%d %B %Y"),
            self.params.fast_period(),
            self.params.slow_period()
        ));

        if self.is_month_end() {
            out.push_str(&format!("<div class=\"notice\">{}</div>\n", MONTH_END_NOTICE));
        }

        if entries.is_empty() {
            out.push_str(&format!("<p class=\"empty\">{}</p>\n</body>\n</html>\n", NO_SIGNALS));
            return out;
        }

        out.push_str(&format!(
            "<table>\n<tr><th>Ticker</th><th>Signal</th><th>Close</th><th>{}</th><th>{}</th>\
<th>vs {}</th><th>Volatility</th><th>Zone</th><th>EMA distances</th><th>As of</th></tr>\n",
            self.fast_label(),
            self.slow_label(),
            self.slow_label()
        ));

        for entry in entries {
            match entry {
                TickerReport::Signal(r) => out.push_str(&format!(
                    "<tr><td>{}</td><td class=\"{}\">{}</td><td>{:.2}</td><td>{:.2}</td>\
<td>{:.2}</td><td>{:+.1}%</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&r.ticker),
                    signal_class(r.signal),
                    r.signal.as_str(),
                    r.last_close,
                    r.fast_ema,
                    r.slow_ema,
                    percentage_distance(r.last_close, r.slow_ema),
                    volatility_cell(r),
                    zone_cell(r.zone.as_ref()),
                    r.zone.as_ref().map(level_distances).unwrap_or_default(),
                    r.as_of_date
                )),
                TickerReport::NoData { ticker, reason } => out.push_str(&format!(
                    "<tr><td>{}</td><td class=\"nodata\" colspan=\"9\">No data: {}</td></tr>\n",
                    escape_html(ticker),
                    escape_html(reason)
                )),
            }
        }

        out.push_str("</table>\n<p><small>Signals compare the latest two EMA points. Always do your own research.</small></p>\n</body>\n</html>\n");
        out
    }
}

fn signal_class(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "buy",
        Signal::Sell => "sell",
        Signal::Hold => "hold",
    }
}

/// Volatility with a marker when it exceeds the accumulation threshold.
fn volatility_cell(r: &SignalResult) -> String {
    let value = format_volatility(r.volatility);
    match (r.volatility, &r.zone) {
        (Some(_), Some(z)) if !z.within_volatility_threshold => {
            format!("{} (above {}%)", value, VOLATILITY_THRESHOLD)
        }
        _ => value,
    }
}

fn zone_cell(zone: Option<&ZoneAssessment>) -> String {
    match zone {
        Some(z) if z.accumulate => format!(
            "{} ({}) <span class=\"accumulate\">ACCUMULATE</span>",
            z.label(),
            z.score()
        ),
        Some(z) => format!("{} ({})", z.label(), z.score()),
        None => "n/a".to_string(),
    }
}

fn level_distances(zone: &ZoneAssessment) -> String {
    zone.levels
        .iter()
        .map(|l| format!("EMA{} {:+.1}%", l.period, l.distance_pct))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_volatility(volatility: Option<f64>) -> String {
    match volatility {
        Some(v) => format!("{:.1}%", v),
        None => "n/a".to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
