//! Terminal rendering of demo figures

use rust_decimal::Decimal;

use crate::demo::DemoReport;

/// Format an optional metric with `dp` decimal places, `n/a` when absent
pub fn format_metric(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(v) => format!("{:.*}", dp as usize, v.round_dp(dp)),
        None => "n/a".to_string(),
    }
}

/// Render the whole demo report
pub fn render(report: &DemoReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("--- {} ---\n", report.market_name));
    out.push_str(&format!("Stocks loaded: {}\n", report.symbols.join(", ")));

    out.push_str(&format!(
        "\n--- Yield and P/E Ratio (price = {}p) ---\n",
        report.quote_price
    ));
    for line in &report.quotes {
        out.push_str(&format!(
            "{} Yield: {}\n{} P/E:   {}\n",
            line.symbol,
            format_metric(line.dividend_yield, 4),
            line.symbol,
            format_metric(line.pe_ratio, 2)
        ));
    }

    out.push_str("\n--- Volume Weighted Stock Price ---\n");
    for (symbol, vwsp) in &report.vwsp {
        out.push_str(&format!("{} VWSP: {}\n", symbol, format_metric(*vwsp, 4)));
    }

    out.push_str(&format!(
        "\nAll Share Index (geometric mean): {}\n",
        format_metric(report.all_share_index, 4)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(dec!(13.75)), 2), "13.75");
        assert_eq!(format_metric(Some(dec!(55)), 2), "55.00");
        assert_eq!(format_metric(Some(dec!(8) / dec!(110)), 4), "0.0727");
        assert_eq!(format_metric(None, 2), "n/a");
    }
}
