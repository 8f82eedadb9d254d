//! Financial ratios computed from an extracted value map.

use std::collections::BTreeMap;

use serde::Serialize;

/// A computed financial ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    /// Ratio name, e.g. "ROE (%)".
    pub name: String,
    /// Ratio value, rounded to two decimals.
    pub value: f64,
}

/// Compute the standard ratio set from extracted figures.
///
/// Ratios whose inputs are missing, or whose denominator is zero, are
/// skipped rather than reported as errors.
pub fn compute_kpis(values: &BTreeMap<String, f64>) -> Vec<Kpi> {
    let figure = |label: &str| values.get(label).copied();
    let nonzero = |label: &str| values.get(label).copied().filter(|v| *v != 0.0);

    let mut kpis = Vec::new();
    let mut push = |name: &str, value: f64| {
        kpis.push(Kpi {
            name: name.to_string(),
            value: round2(value),
        })
    };

    if let (Some(net), Some(equity)) = (figure("Net Income"), nonzero("Equity")) {
        push("ROE (%)", net / equity * 100.0);
    }
    if let (Some(net), Some(assets)) = (figure("Net Income"), nonzero("Total Assets")) {
        push("ROI (%)", net / assets * 100.0);
    }
    if let (Some(net), Some(revenue)) = (figure("Net Income"), nonzero("Revenue")) {
        push("Net Margin (%)", net / revenue * 100.0);
    }
    if let (Some(debts), Some(equity)) = (figure("Total Debts"), nonzero("Equity")) {
        push("Debt to Equity", debts / equity);
    }
    if let (Some(ebitda), Some(revenue)) = (figure("EBITDA"), nonzero("Revenue")) {
        push("EBITDA Margin (%)", ebitda / revenue * 100.0);
    }

    kpis
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_full_ratio_set() {
        let kpis = compute_kpis(&values(&[
            ("Net Income", 45_000_000.0),
            ("Equity", 300_000_000.0),
            ("Total Assets", 900_000_000.0),
            ("Revenue", 500_000_000.0),
            ("Total Debts", 450_000_000.0),
            ("EBITDA", 90_000_000.0),
        ]));

        assert_eq!(
            kpis,
            vec![
                Kpi { name: "ROE (%)".to_string(), value: 15.0 },
                Kpi { name: "ROI (%)".to_string(), value: 5.0 },
                Kpi { name: "Net Margin (%)".to_string(), value: 9.0 },
                Kpi { name: "Debt to Equity".to_string(), value: 1.5 },
                Kpi { name: "EBITDA Margin (%)".to_string(), value: 18.0 },
            ]
        );
    }

    #[test]
    fn test_missing_or_zero_denominators_are_skipped() {
        let kpis = compute_kpis(&values(&[("Net Income", 45.0), ("Equity", 0.0)]));
        assert!(kpis.is_empty());

        let kpis = compute_kpis(&values(&[("Net Income", 45.0), ("Revenue", 450.0)]));
        assert_eq!(kpis.len(), 1);
        assert_eq!(kpis[0].name, "Net Margin (%)");
        assert_eq!(kpis[0].value, 10.0);
    }
}
