//! Baseline comparison: how far the latest reading sits from a reference temperature.
//!
//! Every function here is pure and treats `None` as "no comparison available".

/// `current - baseline`, or `None` if either side is missing.
pub fn delta(current: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    Some(current? - baseline?)
}

/// Percent change relative to the magnitude of the baseline.
///
/// A zero baseline yields `None` rather than an infinite or NaN result.
pub fn percent(current: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    let baseline = baseline.filter(|b| *b != 0.0)?;
    Some((current? - baseline) / baseline.abs() * 100.0)
}

/// Renders a delta as `+2.0°C` / `-3.1°C`.
pub fn format_delta(delta: Option<f64>) -> Option<String> {
    delta.map(|d| format!("{}{d:.1}°C", sign(d)))
}

/// Renders a percent change as `+10.0%` / `-8.3%`.
pub fn format_percent(percent: Option<f64>) -> Option<String> {
    percent.map(|p| format!("{}{p:.1}%", sign(p)))
}

/// Parses user input for a baseline temperature.
///
/// Blank, non-numeric and non-finite input all mean "no baseline".
pub fn parse_baseline(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn sign(value: f64) -> &'static str {
    if value >= 0.0 { "+" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_requires_both_operands() {
        assert_eq!(delta(Some(22.0), Some(20.0)), Some(2.0));
        assert_eq!(delta(None, Some(20.0)), None);
        assert_eq!(delta(Some(22.0), None), None);
        assert_eq!(delta(None, None), None);
    }

    #[test]
    fn percent_uses_absolute_baseline() {
        let p = percent(Some(22.0), Some(20.0)).expect("percent defined");
        assert!((p - 10.0).abs() < 1e-9);
        // Warming from -10 to -5 is a positive change.
        assert_eq!(percent(Some(-5.0), Some(-10.0)), Some(50.0));
    }

    #[test]
    fn percent_is_absent_for_zero_baseline() {
        assert_eq!(percent(Some(5.0), Some(0.0)), None);
        assert_eq!(percent(Some(5.0), Some(-0.0)), None);
        // delta is still defined
        assert_eq!(delta(Some(5.0), Some(0.0)), Some(5.0));
    }

    #[test]
    fn percent_requires_both_operands() {
        assert_eq!(percent(None, Some(20.0)), None);
        assert_eq!(percent(Some(20.0), None), None);
    }

    #[test]
    fn percent_matches_delta_over_baseline() {
        let pairs = [(22.0, 20.0), (-3.5, 4.0), (0.0, -12.25), (31.7, 31.7), (-40.0, -7.0)];
        for (current, baseline) in pairs {
            let d = delta(Some(current), Some(baseline)).expect("delta defined");
            let p = percent(Some(current), Some(baseline)).expect("percent defined");
            let expected = d / f64::abs(baseline) * 100.0;
            assert!((p - expected).abs() < 1e-9, "{current} vs {baseline}: {p} != {expected}");
        }
    }

    #[test]
    fn formats_with_sign_and_one_decimal() {
        assert_eq!(format_delta(Some(2.0)).as_deref(), Some("+2.0°C"));
        assert_eq!(format_delta(Some(-3.14)).as_deref(), Some("-3.1°C"));
        assert_eq!(format_delta(Some(0.0)).as_deref(), Some("+0.0°C"));
        assert_eq!(format_percent(Some(10.0)).as_deref(), Some("+10.0%"));
        assert_eq!(format_percent(Some(-8.26)).as_deref(), Some("-8.3%"));
    }

    #[test]
    fn formatting_propagates_absence() {
        assert_eq!(format_delta(None), None);
        assert_eq!(format_percent(None), None);
    }

    #[test]
    fn parse_baseline_accepts_numbers_only() {
        assert_eq!(parse_baseline("20"), Some(20.0));
        assert_eq!(parse_baseline("  -4.5 "), Some(-4.5));
        assert_eq!(parse_baseline(""), None);
        assert_eq!(parse_baseline("   "), None);
        assert_eq!(parse_baseline("warm"), None);
        assert_eq!(parse_baseline("NaN"), None);
        assert_eq!(parse_baseline("inf"), None);
    }
}
