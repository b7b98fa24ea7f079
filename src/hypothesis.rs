//! Hypothesis testing for correlation results.
//!
//! Selects the test matching the correlation kind (t-test, chi-square
//! test, or normal-approximation test), computes the test statistic,
//! critical value, and two-tailed p-value, and applies the fixed
//! α = 0.05 decision rule.
//!
//! For Spearman's ρ and Kendall's τ with n ≤ 10 no exact test is
//! available and the normal approximation is unreliable; the engine
//! returns a note-only [`TestResult`] in that case. That is a valid
//! terminal state, not an error.
//!
//! # Examples
//!
//! ```
//! use corrstat::correlation::pearson;
//! use corrstat::hypothesis::test;
//!
//! let x: Vec<f64> = (0..12).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
//!
//! let result = test(&pearson(&x, &y).unwrap());
//! assert_eq!(result.test_name, "t-test");
//! assert_eq!(result.significant, Some(true));
//! ```

use crate::correlation::{CorrelationKind, CorrelationResult};
use crate::special;

/// Fixed significance level for the decision rule.
pub const ALPHA: f64 = 0.05;

/// Outcome of a hypothesis test.
///
/// All numeric fields are `None` in the "no exact test available"
/// terminal state, which carries only `note`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Which test was applied.
    pub test_name: &'static str,
    /// Test statistic (t, z, or χ²).
    pub statistic: Option<f64>,
    /// Degrees of freedom, where the test has them.
    pub df: Option<usize>,
    /// Critical value at α = 0.05. `None` when no value is tabulated
    /// (chi-square with df > 10) or in the note-only state.
    pub critical_value: Option<f64>,
    /// Two-tailed p-value (upper-tail for chi-square).
    pub p_value: Option<f64>,
    /// Whether p < α. `None` when no p-value was computed.
    pub significant: Option<bool>,
    /// Caveats: missing exact test, missing critical value, or reduced
    /// p-value precision from a non-converged approximation.
    pub note: Option<String>,
}

impl TestResult {
    fn note_only(test_name: &'static str, note: impl Into<String>) -> Self {
        Self {
            test_name,
            statistic: None,
            df: None,
            critical_value: None,
            p_value: None,
            significant: None,
            note: Some(note.into()),
        }
    }
}

/// Runs the hypothesis test matching a correlation result.
///
/// # Algorithm
///
/// - Pearson / Point-Biserial → t-test with df = n − 2 and
///   t = r·√(df / (1 − r²)).
/// - Spearman, n > 10 → normal approximation z = ρ·√(n − 1);
///   n ≤ 10 → note-only state.
/// - Kendall, n > 10 → normal approximation
///   z = τ·√(9n(n − 1) / (2(2n + 5))); n ≤ 10 → note-only state.
/// - Cramér's V → chi-square test on the statistic and df carried in
///   [`CorrelationResult::extra`].
pub fn test(result: &CorrelationResult) -> TestResult {
    match result.kind {
        CorrelationKind::Pearson | CorrelationKind::PointBiserial => t_test(result),
        CorrelationKind::Spearman => {
            normal_approximation_test(result, "Spearman test", spearman_statistic(result))
        }
        CorrelationKind::Kendall => {
            normal_approximation_test(result, "Kendall test", kendall_statistic(result))
        }
        CorrelationKind::CramersV => chi_square_test(result),
    }
}

fn t_test(result: &CorrelationResult) -> TestResult {
    let df = result.n - 2;
    let r = result.value;

    // r² ≥ 1 (perfect correlation, possibly past 1 from round-off)
    // sends the statistic to ±∞ and the p-value to 0.
    let denom = 1.0 - r * r;
    let statistic = if denom > 0.0 {
        r * (df as f64 / denom).sqrt()
    } else if r >= 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    };

    let cdf = special::t_distribution_cdf(statistic.abs(), df as f64);
    let p_value = 2.0 * (1.0 - cdf.value);

    TestResult {
        test_name: "t-test",
        statistic: Some(statistic),
        df: Some(df),
        critical_value: Some(special::t_critical(df)),
        p_value: Some(p_value),
        significant: Some(p_value < ALPHA),
        note: convergence_note(cdf.converged),
    }
}

fn spearman_statistic(result: &CorrelationResult) -> f64 {
    result.value * ((result.n - 1) as f64).sqrt()
}

fn kendall_statistic(result: &CorrelationResult) -> f64 {
    let n = result.n as f64;
    result.value * (9.0 * n * (n - 1.0) / (2.0 * (2.0 * n + 5.0))).sqrt()
}

fn normal_approximation_test(
    result: &CorrelationResult,
    test_name: &'static str,
    statistic: f64,
) -> TestResult {
    if result.n <= 10 {
        return TestResult::note_only(
            test_name,
            "exact tables are required for n ≤ 10; the normal approximation \
             is unreliable for small samples",
        );
    }

    let p_value = 2.0 * (1.0 - special::normal_cdf(statistic.abs()));

    TestResult {
        test_name,
        statistic: Some(statistic),
        df: None,
        // Two-tailed normal critical value at α = 0.05.
        critical_value: Some(1.96),
        p_value: Some(p_value),
        significant: Some(p_value < ALPHA),
        note: None,
    }
}

fn chi_square_test(result: &CorrelationResult) -> TestResult {
    let Some(extra) = result.extra else {
        return TestResult::note_only(
            "Chi-square test",
            "correlation result carries no chi-square statistic",
        );
    };

    let cdf = special::chi_squared_cdf(extra.chi_square, extra.df as f64);
    let p_value = 1.0 - cdf.value;
    let critical_value = special::chi_squared_critical(extra.df);

    let mut notes: Vec<String> = Vec::new();
    if critical_value.is_none() {
        notes.push(format!(
            "no chi-square critical value is tabulated for df = {}; the \
             decision is based on the p-value alone",
            extra.df
        ));
    }
    if let Some(conv) = convergence_note(cdf.converged) {
        notes.push(conv);
    }

    TestResult {
        test_name: "Chi-square test",
        statistic: Some(extra.chi_square),
        df: Some(extra.df),
        critical_value,
        p_value: Some(p_value),
        significant: Some(p_value < ALPHA),
        note: if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        },
    }
}

fn convergence_note(converged: bool) -> Option<String> {
    if converged {
        None
    } else {
        Some("distribution approximation hit its iteration cap; p-value precision may be reduced".to_string())
    }
}
