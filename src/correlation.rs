//! Correlation and association coefficients.
//!
//! Pearson's r, Spearman's ρ, Point-Biserial r, Cramér's V, and
//! Kendall's τ, each returning a [`CorrelationResult`] that carries the
//! coefficient, the sample size, and an ordered audit trail of labeled
//! intermediate values ([`Step`]) for presentation layers to render.
//!
//! Coefficients are not clamped: floating-point round-off may leave a
//! value very slightly outside [−1, 1], which is not a contract
//! violation. Degenerate inputs fail with a named [`Error`] instead of
//! producing `NaN`.
//!
//! # Examples
//!
//! ```
//! use corrstat::correlation::{compute, CorrelationKind};
//! use corrstat::dataset::Dataset;
//!
//! let mut data = Dataset::new();
//! data.push_numeric("X", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//! data.push_numeric("Y", vec![2.0, 4.0, 6.0, 8.0, 10.0]);
//!
//! let result = compute(CorrelationKind::Pearson, &data).unwrap();
//! assert!((result.value - 1.0).abs() < 1e-12);
//! assert_eq!(result.variables, vec!["X", "Y"]);
//! ```

use crate::contingency::ContingencyTable;
use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::rank::rank;

/// Which correlation/association statistic to compute.
///
/// The kind fixes the expected variable roles and value types: binary
/// variables take values in {0, 1}, categorical variables arbitrary
/// labels, continuous variables real numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorrelationKind {
    /// Linear correlation between two continuous variables.
    Pearson,
    /// Rank correlation between two continuous variables.
    Spearman,
    /// Correlation between one binary and one continuous variable.
    PointBiserial,
    /// Association strength between two categorical variables.
    CramersV,
    /// Concordance-based correlation between two continuous variables.
    Kendall,
}

impl CorrelationKind {
    /// Human-readable name of the statistic.
    pub fn display_name(self) -> &'static str {
        match self {
            CorrelationKind::Pearson => "Pearson's r",
            CorrelationKind::Spearman => "Spearman's ρ",
            CorrelationKind::PointBiserial => "Point-Biserial r",
            CorrelationKind::CramersV => "Cramér's V",
            CorrelationKind::Kendall => "Kendall's τ",
        }
    }
}

/// A labeled intermediate value in a derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// What the value is (e.g. `"cov(X, Y)"`).
    pub label: String,
    /// The value itself.
    pub value: StepValue,
}

/// Value carried by a [`Step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    /// A single intermediate quantity.
    Scalar(f64),
    /// A derived sequence (ranks, a group partition, ...).
    Series(Vec<f64>),
}

impl Step {
    fn scalar(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: StepValue::Scalar(value),
        }
    }

    fn series(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            value: StepValue::Series(values),
        }
    }
}

/// Chi-square quantities accompanying a Cramér's V result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareInfo {
    /// Pearson chi-square statistic over the contingency table.
    pub chi_square: f64,
    /// (rows − 1) × (cols − 1).
    pub df: usize,
}

/// Result of a correlation computation.
///
/// Immutable once created; consumed by the hypothesis-test engine and
/// by presentation collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    /// Which statistic was computed.
    pub kind: CorrelationKind,
    /// The coefficient.
    pub value: f64,
    /// Sample size.
    pub n: usize,
    /// Variable names, in role order.
    pub variables: Vec<String>,
    /// Populated only for [`CorrelationKind::CramersV`].
    pub extra: Option<ChiSquareInfo>,
    /// Ordered audit trail of intermediate values.
    pub steps: Vec<Step>,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Computes the requested statistic over the first two variables of a
/// dataset.
///
/// The producing layer is responsible for validation, but the engine
/// re-asserts defensively: matching column types, equal lengths, n ≥ 3,
/// and the {0, 1} domain for the binary variable of Point-Biserial.
///
/// # Returns
///
/// A [`CorrelationResult`] whose `variables` are the dataset's names,
/// or the first [`Error`] encountered.
pub fn compute(kind: CorrelationKind, data: &Dataset) -> Result<CorrelationResult> {
    let (name_a, col_a) = data.get(0).ok_or(Error::MissingVariable)?;
    let (name_b, col_b) = data.get(1).ok_or(Error::MissingVariable)?;

    let mut result = match kind {
        CorrelationKind::Pearson => pearson(numeric(kind, col_a)?, numeric(kind, col_b)?)?,
        CorrelationKind::Spearman => spearman(numeric(kind, col_a)?, numeric(kind, col_b)?)?,
        CorrelationKind::PointBiserial => {
            point_biserial(numeric(kind, col_a)?, numeric(kind, col_b)?)?
        }
        CorrelationKind::CramersV => {
            cramers_v(categorical(kind, col_a)?, categorical(kind, col_b)?)?
        }
        CorrelationKind::Kendall => kendall_tau(numeric(kind, col_a)?, numeric(kind, col_b)?)?,
    };

    result.variables = vec![name_a.to_string(), name_b.to_string()];
    Ok(result)
}

fn numeric(kind: CorrelationKind, col: &Column) -> Result<&[f64]> {
    col.as_numeric().ok_or(Error::TypeMismatch {
        kind: kind.display_name(),
        expected: "numeric",
    })
}

fn categorical(kind: CorrelationKind, col: &Column) -> Result<&[String]> {
    col.as_categorical().ok_or(Error::TypeMismatch {
        kind: kind.display_name(),
        expected: "categorical",
    })
}

// ---------------------------------------------------------------------------
// Pearson
// ---------------------------------------------------------------------------

/// Pearson product-moment correlation coefficient.
///
/// # Algorithm
///
/// r = cov(X, Y) / (σ_X · σ_Y), with population (divide-by-n)
/// covariance and standard deviations.
///
/// # Returns
///
/// [`Error::ZeroVariance`] when either standard deviation is 0; length
/// and sample-size violations as named errors.
///
/// # Examples
///
/// ```
/// use corrstat::correlation::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let result = pearson(&x, &y).unwrap();
/// assert!((result.value - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = check_pair(x, y)?;

    let sx = population_sd(x);
    let sy = population_sd(y);
    if sx < 1e-300 {
        return Err(Error::ZeroVariance {
            variable: "X".to_string(),
        });
    }
    if sy < 1e-300 {
        return Err(Error::ZeroVariance {
            variable: "Y".to_string(),
        });
    }

    let cov = population_covariance(x, y);
    let r = cov / (sx * sy);

    let steps = vec![
        Step::scalar("mean(X)", mean(x)),
        Step::scalar("mean(Y)", mean(y)),
        Step::scalar("cov(X, Y)", cov),
        Step::scalar("sd(X)", sx),
        Step::scalar("sd(Y)", sy),
        Step::scalar("r", r),
    ];

    Ok(CorrelationResult {
        kind: CorrelationKind::Pearson,
        value: r,
        n,
        variables: vec!["X".to_string(), "Y".to_string()],
        extra: None,
        steps,
    })
}

// ---------------------------------------------------------------------------
// Spearman
// ---------------------------------------------------------------------------

/// Spearman rank correlation coefficient.
///
/// # Algorithm
///
/// Both variables are ranked with tie averaging, then
/// ρ = 1 − 6·Σd² / (n(n² − 1)) over the per-pair rank differences d.
/// With mid-ranks this is the tie-corrected variant of the
/// rank-difference formula, not the untied shortcut.
///
/// # Examples
///
/// ```
/// use corrstat::correlation::spearman;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [5.0, 4.0, 3.0, 2.0, 1.0];
/// let result = spearman(&x, &y).unwrap();
/// assert!((result.value + 1.0).abs() < 1e-12);
/// ```
pub fn spearman(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = check_pair(x, y)?;

    let rx = rank(x);
    let ry = rank(y);

    let d_squared_sum: f64 = rx
        .iter()
        .zip(ry.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .sum();

    let nf = n as f64;
    let rho = 1.0 - 6.0 * d_squared_sum / (nf * (nf * nf - 1.0));

    let steps = vec![
        Step::series("ranks(X)", rx),
        Step::series("ranks(Y)", ry),
        Step::scalar("sum of d²", d_squared_sum),
        Step::scalar("ρ", rho),
    ];

    Ok(CorrelationResult {
        kind: CorrelationKind::Spearman,
        value: rho,
        n,
        variables: vec!["X".to_string(), "Y".to_string()],
        extra: None,
        steps,
    })
}

// ---------------------------------------------------------------------------
// Point-Biserial
// ---------------------------------------------------------------------------

/// Point-biserial correlation between a binary and a continuous
/// variable.
///
/// # Algorithm
///
/// The continuous variable is partitioned into group 0 / group 1 by the
/// binary label, then
///
/// r_pb = ((M₁ − M₀) / SD_pooled) · √(n₀·n₁ / (n(n − 1)))
///
/// where SD_pooled weights each group's population variance by
/// (n_g − 1) over the denominator n₀ + n₁ − 2.
///
/// # Returns
///
/// [`Error::NotBinary`] for values outside {0, 1};
/// [`Error::GroupTooSmall`] when either group has fewer than two
/// members (the pooled-SD denominator degenerates);
/// [`Error::ZeroVariance`] when both groups are constant.
///
/// # Examples
///
/// ```
/// use corrstat::correlation::point_biserial;
///
/// let x = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
/// let y = [1.0, 2.0, 2.0, 3.0, 3.0, 4.0];
/// let result = point_biserial(&x, &y).unwrap();
/// assert!((result.value - 0.6708).abs() < 1e-3);
/// ```
pub fn point_biserial(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = check_pair(x, y)?;

    for &v in x {
        if v != 0.0 && v != 1.0 {
            return Err(Error::NotBinary { value: v });
        }
    }

    let group0: Vec<f64> = y
        .iter()
        .zip(x.iter())
        .filter(|(_, &label)| label == 0.0)
        .map(|(&v, _)| v)
        .collect();
    let group1: Vec<f64> = y
        .iter()
        .zip(x.iter())
        .filter(|(_, &label)| label == 1.0)
        .map(|(&v, _)| v)
        .collect();

    let n0 = group0.len();
    let n1 = group1.len();
    if n0 < 2 {
        return Err(Error::GroupTooSmall { group: 0, len: n0 });
    }
    if n1 < 2 {
        return Err(Error::GroupTooSmall { group: 1, len: n1 });
    }

    let mean0 = mean(&group0);
    let mean1 = mean(&group1);
    let sd0 = population_sd(&group0);
    let sd1 = population_sd(&group1);

    let pooled_sd = (((n0 - 1) as f64 * sd0 * sd0 + (n1 - 1) as f64 * sd1 * sd1)
        / (n0 + n1 - 2) as f64)
        .sqrt();
    if pooled_sd < 1e-300 {
        return Err(Error::ZeroVariance {
            variable: "Y".to_string(),
        });
    }

    let nf = n as f64;
    let r_pb = ((mean1 - mean0) / pooled_sd) * ((n0 * n1) as f64 / (nf * (nf - 1.0))).sqrt();

    let steps = vec![
        Step::series("group 0 (X = 0)", group0),
        Step::series("group 1 (X = 1)", group1),
        Step::scalar("mean(group 0)", mean0),
        Step::scalar("mean(group 1)", mean1),
        Step::scalar("pooled sd", pooled_sd),
        Step::scalar("r_pb", r_pb),
    ];

    Ok(CorrelationResult {
        kind: CorrelationKind::PointBiserial,
        value: r_pb,
        n,
        variables: vec!["X".to_string(), "Y".to_string()],
        extra: None,
        steps,
    })
}

// ---------------------------------------------------------------------------
// Cramér's V
// ---------------------------------------------------------------------------

/// Cramér's V association strength between two categorical variables.
///
/// # Algorithm
///
/// Builds the contingency table, accumulates χ² = Σ (O − E)²/E with
/// E = row total × column total / grand total, then
/// V = √(χ² / (n(k − 1))) with k = min(row categories, col categories).
///
/// The χ² statistic and df = (rows − 1)(cols − 1) are returned in
/// [`CorrelationResult::extra`] for downstream testing.
///
/// # Returns
///
/// [`Error::SingleCategory`] when either variable has a single distinct
/// value (k = 1 makes V undefined).
///
/// # Examples
///
/// ```
/// use corrstat::correlation::cramers_v;
///
/// let a = ["A", "A", "B", "B"];
/// let b = ["X", "X", "Y", "Y"];
/// let result = cramers_v(&a, &b).unwrap();
/// assert!((result.value - 1.0).abs() < 1e-12);
/// assert_eq!(result.extra.unwrap().df, 1);
/// ```
pub fn cramers_v<S: AsRef<str>>(a: &[S], b: &[S]) -> Result<CorrelationResult> {
    let n = a.len();
    if n != b.len() {
        return Err(Error::LengthMismatch);
    }
    if n < 3 {
        return Err(Error::SampleTooSmall { n });
    }

    let table = ContingencyTable::from_labels(a, b);
    let k = table.rows().min(table.cols());
    if k < 2 {
        return Err(Error::SingleCategory);
    }

    let mut chi_square = 0.0;
    for i in 0..table.rows() {
        for j in 0..table.cols() {
            let observed = table.count(i, j) as f64;
            let expected = table.expected(i, j);
            chi_square += (observed - expected) * (observed - expected) / expected;
        }
    }

    let nf = n as f64;
    let v = (chi_square / (nf * (k - 1) as f64)).sqrt();
    let df = (table.rows() - 1) * (table.cols() - 1);

    let steps = vec![
        Step::scalar("χ²", chi_square),
        Step::scalar("k", k as f64),
        Step::scalar("df", df as f64),
        Step::scalar("V", v),
    ];

    Ok(CorrelationResult {
        kind: CorrelationKind::CramersV,
        value: v,
        n,
        variables: vec!["Variable 1".to_string(), "Variable 2".to_string()],
        extra: Some(ChiSquareInfo { chi_square, df }),
        steps,
    })
}

// ---------------------------------------------------------------------------
// Kendall
// ---------------------------------------------------------------------------

/// Kendall's τ rank correlation (τ-a normalization).
///
/// # Algorithm
///
/// Every unordered pair is classified by sign(xⱼ − xᵢ)·sign(yⱼ − yᵢ):
/// positive → concordant, negative → discordant, zero → tie, excluded
/// from both counts. τ = (C − D) / (½·n(n − 1)).
///
/// The denominator deliberately does not subtract ties (τ-a, not τ-b),
/// so τ is biased toward 0 in the presence of ties.
///
/// # Complexity
///
/// O(n²) pair enumeration.
///
/// # Examples
///
/// ```
/// use corrstat::correlation::kendall_tau;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [5.0, 4.0, 3.0, 2.0, 1.0];
/// let result = kendall_tau(&x, &y).unwrap();
/// assert!((result.value + 1.0).abs() < 1e-12);
/// ```
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = check_pair(x, y)?;

    let mut concordant: i64 = 0;
    let mut discordant: i64 = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[j] - x[i];
            let dy = y[j] - y[i];
            if dx == 0.0 || dy == 0.0 {
                // Tied pair, excluded from both counts.
                continue;
            }
            if dx * dy > 0.0 {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let nf = n as f64;
    let tau = (concordant - discordant) as f64 / (0.5 * nf * (nf - 1.0));

    let steps = vec![
        Step::scalar("concordant pairs", concordant as f64),
        Step::scalar("discordant pairs", discordant as f64),
        Step::scalar("τ", tau),
    ];

    Ok(CorrelationResult {
        kind: CorrelationKind::Kendall,
        value: tau,
        n,
        variables: vec!["X".to_string(), "Y".to_string()],
        extra: None,
        steps,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn check_pair(x: &[f64], y: &[f64]) -> Result<usize> {
    let n = x.len();
    if n != y.len() {
        return Err(Error::LengthMismatch);
    }
    if n < 3 {
        return Err(Error::SampleTooSmall { n });
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFinite);
    }
    Ok(n)
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population (divide-by-n) standard deviation.
fn population_sd(data: &[f64]) -> f64 {
    let m = mean(data);
    (data.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / data.len() as f64).sqrt()
}

/// Population (divide-by-n) covariance.
fn population_covariance(x: &[f64], y: &[f64]) -> f64 {
    let mx = mean(x);
    let my = mean(y);
    x.iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - mx) * (b - my))
        .sum::<f64>()
        / x.len() as f64
}
