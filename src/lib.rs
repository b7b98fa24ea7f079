//! # corrstat
//!
//! Correlation and association statistics with hypothesis testing.
//!
//! This crate computes five correlation coefficients over paired data
//! and runs the matching significance test on each result. It is
//! domain-agnostic — inputs are raw `f64` series or string labels
//! without knowledge of any specific consumer domain.
//!
//! ## Modules
//!
//! - [`correlation`] — Coefficients (Pearson, Spearman, Point-Biserial, Cramér's V, Kendall) with step-by-step audit trails
//! - [`hypothesis`] — Significance tests (t-test, normal approximation, chi-square) at α = 0.05
//! - [`dataset`] — Named numeric and categorical input columns
//! - [`contingency`] — Cross-tabulation with marginal and expected counts
//! - [`rank`] — Mid-rank assignment for tied observations
//! - [`special`] — Distribution functions (log-gamma, incomplete beta/gamma, CDFs, critical tables)
//! - [`error`] — Input validation error taxonomy
//!
//! ## Design Philosophy
//!
//! - **Domain-agnostic**: No survey, finance, or lab-specific types
//! - **Transparent**: Every coefficient carries the intermediate quantities it was built from
//! - **Honest approximations**: Iterative routines report convergence instead of guessing

pub mod contingency;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod hypothesis;
pub mod rank;
pub mod special;
