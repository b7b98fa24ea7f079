//! Contingency table construction.
//!
//! Cross-tabulates two categorical sequences into cell counts with row,
//! column, and grand totals. Categories keep first-seen order so a
//! rendered table is reproducible across runs.
//!
//! # Examples
//!
//! ```
//! use corrstat::contingency::ContingencyTable;
//!
//! let a = ["A", "A", "B", "B"];
//! let b = ["X", "Y", "X", "Y"];
//! let table = ContingencyTable::from_labels(&a, &b);
//! assert_eq!(table.grand_total(), 4);
//! assert_eq!(table.count(0, 0), 1);
//! ```

/// Cross-tabulation of two categorical variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    row_categories: Vec<String>,
    col_categories: Vec<String>,
    /// Row-major cell counts, `rows × cols`.
    counts: Vec<u64>,
    row_totals: Vec<u64>,
    col_totals: Vec<u64>,
    grand_total: u64,
}

impl ContingencyTable {
    /// Builds a contingency table from two parallel label sequences.
    ///
    /// Categories are the distinct values observed in each sequence, in
    /// first-seen order. Every cell is initialized to 0 before counting.
    /// Complexity O(n + |c1|·|c2|) for small category counts.
    ///
    /// Sequences of unequal length are a caller precondition violation;
    /// pairs beyond the shorter sequence are not counted.
    pub fn from_labels<S: AsRef<str>>(x: &[S], y: &[S]) -> Self {
        let row_categories = distinct(x);
        let col_categories = distinct(y);
        let rows = row_categories.len();
        let cols = col_categories.len();

        let mut counts = vec![0u64; rows * cols];
        for (a, b) in x.iter().zip(y.iter()) {
            let i = index_of(&row_categories, a.as_ref());
            let j = index_of(&col_categories, b.as_ref());
            counts[i * cols + j] += 1;
        }

        let row_totals: Vec<u64> = (0..rows)
            .map(|i| counts[i * cols..(i + 1) * cols].iter().sum())
            .collect();
        let col_totals: Vec<u64> = (0..cols)
            .map(|j| (0..rows).map(|i| counts[i * cols + j]).sum())
            .collect();
        let grand_total = row_totals.iter().sum();

        Self {
            row_categories,
            col_categories,
            counts,
            row_totals,
            col_totals,
            grand_total,
        }
    }

    /// Number of row categories.
    pub fn rows(&self) -> usize {
        self.row_categories.len()
    }

    /// Number of column categories.
    pub fn cols(&self) -> usize {
        self.col_categories.len()
    }

    /// Observed count for cell (i, j).
    pub fn count(&self, i: usize, j: usize) -> u64 {
        self.counts[i * self.cols() + j]
    }

    /// Expected count for cell (i, j) under independence:
    /// row total × column total / grand total.
    pub fn expected(&self, i: usize, j: usize) -> f64 {
        (self.row_totals[i] * self.col_totals[j]) as f64 / self.grand_total as f64
    }

    /// Row categories in first-seen order.
    pub fn row_categories(&self) -> &[String] {
        &self.row_categories
    }

    /// Column categories in first-seen order.
    pub fn col_categories(&self) -> &[String] {
        &self.col_categories
    }

    /// Marginal totals per row.
    pub fn row_totals(&self) -> &[u64] {
        &self.row_totals
    }

    /// Marginal totals per column.
    pub fn col_totals(&self) -> &[u64] {
        &self.col_totals
    }

    /// Total number of observations, n.
    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }
}

fn distinct<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for l in labels {
        let l = l.as_ref();
        if !out.iter().any(|seen| seen == l) {
            out.push(l.to_string());
        }
    }
    out
}

fn index_of(categories: &[String], label: &str) -> usize {
    categories
        .iter()
        .position(|c| c == label)
        .unwrap_or_default()
}
