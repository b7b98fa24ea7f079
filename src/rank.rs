//! Fractional ranking with tie averaging.
//!
//! Converts a numeric sequence into 1-based ranks where tied values
//! receive the mean of the rank positions they jointly occupy (the
//! mid-rank method). Used by Spearman's ρ.

/// Ranks data using the mid-rank method for ties.
///
/// # Algorithm
///
/// Sort indices by value ascending, scan runs of equal values, and
/// assign every member of a run the arithmetic mean of the 1-based
/// positions the run spans. For all-distinct input the ranks are the
/// usual order statistics.
///
/// The rank sum is always n(n+1)/2.
///
/// # Examples
///
/// ```
/// use corrstat::rank::rank;
///
/// let ranks = rank(&[10.0, 20.0, 20.0, 30.0]);
/// assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
/// ```
pub fn rank(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        data[a]
            .partial_cmp(&data[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Extend the run over all values tied with position i.
        let mut j = i + 1;
        while j < n && data[order[j]] == data[order[i]] {
            j += 1;
        }
        // Mean of the 1-based positions i+1..=j.
        let avg = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }

    ranks
}
