//! Culling and top-K ranking of a batch of results.

use std::collections::BinaryHeap;

use crate::result::SearchResult;

/// Weight of the best score when interpolating the cull threshold.
pub const CULL_FACTOR: f64 = 0.1;

/// The cull threshold never exceeds this score.
pub const CULL_CUTOFF: f64 = 30.0;

/// Outcome of [`sort_and_filter`].
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Ranked results, at most `max_results` long.
    pub results: Vec<SearchResult>,

    /// Threshold applied, `None` when the batch was empty.
    pub cull_threshold: Option<f64>,

    /// Results removed by culling.
    pub culled: usize,
}

/// Linear interpolation from `a` to `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Minimum score a result needs to survive culling.
///
/// Sits a tenth of the way from the mean score to the best score, capped at
/// [`CULL_CUTOFF`]. Returns `None` for an empty batch.
pub fn cull_threshold(results: &[SearchResult]) -> Option<f64> {
    let max_score = results.iter().map(SearchResult::score).max()?;
    let total: f64 = results.iter().map(|r| f64::from(r.score())).sum();
    let avg_score = total / results.len() as f64;

    Some(CULL_CUTOFF.min(lerp(avg_score, f64::from(max_score), CULL_FACTOR)))
}

/// Drops weak results, then ranks the rest and keeps the best `max_results`.
///
/// The ranking is score descending, then text length ascending, then text
/// ascending. When more than `max_results` survive culling only the best are
/// selected through a bounded heap instead of sorting the whole batch.
pub fn sort_and_filter(mut results: Vec<SearchResult>, max_results: usize) -> Reduction {
    let Some(threshold) = cull_threshold(&results) else {
        return Reduction {
            results,
            cull_threshold: None,
            culled: 0,
        };
    };

    let before = results.len();
    results.retain(|r| f64::from(r.score()) >= threshold);
    let culled = before - results.len();

    let results = if results.len() > max_results {
        top_k(results, max_results)
    } else {
        results.sort_unstable();
        results
    };

    Reduction {
        results,
        cull_threshold: Some(threshold),
        culled,
    }
}

/// Best `k` results in rank order.
fn top_k(results: Vec<SearchResult>, k: usize) -> Vec<SearchResult> {
    if k == 0 {
        return Vec::new();
    }

    // Worse results compare greater, so the heap top is the weakest kept result.
    let mut heap: BinaryHeap<SearchResult> = BinaryHeap::with_capacity(k + 1);
    for result in results {
        if heap.len() < k {
            heap.push(result);
        } else if heap.peek().is_some_and(|worst| result < *worst) {
            heap.pop();
            heap.push(result);
        }
    }

    heap.into_sorted_vec()
}
