//! Survivor selection for scalar-objective runs.

/// Chooses the survivor pool parents are drawn from.
pub trait SurvivorSelection {
    /// Pool size for a population of `population_size`.
    fn pool_size(&self, population_size: usize) -> usize;

    /// Pick survivors from `(individual, score)` pairs. Scores are maximized.
    fn select<I: Clone>(&self, scored: &[(I, f64)]) -> Vec<(I, f64)>;
}

/// Elitist truncation: the top half by fitness survives.
///
/// Survivors are returned best first. Equal scores keep population order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncationSelection;

impl TruncationSelection {
    /// Indices of the survivors, best first.
    pub fn ranked_indices(&self, scores: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Stable sort, so ties stay in population order.
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(self.pool_size(scores.len()));
        order
    }
}

impl SurvivorSelection for TruncationSelection {
    fn pool_size(&self, population_size: usize) -> usize {
        population_size / 2
    }

    fn select<I: Clone>(&self, scored: &[(I, f64)]) -> Vec<(I, f64)> {
        let scores: Vec<f64> = scored.iter().map(|(_, s)| *s).collect();
        self.ranked_indices(&scores)
            .into_iter()
            .map(|i| scored[i].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_top_half_descending() {
        let scored = vec![("a", 1.0), ("b", 4.0), ("c", 3.0), ("d", 2.0), ("e", 0.5)];
        let pool = TruncationSelection.select(&scored);
        assert_eq!(pool, vec![("b", 4.0), ("c", 3.0)]);
    }

    #[test]
    fn test_ties_keep_population_order() {
        let scored = vec![("a", 1.0), ("b", 2.0), ("c", 2.0), ("d", 2.0)];
        let pool = TruncationSelection.select(&scored);
        assert_eq!(pool, vec![("b", 2.0), ("c", 2.0)]);
    }

    #[test]
    fn test_pool_size_and_non_empty() {
        for n in 2..20 {
            let scored: Vec<(usize, f64)> = (0..n).map(|i| (i, (i * 7 % 5) as f64)).collect();
            let pool = TruncationSelection.select(&scored);
            assert_eq!(pool.len(), n / 2);
            assert!(!pool.is_empty());
        }
    }

    #[test]
    fn test_negative_infinity_ranks_last() {
        let scores = [f64::NEG_INFINITY, -1.0, 0.0, f64::NEG_INFINITY];
        assert_eq!(TruncationSelection.ranked_indices(&scores), vec![2, 1]);
    }
}
