//! Pareto ranking for multi-objective runs.
//!
//! All objectives are minimized. Problems that want to maximize an objective
//! negate it in their fitness function.

use super::EvoRng;

/// True if `a` dominates `b`: no worse in every objective, strictly better
/// in at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sort.
///
/// Partitions `objectives` into fronts F0, F1, ... of indices. F0 holds every
/// point no other point dominates; each later front holds the points that
/// become non-dominated once all earlier fronts are removed. Indices within a
/// front are ascending. No empty front is returned.
pub fn fast_non_dominated_sort(objectives: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = objectives.len();
    // dominated[p]: points p dominates. counts[p]: points dominating p.
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut counts = vec![0usize; n];

    for p in 0..n {
        for q in (p + 1)..n {
            if dominates(&objectives[p], &objectives[q]) {
                dominated[p].push(q);
                counts[q] += 1;
            } else if dominates(&objectives[q], &objectives[p]) {
                dominated[q].push(p);
                counts[p] += 1;
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&p| counts[p] == 0).collect();

    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominated[p] {
                counts[q] -= 1;
                if counts[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Front rank of every point (0 for the Pareto front).
pub fn front_ranks(objectives: &[Vec<f64>]) -> Vec<usize> {
    let mut ranks = vec![0; objectives.len()];
    for (rank, front) in fast_non_dominated_sort(objectives).iter().enumerate() {
        for &i in front {
            ranks[i] = rank;
        }
    }
    ranks
}

/// Survivor pool for Pareto selection.
///
/// Starts from the whole first front and pads it with uniformly random
/// population indices (repeats allowed) until it holds `target` entries.
/// A front larger than `target` is kept whole.
pub fn pareto_survivors(
    front: &[usize],
    population_size: usize,
    target: usize,
    rng: &mut EvoRng,
) -> Vec<usize> {
    let mut pool = front.to_vec();
    if population_size == 0 {
        return pool;
    }
    while pool.len() < target {
        pool.push(rng.index(population_size));
    }
    pool
}
