//! Individual encodings and their variation operators.
//!
//! Building blocks for [`Problem`](super::Problem) implementations. They cover
//! fixed-length bit vectors, bounded integer vectors, permutations and real
//! vectors. Every operator borrows its inputs and returns a new individual,
//! so earlier generations are never aliased.

use std::collections::HashSet;

use crate::error::ProblemError;

use super::EvoRng;

// ============================================================================
// Generators
// ============================================================================

/// Random bit vector of `len` genes, each 0 or 1.
pub fn random_bits(len: usize, rng: &mut EvoRng) -> Vec<u8> {
    (0..len).map(|_| rng.index(2) as u8).collect()
}

/// Random integer vector with genes in `low..=high`.
pub fn random_ints(len: usize, low: i64, high: i64, rng: &mut EvoRng) -> Vec<i64> {
    (0..len).map(|_| rng.int_in(low, high)).collect()
}

/// Random permutation of `0..n`.
pub fn random_permutation(n: usize, rng: &mut EvoRng) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut perm);
    perm
}

/// Random real vector with genes in `low..=high`.
pub fn random_reals(len: usize, low: f64, high: f64, rng: &mut EvoRng) -> Vec<f64> {
    (0..len).map(|_| rng.uniform(low, high)).collect()
}

// ============================================================================
// Crossover
// ============================================================================

/// One-point crossover: head of `a` up to a random cut, tail of `b` after it.
///
/// The cut lies strictly inside the vector so both parents contribute.
/// Vectors shorter than two genes are returned as a copy of `a`.
pub fn one_point_crossover<T: Clone>(
    a: &[T],
    b: &[T],
    rng: &mut EvoRng,
) -> Result<Vec<T>, ProblemError> {
    same_length(a, b)?;
    if a.len() < 2 {
        return Ok(a.to_vec());
    }
    let point = 1 + rng.index(a.len() - 1);
    Ok(a[..point].iter().chain(&b[point..]).cloned().collect())
}

/// Order crossover (OX) for permutations.
///
/// Copies a random slice of `a` into place, then fills the remaining slots
/// left to right with the genes of `b` in their original order.
pub fn order_crossover(
    a: &[usize],
    b: &[usize],
    rng: &mut EvoRng,
) -> Result<Vec<usize>, ProblemError> {
    same_length(a, b)?;
    let n = a.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let (mut start, mut end) = (rng.index(n), rng.index(n));
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let kept: HashSet<usize> = a[start..=end].iter().copied().collect();
    let mut filler = b.iter().copied().filter(|g| !kept.contains(g));

    let mut child = Vec::with_capacity(n);
    for (i, gene) in a.iter().enumerate() {
        if (start..=end).contains(&i) {
            child.push(*gene);
        } else {
            let next = filler.next().ok_or_else(|| {
                ProblemError::InvalidIndividual(
                    "parents are not permutations of the same set".to_string(),
                )
            })?;
            child.push(next);
        }
    }
    Ok(child)
}

/// Blend crossover: `alpha * a + (1 - alpha) * b` with one uniform `alpha`
/// drawn per child.
pub fn blend_crossover(a: &[f64], b: &[f64], rng: &mut EvoRng) -> Result<Vec<f64>, ProblemError> {
    same_length(a, b)?;
    let alpha = rng.unit();
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| alpha * x + (1.0 - alpha) * y)
        .collect())
}

// ============================================================================
// Mutation
// ============================================================================

/// Flip each bit with probability `rate`.
pub fn flip_bits(genes: &[u8], rate: f64, rng: &mut EvoRng) -> Vec<u8> {
    genes
        .iter()
        .map(|&bit| if rng.chance(rate) { bit ^ 1 } else { bit })
        .collect()
}

/// Replace each gene with a fresh draw from `low..=high` with probability `rate`.
pub fn reset_genes(genes: &[i64], rate: f64, low: i64, high: i64, rng: &mut EvoRng) -> Vec<i64> {
    genes
        .iter()
        .map(|&g| if rng.chance(rate) { rng.int_in(low, high) } else { g })
        .collect()
}

/// For each position, with probability `rate`, swap it with a random position.
pub fn swap_mutation(perm: &[usize], rate: f64, rng: &mut EvoRng) -> Vec<usize> {
    let mut child = perm.to_vec();
    for i in 0..child.len() {
        if rng.chance(rate) {
            let j = rng.index(child.len());
            child.swap(i, j);
        }
    }
    child
}

/// Add gaussian noise `N(0, sigma)` to each gene with probability `rate`,
/// clamping the result into `bounds` when given.
pub fn gaussian_perturb(
    genes: &[f64],
    rate: f64,
    sigma: f64,
    bounds: Option<(f64, f64)>,
    rng: &mut EvoRng,
) -> Vec<f64> {
    genes
        .iter()
        .map(|&g| {
            let value = if rng.chance(rate) {
                g + rng.gaussian(0.0, sigma)
            } else {
                g
            };
            match bounds {
                Some((low, high)) => value.clamp(low, high),
                None => value,
            }
        })
        .collect()
}

// ============================================================================
// Structural checks
// ============================================================================

fn same_length<T>(a: &[T], b: &[T]) -> Result<(), ProblemError> {
    if a.len() != b.len() {
        return Err(ProblemError::InvalidIndividual(format!(
            "parent lengths differ ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Fail unless `len == expected`.
pub fn check_length(len: usize, expected: usize) -> Result<(), ProblemError> {
    if len != expected {
        return Err(ProblemError::InvalidIndividual(format!(
            "expected {expected} genes, found {len}"
        )));
    }
    Ok(())
}

/// Fail unless every gene lies in `low..=high`.
pub fn check_bounds<T: PartialOrd + Copy + std::fmt::Display>(
    genes: &[T],
    low: T,
    high: T,
) -> Result<(), ProblemError> {
    match genes.iter().find(|g| **g < low || **g > high) {
        Some(g) => Err(ProblemError::InvalidIndividual(format!(
            "gene {g} outside [{low}, {high}]"
        ))),
        None => Ok(()),
    }
}

/// True if `perm` contains every index in `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &g in perm {
        if g >= n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}

/// Fail unless `perm` is a permutation of `0..n`.
pub fn check_permutation(perm: &[usize], n: usize) -> Result<(), ProblemError> {
    if is_permutation(perm, n) {
        Ok(())
    } else {
        Err(ProblemError::InvalidIndividual(format!(
            "not a permutation of 0..{n}: {perm:?}"
        )))
    }
}
