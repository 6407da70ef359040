//! Spectrum assignment: mapping a combined availability vector and a
//! required slot count to a start index, or to no assignment at all.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::Error;
use crate::network::NetworkState;
use crate::routing::Path;
use crate::spectrum::fragmentation::{edge_based_entropy, path_based_entropy};

/// Whether the entropy score is computed per link and summed, or on the
/// path's AND-combined availability vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyMode {
    Edge,
    Path,
}

/// Every start index `i` such that `[i, i + n)` is entirely free, ascending.
/// Runs longer than `n` contribute one index per admissible offset.
pub fn assignable_indices(slots: &[bool], n: usize) -> Vec<usize> {
    if n == 0 || n > slots.len() {
        return Vec::new();
    }

    let mut indices = Vec::new();
    let mut run = 0;

    for (i, &free) in slots.iter().enumerate() {
        if free {
            run += 1;
        } else {
            run = 0;
        }

        if run >= n {
            indices.push(i + 1 - n);
        }
    }

    indices
}

/// The smallest assignable index, or None when the request cannot fit.
pub fn first_fit(slots: &[bool], n_req_slot: usize) -> Option<usize> {
    assignable_indices(slots, n_req_slot).into_iter().next()
}

/// A uniformly chosen assignable index, drawn from the caller's seeded
/// generator so runs stay reproducible. None when the request cannot fit.
pub fn random(slots: &[bool], n_req_slot: usize, rng: &mut StdRng) -> Option<usize> {
    assignable_indices(slots, n_req_slot).choose(rng).copied()
}

/// The assignable index whose hypothetical reservation yields the smallest
/// fragmentation-entropy change; the first such index on ties. None when
/// nothing is assignable.
pub fn entropy(net: &NetworkState, path: &Path, n_req_slot: usize, mode: EntropyMode) -> Option<usize> {
    let deltas = match mode {
        EntropyMode::Edge => edge_based_entropy(net, path, n_req_slot),
        EntropyMode::Path => path_based_entropy(net, path, n_req_slot),
    };

    let (best_idx, best_delta) = deltas
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, &d)| if d < best.1 { (i, d) } else { best });

    if best_delta.is_finite() { Some(best_idx) } else { None }
}

/// Closed dispatch over the assignment algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentPolicy {
    FirstFit,
    Random,
    Entropy(EntropyMode),
}

impl AssignmentPolicy {
    /// Picks a start index for the path under this policy, or None when the
    /// request cannot fit on it.
    pub fn select(&self, net: &NetworkState, path: &Path, n_req_slot: usize, rng: &mut StdRng) -> Option<usize> {
        match self {
            AssignmentPolicy::FirstFit => first_fit(&net.path_slot(path), n_req_slot),
            AssignmentPolicy::Random => random(&net.path_slot(path), n_req_slot, rng),
            AssignmentPolicy::Entropy(mode) => entropy(net, path, n_req_slot, *mode),
        }
    }
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentPolicy::FirstFit => write!(f, "first-fit"),
            AssignmentPolicy::Random => write!(f, "random"),
            AssignmentPolicy::Entropy(EntropyMode::Edge) => write!(f, "entropy-edge"),
            AssignmentPolicy::Entropy(EntropyMode::Path) => write!(f, "entropy-path"),
        }
    }
}

impl FromStr for AssignmentPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-fit" | "ff" => Ok(AssignmentPolicy::FirstFit),
            "random" => Ok(AssignmentPolicy::Random),
            "entropy-edge" => Ok(AssignmentPolicy::Entropy(EntropyMode::Edge)),
            "entropy-path" => Ok(AssignmentPolicy::Entropy(EntropyMode::Path)),
            other => Err(Error::UnknownPolicy(other.to_string())),
        }
    }
}
