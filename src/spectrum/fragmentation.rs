//! Fragmentation scoring over slot availability vectors: Shannon entropy of
//! the free-run distribution, free-run enumeration, and the cut and
//! misalignment counts used by fragmentation-aware assignment.

use crate::network::{NetworkState, canonical_pair};
use crate::routing::Path;
use crate::spectrum::assignment::assignable_indices;

/// The Shannon fragmentation entropy of an availability vector.
///
/// For each maximal run of consecutive free slots of length `l` in a vector
/// of length `L`, accumulates `(l/L) * ln(L/l)`. Both an all-occupied and an
/// all-free vector score 0; the score grows as free capacity scatters into
/// many small runs.
pub fn entropy(slots: &[bool]) -> f64 {
    let n_slot = slots.len() as f64;
    let (_, _, run_lens) = k_consecutive_available_slot(slots, 1);

    run_lens.iter().map(|&l| (l as f64 / n_slot) * (n_slot / l as f64).ln()).sum()
}

/// Enumerates every maximal run of at least `k` consecutive free slots,
/// left to right. Returns how many, where each starts, and each run's full
/// length (not capped at `k`).
pub fn k_consecutive_available_slot(slots: &[bool], k: usize) -> (usize, Vec<usize>, Vec<usize>) {
    let mut starts = Vec::new();
    let mut lens = Vec::new();

    let mut i = 0;
    while i < slots.len() {
        if slots[i] {
            let start = i;
            while i < slots.len() && slots[i] {
                i += 1;
            }
            if i - start >= k {
                starts.push(start);
                lens.push(i - start);
            }
        } else {
            i += 1;
        }
    }

    (starts.len(), starts, lens)
}

fn copy_and_occupy(slots: &[bool], start_idx: usize, n_req_slot: usize) -> Vec<bool> {
    let mut copy = slots.to_vec();
    for bit in &mut copy[start_idx..start_idx + n_req_slot] {
        *bit = false;
    }
    copy
}

/// Per-index entropy change of hypothetically reserving `n_req_slot` slots.
///
/// Non-assignable indices are pinned to `f64::INFINITY` so a minimizer skips
/// them; assignable indices carry `entropy(after) - entropy(before)`.
pub fn entropy_delta_vector(slots: &[bool], n_req_slot: usize) -> Vec<f64> {
    let mut deltas = vec![f64::INFINITY; slots.len()];
    let base = entropy(slots);

    for idx in assignable_indices(slots, n_req_slot) {
        deltas[idx] = entropy(&copy_and_occupy(slots, idx, n_req_slot)) - base;
    }

    deltas
}

/// Entropy deltas of the path's AND-combined availability vector.
pub fn path_based_entropy(net: &NetworkState, path: &Path, n_req_slot: usize) -> Vec<f64> {
    entropy_delta_vector(&net.path_slot(path), n_req_slot)
}

/// Entropy deltas summed link by link over the path.
///
/// Spectrum continuity acts per link, so fragmentation damage is scored on
/// each link's own occupancy rather than on the combined view; an index
/// unusable on any one link stays at infinity in the sum.
pub fn edge_based_entropy(net: &NetworkState, path: &Path, n_req_slot: usize) -> Vec<f64> {
    let mut total = vec![0.0; net.n_slot()];

    for (a, b) in path.edges() {
        let link = net.link_by_pair(a, b).expect("path must only traverse links of this topology");
        let deltas = entropy_delta_vector(link.table.free_bits(), n_req_slot);
        for (sum, delta) in total.iter_mut().zip(deltas) {
            *sum += delta;
        }
    }

    total
}

/// Whether reserving `[start_idx, start_idx + n_req_slot)` would split a free
/// run instead of consuming it from one of its ends: true when neither the
/// start nor the end of the range sits on an existing free-run boundary.
pub fn is_cut(slots: &[bool], start_idx: usize, n_req_slot: usize) -> bool {
    let end_idx = start_idx + n_req_slot - 1;
    debug_assert!(end_idx < slots.len());

    let (_, starts, lens) = k_consecutive_available_slot(slots, 1);
    let on_boundary = starts
        .iter()
        .zip(&lens)
        .any(|(&run_start, &run_len)| {
            let run_end = run_start + run_len - 1;
            start_idx == run_start || start_idx == run_end || end_idx == run_start || end_idx == run_end
        });

    !on_boundary
}

/// How many links of the path the candidate reservation would cut.
pub fn count_cut(net: &NetworkState, path: &Path, start_idx: usize, n_req_slot: usize) -> usize {
    path.edges()
        .into_iter()
        .filter(|&(a, b)| {
            let link = net.link_by_pair(a, b).expect("path must only traverse links of this topology");
            is_cut(link.table.free_bits(), start_idx, n_req_slot)
        })
        .count()
}

fn xor_count(a: &[bool], b: &[bool]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Change in bitwise difference between a link and one neighbor when the
/// link takes the candidate reservation. Positive means the patterns drift
/// apart.
pub fn misalignment(target: &[bool], neighbor: &[bool], start_idx: usize, n_req_slot: usize) -> i64 {
    let before = xor_count(target, neighbor);
    let after = xor_count(&copy_and_occupy(target, start_idx, n_req_slot), neighbor);
    after as i64 - before as i64
}

/// Total misalignment change of the candidate over every (path link,
/// adjacent off-path link) pair, enumerated from both endpoints of each path
/// link and summed, not averaged.
pub fn count_misalignment(net: &NetworkState, path: &Path, start_idx: usize, n_req_slot: usize) -> i64 {
    let edges = path.edges();

    let mut change = 0;
    for &(a, b) in &edges {
        let target = net.link_by_pair(a, b).expect("path must only traverse links of this topology");

        for node in [a, b] {
            for &(neighbor, link_id) in net.neighbors(node) {
                if edges.contains(&canonical_pair(node, neighbor)) {
                    continue;
                }

                let neighbor_bits = net.link(link_id).table.free_bits();
                change += misalignment(target.table.free_bits(), neighbor_bits, start_idx, n_req_slot);
            }
        }
    }

    change
}
