use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::{Action, Request};
use crate::error::Result;
use crate::network::NetworkState;
use crate::routing::RoutingCache;
use crate::spectrum::assignment::{AssignmentPolicy, first_fit};
use crate::spectrum::fragmentation::{count_cut, count_misalignment, k_consecutive_available_slot};
use crate::spectrum::modulation::required_slots;

/// A decision-maker at the engine boundary: consumes a request plus the
/// current network state, produces an `Action` or blocks.
pub trait Agent {
    fn act(&mut self, net: &NetworkState, request: &Request) -> Result<Option<Action>>;
}

/// K-shortest-path agent: walks the cached candidate paths shortest first
/// and takes the first one where its assignment policy finds a fit.
///
/// Covers the KSP-FF, KSP-Random and KSP-Entropy family through the policy
/// parameter.
pub struct KspAgent {
    cache: RoutingCache,
    policy: AssignmentPolicy,
    guard: usize,
    rng: StdRng,
}

impl KspAgent {
    pub fn new(cache: RoutingCache, policy: AssignmentPolicy, guard: usize, seed: u64) -> Self {
        Self { cache, policy, guard, rng: StdRng::seed_from_u64(seed) }
    }
}

impl Agent for KspAgent {
    fn act(&mut self, net: &NetworkState, request: &Request) -> Result<Option<Action>> {
        let paths = self.cache.paths(request.source, request.destination);

        for path in paths {
            let path_len = net.distance(path)?;
            let n_req_slot = required_slots(request.bandwidth, path_len, self.guard);

            if let Some(slot_index) = self.policy.select(net, path, n_req_slot, &mut self.rng) {
                return Ok(Some(Action::new(path.clone(), slot_index, n_req_slot, request.duration)));
            }
        }

        Ok(None)
    }
}

/// Fragmentation-aware agent: among all candidate placements on all cached
/// paths, keep those with the fewest cut links, break ties by the smallest
/// misalignment change, and fall back to shortest-path first-fit when still
/// tied.
pub struct FragmentAwareAgent {
    cache: RoutingCache,
    guard: usize,
}

impl FragmentAwareAgent {
    pub fn new(cache: RoutingCache, guard: usize) -> Self {
        Self { cache, guard }
    }

    /// Candidate actions minimizing the cut count. Only run starts are
    /// considered as placements; interior offsets of a free run always cut.
    fn min_cut_candidates(&self, net: &NetworkState, request: &Request) -> Result<Vec<Action>> {
        let mut candidates: Vec<Action> = Vec::new();
        let mut min_n_cut = usize::MAX;

        for path in self.cache.paths(request.source, request.destination) {
            let path_slot = net.path_slot(path);
            let path_len = net.distance(path)?;
            let n_req_slot = required_slots(request.bandwidth, path_len, self.guard);

            let (_, start_indices, _) = k_consecutive_available_slot(&path_slot, n_req_slot);
            for start_idx in start_indices {
                let n_cut = count_cut(net, path, start_idx, n_req_slot);

                if n_cut < min_n_cut {
                    min_n_cut = n_cut;
                    candidates.clear();
                    candidates.push(Action::new(path.clone(), start_idx, n_req_slot, request.duration));
                } else if n_cut == min_n_cut {
                    candidates.push(Action::new(path.clone(), start_idx, n_req_slot, request.duration));
                }
            }
        }

        Ok(candidates)
    }

    /// The subset of `candidates` minimizing the misalignment change.
    fn min_misalignment(&self, net: &NetworkState, candidates: Vec<Action>) -> Vec<Action> {
        let mut best: Vec<Action> = Vec::new();
        let mut min_change = i64::MAX;

        for cand in candidates {
            let change = count_misalignment(net, &cand.path, cand.slot_index, cand.n_slot);

            if change < min_change {
                min_change = change;
                best.clear();
                best.push(cand);
            } else if change == min_change {
                best.push(cand);
            }
        }

        best
    }

    /// Shortest path, first fit.
    fn sp_ff(&self, net: &NetworkState, request: &Request) -> Result<Option<Action>> {
        let Some(path) = self.cache.paths(request.source, request.destination).first() else {
            return Ok(None);
        };

        let path_len = net.distance(path)?;
        let n_req_slot = required_slots(request.bandwidth, path_len, self.guard);

        match first_fit(&net.path_slot(path), n_req_slot) {
            Some(slot_index) => Ok(Some(Action::new(path.clone(), slot_index, n_req_slot, request.duration))),
            None => Ok(None),
        }
    }
}

impl Agent for FragmentAwareAgent {
    fn act(&mut self, net: &NetworkState, request: &Request) -> Result<Option<Action>> {
        let min_cut_candidates = self.min_cut_candidates(net, request)?;

        if min_cut_candidates.is_empty() {
            return Ok(None);
        }
        if min_cut_candidates.len() == 1 {
            return Ok(min_cut_candidates.into_iter().next());
        }

        let mut min_misalign_candidates = self.min_misalignment(net, min_cut_candidates);

        if min_misalign_candidates.len() == 1 {
            return Ok(min_misalign_candidates.pop());
        }

        self.sp_ff(net, request)
    }
}
