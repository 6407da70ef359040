use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::network::{NetworkState, NodeId, canonical_pair};

/// An ordered walk from source to destination through adjacent nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn source(&self) -> NodeId {
        *self.nodes.first().expect("a path holds at least one node")
    }

    pub fn destination(&self) -> NodeId {
        *self.nodes.last().expect("a path holds at least one node")
    }

    pub fn n_hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive node pairs, canonicalized, so every link is addressed
    /// identically from both directions.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes.windows(2).map(|w| canonical_pair(w[0], w[1])).collect()
    }
}

/// Min-heap entry for the path search; ties fall to the smaller node id so
/// repeated searches of an unchanged topology stay stable.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn edge_cost(net: &NetworkState, a: NodeId, b: NodeId, is_weight: bool) -> f64 {
    if is_weight {
        let link = net.link_by_pair(a, b).expect("search only walks links of this topology");
        link.weight.expect("weighted search requires a weighted topology")
    } else {
        1.0
    }
}

fn path_cost(net: &NetworkState, nodes: &[NodeId], is_weight: bool) -> f64 {
    nodes.windows(2).map(|w| edge_cost(net, w[0], w[1], is_weight)).sum()
}

/// Dijkstra over the link adjacency, skipping banned nodes and links.
/// Returns the cheapest simple path and its cost, or None when `d` is
/// unreachable under the bans.
fn dijkstra(
    net: &NetworkState,
    s: NodeId,
    d: NodeId,
    is_weight: bool,
    banned_nodes: &HashSet<NodeId>,
    banned_links: &HashSet<(NodeId, NodeId)>,
) -> Option<(f64, Vec<NodeId>)> {
    let n = net.n_nodes();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    if banned_nodes.contains(&s) || banned_nodes.contains(&d) {
        return None;
    }

    dist[s] = 0.0;
    heap.push(HeapEntry { cost: 0.0, node: s });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if done[node] {
            continue;
        }
        done[node] = true;

        if node == d {
            break;
        }

        for &(neighbor, _) in net.neighbors(node) {
            if banned_nodes.contains(&neighbor) || banned_links.contains(&canonical_pair(node, neighbor)) {
                continue;
            }

            let next = cost + edge_cost(net, node, neighbor, is_weight);
            if next < dist[neighbor] {
                dist[neighbor] = next;
                prev[neighbor] = Some(node);
                heap.push(HeapEntry { cost: next, node: neighbor });
            }
        }
    }

    if !done[d] {
        return None;
    }

    let mut nodes = vec![d];
    while let Some(p) = prev[*nodes.last().expect("reconstruction starts non-empty")] {
        nodes.push(p);
    }
    nodes.reverse();

    Some((dist[d], nodes))
}

/// Routing algorithms over a `NetworkState`'s topology.
pub struct Routing;

impl Routing {
    /// The single cheapest path, by physical length when `is_weight`,
    /// otherwise by hop count. None when no path exists.
    pub fn shortest_path(net: &NetworkState, s: NodeId, d: NodeId, is_weight: bool) -> Option<Path> {
        if s == d {
            return None;
        }

        dijkstra(net, s, d, is_weight, &HashSet::new(), &HashSet::new()).map(|(_, nodes)| Path::new(nodes))
    }

    /// Up to `k` loopless paths in non-decreasing cost order (Yen's
    /// algorithm); the first element equals `shortest_path`. Fewer paths are
    /// returned when fewer simple paths exist, none when `d` is unreachable.
    pub fn k_shortest_paths(net: &NetworkState, s: NodeId, d: NodeId, k: usize, is_weight: bool) -> Vec<Path> {
        if k == 0 || s == d {
            return Vec::new();
        }

        let Some(first) = dijkstra(net, s, d, is_weight, &HashSet::new(), &HashSet::new()) else {
            log::debug!("NoPathFound: {} => {}", s, d);
            return Vec::new();
        };

        let mut found: Vec<(f64, Vec<NodeId>)> = vec![first];
        let mut candidates: Vec<(f64, Vec<NodeId>)> = Vec::new();

        while found.len() < k {
            let prev_nodes = found.last().expect("at least the shortest path was found").1.clone();

            for i in 0..prev_nodes.len() - 1 {
                let spur_node = prev_nodes[i];
                let root = &prev_nodes[..=i];

                // Links that would reproduce an already-found path from this root.
                let mut banned_links: HashSet<(NodeId, NodeId)> = HashSet::new();
                for (_, nodes) in &found {
                    if nodes.len() > i + 1 && nodes[..=i] == *root {
                        banned_links.insert(canonical_pair(nodes[i], nodes[i + 1]));
                    }
                }

                // Root nodes other than the spur must stay off the spur path.
                let banned_nodes: HashSet<NodeId> = root[..i].iter().copied().collect();

                if let Some((spur_cost, spur_nodes)) = dijkstra(net, spur_node, d, is_weight, &banned_nodes, &banned_links) {
                    let mut total_nodes = root[..i].to_vec();
                    total_nodes.extend(spur_nodes);
                    let total_cost = path_cost(net, &root[..=i], is_weight) + spur_cost;

                    let is_known = found.iter().any(|(_, nodes)| *nodes == total_nodes)
                        || candidates.iter().any(|(_, nodes)| *nodes == total_nodes);
                    if !is_known {
                        candidates.push((total_cost, total_nodes));
                    }
                }
            }

            if candidates.is_empty() {
                break;
            }

            candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            found.push(candidates.remove(0));
        }

        found.into_iter().map(|(_, nodes)| Path::new(nodes)).collect()
    }
}

/// Precomputed k-shortest paths per unordered node pair.
///
/// Built once against a topology and reused for its whole life; entries are
/// read-only afterwards and only occupancy changes during a run, never the
/// link set.
#[derive(Debug, Clone)]
pub struct RoutingCache {
    k: usize,
    table: HashMap<(NodeId, NodeId), Vec<Path>>,
}

impl RoutingCache {
    pub fn build(net: &NetworkState, k: usize) -> Self {
        let mut table = HashMap::new();

        for s in 0..net.n_nodes() {
            for d in (s + 1)..net.n_nodes() {
                table.insert((s, d), Routing::k_shortest_paths(net, s, d, k, net.is_weight()));
            }
        }

        log::debug!("RoutingCache ready: {} node pairs, k = {}", table.len(), k);

        Self { k, table }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Cached paths for the pair, shortest first; empty when unreachable.
    /// Lookup is symmetric in `s` and `d`.
    pub fn paths(&self, s: NodeId, d: NodeId) -> &[Path] {
        self.table.get(&canonical_pair(s, d)).map(Vec::as_slice).unwrap_or(&[])
    }
}
