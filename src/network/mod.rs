mod slot_table;

pub use slot_table::SlotTable;

use bimap::BiMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::error::{Error, Result};
use crate::routing::Path;
use crate::topology::TopologyKind;

pub type NodeId = usize;

new_key_type! {
    /// Index of one fiber link in the network's link store.
    pub struct LinkId;
}

/// Orders an endpoint pair so that the same undirected link is addressed
/// identically from both directions.
pub fn canonical_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// One undirected fiber link: canonical endpoints, optional physical length
/// and the spectrum state of its single fiber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiberLink {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Option<f64>,
    pub table: SlotTable,
}

/// The network resource engine state: an immutable topology plus one
/// `SlotTable` per link, mutated only through this type's API.
///
/// Links are keyed by `LinkId`; the canonical endpoint pair resolves to its
/// key through an index built once at construction. The index and the
/// per-node adjacency are derived data and are rebuilt after `restore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkState {
    kind: TopologyKind,
    n_nodes: usize,
    n_slot: usize,
    is_weight: bool,
    links: SlotMap<LinkId, FiberLink>,

    #[serde(skip)]
    link_index: BiMap<(NodeId, NodeId), LinkId>,

    #[serde(skip)]
    adjacency: Vec<Vec<(NodeId, LinkId)>>,
}

impl NetworkState {
    /// Instantiates a topology with `n_slot` frequency slots per link.
    ///
    /// With `is_weight` the links carry their published physical lengths;
    /// topologies without published lengths reject a weighted build.
    pub fn build(kind: TopologyKind, n_slot: usize, is_weight: bool) -> Result<Self> {
        let n_nodes = kind.n_nodes();
        let mut links: SlotMap<LinkId, FiberLink> = SlotMap::with_key();

        if is_weight {
            let table = kind.weighted_edges().ok_or_else(|| Error::WeightsUnavailable(kind.name().to_string()))?;
            for &(a, b, weight) in table {
                let (source, target) = canonical_pair(a, b);
                links.insert(FiberLink { source, target, weight: Some(weight), table: SlotTable::new(n_slot) });
            }
        } else {
            for (a, b) in kind.edges() {
                let (source, target) = canonical_pair(a, b);
                links.insert(FiberLink { source, target, weight: None, table: SlotTable::new(n_slot) });
            }
        }

        let mut net = Self { kind, n_nodes, n_slot, is_weight, links, link_index: BiMap::new(), adjacency: Vec::new() };
        net.rebuild_index();
        net.check_connectivity();

        log::debug!("Built {} network: {} nodes, {} links, {} slots per link", net.name(), n_nodes, net.n_links(), n_slot);

        Ok(net)
    }

    /// Rebuilds the pair index and the adjacency from the link store.
    fn rebuild_index(&mut self) {
        self.link_index = BiMap::new();
        self.adjacency = vec![Vec::new(); self.n_nodes];

        for (id, link) in &self.links {
            self.link_index.insert((link.source, link.target), id);
            self.adjacency[link.source].push((link.target, id));
            self.adjacency[link.target].push((link.source, id));
        }

        // Deterministic neighbor order regardless of store iteration order.
        for neighbors in &mut self.adjacency {
            neighbors.sort_unstable_by_key(|&(node, _)| node);
        }
    }

    /// Every node must be reachable from every other; a partitioned table is
    /// a broken topology definition.
    fn check_connectivity(&self) {
        let mut uf = QuickUnionUf::<UnionBySize>::new(self.n_nodes);
        for link in self.links.values() {
            uf.union(link.source, link.target);
        }

        let root = uf.find(0);
        for node in 1..self.n_nodes {
            if uf.find(node) != root {
                log::error!("DisconnectedTopology: node {} is unreachable in topology '{}'", node, self.name());
            }
        }
    }

    /// Releases every slot on every link. Idempotent.
    pub fn init(&mut self) {
        for link in self.links.values_mut() {
            link.table.reset();
        }
    }

    pub fn kind(&self) -> TopologyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn n_slot(&self) -> usize {
        self.n_slot
    }

    pub fn n_links(&self) -> usize {
        self.links.len()
    }

    pub fn is_weight(&self) -> bool {
        self.is_weight
    }

    pub fn link(&self, id: LinkId) -> &FiberLink {
        &self.links[id]
    }

    pub fn link_id(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        self.link_index.get_by_left(&canonical_pair(a, b)).copied()
    }

    pub fn link_by_pair(&self, a: NodeId, b: NodeId) -> Option<&FiberLink> {
        self.link_id(a, b).map(|id| &self.links[id])
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &FiberLink)> {
        self.links.iter()
    }

    /// Neighbors of `node` with the link leading to each, ordered by node id.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, LinkId)] {
        &self.adjacency[node]
    }

    /// Physical length of the path: the sum of its link lengths.
    pub fn distance(&self, path: &Path) -> Result<f64> {
        if !self.is_weight {
            return Err(Error::WeightsUnavailable(self.name().to_string()));
        }

        let mut total = 0.0;
        for (a, b) in path.edges() {
            let link = self.link_by_pair(a, b).ok_or(Error::UnknownLink(a, b))?;
            total += link.weight.expect("weighted network must carry a length on every link");
        }

        return Ok(total);
    }

    /// The end-to-end availability of the path: bitwise AND across the
    /// occupancy of all its links. A slot is usable only if free everywhere.
    pub fn path_slot(&self, path: &Path) -> Vec<bool> {
        let mut combined = vec![true; self.n_slot];

        for (a, b) in path.edges() {
            let link = self.link_by_pair(a, b).expect("path must only traverse links of this topology");
            for (bit, &free) in combined.iter_mut().zip(link.table.free_bits()) {
                *bit &= free;
            }
        }

        combined
    }

    /// Whether `[start_idx, start_idx + n_req_slot)` is free on every link of
    /// the path. A range exceeding the slot table is a normal negative
    /// result, not an error.
    pub fn is_assignable(&self, path: &Path, start_idx: usize, n_req_slot: usize) -> bool {
        if start_idx + n_req_slot > self.n_slot {
            return false;
        }

        path.edges().into_iter().all(|(a, b)| {
            let link = self.link_by_pair(a, b).expect("path must only traverse links of this topology");
            link.table.is_range_free(start_idx, n_req_slot)
        })
    }

    /// Reserves `[start_idx, start_idx + n_req_slot)` for `duration` time
    /// units on every link of the path.
    ///
    /// Callers must have checked `is_assignable` first; hitting an occupied
    /// slot here is a contract violation and fails with `Error::Conflict`
    /// without mutating any link.
    pub fn assign(&mut self, path: &Path, start_idx: usize, n_req_slot: usize, duration: f64) -> Result<()> {
        let edges = path.edges();

        for &(a, b) in &edges {
            let link = self.link_by_pair(a, b).expect("path must only traverse links of this topology");
            if !link.table.is_range_free(start_idx, n_req_slot) {
                log::error!(
                    "AssignmentConflict: slot range [{}, {}) on link {}-{} is already occupied",
                    start_idx,
                    start_idx + n_req_slot,
                    a,
                    b
                );
                return Err(Error::Conflict { source: a, target: b, start: start_idx, end: start_idx + n_req_slot });
            }
        }

        for &(a, b) in &edges {
            let id = self.link_id(a, b).expect("path must only traverse links of this topology");
            self.links[id].table.occupy(start_idx, n_req_slot, duration);
        }

        Ok(())
    }

    /// Advances simulation time on every link, releasing expired reservations.
    pub fn spend_time(&mut self, period: f64) {
        for link in self.links.values_mut() {
            link.table.spend_time(period);
        }
    }

    /// Occupied fraction over all (link, slot) cells of the whole topology.
    pub fn resource_util(&self) -> f64 {
        let total = self.links.len() * self.n_slot;
        if total == 0 {
            return 0.0;
        }

        let occupied: usize = self.links.values().map(|l| l.table.count_occupied()).sum();
        occupied as f64 / total as f64
    }

    /// Serializes topology, occupancy and remaining times to JSON.
    pub fn snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a snapshot, rebuilding the derived pair index and adjacency.
    pub fn restore(data: &str) -> Result<Self> {
        let mut net: NetworkState = serde_json::from_str(data)?;
        net.rebuild_index();
        Ok(net)
    }
}
