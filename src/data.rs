use serde::{Deserialize, Serialize};

use crate::network::NodeId;
use crate::routing::Path;

/// A connection request entering the engine.
///
/// `duration` is the holding time: reserved slots stay occupied for this
/// long from the moment of assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub source: NodeId,
    pub destination: NodeId,
    pub bandwidth: u32,
    pub duration: f64,
}

/// A fully resolved assignment decision, handed back to the caller.
///
/// The engine never commits an `Action` on its own; the caller decides
/// whether to apply it through `NetworkState::assign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub path: Path,
    pub slot_index: usize,
    pub n_slot: usize,
    pub duration: f64,
}

impl Action {
    pub fn new(path: Path, slot_index: usize, n_slot: usize, duration: f64) -> Self {
        Self { path, slot_index, n_slot, duration }
    }
}
