mod tables;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::network::NodeId;

/// The set of physical topologies the engine can instantiate.
///
/// A closed enum instead of a name-keyed factory: the table data is fixed at
/// compile time and an unsupported name fails at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyKind {
    Nsf,
    Janet,
    Lattice3x3,
    Rnp,
}

impl TopologyKind {
    pub fn name(&self) -> &'static str {
        match self {
            TopologyKind::Nsf => "NSF",
            TopologyKind::Janet => "JANET",
            TopologyKind::Lattice3x3 => "LATTICE 3x3",
            TopologyKind::Rnp => "RNP",
        }
    }

    /// 2D node coordinates. Their count defines the node id range `0..n_nodes`.
    pub fn node_positions(&self) -> &'static [(f64, f64)] {
        match self {
            TopologyKind::Nsf => tables::NSF_POSITIONS,
            TopologyKind::Janet => tables::JANET_POSITIONS,
            TopologyKind::Lattice3x3 => tables::LATTICE3X3_POSITIONS,
            TopologyKind::Rnp => tables::RNP_POSITIONS,
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.node_positions().len()
    }

    /// Undirected edge list without lengths.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        match self {
            TopologyKind::Nsf => tables::NSF_WEIGHTED_EDGES.iter().map(|&(a, b, _)| (a, b)).collect(),
            TopologyKind::Janet => tables::JANET_EDGES.to_vec(),
            TopologyKind::Lattice3x3 => tables::LATTICE3X3_WEIGHTED_EDGES.iter().map(|&(a, b, _)| (a, b)).collect(),
            TopologyKind::Rnp => tables::RNP_EDGES.to_vec(),
        }
    }

    /// Undirected edge list with physical lengths, for the topologies whose
    /// literature table publishes them.
    pub fn weighted_edges(&self) -> Option<&'static [(NodeId, NodeId, f64)]> {
        match self {
            TopologyKind::Nsf => Some(tables::NSF_WEIGHTED_EDGES),
            TopologyKind::Lattice3x3 => Some(tables::LATTICE3X3_WEIGHTED_EDGES),
            TopologyKind::Janet | TopologyKind::Rnp => None,
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TopologyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nsf" => Ok(TopologyKind::Nsf),
            "janet" => Ok(TopologyKind::Janet),
            "lattice3x3" => Ok(TopologyKind::Lattice3x3),
            "rnp" => Ok(TopologyKind::Rnp),
            other => Err(Error::UnknownTopology(other.to_string())),
        }
    }
}
