use std::fmt;

use crate::network::NodeId;

#[derive(Debug)]
pub enum Error {
    // Target slot range is already occupied on a link.
    Conflict { source: NodeId, target: NodeId, start: usize, end: usize },

    WeightsUnavailable(String),

    UnknownTopology(String),

    UnknownPolicy(String),

    UnknownLink(NodeId, NodeId),

    Snapshot(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Conflict { source, target, start, end } => write!(
                f,
                "Target slot range [{start}, {end}) is already occupied on link {source}-{target}"
            ),
            Error::WeightsUnavailable(name) => write!(
                f,
                "Topology '{name}' carries no physical lengths, weighted build is unavailable"
            ),
            Error::UnknownTopology(name) => write!(f, "Unknown topology name: '{name}'"),
            Error::UnknownPolicy(name) => write!(f, "Unknown assignment policy: '{name}'"),
            Error::UnknownLink(a, b) => write!(f, "Link {a}-{b} does not exist in the topology"),
            Error::Snapshot(e) => write!(f, "Failed to serialize or restore network snapshot: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Snapshot(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Snapshot(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
