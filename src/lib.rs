pub mod data;
pub mod error;
pub mod logger;
pub mod network;
pub mod routing;
pub mod sim;
pub mod spectrum;
pub mod topology;

pub use data::{Action, Request};
pub use error::{Error, Result};
pub use network::{NetworkState, SlotTable};
pub use routing::{Path, Routing, RoutingCache};
pub use spectrum::{AssignmentPolicy, EntropyMode};
pub use topology::TopologyKind;
