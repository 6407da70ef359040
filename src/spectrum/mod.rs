pub mod assignment;
pub mod fragmentation;
pub mod modulation;

pub use assignment::{AssignmentPolicy, EntropyMode};
