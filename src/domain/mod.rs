mod membership;
mod network;
mod relationship;

pub use membership::*;
pub use network::*;
pub use relationship::*;
