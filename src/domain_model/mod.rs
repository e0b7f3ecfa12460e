mod friend;
mod group;
mod member;

pub use friend::*;
pub use group::*;
pub use member::*;
