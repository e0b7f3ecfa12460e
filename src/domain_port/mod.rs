mod friend_manager;
mod id_issuer;

pub use friend_manager::*;
pub use id_issuer::*;
