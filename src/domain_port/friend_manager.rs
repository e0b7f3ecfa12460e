use crate::application_port::RelationError;
use crate::domain_model::MemberId;

/// Direct friend management, bypassing the request workflow.
pub trait FriendManager {
    fn add_friend(&mut self, friend: MemberId) -> Result<(), RelationError>;
    fn remove_friend(&mut self, friend: MemberId) -> Result<(), RelationError>;
    fn friends(&self) -> Vec<MemberId>;
}
