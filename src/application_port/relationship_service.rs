use crate::domain_model::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("member id {0} already registered")]
    DuplicateIdentifier(MemberId),
    #[error("group name already taken: {0}")]
    DuplicateName(String),
    #[error("member name already taken: {0}")]
    DuplicateMemberName(String),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("member {0} cannot relate to itself")]
    SelfReference(MemberId),
    #[error("members {0} and {1} are already friends")]
    AlreadyFriends(MemberId, MemberId),
    #[error("a pending request from {sender} to {receiver} already exists")]
    DuplicateRequest { sender: MemberId, receiver: MemberId },
    #[error("request {request} already {status}")]
    AlreadyProcessed {
        request: RequestId,
        status: RequestStatus,
    },
    #[error("request {0} not found")]
    RequestNotFound(RequestId),
    #[error("member {member} is not friends with {friend}")]
    RelationshipNotFound { member: MemberId, friend: MemberId },
    #[error("member {member} already belongs to group {group}")]
    AlreadyMember { member: MemberId, group: GroupId },
    #[error("member {member} does not belong to group {group}")]
    NotAMember { member: MemberId, group: GroupId },
    #[error("member {member} owns group {group} and cannot leave it")]
    OwnerCannotLeave { member: MemberId, group: GroupId },
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    #[error("group {0} not found")]
    GroupNotFound(GroupId),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("store error: {0}")]
    Store(String),
}

/// Id-based facade over a social network. Every call is one atomic step:
/// it either applies in full or returns an error and changes nothing.
pub trait RelationshipService: Send + Sync {
    fn register_member(&self, name: &str, email: &str) -> Result<MemberId, RelationError>;
    fn remove_member(&self, member: MemberId) -> Result<MemberSummary, RelationError>;
    fn list_members(&self) -> Result<Vec<MemberSummary>, RelationError>;

    fn send_friend_request(
        &self,
        sender: MemberId,
        receiver: MemberId,
    ) -> Result<RequestId, RelationError>;
    fn accept_friend_request(
        &self,
        receiver: MemberId,
        request: RequestId,
    ) -> Result<(), RelationError>;
    fn decline_friend_request(
        &self,
        receiver: MemberId,
        request: RequestId,
    ) -> Result<(), RelationError>;
    fn list_pending_requests(
        &self,
        member: MemberId,
    ) -> Result<Vec<RequestSummary>, RelationError>;

    fn add_friend(&self, member: MemberId, friend: MemberId) -> Result<(), RelationError>;
    fn remove_friend(&self, member: MemberId, friend: MemberId) -> Result<(), RelationError>;
    fn list_friends(&self, member: MemberId) -> Result<Vec<MemberSummary>, RelationError>;

    fn create_group(&self, owner: MemberId, name: &str) -> Result<GroupId, RelationError>;
    fn add_to_group(&self, group: GroupId, member: MemberId) -> Result<(), RelationError>;
    fn remove_from_group(&self, group: GroupId, member: MemberId) -> Result<(), RelationError>;
    fn join_group(&self, member: MemberId, group: GroupId) -> Result<(), RelationError>;
    fn leave_group(&self, member: MemberId, group: GroupId) -> Result<(), RelationError>;
    fn delete_group(&self, group: GroupId) -> Result<GroupSummary, RelationError>;
    fn list_groups(&self, member: MemberId) -> Result<Vec<GroupSummary>, RelationError>;
    fn list_group_members(&self, group: GroupId) -> Result<Vec<MemberSummary>, RelationError>;
}
