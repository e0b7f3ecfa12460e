use crate::application_port::RelationError;
use crate::domain::SocialNetwork;
use crate::domain_model::*;
use crate::domain_port::FriendManager;
use tracing::debug;

/// Mutable view of one member inside a network; the relationship engine.
///
/// Obtained from [`SocialNetwork::member_mut`], which checks the member exists.
/// Every operation validates all of its preconditions before the first write.
pub struct MemberMut<'a> {
    network: &'a mut SocialNetwork,
    id: MemberId,
}

impl<'a> MemberMut<'a> {
    pub(crate) fn new(network: &'a mut SocialNetwork, id: MemberId) -> Self {
        Self { network, id }
    }

    pub fn send_friend_request(&mut self, receiver: MemberId) -> Result<RequestId, RelationError> {
        if receiver == self.id {
            return Err(RelationError::SelfReference(self.id));
        }
        self.network.member_ref(receiver)?;
        let sender = self.network.member_ref(self.id)?;
        if sender.is_friend_of(receiver) {
            return Err(RelationError::AlreadyFriends(self.id, receiver));
        }
        let duplicate = sender
            .sent_requests()
            .iter()
            .filter_map(|id| self.network.request(*id))
            .any(|r| r.receiver() == receiver && r.is_pending());
        if duplicate {
            return Err(RelationError::DuplicateRequest {
                sender: self.id,
                receiver,
            });
        }

        let id = self.network.request_ids.next_request_id();
        self.network
            .record_request(FriendRequest::new(id, self.id, receiver));
        Ok(id)
    }

    pub fn accept_friend_request(&mut self, request: RequestId) -> Result<(), RelationError> {
        let sender = self.pending_sender(request)?;
        if self.network.member_ref(self.id)?.is_friend_of(sender) {
            return Err(RelationError::AlreadyFriends(self.id, sender));
        }

        self.resolve(request, RequestStatus::Accepted)?;
        self.network.link_friends(sender, self.id);
        Ok(())
    }

    pub fn decline_friend_request(&mut self, request: RequestId) -> Result<(), RelationError> {
        self.pending_sender(request)?;
        self.resolve(request, RequestStatus::Declined)
    }

    pub fn join_group(&mut self, group: GroupId) -> Result<(), RelationError> {
        self.network.group_mut(group)?.add_member(self.id)
    }

    pub fn leave_group(&mut self, group: GroupId) -> Result<(), RelationError> {
        if self.network.group_ref(group)?.owner() == self.id {
            return Err(RelationError::OwnerCannotLeave {
                member: self.id,
                group,
            });
        }
        self.network.group_mut(group)?.remove_member(self.id)
    }

    /// Checks that `request` was received by this member, is still pending,
    /// and comes from a member that still exists. Returns the sender.
    fn pending_sender(&self, request: RequestId) -> Result<MemberId, RelationError> {
        let me = self.network.member_ref(self.id)?;
        if !me.received_requests().contains(&request) {
            return Err(RelationError::RequestNotFound(request));
        }
        let pending = self
            .network
            .request(request)
            .ok_or(RelationError::RequestNotFound(request))?;
        if !pending.is_pending() {
            return Err(RelationError::AlreadyProcessed {
                request,
                status: pending.status(),
            });
        }
        let sender = pending.sender();
        self.network.member_ref(sender)?;
        Ok(sender)
    }

    fn resolve(&mut self, request: RequestId, status: RequestStatus) -> Result<(), RelationError> {
        self.network
            .requests
            .get_mut(&request)
            .ok_or(RelationError::RequestNotFound(request))?
            .resolve(status)?;
        debug!(request = %request, member = %self.id, %status, "request resolved");
        Ok(())
    }
}

impl FriendManager for MemberMut<'_> {
    fn add_friend(&mut self, friend: MemberId) -> Result<(), RelationError> {
        if friend == self.id {
            return Err(RelationError::SelfReference(self.id));
        }
        self.network.member_ref(friend)?;
        if self.network.member_ref(self.id)?.is_friend_of(friend) {
            return Err(RelationError::AlreadyFriends(self.id, friend));
        }
        self.network.link_friends(self.id, friend);
        Ok(())
    }

    fn remove_friend(&mut self, friend: MemberId) -> Result<(), RelationError> {
        if friend == self.id {
            return Err(RelationError::SelfReference(self.id));
        }
        if !self.network.member_ref(self.id)?.is_friend_of(friend) {
            return Err(RelationError::RelationshipNotFound {
                member: self.id,
                friend,
            });
        }
        self.network.unlink_friends(self.id, friend);
        Ok(())
    }

    fn friends(&self) -> Vec<MemberId> {
        self.network
            .member(self.id)
            .map(Member::friends)
            .unwrap_or_default()
    }
}
