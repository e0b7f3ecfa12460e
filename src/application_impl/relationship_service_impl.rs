use crate::application_port::{RelationError, RelationshipService};
use crate::domain::SocialNetwork;
use crate::domain_model::*;
use crate::domain_port::FriendManager;
use std::sync::Mutex;

/// Serves one network behind a single coarse lock. Each call holds the lock
/// for its whole duration, so callers on different threads see the
/// operations one at a time.
pub struct LockedRelationshipService {
    network: Mutex<SocialNetwork>,
}

impl LockedRelationshipService {
    pub fn new(network: SocialNetwork) -> LockedRelationshipService {
        LockedRelationshipService {
            network: Mutex::new(network),
        }
    }

    /// Runs `f` against the locked network. Rejections are logged at warn.
    fn with_network<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut SocialNetwork) -> Result<T, RelationError>,
    ) -> Result<T, RelationError> {
        let mut network = self
            .network
            .lock()
            .map_err(|e| RelationError::Store(e.to_string()))?;
        f(&mut *network).inspect_err(|e| tracing::warn!("{op}: {e}"))
    }

    fn summaries(network: &SocialNetwork, ids: &[MemberId]) -> Vec<MemberSummary> {
        ids.iter()
            .filter_map(|id| network.member(*id))
            .map(Member::summary)
            .collect()
    }
}

impl RelationshipService for LockedRelationshipService {
    fn register_member(&self, name: &str, email: &str) -> Result<MemberId, RelationError> {
        let id = self.with_network("register member", |net| net.register_member(name, email))?;
        tracing::info!(member = %id, name, "member registered");
        Ok(id)
    }

    fn remove_member(&self, member: MemberId) -> Result<MemberSummary, RelationError> {
        let removed = self.with_network("remove member", |net| net.remove_member(member))?;
        tracing::info!(%member, "member removed");
        Ok(removed.summary())
    }

    fn list_members(&self) -> Result<Vec<MemberSummary>, RelationError> {
        self.with_network("list members", |net| {
            Ok(net.members().map(Member::summary).collect())
        })
    }

    fn send_friend_request(
        &self,
        sender: MemberId,
        receiver: MemberId,
    ) -> Result<RequestId, RelationError> {
        let request = self.with_network("send friend request", |net| {
            net.member_mut(sender)?.send_friend_request(receiver)
        })?;
        tracing::info!(%request, %sender, %receiver, "friend request sent");
        Ok(request)
    }

    fn accept_friend_request(
        &self,
        receiver: MemberId,
        request: RequestId,
    ) -> Result<(), RelationError> {
        self.with_network("accept friend request", |net| {
            net.member_mut(receiver)?.accept_friend_request(request)
        })?;
        tracing::info!(%request, %receiver, "friend request accepted");
        Ok(())
    }

    fn decline_friend_request(
        &self,
        receiver: MemberId,
        request: RequestId,
    ) -> Result<(), RelationError> {
        self.with_network("decline friend request", |net| {
            net.member_mut(receiver)?.decline_friend_request(request)
        })?;
        tracing::info!(%request, %receiver, "friend request declined");
        Ok(())
    }

    fn list_pending_requests(
        &self,
        member: MemberId,
    ) -> Result<Vec<RequestSummary>, RelationError> {
        self.with_network("list pending requests", |net| {
            Ok(net
                .pending_requests(member)?
                .into_iter()
                .map(FriendRequest::summary)
                .collect())
        })
    }

    fn add_friend(&self, member: MemberId, friend: MemberId) -> Result<(), RelationError> {
        self.with_network("add friend", |net| net.member_mut(member)?.add_friend(friend))?;
        tracing::info!(%member, %friend, "friend added");
        Ok(())
    }

    fn remove_friend(&self, member: MemberId, friend: MemberId) -> Result<(), RelationError> {
        self.with_network("remove friend", |net| {
            net.member_mut(member)?.remove_friend(friend)
        })?;
        tracing::info!(%member, %friend, "friend removed");
        Ok(())
    }

    fn list_friends(&self, member: MemberId) -> Result<Vec<MemberSummary>, RelationError> {
        self.with_network("list friends", |net| {
            let friends = net.member_mut(member)?.friends();
            Ok(Self::summaries(net, &friends))
        })
    }

    fn create_group(&self, owner: MemberId, name: &str) -> Result<GroupId, RelationError> {
        let group = self.with_network("create group", |net| net.create_group(name, owner))?;
        tracing::info!(%group, %owner, name, "group created");
        Ok(group)
    }

    fn add_to_group(&self, group: GroupId, member: MemberId) -> Result<(), RelationError> {
        self.with_network("add to group", |net| net.group_mut(group)?.add_member(member))?;
        tracing::info!(%group, %member, "member added to group");
        Ok(())
    }

    fn remove_from_group(&self, group: GroupId, member: MemberId) -> Result<(), RelationError> {
        self.with_network("remove from group", |net| {
            net.group_mut(group)?.remove_member(member)
        })?;
        tracing::info!(%group, %member, "member removed from group");
        Ok(())
    }

    fn join_group(&self, member: MemberId, group: GroupId) -> Result<(), RelationError> {
        self.with_network("join group", |net| net.member_mut(member)?.join_group(group))?;
        tracing::info!(%group, %member, "member joined group");
        Ok(())
    }

    fn leave_group(&self, member: MemberId, group: GroupId) -> Result<(), RelationError> {
        self.with_network("leave group", |net| net.member_mut(member)?.leave_group(group))?;
        tracing::info!(%group, %member, "member left group");
        Ok(())
    }

    fn delete_group(&self, group: GroupId) -> Result<GroupSummary, RelationError> {
        let summary = self.with_network("delete group", |net| net.delete_group(group))?;
        tracing::info!(%group, "group deleted");
        Ok(summary)
    }

    fn list_groups(&self, member: MemberId) -> Result<Vec<GroupSummary>, RelationError> {
        self.with_network("list groups", |net| {
            let member = net.member_ref(member)?;
            Ok(member
                .groups()
                .iter()
                .filter_map(|id| net.group(*id))
                .map(Group::summary)
                .collect())
        })
    }

    fn list_group_members(&self, group: GroupId) -> Result<Vec<MemberSummary>, RelationError> {
        self.with_network("list group members", |net| {
            let group = net.group_ref(group)?;
            Ok(Self::summaries(net, group.members()))
        })
    }
}
