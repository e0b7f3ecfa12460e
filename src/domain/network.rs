use crate::application_port::RelationError;
use crate::domain::{GroupMut, MemberMut};
use crate::domain_model::*;
use crate::domain_port::{RequestIdIssuer, SequentialIdIssuer};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Knobs for the behaviors the network does not hard-wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPolicy {
    /// Reject a second member with the same name or email, compared case-insensitively.
    pub unique_profiles: bool,
    /// Drop every request naming a removed member, from the arena and from the
    /// counterparts' request lists.
    pub purge_requests_on_removal: bool,
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self {
            unique_profiles: true,
            purge_requests_on_removal: true,
        }
    }
}

/// Aggregate root of the social graph.
///
/// Members and groups are stored by id. Friend requests live once in an
/// arena and are referenced by id from the sender's and the receiver's lists.
/// All edges are symmetric; every mutation that touches one side of an edge
/// touches the other side in the same call.
pub struct SocialNetwork {
    pub(crate) members: BTreeMap<MemberId, Member>,
    pub(crate) groups: BTreeMap<GroupId, Group>,
    pub(crate) requests: HashMap<RequestId, FriendRequest>,
    retired_members: BTreeSet<MemberId>,
    next_member_id: u64,
    next_group_id: u64,
    pub(crate) request_ids: Arc<dyn RequestIdIssuer>,
    policy: NetworkPolicy,
}

impl fmt::Debug for SocialNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialNetwork")
            .field("members", &self.members.len())
            .field("groups", &self.groups.len())
            .field("requests", &self.requests.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self::with_policy(NetworkPolicy::default())
    }
}

impl SocialNetwork {
    pub fn new(policy: NetworkPolicy, request_ids: Arc<dyn RequestIdIssuer>) -> Self {
        Self {
            members: BTreeMap::new(),
            groups: BTreeMap::new(),
            requests: HashMap::new(),
            retired_members: BTreeSet::new(),
            next_member_id: 1,
            next_group_id: 1,
            request_ids,
            policy,
        }
    }

    pub fn with_policy(policy: NetworkPolicy) -> Self {
        Self::new(policy, Arc::new(SequentialIdIssuer::new()))
    }

    pub fn policy(&self) -> NetworkPolicy {
        self.policy
    }

    // ---- members ----

    pub fn add_member(&mut self, mut member: Member) -> Result<MemberId, RelationError> {
        if member.name().trim().is_empty() {
            return Err(RelationError::InvalidArgument(
                "member name must not be blank".to_string(),
            ));
        }
        if member.email().trim().is_empty() {
            return Err(RelationError::InvalidArgument(
                "member email must not be blank".to_string(),
            ));
        }
        let id = member.id();
        if self.members.contains_key(&id) || self.retired_members.contains(&id) {
            return Err(RelationError::DuplicateIdentifier(id));
        }
        if self.policy.unique_profiles {
            if self.name_taken(member.name()) {
                return Err(RelationError::DuplicateMemberName(member.name().to_string()));
            }
            if self.email_taken(member.email()) {
                return Err(RelationError::DuplicateEmail(member.email().to_string()));
            }
        }

        member.detach();
        self.next_member_id = self.next_member_id.max(id.0.saturating_add(1));
        debug!(member = %id, name = member.name(), "member added");
        self.members.insert(id, member);
        Ok(id)
    }

    /// Allocates the next free member id and adds a new member under it.
    pub fn register_member(&mut self, name: &str, email: &str) -> Result<MemberId, RelationError> {
        let id = MemberId(self.next_member_id);
        self.add_member(Member::new(id, name, email))
    }

    /// Removes a member and every trace of it: group memberships (owned groups
    /// are deleted), friendships on both sides, and, when the policy says so,
    /// every request it sent or received. The id is retired and never accepted again.
    pub fn remove_member(&mut self, id: MemberId) -> Result<Member, RelationError> {
        let Some(mut member) = self.members.remove(&id) else {
            return Err(RelationError::MemberNotFound(id));
        };
        self.retired_members.insert(id);

        for group in member.groups() {
            let owned = self.groups.get(group).is_some_and(|g| g.owner() == id);
            if owned {
                self.discard_group(*group);
            } else {
                self.withdraw(*group, id);
            }
        }

        for friend in member.friends() {
            self.unlink_friends(id, friend);
        }

        if self.policy.purge_requests_on_removal {
            let requests = member.sent_requests().iter().chain(member.received_requests());
            for request in requests {
                self.purge_request(*request);
            }
        }

        member.detach();
        debug!(member = %id, "member removed");
        Ok(member)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn name_taken(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.members.values().any(|m| m.name().to_lowercase() == name)
    }

    pub fn email_taken(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.members
            .values()
            .any(|m| m.email().to_lowercase() == email)
    }

    pub fn member_mut(&mut self, id: MemberId) -> Result<MemberMut<'_>, RelationError> {
        self.member_ref(id)?;
        Ok(MemberMut::new(self, id))
    }

    // ---- groups ----

    pub fn create_group(&mut self, name: &str, owner: MemberId) -> Result<GroupId, RelationError> {
        if name.trim().is_empty() {
            return Err(RelationError::InvalidArgument(
                "group name must not be blank".to_string(),
            ));
        }
        self.member_ref(owner)?;
        if self.group_by_name(name).is_some() {
            return Err(RelationError::DuplicateName(name.to_string()));
        }

        let id = GroupId(self.next_group_id);
        self.next_group_id = self.next_group_id.saturating_add(1);
        self.groups.insert(id, Group::new(id, name, owner));
        if let Some(member) = self.members.get_mut(&owner) {
            member.groups.push(id);
        }
        debug!(group = %id, %owner, name, "group created");
        Ok(id)
    }

    /// Withdraws every member from the group, then discards it.
    pub fn delete_group(&mut self, id: GroupId) -> Result<GroupSummary, RelationError> {
        self.discard_group(id).ok_or(RelationError::GroupNotFound(id))
    }

    fn discard_group(&mut self, id: GroupId) -> Option<GroupSummary> {
        let group = self.groups.remove(&id)?;
        let summary = group.summary();
        for member in group.members() {
            if let Some(member) = self.members.get_mut(member) {
                member.groups.retain(|g| *g != id);
            }
        }
        debug!(group = %id, members = summary.member_count, "group deleted");
        Some(summary)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        let name = name.to_lowercase();
        self.groups
            .values()
            .find(|g| g.name().to_lowercase() == name)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Result<GroupMut<'_>, RelationError> {
        self.group_ref(id)?;
        Ok(GroupMut::new(self, id))
    }

    // ---- requests ----

    pub fn request(&self, id: RequestId) -> Option<&FriendRequest> {
        self.requests.get(&id)
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Requests the member received that are still waiting for an answer,
    /// oldest first.
    pub fn pending_requests(&self, member: MemberId) -> Result<Vec<&FriendRequest>, RelationError> {
        let member = self.member_ref(member)?;
        Ok(member
            .received_requests()
            .iter()
            .filter_map(|id| self.requests.get(id))
            .filter(|r| r.is_pending())
            .collect())
    }

    // ---- edge plumbing ----

    pub(crate) fn member_ref(&self, id: MemberId) -> Result<&Member, RelationError> {
        self.members
            .get(&id)
            .ok_or(RelationError::MemberNotFound(id))
    }

    pub(crate) fn group_ref(&self, id: GroupId) -> Result<&Group, RelationError> {
        self.groups.get(&id).ok_or(RelationError::GroupNotFound(id))
    }

    pub(crate) fn link_friends(&mut self, a: MemberId, b: MemberId) {
        let since = Utc::now();
        if let Some(member) = self.members.get_mut(&a) {
            member.friendships.push(FriendRelationship::new(a, b, since));
        }
        if let Some(member) = self.members.get_mut(&b) {
            member.friendships.push(FriendRelationship::new(b, a, since));
        }
        debug!(%a, %b, "friendship linked");
    }

    /// Drops the edge from `a`'s side, then the reciprocal copy if it is still there.
    pub(crate) fn unlink_friends(&mut self, a: MemberId, b: MemberId) {
        if let Some(member) = self.members.get_mut(&a) {
            member.friendships.retain(|r| r.member2 != b);
        }
        if let Some(member) = self.members.get_mut(&b) {
            member.friendships.retain(|r| r.member2 != a);
        }
        debug!(%a, %b, "friendship unlinked");
    }

    pub(crate) fn record_request(&mut self, request: FriendRequest) {
        let id = request.id();
        if let Some(sender) = self.members.get_mut(&request.sender()) {
            sender.sent_requests.push(id);
        }
        if let Some(receiver) = self.members.get_mut(&request.receiver()) {
            receiver.received_requests.push(id);
        }
        debug!(request = %id, sender = %request.sender(), receiver = %request.receiver(), "request recorded");
        self.requests.insert(id, request);
    }

    fn purge_request(&mut self, id: RequestId) {
        let Some(request) = self.requests.remove(&id) else {
            return;
        };
        for party in [request.sender(), request.receiver()] {
            if let Some(member) = self.members.get_mut(&party) {
                member.sent_requests.retain(|r| *r != id);
                member.received_requests.retain(|r| *r != id);
            }
        }
        debug!(request = %id, "request purged");
    }

    pub(crate) fn enroll(&mut self, group: GroupId, member: MemberId) {
        if let Some(g) = self.groups.get_mut(&group) {
            g.members.push(member);
        }
        if let Some(m) = self.members.get_mut(&member) {
            m.groups.push(group);
        }
        debug!(%group, %member, "member enrolled");
    }

    pub(crate) fn withdraw(&mut self, group: GroupId, member: MemberId) {
        if let Some(g) = self.groups.get_mut(&group) {
            g.members.retain(|m| *m != member);
        }
        if let Some(m) = self.members.get_mut(&member) {
            m.groups.retain(|g| *g != group);
        }
        debug!(%group, %member, "member withdrawn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> SocialNetwork {
        SocialNetwork::default()
    }

    #[test]
    fn register_allocates_sequential_ids() {
        let mut net = network();
        let alice = net.register_member("Alice", "alice@mail.com").unwrap();
        let bob = net.register_member("Bob", "bob@mail.com").unwrap();

        assert_eq!(alice, MemberId(1));
        assert_eq!(bob, MemberId(2));
        assert_eq!(net.member_count(), 2);
    }

    #[test]
    fn register_skips_past_explicit_ids() {
        let mut net = network();
        net.add_member(Member::new(MemberId(10), "Zed", "zed@mail.com"))
            .unwrap();

        assert_eq!(
            net.register_member("Amy", "amy@mail.com").unwrap(),
            MemberId(11)
        );
    }

    #[test]
    fn add_member_rejects_taken_id() {
        let mut net = network();
        net.add_member(Member::new(MemberId(1), "Alice", "a@mail.com"))
            .unwrap();

        let err = net
            .add_member(Member::new(MemberId(1), "Other", "o@mail.com"))
            .unwrap_err();
        assert_eq!(err, RelationError::DuplicateIdentifier(MemberId(1)));
        assert_eq!(net.member(MemberId(1)).unwrap().name(), "Alice");
    }

    #[test]
    fn add_member_rejects_blank_fields() {
        let mut net = network();
        assert!(matches!(
            net.register_member("  ", "a@mail.com"),
            Err(RelationError::InvalidArgument(_))
        ));
        assert!(matches!(
            net.register_member("Alice", ""),
            Err(RelationError::InvalidArgument(_))
        ));
        assert_eq!(net.member_count(), 0);
    }

    #[test]
    fn unique_profiles_compare_case_insensitively() {
        let mut net = network();
        net.register_member("Alice", "alice@mail.com").unwrap();

        assert_eq!(
            net.register_member("ALICE", "other@mail.com"),
            Err(RelationError::DuplicateMemberName("ALICE".to_string()))
        );
        assert_eq!(
            net.register_member("Alicia", "Alice@Mail.com"),
            Err(RelationError::DuplicateEmail("Alice@Mail.com".to_string()))
        );
    }

    #[test]
    fn profiles_may_repeat_when_policy_allows() {
        let mut net = SocialNetwork::with_policy(NetworkPolicy {
            unique_profiles: false,
            ..NetworkPolicy::default()
        });
        net.register_member("Alice", "alice@mail.com").unwrap();
        net.register_member("Alice", "alice@mail.com").unwrap();

        assert_eq!(net.member_count(), 2);
    }

    #[test]
    fn create_group_enrolls_owner_on_both_sides() {
        let mut net = network();
        let owner = net.register_member("Owner", "o@mail.com").unwrap();
        let chess = net.create_group("Chess", owner).unwrap();

        assert_eq!(chess, GroupId(1));
        assert_eq!(net.group(chess).unwrap().members(), &[owner]);
        assert_eq!(net.member(owner).unwrap().groups(), &[chess]);
    }

    #[test]
    fn create_group_validates_before_allocating() {
        let mut net = network();
        let owner = net.register_member("Owner", "o@mail.com").unwrap();

        assert!(matches!(
            net.create_group(" ", owner),
            Err(RelationError::InvalidArgument(_))
        ));
        assert_eq!(
            net.create_group("Chess", MemberId(99)),
            Err(RelationError::MemberNotFound(MemberId(99)))
        );
        net.create_group("Chess", owner).unwrap();
        assert_eq!(
            net.create_group("chess", owner),
            Err(RelationError::DuplicateName("chess".to_string()))
        );
        assert_eq!(net.group_count(), 1);
        assert_eq!(net.create_group("Go", owner).unwrap(), GroupId(2));
    }

    #[test]
    fn delete_group_clears_every_membership() {
        let mut net = network();
        let owner = net.register_member("Owner", "o@mail.com").unwrap();
        let guest = net.register_member("Guest", "g@mail.com").unwrap();
        let club = net.create_group("Club", owner).unwrap();
        net.enroll(club, guest);

        let summary = net.delete_group(club).unwrap();

        assert_eq!(summary.member_count, 2);
        assert!(net.group(club).is_none());
        assert!(net.member(owner).unwrap().groups().is_empty());
        assert!(net.member(guest).unwrap().groups().is_empty());
        assert_eq!(
            net.delete_group(club).unwrap_err(),
            RelationError::GroupNotFound(club)
        );
    }

    #[test]
    fn remove_member_deletes_owned_groups_and_leaves_joined_ones() {
        let mut net = network();
        let owner = net.register_member("Owner", "o@mail.com").unwrap();
        let guest = net.register_member("Guest", "g@mail.com").unwrap();
        let owned = net.create_group("Owned", owner).unwrap();
        let joined = net.create_group("Joined", guest).unwrap();
        net.enroll(owned, guest);
        net.enroll(joined, owner);

        net.remove_member(owner).unwrap();

        assert!(net.group(owned).is_none());
        assert_eq!(net.group(joined).unwrap().members(), &[guest]);
        assert_eq!(net.member(guest).unwrap().groups(), &[joined]);
    }

    #[test]
    fn remove_unknown_member_fails() {
        let mut net = network();
        assert_eq!(
            net.remove_member(MemberId(5)).unwrap_err(),
            RelationError::MemberNotFound(MemberId(5))
        );
    }

    #[test]
    fn purge_drops_requests_from_arena_and_counterparts() {
        let mut net = network();
        let alice = net.register_member("Alice", "a@mail.com").unwrap();
        let bob = net.register_member("Bob", "b@mail.com").unwrap();
        let request = FriendRequest::new(net.request_ids.next_request_id(), alice, bob);
        let id = request.id();
        net.record_request(request);

        net.remove_member(alice).unwrap();

        assert!(net.request(id).is_none());
        assert!(net.member(bob).unwrap().received_requests().is_empty());
    }

    #[test]
    fn stale_requests_survive_without_purge() {
        let mut net = SocialNetwork::with_policy(NetworkPolicy {
            purge_requests_on_removal: false,
            ..NetworkPolicy::default()
        });
        let alice = net.register_member("Alice", "a@mail.com").unwrap();
        let bob = net.register_member("Bob", "b@mail.com").unwrap();
        let request = FriendRequest::new(net.request_ids.next_request_id(), alice, bob);
        let id = request.id();
        net.record_request(request);

        net.remove_member(alice).unwrap();

        assert!(net.request(id).is_some());
        assert_eq!(net.member(bob).unwrap().received_requests(), &[id]);
    }

    #[test]
    fn removed_ids_cannot_be_registered_again() {
        let mut net = SocialNetwork::with_policy(NetworkPolicy {
            purge_requests_on_removal: false,
            ..NetworkPolicy::default()
        });
        let alice = net.register_member("Alice", "a@mail.com").unwrap();
        let bob = net.register_member("Bob", "b@mail.com").unwrap();
        net.member_mut(alice).unwrap().send_friend_request(bob).unwrap();
        net.remove_member(bob).unwrap();

        assert_eq!(
            net.add_member(Member::new(bob, "Robert", "r@mail.com"))
                .unwrap_err(),
            RelationError::DuplicateIdentifier(bob)
        );
        let robert = net.register_member("Robert", "r@mail.com").unwrap();
        assert_ne!(robert, bob);
        net.member_mut(alice)
            .unwrap()
            .send_friend_request(robert)
            .unwrap();
        assert_eq!(net.pending_requests(robert).unwrap().len(), 1);
    }

    #[test]
    fn handles_require_existing_targets() {
        let mut net = network();
        assert!(matches!(
            net.member_mut(MemberId(1)),
            Err(RelationError::MemberNotFound(MemberId(1)))
        ));
        assert!(matches!(
            net.group_mut(GroupId(1)),
            Err(RelationError::GroupNotFound(GroupId(1)))
        ));
    }
}
