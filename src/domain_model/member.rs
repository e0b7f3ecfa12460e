use crate::domain_model::{FriendRelationship, GroupId, RequestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(MemberId)
    }
}

/// A registered participant of the social graph.
///
/// The relationship collections are read-only outside the crate: every change
/// goes through the network engine, which updates both sides of an edge in
/// the same call.
#[derive(Debug, Clone)]
pub struct Member {
    id: MemberId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    is_active: bool,
    pub(crate) friendships: Vec<FriendRelationship>,
    pub(crate) sent_requests: Vec<RequestId>,
    pub(crate) received_requests: Vec<RequestId>,
    pub(crate) groups: Vec<GroupId>,
}

impl Member {
    /// Builds a detached member with no relationships yet.
    pub fn new(id: MemberId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
            is_active: true,
            friendships: Vec::new(),
            sent_requests: Vec::new(),
            received_requests: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn friendships(&self) -> &[FriendRelationship] {
        &self.friendships
    }

    pub fn sent_requests(&self) -> &[RequestId] {
        &self.sent_requests
    }

    pub fn received_requests(&self) -> &[RequestId] {
        &self.received_requests
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Distinct members on the other side of this member's relationships,
    /// in the order the friendships were made.
    pub fn friends(&self) -> Vec<MemberId> {
        let mut friends: Vec<MemberId> = Vec::with_capacity(self.friendships.len());
        for relationship in &self.friendships {
            let other = relationship.other(self.id);
            if !friends.contains(&other) {
                friends.push(other);
            }
        }
        friends
    }

    pub fn is_friend_of(&self, other: MemberId) -> bool {
        self.friendships.iter().any(|r| r.member2 == other)
    }

    pub fn belongs_to(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }

    pub fn summary(&self) -> MemberSummary {
        MemberSummary {
            member_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            registered_at: self.created_at,
        }
    }

    /// Drops every relationship reference; used once the member has left a network.
    pub(crate) fn detach(&mut self) {
        self.friendships.clear();
        self.sent_requests.clear();
        self.received_requests.clear();
        self.groups.clear();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}
