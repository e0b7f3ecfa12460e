use crate::domain_model::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMemberRole {
    Owner,
    Member,
}

/// A named set of members. The owner is enrolled on creation and stays
/// first in `members` for the group's whole life.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    owner: MemberId,
    pub(crate) members: Vec<MemberId>,
    created_at: DateTime<Utc>,
}

impl Group {
    pub(crate) fn new(id: GroupId, name: impl Into<String>, owner: MemberId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            members: vec![owner],
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> MemberId {
        self.owner
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_member(&self, member: MemberId) -> bool {
        self.members.contains(&member)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn role_of(&self, member: MemberId) -> Option<GroupMemberRole> {
        if member == self.owner {
            Some(GroupMemberRole::Owner)
        } else if self.has_member(member) {
            Some(GroupMemberRole::Member)
        } else {
            None
        }
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            group_id: self.id,
            name: self.name.clone(),
            owner: self.owner,
            member_count: self.members.len(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group_id: GroupId,
    pub name: String,
    pub owner: MemberId,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}
