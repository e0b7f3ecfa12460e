use crate::domain_model::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One side of a friendship. Each participant stores its own copy with
/// `member1` naming itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendRelationship {
    pub member1: MemberId,
    pub member2: MemberId,
    pub since: DateTime<Utc>,
}

impl FriendRelationship {
    pub fn new(member1: MemberId, member2: MemberId, since: DateTime<Utc>) -> Self {
        Self {
            member1,
            member2,
            since,
        }
    }

    pub fn other(&self, member: MemberId) -> MemberId {
        if member == self.member1 {
            self.member2
        } else {
            self.member1
        }
    }
}

/// Lifecycle of a friend request: `Pending` moves to `Accepted` or `Declined`,
/// both of which are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Declined)
        )
    }

    pub fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Pending => vec![Self::Accepted, Self::Declined],
            Self::Accepted | Self::Declined => vec![],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }

    pub fn transition_to(&self, target: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a friend request from {from} to {to}")]
pub struct InvalidTransition {
    pub from: RequestStatus,
    pub to: RequestStatus,
}

/// A directed proposal of friendship. Stored once in the network; the sender
/// and receiver only keep its id.
#[derive(Debug, Clone)]
pub struct FriendRequest {
    id: RequestId,
    sender: MemberId,
    receiver: MemberId,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl FriendRequest {
    pub(crate) fn new(id: RequestId, sender: MemberId, receiver: MemberId) -> Self {
        Self {
            id,
            sender,
            receiver,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn sender(&self) -> MemberId {
        self.sender
    }

    pub fn receiver(&self) -> MemberId {
        self.receiver
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub(crate) fn resolve(&mut self, target: RequestStatus) -> Result<(), InvalidTransition> {
        self.status = self.status.transition_to(target)?;
        self.responded_at = Some(Utc::now());
        Ok(())
    }

    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            request_id: self.id,
            sender: self.sender,
            receiver: self.receiver,
            status: self.status,
            created_at: self.created_at,
            responded_at: self.responded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub request_id: RequestId,
    pub sender: MemberId,
    pub receiver: MemberId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}
