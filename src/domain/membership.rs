use crate::application_port::RelationError;
use crate::domain::SocialNetwork;
use crate::domain_model::*;

/// Mutable view of one group inside a network; the group engine.
///
/// Membership is kept symmetric: the group's member list and each member's
/// group list change together. Ownership rules live on [`MemberMut::leave_group`].
///
/// [`MemberMut::leave_group`]: crate::domain::MemberMut::leave_group
pub struct GroupMut<'a> {
    network: &'a mut SocialNetwork,
    id: GroupId,
}

impl<'a> GroupMut<'a> {
    pub(crate) fn new(network: &'a mut SocialNetwork, id: GroupId) -> Self {
        Self { network, id }
    }

    pub fn members(&self) -> Vec<MemberId> {
        self.network
            .group(self.id)
            .map(|g| g.members().to_vec())
            .unwrap_or_default()
    }

    pub fn add_member(&mut self, member: MemberId) -> Result<(), RelationError> {
        self.network.member_ref(member)?;
        if self.network.group_ref(self.id)?.has_member(member) {
            return Err(RelationError::AlreadyMember {
                member,
                group: self.id,
            });
        }
        self.network.enroll(self.id, member);
        Ok(())
    }

    pub fn remove_member(&mut self, member: MemberId) -> Result<(), RelationError> {
        if !self.network.group_ref(self.id)?.has_member(member) {
            return Err(RelationError::NotAMember {
                member,
                group: self.id,
            });
        }
        self.network.withdraw(self.id, member);
        Ok(())
    }
}
