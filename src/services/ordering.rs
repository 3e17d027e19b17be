// src/services/ordering.rs

//! Display ordering of members.

use crate::models::{MemberRecord, MemberStatus, OrderingPolicy};

impl OrderingPolicy {
    /// Whether a status belongs in the leading block.
    pub fn is_active(&self, status: &MemberStatus) -> bool {
        match self {
            OrderingPolicy::ActiveFirst => {
                matches!(status, MemberStatus::Active | MemberStatus::Applicant)
            }
            OrderingPolicy::NonInactiveFirst => !matches!(status, MemberStatus::Inactive),
        }
    }

    pub fn qualifies(&self, member: &MemberRecord) -> bool {
        self.is_active(&member.lifecycle())
    }
}

/// Stable partition: qualifying members first, then the rest, each block in
/// input order.
pub fn order_members(members: Vec<MemberRecord>, policy: OrderingPolicy) -> Vec<MemberRecord> {
    let (active, former): (Vec<_>, Vec<_>) =
        members.into_iter().partition(|m| policy.qualifies(m));
    log::debug!(
        "Ordered members: {} active, {} former ({:?})",
        active.len(),
        former.len(),
        policy
    );
    active.into_iter().chain(former).collect()
}
