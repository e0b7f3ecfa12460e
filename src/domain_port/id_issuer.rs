use crate::domain_model::RequestId;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait RequestIdIssuer: Send + Sync {
    fn next_request_id(&self) -> RequestId;
}

/// Monotonic sequence starting at 1. Ids are never handed out twice, even
/// when the issuer is shared between networks.
#[derive(Debug)]
pub struct SequentialIdIssuer {
    next: AtomicU64,
}

impl SequentialIdIssuer {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestIdIssuer for SequentialIdIssuer {
    fn next_request_id(&self) -> RequestId {
        RequestId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
