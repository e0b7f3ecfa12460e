#![allow(dead_code)]

use socialnet::domain::SocialNetwork;
use socialnet::domain_model::{MemberId, RequestStatus};
use std::collections::HashSet;

/// Panics with a description of the first broken graph invariant.
pub fn assert_consistent(net: &SocialNetwork) {
    for member in net.members() {
        let id = member.id();
        for edge in member.friendships() {
            assert_eq!(edge.member1, id, "edge stored on the wrong side");
            let other = net
                .member(edge.member2)
                .unwrap_or_else(|| panic!("{id} has a friend {} that is gone", edge.member2));
            let back = other
                .friendships()
                .iter()
                .filter(|e| e.member2 == id)
                .count();
            assert_eq!(back, 1, "{} should hold exactly one edge to {id}", edge.member2);
        }
        for group in member.groups() {
            let group = net
                .group(*group)
                .unwrap_or_else(|| panic!("{id} belongs to a deleted group"));
            assert!(group.has_member(id), "group {} misses {id}", group.id());
        }
        for request in member.sent_requests() {
            let request = net.request(*request).expect("sent request in arena");
            assert_eq!(request.sender(), id);
        }
        for request in member.received_requests() {
            let request = net.request(*request).expect("received request in arena");
            assert_eq!(request.receiver(), id);
        }

        let mut pending = HashSet::new();
        for request in member.sent_requests() {
            let request = net.request(*request).expect("sent request in arena");
            if request.status() == RequestStatus::Pending {
                assert!(
                    pending.insert(request.receiver()),
                    "{id} has two pending requests to {}",
                    request.receiver()
                );
            }
        }
    }

    for group in net.groups() {
        for member in group.members() {
            let member = net
                .member(*member)
                .unwrap_or_else(|| panic!("group {} lists a removed member", group.id()));
            assert!(member.belongs_to(group.id()));
        }
    }
}

/// Panics if anything in the network still mentions `gone`.
pub fn assert_no_trace_of(net: &SocialNetwork, gone: MemberId) {
    assert!(net.member(gone).is_none());
    for member in net.members() {
        assert!(!member.is_friend_of(gone), "{} still friends {gone}", member.id());
        for request in member.sent_requests().iter().chain(member.received_requests()) {
            let request = net.request(*request).expect("request in arena");
            assert_ne!(request.sender(), gone);
            assert_ne!(request.receiver(), gone);
        }
    }
    for group in net.groups() {
        assert_ne!(group.owner(), gone);
        assert!(!group.has_member(gone));
    }
}
