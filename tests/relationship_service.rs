use socialnet::application_impl::LockedRelationshipService;
use socialnet::application_port::{RelationError, RelationshipService};
use socialnet::domain::SocialNetwork;
use socialnet::domain_model::*;
use std::sync::Arc;
use std::thread;

fn service() -> LockedRelationshipService {
    LockedRelationshipService::new(SocialNetwork::default())
}

#[test]
fn request_workflow_through_the_service() {
    let svc = service();
    let alice = svc.register_member("Alice", "alice@mail.com").unwrap();
    let bob = svc.register_member("Bob", "bob@mail.com").unwrap();

    let request = svc.send_friend_request(alice, bob).unwrap();
    let pending = svc.list_pending_requests(bob).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].request_id, request);
    assert_eq!(pending[0].sender, alice);
    assert_eq!(pending[0].status, RequestStatus::Pending);

    svc.accept_friend_request(bob, request).unwrap();

    let friends = svc.list_friends(alice).unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].member_id, bob);
    assert_eq!(friends[0].name, "Bob");
    assert!(svc.list_pending_requests(bob).unwrap().is_empty());
}

#[test]
fn failures_come_back_typed() {
    let svc = service();
    let alice = svc.register_member("Alice", "alice@mail.com").unwrap();

    assert_eq!(
        svc.register_member("alice", "x@mail.com"),
        Err(RelationError::DuplicateMemberName("alice".to_string()))
    );
    assert_eq!(
        svc.send_friend_request(alice, MemberId(9)),
        Err(RelationError::MemberNotFound(MemberId(9)))
    );
    assert_eq!(
        svc.accept_friend_request(alice, RequestId(1)),
        Err(RelationError::RequestNotFound(RequestId(1)))
    );
    assert_eq!(
        svc.list_group_members(GroupId(3)).unwrap_err(),
        RelationError::GroupNotFound(GroupId(3))
    );
}

#[test]
fn group_lifecycle_through_the_service() {
    let svc = service();
    let owner = svc.register_member("Owner", "owner@mail.com").unwrap();
    let guest = svc.register_member("Guest", "guest@mail.com").unwrap();

    let chess = svc.create_group(owner, "Chess").unwrap();
    svc.join_group(guest, chess).unwrap();
    let names: Vec<String> = svc
        .list_group_members(chess)
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Owner", "Guest"]);

    let groups = svc.list_groups(guest).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].owner, owner);
    assert_eq!(groups[0].member_count, 2);

    assert_eq!(
        svc.leave_group(owner, chess),
        Err(RelationError::OwnerCannotLeave {
            member: owner,
            group: chess
        })
    );
    svc.remove_from_group(chess, guest).unwrap();
    svc.add_to_group(chess, guest).unwrap();

    let deleted = svc.delete_group(chess).unwrap();
    assert_eq!(deleted.member_count, 2);
    assert!(svc.list_groups(guest).unwrap().is_empty());
}

#[test]
fn removing_a_member_returns_its_summary() {
    let svc = service();
    let alice = svc.register_member("Alice", "alice@mail.com").unwrap();
    let bob = svc.register_member("Bob", "bob@mail.com").unwrap();
    svc.add_friend(alice, bob).unwrap();

    let removed = svc.remove_member(bob).unwrap();

    assert_eq!(removed.member_id, bob);
    assert!(svc.list_friends(alice).unwrap().is_empty());
    assert_eq!(svc.list_members().unwrap().len(), 1);
    assert_eq!(
        svc.remove_friend(alice, bob),
        Err(RelationError::RelationshipNotFound {
            member: alice,
            friend: bob
        })
    );
}

#[test]
fn summaries_serialize_to_json() {
    let svc = service();
    let alice = svc.register_member("Alice", "alice@mail.com").unwrap();
    let bob = svc.register_member("Bob", "bob@mail.com").unwrap();
    svc.send_friend_request(alice, bob).unwrap();

    let pending = svc.list_pending_requests(bob).unwrap();
    let json = serde_json::to_value(&pending).unwrap();

    assert_eq!(json[0]["status"], "pending");
    assert_eq!(json[0]["sender"], alice.0);
    assert!(json[0]["responded_at"].is_null());
}

#[test]
fn concurrent_callers_see_one_consistent_graph() {
    let svc = Arc::new(service());
    let hub = svc.register_member("Hub", "hub@mail.com").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                let me = svc
                    .register_member(&format!("Spoke{i}"), &format!("spoke{i}@mail.com"))
                    .unwrap();
                let request = svc.send_friend_request(me, hub).unwrap();
                svc.accept_friend_request(hub, request).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(svc.list_friends(hub).unwrap().len(), 8);
    assert_eq!(svc.list_members().unwrap().len(), 9);
}
