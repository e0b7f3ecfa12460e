use serde::Serialize;
use socialnet::application_impl::LockedRelationshipService;
use socialnet::application_port::{RelationError, RelationshipService};
use socialnet::domain::{NetworkPolicy, SocialNetwork};
use socialnet::logger::*;
use socialnet::settings::*;

fn print_json<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    println!("{label}:\n{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs a rejection the walkthrough provokes on purpose. Anything else is a real failure.
fn expect_rejection<T>(step: &str, result: Result<T, RelationError>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Err(anyhow::anyhow!("{step}: expected a rejection")),
        Err(e) => {
            warn!("{step}: rejected as expected: {e}");
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap()?;

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let policy = NetworkPolicy::from(project_settings.network);
    let service = LockedRelationshipService::new(SocialNetwork::with_policy(policy));

    // friendship workflow
    let alice = service.register_member("Alice", "alice@mail.com")?;
    let bob = service.register_member("Bob", "bob@mail.com")?;
    let carol = service.register_member("Carol", "carol@mail.com")?;
    expect_rejection(
        "register duplicate email",
        service.register_member("Alicia", "ALICE@mail.com"),
    )?;

    let request = service.send_friend_request(alice, bob)?;
    expect_rejection(
        "send duplicate request",
        service.send_friend_request(alice, bob),
    )?;
    print_json("pending for bob", &service.list_pending_requests(bob)?)?;
    service.accept_friend_request(bob, request)?;
    expect_rejection(
        "accept twice",
        service.accept_friend_request(bob, request),
    )?;
    print_json("friends of alice", &service.list_friends(alice)?)?;

    let declined = service.send_friend_request(carol, alice)?;
    service.decline_friend_request(alice, declined)?;
    let retry = service.send_friend_request(carol, alice)?;
    service.accept_friend_request(alice, retry)?;

    // groups
    let chess = service.create_group(alice, "Chess")?;
    service.join_group(bob, chess)?;
    service.join_group(carol, chess)?;
    expect_rejection("owner leaves", service.leave_group(alice, chess))?;
    service.leave_group(carol, chess)?;
    print_json("chess members", &service.list_group_members(chess)?)?;

    let club = service.create_group(bob, "Club")?;
    expect_rejection("add owner again", service.add_to_group(club, bob))?;
    expect_rejection("remove stranger", service.remove_from_group(club, carol))?;

    // cascade
    let removed = service.remove_member(bob)?;
    print_json("removed", &removed)?;
    print_json("friends of alice", &service.list_friends(alice)?)?;
    print_json("chess members", &service.list_group_members(chess)?)?;
    print_json("members", &service.list_members()?)?;

    info!("walkthrough finished");
    Ok(())
}
