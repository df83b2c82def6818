use accesslog_testing::{TestWorld, fixtures};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn office_world() -> TestWorld {
    let world = TestWorld::new();
    let log = fixtures::office_day("k3y").unwrap();
    fixtures::write_log(&world.path("office.log"), &log).unwrap();
    world
}

#[test]
fn test_read_state_plain() {
    let world = office_world();

    let mut cmd = cargo_bin_cmd!("accesslog");
    world
        .configure_command(&mut cmd)
        .args(["read", "-K", "k3y", "-S", "office.log"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("Alice,Carol\nBob\n5: Alice,Bob\n"));
}

#[test]
fn test_read_state_json() {
    let world = office_world();

    let result = world
        .run(&["read", "-K", "k3y", "-S", "--format", "json", "office.log"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_eq!(json["employees"], serde_json::json!(["Alice", "Carol"]));
    assert_eq!(json["guests"], serde_json::json!(["Bob"]));
    assert_eq!(json["rooms"][0]["room"], 5);
    assert_eq!(json["rooms"][0]["occupants"], serde_json::json!(["Alice", "Bob"]));
}

#[test]
fn test_read_room_history() {
    let world = office_world();

    let alice = world
        .run(&["read", "-K", "k3y", "-R", "-E", "Alice", "office.log"])
        .unwrap();
    assert!(alice.success(), "stderr: {}", alice.stderr());
    assert_eq!(alice.stdout(), "3,5\n");

    // Bob is a guest; as an employee he has no history.
    let bob = world
        .run(&["read", "-K", "k3y", "-R", "-E", "Bob", "office.log"])
        .unwrap();
    assert!(bob.success());
    assert_eq!(bob.stdout(), "\n");

    let json = world
        .run(&["read", "-K", "k3y", "-R", "-G", "Bob", "--format", "json", "office.log"])
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(json["person"]["name"], "Bob");
    assert_eq!(json["person"]["role"], "guest");
    assert_eq!(json["rooms"], serde_json::json!([5]));
}

#[test]
fn test_read_wrong_token() {
    let world = office_world();

    let mut cmd = cargo_bin_cmd!("accesslog");
    world
        .configure_command(&mut cmd)
        .args(["read", "-K", "other", "-S", "office.log"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Token does not match"));
}

#[test]
fn test_read_corrupt_log() {
    let world = TestWorld::new();
    world.write_file("bad.log", "STARTLOGk\n1#&Ann#>#\n").unwrap();

    let result = world.run(&["read", "-K", "k", "-S", "bad.log"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("missing end marker"));
}

#[test]
fn test_read_missing_log() {
    let world = TestWorld::new();

    let result = world.run(&["read", "-K", "k", "-S", "absent.log"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("does not exist"));
}

#[test]
fn test_read_query_selection() {
    let world = office_world();

    let neither = world.run(&["read", "-K", "k3y", "office.log"]).unwrap();
    assert!(!neither.success());

    let no_person = world.run(&["read", "-K", "k3y", "-R", "office.log"]).unwrap();
    assert!(!no_person.success());

    let both_people = world
        .run(&["read", "-K", "k3y", "-R", "-E", "Alice", "-G", "Bob", "office.log"])
        .unwrap();
    assert!(!both_people.success());
}
