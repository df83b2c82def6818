use accesslog_core::decode;
use accesslog_testing::{TestWorld, fixtures};
use accesslog_types::{Event, Person};
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_batch_scenario() {
    let world = TestWorld::new();
    world
        .write_file(
            "cmds.txt",
            "-T 100 -K abc123 -E Alice -A file.log\n-T 200 -K abc123 -G Bob -L -R 5 file.log\n",
        )
        .unwrap();

    let result = world.run(&["batch", "cmds.txt"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let log = decode(&world.read_file("file.log").unwrap(), "abc123").unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.records()[0].person, Person::employee("Alice"));
    assert_eq!(log.records()[1].person, Person::guest("Bob"));
    assert_eq!(log.records()[1].event, Event::Departure);
    assert_eq!(log.records()[1].room.map(|r| r.get()), Some(5));
}

#[test]
fn test_batch_from_fixture_round_trips() {
    let world = TestWorld::new();
    let expected = fixtures::office_day("Secret1").unwrap();
    let log_path = world.path("office.log");
    world
        .write_file("day.txt", fixtures::batch_text(&expected, &log_path))
        .unwrap();

    let result = world.run(&["batch", "day.txt"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let log = decode(&world.read_file("office.log").unwrap(), "Secret1").unwrap();
    assert_eq!(log, expected);
}

#[test]
fn test_batch_continue_reports_each_failing_line() {
    let world = TestWorld::new();
    world
        .write_file(
            "cmds.txt",
            "-T 1 -K k -E Ann -A a.log\n\n-T 2 -K k -E Ann1 -A a.log\n-T 3 -K k -E Ann -L a.log\n-T 4 -K k -A a.log\n",
        )
        .unwrap();

    let mut cmd = cargo_bin_cmd!("accesslog");
    world.configure_command(&mut cmd).args(["batch", "cmds.txt"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("line 3: "))
        .stderr(predicate::str::contains("line 5: "))
        .stderr(predicate::str::contains("Error: 2 of 4 batch lines failed"));

    let log = decode(&world.read_file("a.log").unwrap(), "k").unwrap();
    assert_eq!(log.len(), 2);
}

#[test]
fn test_batch_abort_policy_from_config() {
    let world = TestWorld::new().with_config("[batch]\non_error = \"abort\"\n");
    world
        .write_file(
            "cmds.txt",
            "-T 1 -K k -E Ann -A a.log\n-T 2 -K k -E Ann -A -L a.log\n-T 3 -K k -E Ann -L a.log\n",
        )
        .unwrap();

    let result = world.run(&["batch", "cmds.txt"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("line 2: "));
    assert!(result.stderr().contains("1 skipped"));

    let log = decode(&world.read_file("a.log").unwrap(), "k").unwrap();
    assert_eq!(log.len(), 1);
}

#[test]
fn test_batch_missing_file() {
    let world = TestWorld::new();

    let result = world.run(&["batch", "nope.txt"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("failed to read batch file"));
}

#[test]
fn test_batch_rejects_binary_input() {
    let world = TestWorld::new();
    world.write_file("cmds.txt", b"-T 1 -K k\0 -E Ann -A a.log").unwrap();

    let result = world.run(&["batch", "cmds.txt"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Malformed batch"));
    assert!(!world.path("a.log").exists());
}
