use accesslog_types::*;

#[test]
fn test_every_non_alphanumeric_ascii_char_rejects_token() {
    for byte in 0u8..=127 {
        let c = byte as char;
        if c.is_ascii_alphanumeric() {
            continue;
        }

        for token in [format!("{}abc", c), format!("ab{}c", c), format!("abc{}", c)] {
            let err = validate_token(&token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidToken, "token {:?}", token);
        }
    }
}

#[test]
fn test_alphanumeric_tokens_accepted() {
    let alphabet: String = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
    assert!(validate_token(&alphabet).is_ok());

    for c in alphabet.chars() {
        assert!(validate_token(&c.to_string()).is_ok());
    }
}

#[test]
fn test_every_digit_in_name_is_distinguishable_from_space() {
    let space_msg = validate_name("Al ice").unwrap_err().to_string();

    for digit in '0'..='9' {
        let name = format!("Al{}ce", digit);
        let msg = validate_name(&name).unwrap_err().to_string();
        assert_ne!(msg, space_msg);
        assert!(msg.contains("digits"), "unexpected message: {}", msg);
    }
}

#[test]
fn test_record_serializes_without_whole_building_room() {
    let record = Record {
        timestamp: Timestamp::new(7).unwrap(),
        room: None,
        person: Person::guest("Bob"),
        event: Event::Departure,
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["timestamp"], 7);
    assert_eq!(json["person"]["role"], "guest");
    assert_eq!(json["event"], "departure");
    assert!(json.get("room").is_none());
}

#[test]
fn test_log_file_append_preserves_order() {
    let mut log = LogFile::new("secret");
    assert!(log.is_empty());

    for ts in [30u64, 10, 20] {
        log.append(Record {
            timestamp: Timestamp::new(ts).unwrap(),
            room: RoomId::new(1),
            person: Person::employee("Alice"),
            event: Event::Arrival,
        });
    }

    let order: Vec<u32> = log.records().iter().map(|r| r.timestamp.get()).collect();
    assert_eq!(order, vec![30, 10, 20]);
    assert_eq!(log.token(), "secret");
}
