use super::*;

#[test]
fn decode_matching_log() {
    let log = LogEntry::observation_submitted(/* value */ 42, /* block */ 100);
    let event = log.decode(OBSERVATION_SUBMITTED).unwrap();
    assert_eq!(event.value, 42);
    assert_eq!(event.block, 100);
}

#[test]
fn decode_foreign_log() {
    let log = LogEntry {
        signature: "Transfer".to_string(),
        data: Vec::new(),
    };
    assert!(log.decode(OBSERVATION_SUBMITTED).is_err());
}

#[test]
fn decode_garbled_payload() {
    let log = LogEntry {
        signature: OBSERVATION_SUBMITTED.to_string(),
        data: vec![0xff],
    };
    assert!(log.decode(OBSERVATION_SUBMITTED).is_err());
}
