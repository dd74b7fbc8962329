use messages::events::{ObservationEvent, TransactionDigest};
use std::convert::TryFrom;
use test_utils::record;

#[test]
fn parse_well_formed_record() {
    let event = ObservationEvent::try_from(record(7)).unwrap();
    assert_eq!(event.value, 7);
    assert_eq!(event.block, 7);
    assert_eq!(event.identity.digest, TransactionDigest([7; 32]));
    assert_eq!(event.identity.index, 0);
}

#[test]
fn parse_record_without_digest() {
    let mut partial = record(7);
    partial.digest = None;
    assert!(ObservationEvent::try_from(partial).is_err());
}

#[test]
fn parse_record_without_index() {
    let mut partial = record(7);
    partial.index = None;
    assert!(ObservationEvent::try_from(partial).is_err());
}
