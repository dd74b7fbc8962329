use super::*;

#[test]
fn default_parameters() {
    let parameters = Parameters::default();
    assert_eq!(parameters.poll_interval, 2_000);
    assert_eq!(parameters.lookback, 10);
}

#[test]
fn import_export_parameters() {
    let path = ".test_parameters.json";
    let _ = fs::remove_file(path);

    let parameters = Parameters {
        poll_interval: 500,
        lookback: 25,
    };
    parameters.export(path).unwrap();

    let loaded = Parameters::import(path).unwrap();
    assert_eq!(loaded.poll_interval, 500);
    assert_eq!(loaded.lookback, 25);

    let _ = fs::remove_file(path);
}

#[test]
fn import_missing_file() {
    assert!(Parameters::import(".test_missing_parameters.json").is_err());
}
