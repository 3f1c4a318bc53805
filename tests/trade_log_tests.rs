use std::time::{SystemTime, UNIX_EPOCH};

use signal_deck::model::trade::{Trade, TradeSide};
use signal_deck::trade_log::TradeLog;

fn temp_log_path(test_name: &str) -> std::path::PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("sd-{}-{}", test_name, ts))
        .join("trades.json")
}

#[test]
/// Loading before anything was saved yields an empty log, not an error.
fn missing_file_loads_empty() {
    let log = TradeLog::open(&temp_log_path("missing"));
    assert!(log.load().expect("load should succeed").is_empty());
}

#[test]
/// append then load ends with the new trade and keeps earlier entries intact.
fn append_round_trip_preserves_prior_entries() {
    let log = TradeLog::open(&temp_log_path("roundtrip"));
    let first = Trade::new("Bitcoin", TradeSide::Buy, 0.25, 64000.0);
    let second = Trade::new("Solana", TradeSide::Sell, 12.0, 151.75);

    log.append(first.clone()).expect("first append");
    let returned = log.append(second.clone()).expect("second append");

    let loaded = log.load().expect("load should succeed");
    assert_eq!(loaded, returned);
    assert_eq!(loaded, vec![first, second]);
}

#[test]
/// The persisted file is a flat JSON array with coin/type/amount/price keys.
fn file_format_is_flat_json() {
    let path = temp_log_path("format");
    let log = TradeLog::open(&path);
    log.append(Trade::new("Ethereum", TradeSide::Buy, 1.5, 3200.0))
        .expect("append");

    let raw = std::fs::read_to_string(&path).expect("file exists");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let entry = &value.as_array().expect("array")[0];
    assert_eq!(entry["coin"], "Ethereum");
    assert_eq!(entry["type"], "BUY");
    assert_eq!(entry["amount"], 1.5);
    assert_eq!(entry["price"], 3200.0);
}

#[test]
/// A failed save reports an error and leaves the previous log untouched.
fn failed_write_keeps_previous_contents() {
    let path = temp_log_path("failed-write");
    let log = TradeLog::open(&path);
    let kept = Trade::new("Bitcoin", TradeSide::Buy, 1.0, 50000.0);
    log.append(kept.clone()).expect("initial append");

    // Block the temp file slot with a directory so the write cannot happen.
    let blocker = path.with_file_name("trades.json.tmp");
    std::fs::create_dir_all(&blocker).expect("create blocker");

    let err = log.append(Trade::new("Bitcoin", TradeSide::Sell, 1.0, 51000.0));
    assert!(err.is_err());
    assert_eq!(log.load().expect("load after failure"), vec![kept]);
}
