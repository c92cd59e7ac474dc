//! Engine + file overflow log
//!
//! Capacity eviction, rotation and the shutdown drain against a real file.

use simplequeue_core::domain::StatsFormat;
use simplequeue_core::{CapacityLimits, Engine, EngineConfig};
use simplequeue_infra_fs::open_overflow_log;
use std::fs;
use std::path::Path;

fn engine_for(config: &EngineConfig) -> Engine {
    let log = open_overflow_log(config).unwrap();
    Engine::new(CapacityLimits::from(config), log)
}

fn put(engine: &mut Engine, queue: &str, data: &str) {
    engine.put(queue, Some(data.as_bytes().to_vec())).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_max_depth_overflow_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overflow.log");
    let config = EngineConfig::new(Some(path.clone()), 2, 0);
    let mut engine = engine_for(&config);

    put(&mut engine, "q", "A");
    put(&mut engine, "q", "B");
    put(&mut engine, "q", "C");

    let dumped: Vec<&[u8]> = engine.dump("q").collect();
    assert_eq!(dumped, vec![b"B".as_slice(), b"C".as_slice()]);
    assert_eq!(engine.global_stats().overflow, 1);

    engine.shutdown();
    assert_eq!(fs::read(&path).unwrap(), b"A\nB\nC\n".to_vec());
}

#[test]
fn test_shutdown_drains_every_queue_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overflow.log");
    let config = EngineConfig::new(Some(path.clone()), 0, 0);
    let mut engine = engine_for(&config);

    for i in 0..5 {
        put(&mut engine, "first", &format!("first-{}", i));
        put(&mut engine, "second", &format!("second-{}", i));
    }

    let report = engine.shutdown();
    assert_eq!(report.drained, 10);
    assert!(engine.queues().all(|q| q.depth() == 0));

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 10);
    for prefix in ["first", "second"] {
        let ordered: Vec<&String> = lines.iter().filter(|l| l.starts_with(prefix)).collect();
        let expected: Vec<String> = (0..5).map(|i| format!("{}-{}", prefix, i)).collect();
        assert_eq!(ordered, expected.iter().collect::<Vec<_>>());
    }
}

#[test]
fn test_rotation_writes_to_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overflow.log");
    let rotated = dir.path().join("overflow.log.1");
    let config = EngineConfig::new(Some(path.clone()), 1, 0);
    let mut engine = engine_for(&config);

    put(&mut engine, "q", "one");
    put(&mut engine, "q", "two");
    // Flush, then let an external tool move the file away
    assert!(engine.rotate_overflow_log().unwrap());
    fs::rename(&path, &rotated).unwrap();
    assert!(engine.rotate_overflow_log().unwrap());

    put(&mut engine, "q", "three");
    engine.shutdown();

    assert_eq!(read_lines(&rotated), vec!["one"]);
    assert_eq!(read_lines(&path), vec!["two", "three"]);
}

#[test]
fn test_rotation_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    let path = logs.join("overflow.log");
    let config = EngineConfig::new(Some(path.clone()), 0, 0);
    let mut engine = engine_for(&config);

    fs::remove_file(&path).unwrap();
    fs::remove_dir(&logs).unwrap();

    let err = engine.rotate_overflow_log().unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_byte_limit_without_log() {
    let config = EngineConfig::new(None, 0, 10);
    let mut engine = engine_for(&config);

    put(&mut engine, "q", "12345");
    put(&mut engine, "q", "67890");
    put(&mut engine, "q", "abc");

    let stats = engine.snapshot();
    assert_eq!(stats.global.bytes, 8);
    assert_eq!(stats.global.overflow, 1);
    assert_eq!(stats.queues["q"].depth, 2);

    let json = engine.stats(StatsFormat::Json, false).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["bytes"], 8);
}
