// Integration tests for file-backed transports registered through a logger.

use lineage::{FileTransportOptions, LogLevel, Logger, LoggerOptions};
use std::fs;
use tempfile::TempDir;

fn root_in(dir: &TempDir) -> Logger {
    let options = LoggerOptions::root("@acme/billing", "2.0.0");
    Logger::new(options.directory(dir.path())).unwrap()
}

#[test]
fn test_file_transport_writes_per_level_file() {
    let temp_dir = TempDir::new().unwrap();
    let logger = root_in(&temp_dir);
    logger.add_filter("card.number");
    logger
        .add_file_transport(LogLevel::Warn, FileTransportOptions::default())
        .unwrap();

    let child = logger.derive_child("invoices").unwrap();
    child.info("not written");
    child.error_with(
        "charge failed",
        serde_json::json!({"card": {"number": "4111111111111111"}})
            .as_object()
            .cloned()
            .unwrap(),
    );

    let path = temp_dir
        .path()
        .join("acme")
        .join("billing")
        .join("warn.log");
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "charge failed");
    assert_eq!(lines[0]["context"], serde_json::json!(["invoices"]));
    assert_eq!(lines[0]["details"]["card"]["number"], "[Filtered]");
    assert_eq!(lines[0]["package"]["name"], "@acme/billing");
}

#[test]
fn test_file_transport_custom_filename_and_rotation() {
    let temp_dir = TempDir::new().unwrap();
    let logger = root_in(&temp_dir);
    let path = temp_dir.path().join("custom.log");
    logger
        .add_file_transport(
            LogLevel::Silly,
            FileTransportOptions::default()
                .filename(&path)
                .max_file_size(64)
                .max_files(1),
        )
        .unwrap();

    logger.info("first");
    logger.info("second");
    logger.info("third");

    assert!(fs::read_to_string(&path).unwrap().contains("third"));
    let archived = temp_dir.path().join("custom.log.1");
    assert!(fs::read_to_string(archived).unwrap().contains("second"));
    assert!(!temp_dir.path().join("custom.log.2").exists());
}

#[test]
fn test_tail_transport() {
    let temp_dir = TempDir::new().unwrap();
    let logger = root_in(&temp_dir);
    logger.add_tail(LogLevel::Info).unwrap();

    let nightly = logger.derive_child(["jobs", "nightly"]).unwrap();
    nightly.warn("job slow");

    let tail = temp_dir.path().join("tail.acme-billing.log");
    let contents = fs::read_to_string(tail).unwrap();
    assert!(contents.contains("WARN: job slow [ jobs:nightly ]"));
}

#[test]
fn test_stream_transport_through_logger() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stream.jsonl");
    let logger = root_in(&temp_dir);
    logger.add_stream_transport(LogLevel::Debug, fs::File::create(&path).unwrap());

    logger.silly("hidden");
    logger.debug("shown");

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"message\":\"shown\""));
}

#[test]
fn test_from_config_registers_transports() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = format!(
        "package_name: svc\npackage_version: 1.0.0\ndirectory: {}\nfocus: jobs\nfilters: [secret]\ntransports:\n  tail: info\n  tracing: debug\n  file: [error]\n",
        temp_dir.path().display()
    );
    let config = lineage::ConfigLoader::load_from_str(&yaml).unwrap();
    let logger = Logger::from_config(&config).unwrap();

    assert_eq!(logger.core().transport_count(), 3);
    assert_eq!(logger.core().filter_count(), 1);
    assert_eq!(logger.focus(), Some("jobs".to_string()));

    logger.error("suppressed by focus");
    logger.derive_child("jobs").unwrap().error("kept");

    let error_log = temp_dir.path().join("svc").join("error.log");
    let errors = fs::read_to_string(error_log).unwrap();
    assert!(errors.contains("kept"));
    assert!(!errors.contains("suppressed by focus"));
}

#[test]
fn test_from_config_requires_package() {
    let config = lineage::LoggerConfig::default();
    assert!(matches!(
        Logger::from_config(&config),
        Err(lineage::LoggerError::Configuration)
    ));
}

#[test]
fn test_dropping_logger_with_hung_http_collector_returns_promptly() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    let logger = Logger::root("svc", "1.0").unwrap();
    logger
        .add_http_transport(
            LogLevel::Info,
            lineage::HttpTransportOptions::new(format!("http://{addr}/logs"))
                .timeout(Some(std::time::Duration::from_secs(30)))
                .shutdown_timeout(std::time::Duration::from_millis(250)),
        )
        .unwrap();
    for n in 0..3 {
        logger.info(format!("record {n}"));
    }

    let started = std::time::Instant::now();
    drop(logger);
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}
