//! Summary log file behavior

use learn_digest::model::ParsedLog;
use learn_digest::output::{encode_record, parse_log, LogError, SummaryLog};
use learn_digest::SummaryRecord;
use tempfile::TempDir;

fn record(n: usize, title: &str, text: &str) -> SummaryRecord {
    SummaryRecord {
        module_number: n,
        title: title.to_string(),
        url: format!("https://learn.test/training/modules/{}/", title.to_lowercase()),
        text: text.to_string(),
    }
}

#[test]
fn test_append_then_parse() {
    let dir = TempDir::new().unwrap();
    let log = SummaryLog::new(dir.path().join("summaries.txt"));

    log.append(&record(1, "Compute", "VMs\nContainers")).unwrap();
    log.append(&record(2, "Storage", "Blobs")).unwrap();

    let parsed = log.parse().unwrap();
    assert_eq!(parsed.total_modules, 2);
    assert_eq!(parsed.modules[0], record(1, "Compute", "VMs\nContainers"));
    assert_eq!(parsed.modules[1], record(2, "Storage", "Blobs"));
    assert_eq!(parsed.skipped_chunks, 0);
}

#[test]
fn test_reencoding_a_parsed_log_is_stable() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.txt");
    let log = SummaryLog::new(&first);
    log.append(&record(4, "Networking", "  indented line  \n\nVNets")).unwrap();
    log.append(&record(9, "Identity", "Entra ID")).unwrap();

    let parsed = parse_log(&first).unwrap();
    let reencoded: String = parsed.modules.iter().map(encode_record).collect();
    let second = dir.path().join("second.txt");
    std::fs::write(&second, &reencoded).unwrap();

    let reparsed: ParsedLog = parse_log(&second).unwrap();
    assert_eq!(reparsed, parsed);
    assert_eq!(reparsed.modules[0].module_number, 1);
    assert_eq!(reparsed.modules[0].text, "indented line\nVNets");
}

#[test]
fn test_hand_edited_log_keeps_good_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summaries.txt");
    let mut content = encode_record(&record(1, "Compute", "VMs"));
    content.push_str("=== Summary for Module 2: Broken ===\nno url line here\n\n");
    content.push_str(&encode_record(&record(3, "Storage", "Blobs")));
    std::fs::write(&path, content).unwrap();

    let parsed = parse_log(&path).unwrap();
    assert_eq!(parsed.total_modules, 2);
    assert_eq!(parsed.modules[1].title, "Storage");
    assert_eq!(parsed.modules[1].module_number, 2);
    assert_eq!(parsed.skipped_chunks, 1);
}

#[test]
fn test_missing_log() {
    let dir = TempDir::new().unwrap();
    let result = parse_log(&dir.path().join("summaries.txt"));

    match result {
        Err(err @ LogError::NotFound(_)) => {
            assert_eq!(err.to_string(), "summaries.txt file not found")
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_empty_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summaries.txt");
    std::fs::write(&path, "").unwrap();

    let parsed = parse_log(&path).unwrap();
    assert_eq!(parsed.total_modules, 0);
    assert!(parsed.modules.is_empty());
}

#[test]
fn test_parsing_twice_gives_the_same_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summaries.txt");
    let log = SummaryLog::new(&path);
    log.append(&record(1, "Compute", "VMs\n\n  Containers  ")).unwrap();
    log.append(&record(1, "Compute", "VMs\n\n  Containers  ")).unwrap();
    log.append(&record(7, "Storage", "Blobs")).unwrap();

    let first = parse_log(&path).unwrap();
    let second = parse_log(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total_modules, 3);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
