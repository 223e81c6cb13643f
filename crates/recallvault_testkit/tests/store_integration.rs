//! Segmented log behaviour against real project directories.

use proptest::prelude::*;
use recallvault_core::{Entry, EntryBatch, SEPARATOR};
use recallvault_testkit::prelude::*;
use std::fs;

#[test]
fn capacity_two_scenario_on_disk() {
    with_temp_vault(|vault| {
        let mut log = vault.project_log("work", 2);
        for body in ["A", "B", "C"] {
            log.append(&single(body)).unwrap();
        }

        let dir = vault.project("work");
        let first = fs::read_to_string(dir.path().join("log_1.txt")).unwrap();
        let second = fs::read_to_string(dir.path().join("log_2.txt")).unwrap();
        assert_eq!(
            first,
            format!(
                "[2024-01-15 09:00:00] - A\n{SEPARATOR}\n[2024-01-15 09:00:00] - B\n{SEPARATOR}\n"
            )
        );
        assert_eq!(second, format!("[2024-01-15 09:00:00] - C\n{SEPARATOR}\n"));
    });
}

#[test]
fn reopened_store_continues_latest_segment() {
    let vault = TestVault::new();
    {
        let mut log = vault.project_log("work", 3);
        log.append(&sample_batch(4)).unwrap();
        log.append(&single("fifth")).unwrap();
    }

    let mut log = vault.project_log("work", 3);
    assert_eq!(log.current_segment(), None);
    let outcome = log.append(&single("sixth")).unwrap();
    assert_eq!(outcome.segment, "log_2.txt");
    assert!(!outcome.rotated);
    assert_eq!(log.read_all().unwrap().len(), 6);
}

#[test]
fn interrupted_write_does_not_swallow_next_entry() {
    let vault = TestVault::new();
    let project = vault.project("journal");
    let text = format!("[2024-01-01 08:00:00] - one\n{SEPARATOR}\n[2024-01-01 09:00:00] - half writ");
    fs::write(project.path().join("log_1.txt"), &text).unwrap();

    let mut log = vault.project_log("journal", 10);
    let outcome = log.append(&single("next")).unwrap();
    assert_eq!(outcome.segment, "log_2.txt");

    let all = log.read_all().unwrap();
    let bodies: Vec<_> = all.iter().map(Entry::body).collect();
    assert_eq!(bodies, ["one", "next"]);
    assert_eq!(fs::read_to_string(project.path().join("log_1.txt")).unwrap(), text);
}

#[test]
fn hand_edited_segment_still_counts_entries() {
    let vault = TestVault::new();
    let project = vault.project("journal");
    let text = format!(
        "scribble\n[2024-01-01 08:00:00] - one\r\n{SEPARATOR}\r\n[2024-01-01 09:00:00] - two\n{SEPARATOR}   \n"
    );
    fs::write(project.path().join("log_1.txt"), text).unwrap();

    let mut log = vault.project_log("journal", 2);
    assert_eq!(log.read(Some("log_1.txt")).unwrap().len(), 2);
    let outcome = log.append(&single("three")).unwrap();
    assert_eq!(outcome.segment, "log_2.txt");
    assert!(outcome.rotated);
}

#[test]
fn segments_past_nine_stay_in_order() {
    let vault = TestVault::new();
    let mut log = vault.project_log("busy", 1);
    for i in 0..12 {
        log.append(&EntryBatch::from(vec![sample_entry(i)])).unwrap();
    }
    let all = log.read_all().unwrap();
    let bodies: Vec<_> = all.iter().map(Entry::body).collect();
    let expected: Vec<_> = (0..12).map(|i| format!("entry {i}")).collect();
    assert_eq!(bodies, expected);
    assert_eq!(log.latest_segment().unwrap().as_deref(), Some("log_12.txt"));
}

#[test]
fn project_config_capacity_applies() {
    let vault = TestVault::new();
    let project = vault.project("work/meetings");
    fs::write(project.config_path(), r#"{"log_limit": 2}"#).unwrap();

    let mut log = project.log(100).unwrap();
    log.append(&sample_batch(2)).unwrap();
    assert!(log.append(&single("third")).unwrap().rotated);
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn appends_preserve_everything_and_respect_capacity(
        batches in append_sequence_strategy(12, 4),
        log_limit in 1usize..5,
    ) {
        let mut log = memory_log(log_limit);
        let mut expected = EntryBatch::new();
        for batch in &batches {
            let before = log.latest_segment().unwrap();
            let count = log.read(before.as_deref()).unwrap().len();
            let outcome = log.append(batch).unwrap();

            prop_assert_eq!(outcome.written, batch.len());
            prop_assert_eq!(outcome.rotated, before.is_some() && count >= log_limit);
            expected.extend(batch.iter().cloned());
        }

        prop_assert_eq!(log.read_all().unwrap(), expected);
        for segment in log.segments().unwrap() {
            prop_assert!(!log.read(Some(&segment)).unwrap().is_empty());
        }
    }
}
