//! Round trips through the TOML user repository.

use chrono::NaiveDate;
use radix_core::conversion::ConversionRecord;
use radix_core::user::{User, UserRepository};
use radix_infrastructure::TomlUserRepository;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
}

#[test]
fn history_survives_reload() {
    let temp_dir = TempDir::new().unwrap();
    let repo = TomlUserRepository::new(temp_dir.path());

    let mut user = User::new("guru").unwrap();
    user.history.append(
        date(26),
        vec![
            ConversionRecord::converted("101.101", 2, 10, "5.625"),
            ConversionRecord::failed("12", 2, 10, "Invalid digit '2' for base 2"),
        ],
    );
    repo.save(&user).unwrap();
    repo.append_history(
        "guru",
        date(27),
        &[ConversionRecord::converted("ff", 16, 2, "11111111")],
    )
    .unwrap();

    let reopened = TomlUserRepository::new(temp_dir.path());
    let loaded = reopened.find("guru").unwrap().unwrap();

    assert_eq!(loaded.created_at, user.created_at);
    assert_eq!(loaded.history.dates().collect::<Vec<_>>(), vec![date(26), date(27)]);
    assert_eq!(loaded.history.on(date(26)), user.history.on(date(26)));
    assert_eq!(loaded.history.on(date(27))[0].result(), Some("11111111"));
}

#[test]
fn file_layout_is_dated_tables() {
    let temp_dir = TempDir::new().unwrap();
    let repo = TomlUserRepository::new(temp_dir.path());
    repo.save(&User::new("guru").unwrap()).unwrap();
    repo.append_history("guru", date(26), &[ConversionRecord::converted("7", 8, 2, "111")])
        .unwrap();

    let text = fs::read_to_string(temp_dir.path().join("guru.toml")).unwrap();

    assert!(text.contains("schema_version = \"1.0.0\""));
    assert!(text.contains("username = \"guru\""));
    assert!(text.contains("[[history.2025-08-26]]"));
    assert!(text.contains("result = \"111\""));
    assert!(!text.contains("error_message"));
}

#[test]
fn corrupt_file_only_affects_its_user() {
    let temp_dir = TempDir::new().unwrap();
    let repo = TomlUserRepository::new(temp_dir.path());
    repo.save(&User::new("good").unwrap()).unwrap();
    fs::write(temp_dir.path().join("bad.toml"), "username = [").unwrap();

    assert!(repo.find("bad").unwrap_err().is_serialization());
    assert!(repo.find("good").unwrap().is_some());
    assert_eq!(repo.list_usernames().unwrap(), vec!["bad", "good"]);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("future.toml"),
        "schema_version = \"2.0.0\"\nusername = \"future\"\ncreated_at = \"2025-08-26T09:00:00Z\"\n",
    )
    .unwrap();

    let repo = TomlUserRepository::new(temp_dir.path());
    let err = repo.find("future").unwrap_err();

    assert!(err.is_serialization());
    assert!(err.to_string().contains("2.0.0"));
    assert!(err.to_string().contains("future.toml"));
}

#[test]
fn concurrent_flushes_lose_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = Arc::new(temp_dir.path().to_path_buf());
    TomlUserRepository::new(root.as_ref().clone())
        .save(&User::new("shared").unwrap())
        .unwrap();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let root = Arc::clone(&root);
            std::thread::spawn(move || {
                let repo = TomlUserRepository::new(root.as_ref().clone());
                let records = vec![
                    ConversionRecord::converted(format!("{}", i), 10, 2, "x"),
                    ConversionRecord::converted(format!("{}", i), 10, 8, "y"),
                ];
                repo.append_history("shared", date(26), &records).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let repo = TomlUserRepository::new(root.as_ref().clone());
    let user = repo.find("shared").unwrap().unwrap();
    let bucket = user.history.on(date(26));

    assert_eq!(bucket.len(), 12);
    // Each session's records stay contiguous.
    for pair in bucket.chunks(2) {
        assert_eq!(pair[0].input_value(), pair[1].input_value());
    }
}

#[test]
fn first_logins_racing_appends_lose_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = Arc::new(temp_dir.path().to_path_buf());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let root = Arc::clone(&root);
            std::thread::spawn(move || {
                let repo = TomlUserRepository::new(root.as_ref().clone());
                repo.find_or_create("newcomer").unwrap();
                let records = vec![ConversionRecord::converted(format!("{}", i), 10, 2, "x")];
                repo.append_history("newcomer", date(26), &records).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let repo = TomlUserRepository::new(root.as_ref().clone());
    let user = repo.find("newcomer").unwrap().unwrap();
    let mut inputs: Vec<&str> = user
        .history
        .on(date(26))
        .iter()
        .map(|record| record.input_value())
        .collect();
    inputs.sort();

    assert_eq!(inputs, vec!["0", "1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(repo.list_usernames().unwrap(), vec!["newcomer"]);
}
