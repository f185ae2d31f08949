use ftbq_keygen::{discovery, parallel_processing, KeygenConfig};
use std::process::Command;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::TestFixture;

/// Invalid UTF-8 in one file fails that file only
#[tokio::test]
async fn test_invalid_utf8_fails_single_file() {
    let fixture = TestFixture::new();
    let good = fixture.create_quest_file("good.snbt", "title: \"Good\"");
    let bad = fixture.root_path.join("bad.snbt");
    std::fs::write(&bad, [0xFF, 0xFE, 0xFD]).unwrap();

    let files = discovery::discover_files_async(&fixture.root_path, discovery::DiscoveryConfig::default())
        .await
        .expect("Discovery should succeed")
        .files;
    assert_eq!(files.len(), 2);

    let report = parallel_processing::process_files_parallel(files, &KeygenConfig::default())
        .await
        .expect("Batch should complete");

    assert_eq!(report.files_processed, 1);
    assert_eq!(report.files_failed(), 1);
    assert_eq!(report.failures[0].path, bad);
    assert_eq!(report.unique_keys(), 1);
    assert!(fixture.read("good.snbt").contains("{ftbq_keygen."));
    assert_eq!(std::fs::read(&bad).unwrap(), vec![0xFF, 0xFE, 0xFD]);
    assert!(good.exists());
}

/// Empty and whitespace-only files pass through untouched
#[tokio::test]
async fn test_empty_and_whitespace_files() {
    let fixture = TestFixture::new();
    fixture.create_quest_file("empty.snbt", "");
    fixture.create_quest_file("blank.snbt", "   \n\t  \r\n   ");

    let files = discovery::discover_files_async(&fixture.root_path, discovery::DiscoveryConfig::default())
        .await
        .unwrap()
        .files;
    let report = parallel_processing::process_files_parallel(files, &KeygenConfig::default())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.files_processed, 2);
    assert_eq!(report.files_changed, 0);
    assert_eq!(fixture.read("empty.snbt"), "");
    assert_eq!(fixture.read("blank.snbt"), "   \n\t  \r\n   ");
}

/// A failed file makes the whole run fail, after the rest are written
#[test]
fn test_cli_reports_file_failure() {
    let fixture = TestFixture::new();
    let work_dir = TestFixture::new();
    fixture.create_quest_file("good.snbt", "title: \"Good\"");
    std::fs::write(fixture.root_path.join("bad.snbt"), [0xFF, 0xFE, 0xFD]).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ftbq-keygen"))
        .arg("--folder")
        .arg(&fixture.root_path)
        .current_dir(&work_dir.root_path)
        .output()
        .expect("Failed to run ftbq-keygen");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 of 2 files failed"), "stderr: {stderr}");

    assert!(fixture.read("good.snbt").contains("{ftbq_keygen."));
    let lang: serde_json::Value = serde_json::from_str(&work_dir.read("lang.json")).unwrap();
    assert_eq!(lang.as_object().map(|o| o.len()), Some(1));
}

/// Unreadable files are reported rather than skipped (Unix only)
#[cfg(unix)]
#[tokio::test]
async fn test_permission_denied_reported() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TestFixture::new();
    let restricted = fixture.create_quest_file("restricted.snbt", "title: \"Secret\"");
    std::fs::set_permissions(&restricted, std::fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores file permissions
    if std::fs::read(&restricted).is_ok() {
        std::fs::set_permissions(&restricted, std::fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let report = parallel_processing::process_files_parallel(vec![restricted.clone()], &KeygenConfig::default())
        .await
        .unwrap();

    std::fs::set_permissions(&restricted, std::fs::Permissions::from_mode(0o644)).unwrap();
    assert_eq!(report.files_failed(), 1);
    assert!(report.failures[0].error.contains("restricted.snbt"));
    assert_eq!(fixture.read("restricted.snbt"), "title: \"Secret\"");
}
