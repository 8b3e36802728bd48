use std::fs;
use std::sync::Arc;

use newsdesk_engine::{export_filename, save_atomically, DownloadWriter, SaveError};
use tempfile::TempDir;

#[test]
fn missing_download_dir_is_created() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pobrane").join("dziś");

    let path = save_atomically(&dir, "a.txt", b"x").unwrap();

    assert!(dir.is_dir());
    assert_eq!(path, dir.join("a.txt"));
}

#[test]
fn second_save_replaces_the_first() {
    let temp = TempDir::new().unwrap();

    let first = save_atomically(temp.path(), "doc.txt", b"hello").unwrap();
    let second = save_atomically(temp.path(), "doc.txt", b"world").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = save_atomically(&file_path, "doc.txt", b"data").unwrap_err();

    assert!(matches!(err, SaveError::NotADirectory(_)));
    assert!(!temp.path().join("doc.txt").exists());
}

#[test]
fn export_filename_uses_iso_day() {
    assert_eq!(export_filename("2024-05-01"), "aktualnosci_2024-05-01.txt");
}

#[test]
fn download_writer_names_file_after_clock_date() {
    let temp = TempDir::new().unwrap();
    let writer = DownloadWriter::with_clock(
        temp.path().to_path_buf(),
        Arc::new(|| "2024-05-01".to_string()),
    );

    let path = writer.save(b"eksport").unwrap();

    assert_eq!(path, temp.path().join("aktualnosci_2024-05-01.txt"));
    assert_eq!(fs::read(&path).unwrap(), b"eksport");
}

#[test]
fn default_clock_produces_a_day_only_date() {
    let today = newsdesk_engine::utc_today();
    assert_eq!(today.len(), 10);
    assert_eq!(today.as_bytes()[4], b'-');
    assert_eq!(today.as_bytes()[7], b'-');
}
