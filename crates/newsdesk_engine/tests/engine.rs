use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use newsdesk_core::Record;
use newsdesk_engine::{
    ApiError, ApiSettings, Backend, DownloadWriter, EngineConfig, EngineEvent, EngineEvents,
    EngineHandle, FailureKind,
};
use tempfile::TempDir;

#[derive(Default)]
struct FakeBackend {
    run_keys: Mutex<Vec<String>>,
    exported: Mutex<Vec<Vec<Record>>>,
    export_fails: bool,
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn run(&self, api_key: &str) -> Result<Vec<Record>, ApiError> {
        self.run_keys.lock().unwrap().push(api_key.to_string());
        Ok(vec![Record {
            original_title: Some("T".into()),
            ..Record::default()
        }])
    }

    async fn export(&self, records: &[Record]) -> Result<Bytes, ApiError> {
        self.exported.lock().unwrap().push(records.to_vec());
        if self.export_fails {
            return Err(ApiError {
                kind: FailureKind::HttpStatus(500),
                message: "Export nieudany".to_string(),
            });
        }
        Ok(Bytes::from_static(b"tresc pliku"))
    }
}

fn config(download_dir: PathBuf) -> EngineConfig {
    EngineConfig {
        // Nothing listens here; only the log stream would use it.
        api: ApiSettings::parse("http://127.0.0.1:9").unwrap(),
        downloads: DownloadWriter::with_clock(download_dir, Arc::new(|| "2024-05-01".to_string())),
    }
}

fn next_event(events: &EngineEvents) -> EngineEvent {
    events
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn run_command_reports_backend_records() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(config(temp.path().into()), backend.clone());

    engine.run("abc");

    match next_event(&events) {
        EngineEvent::RunCompleted(Ok(records)) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].original_title(), "T");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*backend.run_keys.lock().unwrap(), vec!["abc".to_string()]);
}

#[test]
fn export_command_saves_dated_download() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(config(temp.path().into()), backend.clone());
    let records = vec![
        Record {
            original_title: Some("a".into()),
            ..Record::default()
        },
        Record {
            original_title: Some("b".into()),
            ..Record::default()
        },
    ];

    engine.export(records.clone());

    match next_event(&events) {
        EngineEvent::ExportCompleted(Ok(path)) => {
            assert_eq!(path, temp.path().join("aktualnosci_2024-05-01.txt"));
            assert_eq!(std::fs::read(&path).unwrap(), b"tresc pliku");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*backend.exported.lock().unwrap(), vec![records]);
}

#[test]
fn failed_export_reports_error_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend {
        export_fails: true,
        ..FakeBackend::default()
    });
    let (engine, events) = EngineHandle::with_backend(config(temp.path().into()), backend);

    engine.export(vec![Record::default()]);

    match next_event(&events) {
        EngineEvent::ExportCompleted(Err(err)) => {
            assert_eq!(err.kind, FailureKind::HttpStatus(500));
            assert_eq!(err.message, "Export nieudany");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(!temp.path().join("aktualnosci_2024-05-01.txt").exists());
}

#[test]
fn unreachable_log_stream_is_silent_and_does_not_block_runs() {
    let temp = TempDir::new().unwrap();
    let (engine, events) =
        EngineHandle::with_backend(config(temp.path().into()), Arc::new(FakeBackend::default()));

    engine.open_log_stream();
    engine.run("");

    assert!(matches!(
        next_event(&events),
        EngineEvent::RunCompleted(Ok(_))
    ));
    assert!(events.try_recv().is_none());
}
