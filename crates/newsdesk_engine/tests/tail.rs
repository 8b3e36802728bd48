use std::sync::{Arc, Mutex};
use std::time::Duration;

use newsdesk_engine::{ApiSettings, EngineEvent, EventSink, FailureKind, LogTailer};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct TestSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TestSink {
    fn snapshot(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        if let EngineEvent::LogLine(line) = event {
            self.lines.lock().unwrap().push(line);
        }
    }
}

fn tailer_for(server: &MockServer) -> LogTailer {
    let settings = ApiSettings::parse(&server.uri()).unwrap();
    LogTailer::new(&settings, reqwest::Client::new()).unwrap()
}

async fn wait_for_lines(sink: &TestSink, count: usize) -> Vec<String> {
    for _ in 0..200 {
        let lines = sink.snapshot();
        if lines.len() >= count {
            return lines;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    sink.snapshot()
}

#[tokio::test]
async fn forwards_message_events_and_reconnects_after_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs/stream"))
        .and(header("accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "retry: 10\n\ndata: one\n\n: ping\n\nevent: other\ndata: hidden\n\ndata: two\n\n",
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let tailer = tailer_for(&server);
    let sink = TestSink::default();
    let task_sink = sink.clone();
    let task = tokio::spawn(async move { tailer.run(&task_sink).await });

    let lines = wait_for_lines(&sink, 4).await;
    task.abort();

    assert!(lines.len() >= 4, "expected a reconnect, got {lines:?}");
    let expected: Vec<String> = ["one", "two", "one", "two"].map(String::from).to_vec();
    assert_eq!(lines[..4].to_vec(), expected);
}

#[tokio::test]
async fn non_ok_status_stops_tailing_without_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs/stream"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let reason = tokio::time::timeout(Duration::from_secs(5), tailer_for(&server).run(&sink))
        .await
        .expect("tailer gives up instead of reconnecting");

    assert_eq!(reason.kind, FailureKind::HttpStatus(404));
    assert!(sink.snapshot().is_empty());
}

#[tokio::test]
async fn wrong_content_type_stops_tailing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logs/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("data: x\n\n", "text/plain"))
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let reason = tokio::time::timeout(Duration::from_secs(5), tailer_for(&server).run(&sink))
        .await
        .expect("tailer gives up");

    assert_eq!(reason.kind, FailureKind::Decode);
    assert!(sink.snapshot().is_empty());
}
