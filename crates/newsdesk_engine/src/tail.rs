use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use newsdesk_logging::{desk_debug, desk_info, desk_warn};

use crate::api::{map_reqwest_error, ApiSettings, LOG_STREAM_PATH};
use crate::sse::SseParser;
use crate::{ApiError, EngineEvent, FailureKind};

/// Reconnection delay used until the server sends a `retry:` directive.
pub const DEFAULT_RETRY: Duration = Duration::from_millis(3000);

const LAST_EVENT_ID: &str = "Last-Event-ID";

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum StreamEnd {
    /// Connection dropped or body ended; reconnect after the retry delay.
    Reconnect(Option<ApiError>),
    /// The server refused the stream; do not reconnect.
    Fail(ApiError),
}

/// Follows the server log stream, forwarding each message as a log line.
///
/// Behaves like a browser `EventSource`: dropped connections are reopened
/// after the server-advertised retry delay, while a non-200 answer or a
/// wrong content type ends tailing for good.
#[derive(Debug, Clone)]
pub struct LogTailer {
    client: reqwest::Client,
    url: Url,
}

impl LogTailer {
    pub fn new(settings: &ApiSettings, client: reqwest::Client) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            url: settings.endpoint(LOG_STREAM_PATH)?,
        })
    }

    /// Runs until the stream fails permanently and returns the reason.
    pub async fn run(&self, sink: &dyn EventSink) -> ApiError {
        let mut parser = SseParser::new();
        loop {
            match self.pump(&mut parser, sink).await {
                StreamEnd::Fail(err) => {
                    desk_warn!("Log stream closed permanently: {}", err);
                    return err;
                }
                StreamEnd::Reconnect(Some(err)) => {
                    desk_debug!("Log stream interrupted: {}", err);
                }
                StreamEnd::Reconnect(None) => {
                    desk_debug!("Log stream ended by server");
                }
            }
            parser.reset_connection();
            let delay = parser.retry().unwrap_or(DEFAULT_RETRY);
            tokio::time::sleep(delay).await;
        }
    }

    async fn pump(&self, parser: &mut SseParser, sink: &dyn EventSink) -> StreamEnd {
        let mut request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = parser.last_event_id() {
            if let Ok(value) = HeaderValue::from_str(id) {
                request = request.header(LAST_EVENT_ID, value);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return StreamEnd::Reconnect(Some(map_reqwest_error(err))),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return StreamEnd::Fail(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if !is_event_stream(content_type) {
            return StreamEnd::Fail(ApiError::new(
                FailureKind::Decode,
                format!("unexpected content type {content_type:?}"),
            ));
        }

        desk_info!("Log stream connected to {}", self.url);
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => return StreamEnd::Reconnect(Some(map_reqwest_error(err))),
            };
            for event in parser.feed(&chunk) {
                // Only the default event type reaches the message handler.
                if event.event.as_deref().map_or(true, |kind| kind == "message") {
                    sink.emit(EngineEvent::LogLine(event.data));
                }
            }
        }
        StreamEnd::Reconnect(None)
    }
}

fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .eq_ignore_ascii_case("text/event-stream")
}
