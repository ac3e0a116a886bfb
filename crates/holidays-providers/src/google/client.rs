//! Google Calendar API client.
//!
//! Low-level HTTP client for the events.list endpoint of a public calendar,
//! authenticated with an API key rather than OAuth.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::{RawEvent, RawEventTime};

/// Upper bound on pages fetched for one window.
const MAX_PAGES: usize = 50;

/// Google Calendar API client.
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleCalendarClient {
    /// Creates a new client.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::internal("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Returns the events endpoint for a calendar, with the id percent-encoded.
    pub fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    /// Lists every event of a calendar whose start lies in `[time_min, time_max]`.
    ///
    /// Recurring events are expanded server-side and results are ordered by
    /// start time. All pages are followed; a repeated page token or more than
    /// `MAX_PAGES` pages is an invalid response.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> ProviderResult<Vec<RawEvent>> {
        let mut all_events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0;

        loop {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(ProviderError::invalid_response(format!(
                    "more than {} pages of events",
                    MAX_PAGES
                )));
            }

            let page = self
                .list_events_page(calendar_id, time_min, time_max, page_token.as_deref())
                .await?;

            all_events.extend(
                page.items
                    .into_iter()
                    .filter_map(|event| convert_event(event, calendar_id)),
            );

            match page.next_page_token {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    return Err(ProviderError::invalid_response(format!(
                        "page token '{}' repeated",
                        token
                    )));
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            calendar_id,
            count = all_events.len(),
            "fetched events from calendar"
        );
        Ok(all_events)
    }

    /// Builds the request for one page of events.
    fn events_request(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let time_min = time_min.to_rfc3339_opts(SecondsFormat::Millis, true);
        let time_max = time_max.to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut request = self.http_client.get(self.events_url(calendar_id)).query(&[
            ("key", self.api_key.as_str()),
            ("timeMin", time_min.as_str()),
            ("timeMax", time_max.as_str()),
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
        ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        request
    }

    async fn list_events_page(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
        page_token: Option<&str>,
    ) -> ProviderResult<EventListResponse> {
        let response = self
            .events_request(calendar_id, time_min, time_max, page_token)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                ProviderError::network(message).with_source(e)
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network("failed to read response").with_source(e))?;

        parse_event_list(&body)
    }
}

impl std::fmt::Debug for GoogleCalendarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCalendarClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

/// Maps a non-success status to an error.
fn status_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let detail = api_error_message(body).unwrap_or_else(|| body.trim().to_string());
    let message = format!("HTTP error! status: {} {}", status.as_u16(), detail);
    match status {
        reqwest::StatusCode::BAD_REQUEST => ProviderError::bad_request(message),
        reqwest::StatusCode::UNAUTHORIZED => ProviderError::authentication(message),
        reqwest::StatusCode::FORBIDDEN => ProviderError::authorization(message),
        reqwest::StatusCode::NOT_FOUND => ProviderError::not_found(message),
        _ => ProviderError::server(message),
    }
}

/// Extracts `error.message` from a Google API error body.
fn api_error_message(body: &str) -> Option<String> {
    let parsed: ApiErrorResponse = serde_json::from_str(body).ok()?;
    Some(parsed.error.message)
}

fn parse_event_list(body: &str) -> ProviderResult<EventListResponse> {
    serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("failed to parse response: {}", e)).with_source(e)
    })
}

/// Converts an API event to a RawEvent, skipping cancelled or unusable ones.
fn convert_event(event: ApiEvent, calendar_id: &str) -> Option<RawEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let Some(id) = event.id else {
        warn!("skipping event without id");
        return None;
    };

    let start = convert_time(event.start, &id, "start")?;
    let end = convert_time(event.end, &id, "end")?;

    let mut raw_event = RawEvent::new(id, start, end, calendar_id);
    raw_event.summary = event.summary;
    raw_event.description = event.description;
    raw_event.status = event.status;

    Some(raw_event)
}

fn convert_time(time: ApiEventTime, id: &str, which: &str) -> Option<RawEventTime> {
    match (time.date_time, time.date) {
        (Some(dt), _) => DateTime::parse_from_rfc3339(&dt)
            .map(|parsed| RawEventTime::DateTime(parsed.with_timezone(&Utc)))
            .map_err(|e| warn!(event_id = id, "failed to parse {} time: {}", which, e))
            .ok(),
        (None, Some(date)) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map(RawEventTime::Date)
            .map_err(|e| warn!(event_id = id, "failed to parse {} date: {}", which, e))
            .ok(),
        (None, None) => {
            warn!(event_id = id, "event has no {} time", which);
            None
        }
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// A single event from the Google Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    start: ApiEventTime,
    #[serde(default)]
    end: ApiEventTime,
    status: Option<String>,
}

/// Event time from the API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const INDIAN_CALENDAR: &str = "en.indian#holiday@group.v.calendar.google.com";

    fn client() -> GoogleCalendarClient {
        GoogleCalendarClient::new(
            "https://www.googleapis.com/calendar/v3/",
            "test-key",
            Duration::from_secs(5),
            "holidays-test",
        )
        .unwrap()
    }

    #[test]
    fn events_url_encodes_calendar_id() {
        assert_eq!(
            client().events_url(INDIAN_CALENDAR),
            "https://www.googleapis.com/calendar/v3/calendars/en.indian%23holiday%40group.v.calendar.google.com/events"
        );
    }

    #[test]
    fn events_request_query() {
        let time_min = Utc.with_ymd_and_hms(2023, 12, 31, 18, 30, 0).unwrap();
        let time_max = Utc.with_ymd_and_hms(2024, 12, 31, 18, 29, 59).unwrap();
        let request = client()
            .events_request(INDIAN_CALENDAR, time_min, time_max, Some("page-2"))
            .build()
            .unwrap();

        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let expected = [
            ("key", "test-key"),
            ("timeMin", "2023-12-31T18:30:00.000Z"),
            ("timeMax", "2024-12-31T18:29:59.000Z"),
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
            ("pageToken", "page-2"),
        ];
        assert_eq!(pairs.len(), expected.len());
        for (pair, (k, v)) in pairs.iter().zip(expected) {
            assert_eq!(pair.0, k);
            assert_eq!(pair.1, v);
        }
        assert_eq!(request.method(), reqwest::Method::GET);
    }

    #[test]
    fn parse_event_list_response() {
        let json = r#"{
            "kind": "calendar#events",
            "items": [
                {
                    "id": "x1",
                    "summary": "Holiday A",
                    "start": { "date": "2024-01-26" },
                    "end": { "date": "2024-01-27" }
                },
                {
                    "id": "x2",
                    "summary": "Timed",
                    "description": "Observance",
                    "start": { "dateTime": "2024-03-20T08:36:00+05:30" },
                    "end": { "dateTime": "2024-03-20T09:36:00+05:30" }
                }
            ],
            "nextPageToken": "abc"
        }"#;

        let response = parse_event_list(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.next_page_token.as_deref(), Some("abc"));

        let events: Vec<RawEvent> = response
            .items
            .into_iter()
            .filter_map(|e| convert_event(e, INDIAN_CALENDAR))
            .collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_all_day());
        assert_eq!(events[0].title(), "Holiday A");
        assert!(!events[1].is_all_day());
        assert_eq!(
            events[1].start,
            RawEventTime::DateTime(Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap())
        );
        assert_eq!(events[1].description.as_deref(), Some("Observance"));
    }

    #[test]
    fn parse_rejects_missing_items() {
        let err = parse_event_list(r#"{"kind": "calendar#events"}"#).unwrap_err();
        assert_eq!(err.code(), crate::error::ProviderErrorCode::InvalidResponse);

        assert!(parse_event_list("<html>").is_err());
    }

    #[test]
    fn convert_skips_unusable_events() {
        let json = r#"[
            { "id": "c", "status": "cancelled", "start": { "date": "2024-01-01" }, "end": { "date": "2024-01-02" } },
            { "summary": "No id", "start": { "date": "2024-01-01" }, "end": { "date": "2024-01-02" } },
            { "id": "nostart", "end": { "date": "2024-01-02" } },
            { "id": "bad", "start": { "date": "26/01/2024" }, "end": { "date": "2024-01-27" } },
            { "id": "ok", "start": { "date": "2024-01-01" }, "end": { "date": "2024-01-02" } }
        ]"#;
        let events: Vec<ApiEvent> = serde_json::from_str(json).unwrap();
        let converted: Vec<RawEvent> = events
            .into_iter()
            .filter_map(|e| convert_event(e, "cal"))
            .collect();

        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].id, "ok");
        assert_eq!(converted[0].title(), "");
    }

    #[test]
    fn status_errors_are_classified() {
        use crate::error::ProviderErrorCode;

        let body = r#"{"error": {"code": 400, "message": "API key not valid."}}"#;
        let err = status_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert!(err.message().contains("API key not valid."));
        assert!(err.message().contains("400"));

        let err = status_error(reqwest::StatusCode::NOT_FOUND, "");
        assert_eq!(err.code(), ProviderErrorCode::NotFound);

        let err = status_error(reqwest::StatusCode::FORBIDDEN, "");
        assert_eq!(err.code(), ProviderErrorCode::AuthorizationFailed);

        let err = status_error(reqwest::StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(err.code(), ProviderErrorCode::ServerError);
        assert!(err.is_retryable());
    }

    mod paging {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::{Arc, Mutex};

        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        /// Answers every request with `respond(request_target)` as JSON and
        /// records the request targets.
        async fn spawn_server<F>(respond: F) -> (String, Arc<Mutex<Vec<String>>>)
        where
            F: Fn(&str) -> String + Send + Sync + 'static,
        {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = requests.clone();

            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&head);
                    let target = head.split_whitespace().nth(1).unwrap_or_default().to_string();
                    let body = respond(&target);
                    recorded.lock().unwrap().push(target);

                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                }
            });

            (format!("http://{}/calendar/v3", addr), requests)
        }

        fn page(ids: &[&str], next_page_token: Option<&str>) -> String {
            let items: Vec<_> = ids
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "summary": id,
                        "start": { "date": "2024-01-26" },
                        "end": { "date": "2024-01-27" }
                    })
                })
                .collect();
            serde_json::json!({ "items": items, "nextPageToken": next_page_token }).to_string()
        }

        async fn list(api_base: &str) -> ProviderResult<Vec<RawEvent>> {
            let client = GoogleCalendarClient::new(
                api_base,
                "test-key",
                Duration::from_secs(5),
                "holidays-test",
            )
            .unwrap();
            client
                .list_events(
                    INDIAN_CALENDAR,
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
                )
                .await
        }

        #[tokio::test]
        async fn follows_every_page() {
            let (api_base, requests) = spawn_server(|target| {
                if target.contains("pageToken=p2") {
                    page(&["c"], None)
                } else {
                    page(&["a", "b"], Some("p2"))
                }
            })
            .await;

            let events = list(&api_base).await.unwrap();
            let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, ["a", "b", "c"]);

            let requests = requests.lock().unwrap();
            assert_eq!(requests.len(), 2);
            assert!(requests[0].starts_with(
                "/calendar/v3/calendars/en.indian%23holiday%40group.v.calendar.google.com/events?"
            ));
            assert!(requests[0].contains("key=test-key"));
            assert!(!requests[0].contains("pageToken"));
            assert!(requests[1].contains("pageToken=p2"));
        }

        #[tokio::test]
        async fn repeated_page_token_stops_paging() {
            let (api_base, requests) = spawn_server(|_| page(&["a"], Some("same"))).await;

            let err = list(&api_base).await.unwrap_err();
            assert_eq!(err.code(), crate::error::ProviderErrorCode::InvalidResponse);
            assert!(err.message().contains("repeated"));
            assert_eq!(requests.lock().unwrap().len(), 2);
        }

        #[tokio::test]
        async fn page_count_is_capped() {
            let counter = AtomicUsize::new(0);
            let (api_base, requests) = spawn_server(move |_| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                page(&["a"], Some(&format!("p{}", n)))
            })
            .await;

            let err = list(&api_base).await.unwrap_err();
            assert_eq!(err.code(), crate::error::ProviderErrorCode::InvalidResponse);
            assert_eq!(requests.lock().unwrap().len(), MAX_PAGES);
        }
    }
}
