use futures::StreamExt;
use log::{error, info, warn};
use reqwest::{Client, ClientBuilder, Response, header};
use scoreboard_common::game_snapshot::ScoreboardSnapshot;
use serde_json::Value;
use std::time::Duration;

pub const STATE_PATH: &str = "/api/state";
pub const EVENTS_PATH: &str = "/api/events";

const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Incremental decoder for a `text/event-stream` body. Bytes go in as they
/// arrive off the wire; completed event payloads come out. Partial lines and
/// partial events are held until a later chunk finishes them.
#[derive(Default)]
pub struct EventStreamDecoder {
    buffer: String,
    data_lines: Vec<String>,
}

impl EventStreamDecoder {
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            if line.is_empty() {
                // A blank line dispatches the accumulated event
                if !self.data_lines.is_empty() {
                    events.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines
                    .push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
            // event/id/retry fields and ":" comments carry no payload
        }
        events
    }
}

/// One-shot request to seed the display before the first stream message.
/// Until the first protocol frame arrives the server answers with an error
/// body instead of a snapshot, which is not a failure, just nothing to show.
async fn fetch_initial_state(
    client: &Client,
    url: &str,
    tx: &crossbeam_channel::Sender<ScoreboardSnapshot>,
) {
    info!("Requesting initial scoreboard state");
    let response = match client.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(e) => {
            warn!("Initial state request failed (event stream remains the primary driver): {e}");
            return;
        }
    };
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Couldn't read initial state body: {e}");
            return;
        }
    };
    if body.trim().is_empty() {
        info!("No scoreboard state available yet");
        return;
    }
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Initial state payload didn't parse: {e}");
            return;
        }
    };
    if value.get("error").is_some() || value.as_object().is_some_and(|o| o.is_empty()) {
        info!("No scoreboard state available yet");
        return;
    }
    match serde_json::from_value::<ScoreboardSnapshot>(value) {
        Ok(snapshot) => {
            info!("Seeded display from initial state");
            tx.send(snapshot)
                .unwrap_or_else(|e| error!("Frontend could not receive snapshot: {e}"));
        }
        Err(e) => warn!("Initial state payload didn't parse: {e}"),
    }
}

/// Consume one subscription until the server closes it or the read fails.
/// Malformed payloads are dropped whole; the stream keeps going.
async fn read_events(response: Response, tx: &crossbeam_channel::Sender<ScoreboardSnapshot>) {
    let mut decoder = EventStreamDecoder::default();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Event stream read failed: {e}");
                return;
            }
        };
        for payload in decoder.feed(&bytes) {
            match serde_json::from_str::<ScoreboardSnapshot>(&payload) {
                Ok(snapshot) => tx
                    .send(snapshot)
                    .unwrap_or_else(|e| error!("Frontend could not receive snapshot: {e}")),
                Err(e) => warn!("Discarding malformed event payload: {e}"),
            }
        }
    }
    warn!("Event stream closed by server");
}

/// Hold the subscription open for the life of the process, reconnecting
/// with doubling, capped delays. The delay resets once a connection is
/// accepted, so a healthy stream that drops comes back quickly.
async fn run_event_stream(
    client: &Client,
    url: &str,
    tx: &crossbeam_channel::Sender<ScoreboardSnapshot>,
) {
    let mut retry_delay = INITIAL_RETRY_DELAY;
    loop {
        info!("Connecting to event stream at {url}");
        match client
            .get(url)
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => {
                info!("Subscribed to event stream");
                retry_delay = INITIAL_RETRY_DELAY;
                read_events(response, tx).await;
            }
            Err(e) => warn!("Event stream connection failed: {e}"),
        }
        info!("Retrying event stream in {}s", retry_delay.as_secs());
        tokio::time::sleep(retry_delay).await;
        retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
    }
}

#[tokio::main]
pub async fn networking_thread(
    tx: crossbeam_channel::Sender<ScoreboardSnapshot>,
    config: crate::AppConfig,
) {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(20))
        .build()
        .expect("Couldn't create HTTP client!");

    let base_url = format!("http://{}:{}", config.server_ip, config.server_port);

    // The seed request runs alongside the subscription rather than gating
    // it; whichever lands first writes the board first.
    let seed_client = client.clone();
    let seed_tx = tx.clone();
    let state_url = format!("{base_url}{STATE_PATH}");
    tokio::spawn(async move {
        fetch_initial_state(&seed_client, &state_url, &seed_tx).await;
    });

    let events_url = format!("{base_url}{EVENTS_PATH}");
    info!("Networking thread initialized!");
    run_event_stream(&client, &events_url, &tx).await;
}
