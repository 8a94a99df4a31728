//! HTTP transport posting each record as a JSON body.
//!
//! Delivery runs on a dedicated worker thread with its own current-thread
//! tokio runtime, so `write` never blocks the caller. The queue is bounded:
//! when it is full the record is dropped and counted. There is no retry: a
//! failed POST is reported through `tracing` and dropped.
//!
//! Dropping the transport closes the queue and gives the worker
//! `shutdown_timeout` to drain it. Records still queued after that are
//! abandoned and the in-flight request is cancelled.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// Records buffered ahead of the worker before new ones are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
const SHUTDOWN_POLL: Duration = Duration::from_millis(10);

/// Endpoint settings for an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportOptions {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    pub queue_capacity: usize,
    /// How long dropping the transport waits for the queue to drain
    pub shutdown_timeout: Duration,
}

impl HttpTransportOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Queue size; values below 1 are raised to 1.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// Ships records to a remote collector.
#[derive(Debug)]
pub struct HttpTransport {
    level: LogLevel,
    url: Url,
    shutdown_timeout: Duration,
    dropped: AtomicU64,
    sender: Option<Sender<String>>,
    stop: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl HttpTransport {
    pub fn new(level: LogLevel, options: HttpTransportOptions) -> LoggerResult<Self> {
        let url = Url::parse(&options.url).map_err(|e| LoggerError::transport("http", e))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LoggerError::transport("http", e))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| LoggerError::transport("http", e))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoggerError::transport("http", e))?;

        let (sender, receiver) = mpsc::channel(options.queue_capacity.max(1));
        let (stop, stop_receiver) = oneshot::channel();
        let worker_url = url.clone();
        let worker = std::thread::Builder::new()
            .name("lineage-http".to_string())
            .spawn(move || deliver(&client, &worker_url, receiver, stop_receiver))
            .map_err(|e| LoggerError::transport("http", e))?;

        Ok(Self {
            level,
            url,
            shutdown_timeout: options.shutdown_timeout,
            dropped: AtomicU64::new(0),
            sender: Some(sender),
            stop: Some(stop),
            worker: Some(worker),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Records dropped because the queue was full or the worker was gone.
    pub fn dropped_records(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

fn deliver(
    client: &Client,
    url: &Url,
    mut receiver: Receiver<String>,
    stop: oneshot::Receiver<()>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!(error = %e, "failed to start http transport runtime");
            return;
        }
    };

    let stopped = runtime.block_on(async {
        tokio::select! {
            () = drain(client, url, &mut receiver) => false,
            Ok(()) = stop => true,
        }
    });

    if stopped {
        warn!(
            url = %url,
            abandoned = receiver.len(),
            "http transport stopped before its queue drained"
        );
    }
    runtime.shutdown_timeout(SHUTDOWN_POLL);
}

async fn drain(client: &Client, url: &Url, receiver: &mut Receiver<String>) {
    while let Some(body) = receiver.recv().await {
        let result = client
            .post(url.clone())
            .body(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        match result {
            Ok(response) => {
                debug!(url = %url, status = %response.status(), "log record delivered");
            }
            Err(e) => warn!(url = %url, error = %e, "failed to deliver log record"),
        }
    }
}

/// Poll until `worker` exits or `timeout` elapses; true when it exited.
fn wait_for(worker: &JoinHandle<()>, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while !worker.is_finished() {
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(SHUTDOWN_POLL);
    }
    true
}

impl Transport for HttpTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let body = match record.to_json_line() {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "http transport failed to serialize record");
                return;
            }
        };

        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(body) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(url = %self.url, "http transport queue full, record dropped");
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(url = %self.url, "http transport worker is gone, record dropped");
            }
        }
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };

        if !wait_for(&worker, self.shutdown_timeout) {
            if let Some(stop) = self.stop.take() {
                let _ = stop.send(());
            }
        }
        if worker.join().is_err() {
            warn!(url = %self.url, "http transport worker panicked");
        }
    }
}
