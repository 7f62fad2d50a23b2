//! Employee directory client: a fetch controller that retries the directory service on a
//! fixed schedule and degrades to a built-in sample page when the service stays down.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{Employee, PageInfo},
    protocol::EmployeeQuery,
};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

pub mod error;
pub mod fallback;
pub mod retry;
pub mod transport;

pub use error::FetchError;
pub use retry::{RetryPolicy, FETCH_RETRY_DELAY, MAX_FETCH_ATTEMPTS};
pub use transport::{EmployeeTransport, HttpEmployeeTransport, UnavailableTransport};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything a presentation layer reads from the controller.
///
/// Once an operation has returned, either `degraded` is false and `records`/`page` are
/// current, or `degraded` is true and they still hold whatever the previous successful
/// operation left there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerState {
    pub records: Vec<Employee>,
    pub page: PageInfo,
    pub loading: bool,
    pub error: Option<String>,
    pub degraded: bool,
}

impl ControllerState {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page.has_next()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page.has_previous()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    LoadStarted {
        query: EmployeeQuery,
    },
    AttemptFailed {
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },
    Loaded {
        page: PageInfo,
        records: usize,
    },
    Degraded {
        attempts: u32,
        last_error: String,
    },
    FallbackLoaded {
        page: PageInfo,
    },
}

pub struct FetchController {
    transport: Arc<dyn EmployeeTransport>,
    retry_policy: RetryPolicy,
    state: RwLock<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl FetchController {
    pub fn new(transport: Arc<dyn EmployeeTransport>) -> Arc<Self> {
        Self::with_retry_policy(transport, RetryPolicy::default())
    }

    pub fn offline() -> Arc<Self> {
        Self::new(Arc::new(UnavailableTransport))
    }

    pub fn with_retry_policy(
        transport: Arc<dyn EmployeeTransport>,
        retry_policy: RetryPolicy,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            transport,
            retry_policy,
            state: RwLock::new(ControllerState::default()),
            events,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    pub async fn state(&self) -> ControllerState {
        self.state.read().await.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn load(&self, search: &str, page: u64, per_page: u64) {
        self.load_query(EmployeeQuery::new(search, page, per_page))
            .await
    }

    /// Fetches one page, retrying on a fixed delay until the attempt budget runs out.
    ///
    /// Never returns an error: exhaustion is reported by setting `degraded` and logging a
    /// warning. Two overlapping calls are not serialized; the last one to finish wins.
    pub async fn load_query(&self, query: EmployeeQuery) {
        {
            let mut state = self.state.write().await;
            state.error = None;
            state.degraded = false;
            state.loading = true;
        }
        self.emit(ControllerEvent::LoadStarted {
            query: query.clone(),
        });

        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(
                search = %query.search,
                page = query.page,
                per_page = query.per_page,
                attempt,
                max_attempts,
                "directory: fetch attempt"
            );

            let err = match self.transport.fetch_page(&query).await {
                Ok(body) => {
                    let (records, page) = body.into_parts();
                    let count = records.len();
                    {
                        let mut state = self.state.write().await;
                        state.records = records;
                        state.page = page;
                        state.loading = false;
                    }
                    info!(
                        attempt,
                        current_page = page.current_page,
                        total = page.total,
                        records = count,
                        "directory: employee page loaded"
                    );
                    self.emit(ControllerEvent::Loaded {
                        page,
                        records: count,
                    });
                    return;
                }
                Err(err) => err,
            };

            self.emit(ControllerEvent::AttemptFailed {
                attempt,
                max_attempts,
                reason: err.to_string(),
            });

            if !self.retry_policy.should_retry(attempt) {
                warn!(
                    search = %query.search,
                    page = query.page,
                    per_page = query.per_page,
                    attempts = attempt,
                    "directory: fetch failed after {attempt} attempts; entering degraded mode: {err}"
                );
                {
                    let mut state = self.state.write().await;
                    state.degraded = true;
                    state.loading = false;
                }
                self.emit(ControllerEvent::Degraded {
                    attempts: attempt,
                    last_error: err.to_string(),
                });
                return;
            }

            debug!(
                attempt,
                delay_ms = self.retry_policy.delay().as_millis() as u64,
                "directory: fetch attempt failed, retrying: {err}"
            );
            tokio::time::sleep(self.retry_policy.delay()).await;
        }
    }

    /// Replaces the current page with the built-in sample directory.
    pub async fn load_fallback(&self, per_page: u64) {
        let page = fallback::sample_page_info(per_page);
        {
            let mut state = self.state.write().await;
            state.records = fallback::sample_employees();
            state.page = page;
            state.degraded = false;
            state.loading = false;
            state.error = None;
        }
        info!(per_page, "directory: sample employees loaded");
        self.emit(ControllerEvent::FallbackLoaded { page });
    }

    fn emit(&self, event: ControllerEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
