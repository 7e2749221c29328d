use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use netliq_core::{NetliqError, Series, SeriesSource, SeriesSpec};

/// Instruction for how a fetch should behave for a given series id.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(NetliqError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior<Series>>,
    fallback: Option<MockBehavior<Series>>,
    requests: Vec<(String, Option<NaiveDate>)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for fetches of a specific series id.
    pub async fn set_behavior(&self, series_id: &str, behavior: MockBehavior<Series>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(series_id.to_string(), behavior);
    }

    /// Set the behavior for series ids without a specific rule.
    pub async fn set_fallback_behavior(&self, behavior: MockBehavior<Series>) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Return a copy of the fetch log as `(series_id, start)` pairs.
    pub async fn requests(&self) -> Vec<(String, Option<NaiveDate>)> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the fetch log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.fallback = None;
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    catalog: Vec<SeriesSpec>,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source serving `catalog`, and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
        catalog: Vec<SeriesSpec>,
    ) -> (Arc<dyn SeriesSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            catalog,
            state,
        });
        (me as Arc<dyn SeriesSource>, controller)
    }
}

#[async_trait]
impl SeriesSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn catalog(&self) -> &[SeriesSpec] {
        &self.catalog
    }

    async fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, NetliqError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push((series_id.to_string(), start));
            guard
                .rules
                .get(series_id)
                .or(guard.fallback.as_ref())
                .cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(NetliqError::Data(format!(
                "no behavior configured for {series_id}"
            ))),
        }
    }
}
