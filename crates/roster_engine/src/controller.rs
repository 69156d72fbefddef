use std::sync::Arc;
use std::time::{Duration, Instant};

use roster_core::{update, Effect, ListState, ListViewModel, Msg, StalePolicy};
use roster_logging::{roster_debug, roster_error, roster_info};

use crate::{EngineError, EngineEvent, EngineHandle, PageSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub initial_page: u32,
    pub stale_policy: StalePolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_page: 1,
            stale_policy: StalePolicy::default(),
        }
    }
}

/// Searchable, paginated list backed by a [`PageSource`].
///
/// Commands return immediately; fetches run on the engine and their results
/// are folded into the state by [`pump`](Self::pump) or
/// [`wait_idle`](Self::wait_idle). Fetch failures never surface as errors
/// here, only as the user-facing message in the snapshot.
pub struct PagedListController<T> {
    state: ListState<T>,
    engine: EngineHandle<T>,
}

impl<T: Clone + Send + 'static> PagedListController<T> {
    /// Start the engine and issue the initial load.
    pub fn new(
        source: Arc<dyn PageSource<T>>,
        options: ControllerOptions,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(source)?;
        let state = ListState::new(options.initial_page).with_stale_policy(options.stale_policy);
        let mut controller = Self { state, engine };
        controller.dispatch(Msg::Mounted);
        Ok(controller)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.dispatch(Msg::QueryChanged(query.into()));
    }

    pub fn load_more(&mut self) {
        self.dispatch(Msg::LoadMoreRequested);
    }

    pub fn refresh(&mut self) {
        self.dispatch(Msg::RefreshRequested);
    }

    pub fn snapshot(&self) -> ListViewModel<T> {
        self.state.view()
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.outstanding() == 0
    }

    /// Apply every completion that has already arrived. Returns whether the
    /// view changed since the previous call.
    pub fn pump(&mut self) -> bool {
        while let Some(event) = self.engine.try_recv() {
            self.apply_event(event);
        }
        self.state.consume_dirty()
    }

    /// Block until no fetch is outstanding, applying completions as they
    /// arrive. Returns `false` if `timeout` elapsed first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        // No deadline when `timeout` reaches past what `Instant` can hold.
        let deadline = Instant::now().checked_add(timeout);
        while !self.is_idle() {
            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    deadline - now
                }
                None => timeout,
            };
            match self.engine.recv_timeout(remaining) {
                Ok(Some(event)) => self.apply_event(event),
                Ok(None) => {}
                Err(err) => {
                    roster_error!("Stopped waiting for fetches: {}", err);
                    return false;
                }
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg<T>) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchPage {
                request_id,
                request,
            } => {
                roster_info!(
                    "FetchPage request_id={} page={} page_size={} query={:?}",
                    request_id,
                    request.page,
                    request.page_size,
                    request.query
                );
                let page = request.page;
                if let Err(err) = self.engine.enqueue(request_id, request) {
                    // Report it as a failed fetch so loading still settles.
                    roster_error!("Could not enqueue request {}: {}", request_id, err);
                    self.dispatch(Msg::PageFetched {
                        request_id,
                        page,
                        result: Err(err.to_string()),
                    });
                }
            }
        }
    }

    fn apply_event(&mut self, event: EngineEvent<T>) {
        let EngineEvent::PageFetched {
            request_id,
            page,
            result,
        } = event;

        let accepted = self.state.accepts(request_id);
        if !accepted {
            roster_debug!(
                "Discarding superseded response request_id={} page={}",
                request_id,
                page
            );
        }

        let result = result.map_err(|err| {
            if accepted {
                roster_error!(
                    "Error loading page {} (request_id={}): {}",
                    page,
                    request_id,
                    err
                );
            } else {
                roster_debug!("Superseded request_id={} failed: {}", request_id, err);
            }
            err.to_string()
        });
        self.dispatch(Msg::PageFetched {
            request_id,
            page,
            result,
        });
    }
}
