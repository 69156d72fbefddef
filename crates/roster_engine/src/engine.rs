use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use roster_core::{PageRequest, RequestId};
use roster_logging::roster_trace;

use crate::{EngineError, EngineEvent, PageSource};

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        request: PageRequest,
    },
}

/// Runs page fetches on a background tokio runtime.
///
/// Every fetch is its own task, so several may be in flight at once and
/// completions arrive in whatever order the source finishes them.
pub struct EngineHandle<T> {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent<T>>,
}

impl<T: Send + 'static> EngineHandle<T> {
    pub fn new(source: Arc<dyn PageSource<T>>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("roster-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(source.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, request_id: RequestId, request: PageRequest) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Fetch {
                request_id,
                request,
            })
            .map_err(|_| EngineError::Disconnected)
    }

    pub fn try_recv(&self) -> Option<EngineEvent<T>> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completion; `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent<T>>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

async fn handle_command<T: Send + 'static>(
    source: &dyn PageSource<T>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent<T>>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request,
        } => {
            roster_trace!("request {} started for page {}", request_id, request.page);
            let result = source.fetch_page(&request).await;
            let _ = event_tx.send(EngineEvent::PageFetched {
                request_id,
                page: request.page,
                result,
            });
        }
    }
}
