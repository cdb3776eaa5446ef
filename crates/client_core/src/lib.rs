//! Client-side orchestration core for the contest assistant.
//!
//! [`ContestClient`] owns the session state and drives every backend call
//! through a [`CommandGateway`]. Operations never return errors to the
//! caller: failures surface as [`ClientEvent::Diagnostic`] events and the
//! state stays at its last good value.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::warn;

pub mod config;
pub mod events;
pub mod gateway;
mod navigator;
mod orchestrator;
mod session;
pub mod state;
pub mod transport;
pub mod view;

pub use events::{ClientEvent, Diagnostic, DiagnosticBoard, DiagnosticLevel, WindowLayout};
pub use gateway::{CommandGateway, FailureKind, GatewayError, GatewayResult};
pub use orchestrator::{TestMode, TestOutcome};
pub use state::{ProblemFilter, ProjectSession, SessionState};
pub use transport::HttpGateway;
pub use view::{AggregateVerdict, CaseView, Presentation, ResultTab, SessionViewState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct ContestClient {
    gateway: Arc<dyn CommandGateway>,
    state: Mutex<SessionState>,
    events: broadcast::Sender<ClientEvent>,
}

impl ContestClient {
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        Self::with_state(gateway, SessionState::default())
    }

    pub fn with_state(gateway: Arc<dyn CommandGateway>, state: SessionState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            gateway,
            state: Mutex::new(state),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn presentation(&self) -> Presentation {
        self.state.lock().await.view.present()
    }

    /// "Description" is always reachable; "Result" only once results exist.
    pub async fn switch_tab(&self, tab: ResultTab) -> bool {
        self.state.lock().await.view.switch_tab(tab)
    }

    pub async fn set_selected_case(&self, index: i64) -> usize {
        self.state.lock().await.view.set_selected_case(index)
    }

    fn emit(&self, event: ClientEvent) {
        // No subscribers is fine; the host may not be listening yet.
        let _ = self.events.send(event);
    }

    fn notify(&self, id: &str, message: impl Into<String>) {
        self.emit(ClientEvent::Diagnostic(Diagnostic::info(id, message)));
    }

    /// Keyed `cannot_<command>`.
    fn report_failure(&self, err: &GatewayError) {
        self.report_failure_as(&format!("cannot_{}", err.command()), err);
    }

    fn report_failure_as(&self, id: &str, err: &GatewayError) {
        warn!(command = err.command(), kind = ?err.kind(), "{err}");
        self.emit(ClientEvent::Diagnostic(Diagnostic::from_gateway(id, err)));
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
