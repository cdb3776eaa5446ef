//! Run/submit execution guarded by the testing lock.

use tracing::{debug, info};

use crate::{view::AggregateVerdict, ClientEvent, ContestClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    Run,
    Submit,
}

impl TestMode {
    fn command(self) -> &'static str {
        match self {
            TestMode::Run => "run",
            TestMode::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// Another run/submit held the testing lock; nothing was sent.
    Skipped,
    /// The backend returned no cases; the previous result view is kept.
    NoCases,
    Judged(AggregateVerdict),
    Failed,
}

impl ContestClient {
    pub async fn run(&self) -> TestOutcome {
        self.execute(TestMode::Run).await
    }

    pub async fn submit(&self) -> TestOutcome {
        self.execute(TestMode::Submit).await
    }

    /// Idle -> Testing -> Idle. Calls made while Testing are dropped, not
    /// queued, and the lock is released on every resolution of the backend
    /// call. There is no timeout: a stalled backend keeps the lock.
    async fn execute(&self, mode: TestMode) -> TestOutcome {
        {
            let mut state = self.state.lock().await;
            if state.view.testing {
                debug!(command = mode.command(), "testing lock held; dropping request");
                return TestOutcome::Skipped;
            }
            state.view.testing = true;
        }
        debug!(command = mode.command(), "testing lock taken");

        let result = match mode {
            TestMode::Run => self.gateway.run().await,
            TestMode::Submit => self.gateway.submit().await,
        };

        let mut state = self.state.lock().await;
        state.view.testing = false;
        match result {
            Ok(verdicts) => {
                let cases = verdicts.len();
                let Some(aggregate) = state.view.apply_verdicts(verdicts) else {
                    debug!(command = mode.command(), "no verdicts returned; keeping result view");
                    return TestOutcome::NoCases;
                };
                drop(state);
                info!(
                    command = mode.command(),
                    cases,
                    verdict = aggregate.label(),
                    "verdicts applied"
                );
                self.emit(ClientEvent::VerdictsApplied { aggregate, cases });
                TestOutcome::Judged(aggregate)
            }
            Err(err) => {
                drop(state);
                self.report_failure(&err);
                TestOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
