use std::sync::Arc;
use std::time::Duration;

use super::{MutationCommand, MutationError, MutationSink};

/// What happened to one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub command: MutationCommand,
    pub outcome: Result<(), MutationError>,
}

impl MutationReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The view layer must revert its optimistic copy when this is true.
    pub fn needs_rollback(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Runs mutations off the async executor with a bounded wait.
///
/// Commands are never retried or cancelled; if two updates race for the same
/// entity, whichever the store applies last wins.
pub struct MutationDispatcher {
    sink: Arc<dyn MutationSink>,
    timeout: Duration,
}

impl MutationDispatcher {
    pub fn new(sink: Arc<dyn MutationSink>, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    pub async fn dispatch(&self, command: MutationCommand) -> MutationReport {
        let sink = Arc::clone(&self.sink);
        let job = command.clone();
        let task = tokio::task::spawn_blocking(move || sink.apply(&job));

        let outcome = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(MutationError::Worker(join_err.to_string())),
            Err(_) => Err(MutationError::TimedOut {
                entity_id: command.entity_id().to_string(),
                timeout: self.timeout,
            }),
        };

        match &outcome {
            Ok(()) => log::info!("{} applied", command.describe()),
            Err(err) => log::warn!("{} failed: {}", command.describe(), err),
        }

        MutationReport { command, outcome }
    }

    /// Dispatch commands one after another, in order.
    pub async fn dispatch_all(&self, commands: Vec<MutationCommand>) -> Vec<MutationReport> {
        let mut reports = Vec::with_capacity(commands.len());
        for command in commands {
            reports.push(self.dispatch(command).await);
        }
        reports
    }
}
