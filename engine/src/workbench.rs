//! Async driver that connects a [`Session`] to a [`QueryService`].
//!
//! Requests run on spawned tokio tasks and report back over a bounded
//! channel. The owner decides when results are applied: either drain what
//! has arrived with [`Workbench::poll_events`] from a UI tick, or await the
//! next one with [`Workbench::next_event`]. Both funnel through the session's
//! staleness check, so a result that lands after an edit is dropped.

use std::sync::Arc;

use querylens_services::QueryService;
use querylens_types::{Document, SuggestionOutcome, ValidationOutcome};
use tokio::sync::mpsc;

use crate::session::{Completion, RequestTicket, Session};

const EVENT_CHANNEL_CAPACITY: usize = 64;
const DEFAULT_EVENT_BUDGET: usize = 64;

#[derive(Debug)]
pub enum WorkbenchEvent {
    Validated {
        ticket: RequestTicket,
        outcome: ValidationOutcome,
    },
    FixSuggested {
        ticket: RequestTicket,
        outcome: SuggestionOutcome,
    },
}

pub struct Workbench<S: QueryService> {
    session: Session,
    service: Arc<S>,
    event_tx: mpsc::Sender<WorkbenchEvent>,
    event_rx: mpsc::Receiver<WorkbenchEvent>,
}

impl<S: QueryService> Workbench<S> {
    #[must_use]
    pub fn new(service: S, text: impl Into<Document>) -> Self {
        Self::with_shared(Arc::new(service), text)
    }

    #[must_use]
    pub fn with_shared(service: Arc<S>, text: impl Into<Document>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Session::new(text),
            service,
            event_tx,
            event_rx,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn edit(&mut self, text: impl Into<Document>) {
        self.session.edit(text);
    }

    /// Start validating the current document. Returns `false` when a
    /// validation is already in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn validate(&mut self) -> bool {
        let Some(request) = self.session.start_validate() else {
            return false;
        };
        tracing::debug!(
            seq = %request.ticket.seq(),
            revision = %request.ticket.revision(),
            chars = request.document.char_len(),
            "Spawning validate request"
        );

        let service = Arc::clone(&self.service);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = service.validate(request.document.text()).await;
            let event = WorkbenchEvent::Validated {
                ticket: request.ticket,
                outcome,
            };
            if tx.send(event).await.is_err() {
                tracing::debug!("Workbench dropped before validation completed");
            }
        });
        true
    }

    /// Start a fix suggestion for the current issues. Returns `false` when
    /// there is nothing to fix or a suggestion is already in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn suggest_fix(&mut self) -> bool {
        let Some(request) = self.session.start_suggest_fix() else {
            return false;
        };
        tracing::debug!(
            seq = %request.ticket.seq(),
            revision = %request.ticket.revision(),
            issues = request.issues.len(),
            "Spawning suggest-fix request"
        );

        let service = Arc::clone(&self.service);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = service
                .suggest_fix(request.document.text(), &request.issues)
                .await;
            let event = WorkbenchEvent::FixSuggested {
                ticket: request.ticket,
                outcome,
            };
            if tx.send(event).await.is_err() {
                tracing::debug!("Workbench dropped before suggestion completed");
            }
        });
        true
    }

    /// Apply every result that has already arrived, without waiting.
    pub fn poll_events(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while completions.len() < DEFAULT_EVENT_BUDGET {
            let Ok(event) = self.event_rx.try_recv() else {
                break;
            };
            completions.push(self.apply(event));
        }
        completions
    }

    /// Wait for the next result and apply it.
    ///
    /// `None` when the session is not waiting on anything; results of
    /// requests orphaned by an edit are not awaited.
    pub async fn next_event(&mut self) -> Option<Completion> {
        if !self.session.has_pending() {
            return None;
        }
        let event = self.event_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Await until no request the session cares about is outstanding.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    fn apply(&mut self, event: WorkbenchEvent) -> Completion {
        match event {
            WorkbenchEvent::Validated { ticket, outcome } => {
                self.session.finish_validate(ticket, outcome)
            }
            WorkbenchEvent::FixSuggested { ticket, outcome } => {
                self.session.finish_suggest_fix(ticket, outcome)
            }
        }
    }
}
