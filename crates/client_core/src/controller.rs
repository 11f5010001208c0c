//! Form submission controller: busy state, request, result rendering, cleanup.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{format::format_prediction, protocol::PredictionOutcome};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    ui::{Alerts, FormSource, ResultPanel, SubmitControl, SubmitEvent, ValueDisplay},
    PredictionService,
};

pub const BUSY_LABEL: &str = "Calculating...";
pub const GENERIC_FAILURE_ALERT: &str = "An error occurred while fetching the prediction.";
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(10);

#[derive(Clone)]
pub struct UiBindings {
    pub form: Arc<dyn FormSource>,
    pub submit: Arc<dyn SubmitControl>,
    pub result: Arc<dyn ResultPanel>,
    pub value: Arc<dyn ValueDisplay>,
    pub alerts: Arc<dyn Alerts>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Prediction rendered; carries the formatted text.
    Displayed(String),
    /// Service answered with a non-success status; carries its message.
    Rejected(String),
    /// Transport, decode or shape failure.
    Failed,
    /// Another submission was still in flight.
    Ignored,
}

pub struct FormSubmissionController {
    service: Arc<dyn PredictionService>,
    ui: UiBindings,
    reveal_delay: Duration,
    in_flight: AtomicBool,
    pending_reveal: Mutex<Option<JoinHandle<()>>>,
}

/// Restores the submit control and clears the in-flight flag when dropped.
struct BusyGuard<'a> {
    submit: &'a dyn SubmitControl,
    original_label: String,
    in_flight: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.submit.set_label(&self.original_label);
        self.submit.set_disabled(false);
        self.in_flight.store(false, Ordering::Release);
    }
}

impl FormSubmissionController {
    pub fn new(service: Arc<dyn PredictionService>, ui: UiBindings) -> Self {
        Self {
            service,
            ui,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            in_flight: AtomicBool::new(false),
            pending_reveal: Mutex::new(None),
        }
    }

    pub fn with_reveal_delay(mut self, reveal_delay: Duration) -> Self {
        self.reveal_delay = reveal_delay;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        event.prevent_default();

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("ignoring submit while a prediction request is in flight");
            return SubmissionOutcome::Ignored;
        }

        let busy = BusyGuard {
            submit: self.ui.submit.as_ref(),
            original_label: self.ui.submit.label(),
            in_flight: &self.in_flight,
        };
        self.ui.submit.set_label(BUSY_LABEL);
        self.ui.submit.set_disabled(true);
        if let Some(reveal) = self.pending_reveal.lock().await.take() {
            reveal.abort();
        }
        self.ui.result.set_shown(false);

        let fields = self.ui.form.snapshot();
        info!(fields = fields.len(), "submitting prediction form");

        let outcome = match self.service.predict(&fields).await {
            Ok(PredictionOutcome::Success { prediction }) => {
                let text = format_prediction(prediction);
                debug!(prediction, text = %text, "rendering prediction");
                self.ui.value.set_text(&text);
                self.ui.result.set_hidden(false);
                self.schedule_reveal().await;
                SubmissionOutcome::Displayed(text)
            }
            Ok(PredictionOutcome::Failure { message }) => {
                warn!(message = %message, "prediction service rejected the form");
                self.ui.alerts.alert(&format!("Error: {message}"));
                SubmissionOutcome::Rejected(message)
            }
            Err(err) => {
                error!(error = %err, "error fetching prediction");
                self.ui.alerts.alert(GENERIC_FAILURE_ALERT);
                SubmissionOutcome::Failed
            }
        };

        drop(busy);
        outcome
    }

    /// Waits for a pending delayed reveal, if any.
    pub async fn settle(&self) {
        let pending = self.pending_reveal.lock().await.take();
        if let Some(reveal) = pending {
            let _ = reveal.await;
        }
    }

    async fn schedule_reveal(&self) {
        let result = Arc::clone(&self.ui.result);
        let delay = self.reveal_delay;
        let reveal = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            result.set_shown(true);
        });
        *self.pending_reveal.lock().await = Some(reveal);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
