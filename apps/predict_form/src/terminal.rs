//! Terminal stand-ins for the prediction page elements.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use client_core::ui::{Alerts, FormSource, ResultPanel, SubmitControl, ValueDisplay};
use shared::domain::FormInputSet;

pub struct TerminalForm {
    fields: FormInputSet,
}

impl TerminalForm {
    pub fn new(fields: FormInputSet) -> Self {
        Self { fields }
    }
}

impl FormSource for TerminalForm {
    fn snapshot(&self) -> FormInputSet {
        self.fields.clone()
    }
}

pub struct TerminalButton {
    label: Mutex<String>,
    disabled: AtomicBool,
}

impl TerminalButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Mutex::new(label.into()),
            disabled: AtomicBool::new(false),
        }
    }
}

impl SubmitControl for TerminalButton {
    fn label(&self) -> String {
        self.label
            .lock()
            .map(|label| label.clone())
            .unwrap_or_default()
    }

    fn set_label(&self, text: &str) {
        if let Ok(mut label) = self.label.lock() {
            *label = text.to_string();
        }
        eprintln!("[{text}]");
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Release);
        tracing::debug!(disabled, "submit control toggled");
    }
}

/// Holds the formatted value until the panel is both unhidden and shown.
#[derive(Default)]
pub struct TerminalResult {
    hidden: AtomicBool,
    shown: AtomicBool,
    value: Mutex<String>,
}

impl TerminalResult {
    pub fn new() -> Self {
        Self {
            hidden: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn is_revealed(&self) -> bool {
        !self.hidden.load(Ordering::Acquire) && self.shown.load(Ordering::Acquire)
    }
}

impl ResultPanel for TerminalResult {
    fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::Release);
    }

    fn set_shown(&self, shown: bool) {
        self.shown.store(shown, Ordering::Release);
        if self.is_revealed() {
            let value = self.value.lock().map(|v| v.clone()).unwrap_or_default();
            println!("Prediction: {value}");
        }
    }
}

impl ValueDisplay for TerminalResult {
    fn set_text(&self, text: &str) {
        if let Ok(mut value) = self.value.lock() {
            *value = text.to_string();
        }
    }
}

pub struct TerminalAlerts;

impl Alerts for TerminalAlerts {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
