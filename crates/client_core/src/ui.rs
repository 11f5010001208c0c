//! Ports for the UI elements the submission controller drives.
//!
//! Each port stands in for one element of the prediction page: the form,
//! the submit button with its label, the result panel, the value display and
//! the blocking alert surface. Implementations use interior mutability since
//! the controller only ever holds shared references.

use shared::domain::FormInputSet;

/// The form whose fields are serialized on submit.
pub trait FormSource: Send + Sync {
    fn snapshot(&self) -> FormInputSet;
}

/// Submit button together with its label element.
pub trait SubmitControl: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, text: &str);
    fn set_disabled(&self, disabled: bool);
}

/// Container toggled through a hidden flag and a shown (animated) flag.
pub trait ResultPanel: Send + Sync {
    fn set_hidden(&self, hidden: bool);
    fn set_shown(&self, shown: bool);
}

pub trait ValueDisplay: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Blocking, modal notification.
pub trait Alerts: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
