//! Customer form controller
//!
//! Owns the customer [`FormState`] and wires its reactive rules: the phone
//! number becomes required when notifications go out by text, and the email
//! message is derived once the email field has been quiet for a while.

use super::schema::{customer_schema, paths};
use crate::config::FormConfig;
use crate::events::{Debouncer, Subscription, ValueChange};
use crate::sink::SubmissionSink;
use crate::state::{Control, FormError, FormSnapshot, FormState};
use crate::validation::{MessageCatalog, Validator};
use anyhow::{Context, Result};
use serde_json::json;
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

const EMAIL_REQUIRED: &str = "Please enter your email address.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";

/// The customer form plus the behaviour attached to it
pub struct CustomerForm {
    state: FormState,
    messages: MessageCatalog,
    email_message: String,
    email_debouncer: Rc<Debouncer<ValueChange>>,
    email_events: UnboundedReceiver<ValueChange>,
    debounced_events: usize,
    _subscriptions: Vec<Subscription>,
}

impl CustomerForm {
    pub fn new(config: &FormConfig) -> Result<Self, FormError> {
        let state = FormState::new(&customer_schema())?;
        let (debouncer, email_events) = Debouncer::new(config.debounce_interval());
        let email_debouncer = Rc::new(debouncer);

        let notification = state.on_value_change(paths::NOTIFICATION, |form, change| {
            if let Err(err) = apply_notification(form, change.value.as_str()) {
                warn!(%err, "Could not update phone rules");
            }
        })?;

        let debouncer = Rc::clone(&email_debouncer);
        let email = state.on_value_change(paths::EMAIL, move |_, change| {
            debouncer.push(change.clone());
        })?;

        let messages = config.message_catalog(
            MessageCatalog::new()
                .with_override("required", EMAIL_REQUIRED)
                .with_override("email", EMAIL_INVALID),
        );

        Ok(Self {
            state,
            messages,
            email_message: String::new(),
            email_debouncer,
            email_events,
            debounced_events: 0,
            _subscriptions: vec![notification, email],
        })
    }

    pub fn form(&self) -> &FormState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Append a blank address; returns its index
    pub fn add_address(&mut self) -> Result<usize, FormError> {
        self.state.push(paths::ADDRESSES)
    }

    pub fn remove_address(&mut self, index: usize) -> Result<(), FormError> {
        self.state.remove_at(paths::ADDRESSES, index)
    }

    /// Choose how the customer is notified ("email" or "text")
    pub fn set_notification(&mut self, via: &str) -> Result<(), FormError> {
        self.state.set_value(paths::NOTIFICATION, via)
    }

    /// Message for the email field as of the last debounced change
    pub fn email_message(&self) -> &str {
        &self.email_message
    }

    /// Number of debounced email events handled so far
    pub fn debounced_events(&self) -> usize {
        self.debounced_events
    }

    /// Whether an email change is still waiting out the quiet interval
    pub fn is_email_pending(&self) -> bool {
        self.email_debouncer.is_pending()
    }

    /// Handle every debounced event that is already waiting; returns how many
    pub fn process_debounced(&mut self) -> usize {
        let mut handled = 0;
        while self.email_events.try_recv().is_ok() {
            handled += 1;
        }
        if handled > 0 {
            self.debounced_events += handled;
            self.refresh_email_message();
        }
        handled
    }

    /// Wait for the next debounced email change, then derive the message
    pub async fn next_email_message(&mut self) -> Option<&str> {
        self.email_events.recv().await?;
        self.debounced_events += 1;
        // later events already waiting belong to the same quiet period
        self.process_debounced();
        self.refresh_email_message();
        Some(self.email_message.as_str())
    }

    /// Snapshot the form for persistence
    pub fn save(&self) -> FormSnapshot {
        let snapshot = self.state.snapshot();
        info!(valid = snapshot.valid, "Saved: {}", snapshot.value);
        snapshot
    }

    pub async fn submit(&self, sink: &dyn SubmissionSink) -> Result<()> {
        let snapshot = self.save();
        sink.submit(snapshot)
            .await
            .context("Failed to submit customer form")?;
        info!("Customer form submitted");
        Ok(())
    }

    /// Fill in sample values for a quick walkthrough
    pub fn populate_test_data(&mut self) -> Result<(), FormError> {
        self.state.patch_value(
            "",
            &json!({
                "firstName": "Whatever",
                "lastName": "Thisis",
                "emailGroup": {"email": "wouldiuseit@hellno.com"},
                "sendCatalog": false
            }),
        )
    }

    /// Messages are only shown once the user interacted with the field
    fn refresh_email_message(&mut self) {
        self.email_message = match self.state.field(paths::EMAIL) {
            Ok(field) if field.is_touched() || field.is_dirty() => field
                .errors()
                .map(|errors| self.messages.describe(errors))
                .unwrap_or_default(),
            _ => String::new(),
        };
        debug!(message = %self.email_message, "Email message updated");
    }
}

/// Phone is required only when notifications go out by text
fn apply_notification(form: &mut FormState, via: Option<&str>) -> Result<(), FormError> {
    if via == Some("text") {
        form.set_validators(paths::PHONE, vec![Validator::Required])?;
    } else {
        form.clear_validators(paths::PHONE)?;
    }
    form.validate(paths::PHONE)
}
