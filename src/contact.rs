use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::motion::{Scheduler, TaskHandle};
use crate::site::ContactSettings;

/// How long the "sent" confirmation stays up before the form resets.
pub const SENT_RESET: Duration = Duration::from_millis(3000);

pub const SUBJECT: &str = "Portfolio Contact Message";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill all fields.")]
    MissingField(Field),
    #[error("The {} must be at least {min} characters.", .field.as_str())]
    TooShort { field: Field, min: usize },
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Failed to send message. Please try again.")]
    Rejected(u16),
    #[error("Failed to send message. Please try again.")]
    Transport(String),
}

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Trims every field and checks the result is sendable.
    pub fn validate(&self) -> Result<ContactRecord, ContactError> {
        let record = ContactRecord::new(
            self.name.trim(),
            self.email.trim(),
            self.message.trim(),
        );
        for (field, value) in [
            (Field::Name, &record.name),
            (Field::Email, &record.email),
            (Field::Message, &record.message),
        ] {
            if value.is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        if record.name.chars().count() < NAME_MIN_CHARS {
            return Err(ContactError::TooShort {
                field: Field::Name,
                min: NAME_MIN_CHARS,
            });
        }
        if !is_email(&record.email) {
            return Err(ContactError::InvalidEmail);
        }
        if record.message.chars().count() < MESSAGE_MIN_CHARS {
            return Err(ContactError::TooShort {
                field: Field::Message,
                min: MESSAGE_MIN_CHARS,
            });
        }
        Ok(record)
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
}

/// Submission state for the contact form. A failed send always lands back
/// in `Idle` with the error kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormMachine {
    status: FormStatus,
    error: Option<ContactError>,
}

impl FormMachine {
    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self) -> Option<&ContactError> {
        self.error.as_ref()
    }

    /// Idle to Sending. Returns `false` while a send is in flight or the
    /// confirmation is still showing.
    pub fn begin(&mut self) -> bool {
        if self.status != FormStatus::Idle {
            return false;
        }
        self.status = FormStatus::Sending;
        self.error = None;
        true
    }

    pub fn succeed(&mut self) {
        if self.status == FormStatus::Sending {
            self.status = FormStatus::Sent;
        }
    }

    pub fn fail(&mut self, error: ContactError) {
        if self.status == FormStatus::Sending {
            self.status = FormStatus::Idle;
        }
        self.error = Some(error);
    }

    /// Validation failed before anything was sent.
    pub fn reject(&mut self, error: ContactError) {
        self.error = Some(error);
    }

    pub fn reset(&mut self) {
        if self.status == FormStatus::Sent {
            self.status = FormStatus::Idle;
        }
    }

    /// Validates `draft` and moves to Sending. Returns the cleaned record to
    /// send, or `None` if it was rejected or a send is already under way.
    pub fn prepare(&mut self, draft: &ContactRecord) -> Option<ContactRecord> {
        match draft.validate() {
            Ok(record) => self.begin().then_some(record),
            Err(err) => {
                self.reject(err);
                None
            }
        }
    }

    /// Applies the outcome of a send.
    pub fn finish(&mut self, outcome: Result<(), ContactError>) {
        match outcome {
            Ok(()) => self.succeed(),
            Err(err) => self.fail(err),
        }
    }
}

/// Runs `reset` once [`SENT_RESET`] has passed. Dropping the handle first
/// cancels it.
pub fn schedule_reset(scheduler: &dyn Scheduler, reset: impl FnOnce() + 'static) -> TaskHandle {
    scheduler.set_timeout(SENT_RESET, Box::new(reset))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_name: String,
}

/// Request body for the EmailJS `email/send` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailJsPayload {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl EmailJsPayload {
    pub fn new(settings: &ContactSettings, record: &ContactRecord) -> Self {
        Self {
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            user_id: settings.public_key.clone(),
            template_params: TemplateParams {
                from_name: record.name.clone(),
                from_email: record.email.clone(),
                subject: SUBJECT.to_owned(),
                message: record.message.clone(),
                to_name: settings.recipient.clone(),
            },
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Submitter {
    async fn submit(&self, record: &ContactRecord) -> Result<(), ContactError>;
}

/// Sends a validated record, logging any failure.
pub async fn deliver<S: Submitter>(
    submitter: &S,
    record: &ContactRecord,
) -> Result<(), ContactError> {
    let outcome = submitter.submit(record).await;
    if let Err(err) = &outcome {
        log::warn!("contact submission failed: {err:?}");
    }
    outcome
}

#[cfg(feature = "hydrate")]
pub use emailjs::EmailJsSubmitter;

#[cfg(feature = "hydrate")]
mod emailjs {
    use gloo_net::http::Request;

    use super::{ContactError, ContactRecord, EmailJsPayload, Submitter};
    use crate::site::ContactSettings;

    pub struct EmailJsSubmitter {
        settings: ContactSettings,
    }

    impl EmailJsSubmitter {
        pub fn new(settings: ContactSettings) -> Self {
            Self { settings }
        }
    }

    impl Submitter for EmailJsSubmitter {
        async fn submit(&self, record: &ContactRecord) -> Result<(), ContactError> {
            let payload = EmailJsPayload::new(&self.settings, record);
            let response = Request::post(&self.settings.endpoint)
                .json(&payload)
                .map_err(|err| ContactError::Transport(err.to_string()))?
                .send()
                .await
                .map_err(|err| ContactError::Transport(err.to_string()))?;
            if !response.ok() {
                return Err(ContactError::Rejected(response.status()));
            }
            log::debug!("contact message sent");
            Ok(())
        }
    }
}
