//! One form instance: its values, its inline errors and its submit guard.
//!
//! # Design
//! `FormState` owns everything a displayed form needs. Input events go
//! through `update`, which swaps in a new `FormRecord` and clears that
//! field's error. A submit is split the same way as the client:
//! `begin_submit` validates and yields the request (or explains why none was
//! made), the host executes it, and `finish_submit` turns whatever came back
//! into a `Notice` and always releases `is_submitting`. `submit` runs all
//! three steps for hosts that can block on a `Transport`.

use tracing::{info, warn};

use crate::client::RegistrationClient;
use crate::error::{FormError, Rejection, SubmitBlocked, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::record::{FieldValue, FormRecord};
use crate::schema::FormSchema;
use crate::validate::{validate, ValidationErrors};

/// Shown when a request produced no response at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the server. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The server accepted the submission; the form was reset.
    Success,
    /// The server answered with a non-2xx status; the form was kept.
    Rejected,
    /// No response was obtained; the form was kept.
    Failure,
}

/// The message a form shows after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    record: FormRecord,
    errors: ValidationErrors,
    is_submitting: bool,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            record: FormRecord::defaults(&schema),
            schema,
            errors: ValidationErrors::new(),
            is_submitting: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Apply raw input to `field` and return the new record.
    ///
    /// Editing is allowed while a submission is outstanding.
    pub fn update(&mut self, field: &str, raw: &str) -> Result<&FormRecord, FormError> {
        let value = self.schema.coerce(field, raw)?;
        self.set(field, value)
    }

    /// Store an already-typed value, bypassing text coercion. The value must
    /// fit the field's kind: integer fields take an integer or `Null`, every
    /// other field takes text.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<&FormRecord, FormError> {
        let spec = self
            .schema
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        if !spec.accepts(&value) {
            return Err(FormError::KindMismatch {
                field: field.to_string(),
                expected: spec.kind.expects(),
            });
        }
        self.record = self.record.with_value(field, value)?;
        self.errors.clear_field(field);
        Ok(&self.record)
    }

    /// Recompute the inline errors from the current record.
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = validate(&self.schema, &self.record);
        &self.errors
    }

    /// Back to the values the form had when first displayed.
    pub fn reset(&mut self) {
        self.record = FormRecord::defaults(&self.schema);
        self.errors = ValidationErrors::new();
    }

    /// Validate and build the submission request, marking the form as
    /// submitting. Nothing is sent when this returns `Err`.
    pub fn begin_submit(
        &mut self,
        client: &RegistrationClient,
    ) -> Result<HttpRequest, SubmitBlocked> {
        if self.is_submitting {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.validate().is_empty() {
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        }
        let request = client.build_submit(&self.record)?;
        self.is_submitting = true;
        Ok(request)
    }

    /// Settle an outstanding submission.
    ///
    /// A 2xx resets the form. A rejection or a transport failure leaves the
    /// record exactly as it was submitted.
    pub fn finish_submit(
        &mut self,
        client: &RegistrationClient,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Notice {
        self.is_submitting = false;
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return self.fail_transport(&e),
        };
        match client.parse_submit(response) {
            Ok(ack) => {
                info!(status = ack.status, "submission accepted");
                self.reset();
                Notice {
                    kind: NoticeKind::Success,
                    message: ack.message,
                }
            }
            Err(Rejection { status, message }) => {
                warn!(status, %message, "submission rejected");
                Notice {
                    kind: NoticeKind::Rejected,
                    message,
                }
            }
        }
    }

    /// Settle an outstanding submission that never got a response.
    pub fn fail_transport(&mut self, error: &TransportError) -> Notice {
        self.is_submitting = false;
        warn!(error = %error, "submission did not reach the server");
        Notice {
            kind: NoticeKind::Failure,
            message: TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Validate, send through `transport` and settle, in one call.
    pub fn submit<T: Transport + ?Sized>(
        &mut self,
        client: &RegistrationClient,
        transport: &T,
    ) -> Result<Notice, SubmitBlocked> {
        let request = self.begin_submit(client)?;
        let outcome = transport.execute(&request);
        Ok(self.finish_submit(client, outcome))
    }
}
