//! Form state, validation and submission for the registration form.
//!
//! # Overview
//! A `FormState` holds the current values of one form variant, validates the
//! required fields and produces the single JSON `POST` that submits them.
//! Requests and responses are plain data (host-does-IO pattern): the caller
//! executes the round-trip, either by hand between `begin_submit` and
//! `finish_submit` or through a `Transport` passed to `submit`.
//!
//! # Design
//! - Each variant is a declarative `FormSchema`; coercion and validation both
//!   read it, so `house_no`-style integer fields need no special casing.
//! - `FormRecord` updates are copy-on-write.
//! - `RegistrationClient` is stateless and holds only the endpoint.
//! - Every failure ends as a `Notice` on an editable form; nothing is fatal.

pub mod client;
pub mod error;
pub mod http;
pub mod record;
pub mod schema;
pub mod state;
pub mod validate;

pub use client::{Acknowledgement, RegistrationClient, DEFAULT_ENDPOINT};
pub use error::{ApiError, FormError, Rejection, SubmitBlocked, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use record::{FieldValue, FormRecord};
pub use schema::{FieldKind, FieldSpec, FormSchema, VARIANTS};
pub use state::{FormState, Notice, NoticeKind, TRANSPORT_FAILURE_MESSAGE};
pub use validate::{validate, ValidationErrors};
