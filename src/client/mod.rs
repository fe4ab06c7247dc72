//! Client side of the journal: form state and the HTTP submitter it talks to.

pub mod form;
pub mod http;
pub mod image;

pub use form::{FormConfig, JournalForm, Notification, SubmissionState};
pub use http::{AuthState, Credentials, EntrySubmitter, HttpEntryClient, SubmitError};
