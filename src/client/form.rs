//! Journaling form state.
//!
//! One candidate entry is edited at a time. Submission runs
//! `Idle -> Submitting -> Succeeded | Failed`, and dismissing the resulting
//! notification returns the form to `Idle`. Nothing is retried: after a
//! failure the user's input is left untouched so it can be resubmitted.

use chrono::NaiveDate;

use super::http::{AuthState, Credentials, EntrySubmitter, SubmitError};
use super::image::{self, ImageError, ImagePreview};
use crate::models::entry::{CreateEntryRequest, MoodEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodColor {
    pub name: String,
    pub hex: String,
}

impl MoodColor {
    fn new(name: &str, hex: &str) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    MoodColor,
    Reflection,
    Image,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::MoodColor => "mood color",
            FormField::Reflection => "reflection",
            FormField::Image => "image",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormConfig {
    pub palette: Vec<MoodColor>,
    /// Index into `palette` preselected on a fresh form.
    pub default_color: usize,
    /// Checked locally before anything is sent.
    pub required_fields: Vec<FormField>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                MoodColor::new("Espresso", "#462e05"),
                MoodColor::new("Coffee", "#6f4e37"),
                MoodColor::new("Latte", "#a38259"),
                MoodColor::new("Cappuccino", "#c69c6e"),
                MoodColor::new("Macchiato", "#e3d5b2"),
            ],
            default_color: 1,
            required_fields: vec![FormField::Date, FormField::MoodColor],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded(MoodEntry),
    Failed(SubmitError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    fn success(title: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Something went wrong.".into(),
            description: Some(description.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRefusal {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Sign in to record your mood")]
    Unauthenticated,

    #[error("Please fill in: {}", .0.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<FormField>),
}

/// A submission that passed local checks and is waiting on the service.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub credentials: Credentials,
    pub entry: CreateEntryRequest,
}

#[derive(Debug, Clone)]
pub struct JournalForm {
    config: FormConfig,
    date: Option<NaiveDate>,
    mood_color: Option<String>,
    reflection: String,
    image: Option<ImagePreview>,
    state: SubmissionState,
    notification: Option<Notification>,
}

impl JournalForm {
    pub fn new(config: FormConfig, today: NaiveDate) -> Self {
        let mood_color = config.palette.get(config.default_color).map(|c| c.hex.clone());
        Self {
            config,
            date: Some(today),
            mood_color,
            reflection: String::new(),
            image: None,
            state: SubmissionState::Idle,
            notification: None,
        }
    }

    pub fn palette(&self) -> &[MoodColor] {
        &self.config.palette
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn mood_color(&self) -> Option<&str> {
        self.mood_color.as_deref()
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn image(&self) -> Option<&ImagePreview> {
        self.image.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Select a palette color by hex. Returns false for colors outside the palette.
    pub fn select_mood_color(&mut self, hex: &str) -> bool {
        let Some(color) = self
            .config
            .palette
            .iter()
            .find(|c| c.hex.eq_ignore_ascii_case(hex))
        else {
            return false;
        };
        self.mood_color = Some(color.hex.clone());
        true
    }

    pub fn set_reflection(&mut self, text: impl Into<String>) {
        self.reflection = text.into();
    }

    pub fn attach_image(&mut self, bytes: &[u8], mime: &str) -> Result<(), ImageError> {
        self.image = Some(image::preview(bytes, mime)?);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        self.config
            .required_fields
            .iter()
            .copied()
            .filter(|field| match field {
                FormField::Date => self.date.is_none(),
                FormField::MoodColor => self.mood_color.is_none(),
                FormField::Reflection => self.reflection.trim().is_empty(),
                FormField::Image => self.image.is_none(),
            })
            .collect()
    }

    /// Move to `Submitting` and build the candidate entry.
    pub fn begin_submit(&mut self, auth: &AuthState) -> Result<PendingSubmission, SubmitRefusal> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmitRefusal::AlreadySubmitting);
        }

        let credentials = match auth {
            AuthState::Authenticated(credentials) => credentials.clone(),
            AuthState::Unauthenticated => return Err(self.refuse(SubmitRefusal::Unauthenticated)),
        };

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(self.refuse(SubmitRefusal::MissingFields(missing)));
        }

        let entry = CreateEntryRequest {
            user_id: Some(credentials.user_id.clone()),
            entry_date: self.date.map(|d| d.format("%Y-%m-%d").to_string()),
            mood_color: self.mood_color.clone(),
            reflection: Some(self.reflection.clone()),
            image_url: self.image.as_ref().map(|i| i.data_url.clone()),
        };

        self.state = SubmissionState::Submitting;
        self.notification = None;
        Ok(PendingSubmission { credentials, entry })
    }

    /// Record the service's answer. Success clears the reflection and image;
    /// failure keeps every input as it was.
    pub fn finish_submit(&mut self, result: Result<MoodEntry, SubmitError>) {
        match result {
            Ok(entry) => {
                self.reflection.clear();
                self.image = None;
                self.notification = Some(Notification::success("Entry saved successfully!"));
                self.state = SubmissionState::Succeeded(entry);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Mood entry submission failed");
                self.notification = Some(Notification::error(err.to_string()));
                self.state = SubmissionState::Failed(err);
            }
        }
    }

    pub async fn submit<S>(&mut self, submitter: &S, auth: &AuthState) -> Result<(), SubmitRefusal>
    where
        S: EntrySubmitter + ?Sized,
    {
        let pending = self.begin_submit(auth)?;
        let result = submitter.submit(&pending.credentials, &pending.entry).await;
        self.finish_submit(result);
        Ok(())
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        if self.state != SubmissionState::Submitting {
            self.state = SubmissionState::Idle;
        }
    }

    fn refuse(&mut self, refusal: SubmitRefusal) -> SubmitRefusal {
        self.notification = Some(Notification::error(refusal.to_string()));
        refusal
    }
}
