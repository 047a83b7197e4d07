use snafu::prelude::*;

/// Text announced by the cue when a phase ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueMessage {
    summary: String,
    body: Option<String>,
}

impl CueMessage {
    /// Try to create a [`CueMessage`]. An empty body is treated as missing.
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn try_new(summary: String, body: Option<String>) -> Result<Self, TryNewCueMessageError> {
        ensure!(!summary.trim().is_empty(), EmptySummarySnafu);
        let body = body.filter(|body| !body.trim().is_empty());
        Ok(Self { summary, body })
    }

    /// Returns a reference to the summary of this [`CueMessage`].
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the body of this [`CueMessage`].
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// An error type of creating a [`CueMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewCueMessageError {
    #[snafu(display("Summary of a cue message must be non-empty"))]
    #[non_exhaustive]
    EmptySummary,
}
