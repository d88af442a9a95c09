use serde::{Serialize, Serializer};
use super::Locale;

/// Resolved status of a workflow stage
///
/// The server only ever reports two known values; anything else is kept
/// verbatim so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Processing,
    Finished,
    Other(String),
}

impl StageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StageStatus::Processing => "processing",
            StageStatus::Finished => "finished",
            StageStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "processing" => StageStatus::Processing,
            "finished" => StageStatus::Finished,
            other => StageStatus::Other(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, StageStatus::Finished)
    }

    /// Human-readable text; unrecognized values pass through unchanged
    pub fn text(&self, locale: Locale) -> String {
        match self {
            StageStatus::Processing => locale.processing_text().to_string(),
            StageStatus::Finished => locale.finished_text().to_string(),
            StageStatus::Other(raw) => raw.clone(),
        }
    }

    pub fn color(&self) -> StageColor {
        match self {
            StageStatus::Processing => StageColor::Blue,
            StageStatus::Finished => StageColor::Green,
            StageStatus::Other(_) => StageColor::Gray,
        }
    }
}

impl Serialize for StageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Display color tag for a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageColor {
    Blue,
    Green,
    Gray,
}

impl StageColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageColor::Blue => "blue",
            StageColor::Green => "green",
            StageColor::Gray => "gray",
        }
    }
}

/// One display-ready entry of a paper's progress timeline
///
/// Produced fresh by the stage resolver on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub key: &'static str,
    pub label: &'static str,
    pub status: StageStatus,
    pub status_text: String,
    pub color: StageColor,
    pub time: Option<String>,
}

impl StageView {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Completion time worth showing: only finished stages display one
    pub fn completed_at(&self) -> Option<&str> {
        if self.is_finished() {
            self.time.as_deref()
        } else {
            None
        }
    }
}
