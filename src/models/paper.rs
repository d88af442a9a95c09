use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::loose::{self, value_text};
use super::Locale;

/// Reviewer conclusion, also used as the paper's review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Accept,
    #[serde(rename = "Minor Revision")]
    MinorRevision,
    #[serde(rename = "Major Revision")]
    MajorRevision,
    Reject,
}

impl ReviewDecision {
    pub const ALL: [ReviewDecision; 4] = [
        ReviewDecision::Accept,
        ReviewDecision::MinorRevision,
        ReviewDecision::MajorRevision,
        ReviewDecision::Reject,
    ];

    /// Wire spelling used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Accept => "Accept",
            ReviewDecision::MinorRevision => "Minor Revision",
            ReviewDecision::MajorRevision => "Major Revision",
            ReviewDecision::Reject => "Reject",
        }
    }

    /// Lenient parse: case-insensitive, `_`/`-`/space interchangeable
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "accept" | "accepted" => Some(ReviewDecision::Accept),
            "minor revision" => Some(ReviewDecision::MinorRevision),
            "major revision" => Some(ReviewDecision::MajorRevision),
            "reject" | "rejected" => Some(ReviewDecision::Reject),
            _ => None,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ReviewDecision::Accept, Locale::Zh) => "接受",
            (ReviewDecision::MinorRevision, Locale::Zh) => "小修",
            (ReviewDecision::MajorRevision, Locale::Zh) => "大修",
            (ReviewDecision::Reject, Locale::Zh) => "拒稿",
            (ReviewDecision::Accept, Locale::En) => "Accept",
            (ReviewDecision::MinorRevision, Locale::En) => "Minor revision",
            (ReviewDecision::MajorRevision, Locale::En) => "Major revision",
            (ReviewDecision::Reject, Locale::En) => "Reject",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ReviewDecision::Accept => "green",
            ReviewDecision::MinorRevision | ReviewDecision::MajorRevision => "orange",
            ReviewDecision::Reject => "red",
        }
    }

    /// Whether the author is expected to upload a revised manuscript
    pub fn requires_revision(&self) -> bool {
        matches!(self, ReviewDecision::MinorRevision | ReviewDecision::MajorRevision)
    }
}

/// Funding project attached to a paper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fund {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub fund_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub project_number: Option<String>,
}

/// Author line on a paper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperAuthor {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub institution_name: Option<String>,
}

/// Paper detail payload as shown on the author's paper page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperDetail {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub abstract_zh: Option<String>,
    #[serde(default)]
    pub abstract_en: Option<String>,
    #[serde(default)]
    pub keywords_zh: Option<Value>,
    #[serde(default)]
    pub keywords_en: Option<Value>,
    #[serde(default)]
    pub funds: Option<Vec<Fund>>,
    #[serde(default)]
    pub authors: Option<Vec<PaperAuthor>>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub submission_date: Option<String>,
}

impl PaperDetail {
    pub fn keywords_zh(&self) -> Vec<String> {
        normalize_keywords(self.keywords_zh.as_ref())
    }

    pub fn keywords_en(&self) -> Vec<String> {
        normalize_keywords(self.keywords_en.as_ref())
    }

    pub fn review_decision(&self) -> Option<ReviewDecision> {
        self.status.as_deref().and_then(ReviewDecision::from_str)
    }

    /// Revised manuscripts are only accepted after a minor or major revision verdict
    pub fn can_submit_revision(&self) -> bool {
        self.review_decision().map_or(false, |d| d.requires_revision())
    }

    /// Badge text for the paper status
    pub fn status_label(&self, locale: Locale) -> String {
        match (self.review_decision(), loose::non_empty(&self.status)) {
            (Some(decision), _) => decision.label(locale).to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => locale.unknown_text().to_string(),
        }
    }
}

/// Flatten a keyword list
///
/// Entries are either plain strings or `[id, label]` pairs; pairs yield their
/// label. Empty strings, null, `0` and `false` are dropped; any other
/// non-empty string is kept as-is. Anything that is not a list yields nothing.
pub fn normalize_keywords(list: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = list else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Array(pair) => pair.get(1),
            other => Some(other),
        })
        .filter(|value| is_truthy(value))
        .filter_map(value_text)
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
