use serde::{Deserialize, Serialize};

/// Display language for labels and status text
///
/// The journal front end ships Chinese labels; English is available for
/// exports and terminals without CJK fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Some(Locale::Zh),
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }

    /// Text shown for a stage that is still being worked on
    pub fn processing_text(&self) -> &'static str {
        match self {
            Locale::Zh => "处理中",
            Locale::En => "Processing",
        }
    }

    /// Text shown for a completed stage
    pub fn finished_text(&self) -> &'static str {
        match self {
            Locale::Zh => "已完成",
            Locale::En => "Finished",
        }
    }

    /// Placeholder for a missing status
    pub fn unknown_text(&self) -> &'static str {
        match self {
            Locale::Zh => "未知",
            Locale::En => "Unknown",
        }
    }

    /// Placeholder shown instead of a completion time
    pub fn pending_text(&self) -> &'static str {
        match self {
            Locale::Zh => "等待完成",
            Locale::En => "Pending",
        }
    }

    /// Placeholder for an empty display field
    pub fn empty_text(&self) -> &'static str {
        "—"
    }
}
