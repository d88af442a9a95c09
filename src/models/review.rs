use serde::{Deserialize, Serialize};
use super::loose;
use super::{Locale, ReviewDecision};

/// State of a review assignment from the expert's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Assigned,
    Pending,
    Overdue,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "Assigned",
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Overdue => "Overdue",
            AssignmentStatus::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Assigned" => Some(AssignmentStatus::Assigned),
            "Pending" => Some(AssignmentStatus::Pending),
            "Overdue" => Some(AssignmentStatus::Overdue),
            "Completed" => Some(AssignmentStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (AssignmentStatus::Assigned | AssignmentStatus::Pending, Locale::Zh) => "待审中",
            (AssignmentStatus::Overdue, Locale::Zh) => "已逾期",
            (AssignmentStatus::Completed, Locale::Zh) => "已完成",
            (AssignmentStatus::Assigned | AssignmentStatus::Pending, Locale::En) => "Awaiting review",
            (AssignmentStatus::Overdue, Locale::En) => "Overdue",
            (AssignmentStatus::Completed, Locale::En) => "Completed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned | AssignmentStatus::Pending => "orange",
            AssignmentStatus::Overdue => "red",
            AssignmentStatus::Completed => "green",
        }
    }
}

/// Review assignment as listed for an expert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewAssignment {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub assignment_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub paper_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub expert_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub assigned_date: Option<String>,
    #[serde(default)]
    pub assigned_due_date: Option<String>,
    #[serde(default)]
    pub submission_date: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub positive_comments: Option<String>,
    #[serde(default)]
    pub negative_comments: Option<String>,
    #[serde(default)]
    pub modification_advice: Option<String>,
}

impl ReviewAssignment {
    pub fn assignment_status(&self) -> Option<AssignmentStatus> {
        self.status.as_deref().and_then(AssignmentStatus::from_str)
    }

    /// Badge label; unknown or missing statuses read as awaiting review
    pub fn status_label(&self, locale: Locale) -> &'static str {
        self.assignment_status()
            .unwrap_or(AssignmentStatus::Pending)
            .label(locale)
    }

    pub fn status_color(&self) -> &'static str {
        self.assignment_status()
            .unwrap_or(AssignmentStatus::Pending)
            .color()
    }
}

/// Find an assignment by id, comparing ids as text
pub fn find_assignment<'a>(assignments: &'a [ReviewAssignment], assignment_id: &str) -> Option<&'a ReviewAssignment> {
    assignments
        .iter()
        .find(|a| a.assignment_id.as_deref() == Some(assignment_id))
}

/// Review opinion form submitted by an expert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOpinion {
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub positive_comments: String,
    #[serde(default)]
    pub negative_comments: String,
    #[serde(default)]
    pub modification_advice: String,
}

impl Default for ReviewOpinion {
    fn default() -> Self {
        Self {
            conclusion: Some(ReviewDecision::Accept.as_str().to_string()),
            positive_comments: String::new(),
            negative_comments: String::new(),
            modification_advice: String::new(),
        }
    }
}

impl ReviewOpinion {
    /// Pre-fill the form from a previously saved assignment
    pub fn from_assignment(assignment: &ReviewAssignment) -> Self {
        let defaults = Self::default();
        Self {
            conclusion: loose::non_empty(&assignment.conclusion)
                .map(str::to_string)
                .or(defaults.conclusion),
            positive_comments: assignment.positive_comments.clone().unwrap_or_default(),
            negative_comments: assignment.negative_comments.clone().unwrap_or_default(),
            modification_advice: assignment.modification_advice.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assignment_status_badges() {
        let mut assignment = ReviewAssignment::default();
        assert_eq!(assignment.status_label(Locale::Zh), "待审中");
        assert_eq!(assignment.status_color(), "orange");

        assignment.status = Some("Overdue".to_string());
        assert_eq!(assignment.status_label(Locale::Zh), "已逾期");
        assert_eq!(assignment.status_color(), "red");

        assignment.status = Some("Completed".to_string());
        assert_eq!(assignment.status_label(Locale::En), "Completed");
        assert_eq!(assignment.status_color(), "green");

        assignment.status = Some("Reassigned".to_string());
        assert_eq!(assignment.status_label(Locale::Zh), "待审中");
    }

    #[test]
    fn test_find_assignment_compares_as_text() {
        let assignments: Vec<ReviewAssignment> = serde_json::from_value(json!([
            {"assignment_id": 7, "paper_id": 1},
            {"assignment_id": "8", "paper_id": 2},
        ]))
        .unwrap();
        assert_eq!(find_assignment(&assignments, "7").unwrap().paper_id.as_deref(), Some("1"));
        assert_eq!(find_assignment(&assignments, "8").unwrap().paper_id.as_deref(), Some("2"));
        assert!(find_assignment(&assignments, "9").is_none());
    }

    #[test]
    fn test_opinion_prefill() {
        let blank = ReviewOpinion::from_assignment(&ReviewAssignment::default());
        assert_eq!(blank.conclusion.as_deref(), Some("Accept"));
        assert!(blank.positive_comments.is_empty());

        let assignment = ReviewAssignment {
            conclusion: Some("Reject".to_string()),
            negative_comments: Some("方法部分缺少对照实验".to_string()),
            ..Default::default()
        };
        let opinion = ReviewOpinion::from_assignment(&assignment);
        assert_eq!(opinion.conclusion.as_deref(), Some("Reject"));
        assert_eq!(opinion.negative_comments, "方法部分缺少对照实验");
    }
}
