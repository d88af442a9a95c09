// Static stage catalog for the paper review/publication workflow

use crate::models::Locale;

/// One step of the workflow and where to find its data in a progress payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDefinition {
    pub key: &'static str,
    pub label_zh: &'static str,
    pub label_en: &'static str,
    /// Candidate status fields, probed in order
    pub status_fields: &'static [&'static str],
    /// Candidate time fields, probed in order
    pub time_fields: &'static [&'static str],
    /// Shown on every timeline, even when the payload says nothing about it
    pub always_show: bool,
}

impl StageDefinition {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => self.label_zh,
            Locale::En => self.label_en,
        }
    }
}

/// Workflow stages in display order
pub static STAGE_CATALOG: [StageDefinition; 12] = [
    StageDefinition {
        key: "submission",
        label_zh: "收稿",
        label_en: "Submission",
        status_fields: &["submission_status", "submission_stage"],
        time_fields: &["submission_time"],
        always_show: true,
    },
    StageDefinition {
        key: "initial_review",
        label_zh: "初审",
        label_en: "Initial review",
        status_fields: &["initial_review_status", "initial_review_stage"],
        time_fields: &["initial_review_time"],
        always_show: true,
    },
    StageDefinition {
        key: "expert_assignment",
        label_zh: "指派专家",
        label_en: "Expert assignment",
        status_fields: &["expert_assignment_status"],
        time_fields: &["expert_assignment_time"],
        always_show: false,
    },
    StageDefinition {
        key: "review",
        label_zh: "外审",
        label_en: "External review",
        status_fields: &["review_status", "review_stage"],
        time_fields: &["review_time"],
        always_show: true,
    },
    StageDefinition {
        key: "revision",
        label_zh: "作者修改",
        label_en: "Author revision",
        status_fields: &["revision_status", "revision_stage"],
        time_fields: &["revision_time"],
        always_show: true,
    },
    StageDefinition {
        key: "re_review",
        label_zh: "复审",
        label_en: "Re-review",
        status_fields: &["re_review_status", "re_review_stage"],
        time_fields: &["re_review_time"],
        always_show: true,
    },
    StageDefinition {
        key: "editing",
        label_zh: "编辑处理",
        label_en: "Editing",
        status_fields: &["editing_status"],
        time_fields: &["editing_time"],
        always_show: false,
    },
    StageDefinition {
        key: "quality_check",
        label_zh: "质量检查",
        label_en: "Quality check",
        status_fields: &["quality_check_status"],
        time_fields: &["quality_check_time"],
        always_show: false,
    },
    StageDefinition {
        key: "acceptance",
        label_zh: "录用",
        label_en: "Acceptance",
        status_fields: &["acceptance_status", "acceptance_stage"],
        time_fields: &["acceptance_time"],
        always_show: true,
    },
    StageDefinition {
        key: "payment",
        label_zh: "支付版面费",
        label_en: "Page fee payment",
        status_fields: &["payment_status", "payment_stage"],
        time_fields: &["payment_time"],
        always_show: true,
    },
    StageDefinition {
        key: "schedule",
        label_zh: "排期",
        label_en: "Scheduling",
        status_fields: &["schedule_status", "schedule_stage"],
        time_fields: &["schedule_time"],
        always_show: true,
    },
    StageDefinition {
        key: "publication",
        label_zh: "出版",
        label_en: "Publication",
        status_fields: &["publication_status", "publication_stage"],
        time_fields: &["publication_time"],
        always_show: false,
    },
];

/// Look up a stage definition by key
pub fn find_stage(key: &str) -> Option<&'static StageDefinition> {
    STAGE_CATALOG.iter().find(|stage| stage.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_are_unique() {
        let keys: HashSet<&str> = STAGE_CATALOG.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), STAGE_CATALOG.len());
    }

    #[test]
    fn test_always_show_stages() {
        let hidden: Vec<&str> = STAGE_CATALOG
            .iter()
            .filter(|s| !s.always_show)
            .map(|s| s.key)
            .collect();
        assert_eq!(
            hidden,
            vec!["expert_assignment", "editing", "quality_check", "publication"]
        );
    }

    #[test]
    fn test_find_stage() {
        let stage = find_stage("payment").unwrap();
        assert_eq!(stage.label(Locale::Zh), "支付版面费");
        assert_eq!(stage.label(Locale::En), "Page fee payment");
        assert!(find_stage("payments").is_none());
    }
}
