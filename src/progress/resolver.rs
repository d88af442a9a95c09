// Stage resolution: progress payload -> ordered, display-ready timeline

use chrono::{DateTime, FixedOffset};
use crate::models::{Locale, StageStatus, StageView};
use crate::utils::parse_progress_time;
use super::catalog::{StageDefinition, STAGE_CATALOG};
use super::record::ProgressRecord;

/// Turns progress records into timelines for one display locale
///
/// Every method is total: missing, null or malformed data degrades to a
/// default instead of an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageResolver {
    locale: Locale,
}

impl StageResolver {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Map a progress record onto the stage catalog
    ///
    /// Output follows catalog order. A stage is kept when it is always shown
    /// or when any of its candidate fields appears in the record, even as
    /// null. Whether a stage is kept does not depend on the status/time
    /// fallbacks.
    pub fn map_stages(&self, progress: &ProgressRecord) -> Vec<StageView> {
        STAGE_CATALOG
            .iter()
            .filter(|stage| should_include(progress, stage))
            .map(|stage| self.resolve_stage(progress, stage))
            .collect()
    }

    fn resolve_stage(&self, progress: &ProgressRecord, stage: &StageDefinition) -> StageView {
        let status = StageStatus::parse(resolve_status(progress, stage));
        let time = resolve_time(progress, stage).map(str::to_string);

        StageView {
            key: stage.key,
            label: stage.label(self.locale),
            status_text: status.text(self.locale),
            color: status.color(),
            status,
            time,
        }
    }

    /// Label of the first stage not yet finished, else of the last stage
    pub fn current_stage(&self, progress: &ProgressRecord) -> Option<&'static str> {
        let stages = self.map_stages(progress);
        stages
            .iter()
            .find(|stage| !stage.is_finished())
            .or_else(|| stages.last())
            .map(|stage| stage.label)
    }

    /// Latest parseable stage time, or None when there is none
    pub fn last_updated_at(&self, progress: &ProgressRecord) -> Option<DateTime<FixedOffset>> {
        self.map_stages(progress)
            .iter()
            .filter_map(|stage| stage.time.as_deref())
            .filter_map(parse_progress_time)
            .max()
    }

    /// Display text for a raw status value
    pub fn status_text(&self, status: Option<&str>) -> String {
        match status {
            None | Some("") => self.locale.unknown_text().to_string(),
            Some(raw) => StageStatus::parse(raw).text(self.locale),
        }
    }
}

fn should_include(progress: &ProgressRecord, stage: &StageDefinition) -> bool {
    stage.always_show
        || progress.any_present(stage.status_fields)
        || progress.any_present(stage.time_fields)
}

fn resolve_status<'a>(progress: &'a ProgressRecord, stage: &StageDefinition) -> &'a str {
    if let Some(status) = progress.first_of(stage.status_fields) {
        return status;
    }
    // Older payloads only carry `<key>_status` / `<key>_stage`
    progress
        .get_non_empty(&format!("{}_status", stage.key))
        .or_else(|| progress.get_non_empty(&format!("{}_stage", stage.key)))
        .unwrap_or("processing")
}

fn resolve_time<'a>(progress: &'a ProgressRecord, stage: &StageDefinition) -> Option<&'a str> {
    progress
        .first_of(stage.time_fields)
        .or_else(|| progress.get_non_empty(&format!("{}_time", stage.key)))
}

/// Fill the submission stage's time from the paper's own submission date
///
/// Only applies when the progress payload left that time empty.
pub fn with_submission_date(mut stages: Vec<StageView>, submission_date: Option<&str>) -> Vec<StageView> {
    let Some(date) = submission_date.filter(|d| !d.is_empty()) else {
        return stages;
    };
    for stage in stages.iter_mut() {
        if stage.key == "submission" && stage.time.as_deref().map_or(true, str::is_empty) {
            stage.time = Some(date.to_string());
        }
    }
    stages
}

/// Timeline for `progress` in the default locale
pub fn map_progress_to_stages(progress: &ProgressRecord) -> Vec<StageView> {
    StageResolver::default().map_stages(progress)
}

/// Label of the stage the paper is currently in, in the default locale
pub fn derive_current_stage(progress: &ProgressRecord) -> Option<&'static str> {
    StageResolver::default().current_stage(progress)
}

/// Latest stage time in the payload
pub fn derive_last_updated_at(progress: &ProgressRecord) -> Option<DateTime<FixedOffset>> {
    StageResolver::default().last_updated_at(progress)
}

/// Status text in the default locale
pub fn get_progress_status_text(status: Option<&str>) -> String {
    StageResolver::default().status_text(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageColor;

    fn keys(stages: &[StageView]) -> Vec<&'static str> {
        stages.iter().map(|s| s.key).collect()
    }

    #[test]
    fn test_empty_record_shows_always_show_stages() {
        let stages = map_progress_to_stages(&ProgressRecord::new());
        assert_eq!(
            keys(&stages),
            vec![
                "submission",
                "initial_review",
                "review",
                "revision",
                "re_review",
                "acceptance",
                "payment",
                "schedule",
            ]
        );
        for stage in &stages {
            assert_eq!(stage.status, StageStatus::Processing);
            assert_eq!(stage.status_text, "处理中");
            assert_eq!(stage.color, StageColor::Blue);
            assert_eq!(stage.time, None);
        }
    }

    #[test]
    fn test_finished_submission() {
        let progress = ProgressRecord::new()
            .with("submission_status", "finished")
            .with("submission_time", "2024-01-02T10:00:00");
        let stages = map_progress_to_stages(&progress);
        let submission = &stages[0];
        assert_eq!(submission.key, "submission");
        assert_eq!(submission.status, StageStatus::Finished);
        assert_eq!(submission.status_text, "已完成");
        assert_eq!(submission.color, StageColor::Green);
        assert_eq!(submission.time.as_deref(), Some("2024-01-02T10:00:00"));
    }

    #[test]
    fn test_second_candidate_field_wins_when_first_is_null() {
        let progress = ProgressRecord::new()
            .with_null("review_status")
            .with("review_stage", "finished");
        let stages = map_progress_to_stages(&progress);
        let review = stages.iter().find(|s| s.key == "review").unwrap();
        assert_eq!(review.status, StageStatus::Finished);
    }

    #[test]
    fn test_legacy_stage_field_for_single_candidate_stage() {
        // editing only lists editing_status; editing_stage is the legacy spelling
        let progress = ProgressRecord::new()
            .with_null("editing_status")
            .with("editing_stage", "finished");
        let stages = map_progress_to_stages(&progress);
        let editing = stages.iter().find(|s| s.key == "editing").unwrap();
        assert_eq!(editing.status, StageStatus::Finished);
    }

    #[test]
    fn test_hidden_stage_included_when_field_present_as_null() {
        let progress = ProgressRecord::new().with_null("publication_time");
        let stages = map_progress_to_stages(&progress);
        let publication = stages.last().unwrap();
        assert_eq!(publication.key, "publication");
        assert_eq!(publication.status, StageStatus::Processing);
        assert_eq!(publication.time, None);
    }

    #[test]
    fn test_legacy_only_field_does_not_include_hidden_stage() {
        // editing_stage is not a candidate field, so editing stays hidden
        let progress = ProgressRecord::new().with("editing_stage", "finished");
        let stages = map_progress_to_stages(&progress);
        assert!(stages.iter().all(|s| s.key != "editing"));
    }

    #[test]
    fn test_unknown_status_passes_through_gray() {
        let progress = ProgressRecord::new().with("acceptance_status", "rejected");
        let stages = map_progress_to_stages(&progress);
        let acceptance = stages.iter().find(|s| s.key == "acceptance").unwrap();
        assert_eq!(acceptance.status, StageStatus::Other("rejected".to_string()));
        assert_eq!(acceptance.status_text, "rejected");
        assert_eq!(acceptance.color, StageColor::Gray);
    }

    #[test]
    fn test_output_follows_catalog_order() {
        let progress = ProgressRecord::new()
            .with("publication_status", "processing")
            .with("expert_assignment_time", "2024-02-01 09:00:00")
            .with("quality_check_status", "finished");
        let stages = map_progress_to_stages(&progress);
        let catalog_keys: Vec<&str> = STAGE_CATALOG
            .iter()
            .map(|s| s.key)
            .filter(|k| keys(&stages).contains(k))
            .collect();
        assert_eq!(keys(&stages), catalog_keys);
        assert_eq!(stages.len(), 11);
    }

    #[test]
    fn test_mapping_is_repeatable() {
        let progress = ProgressRecord::new()
            .with("submission_status", "finished")
            .with("review_time", "2024-03-01 12:00:00");
        assert_eq!(map_progress_to_stages(&progress), map_progress_to_stages(&progress));
    }

    #[test]
    fn test_english_locale_labels() {
        let resolver = StageResolver::new(Locale::En);
        let stages = resolver.map_stages(&ProgressRecord::new().with("submission_status", "finished"));
        assert_eq!(stages[0].label, "Submission");
        assert_eq!(stages[0].status_text, "Finished");
        assert_eq!(stages[1].status_text, "Processing");
    }

    #[test]
    fn test_current_stage_is_first_unfinished() {
        let progress = ProgressRecord::new()
            .with("submission_status", "finished")
            .with("initial_review_status", "processing");
        assert_eq!(derive_current_stage(&progress), Some("初审"));
    }

    #[test]
    fn test_current_stage_when_all_finished() {
        let mut progress = ProgressRecord::new();
        for stage in STAGE_CATALOG.iter().filter(|s| s.always_show) {
            progress.insert(stage.status_fields[0], Some("finished".to_string()));
        }
        assert_eq!(derive_current_stage(&progress), Some("排期"));

        progress.insert("publication_status", Some("finished".to_string()));
        assert_eq!(derive_current_stage(&progress), Some("出版"));
    }

    #[test]
    fn test_last_updated_ignores_malformed_times() {
        let progress = ProgressRecord::new()
            .with("submission_time", "2024-01-02T10:00:00")
            .with("initial_review_time", "2024-01-05 08:30:00")
            .with("review_time", "yesterday");
        assert_eq!(
            derive_last_updated_at(&progress),
            parse_progress_time("2024-01-05T08:30:00")
        );
    }

    #[test]
    fn test_last_updated_reads_bare_dates_as_utc_midnight() {
        // 23:30Z the day before is earlier than the bare date; 00:30Z is later
        let progress = ProgressRecord::new()
            .with("submission_time", "2024-01-02")
            .with("initial_review_time", "2024-01-01T23:30:00Z");
        assert_eq!(
            derive_last_updated_at(&progress),
            parse_progress_time("2024-01-02T00:00:00Z")
        );

        let progress = ProgressRecord::new()
            .with("submission_time", "2024-01-02")
            .with("initial_review_time", "2024-01-02T00:30Z");
        assert_eq!(
            derive_last_updated_at(&progress),
            parse_progress_time("2024-01-02T00:30:00+00:00")
        );
    }

    #[test]
    fn test_last_updated_none_without_valid_times() {
        assert_eq!(derive_last_updated_at(&ProgressRecord::new()), None);
        let progress = ProgressRecord::new().with("review_time", "n/a");
        assert_eq!(derive_last_updated_at(&progress), None);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(get_progress_status_text(Some("processing")), "处理中");
        assert_eq!(get_progress_status_text(Some("finished")), "已完成");
        assert_eq!(get_progress_status_text(Some("withdrawn")), "withdrawn");
        assert_eq!(get_progress_status_text(None), "未知");
        assert_eq!(get_progress_status_text(Some("")), "未知");
    }

    #[test]
    fn test_with_submission_date_fills_only_missing_time() {
        let stages = map_progress_to_stages(&ProgressRecord::new());
        let filled = with_submission_date(stages, Some("2024-01-01 09:00:00"));
        assert_eq!(filled[0].time.as_deref(), Some("2024-01-01 09:00:00"));
        assert!(filled[1..].iter().all(|s| s.time.is_none()));

        let progress = ProgressRecord::new().with("submission_time", "2024-01-02 10:00:00");
        let kept = with_submission_date(map_progress_to_stages(&progress), Some("2024-01-01"));
        assert_eq!(kept[0].time.as_deref(), Some("2024-01-02 10:00:00"));
    }
}
