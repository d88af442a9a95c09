// Form-level checks for the review, withdrawal, profile and keyword inputs

use crate::models::{ProfileInput, ReviewDecision, ReviewOpinion, Role, WithdrawalRequest};
use super::rules::*;
use super::FieldErrors;

/// Review comments must be substantive but bounded
pub const COMMENT_MIN_CHARS: usize = 20;
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Maximum keyword tags per language
pub const MAX_KEYWORD_TAGS: usize = 8;

pub const MIN_PHONE_CHARS: usize = 6;
pub const MIN_BANK_ACCOUNT_CHARS: usize = 8;
pub const MIN_AUTHOR_AGE: f64 = 18.0;
pub const MAX_AUTHOR_AGE: f64 = 120.0;

/// Check an expert's review opinion before submission
pub fn validate_review_opinion(opinion: &ReviewOpinion) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    match opinion.conclusion.as_deref().map(str::trim) {
        None | Some("") => errors.add("conclusion", "Please choose a conclusion"),
        Some(raw) => {
            let known = ReviewDecision::ALL.iter().any(|d| d.as_str() == raw);
            if !known {
                errors.add(
                    "conclusion",
                    format!(
                        "Invalid conclusion: '{}'. Expected one of: Accept, Minor Revision, Major Revision, Reject.",
                        raw
                    ),
                );
            }
        }
    }

    for (field, text) in [
        ("positive_comments", &opinion.positive_comments),
        ("negative_comments", &opinion.negative_comments),
        ("modification_advice", &opinion.modification_advice),
    ] {
        errors.check(field, validate_length(text, COMMENT_MIN_CHARS, COMMENT_MAX_CHARS));
    }

    errors.into_result()
}

/// Check a withdrawal request
pub fn validate_withdrawal_request(request: &WithdrawalRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if validate_positive(&request.amount).is_err() {
        errors.add("amount", "Please enter an amount greater than 0");
    }
    let account = request.bank_account_id.as_deref().unwrap_or("");
    if account.is_empty() {
        errors.add("bank_account_id", "Please choose a bank account");
    }

    errors.into_result()
}

/// Check a profile with the rules for `role`
pub fn validate_profile(role: Role, profile: &ProfileInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match role {
        Role::Author => check_author(profile, &mut errors),
        Role::Expert => check_expert(profile, &mut errors),
        Role::Editor => check_editor(profile, &mut errors),
    }
    errors.into_result()
}

fn check_contact(profile: &ProfileInput, errors: &mut FieldErrors) {
    errors.check("email", validate_email(&profile.email));
    errors.check("phone", validate_min_chars(profile.resolved_phone(), MIN_PHONE_CHARS));
}

fn check_author(profile: &ProfileInput, errors: &mut FieldErrors) {
    errors.check("name", validate_required(&profile.name));
    let age = profile.age.clone().unwrap_or_else(|| serde_json::Value::from(30));
    errors.check(
        "age",
        validate_range(&age, MIN_AUTHOR_AGE, MAX_AUTHOR_AGE).map(|_| ()),
    );
    errors.check("email", validate_email(&profile.email));

    if profile.institutions.is_empty() {
        errors.add("institutions", "At least one institution is required");
    }
    for (index, institution) in profile.institutions.iter().enumerate() {
        errors.check(
            &format!("institutions.{}.name", index),
            validate_required(&institution.name),
        );
        errors.check(
            &format!("institutions.{}.city", index),
            validate_required(&institution.city),
        );
        errors.check(
            &format!("institutions.{}.postal_code", index),
            validate_required(institution.postal_code.as_deref().unwrap_or("")),
        );
    }

    errors.check("degree", validate_required(&profile.degree));
    errors.check("title", validate_required(profile.title.as_deref().unwrap_or("")));
    errors.check("origin", validate_required(&profile.origin));
    errors.check("research_direction", validate_required(&profile.research_direction));
    errors.check("phone", validate_min_chars(profile.resolved_phone(), MIN_PHONE_CHARS));
}

fn check_expert(profile: &ProfileInput, errors: &mut FieldErrors) {
    errors.check("name", validate_required(&profile.name));
    errors.check("title", validate_required(profile.title.as_deref().unwrap_or("")));
    errors.check("institution", validate_required(&profile.institution));
    check_contact(profile, errors);
    errors.check("research_direction", validate_required(&profile.research_direction));
    errors.check(
        "bank_account",
        validate_min_chars(profile.bank_account.as_deref().unwrap_or(""), MIN_BANK_ACCOUNT_CHARS),
    );
    errors.check("bank_name", validate_required(&profile.bank_name));
    errors.check("account_holder", validate_required(&profile.account_holder));
}

fn check_editor(profile: &ProfileInput, errors: &mut FieldErrors) {
    errors.check("name", validate_required(&profile.name));
    check_contact(profile, errors);
    if let Some(department) = profile.department.as_deref() {
        errors.check("department", validate_required(department));
    }
}

/// Normalize keyword tags: trim, drop duplicates, enforce the tag limit
///
/// Blank tags are rejected rather than silently dropped so the input can
/// point at them.
pub fn validate_keyword_tags(tags: &[String]) -> Result<Vec<String>, String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err("Keyword tags cannot be empty".to_string());
        }
        if !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_string());
        }
    }
    if normalized.len() > MAX_KEYWORD_TAGS {
        return Err(format!(
            "Too many keyword tags: {}. At most {} are allowed.",
            normalized.len(),
            MAX_KEYWORD_TAGS
        ));
    }
    Ok(normalized)
}
