use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::cli::error::{validate_identifier, UserError};
use crate::cli::output::{
    format_assignment_summary, format_bank_account_options, format_field_errors,
    format_paper_summary, format_timeline, format_withdrawal_detail, format_withdrawal_table,
    get_terminal_width, is_tty, OutputOptions,
};
use crate::config::{ColorMode, Config};
use crate::models::{
    bank_accounts_from_value, find_assignment, find_withdrawal, Locale, PaperDetail,
    ProfileInput, ReviewAssignment, ReviewOpinion, Role, WithdrawalRecord, WithdrawalRequest,
};
use crate::progress::{with_submission_date, ProgressRecord, StageResolver};
use crate::validate::{
    validate_keyword_tags, validate_profile, validate_review_opinion,
    validate_withdrawal_request, FieldErrors,
};

#[derive(Parser)]
#[command(name = "paperdesk")]
#[command(about = "Paper Desk - progress timelines and form checks for journal submissions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Display language: zh or en (overrides the config file)
    #[arg(long, global = true, value_parser = parse_locale_arg)]
    pub locale: Option<Locale>,
    /// Color output: auto, always or never (overrides the config file)
    #[arg(long, global = true, value_parser = parse_color_arg)]
    pub color: Option<ColorMode>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the progress timeline of a paper
    Timeline {
        /// Progress payload (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
        /// Output the stage list as JSON
        #[arg(long)]
        json: bool,
        /// Paper submission date, used when the payload has no submission time
        #[arg(long)]
        submission_date: Option<String>,
    },
    /// Print the label of the stage the paper is currently in
    CurrentStage {
        /// Progress payload (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
    },
    /// Print the latest time found in the progress payload
    LastUpdated {
        /// Progress payload (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
        /// Output as JSON ({"lastUpdatedAt": ...})
        #[arg(long)]
        json: bool,
    },
    /// Print the display text for a progress status value
    StatusText {
        /// Raw status value (omit for the unknown placeholder)
        status: Option<String>,
    },
    /// Show a paper's details
    Paper {
        /// Paper detail payload (JSON)
        file: PathBuf,
        /// Progress payload to render as a timeline below the details
        #[arg(long)]
        progress: Option<PathBuf>,
    },
    /// Show a review assignment
    Assignment {
        /// Assignment payload: one assignment or the expert's assignment list
        file: PathBuf,
        /// Assignment ID to pick from a list
        #[arg(long)]
        id: Option<String>,
        /// Print the review opinion form pre-filled from the assignment (JSON)
        #[arg(long)]
        opinion: bool,
    },
    /// List withdrawal records, or show one in detail
    Withdrawals {
        /// Withdrawal list payload (JSON)
        file: PathBuf,
        /// Withdrawal ID to show in detail
        #[arg(long)]
        id: Option<String>,
    },
    /// List the bank accounts a withdrawal can be paid to
    BankAccounts {
        /// Expert profile or bank account list (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
    },
    /// Check form values before submission
    Check {
        #[command(subcommand)]
        subcommand: CheckCommands,
    },
}

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Check a review opinion form
    Review {
        /// Form values (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
        /// Output field errors as JSON
        #[arg(long)]
        json: bool,
        /// Server error response (JSON body with an `errors` object) to merge in
        #[arg(long)]
        server_response: Option<PathBuf>,
    },
    /// Check a withdrawal request form
    Withdrawal {
        /// Form values (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
        /// Output field errors as JSON
        #[arg(long)]
        json: bool,
        /// Server error response (JSON body with an `errors` object) to merge in
        #[arg(long)]
        server_response: Option<PathBuf>,
    },
    /// Check a profile form
    Profile {
        /// Account role: author, expert or editor
        #[arg(long)]
        role: String,
        /// Form values (JSON); '-' or omitted reads stdin
        file: Option<PathBuf>,
        /// Output field errors as JSON
        #[arg(long)]
        json: bool,
        /// Server error response (JSON body with an `errors` object) to merge in
        #[arg(long)]
        server_response: Option<PathBuf>,
    },
    /// Check and normalize keyword tags
    Keywords {
        /// Keyword tags
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

fn parse_locale_arg(s: &str) -> std::result::Result<Locale, String> {
    Locale::from_str(s).ok_or_else(|| format!("Invalid locale: '{}'. Use zh or en.", s))
}

fn parse_color_arg(s: &str) -> std::result::Result<ColorMode, String> {
    ColorMode::from_str(s).ok_or_else(|| format!("Invalid color mode: '{}'. Use auto, always or never.", s))
}

/// Entry point used by the binary
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}

/// Execute a parsed command line
pub fn run_cli(cli: Cli) -> Result<()> {
    let mut config = Config::load().map_err(UserError::from)?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(color) = cli.color {
        config.color = color;
    }
    let options = OutputOptions {
        locale: config.locale,
        time_format: config.time_format.clone(),
        color: config.color.enabled(is_tty()),
        width: get_terminal_width(),
    };
    log::debug!("locale={} color={}", options.locale.as_str(), options.color);

    match cli.command {
        Commands::Timeline { file, json, submission_date } => {
            handle_timeline(file.as_deref(), json, submission_date.as_deref(), &options)
        }
        Commands::CurrentStage { file } => handle_current_stage(file.as_deref(), &options),
        Commands::LastUpdated { file, json } => handle_last_updated(file.as_deref(), json, &options),
        Commands::StatusText { status } => {
            println!("{}", StageResolver::new(options.locale).status_text(status.as_deref()));
            Ok(())
        }
        Commands::Paper { file, progress } => handle_paper(&file, progress.as_deref(), &options),
        Commands::Assignment { file, id, opinion } => {
            handle_assignment(&file, id.as_deref(), opinion, &options)
        }
        Commands::Withdrawals { file, id } => handle_withdrawals(&file, id.as_deref(), &options),
        Commands::BankAccounts { file } => handle_bank_accounts(file.as_deref()),
        Commands::Check { subcommand } => handle_check(subcommand, &options),
    }
}

/// Read an input document; `None` or `-` means stdin
fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        None => read_stdin(),
        Some(p) if p.as_os_str() == "-" => read_stdin(),
        Some(p) => {
            let name = p.display().to_string();
            let text = std::fs::read_to_string(p).map_err(|source| UserError::Input {
                source_name: name.clone(),
                source,
            })?;
            Ok((name, text))
        }
    }
}

fn read_stdin() -> Result<(String, String)> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| UserError::Input {
            source_name: "stdin".to_string(),
            source,
        })?;
    Ok(("stdin".to_string(), text))
}

fn parse_json<T: DeserializeOwned>(name: &str, text: &str) -> Result<T> {
    let value = serde_json::from_str(text).map_err(|source| UserError::Json {
        source_name: name.to_string(),
        source,
    })?;
    Ok(value)
}

fn load_progress(path: Option<&Path>) -> Result<ProgressRecord> {
    let (name, text) = read_input(path)?;
    // An empty body means the endpoint had nothing for this paper yet
    if text.trim().is_empty() {
        return Ok(ProgressRecord::default());
    }
    let value: Value = parse_json(&name, &text)?;
    let record = ProgressRecord::from_value(&value);
    log::debug!("read {} progress fields from {}", record.len(), name);
    Ok(record)
}

fn handle_timeline(
    path: Option<&Path>,
    json: bool,
    submission_date: Option<&str>,
    options: &OutputOptions,
) -> Result<()> {
    let progress = load_progress(path)?;
    let stages = StageResolver::new(options.locale).map_stages(&progress);
    let stages = with_submission_date(stages, submission_date);

    if json {
        let text = serde_json::to_string_pretty(&stages).context("Failed to serialize timeline")?;
        println!("{}", text);
    } else {
        print!("{}", format_timeline(&stages, options));
    }
    Ok(())
}

fn handle_current_stage(path: Option<&Path>, options: &OutputOptions) -> Result<()> {
    let progress = load_progress(path)?;
    let label = StageResolver::new(options.locale)
        .current_stage(&progress)
        .unwrap_or(options.locale.unknown_text());
    println!("{}", label);
    Ok(())
}

fn handle_last_updated(path: Option<&Path>, json: bool, options: &OutputOptions) -> Result<()> {
    let progress = load_progress(path)?;
    let latest = StageResolver::new(options.locale).last_updated_at(&progress);

    if json {
        let value = serde_json::json!({ "lastUpdatedAt": latest.map(|dt| dt.to_rfc3339()) });
        println!("{}", value);
        return Ok(());
    }
    match latest {
        Some(dt) => println!(
            "{}",
            dt.with_timezone(&chrono::Local).format(&options.time_format)
        ),
        None => println!("{}", options.locale.unknown_text()),
    }
    Ok(())
}

fn handle_paper(path: &Path, progress_path: Option<&Path>, options: &OutputOptions) -> Result<()> {
    let (name, text) = read_input(Some(path))?;
    let paper: PaperDetail = parse_json(&name, &text)?;
    print!("{}", format_paper_summary(&paper, options));

    if let Some(progress_path) = progress_path {
        let progress = load_progress(Some(progress_path))?;
        let stages = StageResolver::new(options.locale).map_stages(&progress);
        let stages = with_submission_date(stages, paper.submission_date.as_deref());
        println!("\nTimeline:");
        print!("{}", format_timeline(&stages, options));
    }
    Ok(())
}

fn handle_assignment(path: &Path, id: Option<&str>, opinion: bool, options: &OutputOptions) -> Result<()> {
    let (name, text) = read_input(Some(path))?;
    let value: Value = parse_json(&name, &text)?;

    let assignment: ReviewAssignment = match (value, id) {
        (Value::Array(items), Some(id)) => {
            validate_identifier(id, "assignment ID").map_err(UserError::Message)?;
            let list: Vec<ReviewAssignment> = serde_json::from_value(Value::Array(items))
                .map_err(|source| UserError::Json { source_name: name.clone(), source })?;
            find_assignment(&list, id)
                .cloned()
                .ok_or_else(|| UserError::Message(format!("No review assignment with ID {}", id)))?
        }
        (Value::Array(_), None) => {
            return Err(UserError::Message(
                "The payload is an assignment list; pass --id to choose one".to_string(),
            )
            .into());
        }
        (single, _) => serde_json::from_value(single)
            .map_err(|source| UserError::Json { source_name: name.clone(), source })?,
    };

    if opinion {
        let draft = ReviewOpinion::from_assignment(&assignment);
        let text = serde_json::to_string_pretty(&draft).context("Failed to serialize review opinion")?;
        println!("{}", text);
    } else {
        print!("{}", format_assignment_summary(&assignment, options));
    }
    Ok(())
}

fn handle_withdrawals(path: &Path, id: Option<&str>, options: &OutputOptions) -> Result<()> {
    let (name, text) = read_input(Some(path))?;
    // The list endpoint answers null when there are no records
    let records: Option<Vec<WithdrawalRecord>> = parse_json(&name, &text)?;
    let records = records.unwrap_or_default();

    match id {
        Some(id) => {
            validate_identifier(id, "withdrawal ID").map_err(UserError::Message)?;
            let record = find_withdrawal(&records, id)
                .ok_or_else(|| UserError::Message(format!("No withdrawal with ID {}", id)))?;
            print!("{}", format_withdrawal_detail(record, options));
        }
        None => print!("{}", format_withdrawal_table(&records, options)),
    }
    Ok(())
}

fn handle_bank_accounts(path: Option<&Path>) -> Result<()> {
    let (name, text) = read_input(path)?;
    let value: Value = parse_json(&name, &text)?;
    let accounts = bank_accounts_from_value(value)
        .map_err(|source| UserError::Json { source_name: name.clone(), source })?;
    print!("{}", format_bank_account_options(&accounts));
    Ok(())
}

/// Local check result plus any field errors the server sent back
fn with_server_errors(
    result: std::result::Result<(), FieldErrors>,
    server_response: Option<&Path>,
) -> Result<std::result::Result<(), FieldErrors>> {
    let Some(path) = server_response else {
        return Ok(result);
    };
    let (name, text) = read_input(Some(path))?;
    let body: Value = parse_json(&name, &text)?;
    let mut errors = result.err().unwrap_or_default();
    errors.merge_server_errors(&body);
    Ok(errors.into_result())
}

fn report_form(form: &str, result: std::result::Result<(), FieldErrors>, json: bool, options: &OutputOptions) -> Result<()> {
    match result {
        Ok(()) => {
            if json {
                println!("{{}}");
            } else {
                println!("{} form is valid.", form);
            }
            Ok(())
        }
        Err(errors) => {
            if json {
                let text = serde_json::to_string_pretty(&errors).context("Failed to serialize field errors")?;
                println!("{}", text);
            } else {
                eprint!("{}", format_field_errors(&errors, options));
            }
            Err(UserError::InvalidForm { form: form.to_string(), errors }.into())
        }
    }
}

fn handle_check(command: CheckCommands, options: &OutputOptions) -> Result<()> {
    match command {
        CheckCommands::Review { file, json, server_response } => {
            let (name, text) = read_input(file.as_deref())?;
            let opinion: ReviewOpinion = parse_json(&name, &text)?;
            let result = with_server_errors(validate_review_opinion(&opinion), server_response.as_deref())?;
            report_form("Review", result, json, options)
        }
        CheckCommands::Withdrawal { file, json, server_response } => {
            let (name, text) = read_input(file.as_deref())?;
            let request: WithdrawalRequest = parse_json(&name, &text)?;
            let result = with_server_errors(validate_withdrawal_request(&request), server_response.as_deref())?;
            report_form("Withdrawal", result, json, options)
        }
        CheckCommands::Profile { role, file, json, server_response } => {
            let role = Role::from_str_or_editor(&role);
            let (name, text) = read_input(file.as_deref())?;
            let profile: ProfileInput = parse_json(&name, &text)?;
            let result = with_server_errors(validate_profile(role, &profile), server_response.as_deref())?;
            report_form("Profile", result, json, options)
        }
        CheckCommands::Keywords { tags } => {
            let normalized = validate_keyword_tags(&tags).map_err(UserError::Message)?;
            for tag in normalized {
                println!("{}", tag);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_parse() {
        let cli = Cli::try_parse_from(["paperdesk", "timeline", "p.json", "--locale", "en", "--json"]).unwrap();
        assert_eq!(cli.locale, Some(Locale::En));
        assert!(matches!(cli.command, Commands::Timeline { json: true, .. }));
        assert!(Cli::try_parse_from(["paperdesk", "--locale", "fr", "timeline"]).is_err());
    }

    #[test]
    fn test_check_keywords_requires_tags() {
        assert!(Cli::try_parse_from(["paperdesk", "check", "keywords"]).is_err());
    }
}
