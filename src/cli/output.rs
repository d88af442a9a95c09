// Output formatting utilities

use crate::models::{
    BankAccount, Fund, Locale, PaperAuthor, PaperDetail, ReviewAssignment, StageView,
    WithdrawalRecord,
};
use crate::utils::format_progress_time;
use crate::validate::FieldErrors;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

// ANSI foreground colors (standard 16-color palette)
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

const FINISHED_BULLET: &str = "✓";
const OPEN_BULLET: &str = "○";

/// Map a color tag from the payload/status tables to its ANSI foreground
fn color_name_to_fg(name: &str) -> Option<&'static str> {
    match name {
        "red" => Some(ANSI_FG_RED),
        "green" => Some(ANSI_FG_GREEN),
        // The web UI's orange has no 16-color equivalent
        "orange" | "yellow" => Some(ANSI_FG_YELLOW),
        "blue" => Some(ANSI_FG_BLUE),
        "grape" | "magenta" => Some(ANSI_FG_MAGENTA),
        "gray" | "grey" => Some(ANSI_FG_BRIGHT_BLACK),
        _ => None,
    }
}

/// Rendering settings shared by all formatters
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub locale: Locale,
    pub time_format: String,
    pub color: bool,
    pub width: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            time_format: crate::utils::DEFAULT_TIME_FORMAT.to_string(),
            color: false,
            width: 60,
        }
    }
}

impl OutputOptions {
    fn paint(&self, text: &str, color: &str) -> String {
        match color_name_to_fg(color) {
            Some(code) if self.color => format!("{}{}{}", code, text, ANSI_RESET),
            _ => text.to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    fn rule(&self, header: &str) -> String {
        "=".repeat(header.chars().count().max(self.width.min(80)))
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS environment
/// variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    60
}

fn text_or_empty(value: Option<&str>, locale: Locale) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => locale.empty_text().to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Format a progress timeline, one block per stage
///
/// Finished stages with a time show it; everything else shows the pending
/// placeholder.
pub fn format_timeline(stages: &[StageView], options: &OutputOptions) -> String {
    let mut output = String::new();
    for (index, stage) in stages.iter().enumerate() {
        let bullet = if stage.is_finished() { FINISHED_BULLET } else { OPEN_BULLET };
        output.push_str(&format!(
            "{} {}  {}\n",
            options.paint(bullet, stage.color.as_str()),
            options.bold(stage.label),
            options.paint(&stage.status_text, stage.color.as_str()),
        ));
        let when = match stage.completed_at() {
            Some(time) => format_progress_time(time, &options.time_format),
            None => options.locale.pending_text().to_string(),
        };
        output.push_str(&format!("  {}\n", when));
        if index + 1 < stages.len() {
            output.push_str("│\n");
        }
    }
    output
}

fn push_field(output: &mut String, name: &str, value: &str) {
    output.push_str(&format!("  {} {}\n", pad(&format!("{}:", name), 13), value));
}

fn format_keywords(keywords: &[String], color: &str, options: &OutputOptions) -> String {
    if keywords.is_empty() {
        return options.locale.empty_text().to_string();
    }
    keywords
        .iter()
        .map(|k| options.paint(&format!("[{}]", k), color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_funds(funds: &[Fund], options: &OutputOptions) -> String {
    let mut output = String::new();
    let name_width = funds
        .iter()
        .map(|f| f.project_name.as_deref().unwrap_or("").chars().count())
        .max()
        .unwrap_or(0)
        .max("Project".len());
    output.push_str(&format!("  {}  {}\n", pad("Project", name_width), "Number"));
    for fund in funds {
        output.push_str(&format!(
            "  {}  {}\n",
            pad(&text_or_empty(fund.project_name.as_deref(), options.locale), name_width),
            text_or_empty(fund.project_number.as_deref(), options.locale),
        ));
    }
    output
}

fn format_authors(authors: &[PaperAuthor], options: &OutputOptions) -> String {
    authors
        .iter()
        .map(|a| {
            format!(
                "  {} - {}\n",
                text_or_empty(a.name.as_deref(), options.locale),
                text_or_empty(a.institution_name.as_deref(), options.locale)
            )
        })
        .collect()
}

/// Format the paper detail view
pub fn format_paper_summary(paper: &PaperDetail, options: &OutputOptions) -> String {
    let locale = options.locale;
    let mut output = String::new();

    let title = text_or_empty(paper.title_zh.as_deref(), locale);
    let header = match paper.paper_id.as_deref() {
        Some(id) => format!("Paper {}: {}", id, title),
        None => format!("Paper: {}", title),
    };
    output.push_str(&header);
    output.push('\n');
    output.push_str(&options.rule(&header));
    output.push_str("\n\n");

    let status_color = paper.review_decision().map_or("blue", |d| d.color());
    push_field(&mut output, "Status", &options.paint(&paper.status_label(locale), status_color));
    if let Some(stage) = paper.current_stage.as_deref().filter(|s| !s.is_empty()) {
        push_field(&mut output, "Stage", stage);
    }
    let submitted = paper
        .submission_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(crate::utils::format_progress_date);
    push_field(&mut output, "Submitted", &text_or_empty(submitted.as_deref(), locale));
    push_field(&mut output, "English title", &text_or_empty(paper.title_en.as_deref(), locale));
    push_field(&mut output, "Keywords (zh)", &format_keywords(&paper.keywords_zh(), "blue", options));
    push_field(&mut output, "Keywords (en)", &format_keywords(&paper.keywords_en(), "grape", options));
    push_field(&mut output, "Attachment", &text_or_empty(paper.attachment_url.as_deref(), locale));
    output.push('\n');

    output.push_str("Abstract (zh):\n");
    output.push_str(&format!("  {}\n\n", text_or_empty(paper.abstract_zh.as_deref(), locale)));
    output.push_str("Abstract (en):\n");
    output.push_str(&format!("  {}\n\n", text_or_empty(paper.abstract_en.as_deref(), locale)));

    output.push_str("Funds:\n");
    match paper.funds.as_deref() {
        Some(funds) if !funds.is_empty() => output.push_str(&format_funds(funds, options)),
        _ => output.push_str(&format!("  {}\n", locale.empty_text())),
    }
    output.push('\n');

    output.push_str("Authors:\n");
    match paper.authors.as_deref() {
        Some(authors) if !authors.is_empty() => output.push_str(&format_authors(authors, options)),
        _ => output.push_str(&format!("  {}\n", locale.empty_text())),
    }

    if paper.can_submit_revision() {
        output.push_str("\nA revised manuscript (.pdf, .doc, .docx) can be uploaded for this paper.\n");
    }

    output
}

/// Format a review assignment for the expert's detail view
pub fn format_assignment_summary(assignment: &ReviewAssignment, options: &OutputOptions) -> String {
    let locale = options.locale;
    let mut output = String::new();

    let header = match assignment.assignment_id.as_deref() {
        Some(id) => format!("Review assignment {}", id),
        None => "Review assignment".to_string(),
    };
    output.push_str(&header);
    output.push('\n');
    output.push_str(&options.rule(&header));
    output.push_str("\n\n");

    push_field(&mut output, "Paper", &text_or_empty(assignment.paper_id.as_deref(), locale));
    push_field(
        &mut output,
        "Status",
        &options.paint(assignment.status_label(locale), assignment.status_color()),
    );
    if let Some(conclusion) = assignment.conclusion.as_deref().filter(|c| !c.is_empty()) {
        push_field(&mut output, "Conclusion", &options.paint(conclusion, "green"));
    }
    push_field(&mut output, "Title (zh)", &text_or_empty(assignment.title_zh.as_deref(), locale));
    push_field(&mut output, "Title (en)", &text_or_empty(assignment.title_en.as_deref(), locale));

    for (name, value) in [
        ("Assigned", &assignment.assigned_date),
        ("Due", &assignment.assigned_due_date),
        ("Submitted", &assignment.submission_date),
    ] {
        let shown = value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| format_progress_time(v, &options.time_format));
        push_field(&mut output, name, &text_or_empty(shown.as_deref(), locale));
    }

    push_field(&mut output, "Expert", &text_or_empty(assignment.expert_id.as_deref(), locale));
    push_field(&mut output, "Editor", &text_or_empty(assignment.editor_id.as_deref(), locale));
    push_field(&mut output, "Attachment", &text_or_empty(assignment.attachment_url.as_deref(), locale));

    output
}

/// Format withdrawal records as a table
pub fn format_withdrawal_table(records: &[WithdrawalRecord], options: &OutputOptions) -> String {
    if records.is_empty() {
        return "No withdrawal records.\n".to_string();
    }
    let locale = options.locale;
    let headers = ["Assignment", "Paper", "Amount", "Status", "Requested"];
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                text_or_empty(r.assignment_id.as_deref(), locale),
                text_or_empty(r.paper_id.as_deref(), locale),
                text_or_empty(r.amount.as_deref(), locale),
                r.status_text(locale),
                text_or_empty(r.display_date().as_deref(), locale),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    output.push_str(&options.bold(header_line.join("  ").trim_end()));
    output.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&separator.join("  "));
    output.push('\n');
    for row in rows {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }
    output
}

/// Format one withdrawal for the detail view
pub fn format_withdrawal_detail(record: &WithdrawalRecord, options: &OutputOptions) -> String {
    let locale = options.locale;
    let mut output = String::new();

    let header = match record.withdrawal_id.as_deref() {
        Some(id) => format!("Withdrawal {}", id),
        None => "Withdrawal".to_string(),
    };
    output.push_str(&header);
    output.push('\n');
    output.push_str(&options.rule(&header));
    output.push_str("\n\n");

    push_field(&mut output, "Assignment", &text_or_empty(record.assignment_id.as_deref(), locale));
    push_field(&mut output, "Paper", &text_or_empty(record.paper_id.as_deref(), locale));
    push_field(&mut output, "Title (zh)", &text_or_empty(record.paper_title_zh.as_deref(), locale));
    push_field(&mut output, "Title (en)", &text_or_empty(record.paper_title_en.as_deref(), locale));
    push_field(&mut output, "Amount", &text_or_empty(record.amount.as_deref(), locale));
    push_field(&mut output, "Status", &record.status_text(locale));
    push_field(&mut output, "Requested", &text_or_empty(record.display_date().as_deref(), locale));

    output
}

/// Format bank accounts as `value  label` choices for a withdrawal request
pub fn format_bank_account_options(accounts: &[BankAccount]) -> String {
    if accounts.is_empty() {
        return "No bank accounts.\n".to_string();
    }
    let values: Vec<String> = accounts.iter().map(BankAccount::option_value).collect();
    let width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);
    values
        .iter()
        .zip(accounts)
        .map(|(value, account)| format!("{}  {}\n", pad(value, width), account.option_label()))
        .collect()
}

/// Format field errors, one per line
pub fn format_field_errors(errors: &FieldErrors, options: &OutputOptions) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}\n", options.paint(&e.field, "red"), e.message))
        .collect()
}
