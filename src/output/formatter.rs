//! Output formatters for console, JSON and Markdown presentation

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::matching::query_filter::describe_criteria;
use crate::matching::{AnalyticsAnswer, CandidateProfile, QueryFilterResult, SearchMode, ShortlistMatch};
use crate::model::{ApplicantRecord, CustomFilter, HiringPipeline};
use crate::output::report::Report;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a report in one output format
pub trait OutputFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn score_color(score: u32) -> Color {
    if score >= 50 {
        Color::Green
    } else if score >= 30 {
        Color::Yellow
    } else {
        Color::Red
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_applicant_line(&self, index: usize, applicant: &ApplicantRecord) -> String {
        let mut line = format!(
            "{:>3}. {} {} · {} · {} · {} · {}\n",
            index + 1,
            self.colorize(&applicant.name, Color::Cyan),
            self.colorize(&format!("[{}]", applicant.id), Color::BrightBlack),
            applicant.category,
            applicant.experience,
            applicant.employment_type,
            applicant.status
        );

        if self.detailed {
            if !applicant.location.is_empty() {
                line.push_str(&format!("       📍 {}\n", applicant.location));
            }
            if !applicant.skills.is_empty() {
                line.push_str(&format!("       🛠  {}\n", applicant.skills.join(", ")));
            }
            if !applicant.applied_date.is_empty() {
                line.push_str(&format!("       📅 Applied {}\n", applicant.applied_date));
            }
        }
        line
    }

    fn format_applicants(&self, title: &str, mode: Option<SearchMode>, applicants: &[&ApplicantRecord]) -> String {
        let mut output = self.format_header(title, 1);
        if let Some(mode) = mode {
            let label = match mode {
                SearchMode::Semantic => "semantic match",
                SearchMode::Literal => "text match",
            };
            output.push_str(&format!("Search mode: {}\n", self.colorize(label, Color::Magenta)));
        }
        output.push_str(&format!("{} applicants\n\n", applicants.len()));

        for (index, applicant) in applicants.iter().enumerate() {
            output.push_str(&self.format_applicant_line(index, applicant));
        }
        output
    }

    fn format_shortlist(&self, job_description: &str, matches: &[ShortlistMatch<'_>]) -> String {
        let mut output = self.format_header("🎯 SHORTLIST", 1);
        if self.detailed {
            output.push_str(&format!("Job: {}\n", job_description.trim()));
        }

        if matches.is_empty() {
            output.push_str(&self.colorize("No applicants reached the shortlist threshold.\n", Color::Yellow));
            return output;
        }

        for (rank, m) in matches.iter().enumerate() {
            let score = format!("{:>3} pts", m.score);
            output.push_str(&format!(
                "\n{:>3}. {} {} ({})\n",
                rank + 1,
                self.colorize(&score, score_color(m.score)),
                self.colorize(&m.applicant.name, Color::Cyan),
                m.applicant.id
            ));
            for reason in &m.reasons {
                output.push_str(&format!("       • {}\n", reason));
            }
        }
        output
    }

    fn format_filter(&self, query: &str, result: &QueryFilterResult<'_>) -> String {
        let mut output = self.format_header("🔍 FILTER RESULTS", 1);
        output.push_str(&format!("Query: {}\n", query));
        output.push_str(&format!("{}\n\n", self.colorize(&result.summary, Color::Green)));
        for (index, applicant) in result.matches.iter().enumerate() {
            output.push_str(&self.format_applicant_line(index, applicant));
        }
        output
    }

    fn format_answer(&self, answer: &AnalyticsAnswer) -> String {
        let mut output = self.format_header("🤖 Assistant", 2);
        output.push_str(&answer.message);
        output.push('\n');
        output
    }

    fn format_profile(&self, applicant: &ApplicantRecord, profile: &CandidateProfile) -> String {
        let mut output = self.format_header(&format!("👤 {}", applicant.name), 1);
        output.push_str(&format!(
            "{} · {} · {}\n",
            applicant.category, applicant.experience, applicant.status
        ));
        if !applicant.email.is_empty() {
            output.push_str(&format!("✉  {}\n", applicant.email));
        }
        output.push_str(&format!("\n{}\n", profile.summary));

        if !profile.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Strengths", 3));
            for strength in &profile.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        output.push_str(&self.format_header("Highlights", 3));
        for highlight in &profile.highlights {
            output.push_str(&format!("  • {}\n", highlight));
        }

        if self.detailed && !applicant.application_responses.is_empty() {
            output.push_str(&self.format_header("Application Responses", 3));
            for response in &applicant.application_responses {
                output.push_str(&format!(
                    "  {}\n    {}\n",
                    self.colorize(&response.question, Color::Cyan),
                    response.answer
                ));
            }
        }
        output
    }

    fn format_pipelines(&self, pipelines: &[&HiringPipeline]) -> String {
        let mut output = self.format_header("Hiring Pipelines", 1);
        if pipelines.is_empty() {
            output.push_str("No pipelines yet.\n");
        }
        for pipeline in pipelines {
            output.push_str(&format!(
                "  • {} {} · {} applicants · created {}\n",
                self.colorize(&pipeline.name, Color::Cyan),
                self.colorize(&format!("[{}]", pipeline.id), Color::BrightBlack),
                pipeline.applicant_ids.len(),
                pipeline.created_at
            ));
        }
        output
    }

    fn format_pipeline(&self, pipeline: &HiringPipeline, members: &[&ApplicantRecord], missing: &[&str]) -> String {
        let mut output = self.format_applicants(&pipeline.name, None, members);
        if !missing.is_empty() {
            output.push_str(&self.colorize(
                &format!("\n⚠ {} applicants no longer in the data: {}\n", missing.len(), missing.join(", ")),
                Color::Yellow,
            ));
        }
        output
    }

    fn format_custom_filters(&self, filters: &[&CustomFilter]) -> String {
        let mut output = self.format_header("Saved Filters", 1);
        if filters.is_empty() {
            output.push_str("No saved filters.\n");
        }
        for filter in filters {
            output.push_str(&format!(
                "  • {} {}\n",
                self.colorize(&filter.name, Color::Cyan),
                self.colorize(&format!("[{}]", filter.id), Color::BrightBlack)
            ));
            if let Some(query) = &filter.original_query {
                output.push_str(&format!("      query: \"{}\"\n", query));
            }
            match &filter.matched_applicant_ids {
                Some(ids) if !ids.is_empty() => {
                    output.push_str(&format!("      pinned: {} applicants\n", ids.len()));
                }
                _ => output.push_str(&format!(
                    "      criteria: {}\n",
                    describe_criteria(&filter.filter_criteria).join(", ")
                )),
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        Ok(match report {
            Report::Applicants { title, mode, applicants } => self.format_applicants(title, *mode, applicants),
            Report::Shortlist { job_description, matches } => self.format_shortlist(job_description, matches),
            Report::Filter { query, result } => self.format_filter(query, result),
            Report::Answer { answer, .. } => self.format_answer(answer),
            Report::Profile { applicant, profile } => self.format_profile(applicant, profile),
            Report::Pipelines { pipelines } => self.format_pipelines(pipelines),
            Report::Pipeline { pipeline, members, missing } => self.format_pipeline(pipeline, members, missing),
            Report::CustomFilters { filters } => self.format_custom_filters(filters),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn applicant_table(applicants: &[&ApplicantRecord]) -> String {
        let mut output = String::from("| # | Name | ID | Category | Experience | Type | Status | Skills |\n");
        output.push_str("|---|------|----|----------|------------|------|--------|--------|\n");
        for (index, a) in applicants.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | `{}` | {} | {} | {} | {} | {} |\n",
                index + 1,
                Self::escape_cell(&a.name),
                a.id,
                a.category,
                a.experience,
                a.employment_type,
                a.status,
                Self::escape_cell(&a.skills.join(", "))
            ));
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        let mut output = format!("# {}\n\n", report.title());

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        match report {
            Report::Applicants { mode, applicants, .. } => {
                if let Some(mode) = mode {
                    output.push_str(&format!("_Search mode: {:?}_\n\n", mode));
                }
                output.push_str(&Self::applicant_table(applicants));
            }
            Report::Shortlist { job_description, matches } => {
                output.push_str(&format!("> {}\n\n", Self::escape_cell(job_description.trim())));
                if matches.is_empty() {
                    output.push_str("No applicants reached the shortlist threshold.\n");
                }
                for (rank, m) in matches.iter().enumerate() {
                    output.push_str(&format!(
                        "## {}. {} ({} pts)\n\n",
                        rank + 1,
                        m.applicant.name,
                        m.score
                    ));
                    for reason in &m.reasons {
                        output.push_str(&format!("- {}\n", reason));
                    }
                    output.push('\n');
                }
            }
            Report::Filter { result, .. } => {
                output.push_str(&format!("**{}**\n\n", result.summary));
                output.push_str(&Self::applicant_table(&result.matches));
            }
            Report::Answer { answer, .. } => {
                output.push_str(&answer.message);
                output.push('\n');
            }
            Report::Profile { applicant, profile } => {
                output.push_str(&format!(
                    "**{}** · {} · {}\n\n{}\n\n",
                    applicant.category, applicant.experience, applicant.status, profile.summary
                ));
                output.push_str("## Strengths\n\n");
                for strength in &profile.strengths {
                    output.push_str(&format!("- {}\n", strength));
                }
                output.push_str("\n## Highlights\n\n");
                for highlight in &profile.highlights {
                    output.push_str(&format!("- {}\n", highlight));
                }
            }
            Report::Pipelines { pipelines } => {
                output.push_str("| Name | ID | Applicants | Created |\n|------|----|------------|---------|\n");
                for p in pipelines {
                    output.push_str(&format!(
                        "| {} | `{}` | {} | {} |\n",
                        Self::escape_cell(&p.name),
                        p.id,
                        p.applicant_ids.len(),
                        p.created_at
                    ));
                }
            }
            Report::Pipeline { members, missing, .. } => {
                output.push_str(&Self::applicant_table(members));
                if !missing.is_empty() {
                    output.push_str(&format!("\nMissing applicants: {}\n", missing.join(", ")));
                }
            }
            Report::CustomFilters { filters } => {
                for filter in filters {
                    output.push_str(&format!("- **{}** (`{}`)", filter.name, filter.id));
                    if let Some(query) = &filter.original_query {
                        output.push_str(&format!(": \"{}\"", query));
                    }
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report<'_>, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content)
        .map_err(|e| MatcherError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e)))
}
