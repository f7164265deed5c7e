//! CSV export and re-import of applicant lists

use crate::error::Result;
use crate::input::mapper::avatar_color;
use crate::model::applicant::initials_for;
use crate::model::{ApplicantRecord, ApplicantStatus, EmploymentType, ExperienceLevel, JobCategory};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

const SKILL_SEPARATOR: &str = "; ";

/// Column titles, in the order `CsvRow` serializes its fields
pub const CSV_HEADERS: [&str; 20] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Location",
    "Category",
    "Experience",
    "Employment Type",
    "Status",
    "Skills",
    "Applied Date",
    "Education",
    "Current Company",
    "LinkedIn",
    "Portfolio",
    "Expected Salary",
    "Notice Period",
    "Summary",
    "Job ID",
    "Job Description",
];

/// One spreadsheet row; header names are the column titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Category")]
    pub category: JobCategory,
    #[serde(rename = "Experience")]
    pub experience: ExperienceLevel,
    #[serde(rename = "Employment Type")]
    pub employment_type: EmploymentType,
    #[serde(rename = "Status")]
    pub status: ApplicantStatus,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Applied Date")]
    pub applied_date: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Current Company")]
    pub current_company: String,
    #[serde(rename = "LinkedIn")]
    pub linked_in: String,
    #[serde(rename = "Portfolio")]
    pub portfolio: String,
    #[serde(rename = "Expected Salary")]
    pub expected_salary: String,
    #[serde(rename = "Notice Period")]
    pub notice_period: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Job ID")]
    pub job_id: String,
    #[serde(rename = "Job Description")]
    pub job_description: String,
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<&ApplicantRecord> for CsvRow {
    fn from(a: &ApplicantRecord) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            email: a.email.clone(),
            phone: a.phone.clone(),
            location: a.location.clone(),
            category: a.category,
            experience: a.experience,
            employment_type: a.employment_type,
            status: a.status,
            skills: a.skills.join(SKILL_SEPARATOR),
            applied_date: a.applied_date.clone(),
            education: cell(&a.education),
            current_company: cell(&a.current_company),
            linked_in: cell(&a.linked_in),
            portfolio: cell(&a.portfolio),
            expected_salary: cell(&a.expected_salary),
            notice_period: cell(&a.notice_period),
            summary: cell(&a.summary),
            job_id: cell(&a.job_id),
            job_description: cell(&a.job_description),
        }
    }
}

impl CsvRow {
    /// Rebuild a record; columns the sheet does not carry take their defaults
    pub fn into_record(self) -> ApplicantRecord {
        let mut record = ApplicantRecord::new(
            self.id,
            self.name,
            self.category,
            self.experience,
            self.employment_type,
        )
        .with_status(self.status)
        .with_skills(
            self.skills
                .split(SKILL_SEPARATOR.trim())
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        );

        record.initials = initials_for(&record.name);
        record.avatar_color = avatar_color(&record.name).to_string();
        record.email = self.email;
        record.phone = self.phone;
        record.location = self.location;
        record.applied_date = self.applied_date;
        record.education = optional(self.education);
        record.current_company = optional(self.current_company);
        record.linked_in = optional(self.linked_in);
        record.portfolio = optional(self.portfolio);
        record.expected_salary = optional(self.expected_salary);
        record.notice_period = optional(self.notice_period);
        record.summary = optional(self.summary);
        record.job_id = optional(self.job_id);
        record.job_description = optional(self.job_description);
        record
    }
}

/// Write applicants to any writer, every cell quoted.
///
/// The header row is written even when `applicants` is empty.
pub fn write_csv<W: Write>(writer: W, applicants: &[&ApplicantRecord]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for applicant in applicants {
        csv_writer.serialize(CsvRow::from(*applicant))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        records.push(row?.into_record());
    }
    Ok(records)
}

pub fn export_csv(path: &Path, applicants: &[&ApplicantRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, applicants)?;
    info!("Exported {} applicants to {}", applicants.len(), path.display());
    Ok(())
}

/// `applicants-<label>-<date>.csv`, label reduced to lowercase ASCII words
pub fn export_filename(label: &str, date: NaiveDate) -> String {
    let slug = label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("applicants-{}.csv", date.format("%Y-%m-%d"))
    } else {
        format!("applicants-{}-{}.csv", slug, date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> ApplicantRecord {
        let mut a = ApplicantRecord::new(
            "a1",
            "Maya \"MP\" Patel",
            JobCategory::RenewableEnergy,
            ExperienceLevel::TenToFifteen,
            EmploymentType::FullTime,
        )
        .with_skills(["Solar PV Design", "AutoCAD"])
        .with_status(ApplicantStatus::Shortlisted);
        a.location = "Lisbon, PT".to_string();
        a.applied_date = "2024-06-10".to_string();
        a.summary = Some("Line one\nline two".to_string());
        a
    }

    #[test]
    fn test_every_cell_is_quoted() {
        let a = applicant();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[&a]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let header = text.lines().next().unwrap();
        assert!(header.starts_with("\"ID\",\"Name\",\"Email\""));
        assert!(header.ends_with("\"Job ID\",\"Job Description\""));
        assert!(text.contains("\"Solar PV Design; AutoCAD\""));
        assert!(text.contains("\"Maya \"\"MP\"\" Patel\""));
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("\"ID\",\"Name\""));
        assert!(read_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_reimport_restores_exported_fields() {
        let a = applicant();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[&a]).unwrap();

        let restored = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(restored.len(), 1);
        let r = &restored[0];
        assert_eq!(r.id, a.id);
        assert_eq!(r.name, a.name);
        assert_eq!(r.location, a.location);
        assert_eq!(r.skills, a.skills);
        assert_eq!(r.status, ApplicantStatus::Shortlisted);
        assert_eq!(r.summary, a.summary);
        assert_eq!(r.education, None);
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(export_filename("Solar Shortlist", date), "applicants-solar-shortlist-2024-06-15.csv");
        assert_eq!(export_filename("", date), "applicants-2024-06-15.csv");
    }
}
