//! Applicant records and the closed enumerations they are built from

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Job family an applicant applied under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    #[serde(rename = "Energy Consultant")]
    EnergyConsultant,
    #[serde(rename = "Renewable Energy")]
    RenewableEnergy,
    #[serde(rename = "Business Consultant")]
    BusinessConsultant,
    #[serde(rename = "Energy")]
    Energy,
    #[serde(rename = "Water")]
    Water,
}

impl JobCategory {
    pub const ALL: [JobCategory; 5] = [
        JobCategory::EnergyConsultant,
        JobCategory::RenewableEnergy,
        JobCategory::BusinessConsultant,
        JobCategory::Energy,
        JobCategory::Water,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::EnergyConsultant => "Energy Consultant",
            JobCategory::RenewableEnergy => "Renewable Energy",
            JobCategory::BusinessConsultant => "Business Consultant",
            JobCategory::Energy => "Energy",
            JobCategory::Water => "Water",
        }
    }
}

/// Ordinal experience bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Fresher", alias = "0-5 Years", alias = "0-5")]
    Fresher,
    #[serde(rename = "5-10 Years")]
    FiveToTen,
    #[serde(rename = "10-15 Years")]
    TenToFifteen,
    #[serde(rename = "15+ Years")]
    FifteenPlus,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Fresher,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::TenToFifteen,
        ExperienceLevel::FifteenPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "Fresher",
            ExperienceLevel::FiveToTen => "5-10 Years",
            ExperienceLevel::TenToFifteen => "10-15 Years",
            ExperienceLevel::FifteenPlus => "15+ Years",
        }
    }

    /// Approximate years of experience used for thresholds and ranking
    pub fn approx_years(&self) -> u32 {
        match self {
            ExperienceLevel::Fresher => 0,
            ExperienceLevel::FiveToTen => 7,
            ExperienceLevel::TenToFifteen => 12,
            ExperienceLevel::FifteenPlus => 17,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Freelance")]
    Freelance,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 2] = [EmploymentType::FullTime, EmploymentType::Freelance];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::Freelance => "Freelance",
        }
    }
}

/// Pipeline stage of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicantStatus {
    #[default]
    #[serde(rename = "New Applicants")]
    NewApplicants,
    #[serde(rename = "Reviewed")]
    Reviewed,
    #[serde(rename = "Shortlisted")]
    Shortlisted,
    #[serde(rename = "Archived")]
    Archived,
}

impl ApplicantStatus {
    pub const ALL: [ApplicantStatus; 4] = [
        ApplicantStatus::NewApplicants,
        ApplicantStatus::Reviewed,
        ApplicantStatus::Shortlisted,
        ApplicantStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::NewApplicants => "New Applicants",
            ApplicantStatus::Reviewed => "Reviewed",
            ApplicantStatus::Shortlisted => "Shortlisted",
            ApplicantStatus::Archived => "Archived",
        }
    }
}

/// Where the application came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "talent-pool")]
    TalentPool,
    #[default]
    #[serde(rename = "work-with-us")]
    WorkWithUs,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::TalentPool => "talent-pool",
            DataSource::WorkWithUs => "work-with-us",
        }
    }
}

macro_rules! impl_display_and_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let wanted = s.trim();
                    serde_json::from_value(serde_json::Value::String(wanted.to_string()))
                        .map_err(|_| format!("unknown {}: {}", stringify!($ty), wanted))
                }
            }
        )*
    };
}

impl_display_and_parse!(JobCategory, ExperienceLevel, EmploymentType, ApplicantStatus, DataSource);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub question: String,
    pub answer: String,
}

/// One person's application as seen by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    pub category: JobCategory,
    #[serde(alias = "experienceLevel")]
    pub experience: ExperienceLevel,
    pub employment_type: EmploymentType,
    pub status: ApplicantStatus,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub applied_date: String,
    #[serde(default)]
    pub avatar_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default)]
    pub source: DataSource,
    #[serde(default)]
    pub application_responses: Vec<ApplicationResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(default, rename = "linkedIn", skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ApplicantRecord {
    /// Minimal record; the remaining fields take their defaults
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: JobCategory,
        experience: ExperienceLevel,
        employment_type: EmploymentType,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            initials: initials_for(&name),
            name,
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            category,
            experience,
            employment_type,
            status: ApplicantStatus::default(),
            skills: Vec::new(),
            applied_date: String::new(),
            avatar_color: String::new(),
            job_id: None,
            job_title: None,
            job_description: None,
            source: DataSource::default(),
            application_responses: Vec::new(),
            education: None,
            current_company: None,
            linked_in: None,
            portfolio: None,
            expected_salary: None,
            notice_period: None,
            summary: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: ApplicantStatus) -> Self {
        self.status = status;
        self
    }

    pub fn approx_years(&self) -> u32 {
        self.experience.approx_years()
    }

    /// Parse `applied_date`; malformed or empty dates yield `None`
    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.applied_date)
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// First letters of the first and last name parts, upper-cased
pub fn initials_for(name: &str) -> String {
    use unicode_segmentation::UnicodeSegmentation;

    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => "U".to_string(),
        [only] => only.graphemes(true).take(2).collect::<String>().to_uppercase(),
        [first, .., last] => {
            let head = first.graphemes(true).next().unwrap_or_default();
            let tail = last.graphemes(true).next().unwrap_or_default();
            format!("{}{}", head, tail).to_uppercase()
        }
    }
}
