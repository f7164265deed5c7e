//! Mapping raw application-form submissions into applicant records
//!
//! Form backends store answers either under descriptive keys (`email`,
//! `skills`, ...) or positionally as `answer_N` / `question_N`. A submission
//! may also carry the `jobListing` it was made against, whose
//! `job_question_N` entries label the answers.

use crate::model::applicant::{initials_for, parse_date};
use crate::model::{
    ApplicantRecord, ApplicantStatus, ApplicationResponse, DataSource, EmploymentType,
    ExperienceLevel, JobCategory,
};
use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

const AVATAR_COLORS: [&str; 8] = [
    "bg-primary",
    "bg-info",
    "bg-success",
    "bg-warning",
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-teal-500",
];

const DEFAULT_QUESTIONS: [&str; 25] = [
    "Full Name",
    "Email Address",
    "Phone Number",
    "Location/City",
    "LinkedIn Profile",
    "Portfolio/Website",
    "Current Company",
    "Job Title",
    "Years of Experience",
    "Education Level",
    "Field of Study",
    "Relevant Skills",
    "Why are you interested in this position?",
    "What are your key strengths?",
    "Describe a challenging project",
    "Career Goals",
    "Expected Salary Range",
    "Notice Period",
    "Availability to Start",
    "Preferred Work Location",
    "Willingness to Relocate",
    "Employment Type Preference",
    "How did you hear about us?",
    "Additional Comments",
    "Resume/CV URL",
];

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Direct key first, then the positional `answer_N` / `question_N` slots
fn form_field<'a>(doc: &'a Value, key: &str, slot: usize) -> Option<&'a str> {
    non_empty_str(doc.get(key))
        .or_else(|| non_empty_str(doc.get(format!("answer_{}", slot))))
        .or_else(|| non_empty_str(doc.get(format!("question_{}", slot))))
}

pub fn map_job_title_to_category(job_title: &str) -> JobCategory {
    let lower = job_title.to_lowercase();
    if ["renewable", "solar", "wind", "energy"].iter().any(|kw| lower.contains(kw)) {
        JobCategory::RenewableEnergy
    } else if lower.contains("business") || lower.contains("management") {
        JobCategory::BusinessConsultant
    } else {
        JobCategory::EnergyConsultant
    }
}

/// Read a free-text experience answer into a level.
///
/// Explicit ranges are checked before the fresher markers so that
/// "10-15 years" is not caught by the "0-" prefix. Matching "0-" first
/// would file every 10-15 year candidate as a fresher.
pub fn map_experience(experience: &str) -> ExperienceLevel {
    let lower = experience.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("15+") || has("15 plus") || has("more than 15") {
        ExperienceLevel::FifteenPlus
    } else if has("10-15") || has("10 to 15") {
        ExperienceLevel::TenToFifteen
    } else if has("5-10") || has("5 to 10") {
        ExperienceLevel::FiveToTen
    } else {
        // fresher, 0-5, "no experience" and anything unrecognised
        ExperienceLevel::Fresher
    }
}

pub fn map_employment_type(employment_type: &str) -> EmploymentType {
    let lower = employment_type.to_lowercase();
    if lower.contains("freelance") || lower.contains("contract") {
        EmploymentType::Freelance
    } else {
        EmploymentType::FullTime
    }
}

/// Comma separated text or a JSON array of strings
pub fn parse_skills(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Stable colour pick from the sum of the name's UTF-16 code units
pub fn avatar_color(name: &str) -> &'static str {
    let hash: usize = name.encode_utf16().map(usize::from).sum();
    AVATAR_COLORS[hash % AVATAR_COLORS.len()]
}

/// Normalise a stored timestamp to RFC 3339, falling back to `now`
fn format_form_date(value: Option<&Value>, now: DateTime<Utc>) -> String {
    let parsed = match value {
        Some(Value::Object(ts)) => ts
            .get("_seconds")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        Some(Value::String(text)) => parse_date(text),
        Some(Value::Number(millis)) => millis.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        debug!("Unreadable submission date {:?}, using current time", value);
        now
    })
    .to_rfc3339()
}

fn application_responses(doc: &Value, job_listing: Option<&Value>) -> Vec<ApplicationResponse> {
    (1..=DEFAULT_QUESTIONS.len())
        .filter_map(|n| {
            let answer = non_empty_str(doc.get(format!("answer_{}", n)))
                .or_else(|| non_empty_str(doc.get(format!("question_{}", n))))?;
            let question = job_listing
                .and_then(|listing| non_empty_str(listing.get(format!("job_question_{}", n))))
                .unwrap_or(DEFAULT_QUESTIONS[n - 1]);
            Some(ApplicationResponse {
                question: question.to_string(),
                answer: answer.to_string(),
            })
        })
        .collect()
}

/// Map one raw submission; `now` stands in for a missing submission date
pub fn map_form_submission(doc: &Value, now: DateTime<Utc>) -> ApplicantRecord {
    let job_listing = doc.get("jobListing").filter(|v| v.is_object());
    let owned = |key: &str, slot: usize| form_field(doc, key, slot).map(str::to_string);

    let name = form_field(doc, "name", 1).unwrap_or("Unknown").to_string();
    let skills_value = doc
        .get("skills")
        .filter(|v| !v.is_null())
        .or_else(|| doc.get("answer_12"))
        .or_else(|| doc.get("question_12"));

    let date_value = ["appliedDate", "created_at", "snapshot_date"]
        .iter()
        .find_map(|key| doc.get(*key).filter(|v| !v.is_null()));

    ApplicantRecord {
        id: non_empty_str(doc.get("id"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("form-{}", uuid::Uuid::new_v4())),
        initials: initials_for(&name),
        avatar_color: avatar_color(&name).to_string(),
        email: owned("email", 2).unwrap_or_default(),
        phone: owned("phone", 3).unwrap_or_default(),
        location: owned("location", 4).unwrap_or_default(),
        category: map_job_title_to_category(form_field(doc, "jobTitle", 8).unwrap_or_default()),
        experience: map_experience(form_field(doc, "experience", 9).unwrap_or_default()),
        employment_type: map_employment_type(form_field(doc, "employmentType", 22).unwrap_or_default()),
        status: non_empty_str(doc.get("status"))
            .and_then(|s| s.parse::<ApplicantStatus>().ok())
            .unwrap_or_default(),
        skills: parse_skills(skills_value),
        applied_date: format_form_date(date_value, now),
        job_id: non_empty_str(doc.get("job_id")).map(str::to_string),
        job_title: owned("jobTitle", 8),
        job_description: job_listing
            .and_then(|listing| non_empty_str(listing.get("job_desc")))
            .map(str::to_string),
        source: non_empty_str(doc.get("source"))
            .and_then(|s| s.parse::<DataSource>().ok())
            .unwrap_or_default(),
        application_responses: application_responses(doc, job_listing),
        education: owned("education", 10),
        current_company: owned("currentCompany", 7),
        linked_in: owned("linkedIn", 5),
        portfolio: owned("portfolio", 6),
        expected_salary: owned("expectedSalary", 17),
        notice_period: owned("noticePeriod", 18),
        summary: non_empty_str(doc.get("summary")).map(str::to_string),
        name,
    }
}

pub fn map_form_submissions(docs: &[Value]) -> Vec<ApplicantRecord> {
    let now = Utc::now();
    docs.iter().map(|doc| map_form_submission(doc, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_positional_answers() {
        let doc = json!({
            "id": "sub-1",
            "answer_1": "Maya Patel",
            "answer_2": "maya@example.com",
            "answer_8": "Solar Project Engineer",
            "answer_9": "10-15 years",
            "answer_12": "Solar PV Design, AutoCAD, ",
            "answer_22": "Contract",
            "created_at": { "_seconds": 1718409600 },
            "jobListing": { "job_question_1": "Your name", "job_desc": "Build solar farms" }
        });

        let record = map_form_submission(&doc, now());
        assert_eq!(record.id, "sub-1");
        assert_eq!(record.name, "Maya Patel");
        assert_eq!(record.initials, "MP");
        assert_eq!(record.category, JobCategory::RenewableEnergy);
        assert_eq!(record.experience, ExperienceLevel::TenToFifteen);
        assert_eq!(record.employment_type, EmploymentType::Freelance);
        assert_eq!(record.skills, vec!["Solar PV Design", "AutoCAD"]);
        assert_eq!(record.applied_date, "2024-06-15T00:00:00+00:00");
        assert_eq!(record.job_description.as_deref(), Some("Build solar farms"));
        assert_eq!(record.application_responses[0].question, "Your name");
        assert_eq!(record.application_responses[1].question, "Email Address");
        assert_eq!(record.status, ApplicantStatus::NewApplicants);
        assert_eq!(record.source, DataSource::WorkWithUs);
    }

    #[test]
    fn test_direct_fields_win_over_answers() {
        let doc = json!({
            "id": "sub-2",
            "name": "Omar Haddad",
            "answer_1": "Ignored",
            "skills": ["Python", "Carbon Accounting"],
            "status": "Shortlisted",
            "source": "talent-pool",
            "appliedDate": "2024-05-01"
        });
        let record = map_form_submission(&doc, now());
        assert_eq!(record.name, "Omar Haddad");
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.status, ApplicantStatus::Shortlisted);
        assert_eq!(record.source, DataSource::TalentPool);
        assert!(record.applied_date.starts_with("2024-05-01"));
        assert_eq!(record.category, JobCategory::EnergyConsultant);
        assert_eq!(record.experience, ExperienceLevel::Fresher);
    }

    #[test]
    fn test_empty_submission_gets_defaults() {
        let record = map_form_submission(&json!({}), now());
        assert_eq!(record.name, "Unknown");
        assert!(record.id.starts_with("form-"));
        assert_eq!(record.applied_date, now().to_rfc3339());
        assert!(record.application_responses.is_empty());
    }

    #[test]
    fn test_experience_mapping() {
        assert_eq!(map_experience("Fresher"), ExperienceLevel::Fresher);
        assert_eq!(map_experience("0-5 years"), ExperienceLevel::Fresher);
        assert_eq!(map_experience("5 to 10"), ExperienceLevel::FiveToTen);
        assert_eq!(map_experience("10-15 Years"), ExperienceLevel::TenToFifteen);
        assert_eq!(map_experience("more than 15"), ExperienceLevel::FifteenPlus);
        assert_eq!(map_experience("lots"), ExperienceLevel::Fresher);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(map_job_title_to_category("Wind Technician"), JobCategory::RenewableEnergy);
        assert_eq!(map_job_title_to_category("Business Analyst"), JobCategory::BusinessConsultant);
        assert_eq!(map_job_title_to_category(""), JobCategory::EnergyConsultant);
    }

    #[test]
    fn test_avatar_color_is_stable() {
        assert_eq!(avatar_color("Maya Patel"), avatar_color("Maya Patel"));
        assert_eq!(avatar_color(""), "bg-primary");
    }
}
