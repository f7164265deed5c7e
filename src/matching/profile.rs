//! Short candidate profile shown on hover cards

use crate::model::ApplicantRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    pub summary: String,
    pub strengths: Vec<String>,
    pub highlights: Vec<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn candidate_profile(applicant: &ApplicantRecord) -> CandidateProfile {
    let strengths: Vec<String> = applicant.skills.iter().take(3).cloned().collect();

    let mut highlights = Vec::new();
    if let Some(company) = non_blank(&applicant.current_company) {
        highlights.push(format!("Currently at {}", company));
    }
    if let Some(education) = non_blank(&applicant.education) {
        highlights.push(education.to_string());
    }
    highlights.push(format!("{} experience", applicant.experience));
    highlights.push(format!("{} availability", applicant.employment_type));
    highlights.truncate(3);

    let summary = match non_blank(&applicant.summary) {
        Some(summary) => summary.to_string(),
        None => format!(
            "{} {} professional with expertise in {}. {} candidate based in {}.",
            applicant.experience,
            applicant.category,
            strengths.iter().take(2).cloned().collect::<Vec<_>>().join(" and "),
            applicant.employment_type,
            applicant.location
        ),
    };

    CandidateProfile {
        summary,
        strengths,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmploymentType, ExperienceLevel, JobCategory};

    fn applicant() -> ApplicantRecord {
        let mut a = ApplicantRecord::new(
            "1",
            "Maya Patel",
            JobCategory::RenewableEnergy,
            ExperienceLevel::TenToFifteen,
            EmploymentType::FullTime,
        )
        .with_skills(["Solar PV Design", "Project Management", "AutoCAD", "GIS"]);
        a.location = "Lisbon".to_string();
        a
    }

    #[test]
    fn test_generated_summary() {
        let profile = candidate_profile(&applicant());
        assert_eq!(
            profile.summary,
            "10-15 Years Renewable Energy professional with expertise in Solar PV Design and Project Management. Full-time candidate based in Lisbon."
        );
        assert_eq!(profile.strengths.len(), 3);
        assert_eq!(
            profile.highlights,
            vec!["10-15 Years experience".to_string(), "Full-time availability".to_string()]
        );
    }

    #[test]
    fn test_highlights_prefer_company_and_education() {
        let mut a = applicant();
        a.current_company = Some("Sunfield GmbH".to_string());
        a.education = Some("MSc Energy Systems".to_string());
        a.summary = Some("Hands-on utility-scale PV lead.".to_string());

        let profile = candidate_profile(&a);
        assert_eq!(profile.summary, "Hands-on utility-scale PV lead.");
        assert_eq!(
            profile.highlights,
            vec![
                "Currently at Sunfield GmbH".to_string(),
                "MSc Energy Systems".to_string(),
                "10-15 Years experience".to_string(),
            ]
        );
    }
}
