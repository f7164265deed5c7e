//! Job-description driven shortlisting

use crate::matching::dictionary::SHORTLIST_SKILL_SCANNER;
use crate::model::{ApplicantRecord, ApplicantStatus, EmploymentType, ExperienceLevel, JobCategory};
use log::debug;
use serde::Serialize;

/// Minimum score a candidate needs to be proposed
pub const SHORTLIST_MIN_SCORE: u32 = 20;

/// Maximum number of proposed candidates
pub const SHORTLIST_MAX_RESULTS: usize = 10;

/// A proposed candidate with the reasons it was picked, in rule order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistMatch<'a> {
    pub applicant: &'a ApplicantRecord,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// What the job description asks for, read once per call
struct JobSignals {
    categories: Vec<(JobCategory, &'static str)>,
    seniority: Option<(&'static [ExperienceLevel], u32)>,
    skill_keywords: Vec<&'static str>,
    employment: Vec<(EmploymentType, &'static str)>,
}

const SENIOR_LEVELS: &[ExperienceLevel] = &[ExperienceLevel::TenToFifteen, ExperienceLevel::FifteenPlus];
const MID_LEVELS: &[ExperienceLevel] = &[
    ExperienceLevel::FiveToTen,
    ExperienceLevel::TenToFifteen,
    ExperienceLevel::FifteenPlus,
];

impl JobSignals {
    fn read(description: &str) -> Self {
        let desc = description.to_lowercase();
        let has = |needle: &str| desc.contains(needle);

        let mut categories = Vec::new();
        if has("solar") || has("renewable") {
            categories.push((JobCategory::RenewableEnergy, "Renewable Energy background"));
        }
        if has("energy consultant") || has("consulting") {
            categories.push((JobCategory::EnergyConsultant, "Energy Consulting experience"));
        }
        if has("business") || has("strategy") {
            categories.push((JobCategory::BusinessConsultant, "Business Consulting expertise"));
        }

        // Senior wording wins; mid-level is only read when senior is absent
        let seniority = if has("senior") || has("lead") || has("10+ years") {
            Some((SENIOR_LEVELS, 25))
        } else if has("mid") || has("5+ years") {
            Some((MID_LEVELS, 20))
        } else {
            None
        };

        let mut employment = Vec::new();
        if has("full-time") || has("permanent") {
            employment.push((EmploymentType::FullTime, "Available for full-time"));
        }
        if has("freelance") || has("contract") {
            employment.push((EmploymentType::Freelance, "Available for freelance/contract"));
        }

        Self {
            categories,
            seniority,
            skill_keywords: SHORTLIST_SKILL_SCANNER.present_in(&desc),
            employment,
        }
    }

    fn score<'a>(&self, applicant: &'a ApplicantRecord) -> ShortlistMatch<'a> {
        let mut score = 0;
        let mut reasons = Vec::new();

        // Category
        for (category, reason) in &self.categories {
            if applicant.category == *category {
                score += 30;
                reasons.push(reason.to_string());
            }
        }

        // Experience
        if let Some((levels, points)) = self.seniority {
            if levels.contains(&applicant.experience) {
                score += points;
                reasons.push(format!("{} of experience", applicant.experience));
            }
        }

        // Skills
        let matched_skills: Vec<&str> = applicant
            .skills
            .iter()
            .filter(|skill| {
                let skill = skill.to_lowercase();
                self.skill_keywords.iter().any(|kw| skill.contains(kw))
            })
            .map(String::as_str)
            .collect();
        if !matched_skills.is_empty() {
            score += matched_skills.len() as u32 * 10;
            let shown: Vec<&str> = matched_skills.iter().take(3).copied().collect();
            reasons.push(format!("Relevant skills: {}", shown.join(", ")));
        }

        // Employment type
        for (employment_type, reason) in &self.employment {
            if applicant.employment_type == *employment_type {
                score += 10;
                reasons.push(reason.to_string());
            }
        }

        if applicant.status == ApplicantStatus::Shortlisted {
            score += 5;
            reasons.push("Previously shortlisted".to_string());
        }

        ShortlistMatch { applicant, score, reasons }
    }
}

/// Rank applicants against a free-text job description.
///
/// Returns at most ten candidates scoring at least 20, best first. Equal
/// scores keep their input order.
pub fn get_shortlist_matches<'a>(
    job_description: &str,
    applicants: &'a [ApplicantRecord],
) -> Vec<ShortlistMatch<'a>> {
    let signals = JobSignals::read(job_description);
    debug!(
        "Shortlist signals: {} categories, seniority {}, skills {:?}",
        signals.categories.len(),
        signals.seniority.is_some(),
        signals.skill_keywords
    );

    let mut matches: Vec<ShortlistMatch<'a>> = applicants
        .iter()
        .map(|applicant| signals.score(applicant))
        .filter(|m| m.score >= SHORTLIST_MIN_SCORE)
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(SHORTLIST_MAX_RESULTS);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant(id: &str, category: JobCategory, experience: ExperienceLevel) -> ApplicantRecord {
        ApplicantRecord::new(id, format!("Applicant {}", id), category, experience, EmploymentType::FullTime)
    }

    #[test]
    fn test_reasons_follow_rule_order() {
        let applicants = vec![applicant("1", JobCategory::RenewableEnergy, ExperienceLevel::FifteenPlus)
            .with_skills(["Solar PV Design", "Python", "Team Leadership", "Energy Storage"])
            .with_status(ApplicantStatus::Shortlisted)];

        let matches = get_shortlist_matches(
            "Senior solar engineer, full-time. Python and energy modelling.",
            &applicants,
        );
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        // 30 category + 25 seniority + 3 skills * 10 + 10 full-time + 5 shortlisted
        assert_eq!(m.score, 100);
        assert_eq!(
            m.reasons,
            vec![
                "Renewable Energy background".to_string(),
                "15+ Years of experience".to_string(),
                "Relevant skills: Solar PV Design, Python, Energy Storage".to_string(),
                "Available for full-time".to_string(),
                "Previously shortlisted".to_string(),
            ]
        );
    }

    #[test]
    fn test_mid_level_only_when_not_senior() {
        let applicants = vec![applicant("1", JobCategory::Water, ExperienceLevel::FiveToTen)];
        let mid = get_shortlist_matches("mid-level hydrologist", &applicants);
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].score, 20);

        // "lead" flips to the senior rule, which a 5-10 year applicant misses
        let senior = get_shortlist_matches("mid-level lead hydrologist", &applicants);
        assert!(senior.is_empty());
    }

    #[test]
    fn test_threshold_and_cap() {
        let applicants: Vec<_> = (0..15)
            .map(|i| applicant(&i.to_string(), JobCategory::BusinessConsultant, ExperienceLevel::Fresher))
            .chain(std::iter::once(applicant("weak", JobCategory::Water, ExperienceLevel::Fresher)))
            .collect();

        let matches = get_shortlist_matches("business strategy lead", &applicants);
        assert_eq!(matches.len(), SHORTLIST_MAX_RESULTS);
        assert!(matches.iter().all(|m| m.score >= SHORTLIST_MIN_SCORE));
        assert!(!matches.iter().any(|m| m.applicant.id == "weak"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let applicants = vec![
            applicant("a", JobCategory::EnergyConsultant, ExperienceLevel::Fresher),
            applicant("b", JobCategory::RenewableEnergy, ExperienceLevel::FifteenPlus),
            applicant("c", JobCategory::EnergyConsultant, ExperienceLevel::Fresher),
        ];
        let matches = get_shortlist_matches("senior consulting role", &applicants);
        let ids: Vec<_> = matches.iter().map(|m| m.applicant.id.as_str()).collect();
        // b scores 25, a and c score 30 each
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_no_qualifying_candidates_is_empty() {
        let applicants = vec![applicant("1", JobCategory::Water, ExperienceLevel::Fresher)];
        assert!(get_shortlist_matches("anything at all", &applicants).is_empty());
        assert!(get_shortlist_matches("", &[]).is_empty());
    }
}
