//! Free-text query to structured filter criteria
//!
//! Backs the "AI chat filter": the query is read into a sparse
//! [`MatchCriteria`], applicants are scored against it, and a one-line
//! summary describes what was detected. Stored criteria of saved custom
//! filters are re-applied through the same scorer.

use crate::matching::dictionary::FILTER_SKILL_SCANNER;
use crate::model::{ApplicantRecord, EmploymentType, JobCategory, MatchCriteria};
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Maximum number of applicants returned by a filter query
pub const FILTER_MAX_RESULTS: usize = 20;

// ASCII digits only; the count starts at the beginning of a digit run
static YEARS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]+)\+?\s*years?").expect("Invalid years regex")
});

/// Category buckets, checked in order; the first hit wins
const CATEGORY_BUCKETS: [(&[&str], JobCategory); 3] = [
    (&["renewable", "solar", "wind", "pv"], JobCategory::RenewableEnergy),
    (&["energy consultant", "consulting"], JobCategory::EnergyConsultant),
    (&["business", "strategy"], JobCategory::BusinessConsultant),
];

const EMPLOYMENT_BUCKETS: [(&[&str], EmploymentType); 2] = [
    (&["full-time", "permanent"], EmploymentType::FullTime),
    (&["freelance", "contract"], EmploymentType::Freelance),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFilterResult<'a> {
    pub matches: Vec<&'a ApplicantRecord>,
    pub criteria: MatchCriteria,
    pub summary: String,
}

/// Extract `N` from phrases like "5+ years" or "10 year".
///
/// Counts too large for `u32` saturate, so they still exclude everyone.
pub fn extract_min_years(text: &str) -> Option<u32> {
    YEARS_REGEX
        .captures(&text.to_lowercase())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
}

fn first_bucket<T: Copy>(lowered: &str, buckets: &[(&[&str], T)]) -> Option<T> {
    buckets
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .map(|(_, value)| *value)
}

/// Read the criteria a query expresses
pub fn extract_criteria(query: &str) -> MatchCriteria {
    let lowered = query.to_lowercase();

    let skills: Vec<String> = FILTER_SKILL_SCANNER
        .present_in(&lowered)
        .into_iter()
        .map(str::to_string)
        .collect();

    MatchCriteria {
        categories: first_bucket(&lowered, &CATEGORY_BUCKETS).map(|c| vec![c]),
        skills: (!skills.is_empty()).then_some(skills),
        min_experience_years: extract_min_years(&lowered),
        employment_types: first_bucket(&lowered, &EMPLOYMENT_BUCKETS).map(|e| vec![e]),
    }
}

/// Score one applicant; `None` means excluded outright by the experience floor
pub fn criteria_score(criteria: &MatchCriteria, applicant: &ApplicantRecord) -> Option<u32> {
    let mut score = 0;

    if let Some(min_years) = criteria.min_experience_years {
        if applicant.approx_years() < min_years {
            return None;
        }
        score += 2;
    }

    if let Some(categories) = &criteria.categories {
        if categories.contains(&applicant.category) {
            score += 3;
        }
    }

    if let Some(targets) = &criteria.skills {
        let targets: Vec<String> = targets.iter().map(|t| t.to_lowercase()).collect();
        let matched = applicant
            .skills
            .iter()
            .map(|skill| skill.trim().to_lowercase())
            .filter(|skill| !skill.is_empty())
            .filter(|skill| {
                targets
                    .iter()
                    .any(|target| skill.contains(target.as_str()) || target.contains(skill.as_str()))
            })
            .count() as u32;
        score += matched * 2;
    }

    if let Some(types) = &criteria.employment_types {
        if types.contains(&applicant.employment_type) {
            score += 1;
        }
    }

    Some(score)
}

/// Applicants satisfying the criteria, most experienced first, capped at 20.
///
/// Ordering looks at experience only; the criteria score decides inclusion
/// but not rank.
pub fn apply_criteria<'a>(criteria: &MatchCriteria, applicants: &'a [ApplicantRecord]) -> Vec<&'a ApplicantRecord> {
    let mut matches: Vec<&ApplicantRecord> = applicants
        .iter()
        .filter(|applicant| criteria_score(criteria, applicant).is_some_and(|score| score > 0))
        .collect();

    matches.sort_by(|a, b| b.approx_years().cmp(&a.approx_years()));
    matches.truncate(FILTER_MAX_RESULTS);
    matches
}

/// Human-readable pieces of the criteria, in a fixed order
pub fn describe_criteria(criteria: &MatchCriteria) -> Vec<String> {
    let mut parts = Vec::new();

    if let Some(years) = criteria.min_experience_years {
        parts.push(format!("{}+ years experience", years));
    }
    if let Some(skills) = &criteria.skills {
        parts.push(format!("skills in {}", skills.join(", ")));
    }
    if let Some(categories) = &criteria.categories {
        for category in categories {
            parts.push(format!("{} category", category));
        }
    }
    if let Some(types) = &criteria.employment_types {
        for employment_type in types {
            parts.push(format!("{} positions", employment_type));
        }
    }

    parts
}

/// One-line description of what a query was understood to ask for
pub fn summarize(criteria: &MatchCriteria, match_count: usize) -> String {
    let parts = describe_criteria(criteria);
    if parts.is_empty() {
        return "No filter criteria detected in query".to_string();
    }

    format!("Found {} candidates matching: {}", match_count, parts.join(", "))
}

/// Turn a free-text query into criteria, matching applicants and a summary
pub fn parse_query_to_filter<'a>(query: &str, applicants: &'a [ApplicantRecord]) -> QueryFilterResult<'a> {
    let criteria = extract_criteria(query);
    let matches = apply_criteria(&criteria, applicants);
    let summary = summarize(&criteria, matches.len());

    debug!("Filter query {:?} -> {:?} ({} matches)", query, criteria, matches.len());

    QueryFilterResult {
        matches,
        criteria,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExperienceLevel;

    fn applicants() -> Vec<ApplicantRecord> {
        vec![
            ApplicantRecord::new(
                "fresh",
                "Lena Fischer",
                JobCategory::RenewableEnergy,
                ExperienceLevel::Fresher,
                EmploymentType::FullTime,
            )
            .with_skills(["Solar PV Design", "Solar"]),
            ApplicantRecord::new(
                "mid",
                "Omar Haddad",
                JobCategory::EnergyConsultant,
                ExperienceLevel::FiveToTen,
                EmploymentType::Freelance,
            )
            .with_skills(["Carbon Accounting"]),
            ApplicantRecord::new(
                "veteran",
                "Grace Obi",
                JobCategory::RenewableEnergy,
                ExperienceLevel::FifteenPlus,
                EmploymentType::FullTime,
            )
            .with_skills(["Wind Farm Operations"]),
        ]
    }

    #[test]
    fn test_extract_min_years() {
        assert_eq!(extract_min_years("5+ years experience in solar"), Some(5));
        assert_eq!(extract_min_years("at least 10 YEARS"), Some(10));
        assert_eq!(extract_min_years("1 year"), Some(1));
        assert_eq!(extract_min_years("several years"), None);
        assert_eq!(extract_min_years(""), None);
    }

    #[test]
    fn test_years_read_from_start_of_number() {
        assert_eq!(extract_min_years("1000 years"), Some(1000));
        assert_eq!(extract_min_years("over 25years"), Some(25));
        assert_eq!(extract_min_years("٥ years or 5 years"), Some(5));
    }

    #[test]
    fn test_huge_experience_floor_excludes_everyone() {
        let applicants = applicants();
        let result = parse_query_to_filter("1000 years", &applicants);
        assert_eq!(result.criteria.min_experience_years, Some(1000));
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_experience_floor_is_a_hard_filter() {
        let applicants = applicants();
        let result = parse_query_to_filter("5+ years experience in solar", &applicants);

        assert_eq!(result.criteria.min_experience_years, Some(5));
        assert!(!result.matches.iter().any(|a| a.id == "fresh"));
        let ids: Vec<_> = result.matches.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["veteran", "mid"]);
    }

    #[test]
    fn test_first_category_bucket_wins() {
        let criteria = extract_criteria("solar strategy consulting");
        assert_eq!(criteria.categories, Some(vec![JobCategory::RenewableEnergy]));

        let criteria = extract_criteria("freelance or full-time business analyst");
        assert_eq!(criteria.categories, Some(vec![JobCategory::BusinessConsultant]));
        assert_eq!(criteria.employment_types, Some(vec![EmploymentType::FullTime]));
    }

    #[test]
    fn test_skills_are_unioned() {
        let criteria = extract_criteria("carbon accounting, client reports and stakeholder work");
        assert_eq!(
            criteria.skills,
            Some(vec![
                "carbon accounting".to_string(),
                "client reports".to_string(),
                "stakeholder".to_string()
            ])
        );
    }

    #[test]
    fn test_bidirectional_skill_containment() {
        let criteria = MatchCriteria {
            skills: Some(vec!["carbon accounting".to_string()]),
            ..Default::default()
        };
        let short_skill = ApplicantRecord::new(
            "x",
            "X",
            JobCategory::Energy,
            ExperienceLevel::Fresher,
            EmploymentType::FullTime,
        )
        .with_skills(["Carbon", "  "]);
        assert_eq!(criteria_score(&criteria, &short_skill), Some(2));
    }

    #[test]
    fn test_sorted_by_experience_not_score() {
        let applicants = applicants();
        // Lena matches category + two skills, yet ranks below Grace on experience
        let result = parse_query_to_filter("solar specialists", &applicants);
        let ids: Vec<_> = result.matches.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["veteran", "fresh"]);
    }

    #[test]
    fn test_summary_lists_detected_criteria() {
        let applicants = applicants();
        let result = parse_query_to_filter("10+ years wind, full-time", &applicants);
        assert_eq!(
            result.summary,
            "Found 1 candidates matching: 10+ years experience, skills in wind, Renewable Energy category, Full-time positions"
        );
    }

    #[test]
    fn test_no_criteria() {
        let applicants = applicants();
        let result = parse_query_to_filter("hello there", &applicants);
        assert!(result.criteria.is_empty());
        assert!(result.matches.is_empty());
        assert_eq!(result.summary, "No filter criteria detected in query");
    }

    #[test]
    fn test_idempotent() {
        let applicants = applicants();
        let first = parse_query_to_filter("5+ years solar or carbon accounting", &applicants);
        let second = parse_query_to_filter("5+ years solar or carbon accounting", &applicants);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hostile_input_does_not_panic() {
        let applicants = applicants();
        let long = "9".repeat(10_000) + " years";
        let result = parse_query_to_filter(&long, &applicants);
        assert_eq!(result.criteria.min_experience_years, Some(u32::MAX));
        assert!(result.matches.is_empty());
        let _ = parse_query_to_filter("((((+*?[", &applicants);
    }
}
