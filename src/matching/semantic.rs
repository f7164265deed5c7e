//! Dictionary-driven semantic search over applicants

use crate::matching::dictionary::triggered_entries;
use crate::model::{ApplicantRecord, JobCategory};
use log::debug;
use serde::Serialize;

/// An applicant that matched a semantic query, with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticHit<'a> {
    pub applicant: &'a ApplicantRecord,
    pub score: u32,
}

/// Score every applicant against the dictionary entries a query triggers.
///
/// Category match is worth 2, each applicant skill containing a target skill
/// is worth 1. Applicants scoring zero are dropped; input order is kept.
/// An empty result means the query carried no semantic signal.
pub fn semantic_scores<'a>(query: &str, applicants: &'a [ApplicantRecord]) -> Vec<SemanticHit<'a>> {
    let entries = triggered_entries(query);
    if entries.is_empty() {
        debug!("No dictionary entry triggered by query {:?}", query);
        return Vec::new();
    }

    let target_categories: Vec<JobCategory> = entries
        .iter()
        .flat_map(|entry| entry.categories.iter().copied())
        .collect();
    let target_skills: Vec<String> = entries
        .iter()
        .flat_map(|entry| entry.skills.iter().map(|s| s.to_lowercase()))
        .collect();

    debug!(
        "Semantic query {:?} triggered {:?}",
        query,
        entries.iter().map(|e| e.key).collect::<Vec<_>>()
    );

    applicants
        .iter()
        .filter_map(|applicant| {
            let mut score = 0;

            if target_categories.contains(&applicant.category) {
                score += 2;
            }

            let matched_skills = applicant
                .skills
                .iter()
                .filter(|skill| {
                    let skill = skill.to_lowercase();
                    target_skills.iter().any(|target| skill.contains(target.as_str()))
                })
                .count() as u32;
            score += matched_skills;

            (score > 0).then_some(SemanticHit { applicant, score })
        })
        .collect()
}

/// Applicants relevant to a semantic query, in input order
pub fn get_semantic_matches<'a>(query: &str, applicants: &'a [ApplicantRecord]) -> Vec<&'a ApplicantRecord> {
    semantic_scores(query, applicants)
        .into_iter()
        .map(|hit| hit.applicant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmploymentType, ExperienceLevel};

    fn sample() -> Vec<ApplicantRecord> {
        vec![
            ApplicantRecord::new(
                "1",
                "Maya Patel",
                JobCategory::RenewableEnergy,
                ExperienceLevel::FiveToTen,
                EmploymentType::FullTime,
            )
            .with_skills(["Wind Farm Operations"]),
            ApplicantRecord::new(
                "2",
                "Tom Berg",
                JobCategory::Water,
                ExperienceLevel::Fresher,
                EmploymentType::Freelance,
            )
            .with_skills(["Hydrology"]),
            ApplicantRecord::new(
                "3",
                "Ana Silva",
                JobCategory::Energy,
                ExperienceLevel::TenToFifteen,
                EmploymentType::FullTime,
            )
            .with_skills(["Solar PV Design", "Project Management"]),
        ]
    }

    #[test]
    fn test_category_match_scores_two() {
        let applicants = sample();
        let hits = semantic_scores("renewable energy", &applicants);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].applicant.id, "1");
        assert!(hits[0].score >= 2);
    }

    #[test]
    fn test_skill_matches_count_individually() {
        let applicants = sample();
        let hits = semantic_scores("solar project engineer", &applicants);
        let ana = hits.iter().find(|h| h.applicant.id == "3").unwrap();
        // "Solar PV Design" and "Project Management" both hit
        assert_eq!(ana.score, 2);
        // Maya gets the category bonus
        assert!(hits.iter().any(|h| h.applicant.id == "1" && h.score == 2));
        assert!(!hits.iter().any(|h| h.applicant.id == "2"));
    }

    #[test]
    fn test_no_signal_returns_empty() {
        let applicants = sample();
        assert!(get_semantic_matches("hydrology", &applicants).is_empty());
        assert!(get_semantic_matches("", &applicants).is_empty());
    }

    #[test]
    fn test_results_keep_input_order() {
        let applicants = sample();
        let ids: Vec<_> = get_semantic_matches("solar project engineer", &applicants)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
