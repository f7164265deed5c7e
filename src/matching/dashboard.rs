//! Header search box and sidebar facets

use crate::matching::classifier::is_semantic_query;
use crate::matching::semantic::get_semantic_matches;
use crate::model::{ApplicantRecord, FilterState};
use log::debug;
use serde::Serialize;

/// How a search was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Semantic,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome<'a> {
    pub mode: SearchMode,
    pub applicants: Vec<&'a ApplicantRecord>,
}

/// Case-insensitive substring search over name, email, location and skills
pub fn literal_search(query: &str, applicant: &ApplicantRecord) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();

    applicant.name.to_lowercase().contains(&query)
        || applicant.email.to_lowercase().contains(&query)
        || applicant.location.to_lowercase().contains(&query)
        || applicant
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&query))
}

impl FilterState {
    /// Facet checks only; an empty facet places no constraint
    pub fn facets_match(&self, applicant: &ApplicantRecord) -> bool {
        (self.categories.is_empty() || self.categories.contains(&applicant.category))
            && (self.experience_levels.is_empty()
                || self.experience_levels.contains(&applicant.experience))
            && (self.employment_types.is_empty()
                || self.employment_types.contains(&applicant.employment_type))
            && (self.job_ids.is_empty()
                || applicant
                    .job_id
                    .as_ref()
                    .is_some_and(|job_id| self.job_ids.contains(job_id)))
    }

    /// Literal search plus every facet
    pub fn matches(&self, applicant: &ApplicantRecord) -> bool {
        literal_search(&self.search_query, applicant) && self.facets_match(applicant)
    }

    pub fn apply<'a>(&self, applicants: &'a [ApplicantRecord]) -> Vec<&'a ApplicantRecord> {
        applicants.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Prefer semantic matches for natural-language queries, else search literally.
///
/// An empty semantic result carries no signal and falls back to the literal
/// path. Facets apply either way.
pub fn smart_search<'a>(state: &FilterState, applicants: &'a [ApplicantRecord]) -> SearchOutcome<'a> {
    if is_semantic_query(&state.search_query) {
        let semantic = get_semantic_matches(&state.search_query, applicants);
        if !semantic.is_empty() {
            debug!("Semantic search returned {} applicants", semantic.len());
            return SearchOutcome {
                mode: SearchMode::Semantic,
                applicants: semantic.into_iter().filter(|a| state.facets_match(a)).collect(),
            };
        }
        debug!("Semantic query produced no signal, falling back to literal search");
    }

    SearchOutcome {
        mode: SearchMode::Literal,
        applicants: state.apply(applicants),
    }
}
