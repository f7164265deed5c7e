//! Filter criteria, saved custom filters and hiring pipelines

use crate::model::applicant::{EmploymentType, ExperienceLevel, JobCategory};
use serde::{Deserialize, Serialize};

/// Structured criteria derived from a free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<JobCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_types: Option<Vec<EmploymentType>>,
}

impl MatchCriteria {
    pub fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.skills.is_none()
            && self.min_experience_years.is_none()
            && self.employment_types.is_none()
    }
}

/// Sidebar facets plus the header search box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub categories: Vec<JobCategory>,
    #[serde(default)]
    pub experience_levels: Vec<ExperienceLevel>,
    #[serde(default)]
    pub employment_types: Vec<EmploymentType>,
    #[serde(default)]
    pub job_ids: Vec<String>,
    #[serde(default)]
    pub search_query: String,
}

/// A saved, re-applicable filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFilter {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filter_criteria: MatchCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_applicant_ids: Option<Vec<String>>,
    pub created_at: String,
}

/// Named group of applicants moving through hiring together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringPipeline {
    pub id: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub applicant_ids: Vec<String>,
}
