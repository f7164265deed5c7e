//! Report payloads handed to the formatters

use crate::matching::{AnalyticsAnswer, CandidateProfile, QueryFilterResult, SearchMode, ShortlistMatch};
use crate::model::{ApplicantRecord, CustomFilter, HiringPipeline};
use serde::Serialize;

/// Everything a command can print, borrowed from the loaded applicants
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Report<'a> {
    #[serde(rename_all = "camelCase")]
    Applicants {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        mode: Option<SearchMode>,
        applicants: Vec<&'a ApplicantRecord>,
    },
    #[serde(rename_all = "camelCase")]
    Shortlist {
        job_description: String,
        matches: Vec<ShortlistMatch<'a>>,
    },
    #[serde(rename_all = "camelCase")]
    Filter {
        query: String,
        result: QueryFilterResult<'a>,
    },
    #[serde(rename_all = "camelCase")]
    Answer {
        question: String,
        answer: AnalyticsAnswer,
    },
    #[serde(rename_all = "camelCase")]
    Profile {
        applicant: &'a ApplicantRecord,
        profile: CandidateProfile,
    },
    #[serde(rename_all = "camelCase")]
    Pipelines { pipelines: Vec<&'a HiringPipeline> },
    #[serde(rename_all = "camelCase")]
    Pipeline {
        pipeline: &'a HiringPipeline,
        members: Vec<&'a ApplicantRecord>,
        /// Ids no longer present in the applicant data
        missing: Vec<&'a str>,
    },
    #[serde(rename_all = "camelCase")]
    CustomFilters { filters: Vec<&'a CustomFilter> },
}

impl<'a> Report<'a> {
    /// Resolve a pipeline's member ids against the loaded applicants
    pub fn pipeline(pipeline: &'a HiringPipeline, applicants: &'a [ApplicantRecord]) -> Self {
        let mut members = Vec::new();
        let mut missing = Vec::new();
        for id in &pipeline.applicant_ids {
            match applicants.iter().find(|a| &a.id == id) {
                Some(applicant) => members.push(applicant),
                None => missing.push(id.as_str()),
            }
        }
        Report::Pipeline {
            pipeline,
            members,
            missing,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Report::Applicants { title, .. } => title.clone(),
            Report::Shortlist { .. } => "Shortlist".to_string(),
            Report::Filter { query, .. } => format!("Filter: {}", query),
            Report::Answer { question, .. } => question.clone(),
            Report::Profile { applicant, .. } => applicant.name.clone(),
            Report::Pipelines { .. } => "Hiring Pipelines".to_string(),
            Report::Pipeline { pipeline, .. } => pipeline.name.clone(),
            Report::CustomFilters { .. } => "Saved Filters".to_string(),
        }
    }
}
