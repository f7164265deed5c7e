//! Applicant matcher library
//!
//! Rule-based matching over job applicants: query classification, semantic
//! keyword matching, job-description shortlisting, free-text filter parsing
//! and canned analytics answers.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod model;
pub mod output;
pub mod store;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use matching::{
    answer_analytics_question, get_semantic_matches, get_shortlist_matches, is_semantic_query,
    parse_query_to_filter, AnalyticsAnswer, QueryFilterResult, ShortlistMatch,
};
pub use model::{ApplicantRecord, MatchCriteria};
