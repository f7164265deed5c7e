//! The applicant matching engine
//!
//! Every function here is pure: no I/O, no shared state, and no failure
//! modes. A query that matches nothing yields an empty result.

pub mod analytics;
pub mod classifier;
pub mod dashboard;
pub mod dictionary;
pub mod profile;
pub mod query_filter;
pub mod semantic;
pub mod shortlist;

pub use analytics::{answer_analytics_question, answer_analytics_question_at, AnalyticsAnswer};
pub use classifier::is_semantic_query;
pub use dashboard::{literal_search, smart_search, SearchMode, SearchOutcome};
pub use profile::{candidate_profile, CandidateProfile};
pub use query_filter::{apply_criteria, parse_query_to_filter, QueryFilterResult};
pub use semantic::{get_semantic_matches, semantic_scores, SemanticHit};
pub use shortlist::{get_shortlist_matches, ShortlistMatch};
