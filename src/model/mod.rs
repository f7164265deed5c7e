//! Domain types shared by the matchers, the store and the CLI

pub mod applicant;
pub mod criteria;

pub use applicant::{
    ApplicantRecord, ApplicantStatus, ApplicationResponse, DataSource, EmploymentType,
    ExperienceLevel, JobCategory,
};
pub use criteria::{CustomFilter, FilterState, HiringPipeline, MatchCriteria};
