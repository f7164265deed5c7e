//! Persistent workspace: saved custom filters and hiring pipelines

use crate::error::{MatcherError, Result};
use crate::matching::query_filter::apply_criteria;
use crate::model::{ApplicantRecord, CustomFilter, HiringPipeline, MatchCriteria};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub custom_filters: Vec<CustomFilter>,
    #[serde(default)]
    pub pipelines: Vec<HiringPipeline>,
}

/// Fields for a new custom filter
#[derive(Debug, Clone, Default)]
pub struct NewCustomFilter {
    pub name: String,
    pub description: Option<String>,
    pub criteria: MatchCriteria,
    pub original_query: Option<String>,
    pub matched_applicant_ids: Option<Vec<String>>,
}

/// Workspace backed by a pretty-printed JSON file
pub struct WorkspaceStore {
    path: PathBuf,
    workspace: Workspace,
}

impl WorkspaceStore {
    /// Open the workspace at `path`; a missing file is an empty workspace
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let workspace = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Workspace::default()
        };
        Ok(Self { path, workspace })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.workspace)?;
        std::fs::write(&self.path, content)?;
        info!("Saved workspace to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    // Custom filters

    pub fn save_custom_filter(&mut self, new: NewCustomFilter) -> Result<&CustomFilter> {
        if new.name.trim().is_empty() {
            return Err(MatcherError::InvalidInput("Filter name cannot be empty".to_string()));
        }

        let filter = CustomFilter {
            id: format!("filter-{}", Uuid::new_v4()),
            name: new.name.trim().to_string(),
            description: new.description,
            filter_criteria: new.criteria,
            original_query: new.original_query,
            matched_applicant_ids: new.matched_applicant_ids,
            created_at: Utc::now().to_rfc3339(),
        };
        info!("Saving custom filter '{}' ({})", filter.name, filter.id);
        self.workspace.custom_filters.push(filter);
        Ok(&self.workspace.custom_filters[self.workspace.custom_filters.len() - 1])
    }

    /// Newest first; insertion order breaks timestamp ties
    pub fn list_custom_filters(&self) -> Vec<&CustomFilter> {
        let mut filters: Vec<&CustomFilter> = self.workspace.custom_filters.iter().rev().collect();
        filters.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        filters
    }

    pub fn custom_filter(&self, id: &str) -> Result<&CustomFilter> {
        self.workspace
            .custom_filters
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("custom filter {}", id)))
    }

    pub fn delete_custom_filter(&mut self, id: &str) -> Result<CustomFilter> {
        let index = self
            .workspace
            .custom_filters
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("custom filter {}", id)))?;
        Ok(self.workspace.custom_filters.remove(index))
    }

    /// Run a saved filter against the current applicants
    pub fn apply_custom_filter<'a>(
        &self,
        id: &str,
        applicants: &'a [ApplicantRecord],
    ) -> Result<Vec<&'a ApplicantRecord>> {
        Ok(apply_saved_filter(self.custom_filter(id)?, applicants))
    }

    // Pipelines

    pub fn create_pipeline(&mut self, name: &str, applicant_ids: Vec<String>) -> Result<&HiringPipeline> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MatcherError::InvalidInput("Pipeline name cannot be empty".to_string()));
        }

        let pipeline = HiringPipeline {
            id: format!("pipeline-{}", Uuid::new_v4()),
            name: name.to_string(),
            created_at: Utc::now().to_rfc3339(),
            applicant_ids: dedup_ids(applicant_ids),
        };
        info!(
            "Creating pipeline '{}' with {} applicants",
            pipeline.name,
            pipeline.applicant_ids.len()
        );
        self.workspace.pipelines.push(pipeline);
        Ok(&self.workspace.pipelines[self.workspace.pipelines.len() - 1])
    }

    pub fn list_pipelines(&self) -> &[HiringPipeline] {
        &self.workspace.pipelines
    }

    pub fn pipeline(&self, id: &str) -> Result<&HiringPipeline> {
        self.workspace
            .pipelines
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("pipeline {}", id)))
    }

    fn pipeline_mut(&mut self, id: &str) -> Result<&mut HiringPipeline> {
        self.workspace
            .pipelines
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("pipeline {}", id)))
    }

    pub fn rename_pipeline(&mut self, id: &str, name: &str) -> Result<&HiringPipeline> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MatcherError::InvalidInput("Pipeline name cannot be empty".to_string()));
        }
        let pipeline = self.pipeline_mut(id)?;
        pipeline.name = name.to_string();
        Ok(&*pipeline)
    }

    pub fn set_pipeline_members(&mut self, id: &str, applicant_ids: Vec<String>) -> Result<&HiringPipeline> {
        let pipeline = self.pipeline_mut(id)?;
        pipeline.applicant_ids = dedup_ids(applicant_ids);
        Ok(&*pipeline)
    }

    pub fn delete_pipeline(&mut self, id: &str) -> Result<HiringPipeline> {
        let index = self
            .workspace
            .pipelines
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("pipeline {}", id)))?;
        Ok(self.workspace.pipelines.remove(index))
    }
}

/// Fixed id list when present and non-empty, otherwise re-run the criteria
pub fn apply_saved_filter<'a>(
    filter: &CustomFilter,
    applicants: &'a [ApplicantRecord],
) -> Vec<&'a ApplicantRecord> {
    match filter.matched_applicant_ids.as_deref() {
        Some(ids) if !ids.is_empty() => applicants
            .iter()
            .filter(|a| ids.contains(&a.id))
            .collect(),
        _ => apply_criteria(&filter.filter_criteria, applicants),
    }
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmploymentType, ExperienceLevel, JobCategory};
    use tempfile::tempdir;

    fn applicants() -> Vec<ApplicantRecord> {
        vec![
            ApplicantRecord::new("a", "Ana", JobCategory::Water, ExperienceLevel::FifteenPlus, EmploymentType::FullTime),
            ApplicantRecord::new("b", "Ben", JobCategory::Water, ExperienceLevel::Fresher, EmploymentType::FullTime),
        ]
    }

    #[test]
    fn test_missing_file_is_empty_workspace() {
        let dir = tempdir().unwrap();
        let store = WorkspaceStore::open(dir.path().join("workspace.json")).unwrap();
        assert!(store.workspace().custom_filters.is_empty());
        assert!(store.list_pipelines().is_empty());
    }

    #[test]
    fn test_pipeline_lifecycle_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("workspace.json");

        let mut store = WorkspaceStore::open(&path).unwrap();
        let id = store
            .create_pipeline("Solar Q3", vec!["a".into(), "b".into(), "a".into()])
            .unwrap()
            .id
            .clone();
        assert!(id.starts_with("pipeline-"));
        store.rename_pipeline(&id, "Solar Q4").unwrap();
        store.set_pipeline_members(&id, vec!["b".into()]).unwrap();
        store.save().unwrap();

        let reopened = WorkspaceStore::open(&path).unwrap();
        let pipeline = reopened.pipeline(&id).unwrap();
        assert_eq!(pipeline.name, "Solar Q4");
        assert_eq!(pipeline.applicant_ids, vec!["b".to_string()]);

        let mut reopened = reopened;
        reopened.delete_pipeline(&id).unwrap();
        assert!(matches!(reopened.pipeline(&id), Err(MatcherError::NotFound(_))));
    }

    #[test]
    fn test_blank_names_rejected() {
        let dir = tempdir().unwrap();
        let mut store = WorkspaceStore::open(dir.path().join("w.json")).unwrap();
        assert!(store.create_pipeline("  ", Vec::new()).is_err());
        assert!(store.save_custom_filter(NewCustomFilter::default()).is_err());
    }

    #[test]
    fn test_fixed_ids_take_precedence_over_criteria() {
        let dir = tempdir().unwrap();
        let mut store = WorkspaceStore::open(dir.path().join("w.json")).unwrap();
        let criteria = MatchCriteria {
            min_experience_years: Some(10),
            ..Default::default()
        };

        let fixed = store
            .save_custom_filter(NewCustomFilter {
                name: "Pinned".into(),
                criteria: criteria.clone(),
                matched_applicant_ids: Some(vec!["b".into()]),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();
        let dynamic = store
            .save_custom_filter(NewCustomFilter {
                name: "Senior".into(),
                criteria,
                matched_applicant_ids: Some(Vec::new()),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();

        let applicants = applicants();
        let pinned: Vec<_> = store.apply_custom_filter(&fixed, &applicants).unwrap().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(pinned, vec!["b"]);
        let senior: Vec<_> = store.apply_custom_filter(&dynamic, &applicants).unwrap().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(senior, vec!["a"]);

        let listed: Vec<_> = store.list_custom_filters().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(listed, vec!["Senior", "Pinned"]);

        store.delete_custom_filter(&fixed).unwrap();
        assert_eq!(store.list_custom_filters().len(), 1);
    }
}
