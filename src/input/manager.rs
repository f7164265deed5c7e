//! Input manager for loading applicant data from disk

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::mapper::map_form_submissions;
use crate::model::ApplicantRecord;
use crate::output::export::read_csv;
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, Vec<ApplicantRecord>>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load applicant records from a JSON array or an exported CSV sheet
    pub async fn load_applicants(&mut self, path: &Path) -> Result<Vec<ApplicantRecord>> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached applicants for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let raw = read_existing(path).await?;

        let applicants = match FileType::from_path(path) {
            FileType::Json => {
                info!("Reading applicant JSON: {}", path.display());
                parse_applicant_json(&raw)?
            }
            FileType::Csv => {
                info!("Reading applicant CSV: {}", path.display());
                read_csv(raw.as_bytes())?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        info!("Loaded {} applicants", applicants.len());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), applicants.clone());
        }

        Ok(applicants)
    }

    /// Load raw form submissions (a JSON array of documents) and map them
    pub async fn load_form_submissions(&self, path: &Path) -> Result<Vec<ApplicantRecord>> {
        if FileType::from_path(path) != FileType::Json {
            return Err(MatcherError::UnsupportedFormat(format!(
                "Form submissions must be JSON: {}",
                path.display()
            )));
        }

        let raw = read_existing(path).await?;
        let docs = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(docs) => docs,
            other => vec![other],
        };
        info!("Mapping {} form submissions from {}", docs.len(), path.display());

        Ok(map_form_submissions(&docs))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

async fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MatcherError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Accepts a bare array or an object wrapping it under `applicants`
fn parse_applicant_json(raw: &str) -> Result<Vec<ApplicantRecord>> {
    let value: Value = serde_json::from_str(raw)?;
    let list = match value {
        Value::Object(mut map) => map.remove("applicants").ok_or_else(|| {
            MatcherError::InvalidInput("Expected an array of applicants".to_string())
        })?,
        other => other,
    };
    Ok(serde_json::from_value(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_and_bare_arrays() {
        let record = r#"{"id":"1","name":"A","category":"Water","experience":"Fresher","employmentType":"Freelance","status":"Reviewed"}"#;
        let bare = format!("[{}]", record);
        let wrapped = format!(r#"{{"applicants":[{}]}}"#, record);

        assert_eq!(parse_applicant_json(&bare).unwrap().len(), 1);
        assert_eq!(parse_applicant_json(&wrapped).unwrap().len(), 1);
        assert!(parse_applicant_json(r#"{"people":[]}"#).is_err());
    }
}
