//! Canned answers to questions about the applicant collection
//!
//! Questions are dispatched by substring checks in a fixed priority order;
//! the first branch that recognises the question answers it. A question
//! mentioning both "shortlist" and "category" is answered by the category
//! branch because it is checked first.

use crate::matching::dictionary::ANALYTICS_SKILL_KEYWORDS;
use crate::matching::query_filter::extract_min_years;
use crate::model::{ApplicantRecord, ApplicantStatus, DataSource, ExperienceLevel};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsAnswer {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AnalyticsAnswer {
    fn new(message: String, data: Value) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

/// Answer a question using the current time for weekly counts
pub fn answer_analytics_question(question: &str, applicants: &[ApplicantRecord]) -> AnalyticsAnswer {
    answer_analytics_question_at(question, applicants, Utc::now())
}

/// Answer a question relative to `now`
pub fn answer_analytics_question_at(
    question: &str,
    applicants: &[ApplicantRecord],
    now: DateTime<Utc>,
) -> AnalyticsAnswer {
    let q = question.to_lowercase();
    let has = |needle: &str| q.contains(needle);

    if has("this week") || has("applications") {
        return weekly_applications(applicants, now);
    }

    if has("experience") || has("years") {
        if let Some(years) = extract_min_years(&q) {
            return experienced_candidates(applicants, years);
        }
    }

    if has("breakdown") || has("category") || has("categories") {
        return category_breakdown(applicants);
    }

    if has("shortlist") {
        return shortlisted_candidates(applicants);
    }

    if has("status") || has("pipeline") || has("overview") {
        return status_overview(applicants);
    }

    if has("skill") || has("solar") || has("python") || has("energy") {
        let keywords: Vec<&str> = ANALYTICS_SKILL_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| q.contains(kw))
            .collect();
        if !keywords.is_empty() {
            return skill_counts(applicants, &keywords);
        }
    }

    help_message(applicants)
}

fn weekly_applications(applicants: &[ApplicantRecord], now: DateTime<Utc>) -> AnalyticsAnswer {
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week: Vec<&ApplicantRecord> = applicants
        .iter()
        .filter(|a| a.applied_at().is_some_and(|at| at >= week_ago))
        .collect();
    let previous_week = applicants
        .iter()
        .filter(|a| {
            a.applied_at()
                .is_some_and(|at| at >= two_weeks_ago && at < week_ago)
        })
        .count();

    let talent_pool = this_week.iter().filter(|a| a.source == DataSource::TalentPool).count();
    let work_with_us = this_week.iter().filter(|a| a.source == DataSource::WorkWithUs).count();

    let change_percent = (previous_week > 0)
        .then(|| (this_week.len() as f64 - previous_week as f64) / previous_week as f64 * 100.0);

    let mut message = format!(
        "There were **{} applications** received in the past week. The breakdown includes {} from Talent Pool and {} from Work With Us applications.",
        this_week.len(),
        talent_pool,
        work_with_us
    );
    if let Some(change) = change_percent {
        message.push_str(&format!(
            " That is a {:+.1}% change from the previous week ({} applications).",
            change, previous_week
        ));
    }

    AnalyticsAnswer::new(
        message,
        json!({
            "count": this_week.len(),
            "talentPool": talent_pool,
            "workWithUs": work_with_us,
            "previousWeek": previous_week,
            "changePercent": change_percent,
        }),
    )
}

fn experienced_candidates(applicants: &[ApplicantRecord], years: u32) -> AnalyticsAnswer {
    let qualifies = |level: ExperienceLevel| {
        if years >= 15 {
            level == ExperienceLevel::FifteenPlus
        } else if years >= 10 {
            level >= ExperienceLevel::TenToFifteen
        } else if years >= 5 {
            level >= ExperienceLevel::FiveToTen
        } else {
            true
        }
    };

    let experienced: Vec<&ApplicantRecord> = applicants
        .iter()
        .filter(|a| qualifies(a.experience))
        .collect();

    let mut categories: Vec<&str> = Vec::new();
    for applicant in &experienced {
        let name = applicant.category.as_str();
        if !categories.contains(&name) {
            categories.push(name);
        }
    }

    let names: Vec<&str> = experienced.iter().take(5).map(|a| a.name.as_str()).collect();

    AnalyticsAnswer::new(
        format!(
            "Found **{} candidates** with {}+ years of experience. Categories: {}.",
            experienced.len(),
            years,
            categories.join(", ")
        ),
        json!({ "count": experienced.len(), "candidates": names }),
    )
}

/// Tally by a key, keeping first-seen order
fn tally<'a>(applicants: &'a [ApplicantRecord], key: impl Fn(&'a ApplicantRecord) -> &'static str) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for applicant in applicants {
        let k = key(applicant);
        match counts.iter_mut().find(|(name, _)| *name == k) {
            Some((_, n)) => *n += 1,
            None => counts.push((k, 1)),
        }
    }
    counts
}

fn tally_to_json(counts: &[(&str, usize)]) -> Value {
    let map: Map<String, Value> = counts
        .iter()
        .map(|(name, n)| (name.to_string(), json!(n)))
        .collect();
    Value::Object(map)
}

fn bullet_lines(counts: &[(&str, usize)]) -> String {
    counts
        .iter()
        .map(|(name, n)| format!("• {}: {}", name, n))
        .collect::<Vec<_>>()
        .join("\n")
}

fn category_breakdown(applicants: &[ApplicantRecord]) -> AnalyticsAnswer {
    let counts = tally(applicants, |a| a.category.as_str());
    AnalyticsAnswer::new(
        format!(
            "**Category Breakdown:**\n{}\n\nTotal: {} applicants across {} categories.",
            bullet_lines(&counts),
            applicants.len(),
            counts.len()
        ),
        json!({ "categories": tally_to_json(&counts) }),
    )
}

fn shortlisted_candidates(applicants: &[ApplicantRecord]) -> AnalyticsAnswer {
    let shortlisted: Vec<&str> = applicants
        .iter()
        .filter(|a| a.status == ApplicantStatus::Shortlisted)
        .map(|a| a.name.as_str())
        .collect();
    let top: Vec<&str> = shortlisted.iter().take(3).copied().collect();

    AnalyticsAnswer::new(
        format!(
            "There are **{} shortlisted candidates**. Top candidates include: {}.",
            shortlisted.len(),
            top.join(", ")
        ),
        json!({ "count": shortlisted.len(), "candidates": shortlisted }),
    )
}

fn status_overview(applicants: &[ApplicantRecord]) -> AnalyticsAnswer {
    let counts = tally(applicants, |a| a.status.as_str());
    AnalyticsAnswer::new(
        format!("**Pipeline Status Overview:**\n{}", bullet_lines(&counts)),
        json!({ "statuses": tally_to_json(&counts) }),
    )
}

fn skill_counts(applicants: &[ApplicantRecord], keywords: &[&str]) -> AnalyticsAnswer {
    let matching = applicants
        .iter()
        .filter(|a| {
            a.skills.iter().any(|skill| {
                let skill = skill.to_lowercase();
                keywords.iter().any(|kw| skill.contains(kw))
            })
        })
        .count();

    AnalyticsAnswer::new(
        format!(
            "Found **{} candidates** with skills matching \"{}\".",
            matching,
            keywords.join(", ")
        ),
        json!({ "count": matching }),
    )
}

fn help_message(applicants: &[ApplicantRecord]) -> AnalyticsAnswer {
    AnalyticsAnswer {
        message: format!(
            "I found **{} total applicants** in your database. You can ask me about:\n• Application counts and trends\n• Candidate experience levels\n• Category breakdowns\n• Shortlisted candidates\n• Specific skills",
            applicants.len()
        ),
        data: None,
    }
}
