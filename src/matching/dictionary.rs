//! Static keyword tables driving the matchers

use crate::model::JobCategory;
use aho_corasick::{AhoCorasick, MatchKind};
use std::sync::LazyLock;

/// One canonical phrase and what it implies about a candidate
#[derive(Debug, Clone, Copy)]
pub struct DictionaryEntry {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
    pub categories: &'static [JobCategory],
    pub skills: &'static [&'static str],
}

impl DictionaryEntry {
    /// True when the lowered query contains the whole key, or every word of it
    pub fn is_triggered_by(&self, lowered_query: &str) -> bool {
        lowered_query.contains(self.key)
            || self.key.split(' ').all(|word| lowered_query.contains(word))
    }
}

pub static SEMANTIC_DICTIONARY: [DictionaryEntry; 9] = [
    DictionaryEntry {
        key: "backend developer",
        keywords: &["backend", "developer", "engineer", "server", "api"],
        categories: &[],
        skills: &["Node.js", "Python", "Java", "SQL", "MongoDB", "API", "Backend"],
    },
    DictionaryEntry {
        key: "startup experience",
        keywords: &["startup", "early stage", "agile"],
        categories: &[],
        skills: &["Agile", "Full-stack", "MVP"],
    },
    DictionaryEntry {
        key: "solar project engineer",
        keywords: &["solar", "project", "engineer", "pv"],
        categories: &[JobCategory::RenewableEnergy],
        skills: &["Solar PV Design", "Project Management", "Solar"],
    },
    DictionaryEntry {
        key: "energy analyst",
        keywords: &["energy", "analyst", "analysis", "data"],
        categories: &[JobCategory::BusinessConsultant, JobCategory::EnergyConsultant],
        skills: &["Energy Analysis", "Data Analysis", "Analytics", "Market Analysis"],
    },
    DictionaryEntry {
        key: "energy consultant",
        keywords: &["energy", "consultant", "consulting"],
        categories: &[JobCategory::EnergyConsultant],
        skills: &[],
    },
    DictionaryEntry {
        key: "renewable energy",
        keywords: &["renewable", "green", "sustainable", "clean energy"],
        categories: &[JobCategory::RenewableEnergy],
        skills: &[],
    },
    DictionaryEntry {
        key: "business consultant",
        keywords: &["business", "strategy", "management"],
        categories: &[JobCategory::BusinessConsultant],
        skills: &[],
    },
    DictionaryEntry {
        key: "project manager",
        keywords: &["project", "manager", "management", "lead"],
        categories: &[],
        skills: &["Project Management", "Team Leadership", "Agile", "Scrum"],
    },
    DictionaryEntry {
        key: "senior",
        keywords: &["senior", "lead", "principal", "experienced"],
        categories: &[],
        skills: &["Leadership", "Team Management"],
    },
];

/// Entries triggered by a query, in table order
pub fn triggered_entries(query: &str) -> Vec<&'static DictionaryEntry> {
    let lowered = query.to_lowercase();
    SEMANTIC_DICTIONARY
        .iter()
        .filter(|entry| entry.is_triggered_by(&lowered))
        .collect()
}

/// Words that mark a multi-word query as natural language
pub const SEMANTIC_INDICATORS: [&str; 17] = [
    "with", "who", "has", "having", "experience", "in", "for", "and", "or", "developer",
    "engineer", "analyst", "consultant", "manager", "senior", "junior", "project",
];

/// Skill keywords considered by the shortlist scorer
pub static SHORTLIST_SKILL_KEYWORDS: [&str; 9] = [
    "solar",
    "pv",
    "project management",
    "data analysis",
    "energy",
    "python",
    "analytics",
    "market",
    "strategy",
];

/// Skill keywords extracted by the query filter parser
pub static FILTER_SKILL_KEYWORDS: [&str; 28] = [
    "solar",
    "pv",
    "wind",
    "renewable",
    "carbon accounting",
    "client reports",
    "stakeholder",
    "project management",
    "data analysis",
    "energy audit",
    "energy modeling",
    "python",
    "analytics",
    "market analysis",
    "strategy",
    "sustainability",
    "esg",
    "grid",
    "battery storage",
    "financial modeling",
    "policy",
    "regulatory",
    "excel",
    "power bi",
    "sql",
    "gis",
    "autocad",
    "leadership",
];

/// Skill keywords the analytics responder recognises in a question
pub const ANALYTICS_SKILL_KEYWORDS: [&str; 5] =
    ["solar", "python", "energy", "project management", "data analysis"];

/// Finds which of a fixed list of lowercase keywords occur in a text
pub struct KeywordScanner {
    keywords: &'static [&'static str],
    automaton: AhoCorasick,
}

impl KeywordScanner {
    pub fn new(keywords: &'static [&'static str]) -> Self {
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(keywords)
            .expect("Invalid keyword patterns");
        Self { keywords, automaton }
    }

    /// Keywords present in `lowered` as substrings, in list order
    pub fn present_in(&self, lowered: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.keywords.len()];
        for mat in self.automaton.find_overlapping_iter(lowered) {
            seen[mat.pattern().as_usize()] = true;
        }
        self.keywords
            .iter()
            .zip(seen)
            .filter_map(|(keyword, hit)| hit.then_some(*keyword))
            .collect()
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }
}

pub static FILTER_SKILL_SCANNER: LazyLock<KeywordScanner> =
    LazyLock::new(|| KeywordScanner::new(&FILTER_SKILL_KEYWORDS));

pub static SHORTLIST_SKILL_SCANNER: LazyLock<KeywordScanner> =
    LazyLock::new(|| KeywordScanner::new(&SHORTLIST_SKILL_KEYWORDS));
