//! Fixed assistant text

pub const GREETING: &str = "Hi! I'm your AI assistant. Ask me about your applicants, pipeline statistics, or candidate insights. I can help you analyze trends, find specific candidates, and provide actionable recommendations.";

/// Steps shown on the spinner while an answer is prepared
pub const THINKING_STEPS: [&str; 3] = [
    "Scanning applicant database...",
    "Analyzing patterns...",
    "Generating insights...",
];

pub struct SuggestedQuestion {
    pub question: &'static str,
    pub description: &'static str,
}

pub const SUGGESTED_QUESTIONS: [SuggestedQuestion; 4] = [
    SuggestedQuestion {
        question: "How many applications this week?",
        description: "Get a summary of recent applications",
    },
    SuggestedQuestion {
        question: "Show candidates with 5+ years experience",
        description: "Filter by experience level",
    },
    SuggestedQuestion {
        question: "What's the category breakdown?",
        description: "Analyze applicants by job category",
    },
    SuggestedQuestion {
        question: "How many shortlisted candidates?",
        description: "Check pipeline progress",
    },
];
