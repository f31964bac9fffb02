//! Query analysis: key concepts, question kind and complexity.

use crate::types::Complexity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Maximum number of key concepts kept from a query
const MAX_KEY_CONCEPTS: usize = 5;

/// Interrogatives that mark a query as a question (Turkish and English).
const QUESTION_WORDS: &[&str] = &[
    "ne", "nedir", "nasıl", "neden", "kim", "nerede", "what", "how", "why", "who", "where",
    "when", "which",
];

/// Stems that push a query straight to `Complexity::Complex`.
const ANALYSIS_STEMS: &[&str] = &[
    "analiz",
    "değerlendirme",
    "karşılaştırma",
    "analy",
    "evaluat",
    "compar",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Question,
    Statement,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Question => "question",
            QuestionKind::Statement => "statement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub interpretation: String,
    pub key_concepts: Vec<String>,
    pub question_kind: QuestionKind,
    pub complexity: Complexity,
    pub word_count: usize,
    pub confidence: f32,
}

fn concept_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\p{L}{3,}\b").expect("concept pattern is valid"))
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{L}+").expect("word pattern is valid"))
}

pub fn analyze_query(query: &str) -> QueryAnalysis {
    let key_concepts: Vec<String> = concept_regex()
        .find_iter(query)
        .take(MAX_KEY_CONCEPTS)
        .map(|m| m.as_str().to_string())
        .collect();

    let lowered = query.to_lowercase();
    let is_question = word_regex()
        .find_iter(&lowered)
        .any(|word| QUESTION_WORDS.contains(&word.as_str()))
        || query.trim_end().ends_with('?');
    let question_kind = if is_question {
        QuestionKind::Question
    } else {
        QuestionKind::Statement
    };

    let word_count = query.split_whitespace().count();
    let complexity = classify(word_count, &lowered);

    QueryAnalysis {
        interpretation: format!(
            "{} type, {} level",
            question_kind.as_str(),
            complexity.as_str()
        ),
        key_concepts,
        question_kind,
        complexity,
        word_count,
        confidence: 0.85,
    }
}

fn classify(word_count: usize, lowered: &str) -> Complexity {
    if word_count > 20 || ANALYSIS_STEMS.iter().any(|stem| lowered.contains(stem)) {
        Complexity::Complex
    } else if word_count > 10 {
        Complexity::Moderate
    } else {
        Complexity::Simple
    }
}
