use crate::domain::risk::RiskProfileKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question from the static quiz bank, including its scoring weights.
/// `weights[i]` is the score contribution of selecting `options[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub category: String,
    pub weights: Vec<f64>,
}

/// Caller-facing projection of a question. The weights are the scoring key
/// and must never leave the process, so the view omits them at the type level.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionView {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub category: String,
}

impl From<&QuizQuestion> for QuizQuestionView {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
            category: q.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: i32,
    // Signed on purpose: a negative index must deserialize and then be
    // skipped by the scorer instead of failing at the transport layer.
    pub selected_option: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub user_id: i64,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub user_id: i64,
    /// Normalized quiz score on a 0-100 scale, rounded to 2 decimals.
    pub score: f64,
    pub profile: RiskProfileKind,
    pub generated_at: DateTime<Utc>,
}
