use crate::domain::quiz::{QuizQuestion, QuizQuestionView, QuizSubmission, RiskProfile};
use crate::domain::risk::RiskProfileKind;
use crate::domain::round2;
use anyhow::ensure;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

/// Immutable quiz bank plus the maximum achievable raw score, computed once
/// at construction. Built before the first request and shared read-only.
#[derive(Debug, Clone)]
pub struct QuizBank {
    questions: Vec<QuizQuestion>,
    max_score: f64,
}

impl QuizBank {
    pub fn new(questions: Vec<QuizQuestion>) -> anyhow::Result<Self> {
        let mut seen_ids = BTreeSet::new();
        for q in &questions {
            ensure!(q.id > 0, "question id must be positive (got {})", q.id);
            ensure!(seen_ids.insert(q.id), "duplicate question id: {}", q.id);
            ensure!(
                q.options.len() == q.weights.len(),
                "question {} has {} options but {} weights",
                q.id,
                q.options.len(),
                q.weights.len()
            );
        }

        let max_score = questions
            .iter()
            .map(|q| q.weights.iter().copied().fold(0.0_f64, f64::max))
            .sum();

        Ok(Self {
            questions,
            max_score,
        })
    }

    /// The fixed five-question risk questionnaire served in production.
    pub fn builtin() -> Self {
        fn q(id: i32, question: &str, options: [&str; 4], category: &str) -> QuizQuestion {
            QuizQuestion {
                id,
                question: question.to_string(),
                options: options.iter().map(|s| s.to_string()).collect(),
                category: category.to_string(),
                weights: vec![0.0, 1.0, 2.0, 3.0],
            }
        }

        let questions = vec![
            q(
                1,
                "How would you react if your portfolio dropped 20% in a month?",
                [
                    "Sell everything immediately",
                    "Sell some to reduce risk",
                    "Hold and wait for recovery",
                    "Buy more at lower prices",
                ],
                "risk",
            ),
            q(
                2,
                "What is your primary investment goal?",
                [
                    "Preserve capital",
                    "Generate steady income",
                    "Moderate growth",
                    "Maximum long-term growth",
                ],
                "goals",
            ),
            q(
                3,
                "How long is your investment horizon?",
                [
                    "Less than 1 year",
                    "1 – 3 years",
                    "3 – 7 years",
                    "More than 7 years",
                ],
                "horizon",
            ),
            q(
                4,
                "What percentage of your monthly income can you invest?",
                ["Less than 5%", "5–10%", "10–25%", "More than 25%"],
                "capacity",
            ),
            q(
                5,
                "How familiar are you with financial instruments?",
                [
                    "Not familiar at all",
                    "Basic (FD, mutual funds)",
                    "Intermediate (stocks, ETFs)",
                    "Advanced (options, crypto, forex)",
                ],
                "knowledge",
            ),
        ];

        // This should not fail because the static bank satisfies the
        // invariants checked in new().
        Self::new(questions).expect("builtin quiz bank is valid")
    }

    /// Questions as served to callers, with the scoring weights withheld.
    pub fn questions(&self) -> Vec<QuizQuestionView> {
        self.questions.iter().map(QuizQuestionView::from).collect()
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Score a submission into a risk profile. Unknown question ids and
    /// out-of-range option indices are skipped, not rejected: a partial or
    /// malformed submission degrades to a lower score. Never fails.
    pub fn score_submission(
        &self,
        submission: &QuizSubmission,
        now: DateTime<Utc>,
    ) -> RiskProfile {
        let weights_by_id: HashMap<i32, &[f64]> = self
            .questions
            .iter()
            .map(|q| (q.id, q.weights.as_slice()))
            .collect();

        let mut total = 0.0;
        for answer in &submission.answers {
            let Some(weights) = weights_by_id.get(&answer.question_id) else {
                continue;
            };
            let Ok(idx) = usize::try_from(answer.selected_option) else {
                continue;
            };
            if let Some(w) = weights.get(idx) {
                total += w;
            }
        }

        let normalized = if self.max_score != 0.0 {
            (total / self.max_score) * 100.0
        } else {
            0.0
        };

        RiskProfile {
            user_id: submission.user_id,
            // Classification uses the unrounded value; only the reported
            // score is rounded.
            score: round2(normalized),
            profile: RiskProfileKind::classify(normalized),
            generated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::QuizAnswer;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    fn submission(answers: Vec<(i32, i32)>) -> QuizSubmission {
        QuizSubmission {
            user_id: 42,
            answers: answers
                .into_iter()
                .map(|(question_id, selected_option)| QuizAnswer {
                    question_id,
                    selected_option,
                })
                .collect(),
        }
    }

    #[test]
    fn builtin_bank_has_five_questions_with_max_score_15() {
        let bank = QuizBank::builtin();
        assert_eq!(bank.questions().len(), 5);
        assert_eq!(bank.max_score(), 15.0);
    }

    #[test]
    fn question_views_withhold_weights() {
        let bank = QuizBank::builtin();
        let views = serde_json::to_value(bank.questions()).unwrap();
        for view in views.as_array().unwrap() {
            assert!(view.get("weights").is_none());
            assert!(view.get("question").is_some());
            assert_eq!(view["options"].as_array().unwrap().len(), 4);
        }
    }

    #[test]
    fn empty_submission_scores_zero_conservative() {
        let bank = QuizBank::builtin();
        let profile = bank.score_submission(&submission(vec![]), now());
        assert_eq!(profile.score, 0.0);
        assert_eq!(profile.profile, RiskProfileKind::Conservative);
        assert_eq!(profile.user_id, 42);
        assert_eq!(profile.generated_at, now());
    }

    #[test]
    fn all_max_answers_score_100_aggressive() {
        let bank = QuizBank::builtin();
        let profile =
            bank.score_submission(&submission(vec![(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)]), now());
        assert_eq!(profile.score, 100.0);
        assert_eq!(profile.profile, RiskProfileKind::Aggressive);
    }

    #[test]
    fn single_weight_three_answer_scores_twenty_conservative() {
        // 3 out of a maximum 15 normalizes to exactly 20.0.
        let bank = QuizBank::builtin();
        let profile =
            bank.score_submission(&submission(vec![(1, 3), (2, 0), (3, 0), (4, 0), (5, 0)]), now());
        assert_eq!(profile.score, 20.0);
        assert_eq!(profile.profile, RiskProfileKind::Conservative);
    }

    #[test]
    fn unknown_ids_and_out_of_range_indices_are_ignored() {
        let bank = QuizBank::builtin();
        let clean = bank.score_submission(&submission(vec![(1, 3)]), now());
        let noisy = bank.score_submission(
            &submission(vec![(1, 3), (999, 3), (2, -1), (3, 99), (4, 4)]),
            now(),
        );
        assert_eq!(noisy.score, clean.score);
        assert_eq!(noisy.profile, clean.profile);
    }

    #[test]
    fn duplicate_answers_for_one_question_all_count() {
        // The scorer tolerates duplicates; each valid pair contributes.
        let bank = QuizBank::builtin();
        let profile = bank.score_submission(&submission(vec![(1, 3), (1, 3)]), now());
        assert_eq!(profile.score, 40.0);
    }

    #[test]
    fn scores_stay_within_the_normalized_range() {
        let bank = QuizBank::builtin();
        let cases = vec![
            vec![],
            vec![(1, 0)],
            vec![(1, 3), (2, 2), (3, 1)],
            vec![(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)],
        ];
        for answers in cases {
            let profile = bank.score_submission(&submission(answers), now());
            assert!((0.0..=100.0).contains(&profile.score));
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let bank = QuizBank::builtin();
        let s = submission(vec![(1, 2), (2, 1), (5, 3)]);
        let a = serde_json::to_value(bank.score_submission(&s, now())).unwrap();
        let b = serde_json::to_value(bank.score_submission(&s, now())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_max_score_bank_never_divides_by_zero() {
        let bank = QuizBank::new(vec![QuizQuestion {
            id: 1,
            question: "placeholder".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            category: "risk".to_string(),
            weights: vec![0.0, 0.0],
        }])
        .unwrap();
        let profile = bank.score_submission(&submission(vec![(1, 1)]), now());
        assert_eq!(profile.score, 0.0);
        assert_eq!(profile.profile, RiskProfileKind::Conservative);
    }

    #[test]
    fn new_rejects_invalid_banks() {
        let q = |id: i32, options: usize, weights: usize| QuizQuestion {
            id,
            question: "placeholder".to_string(),
            options: (0..options).map(|i| format!("opt {i}")).collect(),
            category: "risk".to_string(),
            weights: (0..weights).map(|i| i as f64).collect(),
        };

        assert!(QuizBank::new(vec![q(1, 4, 3)]).is_err());
        assert!(QuizBank::new(vec![q(1, 2, 2), q(1, 2, 2)]).is_err());
        assert!(QuizBank::new(vec![q(0, 2, 2)]).is_err());
        assert!(QuizBank::new(vec![q(1, 2, 2), q(2, 3, 3)]).is_ok());
    }
}
