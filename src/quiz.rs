//! Static country trivia quiz.
//!
//! A fixed fixture of question/options/answer triples with no dependency on
//! the aggregator or the upstream providers. Scoring is pure equality between
//! a selected option and the stored answer.

use serde::Serialize;

/// One quiz question.
///
/// The stored `answer` is one of the listed `options`. It is skipped during
/// serialization so the wire form handed to the presentation layer never
/// leaks it; checking goes through [`QuizQuestion::is_correct`].
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    /// The question text.
    pub question: &'static str,

    /// The options presented to the player.
    pub options: [&'static str; 4],

    /// The correct option.
    #[serde(skip_serializing)]
    pub answer: &'static str,
}

impl QuizQuestion {
    /// Whether a selected option is the stored answer.
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

/// The fixed quiz fixture.
pub static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        question: "What is the capital of Australia?",
        options: ["Sydney", "Melbourne", "Canberra", "Perth"],
        answer: "Canberra",
    },
    QuizQuestion {
        question: "Which country has the largest population?",
        options: ["China", "India", "United States", "Indonesia"],
        answer: "India",
    },
    QuizQuestion {
        question: "Which country's flag features a red maple leaf?",
        options: ["Japan", "Canada", "Switzerland", "Denmark"],
        answer: "Canada",
    },
    QuizQuestion {
        question: "In which country would you find the city of Marrakesh?",
        options: ["Egypt", "Tunisia", "Algeria", "Morocco"],
        answer: "Morocco",
    },
    QuizQuestion {
        question: "Which country spans the most time zones?",
        options: ["Russia", "United States", "France", "China"],
        answer: "France",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_answer_is_a_listed_option() {
        for q in QUESTIONS {
            assert!(
                q.options.contains(&q.answer),
                "answer '{}' not among options for '{}'",
                q.answer,
                q.question
            );
        }
    }

    #[test]
    fn test_stored_answer_scores_correct() {
        for q in QUESTIONS {
            assert!(q.is_correct(q.answer), "failed for '{}'", q.question);
        }
    }

    #[test]
    fn test_other_options_score_incorrect() {
        for q in QUESTIONS {
            for option in q.options.iter().filter(|o| **o != q.answer) {
                assert!(!q.is_correct(option), "'{option}' wrongly accepted");
            }
        }
    }

    #[test]
    fn test_serialized_question_omits_answer() {
        let json = serde_json::to_value(&QUESTIONS[0]).unwrap();
        assert!(json.get("question").is_some());
        assert!(json.get("options").is_some());
        assert!(json.get("answer").is_none());
    }
}
