//! Fallback payloads, one per task. Every failure branch of a task uses the
//! same value from here.

use crate::tasks::models::{AnswerFeedback, InterviewQuestion};

pub const COVER_LETTER_FALLBACK: &str = "";

pub const COVER_LETTER_NOTICE: &str = "Failed to generate cover letter. Please try again.";
pub const QUESTION_SET_NOTICE: &str = "Failed to generate interview questions. Please try again.";
pub const ANSWER_SCORING_NOTICE: &str = "Failed to analyze answer. Please try again.";

const DEFAULT_QUESTION_TIME: &str = "5 min";

/// (title, tags)
const DEFAULT_QUESTIONS: [(&str, &[&str]); 5] = [
    (
        "Explain RESTful API architecture and its key principles",
        &["API", "Backend"],
    ),
    (
        "Describe your experience with modern JavaScript frameworks",
        &["JavaScript", "Frontend"],
    ),
    (
        "How do you approach debugging complex issues in a large codebase?",
        &["Debugging", "Problem Solving"],
    ),
    (
        "Explain the concept of responsive design and its implementation",
        &["UI/UX", "Frontend"],
    ),
    (
        "What strategies do you use for writing maintainable and scalable code?",
        &["Code Quality", "Best Practices"],
    ),
];

pub const DEFAULT_RATING: u8 = 70;

pub fn default_questions() -> Vec<InterviewQuestion> {
    DEFAULT_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, (title, tags))| InterviewQuestion {
            id: (index + 1).to_string(),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            time: DEFAULT_QUESTION_TIME.to_string(),
        })
        .collect()
}

pub fn default_feedback() -> AnswerFeedback {
    AnswerFeedback {
        strengths: vec![
            "Your answer addressed the question".to_string(),
            "You provided some relevant information".to_string(),
        ],
        improvements: vec![
            "Consider adding more specific examples".to_string(),
            "Try to structure your answer more clearly".to_string(),
        ],
        overall_rating: Some(DEFAULT_RATING),
        correct_points: Some(vec!["Basic understanding of the concept".to_string()]),
        missing_points: Some(vec!["More technical details needed".to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_questions_are_five_with_sequential_ids() {
        let questions = default_questions();
        assert_eq!(questions.len(), 5);
        for (index, q) in questions.iter().enumerate() {
            assert_eq!(q.id, (index + 1).to_string());
            assert_eq!(q.time, "5 min");
            assert_eq!(q.tags.len(), 2);
        }
        assert_eq!(
            questions[0].title,
            "Explain RESTful API architecture and its key principles"
        );
    }

    #[test]
    fn test_default_feedback_shape() {
        let feedback = default_feedback();
        assert_eq!(feedback.overall_rating, Some(70));
        assert_eq!(feedback.strengths.len(), 2);
        assert_eq!(feedback.improvements.len(), 2);
        assert!(feedback.correct_points.is_some());
        assert!(feedback.missing_points.is_some());
    }
}
