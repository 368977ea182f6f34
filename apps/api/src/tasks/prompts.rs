// Prompt constants and builders for the three tasks.
// Builders are pure and cannot fail; blank inputs are interpolated as-is.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::tasks::models::{AnswerScoringRequest, CoverLetterRequest, QuestionSetRequest};

/// Placeholder for an absent or blank personal touch.
pub const NOT_PROVIDED: &str = "N/A";

pub const COVER_LETTER_SYSTEM: &str = "You are an expert resume writer.";

/// Replace: {company_name}, {job_title}, {job_description}, {personal_touch}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional cover letter for the following job:
- Company Name: {company_name}
- Job Title: {job_title}
- Job Description: {job_description}
- Personal Touch: {personal_touch}"#;

pub const QUESTION_SET_SYSTEM_PREFIX: &str = "You are an expert technical interviewer.";

/// Replace: {job_requirements}
pub const QUESTION_SET_PROMPT_TEMPLATE: &str = r#"Generate 5 different technical interview questions based on these job requirements:
{job_requirements}

Make each question unique and tailored to different aspects of the job requirements.

Return the response as a JSON array of objects with the following format:
[
  {
    "id": "1",
    "title": "Question text here",
    "tags": ["Tag1", "Tag2"],
    "time": "5 min"
  }
]

Ensure your response is valid JSON that can be parsed."#;

pub const ANSWER_SCORING_SYSTEM_PREFIX: &str =
    "You are an expert technical interviewer providing detailed, constructive and honest feedback.";

pub const ANSWER_SCORING_SYSTEM_SUFFIX: &str =
    "Your feedback should be specific to the answer given, not generic.";

/// Replace: {question}, {answer}
pub const ANSWER_SCORING_PROMPT_TEMPLATE: &str = r#"Analyze this interview answer for the question: "{question}"

Answer: "{answer}"

Provide detailed and specific feedback based on the quality of this answer. The feedback should:
1. Identify specific strengths in the answer (concrete concepts, good examples, clear explanations)
2. Suggest specific improvements that would make the answer stronger
3. Compare the answer against what would be expected in a professional interview

Provide feedback in JSON format with the following structure:
{
  "strengths": ["Specific strength 1 with example from their answer", "Specific strength 2 with example from their answer"],
  "improvements": ["Specific improvement 1 with suggestion", "Specific improvement 2 with suggestion"],
  "overallRating": 85,
  "correctPoints": ["Key point 1 they got right", "Key point 2 they got right"],
  "missingPoints": ["Important point 1 they missed", "Important point 2 they missed"]
}

The overallRating should be between 0-100 based on the quality of the answer.
Only return valid JSON that can be parsed."#;

pub fn question_set_system() -> String {
    format!("{QUESTION_SET_SYSTEM_PREFIX} {JSON_ONLY_INSTRUCTION}")
}

pub fn answer_scoring_system() -> String {
    format!("{ANSWER_SCORING_SYSTEM_PREFIX} {JSON_ONLY_INSTRUCTION} {ANSWER_SCORING_SYSTEM_SUFFIX}")
}

pub fn build_cover_letter_prompt(request: &CoverLetterRequest) -> String {
    let personal_touch = request
        .personal_touch
        .as_deref()
        .filter(|touch| !touch.trim().is_empty())
        .unwrap_or(NOT_PROVIDED);

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("company_name", request.company_name.as_str()),
            ("job_title", request.job_title.as_str()),
            ("job_description", request.job_description.as_str()),
            ("personal_touch", personal_touch),
        ],
    )
}

pub fn build_question_set_prompt(request: &QuestionSetRequest) -> String {
    fill_template(
        QUESTION_SET_PROMPT_TEMPLATE,
        &[("job_requirements", request.job_requirements.as_str())],
    )
}

pub fn build_answer_scoring_prompt(request: &AnswerScoringRequest) -> String {
    fill_template(
        ANSWER_SCORING_PROMPT_TEMPLATE,
        &[("question", request.question.as_str()), ("answer", request.answer.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_request(personal_touch: Option<&str>) -> CoverLetterRequest {
        CoverLetterRequest {
            company_name: "Acme Corp".to_string(),
            job_title: "Backend Engineer".to_string(),
            job_description: "Design and operate payment APIs.".to_string(),
            personal_touch: personal_touch.map(str::to_string),
        }
    }

    #[test]
    fn test_cover_letter_prompt_embeds_all_fields() {
        let prompt = build_cover_letter_prompt(&letter_request(Some("I love fintech")));
        assert!(prompt.contains("- Company Name: Acme Corp"));
        assert!(prompt.contains("- Job Title: Backend Engineer"));
        assert!(prompt.contains("- Job Description: Design and operate payment APIs."));
        assert!(prompt.contains("- Personal Touch: I love fintech"));
    }

    #[test]
    fn test_cover_letter_prompt_uses_placeholder_when_touch_absent_or_blank() {
        for touch in [None, Some(""), Some("   ")] {
            let prompt = build_cover_letter_prompt(&letter_request(touch));
            assert!(prompt.ends_with("- Personal Touch: N/A"));
        }
    }

    #[test]
    fn test_question_prompt_specifies_shape_and_count() {
        let prompt = build_question_set_prompt(&QuestionSetRequest {
            job_requirements: "Rust, Kubernetes, PostgreSQL".to_string(),
        });
        assert!(prompt.contains("Generate 5 different technical interview questions"));
        assert!(prompt.contains("Rust, Kubernetes, PostgreSQL"));
        for field in ["\"id\"", "\"title\"", "\"tags\"", "\"time\""] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("valid JSON"));
    }

    #[test]
    fn test_scoring_prompt_embeds_question_and_answer() {
        let prompt = build_answer_scoring_prompt(&AnswerScoringRequest {
            question: "What is REST?".to_string(),
            answer: "An architectural style using {resources}".to_string(),
        });
        assert!(prompt.contains(r#"for the question: "What is REST?""#));
        assert!(prompt.contains(r#"Answer: "An architectural style using {resources}""#));
        for field in ["overallRating", "correctPoints", "missingPoints", "strengths", "improvements"] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let request = letter_request(None);
        assert_eq!(
            build_cover_letter_prompt(&request),
            build_cover_letter_prompt(&request)
        );
    }

    #[test]
    fn test_system_prompts_demand_json() {
        assert!(question_set_system().contains("valid JSON"));
        assert!(answer_scoring_system().contains("valid JSON"));
        assert!(!COVER_LETTER_SYSTEM.contains("JSON"));
    }
}
