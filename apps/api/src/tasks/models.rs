//! Request and result types for the three AI tasks.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::tasks::TaskError;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub personal_touch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSetRequest {
    pub job_requirements: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerScoringRequest {
    pub question: String,
    pub answer: String,
}

fn require_non_blank(field: &str, value: &str) -> Result<(), TaskError> {
    if value.trim().is_empty() {
        return Err(TaskError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl CoverLetterRequest {
    pub fn validate(&self) -> Result<(), TaskError> {
        require_non_blank("company_name", &self.company_name)?;
        require_non_blank("job_title", &self.job_title)?;
        require_non_blank("job_description", &self.job_description)
    }
}

impl QuestionSetRequest {
    pub fn validate(&self) -> Result<(), TaskError> {
        require_non_blank("job_requirements", &self.job_requirements)
    }
}

impl AnswerScoringRequest {
    pub fn validate(&self) -> Result<(), TaskError> {
        require_non_blank("answer", &self.answer)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// A generated interview question.
///
/// Models are loose with this shape. Only `title` is required; `id` accepts
/// numbers and may be absent (filled in by position), and badly typed
/// `tags`/`time` fall back to their defaults instead of rejecting the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default = "default_time", deserialize_with = "deserialize_time")]
    pub time: String,
}

fn default_time() -> String {
    "5 min".to_string()
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("invalid question id: {other}"))),
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// `"10 min"` as-is, a bare number as minutes, anything else the default.
fn deserialize_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => s,
        Value::Number(n) => format!("{n} min"),
        _ => default_time(),
    })
}

/// Feedback on a candidate's answer.
///
/// `strengths` and `improvements` must be arrays; a payload without them does
/// not deserialize and is treated as unusable. The optional fields never
/// reject a payload: values of the wrong type become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    #[serde(deserialize_with = "deserialize_required_list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "deserialize_required_list")]
    pub improvements: Vec<String>,
    /// 0 – 100
    #[serde(
        default,
        deserialize_with = "deserialize_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_rating: Option<u8>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_points: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub missing_points: Option<Vec<String>>,
}

/// Accepts numbers or numeric strings and clamps them into 0–100.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|r| r.is_finite())
        .map(|r| r.round().clamp(0.0, 100.0) as u8))
}

fn deserialize_required_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(string_items(items)),
        other => Err(de::Error::custom(format!("expected a list, got {other}"))),
    }
}

fn deserialize_optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(Value::deserialize(deserializer)?))
}

/// An array keeps its string items; a lone non-blank string becomes a
/// one-item list. Anything else is `None`.
fn lenient_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(string_items(items)),
        Value::String(s) if !s.trim().is_empty() => Some(vec![s]),
        _ => None,
    }
}

/// Strings are kept, numbers are stringified, everything else is dropped.
fn string_items(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

/// Turns an extracted JSON array into questions.
///
/// Elements that do not fit the shape or have a blank title are dropped.
/// Missing ids are filled with the 1-based position. Returns `None` when
/// nothing usable is left.
pub fn questions_from_value(value: Value) -> Option<Vec<InterviewQuestion>> {
    let Value::Array(items) = value else {
        return None;
    };

    let questions: Vec<InterviewQuestion> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<InterviewQuestion>(item).ok())
        .filter(|q| !q.title.trim().is_empty())
        .enumerate()
        .map(|(index, mut q)| {
            if q.id.trim().is_empty() {
                q.id = (index + 1).to_string();
            }
            q
        })
        .collect();

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

/// Turns an extracted JSON object into feedback, if it has the required fields.
pub fn feedback_from_value(value: Value) -> Option<AnswerFeedback> {
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_question_round_trip_preserves_order() {
        let questions = vec![
            InterviewQuestion {
                id: "1".to_string(),
                title: "Explain ownership in Rust".to_string(),
                tags: vec!["Rust".to_string(), "Memory".to_string()],
                time: "5 min".to_string(),
            },
            InterviewQuestion {
                id: "2".to_string(),
                title: "How does async differ from threads?".to_string(),
                tags: vec!["Concurrency".to_string()],
                time: "10 min".to_string(),
            },
        ];

        let json = serde_json::to_string(&questions).unwrap();
        let recovered: Vec<InterviewQuestion> = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, questions);
    }

    #[test]
    fn test_question_numeric_id_and_defaults() {
        let q: InterviewQuestion = serde_json::from_value(json!({
            "id": 3,
            "title": "Describe a hard bug"
        }))
        .unwrap();
        assert_eq!(q.id, "3");
        assert!(q.tags.is_empty());
        assert_eq!(q.time, "5 min");
    }

    #[test]
    fn test_question_without_title_fails() {
        let result: Result<InterviewQuestion, _> =
            serde_json::from_value(json!({ "id": "1", "tags": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_questions_from_value_drops_bad_items_and_fills_ids() {
        let value = json!([
            { "title": "First" },
            { "id": "x", "title": "   " },
            "not an object",
            { "id": 7, "title": "Second", "tags": ["A"] }
        ]);
        let questions = questions_from_value(value).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "1");
        assert_eq!(questions[0].title, "First");
        assert_eq!(questions[1].id, "7");
        assert_eq!(questions[1].tags, vec!["A".to_string()]);
    }

    #[test]
    fn test_questions_from_value_rejects_empty_and_non_arrays() {
        assert!(questions_from_value(json!([])).is_none());
        assert!(questions_from_value(json!([{ "title": "" }])).is_none());
        assert!(questions_from_value(json!({ "title": "x" })).is_none());
    }

    #[test]
    fn test_feedback_camel_case_fields() {
        let feedback = feedback_from_value(json!({
            "strengths": ["Clear structure"],
            "improvements": ["Add metrics"],
            "overallRating": 85,
            "correctPoints": ["Defined REST"],
            "missingPoints": ["Idempotency"]
        }))
        .unwrap();
        assert_eq!(feedback.overall_rating, Some(85));
        assert_eq!(feedback.correct_points.unwrap(), vec!["Defined REST"]);
        assert_eq!(feedback.missing_points.unwrap(), vec!["Idempotency"]);
    }

    #[test]
    fn test_feedback_requires_strengths_and_improvements() {
        assert!(feedback_from_value(json!({ "strengths": [], "overallRating": 50 })).is_none());
        assert!(feedback_from_value(json!({ "improvements": [] })).is_none());

        let minimal = feedback_from_value(json!({ "strengths": [], "improvements": [] })).unwrap();
        assert!(minimal.overall_rating.is_none());
        assert!(minimal.correct_points.is_none());
    }

    #[test]
    fn test_feedback_rating_is_rounded_and_clamped() {
        let rating = |v: Value| {
            feedback_from_value(json!({ "strengths": [], "improvements": [], "overallRating": v }))
                .unwrap()
                .overall_rating
        };
        assert_eq!(rating(json!(72.6)), Some(73));
        assert_eq!(rating(json!(140)), Some(100));
        assert_eq!(rating(json!(-5)), Some(0));
        assert_eq!(rating(Value::Null), None);
    }

    #[test]
    fn test_feedback_tolerates_badly_typed_optional_fields() {
        let feedback = feedback_from_value(json!({
            "strengths": ["Clear"],
            "improvements": ["Deeper"],
            "overallRating": "85",
            "correctPoints": "Stateless",
            "missingPoints": { "unexpected": true }
        }))
        .unwrap();
        assert_eq!(feedback.strengths, vec!["Clear"]);
        assert_eq!(feedback.improvements, vec!["Deeper"]);
        assert_eq!(feedback.overall_rating, Some(85));
        assert_eq!(feedback.correct_points, Some(vec!["Stateless".to_string()]));
        assert_eq!(feedback.missing_points, None);
    }

    #[test]
    fn test_feedback_rating_strings() {
        let rating = |v: Value| {
            feedback_from_value(json!({ "strengths": [], "improvements": [], "overallRating": v }))
                .unwrap()
                .overall_rating
        };
        assert_eq!(rating(json!(" 64 ")), Some(64));
        assert_eq!(rating(json!("90%")), Some(90));
        assert_eq!(rating(json!("great")), None);
        assert_eq!(rating(json!([80])), None);
    }

    #[test]
    fn test_feedback_rejects_non_array_required_fields() {
        assert!(feedback_from_value(json!({ "strengths": "Clear", "improvements": [] })).is_none());
        assert!(feedback_from_value(json!({ "strengths": [], "improvements": null })).is_none());

        let mixed = feedback_from_value(json!({
            "strengths": ["Clear", 3, null, { "x": 1 }],
            "improvements": []
        }))
        .unwrap();
        assert_eq!(mixed.strengths, vec!["Clear", "3"]);
    }

    #[test]
    fn test_question_tolerates_badly_typed_tags_and_time() {
        let q: InterviewQuestion = serde_json::from_value(json!({
            "id": "1",
            "title": "Explain CAP",
            "tags": ["Distributed", 42, null],
            "time": 10
        }))
        .unwrap();
        assert_eq!(q.tags, vec!["Distributed", "42"]);
        assert_eq!(q.time, "10 min");

        let q: InterviewQuestion = serde_json::from_value(json!({
            "title": "Explain CAP",
            "tags": { "a": 1 },
            "time": ["soon"]
        }))
        .unwrap();
        assert!(q.tags.is_empty());
        assert_eq!(q.time, "5 min");

        let q: InterviewQuestion =
            serde_json::from_value(json!({ "title": "Explain CAP", "tags": "Systems" })).unwrap();
        assert_eq!(q.tags, vec!["Systems"]);
    }

    #[test]
    fn test_feedback_serializes_camel_case_and_skips_absent() {
        let feedback = AnswerFeedback {
            strengths: vec!["a".to_string()],
            improvements: vec![],
            overall_rating: Some(70),
            correct_points: None,
            missing_points: None,
        };
        let value = serde_json::to_value(&feedback).unwrap();
        assert_eq!(value["overallRating"], 70);
        assert!(value.get("correctPoints").is_none());
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        let blank_reqs = QuestionSetRequest {
            job_requirements: "  \n\t".to_string(),
        };
        assert!(matches!(blank_reqs.validate(), Err(TaskError::Validation(_))));

        let blank_answer = AnswerScoringRequest {
            question: "Q".to_string(),
            answer: " ".to_string(),
        };
        assert!(blank_answer.validate().is_err());

        let letter = CoverLetterRequest {
            company_name: "Acme".to_string(),
            job_title: "".to_string(),
            job_description: "Build things".to_string(),
            personal_touch: None,
        };
        match letter.validate() {
            Err(TaskError::Validation(msg)) => assert_eq!(msg, "job_title cannot be empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_cover_letter_request_personal_touch_optional() {
        let request: CoverLetterRequest = serde_json::from_value(json!({
            "company_name": "Acme",
            "job_title": "Engineer",
            "job_description": "Build things"
        }))
        .unwrap();
        assert!(request.personal_touch.is_none());
        assert!(request.validate().is_ok());
    }
}
