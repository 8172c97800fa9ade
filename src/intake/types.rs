//! Wire types exchanged with the intake submission service

use crate::state::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single answered (or skipped) question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub step: String,
    pub field: String,
    pub value: FieldValue,
}

/// Payload persisted by the submission service when a form is completed
#[derive(Debug, Clone, Serialize)]
pub struct FormSubmission {
    pub submission_id: Uuid,
    pub template_id: String,
    pub patient_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<Answer>,
}

/// Acknowledgement returned by the submission service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub submission_id: Uuid,
    #[serde(default)]
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_submission_serializes_answers() {
        let submission = FormSubmission {
            submission_id: Uuid::nil(),
            template_id: "intake-general".to_string(),
            patient_id: "P-001".to_string(),
            submitted_at: DateTime::<Utc>::UNIX_EPOCH,
            answers: vec![
                Answer {
                    step: "Info".to_string(),
                    field: "reason".to_string(),
                    value: FieldValue::Text("Control".to_string()),
                },
                Answer {
                    step: "History".to_string(),
                    field: "pain".to_string(),
                    value: FieldValue::Score {
                        value: Some(4),
                        max: 10,
                    },
                },
            ],
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value["answers"],
            json!([
                {"step": "Info", "field": "reason", "value": "Control"},
                {"step": "History", "field": "pain", "value": {"value": 4, "max": 10}},
            ])
        );
        assert_eq!(value["patient_id"], json!("P-001"));
    }

    #[test]
    fn test_ack_reference_is_optional() {
        let json = r#"{"submission_id": "00000000-0000-0000-0000-000000000000"}"#;
        let ack: SubmissionAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.submission_id, Uuid::nil());
        assert!(ack.reference.is_none());
    }
}
