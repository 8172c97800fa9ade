//! Form field value objects

use serde::Serialize;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// A score on an inclusive `0..=max` scale; `None` until answered
    Score { value: Option<u8>, max: u8 },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub required: bool,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, required: bool, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            required,
            is_multiline,
        }
    }

    /// Create a new unanswered score field
    pub fn score(name: &str, label: &str, max: u8, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Score { value: None, max },
            required,
            is_multiline: false,
        }
    }

    /// Get the text value (returns empty string for score fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Score { .. } => "",
        }
    }

    /// Get the score value (returns None for text fields)
    pub fn as_score(&self) -> Option<u8> {
        match &self.value {
            FieldValue::Score { value, .. } => *value,
            FieldValue::Text(_) => None,
        }
    }

    /// Whether the field holds an answer
    pub fn is_answered(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Score { value, max } => value.is_some_and(|v| v <= *max),
        }
    }

    /// A field is valid when it is optional or answered
    pub fn is_valid(&self) -> bool {
        !self.required || self.is_answered()
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Set the score, clamped to the field's scale
    pub fn set_score(&mut self, score: u8) {
        if let FieldValue::Score { value, max } = &mut self.value {
            *value = Some(score.min(*max));
        }
    }

    /// Raise the score by one step, starting from zero when unanswered
    pub fn increment_score(&mut self) {
        if let FieldValue::Score { value, max } = &mut self.value {
            *value = Some(match *value {
                None => 0,
                Some(v) => (v + 1).min(*max),
            });
        }
    }

    /// Lower the score by one step, starting from zero when unanswered
    pub fn decrement_score(&mut self) {
        if let FieldValue::Score { value, .. } = &mut self.value {
            *value = Some(value.map_or(0, |v| v.saturating_sub(1)));
        }
    }

    /// Push a character to the field value.
    ///
    /// On a score a digit extends the current value when the result stays
    /// within the scale (`1` then `0` is 10 on a 0..=10 scale), otherwise it
    /// starts a new value.
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Score { value, max } => {
                let Some(d) = c.to_digit(10) else {
                    return;
                };
                let extended = value.map(|v| u32::from(v) * 10 + d);
                match extended {
                    Some(n) if n <= u32::from(*max) => *value = Some(n as u8),
                    _ if d <= u32::from(*max) => *value = Some(d as u8),
                    _ => {}
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Score { value, .. } => *value = None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Score { value: None, max } => format!("- / {max}"),
            FieldValue::Score {
                value: Some(v),
                max,
            } => format!("{v} / {max}"),
        }
    }
}
