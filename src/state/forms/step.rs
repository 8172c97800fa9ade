//! Steps of a multi-part form and field focus handling

use super::field::FormField;

/// Trait for common field-focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// One page of a multi-part form
#[derive(Debug, Clone)]
pub struct Step {
    pub title: String,
    /// Zero-based position within the owning session
    pub ordinal: usize,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl Step {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            ordinal: 0,
            fields,
            active_field_index: 0,
        }
    }

    /// Step validity: every required field is answered.
    ///
    /// This is the externally computed `can_proceed` flag; the session
    /// controller only ever receives the boolean.
    pub fn can_proceed(&self) -> bool {
        self.fields.iter().all(FormField::is_valid)
    }

    /// Labels of required fields that still need an answer
    pub fn missing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| f.label.as_str())
            .collect()
    }

    pub fn get_active_field(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }
}

impl Form for Step {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_step() -> Step {
        Step::new(
            "Info",
            vec![
                FormField::text("full_name", "Nombre completo", true, false),
                FormField::text("notes", "Notas", false, true),
                FormField::score("pain", "Dolor", 10, true),
            ],
        )
    }

    mod validity {
        use super::*;

        #[test]
        fn test_new_step_cannot_proceed() {
            let step = create_test_step();
            assert!(!step.can_proceed());
            assert_eq!(step.missing_fields(), vec!["Nombre completo", "Dolor"]);
        }

        #[test]
        fn test_can_proceed_once_required_fields_answered() {
            let mut step = create_test_step();
            step.fields[0].set_text("Ana Pérez".to_string());
            assert!(!step.can_proceed());
            step.fields[2].set_score(3);
            assert!(step.can_proceed());
            assert!(step.missing_fields().is_empty());
        }

        #[test]
        fn test_step_without_fields_can_proceed() {
            let step = Step::new("Consent", vec![]);
            assert!(step.can_proceed());
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_next_field_cycles() {
            let mut step = create_test_step();
            for _ in 0..3 {
                step.next_field();
            }
            assert_eq!(step.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut step = create_test_step();
            step.prev_field();
            assert_eq!(step.active_field_index, 2);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut step = create_test_step();
            step.set_active_field(100);
            assert_eq!(step.active_field_index, 2);
        }

        #[test]
        fn test_focus_on_empty_step_is_noop() {
            let mut step = Step::new("Consent", vec![]);
            step.next_field();
            step.prev_field();
            assert_eq!(step.active_field_index, 0);
            assert!(step.get_active_field_mut().is_none());
        }
    }
}
