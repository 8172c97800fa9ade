//! Static lookup tables: form categories, intake form templates and the
//! demo patient roster.
//!
//! Everything here is immutable for the life of the process.

use super::forms::{FormError, FormField, FormSession, Step};

/// A group of related forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub title: &'static str,
}

/// Category whose contact questions duplicate the patient record
pub const PERSONAL_INFORMATION: &str = "personal_information";

pub const CATEGORIES: &[Category] = &[
    Category {
        slug: PERSONAL_INFORMATION,
        title: "Información personal",
    },
    Category {
        slug: "medical_history",
        title: "Historia clínica",
    },
    Category {
        slug: "pain_assessment",
        title: "Evaluación del dolor",
    },
    Category {
        slug: "mental_health",
        title: "Salud mental",
    },
];

/// Title for a category slug; unknown slugs are shown verbatim
pub fn category_title(slug: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|c| c.slug == slug)
        .map(|c| c.title)
        .unwrap_or(slug)
}

/// Patient record shown in the patient list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patient {
    pub id: &'static str,
    pub name: &'static str,
    pub birth_date: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
}

pub const PATIENTS: &[Patient] = &[
    Patient {
        id: "P-001",
        name: "María González",
        birth_date: "1985-03-12",
        email: "maria.gonzalez@example.com",
        phone: "+34 600 111 222",
    },
    Patient {
        id: "P-002",
        name: "Carlos Ruiz",
        birth_date: "1972-11-30",
        email: "carlos.ruiz@example.com",
        phone: "+34 600 333 444",
    },
    Patient {
        id: "P-003",
        name: "Lucía Fernández",
        birth_date: "1994-07-05",
        email: "lucia.fernandez@example.com",
        phone: "+34 600 555 666",
    },
];

pub fn find_patient(id: &str) -> Option<&'static Patient> {
    PATIENTS.iter().find(|p| p.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Score on a `0..=max` scale
    Score(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    fn build(&self) -> FormField {
        match self.kind {
            FieldKind::Text => FormField::text(self.name, self.label, self.required, false),
            FieldKind::LongText => FormField::text(self.name, self.label, self.required, true),
            FieldKind::Score(max) => FormField::score(self.name, self.label, max, self.required),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Blueprint of an intake form
#[derive(Debug, Clone, Copy)]
pub struct FormTemplate {
    pub id: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub steps: &'static [StepSpec],
}

impl FormTemplate {
    /// Fresh, unanswered steps for a new session
    pub fn build_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .map(|s| Step::new(s.title, s.fields.iter().map(FieldSpec::build).collect()))
            .collect()
    }

    /// Start filling out this form for a patient
    pub fn open_session(&self, patient_id: &str) -> Result<FormSession, FormError> {
        FormSession::new(self.id, patient_id, self.build_steps())
    }
}

const fn text(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text,
        required,
    }
}

const fn long_text(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::LongText,
        required,
    }
}

const fn score(name: &'static str, label: &'static str, max: u8) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Score(max),
        required: true,
    }
}

pub const FORM_TEMPLATES: &[FormTemplate] = &[
    FormTemplate {
        id: "intake-general",
        category: PERSONAL_INFORMATION,
        title: "Ingreso general",
        description: "Datos de contacto de emergencia y motivo de consulta",
        steps: &[
            StepSpec {
                title: "Datos básicos",
                fields: &[
                    text("occupation", "Ocupación", false),
                    text("emergency_contact", "Contacto de emergencia", true),
                    long_text("reason", "Motivo de consulta", true),
                ],
            },
            StepSpec {
                title: "Hábitos",
                fields: &[
                    text("smoking", "¿Fuma? (sí/no)", true),
                    score("exercise", "Actividad física semanal (0-7 días)", 7),
                ],
            },
            StepSpec {
                title: "Consentimiento",
                fields: &[text("consent", "Escriba ACEPTO para confirmar", true)],
            },
        ],
    },
    FormTemplate {
        id: "medical-history",
        category: "medical_history",
        title: "Antecedentes médicos",
        description: "Enfermedades previas, alergias y medicación",
        steps: &[
            StepSpec {
                title: "Antecedentes",
                fields: &[
                    long_text("conditions", "Enfermedades previas", true),
                    long_text("surgeries", "Cirugías", false),
                ],
            },
            StepSpec {
                title: "Alergias",
                fields: &[long_text("allergies", "Alergias conocidas", true)],
            },
            StepSpec {
                title: "Medicación",
                fields: &[long_text("medication", "Medicación actual", true)],
            },
            StepSpec {
                title: "Antecedentes familiares",
                fields: &[long_text("family_history", "Enfermedades en la familia", false)],
            },
        ],
    },
    FormTemplate {
        id: "pain-scale",
        category: "pain_assessment",
        title: "Escala de dolor",
        description: "Intensidad y localización del dolor",
        steps: &[
            StepSpec {
                title: "Intensidad",
                fields: &[
                    score("pain_now", "Dolor actual (0-10)", 10),
                    score("pain_worst", "Peor dolor última semana (0-10)", 10),
                ],
            },
            StepSpec {
                title: "Localización",
                fields: &[
                    text("location", "Zona del dolor", true),
                    long_text("triggers", "¿Qué lo empeora?", false),
                ],
            },
        ],
    },
    FormTemplate {
        id: "phq-2",
        category: "mental_health",
        title: "Cribado de ánimo (PHQ-2)",
        description: "Dos preguntas sobre las últimas dos semanas",
        steps: &[
            StepSpec {
                title: "Interés",
                fields: &[score("interest", "Poco interés o placer en hacer cosas (0-3)", 3)],
            },
            StepSpec {
                title: "Ánimo",
                fields: &[score("mood", "Sentirse decaído o sin esperanza (0-3)", 3)],
            },
        ],
    },
];

pub fn find_template(id: &str) -> Option<&'static FormTemplate> {
    FORM_TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates in display order, with the title of the category they belong to
pub fn templates_with_categories() -> Vec<(&'static str, &'static FormTemplate)> {
    CATEGORIES
        .iter()
        .flat_map(|c| {
            FORM_TEMPLATES
                .iter()
                .filter(move |t| t.category == c.slug)
                .map(move |t| (c.title, t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;
    use std::collections::HashSet;

    #[test]
    fn test_category_title_lookup() {
        assert_eq!(category_title(PERSONAL_INFORMATION), "Información personal");
        assert_eq!(category_title("unknown_slug"), "unknown_slug");
    }

    #[test]
    fn test_template_ids_unique_and_categories_known() {
        let ids: HashSet<_> = FORM_TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), FORM_TEMPLATES.len());
        for template in FORM_TEMPLATES {
            assert!(
                CATEGORIES.iter().any(|c| c.slug == template.category),
                "unknown category for {}",
                template.id
            );
            assert!(!template.steps.is_empty());
        }
    }

    #[test]
    fn test_templates_do_not_ask_for_known_contact_data() {
        for template in FORM_TEMPLATES {
            for step in template.steps {
                for field in step.fields {
                    let label = field.label.to_lowercase();
                    assert!(!label.contains("email"), "{}", field.label);
                    assert!(!label.contains("phone"), "{}", field.label);
                    assert!(!label.contains("full name"), "{}", field.label);
                }
            }
        }
    }

    #[test]
    fn test_templates_with_categories_covers_all() {
        let listed = templates_with_categories();
        assert_eq!(listed.len(), FORM_TEMPLATES.len());
        assert_eq!(listed[0].0, "Información personal");
        assert_eq!(listed[0].1.id, "intake-general");
    }

    #[test]
    fn test_open_session_builds_unanswered_steps() {
        let template = find_template("pain-scale").unwrap();
        let session = template.open_session("P-002").unwrap();
        assert_eq!(session.total_steps(), 2);
        assert_eq!(session.patient_id, "P-002");
        assert_eq!(session.steps()[1].ordinal, 1);
        assert_eq!(
            session.steps()[0].fields[0].value,
            FieldValue::Score {
                value: None,
                max: 10
            }
        );
        assert!(!session.current_step_can_proceed());
    }

    #[test]
    fn test_find_patient() {
        assert_eq!(find_patient("P-003").map(|p| p.name), Some("Lucía Fernández"));
        assert!(find_patient("P-999").is_none());
    }
}
