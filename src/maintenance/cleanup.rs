//! Removal of intake questions that ask for data already on the patient
//! record (full name, email, phone).
//!
//! The removal runs as two independent delete passes with no enclosing
//! transaction. A failure in the first pass aborts the run. A failure in the
//! second pass is logged and not reported to the caller, leaving the table
//! partially cleaned.

use super::store::QuestionStore;
use crate::state::catalog::PERSONAL_INFORMATION;
use thiserror::Error;

/// Category the cleanup is restricted to
pub const CLEANUP_CATEGORY: &str = PERSONAL_INFORMATION;

/// English wording of the redundant questions
pub const CONTACT_PATTERNS: &[&str] = &["%full name%", "%email%", "%phone%"];

/// Spanish wording of the redundant questions
pub const LOCALIZED_CONTACT_PATTERNS: &[&str] =
    &["%nombre completo%", "%correo electrónico%", "%teléfono%"];

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("datastore error: {0}")]
    Datastore(#[from] sqlx::Error),
}

/// Outcome of one cleanup run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupReport {
    /// Rows removed by the passes that succeeded
    pub deleted: u64,
    pub passes_completed: usize,
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// Delete redundant questions. Idempotent: once the matching rows are gone,
/// further runs delete nothing and still succeed.
pub async fn remove_redundant_questions<S>(store: &S) -> Result<CleanupReport, CleanupError>
where
    S: QuestionStore + ?Sized,
{
    let mut report = CleanupReport::default();

    let deleted = store
        .delete_questions_like(CLEANUP_CATEGORY, owned(CONTACT_PATTERNS))
        .await
        .map_err(|error| {
            tracing::error!(%error, "failed to delete redundant questions");
            CleanupError::Datastore(error)
        })?;
    tracing::info!(deleted, "removed redundant questions");
    report.deleted += deleted;
    report.passes_completed += 1;

    match store
        .delete_questions_like(CLEANUP_CATEGORY, owned(LOCALIZED_CONTACT_PATTERNS))
        .await
    {
        Ok(deleted) => {
            tracing::info!(deleted, "removed redundant localized questions");
            report.deleted += deleted;
            report.passes_completed += 1;
        }
        Err(error) => {
            tracing::warn!(%error, "failed to delete redundant localized questions");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::store::{MockQuestionStore, SqliteQuestionStore};
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[tokio::test]
    async fn runs_both_passes_in_order() {
        let mut store = MockQuestionStore::new();
        let mut seq = Sequence::new();
        store
            .expect_delete_questions_like()
            .with(eq(CLEANUP_CATEGORY), eq(owned(CONTACT_PATTERNS)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(3));
        store
            .expect_delete_questions_like()
            .with(eq(CLEANUP_CATEGORY), eq(owned(LOCALIZED_CONTACT_PATTERNS)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(2));

        let report = remove_redundant_questions(&store).await.expect("cleanup");
        assert_eq!(
            report,
            CleanupReport {
                deleted: 5,
                passes_completed: 2
            }
        );
    }

    #[tokio::test]
    async fn first_pass_failure_skips_second_pass() {
        let mut store = MockQuestionStore::new();
        store
            .expect_delete_questions_like()
            .times(1)
            .returning(|_, _| Err(sqlx::Error::PoolTimedOut));

        let err = remove_redundant_questions(&store)
            .await
            .expect_err("should fail");
        assert!(matches!(err, CleanupError::Datastore(sqlx::Error::PoolTimedOut)));
    }

    #[tokio::test]
    async fn second_pass_failure_is_swallowed() {
        let mut store = MockQuestionStore::new();
        let mut seq = Sequence::new();
        store
            .expect_delete_questions_like()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(4));
        store
            .expect_delete_questions_like()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(sqlx::Error::PoolClosed));

        let report = remove_redundant_questions(&store).await.expect("cleanup");
        assert_eq!(report.deleted, 4);
        assert_eq!(report.passes_completed, 1);
    }

    #[tokio::test]
    async fn repeated_runs_are_idempotent() {
        let store = SqliteQuestionStore::connect("sqlite::memory:")
            .await
            .expect("db");
        for text in [
            "Full name",
            "Email",
            "Phone number",
            "Teléfono de contacto",
            "Fecha de nacimiento",
        ] {
            store
                .insert_question(CLEANUP_CATEGORY, text)
                .await
                .expect("insert");
        }
        store
            .insert_question("medical_history", "Phone of your GP")
            .await
            .expect("insert");

        let first = remove_redundant_questions(&store).await.expect("first");
        assert_eq!(first.deleted, 4);

        let second = remove_redundant_questions(&store).await.expect("second");
        assert_eq!(second.deleted, 0);
        assert_eq!(second.passes_completed, 2);

        assert_eq!(
            store.count_questions(CLEANUP_CATEGORY).await.expect("count"),
            1
        );
        assert_eq!(
            store.count_questions("medical_history").await.expect("count"),
            1
        );
    }

    #[tokio::test]
    async fn localized_pass_ignores_case_of_accented_text() {
        let store = SqliteQuestionStore::connect("sqlite::memory:")
            .await
            .expect("db");
        for text in ["TELÉFONO", "CORREO ELECTRÓNICO", "NOMBRE COMPLETO"] {
            store
                .insert_question(CLEANUP_CATEGORY, text)
                .await
                .expect("insert");
        }

        let report = remove_redundant_questions(&store).await.expect("cleanup");
        assert_eq!(report.deleted, 3);
        assert_eq!(
            store.count_questions(CLEANUP_CATEGORY).await.expect("count"),
            0
        );
    }
}
