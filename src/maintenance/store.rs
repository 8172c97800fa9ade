//! Question definition datastore

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;

/// Access to the question-definition table, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Delete every question of `category` whose text matches any of the
    /// lowercase `LIKE` patterns, ignoring case. Returns the number of rows
    /// removed.
    async fn delete_questions_like(
        &self,
        category: &str,
        patterns: Vec<String>,
    ) -> Result<u64, sqlx::Error>;

    /// Check the datastore answers queries
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: Pool<Sqlite>,
}

impl SqliteQuestionStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory database sees its own empty database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;
        let store = Self { pool };
        store.ensure_questions_table().await?;
        Ok(store)
    }

    async fn ensure_questions_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                category      TEXT NOT NULL,
                question_text TEXT NOT NULL,
                position      INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_question(&self, category: &str, text: &str) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO questions (category, question_text) VALUES (?, ?)")
            .bind(category)
            .bind(text)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn count_questions(&self, category: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE category = ?")
            .bind(category)
            .fetch_one(&self.pool)
            .await
    }
}

/// SQL `LIKE` semantics (`%` any run, `_` any single character) over
/// already case-folded strings. SQLite only folds ASCII, so matching is done
/// here with full Unicode lowercasing.
fn like_matches(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // reachable[i]: pattern prefix matches text[..i]
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;
    for p in &pattern {
        let mut next = vec![false; text.len() + 1];
        match p {
            '%' => {
                let mut seen = false;
                for i in 0..=text.len() {
                    seen |= reachable[i];
                    next[i] = seen;
                }
            }
            _ => {
                for i in 0..text.len() {
                    if reachable[i] && (*p == '_' || *p == text[i]) {
                        next[i + 1] = true;
                    }
                }
            }
        }
        reachable = next;
    }
    reachable[text.len()]
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn delete_questions_like(
        &self,
        category: &str,
        patterns: Vec<String>,
    ) -> Result<u64, sqlx::Error> {
        if patterns.is_empty() {
            return Ok(0);
        }
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();

        let mut tx = self.pool.begin().await?;
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, question_text FROM questions WHERE category = ?")
                .bind(category)
                .fetch_all(&mut *tx)
                .await?;

        let ids: Vec<i64> = rows
            .into_iter()
            .filter(|(_, text)| {
                let text = text.to_lowercase();
                patterns.iter().any(|p| like_matches(&text, p))
            })
            .map(|(id, _)| id)
            .collect();
        if ids.is_empty() {
            tx.commit().await?;
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM questions WHERE id IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in &ids {
            query = query.bind(*id);
        }
        let result = query.execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteQuestionStore {
        SqliteQuestionStore::connect("sqlite::memory:")
            .await
            .expect("db")
    }

    #[tokio::test]
    async fn delete_matches_case_insensitively_within_category() {
        let store = store().await;
        store.insert_question("personal", "Your FULL NAME").await.expect("insert");
        store.insert_question("personal", "Date of birth").await.expect("insert");
        store.insert_question("other", "Full name of your doctor").await.expect("insert");

        let deleted = store
            .delete_questions_like("personal", vec!["%full name%".to_string()])
            .await
            .expect("delete");

        assert_eq!(deleted, 1);
        assert_eq!(store.count_questions("personal").await.expect("count"), 1);
        assert_eq!(store.count_questions("other").await.expect("count"), 1);
    }

    #[tokio::test]
    async fn delete_with_several_patterns() {
        let store = store().await;
        store.insert_question("personal", "Email address").await.expect("insert");
        store.insert_question("personal", "Mobile phone").await.expect("insert");
        store.insert_question("personal", "Allergies").await.expect("insert");

        let deleted = store
            .delete_questions_like(
                "personal",
                vec!["%EMAIL%".to_string(), "%phone%".to_string()],
            )
            .await
            .expect("delete");

        assert_eq!(deleted, 2);
    }

    #[tokio::test]
    async fn delete_folds_accented_uppercase_text() {
        let store = store().await;
        store.insert_question("personal", "TELÉFONO").await.expect("insert");
        store
            .insert_question("personal", "Su CORREO ELECTRÓNICO")
            .await
            .expect("insert");
        store.insert_question("personal", "Alergias").await.expect("insert");

        let deleted = store
            .delete_questions_like(
                "personal",
                vec!["%teléfono%".to_string(), "%correo electrónico%".to_string()],
            )
            .await
            .expect("delete");

        assert_eq!(deleted, 2);
        assert_eq!(store.count_questions("personal").await.expect("count"), 1);
    }

    #[test]
    fn like_wildcards() {
        assert!(like_matches("mobile phone", "%phone%"));
        assert!(like_matches("phone", "%phone%"));
        assert!(like_matches("phones", "phone_"));
        assert!(!like_matches("phone", "phone_"));
        assert!(!like_matches("telephone number", "phone%"));
        assert!(like_matches("teléfono", "%teléfono%"));
    }

    #[tokio::test]
    async fn no_patterns_deletes_nothing() {
        let store = store().await;
        store.insert_question("personal", "Email").await.expect("insert");
        let deleted = store
            .delete_questions_like("personal", vec![])
            .await
            .expect("delete");
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn health_check_fails_once_pool_is_closed() {
        let store = store().await;
        store.health_check().await.expect("healthy");
        store.pool.close().await;
        assert!(store.health_check().await.is_err());
    }
}
