use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::{Path, PathBuf};

use super::seed::{SEED_FORCED, SEED_FORCED_CATEGORY, SEED_PROTECTED, SEED_PROTECTED_CATEGORY};
use super::{GlossaryTerm, TermKind, TermTable};

/// Bumped whenever the seed set changes; databases below it get re-seeded.
const SEED_VERSION: i64 = 1;

pub struct GlossaryStore {
    db_path: PathBuf,
}

impl GlossaryStore {
    /// Opens (creating if needed) the database at `db_path` and installs the
    /// seed terms on first use.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create glossary directory: {}", parent.display())
            })?;
        }

        let store = Self { db_path };
        store.init_db()?;
        let seeded = store.seed()?;
        if seeded > 0 {
            log::info!("Seeded {seeded} glossary terms into {}", store.db_path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS glossary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term_source TEXT NOT NULL,
                term_target TEXT,
                type TEXT NOT NULL CHECK(type IN ('protected', 'forced')),
                category TEXT DEFAULT 'general',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create glossary table")?;

        conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_source_cat ON glossary(term_source, category)",
            [],
        )
        .context("Failed to create index")?;

        Ok(())
    }

    /// Inserts seed rows that are missing, once per seed version. Rows the
    /// user has since edited or deleted are left alone.
    fn seed(&self) -> Result<usize> {
        let mut conn = self.connect()?;
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version >= SEED_VERSION {
            return Ok(0);
        }

        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO glossary (term_source, term_target, type, category)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for term in SEED_PROTECTED {
                inserted += stmt.execute(params![
                    term,
                    Option::<&str>::None,
                    TermKind::Protected.as_str(),
                    SEED_PROTECTED_CATEGORY
                ])?;
            }
            for (source, target) in SEED_FORCED {
                inserted += stmt.execute(params![
                    source,
                    target,
                    TermKind::Forced.as_str(),
                    SEED_FORCED_CATEGORY
                ])?;
            }
        }
        tx.execute_batch(&format!("PRAGMA user_version = {SEED_VERSION}"))?;
        tx.commit().context("Failed to seed glossary")?;

        Ok(inserted)
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).with_context(|| {
            format!("Failed to open glossary database: {}", self.db_path.display())
        })
    }

    /// Inserts a term or updates the target and kind of an existing
    /// `(source, category)` row.
    pub fn upsert(&self, term: &GlossaryTerm) -> Result<()> {
        if term.source.trim().is_empty() {
            bail!("Glossary term must not be empty");
        }
        if term.kind == TermKind::Forced && term.target.as_deref().is_none_or(str::is_empty) {
            bail!("Forced term '{}' needs a target", term.source);
        }

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO glossary (term_source, term_target, type, category)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(term_source, category) DO UPDATE SET
                term_target = excluded.term_target,
                type = excluded.type,
                updated_at = CURRENT_TIMESTAMP",
            params![term.source, term.target, term.kind.as_str(), term.category],
        )
        .context("Failed to save glossary term")?;

        Ok(())
    }

    /// Removes a term; returns whether it existed.
    pub fn delete(&self, source: &str, category: &str) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn
            .execute(
                "DELETE FROM glossary WHERE term_source = ?1 AND category = ?2",
                params![source, category],
            )
            .context("Failed to delete glossary term")?;
        Ok(removed > 0)
    }

    pub fn get(&self, source: &str, category: &str) -> Result<Option<GlossaryTerm>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT term_source, term_target, type, category FROM glossary
             WHERE term_source = ?1 AND category = ?2",
            params![source, category],
            row_to_term,
        )
        .optional()
        .context("Failed to read glossary term")
    }

    /// Terms filtered by category and kind, in insertion order.
    pub fn terms(
        &self,
        category: Option<&str>,
        kind: Option<TermKind>,
    ) -> Result<Vec<GlossaryTerm>> {
        let mut query = String::from(
            "SELECT term_source, term_target, type, category FROM glossary WHERE 1=1",
        );
        let mut args: Vec<&str> = Vec::new();
        if let Some(category) = category {
            query.push_str(" AND category = ?");
            args.push(category);
        }
        if let Some(kind) = kind {
            query.push_str(" AND type = ?");
            args.push(kind.as_str());
        }
        query.push_str(" ORDER BY id");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&query)?;
        let terms = stmt
            .query_map(params_from_iter(args), row_to_term)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read glossary terms")?;
        Ok(terms)
    }

    /// Protected and forced terms of one category.
    pub fn category_terms(&self, category: &str) -> Result<TermTable> {
        Ok(TermTable::from_terms(&self.terms(Some(category), None)?))
    }

    /// Every category with its term count, alphabetically.
    pub fn categories(&self) -> Result<Vec<(String, usize)>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT category, COUNT(*) FROM glossary GROUP BY category ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok((row.get::<_, String>(0)?, count as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }
}

fn row_to_term(row: &rusqlite::Row<'_>) -> rusqlite::Result<GlossaryTerm> {
    let kind: String = row.get(2)?;
    let kind = kind.parse::<TermKind>().map_err(|_| {
        rusqlite::Error::InvalidColumnType(2, "type".to_string(), rusqlite::types::Type::Text)
    })?;
    Ok(GlossaryTerm {
        source: row.get(0)?,
        target: row.get(1)?,
        kind,
        category: row.get(3)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> GlossaryStore {
        GlossaryStore::open(temp_dir.path().join("glossary.db")).unwrap()
    }

    #[test]
    fn test_open_seeds_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        let general = store.category_terms("general").unwrap();
        assert_eq!(general.forced.len(), SEED_FORCED.len());
        assert!(general.forced.contains(&("Orta".to_string(), "Medium".to_string())));

        let tech = store.category_terms("Technology").unwrap();
        assert_eq!(tech.protected.first().map(String::as_str), Some("LinkedIn"));
        assert_eq!(tech.protected.len(), SEED_PROTECTED.len());
    }

    #[test]
    fn test_reopen_does_not_restore_deleted_seed() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.delete("Orta", "general").unwrap());

        let reopened = create_test_store(&temp_dir);
        assert!(reopened.get("Orta", "general").unwrap().is_none());
    }

    #[test]
    fn test_upsert_updates_existing_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store
            .upsert(&GlossaryTerm::forced("Evet", "Yes indeed", "general"))
            .unwrap();
        let term = store.get("Evet", "general").unwrap().unwrap();
        assert_eq!(term.target.as_deref(), Some("Yes indeed"));

        let count = store
            .terms(Some("general"), Some(TermKind::Forced))
            .unwrap()
            .iter()
            .filter(|t| t.source == "Evet")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_same_source_in_two_categories() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.upsert(&GlossaryTerm::protected("Kanban", "agile")).unwrap();
        store
            .upsert(&GlossaryTerm::forced("Kanban", "Card board", "general"))
            .unwrap();

        assert_eq!(store.category_terms("agile").unwrap().protected, vec!["Kanban"]);
        assert_eq!(
            store.get("Kanban", "general").unwrap().unwrap().kind,
            TermKind::Forced
        );
    }

    #[test]
    fn test_forced_term_requires_target() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        let term = GlossaryTerm {
            source: "Kriter".to_string(),
            target: None,
            kind: TermKind::Forced,
            category: "general".to_string(),
        };
        assert!(store.upsert(&term).is_err());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(!store.delete("Nope", "general").unwrap());
    }

    #[test]
    fn test_categories_with_counts() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        let categories = store.categories().unwrap();
        assert_eq!(
            categories,
            vec![
                ("Technology".to_string(), SEED_PROTECTED.len()),
                ("general".to_string(), SEED_FORCED.len()),
            ]
        );
    }
}
