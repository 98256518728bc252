//! Access to the `jogos` table: identifier generation and row insertion.
//!
//! The table is expected to exist already with at least the columns
//! `appid`, `nome`, `imagem_url` and `tipo`. Nothing here creates it.

use crate::error::{IngestError, Result};
use crate::record::GameRecord;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub const TABLE: &str = "jogos";
/// Identifier handed out when the table has no usable maximum.
pub const SEED_APPID: i64 = 4_144_831;
/// Category written on every row this tool inserts.
pub const CATEGORY: &str = "custom";

const MAX_APPID_SQL: &str = "SELECT MAX(appid) FROM jogos";
const INSERT_SQL: &str =
    "INSERT INTO jogos (appid, nome, imagem_url, tipo) VALUES (?1, ?2, ?3, 'custom')";

/// Outcome of identifier generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAppId {
    /// One past the largest positive `appid` in the table.
    Following(i64),
    /// Empty table, unreadable table, or no positive maximum.
    Seed,
}

impl NextAppId {
    pub fn value(self) -> i64 {
        match self {
            NextAppId::Following(id) => id,
            NextAppId::Seed => SEED_APPID,
        }
    }
}

/// A row as written to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub appid: i64,
    pub name: String,
    pub image_url: String,
    pub category: &'static str,
}

pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(IngestError::StorageOpen)?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Whether the target table exists. Absence is not fatal here; the
    /// insert will fail to prepare.
    pub fn has_table(&self) -> rusqlite::Result<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![TABLE],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
    }

    /// Never fails: any problem reading the current maximum yields the seed.
    pub fn next_appid(&self) -> NextAppId {
        match self.max_appid() {
            Ok(Some(max)) if max > 0 => match max.checked_add(1) {
                Some(next) => NextAppId::Following(next),
                None => {
                    tracing::debug!(max, "appid maximum overflows, using seed");
                    NextAppId::Seed
                }
            },
            Ok(max) => {
                tracing::debug!(?max, "no positive appid in table, using seed");
                NextAppId::Seed
            }
            Err(err) => {
                tracing::debug!(error = %err, "could not read appid maximum, using seed");
                NextAppId::Seed
            }
        }
    }

    fn max_appid(&self) -> rusqlite::Result<Option<i64>> {
        let mut stmt = self.conn.prepare(MAX_APPID_SQL)?;
        let max = stmt
            .query_row([], |row| row.get::<_, Value>(0))
            .optional()?;

        // Reals truncate like sqlite3_column_int; text and blobs count as absent.
        Ok(match max {
            Some(Value::Integer(id)) => Some(id),
            Some(Value::Real(id)) => Some(id as i64),
            _ => None,
        })
    }

    pub fn insert(&self, appid: i64, record: GameRecord) -> Result<StoredRow> {
        let mut stmt = self
            .conn
            .prepare(INSERT_SQL)
            .map_err(IngestError::InsertPrepare)?;

        stmt.execute(params![appid, record.name, record.image_url])
            .map_err(IngestError::InsertExec)?;

        Ok(StoredRow {
            appid,
            name: record.name,
            image_url: record.image_url,
            category: CATEGORY,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const SCHEMA: &str = "CREATE TABLE jogos (
        appid INTEGER PRIMARY KEY,
        nome TEXT NOT NULL,
        imagem_url TEXT,
        tipo TEXT
    )";

    fn setup(schema: Option<&str>) -> (GameStore, TempDir) {
        let dir = tempdir().unwrap();
        let store = GameStore::open(&dir.path().join("database.db")).unwrap();
        if let Some(sql) = schema {
            store.conn.execute_batch(sql).unwrap();
        }
        (store, dir)
    }

    fn game(name: &str) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            image_url: format!("http://example.com/{name}.jpg"),
        }
    }

    fn fetch(store: &GameStore, appid: i64) -> Option<(String, String, String)> {
        store
            .conn
            .query_row(
                "SELECT nome, imagem_url, tipo FROM jogos WHERE appid = ?1",
                params![appid],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .unwrap()
    }

    #[test]
    fn empty_table_uses_seed() {
        let (store, _dir) = setup(Some(SCHEMA));
        assert_eq!(store.next_appid(), NextAppId::Seed);
        assert_eq!(store.next_appid().value(), 4_144_831);
    }

    #[test]
    fn follows_existing_maximum() {
        let (store, _dir) = setup(Some(SCHEMA));
        store
            .conn
            .execute_batch(
                "INSERT INTO jogos (appid, nome) VALUES (10, 'a');
                 INSERT INTO jogos (appid, nome) VALUES (730, 'b');",
            )
            .unwrap();
        assert_eq!(store.next_appid(), NextAppId::Following(731));
    }

    #[test]
    fn non_positive_maximum_uses_seed() {
        let (store, _dir) = setup(Some(SCHEMA));
        store
            .conn
            .execute("INSERT INTO jogos (appid, nome) VALUES (-5, 'neg')", [])
            .unwrap();
        assert_eq!(store.next_appid(), NextAppId::Seed);
    }

    const LOOSE_SCHEMA: &str = "CREATE TABLE jogos (
        appid INTEGER,
        nome TEXT NOT NULL,
        imagem_url TEXT,
        tipo TEXT
    )";

    #[test]
    fn real_maximum_is_truncated() {
        let (store, _dir) = setup(Some(LOOSE_SCHEMA));
        store
            .conn
            .execute_batch(
                "INSERT INTO jogos (appid, nome) VALUES (3, 'i');
                 INSERT INTO jogos (appid, nome) VALUES (10.5, 'r');",
            )
            .unwrap();
        assert_eq!(store.next_appid(), NextAppId::Following(11));
    }

    #[test]
    fn text_maximum_uses_seed() {
        let (store, _dir) = setup(Some(LOOSE_SCHEMA));
        store
            .conn
            .execute_batch(
                "INSERT INTO jogos (appid, nome) VALUES (730, 'i');
                 INSERT INTO jogos (appid, nome) VALUES ('abc', 't');",
            )
            .unwrap();
        assert_eq!(store.next_appid(), NextAppId::Seed);
    }

    #[test]
    fn missing_table_uses_seed() {
        let (store, _dir) = setup(None);
        assert!(!store.has_table().unwrap());
        assert_eq!(store.next_appid(), NextAppId::Seed);
    }

    #[test]
    fn overflowing_maximum_uses_seed() {
        let (store, _dir) = setup(Some(SCHEMA));
        store
            .conn
            .execute(
                "INSERT INTO jogos (appid, nome) VALUES (?1, 'max')",
                params![i64::MAX],
            )
            .unwrap();
        assert_eq!(store.next_appid(), NextAppId::Seed);
    }

    #[test]
    fn insert_round_trips() {
        let (store, _dir) = setup(Some(SCHEMA));
        assert!(store.has_table().unwrap());

        let appid = store.next_appid().value();
        let row = store.insert(appid, game("hl2")).unwrap();

        assert_eq!(row.appid, SEED_APPID);
        assert_eq!(row.category, "custom");
        assert_eq!(
            fetch(&store, appid),
            Some((
                "hl2".to_string(),
                "http://example.com/hl2.jpg".to_string(),
                "custom".to_string()
            ))
        );
        assert_eq!(store.next_appid(), NextAppId::Following(SEED_APPID + 1));
    }

    #[test]
    fn insert_without_table_fails_to_prepare() {
        let (store, _dir) = setup(None);
        assert!(matches!(
            store.insert(SEED_APPID, game("x")),
            Err(IngestError::InsertPrepare(_))
        ));
    }

    #[test]
    fn duplicate_appid_fails_to_execute() {
        let (store, _dir) = setup(Some(SCHEMA));
        store.insert(42, game("first")).unwrap();

        let err = store.insert(42, game("second")).unwrap_err();
        assert!(matches!(err, IngestError::InsertExec(_)));
        assert_eq!(fetch(&store, 42).unwrap().0, "first");
    }

    #[test]
    fn unopenable_path_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("database.db");
        assert!(matches!(
            GameStore::open(&path),
            Err(IngestError::StorageOpen(_))
        ));
    }
}
