//! SQLite-backed submission storage.
//!
//! One flat table per profile. Every column except the auto-increment id is
//! `TEXT NOT NULL`. The schema is created on open and is idempotent.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::profile::Profile;
use crate::submission::{
    Contact, MinimalSubmission, NewSubmission, RichSubmission, StoredSubmission,
};

use super::submission_repository::SubmissionRepository;

const CREATE_RICH: &str = "CREATE TABLE IF NOT EXISTS rich_submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    submitted_at TEXT NOT NULL,
    date TEXT NOT NULL,
    business_owner TEXT NOT NULL,
    department TEXT NOT NULL,
    requestor_name TEXT NOT NULL,
    requestor_email TEXT NOT NULL,
    requestor_phone TEXT NOT NULL,
    manager_name TEXT NOT NULL,
    manager_email TEXT NOT NULL,
    manager_phone TEXT NOT NULL,
    director_name TEXT NOT NULL,
    director_email TEXT NOT NULL,
    director_phone TEXT NOT NULL
)";

const CREATE_MINIMAL: &str = "CREATE TABLE IF NOT EXISTS minimal_submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    submitted_at TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL
)";

const RICH_COLUMNS: &str = "id, submitted_at, date, business_owner, department, \
    requestor_name, requestor_email, requestor_phone, \
    manager_name, manager_email, manager_phone, \
    director_name, director_email, director_phone";

const MINIMAL_COLUMNS: &str = "id, submitted_at, name, email";

/// Submission repository over a single SQLite connection.
pub struct SqliteSubmissionRepository {
    conn: Mutex<Connection>,
}

impl SqliteSubmissionRepository {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// Fresh private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn).context("Failed to initialize database schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_RICH, [])?;
    conn.execute(CREATE_MINIMAL, [])?;
    Ok(())
}

impl SubmissionRepository for SqliteSubmissionRepository {
    fn insert(&self, submission: &NewSubmission) -> Result<i64> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().context("Failed to begin transaction")?;
        let submitted_at = crate::utc_now_iso();

        match submission {
            NewSubmission::Rich(s) => {
                tx.execute(
                    "INSERT INTO rich_submissions (
                        submitted_at, date, business_owner, department,
                        requestor_name, requestor_email, requestor_phone,
                        manager_name, manager_email, manager_phone,
                        director_name, director_email, director_phone
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                    params![
                        submitted_at,
                        s.date,
                        s.business_owner,
                        s.department,
                        s.requestor.name,
                        s.requestor.email,
                        s.requestor.phone,
                        s.manager.name,
                        s.manager.email,
                        s.manager.phone,
                        s.director.name,
                        s.director.email,
                        s.director.phone,
                    ],
                )
                .context("Failed to insert rich submission")?;
            }
            NewSubmission::Minimal(s) => {
                tx.execute(
                    "INSERT INTO minimal_submissions (submitted_at, name, email)
                     VALUES (?1, ?2, ?3)",
                    params![submitted_at, s.name, s.email],
                )
                .context("Failed to insert minimal submission")?;
            }
        }

        let id = tx.last_insert_rowid();
        tx.commit().context("Failed to commit submission")?;
        debug!(id, profile = %submission.profile(), "submission row inserted");
        Ok(id)
    }

    fn list(&self, profile: Profile, limit: Option<usize>) -> Result<Vec<StoredSubmission>> {
        let conn = self.lock()?;
        let columns = match profile {
            Profile::Rich => RICH_COLUMNS,
            Profile::Minimal => MINIMAL_COLUMNS,
        };
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map(|n| n as i64).unwrap_or(-1);
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id DESC LIMIT ?1",
            columns,
            profile.table()
        );

        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("Failed to query {}", profile.table()))?;
        let rows = stmt
            .query_map(params![limit], |row| match profile {
                Profile::Rich => rich_from_row(row),
                Profile::Minimal => minimal_from_row(row),
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read rows from {}", profile.table()))?;

        Ok(rows)
    }

    fn count(&self, profile: Profile) -> Result<usize> {
        let conn = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {}", profile.table());
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("Failed to count {}", profile.table()))?;
        Ok(count as usize)
    }
}

fn rich_from_row(row: &Row<'_>) -> rusqlite::Result<StoredSubmission> {
    Ok(StoredSubmission {
        id: row.get(0)?,
        submitted_at: row.get(1)?,
        submission: NewSubmission::Rich(RichSubmission {
            date: row.get(2)?,
            business_owner: row.get(3)?,
            department: row.get(4)?,
            requestor: Contact {
                name: row.get(5)?,
                email: row.get(6)?,
                phone: row.get(7)?,
            },
            manager: Contact {
                name: row.get(8)?,
                email: row.get(9)?,
                phone: row.get(10)?,
            },
            director: Contact {
                name: row.get(11)?,
                email: row.get(12)?,
                phone: row.get(13)?,
            },
        }),
    })
}

fn minimal_from_row(row: &Row<'_>) -> rusqlite::Result<StoredSubmission> {
    Ok(StoredSubmission {
        id: row.get(0)?,
        submitted_at: row.get(1)?,
        submission: NewSubmission::Minimal(MinimalSubmission {
            name: row.get(2)?,
            email: row.get(3)?,
        }),
    })
}
