use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use crate::profile::Profile;
use crate::submission::{NewSubmission, StoredSubmission};

use super::submission_repository::SubmissionRepository;

/// In-memory implementation of SubmissionRepository for testing.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    rows: Mutex<Vec<StoredSubmission>>,
    fail_inserts: AtomicBool,
}

impl InMemorySubmissionRepository {
    /// Create a new empty InMemorySubmissionRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose inserts always fail, to exercise the
    /// persistence-error path.
    pub fn failing() -> Self {
        let repo = Self::new();
        repo.set_fail_inserts(true);
        repo
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored row, oldest first.
    pub fn all(&self) -> Vec<StoredSubmission> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredSubmission>>> {
        self.rows
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory repository lock poisoned"))
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, submission: &NewSubmission) -> Result<i64> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            anyhow::bail!("simulated storage failure");
        }

        let mut rows = self.rows()?;
        let id = rows.len() as i64 + 1;
        rows.push(StoredSubmission {
            id,
            submitted_at: crate::utc_now_iso(),
            submission: submission.clone(),
        });
        Ok(id)
    }

    fn list(&self, profile: Profile, limit: Option<usize>) -> Result<Vec<StoredSubmission>> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.submission.profile() == profile)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn count(&self, profile: Profile) -> Result<usize> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .filter(|row| row.submission.profile() == profile)
            .count())
    }
}
