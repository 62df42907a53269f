use anyhow::Result;

use crate::profile::Profile;
use crate::submission::{NewSubmission, StoredSubmission};

/// A trait for persisting validated submissions.
///
/// Submissions are append-only: there is no update or delete. Each insert
/// is atomic, so a failed insert leaves nothing behind.
pub trait SubmissionRepository: Send + Sync {
    /// Insert a submission and return its row id.
    fn insert(&self, submission: &NewSubmission) -> Result<i64>;

    /// List stored submissions for a profile, newest first.
    fn list(&self, profile: Profile, limit: Option<usize>) -> Result<Vec<StoredSubmission>>;

    /// Number of stored submissions for a profile.
    fn count(&self, profile: Profile) -> Result<usize>;
}
