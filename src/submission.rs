//! Submission records.
//!
//! A [`NewSubmission`] only exists after a form passed validation; it is
//! what the repository inserts. A [`StoredSubmission`] is what comes back,
//! with the assigned row id and timestamp. Neither is ever modified.

use serde::Serialize;

use crate::profile::Profile;

/// Name, email and phone of one party on the rich form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Persisted part of a rich-profile request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichSubmission {
    /// Discovery date, `YYYY-MM-DD`.
    pub date: String,
    pub business_owner: String,
    pub department: String,
    pub requestor: Contact,
    pub manager: Contact,
    pub director: Contact,
}

/// Minimal-profile submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimalSubmission {
    pub name: String,
    pub email: String,
}

/// A validated submission ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "profile", rename_all = "lowercase")]
pub enum NewSubmission {
    Rich(RichSubmission),
    Minimal(MinimalSubmission),
}

impl NewSubmission {
    pub fn profile(&self) -> Profile {
        match self {
            NewSubmission::Rich(_) => Profile::Rich,
            NewSubmission::Minimal(_) => Profile::Minimal,
        }
    }

    /// Short human label used in logs and listings.
    pub fn summary(&self) -> String {
        match self {
            NewSubmission::Rich(s) => format!("{} ({})", s.business_owner, s.department),
            NewSubmission::Minimal(s) => format!("{} <{}>", s.name, s.email),
        }
    }
}

/// A row read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredSubmission {
    pub id: i64,
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub submitted_at: String,
    #[serde(flatten)]
    pub submission: NewSubmission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_profile() {
        let minimal = NewSubmission::Minimal(MinimalSubmission {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
        });
        assert_eq!(minimal.profile(), Profile::Minimal);
        assert_eq!(minimal.summary(), "Jane <jane@example.com>");
    }

    #[test]
    fn test_stored_submission_serializes_flat() {
        let stored = StoredSubmission {
            id: 7,
            submitted_at: "2026-01-24T10:00:00Z".to_string(),
            submission: NewSubmission::Minimal(MinimalSubmission {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            }),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["profile"], "minimal");
        assert_eq!(json["name"], "Jane");
    }
}
