//! Storage backends for validated submissions.

pub mod in_memory;
pub mod sqlite;
pub mod submission_repository;

pub use in_memory::InMemorySubmissionRepository;
pub use sqlite::SqliteSubmissionRepository;
pub use submission_repository::SubmissionRepository;
