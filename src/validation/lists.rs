//! Cross-field checks over parallel list inputs and grouped selections.

use super::fields::{validate_date, validate_ip_address, validate_non_empty};

/// One (task, planned completion, point of contact) triple of a remediation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneRow<'a> {
    pub task: &'a str,
    pub planned_completion: &'a str,
    pub point_of_contact: &'a str,
}

impl MilestoneRow<'_> {
    /// A row is valid when task and contact are present and the date parses.
    pub fn is_valid(&self) -> bool {
        validate_non_empty(self.task)
            && validate_date(self.planned_completion)
            && validate_non_empty(self.point_of_contact)
    }
}

/// Zip three parallel milestone lists into rows, or `None` when their
/// lengths differ.
pub fn milestone_rows<'a>(
    tasks: &[&'a str],
    completions: &[&'a str],
    contacts: &[&'a str],
) -> Option<Vec<MilestoneRow<'a>>> {
    if tasks.len() != completions.len() || tasks.len() != contacts.len() {
        return None;
    }

    Some(
        tasks
            .iter()
            .zip(completions)
            .zip(contacts)
            .map(|((&task, &planned_completion), &point_of_contact)| MilestoneRow {
                task,
                planned_completion,
                point_of_contact,
            })
            .collect(),
    )
}

/// True iff the three lists align and every row is valid.
pub fn validate_milestones(tasks: &[&str], completions: &[&str], contacts: &[&str]) -> bool {
    milestone_rows(tasks, completions, contacts)
        .is_some_and(|rows| rows.iter().all(MilestoneRow::is_valid))
}

/// True iff `min <= reasons.len() <= max`.
pub fn validate_rca_category(reasons: &[&str], min: usize, max: usize) -> bool {
    (min..=max).contains(&reasons.len())
}

/// Problems found in the affected-host rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostRowIssues {
    /// `fqdn[]` and `ip_address[]` have different lengths.
    pub length_mismatch: bool,
    /// Some supplied FQDN or IP is blank.
    pub blank_entry: bool,
    /// Some non-blank IP is not a valid dotted quad.
    pub malformed_ip: bool,
}

impl HostRowIssues {
    pub fn is_clean(&self) -> bool {
        !self.length_mismatch && !self.blank_entry && !self.malformed_ip
    }
}

/// Inspect the affected-host lists. Empty lists are acceptable.
pub fn inspect_host_rows(fqdns: &[&str], ips: &[&str]) -> HostRowIssues {
    HostRowIssues {
        length_mismatch: fqdns.len() != ips.len(),
        blank_entry: fqdns.iter().chain(ips).any(|v| !validate_non_empty(v)),
        malformed_ip: ips
            .iter()
            .any(|ip| validate_non_empty(ip) && !validate_ip_address(ip.trim())),
    }
}

/// True iff the host lists are clean.
pub fn validate_host_rows(fqdns: &[&str], ips: &[&str]) -> bool {
    inspect_host_rows(fqdns, ips).is_clean()
}

/// True iff at least one flag is set.
pub fn any_selected(flags: &[bool]) -> bool {
    flags.iter().any(|f| *f)
}
