//! Profile-driven validation engine.
//!
//! One pass over the form both gates persistence and collects every
//! message, so a submission is stored if and only if the returned error
//! list is empty.

use crate::form::FormData;
use crate::profile::{Profile, ValidationRules};
use crate::submission::{Contact, MinimalSubmission, NewSubmission, RichSubmission};

use super::fields::{
    validate_date, validate_email, validate_name, validate_non_empty, validate_phone,
    within_length, EmailPolicy, NamePolicy, PhonePolicy, MAX_DATE_CHARS, MAX_EMAIL_CHARS,
    MAX_NAME_CHARS, MAX_PHONE_CHARS,
};
use super::lists::{any_selected, inspect_host_rows, milestone_rows, validate_rca_category};
use super::{FieldError, ValidationErrors};

/// Form keys, as posted by the embedded templates.
pub mod keys {
    pub const DATE: &str = "date";
    pub const BUSINESS_OWNER: &str = "name";
    pub const DEPARTMENT: &str = "department";
    pub const REQUESTOR_NAME: &str = "requestor_name";
    pub const REQUESTOR_EMAIL: &str = "email";
    pub const REQUESTOR_PHONE: &str = "phone";
    pub const MANAGER_NAME: &str = "manager_name";
    pub const MANAGER_EMAIL: &str = "manager_email";
    pub const MANAGER_PHONE: &str = "manager_phone";
    pub const DIRECTOR_NAME: &str = "director_name";
    pub const DIRECTOR_EMAIL: &str = "director_email";
    pub const DIRECTOR_PHONE: &str = "director_phone";

    pub const ENVIRONMENTS: [&str; 2] = ["FCSO", "NSM"];
    pub const MAC_ENVIRONMENTS: [&str; 2] = ["MAC_FCSO", "MAC_NSM"];
    pub const SEVERITIES: [&str; 5] = ["critical", "high", "moderate", "low", "non_security"];
    pub const FQDNS: &str = "fqdn[]";
    pub const IP_ADDRESSES: &str = "ip_address[]";

    pub const REASONS: &str = "reasons[]";
    pub const BUSINESS_JUSTIFICATION: &str = "businessJustification";
    pub const RISKS: &str = "risks";
    pub const MITIGATING_CONTROLS: &str = "mitigatingControls";
    pub const COMPLIANCE_DATE: &str = "complianceDate";
    pub const RESOURCES_REQUIRED: &str = "resourcesRequired";
    pub const MILESTONE_TASKS: &str = "milestone_task[]";
    pub const PLANNED_COMPLETIONS: &str = "planned_completion[]";
    pub const POC_COMPLETINGS: &str = "poc_completing[]";

    pub const MINIMAL_NAME: &str = "name";
    pub const MINIMAL_EMAIL: &str = "email";
}

/// Validate `form` under `profile` and `rules`.
pub fn validate_submission(
    profile: Profile,
    rules: &ValidationRules,
    form: &FormData,
) -> Result<NewSubmission, ValidationErrors> {
    match profile {
        Profile::Rich => validate_rich(rules, form).map(NewSubmission::Rich),
        Profile::Minimal => validate_minimal(rules, form).map(NewSubmission::Minimal),
    }
}

/// Validate the minimal name/email form.
pub fn validate_minimal(
    rules: &ValidationRules,
    form: &FormData,
) -> Result<MinimalSubmission, ValidationErrors> {
    let mut pass = Pass::new(form);

    let name = pass.field(
        keys::MINIMAL_NAME,
        "Name",
        |v| validate_name(v, rules.name),
        name_message(rules.name, "your name"),
    );
    let email = pass.field(
        keys::MINIMAL_EMAIL,
        "Email",
        |v| validate_email(v, rules.email),
        email_message(rules.email, None),
    );

    pass.finish(MinimalSubmission { name, email })
}

/// Validate the rich request form.
pub fn validate_rich(
    rules: &ValidationRules,
    form: &FormData,
) -> Result<RichSubmission, ValidationErrors> {
    let mut pass = Pass::new(form);

    let date = pass.field(
        keys::DATE,
        "Discovery date",
        validate_date,
        "Please enter a valid discovery date (YYYY-MM-DD).",
    );
    let business_owner = pass.field(
        keys::BUSINESS_OWNER,
        "Business owner",
        |v| validate_name(v, rules.name),
        &name_message(rules.name, "the business owner"),
    );
    let department = pass.field(
        keys::DEPARTMENT,
        "Department",
        validate_non_empty,
        "Please enter the department.",
    );

    let requestor = pass.contact(
        rules,
        "Requestor",
        [keys::REQUESTOR_NAME, keys::REQUESTOR_EMAIL, keys::REQUESTOR_PHONE],
    );
    let manager = pass.contact(
        rules,
        "Manager",
        [keys::MANAGER_NAME, keys::MANAGER_EMAIL, keys::MANAGER_PHONE],
    );
    let director = pass.contact(
        rules,
        "Director",
        [keys::DIRECTOR_NAME, keys::DIRECTOR_EMAIL, keys::DIRECTOR_PHONE],
    );

    pass.selection(
        &keys::ENVIRONMENTS,
        "environment",
        "Please select at least one environment.",
    );
    pass.selection(
        &keys::MAC_ENVIRONMENTS,
        "mac_environment",
        "Please select at least one MAC environment.",
    );
    pass.selection(
        &keys::SEVERITIES,
        "severity",
        "Please select at least one CVE severity level.",
    );
    pass.host_rows();

    let reasons = form.list(keys::REASONS);
    pass.errors.check(
        validate_rca_category(&reasons, rules.min_reasons, rules.max_reasons),
        keys::REASONS,
        &format!(
            "Please select between {} and {} RCA categories.",
            rules.min_reasons, rules.max_reasons
        ),
    );

    pass.field(
        keys::BUSINESS_JUSTIFICATION,
        "Business justification",
        validate_non_empty,
        "Please provide a business justification.",
    );
    pass.field(
        keys::RISKS,
        "Risks",
        validate_non_empty,
        "Please describe the risks.",
    );
    pass.field(
        keys::MITIGATING_CONTROLS,
        "Mitigating controls",
        validate_non_empty,
        "Please describe the mitigating controls.",
    );
    pass.field(
        keys::COMPLIANCE_DATE,
        "Compliance date",
        validate_date,
        "Please enter a valid compliance date (YYYY-MM-DD).",
    );
    pass.field(
        keys::RESOURCES_REQUIRED,
        "Resources required",
        validate_non_empty,
        "Please describe the resources required.",
    );
    pass.milestones();

    pass.finish(RichSubmission {
        date,
        business_owner,
        department,
        requestor,
        manager,
        director,
    })
}

fn name_message(policy: NamePolicy, whose: &str) -> String {
    match policy {
        NamePolicy::Permissive => format!("Please enter {}.", whose),
        NamePolicy::Strict => format!(
            "Please enter {} using letters only (at most {} characters).",
            whose,
            super::fields::STRICT_NAME_MAX_CHARS
        ),
    }
}

fn email_message(policy: EmailPolicy, whose: Option<&str>) -> String {
    let subject = whose.map(|w| format!(" for {}", w)).unwrap_or_default();
    match policy {
        EmailPolicy::Permissive => format!("Please enter a valid email address{}.", subject),
        EmailPolicy::Strict => format!(
            "Please enter a valid email address{} (at least {} characters).",
            subject,
            super::fields::STRICT_EMAIL_MIN_CHARS
        ),
    }
}

fn phone_message(policy: PhonePolicy, whose: &str) -> String {
    match policy {
        PhonePolicy::Loose => format!("Please enter a valid phone number for {}.", whose),
        PhonePolicy::Digits10 => {
            format!("Please enter a 10-digit phone number for {}.", whose)
        }
    }
}

/// Column width for keys that are persisted.
fn stored_width(key: &str) -> Option<usize> {
    match key {
        keys::DATE => Some(MAX_DATE_CHARS),
        keys::BUSINESS_OWNER
        | keys::DEPARTMENT
        | keys::REQUESTOR_NAME
        | keys::MANAGER_NAME
        | keys::DIRECTOR_NAME => Some(MAX_NAME_CHARS),
        keys::REQUESTOR_EMAIL | keys::MANAGER_EMAIL | keys::DIRECTOR_EMAIL => {
            Some(MAX_EMAIL_CHARS)
        }
        keys::REQUESTOR_PHONE | keys::MANAGER_PHONE | keys::DIRECTOR_PHONE => {
            Some(MAX_PHONE_CHARS)
        }
        _ => None,
    }
}

/// Accumulates values and errors for one validation pass.
struct Pass<'f> {
    form: &'f FormData,
    errors: ValidationErrors,
}

impl<'f> Pass<'f> {
    fn new(form: &'f FormData) -> Self {
        Self {
            form,
            errors: ValidationErrors::new(),
        }
    }

    /// Read a required scalar, trim it and check the trimmed value. Returns
    /// that value, or an empty string when the key is missing.
    fn field(
        &mut self,
        key: &str,
        label: &str,
        ok: impl Fn(&str) -> bool,
        message: impl AsRef<str>,
    ) -> String {
        match self.form.required(key, label) {
            Ok(value) => {
                let value = value.trim();
                match stored_width(key) {
                    Some(max) if !within_length(value, max) => {
                        let message = format!("{} must be at most {} characters.", label, max);
                        self.errors.push(FieldError::new(key, message));
                    }
                    _ => self.errors.check(ok(value), key, message.as_ref()),
                }
                value.to_string()
            }
            Err(missing) => {
                self.errors.push(missing);
                String::new()
            }
        }
    }

    fn contact(&mut self, rules: &ValidationRules, role: &str, fields: [&str; 3]) -> Contact {
        let [name_key, email_key, phone_key] = fields;
        let whose = format!("the {}", role.to_lowercase());
        Contact {
            name: self.field(
                name_key,
                &format!("{} name", role),
                |v| validate_name(v, rules.name),
                name_message(rules.name, &format!("{} name", whose)),
            ),
            email: self.field(
                email_key,
                &format!("{} email", role),
                |v| validate_email(v, rules.email),
                email_message(rules.email, Some(&whose)),
            ),
            phone: self.field(
                phone_key,
                &format!("{} phone", role),
                |v| validate_phone(v, rules.phone),
                phone_message(rules.phone, &whose),
            ),
        }
    }

    fn selection(&mut self, options: &[&str], field: &str, message: &str) {
        let flags: Vec<bool> = options.iter().map(|key| self.form.is_checked(key)).collect();
        self.errors.check(any_selected(&flags), field, message);
    }

    fn host_rows(&mut self) {
        let fqdns = self.form.list(keys::FQDNS);
        let ips = self.form.list(keys::IP_ADDRESSES);
        let issues = inspect_host_rows(&fqdns, &ips);

        self.errors.check(
            !issues.blank_entry,
            keys::FQDNS,
            "Please fill out all FQDN and IP address fields.",
        );
        self.errors.check(
            !issues.length_mismatch,
            keys::IP_ADDRESSES,
            "Each FQDN needs exactly one matching IP address.",
        );
        self.errors.check(
            !issues.malformed_ip,
            keys::IP_ADDRESSES,
            "Please enter IP addresses as four numbers from 0 to 255 separated by dots.",
        );
    }

    fn milestones(&mut self) {
        let tasks = self.form.list(keys::MILESTONE_TASKS);
        let completions = self.form.list(keys::PLANNED_COMPLETIONS);
        let contacts = self.form.list(keys::POC_COMPLETINGS);

        let Some(rows) = milestone_rows(&tasks, &completions, &contacts) else {
            self.errors.push(FieldError::new(
                keys::MILESTONE_TASKS,
                "Each milestone needs a task, a planned completion date and a point of contact.",
            ));
            return;
        };

        for (index, row) in rows.iter().enumerate() {
            if !row.is_valid() {
                self.errors.push(FieldError::new(
                    keys::MILESTONE_TASKS,
                    format!(
                        "Milestone {} needs a task, a valid planned completion date (YYYY-MM-DD) and a point of contact.",
                        index + 1
                    ),
                ));
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        self.errors.into_result(value)
    }
}
