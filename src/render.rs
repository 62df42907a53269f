//! HTML rendering of the intake form.
//!
//! Templates are embedded at compile time. A theme directory can replace
//! them; it must provide the template for the served profile.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::Tera;

use crate::flash::FlashMessage;
use crate::profile::Profile;
use crate::validation::keys;

/// Embedded default templates
pub mod embedded {
    pub const BASE_HTML: &str = include_str!("../templates/form/base.html");
    pub const RICH_HTML: &str = include_str!("../templates/form/rich.html");
    pub const MINIMAL_HTML: &str = include_str!("../templates/form/minimal.html");
}

/// RCA categories offered on the rich form, as (value, label).
pub const RCA_CATEGORIES: [(&str, &str); 7] = [
    ("vendor_delay", "Vendor patch not available"),
    ("legacy_dependency", "Legacy dependency"),
    ("business_critical", "Business-critical uptime"),
    ("resource_constraint", "Resource constraint"),
    ("compatibility", "Compatibility issue"),
    ("false_positive", "Suspected false positive"),
    ("other", "Other"),
];

#[derive(Debug, Clone, Serialize)]
struct Party {
    label: &'static str,
    name_key: &'static str,
    email_key: &'static str,
    phone_key: &'static str,
}

const PARTIES: [Party; 3] = [
    Party {
        label: "Requestor",
        name_key: keys::REQUESTOR_NAME,
        email_key: keys::REQUESTOR_EMAIL,
        phone_key: keys::REQUESTOR_PHONE,
    },
    Party {
        label: "Manager",
        name_key: keys::MANAGER_NAME,
        email_key: keys::MANAGER_EMAIL,
        phone_key: keys::MANAGER_PHONE,
    },
    Party {
        label: "Director",
        name_key: keys::DIRECTOR_NAME,
        email_key: keys::DIRECTOR_EMAIL,
        phone_key: keys::DIRECTOR_PHONE,
    },
];

#[derive(Debug, Clone, Serialize)]
struct ReasonOption {
    value: &'static str,
    label: &'static str,
}

/// Data for one rendered form page.
#[derive(Debug, Clone, Default)]
pub struct FormPage {
    pub flashes: Vec<FlashMessage>,
    /// Previously submitted scalar values, keyed by form field.
    pub values: HashMap<String, String>,
}

/// Renders the form for one profile.
pub struct FormRenderer {
    tera: Tera,
    profile: Profile,
    title: String,
    max_reasons: usize,
}

impl FormRenderer {
    /// Create a renderer, loading templates from `theme_dir` when it exists.
    pub fn new(
        profile: Profile,
        title: impl Into<String>,
        max_reasons: usize,
        theme_dir: Option<&Path>,
    ) -> Result<Self> {
        let tera = match theme_dir {
            Some(dir) if dir.exists() => {
                let pattern = format!("{}/**/*.html", dir.display());
                Tera::new(&pattern)
                    .with_context(|| format!("Failed to load templates from {}", dir.display()))?
            }
            _ => Self::create_embedded_tera()?,
        };

        if !tera.get_template_names().any(|name| name == profile.template()) {
            anyhow::bail!("Template '{}' not found", profile.template());
        }

        Ok(Self {
            tera,
            profile,
            title: title.into(),
            max_reasons,
        })
    }

    /// Create a Tera instance with embedded templates
    fn create_embedded_tera() -> Result<Tera> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", embedded::BASE_HTML),
            ("rich.html", embedded::RICH_HTML),
            ("minimal.html", embedded::MINIMAL_HTML),
        ])
        .context("Failed to parse embedded templates")?;

        Ok(tera)
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Render the form page.
    pub fn render(&self, page: &FormPage) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("title", &self.title);
        context.insert("profile", self.profile.as_str());
        context.insert("flashes", &page.flashes);
        context.insert("values", &self.values_with_blanks(&page.values));
        context.insert("parties", &PARTIES);
        context.insert("environments", &keys::ENVIRONMENTS);
        context.insert("mac_environments", &keys::MAC_ENVIRONMENTS);
        context.insert("severities", &keys::SEVERITIES);
        context.insert("max_reasons", &self.max_reasons);
        let reasons: Vec<ReasonOption> = RCA_CATEGORIES
            .iter()
            .map(|&(value, label)| ReasonOption { value, label })
            .collect();
        context.insert("reasons", &reasons);

        self.tera
            .render(self.profile.template(), &context)
            .with_context(|| format!("Failed to render {}", self.profile.template()))
    }

    /// Every scalar field the template reads, blank unless submitted.
    fn values_with_blanks(&self, submitted: &HashMap<String, String>) -> HashMap<String, String> {
        let known: Vec<&str> = match self.profile {
            Profile::Rich => {
                let mut fields = vec![
                    keys::DATE,
                    keys::BUSINESS_OWNER,
                    keys::DEPARTMENT,
                    keys::BUSINESS_JUSTIFICATION,
                    keys::RISKS,
                    keys::MITIGATING_CONTROLS,
                    keys::COMPLIANCE_DATE,
                    keys::RESOURCES_REQUIRED,
                ];
                for party in &PARTIES {
                    fields.extend([party.name_key, party.email_key, party.phone_key]);
                }
                fields.extend(keys::ENVIRONMENTS);
                fields.extend(keys::MAC_ENVIRONMENTS);
                fields.extend(keys::SEVERITIES);
                fields
            }
            Profile::Minimal => vec![keys::MINIMAL_NAME, keys::MINIMAL_EMAIL],
        };

        let mut values: HashMap<String, String> =
            known.into_iter().map(|k| (k.to_string(), String::new())).collect();
        values.extend(submitted.iter().map(|(k, v)| (k.clone(), v.clone())));
        values
    }
}
