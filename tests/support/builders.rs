use intake::form::FormData;

/// Builds rich-profile payloads, valid unless told otherwise.
pub struct RichFormBuilder {
    pairs: Vec<(String, String)>,
}

impl Default for RichFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RichFormBuilder {
    pub fn new() -> Self {
        let pairs = [
            ("date", "2024-02-29"),
            ("name", "Jane Owner"),
            ("department", "Infrastructure"),
            ("requestor_name", "Rita Requestor"),
            ("email", "rita@example.com"),
            ("phone", "555-123-4567"),
            ("manager_name", "Mark Manager"),
            ("manager_email", "mark@example.com"),
            ("manager_phone", "(555) 987 6543"),
            ("director_name", "Dana Director"),
            ("director_email", "dana@example.com"),
            ("director_phone", "+15550001111"),
            ("FCSO", "on"),
            ("MAC_NSM", "on"),
            ("high", "on"),
            ("fqdn[]", "web01.example.com"),
            ("ip_address[]", "10.1.2.3"),
            ("reasons[]", "vendor_delay"),
            ("businessJustification", "Vendor patch not yet available."),
            ("risks", "Exposure on internal network only."),
            ("mitigatingControls", "Host firewall restricts access."),
            ("complianceDate", "2024-06-30"),
            ("resourcesRequired", "Two engineer days."),
            ("milestone_task[]", "Apply vendor patch"),
            ("planned_completion[]", "2024-05-01"),
            ("poc_completing[]", "Ops team"),
        ];
        Self {
            pairs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Replace every value of `key` with `value`.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Drop every value of `key`.
    pub fn without(mut self, key: &str) -> Self {
        self.pairs.retain(|(k, _)| k != key);
        self
    }

    /// Append another value for a list field.
    pub fn push(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Submit exactly `count` RCA categories.
    pub fn reasons(mut self, count: usize) -> Self {
        self.pairs.retain(|(k, _)| k != "reasons[]");
        for i in 0..count {
            self.pairs
                .push(("reasons[]".to_string(), format!("category_{}", i + 1)));
        }
        self
    }

    pub fn build(self) -> FormData {
        FormData::from_pairs(self.pairs)
    }

    /// URL-encoded body.
    pub fn encode(self) -> String {
        self.build().encode()
    }
}

/// Minimal-profile payload.
pub fn minimal_form(name: &str, email: &str) -> FormData {
    FormData::from_pairs([("name", name), ("email", email)])
}
