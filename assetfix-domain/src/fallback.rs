//! Bootstraps the base-URL convention into scripts that predate it.
//!
//! The generic catalogs only normalize an existing declaration. A handful of
//! old scripts define an endpoint table without ever declaring the base-URL
//! variable; this rule inserts the declaration and prefixes the endpoints it
//! knows about.

/// A literal endpoint rewrite applied after the declaration is injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRewrite {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct InjectionFallback {
    name: String,
    label: String,
    file_name: String,
    marker: String,
    variable: String,
    declaration: String,
    endpoints: Vec<EndpointRewrite>,
    owner: Option<String>,
}

impl InjectionFallback {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        file_name: impl Into<String>,
        marker: impl Into<String>,
        variable: impl Into<String>,
        declaration: impl Into<String>,
        endpoints: Vec<EndpointRewrite>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            file_name: file_name.into(),
            marker: marker.into(),
            variable: variable.into(),
            declaration: declaration.into(),
            endpoints,
            owner: None,
        }
    }

    /// Ties the fallback to the rule set that normalizes the same
    /// declaration; a file that set changed is never injected.
    pub fn owned_by(mut self, rule_set: impl Into<String>) -> Self {
        self.owner = Some(rule_set.into());
        self
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn endpoints(&self) -> &[EndpointRewrite] {
        &self.endpoints
    }

    /// True when the file is in scope, carries the legacy marker, and never
    /// mentions the canonical variable.
    pub fn should_fire(&self, file_name: &str, text: &str) -> bool {
        file_name == self.file_name
            && text.contains(self.marker.as_str())
            && !text.contains(self.variable.as_str())
    }

    /// The injected text, or `None` when the fallback does not apply.
    ///
    /// The declaration goes immediately before the first marker, indented
    /// like the marker's line.
    pub fn apply(&self, file_name: &str, text: &str) -> Option<String> {
        if !self.should_fire(file_name, text) {
            return None;
        }
        let at = text.find(self.marker.as_str())?;

        let line_start = text[..at].rfind('\n').map_or(0, |i| i + 1);
        let indent: String = text[line_start..at]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();

        let mut out = String::with_capacity(text.len() + self.declaration.len() + indent.len() + 1);
        out.push_str(&text[..at]);
        out.push_str(&self.declaration);
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&text[at..]);

        for endpoint in &self.endpoints {
            out = out.replace(endpoint.from.as_str(), &endpoint.to);
        }
        Some(out)
    }
}
