//! Prompt template rendering.
//!
//! Templates use the same syntax as the prompts this core was designed around:
//! `{{var}}` for substitution, `{{{var}}}` for pre-serialized (raw) values, and
//! `{{#if var}}...{{/if}}` for clauses that must be omitted entirely when the
//! variable is absent. Rendering is a pure function of (template, variables).

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Error;

/// The variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct VarBag {
    vars: HashMap<String, String>,
}

impl VarBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain text variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Set an optional variable; `None` leaves the bag unchanged, so any
    /// `{{#if ...}}` clause guarding it is dropped at render time.
    pub fn set_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Serialize a structured value and store it for raw `{{{var}}}` embedding,
    /// so the backend receives syntactically valid JSON inside the prompt.
    pub fn set_json<T: Serialize>(self, name: impl Into<String>, value: &T) -> Result<Self, Error> {
        let serialized = serde_json::to_string_pretty(value)?;
        Ok(self.set(name, serialized))
    }

    fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// A named prompt template.
#[derive(Debug, Clone)]
pub struct Template {
    id: String,
    body: String,
}

impl Template {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render the template against a variable bag.
    ///
    /// A variable referenced outside a conditional clause must be present;
    /// otherwise this fails with [`Error::Prompt`] rather than emitting a
    /// placeholder.
    pub fn render(&self, vars: &VarBag) -> Result<String, Error> {
        let body = self.resolve_conditionals(vars)?;
        self.substitute(&body, vars)
    }

    fn resolve_conditionals(&self, vars: &VarBag) -> Result<String, Error> {
        let mut out = String::new();
        let mut rest = self.body.as_str();
        while let Some(start) = rest.find("{{#if ") {
            out.push_str(&rest[..start]);
            let after = &rest[start + "{{#if ".len()..];
            let close = after.find("}}").ok_or_else(|| {
                Error::Prompt(format!("template '{}': unterminated conditional", self.id))
            })?;
            let guard = after[..close].trim();
            let inner = &after[close + 2..];
            let end = inner.find("{{/if}}").ok_or_else(|| {
                Error::Prompt(format!("template '{}': missing closing conditional", self.id))
            })?;
            if vars.contains(guard) {
                out.push_str(&inner[..end]);
            }
            rest = &inner[end + "{{/if}}".len()..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn substitute(&self, body: &str, vars: &VarBag) -> Result<String, Error> {
        let mut out = String::new();
        let mut rest = body;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            // Raw and plain substitution behave identically here: values are
            // plain text, never markup-escaped.
            let (open, close) = if rest.starts_with("{{{") {
                ("{{{", "}}}")
            } else {
                ("{{", "}}")
            };
            let after = &rest[open.len()..];
            let end = after.find(close).ok_or_else(|| {
                Error::Prompt(format!("template '{}': unterminated variable", self.id))
            })?;
            let name = after[..end].trim();
            let value = vars.get(name).ok_or_else(|| {
                Error::Prompt(format!(
                    "template '{}': missing variable '{}'",
                    self.id, name
                ))
            })?;
            out.push_str(value);
            rest = &after[end + close.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
