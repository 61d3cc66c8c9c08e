//! Generative backend interface and the structured-generation choke point.
//!
//! Every flow talks to the model through [`StructuredGenerator`], which renders
//! the prompt, appends the schema's steering block, makes exactly one backend
//! call, and validates the reply against the schema. There is no retry, no
//! timeout and no shared mutable state at this layer; independent requests may
//! run concurrently.

pub mod gemini;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::prompt::{Template, VarBag};
use crate::schema::OutputSchema;

pub use gemini::{GeminiClient, GeminiConfig};

/// Capability interface over the external generative service.
///
/// Implementations must be fully self-contained per call: no state is shared
/// between invocations, so one client can serve unrelated requests
/// concurrently. A call either returns the model's raw text reply or fails;
/// nondeterminism is expected and callers assert structure, not exact values.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// The single choke point between flows and the generative backend.
pub struct StructuredGenerator<'a> {
    backend: &'a dyn GenerativeBackend,
}

impl<'a> StructuredGenerator<'a> {
    pub fn new(backend: &'a dyn GenerativeBackend) -> Self {
        Self { backend }
    }

    /// Render, invoke once, and validate the reply against `schema`.
    ///
    /// Backend failures propagate immediately; a non-conforming reply is an
    /// [`Error::SchemaViolation`], never a best-effort partial value. An empty
    /// reply for an array-rooted schema normalizes to an empty list.
    pub async fn generate_value(
        &self,
        template: &Template,
        vars: &VarBag,
        schema: &OutputSchema,
    ) -> Result<Value, Error> {
        let mut prompt = template.render(vars)?;
        prompt.push_str("\n\n");
        prompt.push_str(&schema.steering_block());

        log::debug!(
            "invoking backend for template '{}' with schema '{}'",
            template.id(),
            schema.name
        );
        let reply = self.backend.generate(&prompt).await?;

        let text = strip_code_fences(&reply);
        let value: Value = serde_json::from_str(text).map_err(|e| {
            Error::SchemaViolation(format!(
                "{}: backend reply is not valid JSON: {}",
                schema.name, e
            ))
        })?;
        schema.validate(&value)
    }

    /// Like [`generate_value`](Self::generate_value), deserialized into a
    /// typed artifact.
    pub async fn generate<T: DeserializeOwned>(
        &self,
        template: &Template,
        vars: &VarBag,
        schema: &OutputSchema,
    ) -> Result<T, Error> {
        let value = self.generate_value(template, vars, schema).await?;
        serde_json::from_value(value).map_err(|e| {
            Error::SchemaViolation(format!(
                "{}: validated reply did not match the typed artifact: {}",
                schema.name, e
            ))
        })
    }
}

/// Models wrap JSON in Markdown fences often enough that the choke point
/// strips them before parsing.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence, if any.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use serde_json::json;

    struct CannedBackend {
        reply: String,
    }

    #[async_trait]
    impl GenerativeBackend for CannedBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, Error> {
            Ok(self.reply.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl GenerativeBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, Error> {
            Err(Error::Backend("HTTP 503: service unavailable".to_string()))
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_fenced_reply_is_validated() {
        let backend = CannedBackend {
            reply: "```json\n[{\"title\": \"Kerala\", \"url\": \"https://example.com\", \
                    \"description\": \"Backwaters.\", \"extra\": true}]\n```"
                .to_string(),
        };
        let generator = StructuredGenerator::new(&backend);
        let template = Template::new("t", "Extract results for \"{{query}}\".");
        let vars = VarBag::new().set("query", "Kerala");
        let value = generator
            .generate_value(&template, &vars, &schema::search_results())
            .await
            .unwrap();
        // Undeclared fields dropped during validation.
        assert_eq!(
            value,
            json!([{"title": "Kerala", "url": "https://example.com", "description": "Backwaters."}])
        );
    }

    #[tokio::test]
    async fn test_non_json_reply_is_a_schema_violation() {
        let backend = CannedBackend {
            reply: "Sorry, I cannot help with that.".to_string(),
        };
        let generator = StructuredGenerator::new(&backend);
        let template = Template::new("t", "{{query}}");
        let vars = VarBag::new().set("query", "hotels in Goa");
        let err = generator
            .generate_value(&template, &vars, &schema::hotel_plan())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_unchanged() {
        let generator = StructuredGenerator::new(&FailingBackend);
        let template = Template::new("t", "{{query}}");
        let vars = VarBag::new().set("query", "anything");
        let err = generator
            .generate_value(&template, &vars, &schema::search_results())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[tokio::test]
    async fn test_steering_block_reaches_the_backend() {
        use std::sync::Mutex;

        struct RecordingBackend {
            prompts: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl GenerativeBackend for RecordingBackend {
            async fn generate(&self, prompt: &str) -> Result<String, Error> {
                self.prompts.lock().unwrap().push(prompt.to_string());
                Ok("[]".to_string())
            }
        }

        let backend = RecordingBackend {
            prompts: Mutex::new(Vec::new()),
        };
        let generator = StructuredGenerator::new(&backend);
        let template = Template::new("t", "Query: {{query}}");
        let vars = VarBag::new().set("query", "Kerala");
        generator
            .generate_value(&template, &vars, &schema::search_results())
            .await
            .unwrap();

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Respond ONLY with a valid JSON array"));
        assert!(prompts[0].contains("The title of the search result."));
    }
}
