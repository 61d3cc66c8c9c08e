//! # RailMitra core
//!
//! The structured-extraction core of an AI travel assistant: it turns a
//! free-text request ("a 5-day trip to Kerala") into a schema-validated travel
//! artifact — an itinerary, hotel list, train/flight options, PNR status, or
//! live train status — by delegating content generation to a generative
//! backend and validating the reply against a fixed output schema.
//!
//! ## Features
//!
//! - **Schema-validated generation**: every flow declares one output schema;
//!   field descriptions steer the model and the same declaration validates its
//!   reply. Non-conforming replies fail, never degrade.
//! - **Stateless flows**: every request is self-contained; independent
//!   requests run concurrently with no shared mutable state.
//! - **Uniform boundary**: one dispatcher validates raw form input, routes by
//!   query-type tag, and folds every failure into a plain response envelope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use railmitra::prelude::*;
//!
//! # async fn run() -> Result<(), railmitra::Error> {
//! let backend = Arc::new(GeminiClient::new(GeminiConfig::from_env()?));
//! let search = Arc::new(SerpApiClient::new(SearchConfig::from_env()?));
//! let dispatcher = Dispatcher::new(backend, search);
//!
//! let response = dispatcher
//!     .handle(TravelRequest::new("a 5-day trip to Kerala", "full_trip"))
//!     .await;
//! assert!(response.error.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`schema`]: declarative output schemas and structural validation
//! - [`prompt`]: prompt templates and variable rendering
//! - [`llm`]: the generative backend trait, the structured-generation choke
//!   point, and the Gemini client
//! - [`search`]: the search provider trait and SerpApi client
//! - [`plan`]: the typed artifacts returned to callers
//! - [`flows`]: one orchestrator per use case
//! - [`dispatch`]: input validation, routing, and error normalization

pub mod dispatch;
pub mod error;
pub mod flows;
pub mod llm;
pub mod plan;
pub mod prompt;
pub mod schema;
pub mod search;

// Core types
pub use dispatch::{Dispatcher, PlanResponse, QueryType, TravelRequest, ValidatedQuery};
pub use error::Error;
pub use flows::TransportMode;
pub use llm::{GeminiClient, GeminiConfig, GenerativeBackend, StructuredGenerator};
pub use plan::StructuredPlan;
pub use prompt::{Template, VarBag};
pub use schema::{FieldKind, FieldSpec, OutputSchema};
pub use search::{SearchConfig, SearchProvider, SerpApiClient};

/// Everything needed to wire the core into a caller.
///
/// # Example
/// ```rust
/// use railmitra::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        Dispatcher,
        Error,
        GeminiClient,
        GeminiConfig,
        GenerativeBackend,
        PlanResponse,
        QueryType,
        SearchConfig,
        SearchProvider,
        SerpApiClient,
        StructuredPlan,
        TransportMode,
        TravelRequest,
    };
}

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
