//! Request dispatcher: raw form input in, uniform response envelope out.
//!
//! Validation happens once at this boundary; every flow downstream receives
//! only the validated, strongly-typed variant. No error crosses this layer as
//! a panic or a propagated `Err` — failures are folded into the response.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::flows::{self, TransportMode};
use crate::llm::GenerativeBackend;
use crate::plan::StructuredPlan;
use crate::search::SearchProvider;

/// Generic caller-facing message for transport and schema failures. Full
/// detail goes to operator diagnostics only.
const GENERIC_FAILURE: &str = "Failed to generate a plan. Please try again.";

/// The discriminant selecting which flow handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    FullTrip,
    TrainInfo,
    FlightInfo,
    HotelInfo,
    PnrStatus,
    TrainStatus,
}

impl QueryType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "full_trip" => Some(QueryType::FullTrip),
            "train_info" => Some(QueryType::TrainInfo),
            "flight_info" => Some(QueryType::FlightInfo),
            "hotel_info" => Some(QueryType::HotelInfo),
            "pnr_status" => Some(QueryType::PnrStatus),
            "train_status" => Some(QueryType::TrainStatus),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            QueryType::FullTrip => "full_trip",
            QueryType::TrainInfo => "train_info",
            QueryType::FlightInfo => "flight_info",
            QueryType::HotelInfo => "hotel_info",
            QueryType::PnrStatus => "pnr_status",
            QueryType::TrainStatus => "train_status",
        }
    }
}

/// Raw form-shaped input, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRequest {
    /// Free-text destination or query.
    #[serde(default, alias = "destination")]
    pub query: String,
    /// Query-type tag, see [`QueryType`].
    #[serde(default)]
    pub query_type: String,
    /// Optional travel date (ISO-ish string, passed through to the prompt).
    #[serde(default)]
    pub date: Option<String>,
    /// 10-digit PNR, for `pnr_status` requests.
    #[serde(default)]
    pub pnr: Option<String>,
    /// Train number or name, for `train_status` requests.
    #[serde(default)]
    pub train: Option<String>,
}

impl TravelRequest {
    pub fn new(query: impl Into<String>, query_type: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_type: query_type.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_pnr(mut self, pnr: impl Into<String>) -> Self {
        self.pnr = Some(pnr.into());
        self
    }

    pub fn with_train(mut self, train: impl Into<String>) -> Self {
        self.train = Some(train.into());
        self
    }
}

/// The closed, validated form of a request. Downstream code never sees raw
/// form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedQuery {
    FullTrip {
        destination: String,
    },
    Transportation {
        query: String,
        mode: TransportMode,
        date: Option<String>,
    },
    Hotels {
        query: String,
    },
    Pnr {
        pnr: String,
    },
    TrainStatus {
        train: String,
    },
}

impl ValidatedQuery {
    pub fn query_type(&self) -> QueryType {
        match self {
            ValidatedQuery::FullTrip { .. } => QueryType::FullTrip,
            ValidatedQuery::Transportation { mode, .. } => match mode {
                TransportMode::Train => QueryType::TrainInfo,
                TransportMode::Flight => QueryType::FlightInfo,
            },
            ValidatedQuery::Hotels { .. } => QueryType::HotelInfo,
            ValidatedQuery::Pnr { .. } => QueryType::PnrStatus,
            ValidatedQuery::TrainStatus { .. } => QueryType::TrainStatus,
        }
    }
}

/// Validate raw input against the discriminated input shape. No backend call
/// is made for a request that fails here.
pub fn validate(request: &TravelRequest) -> Result<ValidatedQuery, Error> {
    let tag = request.query_type.trim();
    let query_type = QueryType::parse(tag)
        .ok_or_else(|| Error::InvalidInput(format!("Unrecognized query type: '{}'.", tag)))?;

    let query = request.query.trim();
    let date = request
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    match query_type {
        QueryType::FullTrip
        | QueryType::TrainInfo
        | QueryType::FlightInfo
        | QueryType::HotelInfo => {
            if query.chars().count() < 3 {
                return Err(Error::InvalidInput(
                    "Destination must be at least 3 characters.".to_string(),
                ));
            }
        }
        QueryType::PnrStatus | QueryType::TrainStatus => {}
    }

    match query_type {
        QueryType::FullTrip => Ok(ValidatedQuery::FullTrip {
            destination: query.to_string(),
        }),
        QueryType::TrainInfo => Ok(ValidatedQuery::Transportation {
            query: query.to_string(),
            mode: TransportMode::Train,
            date,
        }),
        QueryType::FlightInfo => Ok(ValidatedQuery::Transportation {
            query: query.to_string(),
            mode: TransportMode::Flight,
            date,
        }),
        QueryType::HotelInfo => Ok(ValidatedQuery::Hotels {
            query: query.to_string(),
        }),
        QueryType::PnrStatus => {
            let pnr = request.pnr.as_deref().unwrap_or("").trim();
            if pnr.len() != 10 || !pnr.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::InvalidInput(
                    "PNR must be exactly 10 digits.".to_string(),
                ));
            }
            Ok(ValidatedQuery::Pnr {
                pnr: pnr.to_string(),
            })
        }
        QueryType::TrainStatus => {
            let train = request.train.as_deref().unwrap_or("").trim();
            if train.is_empty() {
                return Err(Error::InvalidInput(
                    "Train number or name cannot be empty.".to_string(),
                ));
            }
            Ok(ValidatedQuery::TrainStatus {
                train: train.to_string(),
            })
        }
    }
}

/// The uniform response envelope: exactly one of `plan` or `error` is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan: Option<StructuredPlan>,
    pub plan_type: Option<QueryType>,
    pub error: Option<String>,
}

impl PlanResponse {
    fn success(plan: StructuredPlan, plan_type: Option<QueryType>) -> Self {
        Self {
            plan: Some(plan),
            plan_type,
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            plan: None,
            plan_type: None,
            error: Some(message),
        }
    }
}

/// Routes each validated request to exactly one flow and normalizes every
/// failure into the response envelope.
///
/// Holds no per-request state; one dispatcher serves concurrent requests.
pub struct Dispatcher {
    backend: Arc<dyn GenerativeBackend>,
    search: Arc<dyn SearchProvider>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn GenerativeBackend>, search: Arc<dyn SearchProvider>) -> Self {
        Self { backend, search }
    }

    /// Handle one form submission end to end. Never panics, never returns an
    /// `Err`: validation messages and configuration messages pass through,
    /// everything else collapses to a generic failure message.
    pub async fn handle(&self, request: TravelRequest) -> PlanResponse {
        let request_id = Uuid::new_v4();
        log::debug!(
            "[{}] dispatching query type '{}'",
            request_id,
            request.query_type
        );

        let validated = match validate(&request) {
            Ok(validated) => validated,
            Err(e) => {
                log::warn!("[{}] input rejected: {}", request_id, e);
                return PlanResponse::failure(e.to_string());
            }
        };

        let query_type = validated.query_type();
        match self.run_flow(validated).await {
            Ok(plan) => PlanResponse::success(plan, Some(query_type)),
            Err(e) => {
                log::error!("[{}] {} flow failed: {}", request_id, query_type.tag(), e);
                PlanResponse::failure(caller_message(&e))
            }
        }
    }

    /// Run the standalone search-extraction flow (not reachable through a
    /// query-type tag; it has its own entry point, like the rest of the form
    /// actions it sits beside).
    pub async fn extract(&self, query: &str) -> PlanResponse {
        let request_id = Uuid::new_v4();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return PlanResponse::failure("Query cannot be empty.".to_string());
        }

        match flows::extract_data(self.backend.as_ref(), self.search.as_ref(), trimmed).await {
            Ok(results) => PlanResponse::success(StructuredPlan::SearchResults(results), None),
            Err(e) => {
                log::error!("[{}] extraction flow failed: {}", request_id, e);
                PlanResponse::failure(caller_message(&e))
            }
        }
    }

    async fn run_flow(&self, query: ValidatedQuery) -> Result<StructuredPlan, Error> {
        let backend = self.backend.as_ref();
        match query {
            ValidatedQuery::FullTrip { destination } => Ok(StructuredPlan::Travel(
                flows::plan_trip(backend, &destination).await?,
            )),
            ValidatedQuery::Transportation { query, mode, date } => {
                Ok(StructuredPlan::Transportation(
                    flows::find_transportation(backend, &query, mode, date.as_deref()).await?,
                ))
            }
            ValidatedQuery::Hotels { query } => Ok(StructuredPlan::Hotels(
                flows::find_hotels(backend, &query).await?,
            )),
            ValidatedQuery::Pnr { pnr } => Ok(StructuredPlan::Pnr(
                flows::check_pnr_status(backend, &pnr).await?,
            )),
            ValidatedQuery::TrainStatus { train } => Ok(StructuredPlan::TrainStatus(
                flows::check_train_status(backend, &train).await?,
            )),
        }
    }
}

fn caller_message(error: &Error) -> String {
    if error.is_caller_visible() {
        error.to_string()
    } else {
        GENERIC_FAILURE.to_string()
    }
}
