use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use railmitra::prelude::*;
use railmitra::search::SearchHit;
use serde_json::json;

struct CannedBackend {
    reply: String,
    calls: AtomicUsize,
}

impl CannedBackend {
    fn new(reply: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl GenerativeBackend for CannedBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
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

struct NoSearch;

#[async_trait]
impl SearchProvider for NoSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, Error> {
        Ok(Vec::new())
    }
}

fn dispatcher(backend: Arc<dyn GenerativeBackend>) -> Dispatcher {
    Dispatcher::new(backend, Arc::new(NoSearch))
}

#[tokio::test]
async fn invalid_input_never_reaches_the_backend() {
    // Scenario A: a 2-character destination fails validation up front.
    let backend = CannedBackend::new(json!({}));
    let dispatcher = dispatcher(backend.clone());

    let response = dispatcher
        .handle(TravelRequest::new("ab", "full_trip"))
        .await;
    assert!(response.plan.is_none());
    assert!(response.plan_type.is_none());
    assert_eq!(
        response.error.as_deref(),
        Some("Destination must be at least 3 characters.")
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unrecognized_tag_never_reaches_the_backend() {
    let backend = CannedBackend::new(json!({}));
    let dispatcher = dispatcher(backend.clone());

    let response = dispatcher
        .handle(TravelRequest::new("Kerala", "bus_info"))
        .await;
    assert!(response.plan.is_none());
    assert!(response.error.unwrap().contains("Unrecognized query type"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn train_info_routes_to_the_transportation_flow() {
    // Scenario B: train_info yields trains, flights stay unset.
    let backend = CannedBackend::new(json!({
        "trains": [{
            "name": "Netravati Express",
            "number": "16345",
            "departureStation": "Lokmanya Tilak (LTT)",
            "departureTime": "11:40",
            "arrivalStation": "Thiruvananthapuram (TVC)",
            "arrivalTime": "18:45",
            "duration": "31h 5m",
            "price": "₹1,200"
        }]
    }));
    let dispatcher = dispatcher(backend);

    let response = dispatcher
        .handle(TravelRequest::new("Kerala", "train_info"))
        .await;
    assert!(response.error.is_none());
    assert_eq!(response.plan_type, Some(QueryType::TrainInfo));

    let value = serde_json::to_value(response.plan.unwrap()).unwrap();
    assert_eq!(value["trains"].as_array().unwrap().len(), 1);
    assert!(value.get("flights").is_none());
}

#[tokio::test]
async fn pnr_response_echoes_the_requested_pnr() {
    // Scenario C: the backend returns a different 10-digit value.
    let backend = CannedBackend::new(json!({
        "pnrNumber": "9999999999",
        "trainName": "Duronto Express",
        "trainNumber": "12260",
        "departureStation": "NDLS - New Delhi",
        "arrivalStation": "HWH - Howrah Junction",
        "journeyDate": "15-09-2026",
        "passengers": [
            {"passenger": "Passenger 1", "bookingStatus": "RAC 12", "currentStatus": "CNF"}
        ]
    }));
    let dispatcher = dispatcher(backend);

    let response = dispatcher
        .handle(TravelRequest::new("", "pnr_status").with_pnr("1234567890"))
        .await;
    assert!(response.error.is_none());
    assert_eq!(response.plan_type, Some(QueryType::PnrStatus));

    let value = serde_json::to_value(response.plan.unwrap()).unwrap();
    assert_eq!(value["pnrNumber"], "1234567890");
}

#[tokio::test]
async fn missing_search_credential_surfaces_verbatim() {
    // Scenario D: extraction with an unconfigured SerpApi client.
    let backend = CannedBackend::new(json!([]));
    let search = Arc::new(SerpApiClient::new(SearchConfig::default()));
    let dispatcher = Dispatcher::new(backend, search);

    let response = dispatcher.extract("kerala tourism").await;
    assert!(response.plan.is_none());
    assert_eq!(
        response.error.as_deref(),
        Some("SERPAPI_API_KEY environment variable is not set.")
    );
}

#[tokio::test]
async fn backend_failure_collapses_to_a_generic_message() {
    let dispatcher = dispatcher(Arc::new(FailingBackend));

    let response = dispatcher
        .handle(TravelRequest::new("Goa", "hotel_info"))
        .await;
    assert!(response.plan.is_none());
    assert!(response.plan_type.is_none());
    // Transport detail stays in diagnostics, not in the caller-facing message.
    let message = response.error.unwrap();
    assert!(!message.contains("503"));
    assert!(!message.is_empty());
}

#[tokio::test]
async fn empty_results_are_distinguishable_from_failure() {
    let backend = CannedBackend::new(json!({"hotels": [], "city": "Lakshadweep"}));
    let dispatcher = dispatcher(backend);

    let response = dispatcher
        .handle(TravelRequest::new("Lakshadweep", "hotel_info"))
        .await;
    assert!(response.error.is_none());
    assert_eq!(response.plan_type, Some(QueryType::HotelInfo));

    let value = serde_json::to_value(response.plan.unwrap()).unwrap();
    assert_eq!(value["hotels"], json!([]));
}

#[tokio::test]
async fn full_trip_returns_an_ordered_itinerary() {
    let backend = CannedBackend::new(json!({
        "tripTitle": "Kerala Backwaters Escape",
        "itinerary": [
            {"day": 2, "location": "Alleppey", "activities": "Houseboat cruise.",
             "hotels": [{"name": "Lake Palace", "price": "₹8,000", "rating": 4.4}]},
            {"day": 1, "location": "Kochi", "activities": "Fort Kochi walk.",
             "hotels": [{"name": "Brunton Boatyard", "price": "₹12,000", "rating": 4.6}]}
        ],
        "estimatedBudget": "₹45,000"
    }));
    let dispatcher = dispatcher(backend);

    let response = dispatcher
        .handle(TravelRequest::new("a 2-day trip to Kerala", "full_trip"))
        .await;
    assert!(response.error.is_none());
    assert_eq!(response.plan_type, Some(QueryType::FullTrip));

    let value = serde_json::to_value(response.plan.unwrap()).unwrap();
    let days: Vec<u64> = value["itinerary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["day"].as_u64().unwrap())
        .collect();
    assert_eq!(days, vec![1, 2]);
}

#[tokio::test]
async fn independent_requests_run_concurrently() {
    let backend = CannedBackend::new(json!({
        "trainName": "Rajdhani Express",
        "trainNumber": "12952",
        "currentStation": "Kota Junction (KOTA)",
        "lastUpdated": "5 minutes ago",
        "status": "Running On Time",
        "delay": "On Time",
        "nextStation": "Ratlam Junction (RTM)",
        "etaNextStation": "14:35"
    }));
    let dispatcher = Arc::new(dispatcher(backend));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let dispatcher = dispatcher.clone();
        handles.push(tokio::spawn(async move {
            dispatcher
                .handle(TravelRequest::new("", "train_status").with_train("12952"))
                .await
        }));
    }
    for handle in handles {
        let response = handle.await.unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.plan_type, Some(QueryType::TrainStatus));
    }
}
