//! Typed structured artifacts returned to the caller.
//!
//! All types are transient and request-scoped; field names on the wire are
//! camelCase to match the form-facing response shape.

use serde::{Deserialize, Serialize};

/// One extracted search result (data-extraction flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    pub name: String,
    pub price: String,
    pub rating: f64,
    pub booking_url: String,
}

/// Hotel lookup artifact: the hotels plus the echoed city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPlan {
    pub hotels: Vec<HotelInfo>,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainInfo {
    pub name: String,
    pub number: String,
    pub departure_station: String,
    pub departure_time: String,
    pub arrival_station: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInfo {
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub departure_time: String,
    pub arrival_airport: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

/// Transportation lookup artifact.
///
/// Only the half matching the requested mode is populated; the other half is
/// `None` and omitted from serialization, never an empty list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trains: Option<Vec<TrainInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flights: Option<Vec<FlightInfo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerStatus {
    pub passenger: String,
    pub booking_status: String,
    pub current_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnrStatus {
    pub pnr_number: String,
    pub train_name: String,
    pub train_number: String,
    pub departure_station: String,
    pub arrival_station: String,
    pub journey_date: String,
    pub passengers: Vec<PassengerStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainStatus {
    pub train_name: String,
    pub train_number: String,
    pub current_station: String,
    pub last_updated: String,
    pub status: String,
    pub delay: String,
    pub next_station: String,
    pub eta_next_station: String,
}

/// Lite hotel suggestion embedded in a daily itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSuggestion {
    pub name: String,
    pub price: String,
    pub rating: f64,
}

/// Lite train leg embedded in a daily itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainLeg {
    pub name: String,
    pub number: String,
    pub departure_time: String,
    pub arrival_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    /// 1-based day number; the itinerary is ordered by strictly increasing day.
    pub day: u32,
    pub location: String,
    pub activities: String,
    pub hotels: Vec<HotelSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trains: Option<Vec<TrainLeg>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub trip_title: String,
    pub itinerary: Vec<DailyPlan>,
    pub estimated_budget: String,
}

/// The union of every artifact a flow can return.
///
/// Serialized untagged: the caller receives the bare artifact, with the flow
/// tag carried separately in the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredPlan {
    SearchResults(Vec<SearchResult>),
    Hotels(HotelPlan),
    Transportation(TransportationPlan),
    Pnr(PnrStatus),
    TrainStatus(TrainStatus),
    Travel(TravelPlan),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names_are_camel_case() {
        let status = TrainStatus {
            train_name: "Rajdhani Express".to_string(),
            train_number: "12952".to_string(),
            current_station: "Kota Junction (KOTA)".to_string(),
            last_updated: "5 minutes ago".to_string(),
            status: "Running On Time".to_string(),
            delay: "On Time".to_string(),
            next_station: "Ratlam Junction (RTM)".to_string(),
            eta_next_station: "14:35".to_string(),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert!(value.get("trainName").is_some());
        assert!(value.get("etaNextStation").is_some());
        assert!(value.get("train_name").is_none());
    }

    #[test]
    fn test_unpopulated_transportation_half_is_omitted() {
        let plan = TransportationPlan {
            trains: Some(Vec::new()),
            flights: None,
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value, json!({"trains": []}));
    }

    #[test]
    fn test_daily_plan_deserializes_without_trains() {
        let plan: DailyPlan = serde_json::from_value(json!({
            "day": 1,
            "location": "Kochi",
            "activities": "Fort Kochi walk, Chinese fishing nets at sunset.",
            "hotels": [{"name": "Brunton Boatyard", "price": "₹12,000", "rating": 4.6}]
        }))
        .unwrap();
        assert_eq!(plan.day, 1);
        assert!(plan.trains.is_none());
    }
}
