//! Schema registry for structured backend output.
//!
//! Every flow declares exactly one [`OutputSchema`]: a named set of fields with a
//! semantic kind and a natural-language description. The description is not just
//! documentation — it is rendered into the prompt as a steering hint, and the
//! same declaration drives structural validation of the backend's reply.

use serde_json::{Map, Value};

use crate::error::Error;

/// Semantic kind of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Array(Box<FieldKind>),
    Object(OutputSchema),
}

impl FieldKind {
    /// Convenience constructor for array fields.
    pub fn array_of(kind: FieldKind) -> Self {
        FieldKind::Array(Box::new(kind))
    }

    fn label(&self) -> String {
        match self {
            FieldKind::String => "string".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Array(elem) => match elem.as_ref() {
                FieldKind::Object(_) => "array of objects".to_string(),
                other => format!("array of {}s", other.label()),
            },
            FieldKind::Object(_) => "object".to_string(),
        }
    }
}

/// Extra structural constraint on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Numeric value must lie in `[min, max]` inclusive.
    Range { min: f64, max: f64 },
    /// String value must be exactly this many characters.
    ExactLength(usize),
}

/// A single declared field of an output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub description: String,
    pub required: bool,
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            constraint: None,
        }
    }

    /// Mark the field as optional: it may be absent or null in the reply.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Require a numeric value within `[min, max]`.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraint = Some(Constraint::Range { min, max });
        self
    }

    /// Require a string of exactly `len` characters.
    pub fn exact_length(mut self, len: usize) -> Self {
        self.constraint = Some(Constraint::ExactLength(len));
        self
    }
}

/// Shape of the top-level reply value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRoot {
    Object,
    ArrayOfObjects,
}

/// The structural contract a backend reply must satisfy for one flow.
///
/// Schemas are versionless and immutable once defined; one schema per flow.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub root: SchemaRoot,
    pub fields: Vec<FieldSpec>,
}

impl OutputSchema {
    /// Schema whose reply is a single JSON object.
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: SchemaRoot::Object,
            fields: Vec::new(),
        }
    }

    /// Schema whose reply is a JSON array of objects.
    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: SchemaRoot::ArrayOfObjects,
            fields: Vec::new(),
        }
    }

    /// Add a required field.
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec::new(name, kind, description));
        self
    }

    /// Add an optional field.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec::new(name, kind, description).optional());
        self
    }

    /// Add a fully-specified field (for constrained fields).
    pub fn spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Validate and normalize a backend reply against this schema.
    ///
    /// Undeclared fields are dropped, so validation doubles as normalization
    /// and is idempotent: a conforming value validates to itself. A null or
    /// absent payload for an array-rooted schema normalizes to `[]` — an empty
    /// reply is a legitimate result, not a failure. A missing required field or
    /// a kind mismatch is a [`Error::SchemaViolation`].
    pub fn validate(&self, value: &Value) -> Result<Value, Error> {
        match self.root {
            SchemaRoot::ArrayOfObjects => match value {
                Value::Null => Ok(Value::Array(Vec::new())),
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (index, item) in items.iter().enumerate() {
                        let validated = self.validate_object(item).map_err(|e| {
                            Error::SchemaViolation(format!(
                                "{}[{}]: {}",
                                self.name, index, e
                            ))
                        })?;
                        out.push(validated);
                    }
                    Ok(Value::Array(out))
                }
                other => Err(Error::SchemaViolation(format!(
                    "{}: expected a JSON array, got {}",
                    self.name,
                    kind_of(other)
                ))),
            },
            SchemaRoot::Object => match value {
                Value::Object(_) => self.validate_object(value),
                other => Err(Error::SchemaViolation(format!(
                    "{}: expected a JSON object, got {}",
                    self.name,
                    kind_of(other)
                ))),
            },
        }
    }

    fn validate_object(&self, value: &Value) -> Result<Value, Error> {
        let map = value.as_object().ok_or_else(|| {
            Error::SchemaViolation(format!(
                "{}: expected a JSON object, got {}",
                self.name,
                kind_of(value)
            ))
        })?;

        let mut out = Map::new();
        for field in &self.fields {
            match map.get(&field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(Error::SchemaViolation(format!(
                            "{}: required field '{}' is missing",
                            self.name, field.name
                        )));
                    }
                    // Optional and absent: omitted from the normalized value.
                }
                Some(present) => {
                    let checked = check_kind(&field.kind, present, &self.name, &field.name)?;
                    check_constraint(field, &checked, &self.name)?;
                    out.insert(field.name.clone(), checked);
                }
            }
        }
        Ok(Value::Object(out))
    }

    /// Render the field list as generation guidance appended to every prompt.
    pub fn steering_block(&self) -> String {
        let mut out = String::new();
        match self.root {
            SchemaRoot::Object => {
                out.push_str("Respond ONLY with a valid JSON object containing these fields:\n");
            }
            SchemaRoot::ArrayOfObjects => {
                out.push_str(
                    "Respond ONLY with a valid JSON array of objects, each containing these fields:\n",
                );
            }
        }
        render_fields(&mut out, &self.fields, 0);
        out.push_str("Do not include any text outside the JSON.");
        out
    }
}

fn render_fields(out: &mut String, fields: &[FieldSpec], indent: usize) {
    for field in fields {
        for _ in 0..indent {
            out.push(' ');
        }
        let optionality = if field.required { "" } else { ", optional" };
        out.push_str(&format!(
            "- {} ({}{}): {}\n",
            field.name,
            field.kind.label(),
            optionality,
            field.description
        ));
        let nested = match &field.kind {
            FieldKind::Object(schema) => Some(schema),
            FieldKind::Array(elem) => match elem.as_ref() {
                FieldKind::Object(schema) => Some(schema),
                _ => None,
            },
            _ => None,
        };
        if let Some(schema) = nested {
            render_fields(out, &schema.fields, indent + 2);
        }
    }
}

fn check_kind(
    kind: &FieldKind,
    value: &Value,
    schema_name: &str,
    field_name: &str,
) -> Result<Value, Error> {
    match kind {
        FieldKind::String => {
            if value.is_string() {
                Ok(value.clone())
            } else {
                Err(wrong_kind(schema_name, field_name, "string", value))
            }
        }
        FieldKind::Number => {
            if value.is_number() {
                Ok(value.clone())
            } else {
                Err(wrong_kind(schema_name, field_name, "number", value))
            }
        }
        FieldKind::Array(elem) => match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(check_kind(elem, item, schema_name, field_name)?);
                }
                Ok(Value::Array(out))
            }
            other => Err(wrong_kind(schema_name, field_name, "array", other)),
        },
        FieldKind::Object(schema) => schema.validate(value),
    }
}

fn check_constraint(field: &FieldSpec, value: &Value, schema_name: &str) -> Result<(), Error> {
    match &field.constraint {
        None => Ok(()),
        Some(Constraint::Range { min, max }) => {
            let n = value.as_f64().unwrap_or(f64::NAN);
            if n >= *min && n <= *max {
                Ok(())
            } else {
                Err(Error::SchemaViolation(format!(
                    "{}: field '{}' must be between {} and {}, got {}",
                    schema_name, field.name, min, max, value
                )))
            }
        }
        Some(Constraint::ExactLength(len)) => {
            let actual = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
            if actual == *len {
                Ok(())
            } else {
                Err(Error::SchemaViolation(format!(
                    "{}: field '{}' must be exactly {} characters, got {}",
                    schema_name, field.name, len, actual
                )))
            }
        }
    }
}

fn wrong_kind(schema_name: &str, field_name: &str, expected: &str, value: &Value) -> Error {
    Error::SchemaViolation(format!(
        "{}: field '{}' expected {}, got {}",
        schema_name,
        field_name,
        expected,
        kind_of(value)
    ))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Registry: one schema per flow
// ============================================================================

/// Extracted search results (data-extraction flow).
pub fn search_results() -> OutputSchema {
    OutputSchema::array("search_results")
        .field("title", FieldKind::String, "The title of the search result.")
        .field("url", FieldKind::String, "The URL the result links to.")
        .field(
            "description",
            FieldKind::String,
            "A short description or snippet of the result.",
        )
        .optional(
            "type",
            FieldKind::String,
            "Type of result, e.g. \"Organic Result\", \"Ad\", \"Knowledge Panel\".",
        )
}

fn hotel_info() -> OutputSchema {
    OutputSchema::object("hotel_info")
        .field("name", FieldKind::String, "The name of the hotel.")
        .field(
            "price",
            FieldKind::String,
            "The estimated price per night, in INR.",
        )
        .spec(
            FieldSpec::new(
                "rating",
                FieldKind::Number,
                "The hotel's rating, out of 5. Can be a decimal.",
            )
            .range(0.0, 5.0),
        )
        .field(
            "bookingUrl",
            FieldKind::String,
            "A Google search URL to find booking options for the hotel, constructed \
             from the hotel's name and city.",
        )
}

/// Hotel lookup reply: a list of hotels plus the echoed city.
pub fn hotel_plan() -> OutputSchema {
    OutputSchema::object("hotel_plan")
        .field(
            "hotels",
            FieldKind::array_of(FieldKind::Object(hotel_info())),
            "A list of available hotels in the requested city.",
        )
        .field(
            "city",
            FieldKind::String,
            "The city where the hotels are located.",
        )
}

fn train_info() -> OutputSchema {
    OutputSchema::object("train_info")
        .field("name", FieldKind::String, "The name of the train.")
        .field("number", FieldKind::String, "The train number.")
        .field(
            "departureStation",
            FieldKind::String,
            "The departure station name and code.",
        )
        .field("departureTime", FieldKind::String, "The departure time.")
        .field(
            "arrivalStation",
            FieldKind::String,
            "The arrival station name and code.",
        )
        .field("arrivalTime", FieldKind::String, "The arrival time.")
        .field("duration", FieldKind::String, "The total travel duration.")
        .field(
            "price",
            FieldKind::String,
            "The estimated price for a ticket, in INR.",
        )
        .optional(
            "bookingUrl",
            FieldKind::String,
            "A Google search URL to find booking options for the train on IRCTC, \
             constructed from 'IRCTC' and the train number.",
        )
}

fn flight_info() -> OutputSchema {
    OutputSchema::object("flight_info")
        .field("airline", FieldKind::String, "The name of the airline.")
        .field("flightNumber", FieldKind::String, "The flight number.")
        .field(
            "departureAirport",
            FieldKind::String,
            "The departure airport name and IATA code.",
        )
        .field("departureTime", FieldKind::String, "The departure time.")
        .field(
            "arrivalAirport",
            FieldKind::String,
            "The arrival airport name and IATA code.",
        )
        .field("arrivalTime", FieldKind::String, "The arrival time.")
        .field("duration", FieldKind::String, "The total flight duration.")
        .field(
            "price",
            FieldKind::String,
            "The estimated price for a ticket, in INR.",
        )
        .optional(
            "bookingUrl",
            FieldKind::String,
            "A Google search URL to find booking options for the flight, \
             constructed from the airline and flight number.",
        )
}

/// Transportation lookup reply. Only the requested half (trains or flights)
/// is populated; the other half is omitted.
pub fn transportation_plan() -> OutputSchema {
    OutputSchema::object("transportation_plan")
        .optional(
            "trains",
            FieldKind::array_of(FieldKind::Object(train_info())),
            "A list of available trains for the requested route.",
        )
        .optional(
            "flights",
            FieldKind::array_of(FieldKind::Object(flight_info())),
            "A list of available flights for the requested route.",
        )
}

fn passenger_status() -> OutputSchema {
    OutputSchema::object("passenger_status")
        .field(
            "passenger",
            FieldKind::String,
            "The passenger identifier, e.g. 'Passenger 1'.",
        )
        .field(
            "bookingStatus",
            FieldKind::String,
            "The status at the time of booking, e.g. 'CNF/S4/72'.",
        )
        .field(
            "currentStatus",
            FieldKind::String,
            "The current status of the ticket, e.g. 'CNF'.",
        )
}

/// PNR status reply.
pub fn pnr_status() -> OutputSchema {
    OutputSchema::object("pnr_status")
        .spec(
            FieldSpec::new("pnrNumber", FieldKind::String, "The 10-digit PNR number.")
                .exact_length(10),
        )
        .field("trainName", FieldKind::String, "The name of the train.")
        .field("trainNumber", FieldKind::String, "The train number.")
        .field(
            "departureStation",
            FieldKind::String,
            "The departure station code and name.",
        )
        .field(
            "arrivalStation",
            FieldKind::String,
            "The arrival station code and name.",
        )
        .field(
            "journeyDate",
            FieldKind::String,
            "The date of the journey in 'DD-MM-YYYY' format.",
        )
        .field(
            "passengers",
            FieldKind::array_of(FieldKind::Object(passenger_status())),
            "A list of passengers and their ticket status.",
        )
}

/// Live train status reply.
pub fn train_status() -> OutputSchema {
    OutputSchema::object("train_status")
        .field("trainName", FieldKind::String, "The name of the train.")
        .field("trainNumber", FieldKind::String, "The train number.")
        .field(
            "currentStation",
            FieldKind::String,
            "The last reported station the train has arrived at or departed from.",
        )
        .field(
            "lastUpdated",
            FieldKind::String,
            "The time the status was last updated, e.g. '5 minutes ago'.",
        )
        .field(
            "status",
            FieldKind::String,
            "The current operational status, e.g. 'Running On Time', 'Delayed'.",
        )
        .field(
            "delay",
            FieldKind::String,
            "The delay duration, e.g. '15 minutes' or 'On Time'.",
        )
        .field("nextStation", FieldKind::String, "The next scheduled stop.")
        .field(
            "etaNextStation",
            FieldKind::String,
            "The estimated time of arrival at the next station.",
        )
}

fn hotel_suggestion() -> OutputSchema {
    OutputSchema::object("hotel_suggestion")
        .field("name", FieldKind::String, "The name of the suggested hotel.")
        .field(
            "price",
            FieldKind::String,
            "The estimated price per night, in INR.",
        )
        .spec(
            FieldSpec::new(
                "rating",
                FieldKind::Number,
                "The hotel's rating, out of 5.",
            )
            .range(0.0, 5.0),
        )
}

fn train_leg() -> OutputSchema {
    OutputSchema::object("train_leg")
        .field("name", FieldKind::String, "The name of the train.")
        .field("number", FieldKind::String, "The train number.")
        .field("departureTime", FieldKind::String, "The departure time.")
        .field("arrivalTime", FieldKind::String, "The arrival time.")
}

fn daily_plan() -> OutputSchema {
    OutputSchema::object("daily_plan")
        .field(
            "day",
            FieldKind::Number,
            "The day number of the itinerary, starting at 1 and strictly increasing.",
        )
        .field(
            "location",
            FieldKind::String,
            "The primary city or area for the day's activities.",
        )
        .field(
            "activities",
            FieldKind::String,
            "A detailed description of the day's activities, including scenic places, \
             things to do, and suggested times.",
        )
        .field(
            "hotels",
            FieldKind::array_of(FieldKind::Object(hotel_suggestion())),
            "Suggested hotels or types of accommodation for the night.",
        )
        .optional(
            "trains",
            FieldKind::array_of(FieldKind::Object(train_leg())),
            "Train legs for this day, if travel between cities is needed.",
        )
}

/// Full trip plan reply.
pub fn travel_plan() -> OutputSchema {
    OutputSchema::object("travel_plan")
        .field(
            "tripTitle",
            FieldKind::String,
            "A creative and descriptive title for the travel plan.",
        )
        .field(
            "itinerary",
            FieldKind::array_of(FieldKind::Object(daily_plan())),
            "The day-by-day itinerary for the trip.",
        )
        .field(
            "estimatedBudget",
            FieldKind::String,
            "The total estimated budget for the entire trip, including a currency symbol.",
        )
}
