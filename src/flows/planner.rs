//! Full trip planning flow.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::TravelPlan;
use crate::prompt::{Template, VarBag};
use crate::schema;

fn travel_planner_template() -> Template {
    Template::new(
        "travel_planner_prompt",
        "You are an expert travel agent named \"RailMitra\". Your task is to create a \
         detailed travel itinerary based on the user's request.\n\
         The user's request is: \"{{query}}\".\n\n\
         Generate a comprehensive travel plan that includes:\n\
         1. A day-by-day plan with locations, activities (including scenic places), \
         hotel suggestions, and any train legs between cities.\n\
         2. A total estimated budget for the trip.\n\n\
         The plan should be well-structured, practical, and inspiring. Number the days \
         starting at 1.",
    )
}

/// Build a full day-by-day travel plan.
///
/// The itinerary is normalized to ascending day order; a plan whose days do
/// not start at 1 or do not strictly increase is rejected as a schema
/// violation rather than renumbered.
pub async fn plan_trip(
    backend: &dyn GenerativeBackend,
    query: &str,
) -> Result<TravelPlan, Error> {
    let vars = VarBag::new().set("query", query);
    let mut plan: TravelPlan = StructuredGenerator::new(backend)
        .generate(&travel_planner_template(), &vars, &schema::travel_plan())
        .await?;

    plan.itinerary.sort_by_key(|daily| daily.day);
    let mut previous = 0u32;
    for daily in &plan.itinerary {
        let valid = if previous == 0 {
            daily.day == 1
        } else {
            daily.day > previous
        };
        if !valid {
            return Err(Error::SchemaViolation(format!(
                "travel_plan: itinerary days must start at 1 and increase strictly, \
                 got day {} after day {}",
                daily.day, previous
            )));
        }
        previous = daily.day;
    }
    Ok(plan)
}
