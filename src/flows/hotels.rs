//! Hotel lookup flow.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::HotelPlan;
use crate::prompt::{Template, VarBag};
use crate::schema;

fn hotel_template() -> Template {
    Template::new(
        "hotel_prompt",
        "You are an expert travel agent named \"RailMitra\". Your task is to provide \
         information about hotels based on the user's request.\n\
         The user wants to find hotels in: \"{{query}}\".\n\n\
         - Provide a list of 3-5 relevant hotel options in that city.\n\
         - For each hotel, provide the name, estimated price per night in Indian \
         Rupees (INR), and a rating out of 5.\n\
         - For each hotel, generate a Google search URL to find booking options. For \
         example, for \"The Taj Mahal Palace\" in \"Mumbai\", the URL should be \
         something like \"https://www.google.com/search?q=book+hotel+The+Taj+Mahal+Palace+Mumbai\".",
    )
}

/// Look up hotels in the requested city. An empty hotel list is a legitimate
/// result.
pub async fn find_hotels(
    backend: &dyn GenerativeBackend,
    query: &str,
) -> Result<HotelPlan, Error> {
    let vars = VarBag::new().set("query", query);
    StructuredGenerator::new(backend)
        .generate(&hotel_template(), &vars, &schema::hotel_plan())
        .await
}
