//! Transportation lookup flow: trains or flights, one orchestrator.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::TransportationPlan;
use crate::prompt::{Template, VarBag};
use crate::schema;

/// Which half of the transportation schema the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Train,
    Flight,
}

impl TransportMode {
    /// The query-type tag this mode corresponds to.
    pub fn tag(self) -> &'static str {
        match self {
            TransportMode::Train => "train_info",
            TransportMode::Flight => "flight_info",
        }
    }
}

fn transportation_template() -> Template {
    Template::new(
        "transportation_prompt",
        "You are an expert travel agent named \"RailMitra\". Your task is to provide \
         information about trains or flights based on the user's request.\n\n\
         The user's request is: \"{{query}}\"{{#if date}} for the date {{date}}{{/if}}.\n\
         The user is asking for: \"{{queryType}}\".\n\n\
         - If the user asks for \"train_info\", provide a list of relevant trains. Do \
         not include flights, hotels, or trip plans. Prices should be in INR. For each \
         train, generate a Google search URL to find booking options on IRCTC. For \
         example, for train number \"12952\", the URL could be \
         \"https://www.google.com/search?q=IRCTC+train+12952\".\n\
         - If the user asks for \"flight_info\", provide a list of relevant flights. Do \
         not include trains, hotels, or trip plans. Prices should be in INR. For each \
         flight, generate a Google search URL to find booking options. For example, for \
         \"IndiGo 6E 204\", the URL could be \
         \"https://www.google.com/search?q=book+flight+IndiGo+6E+204\".\n\n\
         Provide several options if available.",
    )
}

/// Look up trains or flights for a route. Only the requested half of the plan
/// is returned: the other half is omitted entirely, and an empty reply for the
/// requested half becomes an empty list.
pub async fn find_transportation(
    backend: &dyn GenerativeBackend,
    query: &str,
    mode: TransportMode,
    date: Option<&str>,
) -> Result<TransportationPlan, Error> {
    let vars = VarBag::new()
        .set("query", query)
        .set("queryType", mode.tag())
        .set_opt("date", date);

    let mut plan: TransportationPlan = StructuredGenerator::new(backend)
        .generate(
            &transportation_template(),
            &vars,
            &schema::transportation_plan(),
        )
        .await?;

    match mode {
        TransportMode::Train => {
            plan.flights = None;
            if plan.trains.is_none() {
                plan.trains = Some(Vec::new());
            }
        }
        TransportMode::Flight => {
            plan.trains = None;
            if plan.flights.is_none() {
                plan.flights = Some(Vec::new());
            }
        }
    }
    Ok(plan)
}
