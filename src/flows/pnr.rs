//! PNR status flow.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::PnrStatus;
use crate::prompt::{Template, VarBag};
use crate::schema;

fn pnr_template() -> Template {
    Template::new(
        "pnr_status_prompt",
        "You are an expert travel agent named \"RailMitra\". Your task is to provide \
         the status of a train PNR.\n\
         The user wants to check the status for PNR: \"{{pnr}}\".\n\n\
         - Generate a realistic, example PNR status based on the provided PNR number.\n\
         - Include details like train name, number, stations, journey date, and the \
         status for one or more example passengers.\n\
         - The booking and current status should be typical for Indian Railways \
         (e.g., CNF, RAC, WL).",
    )
}

/// Check the status of a 10-digit PNR.
///
/// The returned `pnr_number` is always overwritten with the caller's input
/// digits, so the response echoes the exact identifier requested even when the
/// backend invented a different one.
pub async fn check_pnr_status(
    backend: &dyn GenerativeBackend,
    pnr: &str,
) -> Result<PnrStatus, Error> {
    let vars = VarBag::new().set("pnr", pnr);
    let mut status: PnrStatus = StructuredGenerator::new(backend)
        .generate(&pnr_template(), &vars, &schema::pnr_status())
        .await?;

    status.pnr_number = pnr.to_string();
    Ok(status)
}
