//! Live train status flow.

use crate::error::Error;
use crate::llm::{GenerativeBackend, StructuredGenerator};
use crate::plan::TrainStatus;
use crate::prompt::{Template, VarBag};
use crate::schema;

fn train_status_template() -> Template {
    Template::new(
        "train_status_prompt",
        "You are an expert travel agent named \"RailMitra\". Your task is to provide \
         the live running status of a train.\n\
         The user wants to check the status for train: \"{{train}}\".\n\n\
         - Generate a realistic, example live train status based on the provided \
         train number or name.\n\
         - Include details like current station, delay information, next station, and ETA.\n\
         - The status should be plausible for a train running in India.",
    )
}

/// Check the live running status of a train by number or name.
pub async fn check_train_status(
    backend: &dyn GenerativeBackend,
    train: &str,
) -> Result<TrainStatus, Error> {
    let vars = VarBag::new().set("train", train);
    StructuredGenerator::new(backend)
        .generate(&train_status_template(), &vars, &schema::train_status())
        .await
}
