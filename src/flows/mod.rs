//! Flow orchestrators: one state-free async function per use case.
//!
//! Each flow pairs a prompt template with its output schema, invokes the
//! structured generator once, and applies its own post-processing. Flows never
//! treat an empty result as a failure.

pub mod extract;
pub mod hotels;
pub mod planner;
pub mod pnr;
pub mod status;
pub mod transport;

pub use extract::extract_data;
pub use hotels::find_hotels;
pub use planner::plan_trip;
pub use pnr::check_pnr_status;
pub use status::check_train_status;
pub use transport::{find_transportation, TransportMode};
