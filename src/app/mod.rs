pub mod parse_adapter;
pub mod status;
pub mod status_service;

pub use status::{StatusReport, StatusState};
pub use status_service::{Diagnostics, StatusService};
