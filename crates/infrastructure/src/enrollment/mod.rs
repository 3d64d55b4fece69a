//! Factor enrollment implementations.

mod http;
mod simulated;

pub use http::HttpEnrollment;
pub use simulated::SimulatedEnrollment;
