//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the orchestration core and the
//! hosting environment. Each port is a trait implemented by adapters in
//! the infrastructure layer (or by mocks in tests).

mod enrollment;
mod navigation;
mod session;
mod surface;
mod widget;

pub use enrollment::{EnrollmentError, EnrollmentService};
pub use navigation::Navigator;
pub use session::{SessionError, SessionManager};
pub use surface::{ViewError, ViewSurface};
pub use widget::{SignInOptions, SignInWidget, WidgetError};
