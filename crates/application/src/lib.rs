//! Vestibule Application - Flow orchestration and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the widget, session manager, and view)
//! - The controller router and login flow orchestration
//! - Application-level error handling

pub mod cancellation;
pub mod countdown;
pub mod error;
pub mod flow;
pub mod ports;
pub mod router;
pub mod view;
pub mod view_session;

pub use cancellation::{CancellationReceiver, CancellationToken};
pub use countdown::Countdown;
pub use error::{FlowError, FlowResult};
pub use flow::LoginFlow;
pub use ports::{
    EnrollmentError, EnrollmentService, Navigator, SessionError, SessionManager, SignInOptions,
    SignInWidget, ViewError, ViewSurface, WidgetError,
};
pub use router::ControllerRouter;
pub use view::ViewMutator;
pub use view_session::ViewSession;
