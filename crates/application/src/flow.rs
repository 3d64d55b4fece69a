//! Sign-in flow completion.
//!
//! [`LoginFlow`] drives one complete sign-in: it normalizes the stored
//! resume target, starts the widget's sign-in action, routes lifecycle and
//! view events while that action is pending, and on resolution tears the
//! widget down and hands the tokens to the session manager.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use vestibule_domain::{CredentialTokens, LifecycleEvent, ViewEvent};

use crate::error::FlowResult;
use crate::ports::{Navigator, SessionManager, SignInOptions, SignInWidget};
use crate::router::ControllerRouter;

/// Orchestrates a sign-in from mount to completed session.
pub struct LoginFlow<W, S> {
    widget: Arc<W>,
    session_manager: Arc<S>,
    navigator: Arc<dyn Navigator>,
    router: ControllerRouter,
}

impl<W: SignInWidget, S: SessionManager> LoginFlow<W, S> {
    /// Creates a flow over the given collaborators.
    pub fn new(
        widget: Arc<W>,
        session_manager: Arc<S>,
        navigator: Arc<dyn Navigator>,
        router: ControllerRouter,
    ) -> Self {
        Self {
            widget,
            session_manager,
            navigator,
            router,
        }
    }

    /// Normalizes the stored resume target.
    ///
    /// An absent or empty target, or one equal to the page's own origin,
    /// is rewritten to the application root exactly once; anything else is
    /// left untouched. `run` performs this before mounting the widget.
    pub async fn prepare_resume_target(&self) {
        let origin = self.navigator.current_origin();
        match self.session_manager.original_uri().await {
            Some(uri) if !uri.is_empty() && uri != origin => {
                tracing::debug!(%uri, "resume target already set");
            }
            _ => {
                self.session_manager.set_original_uri("/").await;
                tracing::debug!("resume target defaulted to application root");
            }
        }
    }

    /// Runs the flow to completion.
    ///
    /// Lifecycle and view events are handled one at a time, each to
    /// completion, while the widget's sign-in action is pending. A failed
    /// view setup is logged and the flow keeps running; the widget
    /// rejecting the sign-in ends the flow.
    ///
    /// # Errors
    /// Returns [`FlowError::SignIn`](crate::error::FlowError) if the
    /// widget rejects (typically a misconfigured client id or redirect
    /// URI), or [`FlowError::Completion`](crate::error::FlowError) if the
    /// session manager rejects the tokens.
    pub async fn run(
        &mut self,
        options: SignInOptions,
        mut lifecycle_events: UnboundedReceiver<LifecycleEvent>,
        mut view_events: UnboundedReceiver<ViewEvent>,
    ) -> FlowResult<()> {
        self.prepare_resume_target().await;

        tracing::info!(mount = %options.mount, "starting sign-in");
        // The sign-in future borrows the widget; it must be dropped
        // before completion can take the flow mutably.
        let tokens = {
            let sign_in = self.widget.show_sign_in(options);
            tokio::pin!(sign_in);

            loop {
                tokio::select! {
                    // Queued events are routed before a resolution is acted on.
                    biased;
                    Some(event) = lifecycle_events.recv() => {
                        if let Err(error) = self.router.handle_lifecycle(&event) {
                            tracing::error!(%error, "view setup aborted");
                        }
                    }
                    Some(event) = view_events.recv() => {
                        self.router.handle_view_event(&event);
                    }
                    result = &mut sign_in => break result?,
                }
            }
        };

        self.complete(tokens).await
    }

    /// Tears the flow down outside of `run`, e.g. when the hosting page
    /// goes away. Safe after a completed run.
    pub fn dispose(&mut self) {
        self.router.close_session();
        self.widget.remove();
    }

    async fn complete(&mut self, tokens: CredentialTokens) -> FlowResult<()> {
        // The widget and its timers must be gone before the session
        // manager navigates away.
        self.widget.remove();
        self.router.close_session();
        self.session_manager.complete_login(tokens).await?;
        tracing::info!("login completed");
        Ok(())
    }
}
