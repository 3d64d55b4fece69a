//! Controller-driven routing of widget lifecycle events.
//!
//! The router is a state machine keyed by the widget's active controller.
//! Lifecycle events drive all transitions; nothing is polled. Entering a
//! handled controller view opens a fresh [`ViewSession`] and disposes the
//! previous one, so timers and listeners never outlive their view.

use std::sync::{Arc, Mutex, PoisonError};

use vestibule_domain::{
    Controller, FlowTimings, Interest, LifecycleEvent, LifecyclePhase, NodeSpec, ViewEffect,
    ViewEvent, anchors,
};

use crate::cancellation::CancellationToken;
use crate::countdown::Countdown;
use crate::error::FlowResult;
use crate::ports::{EnrollmentService, Navigator, ViewSurface};
use crate::view::ViewMutator;
use crate::view_session::ViewSession;

/// Route navigated to after the enrollment hold.
const LOGIN_ROUTE: &str = "/login";

/// Message shown in the enrollment panel while enrollment runs.
const ENROLL_HOLD_MESSAGE: &str = "<h2>We're enrolling your mobile number to MFA</h2>\
<p>Please wait for a moment. Kindly relogin after this page reloads.</p>";

/// Advisory shown beneath the verification screen's button bar.
const OTP_WAIT_NOTICE: &str =
    "Please do not re-attempt to login while waiting for your OTP. Thank you!";

/// Resend control label while the resend lock is ticking.
const SENT_LABEL: &str = "Sent";
/// Resend control label once the lock expires.
const RESEND_LABEL: &str = "Re-send code";
/// Confirm control label after a user activation.
const CONFIRM_LABEL: &str = "CONFIRM";

/// Handle on the running confirm countdown.
///
/// Label writes from the countdown callbacks and the activation handler
/// are serialized through `closed`: once it is set the callbacks skip,
/// so the activation reset is always the final label even when a tick is
/// in flight on another worker thread.
struct ConfirmWindow {
    stop: CancellationToken,
    closed: Arc<Mutex<bool>>,
}

/// Dispatches widget lifecycle and view events to per-controller behaviors.
pub struct ControllerRouter {
    mutator: ViewMutator,
    navigator: Arc<dyn Navigator>,
    enrollment: Arc<dyn EnrollmentService>,
    timings: FlowTimings,
    session: Option<ViewSession>,
    captured_identifier: Option<String>,
    confirm_window: Option<ConfirmWindow>,
}

impl ControllerRouter {
    /// Creates a router over the given collaborators.
    #[must_use]
    pub fn new(
        surface: Arc<dyn ViewSurface>,
        navigator: Arc<dyn Navigator>,
        enrollment: Arc<dyn EnrollmentService>,
        timings: FlowTimings,
    ) -> Self {
        Self {
            mutator: ViewMutator::new(surface),
            navigator,
            enrollment,
            timings,
            session: None,
            captured_identifier: None,
            confirm_window: None,
        }
    }

    /// Routes a lifecycle event to its controller behavior.
    ///
    /// Controllers without a behavior are ignored on both phases.
    ///
    /// # Errors
    /// Returns [`FlowError::MissingControl`](crate::error::FlowError) if a
    /// required control is absent; the view's setup is rolled back and the
    /// flow keeps running.
    pub fn handle_lifecycle(&mut self, event: &LifecycleEvent) -> FlowResult<()> {
        tracing::debug!(phase = ?event.phase, controller = %event.controller, "lifecycle event");
        match (event.phase, &event.controller) {
            (LifecyclePhase::Ready, Controller::PrimaryAuth) => self.enter_primary_auth(),
            (LifecyclePhase::AfterRender, Controller::EnrollChoices) => self.enter_enroll_choices(),
            (LifecyclePhase::AfterRender, Controller::MfaVerify) => self.enter_mfa_verify(),
            _ => Ok(()),
        }
    }

    /// Routes a view event from the surface.
    pub fn handle_view_event(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::ValueChanged { target, value } if *target == anchors::username_input() => {
                self.captured_identifier = Some(value.clone());
            }
            ViewEvent::Activated { target } if *target == anchors::confirm_button() => {
                self.confirm_activated();
            }
            _ => {}
        }
    }

    /// The identifier last typed into the primary credential screen.
    #[must_use]
    pub fn captured_identifier(&self) -> Option<&str> {
        self.captured_identifier.as_deref()
    }

    /// True while a controller view session is open.
    #[must_use]
    pub const fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    /// Disposes the active view session, if any.
    pub fn close_session(&mut self) {
        self.confirm_window = None;
        if let Some(mut session) = self.session.take() {
            session.dispose();
        }
    }

    fn open_session(&mut self) -> ViewSession {
        self.close_session();
        ViewSession::new(self.mutator.clone())
    }

    fn enter_primary_auth(&mut self) -> FlowResult<()> {
        tracing::info!("primary credential screen ready");
        let mut session = self.open_session();
        // The identifier input is a decoration-grade target: older widget
        // themes render the form without it.
        if let Some(listener) = self
            .mutator
            .try_watch(&anchors::username_input(), Interest::ValueChange)
        {
            session.add_listener(listener);
        }
        self.session = Some(session);
        Ok(())
    }

    fn enter_enroll_choices(&mut self) -> FlowResult<()> {
        tracing::info!("enrollment chooser rendered, starting enrollment hold");
        let mut session = self.open_session();
        if let Err(error) = self.setup_enroll_choices(&mut session) {
            session.dispose();
            return Err(error);
        }
        self.session = Some(session);
        Ok(())
    }

    fn setup_enroll_choices(&self, session: &mut ViewSession) -> FlowResult<()> {
        let panel = anchors::enroll_panel();
        self.mutator.apply_control(&ViewEffect::SetVisible {
            target: panel.clone(),
            visible: false,
        })?;
        self.mutator.apply_control(&ViewEffect::SetContent {
            target: panel.clone(),
            content: ENROLL_HOLD_MESSAGE.to_string(),
        })?;
        self.mutator.apply_control(&ViewEffect::SetVisible {
            target: panel,
            visible: true,
        })?;

        let enrollment = Arc::clone(&self.enrollment);
        let navigator = Arc::clone(&self.navigator);
        let identifier = self.captured_identifier.clone();
        session.add_task(tokio::spawn(async move {
            // Navigation proceeds regardless of the enrollment outcome so
            // the user can re-attempt after the reload.
            if let Err(error) = enrollment.enroll(identifier.as_deref()).await {
                tracing::error!(%error, "factor enrollment attempt failed");
            }
            navigator.navigate_to(LOGIN_ROUTE);
        }));
        Ok(())
    }

    fn enter_mfa_verify(&mut self) -> FlowResult<()> {
        tracing::info!("verification screen rendered");
        let mut session = self.open_session();
        match self.setup_mfa_verify(&mut session) {
            Ok(window) => {
                self.confirm_window = Some(window);
                self.session = Some(session);
                Ok(())
            }
            Err(error) => {
                session.dispose();
                Err(error)
            }
        }
    }

    fn setup_mfa_verify(&self, session: &mut ViewSession) -> FlowResult<ConfirmWindow> {
        self.mutator.apply_decoration(&ViewEffect::AppendChild {
            target: anchors::button_bar(),
            node: NodeSpec::new("p")
                .with_text(OTP_WAIT_NOTICE)
                .with_attribute("style", "text-align: center; margin-top: 8px;"),
        });

        // Auto-send the code, once per view entry.
        self.mutator.activate(&anchors::resend_button())?;
        tracing::info!("one-time code auto-sent");

        let resend_tick = {
            let mutator = self.mutator.clone();
            move |_remaining| lock_resend(&mutator)
        };
        let resend_expire = {
            let mutator = self.mutator.clone();
            move || unlock_resend(&mutator)
        };
        session.add_countdown(Countdown::start(
            self.timings.resend_lock_secs,
            resend_tick,
            resend_expire,
        ));

        let closed = Arc::new(Mutex::new(false));
        let confirm_tick = {
            let mutator = self.mutator.clone();
            let closed = Arc::clone(&closed);
            move |remaining| {
                let closed = closed.lock().unwrap_or_else(PoisonError::into_inner);
                if !*closed {
                    label_confirm(&mutator, &format!("{CONFIRM_LABEL} ({remaining})"));
                }
            }
        };
        let confirm_expire = {
            let mutator = self.mutator.clone();
            let closed = Arc::clone(&closed);
            move || {
                let closed = closed.lock().unwrap_or_else(PoisonError::into_inner);
                if !*closed {
                    disable_confirm(&mutator);
                }
            }
        };
        let confirm = Countdown::start(
            self.timings.confirm_window_secs,
            confirm_tick,
            confirm_expire,
        );
        let window = ConfirmWindow {
            stop: confirm.token(),
            closed,
        };
        session.add_countdown(confirm);

        let listener = self
            .mutator
            .watch(&anchors::confirm_button(), Interest::Activation)?;
        session.add_listener(listener);

        Ok(window)
    }

    fn confirm_activated(&mut self) {
        let Some(window) = self.confirm_window.take() else {
            return;
        };
        window.stop.cancel();
        let mut closed = window.closed.lock().unwrap_or_else(PoisonError::into_inner);
        *closed = true;
        label_confirm(&self.mutator, CONFIRM_LABEL);
        tracing::info!("confirm window closed by user");
    }
}

fn lock_resend(mutator: &ViewMutator) {
    let resend = anchors::resend_button();
    mutator.apply_decoration(&ViewEffect::SetAttribute {
        target: resend.clone(),
        name: "disabled".to_string(),
        value: String::new(),
    });
    mutator.apply_decoration(&ViewEffect::SetAttribute {
        target: resend.clone(),
        name: "value".to_string(),
        value: SENT_LABEL.to_string(),
    });
    for class in anchors::DISABLED_MARKER_CLASSES {
        mutator.apply_decoration(&ViewEffect::AddClass {
            target: resend.clone(),
            class: class.to_string(),
        });
    }
    mutator.apply_decoration(&ViewEffect::SetVisible {
        target: anchors::timeout_warning(),
        visible: false,
    });
}

fn unlock_resend(mutator: &ViewMutator) {
    let resend = anchors::resend_button();
    mutator.apply_decoration(&ViewEffect::RemoveAttribute {
        target: resend.clone(),
        name: "disabled".to_string(),
    });
    mutator.apply_decoration(&ViewEffect::SetAttribute {
        target: resend.clone(),
        name: "value".to_string(),
        value: RESEND_LABEL.to_string(),
    });
    for class in anchors::DISABLED_MARKER_CLASSES {
        mutator.apply_decoration(&ViewEffect::RemoveClass {
            target: resend.clone(),
            class: class.to_string(),
        });
    }
    mutator.apply_decoration(&ViewEffect::SetVisible {
        target: anchors::timeout_warning(),
        visible: true,
    });
}

fn label_confirm(mutator: &ViewMutator, label: &str) {
    mutator.apply_decoration(&ViewEffect::SetAttribute {
        target: anchors::confirm_button(),
        name: "value".to_string(),
        value: label.to_string(),
    });
}

/// Expiry leaves the label at `CONFIRM (0)` and then disables the control.
fn disable_confirm(mutator: &ViewMutator) {
    let confirm = anchors::confirm_button();
    mutator.apply_decoration(&ViewEffect::SetAttribute {
        target: confirm.clone(),
        name: "disabled".to_string(),
        value: String::new(),
    });
    for class in anchors::DISABLED_MARKER_CLASSES {
        mutator.apply_decoration(&ViewEffect::AddClass {
            target: confirm.clone(),
            class: class.to_string(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use vestibule_domain::{ListenerId, Selector};

    use crate::ports::{EnrollmentError, ViewError};

    #[derive(Default)]
    struct FakeSurface {
        present: Vec<Selector>,
        effects: Mutex<Vec<ViewEffect>>,
        activations: Mutex<Vec<Selector>>,
        watches: Mutex<Vec<(ListenerId, Selector, Interest)>>,
    }

    impl FakeSurface {
        fn with_targets(present: Vec<Selector>) -> Arc<Self> {
            Arc::new(Self {
                present,
                ..Self::default()
            })
        }

        fn verification_screen() -> Arc<Self> {
            Self::with_targets(vec![
                anchors::resend_button(),
                anchors::button_bar(),
                anchors::confirm_button(),
                anchors::timeout_warning(),
            ])
        }

        fn resolve(&self, selector: &Selector) -> Result<(), ViewError> {
            if self.present.contains(selector) {
                Ok(())
            } else {
                Err(ViewError::MissingTarget(selector.clone()))
            }
        }

        fn effects(&self) -> Vec<ViewEffect> {
            self.effects.lock().unwrap().clone()
        }

        fn effects_for(&self, selector: &Selector) -> Vec<ViewEffect> {
            self.effects()
                .into_iter()
                .filter(|e| e.target() == selector)
                .collect()
        }

        fn activation_count(&self, selector: &Selector) -> usize {
            self.activations
                .lock()
                .unwrap()
                .iter()
                .filter(|s| *s == selector)
                .count()
        }

        fn watch_count(&self) -> usize {
            self.watches.lock().unwrap().len()
        }
    }

    impl ViewSurface for FakeSurface {
        fn apply(&self, effect: &ViewEffect) -> Result<(), ViewError> {
            self.resolve(effect.target())?;
            self.effects.lock().unwrap().push(effect.clone());
            Ok(())
        }

        fn activate(&self, target: &Selector) -> Result<(), ViewError> {
            self.resolve(target)?;
            self.activations.lock().unwrap().push(target.clone());
            Ok(())
        }

        fn watch(&self, target: &Selector, interest: Interest) -> Result<ListenerId, ViewError> {
            self.resolve(target)?;
            let listener = ListenerId::new();
            self.watches
                .lock()
                .unwrap()
                .push((listener, target.clone(), interest));
            Ok(listener)
        }

        fn unwatch(&self, listener: ListenerId) {
            self.watches.lock().unwrap().retain(|(l, _, _)| *l != listener);
        }
    }

    #[derive(Default)]
    struct JournalNavigator {
        visited: Mutex<Vec<String>>,
    }

    impl JournalNavigator {
        fn visited(&self) -> Vec<String> {
            self.visited.lock().unwrap().clone()
        }
    }

    impl Navigator for JournalNavigator {
        fn navigate_to(&self, path: &str) {
            self.visited.lock().unwrap().push(path.to_string());
        }

        fn current_origin(&self) -> String {
            "http://localhost:4200".to_string()
        }
    }

    struct HoldEnrollment {
        hold: Duration,
        seen: Mutex<Vec<Option<String>>>,
    }

    impl HoldEnrollment {
        fn new(hold: Duration) -> Arc<Self> {
            Arc::new(Self {
                hold,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Option<String>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EnrollmentService for HoldEnrollment {
        async fn enroll(&self, identifier: Option<&str>) -> Result<(), EnrollmentError> {
            self.seen
                .lock()
                .unwrap()
                .push(identifier.map(ToString::to_string));
            tokio::time::sleep(self.hold).await;
            Ok(())
        }
    }

    struct Fixture {
        surface: Arc<FakeSurface>,
        navigator: Arc<JournalNavigator>,
        enrollment: Arc<HoldEnrollment>,
        router: ControllerRouter,
    }

    fn fixture_with(surface: Arc<FakeSurface>, timings: FlowTimings) -> Fixture {
        let navigator = Arc::new(JournalNavigator::default());
        let enrollment = HoldEnrollment::new(Duration::from_secs(3));
        let router = ControllerRouter::new(
            Arc::clone(&surface) as Arc<dyn ViewSurface>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&enrollment) as Arc<dyn EnrollmentService>,
            timings,
        );
        Fixture {
            surface,
            navigator,
            enrollment,
            router,
        }
    }

    fn short_timings() -> FlowTimings {
        FlowTimings {
            enrollment_hold_secs: 3,
            resend_lock_secs: 3,
            confirm_window_secs: 5,
        }
    }

    fn set_attribute(target: Selector, name: &str, value: &str) -> ViewEffect {
        ViewEffect::SetAttribute {
            target,
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_controller_is_noop_on_both_phases() {
        let mut fixture = fixture_with(FakeSurface::verification_screen(), short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::ready("forgot-password"))
            .unwrap();
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("forgot-password"))
            .unwrap();

        assert!(fixture.surface.effects().is_empty());
        assert_eq!(fixture.surface.watch_count(), 0);
        assert!(!fixture.router.has_active_session());
    }

    #[tokio::test]
    async fn test_primary_auth_captures_identifier_changes() {
        let surface = FakeSurface::with_targets(vec![anchors::username_input()]);
        let mut fixture = fixture_with(surface, short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::ready("primary-auth"))
            .unwrap();
        assert_eq!(fixture.surface.watch_count(), 1);

        fixture.router.handle_view_event(&ViewEvent::ValueChanged {
            target: anchors::username_input(),
            value: "user@example.com".to_string(),
        });
        assert_eq!(fixture.router.captured_identifier(), Some("user@example.com"));

        fixture.router.handle_view_event(&ViewEvent::ValueChanged {
            target: anchors::username_input(),
            value: "other@example.com".to_string(),
        });
        assert_eq!(
            fixture.router.captured_identifier(),
            Some("other@example.com")
        );
    }

    #[tokio::test]
    async fn test_primary_auth_tolerates_missing_input() {
        let mut fixture = fixture_with(FakeSurface::with_targets(Vec::new()), short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::ready("primary-auth"))
            .unwrap();

        assert_eq!(fixture.surface.watch_count(), 0);
        assert!(fixture.router.has_active_session());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enroll_choices_prepares_panel_and_navigates_once() {
        let surface = FakeSurface::with_targets(vec![anchors::enroll_panel()]);
        let mut fixture = fixture_with(surface, short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("enroll-choices"))
            .unwrap();

        let panel_effects = fixture.surface.effects_for(&anchors::enroll_panel());
        assert_eq!(panel_effects.len(), 3);
        assert_eq!(
            panel_effects[0],
            ViewEffect::SetVisible {
                target: anchors::enroll_panel(),
                visible: false
            }
        );
        assert!(matches!(
            &panel_effects[1],
            ViewEffect::SetContent { content, .. } if content.contains("enrolling")
        ));
        assert_eq!(
            panel_effects[2],
            ViewEffect::SetVisible {
                target: anchors::enroll_panel(),
                visible: true
            }
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fixture.navigator.visited(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enroll_reentry_supersedes_pending_navigation() {
        let surface = FakeSurface::with_targets(vec![anchors::enroll_panel()]);
        let mut fixture = fixture_with(surface, short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("enroll-choices"))
            .unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("enroll-choices"))
            .unwrap();

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(fixture.navigator.visited(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enrollment_receives_captured_identifier() {
        let surface = FakeSurface::with_targets(vec![
            anchors::username_input(),
            anchors::enroll_panel(),
        ]);
        let mut fixture = fixture_with(surface, short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::ready("primary-auth"))
            .unwrap();
        fixture.router.handle_view_event(&ViewEvent::ValueChanged {
            target: anchors::username_input(),
            value: "user@example.com".to_string(),
        });
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("enroll-choices"))
            .unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(
            fixture.enrollment.seen(),
            vec![Some("user@example.com".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_mfa_verify_auto_sends_once_per_entry() {
        let mut fixture = fixture_with(FakeSurface::verification_screen(), short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();
        assert_eq!(
            fixture.surface.activation_count(&anchors::resend_button()),
            1
        );

        // Re-entry tears the prior view down and auto-sends again.
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();
        assert_eq!(
            fixture.surface.activation_count(&anchors::resend_button()),
            2
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resend_lock_ticks_and_expiry() {
        let mut fixture = fixture_with(FakeSurface::verification_screen(), short_timings());
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1_500)).await;

        let resend = anchors::resend_button();
        let effects = fixture.surface.effects_for(&resend);
        assert!(effects.contains(&set_attribute(resend.clone(), "disabled", "")));
        assert!(effects.contains(&set_attribute(resend.clone(), "value", SENT_LABEL)));
        for class in anchors::DISABLED_MARKER_CLASSES {
            assert!(effects.contains(&ViewEffect::AddClass {
                target: resend.clone(),
                class: class.to_string(),
            }));
        }
        let warning_effects = fixture.surface.effects_for(&anchors::timeout_warning());
        assert!(warning_effects.contains(&ViewEffect::SetVisible {
            target: anchors::timeout_warning(),
            visible: false,
        }));

        // Past expiry the lock is released and the warning revealed.
        tokio::time::sleep(Duration::from_secs(3)).await;
        let effects = fixture.surface.effects_for(&resend);
        assert!(effects.contains(&ViewEffect::RemoveAttribute {
            target: resend.clone(),
            name: "disabled".to_string(),
        }));
        assert!(effects.contains(&set_attribute(resend.clone(), "value", RESEND_LABEL)));
        for class in anchors::DISABLED_MARKER_CLASSES {
            assert!(effects.contains(&ViewEffect::RemoveClass {
                target: resend.clone(),
                class: class.to_string(),
            }));
        }
        let warning_effects = fixture.surface.effects_for(&anchors::timeout_warning());
        assert!(warning_effects.contains(&ViewEffect::SetVisible {
            target: anchors::timeout_warning(),
            visible: true,
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_expiry_labels_then_disables() {
        let timings = FlowTimings {
            confirm_window_secs: 2,
            ..short_timings()
        };
        let mut fixture = fixture_with(FakeSurface::verification_screen(), timings);
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2_500)).await;

        let confirm = anchors::confirm_button();
        let effects = fixture.surface.effects_for(&confirm);
        let zero_label = effects
            .iter()
            .position(|e| *e == set_attribute(confirm.clone(), "value", "CONFIRM (0)"))
            .expect("zero tick should label the control");
        let disabled = effects
            .iter()
            .position(|e| *e == set_attribute(confirm.clone(), "disabled", ""))
            .expect("expiry should disable the control");
        assert!(zero_label < disabled, "label must precede disabling");
        for class in anchors::DISABLED_MARKER_CLASSES {
            assert!(effects.contains(&ViewEffect::AddClass {
                target: confirm.clone(),
                class: class.to_string(),
            }));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_activation_cancels_countdown() {
        let mut fixture = fixture_with(FakeSurface::verification_screen(), short_timings());
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        fixture.router.handle_view_event(&ViewEvent::Activated {
            target: anchors::confirm_button(),
        });

        let confirm = anchors::confirm_button();
        let effects_at_activation = fixture.surface.effects_for(&confirm);
        assert_eq!(
            effects_at_activation.last(),
            Some(&set_attribute(confirm.clone(), "value", CONFIRM_LABEL))
        );

        // No further tick or expiry effects for the confirm control.
        tokio::time::sleep(Duration::from_secs(20)).await;
        let effects_after = fixture.surface.effects_for(&confirm);
        assert_eq!(effects_at_activation, effects_after);
        assert!(!effects_after.contains(&set_attribute(confirm, "disabled", "")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_activation_on_a_tick_boundary_keeps_the_reset_label() {
        let mut fixture = fixture_with(FakeSurface::verification_screen(), short_timings());
        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();

        // Activate exactly when a tick is due, whichever task runs first.
        tokio::time::sleep(Duration::from_secs(2)).await;
        fixture.router.handle_view_event(&ViewEvent::Activated {
            target: anchors::confirm_button(),
        });
        tokio::time::sleep(Duration::from_secs(10)).await;

        let confirm = anchors::confirm_button();
        let effects = fixture.surface.effects_for(&confirm);
        assert_eq!(
            effects.last(),
            Some(&set_attribute(confirm, "value", CONFIRM_LABEL))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_resend_button_aborts_setup() {
        let surface = FakeSurface::with_targets(vec![
            anchors::button_bar(),
            anchors::confirm_button(),
            anchors::timeout_warning(),
        ]);
        let mut fixture = fixture_with(surface, short_timings());

        let result = fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"));

        match result {
            Err(crate::error::FlowError::MissingControl { selector }) => {
                assert_eq!(selector, anchors::resend_button());
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!fixture.router.has_active_session());

        // Nothing keeps ticking after the aborted setup.
        let before = fixture.surface.effects().len();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fixture.surface.effects().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_confirm_button_rolls_back_countdowns() {
        let surface = FakeSurface::with_targets(vec![
            anchors::resend_button(),
            anchors::button_bar(),
            anchors::timeout_warning(),
        ]);
        let mut fixture = fixture_with(surface, short_timings());

        let result = fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"));

        assert!(matches!(
            result,
            Err(crate::error::FlowError::MissingControl { .. })
        ));
        assert!(!fixture.router.has_active_session());

        let before = fixture.surface.effects().len();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fixture.surface.effects().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entering_new_view_stops_prior_timers() {
        let surface = FakeSurface::with_targets(vec![
            anchors::resend_button(),
            anchors::button_bar(),
            anchors::confirm_button(),
            anchors::timeout_warning(),
            anchors::enroll_panel(),
        ]);
        let mut fixture = fixture_with(surface, short_timings());

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("mfa-verify"))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1_100)).await;

        fixture
            .router
            .handle_lifecycle(&LifecycleEvent::after_render("enroll-choices"))
            .unwrap();
        let confirm_effects_before = fixture.surface.effects_for(&anchors::confirm_button());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let confirm_effects_after = fixture.surface.effects_for(&anchors::confirm_button());
        assert_eq!(confirm_effects_before, confirm_effects_after);
    }
}
