//! Vestibule - Main Entry Point
//!
//! Wires the flow orchestrator to the in-memory adapters and plays a
//! scripted sign-in: primary credentials, a verification screen with its
//! two countdowns, a user confirmation, and the final redirect.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vestibule_application::{
    ControllerRouter, EnrollmentService, LoginFlow, Navigator, SignInOptions, ViewSurface,
};
use vestibule_domain::{anchors, AppConfig, CredentialTokens, LifecycleEvent, WidgetOptions};
use vestibule_infrastructure::{
    ConfigRepository, MemoryNavigator, MemorySessionManager, MemorySurface, ScriptedWidget,
    SimulatedEnrollment, SurfaceNode, WidgetScript,
};

#[derive(Parser)]
#[command(name = "vestibule")]
#[command(about = "Hosted sign-in flow orchestrator")]
struct Cli {
    #[arg(short, long, help = "Path to configuration file")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let repository = cli
        .config
        .map_or_else(ConfigRepository::new, ConfigRepository::with_path);
    let config = match repository.load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = config.provider.validate() {
        error!("Invalid provider configuration: {e}");
        std::process::exit(1);
    }

    info!(
        issuer = %config.provider.issuer,
        base_url = %config.provider.base_url(),
        token_exchange = config.provider.token_exchange,
        "Starting Vestibule"
    );

    if let Err(e) = run(&config).await {
        error!("Sign-in flow failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (surface, view_events) = MemorySurface::channel();
    let surface = Arc::new(surface);
    let (lifecycle_tx, lifecycle_events) = mpsc::unbounded_channel::<LifecycleEvent>();

    let navigator = Arc::new(MemoryNavigator::new("http://localhost:4200"));
    let session_manager = Arc::new(MemorySessionManager::new(
        Arc::clone(&navigator) as Arc<dyn Navigator>
    ));
    let enrollment = Arc::new(SimulatedEnrollment::new(config.timings.enrollment_hold()));
    let widget = Arc::new(ScriptedWidget::new(
        Arc::clone(&surface),
        lifecycle_tx,
        demo_script(&config.widget),
    ));

    let router = ControllerRouter::new(
        Arc::clone(&surface) as Arc<dyn ViewSurface>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        enrollment as Arc<dyn EnrollmentService>,
        config.timings,
    );
    let mut flow = LoginFlow::new(
        Arc::clone(&widget),
        Arc::clone(&session_manager),
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        router,
    );

    let options = SignInOptions::new("#sign-in-widget", config.provider.scopes.clone());
    flow.run(options, lifecycle_events, view_events).await?;

    if let Some(login) = session_manager.completed().await {
        info!(completed_at = %login.completed_at, "Session established");
    }
    info!(visited = ?navigator.visited(), "Navigation log");

    Ok(())
}

/// The sign-in the widget plays: credentials, verification, confirmation.
fn demo_script(widget: &WidgetOptions) -> WidgetScript {
    WidgetScript::new()
        .render(primary_screen(widget))
        .emit(LifecycleEvent::ready("primary-auth"))
        .type_into(anchors::username_input(), "user@example.com")
        .wait(Duration::from_secs(1))
        .render(verification_screen())
        .emit(LifecycleEvent::after_render("mfa-verify"))
        .wait(Duration::from_secs(3))
        .click(anchors::confirm_button())
        .wait(Duration::from_millis(500))
        .resolve(CredentialTokens::bearer("demo.id.jwt", "demo.access.jwt"))
}

/// The primary credential screen, branded with the configured widget
/// options.
fn primary_screen(widget: &WidgetOptions) -> Vec<SurfaceNode> {
    let title = widget.title.clone().unwrap_or_else(|| "Sign In".to_string());
    let mut nodes = Vec::new();
    if let Some(logo) = &widget.logo {
        nodes.push(
            SurfaceNode::new()
                .with_class("auth-logo")
                .with_content(logo.clone()),
        );
    }
    nodes.push(SurfaceNode::new().with_class("form-title").with_content(title));
    nodes.push(SurfaceNode::new().with_id(anchors::USERNAME_INPUT_ID));
    nodes
}

fn verification_screen() -> Vec<SurfaceNode> {
    vec![
        SurfaceNode::new()
            .with_class(anchors::RESEND_BUTTON_CLASS)
            .with_content("Re-send code"),
        SurfaceNode::new().with_class(anchors::BUTTON_BAR_CLASS),
        SurfaceNode::new()
            .with_class(anchors::CONFIRM_BUTTON_CLASS)
            .with_content("CONFIRM"),
        SurfaceNode::new().with_class(anchors::TIMEOUT_WARNING_CLASS),
    ]
}
