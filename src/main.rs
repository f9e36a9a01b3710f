// src/main.rs
mod activation;
mod bridge;
mod cursor;
mod data;
mod gesture;
mod landmarks;
mod pinch;
mod scroll;
mod session;
mod swipe;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use bridge::{dispatch, FrameEvent, FrameSource, InputInjector, JsonLineInjector, JsonLineSource, LogOverlay, OverlaySink};
use data::ActionLog;
use session::{HandsFreeSession, SessionConfig};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    info!(
        screen_width = config.screen_width,
        screen_height = config.screen_height,
        "starting hands-free session (make {} fists within {:.1}s to activate)",
        config.activation_count,
        config.activation_window,
    );

    let mut action_log = match &config.action_log_dir {
        Some(dir) => {
            let log = ActionLog::create(dir)?;
            info!("action log: {}", log.path().display());
            Some(log)
        }
        None => None,
    };

    let stdin = io::stdin();
    let mut source = JsonLineSource::new(stdin.lock());
    let stdout = io::stdout();
    let mut injector = JsonLineInjector::new(stdout.lock());
    let mut overlay = LogOverlay;
    let mut session = HandsFreeSession::new(&config);

    let start = Instant::now();
    run(
        &mut session,
        &mut source,
        &mut injector,
        &mut overlay,
        action_log.as_mut(),
        start,
    )?;

    if let Some(log) = action_log.as_mut() {
        log.flush()?;
    }
    info!("session ended");
    Ok(())
}

/// Synchronous pull-based frame loop: one event is fully classified,
/// routed and dispatched before the next is read. The clock is sampled
/// once per event so every decision in a frame agrees on "now".
fn run(
    session: &mut HandsFreeSession,
    source: &mut dyn FrameSource,
    injector: &mut dyn InputInjector,
    overlay: &mut dyn OverlaySink,
    mut action_log: Option<&mut ActionLog>,
    start: Instant,
) -> Result<()> {
    loop {
        let Some(event) = source.next_event()? else {
            info!("frame stream ended");
            return Ok(());
        };
        let now = start.elapsed().as_secs_f64();

        let frame = match event {
            FrameEvent::Shutdown => {
                info!("shutdown command received");
                return Ok(());
            }
            FrameEvent::Deactivate => {
                session.deactivate();
                continue;
            }
            FrameEvent::Frame(frame) => Some(frame),
            FrameEvent::NoHand => None,
        };

        let output = session.process_frame(frame.as_ref(), now);
        dispatch(&output.actions, injector)?;
        overlay.render(&output);
        if let Some(log) = action_log.as_deref_mut() {
            log.record(now, &output)?;
        }
    }
}

/// Optional single CLI argument: path to a JSON `SessionConfig`; missing
/// fields fall back to defaults.
fn load_config() -> Result<SessionConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(SessionConfig::default()),
    }
}
