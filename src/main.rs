//! Punch Arena - headless match runner
//!
//! Runs an arena match in real time on the fixed-timestep simulation. It handles:
//! - Seeded bot input for every fighter
//! - Render-rate interpolation of fighter positions
//! - Graceful shutdown on Ctrl+C / SIGTERM

use std::time::Instant;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use punch_arena::config::Config;
use punch_arena::game::bot::BotInput;
use punch_arena::game::{
    ArenaBounds, ControlMsg, MatchHandle, MatchSession, SnapshotHistory, Stage, StageFrame,
};
use punch_arena::util::time::tick_duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!("Starting Punch Arena");
    info!(
        width = config.arena_width,
        height = config.arena_height,
        fighters = config.fighter_count,
        tick_rate = config.tick_rate,
        "Arena configured"
    );

    let bounds = ArenaBounds::from_size(config.arena_width, config.arena_height)?;
    let stage = Stage::new(config.fighter_count, bounds, config.tick_rate)?
        .with_history(config.snapshot_history);
    let (session, handle) = MatchSession::new(stage, config.match_ticks);

    // Subscribe before the first tick so no frame is missed
    let renderer = tokio::spawn(run_renderer(handle.subscribe(), &config));
    let bots = tokio::spawn(run_bots(handle.clone(), &config));

    let mut match_task = tokio::spawn(session.run());

    let summary = tokio::select! {
        result = &mut match_task => result??,
        _ = shutdown_signal() => {
            let _ = handle.send(ControlMsg::Stop).await;
            match_task.await??
        }
    };

    bots.abort();
    renderer.abort();

    info!(ticks = summary.ticks, seconds = summary.time, "Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // Exactly one of the two output layers is installed
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Feed bot commands into the match once per tick
fn run_bots(handle: MatchHandle, config: &Config) -> impl std::future::Future<Output = ()> {
    let mut bot = BotInput::new(config.bot_seed, config.fighter_count);
    let period = tick_duration(config.tick_rate);

    async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            for cmd in bot.next_commands() {
                if !handle.send(cmd).await {
                    debug!("Match closed, bots stopping");
                    return;
                }
            }
        }
    }
}

/// Keep the last two frames and sample interpolated positions at the render rate
fn run_renderer(
    mut frames: broadcast::Receiver<StageFrame>,
    config: &Config,
) -> impl std::future::Future<Output = ()> {
    let tick_secs = tick_duration(config.tick_rate).as_secs_f64();
    let render_period = tick_duration(config.render_rate);
    let fighter_count = config.fighter_count;
    let frames_per_report = config.tick_rate.max(1) as u64;

    async move {
        let mut histories = vec![SnapshotHistory::bounded(2); fighter_count];
        let mut last_frame_at: Option<Instant> = None;
        let mut ticker = interval(render_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                frame = frames.recv() => match frame {
                    Ok(frame) => {
                        trace!(frame = %serde_json::to_string(&frame).unwrap_or_default(), "Frame");
                        for (history, snapshot) in histories.iter_mut().zip(&frame.fighters) {
                            history.push(*snapshot);
                        }
                        last_frame_at = Some(Instant::now());

                        if frame.tick % frames_per_report == 0 {
                            for (code, f) in frame.fighters.iter().enumerate() {
                                info!(
                                    tick = frame.tick,
                                    code,
                                    x = f.position.x,
                                    y = f.position.y,
                                    grounded = f.is_grounded,
                                    "Fighter status"
                                );
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "Renderer fell behind"),
                    Err(RecvError::Closed) => return,
                },
                _ = ticker.tick() => {
                    let Some(at) = last_frame_at else { continue };
                    let fraction = (at.elapsed().as_secs_f64() / tick_secs).min(1.0) as f32;
                    for (code, history) in histories.iter().enumerate() {
                        if let Some(position) = history.interpolate(fraction) {
                            trace!(code, x = position.x, y = position.y, fraction, "Render");
                        }
                    }
                }
            }
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
