//! Match session and fixed-rate tick loop

use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::error::StageError;

use super::direction::Direction;
use super::snapshot::StageFrame;
use super::stage::Stage;

/// Control message from an input layer, applied at the start of the next tick
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMsg {
    /// Continuous stick/keyboard axes
    Axes { code: usize, h: f32, v: f32 },
    /// Already-classified direction
    Direction { code: usize, direction: Direction },
    JumpPressed { code: usize },
    JumpReleased { code: usize },
    /// End the match after the current tick
    Stop,
}

/// Result of a finished match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub ticks: u64,
    pub time: f64,
}

/// Handle to a running session
#[derive(Clone)]
pub struct MatchHandle {
    pub control_tx: mpsc::Sender<ControlMsg>,
    pub frame_tx: broadcast::Sender<StageFrame>,
}

impl MatchHandle {
    /// Receive every frame broadcast from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StageFrame> {
        self.frame_tx.subscribe()
    }

    /// Queue a control message. Returns false once the session has ended.
    pub async fn send(&self, msg: ControlMsg) -> bool {
        self.control_tx.send(msg).await.is_ok()
    }
}

/// Owns a [`Stage`] and ticks it in real time
pub struct MatchSession {
    stage: Stage,
    control_rx: mpsc::Receiver<ControlMsg>,
    frame_tx: broadcast::Sender<StageFrame>,
    /// Stop after this many ticks, 0 runs until stopped
    match_ticks: u64,
}

impl MatchSession {
    pub fn new(stage: Stage, match_ticks: u64) -> (Self, MatchHandle) {
        let (control_tx, control_rx) = mpsc::channel(256);
        let (frame_tx, _) = broadcast::channel(64);

        let handle = MatchHandle {
            control_tx,
            frame_tx: frame_tx.clone(),
        };

        let session = Self {
            stage,
            control_rx,
            frame_tx,
            match_ticks,
        };

        (session, handle)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Run the fixed-rate tick loop until the match ends
    pub async fn run(mut self) -> Result<MatchSummary, StageError> {
        let fighters = self.stage.fighters().len();
        info!(fighters, match_ticks = self.match_ticks, "Match started");

        let tick_duration = Duration::from_secs_f64(self.stage.clock().delta_time());
        let mut tick_interval = interval(tick_duration);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            // Drain input queue
            if !self.process_inputs()? {
                break;
            }

            self.stage.process();

            // No subscribers is fine
            let _ = self.frame_tx.send(self.stage.frame());

            if self.match_ticks > 0 && self.stage.clock().tick_count() >= self.match_ticks {
                break;
            }
        }

        let summary = MatchSummary {
            ticks: self.stage.clock().tick_count(),
            time: self.stage.clock().time(),
        };
        info!(ticks = summary.ticks, time = summary.time, "Match ended");
        Ok(summary)
    }

    /// Apply all pending control messages. Returns false when the match
    /// should stop.
    fn process_inputs(&mut self) -> Result<bool, StageError> {
        loop {
            let msg = match self.control_rx.try_recv() {
                Ok(msg) => msg,
                Err(TryRecvError::Empty) => return Ok(true),
                Err(TryRecvError::Disconnected) => {
                    info!("All match handles dropped");
                    return Ok(false);
                }
            };

            match msg {
                ControlMsg::Axes { code, h, v } => self.stage.set_axes(code, h, v)?,
                ControlMsg::Direction { code, direction } => {
                    self.stage.set_direction(code, direction)?
                }
                ControlMsg::JumpPressed { code } => self.stage.press_jump(code)?,
                ControlMsg::JumpReleased { code } => self.stage.release_jump(code)?,
                ControlMsg::Stop => {
                    info!("Stop requested");
                    return Ok(false);
                }
            }
        }
    }
}
