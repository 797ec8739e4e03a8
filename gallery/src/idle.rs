//! Idle playback: the attract cue and the auto-advance timer.
//!
//! DESIGN
//! ======
//! Two one-shot timers are always armed and cancelled together. The
//! controller does not own real timers; it emits [`IdleEffect::Schedule`]
//! with a [`TimerToken`] and the host calls [`IdlePlaybackController::on_timer`]
//! when the delay elapses. Every restart or suspension bumps the generation,
//! so a callback that slipped past cancellation carries an old token and is
//! ignored.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

use crate::config::PlaybackConfig;
use crate::scene::SceneCommand;

/// Which of the two idle timers fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Attract,
    Advance,
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Side effects for the host to apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum IdleEffect {
    /// Arm a one-shot timer.
    Schedule { token: TimerToken, delay_ms: u32 },
    /// Drop every pending idle timer.
    CancelTimers,
    ShowIdleCue,
    HideIdleCue,
    Scene(SceneCommand),
    /// Move to the next image.
    Advance,
}

#[derive(Debug, Clone)]
pub struct IdlePlaybackController {
    config: PlaybackConfig,
    generation: u64,
    suspended: bool,
    cue_visible: bool,
}

impl IdlePlaybackController {
    #[must_use]
    pub fn new(config: PlaybackConfig) -> Self {
        Self { config, generation: 0, suspended: false, cue_visible: false }
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    #[must_use]
    pub fn is_cue_visible(&self) -> bool {
        self.cue_visible
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Restart both timers from zero. While suspended this only cancels.
    pub fn restart(&mut self) -> Vec<IdleEffect> {
        let mut effects = self.cancel();
        if self.suspended {
            return effects;
        }
        effects.push(IdleEffect::Schedule {
            token: TimerToken { kind: TimerKind::Attract, generation: self.generation },
            delay_ms: self.config.attract_delay_ms,
        });
        effects.push(IdleEffect::Schedule {
            token: TimerToken { kind: TimerKind::Advance, generation: self.generation },
            delay_ms: self.config.advance_delay_ms,
        });
        effects
    }

    /// Cancel both timers and hold them off until [`Self::resume`].
    pub fn suspend(&mut self) -> Vec<IdleEffect> {
        self.suspended = true;
        self.cancel()
    }

    /// Leave suspension and restart both timers from zero.
    pub fn resume(&mut self) -> Vec<IdleEffect> {
        self.suspended = false;
        self.restart()
    }

    /// Handle an elapsed timer. Stale or suspended tokens produce nothing.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<IdleEffect> {
        if self.suspended || token.generation != self.generation {
            tracing::debug!(?token, current = self.generation, "ignoring stale idle timer");
            return Vec::new();
        }
        match token.kind {
            TimerKind::Attract => {
                self.cue_visible = true;
                let transition_ms = self.config.attract_transition_ms;
                vec![
                    IdleEffect::ShowIdleCue,
                    IdleEffect::Scene(SceneCommand::ZoomOutFully { transition_ms }),
                    IdleEffect::Scene(SceneCommand::SetPitch { degrees: 0.0, transition_ms }),
                    IdleEffect::Scene(SceneCommand::StartAutoRotate { speed: self.config.auto_rotate_speed }),
                ]
            }
            TimerKind::Advance => {
                tracing::info!("idle timeout reached; advancing to next image");
                vec![IdleEffect::Advance]
            }
        }
    }

    fn cancel(&mut self) -> Vec<IdleEffect> {
        self.generation += 1;
        let mut effects = vec![IdleEffect::CancelTimers];
        if self.cue_visible {
            self.cue_visible = false;
            effects.push(IdleEffect::HideIdleCue);
        }
        effects
    }
}
