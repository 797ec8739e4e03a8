use super::*;

fn controller() -> IdlePlaybackController {
    IdlePlaybackController::new(PlaybackConfig::default())
}

fn scheduled(effects: &[IdleEffect]) -> Vec<TimerToken> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            IdleEffect::Schedule { token, .. } => Some(*token),
            _ => None,
        })
        .collect()
}

// =============================================================
// Restart
// =============================================================

#[test]
fn restart_arms_both_timers() {
    let mut idle = controller();
    let effects = idle.restart();
    assert_eq!(effects[0], IdleEffect::CancelTimers);
    assert_eq!(
        &effects[1..],
        &[
            IdleEffect::Schedule { token: TimerToken { kind: TimerKind::Attract, generation: 1 }, delay_ms: 3_000 },
            IdleEffect::Schedule { token: TimerToken { kind: TimerKind::Advance, generation: 1 }, delay_ms: 60_000 },
        ]
    );
}

#[test]
fn restart_invalidates_previous_tokens() {
    let mut idle = controller();
    let first = scheduled(&idle.restart());
    idle.restart();
    for token in first {
        assert!(idle.on_timer(token).is_empty());
    }
}

// =============================================================
// Firing
// =============================================================

#[test]
fn attract_shows_cue_and_rotates() {
    let mut idle = controller();
    let tokens = scheduled(&idle.restart());
    let effects = idle.on_timer(tokens[0]);
    assert_eq!(effects[0], IdleEffect::ShowIdleCue);
    assert!(effects.contains(&IdleEffect::Scene(SceneCommand::ZoomOutFully { transition_ms: 1_000 })));
    assert!(effects.contains(&IdleEffect::Scene(SceneCommand::SetPitch { degrees: 0.0, transition_ms: 1_000 })));
    assert!(effects.contains(&IdleEffect::Scene(SceneCommand::StartAutoRotate { speed: -2.0 })));
    assert!(idle.is_cue_visible());
}

#[test]
fn advance_emits_advance() {
    let mut idle = controller();
    let tokens = scheduled(&idle.restart());
    assert_eq!(idle.on_timer(tokens[1]), vec![IdleEffect::Advance]);
}

#[test]
fn interaction_after_attract_hides_cue() {
    let mut idle = controller();
    let tokens = scheduled(&idle.restart());
    idle.on_timer(tokens[0]);
    let effects = idle.restart();
    assert!(effects.contains(&IdleEffect::HideIdleCue));
    assert!(!idle.is_cue_visible());
}

// =============================================================
// Suspension
// =============================================================

#[test]
fn suspend_cancels_pending_timers() {
    let mut idle = controller();
    let tokens = scheduled(&idle.restart());
    let effects = idle.suspend();
    assert_eq!(effects, vec![IdleEffect::CancelTimers]);
    for token in tokens {
        assert!(idle.on_timer(token).is_empty());
    }
}

#[test]
fn restart_while_suspended_schedules_nothing() {
    let mut idle = controller();
    idle.suspend();
    let effects = idle.restart();
    assert!(scheduled(&effects).is_empty());
    assert!(idle.is_suspended());
}

#[test]
fn resume_restarts_from_zero() {
    let mut idle = controller();
    idle.restart();
    idle.suspend();
    let tokens = scheduled(&idle.resume());
    assert_eq!(tokens.len(), 2);
    assert!(!idle.is_suspended());
    assert_eq!(idle.on_timer(tokens[1]), vec![IdleEffect::Advance]);
}
