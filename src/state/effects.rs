//! Declarative visual effects
//!
//! Cosmetic feedback (shakes, glows, pulses) is queued as plain values with a
//! start time and duration. The renderer asks the queue what is active for a
//! given target; nothing here feeds back into the form's control flow.

use std::time::{Duration, Instant};

/// Shake of a field or the whole card after a validation error
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);
/// Glow on a field that just validated
pub const SUCCESS_GLOW_DURATION: Duration = Duration::from_millis(2000);
/// Pulse on toggles, links and buttons
pub const PULSE_DURATION: Duration = Duration::from_millis(350);
/// Pulse on the password visibility toggle
pub const TOGGLE_PULSE_DURATION: Duration = Duration::from_millis(300);
/// Pulse on a social sign-in button
pub const SOCIAL_PULSE_DURATION: Duration = Duration::from_millis(500);

/// Horizontal amplitude of a shake, in cells
const SHAKE_AMPLITUDE: f32 = 2.0;
/// Full left-right swings per shake
const SHAKE_SWINGS: f32 = 4.0;

/// Colour family of a glow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Shake,
    Glow(Tone),
    Pulse,
}

/// Sign-in providers offered next to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Apple => "Apple",
        }
    }
}

/// Part of the card an effect applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectTarget {
    Card,
    Field(String),
    PasswordToggle,
    Checkbox,
    SubmitButton,
    ForgotLink,
    SignupLink,
    Social(Provider),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub target: EffectTarget,
    pub started_at: Instant,
    /// `None` holds the effect until it is removed explicitly
    pub duration: Option<Duration>,
}

impl Effect {
    pub fn new(kind: EffectKind, target: EffectTarget, started_at: Instant, duration: Duration) -> Self {
        Self {
            kind,
            target,
            started_at,
            duration: Some(duration),
        }
    }

    /// An effect that lasts until removed
    pub fn held(kind: EffectKind, target: EffectTarget, started_at: Instant) -> Self {
        Self {
            kind,
            target,
            started_at,
            duration: None,
        }
    }

    /// Fraction of the effect elapsed at `now` (0.0 to 1.0); held effects stay at 0.0
    pub fn progress(&self, now: Instant) -> f32 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                let elapsed = now.saturating_duration_since(self.started_at);
                (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.duration {
            Some(duration) => now.saturating_duration_since(self.started_at) >= duration,
            None => false,
        }
    }

    /// Horizontal displacement of a shake at `now`, damped towards zero
    pub fn shake_offset(&self, now: Instant) -> i16 {
        if self.kind != EffectKind::Shake || self.is_expired(now) {
            return 0;
        }
        let progress = self.progress(now);
        let damping = 1.0 - simple_easing::quad_in(progress);
        let phase = progress * SHAKE_SWINGS * std::f32::consts::TAU;
        (phase.sin() * SHAKE_AMPLITUDE * damping).round() as i16
    }
}

/// Active effects, at most one per (kind, target) pair
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    effects: Vec<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect, restarting any effect of the same kind on the same target
    pub fn push(&mut self, effect: Effect) {
        self.effects
            .retain(|e| !(e.kind == effect.kind && e.target == effect.target));
        self.effects.push(effect);
    }

    /// Remove every effect on a target
    pub fn remove_target(&mut self, target: &EffectTarget) {
        self.effects.retain(|e| &e.target != target);
    }

    /// Drop expired effects
    pub fn prune(&mut self, now: Instant) {
        self.effects.retain(|e| !e.is_expired(now));
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Most recently started live effect on a target
    #[cfg(test)]
    pub fn active_for(&self, target: &EffectTarget, now: Instant) -> Option<&Effect> {
        self.effects
            .iter()
            .rev()
            .find(|e| &e.target == target && !e.is_expired(now))
    }

    /// Live effect of a given kind on a target
    pub fn find(&self, kind: EffectKind, target: &EffectTarget, now: Instant) -> Option<&Effect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && &e.target == target && !e.is_expired(now))
    }

    /// Any live effect that needs frames to animate
    pub fn is_animating(&self, now: Instant) -> bool {
        self.effects
            .iter()
            .any(|e| e.duration.is_some() && !e.is_expired(now))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shake(target: EffectTarget, at: Instant) -> Effect {
        Effect::new(EffectKind::Shake, target, at, SHAKE_DURATION)
    }

    mod effect {
        use super::*;

        #[test]
        fn test_progress_runs_zero_to_one() {
            let start = Instant::now();
            let effect = shake(EffectTarget::Card, start);
            assert_eq!(effect.progress(start), 0.0);
            assert!((effect.progress(start + SHAKE_DURATION / 2) - 0.5).abs() < 0.01);
            assert_eq!(effect.progress(start + SHAKE_DURATION * 3), 1.0);
        }

        #[test]
        fn test_expires_after_duration() {
            let start = Instant::now();
            let effect = shake(EffectTarget::Card, start);
            assert!(!effect.is_expired(start + Duration::from_millis(499)));
            assert!(effect.is_expired(start + SHAKE_DURATION));
        }

        #[test]
        fn test_held_effect_never_expires() {
            let start = Instant::now();
            let effect = Effect::held(
                EffectKind::Glow(Tone::Accent),
                EffectTarget::SubmitButton,
                start,
            );
            assert!(!effect.is_expired(start + Duration::from_secs(3600)));
            assert_eq!(effect.progress(start + Duration::from_secs(1)), 0.0);
        }

        #[test]
        fn test_shake_settles_to_zero() {
            let start = Instant::now();
            let effect = shake(EffectTarget::Card, start);
            assert_eq!(effect.shake_offset(start), 0);
            assert_eq!(effect.shake_offset(start + SHAKE_DURATION), 0);
            let max = (0..50)
                .map(|ms| effect.shake_offset(start + Duration::from_millis(ms * 10)).abs())
                .max()
                .unwrap();
            assert!(max > 0 && max <= SHAKE_AMPLITUDE as i16);
        }

        #[test]
        fn test_glow_has_no_shake_offset() {
            let start = Instant::now();
            let effect = Effect::new(
                EffectKind::Glow(Tone::Danger),
                EffectTarget::Card,
                start,
                SHAKE_DURATION,
            );
            assert_eq!(effect.shake_offset(start + Duration::from_millis(60)), 0);
        }
    }

    mod effect_queue {
        use super::*;

        #[test]
        fn test_push_restarts_same_effect() {
            let start = Instant::now();
            let mut queue = EffectQueue::new();
            queue.push(shake(EffectTarget::Card, start));
            queue.push(shake(EffectTarget::Card, start + Duration::from_millis(100)));
            assert_eq!(queue.len(), 1);
            let active = queue.active_for(&EffectTarget::Card, start).unwrap();
            assert_eq!(active.started_at, start + Duration::from_millis(100));
        }

        #[test]
        fn test_different_kinds_coexist() {
            let start = Instant::now();
            let mut queue = EffectQueue::new();
            queue.push(shake(EffectTarget::Card, start));
            queue.push(Effect::new(
                EffectKind::Glow(Tone::Danger),
                EffectTarget::Card,
                start,
                SHAKE_DURATION,
            ));
            assert_eq!(queue.len(), 2);
            assert!(queue.find(EffectKind::Shake, &EffectTarget::Card, start).is_some());
        }

        #[test]
        fn test_prune_drops_expired() {
            let start = Instant::now();
            let mut queue = EffectQueue::new();
            queue.push(shake(EffectTarget::Card, start));
            queue.push(Effect::new(
                EffectKind::Glow(Tone::Accent),
                EffectTarget::Field("email".to_string()),
                start,
                SUCCESS_GLOW_DURATION,
            ));

            queue.prune(start + Duration::from_secs(1));

            assert_eq!(queue.len(), 1);
            assert!(queue
                .active_for(&EffectTarget::Field("email".to_string()), start)
                .is_some());
        }

        #[test]
        fn test_remove_target() {
            let start = Instant::now();
            let mut queue = EffectQueue::new();
            queue.push(shake(EffectTarget::Field("email".to_string()), start));
            queue.push(shake(EffectTarget::Card, start));
            queue.remove_target(&EffectTarget::Field("email".to_string()));
            assert_eq!(queue.len(), 1);
        }

        #[test]
        fn test_is_animating_ignores_held() {
            let start = Instant::now();
            let mut queue = EffectQueue::new();
            queue.push(Effect::held(EffectKind::Pulse, EffectTarget::SubmitButton, start));
            assert!(!queue.is_animating(start));
            queue.push(shake(EffectTarget::Card, start));
            assert!(queue.is_animating(start));
        }
    }

    #[test]
    fn test_provider_labels() {
        assert_eq!(Provider::Google.label(), "Google");
        assert_eq!(Provider::Apple.label(), "Apple");
    }
}
