//! Submission lifecycle of the login form

use std::fmt;

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionState {
    /// Waiting for input
    #[default]
    Idle,
    /// Running every field validator
    Validating,
    /// Authentication call outstanding
    Submitting,
    /// Signed in, automatic reset scheduled
    Succeeded,
    /// Last attempt failed, ready for a retry
    Failed,
}

impl SubmissionState {
    /// Whether the transition table allows `self -> next`
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Submitting)
                | (Validating, Idle)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    /// A submit attempt is accepted in this state
    pub fn accepts_submit(self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed)
    }

    /// Fields can be edited in this state
    pub fn is_input_enabled(self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::Validating => "Validating",
            SubmissionState::Submitting => "Submitting",
            SubmissionState::Succeeded => "Succeeded",
            SubmissionState::Failed => "Failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionState::*;

    const ALL: [SubmissionState; 5] = [Idle, Validating, Submitting, Succeeded, Failed];

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SubmissionState::default(), Idle);
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(Idle.can_transition_to(Validating));
        assert!(Validating.can_transition_to(Submitting));
        assert!(Validating.can_transition_to(Idle));
        assert!(Submitting.can_transition_to(Succeeded));
        assert!(Submitting.can_transition_to(Failed));
        assert!(Succeeded.can_transition_to(Idle));
        assert!(Failed.can_transition_to(Idle));
    }

    #[test]
    fn test_transition_count() {
        let allowed = ALL
            .iter()
            .flat_map(|from| ALL.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .count();
        assert_eq!(allowed, 7);
    }

    #[test]
    fn test_no_shortcuts() {
        assert!(!Idle.can_transition_to(Submitting));
        assert!(!Idle.can_transition_to(Succeeded));
        assert!(!Validating.can_transition_to(Succeeded));
        assert!(!Submitting.can_transition_to(Idle));
        assert!(!Succeeded.can_transition_to(Validating));
        assert!(!Failed.can_transition_to(Validating));
    }

    #[test]
    fn test_no_self_transitions() {
        for state in ALL {
            assert!(!state.can_transition_to(state), "{state} -> {state}");
        }
    }

    #[test]
    fn test_accepts_submit() {
        assert!(Idle.accepts_submit());
        assert!(Failed.accepts_submit());
        assert!(!Validating.accepts_submit());
        assert!(!Submitting.accepts_submit());
        assert!(!Succeeded.accepts_submit());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Submitting.to_string(), "Submitting");
    }
}
