//! Entrance animation state for the login card

use std::time::{Duration, Instant};

/// Animation phase for the card entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrancePhase {
    /// Card not drawn yet
    Hidden,
    /// Card sliding up into place
    SlideIn,
    /// Animation finished
    Settled,
}

/// Card entrance animation state
#[derive(Debug)]
pub struct EntranceState {
    /// When the entrance started
    pub start_time: Instant,
    /// Current animation phase
    pub phase: EntrancePhase,
    /// Rows the card is still below its resting position
    pub offset: f32,
    /// Fields revealed so far (inputs appear staggered)
    pub visible_fields: usize,
}

impl EntranceState {
    /// Delay before the card starts moving
    const HIDDEN_DURATION: Duration = Duration::from_millis(200);
    /// Duration of the slide-in
    const SLIDE_DURATION: Duration = Duration::from_millis(800);
    /// Gap between consecutive inputs appearing
    const FIELD_STAGGER: Duration = Duration::from_millis(200);
    /// Distance the card travels, in rows
    const SLIDE_ROWS: f32 = 6.0;

    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            phase: EntrancePhase::Hidden,
            offset: Self::SLIDE_ROWS,
            visible_fields: 0,
        }
    }

    /// Update animation state for the given instant
    pub fn update(&mut self, now: Instant, field_count: usize) {
        let elapsed = now.saturating_duration_since(self.start_time);

        if elapsed < Self::HIDDEN_DURATION {
            self.phase = EntrancePhase::Hidden;
            self.offset = Self::SLIDE_ROWS;
        } else if elapsed < Self::HIDDEN_DURATION + Self::SLIDE_DURATION {
            self.phase = EntrancePhase::SlideIn;
            let slide_elapsed = elapsed - Self::HIDDEN_DURATION;
            let progress = slide_elapsed.as_secs_f32() / Self::SLIDE_DURATION.as_secs_f32();
            let eased = simple_easing::cubic_out(progress);
            self.offset = (1.0 - eased) * Self::SLIDE_ROWS;
        } else {
            self.phase = EntrancePhase::Settled;
            self.offset = 0.0;
        }

        // First input shows as soon as the card does, the rest follow one stagger apart
        self.visible_fields = if self.phase == EntrancePhase::Hidden {
            0
        } else {
            let since_shown = elapsed - Self::HIDDEN_DURATION;
            let staggered = (since_shown.as_millis() / Self::FIELD_STAGGER.as_millis()) as usize + 1;
            staggered.min(field_count)
        };
        if self.phase == EntrancePhase::Settled {
            self.visible_fields = field_count;
        }
    }

    /// Skip to completion (user pressed a key)
    pub fn skip(&mut self, field_count: usize) {
        self.phase = EntrancePhase::Settled;
        self.offset = 0.0;
        self.visible_fields = field_count;
    }

    pub fn is_settled(&self) -> bool {
        self.phase == EntrancePhase::Settled
    }

    /// Whole rows to shift the card down by
    pub fn row_offset(&self) -> u16 {
        self.offset.round().max(0.0) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_hidden() {
        let state = EntranceState::new(Instant::now());
        assert_eq!(state.phase, EntrancePhase::Hidden);
        assert_eq!(state.visible_fields, 0);
        assert_eq!(state.row_offset(), 6);
    }

    #[test]
    fn test_stays_hidden_during_delay() {
        let start = Instant::now();
        let mut state = EntranceState::new(start);
        state.update(start + Duration::from_millis(100), 2);
        assert_eq!(state.phase, EntrancePhase::Hidden);
        assert_eq!(state.visible_fields, 0);
    }

    #[test]
    fn test_slides_in_and_staggers_fields() {
        let start = Instant::now();
        let mut state = EntranceState::new(start);

        state.update(start + Duration::from_millis(250), 2);
        assert_eq!(state.phase, EntrancePhase::SlideIn);
        assert_eq!(state.visible_fields, 1);
        assert!(state.offset > 0.0 && state.offset < 6.0);

        state.update(start + Duration::from_millis(450), 2);
        assert_eq!(state.visible_fields, 2);
    }

    #[test]
    fn test_offset_decreases_monotonically() {
        let start = Instant::now();
        let mut state = EntranceState::new(start);
        let mut last = f32::MAX;
        for ms in (200..1000).step_by(50) {
            state.update(start + Duration::from_millis(ms), 2);
            assert!(state.offset <= last);
            last = state.offset;
        }
    }

    #[test]
    fn test_settles_after_slide() {
        let start = Instant::now();
        let mut state = EntranceState::new(start);
        state.update(start + Duration::from_millis(1000), 2);
        assert!(state.is_settled());
        assert_eq!(state.row_offset(), 0);
        assert_eq!(state.visible_fields, 2);
    }

    #[test]
    fn test_skip_immediately_settles() {
        let mut state = EntranceState::new(Instant::now());
        state.skip(2);
        assert!(state.is_settled());
        assert_eq!(state.visible_fields, 2);
        assert_eq!(state.row_offset(), 0);
    }

    #[test]
    fn test_multiple_skips_do_not_break() {
        let mut state = EntranceState::new(Instant::now());
        state.skip(2);
        state.skip(2);
        assert!(state.is_settled());
    }
}
