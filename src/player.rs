//! The owning context a render loop drives.

use std::time::Duration;

use crate::loader::AssetLoaderState;
use crate::{
    CharacterMorphEngine, ClockConfig, ClockEvent, FrameSet, GridShape, MorphTiming, TransitionClock,
    TransitionState,
};

/// Normalized frames, the transition clock and the morph engine.
///
/// A driver calls [`tick`](Self::tick) (or [`advance`](Self::advance)
/// followed by [`render`](Self::render)) once per display refresh and paints
/// the returned text.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use cascii_morph::{ClockConfig, FrameSet, MorphTiming, Player, TextFrame};
///
/// let frames = FrameSet::normalize(vec![
///     TextFrame::from_lines(["/\\", "\\/"]),
///     TextFrame::from_lines(["--", "--"]),
/// ])
/// .unwrap();
/// let mut player = Player::new(frames, ClockConfig::default(), MorphTiming::default());
///
/// let text = player.tick(Duration::ZERO);
/// assert_eq!(text.lines().count(), player.shape().rows);
/// ```
#[derive(Clone, Debug)]
pub struct Player {
    frames: FrameSet,
    clock: TransitionClock,
    engine: CharacterMorphEngine,
}

impl Player {
    pub fn new(frames: FrameSet, clock: ClockConfig, timing: MorphTiming) -> Self {
        let clock = TransitionClock::new(frames.len(), clock);
        Self {
            frames,
            clock,
            engine: CharacterMorphEngine::new(timing),
        }
    }

    /// Build a player from a finished loading run.
    ///
    /// Returns `None` unless the run is ready; a failed run never plays.
    pub fn from_loader(state: &mut AssetLoaderState, clock: ClockConfig, timing: MorphTiming) -> Option<Self> {
        if !state.is_ready() {
            return None;
        }
        state.take_frames().map(|frames| Self::new(frames, clock, timing))
    }

    /// Normalized frame dimensions, for layout.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.frames.shape()
    }

    #[inline]
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    #[inline]
    pub fn clock(&self) -> &TransitionClock {
        &self.clock
    }

    #[inline]
    pub fn engine(&self) -> &CharacterMorphEngine {
        &self.engine
    }

    pub fn state(&self) -> TransitionState {
        self.clock.state()
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self, now: Duration) -> ClockEvent {
        self.clock.tick(now)
    }

    /// Text for the running transition at the clock's eased progress.
    pub fn render(&self) -> String {
        self.render_at(self.clock.eased_progress(), self.clock.transition_id())
    }

    /// Text for the running frame pair at an explicit progress and id.
    pub fn render_at(&self, progress: f64, transition_id: u32) -> String {
        let source = self.frames.get(self.clock.current_index());
        let target = self.frames.get(self.clock.next_index());
        match (source, target) {
            (Some(source), Some(target)) => self.engine.render(source, target, progress, transition_id),
            _ => String::new(),
        }
    }

    /// Advance, then render.
    pub fn tick(&mut self, now: Duration) -> String {
        self.advance(now);
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::AssetManifest;
    use crate::TextFrame;

    fn three_frames() -> FrameSet {
        FrameSet::normalize(vec![
            TextFrame::from_lines(["a_b", "'x'"]),
            TextFrame::from_lines(["xyz", "'y"]),
            TextFrame::from_lines(["___"]),
        ])
        .unwrap()
    }

    fn quick_clock() -> ClockConfig {
        ClockConfig {
            speed: 0.1,
            hold: Duration::from_millis(50),
            ..ClockConfig::default()
        }
    }

    #[test]
    fn renders_source_at_start_and_target_at_hold() {
        let mut player = Player::new(three_frames(), quick_clock(), MorphTiming::default());
        assert_eq!(player.render(), "a_b\n'x'");

        let mut now = Duration::ZERO;
        while player.advance(now) != ClockEvent::HoldStarted {
            now += Duration::from_millis(16);
        }
        assert_eq!(player.render(), "xyz\n'y ");
    }

    #[test]
    fn cycles_through_every_frame_and_wraps() {
        let mut player = Player::new(three_frames(), quick_clock(), MorphTiming::default());
        let mut now = Duration::ZERO;
        let mut starts = Vec::new();

        while starts.len() < 3 {
            now += Duration::from_millis(20);
            if let ClockEvent::TransitionStarted { id } = player.advance(now) {
                starts.push((id, player.state().current_index));
                // New transitions begin on their source frame
                let source = player.frames().get(player.state().current_index).unwrap();
                assert_eq!(player.render_at(0.0, id), source.to_text());
            }
        }
        assert_eq!(starts, vec![(2, 1), (3, 2), (4, 0)]);
    }

    #[test]
    fn output_keeps_grid_shape() {
        let mut player = Player::new(three_frames(), quick_clock(), MorphTiming::default());
        let shape = player.shape();
        for i in 0..200 {
            let text = player.tick(Duration::from_millis(i * 16));
            let rows: Vec<&str> = text.split('\n').collect();
            assert_eq!(rows.len(), shape.rows);
            assert!(rows.iter().all(|r| r.chars().count() == shape.cols));
        }
    }

    #[test]
    fn failed_load_never_plays() {
        let manifest = AssetManifest::default();
        let mut state = AssetLoaderState::new(&manifest);
        state.record_text(0, Ok("a".into()));
        state.record_text(1, Ok("b".into()));
        state.record_text(2, Err("missing".into()));
        state.record_font(Ok(Vec::new()));

        assert!(Player::from_loader(&mut state, quick_clock(), MorphTiming::default()).is_none());
    }

    #[test]
    fn ready_load_plays() {
        let manifest = AssetManifest::default();
        let mut state = AssetLoaderState::new(&manifest);
        for i in 0..3 {
            state.record_text(i, Ok(format!("frame {i}")));
        }
        state.record_font(Err("no font".into()));

        let player = Player::from_loader(&mut state, quick_clock(), MorphTiming::default()).unwrap();
        assert_eq!(player.shape(), GridShape::new(1, 7));
        assert_eq!(player.render(), "frame 0");
    }
}
