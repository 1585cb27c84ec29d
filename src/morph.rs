//! Per-character morph between two frames.
//!
//! Each differing cell moves from its source character to the placeholder
//! and then to its target character. The two switch points of every cell are
//! jittered with [`rand01`] seeded by `(transition_id, stage, index)`, and
//! each switch is a soft threshold: a smoothstep probability compared against
//! a fixed per-cell draw. Since the draw never changes within a transition
//! and the probability only grows with progress, a cell never switches back.

use crate::easing::smoothstep;
use crate::hash::rand01;
use crate::{TextFrame, ROW_TERMINATOR};

/// Intermediate character every morphing cell passes through.
pub const PLACEHOLDER: char = '_';

/// Seed components distinguishing the two jitter draws and the switch draws.
const START_JITTER_SEED: u32 = 11;
const DURATION_JITTER_SEED: u32 = 22;
const SWITCH_STAGE_OFFSET: u32 = 33;
const SWITCH_WHICH_OFFSET: u32 = 500;

/// Flat cell index as a hash input. Indices past `u32::MAX` wrap.
#[inline]
fn seed_index(index: usize) -> u32 {
    index as u32
}

/// Timing group of a morphing cell, chosen from its source character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Underscores and apostrophes settle first.
    Early = 0,
    /// Everything else.
    Late = 1,
}

impl Stage {
    #[inline]
    pub fn classify(source: char) -> Self {
        match source {
            '_' | '\'' => Stage::Early,
            _ => Stage::Late,
        }
    }

    #[inline]
    fn seed(self) -> u32 {
        self as u32
    }
}

/// Base start and duration of a stage, in progress units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageWindow {
    pub start: f64,
    pub duration: f64,
}

impl StageWindow {
    pub const fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }
}

/// Timing constants for the character morph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MorphTiming {
    /// Window for [`Stage::Early`] cells
    pub early: StageWindow,
    /// Window for [`Stage::Late`] cells
    pub late: StageWindow,
    /// Start jitter scale; the drawn jitter is in `[0, start_jitter * 0.8)`
    pub start_jitter: f64,
    /// Duration jitter is in `[-duration_jitter, duration_jitter)`
    pub duration_jitter: f64,
    /// Floor for the jittered duration
    pub min_duration: f64,
    /// Half-width of the soft switch around each edge
    pub soft_width: f64,
    /// Fraction of the duration spent on the placeholder
    pub placeholder_portion: f64,
}

impl Default for MorphTiming {
    fn default() -> Self {
        Self {
            early: StageWindow::new(0.05, 0.12),
            late: StageWindow::new(0.15, 0.62),
            start_jitter: 0.3,
            duration_jitter: 0.2,
            min_duration: 0.08,
            soft_width: 0.02,
            placeholder_portion: 0.65,
        }
    }
}

/// The two progress values at which a cell switches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchEdges {
    /// Source to placeholder
    pub s0: f64,
    /// Placeholder to target
    pub s1: f64,
}

/// Timing decided for one differing cell within one transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPlan {
    pub stage: Stage,
    pub edges: SwitchEdges,
}

impl MorphTiming {
    #[inline]
    pub fn window(&self, stage: Stage) -> StageWindow {
        match stage {
            Stage::Early => self.early,
            Stage::Late => self.late,
        }
    }

    /// Jittered switch edges for the cell at flat `index`.
    pub fn edges(&self, transition_id: u32, stage: Stage, index: usize) -> SwitchEdges {
        let window = self.window(stage);
        let i = seed_index(index);

        let start_jitter =
            rand01(transition_id, stage.seed(), i, START_JITTER_SEED) * self.start_jitter * 0.8;
        let duration_jitter = (rand01(transition_id, stage.seed(), i, DURATION_JITTER_SEED) - 0.5)
            * 2.0
            * self.duration_jitter;

        let start = window.start + start_jitter;
        let duration = (window.duration + duration_jitter).max(self.min_duration);

        SwitchEdges {
            s0: start,
            s1: start + duration * self.placeholder_portion,
        }
    }

    /// Latest progress at which any cell can still be switching.
    ///
    /// When this is at or above 1, some cells may not reach their target by
    /// the end of the transition.
    pub fn latest_settle(&self) -> f64 {
        [self.early, self.late]
            .iter()
            .map(|w| {
                let start = w.start + self.start_jitter * 0.8;
                let duration = (w.duration + self.duration_jitter).max(self.min_duration);
                start + duration * self.placeholder_portion + self.soft_width
            })
            .fold(0.0, f64::max)
    }
}

/// Computes the displayed grid for a pair of frames at a given progress.
///
/// ## Example
///
/// ```rust
/// use cascii_morph::{CharacterMorphEngine, TextFrame};
///
/// let engine = CharacterMorphEngine::default();
/// let a = TextFrame::from_lines(["a_b"]);
/// let b = TextFrame::from_lines(["xyz"]);
///
/// assert_eq!(engine.render(&a, &b, 0.0, 1), "a_b");
/// assert_eq!(engine.render(&a, &b, 1.0, 1), "xyz");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharacterMorphEngine {
    timing: MorphTiming,
}

impl CharacterMorphEngine {
    pub fn new(timing: MorphTiming) -> Self {
        Self { timing }
    }

    #[inline]
    pub fn timing(&self) -> &MorphTiming {
        &self.timing
    }

    /// Timing for the cell at `index`, or `None` if the cell does not morph.
    pub fn plan(&self, source: char, target: char, index: usize, transition_id: u32) -> Option<CharacterPlan> {
        if source == ROW_TERMINATOR || target == ROW_TERMINATOR || source == target {
            return None;
        }
        let stage = Stage::classify(source);
        Some(CharacterPlan {
            stage,
            edges: self.timing.edges(transition_id, stage, index),
        })
    }

    /// Character shown at flat `index` for the given progress.
    pub fn morph_cell(&self, source: char, target: char, index: usize, progress: f64, transition_id: u32) -> char {
        if source == ROW_TERMINATOR || target == ROW_TERMINATOR {
            return ROW_TERMINATOR;
        }
        let Some(plan) = self.plan(source, target, index, transition_id) else {
            return source;
        };

        let ch = self.soft_switch(source, PLACEHOLDER, progress, plan.edges.s0, index, 0, plan.stage, transition_id);
        self.soft_switch(ch, target, progress, plan.edges.s1, index, 1, plan.stage, transition_id)
    }

    /// Morph two flat cell sequences of equal length.
    ///
    /// Both sequences must come from frames of the same shape.
    pub fn morph_cells(&self, source: &[char], target: &[char], progress: f64, transition_id: u32) -> String {
        debug_assert_eq!(source.len(), target.len(), "frames must be normalized to one shape");

        source
            .iter()
            .zip(target)
            .enumerate()
            .map(|(i, (&a, &b))| self.morph_cell(a, b, i, progress, transition_id))
            .collect()
    }

    /// Morph two frames, returning rows joined by newlines.
    pub fn render(&self, source: &TextFrame, target: &TextFrame, progress: f64, transition_id: u32) -> String {
        self.morph_cells(&source.cells(), &target.cells(), progress, transition_id)
    }

    #[allow(clippy::too_many_arguments)]
    fn soft_switch(
        &self,
        from: char,
        to: char,
        progress: f64,
        edge: f64,
        index: usize,
        which: u32,
        stage: Stage,
        transition_id: u32,
    ) -> char {
        let w = self.timing.soft_width;
        let p = smoothstep(edge - w, edge + w, progress);
        let r = rand01(
            transition_id,
            stage.seed() + SWITCH_STAGE_OFFSET,
            seed_index(index).wrapping_add(1),
            which + SWITCH_WHICH_OFFSET,
        );
        if r < p {
            to
        } else {
            from
        }
    }
}
