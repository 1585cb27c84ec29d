//! Reshaping raw frames into a common rectangle.
//!
//! The morph engine pairs cells of two frames by flat index, so every frame
//! it sees must share one row count and one column count. [`FrameSet`] is
//! the only way to hand frames to a [`crate::Player`], which keeps
//! unnormalized frames away from the engine.

use thiserror::Error;

use crate::{GridShape, TextFrame};

/// Spaces substituted for each tab character.
pub const TAB_WIDTH: usize = 4;

/// Error type for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The frame that defines the target shape does not exist.
    #[error("reference frame {index} is missing ({count} frames available)")]
    MissingReference { index: usize, count: usize },
}

/// Normalize `frames` in place to the shape of `frames[reference]`.
///
/// The target row count is the reference's row count; the target column
/// count is the longest raw reference row. Every frame is truncated or padded
/// with empty rows to the row count, then every row has `\r` removed, tabs
/// expanded to four spaces, and is truncated or space-padded to the column
/// count.
///
/// ## Example
///
/// ```rust
/// use cascii_morph::{normalize_frames, GridShape, TextFrame};
///
/// let mut frames = vec![
///     TextFrame::from_lines(["abc", "d"]),
///     TextFrame::from_lines(["wxyz", "1", "2"]),
/// ];
/// let shape = normalize_frames(&mut frames, 0).unwrap();
///
/// assert_eq!(shape, GridShape::new(2, 3));
/// assert_eq!(frames[0].to_text(), "abc\nd  ");
/// assert_eq!(frames[1].to_text(), "wxy\n1  ");
/// ```
pub fn normalize_frames(frames: &mut [TextFrame], reference: usize) -> Result<GridShape, NormalizeError> {
    let reference_frame = frames.get(reference).ok_or(NormalizeError::MissingReference {
        index: reference,
        count: frames.len(),
    })?;

    let shape = GridShape::new(reference_frame.row_count(), reference_frame.col_count());

    for frame in frames.iter_mut() {
        let rows = frame.rows_mut();
        rows.truncate(shape.rows);
        rows.resize_with(shape.rows, Vec::new);

        for row in rows.iter_mut() {
            *row = normalize_row(row, shape.cols);
        }
    }

    Ok(shape)
}

/// Clean up a single row and force it to exactly `cols` cells.
pub fn normalize_row(row: &[char], cols: usize) -> Vec<char> {
    let mut out = Vec::with_capacity(cols);
    for &ch in row {
        match ch {
            '\r' => {}
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            _ => out.push(ch),
        }
    }
    out.resize(cols, ' ');
    out
}

/// An ordered set of frames sharing one rectangular shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<TextFrame>,
    shape: GridShape,
}

impl FrameSet {
    /// Normalize raw frames against the first one.
    pub fn normalize(mut frames: Vec<TextFrame>) -> Result<Self, NormalizeError> {
        let shape = normalize_frames(&mut frames, 0)?;
        Ok(Self { frames, shape })
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[TextFrame] {
        &self.frames
    }
}
