//! Text layout for painting frames and status messages.
//!
//! Layout only places lines at fixed positions for a given font size.
//! Choosing the font size to fit a surface is left to the caller.

/// Configuration for laying out frame text.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Font size in pixels
    pub font_size: f64,
    /// Line height as a multiple of the font size
    pub line_height_mult: f64,
}

impl RenderConfig {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Get the line height for this config.
    #[inline]
    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_height_mult
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 6.0,
            line_height_mult: 1.05,
        }
    }
}

/// Font size used for loading and error messages.
pub const STATUS_FONT_SIZE: f64 = 16.0;
/// Line spacing used for loading and error messages.
pub const STATUS_LEADING: f64 = 20.0;
/// Top-left baseline of the first status line.
pub const STATUS_ORIGIN: (f64, f64) = (20.0, 30.0);

/// Result of a layout operation.
///
/// This is a platform-agnostic list of text lines and baselines; each
/// backend decides how to draw them.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    /// Font size in pixels
    pub font_size: f64,
    /// Distance between consecutive baselines
    pub line_height: f64,
    /// Lines to draw, top to bottom
    pub lines: Vec<TextLine>,
}

/// One line of text and the position of its baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// X position in pixels
    pub x: f64,
    /// Baseline Y position in pixels
    pub y: f64,
}

/// Lay out morph output (rows joined by newlines).
///
/// The first baseline sits one line height below the top edge.
///
/// ## Example
///
/// ```rust
/// use cascii_morph::render::{layout_text, RenderConfig};
///
/// let result = layout_text("ab\ncd", &RenderConfig::new(10.0));
/// assert_eq!(result.lines.len(), 2);
/// assert_eq!(result.lines[0].y, 10.5);
/// assert_eq!(result.lines[1].y, 21.0);
/// ```
pub fn layout_text(text: &str, config: &RenderConfig) -> RenderResult {
    let line_height = config.line_height();
    layout_lines(text, config.font_size, line_height, (0.0, line_height))
}

/// Lay out a loading or error message.
pub fn layout_status(message: &str) -> RenderResult {
    layout_lines(message, STATUS_FONT_SIZE, STATUS_LEADING, STATUS_ORIGIN)
}

fn layout_lines(text: &str, font_size: f64, line_height: f64, origin: (f64, f64)) -> RenderResult {
    let (x, y0) = origin;
    let lines = text
        .split('\n')
        .enumerate()
        .map(|(row, line)| TextLine {
            text: line.to_string(),
            x,
            y: y0 + row as f64 * line_height,
        })
        .collect();

    RenderResult {
        font_size,
        line_height,
        lines,
    }
}

/// Web-specific painting.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    /// Fallback font family when the custom font is unavailable.
    pub const FALLBACK_FONT: &str = "monospace";

    /// Paint laid-out lines as black text on a white canvas.
    ///
    /// The canvas keeps its current size.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use cascii_morph::render::{layout_text, RenderConfig};
    /// use cascii_morph::render::web::{paint_lines, FALLBACK_FONT};
    ///
    /// let canvas: web_sys::HtmlCanvasElement = // ... get canvas element
    /// let result = layout_text(&player.tick(now), &RenderConfig::default());
    /// paint_lines(&canvas, &result, FALLBACK_FONT)?;
    /// ```
    pub fn paint_lines(canvas: &HtmlCanvasElement, result: &RenderResult, font_family: &str) -> Result<(), String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        ctx.set_fill_style_str("rgb(255,255,255)");
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_fill_style_str("rgb(0,0,0)");
        ctx.set_font(&format!("{:.2}px {}", result.font_size, font_family));
        ctx.set_text_baseline("alphabetic");

        for line in &result.lines {
            ctx.fill_text(&line.text, line.x, line.y)
                .map_err(|_| "Failed to fill text")?;
        }

        Ok(())
    }
}
