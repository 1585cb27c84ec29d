//! Asset loading and readiness tracking.
//!
//! Frames only become usable once every expected resource has reported back.
//! [`AssetLoaderState`] is a counted barrier: each text or font resource
//! records exactly one completion, success or failure, and when the count
//! reaches the expected total the state settles on [`LoadingPhase::Ready`]
//! or, permanently, [`LoadingPhase::Failed`].

use futures_util::future::join_all;
use thiserror::Error;

use crate::{FrameSet, NormalizeError, TextFrame};

/// Result type for provider I/O operations.
pub type LoadResult<T> = Result<T, String>;

/// Loading phase indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Nothing expected yet
    Idle,
    /// Waiting for completions
    Loading,
    /// All text resources loaded and normalized
    Ready,
    /// At least one required resource failed; no frames for this run
    Failed,
}

/// Named failure of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("TXT{index} failed ({path}): {reason}")]
    Text {
        index: usize,
        path: String,
        reason: String,
    },
    #[error("FONT failed ({path}): {reason}")]
    Font { path: String, reason: String },
    #[error("frames could not be normalized: {0}")]
    Shape(#[from] NormalizeError),
}

impl LoadError {
    /// Whether this failure prevents playback.
    ///
    /// A missing font only costs the custom typeface.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoadError::Font { .. })
    }
}

/// Resources the show needs, relative to an asset directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetManifest {
    pub asset_dir: String,
    pub text_files: Vec<String>,
    pub font_file: Option<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            asset_dir: "data/".to_string(),
            text_files: vec![
                "frame_0.txt".to_string(),
                "frame_1.txt".to_string(),
                "frame_2.txt".to_string(),
            ],
            font_file: Some("font.otf".to_string()),
        }
    }
}

impl AssetManifest {
    /// Number of completions the loader waits for.
    pub fn expected(&self) -> usize {
        self.text_files.len() + usize::from(self.font_file.is_some())
    }

    pub fn text_path(&self, index: usize) -> Option<String> {
        self.text_files.get(index).map(|f| self.join(f))
    }

    pub fn font_path(&self) -> Option<String> {
        self.font_file.as_deref().map(|f| self.join(f))
    }

    fn join(&self, file: &str) -> String {
        if self.asset_dir.is_empty() || self.asset_dir.ends_with('/') {
            format!("{}{}", self.asset_dir, file)
        } else {
            format!("{}/{}", self.asset_dir, file)
        }
    }
}

/// Progress information for asset loading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    /// Completions recorded so far, successful or not
    pub loaded: usize,
    /// Completions expected
    pub total: usize,
}

impl LoadingProgress {
    /// Get loading percentage (0-100)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.loaded as f32 / self.total as f32) * 100.0) as u8
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

/// Counted-completion state for one loading run.
#[derive(Clone, Debug)]
pub struct AssetLoaderState {
    phase: LoadingPhase,
    progress: LoadingProgress,
    manifest: AssetManifest,
    texts: Vec<Option<TextFrame>>,
    /// Which slots have reported, so duplicates are not counted twice
    text_done: Vec<bool>,
    font_done: bool,
    font: Option<Vec<u8>>,
    frames: Option<FrameSet>,
    errors: Vec<LoadError>,
}

impl Default for AssetLoaderState {
    fn default() -> Self {
        Self::new(&AssetManifest {
            asset_dir: String::new(),
            text_files: Vec::new(),
            font_file: None,
        })
    }
}

impl AssetLoaderState {
    /// Start a loading run expecting every resource in `manifest`.
    ///
    /// An empty manifest starts `Idle` and never becomes ready.
    pub fn new(manifest: &AssetManifest) -> Self {
        let count = manifest.text_files.len();
        let total = manifest.expected();
        Self {
            phase: if total == 0 {
                LoadingPhase::Idle
            } else {
                LoadingPhase::Loading
            },
            progress: LoadingProgress { loaded: 0, total },
            manifest: manifest.clone(),
            texts: vec![None; count],
            text_done: vec![false; count],
            font_done: manifest.font_file.is_none(),
            font: None,
            frames: None,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    #[inline]
    pub fn progress(&self) -> LoadingProgress {
        self.progress
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.phase == LoadingPhase::Ready
    }

    pub fn errors(&self) -> &[LoadError] {
        &self.errors
    }

    pub fn font(&self) -> Option<&[u8]> {
        self.font.as_deref()
    }

    /// Take the normalized frames once ready.
    pub fn take_frames(&mut self) -> Option<FrameSet> {
        self.frames.take()
    }

    /// Record the outcome of the text resource at `index`.
    pub fn record_text(&mut self, index: usize, result: LoadResult<String>) {
        if !self.accepting() {
            return;
        }
        match self.text_done.get_mut(index) {
            Some(done) if !*done => *done = true,
            _ => {
                tracing::warn!(index, "ignoring unexpected text completion");
                return;
            }
        }

        match result {
            Ok(text) => self.texts[index] = Some(TextFrame::parse(&text)),
            Err(reason) => {
                let path = self.manifest.text_path(index).unwrap_or_default();
                tracing::warn!(index, %path, %reason, "text resource failed to load");
                self.errors.push(LoadError::Text {
                    index,
                    path,
                    reason,
                });
            }
        }
        self.complete_one();
    }

    /// Record the outcome of the font resource.
    pub fn record_font(&mut self, result: LoadResult<Vec<u8>>) {
        if !self.accepting() {
            return;
        }
        if self.font_done {
            tracing::warn!("ignoring unexpected font completion");
            return;
        }
        self.font_done = true;

        match result {
            Ok(bytes) => self.font = Some(bytes),
            Err(reason) => {
                let path = self.manifest.font_path().unwrap_or_default();
                tracing::warn!(%path, %reason, "font failed to load, using fallback");
                self.errors.push(LoadError::Font { path, reason });
            }
        }
        self.complete_one();
    }

    /// Message to show in place of frames while not ready.
    pub fn status_message(&self) -> String {
        if self.phase == LoadingPhase::Failed && !self.errors.is_empty() {
            let lines: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
            format!(
                "ASSET LOAD ERROR.\nCheck console + file names.\n\n{}",
                lines.join("\n")
            )
        } else {
            "loading…".to_string()
        }
    }

    fn accepting(&self) -> bool {
        if self.phase == LoadingPhase::Loading {
            true
        } else {
            tracing::warn!(phase = ?self.phase, "ignoring completion after loading finished");
            false
        }
    }

    fn complete_one(&mut self) {
        self.progress.loaded += 1;
        if self.progress.is_complete() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if self.texts.iter().any(Option::is_none) {
            self.phase = LoadingPhase::Failed;
            return;
        }

        let texts: Vec<TextFrame> = self.texts.iter_mut().filter_map(Option::take).collect();
        match FrameSet::normalize(texts) {
            Ok(frames) => {
                let shape = frames.shape();
                tracing::info!(
                    frames = frames.len(),
                    rows = shape.rows,
                    cols = shape.cols,
                    custom_font = self.font.is_some(),
                    "assets ready"
                );
                self.frames = Some(frames);
                self.phase = LoadingPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(%err, "frames could not be normalized");
                self.errors.push(err.into());
                self.phase = LoadingPhase::Failed;
            }
        }
    }
}

/// Source of raw asset bytes.
///
/// Implement this trait for your I/O mechanism (filesystem, fetch API,
/// bundled data, ...).
///
/// No `Send` bounds, so it works in both native and WASM (single-threaded) contexts.
pub trait AssetProvider {
    /// Read a text resource.
    fn read_text(&self, path: &str) -> impl std::future::Future<Output = LoadResult<String>>;

    /// Read a font resource.
    fn read_font(&self, path: &str) -> impl std::future::Future<Output = LoadResult<Vec<u8>>>;
}

/// Load every resource in `manifest` concurrently and wait for all of them.
///
/// Each resource is one future; the join is the counted barrier. Failed
/// resources are not retried.
pub async fn load_assets<P: AssetProvider>(provider: &P, manifest: &AssetManifest) -> AssetLoaderState {
    let mut state = AssetLoaderState::new(manifest);

    let text_loads = (0..manifest.text_files.len()).map(|index| async move {
        match manifest.text_path(index) {
            Some(path) => (index, provider.read_text(&path).await),
            None => (index, Err("no such text resource".to_string())),
        }
    });
    let font_load = async {
        match manifest.font_path() {
            Some(path) => Some(provider.read_font(&path).await),
            None => None,
        }
    };

    let (texts, font) = futures_util::join!(join_all(text_loads), font_load);

    for (index, result) in texts {
        state.record_text(index, result);
    }
    if let Some(result) = font {
        state.record_font(result);
    }
    state
}
