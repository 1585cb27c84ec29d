//! # cascii-morph
//!
//! Deterministic per-character morph transitions for cycling ASCII art frames.
//!
//! Instead of crossfading, every differing character switches on its own
//! schedule: first to a placeholder (`_`), then to its target. Schedules are
//! drawn from a stateless hash of `(transition_id, stage, position)`, so any
//! displayed frame can be replayed exactly from those inputs and a progress
//! value.
//!
//! This crate provides platform-agnostic pieces for:
//! - Normalizing raw text frames to one rectangular shape
//! - Driving the endless transition cycle (progress, hold, transition ids)
//! - Computing the morphed text at any progress
//! - Loading frame assets behind a counted readiness barrier
//! - Laying out text for painting (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for configuration types
//! - `toml` - Parse `show.toml` configuration files
//! - `web` - Enable web/WASM canvas painting support
//!
//! ## Example
//!
//! ```rust,ignore
//! use cascii_morph::{load_assets, Player, ShowDetails};
//!
//! let details = ShowDetails::from_toml_str(&config_text)?;
//! let mut loading = load_assets(&provider, &details.manifest()).await;
//!
//! match Player::from_loader(&mut loading, details.clock_config(), details.morph_timing()) {
//!     Some(mut player) => {
//!         // Once per display refresh
//!         let text = player.tick(elapsed);
//!     }
//!     None => show_message(&loading.status_message()),
//! }
//! ```

mod animation;
mod data;
mod details;
mod easing;
mod hash;
pub mod loader;
mod morph;
mod normalize;
mod player;
pub mod render;

pub use animation::{ClockConfig, ClockEvent, ClockPhase, TransitionClock, TransitionState};
pub use data::{GridShape, TextFrame, ROW_TERMINATOR};
pub use details::ShowDetails;
pub use easing::{ease_in_out_cubic, smoothstep, Easing};
pub use hash::{hash32, rand01};
pub use loader::{
    load_assets, AssetLoaderState, AssetManifest, AssetProvider, LoadError, LoadingPhase, LoadingProgress,
};
pub use morph::{CharacterMorphEngine, CharacterPlan, MorphTiming, Stage, StageWindow, SwitchEdges, PLACEHOLDER};
pub use normalize::{normalize_frames, normalize_row, FrameSet, NormalizeError};
pub use player::Player;
pub use render::{layout_status, layout_text, RenderConfig, RenderResult};

#[cfg(feature = "web")]
pub use render::web::paint_lines;
