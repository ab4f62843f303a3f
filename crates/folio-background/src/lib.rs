//! Animated particle backdrop for the folio terminal portfolio.
//!
//! The backdrop is a [`ParticleField`]: drifting particles joined by faint
//! connection lines, a layer of twinkling stars, and short-lived burst and
//! trail points spawned by the pointer. Each tick updates the field and
//! records draw calls on a [`Surface`]; a [`Scene`] collects them and renders
//! through ratatui's braille canvas. [`BackgroundState`] ties the field to the
//! terminal size and the active theme.

mod color;
mod connections;
mod field;
mod point;
mod render;
mod state;
mod surface;

pub use color::hsl_to_rgb;
pub use connections::{Connection, connection_opacity, find_connections};
pub use field::ParticleField;
pub use point::{EdgePolicy, Motion, Particle, Star, Transient, TransientKind, Twinkle};
pub use state::BackgroundState;
pub use surface::{DrawCommand, Scene, Surface};
