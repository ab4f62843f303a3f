//! Tunables of the particle backdrop.

use serde::Deserialize;

use crate::Bounds;

/// Particle field configuration. Distances are in logical pixels, rates are
/// per frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of drifting particles kept alive.
    pub particle_count: usize,
    /// When set, the particle target is derived from the canvas area instead
    /// of `particle_count` (one particle per this many square pixels).
    pub area_per_particle: Option<f64>,
    /// Number of twinkling stars kept alive.
    pub star_count: usize,
    /// Particles closer than this are connected by a line.
    pub connection_distance: f64,
    /// Opacity of a connection between two coincident particles.
    pub connection_opacity: f64,
    /// Radius in which particles are pulled toward the pointer.
    pub pointer_radius: f64,
    /// Maximum per-frame pull toward the pointer.
    pub pointer_strength: f64,
    /// Radius of the glow drawn under the pointer.
    pub glow_radius: f64,
    /// Opacity at the center of the pointer glow.
    pub glow_opacity: f64,
    /// Pointer movement needed to leave a trail.
    pub trail_min_distance: f64,
    /// Trail points spawned per qualifying pointer move.
    pub trail_count: usize,
    /// Burst points spawned per click.
    pub burst_count: usize,
    /// Upper bound on live transient points.
    pub max_transients: usize,
    /// Fixed RNG seed, mostly useful for reproducible captures.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            area_per_particle: None,
            star_count: 200,
            connection_distance: 100.0,
            connection_opacity: 0.3,
            pointer_radius: 150.0,
            pointer_strength: 0.5,
            glow_radius: 50.0,
            glow_opacity: 0.2,
            trail_min_distance: 5.0,
            trail_count: 3,
            burst_count: 15,
            max_transients: 100,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Steady particle count for a canvas of the given size.
    pub fn particle_target(&self, bounds: &Bounds) -> usize {
        match self.area_per_particle {
            Some(area) if area.is_finite() && area > 0.0 => (bounds.area() / area).floor() as usize,
            _ => self.particle_count,
        }
    }
}
