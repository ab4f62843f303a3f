//! The particle field: owns every point and advances them one frame per tick.

use std::collections::VecDeque;

use folio_core::{Bounds, FieldConfig, Palette};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::connections::find_connections;
use crate::point::{Particle, Star, Transient, TransientKind};
use crate::surface::Surface;

/// Animated backdrop state.
///
/// Steady-state particles and stars are kept at their target counts;
/// transient burst and trail points come from pointer input and expire.
/// [`reset`](Self::reset) rebuilds everything, which is how resizes and theme
/// changes are applied.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    bounds: Bounds,
    palette: Palette,
    particles: Vec<Particle>,
    stars: Vec<Star>,
    /// Oldest first.
    transients: VecDeque<Transient>,
    pointer: Option<(f64, f64)>,
    rng: StdRng,
}

impl ParticleField {
    /// Create a field seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: FieldConfig, bounds: Bounds, palette: Palette) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, bounds, palette, rng)
    }

    /// Create a field with a fixed seed, ignoring `config.seed`.
    pub fn with_seed(config: FieldConfig, bounds: Bounds, palette: Palette, seed: u64) -> Self {
        Self::with_rng(config, bounds, palette, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, bounds: Bounds, palette: Palette, rng: StdRng) -> Self {
        let mut field = Self {
            config,
            bounds,
            palette,
            particles: Vec::new(),
            stars: Vec::new(),
            transients: VecDeque::new(),
            pointer: None,
            rng,
        };
        field.populate();
        field
    }

    /// Discard every point and repopulate for new bounds or colors.
    pub fn reset(&mut self, bounds: Bounds, palette: Palette) {
        self.bounds = bounds;
        self.palette = palette;
        self.particles.clear();
        self.stars.clear();
        self.transients.clear();
        if let Some((x, y)) = self.pointer
            && !bounds.contains(x, y)
        {
            self.pointer = None;
        }
        self.populate();
    }

    fn populate(&mut self) {
        self.replenish();
        tracing::debug!(
            width = self.bounds.width,
            height = self.bounds.height,
            particles = self.particles.len(),
            stars = self.stars.len(),
            "particle field populated"
        );
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Live transient points, oldest first.
    pub fn transients(&self) -> impl ExactSizeIterator<Item = &Transient> {
        self.transients.iter()
    }

    pub fn transient_count(&self) -> usize {
        self.transients.len()
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Target number of particles for the current bounds.
    pub fn particle_target(&self) -> usize {
        self.config.particle_target(&self.bounds)
    }

    /// Record a pointer move. A fast enough move leaves a trail.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let previous = self.pointer.replace((x, y));
        let Some((px, py)) = previous else {
            return;
        };
        if (x - px).hypot(y - py) > self.config.trail_min_distance {
            self.spawn(TransientKind::Trail, (x, y), self.config.trail_count);
        }
    }

    /// The pointer left the canvas.
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Spawn a burst around a click.
    pub fn clicked(&mut self, x: f64, y: f64) {
        tracing::trace!(x, y, "burst");
        self.spawn(TransientKind::Burst, (x, y), self.config.burst_count);
    }

    fn spawn(&mut self, kind: TransientKind, origin: (f64, f64), count: usize) {
        for _ in 0..count {
            let point = Transient::spawn(kind, origin, &self.bounds, &mut self.rng);
            self.transients.push_back(point);
        }
    }

    /// Advance one frame and draw it.
    ///
    /// Order: background, stars, particles, transients (dropping the ones
    /// that expired last frame), connections, pointer glow, then the counts
    /// are restored to their targets and transients are capped.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) {
        surface.fill_background(self.palette.background);

        for star in &mut self.stars {
            star.update(&self.bounds);
            star.draw(surface, &self.palette);
        }

        for particle in &mut self.particles {
            particle.update(&self.bounds, self.pointer, &self.config);
            particle.draw(surface, &self.palette);
        }

        self.transients.retain(|point| !point.is_expired());
        for point in &mut self.transients {
            point.update(&self.bounds);
            point.draw(surface);
        }

        self.draw_connections(surface);
        self.draw_pointer_glow(surface);

        self.replenish();
        self.cap_transients();
    }

    fn draw_connections<S: Surface>(&self, surface: &mut S) {
        let positions: Vec<(f64, f64)> = self.particles.iter().map(Particle::position).collect();
        let color = self.palette.accent_primary;
        for connection in find_connections(
            &positions,
            self.config.connection_distance,
            self.config.connection_opacity,
        ) {
            surface.stroke_line(
                positions[connection.from],
                positions[connection.to],
                color,
                connection.opacity,
            );
        }
    }

    fn draw_pointer_glow<S: Surface>(&self, surface: &mut S) {
        let Some((x, y)) = self.pointer else {
            return;
        };
        if self.bounds.contains(x, y) {
            surface.fill_circle(
                x,
                y,
                self.config.glow_radius,
                self.palette.accent_primary,
                self.config.glow_opacity,
            );
        }
    }

    /// Bring particles and stars back to their target counts.
    fn replenish(&mut self) {
        let particle_target = self.particle_target();
        self.particles.truncate(particle_target);
        while self.particles.len() < particle_target {
            self.particles.push(Particle::random(&self.bounds, &mut self.rng));
        }

        self.stars.truncate(self.config.star_count);
        while self.stars.len() < self.config.star_count {
            self.stars.push(Star::random(&self.bounds, &mut self.rng));
        }
    }

    fn cap_transients(&mut self) {
        let excess = self
            .transients
            .len()
            .saturating_sub(self.config.max_transients);
        self.transients.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Scene};
    use folio_core::Theme;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0).unwrap()
    }

    fn field(config: FieldConfig) -> ParticleField {
        ParticleField::with_seed(config, bounds(), Palette::dark(), 42)
    }

    fn assert_all_inside(field: &ParticleField) {
        let bounds = field.bounds();
        let positions = field
            .particles()
            .iter()
            .map(Particle::position)
            .chain(field.stars().iter().map(Star::position))
            .chain(field.transients().map(Transient::position));
        for (x, y) in positions {
            assert!(bounds.contains(x, y), "({x}, {y}) escaped {bounds:?}");
        }
    }

    #[test]
    fn test_initial_population() {
        let field = field(FieldConfig::default());
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.stars().len(), 200);
        assert_eq!(field.transient_count(), 0);
        assert_all_inside(&field);
    }

    #[test]
    fn test_tick_draws_in_order() {
        let mut field = field(FieldConfig {
            star_count: 5,
            particle_count: 10,
            ..Default::default()
        });
        field.clicked(400.0, 300.0);
        let mut scene = Scene::new(bounds());
        field.tick(&mut scene);

        let commands = scene.commands();
        assert_eq!(commands[0], DrawCommand::Background(Palette::dark().background));
        // 5 stars, 10 particles, 15 burst points, then connection lines only
        assert_eq!(scene.circle_count(), 30);
        assert!(
            commands[1..31]
                .iter()
                .all(|c| matches!(c, DrawCommand::Circle { .. }))
        );
        assert!(
            commands[31..]
                .iter()
                .all(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut field = field(FieldConfig::default());
        let mut scene = Scene::new(bounds());
        for frame in 0..300 {
            match frame % 50 {
                0 => field.clicked(5.0, 595.0),
                10 => field.pointer_moved(790.0, 10.0),
                11 => field.pointer_moved(700.0, 100.0),
                30 => field.pointer_left(),
                _ => {}
            }
            field.tick(&mut scene);
            assert_all_inside(&field);
        }
    }

    #[test]
    fn test_counts_restored_every_tick() {
        let mut field = field(FieldConfig::default());
        let mut scene = Scene::new(bounds());
        for _ in 0..20 {
            field.particles.pop();
            field.stars.truncate(150);
            field.tick(&mut scene);
            assert_eq!(field.particles().len(), 80);
            assert_eq!(field.stars().len(), 200);
        }
    }

    #[test]
    fn test_connections_match_distances() {
        let mut field = field(FieldConfig {
            star_count: 0,
            ..Default::default()
        });
        let mut scene = Scene::new(bounds());
        field.tick(&mut scene);

        let positions: Vec<(f64, f64)> = field.particles().iter().map(Particle::position).collect();
        let mut expected = 0;
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                if (a.0 - b.0).hypot(a.1 - b.1) < 100.0 {
                    expected += 1;
                }
            }
        }
        assert_eq!(scene.line_count(), expected);

        for command in scene.commands() {
            if let DrawCommand::Line {
                from, to, opacity, ..
            } = *command
            {
                let distance = (from.0 - to.0).hypot(from.1 - to.1);
                assert!(distance < 100.0);
                let want = (100.0 - distance) / 100.0 * 0.3;
                assert!((opacity - want).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_transients_expire_on_following_tick() {
        let mut field = field(FieldConfig {
            particle_count: 0,
            star_count: 0,
            burst_count: 1,
            ..Default::default()
        });
        let mut scene = Scene::new(bounds());
        field.clicked(400.0, 300.0);

        let mut lives = Vec::new();
        loop {
            let Some(life) = field.transients().next().map(|point| point.life) else {
                break;
            };
            lives.push(life);
            field.tick(&mut scene);
        }

        // Spawned at 80, then one tick per frame down to zero, then removed
        assert_eq!(lives.len(), 81);
        assert_eq!(lives.first(), Some(&80));
        assert_eq!(lives.last(), Some(&0));
        assert!(lives.windows(2).all(|w| w[1] + 1 == w[0]));
    }

    #[test]
    fn test_transients_capped_oldest_first() {
        let mut field = field(FieldConfig {
            particle_count: 0,
            star_count: 0,
            burst_count: 15,
            max_transients: 20,
            ..Default::default()
        });
        let mut scene = Scene::new(bounds());
        field.clicked(100.0, 100.0);
        field.tick(&mut scene);
        field.clicked(700.0, 500.0);
        assert_eq!(field.transient_count(), 30);
        field.tick(&mut scene);

        assert_eq!(field.transient_count(), 20);
        // The 10 oldest (from the first click) are gone: 5 of the first
        // burst remain with one frame more of age than the second burst.
        let lives: Vec<u32> = field.transients().map(|t| t.life).collect();
        assert_eq!(lives.iter().filter(|&&life| life == 78).count(), 5);
        assert_eq!(lives.iter().filter(|&&life| life == 79).count(), 15);
    }

    #[test]
    fn test_trail_requires_movement() {
        let mut field = field(FieldConfig::default());
        field.pointer_moved(100.0, 100.0);
        assert_eq!(field.transient_count(), 0);
        field.pointer_moved(103.0, 103.0);
        assert_eq!(field.transient_count(), 0);
        field.pointer_moved(120.0, 103.0);
        assert_eq!(field.transient_count(), 3);
        assert!(field.transients().all(|t| t.kind == TransientKind::Trail));

        field.pointer_left();
        assert_eq!(field.pointer(), None);
        field.pointer_moved(400.0, 400.0);
        assert_eq!(field.transient_count(), 3);
    }

    #[test]
    fn test_pointer_glow_only_when_present() {
        let config = FieldConfig {
            particle_count: 0,
            star_count: 0,
            ..Default::default()
        };
        let mut field = field(config);
        let mut scene = Scene::new(bounds());
        field.tick(&mut scene);
        assert_eq!(scene.circle_count(), 0);

        field.pointer_moved(200.0, 200.0);
        field.tick(&mut scene);
        assert_eq!(
            scene.commands()[1],
            DrawCommand::Circle {
                x: 200.0,
                y: 200.0,
                radius: 50.0,
                color: Palette::dark().accent_primary,
                opacity: 0.2,
            }
        );
    }

    #[test]
    fn test_reset_rebuilds() {
        let mut field = field(FieldConfig::default());
        field.clicked(10.0, 10.0);
        field.pointer_moved(700.0, 500.0);
        let small = Bounds::new(400.0, 300.0).unwrap();
        field.reset(small, Theme::Light.palette());

        assert_eq!(field.bounds(), small);
        assert_eq!(field.palette(), &Palette::light());
        assert_eq!(field.transient_count(), 0);
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.pointer(), None);
        assert_all_inside(&field);
    }

    #[test]
    fn test_density_target_follows_bounds() {
        let mut field = field(FieldConfig {
            area_per_particle: Some(15000.0),
            ..Default::default()
        });
        assert_eq!(field.particles().len(), 32);

        field.reset(Bounds::new(1920.0, 1080.0).unwrap(), Palette::dark());
        assert_eq!(field.particles().len(), 138);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = field(FieldConfig::default());
        let b = field(FieldConfig::default());
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.stars(), b.stars());
    }
}
