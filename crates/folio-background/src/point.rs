//! Points of the backdrop: drifting particles, twinkling stars, and
//! short-lived transients spawned by the pointer.

use folio_core::{Bounds, ColorRole, FieldConfig, Palette, Rgb};
use rand::Rng;

use crate::color::hsl_to_rgb;
use crate::surface::Surface;

/// Per-frame velocity damping for particles.
const PARTICLE_DAMPING: f64 = 0.99;
/// Per-frame velocity damping for transients.
const TRANSIENT_DAMPING: f64 = 0.98;
/// Per-frame size decay for transients.
const TRANSIENT_SHRINK: f64 = 0.99;

/// What happens when a point reaches the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Clamp to the edge and reflect the velocity.
    Bounce,
    /// Teleport to the opposite edge.
    Wrap,
}

/// Position and velocity of a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

impl Motion {
    pub fn new(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Self {
        Self {
            x,
            y,
            speed_x,
            speed_y,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Advance by one frame of velocity.
    pub fn step(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
    }

    pub fn damp(&mut self, factor: f64) {
        self.speed_x *= factor;
        self.speed_y *= factor;
    }

    /// Pull toward `target` when it is within `radius`. The pull fades
    /// linearly from `strength` at the target to zero at the radius.
    pub fn attract(&mut self, target: (f64, f64), radius: f64, strength: f64) {
        let dx = target.0 - self.x;
        let dy = target.1 - self.y;
        let distance = dx.hypot(dy);
        if distance > 0.0 && distance < radius {
            let force = (radius - distance) / radius;
            self.x += dx / distance * force * strength;
            self.y += dy / distance * force * strength;
        }
    }

    /// Bring the position back inside `bounds`.
    ///
    /// For bouncing points `margin` keeps the whole dot on screen; it is
    /// shrunk on canvases too small to honor it.
    pub fn confine(&mut self, bounds: &Bounds, policy: EdgePolicy, margin: f64) {
        match policy {
            EdgePolicy::Bounce => {
                bounce_axis(&mut self.x, &mut self.speed_x, bounds.width, margin);
                bounce_axis(&mut self.y, &mut self.speed_y, bounds.height, margin);
            }
            EdgePolicy::Wrap => {
                wrap_axis(&mut self.x, bounds.width);
                wrap_axis(&mut self.y, bounds.height);
            }
        }
    }
}

fn bounce_axis(position: &mut f64, speed: &mut f64, extent: f64, margin: f64) {
    let margin = margin.clamp(0.0, extent / 2.0);
    let (low, high) = (margin, extent - margin);
    if !position.is_finite() {
        *position = extent / 2.0;
    }
    if *position < low {
        *position = low;
        *speed = speed.abs();
    } else if *position > high {
        *position = high;
        *speed = -speed.abs();
    }
}

fn wrap_axis(position: &mut f64, extent: f64) {
    if !position.is_finite() {
        *position = 0.0;
    } else if *position < 0.0 {
        *position = extent;
    } else if *position > extent {
        *position = 0.0;
    }
}

/// Opacity oscillating between `min` and `max`.
///
/// `step` is added every frame and changes sign when a bound is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twinkle {
    pub opacity: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Twinkle {
    fn random<R: Rng>(rng: &mut R, min: f64, max: f64, step: (f64, f64)) -> Self {
        Self {
            opacity: rng.gen_range(min..max),
            step: rng.gen_range(step.0..step.1),
            min,
            max,
        }
    }

    pub fn advance(&mut self) {
        self.opacity += self.step;
        if self.opacity >= self.max {
            self.opacity = self.max;
            self.step = -self.step.abs();
        } else if self.opacity <= self.min {
            self.opacity = self.min;
            self.step = self.step.abs();
        }
    }
}

/// A drifting background particle. Particles bounce off the edges and are
/// the points joined by connection lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub motion: Motion,
    pub size: f64,
    pub twinkle: Twinkle,
    pub role: ColorRole,
}

impl Particle {
    pub const POLICY: EdgePolicy = EdgePolicy::Bounce;

    /// Spawn at a random position inside `bounds`.
    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            motion: Motion::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-1.5..1.5),
            ),
            size: rng.gen_range(1.0..4.0),
            twinkle: Twinkle::random(rng, 0.2, 1.0, (0.01, 0.03)),
            role: ColorRole::PARTICLE[rng.gen_range(0..ColorRole::PARTICLE.len())],
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.motion.position()
    }

    pub fn update(&mut self, bounds: &Bounds, pointer: Option<(f64, f64)>, config: &FieldConfig) {
        if let Some(target) = pointer {
            self.motion.attract(target, config.pointer_radius, config.pointer_strength);
        }
        self.motion.step();
        self.motion.confine(bounds, Self::POLICY, self.size);
        self.twinkle.advance();
        self.motion.damp(PARTICLE_DAMPING);
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, palette: &Palette) {
        surface.fill_circle(
            self.motion.x,
            self.motion.y,
            self.size,
            palette.get(self.role),
            self.twinkle.opacity,
        );
    }
}

/// A faint star. Stars barely drift and wrap around the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub motion: Motion,
    pub size: f64,
    pub twinkle: Twinkle,
    pub role: ColorRole,
}

impl Star {
    pub const POLICY: EdgePolicy = EdgePolicy::Wrap;

    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            motion: Motion::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
                rng.gen_range(-0.05..0.05),
                rng.gen_range(-0.05..0.05),
            ),
            size: rng.gen_range(0.5..2.5),
            twinkle: Twinkle::random(rng, 0.1, 1.0, (0.005, 0.025)),
            role: ColorRole::STAR[rng.gen_range(0..ColorRole::STAR.len())],
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.motion.position()
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.motion.step();
        self.motion.confine(bounds, Self::POLICY, 0.0);
        self.twinkle.advance();
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, palette: &Palette) {
        surface.fill_circle(
            self.motion.x,
            self.motion.y,
            self.size,
            palette.get(self.role),
            self.twinkle.opacity,
        );
    }
}

/// Kind of pointer-spawned point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// Spawned in a cluster on click.
    Burst,
    /// Spawned behind a moving pointer.
    Trail,
}

impl TransientKind {
    /// Frames a point of this kind lives for.
    pub fn lifetime(self) -> u32 {
        match self {
            TransientKind::Burst => 80,
            TransientKind::Trail => 40,
        }
    }

    pub fn policy(self) -> EdgePolicy {
        match self {
            TransientKind::Burst => EdgePolicy::Bounce,
            TransientKind::Trail => EdgePolicy::Wrap,
        }
    }

    /// Width of the square around the origin points are scattered in.
    fn spread(self) -> f64 {
        match self {
            TransientKind::Burst => 100.0,
            TransientKind::Trail => 30.0,
        }
    }

    fn max_speed(self) -> f64 {
        match self {
            TransientKind::Burst => 5.0,
            TransientKind::Trail => 1.5,
        }
    }

    fn size_range(self) -> (f64, f64) {
        match self {
            TransientKind::Burst => (3.0, 7.0),
            TransientKind::Trail => (1.0, 3.0),
        }
    }

    fn random_color<R: Rng>(self, rng: &mut R) -> Rgb {
        match self {
            TransientKind::Burst => hsl_to_rgb(rng.gen_range(180.0..240.0), 0.7, 0.6),
            TransientKind::Trail => hsl_to_rgb(rng.gen_range(180.0..210.0), 0.8, 0.7),
        }
    }
}

/// A short-lived point that fades out over its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Transient {
    pub kind: TransientKind,
    pub motion: Motion,
    pub size: f64,
    /// Frames left to live.
    pub life: u32,
    pub max_life: u32,
    pub color: Rgb,
}

impl Transient {
    /// Spawn near `origin`, clamped into `bounds`.
    pub fn spawn<R: Rng>(
        kind: TransientKind,
        origin: (f64, f64),
        bounds: &Bounds,
        rng: &mut R,
    ) -> Self {
        let half_spread = kind.spread() / 2.0;
        let (x, y) = bounds.clamp(
            origin.0 + rng.gen_range(-half_spread..half_spread),
            origin.1 + rng.gen_range(-half_spread..half_spread),
        );
        let max_speed = kind.max_speed();
        let (min_size, max_size) = kind.size_range();
        Self {
            kind,
            motion: Motion::new(
                x,
                y,
                rng.gen_range(-max_speed..max_speed),
                rng.gen_range(-max_speed..max_speed),
            ),
            size: rng.gen_range(min_size..max_size),
            life: kind.lifetime(),
            max_life: kind.lifetime(),
            color: kind.random_color(rng),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.motion.position()
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }

    /// Remaining fraction of the lifetime.
    pub fn opacity(&self) -> f64 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f64 / self.max_life as f64
    }

    pub fn update(&mut self, bounds: &Bounds) {
        self.motion.step();
        self.motion.confine(bounds, self.kind.policy(), 0.0);
        self.motion.damp(TRANSIENT_DAMPING);
        self.life = self.life.saturating_sub(1);
        self.size *= TRANSIENT_SHRINK;
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(
            self.motion.x,
            self.motion.y,
            self.size,
            self.color,
            self.opacity(),
        );
    }
}
