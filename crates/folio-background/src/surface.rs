//! Drawing seam between the simulation and the terminal.

use folio_core::{Bounds, Rgb};

/// Something the particle field can draw on.
///
/// Coordinates are logical pixels with the origin in the top-left corner.
/// Opacity is in `0..=1`.
pub trait Surface {
    /// Paint the whole surface.
    fn fill_background(&mut self, color: Rgb);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, opacity: f64);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, opacity: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Background(Rgb),
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgb,
        opacity: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        opacity: f64,
    },
}

/// A display list for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            commands: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Most recent background fill.
    pub fn background(&self) -> Option<Rgb> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Background(color) => Some(*color),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for Scene {
    fn fill_background(&mut self, color: Rgb) {
        // A background hides everything drawn before it
        self.commands.clear();
        self.commands.push(DrawCommand::Background(color));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, opacity: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            opacity,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, opacity: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            opacity,
        });
    }
}
