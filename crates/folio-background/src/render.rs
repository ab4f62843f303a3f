//! Render a [`Scene`] through ratatui's braille canvas.

use folio_core::{CELL_WIDTH, Rgb};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Context, Line, Points},
    },
};

use crate::surface::{DrawCommand, Scene};

/// Horizontal size of one braille dot in logical pixels.
const DOT: f64 = CELL_WIDTH / 2.0;

/// Strokes fainter than this are skipped.
const MIN_VISIBLE_OPACITY: f64 = 0.02;

impl Widget for &Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = self.bounds();
        let background = self.background().unwrap_or(Rgb::new(0, 0, 0));
        // Canvas y grows upward, scene y grows downward
        let flip = |y: f64| bounds.height - y;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background.to_color())
            .x_bounds([0.0, bounds.width])
            .y_bounds([0.0, bounds.height])
            .paint(|ctx| {
                for command in self.commands() {
                    match *command {
                        DrawCommand::Background(_) => {}
                        DrawCommand::Circle {
                            x,
                            y,
                            radius,
                            color,
                            opacity,
                        } => paint_disc(ctx, background, x, flip(y), radius, color, opacity),
                        DrawCommand::Line {
                            from,
                            to,
                            color,
                            opacity,
                        } => {
                            if opacity < MIN_VISIBLE_OPACITY {
                                continue;
                            }
                            ctx.draw(&Line::new(
                                from.0,
                                flip(from.1),
                                to.0,
                                flip(to.1),
                                background.blend(color, opacity).to_color(),
                            ));
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

/// Draw a filled disc as a center dot plus concentric rings whose opacity
/// falls off toward the rim. Discs smaller than a braille dot are one dot.
fn paint_disc(
    ctx: &mut Context,
    background: Rgb,
    x: f64,
    y: f64,
    radius: f64,
    color: Rgb,
    opacity: f64,
) {
    if opacity < MIN_VISIBLE_OPACITY {
        return;
    }
    ctx.draw(&Points {
        coords: &[(x, y)],
        color: background.blend(color, opacity).to_color(),
    });
    if radius < DOT {
        return;
    }

    let rings = (radius / DOT).floor() as usize;
    for ring in 1..=rings {
        let ring_radius = ring as f64 * DOT;
        let falloff = 1.0 - ring_radius / (radius + DOT);
        let ring_opacity = opacity * falloff;
        if ring_opacity < MIN_VISIBLE_OPACITY {
            break;
        }
        ctx.draw(&Circle {
            x,
            y,
            radius: ring_radius,
            color: background.blend(color, ring_opacity).to_color(),
        });
    }
}
