//! Background animation state management.

use folio_core::{Bounds, FieldConfig, Palette};
use ratatui::{Frame, buffer::Buffer, layout::Rect, widgets::Widget};

use crate::field::ParticleField;
use crate::surface::Scene;

/// Background animation state.
///
/// Owns the particle field and rebuilds it whenever the drawing area or the
/// palette changes. Pointer events arrive in terminal cells and are
/// converted to logical pixels here.
#[derive(Debug)]
pub struct BackgroundState {
    /// Particle field, absent until a frame with a usable area is drawn.
    field: Option<ParticleField>,
    /// Field tuning used when (re)building.
    config: FieldConfig,
    /// Colors of the active theme.
    palette: Palette,
    /// Last known area width in cells.
    last_width: u16,
    /// Last known area height in cells.
    last_height: u16,
    /// Palette changed since the field was last built.
    palette_changed: bool,
    /// An empty area was already reported.
    reported_empty: bool,
}

impl BackgroundState {
    /// Create a new background state.
    pub fn new(config: FieldConfig, palette: Palette) -> Self {
        Self {
            field: None,
            config,
            palette,
            last_width: 0,
            last_height: 0,
            palette_changed: false,
            reported_empty: false,
        }
    }

    /// Switch colors. The field is rebuilt on the next frame.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.palette_changed = true;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Pointer moved to a terminal cell.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        if let Some(field) = &mut self.field {
            let (x, y) = Bounds::cell_center(column, row);
            field.pointer_moved(x, y);
        }
    }

    /// Primary button pressed on a terminal cell.
    pub fn clicked(&mut self, column: u16, row: u16) {
        if let Some(field) = &mut self.field {
            let (x, y) = Bounds::cell_center(column, row);
            field.clicked(x, y);
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(field) = &mut self.field {
            field.pointer_left();
        }
    }

    /// Render the background to the frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.render_area(area, frame.buffer_mut());
    }

    /// Advance the field one tick and draw it into `area` of `buf`.
    pub fn render_area(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(bounds) = Bounds::from_cells(area.width, area.height) else {
            if !self.reported_empty {
                tracing::warn!(
                    width = area.width,
                    height = area.height,
                    "drawing area is empty, particle field not initialized"
                );
                self.reported_empty = true;
            }
            self.field = None;
            return;
        };
        self.reported_empty = false;

        // Reinitialize if dimensions or colors changed
        let dimensions_changed = area.width != self.last_width || area.height != self.last_height;
        let field = match self.field.take() {
            Some(mut field) => {
                if dimensions_changed || self.palette_changed {
                    tracing::debug!(
                        columns = area.width,
                        rows = area.height,
                        "reinitializing particle field"
                    );
                    field.reset(bounds, self.palette);
                }
                field
            }
            None => ParticleField::new(self.config.clone(), bounds, self.palette),
        };
        let field = self.field.insert(field);
        self.last_width = area.width;
        self.last_height = area.height;
        self.palette_changed = false;

        let mut scene = Scene::new(bounds);
        field.tick(&mut scene);
        (&scene).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Theme;
    use ratatui::style::Color;

    fn config() -> FieldConfig {
        FieldConfig {
            seed: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_area_skips_initialization() {
        let mut state = BackgroundState::new(config(), Palette::dark());
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        state.render_area(area, &mut buf);
        assert!(state.field().is_none());

        // Events before initialization are ignored
        state.clicked(1, 1);
        state.pointer_moved(2, 2);
        assert!(state.field().is_none());
    }

    #[test]
    fn test_initializes_on_first_frame() {
        let mut state = BackgroundState::new(config(), Palette::dark());
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        state.render_area(area, &mut buf);

        let field = state.field().unwrap();
        assert_eq!(field.bounds(), Bounds::new(800.0, 480.0).unwrap());
        assert_eq!(field.particles().len(), 80);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(10, 25, 47));
    }

    #[test]
    fn test_resize_reinitializes() {
        let mut state = BackgroundState::new(config(), Palette::dark());
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        state.render_area(area, &mut buf);
        state.clicked(50, 15);
        assert_eq!(state.field().unwrap().transient_count(), 15);

        // Same size keeps transients
        state.render_area(area, &mut buf);
        assert_eq!(state.field().unwrap().transient_count(), 15);

        let smaller = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(smaller);
        state.render_area(smaller, &mut buf);
        let field = state.field().unwrap();
        assert_eq!(field.bounds(), Bounds::new(320.0, 160.0).unwrap());
        assert_eq!(field.transient_count(), 0);
    }

    #[test]
    fn test_theme_change_reinitializes() {
        let mut state = BackgroundState::new(config(), Palette::dark());
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        state.render_area(area, &mut buf);
        state.clicked(5, 5);

        state.set_palette(Theme::Light.palette());
        state.render_area(area, &mut buf);
        let field = state.field().unwrap();
        assert_eq!(field.palette(), &Palette::light());
        assert_eq!(field.transient_count(), 0);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(245, 247, 250));
    }

    #[test]
    fn test_pointer_uses_cell_centers() {
        let mut state = BackgroundState::new(config(), Palette::dark());
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        state.render_area(area, &mut buf);

        state.pointer_moved(3, 2);
        assert_eq!(state.field().unwrap().pointer(), Some((28.0, 40.0)));
        state.pointer_left();
        assert_eq!(state.field().unwrap().pointer(), None);
    }
}
