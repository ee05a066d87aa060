//! Skins resolve draw routines for controls and hand out the frame renderer.

use std::{cell::RefCell, rc::Rc};

use vulpes_core::{Color, Rect, math::IVec2};

use crate::{control::Control, renderer::Renderer};

pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;
pub type SharedSkin = Rc<dyn Skin>;

/// Palette used by the default draw routines.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinColors {
    pub background: Color,
    pub panel: Color,
    pub border: Color,
    pub keyboard_highlight: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub debug_bounds: Color,
    pub debug_margin: Color,
    pub debug_padding: Color,
    pub drag_ghost: Color,
}

impl Default for SkinColors {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x202024),
            panel: Color::from_hex(0x2E2E35),
            border: Color::from_hex(0x55555F),
            keyboard_highlight: Color::from_hex(0xFFA040),
            tooltip_background: Color::from_hex(0xFFFFE1),
            tooltip_text: Color::BLACK,
            debug_bounds: Color::RED,
            debug_margin: Color::rgba(1.0, 0.6, 0.0, 0.6),
            debug_padding: Color::rgba(0.0, 0.6, 1.0, 0.6),
            drag_ghost: Color::rgba(1.0, 1.0, 1.0, 0.3),
        }
    }
}

/// Draw routines plus access to the renderer they draw with.
///
/// Routines take the renderer explicitly: the canvas holds it borrowed for
/// the whole frame, so a skin must never borrow [`Skin::renderer`] itself
/// while drawing.
pub trait Skin {
    fn renderer(&self) -> SharedRenderer;

    fn colors(&self) -> &SkinColors;

    fn draw_background(&self, renderer: &mut dyn Renderer, rect: Rect) {
        renderer.set_draw_color(self.colors().background);
        renderer.draw_filled_rect(rect);
    }

    fn draw_panel(&self, renderer: &mut dyn Renderer, rect: Rect) {
        renderer.set_draw_color(self.colors().panel);
        renderer.draw_filled_rect(rect);
        renderer.set_draw_color(self.colors().border);
        renderer.draw_lined_rect(rect);
    }

    /// Outline drawn `offset` pixels inside `rect` on the focused control.
    fn draw_keyboard_highlight(&self, renderer: &mut dyn Renderer, rect: Rect, offset: i32) {
        let inset = Rect::new(
            rect.x + offset,
            rect.y + offset,
            rect.width - offset * 2,
            rect.height - offset * 2,
        );
        renderer.set_draw_color(self.colors().keyboard_highlight);
        renderer.draw_lined_rect(inset);
    }

    /// Bounds, margin and padding outlines for layout debugging.
    fn draw_debug_outline(&self, renderer: &mut dyn Renderer, control: &Control) {
        let colors = self.colors();
        let bounds = control.bounds();
        let margin = control.margin();
        let padding = control.padding();

        // Outlines are drawn in the parent's space, where `bounds` lives.
        renderer.set_draw_color(colors.debug_bounds);
        renderer.draw_lined_rect(bounds);

        renderer.set_draw_color(colors.debug_margin);
        renderer.draw_lined_rect(Rect::new(
            bounds.x - margin.left,
            bounds.y - margin.top,
            bounds.width + margin.horizontal(),
            bounds.height + margin.vertical(),
        ));

        renderer.set_draw_color(colors.debug_padding);
        renderer.draw_lined_rect(bounds.shrink(padding));
    }

    fn draw_tooltip(&self, renderer: &mut dyn Renderer, rect: Rect, text: &str, padding: i32) {
        renderer.set_draw_color(self.colors().tooltip_background);
        renderer.draw_filled_rect(rect);
        renderer.set_draw_color(self.colors().border);
        renderer.draw_lined_rect(rect);
        renderer.set_draw_color(self.colors().tooltip_text);
        renderer.render_text(IVec2::new(rect.x + padding, rect.y + padding), text);
    }

    /// Ghost drawn at the cursor when a drag package has no draw control.
    fn draw_drag_ghost(&self, renderer: &mut dyn Renderer, rect: Rect) {
        renderer.set_draw_color(self.colors().drag_ghost);
        renderer.draw_filled_rect(rect);
    }
}

/// Flat-colour skin over any renderer.
pub struct BasicSkin {
    renderer: SharedRenderer,
    colors: SkinColors,
}

impl BasicSkin {
    pub fn new(renderer: SharedRenderer) -> Self {
        Self {
            renderer,
            colors: SkinColors::default(),
        }
    }

    pub fn with_colors(mut self, colors: SkinColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn shared(self) -> SharedSkin {
        Rc::new(self)
    }
}

impl Skin for BasicSkin {
    fn renderer(&self) -> SharedRenderer {
        Rc::clone(&self.renderer)
    }

    fn colors(&self) -> &SkinColors {
        &self.colors
    }
}
