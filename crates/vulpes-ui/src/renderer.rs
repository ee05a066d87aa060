//! Backend-facing drawing contract.
//!
//! A [`Renderer`] receives primitives in control-local coordinates and
//! translates them with the current [`RenderState`]. The canvas drives
//! offset and clip while walking the tree; backends only draw.

use vulpes_core::{Color, Rect, Size, math::IVec2};

/// Opaque texture handle owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Offset, clip and colour state shared by every draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Canvas-space position of the control being drawn.
    pub offset: IVec2,
    /// Canvas-space clip rectangle.
    pub clip: Rect,
    pub scale: f32,
    pub color: Color,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            offset: IVec2::ZERO,
            clip: Rect::ZERO,
            scale: 1.0,
            color: Color::WHITE,
        }
    }
}

pub trait Renderer {
    fn state(&self) -> &RenderState;
    fn state_mut(&mut self) -> &mut RenderState;

    fn begin(&mut self) {}
    fn end(&mut self) {}

    /// Apply the current clip region to the backend.
    fn start_clip(&mut self) {}
    fn end_clip(&mut self) {}

    /// Fill `rect` (local coordinates) with the draw colour.
    fn draw_filled_rect(&mut self, rect: Rect);

    fn draw_lined_rect(&mut self, rect: Rect) {
        self.draw_filled_rect(Rect::new(rect.x, rect.y, rect.width, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.bottom() - 1, rect.width, 1));
        self.draw_filled_rect(Rect::new(rect.x, rect.y, 1, rect.height));
        self.draw_filled_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.height));
    }

    /// Backends without texture support fall back to a flat fill.
    fn draw_textured_rect(&mut self, _texture: TextureId, rect: Rect, _uv: [f32; 4]) {
        self.draw_filled_rect(rect);
    }

    fn render_text(&mut self, _position: IVec2, _text: &str) {}

    /// Fixed-advance estimate for backends without font metrics.
    fn measure_text(&mut self, text: &str) -> Size {
        Size::new(text.chars().count() as i32 * 8, 16)
    }

    fn draw_color(&self) -> Color {
        self.state().color
    }

    fn set_draw_color(&mut self, color: Color) {
        self.state_mut().color = color;
    }

    fn render_offset(&self) -> IVec2 {
        self.state().offset
    }

    fn set_render_offset(&mut self, offset: IVec2) {
        self.state_mut().offset = offset;
    }

    /// Shift the offset by `rect`'s origin.
    fn add_render_offset(&mut self, rect: Rect) {
        self.state_mut().offset += rect.origin();
    }

    fn clip_region(&self) -> Rect {
        self.state().clip
    }

    fn set_clip_region(&mut self, clip: Rect) {
        self.state_mut().clip = clip;
    }

    /// Intersect the clip with `rect`, placed at the current offset.
    fn add_clip_region(&mut self, rect: Rect) {
        let state = self.state_mut();
        let placed = Rect::from_origin_size(state.offset, rect.size());
        state.clip = state.clip.intersect(&placed);
    }

    fn clip_region_visible(&self) -> bool {
        !self.state().clip.is_empty()
    }

    fn scale(&self) -> f32 {
        self.state().scale
    }

    fn set_scale(&mut self, scale: f32) {
        self.state_mut().scale = scale;
    }

    /// Local rect to scaled canvas pixels.
    fn translate(&self, rect: Rect) -> Rect {
        let state = self.state();
        let scaled = |v: i32| (v as f32 * state.scale).round() as i32;
        Rect::new(
            scaled(rect.x + state.offset.x),
            scaled(rect.y + state.offset.y),
            scaled(rect.width),
            scaled(rect.height),
        )
    }
}
