//! Test support: a renderer that records draw calls and a canvas harness
//! driven by a manual clock.
//!
//! ```
//! use vulpes_ui::{Panel, testing::{RenderCall, TestHarness}};
//!
//! let mut h = TestHarness::new(100, 100);
//! h.add(h.root(), Panel::drawn());
//! let calls = h.frame();
//! assert_eq!(calls.first(), Some(&RenderCall::Begin));
//! ```

use std::{cell::RefCell, rc::Rc, time::Duration};

use vulpes_core::{Color, Rect, math::IVec2, time::ManualClock};

use crate::{
    canvas::Canvas,
    config::CanvasConfig,
    control::ControlId,
    event::{InputEvent, Key, MouseButton},
    renderer::{RenderState, Renderer, TextureId},
    skin::BasicSkin,
    widget::Widget,
};

/// One recorded renderer call. Rectangles and positions are in canvas
/// pixels, with the render offset and scale already applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Begin,
    End,
    StartClip { clip: Rect },
    EndClip,
    FilledRect { rect: Rect, color: Color, clip: Rect },
    TexturedRect { texture: TextureId, rect: Rect, clip: Rect },
    Text { position: IVec2, text: String },
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    state: RenderState,
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    /// Filled rectangles in draw order.
    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            RenderCall::FilledRect { rect, color, .. } => Some((*rect, *color)),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn state(&self) -> &RenderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn begin(&mut self) {
        self.calls.push(RenderCall::Begin);
    }

    fn end(&mut self) {
        self.calls.push(RenderCall::End);
    }

    fn start_clip(&mut self) {
        let clip = self.state.clip;
        self.calls.push(RenderCall::StartClip { clip });
    }

    fn end_clip(&mut self) {
        self.calls.push(RenderCall::EndClip);
    }

    fn draw_filled_rect(&mut self, rect: Rect) {
        let rect = self.translate(rect);
        let (color, clip) = (self.state.color, self.state.clip);
        self.calls.push(RenderCall::FilledRect { rect, color, clip });
    }

    fn draw_textured_rect(&mut self, texture: TextureId, rect: Rect, _uv: [f32; 4]) {
        let rect = self.translate(rect);
        let clip = self.state.clip;
        self.calls.push(RenderCall::TexturedRect { texture, rect, clip });
    }

    fn render_text(&mut self, position: IVec2, text: &str) {
        let position = position + self.state.offset;
        self.calls.push(RenderCall::Text {
            position,
            text: text.to_owned(),
        });
    }
}

/// A canvas wired to a [`RecordingRenderer`] and a [`ManualClock`].
pub struct TestHarness {
    pub canvas: Canvas,
    pub renderer: Rc<RefCell<RecordingRenderer>>,
    pub clock: ManualClock,
}

impl TestHarness {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, CanvasConfig::default())
    }

    pub fn with_config(width: i32, height: i32, config: CanvasConfig) -> Self {
        let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
        let clock = ManualClock::new();
        let mut canvas = Canvas::new(BasicSkin::new(renderer.clone()).shared())
            .with_config(config)
            .with_clock(clock.clone());
        canvas.resize(width, height);
        Self {
            canvas,
            renderer,
            clock,
        }
    }

    pub fn root(&self) -> ControlId {
        self.canvas.root()
    }

    /// # Panics
    /// If `parent` is stale.
    pub fn add(&mut self, parent: ControlId, widget: impl Widget) -> ControlId {
        match self.canvas.add_control(parent, widget) {
            Ok(id) => id,
            Err(err) => panic!("failed to add control: {err}"),
        }
    }

    /// Run one frame and return what it drew.
    pub fn frame(&mut self) -> Vec<RenderCall> {
        self.renderer.borrow_mut().take_calls();
        self.canvas.frame();
        self.renderer.borrow_mut().take_calls()
    }

    pub fn advance(&self, delta: Duration) {
        self.clock.advance(delta);
    }

    pub fn move_mouse(&mut self, x: i32, y: i32) -> bool {
        let position = IVec2::new(x, y);
        let delta = position - self.canvas.mouse_position();
        self.canvas
            .handle_input(InputEvent::MouseMoved { position, delta })
    }

    pub fn press(&mut self, button: MouseButton) -> bool {
        self.canvas.handle_input(InputEvent::MouseButton {
            button,
            pressed: true,
        })
    }

    pub fn release(&mut self, button: MouseButton) -> bool {
        self.canvas.handle_input(InputEvent::MouseButton {
            button,
            pressed: false,
        })
    }

    /// Move to `(x, y)` and press and release the left button there.
    pub fn click_at(&mut self, x: i32, y: i32) {
        self.move_mouse(x, y);
        self.press(MouseButton::Left);
        self.release(MouseButton::Left);
    }

    pub fn key(&mut self, key: Key, pressed: bool) -> bool {
        self.canvas.handle_input(InputEvent::Key { key, pressed })
    }

    /// Press and release `key`.
    pub fn tap(&mut self, key: Key) -> bool {
        let handled = self.key(key, true);
        self.key(key, false);
        handled
    }

    pub fn type_char(&mut self, c: char) -> bool {
        self.canvas.handle_input(InputEvent::Char(c))
    }
}
