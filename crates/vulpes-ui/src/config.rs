//! Canvas timing and threshold settings.

use std::time::Duration;

use vulpes_core::Color;

/// Tunables for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Delay before a held key starts repeating.
    pub key_repeat_delay: Duration,
    /// Interval between repeats once repeating.
    pub key_repeat_rate: Duration,
    /// Two clicks on the same control closer than this form a double click.
    pub double_click_time: Duration,
    /// Manhattan distance a press must travel before a drag starts.
    pub drag_threshold: i32,
    pub tooltips: bool,
    /// Padding around tooltip text.
    pub tooltip_padding: i32,
    /// Painted behind the tree when the root has `DRAW_BACKGROUND`.
    /// `None` uses the skin's background.
    pub background: Option<Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            key_repeat_delay: Duration::from_millis(500),
            key_repeat_rate: Duration::from_millis(30),
            double_click_time: Duration::from_millis(500),
            drag_threshold: 5,
            tooltips: true,
            tooltip_padding: 4,
            background: None,
        }
    }
}
