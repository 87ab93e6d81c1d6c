//! Host UI abstraction: layout cursor, font size, drawing and input in one place.
//!
//! Widgets are written against [`Ui`]. [`Frame`] implements it on top of any
//! [`DrawList`] and [`InputQuery`], stacking reserved items vertically the way
//! an immediate-mode window does.

use crate::input::{GamepadAxis, InputQuery, Key, MouseButton};
use crate::paint::{Corners, DrawList, PackedColor, Rect, Vec2};

/// Font size the widget styles are authored against
pub const REFERENCE_FONT_SIZE: f32 = 13.0;

/// Uniform widget scale for a style scale at the host's current font size
pub fn widget_scale(style_scale: f32, font_size: f32) -> f32 {
    style_scale * (font_size / REFERENCE_FONT_SIZE)
}

/// Everything a widget needs from the host for one render call
pub trait Ui: DrawList + InputQuery {
    /// Current text size; widgets scale proportionally to it
    fn font_size(&self) -> f32;

    /// Where the next reserved item will be placed
    fn cursor_screen_pos(&self) -> Vec2;

    /// Reserve `size` at the cursor and advance it.
    ///
    /// Returns whether any part of the reserved region is visible.
    fn reserve(&mut self, size: Vec2) -> bool;
}

/// [`Ui`] over a borrowed draw list and input state
pub struct Frame<'a, D: DrawList, I: InputQuery> {
    draw: &'a mut D,
    input: &'a I,
    cursor: Vec2,
    line_start: f32,
    font_size: f32,
    viewport: Rect,
    item_spacing: f32,
    last_item: Option<Rect>,
}

impl<'a, D: DrawList, I: InputQuery> Frame<'a, D, I> {
    pub fn new(draw: &'a mut D, input: &'a I, viewport: Rect, font_size: f32) -> Self {
        Self {
            draw,
            input,
            cursor: viewport.min,
            line_start: viewport.min.x,
            font_size,
            viewport,
            item_spacing: 4.0,
            last_item: None,
        }
    }

    pub fn with_item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Move the cursor, e.g. to scroll content out of the viewport
    pub fn set_cursor_screen_pos(&mut self, pos: Vec2) {
        self.cursor = pos;
        self.line_start = pos.x;
    }

    pub fn last_item_rect(&self) -> Option<Rect> {
        self.last_item
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }
}

impl<D: DrawList, I: InputQuery> Ui for Frame<'_, D, I> {
    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn cursor_screen_pos(&self) -> Vec2 {
        self.cursor
    }

    fn reserve(&mut self, size: Vec2) -> bool {
        let item = Rect::from_min_size(self.cursor, size);
        self.last_item = Some(item);
        self.cursor = Vec2::new(self.line_start, item.max.y + self.item_spacing);
        item.overlaps(&self.viewport)
    }
}

impl<D: DrawList, I: InputQuery> DrawList for Frame<'_, D, I> {
    fn push_clip_rect(&mut self, rect: Rect) {
        self.draw.push_clip_rect(rect);
    }

    fn pop_clip_rect(&mut self) {
        self.draw.pop_clip_rect();
    }

    fn rect_filled(&mut self, rect: Rect, color: PackedColor, rounding: f32, corners: Corners) {
        self.draw.rect_filled(rect, color, rounding, corners);
    }

    fn rect(
        &mut self,
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
        thickness: f32,
    ) {
        self.draw.rect(rect, color, rounding, corners, thickness);
    }

    fn circle_filled(&mut self, center: Vec2, radius: f32, color: PackedColor) {
        self.draw.circle_filled(center, radius, color);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: PackedColor, thickness: f32) {
        self.draw.circle(center, radius, color, thickness);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: PackedColor, thickness: f32) {
        self.draw.line(from, to, color, thickness);
    }

    fn text(&mut self, pos: Vec2, color: PackedColor, text: &str) {
        self.draw.text(pos, color, text);
    }

    fn text_size(&self, text: &str) -> Vec2 {
        self.draw.text_size(text)
    }
}

impl<D: DrawList, I: InputQuery> InputQuery for Frame<'_, D, I> {
    fn is_key_down(&self, key: Key) -> bool {
        self.input.is_key_down(key)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.input.is_mouse_down(button)
    }

    fn is_mouse_clicked(&self, button: MouseButton) -> bool {
        self.input.is_mouse_clicked(button)
    }

    fn mouse_pos(&self) -> Vec2 {
        self.input.mouse_pos()
    }

    fn gamepad_axis(&self, axis: GamepadAxis) -> f32 {
        self.input.gamepad_axis(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::paint::DrawRecorder;

    #[test]
    fn test_widget_scale() {
        assert_eq!(widget_scale(1.0, 13.0), 1.0);
        assert_eq!(widget_scale(2.0, 13.0), 2.0);
        assert_eq!(widget_scale(1.0, 26.0), 2.0);
        assert_eq!(widget_scale(0.5, 26.0), 1.0);
    }

    #[test]
    fn test_reserve_advances_cursor() {
        let mut recorder = DrawRecorder::default();
        let input = InputState::default();
        let viewport = Rect::from_min_size(Vec2::ZERO, Vec2::new(500.0, 500.0));
        let mut frame = Frame::new(&mut recorder, &input, viewport, 13.0).with_item_spacing(0.0);

        assert_eq!(frame.cursor_screen_pos(), Vec2::ZERO);
        assert!(frame.reserve(Vec2::new(100.0, 40.0)));
        assert_eq!(frame.cursor_screen_pos(), Vec2::new(0.0, 40.0));
        assert_eq!(
            frame.last_item_rect(),
            Some(Rect::from_min_size(Vec2::ZERO, Vec2::new(100.0, 40.0)))
        );
    }

    #[test]
    fn test_reserve_reports_visibility() {
        let mut recorder = DrawRecorder::default();
        let input = InputState::default();
        let viewport = Rect::from_min_size(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut frame = Frame::new(&mut recorder, &input, viewport, 13.0);

        frame.set_cursor_screen_pos(Vec2::new(0.0, 200.0));
        assert!(!frame.reserve(Vec2::new(50.0, 50.0)));

        frame.set_cursor_screen_pos(Vec2::new(0.0, 90.0));
        assert!(frame.reserve(Vec2::new(50.0, 50.0)));
    }
}
