//! Drawing primitives shared by every widget.
//!
//! Widgets never talk to a concrete renderer. They emit rectangles, circles,
//! lines and text through [`DrawList`], which is implemented by the recording
//! [`DrawRecorder`] here and by the terminal painter in the TUI frontend.
//! Coordinates are in virtual pixels with the origin at the top-left corner.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Deref, DerefMut, Mul, Sub};

/// 2D point or size in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_min_size(center - size * 0.5, size)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect {
            min: Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Vec2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }
}

/// Float RGBA color, each channel in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    /// Pack into the host's 32-bit color layout
    pub fn to_packed(self) -> PackedColor {
        PackedColor::from_rgba8(
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        )
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

fn channel_to_u8(v: f32) -> u8 {
    // NaN saturates to 0 through the float-to-int cast
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Packed color: `a << 24 | b << 16 | g << 8 | r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Which corners of a rectangle get rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corners {
    #[default]
    All,
    TopLeft,
    TopRight,
    None,
}

/// Primitive drawing surface provided by the host
pub trait DrawList {
    /// Restrict subsequent drawing to `rect` (intersected with the current clip)
    fn push_clip_rect(&mut self, rect: Rect);

    fn pop_clip_rect(&mut self);

    fn rect_filled(&mut self, rect: Rect, color: PackedColor, rounding: f32, corners: Corners);

    fn rect(
        &mut self,
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
        thickness: f32,
    );

    fn circle_filled(&mut self, center: Vec2, radius: f32, color: PackedColor);

    fn circle(&mut self, center: Vec2, radius: f32, color: PackedColor, thickness: f32);

    fn line(&mut self, from: Vec2, to: Vec2, color: PackedColor, thickness: f32);

    /// Draw `text` with its top-left corner at `pos`
    fn text(&mut self, pos: Vec2, color: PackedColor, text: &str);

    /// Size `text` would occupy when drawn
    fn text_size(&self, text: &str) -> Vec2;
}

/// Clip rect that is popped when the scope ends, whatever path leaves it.
///
/// Derefs to the wrapped target so drawing continues through the guard.
pub struct ClipScope<'a, D: DrawList + ?Sized> {
    target: &'a mut D,
}

impl<'a, D: DrawList + ?Sized> ClipScope<'a, D> {
    pub fn new(target: &'a mut D, rect: Rect) -> Self {
        target.push_clip_rect(rect);
        Self { target }
    }
}

impl<D: DrawList + ?Sized> Deref for ClipScope<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.target
    }
}

impl<D: DrawList + ?Sized> DerefMut for ClipScope<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.target
    }
}

impl<D: DrawList + ?Sized> Drop for ClipScope<'_, D> {
    fn drop(&mut self) {
        self.target.pop_clip_rect();
    }
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    PushClip(Rect),
    PopClip,
    RectFilled {
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
    },
    Rect {
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
        thickness: f32,
    },
    CircleFilled {
        center: Vec2,
        radius: f32,
        color: PackedColor,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: PackedColor,
        thickness: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: PackedColor,
        thickness: f32,
    },
    Text {
        pos: Vec2,
        color: PackedColor,
        text: String,
    },
}

/// Draw list that keeps every primitive as a [`DrawCmd`].
///
/// Text is measured with a fixed glyph box, which matches a monospace host
/// font and keeps layouts reproducible.
#[derive(Debug, Clone)]
pub struct DrawRecorder {
    commands: Vec<DrawCmd>,
    clip_stack: Vec<Rect>,
    glyph_size: Vec2,
}

impl DrawRecorder {
    pub fn new(glyph_size: Vec2) -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: Vec::new(),
            glyph_size,
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Number of clip rects currently pushed
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Filled rectangles drawn with `color`, in emission order
    pub fn filled_rects(&self, color: PackedColor) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::RectFilled { rect, color: c, .. } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Filled circles drawn with `color` as `(center, radius)`
    pub fn filled_circles(&self, color: PackedColor) -> Vec<(Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::CircleFilled {
                    center,
                    radius,
                    color: c,
                } if *c == color => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self, color: PackedColor) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Line {
                    from, to, color: c, ..
                } if *c == color => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for DrawRecorder {
    fn default() -> Self {
        Self::new(Vec2::new(7.0, 13.0))
    }
}

impl DrawList for DrawRecorder {
    fn push_clip_rect(&mut self, rect: Rect) {
        let clipped = match self.clip_stack.last() {
            Some(current) => current.intersect(&rect),
            None => rect,
        };
        self.clip_stack.push(clipped);
        self.commands.push(DrawCmd::PushClip(rect));
    }

    fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
        self.commands.push(DrawCmd::PopClip);
    }

    fn rect_filled(&mut self, rect: Rect, color: PackedColor, rounding: f32, corners: Corners) {
        self.commands.push(DrawCmd::RectFilled {
            rect,
            color,
            rounding,
            corners,
        });
    }

    fn rect(
        &mut self,
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
        thickness: f32,
    ) {
        self.commands.push(DrawCmd::Rect {
            rect,
            color,
            rounding,
            corners,
            thickness,
        });
    }

    fn circle_filled(&mut self, center: Vec2, radius: f32, color: PackedColor) {
        self.commands.push(DrawCmd::CircleFilled {
            center,
            radius,
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: PackedColor, thickness: f32) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            thickness,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: PackedColor, thickness: f32) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn text(&mut self, pos: Vec2, color: PackedColor, text: &str) {
        self.commands.push(DrawCmd::Text {
            pos,
            color,
            text: text.to_string(),
        });
    }

    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(
            text.chars().count() as f32 * self.glyph_size.x,
            self.glyph_size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_packing() {
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0).to_packed();
        assert_eq!(white.0, 0xFFFF_FFFF);

        let red_half = Rgba::new(1.0, 0.0, 0.0, 0.5).to_packed();
        assert_eq!(red_half.r(), 255);
        assert_eq!(red_half.g(), 0);
        assert_eq!(red_half.b(), 0);
        assert_eq!(red_half.a(), 128); // 0.5 * 255 + 0.5 rounds up

        let gray = Rgba::gray(0.8).to_packed();
        assert_eq!(gray.r(), 204);
        assert_eq!(gray.a(), 255);
    }

    #[test]
    fn test_color_packing_saturates() {
        let c = Rgba::new(2.0, -1.0, 0.5, 1.5).to_packed();
        assert_eq!(c.r(), 255);
        assert_eq!(c.g(), 0);
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::from_min_size(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(14.9, 14.9)));
        assert!(!r.contains(Vec2::new(15.0, 12.0)));
        assert!(!r.contains(Vec2::new(9.9, 12.0)));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::from_min_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::from_min_size(Vec2::new(20.0, 20.0), Vec2::new(1.0, 1.0));

        assert_eq!(a.intersect(&b).size(), Vec2::new(5.0, 5.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_clip_scope_pops_on_drop() {
        let mut recorder = DrawRecorder::default();
        {
            let mut scope = ClipScope::new(&mut recorder, Rect::default());
            assert_eq!(scope.clip_depth(), 1);
            scope.line(Vec2::ZERO, Vec2::new(1.0, 1.0), PackedColor(0), 1.0);
        }
        assert_eq!(recorder.clip_depth(), 0);
        assert!(matches!(recorder.commands().last(), Some(DrawCmd::PopClip)));
    }

    #[test]
    fn test_clip_scope_pops_on_early_return() {
        fn draw_until_empty(target: &mut DrawRecorder, skip: bool) {
            let mut scope = ClipScope::new(target, Rect::default());
            if skip {
                return;
            }
            scope.text(Vec2::ZERO, PackedColor(0), "x");
        }

        let mut recorder = DrawRecorder::default();
        draw_until_empty(&mut recorder, true);
        draw_until_empty(&mut recorder, false);
        assert_eq!(recorder.clip_depth(), 0);
        assert_eq!(recorder.texts(), vec!["x"]);
    }

    #[test]
    fn test_text_size_uses_glyph_box() {
        let recorder = DrawRecorder::new(Vec2::new(8.0, 16.0));
        assert_eq!(recorder.text_size("Esc"), Vec2::new(24.0, 16.0));
        assert_eq!(recorder.text_size(""), Vec2::new(0.0, 16.0));
    }
}
