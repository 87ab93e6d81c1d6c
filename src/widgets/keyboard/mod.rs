//! On-screen keyboard widget.
//!
//! Draws one of the full layouts (function row, main block, navigation
//! cluster, numeric pad) or the numeric pad alone. Keys currently down are
//! tinted when `show_pressed` is set, highlighted keys get a persistent tint,
//! and a key that is both gets its own color.

pub mod layouts;

pub use layouts::{KeyDef, KeyboardLayout, Section, SectionKind};

use super::{ElementState, IdSet, Overlay};
use crate::host::{widget_scale, Ui};
use crate::input::Key;
use crate::paint::{ClipScope, Corners, DrawList, PackedColor, Rect, Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// Semantic keyboard colors, indexes into [`KeyboardStyle::colors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardColor {
    KeyBackground,
    KeyBorder,
    KeyFaceBorder,
    KeyFace,
    KeyLabel,
    KeyPressed,
    KeyHighlighted,
    KeyPressedHighlighted,
}

impl KeyboardColor {
    pub const COUNT: usize = 8;

    pub const ALL: [KeyboardColor; Self::COUNT] = [
        KeyboardColor::KeyBackground,
        KeyboardColor::KeyBorder,
        KeyboardColor::KeyFaceBorder,
        KeyboardColor::KeyFace,
        KeyboardColor::KeyLabel,
        KeyboardColor::KeyPressed,
        KeyboardColor::KeyHighlighted,
        KeyboardColor::KeyPressedHighlighted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeyboardColor::KeyBackground => "Key Background",
            KeyboardColor::KeyBorder => "Key Border",
            KeyboardColor::KeyFaceBorder => "Key Face Border",
            KeyboardColor::KeyFace => "Key Face",
            KeyboardColor::KeyLabel => "Key Label",
            KeyboardColor::KeyPressed => "Key Pressed",
            KeyboardColor::KeyHighlighted => "Key Highlighted",
            KeyboardColor::KeyPressedHighlighted => "Key Pressed+Highlighted",
        }
    }
}

/// Keyboard sizes (pixels at scale 1 and font size 13) and colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardStyle {
    pub scale: f32,
    /// Size of a 1x1 key cell, including the gap to its neighbor
    pub key_unit: f32,
    /// Horizontal gap between main block, navigation cluster and numeric pad
    pub section_gap: f32,
    pub key_rounding: f32,
    pub key_face_rounding: f32,
    pub key_face_border_size: f32,
    /// Inset of the key face from the key edge
    pub key_face_offset: Vec2,
    /// Label position relative to the key's top-left corner
    pub key_label_offset: Vec2,
    pub board_padding: f32,
    pub colors: [Rgba; KeyboardColor::COUNT],
}

impl Default for KeyboardStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            key_unit: 34.0,
            section_gap: 15.0,
            key_rounding: 3.0,
            key_face_rounding: 2.0,
            key_face_border_size: 2.0,
            key_face_offset: Vec2::new(4.0, 3.0),
            key_label_offset: Vec2::new(6.0, 4.0),
            board_padding: 5.0,
            colors: [
                Rgba::gray(0.8),                // light gray
                Rgba::gray(0.094),              // dark gray
                Rgba::gray(0.757),              // medium gray
                Rgba::gray(0.988),              // near white
                Rgba::gray(0.25),               // dark text
                Rgba::new(1.0, 0.0, 0.0, 0.5),  // red
                Rgba::new(0.0, 1.0, 0.0, 0.5),  // green
                Rgba::new(1.0, 1.0, 0.0, 0.5),  // yellow
            ],
        }
    }
}

impl KeyboardStyle {
    pub fn color(&self, idx: KeyboardColor) -> PackedColor {
        self.colors[idx as usize].to_packed()
    }

    pub fn set_color(&mut self, idx: KeyboardColor, color: Rgba) {
        self.colors[idx as usize] = color;
    }

    /// Restore every size field, leaving colors alone
    pub fn reset_sizes(&mut self) {
        let defaults = Self::default();
        *self = Self {
            colors: self.colors,
            ..defaults
        };
    }

    pub fn reset_colors(&mut self) {
        self.colors = Self::default().colors;
    }
}

/// Display toggles for [`KeyboardContext::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardOptions {
    /// Tint keys the input query reports as down
    pub show_pressed: bool,
}

/// A key resolved to pixels for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedKey {
    pub rect: Rect,
    pub label: &'static str,
    pub key: Key,
}

/// Style sizes multiplied by the render scale
#[derive(Debug, Clone, Copy)]
struct Metrics {
    scale: f32,
    key_unit: f32,
    section_gap: f32,
    board_padding: f32,
    key_rounding: f32,
    face_rounding: f32,
    face_border: f32,
    face_offset: Vec2,
    label_offset: Vec2,
}

impl Metrics {
    fn new(style: &KeyboardStyle, font_size: f32) -> Self {
        let scale = widget_scale(style.scale, font_size);
        Self {
            scale,
            key_unit: style.key_unit * scale,
            section_gap: style.section_gap * scale,
            board_padding: style.board_padding * scale,
            key_rounding: style.key_rounding * scale,
            face_rounding: style.key_face_rounding * scale,
            face_border: style.key_face_border_size * scale,
            face_offset: style.key_face_offset * scale,
            label_offset: style.key_label_offset * scale,
        }
    }

    fn board_size(&self, layout: KeyboardLayout) -> Vec2 {
        let (units, gaps) = layout.extent();
        Vec2::new(
            units.x * self.key_unit + gaps as f32 * self.section_gap + self.board_padding * 2.0,
            units.y * self.key_unit + self.board_padding * 2.0,
        )
    }

    fn place(&self, layout: KeyboardLayout, board_min: Vec2) -> Vec<PlacedKey> {
        let origin = board_min + Vec2::splat(self.board_padding);
        // Keys are drawn slightly smaller than their cell to leave a gap
        let shrink = 2.0 * self.scale;

        let mut placed = Vec::new();
        for section in layout.sections() {
            let section_min = origin
                + section.origin * self.key_unit
                + Vec2::new(section.gaps as f32 * self.section_gap, 0.0);
            for def in section.keys {
                let min = section_min + Vec2::new(def.x, def.y) * self.key_unit;
                let size = Vec2::new(
                    def.width * self.key_unit - shrink,
                    def.height * self.key_unit - shrink,
                );
                placed.push(PlacedKey {
                    rect: Rect::from_min_size(min, size),
                    label: def.label,
                    key: def.key,
                });
            }
        }
        placed
    }
}

/// Keyboard style and highlighted keys
#[derive(Debug, Clone, Default)]
pub struct KeyboardContext {
    style: KeyboardStyle,
    highlighted: IdSet<Key>,
}

impl KeyboardContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: KeyboardStyle) -> Self {
        Self {
            style,
            highlighted: IdSet::new(),
        }
    }

    pub fn style(&self) -> &KeyboardStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut KeyboardStyle {
        &mut self.style
    }

    /// Add or remove a persistent highlight
    pub fn set_highlighted(&mut self, key: Key, highlight: bool) {
        if self.highlighted.set(key, highlight) {
            tracing::debug!("Keyboard: {:?} highlighted={}", key, highlight);
        }
    }

    pub fn clear_highlights(&mut self) {
        tracing::debug!("Keyboard: clearing {} highlights", self.highlighted.len());
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, key: Key) -> bool {
        self.highlighted.contains(key)
    }

    pub fn highlighted(&self) -> &[Key] {
        self.highlighted.as_slice()
    }

    /// Space the board occupies for `layout` at `font_size`
    pub fn canvas_size(&self, layout: KeyboardLayout, font_size: f32) -> Vec2 {
        Metrics::new(&self.style, font_size).board_size(layout)
    }

    /// Pixel rectangles of every key when the board's top-left is `board_min`
    pub fn key_rects(&self, layout: KeyboardLayout, board_min: Vec2, font_size: f32) -> Vec<PlacedKey> {
        Metrics::new(&self.style, font_size).place(layout, board_min)
    }

    /// Key under `point`, if any
    pub fn key_at(
        &self,
        layout: KeyboardLayout,
        board_min: Vec2,
        font_size: f32,
        point: Vec2,
    ) -> Option<Key> {
        self.key_rects(layout, board_min, font_size)
            .into_iter()
            .find(|placed| placed.rect.contains(point))
            .map(|placed| placed.key)
    }

    /// Draw the keyboard at the host cursor
    pub fn render<U: Ui + ?Sized>(&self, ui: &mut U, layout: KeyboardLayout, options: KeyboardOptions) {
        let metrics = Metrics::new(&self.style, ui.font_size());
        let board_size = metrics.board_size(layout);
        let board_min = ui.cursor_screen_pos();

        if !ui.reserve(board_size) {
            return;
        }

        let mut ui = ClipScope::new(ui, Rect::from_min_size(board_min, board_size));
        for placed in metrics.place(layout, board_min) {
            let state = ElementState {
                pressed: options.show_pressed && ui.is_key_down(placed.key),
                highlighted: self.is_highlighted(placed.key),
                recorded: false,
            };
            self.draw_key(&mut *ui, &metrics, &placed, state);
        }
    }

    fn draw_key<D: DrawList + ?Sized>(
        &self,
        draw: &mut D,
        metrics: &Metrics,
        placed: &PlacedKey,
        state: ElementState,
    ) {
        let style = &self.style;
        let rect = placed.rect;

        draw.rect_filled(rect, style.color(KeyboardColor::KeyBackground), metrics.key_rounding, Corners::All);
        draw.rect(
            rect,
            style.color(KeyboardColor::KeyBorder),
            metrics.key_rounding,
            Corners::All,
            metrics.scale,
        );

        let face_min = rect.min + metrics.face_offset;
        let face_size = rect.size() - metrics.face_offset * 2.0;
        let face = Rect::from_min_size(face_min, face_size);
        draw.rect(
            face,
            style.color(KeyboardColor::KeyFaceBorder),
            metrics.face_rounding,
            Corners::All,
            metrics.face_border,
        );
        draw.rect_filled(face, style.color(KeyboardColor::KeyFace), metrics.face_rounding, Corners::All);

        draw.text(rect.min + metrics.label_offset, style.color(KeyboardColor::KeyLabel), placed.label);

        let overlay = match state.overlay_with_combined() {
            Some(Overlay::PressedHighlighted) => Some(KeyboardColor::KeyPressedHighlighted),
            Some(Overlay::Pressed) => Some(KeyboardColor::KeyPressed),
            Some(Overlay::Highlighted) => Some(KeyboardColor::KeyHighlighted),
            Some(Overlay::Recorded) | None => None,
        };
        if let Some(color) = overlay {
            draw.rect_filled(rect, style.color(color), metrics.key_rounding, Corners::All);
        }
    }
}
