//! On-screen mouse widget.
//!
//! A rounded body with two or three buttons across the top and an optional
//! scroll wheel. With `recordable` set, clicking a drawn button toggles it in
//! the recorded set, which is then tinted until cleared.

use super::{ElementState, IdSet, Overlay};
use crate::host::{widget_scale, Ui};
use crate::input::MouseButton;
use crate::paint::{ClipScope, Corners, DrawList, PackedColor, Rect, Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// Semantic mouse colors, indexes into [`MouseStyle::colors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseColor {
    Background,
    Border,
    ButtonBackground,
    ButtonBorder,
    ButtonPressed,
    ButtonHighlighted,
    ButtonRecorded,
    WheelBackground,
    WheelForeground,
}

impl MouseColor {
    pub const COUNT: usize = 9;

    pub const ALL: [MouseColor; Self::COUNT] = [
        MouseColor::Background,
        MouseColor::Border,
        MouseColor::ButtonBackground,
        MouseColor::ButtonBorder,
        MouseColor::ButtonPressed,
        MouseColor::ButtonHighlighted,
        MouseColor::ButtonRecorded,
        MouseColor::WheelBackground,
        MouseColor::WheelForeground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MouseColor::Background => "Background",
            MouseColor::Border => "Border",
            MouseColor::ButtonBackground => "Button Background",
            MouseColor::ButtonBorder => "Button Border",
            MouseColor::ButtonPressed => "Button Pressed",
            MouseColor::ButtonHighlighted => "Button Highlighted",
            MouseColor::ButtonRecorded => "Button Recorded",
            MouseColor::WheelBackground => "Wheel Background",
            MouseColor::WheelForeground => "Wheel Foreground",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseStyle {
    pub scale: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub body_rounding: f32,
    pub button_height: f32,
    pub button_gap: f32,
    pub wheel_width: f32,
    pub wheel_height: f32,
    pub colors: [Rgba; MouseColor::COUNT],
}

impl Default for MouseStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            body_width: 60.0,
            body_height: 100.0,
            body_rounding: 30.0,
            button_height: 35.0,
            button_gap: 2.0,
            wheel_width: 10.0,
            wheel_height: 20.0,
            colors: [
                Rgba::gray(0.3),
                Rgba::gray(0.1),
                Rgba::gray(0.4),
                Rgba::gray(0.2),
                Rgba::new(1.0, 0.0, 0.0, 0.5),
                Rgba::new(0.0, 1.0, 0.0, 0.5),
                Rgba::new(0.0, 0.5, 1.0, 0.5),
                Rgba::gray(0.2),
                Rgba::gray(0.5),
            ],
        }
    }
}

impl MouseStyle {
    pub fn color(&self, idx: MouseColor) -> PackedColor {
        self.colors[idx as usize].to_packed()
    }

    pub fn set_color(&mut self, idx: MouseColor, color: Rgba) {
        self.colors[idx as usize] = color;
    }

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

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseLayout {
    TwoButton,
    #[default]
    ThreeButton,
}

impl MouseLayout {
    pub const ALL: [MouseLayout; 2] = [MouseLayout::TwoButton, MouseLayout::ThreeButton];

    pub fn name(self) -> &'static str {
        match self {
            MouseLayout::TwoButton => "Two Button",
            MouseLayout::ThreeButton => "Three Button",
        }
    }

    /// Parse a layout name, e.g. "two-button" or "Three Button".
    /// Unknown names fall back to the default layout.
    pub fn from_name(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "twobutton" => MouseLayout::TwoButton,
            "threebutton" => MouseLayout::ThreeButton,
            _ => MouseLayout::default(),
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Display toggles for [`MouseContext::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseOptions {
    /// Tint buttons the input query reports as down
    pub show_pressed: bool,
    pub show_wheel: bool,
    /// Clicking a drawn button toggles it in the recorded set
    pub recordable: bool,
}

/// Button and wheel rectangles for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseGeometry {
    pub canvas: Rect,
    pub body: Rect,
    pub left: Rect,
    pub right: Rect,
    /// Middle strip, present when there are three sections
    pub middle: Option<Rect>,
    scale: f32,
    body_rounding: f32,
    middle_rounding: f32,
}

impl MouseGeometry {
    fn new(style: &MouseStyle, layout: MouseLayout, options: MouseOptions, origin: Vec2, font_size: f32) -> Self {
        let scale = widget_scale(style.scale, font_size);
        let body_width = style.body_width * scale;
        let body_height = style.body_height * scale;
        let button_height = style.button_height * scale;
        let button_gap = style.button_gap * scale;
        let wheel_width = style.wheel_width * scale;
        let wheel_height = style.wheel_height * scale;

        let canvas = Rect::from_min_size(
            origin,
            Vec2::new(body_width + 10.0 * scale, body_height + 10.0 * scale),
        );
        let body_min = origin + Vec2::splat(5.0 * scale);
        let body = Rect::from_min_size(body_min, Vec2::new(body_width, body_height));

        let three_sections = layout == MouseLayout::ThreeButton || options.show_wheel;
        let button_width = if three_sections {
            (body_width - button_gap * 2.0 - wheel_width) / 2.0
        } else {
            (body_width - button_gap) / 2.0
        };

        let left = Rect::from_min_size(body_min, Vec2::new(button_width, button_height));
        let right = Rect::from_min_size(
            Vec2::new(body.max.x - button_width, body_min.y),
            Vec2::new(button_width, button_height),
        );
        let middle = three_sections.then(|| {
            Rect::from_min_size(
                Vec2::new(
                    body_min.x + button_width + button_gap,
                    body_min.y + (button_height - wheel_height) / 2.0,
                ),
                Vec2::new(wheel_width, wheel_height),
            )
        });

        Self {
            canvas,
            body,
            left,
            right,
            middle,
            scale,
            body_rounding: style.body_rounding * scale,
            middle_rounding: wheel_width * 0.3,
        }
    }

    /// Drawn rectangle of `button`, if the layout shows it as a button
    pub fn button_rect(&self, button: MouseButton, layout: MouseLayout) -> Option<Rect> {
        match button {
            MouseButton::Left => Some(self.left),
            MouseButton::Right => Some(self.right),
            MouseButton::Middle if layout == MouseLayout::ThreeButton => self.middle,
            MouseButton::Middle => None,
        }
    }
}

/// Mouse style, highlighted buttons and recorded buttons
#[derive(Debug, Clone, Default)]
pub struct MouseContext {
    style: MouseStyle,
    highlighted: IdSet<MouseButton>,
    recorded: IdSet<MouseButton>,
}

impl MouseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: MouseStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &MouseStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut MouseStyle {
        &mut self.style
    }

    pub fn highlight_button(&mut self, button: MouseButton, highlight: bool) {
        if self.highlighted.set(button, highlight) {
            tracing::debug!("Mouse: {} highlighted={}", button.name(), highlight);
        }
    }

    pub fn clear_highlights(&mut self) {
        tracing::debug!("Mouse: clearing {} highlights", self.highlighted.len());
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, button: MouseButton) -> bool {
        self.highlighted.contains(button)
    }

    pub fn highlighted(&self) -> &[MouseButton] {
        self.highlighted.as_slice()
    }

    pub fn record(&mut self, button: MouseButton, record: bool) {
        if self.recorded.set(button, record) {
            tracing::debug!("Mouse: {} recorded={}", button.name(), record);
        }
    }

    pub fn clear_recorded(&mut self) {
        tracing::debug!("Mouse: clearing {} recorded buttons", self.recorded.len());
        self.recorded.clear();
    }

    pub fn is_recorded(&self, button: MouseButton) -> bool {
        self.recorded.contains(button)
    }

    /// Recorded buttons in the order they were recorded
    pub fn recorded(&self) -> &[MouseButton] {
        self.recorded.as_slice()
    }

    pub fn canvas_size(&self, font_size: f32) -> Vec2 {
        self.geometry(MouseLayout::default(), MouseOptions::default(), Vec2::ZERO, font_size)
            .canvas
            .size()
    }

    /// Rectangles the widget would draw with its canvas at `origin`
    pub fn geometry(
        &self,
        layout: MouseLayout,
        options: MouseOptions,
        origin: Vec2,
        font_size: f32,
    ) -> MouseGeometry {
        MouseGeometry::new(&self.style, layout, options, origin, font_size)
    }

    /// Draw the mouse at the host cursor.
    ///
    /// Takes `&mut self` because a click on a drawn button toggles its
    /// recorded state when `options.recordable` is set.
    pub fn render<U: Ui + ?Sized>(&mut self, ui: &mut U, layout: MouseLayout, options: MouseOptions) {
        let geo = self.geometry(layout, options, ui.cursor_screen_pos(), ui.font_size());
        ui.reserve(geo.canvas.size());

        let mut ui = ClipScope::new(ui, geo.canvas);
        let style = &self.style;

        ui.rect_filled(geo.body, style.color(MouseColor::Background), geo.body_rounding, Corners::All);
        ui.rect(
            geo.body,
            style.color(MouseColor::Border),
            geo.body_rounding,
            Corners::All,
            2.0 * geo.scale,
        );

        let three_button = layout == MouseLayout::ThreeButton;
        for (button, corners) in [(MouseButton::Left, Corners::TopLeft), (MouseButton::Right, Corners::TopRight)] {
            let rect = if button == MouseButton::Left { geo.left } else { geo.right };
            let state = self.button_state(&*ui, button, rect, options);
            self.draw_button(&mut *ui, rect, geo.body_rounding, corners, geo.scale, state);
        }

        let Some(middle) = geo.middle else {
            return;
        };

        if options.show_wheel {
            let style = &self.style;
            ui.rect_filled(middle, style.color(MouseColor::WheelBackground), geo.middle_rounding, Corners::All);
            let notch_spacing = middle.height() / 4.0;
            for i in 1..4 {
                let y = middle.min.y + i as f32 * notch_spacing;
                ui.line(
                    Vec2::new(middle.min.x + 2.0 * geo.scale, y),
                    Vec2::new(middle.max.x - 2.0 * geo.scale, y),
                    style.color(MouseColor::WheelForeground),
                    geo.scale,
                );
            }
        }

        if three_button {
            let state = self.button_state(&*ui, MouseButton::Middle, middle, options);
            if options.show_wheel {
                self.draw_overlay(&mut *ui, middle, geo.middle_rounding, Corners::All, state);
            } else {
                self.draw_button(&mut *ui, middle, geo.middle_rounding, Corners::All, geo.scale, state);
            }
        }
    }

    /// Live state of one button, applying record-on-click first
    fn button_state<U: Ui + ?Sized>(
        &mut self,
        ui: &U,
        button: MouseButton,
        rect: Rect,
        options: MouseOptions,
    ) -> ElementState {
        if options.recordable && ui.is_mouse_clicked(button) && rect.contains(ui.mouse_pos()) {
            let recorded = !self.is_recorded(button);
            self.record(button, recorded);
        }

        ElementState {
            pressed: options.show_pressed && ui.is_mouse_down(button),
            highlighted: self.is_highlighted(button),
            recorded: options.recordable && self.is_recorded(button),
        }
    }

    fn draw_button<D: DrawList + ?Sized>(
        &self,
        draw: &mut D,
        rect: Rect,
        rounding: f32,
        corners: Corners,
        scale: f32,
        state: ElementState,
    ) {
        draw.rect_filled(rect, self.style.color(MouseColor::ButtonBackground), rounding, corners);
        draw.rect(rect, self.style.color(MouseColor::ButtonBorder), rounding, corners, scale);
        self.draw_overlay(draw, rect, rounding, corners, state);
    }

    fn draw_overlay<D: DrawList + ?Sized>(
        &self,
        draw: &mut D,
        rect: Rect,
        rounding: f32,
        corners: Corners,
        state: ElementState,
    ) {
        let color = match state.overlay() {
            // `overlay` never combines pressed and highlighted
            Some(Overlay::Pressed | Overlay::PressedHighlighted) => MouseColor::ButtonPressed,
            Some(Overlay::Highlighted) => MouseColor::ButtonHighlighted,
            Some(Overlay::Recorded) => MouseColor::ButtonRecorded,
            None => return,
        };
        draw.rect_filled(rect, self.style.color(color), rounding, corners);
    }
}
