//! On-screen gamepad widget.
//!
//! A controller body with triggers above it, shoulder buttons, a D-pad, two
//! analog sticks, four face buttons and two center buttons. Each cluster can
//! be hidden. Face labels follow the controller family.

use super::{ElementState, IdSet, Overlay};
use crate::host::{widget_scale, Ui};
use crate::input::{GamepadAxis, InputQuery, Key};
use crate::paint::{ClipScope, Corners, DrawList, PackedColor, Rect, Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// Semantic gamepad colors, indexes into [`GamepadStyle::colors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadColor {
    Background,
    Border,
    ButtonBackground,
    ButtonBorder,
    ButtonLabel,
    ButtonPressed,
    ButtonHighlighted,
    DPadBackground,
    StickBackground,
    StickForeground,
    TriggerBackground,
    TriggerForeground,
}

impl GamepadColor {
    pub const COUNT: usize = 12;

    pub const ALL: [GamepadColor; Self::COUNT] = [
        GamepadColor::Background,
        GamepadColor::Border,
        GamepadColor::ButtonBackground,
        GamepadColor::ButtonBorder,
        GamepadColor::ButtonLabel,
        GamepadColor::ButtonPressed,
        GamepadColor::ButtonHighlighted,
        GamepadColor::DPadBackground,
        GamepadColor::StickBackground,
        GamepadColor::StickForeground,
        GamepadColor::TriggerBackground,
        GamepadColor::TriggerForeground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GamepadColor::Background => "Background",
            GamepadColor::Border => "Border",
            GamepadColor::ButtonBackground => "Button Background",
            GamepadColor::ButtonBorder => "Button Border",
            GamepadColor::ButtonLabel => "Button Label",
            GamepadColor::ButtonPressed => "Button Pressed",
            GamepadColor::ButtonHighlighted => "Button Highlighted",
            GamepadColor::DPadBackground => "D-Pad Background",
            GamepadColor::StickBackground => "Stick Background",
            GamepadColor::StickForeground => "Stick Foreground",
            GamepadColor::TriggerBackground => "Trigger Background",
            GamepadColor::TriggerForeground => "Trigger Foreground",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadStyle {
    pub scale: f32,
    pub body_width: f32,
    pub body_height: f32,
    pub body_rounding: f32,
    /// Face button diameter
    pub button_size: f32,
    pub button_rounding: f32,
    pub dpad_size: f32,
    /// Stick base diameter
    pub stick_size: f32,
    pub trigger_width: f32,
    pub trigger_height: f32,
    pub colors: [Rgba; GamepadColor::COUNT],
}

impl Default for GamepadStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            body_width: 200.0,
            body_height: 120.0,
            body_rounding: 20.0,
            button_size: 20.0,
            button_rounding: 10.0,
            dpad_size: 40.0,
            stick_size: 30.0,
            trigger_width: 30.0,
            trigger_height: 15.0,
            colors: [
                Rgba::gray(0.25),
                Rgba::gray(0.1),
                Rgba::gray(0.4),
                Rgba::gray(0.2),
                Rgba::gray(1.0),
                Rgba::new(1.0, 0.0, 0.0, 0.5),
                Rgba::new(0.0, 1.0, 0.0, 0.5),
                Rgba::gray(0.3),
                Rgba::gray(0.2),
                Rgba::gray(0.5),
                Rgba::gray(0.3),
                Rgba::gray(0.6),
            ],
        }
    }
}

impl GamepadStyle {
    pub fn color(&self, idx: GamepadColor) -> PackedColor {
        self.colors[idx as usize].to_packed()
    }

    pub fn set_color(&mut self, idx: GamepadColor, color: Rgba) {
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

/// Controller family, which decides the face button labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamepadLayout {
    #[default]
    Xbox,
    PlayStation,
    Steam,
    SwitchPro,
}

impl GamepadLayout {
    pub const ALL: [GamepadLayout; 4] = [
        GamepadLayout::Xbox,
        GamepadLayout::PlayStation,
        GamepadLayout::Steam,
        GamepadLayout::SwitchPro,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GamepadLayout::Xbox => "Xbox",
            GamepadLayout::PlayStation => "PlayStation",
            GamepadLayout::Steam => "Steam",
            GamepadLayout::SwitchPro => "Switch Pro",
        }
    }

    /// Parse a layout name, ignoring case and punctuation.
    /// Unknown names fall back to Xbox.
    pub fn from_name(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "xbox" => GamepadLayout::Xbox,
            "playstation" | "ps" | "dualshock" | "dualsense" => GamepadLayout::PlayStation,
            "steam" => GamepadLayout::Steam,
            "switchpro" | "switch" | "nintendo" => GamepadLayout::SwitchPro,
            _ => GamepadLayout::default(),
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Face button labels as (up, right, down, left)
    pub fn face_labels(self) -> [&'static str; 4] {
        match self {
            GamepadLayout::Xbox | GamepadLayout::Steam => ["Y", "B", "A", "X"],
            GamepadLayout::PlayStation => ["\u{25B3}", "\u{25CB}", "\u{2715}", "\u{25A1}"],
            GamepadLayout::SwitchPro => ["X", "A", "B", "Y"],
        }
    }
}

/// Display toggles for [`GamepadContext::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadOptions {
    pub show_pressed: bool,
    /// Offset the stick caps by the analog stick axes
    pub show_sticks: bool,
    /// Fill the triggers by their analog level
    pub show_triggers: bool,
    pub hide_dpad: bool,
    pub hide_face_buttons: bool,
    pub hide_shoulder_buttons: bool,
    pub hide_triggers: bool,
    pub hide_sticks: bool,
    pub hide_center_buttons: bool,
}

const DPAD_DIRECTIONS: [Key; 4] = [
    Key::GamepadDpadUp,
    Key::GamepadDpadRight,
    Key::GamepadDpadDown,
    Key::GamepadDpadLeft,
];

const FACE_BUTTONS: [Key; 4] = [
    Key::GamepadFaceUp,
    Key::GamepadFaceRight,
    Key::GamepadFaceDown,
    Key::GamepadFaceLeft,
];

/// Style sizes multiplied by the render scale
#[derive(Debug, Clone, Copy)]
struct Metrics {
    scale: f32,
    body_width: f32,
    body_height: f32,
    body_rounding: f32,
    button_size: f32,
    dpad_size: f32,
    stick_size: f32,
    trigger_width: f32,
    trigger_height: f32,
}

impl Metrics {
    fn new(style: &GamepadStyle, font_size: f32) -> Self {
        let scale = widget_scale(style.scale, font_size);
        Self {
            scale,
            body_width: style.body_width * scale,
            body_height: style.body_height * scale,
            body_rounding: style.body_rounding * scale,
            button_size: style.button_size * scale,
            dpad_size: style.dpad_size * scale,
            stick_size: style.stick_size * scale,
            trigger_width: style.trigger_width * scale,
            trigger_height: style.trigger_height * scale,
        }
    }

    fn canvas_size(&self) -> Vec2 {
        Vec2::new(
            self.body_width + 20.0 * self.scale,
            self.body_height + self.trigger_height + 20.0 * self.scale,
        )
    }

    /// Point at a fraction of the body's width and height
    fn body_point(&self, body_min: Vec2, fx: f32, fy: f32) -> Vec2 {
        body_min + Vec2::new(self.body_width * fx, self.body_height * fy)
    }
}

/// Gamepad style and highlighted buttons
#[derive(Debug, Clone, Default)]
pub struct GamepadContext {
    style: GamepadStyle,
    highlighted: IdSet<Key>,
}

impl GamepadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: GamepadStyle) -> Self {
        Self {
            style,
            highlighted: IdSet::new(),
        }
    }

    pub fn style(&self) -> &GamepadStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut GamepadStyle {
        &mut self.style
    }

    pub fn highlight_button(&mut self, button: Key, highlight: bool) {
        if self.highlighted.set(button, highlight) {
            tracing::debug!("Gamepad: {:?} highlighted={}", button, highlight);
        }
    }

    pub fn clear_highlights(&mut self) {
        tracing::debug!("Gamepad: clearing {} highlights", self.highlighted.len());
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, button: Key) -> bool {
        self.highlighted.contains(button)
    }

    pub fn highlighted(&self) -> &[Key] {
        self.highlighted.as_slice()
    }

    pub fn canvas_size(&self, font_size: f32) -> Vec2 {
        Metrics::new(&self.style, font_size).canvas_size()
    }

    /// Draw the gamepad at the host cursor
    pub fn render<U: Ui + ?Sized>(&self, ui: &mut U, layout: GamepadLayout, options: GamepadOptions) {
        let m = Metrics::new(&self.style, ui.font_size());
        let canvas_min = ui.cursor_screen_pos();
        let canvas = Rect::from_min_size(canvas_min, m.canvas_size());
        ui.reserve(canvas.size());

        let mut ui = ClipScope::new(ui, canvas);
        let ui = &mut *ui;
        let style = &self.style;
        let body_min = canvas_min + Vec2::new(10.0 * m.scale, m.trigger_height + 10.0 * m.scale);
        let body = Rect::from_min_size(body_min, Vec2::new(m.body_width, m.body_height));

        if !options.hide_triggers {
            let trigger_size = Vec2::new(m.trigger_width, m.trigger_height);
            let y = canvas_min.y + 5.0 * m.scale;
            let left = Rect::from_min_size(Vec2::new(body_min.x + 15.0 * m.scale, y), trigger_size);
            let right = Rect::from_min_size(
                Vec2::new(body.max.x - m.trigger_width - 15.0 * m.scale, y),
                trigger_size,
            );
            self.draw_trigger(ui, &m, left, Key::GamepadL2, GamepadAxis::LeftTrigger, options);
            self.draw_trigger(ui, &m, right, Key::GamepadR2, GamepadAxis::RightTrigger, options);
        }

        ui.rect_filled(body, style.color(GamepadColor::Background), m.body_rounding, Corners::All);
        ui.rect(body, style.color(GamepadColor::Border), m.body_rounding, Corners::All, 2.0 * m.scale);

        if !options.hide_shoulder_buttons {
            let size = Vec2::new(m.trigger_width, m.trigger_height * 0.8);
            let y = body_min.y + 5.0 * m.scale;
            let left = Rect::from_min_size(Vec2::new(body_min.x + 10.0 * m.scale, y), size);
            let right = Rect::from_min_size(
                Vec2::new(body.max.x - m.trigger_width - 10.0 * m.scale, y),
                size,
            );
            self.draw_shoulder(ui, &m, left, Key::GamepadL1, "L1", options);
            self.draw_shoulder(ui, &m, right, Key::GamepadR1, "R1", options);
        }

        if !options.hide_dpad {
            self.draw_dpad(ui, &m, m.body_point(body_min, 0.22, 0.55), options);
        }

        if !options.hide_sticks {
            let radius = m.stick_size * 0.5;
            self.draw_stick(
                ui,
                &m,
                m.body_point(body_min, 0.35, 0.35),
                radius,
                Key::GamepadL3,
                (GamepadAxis::LeftStickX, GamepadAxis::LeftStickY),
                options,
            );
            self.draw_stick(
                ui,
                &m,
                m.body_point(body_min, 0.65, 0.65),
                radius,
                Key::GamepadR3,
                (GamepadAxis::RightStickX, GamepadAxis::RightStickY),
                options,
            );
        }

        if !options.hide_face_buttons {
            let center = m.body_point(body_min, 0.78, 0.45);
            let half_spacing = m.button_size * 1.3 * 0.5;
            let offsets = [
                Vec2::new(0.0, -half_spacing),
                Vec2::new(half_spacing, 0.0),
                Vec2::new(0.0, half_spacing),
                Vec2::new(-half_spacing, 0.0),
            ];
            for ((key, label), offset) in FACE_BUTTONS.into_iter().zip(layout.face_labels()).zip(offsets) {
                self.draw_round_button(ui, &m, center + offset, m.button_size * 0.5, Some(label), key, options);
            }
        }

        if !options.hide_center_buttons {
            let radius = m.button_size * 0.4;
            let back = m.body_point(body_min, 0.42, 0.35);
            let start = m.body_point(body_min, 0.58, 0.35);
            self.draw_round_button(ui, &m, back, radius, None, Key::GamepadBack, options);
            self.draw_round_button(ui, &m, start, radius, None, Key::GamepadStart, options);
        }
    }

    fn state<I: InputQuery + ?Sized>(&self, input: &I, key: Key, options: GamepadOptions) -> ElementState {
        ElementState {
            pressed: options.show_pressed && input.is_key_down(key),
            highlighted: self.is_highlighted(key),
            recorded: false,
        }
    }

    fn overlay_color(state: ElementState) -> Option<GamepadColor> {
        match state.overlay() {
            // `overlay` never combines pressed and highlighted
            Some(Overlay::Pressed | Overlay::PressedHighlighted) => Some(GamepadColor::ButtonPressed),
            Some(Overlay::Highlighted) => Some(GamepadColor::ButtonHighlighted),
            Some(Overlay::Recorded) | None => None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_round_button<U: Ui + ?Sized>(
        &self,
        ui: &mut U,
        m: &Metrics,
        center: Vec2,
        radius: f32,
        label: Option<&str>,
        key: Key,
        options: GamepadOptions,
    ) {
        let style = &self.style;
        ui.circle_filled(center, radius, style.color(GamepadColor::ButtonBackground));
        ui.circle(center, radius, style.color(GamepadColor::ButtonBorder), 1.5 * m.scale);

        if let Some(label) = label {
            let size = ui.text_size(label);
            ui.text(center - size * 0.5, style.color(GamepadColor::ButtonLabel), label);
        }

        if let Some(color) = Self::overlay_color(self.state(&*ui, key, options)) {
            ui.circle_filled(center, radius, style.color(color));
        }
    }

    fn draw_shoulder<U: Ui + ?Sized>(
        &self,
        ui: &mut U,
        m: &Metrics,
        rect: Rect,
        key: Key,
        label: &str,
        options: GamepadOptions,
    ) {
        let style = &self.style;
        let rounding = 5.0 * m.scale;
        ui.rect_filled(rect, style.color(GamepadColor::ButtonBackground), rounding, Corners::All);
        ui.rect(rect, style.color(GamepadColor::ButtonBorder), rounding, Corners::All, m.scale);

        let text_size = ui.text_size(label);
        ui.text(
            rect.min + (rect.size() - text_size) * 0.5,
            style.color(GamepadColor::ButtonLabel),
            label,
        );

        if let Some(color) = Self::overlay_color(self.state(&*ui, key, options)) {
            ui.rect_filled(rect, style.color(color), rounding, Corners::All);
        }
    }

    fn draw_trigger<U: Ui + ?Sized>(
        &self,
        ui: &mut U,
        m: &Metrics,
        rect: Rect,
        key: Key,
        axis: GamepadAxis,
        options: GamepadOptions,
    ) {
        let style = &self.style;
        let rounding = 3.0 * m.scale;
        ui.rect_filled(rect, style.color(GamepadColor::TriggerBackground), rounding, Corners::All);
        ui.rect(rect, style.color(GamepadColor::Border), rounding, Corners::All, m.scale);

        let state = self.state(&*ui, key, options);
        if options.show_triggers {
            let digital = if state.pressed { 1.0 } else { 0.0 };
            let fill = ui.gamepad_axis(axis).clamp(0.0, 1.0).max(digital);
            if fill > 0.0 {
                let filled = Rect::from_min_size(rect.min, Vec2::new(rect.width() * fill, rect.height()));
                ui.rect_filled(filled, style.color(GamepadColor::TriggerForeground), rounding, Corners::All);
            }
        }

        if let Some(color) = Self::overlay_color(state) {
            ui.rect_filled(rect, style.color(color), rounding, Corners::All);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_stick<U: Ui + ?Sized>(
        &self,
        ui: &mut U,
        m: &Metrics,
        center: Vec2,
        radius: f32,
        click: Key,
        (axis_x, axis_y): (GamepadAxis, GamepadAxis),
        options: GamepadOptions,
    ) {
        let style = &self.style;
        ui.circle_filled(center, radius, style.color(GamepadColor::StickBackground));
        ui.circle(center, radius, style.color(GamepadColor::Border), 1.5 * m.scale);

        let cap_radius = radius * 0.6;
        let cap_center = if options.show_sticks {
            let travel = radius - cap_radius;
            let deflection = Vec2::new(
                ui.gamepad_axis(axis_x).clamp(-1.0, 1.0),
                ui.gamepad_axis(axis_y).clamp(-1.0, 1.0),
            );
            center + deflection * travel
        } else {
            center
        };
        ui.circle_filled(cap_center, cap_radius, style.color(GamepadColor::StickForeground));

        if let Some(color) = Self::overlay_color(self.state(&*ui, click, options)) {
            ui.circle_filled(center, radius, style.color(color));
        }
    }

    fn draw_dpad<U: Ui + ?Sized>(&self, ui: &mut U, m: &Metrics, center: Vec2, options: GamepadOptions) {
        let style = &self.style;
        let arm_width = m.dpad_size * 0.35;
        let arm_length = m.dpad_size * 0.5;
        let rounding = 3.0 * m.scale;

        let vertical = Rect::from_center_size(center, Vec2::new(arm_width, arm_length * 2.0));
        let horizontal = Rect::from_center_size(center, Vec2::new(arm_length * 2.0, arm_width));
        for arm in [vertical, horizontal] {
            ui.rect_filled(arm, style.color(GamepadColor::DPadBackground), rounding, Corners::All);
        }
        for arm in [vertical, horizontal] {
            ui.rect(arm, style.color(GamepadColor::Border), rounding, Corners::All, m.scale);
        }

        let half = arm_width * 0.4;
        let inner = arm_width * 0.3;
        let regions = [
            Rect::from_min_max(
                center + Vec2::new(-half, -arm_length),
                center + Vec2::new(half, -inner),
            ),
            Rect::from_min_max(
                center + Vec2::new(inner, -half),
                center + Vec2::new(arm_length, half),
            ),
            Rect::from_min_max(
                center + Vec2::new(-half, inner),
                center + Vec2::new(half, arm_length),
            ),
            Rect::from_min_max(
                center + Vec2::new(-arm_length, -half),
                center + Vec2::new(-inner, half),
            ),
        ];

        for (key, region) in DPAD_DIRECTIONS.into_iter().zip(regions) {
            if let Some(color) = Self::overlay_color(self.state(&*ui, key, options)) {
                ui.rect_filled(region, style.color(color), 2.0 * m.scale, Corners::All);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Frame;
    use crate::input::InputState;
    use crate::paint::DrawRecorder;

    fn render(
        ctx: &GamepadContext,
        input: &InputState,
        layout: GamepadLayout,
        options: GamepadOptions,
    ) -> DrawRecorder {
        let mut recorder = DrawRecorder::default();
        {
            let viewport = Rect::from_min_size(Vec2::ZERO, Vec2::new(1000.0, 1000.0));
            let mut frame = Frame::new(&mut recorder, input, viewport, 13.0);
            ctx.render(&mut frame, layout, options);
        }
        recorder
    }

    #[test]
    fn test_canvas_size() {
        let mut ctx = GamepadContext::new();
        assert_eq!(ctx.canvas_size(13.0), Vec2::new(220.0, 155.0));
        ctx.style_mut().scale = 2.0;
        assert_eq!(ctx.canvas_size(13.0), Vec2::new(440.0, 310.0));
        assert_eq!(ctx.canvas_size(6.5), Vec2::new(220.0, 155.0));
    }

    #[test]
    fn test_face_labels_per_layout() {
        let ctx = GamepadContext::new();
        let input = InputState::default();
        let only_face = GamepadOptions {
            hide_shoulder_buttons: true,
            ..GamepadOptions::default()
        };

        let ps = render(&ctx, &input, GamepadLayout::PlayStation, only_face);
        assert_eq!(ps.texts(), vec!["\u{25B3}", "\u{25CB}", "\u{2715}", "\u{25A1}"]);

        let xbox = render(&ctx, &input, GamepadLayout::Xbox, only_face);
        assert_eq!(xbox.texts(), vec!["Y", "B", "A", "X"]);

        let steam = render(&ctx, &input, GamepadLayout::Steam, only_face);
        assert_eq!(steam.texts(), xbox.texts());

        let switch = render(&ctx, &input, GamepadLayout::SwitchPro, only_face);
        assert_eq!(switch.texts(), vec!["X", "A", "B", "Y"]);
    }

    #[test]
    fn test_shoulder_labels() {
        let ctx = GamepadContext::new();
        let input = InputState::default();
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        let texts = recorder.texts();
        assert_eq!(&texts[..2], &["L1", "R1"]);
        assert_eq!(texts.len(), 6);
    }

    #[test]
    fn test_hide_flags_remove_clusters() {
        let ctx = GamepadContext::new();
        let input = InputState::default();
        let style = ctx.style();

        let all_hidden = GamepadOptions {
            hide_dpad: true,
            hide_face_buttons: true,
            hide_shoulder_buttons: true,
            hide_triggers: true,
            hide_sticks: true,
            hide_center_buttons: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, all_hidden);
        // Clip, body fill, body border, pop
        assert_eq!(recorder.commands().len(), 4);
        assert!(recorder.texts().is_empty());

        // Trigger and D-pad backgrounds share a default color
        let no_dpad = GamepadOptions {
            hide_dpad: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, no_dpad);
        assert_eq!(recorder.filled_rects(style.color(GamepadColor::TriggerBackground)).len(), 2);
        let no_triggers = GamepadOptions {
            hide_triggers: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, no_triggers);
        assert_eq!(recorder.filled_rects(style.color(GamepadColor::DPadBackground)).len(), 2);

        let full = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        assert_eq!(full.filled_circles(style.color(GamepadColor::StickBackground)).len(), 2);
        // Four face buttons and two center buttons
        assert_eq!(full.filled_circles(style.color(GamepadColor::ButtonBackground)).len(), 6);

        let no_sticks = GamepadOptions {
            hide_sticks: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, no_sticks);
        assert!(recorder
            .filled_circles(style.color(GamepadColor::StickBackground))
            .is_empty());
        assert_eq!(recorder.clip_depth(), 0);
    }

    #[test]
    fn test_pressed_wins_over_highlighted() {
        let mut ctx = GamepadContext::new();
        ctx.highlight_button(Key::GamepadFaceDown, true);
        ctx.highlight_button(Key::GamepadFaceUp, true);
        let mut input = InputState::default();
        input.hold_key(Key::GamepadFaceDown);

        let options = GamepadOptions {
            show_pressed: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, options);
        let style = ctx.style();
        assert_eq!(recorder.filled_circles(style.color(GamepadColor::ButtonPressed)).len(), 1);
        assert_eq!(recorder.filled_circles(style.color(GamepadColor::ButtonHighlighted)).len(), 1);

        // Without show_pressed only highlights are drawn
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        assert!(recorder.filled_circles(style.color(GamepadColor::ButtonPressed)).is_empty());
        assert_eq!(recorder.filled_circles(style.color(GamepadColor::ButtonHighlighted)).len(), 2);
    }

    #[test]
    fn test_dpad_direction_overlay_precedence() {
        let mut ctx = GamepadContext::new();
        ctx.highlight_button(Key::GamepadDpadUp, true);
        ctx.highlight_button(Key::GamepadDpadLeft, true);
        let mut input = InputState::default();
        input.hold_key(Key::GamepadDpadUp);

        let options = GamepadOptions {
            show_pressed: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, options);
        let style = ctx.style();

        let pressed = recorder.filled_rects(style.color(GamepadColor::ButtonPressed));
        let highlighted = recorder.filled_rects(style.color(GamepadColor::ButtonHighlighted));
        assert_eq!(pressed.len(), 1);
        assert_eq!(highlighted.len(), 1);
        // Up region is above the left region's center line
        assert!(pressed[0].max.y < highlighted[0].max.y);
        assert!(highlighted[0].min.x < pressed[0].min.x);
    }

    #[test]
    fn test_stick_follows_axes() {
        let ctx = GamepadContext::new();
        let mut input = InputState::default();
        input.set_axis(GamepadAxis::LeftStickX, 1.0);
        input.set_axis(GamepadAxis::LeftStickY, -1.0);
        let style = ctx.style();

        let options = GamepadOptions {
            show_sticks: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, options);
        let bases = recorder.filled_circles(style.color(GamepadColor::StickBackground));
        let caps = recorder.filled_circles(style.color(GamepadColor::StickForeground));

        // Radius 15, cap 9, so full deflection moves the cap 6px
        let (base_center, base_radius) = bases[0];
        let (cap_center, cap_radius) = caps[0];
        assert_eq!(base_radius, 15.0);
        assert_eq!(cap_radius, 9.0);
        assert_eq!(cap_center, base_center + Vec2::new(6.0, -6.0));
        // Right stick untouched
        assert_eq!(caps[1].0, bases[1].0);

        let recorder = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        let bases = recorder.filled_circles(style.color(GamepadColor::StickBackground));
        let caps = recorder.filled_circles(style.color(GamepadColor::StickForeground));
        assert_eq!(caps[0].0, bases[0].0);
    }

    #[test]
    fn test_trigger_fill_level() {
        let ctx = GamepadContext::new();
        let mut input = InputState::default();
        input.set_axis(GamepadAxis::LeftTrigger, 0.5);
        input.hold_key(Key::GamepadR2);
        let style = ctx.style();

        let options = GamepadOptions {
            show_pressed: true,
            show_triggers: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, options);
        let fills = recorder.filled_rects(style.color(GamepadColor::TriggerForeground));
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].width(), 15.0);
        assert_eq!(fills[1].width(), 30.0);

        let levels_only = GamepadOptions {
            show_triggers: true,
            ..GamepadOptions::default()
        };
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, levels_only);
        let fills = recorder.filled_rects(style.color(GamepadColor::TriggerForeground));
        assert_eq!(fills.len(), 1);
    }

    #[test]
    fn test_highlight_then_clear() {
        let mut ctx = GamepadContext::new();
        ctx.highlight_button(Key::GamepadFaceDown, true);
        ctx.highlight_button(Key::GamepadFaceDown, true);
        assert_eq!(ctx.highlighted(), &[Key::GamepadFaceDown]);

        let input = InputState::default();
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        assert_eq!(
            recorder
                .filled_circles(ctx.style().color(GamepadColor::ButtonHighlighted))
                .len(),
            1
        );

        ctx.clear_highlights();
        let recorder = render(&ctx, &input, GamepadLayout::Xbox, GamepadOptions::default());
        assert!(recorder
            .filled_circles(ctx.style().color(GamepadColor::ButtonHighlighted))
            .is_empty());
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!(GamepadLayout::from_name("PlayStation"), GamepadLayout::PlayStation);
        assert_eq!(GamepadLayout::from_name("switch-pro"), GamepadLayout::SwitchPro);
        assert_eq!(GamepadLayout::from_name("atari"), GamepadLayout::Xbox);
        assert_eq!(GamepadLayout::from_index(2), GamepadLayout::Steam);
        assert_eq!(GamepadLayout::from_index(99), GamepadLayout::Xbox);
        assert_eq!(GamepadLayout::SwitchPro.next(), GamepadLayout::Xbox);
    }
}
