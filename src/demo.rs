//! Demo application state (frontend-agnostic)
//!
//! `DemoApp` owns the three widget contexts, the live [`InputState`] and the
//! settings panel. Frontends feed it [`FrontendEvent`]s, tell it where the
//! panel and the canvas ended up on screen, and hand it a [`DrawList`] to
//! render the active widget into.

use crate::config::{Config, WidgetKind};
use crate::frontend::events::{keys_for_event, FrontendEvent};
use crate::host::Frame;
use crate::input::{GamepadAxis, InputQuery, InputState, Key, MouseButton};
use crate::paint::{DrawList, PackedColor, Rect, Rgba, Vec2};
use crate::widgets::{
    GamepadColor, GamepadContext, GamepadLayout, GamepadOptions, GamepadStyle, KeyboardColor,
    KeyboardContext, KeyboardLayout, KeyboardOptions, KeyboardStyle, MouseColor, MouseContext,
    MouseLayout, MouseOptions, MouseStyle,
};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, MouseButton as TermButton, MouseEventKind};
use ratatui::layout::{Position, Rect as CellRect};
use std::time::Instant;

const WASD: &[Key] = &[Key::W, Key::A, Key::S, Key::D];
const ARROWS: &[Key] = &[Key::UpArrow, Key::LeftArrow, Key::DownArrow, Key::RightArrow];
const NUMPAD_DIGITS: &[Key] = &[
    Key::Keypad0, Key::Keypad1, Key::Keypad2, Key::Keypad3, Key::Keypad4,
    Key::Keypad5, Key::Keypad6, Key::Keypad7, Key::Keypad8, Key::Keypad9,
];
const FACE_BUTTONS: &[Key] = &[
    Key::GamepadFaceUp, Key::GamepadFaceRight, Key::GamepadFaceDown, Key::GamepadFaceLeft,
];
const DPAD: &[Key] = &[
    Key::GamepadDpadUp, Key::GamepadDpadRight, Key::GamepadDpadDown, Key::GamepadDpadLeft,
];
const SHOULDERS: &[Key] = &[Key::GamepadL1, Key::GamepadR1, Key::GamepadL2, Key::GamepadR2];

/// Keys the single-key highlight row cycles through
const SINGLE_KEYS: [Key; 8] = [
    Key::Space, Key::Enter, Key::Tab, Key::Escape,
    Key::Backspace, Key::LeftShift, Key::LeftCtrl, Key::LeftAlt,
];

/// Step applied to a color channel
const COLOR_STEP: f32 = 0.05;

/// Every option the panel can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFlag {
    KeyboardPressed,
    MousePressed,
    MouseWheel,
    MouseRecordable,
    GamepadPressed,
    GamepadSticks,
    GamepadTriggers,
    HideDpad,
    HideFaceButtons,
    HideShoulderButtons,
    HideTriggers,
    HideSticks,
    HideCenterButtons,
}

impl OptionFlag {
    pub fn label(self) -> &'static str {
        match self {
            OptionFlag::KeyboardPressed | OptionFlag::MousePressed | OptionFlag::GamepadPressed => {
                "Show pressed"
            }
            OptionFlag::MouseWheel => "Show wheel",
            OptionFlag::MouseRecordable => "Record on click",
            OptionFlag::GamepadSticks => "Analog sticks",
            OptionFlag::GamepadTriggers => "Analog triggers",
            OptionFlag::HideDpad => "Hide D-pad",
            OptionFlag::HideFaceButtons => "Hide face buttons",
            OptionFlag::HideShoulderButtons => "Hide shoulders",
            OptionFlag::HideTriggers => "Hide triggers",
            OptionFlag::HideSticks => "Hide sticks",
            OptionFlag::HideCenterButtons => "Hide center buttons",
        }
    }

    fn slot(self, options: &mut WidgetOptions) -> &mut bool {
        match self {
            OptionFlag::KeyboardPressed => &mut options.keyboard.show_pressed,
            OptionFlag::MousePressed => &mut options.mouse.show_pressed,
            OptionFlag::MouseWheel => &mut options.mouse.show_wheel,
            OptionFlag::MouseRecordable => &mut options.mouse.recordable,
            OptionFlag::GamepadPressed => &mut options.gamepad.show_pressed,
            OptionFlag::GamepadSticks => &mut options.gamepad.show_sticks,
            OptionFlag::GamepadTriggers => &mut options.gamepad.show_triggers,
            OptionFlag::HideDpad => &mut options.gamepad.hide_dpad,
            OptionFlag::HideFaceButtons => &mut options.gamepad.hide_face_buttons,
            OptionFlag::HideShoulderButtons => &mut options.gamepad.hide_shoulder_buttons,
            OptionFlag::HideTriggers => &mut options.gamepad.hide_triggers,
            OptionFlag::HideSticks => &mut options.gamepad.hide_sticks,
            OptionFlag::HideCenterButtons => &mut options.gamepad.hide_center_buttons,
        }
    }

    fn get(self, options: &WidgetOptions) -> bool {
        let mut copy = *options;
        *self.slot(&mut copy)
    }
}

/// Style size fields the panel's style editor can step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    KeyboardScale,
    KeyUnit,
    SectionGap,
    KeyRounding,
    KeyFaceRounding,
    KeyFaceBorderSize,
    KeyFaceOffsetX,
    KeyFaceOffsetY,
    KeyLabelOffsetX,
    KeyLabelOffsetY,
    BoardPadding,
    MouseScale,
    MouseBodyWidth,
    MouseBodyHeight,
    MouseBodyRounding,
    MouseButtonHeight,
    MouseButtonGap,
    MouseWheelWidth,
    MouseWheelHeight,
    GamepadScale,
    GamepadBodyWidth,
    GamepadBodyHeight,
    GamepadBodyRounding,
    GamepadButtonSize,
    GamepadButtonRounding,
    GamepadDpadSize,
    GamepadStickSize,
    GamepadTriggerWidth,
    GamepadTriggerHeight,
}

impl SizeField {
    const KEYBOARD: &'static [SizeField] = &[
        SizeField::KeyboardScale,
        SizeField::KeyUnit,
        SizeField::SectionGap,
        SizeField::KeyRounding,
        SizeField::KeyFaceRounding,
        SizeField::KeyFaceBorderSize,
        SizeField::KeyFaceOffsetX,
        SizeField::KeyFaceOffsetY,
        SizeField::KeyLabelOffsetX,
        SizeField::KeyLabelOffsetY,
        SizeField::BoardPadding,
    ];

    const MOUSE: &'static [SizeField] = &[
        SizeField::MouseScale,
        SizeField::MouseBodyWidth,
        SizeField::MouseBodyHeight,
        SizeField::MouseBodyRounding,
        SizeField::MouseButtonHeight,
        SizeField::MouseButtonGap,
        SizeField::MouseWheelWidth,
        SizeField::MouseWheelHeight,
    ];

    const GAMEPAD: &'static [SizeField] = &[
        SizeField::GamepadScale,
        SizeField::GamepadBodyWidth,
        SizeField::GamepadBodyHeight,
        SizeField::GamepadBodyRounding,
        SizeField::GamepadButtonSize,
        SizeField::GamepadButtonRounding,
        SizeField::GamepadDpadSize,
        SizeField::GamepadStickSize,
        SizeField::GamepadTriggerWidth,
        SizeField::GamepadTriggerHeight,
    ];

    pub fn for_widget(widget: WidgetKind) -> &'static [SizeField] {
        match widget {
            WidgetKind::Keyboard => Self::KEYBOARD,
            WidgetKind::Mouse => Self::MOUSE,
            WidgetKind::Gamepad => Self::GAMEPAD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeField::KeyboardScale | SizeField::MouseScale | SizeField::GamepadScale => "Scale",
            SizeField::KeyUnit => "Key unit",
            SizeField::SectionGap => "Section gap",
            SizeField::KeyRounding => "Key rounding",
            SizeField::KeyFaceRounding => "Face rounding",
            SizeField::KeyFaceBorderSize => "Face border",
            SizeField::KeyFaceOffsetX => "Face offset x",
            SizeField::KeyFaceOffsetY => "Face offset y",
            SizeField::KeyLabelOffsetX => "Label offset x",
            SizeField::KeyLabelOffsetY => "Label offset y",
            SizeField::BoardPadding => "Board padding",
            SizeField::MouseBodyWidth | SizeField::GamepadBodyWidth => "Body width",
            SizeField::MouseBodyHeight | SizeField::GamepadBodyHeight => "Body height",
            SizeField::MouseBodyRounding | SizeField::GamepadBodyRounding => "Body rounding",
            SizeField::MouseButtonHeight => "Button height",
            SizeField::MouseButtonGap => "Button gap",
            SizeField::MouseWheelWidth => "Wheel width",
            SizeField::MouseWheelHeight => "Wheel height",
            SizeField::GamepadButtonSize => "Button size",
            SizeField::GamepadButtonRounding => "Button rounding",
            SizeField::GamepadDpadSize => "D-pad size",
            SizeField::GamepadStickSize => "Stick size",
            SizeField::GamepadTriggerWidth => "Trigger width",
            SizeField::GamepadTriggerHeight => "Trigger height",
        }
    }

    /// `(min, max, step)`
    pub fn range(self) -> (f32, f32, f32) {
        match self {
            SizeField::KeyboardScale | SizeField::MouseScale | SizeField::GamepadScale => {
                (0.5, 3.0, 0.1)
            }
            SizeField::KeyUnit => (20.0, 60.0, 1.0),
            SizeField::SectionGap => (0.0, 30.0, 1.0),
            SizeField::KeyRounding | SizeField::KeyFaceRounding => (0.0, 10.0, 0.5),
            SizeField::KeyFaceBorderSize => (0.0, 5.0, 0.5),
            SizeField::KeyFaceOffsetX | SizeField::KeyFaceOffsetY => (0.0, 10.0, 0.5),
            SizeField::KeyLabelOffsetX | SizeField::KeyLabelOffsetY => (0.0, 15.0, 0.5),
            SizeField::BoardPadding => (0.0, 20.0, 1.0),
            SizeField::MouseBodyWidth => (30.0, 120.0, 2.0),
            SizeField::MouseBodyHeight => (50.0, 200.0, 2.0),
            SizeField::MouseBodyRounding => (0.0, 60.0, 1.0),
            SizeField::MouseButtonHeight => (10.0, 80.0, 1.0),
            SizeField::MouseButtonGap => (0.0, 10.0, 0.5),
            SizeField::MouseWheelWidth => (4.0, 30.0, 1.0),
            SizeField::MouseWheelHeight => (8.0, 50.0, 1.0),
            SizeField::GamepadBodyWidth => (100.0, 400.0, 5.0),
            SizeField::GamepadBodyHeight => (60.0, 240.0, 5.0),
            SizeField::GamepadBodyRounding => (0.0, 60.0, 1.0),
            SizeField::GamepadButtonSize => (8.0, 40.0, 1.0),
            SizeField::GamepadButtonRounding => (0.0, 20.0, 0.5),
            SizeField::GamepadDpadSize => (20.0, 80.0, 1.0),
            SizeField::GamepadStickSize => (15.0, 60.0, 1.0),
            SizeField::GamepadTriggerWidth => (10.0, 60.0, 1.0),
            SizeField::GamepadTriggerHeight => (5.0, 30.0, 1.0),
        }
    }

    /// `value` moved one step, snapped to the step grid and clamped to the range
    pub fn step(self, value: f32, up: bool) -> f32 {
        let (min, max, step) = self.range();
        let moved = if up { value + step } else { value - step };
        ((moved / step).round() * step).clamp(min, max)
    }

    fn slot<'a>(
        self,
        keyboard: &'a mut KeyboardStyle,
        mouse: &'a mut MouseStyle,
        gamepad: &'a mut GamepadStyle,
    ) -> &'a mut f32 {
        match self {
            SizeField::KeyboardScale => &mut keyboard.scale,
            SizeField::KeyUnit => &mut keyboard.key_unit,
            SizeField::SectionGap => &mut keyboard.section_gap,
            SizeField::KeyRounding => &mut keyboard.key_rounding,
            SizeField::KeyFaceRounding => &mut keyboard.key_face_rounding,
            SizeField::KeyFaceBorderSize => &mut keyboard.key_face_border_size,
            SizeField::KeyFaceOffsetX => &mut keyboard.key_face_offset.x,
            SizeField::KeyFaceOffsetY => &mut keyboard.key_face_offset.y,
            SizeField::KeyLabelOffsetX => &mut keyboard.key_label_offset.x,
            SizeField::KeyLabelOffsetY => &mut keyboard.key_label_offset.y,
            SizeField::BoardPadding => &mut keyboard.board_padding,
            SizeField::MouseScale => &mut mouse.scale,
            SizeField::MouseBodyWidth => &mut mouse.body_width,
            SizeField::MouseBodyHeight => &mut mouse.body_height,
            SizeField::MouseBodyRounding => &mut mouse.body_rounding,
            SizeField::MouseButtonHeight => &mut mouse.button_height,
            SizeField::MouseButtonGap => &mut mouse.button_gap,
            SizeField::MouseWheelWidth => &mut mouse.wheel_width,
            SizeField::MouseWheelHeight => &mut mouse.wheel_height,
            SizeField::GamepadScale => &mut gamepad.scale,
            SizeField::GamepadBodyWidth => &mut gamepad.body_width,
            SizeField::GamepadBodyHeight => &mut gamepad.body_height,
            SizeField::GamepadBodyRounding => &mut gamepad.body_rounding,
            SizeField::GamepadButtonSize => &mut gamepad.button_size,
            SizeField::GamepadButtonRounding => &mut gamepad.button_rounding,
            SizeField::GamepadDpadSize => &mut gamepad.dpad_size,
            SizeField::GamepadStickSize => &mut gamepad.stick_size,
            SizeField::GamepadTriggerWidth => &mut gamepad.trigger_width,
            SizeField::GamepadTriggerHeight => &mut gamepad.trigger_height,
        }
    }
}

/// One color of one widget's style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Keyboard(KeyboardColor),
    Mouse(MouseColor),
    Gamepad(GamepadColor),
}

impl ColorSlot {
    pub fn for_widget(widget: WidgetKind) -> Vec<ColorSlot> {
        match widget {
            WidgetKind::Keyboard => KeyboardColor::ALL.into_iter().map(ColorSlot::Keyboard).collect(),
            WidgetKind::Mouse => MouseColor::ALL.into_iter().map(ColorSlot::Mouse).collect(),
            WidgetKind::Gamepad => GamepadColor::ALL.into_iter().map(ColorSlot::Gamepad).collect(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorSlot::Keyboard(c) => c.name(),
            ColorSlot::Mouse(c) => c.name(),
            ColorSlot::Gamepad(c) => c.name(),
        }
    }
}

/// Color channel the color rows step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChannel {
    #[default]
    Red,
    Green,
    Blue,
    Alpha,
}

impl ColorChannel {
    pub fn label(self) -> &'static str {
        match self {
            ColorChannel::Red => "R",
            ColorChannel::Green => "G",
            ColorChannel::Blue => "B",
            ColorChannel::Alpha => "A",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ColorChannel::Red => ColorChannel::Green,
            ColorChannel::Green => ColorChannel::Blue,
            ColorChannel::Blue => ColorChannel::Alpha,
            ColorChannel::Alpha => ColorChannel::Red,
        }
    }

    fn slot(self, color: &mut Rgba) -> &mut f32 {
        match self {
            ColorChannel::Red => &mut color.r,
            ColorChannel::Green => &mut color.g,
            ColorChannel::Blue => &mut color.b,
            ColorChannel::Alpha => &mut color.a,
        }
    }

    fn get(self, mut color: Rgba) -> f32 {
        *self.slot(&mut color)
    }
}

/// What activating a panel row does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    NextWidget,
    NextLayout,
    Toggle(OptionFlag),
    /// Toggle a group of keyboard keys as a whole
    HighlightKeys(&'static [Key]),
    /// Toggle a group of gamepad buttons as a whole
    HighlightButtons(&'static [Key]),
    HighlightMouse(MouseButton),
    /// Select the next key for the single-key highlight
    NextSingleKey,
    ToggleSingleKey,
    ClearHighlights,
    ClearRecorded,
    ResetSizes,
    ResetColors,
    ToggleStyleEditor,
    AdjustSize { field: SizeField, up: bool },
    NextChannel,
    AdjustColor { color: ColorSlot, up: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelItem {
    pub label: String,
    /// Checkbox state, for toggles
    pub checked: Option<bool>,
    /// Color sample, for color rows
    pub swatch: Option<PackedColor>,
    pub action: PanelAction,
}

impl PanelItem {
    fn action(label: impl Into<String>, action: PanelAction) -> Self {
        Self {
            label: label.into(),
            checked: None,
            swatch: None,
            action,
        }
    }

    fn checkbox(label: impl Into<String>, checked: bool, action: PanelAction) -> Self {
        Self {
            checked: Some(checked),
            ..Self::action(label, action)
        }
    }

    fn toggle(flag: OptionFlag, checked: bool) -> Self {
        Self::checkbox(flag.label(), checked, PanelAction::Toggle(flag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetOptions {
    pub keyboard: KeyboardOptions,
    pub mouse: MouseOptions,
    pub gamepad: GamepadOptions,
}

/// Demo state shared by every frontend
pub struct DemoApp {
    /// Application running flag
    pub running: bool,

    pub widget: WidgetKind,
    pub keyboard: KeyboardContext,
    pub mouse: MouseContext,
    pub gamepad: GamepadContext,
    pub keyboard_layout: KeyboardLayout,
    pub mouse_layout: MouseLayout,
    pub gamepad_layout: GamepadLayout,
    pub options: WidgetOptions,

    pub input: InputState,
    pub font_size: f32,

    /// Virtual pixels per terminal cell
    pub cell_size: Vec2,

    /// Screen area of the panel rows, set by the frontend each frame
    pub panel_area: Option<CellRect>,

    /// Screen area of the widget canvas, set by the frontend each frame
    pub canvas_area: Option<CellRect>,

    /// Selected panel row
    pub panel_cursor: usize,

    /// First panel row on screen
    pub panel_scroll: usize,

    /// Index into the single-key highlight choices
    pub single_key: usize,

    /// The selected single key is highlighted
    pub single_key_highlighted: bool,

    /// Size and color rows are listed in the panel
    pub style_editor: bool,

    /// Channel the color rows step
    pub color_channel: ColorChannel,

    /// Last action, shown in the status line
    pub status: String,

    /// The host reports key releases, so keys stay down until released
    pub key_releases: bool,
}

impl DemoApp {
    pub fn new(config: &Config) -> Self {
        let demo = &config.demo;
        Self {
            running: true,
            widget: demo.widget,
            keyboard: KeyboardContext::with_style(config.keyboard.clone()),
            mouse: MouseContext::with_style(config.mouse.clone()),
            gamepad: GamepadContext::with_style(config.gamepad.clone()),
            keyboard_layout: demo.keyboard_layout(),
            mouse_layout: demo.mouse_layout(),
            gamepad_layout: demo.gamepad_layout(),
            options: WidgetOptions {
                keyboard: demo.keyboard,
                mouse: demo.mouse,
                gamepad: demo.gamepad,
            },
            input: InputState::new(demo.press_hold()),
            font_size: demo.font_size,
            cell_size: Vec2::new(demo.cell_width, demo.cell_height),
            panel_area: None,
            canvas_area: None,
            panel_cursor: 0,
            panel_scroll: 0,
            single_key: 0,
            single_key_highlighted: false,
            style_editor: false,
            color_channel: ColorChannel::default(),
            status: String::new(),
            key_releases: false,
        }
    }

    pub fn begin_frame(&mut self, now: Instant) {
        self.input.begin_frame(now);
    }

    pub fn end_frame(&mut self) {
        self.input.end_frame();
    }

    pub fn layout_name(&self) -> &'static str {
        match self.widget {
            WidgetKind::Keyboard => self.keyboard_layout.name(),
            WidgetKind::Mouse => self.mouse_layout.name(),
            WidgetKind::Gamepad => self.gamepad_layout.name(),
        }
    }

    /// Rows of the settings panel for the active widget
    pub fn panel_items(&self) -> Vec<PanelItem> {
        let mut items = vec![
            PanelItem::action(format!("Widget: {}", self.widget.name()), PanelAction::NextWidget),
            PanelItem::action(format!("Layout: {}", self.layout_name()), PanelAction::NextLayout),
        ];

        let flags: &[OptionFlag] = match self.widget {
            WidgetKind::Keyboard => &[OptionFlag::KeyboardPressed],
            WidgetKind::Mouse => &[
                OptionFlag::MousePressed,
                OptionFlag::MouseWheel,
                OptionFlag::MouseRecordable,
            ],
            WidgetKind::Gamepad => &[
                OptionFlag::GamepadPressed,
                OptionFlag::GamepadSticks,
                OptionFlag::GamepadTriggers,
                OptionFlag::HideDpad,
                OptionFlag::HideFaceButtons,
                OptionFlag::HideShoulderButtons,
                OptionFlag::HideTriggers,
                OptionFlag::HideSticks,
                OptionFlag::HideCenterButtons,
            ],
        };
        items.extend(
            flags
                .iter()
                .map(|flag| PanelItem::toggle(*flag, flag.get(&self.options))),
        );

        match self.widget {
            WidgetKind::Keyboard => {
                items.push(PanelItem::action("Highlight WASD", PanelAction::HighlightKeys(WASD)));
                items.push(PanelItem::action("Highlight arrows", PanelAction::HighlightKeys(ARROWS)));
                items.push(PanelItem::action(
                    "Highlight numpad",
                    PanelAction::HighlightKeys(NUMPAD_DIGITS),
                ));
                let key = self.selected_key();
                items.push(PanelItem::action(format!("Key: {:?}", key), PanelAction::NextSingleKey));
                items.push(PanelItem::checkbox(
                    format!("Highlight {:?}", key),
                    self.single_key_highlighted,
                    PanelAction::ToggleSingleKey,
                ));
            }
            WidgetKind::Mouse => {
                for button in MouseButton::ALL {
                    items.push(PanelItem::action(
                        format!("Highlight {}", button.name().to_lowercase()),
                        PanelAction::HighlightMouse(button),
                    ));
                }
            }
            WidgetKind::Gamepad => {
                items.push(PanelItem::action(
                    "Highlight face buttons",
                    PanelAction::HighlightButtons(FACE_BUTTONS),
                ));
                items.push(PanelItem::action("Highlight D-pad", PanelAction::HighlightButtons(DPAD)));
                items.push(PanelItem::action(
                    "Highlight shoulders",
                    PanelAction::HighlightButtons(SHOULDERS),
                ));
            }
        }

        items.push(PanelItem::action("Clear highlights", PanelAction::ClearHighlights));
        if self.widget == WidgetKind::Mouse {
            items.push(PanelItem::action("Clear recorded", PanelAction::ClearRecorded));
        }
        items.push(PanelItem::action("Reset sizes", PanelAction::ResetSizes));
        items.push(PanelItem::action("Reset colors", PanelAction::ResetColors));
        items.push(PanelItem::checkbox(
            "Style editor",
            self.style_editor,
            PanelAction::ToggleStyleEditor,
        ));
        if self.style_editor {
            self.push_style_rows(&mut items);
        }
        items
    }

    /// Size rows, the channel row and one row per color of the active widget
    fn push_style_rows(&self, items: &mut Vec<PanelItem>) {
        let mut keyboard = self.keyboard.style().clone();
        let mut mouse = self.mouse.style().clone();
        let mut gamepad = self.gamepad.style().clone();
        for &field in SizeField::for_widget(self.widget) {
            let value = *field.slot(&mut keyboard, &mut mouse, &mut gamepad);
            items.push(PanelItem::action(
                format!("{}: {:.1}", field.label(), value),
                PanelAction::AdjustSize { field, up: true },
            ));
        }

        let channel = self.color_channel;
        items.push(PanelItem::action(
            format!("Channel: {}", channel.label()),
            PanelAction::NextChannel,
        ));
        for color in ColorSlot::for_widget(self.widget) {
            let value = self.style_color(color);
            items.push(PanelItem {
                swatch: Some(value.to_packed()),
                ..PanelItem::action(
                    format!("{} {}={:.2}", color.name(), channel.label(), channel.get(value)),
                    PanelAction::AdjustColor { color, up: true },
                )
            });
        }
    }

    pub fn selected_key(&self) -> Key {
        SINGLE_KEYS[self.single_key % SINGLE_KEYS.len()]
    }

    pub fn style_color(&self, color: ColorSlot) -> Rgba {
        match color {
            ColorSlot::Keyboard(c) => self.keyboard.style().colors[c as usize],
            ColorSlot::Mouse(c) => self.mouse.style().colors[c as usize],
            ColorSlot::Gamepad(c) => self.gamepad.style().colors[c as usize],
        }
    }

    fn set_style_color(&mut self, color: ColorSlot, value: Rgba) {
        match color {
            ColorSlot::Keyboard(c) => self.keyboard.style_mut().set_color(c, value),
            ColorSlot::Mouse(c) => self.mouse.style_mut().set_color(c, value),
            ColorSlot::Gamepad(c) => self.gamepad.style_mut().set_color(c, value),
        }
    }

    /// Overlay colors of the active widget, for the legend
    pub fn legend(&self) -> Vec<(&'static str, PackedColor)> {
        match self.widget {
            WidgetKind::Keyboard => {
                let style = self.keyboard.style();
                [
                    KeyboardColor::KeyPressed,
                    KeyboardColor::KeyHighlighted,
                    KeyboardColor::KeyPressedHighlighted,
                ]
                .into_iter()
                .map(|c| (c.name(), style.color(c)))
                .collect()
            }
            WidgetKind::Mouse => {
                let style = self.mouse.style();
                [
                    MouseColor::ButtonPressed,
                    MouseColor::ButtonHighlighted,
                    MouseColor::ButtonRecorded,
                ]
                .into_iter()
                .map(|c| (c.name(), style.color(c)))
                .collect()
            }
            WidgetKind::Gamepad => {
                let style = self.gamepad.style();
                [GamepadColor::ButtonPressed, GamepadColor::ButtonHighlighted]
                    .into_iter()
                    .map(|c| (c.name(), style.color(c)))
                    .collect()
            }
        }
    }

    /// Recorded mouse buttons in recording order, e.g. "Left, Middle"
    pub fn recorded_text(&self) -> String {
        let names: Vec<&str> = self.mouse.recorded().iter().map(|b| b.name()).collect();
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn activate(&mut self, action: PanelAction) {
        match action {
            PanelAction::NextWidget => {
                self.widget = self.widget.next();
                self.panel_cursor = 0;
            }
            PanelAction::NextLayout => match self.widget {
                WidgetKind::Keyboard => self.keyboard_layout = self.keyboard_layout.next(),
                WidgetKind::Mouse => self.mouse_layout = self.mouse_layout.next(),
                WidgetKind::Gamepad => self.gamepad_layout = self.gamepad_layout.next(),
            },
            PanelAction::Toggle(flag) => {
                let slot = flag.slot(&mut self.options);
                *slot = !*slot;
            }
            PanelAction::HighlightKeys(keys) => {
                let on = !keys.iter().all(|k| self.keyboard.is_highlighted(*k));
                for key in keys {
                    self.keyboard.set_highlighted(*key, on);
                }
            }
            PanelAction::HighlightButtons(buttons) => {
                let on = !buttons.iter().all(|b| self.gamepad.is_highlighted(*b));
                for button in buttons {
                    self.gamepad.highlight_button(*button, on);
                }
            }
            PanelAction::HighlightMouse(button) => {
                let on = !self.mouse.is_highlighted(button);
                self.mouse.highlight_button(button, on);
            }
            PanelAction::NextSingleKey => {
                let old = self.selected_key();
                self.single_key = (self.single_key + 1) % SINGLE_KEYS.len();
                let new = self.selected_key();
                if self.single_key_highlighted {
                    self.keyboard.set_highlighted(old, false);
                    self.keyboard.set_highlighted(new, true);
                }
            }
            PanelAction::ToggleSingleKey => {
                let key = self.selected_key();
                self.single_key_highlighted = !self.single_key_highlighted;
                self.keyboard.set_highlighted(key, self.single_key_highlighted);
            }
            PanelAction::ClearHighlights => match self.widget {
                WidgetKind::Keyboard => {
                    self.keyboard.clear_highlights();
                    self.single_key_highlighted = false;
                }
                WidgetKind::Mouse => self.mouse.clear_highlights(),
                WidgetKind::Gamepad => self.gamepad.clear_highlights(),
            },
            PanelAction::ClearRecorded => self.mouse.clear_recorded(),
            PanelAction::ResetSizes => match self.widget {
                WidgetKind::Keyboard => self.keyboard.style_mut().reset_sizes(),
                WidgetKind::Mouse => self.mouse.style_mut().reset_sizes(),
                WidgetKind::Gamepad => self.gamepad.style_mut().reset_sizes(),
            },
            PanelAction::ResetColors => match self.widget {
                WidgetKind::Keyboard => self.keyboard.style_mut().reset_colors(),
                WidgetKind::Mouse => self.mouse.style_mut().reset_colors(),
                WidgetKind::Gamepad => self.gamepad.style_mut().reset_colors(),
            },
            PanelAction::ToggleStyleEditor => self.style_editor = !self.style_editor,
            PanelAction::AdjustSize { field, up } => {
                let slot = field.slot(
                    self.keyboard.style_mut(),
                    self.mouse.style_mut(),
                    self.gamepad.style_mut(),
                );
                *slot = field.step(*slot, up);
            }
            PanelAction::NextChannel => self.color_channel = self.color_channel.next(),
            PanelAction::AdjustColor { color, up } => {
                let mut value = self.style_color(color);
                let slot = self.color_channel.slot(&mut value);
                let moved = if up { *slot + COLOR_STEP } else { *slot - COLOR_STEP };
                *slot = ((moved / COLOR_STEP).round() * COLOR_STEP).clamp(0.0, 1.0);
                self.set_style_color(color, value);
            }
        }

        self.clamp_cursor();
        self.status = format!("{:?}", action);
        tracing::debug!("Panel action: {:?}", action);
    }

    fn activate_row(&mut self, row: usize) {
        if let Some(item) = self.panel_items().get(row) {
            self.panel_cursor = row;
            self.activate(item.action);
        }
    }

    /// Step the value on `row` up or down; other rows activate when stepped up
    fn adjust_row(&mut self, row: usize, up: bool) {
        let Some(item) = self.panel_items().into_iter().nth(row) else {
            return;
        };
        let action = match item.action {
            PanelAction::AdjustSize { field, .. } => PanelAction::AdjustSize { field, up },
            PanelAction::AdjustColor { color, .. } => PanelAction::AdjustColor { color, up },
            action if up => action,
            _ => return,
        };
        self.panel_cursor = row;
        self.activate(action);
    }

    /// Scroll so the cursor row is among `visible` rows; returns the first row shown
    pub fn scroll_panel(&mut self, visible: usize) -> usize {
        let count = self.panel_items().len();
        self.panel_scroll = self.panel_scroll.min(count.saturating_sub(visible));
        if self.panel_cursor < self.panel_scroll {
            self.panel_scroll = self.panel_cursor;
        } else if visible > 0 && self.panel_cursor >= self.panel_scroll + visible {
            self.panel_scroll = self.panel_cursor + 1 - visible;
        }
        self.panel_scroll
    }

    fn clamp_cursor(&mut self) {
        let count = self.panel_items().len();
        self.panel_cursor = self.panel_cursor.min(count.saturating_sub(1));
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.panel_items().len();
        if count == 0 {
            return;
        }
        self.panel_cursor = if down {
            (self.panel_cursor + 1) % count
        } else {
            (self.panel_cursor + count - 1) % count
        };
    }

    /// Ctrl shortcuts that drive the demo; returns whether the key was consumed
    fn handle_command(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            KeyCode::Char('t') => self.activate(PanelAction::NextWidget),
            KeyCode::Char('l') => self.activate(PanelAction::NextLayout),
            KeyCode::Char('n') => self.move_cursor(true),
            KeyCode::Char('p') => self.move_cursor(false),
            KeyCode::Char('e') => self.activate_row(self.panel_cursor),
            KeyCode::Char('f') => self.adjust_row(self.panel_cursor, true),
            KeyCode::Char('b') => self.adjust_row(self.panel_cursor, false),
            _ => return false,
        }
        true
    }

    pub fn handle_event(&mut self, event: &FrontendEvent) {
        match event {
            FrontendEvent::Key {
                code,
                modifiers,
                kind,
                keypad,
            } => {
                if *kind != KeyEventKind::Release
                    && modifiers.contains(KeyModifiers::CONTROL)
                    && self.handle_command(*code)
                {
                    return;
                }

                let keys = if self.widget == WidgetKind::Gamepad {
                    gamepad_keys_for_code(*code)
                } else {
                    keys_for_event(*code, *modifiers, *keypad)
                };
                for key in keys {
                    match kind {
                        KeyEventKind::Release => self.input.release_key(key),
                        _ if self.key_releases => self.input.hold_key(key),
                        _ => self.input.press_key(key),
                    }
                }
            }
            FrontendEvent::Mouse { kind, x, y, .. } => self.handle_mouse(*kind, *x, *y),
            FrontendEvent::Resize { width, height } => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
            }
        }
    }

    fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        let pos = self.cell_to_pixel(x, y);
        match kind {
            MouseEventKind::Down(button) => {
                if let Some(panel) = self.panel_area {
                    if panel.contains(Position::new(x, y)) {
                        let row = self.panel_scroll + (y - panel.y) as usize;
                        match button {
                            TermButton::Left => self.activate_row(row),
                            TermButton::Right => self.adjust_row(row, false),
                            TermButton::Middle => {}
                        }
                        return;
                    }
                }
                let on_canvas = self
                    .canvas_area
                    .is_some_and(|area| area.contains(Position::new(x, y)));
                if on_canvas {
                    self.input.mouse_press(widget_button(button), pos);
                }
            }
            MouseEventKind::Up(button) => self.input.mouse_release(widget_button(button), pos),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.input.mouse_move(pos),
            _ => {}
        }
    }

    /// Center of a terminal cell, in the canvas's virtual pixels
    pub fn cell_to_pixel(&self, x: u16, y: u16) -> Vec2 {
        let origin = self.canvas_area.map(|a| (a.x, a.y)).unwrap_or((0, 0));
        Vec2::new(
            (x as f32 - origin.0 as f32) * self.cell_size.x + self.cell_size.x * 0.5,
            (y as f32 - origin.1 as f32) * self.cell_size.y + self.cell_size.y * 0.5,
        )
    }

    /// Drive the stick axes from held WASD (left) and TFGH (right) keys
    pub fn sync_gamepad_axes(&mut self) {
        if self.widget != WidgetKind::Gamepad {
            return;
        }
        let input = &self.input;
        let axis = |neg: Key, pos: Key| {
            (input.is_key_down(pos) as i8 - input.is_key_down(neg) as i8) as f32
        };
        let values = [
            (GamepadAxis::LeftStickX, axis(Key::A, Key::D)),
            (GamepadAxis::LeftStickY, axis(Key::W, Key::S)),
            (GamepadAxis::RightStickX, axis(Key::F, Key::H)),
            (GamepadAxis::RightStickY, axis(Key::T, Key::G)),
        ];
        for (id, value) in values {
            self.input.set_axis(id, value);
        }
    }

    /// Render the active widget into `draw`; `viewport` is in virtual pixels
    pub fn render_widget<D: DrawList>(&mut self, draw: &mut D, viewport: Rect) {
        let Self {
            widget,
            keyboard,
            mouse,
            gamepad,
            keyboard_layout,
            mouse_layout,
            gamepad_layout,
            options,
            input,
            font_size,
            ..
        } = self;

        let mut frame = Frame::new(draw, &*input, viewport, *font_size);
        match widget {
            WidgetKind::Keyboard => keyboard.render(&mut frame, *keyboard_layout, options.keyboard),
            WidgetKind::Mouse => mouse.render(&mut frame, *mouse_layout, options.mouse),
            WidgetKind::Gamepad => gamepad.render(&mut frame, *gamepad_layout, options.gamepad),
        }
    }
}

fn widget_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

/// Gamepad emulation on the keyboard.
///
/// Arrows drive the D-pad, IJKL the face buttons, Q/E and Z/C the shoulders
/// and triggers, X/V the stick clicks, Enter and Backspace start and back.
/// WASD and TFGH stay plain keys and feed the stick axes.
fn gamepad_keys_for_code(code: KeyCode) -> Vec<Key> {
    let key = match code {
        KeyCode::Up => Key::GamepadDpadUp,
        KeyCode::Right => Key::GamepadDpadRight,
        KeyCode::Down => Key::GamepadDpadDown,
        KeyCode::Left => Key::GamepadDpadLeft,
        KeyCode::Enter => Key::GamepadStart,
        KeyCode::Backspace => Key::GamepadBack,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'i' => Key::GamepadFaceUp,
            'l' => Key::GamepadFaceRight,
            'k' => Key::GamepadFaceDown,
            'j' => Key::GamepadFaceLeft,
            'q' => Key::GamepadL1,
            'e' => Key::GamepadR1,
            'z' => Key::GamepadL2,
            'c' => Key::GamepadR2,
            'x' => Key::GamepadL3,
            'v' => Key::GamepadR3,
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            't' => Key::T,
            'f' => Key::F,
            'g' => Key::G,
            'h' => Key::H,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    vec![key]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::DrawRecorder;

    fn app() -> DemoApp {
        DemoApp::new(&Config::default())
    }

    fn press(app: &mut DemoApp, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(&FrontendEvent::key(code, modifiers));
    }

    fn viewport() -> Rect {
        Rect::from_min_size(Vec2::ZERO, Vec2::new(1200.0, 800.0))
    }

    #[test]
    fn test_new_uses_config() {
        let mut config = Config::default();
        config.demo.widget = WidgetKind::Gamepad;
        config.demo.gamepad_layout = "dualsense".to_string();
        config.demo.cell_width = 10.0;
        let app = DemoApp::new(&config);

        assert!(app.running);
        assert_eq!(app.widget, WidgetKind::Gamepad);
        assert_eq!(app.gamepad_layout, GamepadLayout::PlayStation);
        assert_eq!(app.cell_size, Vec2::new(10.0, 16.0));
        assert!(app.options.gamepad.show_sticks);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!app.running);
    }

    #[test]
    fn test_typed_keys_are_pressed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert!(app.input.is_key_down(Key::W));
        assert!(app.input.is_key_down(Key::LeftShift));
        assert!(!app.input.is_key_down(Key::A));
    }

    #[test]
    fn test_release_events_when_reported() {
        let mut app = app();
        app.key_releases = true;
        press(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        app.begin_frame(Instant::now() + std::time::Duration::from_secs(10));
        assert!(app.input.is_key_down(Key::A));

        app.handle_event(&FrontendEvent::Key {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            keypad: false,
        });
        assert!(!app.input.is_key_down(Key::A));
    }

    #[test]
    fn test_ctrl_shortcuts_cycle_widget_and_layout() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(app.keyboard_layout, KeyboardLayout::Qwertz);
        assert!(!app.input.is_key_down(Key::L));

        press(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.widget, WidgetKind::Mouse);
        press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(app.mouse_layout, MouseLayout::TwoButton);
    }

    #[test]
    fn test_highlight_group_toggles() {
        let mut app = app();
        app.activate(PanelAction::HighlightKeys(WASD));
        assert_eq!(app.keyboard.highlighted(), WASD);

        // Partially highlighted groups fill in first
        app.keyboard.set_highlighted(Key::A, false);
        app.activate(PanelAction::HighlightKeys(WASD));
        assert!(WASD.iter().all(|k| app.keyboard.is_highlighted(*k)));

        app.activate(PanelAction::HighlightKeys(WASD));
        assert!(app.keyboard.highlighted().is_empty());
    }

    #[test]
    fn test_panel_rows_follow_widget() {
        let mut app = app();
        let keyboard_items = app.panel_items();
        assert_eq!(keyboard_items[0].action, PanelAction::NextWidget);
        assert_eq!(keyboard_items[1].label, "Layout: QWERTY");
        assert_eq!(keyboard_items[2].checked, Some(true));
        assert!(!keyboard_items
            .iter()
            .any(|i| i.action == PanelAction::ClearRecorded));

        app.activate(PanelAction::NextWidget);
        let mouse_items = app.panel_items();
        assert!(mouse_items.iter().any(|i| i.action == PanelAction::ClearRecorded));
        assert!(mouse_items
            .iter()
            .any(|i| i.action == PanelAction::Toggle(OptionFlag::MouseRecordable)
                && i.checked == Some(false)));
    }

    #[test]
    fn test_cursor_clamped_after_switch() {
        let mut app = app();
        app.activate(PanelAction::NextWidget);
        app.activate(PanelAction::NextWidget);
        let gamepad_rows = app.panel_items().len();
        app.panel_cursor = gamepad_rows - 1;

        app.activate(PanelAction::NextWidget);
        assert_eq!(app.widget, WidgetKind::Keyboard);
        assert!(app.panel_cursor < app.panel_items().len());
    }

    #[test]
    fn test_ctrl_e_activates_selected_row() {
        let mut app = app();
        // Row 2 on the keyboard panel is "Show pressed"
        press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(app.panel_cursor, 2);
        press(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(!app.options.keyboard.show_pressed);

        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(app.panel_cursor, app.panel_items().len() - 1);
    }

    #[test]
    fn test_panel_click_activates_row() {
        let mut app = app();
        app.panel_area = Some(CellRect::new(1, 1, 28, 20));
        app.canvas_area = Some(CellRect::new(31, 0, 100, 40));

        app.handle_event(&FrontendEvent::mouse(
            MouseEventKind::Down(TermButton::Left),
            5,
            2,
        ));
        assert_eq!(app.keyboard_layout, KeyboardLayout::Qwertz);
        assert_eq!(app.panel_cursor, 1);
        assert!(!app.input.is_mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_canvas_click_uses_cell_centers() {
        let mut app = app();
        app.canvas_area = Some(CellRect::new(30, 0, 100, 40));

        app.handle_event(&FrontendEvent::mouse(
            MouseEventKind::Down(TermButton::Right),
            32,
            3,
        ));
        assert!(app.input.is_mouse_down(MouseButton::Right));
        assert!(app.input.is_mouse_clicked(MouseButton::Right));
        assert_eq!(app.input.mouse_pos(), Vec2::new(20.0, 56.0));

        app.handle_event(&FrontendEvent::mouse(
            MouseEventKind::Up(TermButton::Right),
            32,
            3,
        ));
        assert!(!app.input.is_mouse_down(MouseButton::Right));
    }

    #[test]
    fn test_recordable_mouse_records_clicks() {
        let mut app = app();
        app.widget = WidgetKind::Mouse;
        app.mouse_layout = MouseLayout::TwoButton;
        app.options.mouse.recordable = true;
        app.canvas_area = Some(CellRect::new(0, 0, 100, 40));

        let geometry = app
            .mouse
            .geometry(app.mouse_layout, app.options.mouse, Vec2::ZERO, app.font_size);
        let target = geometry.left.center();
        let col = (target.x / app.cell_size.x) as u16;
        let row = (target.y / app.cell_size.y) as u16;
        app.handle_event(&FrontendEvent::mouse(
            MouseEventKind::Down(TermButton::Left),
            col,
            row,
        ));

        let mut recorder = DrawRecorder::default();
        app.render_widget(&mut recorder, viewport());
        assert_eq!(app.recorded_text(), "Left");

        app.activate(PanelAction::ClearRecorded);
        assert_eq!(app.recorded_text(), "(none)");
    }

    #[test]
    fn test_gamepad_emulation() {
        let mut app = app();
        app.widget = WidgetKind::Gamepad;
        press(&mut app, KeyCode::Char('k'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Left, KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('d'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('w'), KeyModifiers::NONE);
        app.sync_gamepad_axes();

        assert!(app.input.is_key_down(Key::GamepadFaceDown));
        assert!(app.input.is_key_down(Key::GamepadDpadLeft));
        assert!(!app.input.is_key_down(Key::K));
        assert_eq!(app.input.gamepad_axis(GamepadAxis::LeftStickX), 1.0);
        assert_eq!(app.input.gamepad_axis(GamepadAxis::LeftStickY), -1.0);
        assert_eq!(app.input.gamepad_axis(GamepadAxis::RightStickX), 0.0);
    }

    #[test]
    fn test_render_draws_active_widget() {
        let mut app = app();
        app.keyboard.set_highlighted(Key::Q, true);
        let highlight = app.keyboard.style().color(KeyboardColor::KeyHighlighted);

        let mut recorder = DrawRecorder::default();
        app.render_widget(&mut recorder, viewport());
        assert!(recorder.texts().contains(&"Q"));
        assert_eq!(recorder.filled_rects(highlight).len(), 1);
        assert_eq!(recorder.clip_depth(), 0);

        app.widget = WidgetKind::Gamepad;
        let mut recorder = DrawRecorder::default();
        app.render_widget(&mut recorder, viewport());
        assert!(recorder.texts().contains(&"L1"));
    }

    #[test]
    fn test_reset_colors_only_touches_active_widget() {
        let mut app = app();
        app.keyboard
            .style_mut()
            .set_color(KeyboardColor::KeyFace, Rgba::gray(0.1));
        app.mouse
            .style_mut()
            .set_color(MouseColor::Background, Rgba::gray(0.1));

        app.activate(PanelAction::ResetColors);
        assert_eq!(app.keyboard.style().colors, KeyboardStyle::default().colors);
        assert_eq!(
            app.mouse.style().color(MouseColor::Background),
            Rgba::gray(0.1).to_packed()
        );
    }

    #[test]
    fn test_legend_lists_overlay_colors() {
        let mut app = app();
        assert_eq!(app.legend().len(), 3);
        app.widget = WidgetKind::Gamepad;
        let legend = app.legend();
        assert_eq!(legend[0].0, "Button Pressed");
        assert_eq!(
            legend[0].1,
            app.gamepad.style().color(GamepadColor::ButtonPressed)
        );
    }

    fn row_of(app: &DemoApp, action: PanelAction) -> usize {
        app.panel_items()
            .iter()
            .position(|i| i.action == action)
            .expect("row present")
    }

    #[test]
    fn test_style_editor_lists_fields_of_active_widget() {
        let mut app = app();
        let closed = app.panel_items().len();
        app.activate(PanelAction::ToggleStyleEditor);
        let items = app.panel_items();
        assert_eq!(items.len(), closed + 11 + 1 + KeyboardColor::COUNT);
        assert!(items.iter().any(|i| i.label == "Key unit: 34.0"));
        assert!(items.iter().any(|i| i.label == "Face offset y: 3.0"));
        let face_row = row_of(
            &app,
            PanelAction::AdjustColor {
                color: ColorSlot::Keyboard(KeyboardColor::KeyFace),
                up: true,
            },
        );
        let face = &items[face_row];
        assert_eq!(face.swatch, Some(app.keyboard.style().color(KeyboardColor::KeyFace)));

        app.activate(PanelAction::NextWidget);
        let items = app.panel_items();
        assert!(items.iter().any(|i| i.label == "Wheel height: 20.0"));
        assert_eq!(
            items.iter().filter(|i| i.swatch.is_some()).count(),
            MouseColor::COUNT
        );
    }

    #[test]
    fn test_key_unit_step_grows_canvas_until_reset() {
        let mut app = app();
        let layout = app.keyboard_layout;
        let default_size = app.keyboard.canvas_size(layout, 13.0);

        app.activate(PanelAction::AdjustSize { field: SizeField::KeyUnit, up: true });
        assert_eq!(app.keyboard.style().key_unit, 35.0);
        let grown = app.keyboard.canvas_size(layout, 13.0);
        assert!(grown.x > default_size.x);
        assert!(grown.y > default_size.y);

        app.activate(PanelAction::AdjustSize { field: SizeField::KeyFaceOffsetX, up: false });
        assert_eq!(app.keyboard.style().key_face_offset.x, 3.5);

        app.activate(PanelAction::ResetSizes);
        assert_eq!(app.keyboard.canvas_size(layout, 13.0), default_size);
        assert_eq!(app.keyboard.style().key_face_offset, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_size_steps_stay_in_range() {
        let mut app = app();
        for _ in 0..100 {
            app.activate(PanelAction::AdjustSize { field: SizeField::KeyUnit, up: true });
            app.activate(PanelAction::AdjustSize { field: SizeField::BoardPadding, up: false });
        }
        assert_eq!(app.keyboard.style().key_unit, 60.0);
        assert_eq!(app.keyboard.style().board_padding, 0.0);

        assert_eq!(SizeField::KeyFaceBorderSize.step(4.8, true), 5.0);
        assert_eq!(SizeField::SectionGap.step(0.0, false), 0.0);
    }

    #[test]
    fn test_ctrl_f_and_ctrl_b_step_selected_size() {
        let mut app = app();
        app.widget = WidgetKind::Mouse;
        app.style_editor = true;
        let default_size = app.mouse.canvas_size(13.0);
        app.panel_cursor = row_of(
            &app,
            PanelAction::AdjustSize { field: SizeField::MouseBodyWidth, up: true },
        );

        press(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(app.mouse.style().body_width, 62.0);
        assert_eq!(app.mouse.canvas_size(13.0), Vec2::new(72.0, 110.0));
        assert!(!app.input.is_key_down(Key::F));

        press(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert_eq!(app.mouse.style().body_width, 58.0);

        app.activate(PanelAction::ResetSizes);
        assert_eq!(app.mouse.canvas_size(13.0), default_size);
    }

    #[test]
    fn test_ctrl_b_ignores_plain_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert_eq!(app.keyboard_layout, KeyboardLayout::Qwerty);
        press(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(app.keyboard_layout, KeyboardLayout::Qwertz);
    }

    #[test]
    fn test_gamepad_size_step_changes_canvas() {
        let mut app = app();
        app.widget = WidgetKind::Gamepad;
        let default_size = app.gamepad.canvas_size(13.0);

        app.activate(PanelAction::AdjustSize { field: SizeField::GamepadBodyWidth, up: true });
        assert_eq!(app.gamepad.style().body_width, 205.0);
        assert!(app.gamepad.canvas_size(13.0).x > default_size.x);

        app.activate(PanelAction::ResetSizes);
        assert_eq!(app.gamepad.canvas_size(13.0), default_size);
    }

    #[test]
    fn test_color_channel_steps_until_reset() {
        let mut app = app();
        let pressed = ColorSlot::Keyboard(KeyboardColor::KeyPressed);
        let default_color = app.style_color(pressed);

        app.activate(PanelAction::NextChannel);
        assert_eq!(app.color_channel, ColorChannel::Green);
        app.activate(PanelAction::AdjustColor { color: pressed, up: true });
        let stepped = app.style_color(pressed);
        assert!((stepped.g - 0.05).abs() < 1e-6);
        assert_eq!(stepped.r, default_color.r);
        assert_ne!(
            app.keyboard.style().color(KeyboardColor::KeyPressed),
            default_color.to_packed()
        );

        // Channels clamp to 0..=1
        app.activate(PanelAction::NextChannel);
        app.activate(PanelAction::NextChannel);
        app.activate(PanelAction::AdjustColor { color: pressed, up: false });
        for _ in 0..30 {
            app.activate(PanelAction::AdjustColor { color: pressed, up: true });
        }
        assert_eq!(app.style_color(pressed).a, 1.0);

        app.activate(PanelAction::ResetColors);
        assert_eq!(app.style_color(pressed), default_color);
    }

    #[test]
    fn test_right_click_steps_color_down() {
        let mut app = app();
        app.widget = WidgetKind::Gamepad;
        app.style_editor = true;
        app.panel_scroll = 5;
        app.panel_area = Some(CellRect::new(1, 1, 38, 30));
        let highlight = ColorSlot::Gamepad(GamepadColor::ButtonHighlighted);
        let row = row_of(&app, PanelAction::AdjustColor { color: highlight, up: true });

        app.handle_event(&FrontendEvent::mouse(
            MouseEventKind::Down(TermButton::Right),
            5,
            1 + (row - app.panel_scroll) as u16,
        ));
        assert_eq!(app.panel_cursor, row);
        assert!((app.style_color(highlight).r - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_panel_follows_cursor() {
        let mut app = app();
        app.style_editor = true;
        let count = app.panel_items().len();

        app.panel_cursor = count - 1;
        assert_eq!(app.scroll_panel(10), count - 10);
        app.panel_cursor = 3;
        assert_eq!(app.scroll_panel(10), 3);
        assert_eq!(app.scroll_panel(count + 5), 0);
    }

    #[test]
    fn test_single_key_rows_cycle_and_toggle() {
        let mut app = app();
        let select = row_of(&app, PanelAction::NextSingleKey);
        let toggle = row_of(&app, PanelAction::ToggleSingleKey);
        assert_eq!(app.panel_items()[select].label, "Key: Space");
        assert_eq!(app.panel_items()[toggle].checked, Some(false));

        app.activate(app.panel_items()[toggle].action);
        assert!(app.keyboard.is_highlighted(Key::Space));
        assert_eq!(app.panel_items()[toggle].checked, Some(true));

        // Moving the selection carries the highlight along
        app.activate(app.panel_items()[select].action);
        assert_eq!(app.selected_key(), Key::Enter);
        assert_eq!(app.keyboard.highlighted(), &[Key::Enter]);
        assert_eq!(app.panel_items()[toggle].label, "Highlight Enter");

        app.activate(PanelAction::ToggleSingleKey);
        assert!(app.keyboard.highlighted().is_empty());

        // Without a highlight the selection moves alone, wrapping at the end
        for _ in 0..7 {
            app.activate(PanelAction::NextSingleKey);
        }
        assert_eq!(app.selected_key(), Key::Space);
        assert!(app.keyboard.highlighted().is_empty());
    }

    #[test]
    fn test_clear_highlights_resets_single_key() {
        let mut app = app();
        app.activate(PanelAction::NextSingleKey);
        app.activate(PanelAction::ToggleSingleKey);
        assert!(app.keyboard.is_highlighted(Key::Enter));

        app.activate(PanelAction::ClearHighlights);
        assert!(!app.single_key_highlighted);
        assert!(app.keyboard.highlighted().is_empty());

        // The next toggle highlights again instead of clearing
        app.activate(PanelAction::ToggleSingleKey);
        assert_eq!(app.keyboard.highlighted(), &[Key::Enter]);
    }
}
