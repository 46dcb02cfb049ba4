//! Customizable keybindings for the annotation editor.
//!
//! Maps key presses to editor actions: undo/redo, deleting the selected
//! shape, cancelling or finishing a draft, and switching tools. Bindings are
//! stored in the config file.

use serde::{Deserialize, Serialize};

use crate::model::AnnotationTool;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Delete,
    Backspace,
    Escape,
    Enter,
    Space,
    Tab,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.key` value (case-insensitive for letters).
    pub fn from_key_name(name: &str) -> Option<Self> {
        let key = match name {
            "Delete" => KeyCode::Delete,
            "Backspace" => KeyCode::Backspace,
            "Escape" | "Esc" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            " " | "Space" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?.to_ascii_uppercase();
                if chars.next().is_some() {
                    return None;
                }
                Self::from_letter(c)?
            }
        };
        Some(key)
    }

    fn from_letter(c: char) -> Option<Self> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A,
            KeyCode::B,
            KeyCode::C,
            KeyCode::D,
            KeyCode::E,
            KeyCode::F,
            KeyCode::G,
            KeyCode::H,
            KeyCode::I,
            KeyCode::J,
            KeyCode::K,
            KeyCode::L,
            KeyCode::M,
            KeyCode::N,
            KeyCode::O,
            KeyCode::P,
            KeyCode::Q,
            KeyCode::R,
            KeyCode::S,
            KeyCode::T,
            KeyCode::U,
            KeyCode::V,
            KeyCode::W,
            KeyCode::X,
            KeyCode::Y,
            KeyCode::Z,
        ];
        if c.is_ascii_uppercase() {
            LETTERS.get((c as u8 - b'A') as usize).copied()
        } else {
            None
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// A bound key combination. Ctrl and Meta are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub const fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.key
            && self.modifiers.command() == event.modifiers.command()
            && self.modifiers.shift == event.modifiers.shift
            && self.modifiers.alt == event.modifiers.alt
    }
}

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    DeleteSelected,
    CancelDraft,
    FinishDraft,
    SelectTool(AnnotationTool),
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Hotkey for BoundingBox tool
    pub tool_bbox: KeyCode,
    /// Hotkey for Polygon tool
    pub tool_polygon: KeyCode,
    /// Hotkey for Ellipse tool
    pub tool_ellipse: KeyCode,
    /// Hotkey for Pencil tool
    pub tool_freehand: KeyCode,
    /// Hotkey for Magic Wand tool
    pub tool_magic_wand: KeyCode,

    pub undo: Vec<KeyChord>,
    pub redo: Vec<KeyChord>,
    pub delete: Vec<KeyChord>,
    pub cancel_draft: Vec<KeyChord>,
    pub finish_draft: Vec<KeyChord>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            tool_bbox: KeyCode::B,
            tool_polygon: KeyCode::P,
            tool_ellipse: KeyCode::E,
            tool_freehand: KeyCode::F,
            tool_magic_wand: KeyCode::W,

            undo: vec![KeyChord::new(KeyCode::Z, Modifiers::CTRL)],
            redo: vec![
                KeyChord::new(KeyCode::Z, Modifiers::CTRL_SHIFT),
                KeyChord::new(KeyCode::Y, Modifiers::CTRL),
            ],
            delete: vec![
                KeyChord::new(KeyCode::Delete, Modifiers::NONE),
                KeyChord::new(KeyCode::Backspace, Modifiers::NONE),
            ],
            cancel_draft: vec![KeyChord::new(KeyCode::Escape, Modifiers::NONE)],
            finish_draft: vec![KeyChord::new(KeyCode::Enter, Modifiers::NONE)],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tool that corresponds to a key press, if any.
    pub fn tool_for_key(&self, key: KeyCode) -> Option<AnnotationTool> {
        AnnotationTool::all()
            .iter()
            .copied()
            .find(|&tool| self.key_for_tool(tool) == key)
    }

    /// Get the hotkey for a specific tool.
    pub fn key_for_tool(&self, tool: AnnotationTool) -> KeyCode {
        match tool {
            AnnotationTool::BoundingBox => self.tool_bbox,
            AnnotationTool::Polygon => self.tool_polygon,
            AnnotationTool::Ellipse => self.tool_ellipse,
            AnnotationTool::Freehand => self.tool_freehand,
            AnnotationTool::MagicWand => self.tool_magic_wand,
        }
    }

    /// Set the hotkey for a tool.
    pub fn set_tool_key(&mut self, tool: AnnotationTool, key: KeyCode) {
        match tool {
            AnnotationTool::BoundingBox => self.tool_bbox = key,
            AnnotationTool::Polygon => self.tool_polygon = key,
            AnnotationTool::Ellipse => self.tool_ellipse = key,
            AnnotationTool::Freehand => self.tool_freehand = key,
            AnnotationTool::MagicWand => self.tool_magic_wand = key,
        }
    }

    /// Resolve a key press. Nothing fires while a text input has focus.
    pub fn action_for(&self, event: &KeyEvent, text_input_focused: bool) -> Option<EditorAction> {
        if text_input_focused {
            return None;
        }

        let hit = |chords: &[KeyChord]| chords.iter().any(|chord| chord.matches(event));
        if hit(&self.redo) {
            Some(EditorAction::Redo)
        } else if hit(&self.undo) {
            Some(EditorAction::Undo)
        } else if hit(&self.delete) {
            Some(EditorAction::DeleteSelected)
        } else if hit(&self.cancel_draft) {
            Some(EditorAction::CancelDraft)
        } else if hit(&self.finish_draft) {
            Some(EditorAction::FinishDraft)
        } else if event.modifiers == Modifiers::NONE {
            self.tool_for_key(event.key).map(EditorAction::SelectTool)
        } else {
            None
        }
    }
}
