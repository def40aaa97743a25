//! Keyboard shortcuts and the actions they trigger.
//!
//! Key events are looked up per context; the ids of the actions match the
//! `id` fields of the embedded help file so help text and handling stay in
//! sync.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Every action a user can trigger from the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === CURSOR ===
    /// Move the cursor one row up
    NavigateUp,
    /// Move the cursor one row down
    NavigateDown,
    /// Move the cursor one column left
    NavigateLeft,
    /// Move the cursor one column right
    NavigateRight,
    /// Jump to the first column of the row
    JumpToFirst,
    /// Jump to the last column of the row
    JumpToLast,
    /// Move focus to the other plate
    SwitchPlate,

    // === PLATE PAIR ===
    /// Select the next source plate
    NextSourcePlate,
    /// Select the previous source plate
    PreviousSourcePlate,
    /// Select the next destination plate
    NextDestPlate,
    /// Select the previous destination plate
    PreviousDestPlate,

    // === FILES & SETTINGS ===
    /// Prompt for a picklist path
    OpenPicklist,
    /// Load the current picklist again from disk
    ReloadPicklist,
    /// Open the plate settings dialog
    OpenSettings,

    // === GENERAL ===
    /// Show or hide the help overlay
    ToggleHelp,
    /// Stop hovering the current well
    Cancel,
    /// Leave the application
    Quit,
}

impl Action {
    /// All actions, in help order.
    pub const ALL: [Self; 17] = [
        Self::NavigateUp,
        Self::NavigateDown,
        Self::NavigateLeft,
        Self::NavigateRight,
        Self::JumpToFirst,
        Self::JumpToLast,
        Self::SwitchPlate,
        Self::NextSourcePlate,
        Self::PreviousSourcePlate,
        Self::NextDestPlate,
        Self::PreviousDestPlate,
        Self::OpenPicklist,
        Self::ReloadPicklist,
        Self::OpenSettings,
        Self::ToggleHelp,
        Self::Cancel,
        Self::Quit,
    ];

    /// The action ID used in help.toml
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::NavigateLeft => "navigate_left",
            Self::NavigateRight => "navigate_right",
            Self::JumpToFirst => "jump_first",
            Self::JumpToLast => "jump_last",
            Self::SwitchPlate => "switch_plate",

            Self::NextSourcePlate => "next_source_plate",
            Self::PreviousSourcePlate => "previous_source_plate",
            Self::NextDestPlate => "next_dest_plate",
            Self::PreviousDestPlate => "previous_dest_plate",

            Self::OpenPicklist => "open_picklist",
            Self::ReloadPicklist => "reload_picklist",
            Self::OpenSettings => "open_settings",

            Self::ToggleHelp => "toggle_help",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Maps (context, key) pairs to actions.
pub struct ShortcutRegistry {
    bindings: HashMap<(String, KeyBinding), Action>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = "main";

        // === CURSOR ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);
        self.register(ctx, K::Tab, M::NONE, Action::SwitchPlate);
        self.register(ctx, K::BackTab, M::SHIFT, Action::SwitchPlate);

        // === PLATE PAIR ===
        self.register(ctx, K::Char(']'), M::NONE, Action::NextSourcePlate);
        self.register(ctx, K::Char('['), M::NONE, Action::PreviousSourcePlate);
        self.register(ctx, K::Char('}'), M::NONE, Action::NextDestPlate);
        self.register(ctx, K::Char('{'), M::NONE, Action::PreviousDestPlate);

        // === FILES & SETTINGS ===
        self.register(ctx, K::Char('o'), M::NONE, Action::OpenPicklist);
        self.register(ctx, K::Char('r'), M::NONE, Action::ReloadPicklist);
        self.register(ctx, K::Char('s'), M::NONE, Action::OpenSettings);

        // === GENERAL ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    ///
    /// Terminals disagree on whether shifted symbols such as `{` or `?` carry
    /// the SHIFT modifier, so a character key also matches its binding
    /// without SHIFT.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        let find = |binding: KeyBinding| {
            self.bindings
                .get(&(context.to_string(), binding))
                .copied()
        };

        find(binding).or_else(|| match binding.code {
            KeyCode::Char(_) if binding.modifiers.contains(KeyModifiers::SHIFT) => find(
                KeyBinding::new(binding.code, binding.modifiers.difference(KeyModifiers::SHIFT)),
            ),
            _ => None,
        })
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_basic_lookup() {
        let registry = ShortcutRegistry::new();
        assert_eq!(
            registry.lookup("main", key(KeyCode::Up, KeyModifiers::NONE)),
            Some(Action::NavigateUp)
        );
        assert_eq!(
            registry.lookup("main", key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.lookup("main", key(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_vim_navigation() {
        let registry = ShortcutRegistry::new();
        for (c, action) in [
            ('h', Action::NavigateLeft),
            ('j', Action::NavigateDown),
            ('k', Action::NavigateUp),
            ('l', Action::NavigateRight),
        ] {
            assert_eq!(
                registry.lookup("main", key(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(action)
            );
        }
    }

    #[test]
    fn test_shifted_symbols_match_with_or_without_shift() {
        let registry = ShortcutRegistry::new();
        for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
            assert_eq!(
                registry.lookup("main", key(KeyCode::Char('}'), modifiers)),
                Some(Action::NextDestPlate)
            );
            assert_eq!(
                registry.lookup("main", key(KeyCode::Char('?'), modifiers)),
                Some(Action::ToggleHelp)
            );
        }
    }

    #[test]
    fn test_unknown_context() {
        let registry = ShortcutRegistry::new();
        assert_eq!(
            registry.lookup("settings", key(KeyCode::Up, KeyModifiers::NONE)),
            None
        );
    }
}
