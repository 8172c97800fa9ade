//! Platform-specific key bindings and their display strings

use crossterm::event::KeyModifiers;

/// Modifier for form shortcuts
/// - macOS: SUPER (Cmd key), Ctrl is accepted too
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const FORM_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const FORM_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reset-after-failure shortcut display
#[cfg(target_os = "macos")]
pub const RESET_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RESET_SHORTCUT: &str = "Ctrl+R";

/// Step navigation shortcuts display (PgUp/PgDn work everywhere)
pub const PREV_STEP_SHORTCUT: &str = "PgUp";
pub const NEXT_STEP_SHORTCUT: &str = "PgDn";

/// Whether the modifiers on a key event count as the form modifier
pub fn is_form_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(FORM_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_is_always_accepted() {
        assert!(is_form_modifier(KeyModifiers::CONTROL));
        assert!(is_form_modifier(KeyModifiers::CONTROL | KeyModifiers::SHIFT));
        assert!(!is_form_modifier(KeyModifiers::SHIFT));
        assert!(!is_form_modifier(KeyModifiers::NONE));
    }
}
