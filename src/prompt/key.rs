//! Key expressions
//!
//! Keys can be written in two notations:
//!
//! - angle-bracket notation: `<C-n>`, `<M-x>`, `<S-Tab>`, `<BS>`, `<CR>`,
//!   `<Esc>`, `<PageUp>`, `<F5>`, `<LT>`
//! - dash notation: `ctrl-n`, `alt-x`, `enter`, `esc`, `bspace`, `pgup`, `f5`
//!
//! A single character on its own (`a`, `?`) is that key without modifiers.

use crate::{ListaError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// A key with its modifiers, independent of press/release state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// An unmodified key
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// A control-modified character key
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Parse a key expression in either notation
    ///
    /// # Errors
    ///
    /// Returns [`ListaError::InvalidConfiguration`] if the expression does not
    /// name a key.
    pub fn parse(expr: &str) -> Result<Self> {
        let parsed = match expr.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            Some(inner) if !inner.is_empty() => parse_angle(inner),
            _ => parse_dashed(expr),
        };
        parsed.map(Self::normalized).ok_or_else(|| {
            ListaError::InvalidConfiguration(format!("unrecognized key expression '{expr}'"))
        })
    }

    /// Fold shift into the character for printable keys so that `A` and
    /// `shift-a` compare equal
    #[must_use]
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::SHIFT) => {
                let upper = c.to_uppercase().next().unwrap_or(c);
                Self::new(KeyCode::Char(upper), self.modifiers - KeyModifiers::SHIFT)
            }
            KeyCode::BackTab => Self::new(KeyCode::BackTab, self.modifiers - KeyModifiers::SHIFT),
            _ => self,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers).normalized()
    }
}

impl FromStr for Key {
    type Err = ListaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char('<') => "LT".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };

        let mut prefix = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            prefix.push_str("C-");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            prefix.push_str("M-");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            prefix.push_str("S-");
        }

        let bare = prefix.is_empty() && matches!(self.code, KeyCode::Char(c) if c != '<' && c != ' ');
        if bare {
            write!(f, "{name}")
        } else {
            write!(f, "<{prefix}{name}>")
        }
    }
}

/// `C-n`, `M-S-x`, `BS`, `F12`, ...
fn parse_angle(inner: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;

    // A lone `-` is the minus key, not a separator
    while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
        match rest.as_bytes()[0].to_ascii_uppercase() {
            b'C' => modifiers |= KeyModifiers::CONTROL,
            b'M' | b'A' => modifiers |= KeyModifiers::ALT,
            b'S' => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        rest = &rest[2..];
    }

    let code = match rest.to_ascii_uppercase().as_str() {
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "CR" | "RETURN" | "ENTER" => KeyCode::Enter,
        "ESC" => KeyCode::Esc,
        "TAB" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "TAB" => KeyCode::Tab,
        "SPACE" | "SP" => KeyCode::Char(' '),
        "DEL" | "DELETE" => KeyCode::Delete,
        "INS" | "INSERT" => KeyCode::Insert,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PAGEUP" => KeyCode::PageUp,
        "PAGEDOWN" => KeyCode::PageDown,
        "LT" => KeyCode::Char('<'),
        "BSLASH" => KeyCode::Char('\\'),
        "BAR" => KeyCode::Char('|'),
        upper => function_key(upper).or_else(|| single_char(rest))?,
    };

    // Control letters are reported lowercase by terminals
    let code = match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        other => other,
    };

    Some(Key::new(code, modifiers))
}

/// `ctrl-n`, `alt-x`, `enter`, `f1`, `a`
fn parse_dashed(expr: &str) -> Option<Key> {
    if let Some(code) = single_char(expr) {
        return Some(Key::plain(code));
    }

    let parts: Vec<&str> = expr.split('-').collect();
    let (key_part, modifier_parts) = parts.split_last()?;
    let key_part = if key_part.is_empty() && expr.ends_with("--") {
        "-"
    } else {
        key_part
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.iter().filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let lower = key_part.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "btab" | "backtab" => KeyCode::BackTab,
        "bspace" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "ins" | "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        s => function_key(&s.to_uppercase()).or_else(|| single_char(key_part))?,
    };

    Some(Key::new(code, modifiers))
}

/// `F1` .. `F24`
fn function_key(upper: &str) -> Option<KeyCode> {
    let n: u8 = upper.strip_prefix('F')?.parse().ok()?;
    (1..=24).contains(&n).then_some(KeyCode::F(n))
}

fn single_char(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_notation() {
        assert_eq!(Key::parse("<C-n>").unwrap(), Key::ctrl('n'));
        assert_eq!(Key::parse("<C-N>").unwrap(), Key::ctrl('n'));
        assert_eq!(Key::parse("<BS>").unwrap(), Key::plain(KeyCode::Backspace));
        assert_eq!(Key::parse("<cr>").unwrap(), Key::plain(KeyCode::Enter));
        assert_eq!(Key::parse("<Esc>").unwrap(), Key::plain(KeyCode::Esc));
        assert_eq!(Key::parse("<S-Tab>").unwrap(), Key::plain(KeyCode::BackTab));
        assert_eq!(Key::parse("<F12>").unwrap(), Key::plain(KeyCode::F(12)));
        assert_eq!(Key::parse("<LT>").unwrap(), Key::plain(KeyCode::Char('<')));
        assert_eq!(
            Key::parse("<M-x>").unwrap(),
            Key::new(KeyCode::Char('x'), KeyModifiers::ALT)
        );
        assert_eq!(
            Key::parse("<A-C-Home>").unwrap(),
            Key::new(KeyCode::Home, KeyModifiers::ALT | KeyModifiers::CONTROL)
        );
    }

    #[test]
    fn test_dashed_notation() {
        assert_eq!(Key::parse("ctrl-t").unwrap(), Key::ctrl('t'));
        assert_eq!(Key::parse("ctrl-/").unwrap(), Key::ctrl('/'));
        assert_eq!(Key::parse("enter").unwrap(), Key::plain(KeyCode::Enter));
        assert_eq!(Key::parse("f1").unwrap(), Key::plain(KeyCode::F(1)));
        assert_eq!(Key::parse("pgdn").unwrap(), Key::plain(KeyCode::PageDown));
        assert_eq!(Key::parse("btab").unwrap(), Key::plain(KeyCode::BackTab));
        assert_eq!(
            Key::parse("alt-enter").unwrap(),
            Key::new(KeyCode::Enter, KeyModifiers::ALT)
        );
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(Key::parse("a").unwrap(), Key::plain(KeyCode::Char('a')));
        assert_eq!(Key::parse("-").unwrap(), Key::plain(KeyCode::Char('-')));
        assert_eq!(Key::parse("<").unwrap(), Key::plain(KeyCode::Char('<')));
        assert_eq!(Key::parse("<->").unwrap(), Key::plain(KeyCode::Char('-')));
    }

    #[test]
    fn test_shift_folds_into_character() {
        assert_eq!(Key::parse("shift-a").unwrap(), Key::plain(KeyCode::Char('A')));
        assert_eq!(Key::parse("<S-a>").unwrap(), Key::plain(KeyCode::Char('A')));

        let event = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(event), Key::plain(KeyCode::Char('A')));
    }

    #[test]
    fn test_invalid_expressions() {
        for expr in ["", "<>", "<X-a>", "hyper-a", "<Nope>", "f99", "ctrl-"] {
            let err = Key::parse(expr).unwrap_err();
            assert!(
                matches!(err, ListaError::InvalidConfiguration(_)),
                "{expr} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::ctrl('n').to_string(), "<C-n>");
        assert_eq!(Key::plain(KeyCode::Enter).to_string(), "<CR>");
        assert_eq!(Key::plain(KeyCode::Char('a')).to_string(), "a");
        assert_eq!(Key::plain(KeyCode::Char('<')).to_string(), "<LT>");
        assert_eq!(Key::plain(KeyCode::BackTab).to_string(), "<S-Tab>");
    }

    #[test]
    fn test_display_parses_back() {
        for expr in ["<C-n>", "<CR>", "<M-x>", "<PageUp>", "<F3>", "q"] {
            let key = Key::parse(expr).unwrap();
            assert_eq!(Key::parse(&key.to_string()).unwrap(), key);
        }
    }
}
