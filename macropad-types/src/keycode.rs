use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Key codes of the HID keyboard page (0x07) that a macropad button can hold.
///
/// Ref: <https://www.usb.org/sites/default/files/documents/hut1_12v2.pdf#page=53>
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidKeyCode {
    /// Reserved, no-key.
    No = 0x00,
    /// `a` and `A`
    A = 0x04,
    /// `b` and `B`
    B = 0x05,
    /// `c` and `C`
    C = 0x06,
    /// `d` and `D`
    D = 0x07,
    /// `e` and `E`
    E = 0x08,
    /// `f` and `F`
    F = 0x09,
    /// `g` and `G`
    G = 0x0A,
    /// `h` and `H`
    H = 0x0B,
    /// `i` and `I`
    I = 0x0C,
    /// `j` and `J`
    J = 0x0D,
    /// `k` and `K`
    K = 0x0E,
    /// `l` and `L`
    L = 0x0F,
    /// `m` and `M`
    M = 0x10,
    /// `n` and `N`
    N = 0x11,
    /// `o` and `O`
    O = 0x12,
    /// `p` and `P`
    P = 0x13,
    /// `q` and `Q`
    Q = 0x14,
    /// `r` and `R`
    R = 0x15,
    /// `s` and `S`
    S = 0x16,
    /// `t` and `T`
    T = 0x17,
    /// `u` and `U`
    U = 0x18,
    /// `v` and `V`
    V = 0x19,
    /// `w` and `W`
    W = 0x1A,
    /// `x` and `X`
    X = 0x1B,
    /// `y` and `Y`
    Y = 0x1C,
    /// `z` and `Z`
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// Non-US `#` and `~`
    NonusHash = 0x32,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `` ` `` and `~`
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    NumLock = 0x53,
    KpSlash = 0x54,
    KpAsterisk = 0x55,
    KpMinus = 0x56,
    KpPlus = 0x57,
    KpEnter = 0x58,
    Kp1 = 0x59,
    Kp2 = 0x5A,
    Kp3 = 0x5B,
    Kp4 = 0x5C,
    Kp5 = 0x5D,
    Kp6 = 0x5E,
    Kp7 = 0x5F,
    Kp8 = 0x60,
    Kp9 = 0x61,
    Kp0 = 0x62,
    KpDot = 0x63,
    /// Non-US `\` and `|`
    NonusBackslash = 0x64,
    Application = 0x65,
    KbPower = 0x66,
    KpEqual = 0x67,
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
    RGui = 0xE7,
}

impl HidKeyCode {
    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        HidKeyCode::LCtrl <= self && self <= HidKeyCode::RGui
    }

    /// Returns the modifier bit of the keyboard report for a modifier keycode,
    /// empty modifiers otherwise.
    pub fn to_hid_modifiers(self) -> HidModifiers {
        match self {
            HidKeyCode::LCtrl => HidModifiers::new().with_left_ctrl(true),
            HidKeyCode::LShift => HidModifiers::new().with_left_shift(true),
            HidKeyCode::LAlt => HidModifiers::new().with_left_alt(true),
            HidKeyCode::LGui => HidModifiers::new().with_left_gui(true),
            HidKeyCode::RCtrl => HidModifiers::new().with_right_ctrl(true),
            HidKeyCode::RShift => HidModifiers::new().with_right_shift(true),
            HidKeyCode::RAlt => HidModifiers::new().with_right_alt(true),
            HidKeyCode::RGui => HidModifiers::new().with_right_gui(true),
            _ => HidModifiers::new(),
        }
    }

    /// Resolve a symbolic key name, as written in the macropad configuration.
    ///
    /// The lookup is exact and case-sensitive, against the closed table [`KEY_NAMES`].
    pub fn from_name(name: &str) -> Option<HidKeyCode> {
        KEY_NAMES
            .iter()
            .find(|(key_name, _)| *key_name == name)
            .map(|(_, keycode)| *keycode)
    }
}

impl From<u8> for HidKeyCode {
    fn from(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(HidKeyCode::No)
    }
}

/// All key names accepted in a button's key list, with the keycode each one resolves to.
///
/// Several names may alias one keycode, e.g. `ENTER`/`RETURN` or `LEFT_GUI`/`COMMAND`.
pub const KEY_NAMES: &[(&str, HidKeyCode)] = &[
    ("A", HidKeyCode::A),
    ("B", HidKeyCode::B),
    ("C", HidKeyCode::C),
    ("D", HidKeyCode::D),
    ("E", HidKeyCode::E),
    ("F", HidKeyCode::F),
    ("G", HidKeyCode::G),
    ("H", HidKeyCode::H),
    ("I", HidKeyCode::I),
    ("J", HidKeyCode::J),
    ("K", HidKeyCode::K),
    ("L", HidKeyCode::L),
    ("M", HidKeyCode::M),
    ("N", HidKeyCode::N),
    ("O", HidKeyCode::O),
    ("P", HidKeyCode::P),
    ("Q", HidKeyCode::Q),
    ("R", HidKeyCode::R),
    ("S", HidKeyCode::S),
    ("T", HidKeyCode::T),
    ("U", HidKeyCode::U),
    ("V", HidKeyCode::V),
    ("W", HidKeyCode::W),
    ("X", HidKeyCode::X),
    ("Y", HidKeyCode::Y),
    ("Z", HidKeyCode::Z),
    ("ONE", HidKeyCode::Kc1),
    ("TWO", HidKeyCode::Kc2),
    ("THREE", HidKeyCode::Kc3),
    ("FOUR", HidKeyCode::Kc4),
    ("FIVE", HidKeyCode::Kc5),
    ("SIX", HidKeyCode::Kc6),
    ("SEVEN", HidKeyCode::Kc7),
    ("EIGHT", HidKeyCode::Kc8),
    ("NINE", HidKeyCode::Kc9),
    ("ZERO", HidKeyCode::Kc0),
    ("ENTER", HidKeyCode::Enter),
    ("RETURN", HidKeyCode::Enter),
    ("ESCAPE", HidKeyCode::Escape),
    ("BACKSPACE", HidKeyCode::Backspace),
    ("TAB", HidKeyCode::Tab),
    ("SPACEBAR", HidKeyCode::Space),
    ("SPACE", HidKeyCode::Space),
    ("MINUS", HidKeyCode::Minus),
    ("EQUALS", HidKeyCode::Equal),
    ("LEFT_BRACKET", HidKeyCode::LeftBracket),
    ("RIGHT_BRACKET", HidKeyCode::RightBracket),
    ("BACKSLASH", HidKeyCode::Backslash),
    ("POUND", HidKeyCode::NonusHash),
    ("SEMICOLON", HidKeyCode::Semicolon),
    ("QUOTE", HidKeyCode::Quote),
    ("GRAVE_ACCENT", HidKeyCode::Grave),
    ("COMMA", HidKeyCode::Comma),
    ("PERIOD", HidKeyCode::Dot),
    ("FORWARD_SLASH", HidKeyCode::Slash),
    ("CAPS_LOCK", HidKeyCode::CapsLock),
    ("F1", HidKeyCode::F1),
    ("F2", HidKeyCode::F2),
    ("F3", HidKeyCode::F3),
    ("F4", HidKeyCode::F4),
    ("F5", HidKeyCode::F5),
    ("F6", HidKeyCode::F6),
    ("F7", HidKeyCode::F7),
    ("F8", HidKeyCode::F8),
    ("F9", HidKeyCode::F9),
    ("F10", HidKeyCode::F10),
    ("F11", HidKeyCode::F11),
    ("F12", HidKeyCode::F12),
    ("PRINT_SCREEN", HidKeyCode::PrintScreen),
    ("SCROLL_LOCK", HidKeyCode::ScrollLock),
    ("PAUSE", HidKeyCode::Pause),
    ("INSERT", HidKeyCode::Insert),
    ("HOME", HidKeyCode::Home),
    ("PAGE_UP", HidKeyCode::PageUp),
    ("DELETE", HidKeyCode::Delete),
    ("END", HidKeyCode::End),
    ("PAGE_DOWN", HidKeyCode::PageDown),
    ("RIGHT_ARROW", HidKeyCode::Right),
    ("LEFT_ARROW", HidKeyCode::Left),
    ("DOWN_ARROW", HidKeyCode::Down),
    ("UP_ARROW", HidKeyCode::Up),
    ("KEYPAD_NUMLOCK", HidKeyCode::NumLock),
    ("KEYPAD_FORWARD_SLASH", HidKeyCode::KpSlash),
    ("KEYPAD_ASTERISK", HidKeyCode::KpAsterisk),
    ("KEYPAD_MINUS", HidKeyCode::KpMinus),
    ("KEYPAD_PLUS", HidKeyCode::KpPlus),
    ("KEYPAD_ENTER", HidKeyCode::KpEnter),
    ("KEYPAD_ONE", HidKeyCode::Kp1),
    ("KEYPAD_TWO", HidKeyCode::Kp2),
    ("KEYPAD_THREE", HidKeyCode::Kp3),
    ("KEYPAD_FOUR", HidKeyCode::Kp4),
    ("KEYPAD_FIVE", HidKeyCode::Kp5),
    ("KEYPAD_SIX", HidKeyCode::Kp6),
    ("KEYPAD_SEVEN", HidKeyCode::Kp7),
    ("KEYPAD_EIGHT", HidKeyCode::Kp8),
    ("KEYPAD_NINE", HidKeyCode::Kp9),
    ("KEYPAD_ZERO", HidKeyCode::Kp0),
    ("KEYPAD_PERIOD", HidKeyCode::KpDot),
    ("KEYPAD_BACKSLASH", HidKeyCode::NonusBackslash),
    ("APPLICATION", HidKeyCode::Application),
    ("POWER", HidKeyCode::KbPower),
    ("KEYPAD_EQUALS", HidKeyCode::KpEqual),
    ("F13", HidKeyCode::F13),
    ("F14", HidKeyCode::F14),
    ("F15", HidKeyCode::F15),
    ("F16", HidKeyCode::F16),
    ("F17", HidKeyCode::F17),
    ("F18", HidKeyCode::F18),
    ("F19", HidKeyCode::F19),
    ("F20", HidKeyCode::F20),
    ("F21", HidKeyCode::F21),
    ("F22", HidKeyCode::F22),
    ("F23", HidKeyCode::F23),
    ("F24", HidKeyCode::F24),
    ("LEFT_CONTROL", HidKeyCode::LCtrl),
    ("CONTROL", HidKeyCode::LCtrl),
    ("LEFT_SHIFT", HidKeyCode::LShift),
    ("SHIFT", HidKeyCode::LShift),
    ("LEFT_ALT", HidKeyCode::LAlt),
    ("ALT", HidKeyCode::LAlt),
    ("OPTION", HidKeyCode::LAlt),
    ("LEFT_GUI", HidKeyCode::LGui),
    ("GUI", HidKeyCode::LGui),
    ("WINDOWS", HidKeyCode::LGui),
    ("COMMAND", HidKeyCode::LGui),
    ("RIGHT_CONTROL", HidKeyCode::RCtrl),
    ("RIGHT_SHIFT", HidKeyCode::RShift),
    ("RIGHT_ALT", HidKeyCode::RAlt),
    ("RIGHT_GUI", HidKeyCode::RGui),
];

/// Convert a ascii char to keycode
/// bool, if the keycode should be shifted
/// assumes en-us keyboard mapping
pub fn from_ascii(ascii: u8) -> (HidKeyCode, bool) {
    match ascii {
        b'a'..=b'z' => (HidKeyCode::from(HidKeyCode::A as u8 + (ascii - b'a')), false),
        b'A'..=b'Z' => (HidKeyCode::from(HidKeyCode::A as u8 + (ascii - b'A')), true),
        b'1'..=b'9' => (HidKeyCode::from(HidKeyCode::Kc1 as u8 + (ascii - b'1')), false),
        b'0' => (HidKeyCode::Kc0, false),
        b'!' => (HidKeyCode::Kc1, true),
        b'@' => (HidKeyCode::Kc2, true),
        b'#' => (HidKeyCode::Kc3, true),
        b'$' => (HidKeyCode::Kc4, true),
        b'%' => (HidKeyCode::Kc5, true),
        b'^' => (HidKeyCode::Kc6, true),
        b'&' => (HidKeyCode::Kc7, true),
        b'*' => (HidKeyCode::Kc8, true),
        b'(' => (HidKeyCode::Kc9, true),
        b')' => (HidKeyCode::Kc0, true),
        b'-' => (HidKeyCode::Minus, false),
        b'_' => (HidKeyCode::Minus, true),
        b'=' => (HidKeyCode::Equal, false),
        b'+' => (HidKeyCode::Equal, true),
        b'[' => (HidKeyCode::LeftBracket, false),
        b']' => (HidKeyCode::RightBracket, false),
        b'{' => (HidKeyCode::LeftBracket, true),
        b'}' => (HidKeyCode::RightBracket, true),
        b';' => (HidKeyCode::Semicolon, false),
        b':' => (HidKeyCode::Semicolon, true),
        b'\'' => (HidKeyCode::Quote, false),
        b'"' => (HidKeyCode::Quote, true),
        b'`' => (HidKeyCode::Grave, false),
        b'~' => (HidKeyCode::Grave, true),
        b'\\' => (HidKeyCode::Backslash, false),
        b'|' => (HidKeyCode::Backslash, true),
        b',' => (HidKeyCode::Comma, false),
        b'<' => (HidKeyCode::Comma, true),
        b'.' => (HidKeyCode::Dot, false),
        b'>' => (HidKeyCode::Dot, true),
        b'/' => (HidKeyCode::Slash, false),
        b'?' => (HidKeyCode::Slash, true),
        b' ' => (HidKeyCode::Space, false),
        b'\n' => (HidKeyCode::Enter, false),
        b'\t' => (HidKeyCode::Tab, false),
        b'\x08' => (HidKeyCode::Backspace, false),
        b'\x1B' => (HidKeyCode::Escape, false),
        b'\x7F' => (HidKeyCode::Delete, false),
        _ => (HidKeyCode::No, false),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_key_names_resolve() {
        assert_eq!(HidKeyCode::from_name("A"), Some(HidKeyCode::A));
        assert_eq!(HidKeyCode::from_name("ONE"), Some(HidKeyCode::Kc1));
        assert_eq!(HidKeyCode::from_name("RETURN"), Some(HidKeyCode::Enter));
        assert_eq!(HidKeyCode::from_name("COMMAND"), Some(HidKeyCode::LGui));
        assert_eq!(HidKeyCode::from_name("F24"), Some(HidKeyCode::F24));
    }

    #[test]
    fn test_unknown_key_names() {
        assert_eq!(HidKeyCode::from_name("NOT_A_KEY"), None);
        assert_eq!(HidKeyCode::from_name("a"), None);
        assert_eq!(HidKeyCode::from_name("Kc1"), None);
        assert_eq!(HidKeyCode::from_name(""), None);
    }

    #[test]
    fn test_key_name_table_is_unique() {
        for (i, (name, keycode)) in KEY_NAMES.iter().enumerate() {
            assert_ne!(*keycode, HidKeyCode::No);
            assert!(
                KEY_NAMES[i + 1..].iter().all(|(other, _)| other != name),
                "duplicated key name {}",
                name
            );
        }
    }

    #[test]
    fn test_modifier_bits() {
        assert!(HidKeyCode::LShift.is_modifier());
        assert!(!HidKeyCode::A.is_modifier());
        assert_eq!(HidKeyCode::LCtrl.to_hid_modifiers().into_bits(), 0x01);
        assert_eq!(HidKeyCode::RGui.to_hid_modifiers().into_bits(), 0x80);
        assert_eq!(HidKeyCode::A.to_hid_modifiers().into_bits(), 0x00);
    }

    #[test]
    fn test_from_ascii() {
        assert_eq!(from_ascii(b'h'), (HidKeyCode::H, false));
        assert_eq!(from_ascii(b'H'), (HidKeyCode::H, true));
        assert_eq!(from_ascii(b'9'), (HidKeyCode::Kc9, false));
        assert_eq!(from_ascii(b'0'), (HidKeyCode::Kc0, false));
        assert_eq!(from_ascii(b'?'), (HidKeyCode::Slash, true));
        assert_eq!(from_ascii(b'\n'), (HidKeyCode::Enter, false));
        assert_eq!(from_ascii(0x80), (HidKeyCode::No, false));
    }
}
