use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// The conventional mapping of the hex pad onto the left-hand block
    /// of a QWERTY keyboard:
    ///
    /// ```text
    /// 1 2 3 C        1 2 3 4
    /// 4 5 6 D   <-   Q W E R
    /// 7 8 9 E        A S D F
    /// A 0 B F        Z X C V
    /// ```
    pub static ref KEYPAD: HashMap<u8, sfml::window::Key> = vec![
        (0x1, sfml::window::Key::Num1),
        (0x2, sfml::window::Key::Num2),
        (0x3, sfml::window::Key::Num3),
        (0xC, sfml::window::Key::Num4),
        (0x4, sfml::window::Key::Q),
        (0x5, sfml::window::Key::W),
        (0x6, sfml::window::Key::E),
        (0xD, sfml::window::Key::R),
        (0x7, sfml::window::Key::A),
        (0x8, sfml::window::Key::S),
        (0x9, sfml::window::Key::D),
        (0xE, sfml::window::Key::F),
        (0xA, sfml::window::Key::Z),
        (0x0, sfml::window::Key::X),
        (0xB, sfml::window::Key::C),
        (0xF, sfml::window::Key::V),
    ]
    .into_iter()
    .collect();
}

/// Reverse lookup for event handling: which pad key, if any, a host key
/// is bound to.
pub fn pad_key(host_key: sfml::window::Key) -> Option<u8> {
    KEYPAD
        .iter()
        .find(|(_, bound)| **bound == host_key)
        .map(|(code, _)| *code)
}
