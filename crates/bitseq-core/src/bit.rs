// The binary alphabet shared by patterns, input streams and outputs.

use std::fmt;

use serde::Serialize;

/// One symbol of the alphabet `{0, 1}`.
///
/// Used for pattern symbols, input symbols and output symbols alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(into = "u8")]
pub enum Bit {
    #[default]
    Zero = 0,
    One = 1,
}

impl Bit {
    /// Both symbols, in table order.
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// Map `'0'`/`'1'` to a bit. Any other character yields `None`.
    #[inline]
    pub fn from_char(c: char) -> Option<Bit> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    /// Column index of this symbol in a transition record.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_one(self) -> bool {
        self == Bit::One
    }
}

impl From<bool> for Bit {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for u8 {
    #[inline]
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
