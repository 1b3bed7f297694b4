//! Policies for comparing captured output against expectations.

/// How captured output is compared against the expected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Byte for byte equality.
    Strict,
    /// Equality that accepts `\r\n` on either side where the other has `\n`.
    Lenient,
}

impl Policy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Policy::Strict
        } else {
            Policy::Lenient
        }
    }

    pub fn matches(self, left: &[u8], right: &[u8]) -> bool {
        match self {
            Policy::Strict => strict(left, right),
            Policy::Lenient => lenient(left, right),
        }
    }
}

pub fn strict(left: &[u8], right: &[u8]) -> bool {
    left == right
}

/// Walk both sequences in lockstep. A `\r\n` pair on one side may stand in
/// for a lone `\n` on the other; any other difference fails, as does one side
/// running out before the other.
pub fn lenient(left: &[u8], right: &[u8]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match (left[i], right[j]) {
            (l, r) if l == r => {
                i += 1;
                j += 1;
            }
            (b'\r', b'\n') if left.get(i + 1) == Some(&b'\n') => {
                i += 2;
                j += 1;
            }
            (b'\n', b'\r') if right.get(j + 1) == Some(&b'\n') => {
                i += 1;
                j += 2;
            }
            _ => return false,
        }
    }
    i == left.len() && j == right.len()
}
