/// Effect layer — an independent pool of elements with its own container,
/// counter, and ceiling.
///
/// Ambient and burst elements are kept apart so a pointer burst can never
/// starve the ambient trickle (or vice versa), and so the page can z-order
/// the two surfaces independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum EffectLayer {
    #[default]
    Ambient = 0,
    Burst = 1,
}

impl EffectLayer {
    /// Total number of effect layers.
    pub const COUNT: usize = 2;

    pub const ALL: [EffectLayer; Self::COUNT] = [Self::Ambient, Self::Burst];

    /// Convert from a u8 value. Returns None if out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ambient),
            1 => Some(Self::Burst),
            _ => None,
        }
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Index into per-layer arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}
