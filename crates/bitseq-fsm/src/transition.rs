// Per-state transition records with packed edge info.

use bitseq_core::Bit;
use bytemuck::{Pod, Zeroable};

use crate::State;

/// Mask selecting the target state from a packed edge (bits 0-30).
pub const TARGET_MASK: u32 = 0x7FFF_FFFF;

/// Flag bit carrying the transition output (bit 31).
///
/// Only Mealy detectors set it; Moore detectors keep their outputs on the
/// states and leave this bit clear.
pub const OUTPUT_FLAG: u32 = 0x8000_0000;

/// Both outgoing transitions of one state (8 bytes).
///
/// Each field is a packed edge: target state in bits 0-30, output bit in
/// bit 31. The layout is also the on-disk layout of compiled tables (see
/// [`crate::format`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct StateRecord {
    pub on_zero: u32,
    pub on_one: u32,
}

/// Pack a target state and an output bit into one edge word.
#[inline]
pub fn pack_edge(target: State, output: Bit) -> u32 {
    debug_assert!(target <= TARGET_MASK as usize, "target state {target} does not fit");
    let flag = if output.is_one() { OUTPUT_FLAG } else { 0 };
    (target as u32 & TARGET_MASK) | flag
}

impl StateRecord {
    /// Build a record from `(target, output)` pairs indexed by input bit.
    #[inline]
    pub fn new(edges: [(State, Bit); 2]) -> Self {
        let [(t0, o0), (t1, o1)] = edges;
        Self {
            on_zero: pack_edge(t0, o0),
            on_one: pack_edge(t1, o1),
        }
    }

    /// The packed edge taken on `bit`.
    #[inline]
    pub fn edge(&self, bit: Bit) -> u32 {
        match bit {
            Bit::Zero => self.on_zero,
            Bit::One => self.on_one,
        }
    }

    #[inline]
    pub fn target(&self, bit: Bit) -> State {
        (self.edge(bit) & TARGET_MASK) as State
    }

    #[inline]
    pub fn output(&self, bit: Bit) -> Bit {
        Bit::from(self.edge(bit) & OUTPUT_FLAG != 0)
    }

    /// Copy of this record with both output flags cleared.
    #[inline]
    pub fn without_outputs(self) -> Self {
        Self {
            on_zero: self.on_zero & TARGET_MASK,
            on_one: self.on_one & TARGET_MASK,
        }
    }
}

const _: () = assert!(size_of::<StateRecord>() == 8);
