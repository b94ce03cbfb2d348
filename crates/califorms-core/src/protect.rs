//! The califorms protection primitive and its software emulation.
//!
//! The primitive is a single metadata operation: `apply(index, mask,
//! pattern)` sets the tag of one word to exactly `(mask, pattern)`. Bits
//! set in `mask` are under protection: ordinary reads of those positions
//! observe the corresponding `pattern` bit no matter what was stored.
//! Bits clear in `mask` read the stored value. `apply(index, 0, 0)`
//! clears the word's protection entirely.
//!
//! Applying is replace, not merge: the tag written is the word's whole
//! protection state. A lane protected by an earlier `apply` loses that
//! protection when a later `apply` carries mask bit 0 for it.
//!
//! On hardware the same contract is an instruction and the tag storage is
//! invisible to software; [`LaneProtector`] keeps that boundary so the
//! harness can be pointed at either.

/// Per-word protection metadata.
///
/// Not reachable through the ordinary load/store path; only
/// [`LaneProtector::apply`] mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtectionTag {
    /// Bit positions under protection.
    pub mask: u32,
    /// Value presented on read for protected positions.
    pub pattern: u32,
}

impl ProtectionTag {
    /// The unprotected tag (no effect on reads).
    pub const CLEAR: Self = Self {
        mask: 0,
        pattern: 0,
    };

    /// True when no position is protected.
    #[must_use]
    pub const fn is_clear(self) -> bool {
        self.mask == 0
    }

    /// Read-observable value of a word holding `stored` under this tag.
    #[inline]
    #[must_use]
    pub const fn observe(self, stored: u32) -> u32 {
        (self.pattern & self.mask) | (stored & !self.mask)
    }

    /// True when any bit of `lane` is under protection.
    #[must_use]
    pub fn protects_lane(self, lane: usize) -> bool {
        self.mask & crate::lane::lane_mask(lane) != 0
    }
}

/// The protection primitive, injected into the fixture.
///
/// `apply` has no failure mode: on the intended target the instruction is
/// always available, and the software emulation always succeeds. The
/// override must be visible to program-order subsequent reads; the
/// emulation guarantees this trivially, a hardware implementation carries
/// the instruction's own ordering.
pub trait LaneProtector {
    /// Set the tag of the word at `index` to exactly `(mask, pattern)`.
    fn apply(&mut self, index: usize, mask: u32, pattern: u32);

    /// Read-observable value of the word at `index` given its stored bits.
    fn observe(&self, index: usize, stored: u32) -> u32;

    /// Reset the tags of words `[0, len)` to unprotected.
    fn reset(&mut self, len: usize);
}

/// Software emulation of the per-byte override semantics.
///
/// Keeps one [`ProtectionTag`] per word. This is the implementation every
/// portable build uses; it exists so the benchmark core is testable on
/// targets without the hardware primitive.
#[derive(Debug, Clone)]
pub struct SoftLaneProtector {
    tags: Vec<ProtectionTag>,
}

impl SoftLaneProtector {
    /// Emulated tag storage for `capacity` words, all unprotected.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tags: vec![ProtectionTag::CLEAR; capacity],
        }
    }

    /// The tag currently applied to `index`.
    ///
    /// Emulation-only introspection; hardware offers no equivalent read.
    #[must_use]
    pub fn tag(&self, index: usize) -> ProtectionTag {
        self.tags[index]
    }
}

impl LaneProtector for SoftLaneProtector {
    fn apply(&mut self, index: usize, mask: u32, pattern: u32) {
        self.tags[index] = ProtectionTag { mask, pattern };
    }

    #[inline]
    fn observe(&self, index: usize, stored: u32) -> u32 {
        self.tags[index].observe(stored)
    }

    fn reset(&mut self, len: usize) {
        for tag in &mut self.tags[..len] {
            *tag = ProtectionTag::CLEAR;
        }
    }
}
