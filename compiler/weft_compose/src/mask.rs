//! Change-mask packing.
//!
//! A call site records which of its arguments are provably stable in a
//! bit-packed integer the callee consults to decide whether re-execution
//! can be skipped. Each tracked argument gets a 3-bit slot; 10 slots fit
//! in one 32-bit mask, and longer argument lists chain additional mask
//! integers, each appended as one more trailing argument.
//!
//! Classification is purely syntactic — the pipeline runs before semantic
//! analysis, so anything not provably constant must stay unstable. An
//! over-eager "stable" here would make the runtime skip a recomposition it
//! actually needed; an over-cautious "unstable" only costs a redundant
//! re-execution.
//!
//! Bit 0 of the first mask doubles as the force-recompose flag: callees
//! test `$changed & 1`, and restart closures replay with `$changed | 1`.
//! Call sites write only stability slots and never OR that flag in.

use weft_ir::ExprKind;

/// Bits per tracked argument slot.
pub const BITS_PER_SLOT: u32 = 3;

/// Argument slots per mask integer (32 bits / 3 bits per slot).
pub const SLOTS_PER_MASK: usize = 10;

/// Syntactic stability of one call-site argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stability {
    /// Not provably constant; the default. All lambdas land here.
    Unstable = 0,
    /// Provably constant: a string, integer, or boolean literal.
    Stable = 1,
}

/// Classify one argument expression.
pub fn classify(kind: &ExprKind) -> Stability {
    match kind {
        ExprKind::Lambda { .. } => Stability::Unstable,
        ExprKind::Str(_) | ExprKind::Int(_) | ExprKind::Bool(_) => Stability::Stable,
        // Conservative default: idents, field reads, calls, anything
        // else could change between compositions.
        _ => Stability::Unstable,
    }
}

/// Number of mask integers a call with `arg_count` arguments carries.
///
/// At least one, even for a zero-argument call.
#[inline]
pub fn mask_count(arg_count: usize) -> usize {
    arg_count.div_ceil(SLOTS_PER_MASK).max(1)
}

/// Pack the mask integer for one 10-argument chunk.
///
/// Slot *k* of chunk *n* describes argument `n * 10 + k` and occupies bits
/// `3k .. 3k+3`. A pure function of the ordered stability sequence.
pub fn chunk_mask(stabilities: &[Stability], chunk: usize) -> i32 {
    let start = chunk * SLOTS_PER_MASK;
    let end = (start + SLOTS_PER_MASK).min(stabilities.len());

    let mut mask = 0i32;
    for (slot, stability) in stabilities[start.min(end)..end].iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let shift = (slot as u32) * BITS_PER_SLOT;
        mask |= (*stability as i32) << shift;
    }
    mask
}
