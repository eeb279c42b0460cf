//! In-place splicing of generated code into a source buffer.
//!
//! Each patch inserts [`COMMENT_PREFIX`] at its marker and its generated text
//! after its declaration. Patches are applied left to right; every insertion
//! shifts the remaining original offsets, so targets are adjusted by the
//! running total of bytes inserted so far.

use log::debug;
use serde::Serialize;

use crate::invariants;
use crate::parser::StructureDescriptor;

/// Turns the annotation line into a line comment.
pub const COMMENT_PREFIX: &str = "// ";

/// One structure's worth of edits, in original-buffer offsets.
#[derive(Debug, Clone, Copy)]
pub struct Patch<'a> {
    pub marker_offset: usize,
    pub insertion_offset: usize,
    pub text: &'a str,
}

impl<'a> Patch<'a> {
    pub fn new(descriptor: &StructureDescriptor, text: &'a str) -> Self {
        Self {
            marker_offset: descriptor.marker_offset,
            insertion_offset: descriptor.insertion_offset,
            text,
        }
    }

    fn growth(&self) -> usize {
        COMMENT_PREFIX.len() + self.text.len()
    }
}

/// A performed insertion, in offsets of the final buffer.
///
/// Later insertions always land to the right of earlier ones, so recorded
/// offsets stay valid after the whole splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub offset: usize,
    pub len: usize,
}

/// Applies `patches` (sorted by marker offset) to `buffer`.
///
/// # Panics
///
/// When patches are unsorted, overlap, or point past the buffer: the offsets
/// were computed against a different buffer.
pub fn splice(buffer: &mut Vec<u8>, patches: &[Patch<'_>]) -> Vec<Insertion> {
    let growth: usize = patches.iter().map(Patch::growth).sum();
    buffer.reserve_exact(growth);

    let mut insertions = Vec::with_capacity(patches.len() * 2);
    let mut shift = 0;
    let mut previous_end = 0;

    for patch in patches {
        invariants::ensure_patch_order(previous_end, patch.marker_offset, patch.insertion_offset);

        let marker_at = patch.marker_offset + shift;
        insert_at(buffer, marker_at, COMMENT_PREFIX.as_bytes());
        insertions.push(Insertion {
            offset: marker_at,
            len: COMMENT_PREFIX.len(),
        });

        let text_at = patch.insertion_offset + shift + COMMENT_PREFIX.len();
        insert_at(buffer, text_at, patch.text.as_bytes());
        insertions.push(Insertion {
            offset: text_at,
            len: patch.text.len(),
        });
        debug!(
            "spliced {} bytes at {} (marker at {})",
            patch.text.len(),
            text_at,
            marker_at
        );

        shift += patch.growth();
        previous_end = patch.insertion_offset;
    }

    insertions
}

/// Opens a gap at `pos` by moving the tail right, then fills it.
fn insert_at(buffer: &mut Vec<u8>, pos: usize, bytes: &[u8]) {
    let len = buffer.len();
    invariants::ensure_insertion_in_bounds(pos, len);

    buffer.resize(len + bytes.len(), 0);
    buffer.copy_within(pos..len, pos + bytes.len());
    buffer[pos..pos + bytes.len()].copy_from_slice(bytes);
}
