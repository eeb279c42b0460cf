//! Invariant checks excluded from coverage reports.
//!
//! Violations mean offsets were computed against a different buffer than the
//! one being edited. They are bugs, never input errors.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::parser::StructureDescriptor;

/// Insertion at `len` appends; anything further is out of bounds.
pub(crate) fn ensure_insertion_in_bounds(pos: usize, len: usize) {
    if pos > len {
        panic!("splice: insertion offset {pos} past buffer length {len} (stale offsets?)");
    }
}

pub(crate) fn ensure_patch_order(previous_end: usize, marker_offset: usize, insertion_offset: usize) {
    if marker_offset >= insertion_offset {
        panic!(
            "splice: marker offset {marker_offset} not before insertion offset {insertion_offset}"
        );
    }
    if marker_offset < previous_end {
        panic!(
            "splice: marker offset {marker_offset} inside previous patch ending at {previous_end}"
        );
    }
}

/// Declarations may touch: a marker right after the previous `;` shares its
/// offset with the previous insertion point, and the splice writes the
/// generated text before the comment prefix.
pub(crate) fn ensure_discovery_order(previous: Option<&StructureDescriptor>, next: &StructureDescriptor) {
    if let Some(previous) = previous {
        if previous.insertion_offset > next.marker_offset {
            panic!(
                "scan: `{}` discovered at {} before `{}` ended at {}",
                next.name, next.marker_offset, previous.name, previous.insertion_offset
            );
        }
    }
}
