// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the sorting task itself:
//
//   - A Sequence is L distinct tokens in [0, L)
//   - A PointerLabel is the permutation of positions that
//     reads the Sequence back in ascending order
//   - A SortSample bundles both with the right-shifted
//     label the decoder is teacher-forced with
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs and traits
//
// Reference: Vinyals et al. (2015) Pointer Networks
//            Rust Book §5 (Structs), §10 (Traits)

// Argsort labels and their invariants
pub mod pointer;

// One supervised training example
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
