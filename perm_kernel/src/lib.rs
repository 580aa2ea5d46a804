//! Fixed-size permutation arithmetic and `S_N` conjugacy-class machinery.
//!
//! `Perm<N>` is a permutation of `{0, ..., N-1}` represented as an image
//! array; arithmetic on it (`compose`, `inverse`, `power`, `sign`) is O(N).
//! Converting to and from the sign-alternating `S_N` index described in
//! spec.md §3 goes through a lazily-built, process-wide table (see
//! [`table`]); building the table is the one expensive, memoised operation
//! in this crate, the same role `covers.cpp`'s `precompute<n>()` plays in
//! the original engine.

mod class;
mod partition;
mod perm;
mod table;

pub use class::{Centraliser, PermClass};
pub use partition::partitions_of;
pub use perm::Perm;
