//! Stream plumbing: boundary-aware chunking and streaming case folding.

pub mod chunker;
mod fold;

pub use fold::fold_stream;
