//! Data layer: the column model and the filter, sort and paginate stages
//!
//! Each stage works on source indices into the caller's record slice so the
//! records themselves are only ever borrowed.

// Column model and values
pub mod column;
pub mod datavalue;
pub mod datavalue_compare;
pub mod type_inference;

// Pipeline stages
pub mod pagination;
pub mod search_filter;
pub mod sort;

// Orchestration
pub mod data_view;

// Data sources
pub mod loaders;
