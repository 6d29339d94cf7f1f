//! Working-tree status inspection.
//!
//! Compares three snapshots of a repository -- base-revision tree, staging
//! index and working-tree scan -- and classifies every candidate path.
//!
//! ## Components
//!
//! - `path_status`: the per-path classification and the change-pair
//!   collapse rules
//! - `comparator`: the three-way comparison engine
//! - `status_result`: the immutable, scan-ordered outcome

pub(crate) mod comparator;
pub mod path_status;
pub mod status_result;

pub use path_status::PathStatus;
pub use status_result::StatusResult;
