//! Value types and algorithms: snapshots, filters, ignore rules and the
//! status comparator.

pub mod filter;
pub mod ignore;
pub mod snapshot;
pub mod status;
