//! Analytical engine behind the Brasileirão match-statistics terminal.
//!
//! Everything here is pure with respect to the loaded table: the presentation
//! layer passes season slices and scalar parameters in and renders the
//! structured records that come back.

pub mod dataset;
pub mod export;
pub mod head_to_head;
pub mod odds_buckets;
pub mod poisson;
pub mod state;
pub mod team_stats;
