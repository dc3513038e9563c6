//! Movement feature derivation and per-trial aggregation.

pub mod align;
pub mod displacement;
pub mod joint;
pub mod logit;
pub mod position;
pub mod stats;
pub mod summary;
pub mod timestamp;
pub mod window;
