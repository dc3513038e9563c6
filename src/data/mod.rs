//! Reading, writing, and locating the study's data files.

pub mod csv;
pub mod discovery;
pub mod migrate;
