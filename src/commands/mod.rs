//! High-level commands built on the executor, parsers and classifier.

mod run;

pub use run::*;
