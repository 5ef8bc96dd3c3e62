//! Output parsing tests.

mod parse_test;
mod properties_test;
