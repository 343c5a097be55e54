//! Testing utilities and harness for Glide

pub mod recorder;
pub mod testing;

pub use recorder::Recorder;
pub use testing::*;

pub mod prelude {
    pub use crate::recorder::Recorder;
    pub use crate::testing::*;
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
