//! Imports shared by the `tagtext` integration test binaries.
//!
//! Each binary uses a different subset, so unused re-exports are expected.
#![allow(unfulfilled_lint_expectations)]

#[expect(unused_imports, reason = "only the CLI tests build predicates")]
pub use predicates::prelude::*;
pub use rstest::rstest;

#[path = "../common/mod.rs"]
mod common;
#[expect(unused_imports, reason = "fixtures and runners differ per binary")]
pub use common::*;
