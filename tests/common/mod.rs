//! Utility helpers shared across integration tests.
#![allow(dead_code)]

use assert_cmd::{Command, assert::Assert};
use rstest::fixture;
use tagtext::{Hooks, PatternDefinition, TagKind, TextSegment, Theme, default_patterns};

/// The default registry with no interaction hooks.
#[fixture]
pub fn patterns() -> Vec<PatternDefinition> { default_patterns(&Theme::default(), &Hooks::default()) }

/// Reduce segments to `(kind, text)` pairs for comparison.
pub fn view(segments: &[TextSegment]) -> Vec<(Option<TagKind>, String)> {
    segments.iter().map(|s| (s.kind, s.text.clone())).collect()
}

/// Concatenate segment texts.
pub fn joined(segments: &[TextSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

pub fn tagtext() -> Command {
    Command::cargo_bin("tagtext").expect("Failed to create cargo command for tagtext")
}

pub fn run_cli_with_stdin(args: &[&str], input: &str) -> Assert {
    tagtext().args(args).write_stdin(input).assert()
}

pub fn run_cli_with_args(args: &[&str]) -> Assert { tagtext().args(args).assert() }
