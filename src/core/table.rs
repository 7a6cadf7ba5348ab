//! Shared reading rules for the hand-maintained comma separated tables

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const COMMENT_PREFIX: char = '/';

pub fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read table: {}", path.display()))
}

/// Yields `(line_number, line)` for every data line, skipping blank lines and
/// comments. Only a `/` in the very first column starts a comment.
pub fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with(COMMENT_PREFIX))
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}
