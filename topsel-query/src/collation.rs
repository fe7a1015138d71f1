// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String collation for ranking criteria
//!
//! | Mode          | `"Test2"` vs `"Test10"` | Rule                                   |
//! |---------------|-------------------------|----------------------------------------|
//! | Lexicographic | Greater                 | Unicode code point order               |
//! | Alphanumeric  | Less                    | Digit runs compared by numeric value   |
//!
//! Alphanumeric comparison splits each string into maximal runs of ASCII
//! digits and non-digits. Runs are compared pairwise: digit runs by value
//! (any length, leading zeros ignored), other runs by code point. When every
//! run compares equal the strings fall back to code point order, so only
//! identical strings are ever `Equal` and the order stays total.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How two strings are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringMode {
    #[default]
    Lexicographic,
    Alphanumeric,
}

/// Compare two strings under the given mode
pub fn compare_strings(a: &str, b: &str, mode: StringMode) -> Ordering {
    match mode {
        StringMode::Lexicographic => a.cmp(b),
        StringMode::Alphanumeric => compare_alphanumeric(a, b),
    }
}

/// Natural ("alphanumeric") string order
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = compare_runs(x, y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits a string into maximal digit / non-digit runs without allocating
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits { Run::Digits(run) } else { Run::Text(run) })
    }
}

fn compare_runs(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Digits(x), Run::Digits(y)) => compare_digit_runs(x, y),
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
        // First characters differ in kind; a non-digit is either below '0'
        // or above '9', so this ranks it consistently against every number.
        (Run::Digits(x), Run::Text(y)) | (Run::Text(x), Run::Digits(y)) => x.cmp(y),
    }
}

/// Numeric comparison of two ASCII digit runs of arbitrary length
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_is_code_point_order() {
        assert_eq!(compare_strings("Test10", "Test2", StringMode::Lexicographic), Ordering::Less);
        assert_eq!(compare_strings("B", "a", StringMode::Lexicographic), Ordering::Less);
    }

    #[test]
    fn test_alphanumeric_compares_numbers_by_value() {
        assert_eq!(compare_alphanumeric("Test2", "Test10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("Test10", "Test2"), Ordering::Greater);
        assert_eq!(compare_alphanumeric("file9.txt", "file10.txt"), Ordering::Less);
        assert_eq!(compare_alphanumeric("a2b3", "a2b20"), Ordering::Less);
    }

    #[test]
    fn test_alphanumeric_handles_long_digit_runs() {
        let big = "x123456789012345678901234567890";
        let bigger = "x123456789012345678901234567891";
        assert_eq!(compare_alphanumeric(big, bigger), Ordering::Less);
        assert_eq!(compare_alphanumeric("x99", big), Ordering::Less);
    }

    #[test]
    fn test_alphanumeric_leading_zeros_tie_break() {
        // Numerically equal, but distinct strings never compare equal
        assert_eq!(compare_alphanumeric("a01", "a1"), "a01".cmp("a1"));
        assert_eq!(compare_alphanumeric("a1", "a01"), Ordering::Greater);
        assert_eq!(compare_alphanumeric("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_alphanumeric_prefix_sorts_first() {
        assert_eq!(compare_alphanumeric("Test", "Test1"), Ordering::Less);
        assert_eq!(compare_alphanumeric("", "0"), Ordering::Less);
    }

    #[test]
    fn test_alphanumeric_digits_against_text() {
        // '-' sorts below digits, 'a' above them
        assert_eq!(compare_alphanumeric("-5", "3"), Ordering::Less);
        assert_eq!(compare_alphanumeric("a", "300"), Ordering::Greater);
    }

    #[test]
    fn test_alphanumeric_non_ascii() {
        assert_eq!(compare_alphanumeric("é2", "é10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("z", "é"), Ordering::Less);
    }
}
