use regex::Regex;
use std::sync::LazyLock;
use strum_macros::Display;

/// Column layout of the first element line: line number, catalog number,
/// classification and 60 further columns.
static LINE1_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1 [0-9A-Z ]{5}[A-Z ] .{60}$").unwrap());
/// Column layout of the second element line.
static LINE2_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2 [0-9A-Z ]{5} .{61}$").unwrap());

/// Body returned by the provider for unknown catalog numbers.
const NO_DATA_BODY: &str = "No GP data found";

/// A named two-line element set as delivered by the TLE provider.
///
/// The record is immutable once parsed. `line1` and `line2` keep their
/// exact column content, trailing line terminators are the only thing removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TleRecord {
    /// Object name from the title line.
    name: String,
    /// First element line (69 columns).
    line1: String,
    /// Second element line (69 columns).
    line2: String,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum TleParseError {
    /// The provider has no element set for the requested catalog number.
    NoData,
    /// Fewer than the three required non-empty lines were found.
    TooFewLines(usize),
    /// The element line with the given number does not have the fixed TLE layout.
    MalformedLine(u8),
}

impl std::error::Error for TleParseError {}

impl TleRecord {
    /// Parses a three-line block (title, line 1, line 2).
    ///
    /// Blank lines are skipped and anything after the third line is ignored.
    ///
    /// # Errors
    /// Returns a [`TleParseError`] if fewer than three lines are present or if one
    /// of the element lines does not match the TLE column layout.
    pub fn parse(text: &str) -> Result<Self, TleParseError> {
        if text.trim() == NO_DATA_BODY {
            return Err(TleParseError::NoData);
        }
        let lines: Vec<&str> =
            text.lines().map(str::trim_end).filter(|l| !l.is_empty()).take(3).collect();
        let [name, line1, line2] = lines.as_slice() else {
            return Err(TleParseError::TooFewLines(lines.len()));
        };
        if !LINE1_SHAPE.is_match(line1) {
            return Err(TleParseError::MalformedLine(1));
        }
        if !LINE2_SHAPE.is_match(line2) {
            return Err(TleParseError::MalformedLine(2));
        }
        Ok(Self {
            name: name.trim().to_string(),
            line1: (*line1).to_string(),
            line2: (*line2).to_string(),
        })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn line1(&self) -> &str { &self.line1 }
    pub fn line2(&self) -> &str { &self.line2 }
}
