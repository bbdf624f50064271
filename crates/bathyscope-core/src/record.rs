//! Delimited-text record parsing.
//!
//! Turns raw text into numeric records without attaching any meaning to the
//! columns. The first non-empty line is a header and is discarded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How non-numeric fields are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Reject the whole row and count it (default).
    #[default]
    SkipMalformed,
    /// Keep the row and store NaN for the bad field.
    Lenient,
}

/// One parsed line of numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Fields in column order.
    pub fields: Vec<f32>,
}

impl RawRecord {
    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, or NaN when the column is missing.
    #[must_use]
    pub fn field(&self, index: usize) -> f32 {
        self.fields.get(index).copied().unwrap_or(f32::NAN)
    }
}

/// Why a line was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// A field did not coerce to a finite number.
    NonNumeric { column: usize, token: String },
    /// The line has fewer columns than the dataset kind needs.
    TooFewFields { expected: usize, actual: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NonNumeric { column, token } => {
                write!(f, "column {column}: '{token}' is not a number")
            }
            RejectReason::TooFewFields { expected, actual } => {
                write!(f, "expected at least {expected} fields, found {actual}")
            }
        }
    }
}

/// A dropped line and the reason it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line: usize,
    pub reason: RejectReason,
}

/// Result of parsing one text blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Accepted records in source order.
    pub records: Vec<RawRecord>,
    /// Lines that were dropped.
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    /// Number of accepted records.
    #[must_use]
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Number of rejected lines.
    #[must_use]
    pub fn num_rejected(&self) -> usize {
        self.rejected.len()
    }
}

/// Splits delimited text into numeric records.
#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: char,
    policy: ParsePolicy,
    min_fields: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(',')
    }
}

impl RecordParser {
    /// Creates a parser for the given delimiter with the default policy.
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            policy: ParsePolicy::default(),
            min_fields: 0,
        }
    }

    /// Sets the malformed-field policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rows with fewer fields than this are rejected under every policy.
    #[must_use]
    pub fn with_min_fields(mut self, min_fields: usize) -> Self {
        self.min_fields = min_fields;
        self
    }

    /// Parses `text`, skipping blank lines and the header.
    pub fn parse(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        // Header
        if lines.next().is_none() {
            return report;
        }

        for (idx, line) in lines {
            let line_no = idx + 1;
            match self.parse_line(line) {
                Ok(fields) => report.records.push(RawRecord {
                    line: line_no,
                    fields,
                }),
                Err(reason) => {
                    log::trace!("line {line_no} rejected: {reason}");
                    report.rejected.push(RejectedLine {
                        line: line_no,
                        reason,
                    });
                }
            }
        }

        report
    }

    fn parse_line(&self, line: &str) -> Result<Vec<f32>, RejectReason> {
        let tokens: Vec<&str> = line.split(self.delimiter).collect();
        if tokens.len() < self.min_fields {
            return Err(RejectReason::TooFewFields {
                expected: self.min_fields,
                actual: tokens.len(),
            });
        }

        let mut fields = Vec::with_capacity(tokens.len());
        for (column, token) in tokens.iter().enumerate() {
            match token.trim().parse::<f32>() {
                Ok(value) if value.is_finite() => fields.push(value),
                _ if self.policy == ParsePolicy::Lenient => fields.push(f32::NAN),
                _ => {
                    return Err(RejectReason::NonNumeric {
                        column,
                        token: (*token).to_string(),
                    })
                }
            }
        }
        Ok(fields)
    }
}
