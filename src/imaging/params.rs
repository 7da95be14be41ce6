//! Operation chain types and the textual chain syntax.
//!
//! These types describe *what* to do to an image, not *how*. The executor in
//! [`chain`](super::chain) walks an [`OperationChain`] and dispatches to the
//! trim and extend transforms.
//!
//! ## Syntax
//!
//! ```text
//! chain := op ("," op)*
//! op    := "e" | "t" digits?
//! ```
//!
//! Tokens are trimmed and case-insensitive, empty tokens are skipped, and a
//! bare `t` trims with a [`CHAIN_TRIM_MARGIN`] pixel margin.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Margin for a `t` token written without digits.
pub const CHAIN_TRIM_MARGIN: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Invalid trim margin: {0}")]
    InvalidMargin(String),
    #[error("No operations given")]
    Empty,
}

/// A single step of an [`OperationChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Triple the canvas around the image, filled with the edge background.
    Extend,
    /// Crop the uniform border, keeping `margin` pixels around the content.
    Trim { margin: u32 },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Extend => write!(f, "e"),
            Operation::Trim { margin } => write!(f, "t{margin}"),
        }
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    /// Parse one already-trimmed, lowercased token.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token == "e" {
            return Ok(Operation::Extend);
        }
        let Some(digits) = token.strip_prefix('t') else {
            return Err(ParseError::UnknownOperation(token.to_string()));
        };
        if digits.is_empty() {
            return Ok(Operation::Trim {
                margin: CHAIN_TRIM_MARGIN,
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidMargin(digits.to_string()));
        }
        digits
            .parse()
            .map(|margin| Operation::Trim { margin })
            .map_err(|_| ParseError::InvalidMargin(digits.to_string()))
    }
}

/// Ordered, immutable list of operations built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationChain(Vec<Operation>);

impl OperationChain {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self(operations)
    }

    /// Chain with a single operation.
    pub fn single(operation: Operation) -> Self {
        Self(vec![operation])
    }

    pub fn operations(&self) -> &[Operation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for OperationChain {
    type Err = ParseError;

    fn from_str(ops: &str) -> Result<Self, Self::Err> {
        let operations = ops
            .split(',')
            .map(|part| part.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .map(|token| token.parse())
            .collect::<Result<Vec<Operation>, _>>()?;
        if operations.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Self(operations))
    }
}

impl fmt::Display for OperationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
