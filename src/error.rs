//! Error types shared by the network model, the cost evaluator, the
//! optimizer and the file format.
//!
//! Every failure is a [`GridError`] variant carrying a structured payload
//! (offending names, line number when the error came from a file).
//! [`GridError::kind`] gives the discriminant for callers that only want
//! to branch on the category.

use std::fmt;

use thiserror::Error;

/// Which side of a connection a name was expected to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    House,
    Generator,
    /// Neither name resolved, so the missing side is unknown.
    Element,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::House => f.write_str("house"),
            Entity::Generator => f.write_str("generator"),
            Entity::Element => f.write_str("house or generator"),
        }
    }
}

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed line in a network file.
    Syntax,
    /// Network file sections out of the required order.
    Ordering,
    /// A value violates a domain constraint.
    InvalidData,
    /// A referenced house or generator does not exist.
    NotFound,
    /// A structural or numeric invariant does not hold at evaluation time.
    Logic,
    /// Reading or writing a network file failed.
    Io,
}

/// Errors raised by network operations.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("line {line}: syntax error: {detail}")]
    Syntax { line: usize, detail: String },

    #[error("line {line}: {element} declared out of order: {reason}")]
    Ordering {
        line: usize,
        element: String,
        reason: String,
    },

    #[error("{}invalid data: {detail}", line_prefix(.line))]
    InvalidData { detail: String, line: Option<usize> },

    #[error("{}{entity} not found: {name}", line_prefix(.line))]
    NotFound {
        entity: Entity,
        name: String,
        line: Option<usize>,
    },

    #[error("logic error: {}", .violations.join("; "))]
    Logic { violations: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

fn line_prefix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!("line {n}: "),
        None => String::new(),
    }
}

impl GridError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        GridError::InvalidData {
            detail: detail.into(),
            line: None,
        }
    }

    pub(crate) fn not_found(entity: Entity, name: impl Into<String>) -> Self {
        GridError::NotFound {
            entity,
            name: name.into(),
            line: None,
        }
    }

    pub(crate) fn logic(violation: impl Into<String>) -> Self {
        GridError::Logic {
            violations: vec![violation.into()],
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::Syntax { .. } => ErrorKind::Syntax,
            GridError::Ordering { .. } => ErrorKind::Ordering,
            GridError::InvalidData { .. } => ErrorKind::InvalidData,
            GridError::NotFound { .. } => ErrorKind::NotFound,
            GridError::Logic { .. } => ErrorKind::Logic,
            GridError::Io(_) => ErrorKind::Io,
        }
    }

    /// Attaches a file line number to errors that can carry one.
    ///
    /// Errors that already have a line, or whose variant has no line
    /// slot, are returned unchanged.
    pub fn at_line(self, n: usize) -> Self {
        match self {
            GridError::InvalidData { detail, line: None } => GridError::InvalidData {
                detail,
                line: Some(n),
            },
            GridError::NotFound {
                entity,
                name,
                line: None,
            } => GridError::NotFound {
                entity,
                name,
                line: Some(n),
            },
            other => other,
        }
    }

    /// Line number in the source file, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            GridError::Syntax { line, .. } | GridError::Ordering { line, .. } => Some(*line),
            GridError::InvalidData { line, .. } | GridError::NotFound { line, .. } => *line,
            GridError::Logic { .. } | GridError::Io(_) => None,
        }
    }
}
