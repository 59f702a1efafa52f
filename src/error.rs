//! Error types surfaced by the engine.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The statement shape a [Error::Syntax] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    CreateTable,
    Insert,
    Select,
    DropTable,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateTable => "CREATE TABLE",
            Self::Insert => "INSERT INTO",
            Self::Select => "SELECT",
            Self::DropTable => "DROP TABLE",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an [Error], stable enough for callers to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UnknownTable,
    ColumnCountMismatch,
    UnknownColumn,
    UnsupportedFeature,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Syntax error in {statement} statement: {detail}")]
    Syntax {
        statement: StatementKind,
        detail: String,
    },

    #[error("Unrecognized statement: {0:?}")]
    UnrecognizedStatement(String),

    #[error("Table {0:?} does not exist")]
    UnknownTable(String),

    #[error(
        "Column count mismatch for table {table:?}: expected {expected} values, found {actual}"
    )]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column {column:?} does not exist in table {table:?}")]
    UnknownColumn { table: String, column: String },

    #[error("Unsupported feature: {feature}\n{guidance}")]
    UnsupportedFeature { feature: String, guidance: String },
}

impl Error {
    pub(crate) fn syntax(statement: StatementKind, detail: impl Into<String>) -> Self {
        Self::Syntax {
            statement,
            detail: detail.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    ///
    /// An unrecognized statement is reported as [ErrorKind::Syntax]; use
    /// [Error::is_unsupported] to tell it apart from statements that the
    /// fuller engine could run.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } | Self::UnrecognizedStatement(_) => ErrorKind::Syntax,
            Self::UnknownTable(_) => ErrorKind::UnknownTable,
            Self::ColumnCountMismatch { .. } => ErrorKind::ColumnCountMismatch,
            Self::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            Self::UnsupportedFeature { .. } => ErrorKind::UnsupportedFeature,
        }
    }

    /// True when the statement is valid for the fallback engine but not for this one.
    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedFeature
    }
}
