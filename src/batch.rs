//! Running a script of semicolon-separated statements.

use thiserror::Error;
use tracing::warn;

use crate::database::Database;
use crate::error::Error;
use crate::result::QueryResult;
use crate::tokenizer::TupleScanner;

/// The failure that stopped a batch.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("statement {} failed: {source}", .index + 1)]
pub struct BatchError {
    /// Zero-based position of the failing statement in the batch.
    pub index: usize,
    /// The failing statement, trimmed.
    pub statement: String,
    #[source]
    pub source: Error,
}

/// Splits a script on `;` outside apostrophe quotes, dropping blank statements.
///
/// # Example
/// ```
/// # use minidb::batch::split_statements;
/// let parts = split_statements("INSERT INTO t VALUES ('a;b'); SELECT * FROM t;");
/// assert_eq!(parts, vec!["INSERT INTO t VALUES ('a;b')", "SELECT * FROM t"]);
/// ```
pub fn split_statements(script: &str) -> Vec<String> {
    TupleScanner::new(script)
        .split(';', false)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Database {
    /// Executes every statement of `script` in order.
    ///
    /// Each statement sees the effects of the ones before it. Execution stops
    /// at the first failure; statements already run stay applied.
    ///
    /// # Errors
    /// Returns a [BatchError] naming the statement that failed.
    pub fn execute_batch(&mut self, script: &str) -> Result<Vec<QueryResult>, BatchError> {
        let statements = split_statements(script);
        let mut results = Vec::with_capacity(statements.len());

        for (index, statement) in statements.into_iter().enumerate() {
            match self.execute(&statement) {
                Ok(result) => results.push(result),
                Err(source) => {
                    warn!(index, %source, "batch aborted");
                    return Err(BatchError {
                        index,
                        statement,
                        source,
                    });
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::Value;

    #[test]
    fn test_split_statements() {
        assert_eq!(
            split_statements(" a ;; b\n;  "),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            split_statements("x 'it\\'s;still'; y"),
            vec!["x 'it\\'s;still'".to_string(), "y".to_string()]
        );
        assert!(split_statements("  ;  ").is_empty());
    }

    #[test]
    fn test_batch_runs_in_order() {
        let mut db = Database::new();
        let results = db
            .execute_batch(
                "CREATE TABLE t (a INT); INSERT INTO t VALUES (1), (2); SELECT a FROM t WHERE a > 1;",
            )
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_empty());
        assert_eq!(results[2].rows, vec![vec![Value::Int(2)]]);
    }

    #[test]
    fn test_batch_aborts_on_first_failure() {
        let mut db = Database::new();
        let err = db
            .execute_batch(
                "CREATE TABLE t (a INT); SELECT * FROM missing; INSERT INTO t VALUES (1)",
            )
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.statement, "SELECT * FROM missing");
        assert_eq!(err.source.kind(), ErrorKind::UnknownTable);
        assert!(err.to_string().starts_with("statement 2 failed"));

        // the CREATE before the failure stays, the INSERT after it never ran
        assert_eq!(db.get_table("t").unwrap().row_count(), 0);
    }
}
