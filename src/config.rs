/// Engine settings that shape how unsupported statements are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Name of the full-featured engine suggested for unsupported statements.
    pub fallback_engine: String,
    /// Table-function names (matched case-insensitively as a statement
    /// prefix) that read external files.
    pub file_functions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_engine: "DuckDB".to_string(),
            file_functions: [
                "read_csv",
                "read_csv_auto",
                "read_parquet",
                "read_json",
                "read_json_auto",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl EngineConfig {
    pub fn with_fallback_engine(mut self, name: impl Into<String>) -> Self {
        self.fallback_engine = name.into();
        self
    }

    pub fn with_file_function(mut self, name: impl Into<String>) -> Self {
        self.file_functions.push(name.into());
        self
    }

    /// Returns the file function `statement` starts with, if any.
    ///
    /// The longest matching name wins, and it must not run on into further
    /// word characters: `read_csv_auto(...)` is `read_csv_auto`, `read_csvx`
    /// is nothing.
    pub fn file_function_prefix(&self, statement: &str) -> Option<&str> {
        let lowered = statement.trim_start().to_lowercase();
        self.file_functions
            .iter()
            .filter(|f| {
                lowered
                    .strip_prefix(&f.to_lowercase())
                    .is_some_and(|rest| {
                        !rest
                            .chars()
                            .next()
                            .is_some_and(|c| c.is_alphanumeric() || c == '_')
                    })
            })
            .max_by_key(|f| f.len())
            .map(String::as_str)
    }

    /// Help text attached to every unsupported-feature error.
    pub fn guidance(&self) -> String {
        let example_fn = self
            .file_functions
            .first()
            .map(String::as_str)
            .unwrap_or("read_csv");
        format!(
            "This lightweight engine only runs CREATE TABLE, INSERT INTO ... VALUES, \
             SELECT <columns> FROM <table> [WHERE <column> <op> <value>] and DROP TABLE.\n\
             Switch to the {engine} engine for file reads and advanced queries, for example:\n  \
             SELECT * FROM {example_fn}('data.csv');\n  \
             SELECT category, count(*) FROM sales GROUP BY category ORDER BY 2 DESC;",
            engine = self.fallback_engine,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.fallback_engine, "DuckDB");
        assert!(config.file_functions.iter().any(|f| f == "read_parquet"));
    }

    #[test]
    fn test_file_function_prefix() {
        let config = EngineConfig::default();
        assert_eq!(
            config.file_function_prefix("  READ_PARQUET('x.parquet')"),
            Some("read_parquet")
        );
        assert_eq!(config.file_function_prefix("select 1"), None);

        // longest name wins, partial words do not count
        assert_eq!(
            config.file_function_prefix("read_csv_auto('x.csv')"),
            Some("read_csv_auto")
        );
        assert_eq!(config.file_function_prefix("read_csv ('x.csv')"), Some("read_csv"));
        assert_eq!(config.file_function_prefix("read_csvfoo('x.csv')"), None);
        assert_eq!(config.file_function_prefix("read_json"), Some("read_json"));

        let config = config.with_file_function("read_xlsx");
        assert_eq!(config.file_function_prefix("read_xlsx('a')"), Some("read_xlsx"));
    }

    #[test]
    fn test_guidance_names_engine_and_examples() {
        let text = EngineConfig::default()
            .with_fallback_engine("BigEngine")
            .guidance();
        assert!(text.contains("BigEngine"));
        assert!(text.contains("read_csv('data.csv')"));
        assert!(text.contains("GROUP BY"));
    }
}
