//! Structural parsers for the four supported statement shapes.
//!
//! There is no general grammar: the leading keywords pick a statement kind,
//! then a small cursor-based parser checks that kind's exact shape.

use crate::ast::*;
use crate::column::{Column, split_column_defs};
use crate::config::EngineConfig;
use crate::error::{Error, Result, StatementKind};
use crate::predicate::Predicate;
use crate::tokenizer::scan_tuples;

pub struct Parser<'a> {
    input: Vec<char>,
    position: usize,
    config: &'a EngineConfig,
}

impl<'a> Parser<'a> {
    /// Prepares a parser for one statement. Surrounding whitespace and
    /// trailing semicolons are ignored.
    pub fn new(sql: &str, config: &'a EngineConfig) -> Self {
        let sql = sql.trim().trim_end_matches(';').trim_end();
        Self {
            input: sql.chars().collect(),
            position: 0,
            config,
        }
    }

    /// Routes the statement by its leading keywords and parses it.
    ///
    /// # Errors
    /// - [Error::UnsupportedFeature] for statements starting with a file-reading
    ///   function, or a `SELECT` outside the supported shape.
    /// - [Error::UnrecognizedStatement] for anything else that matches no route.
    /// - [Error::Syntax] when a routed statement is malformed.
    pub fn parse(&mut self) -> Result<Statement> {
        if self.peek_keywords(&["create", "table"]) {
            return self.parse_create_table();
        }
        if self.peek_keywords(&["insert", "into"]) {
            return self.parse_insert();
        }
        if self.peek_keywords(&["select"]) {
            return self.parse_select();
        }
        if self.peek_keywords(&["drop", "table"]) {
            return self.parse_drop_table();
        }

        let text: String = self.input.iter().collect();
        if let Some(function) = self.config.file_function_prefix(&text) {
            return Err(Error::UnsupportedFeature {
                feature: format!("file-reading function {function}()"),
                guidance: self.config.guidance(),
            });
        }
        Err(Error::UnrecognizedStatement(text))
    }

    // --- Statement shapes ---

    /// `CREATE TABLE <ident> ( <columnDefs> )`
    fn parse_create_table(&mut self) -> Result<Statement> {
        let kind = StatementKind::CreateTable;
        self.consume_keyword("create");
        self.consume_keyword("table");

        let name = self
            .consume_ident()
            .ok_or_else(|| Error::syntax(kind, "expected a table name"))?;

        self.skip_whitespace();
        if !self.consume_char('(') {
            return Err(Error::syntax(kind, "expected '(' after the table name"));
        }

        // the body runs up to the last ')' of the statement
        let rest = self.remaining();
        let close = rest
            .rfind(')')
            .ok_or_else(|| Error::syntax(kind, "expected ')' after the column list"))?;
        if !rest[close + 1..].trim().is_empty() {
            return Err(Error::syntax(kind, "unexpected text after the column list"));
        }
        let body = &rest[..close];
        if body.trim().is_empty() {
            return Err(Error::syntax(kind, "a table needs at least one column"));
        }

        let columns = split_column_defs(body)
            .into_iter()
            .map(|def| {
                Column::parse_def(def)
                    .ok_or_else(|| Error::syntax(kind, "empty column definition"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Statement::CreateTable(CreateTable { name, columns }))
    }

    /// `INSERT INTO <ident> VALUES <tupleList>`
    fn parse_insert(&mut self) -> Result<Statement> {
        let kind = StatementKind::Insert;
        self.consume_keyword("insert");
        self.consume_keyword("into");

        let table = self
            .consume_ident()
            .ok_or_else(|| Error::syntax(kind, "expected a table name"))?;

        if !self.consume_keyword("values") {
            return Err(Error::syntax(kind, "expected VALUES after the table name"));
        }

        let list = self.remaining();
        if list.trim().is_empty() {
            return Err(Error::syntax(kind, "expected at least one tuple after VALUES"));
        }

        let rows = scan_tuples(&list).map_err(|detail| Error::syntax(kind, detail))?;
        Ok(Statement::InsertInto(InsertInto { table, rows }))
    }

    /// `SELECT <columnSpec> FROM <ident> [WHERE <condition>]`
    ///
    /// Any deviation is reported as unsupported rather than as a syntax error,
    /// since the fallback engine may well run it.
    fn parse_select(&mut self) -> Result<Statement> {
        self.parse_select_shape().ok_or_else(|| Error::UnsupportedFeature {
            feature: "SELECT beyond `SELECT <columns> FROM <table> [WHERE <condition>]`"
                .to_string(),
            guidance: self.config.guidance(),
        })
    }

    fn parse_select_shape(&mut self) -> Option<Statement> {
        self.consume_keyword("select");

        self.skip_whitespace();
        let columns = if self.consume_char('*') {
            ColumnsSelect::Star
        } else {
            let mut names = vec![self.consume_ident()?];
            loop {
                self.skip_whitespace();
                if !self.consume_char(',') {
                    break;
                }
                names.push(self.consume_ident()?);
            }
            ColumnsSelect::ColumnsNames(names)
        };

        if !self.consume_keyword("from") {
            return None;
        }
        let table = self.consume_ident()?;

        self.skip_whitespace();
        let where_clause = if self.is_at_end() {
            None
        } else if self.consume_keyword("where") {
            let condition = self.remaining();
            if condition.trim().is_empty() {
                return None;
            }
            Some(Predicate::parse(&condition))
        } else {
            return None;
        };

        Some(Statement::Select(Select {
            columns,
            table,
            where_clause,
        }))
    }

    /// `DROP TABLE <ident>`
    fn parse_drop_table(&mut self) -> Result<Statement> {
        let kind = StatementKind::DropTable;
        self.consume_keyword("drop");
        self.consume_keyword("table");

        let name = self
            .consume_ident()
            .ok_or_else(|| Error::syntax(kind, "expected a table name"))?;

        self.skip_whitespace();
        if !self.is_at_end() {
            return Err(Error::syntax(kind, "unexpected text after the table name"));
        }

        Ok(Statement::DropTable(DropTable { name }))
    }

    // --- Navigation Helpers ---

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Everything from the cursor to the end of the statement.
    fn remaining(&self) -> String {
        self.input[self.position..].iter().collect()
    }

    // --- Extraction Logic ---

    fn consume_char(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `keyword` (case-insensitive) after optional whitespace.
    ///
    /// The keyword must end at a non-word character or the end of input.
    /// On failure the cursor is left where it was.
    fn consume_keyword(&mut self, keyword: &str) -> bool {
        let start = self.position;
        self.skip_whitespace();

        for expected in keyword.chars() {
            if self.is_at_end() || !self.current_char().eq_ignore_ascii_case(&expected) {
                self.position = start;
                return false;
            }
            self.advance();
        }

        if !self.is_at_end() && Self::is_word_char(self.current_char()) {
            self.position = start;
            return false;
        }
        true
    }

    /// Checks whether the statement starts with `keywords` without moving the cursor.
    fn peek_keywords(&mut self, keywords: &[&str]) -> bool {
        let start = self.position;
        let matched = keywords.iter().all(|kw| self.consume_keyword(kw));
        self.position = start;
        matched
    }

    /// Reads an identifier: one or more word characters after optional whitespace.
    fn consume_ident(&mut self) -> Option<String> {
        self.skip_whitespace();
        let mut ident = String::new();
        while !self.is_at_end() && Self::is_word_char(self.current_char()) {
            ident.push(self.current_char());
            self.advance();
        }
        (!ident.is_empty()).then_some(ident)
    }
}
