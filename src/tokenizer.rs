//! Literal handling: the scalar parser and the quote-aware tuple scanner.
//!
//! An apostrophe toggles quoting unless the character right before it is a
//! backslash. Parentheses only count toward nesting outside quotes.

use std::sync::Arc;

use crate::value::Value;

/// Infers a typed [Value] from a literal token whose quotes were already stripped.
///
/// Inference order on the trimmed token:
/// 1. `null` in any case gives [Value::Null]
/// 2. exactly `true` / `false` gives [Value::Bool]
/// 3. `-?\d+` gives [Value::Int] (or [Value::Float] when it overflows `i64`)
/// 4. `-?\d*\.\d+` gives [Value::Float]
/// 5. anything else is [Value::Text]
///
/// # Example
/// ```
/// # use minidb::tokenizer::parse_scalar;
/// # use minidb::Value;
/// assert_eq!(parse_scalar("123"), Value::Int(123));
/// assert_eq!(parse_scalar(" 1.5 "), Value::Float(1.5));
/// assert_eq!(parse_scalar("NULL"), Value::Null);
/// assert_eq!(parse_scalar("TRUE"), Value::Text("TRUE".into()));
/// ```
pub fn parse_scalar(token: &str) -> Value {
    let token = token.trim();

    if token.eq_ignore_ascii_case("null") {
        return Value::Null;
    }

    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if is_integer_literal(token) {
        if let Ok(int) = token.parse::<i64>() {
            return Value::Int(int);
        }
        // too wide for i64, keep it numeric
        if let Ok(float) = token.parse::<f64>() {
            return Value::Float(float);
        }
    }

    if is_decimal_literal(token) {
        if let Ok(float) = token.parse::<f64>() {
            return Value::Float(float);
        }
    }

    Value::Text(Arc::from(token))
}

/// Strips one pair of enclosing apostrophes and unescapes `\'` sequences.
///
/// Tokens that are not quoted are returned trimmed but otherwise untouched.
pub fn unquote(token: &str) -> String {
    let token = token.trim();
    let quoted = token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'');
    if !quoted {
        return token.to_string();
    }
    token[1..token.len() - 1].replace("\\'", "'")
}

/// Reads a raw literal as written in a statement: unquote, then infer.
pub fn parse_literal(token: &str) -> Value {
    parse_scalar(&unquote(token))
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            whole.bytes().all(|b| b.is_ascii_digit())
                && !fraction.is_empty()
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// A single-pass splitter over raw statement text.
///
/// It tracks whether the cursor sits inside an apostrophe-quoted literal and,
/// optionally, how deep it is inside parentheses. A delimiter only splits
/// when it is outside quotes and (when nesting is tracked) at depth zero.
pub struct TupleScanner {
    /// The input string stored as a vector of characters for easy iteration.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
    in_quote: bool,
    depth: i32,
    /// Set once a `)` closes more parentheses than were opened.
    underflow: bool,
}

impl TupleScanner {
    /// Creates a new scanner for the given input string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            in_quote: false,
            depth: 0,
            underflow: false,
        }
    }

    /// Splits the whole input on `delimiter`, returning the raw pieces.
    ///
    /// When `nesting` is false parentheses are ignored and only quoting
    /// protects a delimiter. Pieces are returned exactly as written, with
    /// surrounding whitespace kept.
    pub fn split(&mut self, delimiter: char, nesting: bool) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();

            if ch == '\'' && !self.is_escaped() {
                self.in_quote = !self.in_quote;
            } else if !self.in_quote && nesting && ch == '(' {
                self.depth += 1;
            } else if !self.in_quote && nesting && ch == ')' {
                self.depth -= 1;
                self.underflow |= self.depth < 0;
            } else if !self.in_quote && ch == delimiter && (!nesting || self.depth == 0) {
                pieces.push(std::mem::take(&mut current));
                self.advance();
                continue;
            }

            current.push(ch);
            self.advance();
        }

        pieces.push(current);
        pieces
    }

    /// True when the last split ended inside a quoted literal.
    pub fn in_quote(&self) -> bool {
        self.in_quote
    }

    /// True when every `(` seen by the last nesting-aware split was closed,
    /// and no `)` came before its `(`.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.underflow
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

    /// An apostrophe is escaped when the character right before it is a backslash.
    fn is_escaped(&self) -> bool {
        self.position > 0 && self.input[self.position - 1] == '\\'
    }
}

/// Splits a `VALUES` list such as `(1, 'a'), (2, 'b')` into its tuples.
///
/// Returned tuples are stripped of their enclosing parentheses. An empty or
/// all-whitespace list yields no tuples.
///
/// # Errors
/// Returns a message when a quote is left open, parentheses do not balance,
/// or a top-level piece is not exactly one parenthesized tuple.
pub fn split_tuples(list: &str) -> Result<Vec<String>, String> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut scanner = TupleScanner::new(list);
    let pieces = scanner.split(',', true);
    if scanner.in_quote() {
        return Err("unterminated quoted literal".to_string());
    }
    if !scanner.is_balanced() {
        return Err("unbalanced parentheses in the value list".to_string());
    }

    pieces
        .iter()
        .map(|piece| {
            strip_parens(piece)
                .map(str::to_string)
                .ok_or_else(|| format!("expected a parenthesized tuple, found `{}`", piece.trim()))
        })
        .collect()
}

/// Splits the inside of one tuple into raw literal tokens.
///
/// Only quoting protects a comma here; parentheses are not tracked. Tokens
/// are trimmed but keep their quotes.
pub fn split_values(tuple: &str) -> Vec<String> {
    if tuple.trim().is_empty() {
        return Vec::new();
    }
    TupleScanner::new(tuple)
        .split(',', false)
        .into_iter()
        .map(|token| token.trim().to_string())
        .collect()
}

/// Scans a whole `VALUES` list into typed rows.
///
/// # Errors
/// Fails the same way as [split_tuples].
pub fn scan_tuples(list: &str) -> Result<Vec<Vec<Value>>, String> {
    let tuples = split_tuples(list)?;
    Ok(tuples
        .iter()
        .map(|tuple| {
            split_values(tuple)
                .iter()
                .map(|token| parse_literal(token))
                .collect()
        })
        .collect())
}

/// Returns the inside of `(...)` when the opening parenthesis is closed by
/// the last character of the piece, and not before.
fn strip_parens(piece: &str) -> Option<&str> {
    let inner = piece.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut scanner = TupleScanner::new(inner);
    scanner.split(',', true);
    (!scanner.in_quote() && scanner.is_balanced()).then_some(inner)
}
