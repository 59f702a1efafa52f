pub mod ast;
pub mod batch;
pub mod catalog;
pub mod column;
pub mod config;
pub mod database;
pub mod error;
pub mod parser;
pub mod predicate;
pub mod result;
pub mod table;
pub mod tokenizer;
pub mod value;

pub use batch::BatchError;
pub use catalog::Catalog;
pub use column::Column;
pub use config::EngineConfig;
pub use database::Database;
pub use error::{Error, ErrorKind, Result};
pub use result::QueryResult;
pub use table::{Row, Table};
pub use value::Value;
