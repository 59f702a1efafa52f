use crate::column::Column;
use crate::error::StatementKind;
use crate::predicate::Predicate;
use crate::table::Row;

#[derive(Debug, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    InsertInto(InsertInto),
    Select(Select),
    DropTable(DropTable),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::InsertInto(_) => StatementKind::Insert,
            Self::Select(_) => StatementKind::Select,
            Self::DropTable(_) => StatementKind::DropTable,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<Column>,
}

/// `INSERT INTO` with its tuples already scanned into rows.
#[derive(Debug, PartialEq)]
pub struct InsertInto {
    pub table: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, PartialEq)]
pub enum ColumnsSelect {
    Star,
    ColumnsNames(Vec<String>),
}

#[derive(Debug, PartialEq)]
pub struct Select {
    pub columns: ColumnsSelect,
    pub table: String,
    pub where_clause: Option<Predicate>,
}

#[derive(Debug, PartialEq)]
pub struct DropTable {
    pub name: String,
}
