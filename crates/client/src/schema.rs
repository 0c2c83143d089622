// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Result;
use crate::error::Error;
use crate::row::PartialRow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tessera_type::Type;

/// A stable column identifier, assigned by the master and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(pub u32);

impl Display for ColumnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A single column of a table schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// The column's stable id.
    pub id: ColumnId,
    /// The column's name, unique within the table.
    pub name: String,
    /// The column's declared type.
    pub ty: Type,
    /// Whether rows may leave the column unset.
    pub nullable: bool,
}

impl ColumnSchema {
    /// A non-nullable column with the given id, name, and type.
    pub fn new(id: u32, name: impl Into<String>, ty: Type) -> Self {
        Self { id: ColumnId(id), name: name.into(), ty, nullable: false }
    }

    /// Marks the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A table schema: an ordered list of columns, the first
/// `num_key_columns` of which form the primary key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
    num_key_columns: usize,
}

impl Schema {
    /// Builds a schema, rejecting duplicate ids or names, nullable primary
    /// key columns, and a key width outside the column list.
    pub fn new(columns: Vec<ColumnSchema>, num_key_columns: usize) -> Result<Self> {
        if num_key_columns == 0 || num_key_columns > columns.len() {
            return Err(Error::InvalidSchema(format!(
                "{num_key_columns} primary key columns out of {}",
                columns.len()
            )));
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(Error::InvalidSchema(format!("duplicate column id {}", column.id)));
            }
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::InvalidSchema(format!("duplicate column name {}", column.name)));
            }
            if i < num_key_columns && column.nullable {
                return Err(Error::NotNullable { column: column.name.clone() });
            }
        }
        Ok(Self { columns, num_key_columns })
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// The column at the given position.
    pub fn column(&self, index: usize) -> Result<&ColumnSchema> {
        self.columns.get(index).ok_or(Error::ColumnIndexOutOfBounds { index })
    }

    /// The column with the given id, if any.
    pub fn column_by_id(&self, id: ColumnId) -> Option<&ColumnSchema> {
        self.index_of_id(id).map(|index| &self.columns[index])
    }

    /// The column with the given name.
    pub fn column_by_name(&self, name: &str) -> Result<&ColumnSchema> {
        self.index_of_name(name)
            .map(|index| &self.columns[index])
            .ok_or_else(|| Error::UnknownColumn { name: name.to_string() })
    }

    /// The position of the column with the given id, if any.
    pub fn index_of_id(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// The position of the column with the given name, if any.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// How many leading columns form the primary key.
    pub fn num_key_columns(&self) -> usize {
        self.num_key_columns
    }

    /// A fresh row against this schema with no values set.
    pub fn new_row(&self) -> PartialRow<'_> {
        PartialRow::new(self)
    }
}
