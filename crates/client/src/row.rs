// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Result;
use crate::error::Error;
use crate::schema::Schema;
use tessera_type::Value;

/// A row in which any subset of columns may hold a value.
///
/// Scan setup materializes predicate operands into partial rows before
/// encoding them as keys; only the columns a key needs are ever set.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialRow<'a> {
    schema: &'a Schema,
    values: Vec<Option<Value>>,
}

impl<'a> PartialRow<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self { schema, values: vec![None; schema.columns().len()] }
    }

    /// The schema the row was created against.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Sets the column to the given value. The value's type must match the
    /// column's declared type.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let column = self.schema.column(index)?;
        if value.ty() != column.ty {
            return Err(Error::TypeMismatch {
                column: column.name.clone(),
                expected: column.ty,
                actual: value.ty(),
            });
        }
        self.values[index] = Some(value);
        Ok(())
    }

    /// Sets the column to the smallest value of its type under key ordering.
    pub fn set_min(&mut self, index: usize) -> Result<()> {
        let column = self.schema.column(index)?;
        self.values[index] = Some(Value::min_of(column.ty));
        Ok(())
    }

    /// The column's value, if one is set.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Whether the column holds a value.
    pub fn is_set(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Steps the column's value to its immediate successor under key
    /// ordering. Returns false when the value was the type's maximum and
    /// wrapped around to the minimum.
    ///
    /// Variable-length values have no maximum: the successor of a byte
    /// string is itself with a single 0x00 appended.
    pub fn increment_column(&mut self, index: usize) -> Result<bool> {
        let column = self.schema.column(index)?;
        let value = self.values[index]
            .as_mut()
            .ok_or_else(|| Error::ColumnNotSet { column: column.name.clone() })?;
        let incremented = match value {
            Value::Bool(v) => {
                let wrapped = *v;
                *v = !*v;
                !wrapped
            }
            Value::Int1(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Int2(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Int4(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Int8(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Uint1(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Uint2(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Uint4(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Uint8(v) => {
                let (next, overflowed) = v.overflowing_add(1);
                *v = next;
                !overflowed
            }
            Value::Float4(v) => {
                if v.0 == f32::INFINITY {
                    v.0 = f32::NEG_INFINITY;
                    false
                } else {
                    v.0 = v.0.next_up();
                    true
                }
            }
            Value::Float8(v) => {
                if v.0 == f64::INFINITY {
                    v.0 = f64::NEG_INFINITY;
                    false
                } else {
                    v.0 = v.0.next_up();
                    true
                }
            }
            Value::Utf8(v) => {
                v.push('\0');
                true
            }
            Value::Blob(v) => {
                v.push(0x00);
                true
            }
        };
        Ok(incremented)
    }
}
