// SPDX-License-Identifier: AGPL-3.0-or-later
// TopSel - Streaming Top-K Row Selection
// Copyright (C) 2026 Sushanth Reddy Vanagala (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Tabular text format
//!
//! Format: `name[count]{field:type,...}:\nkey,value,...\n...`
//!
//! Example:
//! ```text
//! tasks[3]{title:text,priority:int}:
//! t1,Write docs,2
//! t2,"Fix bug, urgent",1
//! t3,Review,null
//! ```
//!
//! Every row line starts with its unique key. An empty cell or the bare word
//! `null` is a missing value; quoted cells are always literal text.
//!
//! Inside quotes `""` is a literal quote. Since a row is a single line,
//! `\n`, `\r`, `\t` and `\\` escape line breaks, tabs and backslashes.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopSelError};
use crate::row::{Field, FieldType, Row, RowKey, Schema, Value};

/// A complete table (header + rows)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

/// A raw cell split out of a row line
struct Cell {
    text: String,
    quoted: bool,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Format as text
    pub fn format(&self) -> String {
        let mut output = self.schema.format_header(self.rows.len());
        for row in &self.rows {
            output.push('\n');
            output.push_str(&row.format());
        }
        output
    }

    /// Read and parse a table from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut text = self.format();
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Parse text into a table
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines().enumerate();

        let header = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or_else(|| TopSelError::parse(1, "empty input"))?;
        let schema = Self::parse_header(header.1).map_err(|m| TopSelError::parse(header.0 + 1, m))?;

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row = Self::parse_row(line, &schema).map_err(|m| TopSelError::parse(idx + 1, m))?;
            if !seen.insert(row.key.clone()) {
                return Err(TopSelError::parse(
                    idx + 1,
                    format!("duplicate row key '{}'", row.key),
                ));
            }
            rows.push(row);
        }

        Ok(Self { schema, rows })
    }

    fn parse_header(header: &str) -> std::result::Result<Schema, String> {
        // name[count]{field1:type,field2,...}:
        let header = header.trim().trim_end_matches(':');

        let bracket_start = header.find('[').ok_or("missing [")?;
        let bracket_end = header.find(']').ok_or("missing ]")?;
        let brace_start = header.find('{').ok_or("missing {")?;
        let brace_end = header.rfind('}').ok_or("missing }")?;
        if !(bracket_start < bracket_end && bracket_end < brace_start && brace_start < brace_end) {
            return Err("malformed header".to_string());
        }

        let name = header[..bracket_start].trim();
        header[bracket_start + 1..bracket_end]
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid count: {}", e))?;

        let mut schema = Schema::new(name);
        let fields_str = header[brace_start + 1..brace_end].trim();
        if fields_str.is_empty() {
            return Ok(schema);
        }
        for spec in fields_str.split(',').map(str::trim) {
            let (name, field_type) = match spec.split_once(':') {
                Some((name, ty)) => {
                    let field_type =
                        FieldType::parse(ty).ok_or_else(|| format!("unknown type '{}'", ty.trim()))?;
                    (name.trim(), field_type)
                }
                None => (spec, FieldType::Text),
            };
            if name.is_empty() {
                return Err("empty field name".to_string());
            }
            if schema.column_index(name).is_some() {
                return Err(format!("duplicate field '{}'", name));
            }
            schema.fields.push(Field {
                name: name.to_string(),
                field_type,
            });
        }
        Ok(schema)
    }

    fn parse_row(line: &str, schema: &Schema) -> std::result::Result<Row, String> {
        let mut cells = split_cells(line)?.into_iter();

        let key = cells.next().ok_or("missing row key")?;
        if key.text.is_empty() && !key.quoted {
            return Err("empty row key".to_string());
        }

        let cells: Vec<Cell> = cells.collect();
        if cells.len() != schema.len() {
            return Err(format!(
                "expected {} values, found {}",
                schema.len(),
                cells.len()
            ));
        }

        let values = cells
            .into_iter()
            .zip(&schema.fields)
            .map(|(cell, field)| parse_value(cell, field))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Row::new(RowKey::new(key.text), values))
    }
}

fn split_cells(line: &str) -> std::result::Result<Vec<Cell>, String> {
    let mut cells = Vec::new();
    let mut chars = line.chars().peekable();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        match ch {
            '"' if !in_quotes && current.trim().is_empty() && !quoted => {
                current.clear();
                in_quotes = true;
                quoted = true;
            }
            '"' if in_quotes => {
                if chars.next_if_eq(&'"').is_some() {
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '\\' if in_quotes => {
                let escaped = chars.next().ok_or("dangling escape")?;
                current.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    other => other,
                });
            }
            ',' if !in_quotes => {
                cells.push(finish_cell(&mut current, quoted));
                quoted = false;
            }
            _ if quoted && !in_quotes => {
                if !ch.is_whitespace() {
                    return Err("unexpected character after closing quote".to_string());
                }
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    cells.push(finish_cell(&mut current, quoted));
    Ok(cells)
}

fn finish_cell(current: &mut String, quoted: bool) -> Cell {
    let text = std::mem::take(current);
    let text = if quoted { text } else { text.trim().to_string() };
    Cell { text, quoted }
}

fn parse_value(cell: Cell, field: &Field) -> std::result::Result<Value, String> {
    if cell.quoted {
        return match field.field_type {
            FieldType::Text => Ok(Value::Text(cell.text)),
            _ => Err(format!("quoted value in {} column '{}'", field.field_type, field.name)),
        };
    }

    let s = cell.text.as_str();
    if s.is_empty() || s == "null" {
        return Ok(Value::Null);
    }

    match field.field_type {
        FieldType::Bool => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(format!("invalid bool in '{}': {}", field.name, s)),
        },
        FieldType::Int => s
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| format!("invalid int in '{}': {}", field.name, e)),
        FieldType::UInt => s
            .parse::<u64>()
            .map(Value::UInt)
            .map_err(|e| format!("invalid uint in '{}': {}", field.name, e)),
        FieldType::Float => s
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| format!("invalid float in '{}': {}", field.name, e)),
        FieldType::Text => Ok(Value::Text(cell.text)),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}
