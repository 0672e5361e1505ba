//! Writing result tables to disk

use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;
use serde_json::{json, Map, Value};

use crate::errors::{ProbeError, ProbeResult};

use super::AttributeTable;

impl AttributeTable {
    /// Save the table to a file in the specified format
    ///
    /// # Arguments
    /// * `path` - Path to save the file
    /// * `format` - Format to use ("csv" or "json")
    pub fn save_to_file(&self, path: &str, format: &str) -> ProbeResult<()> {
        info!("Writing {}x{} table to {} as {}", self.row_count(), self.column_count(), path, format);

        match format.to_lowercase().as_str() {
            "csv" => self.save_as_csv(path),
            "json" => self.save_as_json(path),
            _ => Err(ProbeError::Configuration(format!("Unsupported table format: {}", format))),
        }
    }

    /// Write the table as CSV. NaN cells are left empty.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> ProbeResult<()> {
        write!(writer, "id")?;
        for column in self.columns() {
            write!(writer, ",{}", csv_field(&column.name))?;
        }
        writeln!(writer)?;

        for (row, id) in self.ids().iter().enumerate() {
            write!(writer, "{}", id)?;
            for column in self.columns() {
                let value = column.values[row];
                if value.is_nan() {
                    write!(writer, ",")?;
                } else {
                    write!(writer, ",{}", value)?;
                }
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn save_as_csv(&self, path: &str) -> ProbeResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// JSON form: an array of row objects, NaN written as null
    pub fn to_json(&self) -> Value {
        let rows = self.ids().iter().enumerate().map(|(row, id)| {
            let mut object = Map::new();
            object.insert("id".to_string(), json!(id));
            for column in self.columns() {
                // serde_json maps non-finite floats to null
                object.insert(column.name.clone(), json!(column.values[row]));
            }
            Value::Object(object)
        }).collect();

        Value::Array(rows)
    }

    fn save_as_json(&self, path: &str) -> ProbeResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn csv_field(name: &str) -> String {
    if name.contains(',') || name.contains('"') {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}
