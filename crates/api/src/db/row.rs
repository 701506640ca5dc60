//! Conversion of untyped result rows into ordered JSON mappings.
//!
//! Column values are decoded by their `PostgreSQL` type name. `NUMERIC` is
//! rendered as a decimal string so no precision is lost, timestamps as
//! ISO-8601 text, `JSON`/`JSONB` as embedded JSON and one-dimensional arrays
//! of the scalar types as JSON arrays.
//!
//! Types outside that set are read as text when the driver allows it and are
//! `null` otherwise (`INTERVAL`, `INET`, multi-dimensional arrays, `NUMERIC`
//! values beyond 28 significant digits or `NaN`). Each such value is logged
//! at `warn`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{Column, Postgres, Row as _, TypeInfo, ValueRef};
use uuid::Uuid;

use orderdesk_core::Row;

/// Zip a row's column names with its decoded values.
#[must_use]
pub fn row_to_map(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .map(|column| {
            let value = column_value(row, column.ordinal(), column.type_info().name());
            (column.name().to_owned(), value)
        })
        .collect()
}

fn column_value(row: &PgRow, index: usize, type_name: &str) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(index, error = %e, "Failed to read column");
            return Value::Null;
        }
    }

    let decoded = match type_name {
        "BOOL" => row.try_get::<bool, _>(index).map(Value::from),
        "INT2" => row.try_get::<i16, _>(index).map(Value::from),
        "INT4" => row.try_get::<i32, _>(index).map(Value::from),
        "INT8" => row.try_get::<i64, _>(index).map(Value::from),
        "FLOAT4" => row.try_get::<f32, _>(index).map(Value::from),
        "FLOAT8" => row.try_get::<f64, _>(index).map(Value::from),
        "NUMERIC" => row
            .try_get::<Decimal, _>(index)
            .map(|d| Value::String(d.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(|ts| Value::String(ts.to_rfc3339())),
        "TIMESTAMP" => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|ts| Value::String(format_naive_timestamp(ts))),
        "DATE" => row
            .try_get::<NaiveDate, _>(index)
            .map(|d| Value::String(d.to_string())),
        "TIME" => row
            .try_get::<NaiveTime, _>(index)
            .map(|t| Value::String(t.to_string())),
        "UUID" => row
            .try_get::<Uuid, _>(index)
            .map(|id| Value::String(id.to_string())),
        "JSON" | "JSONB" => row.try_get::<Value, _>(index),
        "BOOL[]" => array_value::<bool>(row, index, Value::from),
        "INT2[]" => array_value::<i16>(row, index, Value::from),
        "INT4[]" => array_value::<i32>(row, index, Value::from),
        "INT8[]" => array_value::<i64>(row, index, Value::from),
        "FLOAT4[]" => array_value::<f32>(row, index, Value::from),
        "FLOAT8[]" => array_value::<f64>(row, index, Value::from),
        "NUMERIC[]" => array_value::<Decimal>(row, index, |d| Value::String(d.to_string())),
        "UUID[]" => array_value::<Uuid>(row, index, |id| Value::String(id.to_string())),
        "TEXT[]" | "VARCHAR[]" | "CHAR[]" | "NAME[]" => {
            array_value::<String>(row, index, Value::String)
        }
        // TEXT, VARCHAR, BPCHAR, NAME and anything else text-compatible
        _ => row.try_get::<String, _>(index).map(Value::String),
    };

    decoded.unwrap_or_else(|e| {
        tracing::warn!(index, type_name, error = %e, "Unsupported column value, returning null");
        Value::Null
    })
}

/// Decode a one-dimensional array column into a JSON array.
///
/// `NULL` elements stay `null`.
fn array_value<T>(
    row: &PgRow,
    index: usize,
    element: impl Fn(T) -> Value,
) -> Result<Value, sqlx::Error>
where
    Vec<Option<T>>: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Vec<Option<T>>, _>(index).map(|items| {
        items
            .into_iter()
            .map(|item| item.map_or(Value::Null, &element))
            .collect()
    })
}

/// ISO-8601 without an offset, e.g. `2026-01-05T09:30:00.250`.
fn format_naive_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
