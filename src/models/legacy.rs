//! Lenient readers for documents written before input validation existed.
//!
//! Older writers stored every number as a BSON double and could omit any
//! field. Integer fields accept int32, int64 or a finite double (truncated);
//! anything else, including a missing field or `null`, reads as zero.

use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer};

pub fn int64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<Bson>::deserialize(deserializer)?;
    Ok(match value {
        Some(Bson::Int32(n)) => i64::from(n),
        Some(Bson::Int64(n)) => n,
        Some(Bson::Double(f)) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    })
}

pub fn int32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let n = int64(deserializer)?;
    Ok(i32::try_from(n).unwrap_or(0))
}

/// Like `int64`/`int32` but for floats: ints widen, anything else reads as zero.
pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Bson>::deserialize(deserializer)?;
    Ok(match value {
        Some(Bson::Double(f)) => f,
        Some(Bson::Int32(n)) => f64::from(n),
        Some(Bson::Int64(n)) => n as f64,
        _ => 0.0,
    })
}

/// Strings; `null` or a non-string value reads as empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Bson>::deserialize(deserializer)?;
    Ok(match value {
        Some(Bson::String(s)) => s,
        _ => String::new(),
    })
}
