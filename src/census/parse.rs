use serde_json::Value;

use crate::{error::LookupError, types::BlockId};

/// Extract the block identifier from a geocoding response of the form
/// `{"Block": {"FIPS": "160010101001000", ...}, ...}`.
pub fn parse_block_response(body: &Value) -> Result<BlockId, LookupError> {
    let fips = body.pointer("/Block/FIPS")
        .ok_or_else(|| LookupError::Parse("geocoding response has no Block.FIPS".into()))?;

    match fips {
        Value::String(id) => BlockId::parse(id),
        Value::Null => Err(LookupError::Parse("point is not inside any census block".into())),
        other => Err(LookupError::Parse(format!("Block.FIPS is not a string: {other}"))),
    }
}

/// Read the value at row 1, column 0 of a statistics table
/// (row 0 is the header, e.g. `[["P1_001N","state",...],["42","16",...]]`).
pub fn parse_count_table(body: &Value) -> Result<u64, LookupError> {
    let cell = body.get(1).and_then(|row| row.get(0))
        .ok_or_else(|| LookupError::Parse("statistics response has no data row".into()))?;

    // The service returns counts as strings; accept bare numbers too.
    let count = match cell {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };

    count.ok_or_else(|| LookupError::Parse(format!("expected a non-negative integer, got {cell}")))
}
