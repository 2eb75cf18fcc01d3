use serde_json::Value;
use std::io::{self, Write};

use super::{scalar_to_string, REPORT_FIELDS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Single report: `field,value` rows. Comparison: `field,current,what_if` rows.
fn write_csv<W: Write>(writer: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let result = value.get("result").unwrap_or(value);

    if let (Some(current), Some(what_if)) = (result.get("current"), result.get("what_if")) {
        wtr.write_record(["field", "current", "what_if"])?;
        for field in REPORT_FIELDS {
            wtr.write_record([
                field.to_string(),
                current.get(field).map(scalar_to_string).unwrap_or_default(),
                what_if.get(field).map(scalar_to_string).unwrap_or_default(),
            ])?;
        }
    } else {
        wtr.write_record(["field", "value"])?;
        for field in REPORT_FIELDS {
            let cell = result.get(field).map(scalar_to_string).unwrap_or_default();
            wtr.write_record([field.to_string(), cell])?;
        }
        if let Some(Value::Array(issues)) = result.get("issues") {
            for issue in issues {
                let desc = issue.get("description").map(scalar_to_string);
                wtr.write_record(["issue".to_string(), desc.unwrap_or_default()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
