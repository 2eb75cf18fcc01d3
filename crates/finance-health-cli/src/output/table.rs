use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{scalar_to_string, REPORT_FIELDS};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let Some(result) = value.get("result") else {
        println!("{}", value);
        return;
    };

    if let (Some(current), Some(what_if)) = (result.get("current"), result.get("what_if")) {
        println!("{}", comparison_table(current, what_if, result));
    } else {
        println!("{}", report_table(result));
        print_findings(result);
    }

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn report_table(report: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for field in REPORT_FIELDS {
        let cell = report.get(field).map(scalar_to_string).unwrap_or_default();
        builder.push_record([field.to_string(), cell]);
    }
    builder.build()
}

fn comparison_table(current: &Value, what_if: &Value, result: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Current", "What-if"]);
    for field in REPORT_FIELDS {
        let cell = |report: &Value| report.get(field).map(scalar_to_string).unwrap_or_default();
        builder.push_record([field.to_string(), cell(current), cell(what_if)]);
    }
    let change = result
        .get("score_change")
        .map(scalar_to_string)
        .unwrap_or_default();
    builder.push_record(["score_change".to_string(), String::new(), change]);
    builder.build()
}

fn print_findings(report: &Value) {
    if let Some(Value::Array(issues)) = report.get("issues") {
        if !issues.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Severity", "Issue"]);
            for issue in issues {
                builder.push_record([
                    issue.get("category").map(scalar_to_string).unwrap_or_default(),
                    issue.get("severity").map(scalar_to_string).unwrap_or_default(),
                    issue.get("description").map(scalar_to_string).unwrap_or_default(),
                ]);
            }
            println!("\n{}", builder.build());
        }
    }

    if let Some(Value::Array(recs)) = report.get("recommendations") {
        if !recs.is_empty() {
            println!("\nRecommendations:");
            for rec in recs {
                if let Some(Value::String(msg)) = rec.get("message") {
                    println!("  - {}", msg);
                }
            }
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_table_lists_every_field() {
        let report = json!({
            "status": "Analyzed",
            "income": "5000",
            "health_score": 50
        });
        let rendered = report_table(&report).to_string();
        for field in REPORT_FIELDS {
            assert!(rendered.contains(field), "missing {field}");
        }
        assert!(rendered.contains("Analyzed"));
        assert!(rendered.contains("50"));
    }

    #[test]
    fn test_comparison_table_has_score_change() {
        let rendered = comparison_table(
            &json!({"health_score": 50}),
            &json!({"health_score": 80}),
            &json!({"score_change": 30}),
        )
        .to_string();
        assert!(rendered.contains("What-if"));
        assert!(rendered.contains("score_change"));
        assert!(rendered.contains("30"));
    }
}
