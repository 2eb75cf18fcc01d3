use colored::Colorize;
use serde_json::Value;

/// Print the human-readable report message(s).
///
/// A single analysis prints its message; a what-if comparison prints both
/// reports under headings followed by the score change.
pub fn print_text(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    if let Some(message) = result.get("message").and_then(Value::as_str) {
        println!("{}", message);
    } else if let (Some(current), Some(what_if)) = (result.get("current"), result.get("what_if"))
    {
        println!("--- Current Situation Analysis ---");
        println!("{}", message_of(current));
        println!("\n--- What-If Scenario Result ---");
        println!("{}", message_of(what_if));
        if let Some(change) = result.get("score_change").and_then(Value::as_i64) {
            println!("\n{}", describe_change(change));
        }
    } else {
        println!("{}", value);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings.iter().filter_map(Value::as_str) {
            eprintln!("{}: {}", "warning".yellow().bold(), w);
        }
    }
}

fn message_of(report: &Value) -> &str {
    report.get("message").and_then(Value::as_str).unwrap_or("")
}

fn describe_change(change: i64) -> String {
    match change {
        0 => "Health score unchanged.".to_string(),
        c if c > 0 => format!("Health score improves by {} points.", c),
        c => format!("Health score drops by {} points.", -c),
    }
}
