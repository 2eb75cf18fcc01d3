use serde_json::Value;

use super::scalar_to_string;

/// Print just the key answer: the health score, or the score change for a
/// what-if comparison. Rejected analyses print their message instead.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result = value.get("result").unwrap_or(value);

    if let Some(change) = result.get("score_change") {
        return scalar_to_string(change);
    }
    if result.get("status").and_then(Value::as_str) == Some("Rejected") {
        return result.get("message").map(scalar_to_string).unwrap_or_default();
    }
    match result.get("health_score") {
        Some(score) => scalar_to_string(score),
        None => scalar_to_string(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_only() {
        let value = json!({"result": {"status": "Analyzed", "health_score": 75}});
        assert_eq!(minimal_answer(&value), "75");
    }

    #[test]
    fn test_rejected_prints_message() {
        let value = json!({"result": {
            "status": "Rejected",
            "health_score": 0,
            "message": "Income must be greater than 0 to analyse finances."
        }});
        assert_eq!(
            minimal_answer(&value),
            "Income must be greater than 0 to analyse finances."
        );
    }

    #[test]
    fn test_comparison_prints_change() {
        let value = json!({"result": {"score_change": -10}});
        assert_eq!(minimal_answer(&value), "-10");
    }
}
