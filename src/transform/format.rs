use serde::Deserialize;
use serde_json::{Number, Value, json};

use super::OutputFormat;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const MARKDOWN_HEADING: &str = "# Optimized Output";
const BULLET: &str = "• ";

/// Wrap text in the chosen envelope. JSON, XML and Table use the trimmed text.
pub fn format_output(text: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::PlainText => text.to_string(),
        OutputFormat::Markdown => format!("{}\n\n{}", MARKDOWN_HEADING, text),
        OutputFormat::Json => to_json(text.trim()),
        OutputFormat::Xml => format!(
            "{}\n<output>\n  <content>{}</content>\n</output>",
            XML_DECLARATION,
            escape_xml(text.trim())
        ),
        OutputFormat::BulletedList => text
            .split('\n')
            .map(|line| format!("{}{}", BULLET, line))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => format!("| Content |\n|----------|\n| {} |", text.trim()),
    }
}

/// Re-indent valid JSON, otherwise wrap the text as `{"content": ...}`.
fn to_json(text: &str) -> String {
    let value = parse_json(text)
        .map(normalize_numbers)
        .unwrap_or_else(|_| json!({ "content": text }));
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string())
}

/// Parse a complete JSON document with no nesting limit.
fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// Rewrite numbers the way they read back as doubles: integral values lose
/// their fraction and exponent, values outside the `f64` range become `null`.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => normalize_number(&n),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Largest magnitude still printed without an exponent.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

fn normalize_number(n: &Number) -> Value {
    let Ok(x) = n.to_string().parse::<f64>() else {
        return Value::Number(n.clone());
    };
    if !x.is_finite() {
        return Value::Null;
    }
    if x == 0.0 {
        return Value::Number(Number::from(0));
    }
    let number = if x.fract() == 0.0 && x.abs() < PLAIN_INTEGER_LIMIT {
        x.to_string().parse::<Number>().ok()
    } else {
        Number::from_f64(x)
    };
    number.map(Value::Number).unwrap_or(Value::Null)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_identity() {
        assert_eq!(format_output(" as is \n", OutputFormat::PlainText), " as is \n");
        assert_eq!(format_output("", OutputFormat::PlainText), "");
    }

    #[test]
    fn test_json_reindents_valid_json() {
        let out = format_output(r#"{"b":2,"a":[1,true]}"#, OutputFormat::Json);
        assert_eq!(out, "{\n  \"b\": 2,\n  \"a\": [\n    1,\n    true\n  ]\n}");
    }

    #[test]
    fn test_json_prints_integral_floats_as_integers() {
        assert_eq!(
            format_output(r#"{"a":1.0,"b":1e2,"c":-0.0,"d":2.5}"#, OutputFormat::Json),
            "{\n  \"a\": 1,\n  \"b\": 100,\n  \"c\": 0,\n  \"d\": 2.5\n}"
        );
    }

    #[test]
    fn test_json_out_of_range_number_is_null() {
        assert_eq!(format_output("1e400", OutputFormat::Json), "null");
        assert_eq!(
            format_output("[1e400, -1e400]", OutputFormat::Json),
            "[\n  null,\n  null\n]"
        );
    }

    #[test]
    fn test_json_deep_nesting_is_not_wrapped() {
        let depth = 200;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let out = format_output(&input, OutputFormat::Json);
        assert!(out.starts_with("[\n  ["));
        assert!(!out.contains("content"));
        assert_eq!(out.matches('[').count(), depth);
    }

    #[test]
    fn test_json_trailing_garbage_is_wrapped() {
        assert_eq!(
            format_output("{} extra", OutputFormat::Json),
            "{\n  \"content\": \"{} extra\"\n}"
        );
    }

    #[test]
    fn test_json_wraps_plain_text() {
        assert_eq!(
            format_output("  hello ", OutputFormat::Json),
            "{\n  \"content\": \"hello\"\n}"
        );
        assert_eq!(
            format_output("", OutputFormat::Json),
            "{\n  \"content\": \"\"\n}"
        );
    }

    #[test]
    fn test_json_escapes_wrapped_quotes() {
        let out = format_output("say \"hi\"\nbye", OutputFormat::Json);
        assert_eq!(out, "{\n  \"content\": \"say \\\"hi\\\"\\nbye\"\n}");
    }

    #[test]
    fn test_xml_uses_output_wrapper() {
        assert_eq!(
            format_output(" hi ", OutputFormat::Xml),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<output>\n  <content>hi</content>\n</output>"
        );
    }

    #[test]
    fn test_xml_escapes_markup() {
        let out = format_output("a < b & c > d", OutputFormat::Xml);
        assert!(out.contains("<content>a &lt; b &amp; c &gt; d</content>"));
    }

    #[test]
    fn test_markdown_heading() {
        assert_eq!(
            format_output("body", OutputFormat::Markdown),
            "# Optimized Output\n\nbody"
        );
    }

    #[test]
    fn test_bulleted_list_prefixes_each_line() {
        let out = format_output("one\ntwo\nthree", OutputFormat::BulletedList);
        assert_eq!(out, "• one\n• two\n• three");
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_table_single_row() {
        assert_eq!(
            format_output(" row ", OutputFormat::Table),
            "| Content |\n|----------|\n| row |"
        );
    }
}
