/// Builds the extraction prompt and leniently parses the model's reply.
///
/// The model is asked for a bare JSON object, but real replies arrive fenced
/// in markdown, wrapped in prose, or occasionally as plain text. Parsing
/// never fails: anything unusable becomes `Value::Null`, which the
/// normalizer treats as an empty record.
use serde_json::Value;

/// Matches the original intake flow: low temperature for stable field
/// extraction.
pub const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Instruction sent as the single user message for an analyze request.
pub fn extraction_prompt(input: &str) -> String {
    format!(
        "Convert the fabric sourcing request below into a JSON object with exactly these keys: \
fabric_type, intended_use, quality_level, color_or_pattern, weight_or_thickness, quantity, budget. \
Every value must be a short string. Use \"Not specified\" for anything the request does not state. \
Return only the JSON object, with no explanation and no code fences.\n\n\
REQUEST:\n{input}"
    )
}

/// Parse the model reply into a raw spec record.
///
/// Tries the whole reply first, then the outermost `{...}` slice (which
/// strips code fences and surrounding prose). Returns `Value::Null` when
/// neither parses.
pub fn parse_model_output(reply: &str) -> Value {
    let trimmed = reply.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return value;
            }
        }
    }

    Value::Null
}
