use serde_json::Value;
use thiserror::Error;

use crate::models::NutritionDelta;

/// Failure to get a usable payload out of a model response.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No JSON-shaped substring anywhere in the response text.
    #[error("no JSON object found in model response")]
    NotFound,
    /// A candidate substring was found but does not decode as JSON.
    #[error("model response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Best-effort extraction of a single JSON object from model output.
///
/// Strips Markdown code-fence markers, then returns the substring from the
/// first `{` to the last `}`. Deliberately permissive rather than a balanced
/// parse: the model is not contract-bound to emit pure JSON, so prose around
/// the object is tolerated and downstream decoding decides whether the
/// candidate is usable.
pub fn extract_json(raw: &str) -> Option<String> {
    let text = raw.replace("```json", "").replace("```", "");
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(text[start..=end].to_string())
}

/// Decode a meal-analyzer payload.
///
/// Fields are individually optional: absent or non-numeric values become 0
/// instead of failing the entry, so partial information still gets logged.
pub fn validate_nutrition(candidate: &str) -> Result<NutritionDelta, ParseError> {
    let value: Value = serde_json::from_str(candidate)?;
    Ok(NutritionDelta {
        calories: field_or_zero(&value, "calories"),
        protein_g: field_or_zero(&value, "protein_g"),
        carbs_g: field_or_zero(&value, "carbs_g"),
        fats_g: field_or_zero(&value, "fats_g"),
    })
}

/// Decode a workout-analyzer payload into estimated kcal burned.
pub fn validate_workout(candidate: &str) -> Result<f64, ParseError> {
    let value: Value = serde_json::from_str(candidate)?;
    Ok(field_or_zero(&value, "calories_burned"))
}

/// Extract and validate a meal response in one step.
pub fn parse_nutrition(raw: &str) -> Result<NutritionDelta, ParseError> {
    let candidate = extract_json(raw).ok_or(ParseError::NotFound)?;
    validate_nutrition(&candidate)
}

/// Extract and validate a workout response in one step.
pub fn parse_workout(raw: &str) -> Result<f64, ParseError> {
    let candidate = extract_json(raw).ok_or(ParseError::NotFound)?;
    validate_workout(&candidate)
}

// The model occasionally sends numbers as strings; accept both.
fn field_or_zero(value: &Value, key: &str) -> f64 {
    value
        .get(key)
        .and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .unwrap_or(0.0)
}
