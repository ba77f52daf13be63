//! Two-stage parsing of rewrite-model output.
//!
//! Models asked for "JSON only" still wrap answers in markdown fences or
//! surrounding prose often enough that a strict parse alone loses usable
//! rewrites. Parsing is therefore staged: strict `serde_json` first, then a
//! lenient pass that strips code fences and finally falls back to the
//! outermost brace-delimited object. Anything still unparsable is a typed
//! error, never a panic or a raw dynamic map.

use crate::domain::entities::RewriteResult;

/// Why a rewrite response could not be turned into a [`RewriteResult`].
#[derive(Debug, thiserror::Error)]
pub enum RewriteParseError {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("response JSON does not match the expected shape: {0}")]
    InvalidShape(#[from] serde_json::Error),

    #[error("rewrite contained no instructions")]
    EmptyMethod,
}

/// Parses raw model output into a typed [`RewriteResult`].
///
/// # Errors
///
/// Returns [`RewriteParseError`] when no stage yields a result with at least
/// one rewritten instruction.
pub fn parse_rewrite_response(raw: &str) -> Result<RewriteResult, RewriteParseError> {
    let trimmed = raw.trim();

    let result = match parse_strict(trimmed) {
        Ok(result) => result,
        Err(_) => parse_lenient(trimmed)?,
    };

    if result.method_rewritten.is_empty() {
        return Err(RewriteParseError::EmptyMethod);
    }

    Ok(result)
}

/// Stage one: the text is exactly the expected JSON object.
fn parse_strict(text: &str) -> Result<RewriteResult, serde_json::Error> {
    serde_json::from_str(text)
}

/// Stage two: strip markdown fences, then fall back to the outermost
/// brace-delimited slice.
fn parse_lenient(text: &str) -> Result<RewriteResult, RewriteParseError> {
    let unfenced = strip_code_fences(text);
    if let Ok(result) = parse_strict(unfenced.trim()) {
        return Ok(result);
    }

    let start = text.find('{').ok_or(RewriteParseError::NoJsonObject)?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or(RewriteParseError::NoJsonObject)?;

    Ok(parse_strict(&text[start..=end])?)
}

/// Removes a surrounding markdown code fence, with or without a `json`
/// language tag. Returns the input unchanged when no fence is present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);

    match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    }
}
