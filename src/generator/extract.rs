// src/generator/extract.rs

/// Narrows raw generator output to a JSON candidate.
///
/// Best-effort recovery, not a parser: strips the first fenced code block
/// wrapper if one is present (the fence may carry a language tag), then
/// cuts to the substring between the first `{` and the last `}`. Content
/// with no recoverable object comes back trimmed as-is and is left for
/// the JSON parser to reject.
pub fn extract_json(content: &str) -> &str {
    let mut text = content;

    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        if let Some(end) = rest.find("```") {
            text = rest[..end].trim();
        }
    } else if let Some(start) = text.find("```") {
        let rest = &text[start + "```".len()..];
        if let Some(end) = rest.find("```") {
            text = rest[..end].trim();
        }
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if close > open => &text[open..=close],
        _ => text.trim(),
    }
}
