//! Pulling structured data out of model responses.
//!
//! Models wrap JSON in markdown fences or surround it with chatter. These
//! helpers find the JSON and parse it, tagging failures with the stage that
//! produced the response.

use panelwright_error::{PanelwrightResult, PipelineError, PipelineErrorKind};

/// Find the JSON document in a model response.
///
/// Tried in order: a ```` ```json ```` fence, any other fence, then the
/// first balanced `{...}` or `[...]`, whichever opens first.
///
/// # Errors
///
/// Returns `PipelineErrorKind::MissingJson` when nothing JSON-shaped is found.
///
/// # Examples
///
/// ```
/// use panelwright_pipeline::extract_json;
///
/// let response = "Here is the script:\n```json\n{\"title\": \"Sharing Day\"}\n```\nEnjoy!";
/// assert_eq!(extract_json("script_generator", response).unwrap(), "{\"title\": \"Sharing Day\"}");
/// ```
pub fn extract_json(stage: &str, response: &str) -> PanelwrightResult<String> {
    if let Some(json) = find_json(response) {
        return Ok(json);
    }

    tracing::error!(stage, response_length = response.len(), "No JSON found in model response");
    Err(PipelineError::new(PipelineErrorKind::MissingJson {
        stage: stage.to_string(),
        length: response.len(),
    })
    .into())
}

/// Like [`extract_json`] but without an error for plain chat replies.
pub fn find_json(response: &str) -> Option<String> {
    if let Some(block) = fenced_block(response) {
        return Some(block.content.to_string());
    }

    let bracket = response.find('[');
    let brace = response.find('{');
    match (bracket, brace) {
        (Some(b), Some(c)) if b < c => {
            balanced(response, '[', ']').or_else(|| balanced(response, '{', '}'))
        }
        (Some(_), None) => balanced(response, '[', ']'),
        _ => balanced(response, '{', '}').or_else(|| balanced(response, '[', ']')),
    }
}

/// Remove the first fenced code block from a reply, leaving the prose.
///
/// # Examples
///
/// ```
/// use panelwright_pipeline::strip_fenced_block;
///
/// let reply = "Great, let's make it!\n```json\n{\"lesson\": \"sharing\"}\n```";
/// assert_eq!(strip_fenced_block(reply), "Great, let's make it!");
/// ```
pub fn strip_fenced_block(response: &str) -> String {
    match fenced_block(response) {
        Some(block) => {
            let mut text = String::with_capacity(response.len());
            text.push_str(&response[..block.start]);
            text.push_str(&response[block.end..]);
            text.trim().to_string()
        }
        None => response.trim().to_string(),
    }
}

/// Deserialize extracted JSON.
///
/// # Errors
///
/// Returns `PipelineErrorKind::MalformedOutput` when the JSON does not fit `T`.
pub fn parse_json<T>(stage: &str, json: &str) -> PanelwrightResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::error!(stage, error = %e, json_preview = %preview, "JSON parsing failed");

        PipelineError::new(PipelineErrorKind::MalformedOutput {
            stage: stage.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

struct FencedBlock<'a> {
    start: usize,
    end: usize,
    content: &'a str,
}

/// First ```` ``` ```` block, preferring one tagged `json`. An unclosed fence
/// runs to the end of the response.
fn fenced_block(response: &str) -> Option<FencedBlock<'_>> {
    let start = response
        .find("```json")
        .or_else(|| response.find("```"))?;
    let after_fence = start + 3;
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(response.len());

    let (content_end, end) = match response[content_start..].find("```") {
        Some(close) => (content_start + close, content_start + close + 3),
        None => (response.len(), response.len()),
    };

    Some(FencedBlock {
        start,
        end,
        content: response[content_start..content_end].trim(),
    })
}

/// First `open ... close` span with nesting, ignoring delimiters in strings.
fn balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
