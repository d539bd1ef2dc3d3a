//! Best-effort recovery of slide records from generated text.
//!
//! Generation output arrives in three shapes: fenced, well-formed, or cut
//! off mid-stream when the token budget ran out. The last case is the
//! interesting one - every complete slide object ahead of the truncation
//! point is still recoverable by scanning the `"slides"` array with a
//! brace-depth counter and parsing each balanced object in isolation.

use serde::Deserialize;

use super::slides::SlideRecord;

/// Slide object as it appears on the wire, before normalization. Everything
/// but the title is optional.
#[derive(Debug, Deserialize)]
struct RawSlide {
    title: Option<String>,
    #[serde(default)]
    bullets: Vec<String>,
    #[serde(default)]
    image_prompt: Option<String>,
    #[serde(default)]
    speaker_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeckDto {
    slides: Vec<RawSlide>,
}

impl RawSlide {
    /// Applies the documented defaults. A slide without a title is dropped,
    /// never defaulted.
    fn normalize(self) -> Option<SlideRecord> {
        let title = self.title?;
        let image_prompt = self.image_prompt.unwrap_or_else(|| title.clone());
        Some(SlideRecord {
            title,
            bullets: self.bullets,
            image_prompt,
            speaker_notes: self.speaker_notes.unwrap_or_default(),
        })
    }
}

/// Extracts slide records from possibly-truncated generation output.
///
/// Returns `None` when nothing can be recovered - the caller must treat
/// that as a failed generation, not an empty deck.
pub fn recover_slides(raw: &str) -> Option<Vec<SlideRecord>> {
    let text = strip_code_fence(raw);

    if let Ok(deck) = serde_json::from_str::<DeckDto>(text) {
        let slides: Vec<SlideRecord> = deck
            .slides
            .into_iter()
            .filter_map(RawSlide::normalize)
            .collect();
        return if slides.is_empty() { None } else { Some(slides) };
    }

    // The document did not parse as a whole; walk the slides array and
    // salvage every balanced object ahead of the truncation point.
    let slides_key = text.find("\"slides\"")?;
    let array_start = text[slides_key..].find('[')? + slides_key;

    let mut slides = Vec::new();
    for candidate in balanced_objects(&text[array_start + 1..]) {
        if let Ok(raw_slide) = serde_json::from_str::<RawSlide>(candidate) {
            if let Some(record) = raw_slide.normalize() {
                slides.push(record);
            }
        }
    }

    if slides.is_empty() {
        None
    } else {
        Some(slides)
    }
}

/// Strips a leading ``` or ```json fence and the matching trailing fence.
fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Yields every balanced `{...}` substring at nesting depth zero.
///
/// The scan tracks double-quote state and backslash escapes, so braces
/// embedded in quoted text do not disturb the depth count. An unterminated
/// trailing object simply never closes and is not yielded.
fn balanced_objects(text: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(from) = start.take() {
                            objects.push(&text[from..index + 1]);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    objects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_objects_splits_siblings() {
        let objects = balanced_objects(r#"{"a": 1}, {"b": {"c": 2}}, {"d""#);
        assert_eq!(objects, vec![r#"{"a": 1}"#, r#"{"b": {"c": 2}}"#]);
    }

    #[test]
    fn braces_inside_strings_do_not_split() {
        let objects = balanced_objects(r#"{"title": "curly } brace"}, {"title": "ok"}"#);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0], r#"{"title": "curly } brace"}"#);
    }

    #[test]
    fn escaped_quote_keeps_string_state() {
        let objects = balanced_objects(r#"{"title": "say \"hi\" {now}"}"#);
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn fence_with_language_tag_is_stripped() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("{}"), "{}");
    }
}
