use serde::{Deserialize, Serialize};

/// One slide of a generated deck, after normalization.
///
/// `title` is the only mandatory field in the generated payload; the rest
/// carry documented defaults (empty bullets, image prompt falling back to
/// the title, empty speaker notes). A deck is an ordered `Vec<SlideRecord>`
/// with no further cross-slide invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub title: String,
    pub bullets: Vec<String>,
    pub image_prompt: String,
    pub speaker_notes: String,
}
