use serde::{Deserialize, Serialize};

/// Who produced a transcript fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Model,
}

/// An incremental piece of transcribed text for one speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub speaker: Speaker,
    pub text: String,
    pub is_final: bool,
}

/// One utterance in the conversation history.
///
/// Immutable once `is_final` is true; while false it is the speaker's open
/// entry and its text may still be revised in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub is_final: bool,
}

/// Rolling conversation transcript.
///
/// Fragments are applied strictly in arrival order per speaker channel. A
/// fragment either revises the last entry (same speaker, not yet final) or
/// appends a new one, so partial results produce a single "typing" entry
/// instead of accumulating duplicates. At most one open entry per speaker
/// exists at any time.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an incoming fragment per the reconciliation rule.
    pub fn apply(&mut self, fragment: Fragment) {
        if let Some(last) = self.entries.last_mut() {
            if last.speaker == fragment.speaker && !last.is_final {
                last.text = fragment.text;
                last.is_final = fragment.is_final;
                return;
            }
        }
        self.entries.push(TranscriptEntry {
            speaker: fragment.speaker,
            text: fragment.text,
            is_final: fragment.is_final,
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<TranscriptEntry> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
