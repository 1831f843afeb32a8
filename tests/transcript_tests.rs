// Tests for transcript reconciliation of partial/final fragments.

use creative_copilot::session::{Fragment, Speaker, Transcript};

fn fragment(speaker: Speaker, text: &str, is_final: bool) -> Fragment {
    Fragment {
        speaker,
        text: text.to_string(),
        is_final,
    }
}

#[test]
fn test_partials_revise_in_place() {
    let mut transcript = Transcript::new();

    transcript.apply(fragment(Speaker::User, "a", false));
    transcript.apply(fragment(Speaker::User, "a red", false));
    transcript.apply(fragment(Speaker::User, "a red bicycle", false));

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.entries()[0].text, "a red bicycle");
    assert!(!transcript.entries()[0].is_final);
}

#[test]
fn test_partials_ending_in_final_yield_one_entry() {
    let mut transcript = Transcript::new();

    for partial in ["draw", "draw me", "draw me a"] {
        transcript.apply(fragment(Speaker::User, partial, false));
    }
    transcript.apply(fragment(Speaker::User, "draw me a castle", true));

    assert_eq!(transcript.len(), 1, "no duplicate entries accumulate");
    let entry = &transcript.entries()[0];
    assert_eq!(entry.text, "draw me a castle");
    assert!(entry.is_final);
}

#[test]
fn test_final_entry_is_immutable() {
    let mut transcript = Transcript::new();

    transcript.apply(fragment(Speaker::User, "first utterance", true));
    transcript.apply(fragment(Speaker::User, "second", false));
    transcript.apply(fragment(Speaker::User, "second utterance", true));

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.entries()[0].text, "first utterance");
    assert_eq!(transcript.entries()[1].text, "second utterance");
}

#[test]
fn test_speakers_do_not_revise_each_other() {
    let mut transcript = Transcript::new();

    transcript.apply(fragment(Speaker::User, "how about", false));
    transcript.apply(fragment(Speaker::User, "how about a castle", true));
    transcript.apply(fragment(Speaker::Model, "A castle", false));
    transcript.apply(fragment(Speaker::Model, "A castle sounds great", true));

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.entries()[0].speaker, Speaker::User);
    assert_eq!(transcript.entries()[1].speaker, Speaker::Model);
    assert_eq!(transcript.entries()[1].text, "A castle sounds great");
}

#[test]
fn test_new_fragment_after_other_speaker_appends() {
    let mut transcript = Transcript::new();

    transcript.apply(fragment(Speaker::User, "hello", true));
    transcript.apply(fragment(Speaker::Model, "Hi there", true));
    transcript.apply(fragment(Speaker::User, "can you", false));

    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.entries()[2].speaker, Speaker::User);
    assert!(!transcript.entries()[2].is_final);
}

#[test]
fn test_fragments_apply_in_arrival_order() {
    let mut transcript = Transcript::new();

    // A revision that shortens the text still wins: arrival order, not length
    transcript.apply(fragment(Speaker::Model, "The quick brown", false));
    transcript.apply(fragment(Speaker::Model, "The quick", false));

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.entries()[0].text, "The quick");
}

#[test]
fn test_clear_empties_history() {
    let mut transcript = Transcript::new();
    transcript.apply(fragment(Speaker::User, "something", true));
    assert!(!transcript.is_empty());

    transcript.clear();
    assert!(transcript.is_empty());
    assert_eq!(transcript.len(), 0);
}
