//! Grouping per-token BIO tags into entity spans.
//!
//! Token-classification checkpoints emit one tag per sub-word token
//! (`B-PER`, `I-PER`, `O`, ...). Spans are built at word level: the tag of a
//! word's first sub-token decides, and the remaining sub-tokens of the same
//! word only extend the span. An `I-` tag that does not continue an open span
//! of the same type starts a new one.

use crate::entity_extraction::{CharIndex, Entity};

/// One classified token with its character offsets into the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub tag: &'a str,
    /// Word index from the tokenizer, `None` for special tokens
    pub word: Option<u32>,
    pub start: usize,
    pub end: usize,
}

/// Span prefix of a BIO tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Begin,
    Inside,
    Outside,
}

fn split_tag(tag: &str) -> (Prefix, &str) {
    match tag.split_once('-') {
        Some(("B", kind)) | Some(("S", kind)) => (Prefix::Begin, kind),
        Some(("I", kind)) | Some(("E", kind)) => (Prefix::Inside, kind),
        _ if tag == "O" || tag.is_empty() => (Prefix::Outside, ""),
        _ => (Prefix::Inside, tag),
    }
}

#[derive(Debug)]
struct OpenSpan<'a> {
    kind: &'a str,
    start: usize,
    end: usize,
    last_word: u32,
}

/// Decode tagged tokens into entities with character offsets.
///
/// `resolve_label` maps the checkpoint's entity type (e.g. `PER`) to the
/// label reported to callers.
pub fn decode_entities<F>(text: &str, tokens: &[TaggedToken<'_>], resolve_label: F) -> Vec<Entity>
where
    F: Fn(&str) -> String,
{
    let index = CharIndex::new(text);
    let mut entities = Vec::new();
    let mut open: Option<OpenSpan<'_>> = None;

    let mut previous_word: Option<u32> = None;

    for token in tokens {
        let Some(word) = token.word else {
            continue;
        };
        if token.start >= token.end {
            continue;
        }

        if previous_word == Some(word) {
            if let Some(span) = open.as_mut().filter(|span| span.last_word == word) {
                span.end = span.end.max(token.end);
            }
            continue;
        }
        previous_word = Some(word);

        match split_tag(token.tag) {
            (Prefix::Outside, _) => {
                close_span(&index, open.take(), &resolve_label, &mut entities)
            }
            (Prefix::Inside, kind) if open.as_ref().is_some_and(|span| span.kind == kind) => {
                if let Some(span) = open.as_mut() {
                    span.end = token.end;
                    span.last_word = word;
                }
            }
            (_, kind) => {
                close_span(&index, open.take(), &resolve_label, &mut entities);
                open = Some(OpenSpan {
                    kind,
                    start: token.start,
                    end: token.end,
                    last_word: word,
                });
            }
        }
    }

    close_span(&index, open.take(), &resolve_label, &mut entities);
    entities
}

fn close_span<F>(
    index: &CharIndex<'_>,
    span: Option<OpenSpan<'_>>,
    resolve_label: &F,
    entities: &mut Vec<Entity>,
) where
    F: Fn(&str) -> String,
{
    if let Some(span) = span
        && let Some(entity) =
            index.entity_from_chars(&resolve_label(span.kind), span.start, span.end)
    {
        entities.push(entity);
    }
}

/// Join the tagged tokens of overlapping windows into one token sequence.
///
/// Consecutive windows share a run of tokens. The earlier window supplies the
/// first half of that run and the later window the rest, so every token is
/// tagged by a window that sees context on both sides of it. Special and
/// empty tokens are dropped. Spans are decoded afterwards over the joined
/// sequence, which keeps entities crossing a window edge whole.
pub fn stitch_windows<'a>(windows: &[Vec<TaggedToken<'a>>]) -> Vec<TaggedToken<'a>> {
    let mut stitched: Vec<TaggedToken<'a>> = Vec::new();

    for window in windows {
        let content: Vec<TaggedToken<'a>> = window
            .iter()
            .copied()
            .filter(|token| token.word.is_some() && token.start < token.end)
            .collect();
        let Some(first) = content.first() else {
            continue;
        };

        let shared_from = stitched
            .iter()
            .position(|token| token.start >= first.start)
            .unwrap_or(stitched.len());
        let shared = stitched.len() - shared_from;
        stitched.truncate(shared_from + shared / 2);

        let resume_after = stitched.last().map(|token| token.start);
        stitched.extend(
            content
                .into_iter()
                .filter(|token| resume_after.is_none_or(|last| token.start > last)),
        );
    }

    stitched
}

/// Index of the largest score in each row.
pub fn argmax_rows(scores: &[Vec<f32>]) -> Vec<usize> {
    scores
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |best, (idx, &score)| {
                    if score > best.1 { (idx, score) } else { best }
                })
                .0
        })
        .collect()
}
