//! Rule-based English recognizer.
//!
//! Structured entities (money, dates, times, emails, URLs) come from regular
//! expressions. Names come from runs of capitalized words, labelled through
//! small gazetteers: places become `GPE`, known companies and runs ending in an
//! organization suffix become `ORG`, short all-caps acronyms become `ORG`,
//! weekday and month names become `DATE`, and everything else `PERSON`.
//!
//! A single unknown capitalized word at the start of a sentence is skipped,
//! since sentence case alone says nothing about it.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use super::gazetteer::{
    CALENDAR_WORDS, ORGANIZATIONS, ORGANIZATION_SUFFIXES, PLACES, STOPWORDS, TITLES,
};
use super::{CharIndex, Entity, EntityRecognizer};
use crate::Result;

pub const PERSON: &str = "PERSON";
pub const ORG: &str = "ORG";
pub const GPE: &str = "GPE";
pub const DATE: &str = "DATE";
pub const TIME: &str = "TIME";
pub const MONEY: &str = "MONEY";
pub const EMAIL: &str = "EMAIL";
pub const URL: &str = "URL";

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref URL_REGEX: Regex =
        Regex::new(r#"\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]]"#).unwrap();
    static ref MONEY_REGEX: Regex = Regex::new(
        r"[$€£¥]\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?(?:\s?(?:k|m|bn|million|billion)\b)?|[$€£¥]\d+(?:\.\d{1,2})?|\b\d{1,3}(?:,\d{3})*(?:\.\d{2})?\s?(?:USD|EUR|GBP|JPY|dollars?|euros?|pounds?|yen)\b"
    )
    .unwrap();
    static ref DATE_REGEX: Regex = Regex::new(
        r"\b(?:(?:0?[1-9]|1[0-2])[/\-.](?:0?[1-9]|[12]\d|3[01])[/\-.](?:19|20)\d{2}|(?:January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)\.?\s+(?:0?[1-9]|[12]\d|3[01])(?:st|nd|rd|th)?(?:,?\s+(?:19|20)\d{2})?|(?:19|20)\d{2}-(?:0?[1-9]|1[0-2])-(?:0?[1-9]|[12]\d|3[01]))\b"
    )
    .unwrap();
    static ref TIME_REGEX: Regex = Regex::new(
        r"\b(?:[01]?\d|2[0-3]):[0-5]\d(?:\s?(?:AM|PM|am|pm))?\b|\b(?:[1-9]|1[0-2])\s?(?:AM|PM|am|pm)\b"
    )
    .unwrap();
    static ref WORD_REGEX: Regex = Regex::new(r"\p{L}[\p{L}\p{M}\p{Nd}'’&.\-]*").unwrap();
}

/// Rule-based recognizer for English text.
#[derive(Debug, Clone)]
pub struct RuleBasedRecognizer {
    name: String,
}

impl RuleBasedRecognizer {
    /// Create a new rule-based recognizer.
    pub fn new() -> Self {
        Self {
            name: "rules".to_string(),
        }
    }

    /// Run every rule over `text` synchronously.
    pub fn recognize_sync(&self, text: &str) -> Vec<Entity> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let index = CharIndex::new(text);
        let mut entities = Vec::new();

        for (regex, label) in [
            (&*EMAIL_REGEX, EMAIL),
            (&*URL_REGEX, URL),
            (&*MONEY_REGEX, MONEY),
            (&*DATE_REGEX, DATE),
            (&*TIME_REGEX, TIME),
        ] {
            entities.extend(
                regex
                    .find_iter(text)
                    .filter_map(|m| index.entity_from_bytes(label, m.start(), m.end())),
            );
        }

        entities.extend(
            capitalized_runs(text)
                .into_iter()
                .filter_map(|run| classify_run(text, &run))
                .filter_map(|(label, start, end)| index.entity_from_bytes(label, start, end)),
        );

        let mut entities = remove_overlaps(entities);
        entities.sort_by_key(|entity| entity.start);
        entities
    }
}

impl Default for RuleBasedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityRecognizer for RuleBasedRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        Ok(self.recognize_sync(text))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> Vec<String> {
        [PERSON, ORG, GPE, DATE, TIME, MONEY, EMAIL, URL]
            .iter()
            .map(|label| label.to_string())
            .collect()
    }
}

/// A word found by [`WORD_REGEX`], byte offsets.
#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Word<'_> {
    /// Lowercased word with trailing periods and any apostrophe suffix removed.
    fn base(&self) -> String {
        let trimmed = self.text.trim_end_matches('.');
        let stem = trimmed.split(['\'', '’']).next().unwrap_or(trimmed);
        stem.to_lowercase()
    }

    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_acronym(&self) -> bool {
        let letters: Vec<char> = self.text.chars().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
    }

    /// Words that break a run even when capitalized.
    fn is_stopword(&self) -> bool {
        let base = self.base();
        if self.is_acronym()
            && (PLACES.contains(base.as_str()) || ORGANIZATIONS.contains(base.as_str()))
        {
            return false;
        }
        STOPWORDS.contains(base.as_str())
    }
}

/// Group consecutive capitalized words separated only by spaces.
fn capitalized_runs(text: &str) -> Vec<Vec<Word<'_>>> {
    let mut runs: Vec<Vec<Word<'_>>> = Vec::new();
    let mut current: Vec<Word<'_>> = Vec::new();

    for m in WORD_REGEX.find_iter(text) {
        // Trailing periods belong to the sentence unless the word is an abbreviation like "U.S."
        let raw = m.as_str();
        let keep_dots = raw.trim_end_matches('.').contains('.');
        let word_text = if keep_dots { raw } else { raw.trim_end_matches('.') };
        let word = Word {
            text: word_text,
            start: m.start(),
            end: m.start() + word_text.len(),
        };

        let joins_current = current
            .last()
            .is_some_and(|prev| text[prev.end..word.start].chars().all(|c| c == ' '));

        if !joins_current && !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }

        if word.is_capitalized() && !word.is_stopword() {
            current.push(word);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Decide whether a capitalized run is an entity and which label it gets.
fn classify_run(text: &str, run: &[Word<'_>]) -> Option<(&'static str, usize, usize)> {
    let first = run.first()?;
    let last = run.last()?;
    let start = first.start;
    let mut end = last.end;

    // Possessives are not part of the name
    let span = &text[start..end];
    if let Some(stripped) = span.strip_suffix("'s").or_else(|| span.strip_suffix("’s")) {
        end = start + stripped.len();
    }

    let phrase = run
        .iter()
        .map(|word| word.base())
        .collect::<Vec<_>>()
        .join(" ");
    let last_base = last.base();

    let label = if PLACES.contains(phrase.as_str()) {
        GPE
    } else if ORGANIZATIONS.contains(phrase.as_str())
        || run.iter().any(|word| ORGANIZATIONS.contains(word.base().as_str()))
        || (run.len() > 1 && ORGANIZATION_SUFFIXES.contains(last_base.as_str()))
    {
        ORG
    } else if run.len() == 1 && CALENDAR_WORDS.contains(phrase.as_str()) {
        DATE
    } else if run.len() == 1 && first.is_acronym() {
        ORG
    } else if run.len() == 1 && starts_sentence(text, start) {
        return None;
    } else {
        PERSON
    };

    Some((label, start, end))
}

/// Whether the byte offset `start` begins a sentence.
fn starts_sentence(text: &str, start: usize) -> bool {
    let prefix = &text[..start];
    let trimmed = prefix.trim_end_matches(|c: char| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '“' | '‘' | '(' | '[' | '-' | '*')
    });

    if trimmed.is_empty() || prefix[trimmed.len()..].contains('\n') {
        return true;
    }

    if trimmed.ends_with(['!', '?', ':', ';']) {
        return true;
    }

    if let Some(before_dot) = trimmed.strip_suffix('.') {
        let previous_word = before_dot
            .rsplit(|c: char| !c.is_alphabetic())
            .next()
            .unwrap_or("")
            .to_lowercase();
        return !TITLES.contains(previous_word.as_str());
    }

    false
}

/// Remove overlapping entities, keeping the ones with higher priority.
fn remove_overlaps(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by_key(|entity| entity.start);

    let mut result: Vec<Entity> = Vec::new();

    for entity in entities {
        let mut should_add = true;
        let mut indices_to_remove = Vec::new();

        for (idx, existing) in result.iter().enumerate() {
            if entity.overlaps(existing) {
                let entity_priority = label_priority(&entity.label);
                let existing_priority = label_priority(&existing.label);

                if entity_priority > existing_priority
                    || (entity_priority == existing_priority && entity.len() > existing.len())
                {
                    indices_to_remove.push(idx);
                } else {
                    should_add = false;
                    break;
                }
            }
        }

        if should_add {
            for &idx in indices_to_remove.iter().rev() {
                result.remove(idx);
            }
            result.push(entity);
        }
    }

    result
}

/// Higher priority labels win overlaps; pattern matches beat capitalization guesses.
fn label_priority(label: &str) -> u8 {
    match label {
        EMAIL => 100,
        URL => 90,
        MONEY => 80,
        DATE => 70,
        TIME => 60,
        _ => 40,
    }
}
