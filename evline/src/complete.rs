//! Tab completion
//!
//! The editor hands the word under the cursor to a [`Completer`] and
//! either splices the longest common prefix of the returned candidates
//! into the line, or lists the candidates when that would not narrow
//! anything down.

use tracing::debug;

/// Number of candidates listed before the rest are summarized
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// A type that provides completion candidates
///
/// Closures with the matching signature are completers:
///
/// ```
/// use evline::complete::Completer;
///
/// static FRUIT_LIST: [&str; 6] = ["Apple", "Banana", "Lemon", "Lime", "Peach", "Pear"];
///
/// let mut fruit = |word: &str, _start: usize, _end: usize| {
///     Some(
///         FRUIT_LIST
///             .iter()
///             .filter(|candidate| candidate.starts_with(word))
///             .map(|candidate| candidate.to_string())
///             .collect::<Vec<_>>(),
///     )
/// };
///
/// assert_eq!(fruit.complete("Pe", 0, 2), Some(vec!["Peach".to_string(), "Pear".to_string()]));
/// ```
pub trait Completer {
    /// Given the `word` spanning the character offsets `start..end` of
    /// the line, return candidates to complete it with. `None` aborts
    /// the completion.
    fn complete(&mut self, word: &str, start: usize, end: usize) -> Option<Vec<String>>;
}

impl<F> Completer for F
where
    F: FnMut(&str, usize, usize) -> Option<Vec<String>>,
{
    fn complete(&mut self, word: &str, start: usize, end: usize) -> Option<Vec<String>> {
        self(word, start, end)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Completion {
    /// Replace the line and place the cursor at the character index
    Insert { line: String, cursor: usize },
    /// Print the candidate listing below the prompt
    Suggest(String),
}

/// The line split around the word being completed
#[derive(Debug, PartialEq, Eq)]
struct Word<'a> {
    prefix: String,
    word: &'a str,
    quote: Option<char>,
}

impl<'a> Word<'a> {
    fn new(before: &'a str) -> Self {
        let (prefix, word) = match before.rfind(' ') {
            Some(index) => before.split_at(index + 1),
            None => ("", before),
        };

        let mut prefix = prefix.to_string();
        let mut word = word;

        let quote = word.chars().next().filter(|c| matches!(c, '"' | '\''));

        if let Some(quote) = quote {
            prefix.push(quote);
            word = &word[quote.len_utf8()..];
        }

        Self {
            prefix,
            word,
            quote,
        }
    }

    fn start(&self) -> usize {
        self.prefix.chars().count()
    }

    fn end(&self) -> usize {
        self.start() + self.word.chars().count()
    }
}

fn dedup(candidates: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }

    unique
}

/// Shrink the first candidate one character at a time until every
/// candidate starts with it
fn longest_common_prefix(candidates: &[String]) -> &str {
    let mut prefix = candidates.first().map(String::as_str).unwrap_or("");

    while !candidates.iter().all(|candidate| candidate.starts_with(prefix)) {
        let mut chars = prefix.chars();
        chars.next_back();
        prefix = chars.as_str();
    }

    prefix
}

/// Space separated candidates. Above `limit`, the first `limit - 1`
/// are shown followed by a count of the rest.
fn listing(candidates: &[String], limit: usize) -> String {
    if candidates.len() > limit {
        let shown = limit.saturating_sub(1);
        let summary = format!("(+{} others)", candidates.len() - shown);

        candidates[..shown]
            .iter()
            .map(String::as_str)
            .chain([summary.as_str()])
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        candidates.join(" ")
    }
}

/// Negotiate a completion for the cursor sitting between `before` and
/// `after`
pub(crate) fn complete<C: Completer + ?Sized>(
    completer: &mut C,
    before: &str,
    after: &str,
    limit: usize,
) -> Option<Completion> {
    let split = Word::new(before);
    let (word, start) = (split.word, split.start());

    let mut candidates = dedup(completer.complete(word, start, split.end())?);

    if !word.is_empty() {
        candidates.retain(|candidate| candidate.starts_with(word));
    }

    if candidates.is_empty() {
        return None;
    }

    let common = longest_common_prefix(&candidates);

    if candidates.len() > 1 && (common == word || common.is_empty()) {
        debug!(candidates = candidates.len(), "listing completions");
        return Some(Completion::Suggest(listing(&candidates, limit)));
    }

    let mut found = common.to_string();

    if let Some(quote) = split.quote {
        let closed = after
            .split(' ')
            .next()
            .is_some_and(|rest| rest.contains(quote));

        if candidates.len() == 1 && !closed {
            found.push(quote);
        }
    }

    if found.is_empty() {
        found.push_str("''");
    }

    if after.is_empty() && candidates.len() == 1 {
        found.push(' ');
    }

    debug!(word = %word, found = %found, "completing");

    let cursor = start + found.chars().count();
    let line = [split.prefix.as_str(), found.as_str(), after].concat();

    Some(Completion::Insert { line, cursor })
}
