//! Sentence segmentation and word tokenization.
//!
//! Word tokens follow Unicode word boundaries (UAX #29) with whitespace
//! dropped, interior hyphens rejoined and Treebank clitics split off, so
//! `"covid-19 doesn't"` becomes `["covid-19", "does", "n't"]`.

use unicode_segmentation::UnicodeSegmentation;

/// Characters that can end a sentence.
const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

/// Characters that may trail a terminator and still belong to the sentence.
const CLOSERS: [char; 7] = [')', ']', '"', '\'', '”', '’', '»'];

/// Lowercase abbreviations that do not end a sentence when followed by `.`.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "apr", "aug", "ca", "cf", "co", "corp", "dec", "dept", "dr", "e.g", "eg",
    "esp", "est", "etc", "feb", "fig", "figs", "i.e", "ie", "inc", "jan", "jr", "jul", "jun",
    "ltd", "mar", "mr", "mrs", "ms", "mt", "no", "nov", "oct", "p", "pp", "prof", "sep", "sept",
    "sr", "st", "u.k", "u.s", "vol", "vs",
];

/// Characters stripped from the end of a link.
const URL_TRAILERS: [char; 13] = [
    '.', ',', ';', ':', '!', '?', ')', ']', '"', '\'', '”', '’', '»',
];

/// Clitic suffixes split off a word, longest first.
const CLITICS: [&str; 7] = ["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// A word token with its byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Split `text` into word tokens with their byte offsets.
///
/// Links (`scheme://...` or `www....`) stay whole, minus trailing
/// punctuation, so their path words are never tokens of their own.
#[must_use]
pub fn word_spans(text: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut plain_start = 0;
    for (start, end) in url_runs(text) {
        out.extend(spans_between(text, plain_start, start));
        out.push(Token {
            text: &text[start..end],
            start,
            end,
        });
        plain_start = end;
    }
    out.extend(spans_between(text, plain_start, text.len()));
    out
}

/// Split `text` into word tokens on word boundaries alone, without keeping
/// links whole.
#[must_use]
pub fn boundary_spans(text: &str) -> Vec<Token<'_>> {
    spans_between(text, 0, text.len())
}

fn spans_between(text: &str, from: usize, to: usize) -> Vec<Token<'_>> {
    let segments: Vec<Token<'_>> = text[from..to]
        .split_word_bound_indices()
        .filter(|(_, s)| !s.trim().is_empty())
        .map(|(offset, s)| Token {
            text: s,
            start: from + offset,
            end: from + offset + s.len(),
        })
        .collect();

    let joined = join_hyphenated(text, segments);
    joined.into_iter().flat_map(|t| split_clitic(text, t)).collect()
}

/// Byte ranges of the links in `text`, in order.
fn url_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut chunk_start = None;
    for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        match (c.is_whitespace(), chunk_start) {
            (true, Some(start)) => {
                if let Some((from, to)) = url_in(&text[start..i]) {
                    runs.push((start + from, start + to));
                }
                chunk_start = None;
            }
            (false, None) => chunk_start = Some(i),
            _ => {}
        }
    }
    runs
}

/// The link inside one whitespace-free chunk, if any.
fn url_in(chunk: &str) -> Option<(usize, usize)> {
    let lower = chunk.to_ascii_lowercase();
    let end = chunk.trim_end_matches(URL_TRAILERS).len();

    if let Some(sep) = lower.find("://") {
        let start = lower[..sep]
            .rfind(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')))
            .map_or(0, |p| p + 1);
        return (start < sep && end > sep + 3).then_some((start, end));
    }

    let start = lower.find(char::is_alphanumeric)?;
    (lower[start..].starts_with("www.") && end > start + 4).then_some((start, end))
}

/// Split `text` into word tokens.
#[must_use]
pub fn word_tokenize(text: &str) -> Vec<String> {
    word_spans(text)
        .into_iter()
        .map(|t| t.text.to_string())
        .collect()
}

fn is_wordlike(s: &str) -> bool {
    s.chars().any(char::is_alphanumeric)
}

/// Merge `word - word` runs that touch without whitespace.
fn join_hyphenated<'a>(text: &'a str, segments: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut out: Vec<Token<'a>> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        let current = segments[i];
        let mergeable = current.text == "-"
            && i + 1 < segments.len()
            && out.last().is_some_and(|prev| {
                prev.end == current.start && is_wordlike(prev.text)
            })
            && segments[i + 1].start == current.end
            && is_wordlike(segments[i + 1].text);

        if mergeable {
            if let Some(prev) = out.last_mut() {
                let end = segments[i + 1].end;
                *prev = Token {
                    text: &text[prev.start..end],
                    start: prev.start,
                    end,
                };
            }
            i += 2;
        } else {
            out.push(current);
            i += 1;
        }
    }
    out
}

fn split_clitic<'a>(text: &'a str, token: Token<'a>) -> Vec<Token<'a>> {
    let normalized = token.text.replace('’', "'");
    if !normalized.contains('\'') {
        return vec![token];
    }
    let lower = normalized.to_lowercase();
    for clitic in CLITICS {
        if lower.ends_with(clitic) && lower.len() > clitic.len() {
            // The curly apostrophe is three bytes wide; measure the suffix
            // in the original text.
            let suffix_chars = clitic.chars().count();
            let split_at = token
                .text
                .char_indices()
                .rev()
                .nth(suffix_chars - 1)
                .map_or(token.start, |(i, _)| token.start + i);
            return vec![
                Token {
                    text: &text[token.start..split_at],
                    start: token.start,
                    end: split_at,
                },
                Token {
                    text: &text[split_at..token.end],
                    start: split_at,
                    end: token.end,
                },
            ];
        }
    }
    vec![token]
}

/// Split `text` into sentences.
///
/// A sentence ends after a run of terminators (and any closing quotes or
/// brackets) that is followed by whitespace or the end of the text, unless
/// the terminator is a single `.` after a known abbreviation or an initial.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
            j += 1;
        }
        let single_period = c == '.' && j == i + 1;
        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
        let at_break = chars.get(j).is_none_or(|&(_, next)| next.is_whitespace());

        if at_break && !(single_period && is_abbreviation(&text[start..pos])) {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j;
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// Whether the word ending `prefix` is an abbreviation or an initial.
fn is_abbreviation(prefix: &str) -> bool {
    let word = prefix
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return true;
    }
    ABBREVIATIONS.contains(&word.as_str())
}
