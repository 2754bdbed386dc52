use std::fmt::Debug;

/// Splits an input string into an ordered sequence of token strings. The
/// chunk parser and encoder never tokenize across a chunk boundary, so an
/// implementation only ever sees one plain-text run or one entity span at a
/// time. Implementations must be deterministic and side-effect free.
pub trait Tokenize: Debug {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Rule-based default tokenizer: whitespace splitting with leading and
/// trailing punctuation detached into tokens of their own. A full
/// linguistic tokenizer can be injected through the `Tokenize` trait
/// instead; this one is good enough for transcript text, which is mostly
/// lower-cased words with sentence punctuation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WordTokenizer;

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for piece in text.split_whitespace() {
            split_piece(piece, &mut tokens);
        }
        tokens
    }
}

fn split_piece(piece: &str, tokens: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let Some(first) = chars.iter().position(|(_, c)| !is_punctuation(*c)) else {
        // punctuation-only piece, one token per character
        tokens.extend(piece.chars().map(String::from));
        return;
    };
    let last = chars
        .iter()
        .rposition(|(_, c)| !is_punctuation(*c))
        .unwrap_or(first);
    for (_, c) in &chars[..first] {
        tokens.push(c.to_string());
    }
    let core_start = chars[first].0;
    let core_end = match chars.get(last + 1) {
        Some((i, _)) => *i,
        None => piece.len(),
    };
    tokens.push(piece[core_start..core_end].to_owned());
    for (_, c) in &chars[last + 1..] {
        tokens.push(c.to_string());
    }
}

fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | ':'
            | ';'
            | '!'
            | '?'
            | '('
            | ')'
            | '"'
            | '\''
            | '…'
            | '«'
            | '»'
            | '„'
            | '“'
            | '”'
    )
}
