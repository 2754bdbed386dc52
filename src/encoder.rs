use crate::chunker::{Chunker, StructuralParseError};
use crate::dialect::strip_markers;
use crate::tags::{Tag, TaggedToken};
use crate::tokenize::Tokenize;

/// Result of encoding one interval mark. When the chunker hit a structural
/// error partway through, `tokens` still holds everything produced before
/// the error and `error` says why the rest of the mark was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFragment {
    pub tokens: Vec<TaggedToken>,
    pub error: Option<StructuralParseError>,
}

/// Converts one transcript interval mark into BIO-tagged tokens: dialect
/// markers are stripped, the mark is chunked, and each chunk is tokenized
/// independently. The first token of an entity chunk gets `B-`class, the
/// remaining tokens `I-`class; tokens of plain chunks get `O`. A chunk that
/// tokenizes to nothing contributes nothing.
pub fn encode_mark<T: Tokenize + ?Sized>(mark: &str, tokenizer: &T) -> EncodedFragment {
    let stripped = strip_markers(mark);
    let mut tokens = Vec::new();
    let mut error = None;
    for chunk in Chunker::new(&stripped) {
        match chunk {
            Ok(chunk) => {
                for (i, word) in tokenizer.tokenize(chunk.text).into_iter().enumerate() {
                    let tag = match chunk.class {
                        None => Tag::Outside,
                        Some(class) if i == 0 => Tag::Begin(class.to_owned()),
                        Some(class) => Tag::Inside(class.to_owned()),
                    };
                    tokens.push(TaggedToken::new(word, tag));
                }
            }
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }
    EncodedFragment { tokens, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::WordTokenizer;

    fn tags(encoded: &EncodedFragment) -> Vec<String> {
        encoded.tokens.iter().map(|t| t.tag.to_string()).collect()
    }

    fn words(encoded: &EncodedFragment) -> Vec<&str> {
        encoded.tokens.iter().map(|t| t.token.as_str()).collect()
    }

    #[test]
    fn test_encode_mixed_mark() {
        let encoded = encode_mark(
            "hij heet [Jan Peters]PER en komt uit [Utrecht]LOC",
            &WordTokenizer,
        );
        assert!(encoded.error.is_none());
        assert_eq!(
            words(&encoded),
            ["hij", "heet", "Jan", "Peters", "en", "komt", "uit", "Utrecht"]
        );
        assert_eq!(
            tags(&encoded),
            ["O", "O", "B-PER", "I-PER", "O", "O", "O", "B-LOC"]
        );
    }

    #[test]
    fn test_first_entity_tag_is_begin() {
        let encoded = encode_mark("[Den Haag of all places]LOC", &WordTokenizer);
        assert!(encoded.error.is_none());
        let first = &encoded.tokens[0];
        assert_eq!(first.tag, Tag::Begin(String::from("LOC")));
        for token in &encoded.tokens[1..] {
            assert_eq!(token.tag, Tag::Inside(String::from("LOC")));
        }
    }

    #[test]
    fn test_encode_strips_dialect_markers() {
        let encoded = encode_mark("die hond*d daar in [Den Haag*d]LOC", &WordTokenizer);
        assert!(encoded.error.is_none());
        assert_eq!(words(&encoded), ["die", "hond", "daar", "in", "Den", "Haag"]);
        assert_eq!(tags(&encoded), ["O", "O", "O", "O", "B-LOC", "I-LOC"]);
    }

    #[test]
    fn test_nested_brackets_keep_prefix_tokens() {
        let encoded = encode_mark("goed [Jan]PER dan [fout [x]A]B", &WordTokenizer);
        assert_eq!(encoded.error, Some(StructuralParseError::NestedBrackets));
        assert_eq!(words(&encoded), ["goed", "Jan", "dan"]);
        assert_eq!(tags(&encoded), ["O", "B-PER", "O"]);
    }

    #[test]
    fn test_empty_mark_yields_nothing() {
        let encoded = encode_mark("", &WordTokenizer);
        assert!(encoded.tokens.is_empty());
        assert!(encoded.error.is_none());
    }

    #[test]
    fn test_punctuation_inside_entity_stays_inside() {
        let encoded = encode_mark("[Jan Peters.]PER", &WordTokenizer);
        assert_eq!(words(&encoded), ["Jan", "Peters", "."]);
        assert_eq!(tags(&encoded), ["B-PER", "I-PER", "I-PER"]);
    }
}
