/*
The persisted training/reference representation: a line-oriented UTF-8
stream in which each line is either a token and its BIO tag separated by a
single tab, or the literal utterance boundary marker.
*/
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The utterance boundary marker separating sentences in the stream.
pub const UTT_BOUNDARY: &str = "<utt>";

/// BIO tag of a single token: `O` outside any entity, `B-`class on the first
/// token of an entity span, `I-`class on its remaining tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Outside,
    Begin(String),
    Inside(String),
}

impl Tag {
    /// The class label carried by the tag, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Tag::Outside => None,
            Tag::Begin(class) | Tag::Inside(class) => Some(class),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Outside => write!(f, "O"),
            Tag::Begin(class) => write!(f, "B-{}", class),
            Tag::Inside(class) => write!(f, "I-{}", class),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParseError(String);

impl Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse `{}` into a BIO tag", self.0)
    }
}

impl Error for TagParseError {}

impl FromStr for Tag {
    type Err = TagParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "O" {
            Ok(Tag::Outside)
        } else if let Some(class) = s.strip_prefix("B-") {
            Ok(Tag::Begin(class.to_owned()))
        } else if let Some(class) = s.strip_prefix("I-") {
            Ok(Tag::Inside(class.to_owned()))
        } else {
            Err(TagParseError(s.to_owned()))
        }
    }
}

/// One token of the stream together with its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub tag: Tag,
}

impl TaggedToken {
    pub fn new(token: impl Into<String>, tag: Tag) -> Self {
        TaggedToken {
            token: token.into(),
            tag,
        }
    }
}

impl Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.token, self.tag)
    }
}

/// One line of the persisted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Token(TaggedToken),
    Boundary,
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Token(token) => token.fmt(f),
            Record::Boundary => write!(f, "{}", UTT_BOUNDARY),
        }
    }
}

/// A stream line that is neither a boundary marker nor a valid token/tag
/// pair. Fatal for an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFormatError {
    line: String,
    message: String,
}

impl StreamFormatError {
    fn new(line: &str, message: impl Into<String>) -> Self {
        StreamFormatError {
            line: line.to_owned(),
            message: message.into(),
        }
    }
}

impl Display for StreamFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed stream line `{}`: {}", self.line, self.message)
    }
}

impl Error for StreamFormatError {}

impl Record {
    /// Parses one stream line. The line is trimmed first, so carriage
    /// returns and surrounding whitespace do not matter.
    pub fn parse(line: &str) -> Result<Record, StreamFormatError> {
        let line = line.trim();
        if line == UTT_BOUNDARY {
            return Ok(Record::Boundary);
        }
        let Some((token, tag)) = line.split_once('\t') else {
            return Err(StreamFormatError::new(
                line,
                "expected a token and a tag separated by a tab",
            ));
        };
        let tag = tag
            .parse::<Tag>()
            .map_err(|e| StreamFormatError::new(line, e.to_string()))?;
        Ok(Record::Token(TaggedToken::new(token, tag)))
    }
}
