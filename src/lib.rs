/*!
This library prepares named-entity training data from bracket-annotated
speech transcripts and scores a tagger's predictions against the reference
annotation.

# Bracket notation
Entities are marked inline in the transcript text, with the class label
following the closing bracket:

```text
hij heet [Jan Peters]PER en komt uit [Utrecht]LOC
```

The extraction side turns such fragments into a line-oriented stream of
BIO-tagged tokens (`B-`class on the first token of an entity, `I-`class on
its continuation, `O` elsewhere), one `token<TAB>tag` pair per line and the
literal `<utt>` marker between utterances. The evaluation side reads that
stream back, reconstructs the reference entity spans per sentence, asks an
external tagging service for its predictions, and reports precision/recall
both macro-averaged over sentences and micro-averaged per class.

# Terminology
* A *class* is an entity category such as `PER`, `LOC` or `ORG`. It can be
  any string.
* A *chunk* is one fragment of transcript text, either plain or carrying a
  class label.
* A *span* is one entity occurrence: the surface text of a contiguous run of
  tokens plus its class.
* The *macro* average is the mean of a per-sentence metric over all scored
  sentences; the *micro* average is computed from counts pooled per class
  over the whole run.

# Example
```rust
use chunkev::{encode_mark, reference_spans, EntitySpan, WordTokenizer};

let mark = "hij heet [Jan Peters]PER en komt uit [Utrecht]LOC";
let encoded = encode_mark(mark, &WordTokenizer);
assert!(encoded.error.is_none());

let tags: Vec<String> = encoded.tokens.iter().map(|t| t.tag.to_string()).collect();
assert_eq!(tags, ["O", "O", "B-PER", "I-PER", "O", "O", "O", "B-LOC"]);

let spans = reference_spans(&encoded.tokens);
assert_eq!(spans, [
    EntitySpan::new("Jan Peters", "PER"),
    EntitySpan::new("Utrecht", "LOC"),
]);
```
*/

mod chunker;
mod config;
mod dialect;
mod encoder;
mod report;
mod score;
mod spans;
mod tagger;
mod tags;
mod textgrid;
mod tokenize;

// The public api starts here
pub use chunker::{Chunk, Chunker, StructuralParseError};

pub use config::{EvalConfig, EvalConfigBuilder, DEFAULT_NERSET};

pub use dialect::{strip_markers, DialectMarker};

pub use encoder::{encode_mark, EncodedFragment};

pub use report::{EvalReport, RunAggregate};

pub use score::{
    matches, score_sentence, ClassCounts, ClassEval, MatchMode, MatchModeParseError,
    SentenceScore,
};

pub use spans::{reference_spans, EntitySpan};

pub use tagger::{ServiceTagger, Tagger, TaggerConfig, TaggerError};

pub use tags::{Record, StreamFormatError, Tag, TagParseError, TaggedToken, UTT_BOUNDARY};

pub use textgrid::{
    parse_textgrid, read_textgrid, InputFormatError, Interval, IntervalTier, TextGrid,
};

pub use tokenize::{Tokenize, WordTokenizer};
