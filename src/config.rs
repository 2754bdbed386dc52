/*
 * Quality of life configuration for an evaluation run. Bundles the matching
 * mode, the named-entity set handed to the tagging service and the policy
 * for tagging failures into one struct with sensible defaults.
*/
use crate::score::MatchMode;

/// The public FoLiA named-entity set definition, used when no other set is
/// configured.
pub const DEFAULT_NERSET: &str =
    "https://raw.githubusercontent.com/proycon/folia/master/setdefinitions/namedentities.foliaset.ttl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// How predicted spans are matched against reference spans.
    pub mode: MatchMode,
    /// Named-entity set URI passed through to the tagging service.
    pub nerset: String,
    /// Abort the run on a tagging failure instead of assuming zero
    /// predictions for the sentence.
    pub fail_on_tagger_error: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            mode: MatchMode::Exact,
            nerset: String::from(DEFAULT_NERSET),
            fail_on_tagger_error: false,
        }
    }
}

/// Builder for `EvalConfig`.
#[derive(Debug, Clone)]
pub struct EvalConfigBuilder {
    mode: MatchMode,
    nerset: String,
    fail_on_tagger_error: bool,
}

impl Default for EvalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EvalConfigBuilder {
    pub fn new() -> Self {
        let defaults = EvalConfig::default();
        EvalConfigBuilder {
            mode: defaults.mode,
            nerset: defaults.nerset,
            fail_on_tagger_error: defaults.fail_on_tagger_error,
        }
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn nerset(mut self, nerset: impl Into<String>) -> Self {
        self.nerset = nerset.into();
        self
    }

    pub fn fail_on_tagger_error(mut self, fail_on_tagger_error: bool) -> Self {
        self.fail_on_tagger_error = fail_on_tagger_error;
        self
    }

    pub fn build(self) -> EvalConfig {
        EvalConfig {
            mode: self.mode,
            nerset: self.nerset,
            fail_on_tagger_error: self.fail_on_tagger_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.mode, MatchMode::Exact);
        assert_eq!(config.nerset, DEFAULT_NERSET);
        assert!(!config.fail_on_tagger_error);
    }

    #[rstest]
    #[case(MatchMode::Exact)]
    #[case(MatchMode::Loose)]
    fn test_builder_sets_mode(#[case] mode: MatchMode) {
        let config = EvalConfigBuilder::new().mode(mode).build();
        assert_eq!(config.mode, mode);
    }

    #[test]
    fn test_builder_sets_nerset() {
        let config = EvalConfigBuilder::new().nerset("urn:my-set").build();
        assert_eq!(config.nerset, "urn:my-set");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_builder_sets_failure_policy(#[case] fail: bool) {
        let config = EvalConfigBuilder::new().fail_on_tagger_error(fail).build();
        assert_eq!(config.fail_on_tagger_error, fail);
    }
}
