/// Errors raised while loading or validating configuration.
///
/// All of these surface at load time with the offending identifier; a
/// catalog or classifier config that loaded successfully never raises a
/// configuration error during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(String),
    #[error("threshold {name} out of range: {value} (expected [0, 1])")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("category priority must list every category exactly once, got {got:?}")]
    InvalidPriority { got: Vec<String> },
    #[error("suffix weight entry for {category} has no suffixes")]
    EmptySuffixes { category: String },
    #[error("suffix weight for {category} out of range: {weight}")]
    InvalidSuffixWeight { category: String, weight: f64 },
    #[error("context hint for {category} has no keywords")]
    EmptyKeywords { category: String },
    #[error("context boost for {category} out of range: {boost}")]
    InvalidBoost { category: String, boost: f64 },
    #[error("domain override for {term:?} has invalid score {score}")]
    InvalidOverrideScore { term: String, score: f64 },
    #[error("domain override has an empty term")]
    EmptyOverrideTerm,
    #[error("duplicate rule id {0:?}")]
    DuplicateRuleId(String),
    #[error("rule {rule}: weight must be positive, got {weight}")]
    NonPositiveWeight { rule: String, weight: f64 },
    #[error("rule {rule}: empty category")]
    EmptyRuleCategory { rule: String },
    #[error("rule {rule}: invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("rule {rule}: unknown built-in check {check:?}")]
    UnknownCheck { rule: String, check: String },
    #[error("rule {rule}: {detail}")]
    InvalidCheckParams { rule: String, detail: String },
    #[error("rule {rule}: must declare patterns or a built-in check")]
    MissingDetection { rule: String },
    #[error("rule {rule}: declares both patterns and a built-in check")]
    ConflictingDetection { rule: String },
    #[error("acceptance minimum for {category} out of range: {minimum}")]
    InvalidCategoryMinimum { category: String, minimum: f64 },
    #[error("configuration store lock poisoned")]
    Lock,
}
