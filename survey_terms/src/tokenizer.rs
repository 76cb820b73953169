use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{NoExpand, Regex};

use crate::config::*;
use crate::encoding::repair_str;
use crate::stopwords::StopwordSet;

/// Tokens of this many characters or fewer are dropped.
pub const MAX_DISCARDED_LEN: usize = 2;

lazy_static! {
    static ref DEFAULT_TOKENIZER: Tokenizer = Tokenizer::new(&PipelineRules::default_rules())
        .expect("the default pipeline rules are valid");
}

// A phrase rule, compiled.
#[derive(Debug, Clone)]
struct PhraseMerge {
    pattern: Regex,
    merged: String,
}

/// Turns free text into the list of terms that are counted.
///
/// Pipeline:
/// 1. Repair the mis-decoded punctuation
/// 2. Merge the configured phrases into single tokens (case-insensitive)
/// 3. Lowercase
/// 4. Delete everything that is not an ASCII letter or whitespace
/// 5. Split on whitespace
/// 6. Drop stopwords and tokens of 2 characters or less
///
/// ```
/// use survey_terms::Tokenizer;
/// use survey_terms::PipelineRules;
///
/// let tokenizer = Tokenizer::new(&PipelineRules::default_rules())?;
/// let tokens = tokenizer.tokenize(Some("The Wharf Plus talks were GREAT!"));
/// assert_eq!(tokens, vec!["wharfplus", "talks", "great"]);
/// # Ok::<(), survey_terms::SurveyErrors>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    phrases: Vec<PhraseMerge>,
    stopwords: StopwordSet,
    max_response_chars: usize,
}

impl Tokenizer {
    pub fn new(rules: &PipelineRules) -> Result<Tokenizer, SurveyErrors> {
        let stopwords = StopwordSet::default_set().with_extra(&rules.extra_stopwords);
        let mut phrases: Vec<PhraseMerge> = Vec::new();
        for rule in rules.phrase_rules.iter() {
            phrases.push(compile_phrase(rule, &stopwords)?);
        }
        debug!(
            "Tokenizer::new: {} phrase rules, {} stopwords",
            phrases.len(),
            stopwords.len()
        );
        Ok(Tokenizer {
            phrases,
            stopwords,
            max_response_chars: rules.max_response_chars,
        })
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Absent text gives no tokens. Text longer than the configured cap is truncated first.
    pub fn tokenize(&self, text: Option<&str>) -> Vec<String> {
        match text {
            Some(t) => self.filter_repaired(&repair_str(truncate_chars(t, self.max_response_chars))),
            None => Vec::new(),
        }
    }

    /// Computes both the display text and the tokens of a response.
    ///
    /// The tokens are always derived from the display text, never from the raw input.
    pub fn normalize(&self, text: Option<&str>) -> NormalizedResponse {
        let raw = match text {
            Some(t) => truncate_chars(t, self.max_response_chars),
            None => return NormalizedResponse::default(),
        };
        let display_text = repair_str(raw);
        let clean_tokens = self.filter_repaired(&display_text);
        NormalizedResponse {
            display_text,
            clean_tokens,
        }
    }

    fn merge_phrases(&self, text: &str) -> String {
        let mut res = text.to_string();
        for pm in self.phrases.iter() {
            if pm.pattern.is_match(&res) {
                res = pm
                    .pattern
                    .replace_all(&res, NoExpand(pm.merged.as_str()))
                    .into_owned();
            }
        }
        res
    }

    // Expects text that already went through the repair.
    fn filter_repaired(&self, text: &str) -> Vec<String> {
        let lowered = self.merge_phrases(text).to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();
        stripped
            .split_whitespace()
            .filter(|t| t.len() > MAX_DISCARDED_LEN && !self.stopwords.contains(t))
            .map(|t| t.to_string())
            .collect()
    }
}

fn compile_phrase(rule: &PhraseRule, stopwords: &StopwordSet) -> Result<PhraseMerge, SurveyErrors> {
    let words: Vec<String> = rule
        .phrase
        .split_whitespace()
        .map(regex::escape)
        .collect();
    if words.is_empty() {
        return Err(SurveyErrors::EmptyPhrase);
    }
    let merged = rule.merged.as_str();
    let survives = merged.len() > MAX_DISCARDED_LEN
        && merged.chars().all(|c| c.is_ascii_lowercase())
        && !stopwords.contains(merged);
    if !survives {
        return Err(SurveyErrors::InvalidMergedToken(merged.to_string()));
    }
    // Words may be written together or apart: `WharfPlus` and `wharf  plus` both match.
    let pattern_s = format!(r"(?i)\b{}\b", words.join(r"\s*"));
    let pattern =
        Regex::new(&pattern_s).map_err(|_| SurveyErrors::InvalidPhrase(rule.phrase.clone()))?;
    Ok(PhraseMerge {
        pattern,
        merged: merged.to_string(),
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            warn!(
                "truncate_chars: response of more than {} characters truncated",
                max_chars
            );
            &text[..idx]
        }
        None => text,
    }
}

/// Tokenizes with the default rules.
pub fn tokenize_and_filter(text: Option<&str>) -> Vec<String> {
    DEFAULT_TOKENIZER.tokenize(text)
}

pub fn default_tokenizer() -> &'static Tokenizer {
    &*DEFAULT_TOKENIZER
}
