// ********* Input data structures ***********

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::Display;

/// One survey response, as handed over by the spreadsheet loader.
///
/// Both fields are optional: spreadsheet cells may be blank or hold
/// non-text values, which the loader turns into `None`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Record {
    pub response: Option<String>,
    pub company: Option<String>,
}

impl Record {
    pub fn new(response: Option<&str>, company: Option<&str>) -> Record {
        Record {
            response: response.map(|s| s.to_string()),
            company: company.map(|s| s.to_string()),
        }
    }
}

/// The position of a record inside its dataset.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct RecordId(pub usize);

/// The derived form of a record, computed once when the dataset is loaded.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NormalizedResponse {
    /// The response with the mis-decoded punctuation repaired, otherwise verbatim.
    pub display_text: String,
    /// The filtered lowercase tokens, in their original order.
    pub clean_tokens: Vec<String>,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

/// A row of the raw-response table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DisplayRow {
    pub display_text: String,
    pub company: Option<String>,
}

/// What a renderer has to draw for a selection.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SummaryStatus {
    /// At least one term survived the filters.
    Terms,
    /// No record matches the selection.
    NoResponses,
    /// Records match, but all their words were filtered out.
    NoText,
}

/// Everything shown for one selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TermSummary {
    pub title: String,
    pub status: SummaryStatus,
    pub responses: usize,
    /// Ranked, most frequent first.
    pub terms: Vec<TermCount>,
    pub rows: Vec<DisplayRow>,
}

/// Errors raised while building a pipeline from its rules.
///
/// Repairing, tokenizing and aggregating never fail.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyErrors {
    EmptyPhrase,
    InvalidMergedToken(String),
    InvalidPhrase(String),
}

impl Error for SurveyErrors {}

impl Display for SurveyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyErrors::EmptyPhrase => write!(f, "a phrase merge rule has an empty phrase"),
            SurveyErrors::InvalidMergedToken(t) => write!(
                f,
                "merged token {:?} would not survive filtering (lowercase ascii letters, at least 3, not a stopword)",
                t
            ),
            SurveyErrors::InvalidPhrase(p) => write!(f, "cannot compile phrase {:?}", p),
        }
    }
}

// ********* Configuration **********

/// Rewrites a multi-word phrase into a single token before the text is split.
///
/// Used to keep brand names that are made of stopwords, such as `Wharf Plus`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PhraseRule {
    pub phrase: String,
    pub merged: String,
}

impl PhraseRule {
    pub fn new(phrase: &str, merged: &str) -> PhraseRule {
        PhraseRule {
            phrase: phrase.to_string(),
            merged: merged.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PipelineRules {
    /// Applied in order: a longer phrase must come before any phrase it contains.
    pub phrase_rules: Vec<PhraseRule>,
    pub extra_stopwords: Vec<String>,
    /// Responses longer than this (in characters) are truncated before tokenizing.
    pub max_response_chars: usize,
}

impl PipelineRules {
    pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 20_000;

    pub fn default_rules() -> PipelineRules {
        PipelineRules {
            phrase_rules: vec![
                PhraseRule::new("wharf plus event", "wharfplusevent"),
                PhraseRule::new("wharf plus", "wharfplus"),
            ],
            extra_stopwords: Vec::new(),
            max_response_chars: PipelineRules::DEFAULT_MAX_RESPONSE_CHARS,
        }
    }
}

impl Default for PipelineRules {
    fn default() -> Self {
        PipelineRules::default_rules()
    }
}

/// The filter chosen by the analyst.
///
/// An empty set means that dimension is not restricted.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Selection {
    pub sectors: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

impl Selection {
    pub fn all() -> Selection {
        Selection::default()
    }

    pub fn with_sector(mut self, sector: &str) -> Selection {
        self.sectors.insert(sector.to_string());
        self
    }

    pub fn with_company(mut self, company: &str) -> Selection {
        self.companies.insert(company.to_string());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.sectors.is_empty() && self.companies.is_empty()
    }

    /// A record without a company only passes when companies are not restricted.
    pub fn matches(&self, sector: &str, company: Option<&str>) -> bool {
        let sector_ok = self.sectors.is_empty() || self.sectors.contains(sector);
        let company_ok = self.companies.is_empty()
            || company.map_or(false, |c| self.companies.contains(c));
        sector_ok && company_ok
    }
}
