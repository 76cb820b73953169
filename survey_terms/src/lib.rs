mod aggregate;
mod config;
mod dataset;
pub mod encoding;
pub mod manual;
pub mod quick_start;
mod sectors;
pub mod stopwords;
mod tokenizer;

use log::info;

pub use crate::aggregate::{aggregate, TermFrequencyTable, TokenLookup};
pub use crate::config::*;
pub use crate::dataset::Dataset;
pub use crate::encoding::repair;
pub use crate::sectors::{lookup_sector, SectorTable, OTHER_SECTOR};
pub use crate::tokenizer::{default_tokenizer, tokenize_and_filter, Tokenizer};

/// Loads the records and summarizes one selection.
///
/// Arguments:
/// * `records` the responses, as read from the spreadsheet
/// * `rules` the phrase merges and extra stopwords to apply
/// * `sectors` the mapping from company to sector
/// * `selection` the sectors and companies to keep
/// * `max_terms` if provided, only the most frequent terms are returned
///
/// The only failures come from invalid rules. Any set of records, even
/// empty, gives a summary.
pub fn summarize(
    records: Vec<Record>,
    rules: &PipelineRules,
    sectors: &SectorTable,
    selection: &Selection,
    max_terms: Option<usize>,
) -> Result<TermSummary, SurveyErrors> {
    info!(
        "Processing {:?} records, {} phrase rules, {} extra stopwords",
        records.len(),
        rules.phrase_rules.len(),
        rules.extra_stopwords.len()
    );
    let tokenizer = Tokenizer::new(rules)?;
    let dataset = Dataset::load(records, sectors, &tokenizer);
    Ok(dataset.summary(selection, max_terms))
}
