use log::{debug, info};

use std::collections::{BTreeSet, HashMap};

use crate::aggregate::{aggregate, TermFrequencyTable, TokenLookup};
use crate::config::*;
use crate::sectors::{SectorTable, OTHER_SECTOR};
use crate::tokenizer::Tokenizer;

#[derive(Eq, PartialEq, Debug, Clone)]
struct LoadedRecord {
    record: Record,
    sector: String,
    normalized: NormalizedResponse,
}

/// An uploaded set of responses, with everything the filters need computed upfront.
///
/// The dataset does not change after loading. Loading a new file means
/// building a new dataset.
///
/// ```
/// use survey_terms::*;
///
/// let tokenizer = Tokenizer::new(&PipelineRules::default_rules())?;
/// let dataset = Dataset::load(
///     vec![
///         Record::new(Some("Great talks"), Some("HSBC")),
///         Record::new(Some("Great food"), Some("KPMG")),
///     ],
///     &SectorTable::default_table(),
///     &tokenizer,
/// );
/// let terms = dataset.term_frequencies(&Selection::all().with_sector("Professional"));
/// assert_eq!(terms.get("great"), 1);
/// assert_eq!(terms.get("food"), 1);
/// # Ok::<(), SurveyErrors>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LoadedRecord>,
    // Companies that appear in the data but mean "no company".
    unlisted: BTreeSet<String>,
}

impl Dataset {
    pub fn load(records: Vec<Record>, sectors: &SectorTable, tokenizer: &Tokenizer) -> Dataset {
        info!("Dataset::load: processing {} records", records.len());
        let mut unlisted: BTreeSet<String> = BTreeSet::new();
        let mut loaded: Vec<LoadedRecord> = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let company = record.company.as_deref();
            let sector = sectors.lookup_sector(company);
            if let Some(c) = company {
                if sectors.is_unlisted(Some(c)) {
                    unlisted.insert(c.to_string());
                }
            }
            let normalized = tokenizer.normalize(record.response.as_deref());
            debug!(
                "Dataset::load: record {}: company {:?} sector {:?} tokens {:?}",
                idx, company, sector, normalized.clean_tokens
            );
            loaded.push(LoadedRecord {
                record,
                sector,
                normalized,
            });
        }
        let num_tokens: usize = loaded.iter().map(|r| r.normalized.clean_tokens.len()).sum();
        info!(
            "Dataset::load: {} records, {} tokens kept",
            loaded.len(),
            num_tokens
        );
        Dataset {
            records: loaded,
            unlisted,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.0).map(|r| &r.record)
    }

    pub fn sector(&self, id: RecordId) -> Option<&str> {
        self.records.get(id.0).map(|r| r.sector.as_str())
    }

    pub fn normalized(&self, id: RecordId) -> Option<&NormalizedResponse> {
        self.records.get(id.0).map(|r| &r.normalized)
    }

    /// The records that pass the filter, in dataset order.
    pub fn select(&self, selection: &Selection) -> Vec<RecordId> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| selection.matches(&r.sector, r.record.company.as_deref()))
            .map(|(idx, _)| RecordId(idx))
            .collect()
    }

    pub fn term_frequencies(&self, selection: &Selection) -> TermFrequencyTable {
        let selected = self.select(selection);
        debug!(
            "term_frequencies: {} records selected by {:?}",
            selected.len(),
            selection
        );
        aggregate(selected, self)
    }

    /// The responses as they should be shown to a reader: repaired but not filtered.
    pub fn display_rows(&self, selection: &Selection) -> Vec<DisplayRow> {
        self.select(selection)
            .into_iter()
            .map(|id| {
                let r = &self.records[id.0];
                DisplayRow {
                    display_text: r.normalized.display_text.clone(),
                    company: r.record.company.clone(),
                }
            })
            .collect()
    }

    /// Number of responses per named company, the most active first.
    pub fn leaderboard(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in self.records.iter() {
            if let Some(c) = r.record.company.as_deref() {
                if !c.trim().is_empty() && !self.unlisted.contains(c) {
                    *counts.entry(c).or_insert(0) += 1;
                }
            }
        }
        let mut res: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(c, n)| (c.to_string(), n))
            .collect();
        res.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        res
    }

    /// The sectors present in the data, sorted, with the catch-all sector last.
    pub fn sector_options(&self) -> Vec<String> {
        let present: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.sector.as_str())
            .filter(|s| *s != OTHER_SECTOR)
            .collect();
        let mut res: Vec<String> = present.into_iter().map(|s| s.to_string()).collect();
        res.push(OTHER_SECTOR.to_string());
        res
    }

    /// The companies present in the data, sorted, optionally restricted to one sector.
    pub fn company_options(&self, sector: Option<&str>) -> Vec<String> {
        let present: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| sector.map_or(true, |s| r.sector == s))
            .filter_map(|r| r.record.company.as_deref())
            .collect();
        present.into_iter().map(|s| s.to_string()).collect()
    }

    /// Computes the table, the rows and the title of a selection.
    ///
    /// `max_terms` keeps only the most frequent terms.
    pub fn summary(&self, selection: &Selection, max_terms: Option<usize>) -> TermSummary {
        let selected = self.select(selection);
        let responses = selected.len();
        let table = aggregate(selected, self);
        let terms = match max_terms {
            Some(n) => table.top(n),
            None => table.ranked(),
        };
        let status = if responses == 0 {
            SummaryStatus::NoResponses
        } else if table.is_empty() {
            SummaryStatus::NoText
        } else {
            SummaryStatus::Terms
        };
        info!(
            "summary: {} responses, {} distinct terms, status {:?}",
            responses,
            table.len(),
            status
        );
        TermSummary {
            title: self.title(selection),
            status,
            responses,
            terms,
            rows: self.display_rows(selection),
        }
    }

    /// A heading describing what the selection shows.
    pub fn title(&self, selection: &Selection) -> String {
        let quoted = |names: &BTreeSet<String>| -> String {
            names
                .iter()
                .map(|n| format!("'{}'", n))
                .collect::<Vec<String>>()
                .join(", ")
        };
        if !selection.companies.is_empty() {
            format!("Word Cloud for {}", quoted(&selection.companies))
        } else if selection.sectors.len() == 1 {
            format!("Word Cloud for {} Sector", quoted(&selection.sectors))
        } else if !selection.sectors.is_empty() {
            format!("Word Cloud for {} Sectors", quoted(&selection.sectors))
        } else {
            "Word Cloud for All Responses".to_string()
        }
    }
}

impl TokenLookup for Dataset {
    fn tokens(&self, id: RecordId) -> Option<&[String]> {
        self.records
            .get(id.0)
            .map(|r| r.normalized.clean_tokens.as_slice())
    }
}
