use crate::survey::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

/// The `config` section of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub name: Option<String>,
    pub filters: FiltersConfig,
    pub source: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileSource {
    /// `xlsx` or `csv`. Guessed from the extension of the file when missing.
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "responseColumn")]
    pub response_column: Option<String>,
    #[serde(rename = "companyColumn")]
    pub company_column: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    /// Single character separating the fields of a csv file.
    pub delimiter: Option<String>,
}

impl FileSource {
    pub const DEFAULT_RESPONSE_COLUMN: &'static str = "Response";
    pub const DEFAULT_COMPANY_COLUMN: &'static str = "Company";

    pub fn response_column(&self) -> &str {
        self.response_column
            .as_deref()
            .unwrap_or(FileSource::DEFAULT_RESPONSE_COLUMN)
    }

    pub fn company_column(&self) -> &str {
        self.company_column
            .as_deref()
            .unwrap_or(FileSource::DEFAULT_COMPANY_COLUMN)
    }

    pub fn delimiter_byte(&self) -> SurveyResult<u8> {
        match self.delimiter.as_deref() {
            None => Ok(b','),
            Some(d) if d.len() == 1 => Ok(d.as_bytes()[0]),
            Some(d) => whatever!("The csv delimiter must be a single character, got {:?}", d),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct FiltersConfig {
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
}

impl FiltersConfig {
    pub fn to_selection(&self) -> Selection {
        Selection {
            sectors: self.sectors.iter().cloned().collect::<BTreeSet<String>>(),
            companies: self.companies.iter().cloned().collect::<BTreeSet<String>>(),
        }
    }

    pub fn from_selection(selection: &Selection) -> FiltersConfig {
        FiltersConfig {
            sectors: selection.sectors.iter().cloned().collect(),
            companies: selection.companies.iter().cloned().collect(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PhraseMergeConfig {
    pub phrase: String,
    pub merged: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(rename = "phraseMerges")]
    pub phrase_merges: Option<Vec<PhraseMergeConfig>>,
    #[serde(rename = "extraStopwords")]
    pub extra_stopwords: Option<Vec<String>>,
    #[serde(rename = "maxResponseChars")]
    pub max_response_chars: Option<usize>,
    #[serde(rename = "maxTerms")]
    pub max_terms: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "fileSources", default)]
    pub file_sources: Vec<FileSource>,
    pub filters: Option<FiltersConfig>,
    pub rules: Option<RulesConfig>,
    /// Company to sector, added to the built-in table.
    pub sectors: Option<BTreeMap<String, String>>,
}

pub fn parse_config(contents: &str) -> SurveyResult<SurveyConfig> {
    let config: SurveyConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    parse_config(&contents)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Turns the `rules` section into the rules of the pipeline.
///
/// Missing entries keep their defaults. The phrase merges, when present,
/// replace the default ones.
pub fn validate_rules(rules: &Option<RulesConfig>) -> SurveyResult<PipelineRules> {
    let mut res = PipelineRules::default_rules();
    let rules = match rules {
        Some(r) => r,
        None => return Ok(res),
    };
    if let Some(merges) = rules.phrase_merges.as_ref() {
        res.phrase_rules = merges
            .iter()
            .map(|m| PhraseRule::new(&m.phrase, &m.merged))
            .collect();
    }
    if let Some(extra) = rules.extra_stopwords.as_ref() {
        res.extra_stopwords = extra.clone();
    }
    match rules.max_response_chars {
        Some(0) => {
            whatever!("Failed to understand maxResponseChars option: it must be positive")
        }
        Some(x) => {
            res.max_response_chars = x;
        }
        None => {}
    }
    if rules.max_terms == Some(0) {
        whatever!("Failed to understand maxTerms option: it must be positive")
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_configuration() {
        let config = parse_config(
            r#"{
              "outputSettings": { "name": "Autumn event feedback", "outputFile": "summary.json" },
              "fileSources": [
                { "provider": "xlsx", "filePath": "responses.xlsx", "responseColumn": "Response", "companyColumn": "Company" }
              ],
              "filters": { "sectors": ["Professional"], "companies": [] },
              "rules": {
                "phraseMerges": [ { "phrase": "food hall", "merged": "foodhall" } ],
                "extraStopwords": ["venue"],
                "maxResponseChars": 20000,
                "maxTerms": 200
              },
              "sectors": { "Acme Widgets": "Manufacturing, Industrial & Energy" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.file_sources.len(), 1);
        assert_eq!(config.file_sources[0].provider.as_deref(), Some("xlsx"));
        assert_eq!(config.file_sources[0].company_column(), "Company");
        assert_eq!(
            config.filters.unwrap().to_selection(),
            Selection::all().with_sector("Professional")
        );
        let rules = validate_rules(&config.rules).unwrap();
        assert_eq!(rules.phrase_rules, vec![PhraseRule::new("food hall", "foodhall")]);
        assert_eq!(rules.extra_stopwords, vec!["venue".to_string()]);
        assert_eq!(config.rules.unwrap().max_terms, Some(200));
    }

    #[test]
    fn empty_configuration_keeps_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, SurveyConfig::default());
        assert_eq!(
            validate_rules(&config.rules).unwrap(),
            PipelineRules::default_rules()
        );
        let cfs = FileSource::default();
        assert_eq!(cfs.response_column(), "Response");
        assert_eq!(cfs.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn invalid_configuration() {
        assert!(matches!(
            parse_config("{\"rules\": 3}"),
            Err(SurveyCliError::ParsingJson { .. })
        ));
        let rules = Some(RulesConfig {
            max_response_chars: Some(0),
            ..RulesConfig::default()
        });
        assert!(validate_rules(&rules).is_err());
        let cfs = FileSource {
            delimiter: Some("::".to_string()),
            ..FileSource::default()
        };
        assert!(cfs.delimiter_byte().is_err());
    }
}
