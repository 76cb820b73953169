use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use survey_terms::*;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;
use crate::survey::io_common::{infer_provider, simplify_file_name};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SurveyCliError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("The file {path} is empty, a header row is expected"))]
    EmptyInput { path: String },
    #[snafu(display("Cannot find the column {column:?} in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid text rules"))]
    InvalidRules { source: SurveyErrors },
    #[snafu(display("Provider not implemented: {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No input: pass --input or a configuration with fileSources"))]
    MissingInput {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyCliError>;

const NO_RESPONSES_MESSAGE: &str = "No responses found for the selected filters.";
const NO_TEXT_MESSAGE: &str = "No text available to generate a word cloud for the selected filter.";

fn status_message(status: SummaryStatus) -> Option<&'static str> {
    match status {
        SummaryStatus::Terms => None,
        SummaryStatus::NoResponses => Some(NO_RESPONSES_MESSAGE),
        SummaryStatus::NoText => Some(NO_TEXT_MESSAGE),
    }
}

fn read_records(root_path: &Path, cfs: &FileSource) -> SurveyResult<Vec<Record>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read survey file {:?}", p2);
    let provider = match cfs.provider.clone() {
        Some(x) => x,
        None => infer_provider(&p2)
            .map(|s| s.to_string())
            .context(UnknownProviderSnafu {
                provider: p2.clone(),
            })?,
    };
    let records = match provider.as_str() {
        "xlsx" | "excel" => io_xlsx::read_excel_responses(&p2, cfs)?,
        "csv" => io_csv::read_csv_responses(&p2, cfs)?,
        x => {
            return UnknownProviderSnafu {
                provider: x.to_string(),
            }
            .fail()
        }
    };
    info!("read_records: {} records in {:?}", records.len(), p2);
    Ok(records)
}

// The sources given on the command line take precedence over the configuration.
fn file_sources(args: &Args, config: &SurveyConfig) -> SurveyResult<Vec<FileSource>> {
    let mut sources: Vec<FileSource> = match args.input.clone() {
        Some(input) => vec![FileSource {
            provider: args.input_type.clone(),
            file_path: input,
            ..FileSource::default()
        }],
        None => config.file_sources.clone(),
    };
    ensure!(!sources.is_empty(), MissingInputSnafu {});
    for cfs in sources.iter_mut() {
        if args.response_column.is_some() {
            cfs.response_column = args.response_column.clone();
        }
        if args.company_column.is_some() {
            cfs.company_column = args.company_column.clone();
        }
        if args.excel_worksheet_name.is_some() {
            cfs.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
    }
    Ok(sources)
}

fn build_selection(args: &Args, config: &SurveyConfig) -> Selection {
    let mut selection = if args.sectors.is_empty() && args.companies.is_empty() {
        config
            .filters
            .clone()
            .map(|f| f.to_selection())
            .unwrap_or_default()
    } else {
        Selection::all()
    };
    for s in args.sectors.iter() {
        selection = selection.with_sector(s);
    }
    for c in args.companies.iter() {
        selection = selection.with_company(c);
    }
    selection
}

fn build_summary_js(
    config: &SurveyConfig,
    sources: &[String],
    selection: &Selection,
    dataset: &Dataset,
    summary: &TermSummary,
) -> JSValue {
    let c = OutputConfig {
        title: summary.title.clone(),
        name: config.output_settings.as_ref().and_then(|o| o.name.clone()),
        filters: FiltersConfig::from_selection(selection),
        source: sources.to_vec(),
    };
    let terms: Vec<JSValue> = summary
        .terms
        .iter()
        .map(|t| json!({"term": t.term, "count": t.count}))
        .collect();
    let rows: Vec<JSValue> = summary
        .rows
        .iter()
        .map(|r| json!({"response": r.display_text, "company": r.company}))
        .collect();
    let leaderboard: Vec<JSValue> = dataset
        .leaderboard()
        .iter()
        .map(|(company, n)| json!({"company": company, "responses": n}))
        .collect();
    // A single sector narrows the choice of companies.
    let sector_filter = if selection.sectors.len() == 1 {
        selection.sectors.iter().next().map(|s| s.as_str())
    } else {
        None
    };
    let mut results = json!({
        "responses": summary.responses,
        "terms": terms,
        "rows": rows,
        "leaderboard": leaderboard,
        "sectors": dataset.sector_options(),
        "companies": dataset.company_options(sector_filter),
    });
    if let Some(msg) = status_message(summary.status) {
        results["message"] = json!(msg);
    }
    json!({
        "config": c,
        "results": results })
}

// The configuration, and the directory its file paths are relative to.
fn load_config(args: &Args) -> SurveyResult<(SurveyConfig, PathBuf)> {
    match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            let root_p = Path::new(config_path.as_str())
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Ok((config, root_p))
        }
        None => Ok((SurveyConfig::default(), PathBuf::new())),
    }
}

/// Reads the sources, applies the filters and assembles the JSON summary.
fn summarize_sources(args: &Args, config: &SurveyConfig, root_p: PathBuf) -> SurveyResult<JSValue> {
    info!("config: {:?}", config);

    // Validate the rules before reading any data.
    let rules = validate_rules(&config.rules)?;
    let tokenizer = Tokenizer::new(&rules).context(InvalidRulesSnafu {})?;
    let max_terms = args
        .top
        .or_else(|| config.rules.as_ref().and_then(|r| r.max_terms));
    if max_terms == Some(0) {
        whatever!("Failed to understand the number of terms: it must be positive")
    }

    let mut sectors = SectorTable::default_table();
    if let Some(extra) = config.sectors.as_ref() {
        sectors.extend(extra.iter().map(|(c, s)| (c.as_str(), s.as_str())));
    }

    let sources = file_sources(args, config)?;
    let mut records: Vec<Record> = Vec::new();
    // Sources given on the command line are relative to the working directory.
    let root_p = if args.input.is_some() {
        PathBuf::new()
    } else {
        root_p
    };
    for cfs in sources.iter() {
        let mut file_data = read_records(&root_p, cfs)?;
        records.append(&mut file_data);
    }

    let dataset = Dataset::load(records, &sectors, &tokenizer);
    let selection = build_selection(args, config);
    debug!("summarize_sources: selection: {:?}", selection);
    let summary = dataset.summary(&selection, max_terms);
    if let Some(msg) = status_message(summary.status) {
        warn!("summarize_sources: {}", msg);
    }

    let source_names: Vec<String> = sources
        .iter()
        .map(|cfs| simplify_file_name(&cfs.file_path))
        .collect();
    Ok(build_summary_js(
        config,
        &source_names,
        &selection,
        &dataset,
        &summary,
    ))
}

fn write_summary(pretty_js: &str, out: Option<String>) -> SurveyResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("write_summary: writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

pub fn run_summary(args: &Args) -> SurveyResult<()> {
    let (config, root_p) = load_config(args)?;
    let result_js = summarize_sources(args, &config, root_p)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out = args.out.clone().or_else(|| {
        config
            .output_settings
            .as_ref()
            .and_then(|o| o.output_file.clone())
    });
    write_summary(&pretty_js_stats, out)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.clone() {
        let summary_ref = read_summary(&summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn compute_summary(args: &Args) -> SurveyResult<JSValue> {
        let (config, root_p) = load_config(args)?;
        summarize_sources(args, &config, root_p)
    }

    // Each test works in its own directory.
    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("surveycloud-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> String {
        let p = dir.join(name);
        let mut f = fs::File::create(&p).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        p.display().to_string()
    }

    const RESPONSES: &str = "Timestamp,Response,Company\n\
        1,\"I feel the WharfPlus event helps a lot, it's great!\",HSBC\n\
        2,\"It\u{e2}\u{20ac}\u{2122}s a great break\",KPMG\n\
        3,The and of it is,Visitor\n\
        4,None,\n\
        5,\"Great talks, great food\",Acme Widgets\n";

    fn input_args(path: &str) -> Args {
        Args {
            input: Some(path.to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn summary_of_all_responses() {
        init();
        let dir = test_dir("all");
        let input = write_file(&dir, "responses.csv", RESPONSES);
        let js = compute_summary(&input_args(&input)).unwrap();
        assert_eq!(js["config"]["title"], json!("Word Cloud for All Responses"));
        assert_eq!(js["config"]["source"], json!(["responses.csv"]));
        assert_eq!(js["results"]["responses"], json!(5));
        assert_eq!(js["results"]["terms"][0], json!({"term": "great", "count": 4}));
        assert_eq!(js["results"]["rows"][1]["response"], json!("It's a great break"));
        assert_eq!(js["results"]["rows"][3]["response"], json!(""));
        assert_eq!(js["results"]["rows"][3]["company"], json!(null));
        assert_eq!(js["results"]["sectors"].as_array().unwrap().last(), Some(&json!("Other")));
        assert!(js["results"].get("message").is_none());
    }

    #[test]
    fn filters_from_the_command_line() {
        init();
        let dir = test_dir("filters");
        let input = write_file(&dir, "responses.csv", RESPONSES);
        let args = Args {
            companies: vec!["HSBC".to_string()],
            ..input_args(&input)
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["config"]["title"], json!("Word Cloud for 'HSBC'"));
        assert_eq!(
            js["results"]["terms"],
            json!([{"term": "great", "count": 1}, {"term": "wharfplusevent", "count": 1}])
        );

        let args = Args {
            companies: vec!["Visitor".to_string()],
            ..input_args(&input)
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["results"]["terms"], json!([]));
        assert_eq!(js["results"]["message"], json!(NO_TEXT_MESSAGE));

        let args = Args {
            sectors: vec!["Energy".to_string()],
            ..input_args(&input)
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["results"]["responses"], json!(0));
        assert_eq!(js["results"]["message"], json!(NO_RESPONSES_MESSAGE));
    }

    #[test]
    fn configuration_file() {
        init();
        let dir = test_dir("config");
        write_file(
            &dir,
            "feedback.csv",
            "Answer;Firm\n\"Lovely venue, lovely food hall\";Acme Widgets\nFood hall queues;KPMG\n",
        );
        let config_path = write_file(
            &dir,
            "config.json",
            r#"{
              "outputSettings": { "name": "Autumn event" },
              "fileSources": [ { "provider": "csv", "filePath": "feedback.csv", "responseColumn": "Answer", "companyColumn": "Firm", "delimiter": ";" } ],
              "filters": { "sectors": ["Manufacturing"] },
              "rules": { "phraseMerges": [ { "phrase": "food hall", "merged": "foodhall" } ], "extraStopwords": ["venue"] },
              "sectors": { "Acme Widgets": "Manufacturing" }
            }"#,
        );
        let args = Args {
            config: Some(config_path),
            ..Args::default()
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["config"]["name"], json!("Autumn event"));
        assert_eq!(js["config"]["title"], json!("Word Cloud for 'Manufacturing' Sector"));
        assert_eq!(
            js["results"]["terms"],
            json!([{"term": "lovely", "count": 2}, {"term": "foodhall", "count": 1}])
        );
        assert_eq!(js["results"]["companies"], json!(["Acme Widgets"]));
    }

    #[test]
    fn missing_column() {
        init();
        let dir = test_dir("column");
        let input = write_file(&dir, "responses.csv", "Answer,Company\nGreat,HSBC\n");
        let err = compute_summary(&input_args(&input)).unwrap_err();
        assert!(matches!(err, SurveyCliError::MissingColumn { ref column, .. } if column == "Response"));
    }

    #[test]
    fn zero_terms_is_rejected() {
        init();
        let dir = test_dir("top");
        let input = write_file(&dir, "responses.csv", RESPONSES);
        let args = Args {
            top: Some(0),
            ..input_args(&input)
        };
        assert!(matches!(
            compute_summary(&args),
            Err(SurveyCliError::Whatever { .. })
        ));
        let args = Args {
            top: Some(1),
            ..input_args(&input)
        };
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["results"]["terms"], json!([{"term": "great", "count": 4}]));
    }

    #[test]
    fn missing_input() {
        init();
        let err = compute_summary(&Args::default()).unwrap_err();
        assert!(matches!(err, SurveyCliError::MissingInput {}));
        let err = compute_summary(&input_args("responses.ods")).unwrap_err();
        assert!(matches!(err, SurveyCliError::UnknownProvider { .. }));
    }

    #[test]
    fn reference_check() {
        init();
        let dir = test_dir("reference");
        let input = write_file(&dir, "responses.csv", RESPONSES);
        let out = dir.join("summary.json").display().to_string();
        let args = Args {
            out: Some(out.clone()),
            ..input_args(&input)
        };
        run_summary(&args).unwrap();

        // The summary written out is its own reference.
        let args = Args {
            reference: Some(out.clone()),
            out: Some(dir.join("summary2.json").display().to_string()),
            ..input_args(&input)
        };
        run_summary(&args).unwrap();

        let args = Args {
            reference: Some(out),
            out: Some(dir.join("summary3.json").display().to_string()),
            top: Some(1),
            ..input_args(&input)
        };
        assert!(run_summary(&args).is_err());
    }
}
