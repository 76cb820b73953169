use clap::Parser;

/// This program summarizes the free-text answers of a survey into the word frequencies of a word cloud.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration with the sources, filters and text rules.
    /// For more information about the file format, read the manual of the survey_terms crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, surveycloud will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The spreadsheet with the responses. Setting this option overrides the
    /// sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv, default from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (repeatable) Only keeps the responses of companies in this sector.
    #[clap(long = "sector", value_parser)]
    pub sectors: Vec<String>,

    /// (repeatable) Only keeps the responses of this company.
    #[clap(long = "company", value_parser)]
    pub companies: Vec<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default Response) The header of the column holding the answers.
    #[clap(long, value_parser)]
    pub response_column: Option<String>,

    /// (default Company) The header of the column holding the company of the respondent.
    #[clap(long, value_parser)]
    pub company_column: Option<String>,

    /// (number, optional) Only outputs the most frequent terms.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
