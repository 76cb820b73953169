/*!

# Quick start with a survey export

This example runs the whole pipeline on the spreadsheet exported from an
online survey. It assumes the survey asked for a free-text answer and for the
company of the respondent.

**Getting the responses** In the survey tool, export the responses in the
**Excel format** (xlsx). Rename the column holding the answer to `Response`
and the column holding the company to `Company`, or pass the names of your
columns with `--response-column` and `--company-column`.

**Summarizing all the responses**

```bash
surveycloud -i feedback.xlsx --top 50
```

The program prints the summary in JSON format. The most frequent words come
first:

```text
[2025-10-21T09:55:59Z INFO  survey_terms::dataset] Dataset::load: processing 212 records
[2025-10-21T09:55:59Z INFO  survey_terms::dataset] Dataset::load: 212 records, 1873 tokens kept
[2025-10-21T09:55:59Z INFO  survey_terms::dataset] summary: 212 responses, 734 distinct terms, status Terms
{
  "config": {
    "title": "Word Cloud for All Responses",
    ...
  },
  "results": {
    "responses": 212,
    "terms": [
      { "term": "wharfplus", "count": 41 },
      { "term": "great", "count": 37 },
      ...
```

**Filtering** Responses can be restricted to some sectors or some companies.
The flags can be repeated:

```bash
surveycloud -i feedback.xlsx --sector "Banking & Finance" --sector "TMT"
surveycloud -i feedback.xlsx --company "HSBC" --out hsbc.json
```

**From a program** The same pipeline is available as a library. Load the
dataset once, then compute as many selections as needed:

```
use survey_terms::*;

let records = vec![
    Record::new(Some("The Wharf Plus event was great"), Some("HSBC")),
    Record::new(Some("Great food, great people"), Some("KPMG")),
    Record::new(None, Some("Visitor")),
];
let tokenizer = Tokenizer::new(&PipelineRules::default_rules())?;
let dataset = Dataset::load(records, &SectorTable::default_table(), &tokenizer);

let all = dataset.term_frequencies(&Selection::all());
assert_eq!(all.get("great"), 3);
assert_eq!(all.get("wharfplusevent"), 1);

let visitors = dataset.summary(&Selection::all().with_company("Visitor"), None);
assert_eq!(visitors.status, SummaryStatus::NoText);
# Ok::<(), SurveyErrors>(())
```

It is the end of this quick start. The [manual](../manual/index.html) describes
the input formats, the text processing and the configuration file.

*/
