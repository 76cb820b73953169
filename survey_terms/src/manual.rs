/*!

This is the long-form manual for `survey_terms` and `surveycloud`.

## Input formats

The following formats are supported:
* `xlsx` Excel workbooks, as exported by most survey tools
* `csv` Comma Separated Values

Both formats are expected to have a header in the first row. Two columns are
read, the others are ignored:

|  Response                       | Company |
|---------------------------------|---------|
| Great talks, and the food!      | HSBC    |
| Itâ€™s a nice break in the week | Visitor |

The names of the columns can be changed with `--response-column` and
`--company-column`, or in the `fileSources` section of the configuration.
When several columns have the same name, the leftmost one is read.

Cells that are empty, that are not text (numbers, dates), or that contain the
word `None` are treated as missing. A missing response contributes no words
but is still listed in the table of responses.

### `xlsx`

The first worksheet is used, unless `--excel-worksheet-name` is given.

### `csv`

UTF-8 text with a header row. Quoted fields may span several lines. The
separator is a comma, unless `delimiter` is set in the `fileSources` entry.

## What happens to the text

1. **Encoding repair.** Text that was saved as UTF-8 and read back as
   Windows-1252 shows sequences such as `â€™` instead of `’`. These sequences
   (quotes, dashes, ellipsis, also when the mistake happened twice) are
   replaced by plain ASCII punctuation. This repaired text is what the table of
   responses shows.
2. **Phrase merges.** Some phrases are glued into a single word, ignoring case
   and spaces, so that brand names made of common words survive. By default,
   `Wharf Plus Event` becomes `wharfplusevent` and `Wharf Plus` becomes
   `wharfplus`.
3. **Cleaning.** The text is lowercased and everything that is not a letter
   from `a` to `z` or a space is deleted. Accented letters are deleted, not
   converted: `café` becomes `caf`.
4. **Filtering.** Words of one or two letters and stopwords are dropped. The
   stopwords are common English words, their contractions written without the
   apostrophe (`dont`, `youre`), and words that carry no information in event
   feedback (`feel`, `helps`, `lot`, `canary`, `wharf`, `plus`, ...).
5. **Counting.** The remaining words of the selected responses are counted.
   Every occurrence counts, so a response repeating a word three times adds
   three.

## Sectors

Every company is mapped to a sector. A built-in table covers the companies of
the original event; the `sectors` section of the configuration adds to it or
overrides it. Companies that are not in the table, missing companies and the
markers `1. Company not listed`, `Visitor` and `None` all go to the `Other`
sector. The markers are also left out of the leaderboard.

## Configuration

`surveycloud` comes with sensible defaults; a JSON configuration file is only
needed to change the rules.

```json
{
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
}
```

Notes:
- `filePath` is relative to the directory of the configuration file.
- when `phraseMerges` is given, it replaces the default merges. The order
  matters: put a longer phrase before a phrase it contains.
- a merged word must be made of lowercase letters, have at least 3 of them and
  not be a stopword, otherwise it would be filtered out right away and the
  configuration is rejected.
- flags given on the command line (`--sector`, `--company`, `--top`, `--out`)
  take precedence over the file.

## Output

The summary is a JSON document. `results.terms` lists the words from the most
to the least frequent (ties in alphabetical order), ready to be sized by a word
cloud renderer. When no response matches the filters, or when all the words
were filtered out, `results.terms` is empty and `results.message` says which
case happened.

 */
