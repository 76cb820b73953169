// Primitives for reading CSV files.

use std::fs::File;

use crate::survey::{
    io_common::{get_col_indexes, read_company, read_response},
    *,
};

pub fn read_csv_responses(path: &str, cfs: &FileSource) -> SurveyResult<Vec<Record>> {
    let mut records = get_records(path, cfs)?;

    let header_line = records
        .next()
        .context(EmptyInputSnafu { path })?
        .context(CsvLineParseSnafu { lineno: 1_usize })?;
    let header: Vec<Option<String>> = header_line.iter().map(|s| Some(s.to_string())).collect();
    debug!("read_csv_responses: header: {:?}", header);
    let (response_idx, company_idx) = get_col_indexes(&header, cfs, path)?;

    let mut res: Vec<Record> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        // Short lines are missing their trailing cells.
        let record = Record {
            response: line.get(response_idx).and_then(read_response),
            company: line.get(company_idx).and_then(read_company),
        };
        debug!("read_csv_responses: lineno: {:?} record: {:?}", lineno, record);
        res.push(record);
    }
    Ok(res)
}

fn get_records(path: &str, cfs: &FileSource) -> SurveyResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(cfs.delimiter_byte()?)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}
