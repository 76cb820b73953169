use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::survey::{
    io_common::{get_col_indexes, read_company, read_response},
    *,
};

pub fn read_excel_responses(path: &str, cfs: &FileSource) -> SurveyResult<Vec<Record>> {
    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header: Vec<Option<String>> = iter
        .next()
        .context(EmptyInputSnafu { path })?
        .iter()
        .map(cell_text)
        .collect();
    debug!("read_excel_responses: header: {:?}", header);
    let (response_idx, company_idx) = get_col_indexes(&header, cfs, path)?;

    let mut res: Vec<Record> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let record = Record {
            response: row
                .get(response_idx)
                .and_then(cell_text)
                .as_deref()
                .and_then(read_response),
            company: row
                .get(company_idx)
                .and_then(cell_text)
                .as_deref()
                .and_then(read_company),
        };
        debug!("read_excel_responses: idx: {:?} record: {:?}", idx, record);
        res.push(record);
    }
    Ok(res)
}

// Numbers, dates and errors are not answers.
fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn get_range(path: &str, cfs: &FileSource) -> SurveyResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    let wrange = if let Some(worksheet_name) = worksheet_name_o {
        workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyInputSnafu { path })?
            .context(OpeningExcelSnafu { path })?
    };
    Ok(wrange)
}
