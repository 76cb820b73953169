use std::collections::HashMap;
use std::path::Path;

use crate::survey::*;

// Survey exports write this for an unanswered question.
const MISSING_MARKER: &str = "None";

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string())
}

pub fn infer_provider(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" => Some("xlsx"),
        "csv" => Some("csv"),
        _ => None,
    }
}

/// The text of a response cell, or `None` when the cell holds nothing.
///
/// The text itself is kept verbatim.
pub fn read_response(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() || t == MISSING_MARKER {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn read_company(s: &str) -> Option<String> {
    read_response(s).map(|c| c.trim().to_string())
}

/// Given the header of a file, finds the positions of the response and company columns.
pub fn get_col_indexes(
    header: &[Option<String>],
    cfs: &FileSource,
    path: &str,
) -> SurveyResult<(usize, usize)> {
    // On duplicate names, the leftmost column wins.
    let col_names: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim().to_string(), idx)))
        .collect();

    debug!("get_col_indexes: col_names: {:?}", col_names);

    let find = |column: &str| -> SurveyResult<usize> {
        col_names
            .get(column)
            .cloned()
            .context(MissingColumnSnafu { column, path })
    };
    let response_idx = find(cfs.response_column())?;
    let company_idx = find(cfs.company_column())?;
    Ok((response_idx, company_idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_response("  Great food "), Some("  Great food ".to_string()));
        assert_eq!(read_response("None"), None);
        assert_eq!(read_response("   "), None);
        assert_eq!(read_company(" HSBC "), Some("HSBC".to_string()));
        assert_eq!(read_company(""), None);
    }

    #[test]
    fn providers() {
        assert_eq!(infer_provider("a/b/responses.XLSX"), Some("xlsx"));
        assert_eq!(infer_provider("responses.csv"), Some("csv"));
        assert_eq!(infer_provider("responses"), None);
        assert_eq!(simplify_file_name("a/b/responses.csv"), "responses.csv");
    }

    #[test]
    fn columns() {
        let header = vec![
            Some("Id".to_string()),
            None,
            Some(" Company".to_string()),
            Some("Response".to_string()),
        ];
        let cfs = FileSource::default();
        assert_eq!(get_col_indexes(&header, &cfs, "x.csv").unwrap(), (3, 2));
        let cfs = FileSource {
            response_column: Some("Answer".to_string()),
            ..FileSource::default()
        };
        assert!(matches!(
            get_col_indexes(&header, &cfs, "x.csv"),
            Err(SurveyCliError::MissingColumn { .. })
        ));
    }
}
