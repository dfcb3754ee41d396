use std::path::Path;

use crate::calc::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Picks the party out of the cells of a row.
///
/// Rows without a name and without votes are skipped (trailing blank rows are common in
/// spreadsheets).
pub fn parse_row(
    cells: &[String],
    cfs: &FileSource,
    lineno: usize,
) -> CalcResult<Option<ParsedParty>> {
    let id_idx = cfs.id_column_index()?;
    let name_idx = cfs.name_column_index()?;
    let votes_idx = cfs.votes_column_index()?;

    if cells.iter().all(|c| c.trim().is_empty()) {
        debug!("parse_row: line {}: blank row", lineno);
        return Ok(None);
    }

    let name = cells
        .get(name_idx)
        .context(LineTooShortSnafu { lineno })?
        .trim()
        .to_string();
    let votes = cells
        .get(votes_idx)
        .context(LineTooShortSnafu { lineno })?
        .trim()
        .to_string();
    let id = cells.get(id_idx).map(|s| s.trim().to_string());

    if name.is_empty() && votes.is_empty() {
        debug!("parse_row: line {}: no party", lineno);
        return Ok(None);
    }

    Ok(Some(ParsedParty { id, name, votes }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_columns() {
        let cfs = FileSource::new("csv", "votes.csv");
        let pp = parse_row(&cells(&["a", " Alpha ", "100"]), &cfs, 2).unwrap();
        assert_eq!(
            pp,
            Some(ParsedParty {
                id: Some("a".to_string()),
                name: "Alpha".to_string(),
                votes: "100".to_string(),
            })
        );
        assert_eq!(parse_row(&cells(&["", " ", ""]), &cfs, 3).unwrap(), None);
        assert_eq!(parse_row(&cells(&["x", "", ""]), &cfs, 4).unwrap(), None);
        assert!(matches!(
            parse_row(&cells(&["a", "Alpha"]), &cfs, 5),
            Err(CalcError::LineTooShort { lineno: 5 })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/votes.csv"), "votes.csv");
        assert_eq!(simplify_file_name("votes.csv"), "votes.csv");
    }
}
