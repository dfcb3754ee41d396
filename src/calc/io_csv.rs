// Primitives for reading CSV files.

use crate::calc::{io_common::parse_row, *};

pub fn read_csv_votes(path: &str, cfs: &FileSource) -> CalcResult<Vec<ParsedParty>> {
    // The index starts at 1 to respect most conventions in the excel world
    let first_row = cfs.first_vote_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<ParsedParty> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate().skip(first_row) {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_votes: lineno: {:?} row: {:?}", lineno, &cells);
        if let Some(pp) = parse_row(&cells, cfs, lineno)? {
            res.push(pp);
        }
    }
    Ok(res)
}
