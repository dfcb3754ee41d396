use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::calc::{io_common::parse_row, *};

pub fn read_excel_votes(path: &str, cfs: &FileSource) -> CalcResult<Vec<ParsedParty>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match &cfs.excel_worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?,
    }
    .context(OpeningExcelSnafu { path })?;

    let first_row = cfs.first_vote_row_index()?;
    debug!("read_excel_votes: first_row: {:?}", first_row);

    let mut res: Vec<ParsedParty> = Vec::new();
    for (idx, row) in wrange.rows().enumerate().skip(first_row) {
        let lineno = idx + 1;
        debug!("read_excel_votes: row {}: {:?}", lineno, row);
        let mut cells: Vec<String> = Vec::new();
        for cell in row.iter() {
            cells.push(read_cell_calamine(cell, lineno as u64)?);
        }
        if let Some(pp) = parse_row(&cells, cfs, lineno)? {
            res.push(pp);
        }
    }
    Ok(res)
}

// Vote counts are often stored as floats by spreadsheets.
fn read_cell_calamine(cell: &DataType, lineno: u64) -> CalcResult<String> {
    match cell {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
            Ok((*f as i64).to_string())
        }
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(
            read_cell_calamine(&DataType::String(" Alpha ".to_string()), 1).unwrap(),
            "Alpha"
        );
        assert_eq!(read_cell_calamine(&DataType::Int(42), 1).unwrap(), "42");
        assert_eq!(read_cell_calamine(&DataType::Float(1200.0), 1).unwrap(), "1200");
        assert_eq!(read_cell_calamine(&DataType::Float(12.5), 1).unwrap(), "12.5");
        assert_eq!(read_cell_calamine(&DataType::Empty, 1).unwrap(), "");
        assert!(matches!(
            read_cell_calamine(&DataType::Bool(true), 7),
            Err(CalcError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    fn votes_xlsx() -> String {
        format!("{}/testdata/excel_votes/votes.xlsx", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn named_worksheet() {
        let mut cfs = FileSource::new("xlsx", "votes.xlsx");
        cfs.excel_worksheet_name = Some("Votes".to_string());
        let parties = read_excel_votes(&votes_xlsx(), &cfs).unwrap();
        assert_eq!(parties.len(), 3);
        assert_eq!(parties[0].id, Some("g".to_string()));
        assert_eq!(parties[0].name, "Greens");
        assert_eq!(parties[0].votes, "1200");
        assert_eq!(parties[2].name, "Socialists");
        assert_eq!(parties[2].votes, "300");
    }

    #[test]
    fn first_worksheet_by_default() {
        // The first worksheet only holds a note in its header row.
        let parties =
            read_excel_votes(&votes_xlsx(), &FileSource::new("xlsx", "votes.xlsx")).unwrap();
        assert!(parties.is_empty());
    }

    #[test]
    fn missing_worksheet() {
        let mut cfs = FileSource::new("xlsx", "votes.xlsx");
        cfs.excel_worksheet_name = Some("Results".to_string());
        let res = read_excel_votes(&votes_xlsx(), &cfs);
        assert!(matches!(res, Err(CalcError::MissingWorksheet { .. })));
    }

    #[test]
    fn missing_file() {
        let res = read_excel_votes(
            "/nonexistent/votes.xlsx",
            &FileSource::new("xlsx", "votes.xlsx"),
        );
        assert!(matches!(res, Err(CalcError::OpeningExcel { .. })));
    }
}
