use crate::calc::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName", default)]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
    pub seats: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "idColumnIndex")]
    _id_column_index: Option<JSValue>,
    #[serde(rename = "nameColumnIndex")]
    _name_column_index: Option<JSValue>,
    #[serde(rename = "votesColumnIndex")]
    _votes_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    pub fn new(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            _id_column_index: None,
            _name_column_index: None,
            _votes_column_index: None,
            _first_vote_row_index: None,
            excel_worksheet_name: None,
        }
    }

    // All the indices below are returned 0-based.

    pub fn id_column_index(&self) -> CalcResult<usize> {
        read_js_index(&self._id_column_index, 1)
    }

    pub fn name_column_index(&self) -> CalcResult<usize> {
        read_js_index(&self._name_column_index, 2)
    }

    pub fn votes_column_index(&self) -> CalcResult<usize> {
        read_js_index(&self._votes_column_index, 3)
    }

    pub fn first_vote_row_index(&self) -> CalcResult<usize> {
        read_js_index(&self._first_vote_row_index, 2)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCandidate {
    pub id: Option<String>,
    pub name: String,
    pub votes: JSValue,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
    #[serde(rename = "duplicateCandidate")]
    pub duplicate_candidate: Option<String>,
    pub listing: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    pub seats: Option<JSValue>,
    #[serde(default)]
    pub candidates: Vec<ConfigCandidate>,
    #[serde(rename = "voteFileSources", default)]
    pub vote_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: RulesConfig,
}

pub fn read_config(path: &str) -> CalcResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> CalcResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// Reads a 1-based position and returns it 0-based.
fn read_js_index(x: &Option<JSValue>, default: usize) -> CalcResult<usize> {
    let pos: usize = match x {
        None => default,
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {})?,
        // Excel-style columns: A, B, ..., Z, AA, ...
        Some(JSValue::String(s))
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            s.to_ascii_uppercase()
                .chars()
                .try_fold(0usize, |acc, c| {
                    acc.checked_mul(26)?
                        .checked_add(c as usize - 'A' as usize + 1)
                })
                .context(ParsingJsonNumberSnafu {})?
        }
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {})?,
        _ => return ParsingJsonNumberSnafu {}.fail(),
    };
    ensure!(pos >= 1, ParsingJsonNumberSnafu {});
    Ok(pos - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn js_indices() {
        assert_eq!(read_js_index(&None, 3).unwrap(), 2);
        assert_eq!(read_js_index(&Some(json!(1)), 3).unwrap(), 0);
        assert_eq!(read_js_index(&Some(json!("4")), 3).unwrap(), 3);
        assert_eq!(read_js_index(&Some(json!("c")), 1).unwrap(), 2);
        assert_eq!(read_js_index(&Some(json!("AA")), 1).unwrap(), 26);
        assert!(read_js_index(&Some(json!(0)), 1).is_err());
        assert!(read_js_index(&Some(json!(-2)), 1).is_err());
        assert!(read_js_index(&Some(json!(true)), 1).is_err());
    }

    #[test]
    fn js_index_letters_overflow() {
        assert_eq!(read_js_index(&Some(json!("ZZ")), 1).unwrap(), 701);
        let long = "Z".repeat(40);
        assert!(matches!(
            read_js_index(&Some(json!(long)), 1),
            Err(CalcError::ParsingJsonNumber { .. })
        ));
    }

    #[test]
    fn parse_minimal_config() {
        let config: ElectionConfig = serde_json::from_str(
            r##"{"seats": 3, "candidates": [{"name": "Alpha", "votes": 10, "color": "#ff0000"}]}"##,
        )
        .unwrap();
        assert_eq!(config.seats, Some(json!(3)));
        assert_eq!(config.candidates.len(), 1);
        assert_eq!(config.candidates[0].id, None);
        assert_eq!(config.output_settings.contest_name, "");
        assert!(config.vote_file_sources.is_empty());
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[test]
    fn file_source_defaults() {
        let cfs: FileSource = serde_json::from_str(
            r#"{"provider": "csv", "filePath": "votes.csv", "votesColumnIndex": "D"}"#,
        )
        .unwrap();
        assert_eq!(cfs.id_column_index().unwrap(), 0);
        assert_eq!(cfs.name_column_index().unwrap(), 1);
        assert_eq!(cfs.votes_column_index().unwrap(), 3);
        assert_eq!(cfs.first_vote_row_index().unwrap(), 1);
        assert_eq!(
            FileSource::new("csv", "votes.csv")
                .votes_column_index()
                .unwrap(),
            2
        );
    }
}
