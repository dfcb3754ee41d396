use log::{debug, info, warn};

use dhondt::*;
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::calc::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

/// Upper bound on the number of seats accepted by the program.
/// The allocation cost grows with seats × parties.
pub const MAX_SEATS: i64 = 100_000;

#[derive(Debug, Snafu)]
pub enum CalcError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The file {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Unexpected cell at row {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not understand a row or column index"))]
    ParsingJsonNumber {},
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} is too short"))]
    LineTooShort { lineno: usize },
    #[snafu(display("Invalid vote count for {name}: {value:?} is not a non-negative integer"))]
    InvalidVotes { name: String, value: String },
    #[snafu(display("Invalid number of seats: {value}"))]
    InvalidSeats { value: String },
    #[snafu(display("The number of seats is missing (use --seats or the seats field)"))]
    MissingSeats {},
    #[snafu(display("Too many seats requested: {seats} (maximum {max})"))]
    TooManySeats { seats: i64, max: i64 },
    #[snafu(display("Cannot find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("Provider not implemented: {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("The allocation failed"))]
    Allocation { source: AllocationErrors },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CalcResult<T> = Result<T, CalcError>;

/// A party, as read from a vote file or the configuration.
/// This is before the vote counts are validated.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedParty {
    pub id: Option<String>,
    pub name: String,
    pub votes: String,
}

fn read_vote_data(root_path: &Path, cfs: &FileSource) -> CalcResult<Vec<ParsedParty>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read vote file {:?}", p2);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_votes(&p2, cfs),
        "xlsx" | "excel" => io_excel::read_excel_votes(&p2, cfs),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn validate_parties(parsed: &[ParsedParty]) -> CalcResult<Vec<Candidate>> {
    let mut res: Vec<Candidate> = Vec::new();
    for pp in parsed.iter() {
        let votes: u64 = pp.votes.trim().parse::<u64>().ok().context(InvalidVotesSnafu {
            name: pp.name.clone(),
            value: pp.votes.clone(),
        })?;
        // The name doubles as identifier when none is provided.
        let id = match pp.id.clone() {
            Some(x) if !x.is_empty() => x,
            _ => pp.name.clone(),
        };
        debug!("validate_parties: {:?} -> {} {}", pp, id, votes);
        res.push(Candidate {
            id,
            name: pp.name.clone(),
            votes,
        });
    }
    Ok(res)
}

fn validate_rules(rules: &RulesConfig) -> CalcResult<AllocationRules> {
    let res = AllocationRules {
        tiebreak_mode: match rules.tiebreak_mode.as_deref() {
            None | Some("candidateId") => TieBreakMode::CandidateId,
            Some("random") => {
                let seed = match rules.random_seed.clone().map(|s| s.parse::<u32>()) {
                    Some(Ok(x)) => x,
                    x => {
                        whatever!("Cannot use random tiebreak mode with seed {:?}", x)
                    }
                };
                TieBreakMode::Seeded(seed)
            }
            Some(x) => {
                whatever!("Cannot use tiebreak mode {:?}: unknown mode", x)
            }
        },
        duplicate_candidate_mode: match rules.duplicate_candidate.as_deref() {
            None | Some("reject") => DuplicateCandidateMode::Reject,
            Some("aggregate") => DuplicateCandidateMode::Aggregate,
            Some(x) => {
                whatever!("Cannot use duplicate candidate mode {:?}: unknown mode", x)
            }
        },
        listing: match rules.listing.as_deref() {
            None | Some("winnersOnly") => ResultListing::WinnersOnly,
            Some("allCandidates") => ResultListing::AllCandidates,
            Some(x) => {
                whatever!("Cannot use listing {:?}: unknown listing", x)
            }
        },
    };
    Ok(res)
}

fn validate_seats(seats: Option<&JSValue>, seats_override: Option<i64>) -> CalcResult<i64> {
    let seats: i64 = match (seats_override, seats) {
        (Some(x), _) => x,
        (None, Some(JSValue::Number(n))) => n.as_i64().context(InvalidSeatsSnafu {
            value: n.to_string(),
        })?,
        (None, Some(JSValue::String(s))) => s
            .trim()
            .parse::<i64>()
            .ok()
            .context(InvalidSeatsSnafu { value: s.clone() })?,
        (None, Some(x)) => {
            return InvalidSeatsSnafu {
                value: x.to_string(),
            }
            .fail()
        }
        (None, None) => return MissingSeatsSnafu {}.fail(),
    };
    // Negative values are reported by the allocation itself.
    ensure!(
        seats <= MAX_SEATS,
        TooManySeatsSnafu {
            seats,
            max: MAX_SEATS
        }
    );
    Ok(seats)
}

fn build_summary_js(config: &ElectionConfig, seats: i64, results: &[SeatAllocation]) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        office: config.output_settings.contest_office.clone(),
        seats: seats.to_string(),
    };
    let js_results: Vec<JSValue> = results
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "name": r.name,
                "votes": r.votes.to_string(),
                "seats": r.seats.to_string(),
            })
        })
        .collect();
    json!({
        "config": c,
        "results": js_results })
}

fn write_summary(pretty_js: &str, out: Option<&str>) -> CalcResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some("") => {}
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

/// Runs the allocation of an election.
///
/// Arguments:
/// * `config` the election description
/// * `root_path` the directory against which the vote files are resolved
/// * `seats_override` if provided, replaces the number of seats of the description
/// * `out` where to write the summary (`None` or `stdout` for the standard output)
/// * `check_summary_path` a reference summary that the outcome must match
pub fn run_allocation(
    config: &ElectionConfig,
    root_path: &Path,
    seats_override: Option<i64>,
    out: Option<&str>,
    check_summary_path: Option<&str>,
) -> CalcResult<Vec<SeatAllocation>> {
    info!("config: {:?}", config);

    let rules = validate_rules(&config.rules)?;
    let seats = validate_seats(config.seats.as_ref(), seats_override)?;

    let mut parsed: Vec<ParsedParty> = Vec::new();
    for cc in config.candidates.iter() {
        parsed.push(ParsedParty {
            id: cc.id.clone(),
            name: cc.name.clone(),
            votes: js_to_count_string(&cc.votes),
        });
    }
    for cfs in config.vote_file_sources.iter() {
        let mut file_data = read_vote_data(root_path, cfs)?;
        parsed.append(&mut file_data);
    }
    debug!("parsed parties: {:?}", parsed);

    let candidates = validate_parties(&parsed)?;
    info!(
        "Processing {} candidates for {} seats",
        candidates.len(),
        seats
    );

    let results = allocate_with_rules(&candidates, seats, &rules).context(AllocationSnafu {})?;

    // Assemble the final json
    let result_js = build_summary_js(config, seats, &results);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty_js_stats, out)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(results)
}

pub fn run_election(
    config_path: &str,
    seats_override: Option<i64>,
    out: Option<&str>,
    check_summary_path: Option<&str>,
) -> CalcResult<Vec<SeatAllocation>> {
    let config = read_config(config_path)?;
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    run_allocation(&config, root_p, seats_override, out, check_summary_path)
}

fn guess_input_type(path: &str) -> CalcResult<String> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok("csv".to_string()),
        Some("xlsx") => Ok("xlsx".to_string()),
        Some("json") => Ok("json".to_string()),
        x => whatever!(
            "Cannot guess the type of the input {}: extension {:?} (use --input-type)",
            path,
            x
        ),
    }
}

/// Entry point of the command line program.
pub fn run(args: &Args) -> CalcResult<()> {
    let input_type = match (&args.input, &args.input_type) {
        (Some(_), Some(t)) => Some(t.clone()),
        (Some(p), None) => Some(guess_input_type(p)?),
        (None, _) => None,
    };

    let out = args.out.as_deref();
    let reference = args.reference.as_deref();

    match (&args.config, &args.input, input_type.as_deref()) {
        // The input is itself an election description.
        (None, Some(p), Some("json")) => {
            run_election(p, args.seats, out, reference)?;
        }
        (Some(_), Some(_), Some("json")) => {
            whatever!("A JSON input cannot be combined with --config")
        }
        (config_path, Some(p), Some(provider)) => {
            let mut config = match config_path {
                Some(cp) => read_config(cp)?,
                None => ElectionConfig::default(),
            };
            if config.output_settings.contest_name.is_empty() {
                config.output_settings.contest_name = io_common::simplify_file_name(p);
            }
            let mut source = FileSource::new(provider, p);
            source.excel_worksheet_name = args.excel_worksheet_name.clone();
            config.vote_file_sources = vec![source];
            // The input path is used as given on the command line.
            run_allocation(&config, Path::new(""), args.seats, out, reference)?;
        }
        (Some(cp), None, _) => {
            run_election(cp, args.seats, out, reference)?;
        }
        (None, None, _) | (None, Some(_), None) | (Some(_), Some(_), None) => {
            whatever!("No election to process: provide --config or --input")
        }
    }
    Ok(())
}

fn js_to_count_string(js: &JSValue) -> String {
    match js {
        JSValue::String(s) => s.clone(),
        x => x.to_string(),
    }
}
