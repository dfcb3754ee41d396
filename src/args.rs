use clap::Parser;

/// This is a seat allocation program using the D'Hondt method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the election in JSON format.
    /// For more information about the file format, read the documentation of the `dhondt::manual` module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of an allocation in JSON format. If provided,
    /// the computed summary is checked against the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the allocation will be written in JSON
    /// format to the given location. By default, it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A file with the votes of each party. Setting this option overrides the vote
    /// files that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv, xlsx or json) The type of the input. If not provided, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (number) The number of seats to allocate. Overrides the value of the configuration file.
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    pub seats: Option<i64>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
