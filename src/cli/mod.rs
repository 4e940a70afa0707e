mod args;
mod output;

pub(crate) use args::{
	CliArgs, Command, InputArgs, OutputFormat, ProgressArgs, SearchArgs, SpinArgs, WriteArgs, parse_cli,
};
pub(crate) use output::{SearchOutput, print_json, print_plain};
