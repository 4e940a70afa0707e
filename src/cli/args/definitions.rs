use std::path::PathBuf;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, ColorChoice, Parser, Subcommand};

use super::options::{AlignArg, OutputFormat, parse_duration};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `chew` binary.
#[derive(Parser, Debug)]
#[command(
	name = "chew",
	version,
	long_version = long_version(),
	about = "Interactive terminal widgets for shell scripts",
	color = ColorChoice::Auto,
	styles = cli_styles(),
	arg_required_else_help = true
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "CHEW_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration to stderr before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long = "log-file",
		value_name = "FILE",
		global = true,
		help = "Write logs to FILE (default: chew.log in the cache directory when CHEW_LOG is set)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		long,
		value_name = "THEME",
		global = true,
		help = "Select a theme by name (default: default)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "tick-rate",
		value_name = "MS",
		global = true,
		help = "Milliseconds between animation ticks (default: 80)"
	)]
	pub(crate) tick_rate_ms: Option<u64>,
	#[arg(long = "list-themes", help = "List supported themes and exit")]
	pub(crate) list_themes: bool,
	#[arg(long = "list-spinners", help = "List supported spinner styles and exit")]
	pub(crate) list_spinners: bool,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
	/// Show a spinner while a command runs.
	Spin(SpinArgs),
	/// Fuzzy-search lines from stdin, or files under the current directory.
	#[command(visible_alias = "filter")]
	Search(SearchArgs),
	/// Prompt for a single line of text.
	Input(InputArgs),
	/// Prompt for multi-line text.
	Write(WriteArgs),
	/// Show a progress bar that fills over a fixed time.
	Progress(ProgressArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SpinArgs {
	#[arg(long, value_name = "TEXT", help = "Text next to the spinner (default: Loading...)")]
	pub(crate) title: Option<String>,
	#[arg(short, long, value_name = "NAME", help = "Spinner style (default: dots)")]
	pub(crate) spinner: Option<String>,
	#[arg(long, value_enum, default_value_t, help = "Side of the title the spinner is drawn on")]
	pub(crate) align: AlignArg,
	#[arg(long = "show-output", help = "Print the command's output after it finishes")]
	pub(crate) show_output: bool,
	#[arg(long = "show-error", help = "Print the command's output to stderr if it fails")]
	pub(crate) show_error: bool,
	#[arg(
		long = "grace-period",
		value_name = "MS",
		help = "Time the command gets to exit after SIGTERM before it is killed (default: 2000)"
	)]
	pub(crate) grace_period_ms: Option<u64>,
	#[arg(long, value_name = "DURATION", value_parser = parse_duration, help = "Cancel the command after DURATION")]
	pub(crate) timeout: Option<Duration>,
	#[arg(
		value_name = "COMMAND",
		required = true,
		num_args = 1..,
		trailing_var_arg = true,
		allow_hyphen_values = true,
		help = "Command to run, usually after `--`"
	)]
	pub(crate) command: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
	#[arg(long, value_name = "TEXT", help = "Prompt in front of the query (default: \"> \")")]
	pub(crate) prompt: Option<String>,
	#[arg(long, value_name = "TEXT", help = "Text shown while the query is empty (default: Search...)")]
	pub(crate) placeholder: Option<String>,
	#[arg(long, value_name = "QUERY", default_value = "", help = "Initial query")]
	pub(crate) value: String,
	#[arg(long, value_name = "TEXT", default_value = "•", help = "Marker for the row under the cursor")]
	pub(crate) indicator: String,
	#[arg(long, value_name = "ROWS", help = "Number of result rows (default: 10)")]
	pub(crate) height: Option<u16>,
	#[arg(
		long,
		value_name = "NUM",
		default_value_t = 1,
		value_parser = RangedU64ValueParser::<usize>::new().range(1..),
		help = "Maximum number of selections"
	)]
	pub(crate) limit: usize,
	#[arg(long = "no-limit", conflicts_with = "limit", help = "Allow any number of selections")]
	pub(crate) no_limit: bool,
	#[arg(long = "select-if-one", help = "Select without prompting when the initial query matches exactly one candidate")]
	pub(crate) select_if_one: bool,
	#[arg(long = "no-highlight", help = "Do not highlight matched characters")]
	pub(crate) no_highlight: bool,
	#[arg(long = "max-results", value_name = "NUM", help = "Matches kept per query (default: 2000)")]
	pub(crate) max_results: Option<usize>,
	#[arg(long, value_name = "DURATION", value_parser = parse_duration, help = "Cancel after DURATION")]
	pub(crate) timeout: Option<Duration>,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}

impl SearchArgs {
	/// Selection limit; `None` when unlimited.
	pub(crate) fn selection_limit(&self) -> Option<usize> {
		(!self.no_limit).then_some(self.limit)
	}
}

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
	#[arg(long, value_name = "TEXT", help = "Prompt in front of the input (default: \"> \")")]
	pub(crate) prompt: Option<String>,
	#[arg(long, value_name = "TEXT", help = "Text shown while the input is empty (default: Type something...)")]
	pub(crate) placeholder: Option<String>,
	#[arg(long, value_name = "TEXT", default_value = "", help = "Initial value")]
	pub(crate) value: String,
	#[arg(long = "char-limit", value_name = "NUM", default_value_t = 400, help = "Maximum characters, 0 for no limit")]
	pub(crate) char_limit: usize,
	#[arg(long, help = "Mask the input")]
	pub(crate) password: bool,
	#[arg(long, value_name = "DURATION", value_parser = parse_duration, help = "Cancel after DURATION")]
	pub(crate) timeout: Option<Duration>,
}

#[derive(Args, Debug)]
pub(crate) struct WriteArgs {
	#[arg(long, value_name = "TEXT", default_value = "Write something...", help = "Text shown while the editor is empty")]
	pub(crate) placeholder: String,
	#[arg(long, value_name = "TEXT", default_value = "", help = "Initial value")]
	pub(crate) value: String,
	#[arg(long, value_name = "ROWS", help = "Visible lines (default: 5)")]
	pub(crate) height: Option<u16>,
	#[arg(long = "char-limit", value_name = "NUM", default_value_t = 0, help = "Maximum characters, 0 for no limit")]
	pub(crate) char_limit: usize,
	#[arg(long = "show-line-numbers", help = "Number the lines")]
	pub(crate) show_line_numbers: bool,
	#[arg(long, value_name = "DURATION", value_parser = parse_duration, help = "Cancel after DURATION")]
	pub(crate) timeout: Option<Duration>,
}

#[derive(Args, Debug)]
pub(crate) struct ProgressArgs {
	#[arg(long, value_name = "TEXT", default_value = "Working...", help = "Text next to the bar")]
	pub(crate) title: String,
	#[arg(long, value_name = "DURATION", default_value = "3s", value_parser = parse_duration, help = "Time for the bar to fill")]
	pub(crate) time: Duration,
}
