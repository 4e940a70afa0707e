use std::time::Duration;

use clap::{CommandFactory, Parser};

use super::options::parse_duration;
use super::{CliArgs, Command, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn spin_collects_the_trailing_command() {
	let cli = CliArgs::parse_from(["chew", "spin", "--title", "Building", "--", "make", "-j", "4"]);
	let Some(Command::Spin(args)) = cli.command else {
		panic!("expected spin");
	};
	assert_eq!(args.title.as_deref(), Some("Building"));
	assert_eq!(args.command, ["make", "-j", "4"]);
}

#[test]
fn filter_is_an_alias_for_search() {
	let cli = CliArgs::parse_from(["chew", "filter", "--no-limit", "-o", "json"]);
	let Some(Command::Search(args)) = cli.command else {
		panic!("expected search");
	};
	assert_eq!(args.selection_limit(), None);
	assert_eq!(args.output, OutputFormat::Json);
}

#[test]
fn search_defaults_to_single_selection() {
	let cli = CliArgs::parse_from(["chew", "search"]);
	let Some(Command::Search(args)) = cli.command else {
		panic!("expected search");
	};
	assert_eq!(args.selection_limit(), Some(1));
	assert_eq!(args.output, OutputFormat::Plain);
}

#[test]
fn zero_limit_is_rejected() {
	assert!(CliArgs::try_parse_from(["chew", "search", "--limit", "0"]).is_err());
}

#[test]
fn global_flags_follow_the_subcommand() {
	let cli = CliArgs::parse_from(["chew", "input", "--no-config", "--theme", "light"]);
	assert!(cli.no_config);
	assert_eq!(cli.theme.as_deref(), Some("light"));
}

#[test]
fn durations_accept_units() {
	assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
	assert_eq!(parse_duration("2"), Ok(Duration::from_secs(2)));
	assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
	assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
	assert!(parse_duration("soon").is_err());
	assert!(parse_duration("3 weeks").is_err());
}
