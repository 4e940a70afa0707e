use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	eprint!("{}", render_summary(config));
}

fn render_summary(config: &ResolvedConfig) -> String {
	let lines = [
		"Effective configuration:".to_string(),
		format!("  Tick rate: {} ms", config.tick_rate.as_millis()),
		format!("  Theme: {}", config.theme_name),
		format!("  Spinner: {}", config.spin.spinner_name),
		format!("  Spinner title: {}", config.spin.title),
		format!("  Grace period: {} ms", config.spin.grace_period.as_millis()),
		format!("  Search height: {}", config.search.height),
		format!("  Search max results: {}", config.search.max_results),
		format!("  Search prompt: {:?}", config.search.prompt),
		format!("  Search placeholder: {:?}", config.search.placeholder),
		format!("  Input prompt: {:?}", config.input.prompt),
		format!("  Input placeholder: {:?}", config.input.placeholder),
		format!("  Write height: {}", config.write.height),
	];
	let mut summary = lines.join("\n");
	summary.push('\n');
	summary
}
