//! Progress bar that fills over a fixed duration.

use std::time::Duration;

use ratatui::Frame;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::LineGauge;

use crate::event::Event;
use crate::runtime::{Component, Context, ExitReason, Transition};
use crate::style::Theme;

#[derive(Clone, Debug)]
pub struct ProgressOptions {
	pub title: String,
	/// Time for the bar to fill.
	pub duration: Duration,
	pub theme: Theme,
}

impl Default for ProgressOptions {
	fn default() -> Self {
		Self {
			title: "Working...".into(),
			duration: Duration::from_secs(3),
			theme: Theme::default(),
		}
	}
}

pub struct ProgressSession {
	options: ProgressOptions,
	ratio: f64,
}

impl ProgressSession {
	#[must_use]
	pub fn new(options: ProgressOptions) -> Self {
		Self { options, ratio: 0.0 }
	}

	/// Filled fraction in `0.0..=1.0`.
	#[must_use]
	pub fn ratio(&self) -> f64 {
		self.ratio
	}

	fn advance(&mut self, elapsed: Duration) -> Transition {
		self.ratio = if self.options.duration.is_zero() {
			1.0
		} else {
			(elapsed.as_secs_f64() / self.options.duration.as_secs_f64()).min(1.0)
		};
		if self.ratio >= 1.0 {
			Transition::Exit(ExitReason::TaskFinished)
		} else {
			Transition::Redraw
		}
	}
}

impl Component for ProgressSession {
	fn init(&mut self, _cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(Transition::Redraw)
	}

	fn update(&mut self, event: &Event, cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(match event {
			Event::Tick => self.advance(cx.elapsed()),
			Event::Interrupt => Transition::Exit(ExitReason::Cancelled),
			Event::Key(_) | Event::Paste(_) | Event::Resize(..) | Event::Task(_) => Transition::Continue,
		})
	}

	fn render(&self, frame: &mut Frame<'_>) {
		let theme = &self.options.theme;
		let percent = (self.ratio * 100.0).floor();
		let label = format!("{} {percent:>3}%", self.options.title);
		let gauge = LineGauge::default()
			.ratio(self.ratio)
			.label(Span::styled(label, theme.title))
			.line_set(symbols::line::THICK)
			.filled_style(theme.accent)
			.unfilled_style(theme.muted);
		frame.render_widget(gauge, frame.area());
	}
}
