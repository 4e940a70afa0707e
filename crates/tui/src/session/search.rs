//! Fuzzy search over a list of candidates.

use std::collections::BTreeSet;
use std::time::Duration;

use chew_core::matcher::{CandidateSet, Match, Matcher, Ranking};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::debug;
use tui_textarea::{Input, TextArea};
use unicode_width::UnicodeWidthStr;

use crate::components::{ListViewport, PromptContext, highlight_line, render_prompt};
use crate::event::Event;
use crate::runtime::{Component, Context, ExitReason, Transition};
use crate::style::Theme;

const SELECTED_PREFIX: &str = "[x] ";
const UNSELECTED_PREFIX: &str = "[ ] ";

#[derive(Clone, Debug)]
pub struct SearchOptions {
	pub prompt: String,
	pub placeholder: String,
	/// Initial query.
	pub value: String,
	/// Marker in front of the row under the cursor.
	pub indicator: String,
	/// Number of result rows.
	pub height: u16,
	/// Maximum number of selected rows; `None` for no limit. Anything other
	/// than `Some(1)` enables multi-select.
	pub limit: Option<usize>,
	/// Submit right away when the initial query matches exactly one candidate.
	pub select_if_one: bool,
	/// Highlight matched characters.
	pub highlight: bool,
	pub max_results: usize,
	pub timeout: Option<Duration>,
	pub theme: Theme,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			prompt: "> ".into(),
			placeholder: "Search...".into(),
			value: String::new(),
			indicator: "•".into(),
			height: 10,
			limit: Some(1),
			select_if_one: false,
			highlight: true,
			max_results: chew_core::matcher::DEFAULT_MAX_RESULTS,
			timeout: None,
			theme: Theme::default(),
		}
	}
}

pub struct SearchSession {
	candidates: CandidateSet,
	matcher: Matcher,
	options: SearchOptions,
	input: TextArea<'static>,
	ranking: Ranking,
	cursor: usize,
	viewport: ListViewport,
	selected: BTreeSet<usize>,
	submitted: Vec<usize>,
	timed_out: bool,
}

impl SearchSession {
	#[must_use]
	pub fn new(candidates: CandidateSet, options: SearchOptions) -> Self {
		let mut input = TextArea::new(vec![options.value.clone()]);
		input.set_placeholder_text(options.placeholder.as_str());
		input.set_placeholder_style(options.theme.empty_style());
		input.set_cursor_line_style(Style::default());
		input.move_cursor(tui_textarea::CursorMove::End);

		Self {
			matcher: Matcher::new(options.max_results),
			viewport: ListViewport::new(usize::from(options.height)),
			candidates,
			options,
			input,
			ranking: Ranking::default(),
			cursor: 0,
			selected: BTreeSet::new(),
			submitted: Vec::new(),
			timed_out: false,
		}
	}

	/// Rows needed to draw the session: the prompt plus the result list.
	#[must_use]
	pub fn height(&self) -> u16 {
		self.options.height.saturating_add(1)
	}

	#[must_use]
	pub fn query(&self) -> &str {
		self.input.lines().first().map_or("", String::as_str)
	}

	#[must_use]
	pub fn ranking(&self) -> &Ranking {
		&self.ranking
	}

	/// The match under the cursor.
	#[must_use]
	pub fn current(&self) -> Option<&Match> {
		self.ranking.get(self.cursor)
	}

	/// Candidate indices of the rows picked so far, in original order.
	pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
		self.selected.iter().copied()
	}

	/// Candidate indices confirmed on submit, in original order.
	#[must_use]
	pub fn submitted(&self) -> &[usize] {
		&self.submitted
	}

	/// Strings confirmed on submit, in original order.
	#[must_use]
	pub fn submitted_values(&self) -> Vec<&str> {
		self.submitted
			.iter()
			.filter_map(|&index| self.candidates.get(index))
			.collect()
	}

	#[must_use]
	pub fn viewport(&self) -> &ListViewport {
		&self.viewport
	}

	#[must_use]
	pub fn timed_out(&self) -> bool {
		self.timed_out
	}

	fn multi(&self) -> bool {
		self.options.limit != Some(1)
	}

	fn limit(&self) -> usize {
		self.options.limit.unwrap_or(usize::MAX)
	}

	fn refresh(&mut self) {
		let query = self.query().to_string();
		self.ranking = self.matcher.rank(&query, &self.candidates);
		self.cursor = 0;
		self.viewport.reset();
		debug!(query = %query, matched = self.ranking.matched, "ranking refreshed");
	}

	fn move_to(&mut self, position: usize) -> Transition {
		let Some(last) = self.ranking.len().checked_sub(1) else {
			return Transition::Continue;
		};
		self.cursor = position.min(last);
		self.viewport.scroll_to(self.cursor);
		Transition::Redraw
	}

	fn move_by(&mut self, delta: isize) -> Transition {
		self.move_to(self.cursor.saturating_add_signed(delta))
	}

	fn page(&self) -> isize {
		isize::try_from(self.viewport.height().max(1)).unwrap_or(isize::MAX)
	}

	fn toggle_current(&mut self) {
		let Some(index) = self.current().map(|m| m.index) else {
			return;
		};
		if !self.selected.remove(&index) && self.selected.len() < self.limit() {
			self.selected.insert(index);
		}
	}

	fn select_all(&mut self) -> Transition {
		let limit = self.limit();
		for index in self.ranking.indices() {
			if self.selected.len() >= limit {
				break;
			}
			self.selected.insert(index);
		}
		Transition::Redraw
	}

	fn confirm(&mut self) -> Transition {
		if self.multi() && !self.selected.is_empty() {
			self.submitted = self.selected.iter().copied().collect();
		} else if let Some(index) = self.current().map(|m| m.index) {
			self.submitted = vec![index];
		} else {
			return Transition::Continue;
		}
		Transition::Exit(ExitReason::Submitted)
	}

	fn on_key(&mut self, key: &KeyEvent) -> Transition {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => Transition::Exit(ExitReason::Cancelled),
			KeyCode::Enter => self.confirm(),
			KeyCode::Char('m') if ctrl => self.confirm(),
			KeyCode::Up => self.move_by(-1),
			KeyCode::Char('p' | 'k') if ctrl => self.move_by(-1),
			KeyCode::Down => self.move_by(1),
			KeyCode::Char('n' | 'j') if ctrl => self.move_by(1),
			KeyCode::PageUp => self.move_by(-self.page()),
			KeyCode::PageDown => self.move_by(self.page()),
			KeyCode::Home => self.move_to(0),
			KeyCode::End => self.move_to(usize::MAX),
			KeyCode::Tab | KeyCode::BackTab if !self.multi() => Transition::Continue,
			KeyCode::Tab => {
				self.toggle_current();
				self.move_by(1);
				Transition::Redraw
			}
			KeyCode::BackTab => {
				self.toggle_current();
				self.move_by(-1);
				Transition::Redraw
			}
			KeyCode::Char('a') if ctrl && self.multi() => self.select_all(),
			_ => {
				if self.input.input(Input::from(*key)) {
					self.refresh();
				}
				Transition::Redraw
			}
		}
	}

	fn on_paste(&mut self, text: &str) -> Transition {
		let line: String = text.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect();
		if self.input.insert_str(line) {
			self.refresh();
		}
		Transition::Redraw
	}

	fn render_row(&self, frame: &mut Frame<'_>, area: Rect, position: usize, found: &Match) {
		let theme = &self.options.theme;
		let on_cursor = position == self.cursor;
		let indicator_width = self.options.indicator.width();

		let mut line = Line::default();
		if on_cursor {
			line.spans.push(Span::styled(self.options.indicator.clone(), theme.cursor));
		} else {
			line.spans.push(Span::raw(" ".repeat(indicator_width)));
		}
		line.spans.push(Span::raw(" "));
		if self.multi() {
			if self.selected.contains(&found.index) {
				line.spans.push(Span::styled(SELECTED_PREFIX, theme.selected));
			} else {
				line.spans.push(Span::styled(UNSELECTED_PREFIX, theme.muted));
			}
		}

		let used = line.width();
		let available = usize::from(area.width).saturating_sub(used);
		let (base, highlight) = if on_cursor {
			(theme.cursor, theme.cursor_highlight_style())
		} else {
			(Style::default(), theme.highlight)
		};
		let spans = if self.options.highlight {
			&found.spans[..]
		} else {
			&found.spans[..0]
		};
		let text = highlight_line(&self.candidates[found.index], spans, available, base, highlight);
		line.spans.extend(text.spans);
		frame.render_widget(line, area);
	}
}

impl Component for SearchSession {
	fn init(&mut self, _cx: &mut Context) -> anyhow::Result<Transition> {
		self.refresh();
		if self.options.select_if_one
			&& self.ranking.matched == 1
			&& let Some(only) = self.current().map(|m| m.index)
		{
			self.submitted = vec![only];
			return Ok(Transition::Exit(ExitReason::Submitted));
		}
		Ok(Transition::Redraw)
	}

	fn update(&mut self, event: &Event, cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(match event {
			Event::Key(key) => self.on_key(key),
			Event::Paste(text) => self.on_paste(text),
			Event::Interrupt => Transition::Exit(ExitReason::Cancelled),
			Event::Tick => {
				if self.options.timeout.is_some_and(|timeout| cx.elapsed() >= timeout) {
					self.timed_out = true;
					Transition::Exit(ExitReason::Cancelled)
				} else {
					Transition::Continue
				}
			}
			Event::Resize(..) | Event::Task(_) => Transition::Continue,
		})
	}

	fn render(&self, frame: &mut Frame<'_>) {
		let area = frame.area();
		if area.height == 0 {
			return;
		}

		let status = format!("{}/{}", self.ranking.matched, self.candidates.len());
		render_prompt(
			frame,
			PromptContext {
				prompt: &self.options.prompt,
				input: &self.input,
				status: Some(&status),
				area: Rect { height: 1, ..area },
				theme: &self.options.theme,
			},
		);

		let rows = area.height - 1;
		if self.ranking.is_empty() {
			if rows > 0 {
				let message = Line::from(Span::styled("No results", self.options.theme.empty_style()));
				frame.render_widget(message, Rect { y: area.y + 1, height: 1, ..area });
			}
			return;
		}

		let visible = self.viewport.range(self.ranking.len());
		for (row, position) in visible.enumerate().take(usize::from(rows)) {
			let Some(found) = self.ranking.get(position) else {
				break;
			};
			let y = area.y + 1 + u16::try_from(row).unwrap_or(u16::MAX);
			self.render_row(frame, Rect { y, height: 1, ..area }, position, found);
		}
	}
}
