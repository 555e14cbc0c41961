pub mod charting;

use clackr::{
    session::{Mode, TargetText},
    time_series::peak_wpm,
    util::{consistency, format_clock},
    UnitStatus,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const UNAVAILABLE_MESSAGE: &str =
    "Failed to load words. Please check your internet connection and try again.";

struct Palette {
    bold: Style,
    pending: Style,
    current: Style,
    correct: Style,
    incorrect: Style,
    italic: Style,
}

impl Default for Palette {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let pending = bold.add_modifier(Modifier::DIM);
        Self {
            bold,
            pending,
            current: pending
                .remove_modifier(Modifier::DIM)
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            correct: bold.fg(Color::Green),
            incorrect: bold.fg(Color::Red),
            italic: Style::default().add_modifier(Modifier::ITALIC),
        }
    }
}

impl Palette {
    fn for_status(&self, status: UnitStatus) -> Style {
        match status {
            UnitStatus::Pending => self.pending,
            UnitStatus::Current => self.current,
            UnitStatus::Correct => self.correct,
            UnitStatus::Incorrect => self.incorrect,
        }
    }
}

/// Prompt spans coloured by status: one span per word, or one per char.
fn prompt_spans(
    target: &TargetText,
    mode: Mode,
    statuses: &[UnitStatus],
    typed_chars: usize,
    palette: &Palette,
) -> Vec<Span<'static>> {
    match mode {
        Mode::Word => {
            // between words nothing is current, so mark the next word to type
            let cursor = if statuses.contains(&UnitStatus::Current) {
                None
            } else {
                statuses.iter().position(|s| *s == UnitStatus::Pending)
            };
            let mut spans = Vec::with_capacity(target.words().len() * 2);
            for (idx, (word, status)) in target.words().iter().zip(statuses).enumerate() {
                if idx > 0 {
                    spans.push(Span::styled(" ", palette.pending));
                }
                let style = if Some(idx) == cursor {
                    palette.current
                } else {
                    palette.for_status(*status)
                };
                spans.push(Span::styled(word.clone(), style));
            }
            spans
        }
        Mode::Character => target
            .chars()
            .iter()
            .zip(statuses)
            .enumerate()
            .map(|(idx, (&c, &status))| {
                let style = if idx == typed_chars {
                    palette.current
                } else {
                    palette.for_status(status)
                };
                let symbol = match (c, status) {
                    (' ', UnitStatus::Incorrect) => "·".to_string(),
                    _ => c.to_string(),
                };
                Span::styled(symbol, style)
            })
            .collect(),
    }
}

impl App {
    fn render_typing(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let (Some(target), Some(mode)) = (self.evaluator.target(), self.evaluator.mode()) else {
            return;
        };

        let text = target.as_text();
        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_lines = if text.width() <= max_chars_per_line as usize {
            1
        } else {
            ((text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };
        let padding = area.height.saturating_sub(prompt_lines + 4) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(2),
                Constraint::Length(prompt_lines),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let clock = match self.evaluator.seconds_remaining() {
            Some(secs) => format!("{secs:.1}"),
            None => format_clock(self.evaluator.elapsed()),
        };
        let metrics = self.evaluator.metrics();
        // no committed word yet reads as a clean slate, not 0%
        let accuracy = if mode == Mode::Word && metrics.correct_units + metrics.total_errors == 0 {
            100
        } else {
            metrics.accuracy
        };
        let header = Paragraph::new(Span::styled(
            format!("{clock}   {} wpm   {accuracy}% acc   [{mode}]", metrics.wpm),
            palette.pending,
        ))
        .alignment(Alignment::Center);
        header.render(chunks[1], buf);

        let spans = prompt_spans(
            target,
            mode,
            &self.evaluator.unit_statuses(),
            self.buffer.chars().count(),
            palette,
        );
        Paragraph::new(Line::from(spans))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        if mode == Mode::Word {
            // the raw buffer, so the word being edited is visible
            Paragraph::new(Span::styled(format!("> {}", self.buffer), palette.bold))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(
            "(tab) restart / (→) new / (esc) quit",
            palette.italic,
        ))
        .render(chunks[5], buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let series = self.evaluator.wpm_series();
        let (overall_duration, highest_wpm) = charting::compute_chart_params(
            series,
            self.evaluator.elapsed().as_secs_f64(),
        );
        let tuples: Vec<(f64, f64)> = series.iter().map(|&p| p.into()).collect();
        let datasets = vec![Dataset::default()
            .marker(ratatui::symbols::Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&tuples)];

        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("seconds")
                    .bounds([1.0, overall_duration])
                    .labels(vec![
                        Span::styled("1", palette.bold),
                        Span::styled(charting::format_label(overall_duration), palette.bold),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("wpm")
                    .bounds([0.0, highest_wpm])
                    .labels(vec![
                        Span::styled("0", palette.bold),
                        Span::styled(charting::format_label(highest_wpm), palette.bold),
                    ]),
            )
            .render(chunks[0], buf);

        let metrics = self.evaluator.metrics();
        let stats = format!(
            "{} wpm   {}% acc   {} errors   {:.2} sd   {}   peak {}",
            metrics.wpm,
            metrics.accuracy,
            metrics.total_errors,
            consistency(series),
            format_clock(self.evaluator.elapsed()),
            peak_wpm(series),
        );
        Paragraph::new(Span::styled(stats, palette.bold))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            metrics.feedback(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", palette.italic))
            .render(chunks[4], buf);
    }

    fn render_unavailable(&self, reason: &str, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(UNAVAILABLE_MESSAGE, palette.incorrect))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
        Paragraph::new(Span::styled(reason.to_string(), palette.pending))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
        Paragraph::new(Span::styled("(r)etry / (esc)ape", palette.italic)).render(chunks[4], buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::default();
        match self.state {
            AppState::Typing => self.render_typing(area, buf, &palette),
            AppState::Results => self.render_results(area, buf, &palette),
            AppState::Unavailable(ref reason) => {
                self.render_unavailable(reason, area, buf, &palette)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextChoice;
    use clackr::classify::classify_words;
    use clackr::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn rendered(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn app(prompt: &str, mode: Mode) -> App {
        let config = Config {
            mode,
            ..Config::default()
        };
        App::new(config, TextChoice::Prompt(prompt.into()))
    }

    #[test]
    fn test_typing_screen_shows_prompt_and_clock() {
        let app = app("hello world", Mode::Word);
        let out = rendered(&app);
        assert!(out.contains("hello world"));
        assert!(out.contains("00:00.0"));
        assert!(out.contains("[word]"));
        assert!(out.contains("100% acc"));
    }

    #[test]
    fn test_word_header_accuracy_once_committed() {
        let mut app = app("the quick fox", Mode::Word);
        for c in "thx ".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert!(rendered(&app).contains(" 0% acc"));
    }

    #[test]
    fn test_word_cursor_marks_next_word() {
        let target = TargetText::from_quote("the quick fox").unwrap();
        let palette = Palette::default();
        let current_words = |statuses: &[UnitStatus]| -> Vec<String> {
            prompt_spans(&target, Mode::Word, statuses, 0, &palette)
                .into_iter()
                .filter(|span| span.style == palette.current)
                .map(|span| span.content.into_owned())
                .collect()
        };

        // fresh test: the first word is the one to type
        let fresh = classify_words(target.words(), "").statuses;
        assert_eq!(current_words(&fresh), vec!["the"]);

        // right after a space the mark moves on
        let after_space = classify_words(target.words(), "the ").statuses;
        assert_eq!(
            after_space,
            vec![UnitStatus::Correct, UnitStatus::Pending, UnitStatus::Pending]
        );
        assert_eq!(current_words(&after_space), vec!["quick"]);

        // mid-word the evaluator already reports the current word
        let mid_word = classify_words(target.words(), "the qu").statuses;
        assert_eq!(current_words(&mid_word), vec!["quick"]);

        let done = classify_words(target.words(), "the quick fox").statuses;
        assert!(current_words(&done).is_empty());
    }

    #[test]
    fn test_results_screen_shows_metrics_and_feedback() {
        let mut app = app("hi", Mode::Character);
        for c in "hx".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        assert_eq!(app.state, AppState::Results);
        let out = rendered(&app);
        assert!(out.contains("50% acc"));
        assert!(out.contains("Focus on improving your accuracy."));
        assert!(out.contains("(r)etry"));
    }

    #[test]
    fn test_unavailable_screen() {
        let app = app("  ", Mode::Word);
        let out = rendered(&app);
        assert!(out.contains("Failed to load words"));
    }

    #[test]
    fn test_word_spans_follow_statuses() {
        let target = TargetText::from_words(["ab", "cd"]).unwrap();
        let palette = Palette::default();
        let spans = prompt_spans(
            &target,
            Mode::Word,
            &[UnitStatus::Correct, UnitStatus::Current],
            0,
            &palette,
        );
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "ab");
        assert_eq!(spans[0].style, palette.correct);
        assert_eq!(spans[2].style, palette.current);
    }

    #[test]
    fn test_char_spans_mark_cursor_and_missed_space() {
        let target = TargetText::from_words(["a", "b"]).unwrap();
        let palette = Palette::default();
        let statuses = [UnitStatus::Correct, UnitStatus::Incorrect, UnitStatus::Pending];
        let spans = prompt_spans(&target, Mode::Character, &statuses, 2, &palette);
        assert_eq!(spans[1].content, "·");
        assert_eq!(spans[1].style, palette.incorrect);
        assert_eq!(spans[2].style, palette.current);
    }
}
