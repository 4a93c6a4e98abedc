use crate::app::{App, FocusedBox, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod batch_list;
mod delete_dialog;
mod form_view;
pub(super) mod utils;

/// Form rows visible before the form box stops growing.
const MAX_VISIBLE_FORM_ROWS: u16 = 6;

pub fn render(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(frame.area());

    render_status_bar(frame, root[0], app);
    render_main_view(frame, app, root[1]);

    if app.current_view == View::ConfirmDelete {
        delete_dialog::render_delete_confirm_dialog(frame, app);
    }
}

fn render_main_view(frame: &mut Frame, app: &App, body: Rect) {
    let form_height = app.form.rows.len().min(MAX_VISIBLE_FORM_ROWS as usize) as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(form_height), // Entry form
            Constraint::Min(5),              // Batch list
            Constraint::Length(3),           // Status
            Constraint::Length(3),           // Controls
        ])
        .split(body);

    form_view::render_form(frame, chunks[0], app);
    batch_list::render_batch_list(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

/// One line: the aggregate countdown plus ready/total counts.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let content = Rect {
        x: rows[1].x + 2,
        width: rows[1].width.saturating_sub(4),
        ..rows[1]
    };

    let snapshot = app.timer.snapshot();
    let ready = app.timer.batches().iter().filter(|b| b.is_done()).count();
    let muted = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            snapshot.status.to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" | ", muted),
        Span::styled(
            format!("{} ready / {} batches", ready, app.timer.len()),
            muted,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), content);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.status_message {
        Some(message) => (message.clone(), Color::Green),
        None if app.timer.is_empty() => (
            "Name a batch and give it a fermentation time in hours".to_string(),
            Color::White,
        ),
        None => (app.timer.snapshot().status.to_string(), Color::White),
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(Style::default().fg(color))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let line = match app.focused_box {
        FocusedBox::Form => vec![
            Span::styled("Tab", key),
            Span::raw(": Next field  "),
            Span::styled("↑↓", key),
            Span::raw(": Row  "),
            Span::styled("Ctrl+A", key),
            Span::raw(": Add row  "),
            Span::styled("Enter", key),
            Span::raw(": Start  "),
            Span::styled("Esc", key),
            Span::raw(": Batches  "),
            Span::styled("Ctrl+C", key),
            Span::raw(": Quit"),
        ],
        FocusedBox::Batches => vec![
            Span::styled("↑↓ / j/k", key),
            Span::raw(": Select  "),
            Span::styled("D", key),
            Span::raw(": Delete  "),
            Span::styled("A", key),
            Span::raw(": Add row  "),
            Span::styled("Tab", key),
            Span::raw(": Form  "),
            Span::styled("Q", key),
            Span::raw(": Quit"),
        ],
    };

    let controls = Paragraph::new(Line::from(line))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{fill_form, test_app, T0};
    use dough_timer::MS_PER_HOUR;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_app_shows_idle_status() {
        let (app, _clock) = test_app();
        let text = screen(&app);
        assert!(text.contains("Next batch in --:--:--"));
        assert!(text.contains("No batches yet"));
    }

    #[test]
    fn batches_show_countdown_ready_label_and_ready_time() {
        let (mut app, clock) = test_app();
        fill_form(&mut app, &[("Friday pies", "48"), ("Sunday pies", "72")]);
        app.submit_form();
        clock.set(T0 + 48 * MS_PER_HOUR + 1_000);
        app.timer.tick_if_due();

        let text = screen(&app);
        assert!(text.contains("Friday pies"));
        assert!(text.contains("READY"));
        assert!(text.contains("23:59:59"));
        // T0 is Monday 2024-01-01 00:00 UTC, so +72h is Thursday midnight
        assert!(text.contains("ready: Thu 12:00 AM"));
        assert!(text.contains("Next batch in 23:59:59"));
    }

    #[test]
    fn status_box_falls_back_to_live_status_after_empty_submit() {
        let (mut app, clock) = test_app();
        fill_form(&mut app, &[("pies", "1")]);
        app.submit_form();
        assert!(screen(&app).contains("Started 1 batch"));

        fill_form(&mut app, &[("", "5")]);
        app.submit_form();
        clock.set(T0 + 2 * MS_PER_HOUR);
        app.timer.tick_if_due();

        let text = screen(&app);
        assert!(!text.contains("Started 1 batch"));
        let status_box = text
            .lines()
            .skip_while(|line| !line.contains(" Status "))
            .nth(1)
            .unwrap_or_default();
        assert!(status_box.contains("All batches are ready"));
    }

    #[test]
    fn confirm_dialog_names_the_batch() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("Friday pies", "48")]);
        app.submit_form();
        app.enter_delete_confirm();

        let text = screen(&app);
        assert!(text.contains("Delete Batch?"));
        assert!(text.contains("Friday pies"));
    }
}
