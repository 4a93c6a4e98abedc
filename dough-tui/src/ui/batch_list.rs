use super::*;
use dough_timer::Countdown;

pub fn render_batch_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_box == FocusedBox::Batches;
    let entries = &app.timer.snapshot().entries;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Batches ({}) ", entries.len()))
        .border_style(focus_style(focused))
        .padding(Padding::horizontal(1));

    if entries.is_empty() {
        let empty = Paragraph::new("No batches yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let countdown_style = match entry.countdown {
                Countdown::Ready => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Countdown::Remaining(_) => Style::default().fg(Color::Yellow),
                Countdown::Pending => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", entry.name, width = name_width),
                    Style::default().fg(Color::White),
                ),
                Span::raw("  "),
                Span::styled(format!("{:>9}", entry.countdown), countdown_style),
                Span::raw("  "),
                Span::styled(
                    format!("ready: {}", app.ready_at_label(entry.end_time)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    });

    let mut state = ListState::default().with_selected(app.selected_batch);
    frame.render_stateful_widget(list, area, &mut state);
}
