use super::*;
use crate::app::{FormField, TextInput};

/// Renders the input with a block cursor when it has focus.
fn field_spans(input: &TextInput, focused: bool, placeholder: &str) -> Vec<Span<'static>> {
    if focused {
        let (before, after) = input.split_at_cursor();
        return vec![Span::styled(
            format!("{}█{}", before, after),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
    }
    if input.value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::styled(
            input.value.clone(),
            Style::default().fg(Color::White),
        )]
    }
}

pub fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = app.focused_box == FocusedBox::Form;
    let form = &app.form;
    let visible = MAX_VISIBLE_FORM_ROWS as usize;
    let first = form.focused_row.saturating_sub(visible.saturating_sub(1));
    let label = Style::default().fg(Color::DarkGray);
    let hours_hint = format!("Hours (max {})", app.max_hours_hint);

    let lines: Vec<Line> = form
        .rows
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, row)| {
            let row_focused = form_focused && i == form.focused_row;
            let marker = if row_focused { "▶ " } else { "  " };
            let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Magenta))];
            spans.push(Span::styled("Name: ", label));
            spans.extend(field_spans(
                &row.name,
                row_focused && form.focused_field == FormField::Name,
                "Batch name (e.g. Friday pies)",
            ));
            spans.push(Span::styled("   Hours: ", label));
            spans.extend(field_spans(
                &row.hours,
                row_focused && form.focused_field == FormField::Hours,
                &hours_hint,
            ));
            Line::from(spans)
        })
        .collect();

    let title = format!(" New batches ({}) ", form.rows.len());
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_style(form_focused))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
