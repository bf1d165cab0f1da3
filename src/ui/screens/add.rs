use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Form
            Constraint::Min(6),     // Live preview
        ])
        .split(area);

    render_form(f, chunks[0], app);
    render_preview(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let mut lines = vec![Line::from("")];

    for &field in FormField::all() {
        let focused = editing && app.form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value = app.form.value(field);
        let value_span = if value.is_empty() && !focused {
            Span::styled("(empty)", theme::dim_style())
        } else if focused {
            Span::styled(format!("{value}_"), theme::command_bar_style())
        } else {
            Span::styled(value.to_string(), theme::normal_style())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<30}", field.label()), label_style),
            value_span,
        ]));
        lines.push(Line::from(""));
    }

    let hint = if editing {
        "Tab/Shift-Tab switch field | Enter save | Esc cancel"
    } else {
        "Press i or Enter to start typing"
    };
    lines.push(Line::from(Span::styled(format!("  {hint}"), theme::dim_style())));

    f.render_widget(
        Paragraph::new(lines).block(theme::panel("New Subscription")),
        area,
    );
}

fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let lines = match app.form.preview() {
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Enter a monthly cost to see the yearly figures",
                theme::dim_style(),
            )),
        ],
        Some(preview) => {
            let savings = match preview.savings {
                Some(s) => Span::styled(
                    format!("{} a year on the annual plan", app.amount(s)),
                    theme::savings_style().add_modifier(Modifier::BOLD),
                ),
                None => Span::styled("no saving from an annual plan", theme::dim_style()),
            };
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Billed monthly for a year  ", theme::dim_style()),
                    Span::styled(app.amount(preview.annualized), theme::normal_style()),
                ]),
                Line::from(vec![
                    Span::styled("  Switching saves            ", theme::dim_style()),
                    savings,
                ]),
            ]
        }
    };

    f.render_widget(Paragraph::new(lines).block(theme::panel("Preview")), area);
}
