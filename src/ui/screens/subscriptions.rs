use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let subs = app.tracker.subscriptions();
    if subs.is_empty() {
        let hint = if app.session.is_some() {
            "Press a or type :add to track your first subscription"
        } else {
            "Sign in with :signin <email> <password> to see your subscriptions"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No subscriptions", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(theme::panel("Subscriptions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Name", "Monthly", "Annual Plan", "Yearly Cost", "Savings", "Added"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = subs
        .iter()
        .enumerate()
        .skip(app.sub_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, sub)| {
            let annual = if sub.has_annual_plan() {
                app.amount(sub.annual_plan_cost)
            } else {
                "-".to_string()
            };
            let savings = match sub.displayed_savings() {
                Some(s) => Cell::from(Span::styled(app.amount(s), theme::savings_style())),
                None => Cell::from(Span::styled("-", theme::dim_style())),
            };
            let added = sub.created_at.get(..10).unwrap_or(&sub.created_at).to_string();

            let style = if i == app.sub_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(truncate(&sub.name, 32)),
                Cell::from(app.amount(sub.monthly_cost)),
                Cell::from(annual),
                Cell::from(app.amount(sub.annualized_cost())),
                savings,
                Cell::from(added),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let summary = app.tracker.summary();
    let title = format!(
        "Subscriptions ({}) | {} / month",
        subs.len(),
        app.amount(summary.total_monthly)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));

    f.render_widget(table, area);
}
