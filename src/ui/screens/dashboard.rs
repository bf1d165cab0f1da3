use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Paragraph,
    },
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine::Summary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{donut_points, truncate};

const DONUT_RINGS: usize = 8;
const DONUT_STEPS: usize = 160;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.tracker.summary();
    let banner_height = if summary.over_budget { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Over-budget banner
            Constraint::Length(7),             // Summary cards
            Constraint::Min(10),               // Donut + costs chart
        ])
        .split(area);

    if summary.over_budget {
        render_over_budget_banner(f, chunks[0], app, &summary);
    }
    render_summary_cards(f, chunks[1], app, &summary);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_donut(f, charts[0], &summary);
    render_cost_chart(f, charts[1], app);
}

fn utilization_color(summary: &Summary) -> Color {
    if summary.over_budget {
        theme::RED
    } else if summary.utilization_ratio() >= 0.8 {
        theme::YELLOW
    } else {
        theme::GREEN
    }
}

fn render_over_budget_banner(f: &mut Frame, area: Rect, app: &App, summary: &Summary) {
    let over_by = summary.total_monthly - app.tracker.budget();
    let text = format!(
        " Over budget by {}: monthly subscriptions total {} against a budget of {} ",
        app.amount(over_by),
        app.amount(summary.total_monthly),
        app.amount(app.tracker.budget()),
    );
    let banner = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(theme::RED));
    f.render_widget(banner, area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, summary: &Summary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let count = app.tracker.subscriptions().len();
    render_card(
        f,
        cards[0],
        "Monthly Total",
        app.amount(summary.total_monthly),
        theme::ACCENT,
        format!("{count} subscription{}", if count == 1 { "" } else { "s" }),
    );
    render_card(
        f,
        cards[1],
        "Yearly Cost",
        app.amount(summary.total_monthly * Decimal::new(12, 0)),
        theme::PEACH,
        "billed monthly".into(),
    );
    render_card(
        f,
        cards[2],
        "Savings Opportunity",
        app.amount(summary.total_savings_opportunity),
        theme::GREEN,
        format!("per year, {}", app.tracker.policy()),
    );
    render_card(
        f,
        cards[3],
        "Remaining Budget",
        app.amount(summary.remaining_budget),
        utilization_color(summary),
        format!("of {}", app.amount(app.tracker.budget())),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_donut(f: &mut Frame, area: Rect, summary: &Summary) {
    let (filled, empty) = donut_points(summary.utilization_ratio(), DONUT_RINGS, DONUT_STEPS);
    let color = utilization_color(summary);
    let label = format!("{}%", summary.utilization_percent);

    // Braille dots are square when x spans twice the cells y does.
    let inner_w = f64::from(area.width.saturating_sub(2).max(1));
    let inner_h = f64::from(area.height.saturating_sub(2).max(1));
    let y_half = 1.2;
    let x_half = y_half * (inner_w * 2.0) / (inner_h * 4.0);
    let cell_w = 2.0 * x_half / inner_w;
    let label_x = -(label.chars().count() as f64) * cell_w / 2.0;

    let canvas = Canvas::default()
        .block(theme::panel("Budget Used"))
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &empty,
                color: theme::OVERLAY,
            });
            ctx.draw(&Points {
                coords: &filled,
                color,
            });
            ctx.print(
                label_x,
                0.0,
                Line::styled(
                    label.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            );
        });

    f.render_widget(canvas, area);
}

fn render_cost_chart(f: &mut Frame, area: Rect, app: &App) {
    let subs = app.tracker.subscriptions();
    if subs.is_empty() {
        let hint = if app.session.is_some() {
            "No subscriptions yet. Add one with :add"
        } else {
            "Sign in with :signin or create an account with :signup"
        };
        let msg = Paragraph::new(Line::from(Span::styled(hint, theme::dim_style())))
            .centered()
            .block(theme::panel("Monthly Cost by Subscription"));
        f.render_widget(msg, area);
        return;
    }

    let mut by_cost: Vec<_> = subs.iter().collect();
    by_cost.sort_by(|a, b| b.monthly_cost.cmp(&a.monthly_cost));

    let bars: Vec<Bar> = by_cost
        .iter()
        .take(12)
        .map(|sub| {
            let val = sub.monthly_cost.round().to_u64().unwrap_or(0);
            let style = if sub.displayed_savings().is_some() {
                theme::savings_style()
            } else {
                Style::default().fg(theme::ACCENT)
            };
            Bar::default()
                .value(val)
                .text_value(app.amount(sub.monthly_cost))
                .label(Line::from(truncate(&sub.name, 10)))
                .style(style)
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel("Monthly Cost by Subscription"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
