use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from("")];

    match &app.session {
        Some(session) => {
            lines.push(Line::from(vec![
                Span::styled("  Signed in as   ", theme::dim_style()),
                Span::styled(
                    session.email.clone(),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Since          ", theme::dim_style()),
                Span::styled(session.signed_in_at.clone(), theme::normal_style()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Subscriptions  ", theme::dim_style()),
                Span::styled(
                    app.tracker.subscriptions().len().to_string(),
                    theme::normal_style(),
                ),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  :signout to sign out",
                theme::dim_style(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Not signed in",
                Style::default().fg(theme::YELLOW),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  :signin <email> <password>   Sign in",
                theme::normal_style(),
            )));
            lines.push(Line::from(Span::styled(
                "  :signup <email> <password>   Create an account",
                theme::normal_style(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Monthly budget ", theme::dim_style()),
        Span::styled(app.amount(app.tracker.budget()), theme::normal_style()),
        Span::styled("   (:budget <amount>)", theme::dim_style()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Savings policy ", theme::dim_style()),
        Span::styled(app.tracker.policy().to_string(), theme::normal_style()),
        Span::styled("   (:policy <clamped|raw>)", theme::dim_style()),
    ]));

    f.render_widget(Paragraph::new(lines).block(theme::panel("Account")), area);
}
