use ratatui::{prelude::*, widgets::*};

use crate::messages::ui_events::Form;
use crate::models::{Operation, SessionState};

/// Renders a text input field, highlighted while selected
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool, is_editing: bool) -> Paragraph<'a> {
    let style = if is_editing {
        Style::default().fg(Color::Green)
    } else if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Key/value line used by the result panels
pub fn labeled<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Session color
pub fn session_color(session: &SessionState) -> Color {
    match session {
        SessionState::Connecting => Color::Yellow,
        SessionState::Ready { .. } => Color::Green,
        SessionState::Failed { .. } => Color::Red,
    }
}

/// Operation color
pub fn operation_color(operation: Operation) -> Color {
    match operation {
        Operation::Upload | Operation::Mint => Color::Magenta,
        Operation::ListForSale => Color::Yellow,
        Operation::Purchase => Color::Green,
        Operation::FetchToken | Operation::FetchSalePrice | Operation::TotalTokens => Color::Cyan,
        Operation::InitSession | Operation::ReadFile => Color::White,
    }
}

/// Status bar text while a field is being edited
pub fn editing_hint(form: Form) -> &'static str {
    match form {
        // Enter reads the file rather than submitting
        Form::Upload => " ESC:stop editing | arrows:move | Enter:load ",
        _ => " ESC:stop editing | arrows:move | Tab:next field | Enter:submit ",
    }
}

/// Shorten a hex string to `0x1234…abcd`
pub fn short_hex(hex: &str) -> String {
    if hex.len() <= 14 {
        return hex.to_string();
    }
    format!("{}…{}", &hex[..6], &hex[hex.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_hint_matches_enter_key() {
        assert!(editing_hint(Form::Upload).contains("Enter:load"));
        assert!(!editing_hint(Form::Upload).contains("Enter:submit"));
        for form in Form::ALL.iter().filter(|f| **f != Form::Upload) {
            assert!(editing_hint(*form).contains("Enter:submit"));
        }
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex("0x1234"), "0x1234");
        assert_eq!(
            short_hex("0x932e3a5c656ea9278f3ced2f213db985a400d901"),
            "0x932e…d901"
        );
    }
}
