//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The five forms on the screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Form {
    #[default]
    Upload,
    GetToken,
    SellToken,
    SellingPrice,
    BuyToken,
}

impl Form {
    pub const ALL: [Form; 5] = [
        Form::Upload,
        Form::GetToken,
        Form::SellToken,
        Form::SellingPrice,
        Form::BuyToken,
    ];

    pub fn next(&self) -> Form {
        match self {
            Form::Upload => Form::GetToken,
            Form::GetToken => Form::SellToken,
            Form::SellToken => Form::SellingPrice,
            Form::SellingPrice => Form::BuyToken,
            Form::BuyToken => Form::Upload,
        }
    }

    pub fn prev(&self) -> Form {
        match self {
            Form::Upload => Form::BuyToken,
            Form::GetToken => Form::Upload,
            Form::SellToken => Form::GetToken,
            Form::SellingPrice => Form::SellToken,
            Form::BuyToken => Form::SellingPrice,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Form::Upload => 0,
            Form::GetToken => 1,
            Form::SellToken => 2,
            Form::SellingPrice => 3,
            Form::BuyToken => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Form::Upload => "Upload new Token",
            Form::GetToken => "Get Token",
            Form::SellToken => "Sell Token",
            Form::SellingPrice => "Get Selling Price",
            Form::BuyToken => "Buy Token",
        }
    }

    /// Input fields, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Form::Upload => &[Field::FilePath],
            Form::GetToken | Form::SellingPrice => &[Field::TokenId],
            Form::SellToken | Form::BuyToken => &[Field::TokenId, Field::Price],
        }
    }
}

/// A form input
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    FilePath,
    TokenId,
    Price,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FilePath => "File",
            Field::TokenId => "Token Id",
            Field::Price => "Price",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    NextForm,
    PrevForm,
    NextField,
    PrevField,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Form actions
    SelectFile,
    Submit,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissAlert,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_form: Form,
    input_mode: InputMode,
    show_help: bool,
    show_alert: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // The alert blocks everything else
    if show_alert {
        return match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => Some(UiEvent::DismissAlert),
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab | KeyCode::Right => Some(UiEvent::NextForm),
            KeyCode::BackTab | KeyCode::Left => Some(UiEvent::PrevForm),
            KeyCode::Up => Some(UiEvent::PrevField),
            KeyCode::Down => Some(UiEvent::NextField),
            KeyCode::PageUp => Some(UiEvent::ScrollUp),
            KeyCode::PageDown => Some(UiEvent::ScrollDown),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('l') if active_form == Form::Upload => Some(UiEvent::SelectFile),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Enter => {
                if active_form == Form::Upload {
                    Some(UiEvent::SelectFile)
                } else {
                    Some(UiEvent::Submit)
                }
            }
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_form_cycle_visits_all() {
        let mut form = Form::Upload;
        for expected in Form::ALL.iter().skip(1) {
            form = form.next();
            assert_eq!(form, *expected);
        }
        assert_eq!(form.next(), Form::Upload);
        assert_eq!(Form::Upload.prev(), Form::BuyToken);
        for (i, form) in Form::ALL.iter().enumerate() {
            assert_eq!(form.index(), i);
        }
    }

    #[test]
    fn test_normal_mode_keys() {
        let map = |code| key_to_ui_event(press(code), Form::GetToken, InputMode::Normal, false, false);
        assert_eq!(map(KeyCode::Tab), Some(UiEvent::NextForm));
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::Submit));
        assert_eq!(map(KeyCode::Char('e')), Some(UiEvent::StartEditing));
        assert_eq!(map(KeyCode::Char('q')), Some(UiEvent::Quit));
        // `l` only loads files on the upload form
        assert_eq!(map(KeyCode::Char('l')), None);
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('l')), Form::Upload, InputMode::Normal, false, false),
            Some(UiEvent::SelectFile)
        );
    }

    #[test]
    fn test_enter_while_editing() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Form::Upload, InputMode::Editing, false, false),
            Some(UiEvent::SelectFile)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Form::BuyToken, InputMode::Editing, false, false),
            Some(UiEvent::Submit)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Form::BuyToken, InputMode::Editing, false, false),
            Some(UiEvent::CharInput('q'))
        );
    }

    #[test]
    fn test_popups_swallow_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Form::Upload, InputMode::Normal, false, true),
            Some(UiEvent::DismissAlert)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), Form::Upload, InputMode::Normal, false, true),
            Some(UiEvent::Quit)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Form::Upload, InputMode::Normal, true, false),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Form::SellToken, InputMode::Editing, false, false),
            Some(UiEvent::Quit)
        );
    }
}
