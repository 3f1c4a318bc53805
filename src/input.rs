use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    NextCoin,
    PrevCoin,
    /// Shift the lookback window by this many days (clamped by the caller).
    AdjustDays(i32),
    ToggleIndicators,
    RunBacktest,
    OpenRiskForm,
    OpenTradeForm,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    NextField,
    PrevField,
    Input(char),
    Backspace,
    SetBuy,
    SetSell,
    Submit,
    Cancel,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Right => Some(UiCommand::NextCoin),
        KeyCode::Left => Some(UiCommand::PrevCoin),
        KeyCode::Up => Some(UiCommand::AdjustDays(1)),
        KeyCode::Down => Some(UiCommand::AdjustDays(-1)),
        KeyCode::Char('C') => Some(UiCommand::PrevCoin),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiCommand::AdjustDays(1)),
        KeyCode::Char('-') => Some(UiCommand::AdjustDays(-1)),
        KeyCode::Char(']') => Some(UiCommand::AdjustDays(7)),
        KeyCode::Char('[') => Some(UiCommand::AdjustDays(-7)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            'c' => Some(UiCommand::NextCoin),
            'i' => Some(UiCommand::ToggleIndicators),
            'b' => Some(UiCommand::RunBacktest),
            'r' => Some(UiCommand::OpenRiskForm),
            't' => Some(UiCommand::OpenTradeForm),
            'u' => Some(UiCommand::Refresh),
            _ => None,
        },
        _ => None,
    }
}

/// Keys inside an open form. Only digits and `.` are accepted as text.
pub fn parse_form_command(key_code: &KeyCode) -> Option<FormCommand> {
    match key_code {
        KeyCode::Tab | KeyCode::Down => Some(FormCommand::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(FormCommand::PrevField),
        KeyCode::Backspace => Some(FormCommand::Backspace),
        KeyCode::Enter => Some(FormCommand::Submit),
        KeyCode::Esc => Some(FormCommand::Cancel),
        KeyCode::Char(c) if c.is_ascii_digit() || *c == '.' => Some(FormCommand::Input(*c)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'b' => Some(FormCommand::SetBuy),
            's' => Some(FormCommand::SetSell),
            _ => None,
        },
        _ => None,
    }
}
