use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    TogglePlay,
    Play,
    Pause,
    Step,
    Reset,
    Buy,
    Sell,
    ToggleGrid,
    CycleTrend,
    VolatilityUp,
    VolatilityDown,
    SpeedUp,
    SpeedDown,
    FocusChart,
    ToggleLock,
    QuantityDigit(char),
    QuantityBackspace,
}

/// Keys while a chart point holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCommand {
    Previous,
    Next,
    Select,
    NudgeUp,
    NudgeDown,
    Exit,
}

/// Pointer gesture in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release,
}

pub fn parse_main_command(key_code: &KeyCode, modifiers: KeyModifiers) -> Option<UiCommand> {
    if modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL | KeyModifiers::SUPER) {
        return None;
    }
    match key_code {
        KeyCode::Char(' ') => Some(UiCommand::TogglePlay),
        KeyCode::Right => Some(UiCommand::Step),
        KeyCode::Backspace => Some(UiCommand::QuantityBackspace),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(UiCommand::QuantityDigit(*c)),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiCommand::VolatilityUp),
        KeyCode::Char('-') => Some(UiCommand::VolatilityDown),
        KeyCode::Char(']') => Some(UiCommand::SpeedUp),
        KeyCode::Char('[') => Some(UiCommand::SpeedDown),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' => Some(UiCommand::Pause),
            'r' => Some(UiCommand::Play),
            'n' => Some(UiCommand::Step),
            'x' => Some(UiCommand::Reset),
            'b' => Some(UiCommand::Buy),
            's' => Some(UiCommand::Sell),
            'g' => Some(UiCommand::ToggleGrid),
            't' => Some(UiCommand::CycleTrend),
            'f' => Some(UiCommand::FocusChart),
            'l' => Some(UiCommand::ToggleLock),
            _ => None,
        },
        _ => None,
    }
}

pub fn parse_focus_command(key_code: &KeyCode) -> Option<FocusCommand> {
    match key_code {
        KeyCode::Left => Some(FocusCommand::Previous),
        KeyCode::Right => Some(FocusCommand::Next),
        KeyCode::Enter => Some(FocusCommand::Select),
        KeyCode::Up => Some(FocusCommand::NudgeUp),
        KeyCode::Down => Some(FocusCommand::NudgeDown),
        KeyCode::Esc => Some(FocusCommand::Exit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' => Some(FocusCommand::Previous),
            'l' => Some(FocusCommand::Next),
            'k' => Some(FocusCommand::NudgeUp),
            'j' => Some(FocusCommand::NudgeDown),
            'f' => Some(FocusCommand::Exit),
            _ => None,
        },
        _ => None,
    }
}

pub fn parse_pointer(event: &MouseEvent) -> Option<PointerAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerAction::Press {
            column: event.column,
            row: event.row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerAction::Drag {
            column: event.column,
            row: event.row,
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerAction::Release),
        _ => None,
    }
}
