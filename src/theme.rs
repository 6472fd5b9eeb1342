use ratatui::style::{Color, Modifier, Style};

pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_HEADER_STYLE: Style = TITLE_STYLE;

pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const HELP_STYLE: Style = Style::new();

pub(crate) const WORKDAY_COLOR: Color = Color::Yellow;

pub(crate) const WEEKEND_COLOR: Color = Color::Blue;

pub(crate) const TODAY_COLOR: Color = Color::LightRed;

/// Foreground of the focused day, drawn on a background of the day's color
pub(crate) const FOCUSED_FG: Color = Color::Black;

pub(crate) fn day_style(color: Color, focused: bool) -> Style {
    if focused {
        Style::new().fg(FOCUSED_FG).bg(color)
    } else {
        Style::new().fg(color)
    }
}
