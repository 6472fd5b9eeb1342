use super::grid::{Cell, MonthGrid, WeekRow, WeekdayConvention, DAYS_IN_WEEK};
use super::navigator::{Clock, Navigator};
use crate::colors::DateColors;
use crate::theme::{
    day_style, HINT_STYLE, TITLE_STYLE, TODAY_COLOR, WEEKDAY_HEADER_STYLE, WEEKEND_COLOR,
    WORKDAY_COLOR,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use std::iter::zip;
use time::{Date, Weekday};

/// Width of the grid in columns: seven two-column days separated by single
/// spaces
const GRID_WIDTH: u16 = 20;

const CELL_GAP: &str = " ";

const EMPTY_CELL: &str = "  ";

/// Lines reserved for weeks.  Months that span fewer weeks leave the rest
/// blank so that the calendar doesn't jump around while navigating.
const GRID_LINES: u16 = 6;

/// Number of lines taken up by the title and the weekday header
const HEADER_LINES: u16 = 2;

/// Number of lines taken up by the blank separator and the key hint
const FOOTER_LINES: u16 = 2;

const TOTAL_HEIGHT: u16 = HEADER_LINES + GRID_LINES + FOOTER_LINES;

static HINT: &str = "?: help  q: quit";

/// Draws the month containing the navigator's focused date, centered in the
/// given area
#[derive(Debug)]
pub(crate) struct MonthView<'a, C> {
    navigator: &'a Navigator<C>,
    colors: &'a DateColors,
}

impl<'a, C> MonthView<'a, C> {
    pub(crate) fn new(navigator: &'a Navigator<C>, colors: &'a DateColors) -> Self {
        MonthView { navigator, colors }
    }
}

impl<C: Clock> MonthView<'_, C> {
    fn week_line(&self, grid: &MonthGrid, row: &WeekRow, today: Date) -> Line<'static> {
        let focused = self.navigator.focused();
        let mut spans = Vec::with_capacity(DAYS_IN_WEEK * 2);
        for (i, (cell, wd)) in zip(row.cells(), grid.convention().weekdays()).enumerate() {
            if i > 0 {
                spans.push(Span::raw(CELL_GAP));
            }
            spans.push(match *cell {
                Cell::Empty => Span::raw(EMPTY_CELL),
                Cell::Day(day) => {
                    let text = format!("{day:2}");
                    match focused.replace_day(day) {
                        Ok(date) => {
                            let color = match self.colors.get(date) {
                                Some(color) => color,
                                None if date == today => TODAY_COLOR,
                                None if is_weekend(wd) => WEEKEND_COLOR,
                                None => WORKDAY_COLOR,
                            };
                            Span::styled(text, day_style(color, date == focused))
                        }
                        Err(_) => Span::raw(text),
                    }
                }
            });
        }
        Line::from(spans)
    }
}

impl<C: Clock> Widget for MonthView<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([GRID_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([TOTAL_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        let grid = self.navigator.current_grid();
        let today = self.navigator.today();
        let mut lines = Vec::with_capacity(usize::from(TOTAL_HEIGHT));
        // Style spans rather than whole lines so that centering padding is
        // left unstyled
        lines.push(
            Line::from(Span::styled(
                format!("{} {}", grid.month(), grid.year()),
                TITLE_STYLE,
            ))
            .centered(),
        );
        lines.push(Line::from(Span::styled(
            weekday_header(grid.convention()),
            WEEKDAY_HEADER_STYLE,
        )));
        for row in grid.rows() {
            lines.push(self.week_line(&grid, row, today));
        }
        lines.resize(usize::from(HEADER_LINES + GRID_LINES), Line::default());
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(HINT, HINT_STYLE)).centered());
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}

fn weekday_header(convention: WeekdayConvention) -> String {
    convention.weekdays().map(abbreviation).join(CELL_GAP)
}

fn abbreviation(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
        Weekday::Sunday => "Su",
    }
}

fn is_weekend(wd: Weekday) -> bool {
    matches!(wd, Weekday::Saturday | Weekday::Sunday)
}
