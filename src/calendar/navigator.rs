use super::grid::{days_in_month, MonthGrid, WeekRow, WeekdayConvention};
use thiserror::Error;
use time::{
    Date, Duration,
    Month::{self, December, January},
    OffsetDateTime, UtcOffset,
};

/// Source of "today" for the navigator
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

impl<F: Fn() -> Date> Clock for F {
    fn today(&self) -> Date {
        self()
    }
}

/// The current date in the local time zone as determined at startup
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock(UtcOffset);

impl LocalClock {
    // This must be called while the process is still single-threaded.
    pub(crate) fn new() -> Result<LocalClock, time::error::IndeterminateOffset> {
        UtcOffset::current_local_offset().map(LocalClock)
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.0).date()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Command {
    DayBack,
    DayForward,
    WeekBack,
    WeekForward,
    JumpToday,
    JumpWeekStart,
    JumpWeekEnd,
    JumpMonthStart,
    JumpMonthEnd,
    JumpMonthPrev,
    JumpMonthNext,
    JumpYearPrev,
    JumpYearNext,
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Outcome {
    Active,
    Selected(Date),
    Cancelled,
}

/// Tracks the focused date of a picker session and how the session ended.
///
/// Once the outcome leaves [`Outcome::Active`], every further command is
/// ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Navigator<C> {
    focused: Date,
    convention: WeekdayConvention,
    outcome: Outcome,
    clock: C,
}

impl<C: Clock> Navigator<C> {
    pub(crate) fn new(convention: WeekdayConvention, clock: C) -> Self {
        Navigator {
            focused: clock.today(),
            convention,
            outcome: Outcome::Active,
            clock,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.focused = date;
        self
    }

    pub(crate) fn focused(&self) -> Date {
        self.focused
    }

    pub(crate) fn convention(&self) -> WeekdayConvention {
        self.convention
    }

    pub(crate) fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub(crate) fn is_active(&self) -> bool {
        self.outcome == Outcome::Active
    }

    pub(crate) fn today(&self) -> Date {
        self.clock.today()
    }

    pub(crate) fn current_grid(&self) -> MonthGrid {
        MonthGrid::containing(self.focused, self.convention)
    }

    /// Apply `command` to the session.
    ///
    /// Returns `Err` and leaves the state untouched if the command would move
    /// the focus outside the range of representable dates.
    pub(crate) fn apply(&mut self, command: Command) -> Result<(), OutOfTimeError> {
        if !self.is_active() {
            return Ok(());
        }
        match command {
            Command::Confirm => self.outcome = Outcome::Selected(self.focused),
            Command::Cancel => self.outcome = Outcome::Cancelled,
            motion => self.focused = self.target(motion).ok_or(OutOfTimeError)?,
        }
        Ok(())
    }

    fn target(&self, command: Command) -> Option<Date> {
        let date = self.focused;
        match command {
            Command::DayBack => date.previous_day(),
            Command::DayForward => date.next_day(),
            Command::WeekBack => date.checked_sub(Duration::WEEK),
            Command::WeekForward => date.checked_add(Duration::WEEK),
            Command::JumpToday => Some(self.clock.today()),
            Command::JumpWeekStart => {
                let back = date.day() - self.current_week().first_day();
                date.checked_sub(Duration::days(back.into()))
            }
            Command::JumpWeekEnd => {
                let ahead = self.current_week().last_day() - date.day();
                date.checked_add(Duration::days(ahead.into()))
            }
            Command::JumpMonthStart => date.replace_day(1).ok(),
            Command::JumpMonthEnd => date
                .replace_day(days_in_month(date.year(), date.month()))
                .ok(),
            Command::JumpMonthPrev => {
                let (year, month) = match date.month() {
                    January => (date.year().checked_sub(1)?, December),
                    m => (date.year(), m.previous()),
                };
                clamped_date(year, month, date.day())
            }
            Command::JumpMonthNext => {
                let (year, month) = match date.month() {
                    December => (date.year().checked_add(1)?, January),
                    m => (date.year(), m.next()),
                };
                clamped_date(year, month, date.day())
            }
            Command::JumpYearPrev => {
                clamped_date(date.year().checked_sub(1)?, date.month(), date.day())
            }
            Command::JumpYearNext => {
                clamped_date(date.year().checked_add(1)?, date.month(), date.day())
            }
            Command::Confirm | Command::Cancel => Some(date),
        }
    }

    fn current_week(&self) -> WeekRow {
        *self.current_grid().week_of(self.focused.day())
    }
}

// Pulls `day` back to the last day of the month if the month is too short
fn clamped_date(year: i32, month: Month, day: u8) -> Option<Date> {
    Date::from_calendar_date(year, month, day.min(days_in_month(year, month))).ok()
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
