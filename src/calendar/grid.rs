use time::{
    util::is_leap_year,
    Date,
    Month::{self, *},
    Weekday::{self, *},
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Which day of the week occupies the leftmost column of the calendar
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum WeekdayConvention {
    #[default]
    MondayFirst,
    SundayFirst,
}

impl WeekdayConvention {
    /// The weekdays in the order they appear across a row
    pub(crate) fn weekdays(self) -> [Weekday; DAYS_IN_WEEK] {
        match self {
            WeekdayConvention::MondayFirst => [
                Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday,
            ],
            WeekdayConvention::SundayFirst => [
                Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
            ],
        }
    }

    /// 0-based column of `wd` within a row
    pub(crate) fn column_of(self, wd: Weekday) -> usize {
        usize::from(match self {
            WeekdayConvention::MondayFirst => wd.number_days_from_monday(),
            WeekdayConvention::SundayFirst => wd.number_days_from_sunday(),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    /// A slot belonging to the previous or next month
    Empty,
    Day(u8),
}

impl Cell {
    pub(crate) fn day(self) -> Option<u8> {
        match self {
            Cell::Empty => None,
            Cell::Day(d) => Some(d),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
// Invariant: At least one cell is a Day
pub(crate) struct WeekRow([Cell; DAYS_IN_WEEK]);

impl WeekRow {
    pub(crate) fn cells(&self) -> &[Cell; DAYS_IN_WEEK] {
        &self.0
    }

    fn days(&self) -> impl DoubleEndedIterator<Item = u8> + '_ {
        self.0.iter().filter_map(|c| c.day())
    }

    pub(crate) fn first_day(&self) -> u8 {
        self.days()
            .next()
            .expect("WeekRow should contain at least one day")
    }

    pub(crate) fn last_day(&self) -> u8 {
        self.days()
            .next_back()
            .expect("WeekRow should contain at least one day")
    }

    pub(crate) fn contains(&self, day: u8) -> bool {
        self.0.contains(&Cell::Day(day))
    }
}

/// The layout of a single month, one row per week it touches.
///
/// Days of neighboring months are never included; the first and last rows
/// are padded with [`Cell::Empty`] instead.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    convention: WeekdayConvention,
    rows: Vec<WeekRow>,
}

impl MonthGrid {
    /// Lay out `month` of `year` with weeks ordered per `convention`.
    ///
    /// # Panics
    ///
    /// Panics if `year` is outside the range supported by [`time::Date`].
    pub(crate) fn build(year: i32, month: Month, convention: WeekdayConvention) -> MonthGrid {
        let first = Date::from_calendar_date(year, month, 1)
            .expect("year should be within the range supported by time::Date");
        let mut rows = Vec::with_capacity(6);
        let mut cells = [Cell::Empty; DAYS_IN_WEEK];
        let mut col = convention.column_of(first.weekday());
        for day in 1..=days_in_month(year, month) {
            cells[col] = Cell::Day(day);
            col += 1;
            if col == DAYS_IN_WEEK {
                rows.push(WeekRow(cells));
                cells = [Cell::Empty; DAYS_IN_WEEK];
                col = 0;
            }
        }
        if col > 0 {
            rows.push(WeekRow(cells));
        }
        MonthGrid {
            year,
            month,
            convention,
            rows,
        }
    }

    /// Lay out the month containing `date`
    pub(crate) fn containing(date: Date, convention: WeekdayConvention) -> MonthGrid {
        MonthGrid::build(date.year(), date.month(), convention)
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn convention(&self) -> WeekdayConvention {
        self.convention
    }

    pub(crate) fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    /// Returns the 0-based index of the row containing `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is not a day of this grid's month.
    pub(crate) fn week_index_of(&self, day: u8) -> usize {
        self.rows
            .iter()
            .position(|row| row.contains(day))
            .unwrap_or_else(|| panic!("day {day} is not in {} {}", self.month, self.year))
    }

    /// Returns the row containing `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is not a day of this grid's month.
    pub(crate) fn week_of(&self, day: u8) -> &WeekRow {
        &self.rows[self.week_index_of(day)]
    }
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        February if is_leap_year(year) => 29,
        February => 28,
        April | June | September | November => 30,
        January | March | May | July | August | October | December => 31,
    }
}
