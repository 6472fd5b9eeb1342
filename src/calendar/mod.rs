mod grid;
mod navigator;
mod widget;
pub(crate) use self::grid::WeekdayConvention;
pub(crate) use self::navigator::{Clock, Command, LocalClock, Navigator, Outcome};
pub(crate) use self::widget::MonthView;
