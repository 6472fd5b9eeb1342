use ratatui::style::Color;
use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static SLASH_YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]/[month]/[day]");

/// Colors that individual dates should be drawn in.
///
/// Parsed from a single line of the form
/// `COLOR:YYYY/MM/DD,YYYY/MM/DD;COLOR:YYYY/MM/DD`, where `COLOR` is anything
/// [`Color`] can parse (`red`, `#ff8800`, `208`).  A date listed in more than
/// one group takes the color of the last one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateColors(HashMap<Date, Color>);

impl DateColors {
    pub(crate) fn get(&self, date: Date) -> Option<Color> {
        self.0.get(&date).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Read annotations from the first line of `reader`.  An empty input
    /// yields no annotations.
    pub(crate) fn from_reader<R: BufRead>(mut reader: R) -> Result<DateColors, ColorsError> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        line.parse()
    }
}

impl FromStr for DateColors {
    type Err = ColorsError;

    fn from_str(s: &str) -> Result<DateColors, ColorsError> {
        let mut colors = HashMap::new();
        for group in s.trim().split(';').filter(|g| !g.trim().is_empty()) {
            let Some((color, dates)) = group.split_once(':') else {
                return Err(ColorsError::Group(group.to_owned()));
            };
            let color = color.trim();
            let color = color
                .parse::<Color>()
                .map_err(|_| ColorsError::Color(color.to_owned()))?;
            for value in dates.split(',').map(str::trim) {
                let date =
                    Date::parse(value, &SLASH_YMD_FMT).map_err(|source| ColorsError::Date {
                        value: value.to_owned(),
                        source,
                    })?;
                colors.insert(date, color);
            }
        }
        Ok(DateColors(colors))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ColorsError {
    #[error("failed to read color annotations")]
    Read(#[from] std::io::Error),
    #[error("invalid color group {0:?}: expected COLOR:YYYY/MM/DD[,YYYY/MM/DD...]")]
    Group(String),
    #[error("invalid color {0:?}")]
    Color(String),
    #[error("invalid date {value:?}: expected YYYY/MM/DD")]
    Date {
        value: String,
        source: time::error::Parse,
    },
}
