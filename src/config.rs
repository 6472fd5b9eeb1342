use crate::calendar::WeekdayConvention;
use std::str::FromStr;
use thiserror::Error;
use time::{
    error::InvalidFormatDescription,
    format_description::{self, BorrowedFormatItem, OwnedFormatItem},
    macros::format_description,
    Date,
};

const DEFAULT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]/[month]/[day]");

/// Named output formats, accepted by `--format`
static FORMAT_TOKENS: &[(&str, &[BorrowedFormatItem<'_>])] = &[
    ("yyyy/mm/dd", DEFAULT_FORMAT),
    ("Y/m/d", DEFAULT_FORMAT),
    ("yyyy-mm-dd", format_description!("[year]-[month]-[day]")),
    ("Y-m-d", format_description!("[year]-[month]-[day]")),
    (
        "F j, Y",
        format_description!("[month repr:long] [day padding:none], [year]"),
    ),
    (
        "m/d/y",
        format_description!("[month]/[day]/[year repr:last_two]"),
    ),
    (
        "M-d-y",
        format_description!("[month repr:short]-[day]-[year repr:last_two]"),
    ),
    ("l", format_description!("[weekday]")),
    ("D", format_description!("[weekday repr:short]")),
    ("d", format_description!("[day]")),
    ("j", format_description!("[day padding:none]")),
    ("F", format_description!("[month repr:long]")),
    ("M", format_description!("[month repr:short]")),
    ("m", format_description!("[month]")),
    ("n", format_description!("[month padding:none]")),
    ("Y", format_description!("[year]")),
    ("y", format_description!("[year repr:last_two]")),
];

/// How the selected date is written to stdout
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputFormat {
    Named(&'static [BorrowedFormatItem<'static>]),
    /// A `time` format description given verbatim, e.g. `[year]-[month]`
    Custom(OwnedFormatItem),
}

impl OutputFormat {
    pub(crate) fn format(&self, date: Date) -> Result<String, time::error::Format> {
        match self {
            OutputFormat::Named(items) => date.format(items),
            OutputFormat::Custom(item) => date.format(item),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> OutputFormat {
        OutputFormat::Named(DEFAULT_FORMAT)
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<OutputFormat, ConfigError> {
        if let Some(&(_, items)) = FORMAT_TOKENS.iter().find(|&&(token, _)| token == s) {
            Ok(OutputFormat::Named(items))
        } else if s.contains('[') {
            format_description::parse_owned::<2>(s)
                .map(OutputFormat::Custom)
                .map_err(|source| ConfigError::Description {
                    value: s.to_owned(),
                    source,
                })
        } else {
            Err(ConfigError::UnknownFormat(s.to_owned()))
        }
    }
}

impl FromStr for WeekdayConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<WeekdayConvention, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "mo" | "monday" => Ok(WeekdayConvention::MondayFirst),
            "su" | "sunday" => Ok(WeekdayConvention::SundayFirst),
            _ => Err(ConfigError::Weekday(s.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid first weekday {0:?}: expected \"mo\" or \"su\"")]
    Weekday(String),
    #[error("wrong date layout {0:?}")]
    UnknownFormat(String),
    #[error("invalid format description {value:?}")]
    Description {
        value: String,
        source: InvalidFormatDescription,
    },
}
