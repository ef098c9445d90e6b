//! Moment-style date patterns and calendar month arithmetic.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TimelineError;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Tokens recognized in a pattern, longest first so that `MMMM` wins over `MM`.
const TOKENS: [(&str, &str); 8] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
];

/// A date pattern written with moment tokens (`DD.MM.YYYY`), compiled to the
/// equivalent chrono format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    chrono: String,
    has_day: bool,
    two_digit_year: bool,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self, TimelineError> {
        let mut chrono = String::with_capacity(pattern.len() * 2);
        let (mut has_year, mut has_month, mut has_day) = (false, false, false);
        let mut two_digit_year = false;
        let mut rest = pattern;

        'outer: while let Some(ch) = rest.chars().next() {
            if ch == '[' {
                let Some(end) = rest.find(']') else {
                    return Err(TimelineError::InvalidDateFormat(pattern.to_string()));
                };
                push_literal(&mut chrono, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }

            for (token, spec) in TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    match token.as_bytes()[0] {
                        b'Y' => {
                            has_year = true;
                            two_digit_year = token == "YY";
                        }
                        b'M' => has_month = true,
                        _ => has_day = true,
                    }
                    chrono.push_str(spec);
                    rest = tail;
                    continue 'outer;
                }
            }

            push_literal(&mut chrono, &rest[..ch.len_utf8()]);
            rest = &rest[ch.len_utf8()..];
        }

        if !has_year || !has_month {
            return Err(TimelineError::InvalidDateFormat(pattern.to_string()));
        }

        // Missing day component resolves to the first of the month.
        if !has_day {
            chrono.push_str("|%d");
        }

        Ok(Self {
            pattern: pattern.to_string(),
            chrono,
            has_day,
            two_digit_year,
        })
    }

    pub fn parse_date(&self, input: &str) -> Result<NaiveDate, TimelineError> {
        let trimmed = input.trim();
        let result = if self.has_day {
            NaiveDate::parse_from_str(trimmed, &self.chrono)
        } else {
            NaiveDate::parse_from_str(&format!("{trimmed}|01"), &self.chrono)
        };

        result
            .ok()
            .and_then(|date| self.pivot_two_digit_year(date))
            .ok_or_else(|| TimelineError::InvalidDate {
                input: input.to_string(),
                format: self.pattern.clone(),
            })
    }

    /// `YY` reads `69..=99` as 19xx and `00..=68` as 20xx. chrono's own pivot
    /// sits one year later, so only `69` needs moving back a century.
    fn pivot_two_digit_year(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.two_digit_year && date.year() == 2069 {
            date.with_year(1969)
        } else {
            Some(date)
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let spec = if self.has_day {
            self.chrono.as_str()
        } else {
            self.chrono.trim_end_matches("|%d")
        };
        date.format(spec).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: "DD.MM.YYYY".to_string(),
            chrono: "%d.%m.%Y".to_string(),
            has_day: true,
            two_digit_year: false,
        }
    }
}

fn push_literal(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
    }
}

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The month before this one.
    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Number of months from `self` to `later`, both inclusive. Zero when
    /// `later` precedes `self`.
    pub fn span_to(self, later: YearMonth) -> usize {
        let start = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let end = i64::from(later.year) * 12 + i64::from(later.month) - 1;
        usize::try_from(end - start + 1).unwrap_or(0)
    }

    pub fn short_name(self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_pattern_reads_dotted_dates() {
        let format = DateFormat::parse("DD.MM.YYYY").unwrap();
        assert_eq!(format.parse_date("11.01.1980").unwrap(), date(1980, 1, 11));
        assert_eq!(format, DateFormat::default());
    }

    #[test]
    fn single_letter_tokens_accept_unpadded_numbers() {
        let format = DateFormat::parse("D/M/YYYY").unwrap();
        assert_eq!(format.parse_date("3/7/2014").unwrap(), date(2014, 7, 3));
        assert_eq!(format.format_date(date(2014, 7, 3)), "3/7/2014");
    }

    #[test]
    fn two_digit_years_split_at_sixty_nine() {
        let format = DateFormat::parse("DD.MM.YY").unwrap();
        assert_eq!(format.parse_date("01.01.69").unwrap(), date(1969, 1, 1));
        assert_eq!(format.parse_date("01.01.99").unwrap(), date(1999, 1, 1));
        assert_eq!(format.parse_date("01.01.68").unwrap(), date(2068, 1, 1));
        assert_eq!(format.parse_date("15.06.00").unwrap(), date(2000, 6, 15));
    }

    #[test]
    fn four_digit_year_2069_is_kept() {
        let format = DateFormat::default();
        assert_eq!(format.parse_date("01.01.2069").unwrap(), date(2069, 1, 1));
    }

    #[test]
    fn month_names_and_escaped_literals() {
        let format = DateFormat::parse("[on] DD MMM YYYY").unwrap();
        assert_eq!(format.parse_date("on 05 Mar 2013").unwrap(), date(2013, 3, 5));
    }

    #[test]
    fn pattern_without_day_means_first_of_month() {
        let format = DateFormat::parse("MM-YYYY").unwrap();
        assert_eq!(format.parse_date("09-2012").unwrap(), date(2012, 9, 1));
        assert_eq!(format.format_date(date(2012, 9, 1)), "09-2012");
    }

    #[test]
    fn rejects_patterns_without_year_or_month() {
        assert!(matches!(
            DateFormat::parse("DD.MM"),
            Err(TimelineError::InvalidDateFormat(_))
        ));
        assert!(DateFormat::parse("[YYYY").is_err());
    }

    #[test]
    fn unparseable_input_reports_pattern() {
        let format = DateFormat::default();
        let err = format.parse_date("31.02.2014").unwrap_err();
        assert_eq!(
            err,
            TimelineError::InvalidDate {
                input: "31.02.2014".to_string(),
                format: "DD.MM.YYYY".to_string(),
            }
        );
    }

    #[test]
    fn month_arithmetic_crosses_years() {
        let jan = YearMonth::new(2014, 1);
        assert_eq!(jan.pred(), YearMonth::new(2013, 12));
        assert_eq!(YearMonth::new(2013, 11).span_to(YearMonth::new(2014, 2)), 4);
        assert_eq!(jan.span_to(jan), 1);
        assert_eq!(jan.span_to(YearMonth::new(2013, 5)), 0);
        assert_eq!(YearMonth::new(2014, 12).short_name(), "Dec");
    }
}
