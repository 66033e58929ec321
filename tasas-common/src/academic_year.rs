//! Academic year ("curso") arithmetic
//!
//! A course is named after the calendar year in which it begins. With the
//! default start month (September), 2016-10-01 falls in course 2016 and
//! 2017-03-01 still falls in course 2016.

use chrono::{Datelike, Local, NaiveDate};
use std::ops::RangeInclusive;

use crate::config::ImportSettings;

/// Course in progress on `today`, given the month courses start in (1-12)
pub fn current_course(today: NaiveDate, course_start_month: u32) -> i32 {
    if today.month() >= course_start_month {
        today.year()
    } else {
        today.year() - 1
    }
}

/// Course in progress as of the local date
pub fn current_course_now(course_start_month: u32) -> i32 {
    current_course(Local::now().date_naive(), course_start_month)
}

/// Inclusive range of academic years the importer looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub first: i32,
    pub last: i32,
}

impl YearWindow {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// `min_year ..= current_course + years_in_advance`
    pub fn configured(settings: &ImportSettings, today: NaiveDate) -> Self {
        let current = current_course(today, settings.course_start_month);
        Self::new(settings.min_year, current + settings.years_in_advance)
    }

    /// Window as of the local date
    pub fn configured_now(settings: &ImportSettings) -> Self {
        Self::configured(settings, Local::now().date_naive())
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }
}
