//! Plain-text calendar blocks: month grids, whole years, seasons and the
//! week day legend.

use std::fmt::{self, Write};

use crate::consts::FIRST_DAY;
use crate::format::{digit_count, render};
use crate::{Calendar, Date};

/// First character of `name`, used as the column header of a month grid.
fn initial(name: &str) -> &str {
    name.char_indices().nth(1).map_or(name, |(end, _)| &name[..end])
}

impl Date<'_> {
    /// Writes a grid of the month containing this date, one line per week:
    ///
    /// ```text
    /// 9: September
    ///  S  M  T  W  T  F  S
    ///                 1  2
    ///  3  4  5  6  7  8  9
    /// ```
    ///
    /// # Errors
    /// Only fails if `w` does.
    pub fn write_month_block<W: Write>(&self, w: &mut W) -> fmt::Result {
        let calendar = self.calendar();
        let fields = self.fields();
        let widest = calendar
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| m.days + u32::from(calendar.is_leap_month(i + 1)))
            .max()
            .unwrap_or(FIRST_DAY);
        let width = digit_count(u64::from(widest));

        write!(w, "{}: {}", fields.month, self.month_name())?;
        for (i, name) in calendar.week_days.iter().enumerate() {
            w.write_char(if i == 0 { '\n' } else { ' ' })?;
            write!(w, "{:>width$}", initial(name))?;
        }

        let first = self.days() - i64::from(fields.day_in_month) + 1;
        let last_weekday = calendar.week_days.len() - 1;
        for day in FIRST_DAY..=self.days_in_month() {
            let weekday = calendar.weekday_of(first + i64::from(day - FIRST_DAY));
            if day == FIRST_DAY || weekday == 0 {
                w.write_char('\n')?;
            }
            if day == FIRST_DAY {
                write!(w, "{:indent$}", "", indent = weekday * (width + 1))?;
            }
            write!(w, "{day:>width$}")?;
            if weekday != last_weekday {
                w.write_char(' ')?;
            }
        }
        w.write_char('\n')
    }

    pub fn month_block(&self) -> String {
        render(|f| self.write_month_block(f))
    }

    /// Writes a header, every month grid of the year, the seasons and the
    /// week day legend, separated by blank lines.
    ///
    /// # Errors
    /// Only fails if `w` does.
    pub fn write_year_block<W: Write>(&self, w: &mut W) -> fmt::Result {
        let calendar = self.calendar();
        let year = self.year();
        self.write_format(w, "Year %Y\n")?;

        let mut start = calendar.year_start(year);
        for month in 1..=calendar.months.len() {
            w.write_char('\n')?;
            calendar.date_from_days(start).write_month_block(w)?;
            start += i64::from(calendar.days_in_month(month, year));
        }

        w.write_char('\n')?;
        calendar.write_seasons_block(w)?;
        w.write_char('\n')?;
        calendar.write_weekdays_block(w)
    }

    pub fn year_block(&self) -> String {
        render(|f| self.write_year_block(f))
    }
}

impl Calendar {
    /// Writes every season with its start and end day, one per line.
    ///
    /// # Errors
    /// Only fails if `w` does.
    pub fn write_seasons_block<W: Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("Seasons:\n")?;
        for season in &self.seasons {
            writeln!(w, "  {season}")?;
        }
        Ok(())
    }

    /// Writes the numbered week days with their grid initials.
    ///
    /// # Errors
    /// Only fails if `w` does.
    pub fn write_weekdays_block<W: Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("Week Days:\n")?;
        for (i, name) in self.week_days.iter().enumerate() {
            writeln!(w, "  {}: ({}) {name}", i + 1, initial(name))?;
        }
        Ok(())
    }
}
