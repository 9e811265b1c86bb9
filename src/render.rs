//! Colored terminal rendering for calendar views and note results.

use calpro_core::grid::{CalendarCell, MonthGrid, WeekRow, YearOverview, weekday_labels};
use calpro_core::materialize::Materialized;
use chrono::Datelike;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

const CELL_WIDTH: usize = 4;

impl Render for CalendarCell {
    fn render(&self) -> String {
        let text = match self.date {
            Some(date) => format!("{:>3}", date.day()),
            None => "   ".to_string(),
        };

        if self.is_today {
            text.reversed().bold().to_string()
        } else if !self.in_month {
            text.dimmed().to_string()
        } else {
            text
        }
    }
}

impl Render for WeekRow {
    fn render(&self) -> String {
        let number = format!("{:>3}", self.week_number());
        let number = if self.is_current_week() {
            number.yellow().bold().to_string()
        } else {
            number.yellow().to_string()
        };

        let days: Vec<String> = self.cells.iter().map(Render::render).collect();
        format!("{} {}", number, days.join(" "))
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(format!("{}", self.title().green().bold()));

        let header: Vec<String> = weekday_labels(self.start_of_week)
            .iter()
            .map(|label| format!("{:>3}", label))
            .collect();
        lines.push(format!("{} {}", " CW".dimmed(), header.join(" ").bold()));

        lines.extend(self.rows.iter().map(Render::render));

        lines.join("\n")
    }
}

impl Render for YearOverview {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", self.year.to_string().green().bold())];

        for quarter in &self.quarters {
            let label = if quarter.is_current {
                quarter.label().yellow().bold().to_string()
            } else {
                quarter.label().yellow().to_string()
            };

            let months: Vec<String> = quarter
                .months
                .iter()
                .map(|month| {
                    let text = format!("{:<width$}", month.label, width = CELL_WIDTH);
                    if month.is_current {
                        text.reversed().bold().to_string()
                    } else {
                        text
                    }
                })
                .collect();

            lines.push(format!("{}  {}", label, months.join(" ")));
        }

        lines.join("\n")
    }
}

impl Render for Materialized {
    fn render(&self) -> String {
        match self {
            Materialized::Opened(path) => format!("Opened {}", path.bold()),
            Materialized::Created { path, .. } => {
                let mut text = format!("{} {}", "Created".green(), path.bold());
                if let Some(template) = self.missing_template() {
                    text.push_str(&format!(
                        "\n{}",
                        format!("Template: {} not found, note left empty", template).yellow()
                    ));
                }
                text
            }
            Materialized::Declined(path) => format!("Not creating {}", path).dimmed().to_string(),
        }
    }
}
