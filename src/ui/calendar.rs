//! Month calendar rendering.

use console::style;

use super::icons::CALENDAR;
use crate::calendar::{DayCell, MonthView};
use crate::models::DayOfWeek;
use crate::recurrence::DayStatus;

const CELL_WIDTH: usize = 5;

fn render_cell(cell: &DayCell) -> String {
    let marker = if cell.is_future {
        " "
    } else {
        match cell.status {
            DayStatus::NothingDue => " ",
            DayStatus::Complete => "●",
            DayStatus::Partial { .. } => "◐",
            DayStatus::Missed { .. } => "○",
        }
    };
    let text = format!("{:>2}{}", cell.date.format("%-d"), marker);
    let styled = match (cell.is_future, cell.status) {
        (true, _) | (_, DayStatus::NothingDue) => style(text).dim(),
        (_, DayStatus::Complete) => style(text).green(),
        (_, DayStatus::Partial { .. }) => style(text).yellow(),
        (_, DayStatus::Missed { .. }) => style(text).red(),
    };
    let styled = if cell.is_today { styled.reverse() } else { styled };
    // Pad outside the styled span so escape codes don't skew the width.
    format!("{}{}", styled, " ".repeat(CELL_WIDTH - 3))
}

pub fn render_month(view: &MonthView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}{}\n", CALENDAR, style(view.month.title()).bold()));

    let header: Vec<String> = view
        .weekday_headers()
        .iter()
        .map(|d| format!("{:<width$}", DayOfWeek::from(*d).short_name(), width = CELL_WIDTH))
        .collect();
    out.push_str(&format!("{}\n", style(header.concat()).dim()));

    for week in &view.weeks {
        let mut line = String::new();
        for cell in week {
            match cell {
                Some(cell) => line.push_str(&render_cell(cell)),
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "{}  {}  {}  {}\n",
        style("● all done").green(),
        style("◐ partial").yellow(),
        style("○ missed").red(),
        style("(blank: nothing due)").dim()
    ));
    out
}
