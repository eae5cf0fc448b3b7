use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Format a whole currency amount, e.g. `$500`
pub fn format_amount(amount: u64, currency: &str) -> ColoredString {
    format!("{}{}", currency, amount).green()
}

/// Format a fractional share with two decimals
pub fn format_share(share: f64, currency: &str) -> ColoredString {
    format!("{}{:.2}", currency, share).yellow()
}

/// Format a yes/no flag for roster listings
pub fn format_flag(flag: bool) -> ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Write a formatted table border
pub fn write_table_border<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(width))
}

/// Write a table row with columns
pub fn write_table_row<W: Write>(
    out: &mut W,
    columns: &[ColoredString],
    widths: &[usize],
) -> io::Result<()> {
    writeln!(out, "{}", table_row(columns, widths))
}

// Padding is measured on the uncolored text so escape codes never eat into the width
fn table_row(columns: &[ColoredString], widths: &[usize]) -> String {
    let mut row = String::new();
    for (col, width) in columns.iter().zip(widths) {
        let visible = col.chars().count();
        row.push_str(&format!("{}{}  ", col, " ".repeat(width.saturating_sub(visible))));
    }
    row.trim_end().to_string()
}
