use crate::dataset::{SortKey, University, Value};

/// How a raw attribute value is turned into a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Plain,
    /// One decimal place and a trailing percent sign, `3.4%`
    Percent,
    /// `5:1`
    Ratio,
    /// Grouped thousands with currency and scale, `$3,578K`
    CurrencyThousands,
}

impl FormatKind {
    pub fn render(&self, value: Value<'_>) -> String {
        match (self, value.as_number()) {
            (FormatKind::Percent, Some(n)) => format!("{}%", one_decimal(n)),
            (FormatKind::Ratio, Some(_)) => format!("{value}:1"),
            (FormatKind::CurrencyThousands, Some(n)) => {
                format!("${}K", group_thousands(n.round() as i64))
            }
            _ => value.to_string(),
        }
    }
}

/// One fractional digit. Values exactly halfway round away from zero,
/// `0.25` gives `0.3`.
fn one_decimal(value: f64) -> String {
    // Exact expansion; a tie is `d.d5` followed by zeros only
    let exact = format!("{:.60}", value.abs());
    let fraction = exact.split_once('.').map_or("", |(_, f)| f);
    let tie = fraction.get(1..2) == Some("5") && fraction[2..].bytes().all(|b| b == b'0');
    if !tie {
        return format!("{value:.1}");
    }
    let rounded = (value.abs() * 10.0).ceil() / 10.0;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{rounded:.1}")
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, chr) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(chr);
    }
    out
}

/// Static display and sort metadata of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: SortKey,
    pub label: &'static str,
    pub numeric: bool,
    pub description: Option<&'static str>,
    pub format: FormatKind,
}

impl ColumnDescriptor {
    pub fn cell(&self, record: &University) -> String {
        self.format.render(record.value(self.key))
    }

    /// Tooltip text shown for a focused header.
    pub fn hint(&self) -> String {
        match self.description {
            Some(description) => format!("{description} (Enter to sort)"),
            None => format!("Sort by {}", self.label),
        }
    }
}

const fn column(
    key: SortKey,
    label: &'static str,
    numeric: bool,
    description: &'static str,
    format: FormatKind,
) -> ColumnDescriptor {
    ColumnDescriptor {
        key,
        label,
        numeric,
        description: Some(description),
        format,
    }
}

#[rustfmt::skip]
const COLUMNS: [ColumnDescriptor; 7] = [
    column(SortKey::Name, "University Name", false, "Name of the institution.", FormatKind::Plain),
    column(SortKey::Rank, "Rank", true, "Overall US News & World Report ranking.", FormatKind::Plain),
    column(SortKey::Location, "Location", false, "City and state of the main campus.", FormatKind::Plain),
    column(SortKey::AvgSat, "Avg SAT", true, "Average SAT score of admitted students.", FormatKind::Plain),
    column(SortKey::AcceptanceRate, "Accept %", true, "Percentage of applicants admitted.", FormatKind::Percent),
    column(SortKey::StudentFacultyRatio, "S/F Ratio", true, "Ratio of students to faculty members.", FormatKind::Ratio),
    column(SortKey::EndowmentPerStudent, "Endow./Std (K$)", true, "Endowment per student in thousands of USD.", FormatKind::CurrencyThousands),
];

/// The built-in columns in display order.
pub fn columns() -> Vec<ColumnDescriptor> {
    COLUMNS.to_vec()
}
