use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::sorting::collate;

/// One university's static attribute set.
#[derive(Debug, Clone, PartialEq)]
pub struct University {
    pub id: u32,
    pub name: &'static str,
    pub rank: i64,
    pub avg_sat: i64,
    pub acceptance_rate: f64,       // Percentage, 5.0 means 5%
    pub student_faculty_ratio: f64, // 6.0 means 6:1
    pub endowment_per_student: f64, // Thousands of USD
    pub location: &'static str,
}

/// The attributes a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortKey {
    Name,
    Rank,
    AvgSat,
    AcceptanceRate,
    StudentFacultyRatio,
    EndowmentPerStudent,
    Location,
}

/// A raw attribute value as extracted for sorting and display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
    Number(f64),
}

impl Value<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Value::Text(_) => None,
            Value::Integer(i) => Some(i as f64),
            Value::Number(n) => Some(n),
        }
    }

    pub fn compare(&self, other: &Value<'_>) -> Ordering {
        match (*self, *other) {
            (Value::Text(a), Value::Text(b)) => collate(a, b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(&b),
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                // Text against a number has no order, the stable sort keeps input order.
                _ => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}

impl University {
    pub fn value(&self, key: SortKey) -> Value<'_> {
        match key {
            SortKey::Name => Value::Text(self.name),
            SortKey::Rank => Value::Integer(self.rank),
            SortKey::AvgSat => Value::Integer(self.avg_sat),
            SortKey::AcceptanceRate => Value::Number(self.acceptance_rate),
            SortKey::StudentFacultyRatio => Value::Number(self.student_faculty_ratio),
            SortKey::EndowmentPerStudent => Value::Number(self.endowment_per_student),
            SortKey::Location => Value::Text(self.location),
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn uni(
    id: u32,
    name: &'static str,
    rank: i64,
    avg_sat: i64,
    acceptance_rate: f64,
    student_faculty_ratio: f64,
    endowment_per_student: f64,
    location: &'static str,
) -> University {
    University {
        id,
        name,
        rank,
        avg_sat,
        acceptance_rate,
        student_faculty_ratio,
        endowment_per_student,
        location,
    }
}

#[rustfmt::skip]
const UNIVERSITIES: [University; 18] = [
    uni(1, "Princeton University", 1, 1545, 4.0, 5.0, 3578.0, "Princeton, NJ"),
    uni(2, "Massachusetts Institute of Technology (MIT)", 2, 1555, 4.8, 3.0, 1870.0, "Cambridge, MA"),
    uni(3, "Harvard University", 3, 1550, 3.4, 5.0, 2275.0, "Cambridge, MA"),
    uni(4, "Stanford University", 3, 1545, 3.7, 5.0, 2150.0, "Stanford, CA"),
    uni(5, "Yale University", 5, 1540, 5.3, 4.0, 2682.0, "New Haven, CT"),
    uni(6, "University of Pennsylvania", 6, 1535, 6.5, 4.0, 813.0, "Philadelphia, PA"),
    uni(7, "California Institute of Technology (Caltech)", 7, 1570, 3.9, 3.0, 1620.0, "Pasadena, CA"),
    uni(8, "Duke University", 7, 1525, 6.3, 5.0, 670.0, "Durham, NC"),
    uni(9, "Johns Hopkins University", 9, 1530, 7.5, 4.0, 375.0, "Baltimore, MD"),
    uni(10, "Northwestern University", 9, 1520, 7.5, 4.0, 590.0, "Evanston, IL"),
    uni(11, "Columbia University", 12, 1535, 4.1, 6.0, 850.0, "New York, NY"),
    uni(12, "Cornell University", 12, 1505, 8.0, 9.0, 380.0, "Ithaca, NY"),
    uni(13, "University of Chicago", 12, 1545, 5.4, 5.0, 580.0, "Chicago, IL"),
    uni(14, "University of California, Berkeley (UCB)", 15, 1480, 11.6, 19.0, 130.0, "Berkeley, CA"),
    uni(15, "University of California, Los Angeles (UCLA)", 15, 1470, 9.9, 18.0, 115.0, "Los Angeles, CA"),
    uni(16, "University of Michigan - Ann Arbor", 21, 1465, 17.7, 10.0, 280.0, "Ann Arbor, MI"),
    uni(17, "New York University (NYU)", 35, 1495, 12.5, 8.0, 100.0, "New York, NY"),
    uni(18, "University of Southern California (USC)", 28, 1485, 12.0, 9.0, 160.0, "Los Angeles, CA"),
];

/// The built-in dataset in its natural order.
pub fn universities() -> Vec<University> {
    UNIVERSITIES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn dataset_has_unique_ids() {
        let data = universities();
        assert_eq!(data.len(), 18);
        let ids: HashSet<u32> = data.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), data.len());
    }

    #[test]
    fn value_accessor_matches_attribute_types() {
        let princeton = &universities()[0];
        assert_eq!(
            princeton.value(SortKey::Name),
            Value::Text("Princeton University")
        );
        assert_eq!(princeton.value(SortKey::Rank), Value::Integer(1));
        assert_eq!(princeton.value(SortKey::AvgSat), Value::Integer(1545));
        assert_eq!(princeton.value(SortKey::AcceptanceRate), Value::Number(4.0));
        assert_eq!(
            princeton.value(SortKey::Location),
            Value::Text("Princeton, NJ")
        );
    }

    #[test]
    fn compare_numbers_across_variants() {
        assert_eq!(
            Value::Integer(3).compare(&Value::Number(3.5)),
            Ordering::Less
        );
        assert_eq!(
            Value::Number(9.9).compare(&Value::Number(8.0)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Integer(12).compare(&Value::Integer(12)),
            Ordering::Equal
        );
    }

    #[test]
    fn mixed_values_compare_equal() {
        assert_eq!(
            Value::Text("a").compare(&Value::Integer(1)),
            Ordering::Equal
        );
        assert_eq!(
            Value::Number(1.0).compare(&Value::Text("a")),
            Ordering::Equal
        );
        assert_eq!(
            Value::Number(f64::NAN).compare(&Value::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn display_uses_shortest_number_form() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(5.5).to_string(), "5.5");
        assert_eq!(Value::Integer(1545).to_string(), "1545");
        assert_eq!(Value::Text("Ithaca, NY").to_string(), "Ithaca, NY");
    }
}
