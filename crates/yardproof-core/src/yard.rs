use crate::ProductRecord;
use serde::Serialize;

/// A customer's available yard, in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yard {
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YardUsage {
    pub yard_area: f64,
    pub used_area: f64,
    pub percent_used: f64,
}

impl Yard {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// A product fits when its setup footprint fits without rotation.
    pub fn fits(&self, record: &ProductRecord) -> bool {
        record
            .setup_area
            .is_some_and(|s| s.length <= self.length && s.width <= self.width)
    }

    pub fn fitting<'a>(&self, records: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        records.iter().filter(|r| self.fits(r)).collect()
    }

    /// Share of the yard covered by the setup areas of `placed` (overlap is not considered).
    pub fn usage<'a>(&self, placed: impl IntoIterator<Item = &'a ProductRecord>) -> YardUsage {
        let yard_area = self.area();
        let used_area: f64 = placed
            .into_iter()
            .filter_map(|r| r.setup_area.map(|s| s.area))
            .sum();
        let percent_used = if yard_area > 0.0 {
            used_area / yard_area * 100.0
        } else {
            0.0
        };
        YardUsage {
            yard_area,
            used_area,
            percent_used,
        }
    }
}
