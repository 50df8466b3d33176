//! Case-count categories for the reference-year snapshot.

use super::RegionRecord;
use std::fmt;

/// Counts strictly above this are `High`.
pub const HIGH_THRESHOLD: i64 = 50_000;
/// Counts strictly above this (and not `High`) are `Medium`.
pub const MEDIUM_THRESHOLD: i64 = 10_000;

/// Ordinal bucket. Declaration order is the tally and slice order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    High,
    Medium,
    Low,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::High, Category::Medium, Category::Low];

    pub fn from_cases(cases: i64) -> Self {
        if cases > HIGH_THRESHOLD {
            Category::High
        } else if cases > MEDIUM_THRESHOLD {
            Category::Medium
        } else {
            Category::Low
        }
    }

    /// Label shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Category::High => "Tinggi",
            Category::Medium => "Sedang",
            Category::Low => "Rendah",
        }
    }

    fn index(self) -> usize {
        match self {
            Category::High => 0,
            Category::Medium => 1,
            Category::Low => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedRecord {
    pub record: RegionRecord,
    pub category: Category,
}

/// Number of records per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: [usize; 3],
}

impl CategoryTally {
    pub fn add(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-empty buckets in `Category::ALL` order.
    pub fn non_empty(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&c| (c, self.count(c)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

/// Labeled subset for one year plus its tally.
#[derive(Debug, Clone, Default)]
pub struct CategorizedYear {
    pub year: i64,
    pub records: Vec<CategorizedRecord>,
    pub tally: CategoryTally,
}

/// Label every record of `year`. The input slice is left untouched.
pub fn categorize(records: &[RegionRecord], year: i64) -> CategorizedYear {
    let mut tally = CategoryTally::default();
    let labeled: Vec<CategorizedRecord> = records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| {
            let category = Category::from_cases(r.cases);
            tally.add(category);
            CategorizedRecord {
                record: r.clone(),
                category,
            }
        })
        .collect();

    CategorizedYear {
        year,
        records: labeled,
        tally,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_at_the_boundaries() {
        assert_eq!(Category::from_cases(50_000), Category::Medium);
        assert_eq!(Category::from_cases(50_001), Category::High);
        assert_eq!(Category::from_cases(10_000), Category::Low);
        assert_eq!(Category::from_cases(10_001), Category::Medium);
        assert_eq!(Category::from_cases(0), Category::Low);
    }

    #[test]
    fn only_the_target_year_is_labeled() {
        let records = vec![
            RegionRecord::new("A", 2018, 90_000),
            RegionRecord::new("B", 2019, 60_000),
            RegionRecord::new("C", 2019, 20_000),
            RegionRecord::new("D", 2019, 5_000),
            RegionRecord::new("E", 2019, 70_000),
        ];
        let year = categorize(&records, 2019);

        let labels: Vec<(&str, Category)> = year
            .records
            .iter()
            .map(|c| (c.record.region.as_str(), c.category))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("B", Category::High),
                ("C", Category::Medium),
                ("D", Category::Low),
                ("E", Category::High),
            ]
        );
        assert_eq!(year.tally.count(Category::High), 2);
        assert_eq!(year.tally.total(), 4);
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn tally_order_is_fixed() {
        let mut tally = CategoryTally::default();
        for c in [
            Category::Low,
            Category::Medium,
            Category::High,
            Category::Medium,
            Category::Medium,
            Category::High,
            Category::Medium,
            Category::Medium,
        ] {
            tally.add(c);
        }

        let expected = vec![(Category::High, 2), (Category::Medium, 5), (Category::Low, 1)];
        for _ in 0..3 {
            assert_eq!(tally.non_empty(), expected);
        }
    }

    #[test]
    fn empty_year_has_empty_tally() {
        let records = vec![RegionRecord::new("A", 2018, 1)];
        let year = categorize(&records, 2019);
        assert!(year.records.is_empty());
        assert!(year.tally.is_empty());
        assert!(year.tally.non_empty().is_empty());
    }
}
