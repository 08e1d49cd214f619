use crate::models::{Project, YearGroup};
use std::collections::BTreeMap;

/// Counts projects per year, ascending by year. Projects without a year are skipped.
pub fn aggregate_by_year<'a, I>(projects: I) -> Vec<YearGroup>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in projects.into_iter().filter_map(|project| project.year) {
        *counts.entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearGroup { year, count })
        .collect()
}
