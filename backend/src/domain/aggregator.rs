//! Grouping of expense entries into the categorised report structure.

use super::{
    CanonicalCategory, CategoryCosts, CostItem, ExpenseEntry, ReportPeriod, ReportSnapshot, UserId,
};

/// Build the report for `user_id` and `period` from `entries`.
///
/// `entries` must already be restricted to the user and period, in storage
/// order. The output lists every canonical category in
/// [`CanonicalCategory::ALL`] order (empty groups included), followed by any
/// other category in the order its first entry appears. Items keep their
/// input order within a group.
///
/// The function is pure: a cached snapshot equals what a live computation
/// over the same entries would produce.
///
/// # Examples
/// ```
/// use expense_reports::domain::{aggregate, ReportPeriod, UserId};
///
/// let period = ReportPeriod::new(2025, 1).expect("valid period");
/// let report = aggregate(UserId::new(7), period, &[]);
/// let names: Vec<_> = report.costs().iter().map(|g| g.category().as_str()).collect();
/// assert_eq!(names, ["food", "health", "housing", "sports", "education"]);
/// ```
pub fn aggregate(user_id: UserId, period: ReportPeriod, entries: &[ExpenseEntry]) -> ReportSnapshot {
    let mut groups: Vec<CategoryCosts> = CanonicalCategory::ALL
        .into_iter()
        .map(|category| CategoryCosts::new(category.into(), Vec::new()))
        .collect();

    for entry in entries {
        let item = CostItem {
            sum: entry.amount(),
            description: entry.description().to_owned(),
            day: entry.day_of_month(),
        };
        match groups
            .iter_mut()
            .find(|group| group.category() == entry.category())
        {
            Some(group) => group.push(item),
            None => groups.push(CategoryCosts::new(entry.category().clone(), vec![item])),
        }
    }

    ReportSnapshot::new(user_id, period, groups)
}
