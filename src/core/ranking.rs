//! Aggregate, sort and share computation shared by the skill, region and role views.

use crate::domain::model::{RankedItem, RegionRecord, RoleRecord, SkillRecord};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Placeholder label when there is nothing to rank.
pub const NO_TOP_ITEM: &str = "N/A";

/// Shares are allotted in tenths of a percent.
const TENTHS_IN_WHOLE: u128 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub items: Vec<RankedItem>,
    pub top_item: String,
    /// Saturates at `u64::MAX`.
    pub total_value: u64,
}

impl Ranking {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            top_item: NO_TOP_ITEM.to_string(),
            total_value: 0,
        }
    }

    pub fn top_share_percent(&self) -> f64 {
        self.items.first().map(|i| i.share_percent).unwrap_or(0.0)
    }
}

/// Grouping key and measure of a rankable record.
pub trait Rankable {
    fn rank_key(&self) -> &str;
    fn measure(&self) -> u64;
}

impl Rankable for SkillRecord {
    fn rank_key(&self) -> &str {
        &self.skill
    }

    fn measure(&self) -> u64 {
        self.count
    }
}

impl Rankable for RegionRecord {
    fn rank_key(&self) -> &str {
        &self.country
    }

    fn measure(&self) -> u64 {
        self.jobs
    }
}

impl Rankable for RoleRecord {
    fn rank_key(&self) -> &str {
        &self.role
    }

    fn measure(&self) -> u64 {
        self.count
    }
}

pub fn rank<T: Rankable>(records: &[T], top_n: Option<usize>) -> Ranking {
    rank_by(records, T::rank_key, T::measure, top_n)
}

/// Groups by key, sorts by summed measure (descending, ties by key ascending),
/// computes shares over the full population and only then truncates to `top_n`.
/// A zero total yields all-zero shares and no top item.
pub fn rank_by<T, K, M>(records: &[T], key: K, measure: M, top_n: Option<usize>) -> Ranking
where
    K: Fn(&T) -> &str,
    M: Fn(&T) -> u64,
{
    let mut groups: HashMap<&str, u64> = HashMap::new();
    for record in records {
        let sum = groups.entry(key(record)).or_insert(0);
        *sum = sum.saturating_add(measure(record));
    }

    if groups.is_empty() {
        return Ranking::empty();
    }

    let mut grouped: Vec<(&str, u64)> = groups.into_iter().collect();
    grouped.sort_by_key(|&(label, value)| (Reverse(value), label));

    // 總和以 u128 計算，份額永遠以實際總和為分母
    let total: u128 = grouped.iter().map(|&(_, v)| v as u128).sum();
    let total_value = u64::try_from(total).unwrap_or(u64::MAX);
    let shares = share_tenths(&grouped, total);

    let mut items: Vec<RankedItem> = grouped
        .iter()
        .zip(shares)
        .map(|(&(label, value), tenths)| RankedItem {
            label: label.to_string(),
            value,
            share_percent: tenths as f64 / 10.0,
        })
        .collect();

    let top_item = if total_value > 0 {
        items[0].label.clone()
    } else {
        NO_TOP_ITEM.to_string()
    };
    if let Some(n) = top_n {
        items.truncate(n);
    }

    Ranking {
        items,
        top_item,
        total_value,
    }
}

/// Largest-remainder apportionment of 1000 tenths, so a complete set adds up
/// to exactly 100.0. Each share stays within 0.1 of its exact value.
fn share_tenths(grouped: &[(&str, u64)], total: u128) -> Vec<u64> {
    if total == 0 {
        return vec![0; grouped.len()];
    }

    let mut tenths: Vec<u64> = Vec::with_capacity(grouped.len());
    let mut remainders: Vec<(u128, usize)> = Vec::with_capacity(grouped.len());

    for (index, &(_, value)) in grouped.iter().enumerate() {
        let scaled = value as u128 * TENTHS_IN_WHOLE;
        tenths.push((scaled / total) as u64);
        remainders.push((scaled % total, index));
    }

    let allotted: u64 = tenths.iter().sum();
    let leftover = (TENTHS_IN_WHOLE as u64).saturating_sub(allotted) as usize;

    // Biggest remainders first; rank order breaks ties.
    remainders.sort_by_key(|&(remainder, index)| (Reverse(remainder), index));
    for &(_, index) in remainders.iter().take(leftover) {
        tenths[index] += 1;
    }

    tenths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(role: &str, count: u64) -> RoleRecord {
        RoleRecord {
            role: role.to_string(),
            count,
        }
    }

    fn skill(name: &str, country: &str, count: u64) -> SkillRecord {
        SkillRecord {
            skill: name.to_string(),
            country: Some(country.to_string()),
            month: Some("Jan".to_string()),
            count,
        }
    }

    fn share_sum(ranking: &Ranking) -> f64 {
        ranking.items.iter().map(|i| i.share_percent).sum()
    }

    #[test]
    fn test_roles_top_five_uses_full_population() {
        let roles = vec![
            role("Software Engineer", 4200),
            role("Data Analyst", 1800),
            role("Product Manager", 1200),
            role("UI/UX Designer", 950),
            role("DevOps Engineer", 1500),
            role("Mobile Dev", 2100),
        ];

        let ranking = rank(&roles, Some(5));

        let labels: Vec<&str> = ranking.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Software Engineer",
                "Mobile Dev",
                "Data Analyst",
                "DevOps Engineer",
                "Product Manager"
            ]
        );
        assert_eq!(ranking.total_value, 11750);
        assert_eq!(ranking.top_item, "Software Engineer");
        assert!((ranking.top_share_percent() - 35.74).abs() < 0.1);

        let full = rank(&roles, None);
        assert!((share_sum(&full) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_groups_by_key_and_breaks_ties_lexically() {
        let skills = vec![
            skill("Python", "Kenya", 10),
            skill("Go", "Kenya", 15),
            skill("Python", "Uganda", 5),
            skill("Cloud", "Rwanda", 15),
        ];

        let ranking = rank(&skills, None);

        let labels: Vec<&str> = ranking.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Cloud", "Go", "Python"]);
        assert!(ranking.items.iter().all(|i| i.value == 15));
        assert_eq!(ranking.total_value, 45);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let equal_thirds = vec![role("a", 1), role("b", 1), role("c", 1)];
        let ranking = rank(&equal_thirds, None);
        assert!((share_sum(&ranking) - 100.0).abs() < 1e-9);
        assert_eq!(ranking.items[0].share_percent, 33.4);
        assert_eq!(ranking.items[2].share_percent, 33.3);

        let sevenths: Vec<RoleRecord> = (0..7).map(|i| role(&format!("r{}", i), 1)).collect();
        let ranking = rank(&sevenths, None);
        let sum = share_sum(&ranking);
        assert!((99.9..=100.1).contains(&sum));
    }

    #[test]
    fn test_zero_total() {
        let ranking = rank(&[role("a", 0), role("b", 0)], None);
        assert_eq!(ranking.total_value, 0);
        assert!(ranking.items.iter().all(|i| i.share_percent == 0.0));
        assert_eq!(ranking.items.len(), 2);
        assert_eq!(ranking.top_item, NO_TOP_ITEM);
    }

    #[test]
    fn test_empty_input() {
        let ranking = rank::<RoleRecord>(&[], Some(5));
        assert!(ranking.items.is_empty());
        assert_eq!(ranking.top_item, NO_TOP_ITEM);
        assert_eq!(ranking.total_value, 0);
        assert_eq!(ranking.top_share_percent(), 0.0);
    }

    #[test]
    fn test_rank_by_custom_key() {
        let skills = vec![skill("Python", "Kenya", 3), skill("Go", "Uganda", 4), skill("SQL", "Kenya", 2)];
        let ranking = rank_by(&skills, |s| s.country.as_deref().unwrap_or_default(), |s| s.count, Some(1));
        assert_eq!(ranking.items.len(), 1);
        assert_eq!(ranking.items[0].label, "Kenya");
        assert_eq!(ranking.items[0].value, 5);
        assert_eq!(ranking.items[0].share_percent, 55.6);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let ranking = rank(&[role("a", u64::MAX), role("b", 1)], None);
        assert_eq!(ranking.total_value, u64::MAX);
        assert_eq!(ranking.top_item, "a");
        assert_eq!(ranking.items[0].share_percent, 100.0);
        assert_eq!(ranking.items[1].share_percent, 0.0);

        let merged = rank(&[role("a", u64::MAX), role("a", u64::MAX)], None);
        assert_eq!(merged.items[0].value, u64::MAX);
        assert_eq!(merged.items[0].share_percent, 100.0);
    }
}
