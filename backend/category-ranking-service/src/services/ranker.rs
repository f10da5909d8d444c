use crate::config::{RankingConfig, DEFAULT_LOW_ENGAGEMENT_THRESHOLD, DEFAULT_SPECIAL_CATEGORIES};
use crate::models::AggregatedCategory;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Which categories may be demoted, and below what score.
#[derive(Debug, Clone)]
pub struct RankingPolicy {
    special_names: HashSet<String>,
    low_engagement_threshold: u64,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_CATEGORIES, DEFAULT_LOW_ENGAGEMENT_THRESHOLD)
    }
}

impl From<&RankingConfig> for RankingPolicy {
    fn from(config: &RankingConfig) -> Self {
        Self::new(
            config.special_category_names.iter().cloned(),
            config.low_engagement_threshold,
        )
    }
}

impl RankingPolicy {
    pub fn new<I, S>(special_names: I, low_engagement_threshold: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            special_names: special_names.into_iter().map(Into::into).collect(),
            low_engagement_threshold,
        }
    }

    pub fn is_special(&self, name: &str) -> bool {
        self.special_names.contains(name)
    }

    /// Special and below the threshold: sinks under every non-demoted category.
    pub fn is_demoted(&self, category: &AggregatedCategory) -> bool {
        self.is_special(category.name())
            && category.engagement_score < self.low_engagement_threshold
    }
}

/// Category Ranker - 分類排序
///
/// Orders by `(demoted, score descending, input position)`. Every category
/// gets its key once, so the order is total and independent of the sort
/// algorithm's comparison pattern.
#[derive(Debug, Clone, Default)]
pub struct CategoryRanker {
    policy: RankingPolicy,
}

impl CategoryRanker {
    pub fn new(policy: RankingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Returns a permutation of `categories` in display order.
    pub fn rank(&self, categories: Vec<AggregatedCategory>) -> Vec<AggregatedCategory> {
        let mut keyed: Vec<_> = categories
            .into_iter()
            .enumerate()
            .map(|(position, category)| {
                let key = (
                    self.policy.is_demoted(&category),
                    Reverse(category.engagement_score),
                    position,
                );
                (key, category)
            })
            .collect();

        keyed.sort_unstable_by_key(|(key, _)| *key);

        keyed.into_iter().map(|(_, category)| category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use uuid::Uuid;

    fn scored(name: &str, score: u64) -> AggregatedCategory {
        AggregatedCategory::new(
            Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: String::new(),
                icon: String::new(),
                color_class: String::new(),
            },
            0,
            score,
        )
    }

    fn names(ranked: &[AggregatedCategory]) -> Vec<&str> {
        ranked.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_score_descending_with_stable_ties() {
        let ranker = CategoryRanker::default();
        let ranked = ranker.rank(vec![scored("A", 50), scored("B", 10), scored("C", 50)]);

        assert_eq!(names(&ranked), vec!["A", "C", "B"]);

        let ranked = ranker.rank(vec![scored("C", 50), scored("B", 10), scored("A", 50)]);
        assert_eq!(names(&ranked), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_low_special_category_is_demoted() {
        let ranker = CategoryRanker::default();
        let ranked = ranker.rank(vec![scored("Organizations", 5), scored("Politics", 1)]);

        assert_eq!(names(&ranked), vec!["Politics", "Organizations"]);
    }

    #[test]
    fn test_active_special_category_competes_on_score() {
        let ranker = CategoryRanker::default();
        let ranked = ranker.rank(vec![scored("Politics", 15), scored("Personalities", 20)]);

        assert_eq!(names(&ranked), vec!["Personalities", "Politics"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ranker = CategoryRanker::default();
        let ranked = ranker.rank(vec![scored("Politics", 9), scored("Organizations", 10)]);

        assert_eq!(names(&ranked), vec!["Organizations", "Politics"]);
    }

    #[test]
    fn test_demoted_categories_keep_score_order_among_themselves() {
        let ranker = CategoryRanker::default();
        let ranked = ranker.rank(vec![
            scored("Organizations", 3),
            scored("Economy", 0),
            scored("Personalities", 7),
        ]);

        assert_eq!(names(&ranked), vec!["Economy", "Personalities", "Organizations"]);
    }

    #[test]
    fn test_order_does_not_depend_on_input_permutation() {
        let ranker = CategoryRanker::default();
        let base = vec![
            scored("Organizations", 5),
            scored("Politics", 3),
            scored("Personalities", 6),
            scored("Economy", 12),
            scored("Data", 1),
            scored("International", 30),
        ];
        let expected = vec![
            "International",
            "Economy",
            "Politics",
            "Data",
            "Personalities",
            "Organizations",
        ];

        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert_eq!(names(&ranker.rank(rotated.clone())), expected);

            rotated.reverse();
            assert_eq!(names(&ranker.rank(rotated)), expected);
        }
    }

    #[test]
    fn test_rank_is_a_permutation() {
        let ranker = CategoryRanker::default();
        let input = vec![
            scored("Organizations", 2),
            scored("Politics", 2),
            scored("Economy", 40),
        ];
        let mut input_ids: Vec<_> = input.iter().map(|c| c.id()).collect();

        let mut output_ids: Vec<_> = ranker.rank(input).iter().map(|c| c.id()).collect();

        input_ids.sort();
        output_ids.sort();
        assert_eq!(input_ids, output_ids);
    }

    #[test]
    fn test_custom_policy() {
        let ranker = CategoryRanker::new(RankingPolicy::new(["Economy"], 100));
        let ranked = ranker.rank(vec![scored("Economy", 99), scored("Organizations", 1)]);

        assert_eq!(names(&ranked), vec!["Organizations", "Economy"]);
        assert!(!ranker.policy().is_special("Politics"));
    }

    #[test]
    fn test_empty_input() {
        assert!(CategoryRanker::default().rank(Vec::new()).is_empty());
    }
}
