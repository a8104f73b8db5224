use crate::catalog::{Catalog, Entry};
use crate::normalize::normalize;
use crate::similarity::similarity;
use std::cmp::Ordering;

/// 默认相似度阈值
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

/// 某个条目针对当前问句的打分结果，只在单次查询内存在
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    pub entry: &'a Entry,
    /// 规范化后的二元组相似度
    pub similarity: f64,
    /// 规范化后完全相等
    pub exact_match: bool,
    /// 关键词中某个词出现在问句里
    pub keyword_match: bool,
}

impl<'a> MatchCandidate<'a> {
    fn passes(&self, threshold: f64) -> bool {
        self.exact_match || self.similarity >= threshold || self.keyword_match
    }

    /// 排序规则：完全匹配 > 相似度 > 关键词命中 > 优先级，全部降序
    fn rank_order(&self, other: &Self) -> Ordering {
        other
            .exact_match
            .cmp(&self.exact_match)
            .then_with(|| other.similarity.total_cmp(&self.similarity))
            .then_with(|| other.keyword_match.cmp(&self.keyword_match))
            .then_with(|| other.entry.specificity.cmp(&self.entry.specificity))
    }
}

/// 关键词任一分词是问句的子串
fn keyword_hit(normalized_query: &str, normalized_keyword: &str) -> bool {
    normalized_keyword
        .split_whitespace()
        .any(|token| normalized_query.contains(token))
}

/// 对单个条目打分，`normalized_query` 必须已经规范化
pub fn score<'a>(normalized_query: &str, entry: &'a Entry) -> MatchCandidate<'a> {
    let keyword = normalize(&entry.keyword);
    MatchCandidate {
        entry,
        similarity: similarity(normalized_query, &keyword),
        exact_match: normalized_query == keyword,
        keyword_match: keyword_hit(normalized_query, &keyword),
    }
}

/// 在目录中挑出与问句最匹配的条目，没有达标的返回 None
///
/// 排序稳定，前面各级都相同时保留目录中的先后顺序。
pub fn rank<'a>(query: &str, catalog: &'a Catalog, threshold: f64) -> Option<MatchCandidate<'a>> {
    let normalized_query = normalize(query);

    let mut candidates: Vec<MatchCandidate<'a>> = catalog
        .entries()
        .iter()
        .map(|entry| score(&normalized_query, entry))
        .filter(|candidate| candidate.passes(threshold))
        .collect();

    candidates.sort_by(|a, b| a.rank_order(b));
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(keywords: &[&str]) -> Catalog {
        Catalog::new(
            keywords
                .iter()
                .enumerate()
                .map(|(i, k)| Entry::new(k, &format!("A{i}"), &format!("u{i}")))
                .collect(),
        )
    }

    #[test]
    fn exact_match_wins() {
        let c = catalog(&["how old", "age question"]);
        let best = rank("how old", &c, SIMILARITY_THRESHOLD).unwrap();
        assert_eq!(best.entry.answer, "A0");
        assert!(best.exact_match);
    }

    #[test]
    fn exact_match_beats_equal_similarity() {
        // "aa" 与 "aaa" 相似度同为 1.0，但只有后者完全相等
        let c = catalog(&["aa", "aaa"]);
        let query = "aaa";
        let first = score(&normalize(query), &c.entries()[0]);
        assert_eq!(first.similarity, 1.0);
        assert!(!first.exact_match);
        let best = rank(query, &c, SIMILARITY_THRESHOLD).unwrap();
        assert_eq!(best.entry.answer, "A1");
        assert!(best.exact_match);
    }

    #[test]
    fn exact_match_ranks_above_similarity_of_one() {
        let exact = Entry::new("ab", "exact", "u");
        let other = Entry::new("ab", "other", "u");
        let a = MatchCandidate { entry: &exact, similarity: 0.1, exact_match: true, keyword_match: false };
        let b = MatchCandidate { entry: &other, similarity: 1.0, exact_match: false, keyword_match: true };
        assert_eq!(a.rank_order(&b), Ordering::Less);
    }

    #[test]
    fn higher_similarity_wins_among_non_exact() {
        let c = catalog(&["basic training length", "training"]);
        let best = rank("basic training lengths", &c, SIMILARITY_THRESHOLD).unwrap();
        assert_eq!(best.entry.answer, "A0");
        assert!(!best.exact_match);
    }

    #[test]
    fn keyword_hit_breaks_similarity_tie() {
        let hit = Entry::new("x", "hit", "u");
        let miss = Entry::new("x", "miss", "u");
        let a = MatchCandidate { entry: &miss, similarity: 0.5, exact_match: false, keyword_match: false };
        let b = MatchCandidate { entry: &hit, similarity: 0.5, exact_match: false, keyword_match: true };
        assert_eq!(a.rank_order(&b), Ordering::Greater);
    }

    #[test]
    fn specificity_is_last_tie_break() {
        let mut low = Entry::new("pay", "low", "u");
        low.specificity = Some(1);
        let mut high = Entry::new("pay", "high", "u");
        high.specificity = Some(5);
        let plain = Entry::new("pay", "plain", "u");
        let c = Catalog::new(vec![plain, low, high]);
        let best = rank("pay", &c, SIMILARITY_THRESHOLD).unwrap();
        assert_eq!(best.entry.answer, "high");
    }

    #[test]
    fn duplicates_resolved_by_catalog_order() {
        let c = catalog(&["pay grade", "pay grade"]);
        let best = rank("pay grade", &c, SIMILARITY_THRESHOLD).unwrap();
        assert_eq!(best.entry.answer, "A0");
    }

    #[test]
    fn keyword_token_substring_passes_filter() {
        let c = catalog(&["deployment"]);
        let best = rank("when will my unit deployment date be scheduled for next year", &c, SIMILARITY_THRESHOLD).unwrap();
        assert!(best.keyword_match);
        assert!(best.similarity < SIMILARITY_THRESHOLD);
    }

    #[test]
    fn unrelated_query_yields_nothing() {
        let c = catalog(&["basic training hard"]);
        assert!(rank("weather today", &c, SIMILARITY_THRESHOLD).is_none());
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(rank("anything", &Catalog::default(), SIMILARITY_THRESHOLD).is_none());
    }

    #[test]
    fn stop_word_only_keyword_never_hits_by_token() {
        let c = catalog(&["do you"]);
        let candidate = score(&normalize("weather"), &c.entries()[0]);
        assert!(!candidate.keyword_match);
        assert!(!candidate.exact_match);
    }
}
