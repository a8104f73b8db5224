/// 提取相邻两个字符组成的二元组，按出现顺序返回
///
/// 长度不足 2 的字符串没有二元组。
pub fn bigrams(s: &str) -> Vec<[char; 2]> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// `from` 中有多少个二元组在 `to` 中出现过（重复出现的逐个计数，不去重）
fn containment(from: &[[char; 2]], to: &[[char; 2]]) -> usize {
    from.iter().filter(|bigram| to.contains(bigram)).count()
}

/// 字符二元组（bigram）Dice 相似度，范围 [0, 1]，满足对称性
///
/// 匹配计数采用简单包含判断而非多重集合交集，0.4 阈值按单向的
/// `2 * 包含数(a→b) / 总数` 调过。这里把两个方向的包含数相加后除以二元组总数，
/// 等价于两个单向分数取平均：没有重复二元组时与单向分数相同，有重复时也不会超过 1。
///
/// 已知差异：有重复二元组时分数低于单向公式，例如 `training`/`in`
/// 为 0.375（单向 0.5），`mississippi`/`miss` 为 0.615（单向 0.769）。
/// 这类输入在阈值附近的判定可能与单向公式不同。
///
/// 两边都没有二元组时返回 0。
pub fn similarity(a: &str, b: &str) -> f64 {
    let bigrams_a = bigrams(&a.to_lowercase());
    let bigrams_b = bigrams(&b.to_lowercase());

    let total = bigrams_a.len() + bigrams_b.len();
    if total == 0 {
        return 0.0;
    }

    let matches = containment(&bigrams_a, &bigrams_b) + containment(&bigrams_b, &bigrams_a);
    matches as f64 / total as f64
}
