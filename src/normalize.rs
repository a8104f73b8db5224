/// 停用词，匹配前从问句和关键词中去掉
pub const STOP_WORDS: [&str; 9] = ["do", "i", "to", "the", "a", "is", "and", "you", "be"];

/// 规范化文本：转小写、按空白切分、去停用词，再用单个空格拼回
///
/// 问句和关键词必须经过同一个函数处理后再比较。
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}
