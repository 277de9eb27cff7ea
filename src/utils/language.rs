//! Accept-Language 解析

use indexmap::IndexMap;

use super::version_extractor::parse_leading_float;

/// 解析 Accept-Language，按优先级从高到低返回语言标签（小写）
/// 未声明 q 值的优先级为 1.0；重复标签以最后一次出现的优先级为准，位置不变；
/// 同优先级保持原始顺序
pub fn parse_languages(header_value: &str) -> Vec<String> {
    let mut languages: IndexMap<String, f64> = IndexMap::new();

    for piece in header_value.split(',') {
        let mut parts = piece.split(';');
        let tag = parts.next().unwrap_or_default().trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }

        let priority = match parts.next().map(str::trim) {
            Some(q) if !q.is_empty() => parse_leading_float(&q.replace("q=", "")),
            _ => 1.0,
        };

        languages.insert(tag, priority);
    }

    let mut ordered: Vec<(String, f64)> = languages.into_iter().collect();
    // sort_by 是稳定排序
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));
    ordered.into_iter().map(|(tag, _)| tag).collect()
}
