//! 编译后模式模型
//! 正则编译后的结构，构建后只读

use std::collections::HashMap;
use indexmap::IndexMap;
use regex::Regex;

/// 编译后的单条规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub key: String,
    pub regex: Regex,
}

impl CompiledRule {
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        self.regex.as_str()
    }
}

/// 编译后的有序规则表（顺序即优先级）
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleTable {
    rules: Vec<CompiledRule>,
    // 小写键 -> 规则下标
    key_index: HashMap<String, usize>,
}

impl CompiledRuleTable {
    pub(crate) fn from_rules(rules: Vec<CompiledRule>) -> Self {
        let mut key_index = HashMap::with_capacity(rules.len());
        for (idx, rule) in rules.iter().enumerate() {
            key_index.insert(rule.key.to_ascii_lowercase(), idx);
        }
        Self { rules, key_index }
    }

    /// 按表顺序扫描，返回第一条命中规则的键
    pub fn find_first_match(&self, subject: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(subject))
            .map(|rule| rule.key.as_str())
    }

    /// 按键（忽略 ASCII 大小写）取规则
    pub fn get(&self, key: &str) -> Option<&CompiledRule> {
        self.key_index
            .get(&key.to_ascii_lowercase())
            .and_then(|idx| self.rules.get(*idx))
    }

    /// 指定键的规则是否命中；键不存在视为未命中
    pub fn matches_key(&self, key: &str, subject: &str) -> bool {
        self.get(key).is_some_and(|rule| rule.is_match(subject))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule> {
        self.rules.iter()
    }
}

/// 编译后的版本属性表：属性键 -> 按顺序尝试的版本正则
#[derive(Debug, Clone, Default)]
pub struct CompiledPropertyTable {
    properties: IndexMap<String, Vec<Regex>>,
}

impl CompiledPropertyTable {
    pub(crate) fn from_properties(properties: IndexMap<String, Vec<Regex>>) -> Self {
        Self { properties }
    }

    pub fn get(&self, property: &str) -> Option<&[Regex]> {
        self.properties.get(property).map(Vec::as_slice)
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
