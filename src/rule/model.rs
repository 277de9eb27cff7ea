//! 规则数据模型定义
//! 存储规则表与识别结果，支持序列化/反序列化
//! 规则表按插入顺序保存，顺序即匹配优先级

use std::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 规则片段：单个正则片段，或片段列表（列表元素之间为“或”关系）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternValue {
    Single(String),
    List(Vec<PatternValue>),
}

impl PatternValue {
    /// 空字符串 / 空列表视为无规则
    pub fn is_empty(&self) -> bool {
        match self {
            PatternValue::Single(s) => s.is_empty(),
            PatternValue::List(items) => items.is_empty(),
        }
    }

    /// 组装为单条正则：列表以 `|` 拼接（嵌套列表递归拼接）
    pub fn assemble(&self) -> String {
        match self {
            PatternValue::Single(s) => s.clone(),
            PatternValue::List(items) => items
                .iter()
                .map(PatternValue::assemble)
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    /// 展开为模板列表：单值视为一项，列表每一项各自组装
    pub fn templates(&self) -> Vec<String> {
        match self {
            PatternValue::Single(s) => vec![s.clone()],
            PatternValue::List(items) => items.iter().map(PatternValue::assemble).collect(),
        }
    }

    /// 合并同名规则：片段累积而不是覆盖
    /// - 列表 + 列表 => 拼接
    /// - 列表 + 单值 => 追加
    /// - 单值 + 列表 => 单值在前，其后接列表元素
    /// - 单值 + 单值 => `a|b` 单个字符串
    pub fn combine(&mut self, incoming: PatternValue) {
        let current = std::mem::replace(self, PatternValue::List(Vec::new()));
        *self = match (current, incoming) {
            (PatternValue::List(mut existing), PatternValue::List(items)) => {
                existing.extend(items);
                PatternValue::List(existing)
            }
            (PatternValue::List(mut existing), single @ PatternValue::Single(_)) => {
                existing.push(single);
                PatternValue::List(existing)
            }
            (single @ PatternValue::Single(_), PatternValue::List(items)) => {
                let mut combined = Vec::with_capacity(items.len() + 1);
                combined.push(single);
                combined.extend(items);
                PatternValue::List(combined)
            }
            (PatternValue::Single(existing), PatternValue::Single(other)) => {
                PatternValue::Single(format!("{}|{}", existing, other))
            }
        };
    }
}

impl From<&str> for PatternValue {
    fn from(s: &str) -> Self {
        PatternValue::Single(s.to_string())
    }
}

impl From<String> for PatternValue {
    fn from(s: String) -> Self {
        PatternValue::Single(s)
    }
}

impl<const N: usize> From<[&str; N]> for PatternValue {
    fn from(items: [&str; N]) -> Self {
        PatternValue::List(items.iter().map(|s| PatternValue::from(*s)).collect())
    }
}

/// 有序规则表：分类键 -> 规则片段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: IndexMap<String, PatternValue>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入/覆盖规则（保留原有位置）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PatternValue>) -> Option<PatternValue> {
        self.rules.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PatternValue> {
        self.rules.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PatternValue> {
        self.rules.iter()
    }

    /// 按参数顺序合并多张规则表
    /// 键的位置由首次出现决定，同名键的片段按 [`PatternValue::combine`] 累积
    pub fn merge(tables: &[&RuleTable]) -> RuleTable {
        let mut merged = RuleTable::new();
        for table in tables {
            merged.merge_from(table);
        }
        merged
    }

    /// 将另一张表合并进当前表；空规则直接跳过
    pub fn merge_from(&mut self, other: &RuleTable) {
        for (key, value) in other.iter() {
            if value.is_empty() {
                continue;
            }
            match self.rules.get_mut(key) {
                Some(existing) => existing.combine(value.clone()),
                None => {
                    self.rules.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = (&'a String, &'a PatternValue);
    type IntoIter = indexmap::map::Iter<'a, String, PatternValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl<K: Into<String>, V: Into<PatternValue>> FromIterator<(K, V)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// 移动端请求头匹配条件：为空表示“存在即命中”
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMatch {
    #[serde(default)]
    pub matches: Vec<String>,
}

/// 完整规则源（外部规则提供方 / 扩展规则 / JSON 规则文件）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSource {
    pub desktop_devices: RuleTable,
    pub phone_devices: RuleTable,
    pub tablet_devices: RuleTable,
    pub operating_systems: RuleTable,
    pub browsers: RuleTable,
    pub properties: RuleTable,
    pub mobile_headers: IndexMap<String, Option<HeaderMatch>>,
}

impl RuleSource {
    /// 逐表合并，当前规则源在前
    pub fn merged_with(&self, other: &RuleSource) -> RuleSource {
        let mut mobile_headers = self.mobile_headers.clone();
        for (header, matcher) in &other.mobile_headers {
            mobile_headers.insert(header.clone(), matcher.clone());
        }

        RuleSource {
            desktop_devices: RuleTable::merge(&[&self.desktop_devices, &other.desktop_devices]),
            phone_devices: RuleTable::merge(&[&self.phone_devices, &other.phone_devices]),
            tablet_devices: RuleTable::merge(&[&self.tablet_devices, &other.tablet_devices]),
            operating_systems: RuleTable::merge(&[&self.operating_systems, &other.operating_systems]),
            browsers: RuleTable::merge(&[&self.browsers, &other.browsers]),
            properties: RuleTable::merge(&[&self.properties, &other.properties]),
            mobile_headers,
        }
    }
}

/// 设备类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Phone,
    Tablet,
    Robot,
    Other,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Phone => "phone",
            DeviceType::Tablet => "tablet",
            DeviceType::Robot => "robot",
            DeviceType::Other => "other",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 版本输出类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionKind {
    #[default]
    Text,
    Float,
}

/// 版本提取结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Text(String),
    Float(f64),
}

impl VersionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VersionValue::Text(s) => Some(s),
            VersionValue::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            VersionValue::Float(v) => Some(*v),
            VersionValue::Text(_) => None,
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionValue::Text(s) => f.write_str(s),
            VersionValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// 识别结果汇总（用于日志 / JSON 输出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub user_agent: String,
    pub device_type: DeviceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl fmt::Display for AgentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.device_type)?;
        if let Some(platform) = &self.platform {
            write!(f, " / {}", platform)?;
            if let Some(v) = &self.platform_version {
                write!(f, " {}", v)?;
            }
        }
        if let Some(browser) = &self.browser {
            write!(f, " / {}", browser)?;
            if let Some(v) = &self.browser_version {
                write!(f, " {}", v)?;
            }
        }
        Ok(())
    }
}
