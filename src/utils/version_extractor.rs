//! 版本提取工具模块
//! 负责按属性模板从 User-Agent 中提取版本号，并支持转换为数值
//! 数值转换是有损的：`5.1.2` 会被折叠为 `5.12`，不代表语义化版本

use crate::compiler::CompiledPropertyTable;
use crate::rule::{VersionKind, VersionValue};

/// 模板中的版本占位符
pub const VERSION_PLACEHOLDER: &str = "[VER]";

/// 替换占位符后的版本捕获组
pub const VERSION_REGEX: &str = r"([\w._\+]+)";

/// 版本提取工具类
pub struct VersionExtractor;

impl VersionExtractor {
    /// 按属性键提取版本号
    ///
    /// # 参数
    /// - `property`: 属性键（如 `AndroidOS`）
    /// - `properties`: 编译后的版本属性表
    /// - `subject`: 待识别的 User-Agent
    /// - `kind`: 输出类型（文本 / 数值）
    ///
    /// # 返回值
    /// - `Some(VersionValue)`: 第一个命中且第一捕获组非空的模板结果
    /// - `None`: 属性不存在或没有模板命中
    pub fn extract(
        property: &str,
        properties: &CompiledPropertyTable,
        subject: &str,
        kind: VersionKind,
    ) -> Option<VersionValue> {
        if property.is_empty() {
            return None;
        }

        let patterns = properties.get(property)?;
        patterns.iter().find_map(|regex| {
            // 只认第一捕获组，交替模板中后续分组命中不算
            let captured = regex.captures(subject)?.get(1)?.as_str();
            if captured.is_empty() {
                return None;
            }
            Some(match kind {
                VersionKind::Text => VersionValue::Text(captured.to_string()),
                VersionKind::Float => VersionValue::Float(Self::normalize(captured)),
            })
        })
    }

    /// 版本号数值化
    /// `_`、空格、`/` 统一为 `.`，首个 `.` 之后的 `.` 全部移除，再按浮点数解析
    pub fn normalize(version: &str) -> f64 {
        let unified: String = version
            .chars()
            .map(|c| if matches!(c, '_' | ' ' | '/') { '.' } else { c })
            .collect();

        let normalized = match unified.split_once('.') {
            Some((major, rest)) => format!("{}.{}", major, rest.replace('.', "")),
            None => unified,
        };

        parse_leading_float(&normalized)
    }
}

/// 按前缀解析浮点数，无法解析时返回 0
/// `12.34beta` => 12.34，`abc` => 0
pub fn parse_leading_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // 只有符号或只有小数点时视为无数字
    if end == digits_start || &s[digits_start..end] == "." {
        return 0.0;
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}
