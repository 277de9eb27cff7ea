//! 规则加载管理器
//! 负责从 JSON 字符串或本地文件解析规则源

use std::path::Path;
use tracing::debug;

use super::model::RuleSource;
use crate::error::{AgentError, AgentResult};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 从 JSON 字符串解析规则源（保留键顺序）
    pub fn from_json_str(json: &str) -> AgentResult<RuleSource> {
        let source: RuleSource = serde_json::from_str(json)?;
        Self::log_summary(&source);
        Ok(source)
    }

    /// 从本地 JSON 文件加载规则源
    pub fn load_file(path: &Path) -> AgentResult<RuleSource> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::RuleLoadError(format!("读取规则文件 {} 失败：{}", path.display(), e))
        })?;
        debug!("加载规则文件：{}", path.display());
        Self::from_json_str(&content)
    }

    fn log_summary(source: &RuleSource) {
        debug!(
            "规则源解析完成：桌面设备{}条、手机{}条、平板{}条、系统{}条、浏览器{}条、版本属性{}条、移动端请求头{}条",
            source.desktop_devices.len(),
            source.phone_devices.len(),
            source.tablet_devices.len(),
            source.operating_systems.len(),
            source.browsers.len(),
            source.properties.len(),
            source.mobile_headers.len()
        );
    }
}
