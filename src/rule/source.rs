//! 基础规则提供方
//! 设备/系统/浏览器的基础规则表由外部提供，此处只定义读取接口
//! 内置一份精简规则数据（data/base_rules.json），可整体替换

use indexmap::IndexMap;

use super::loader::RuleLoader;
use super::model::{HeaderMatch, RuleSource, RuleTable};
use crate::error::AgentResult;

/// 内置基础规则数据
pub(crate) const EMBEDDED_BASE_RULES: &str = include_str!("../../data/base_rules.json");

/// 基础规则提供方接口
pub trait RuleProvider: Send + Sync {
    /// 手机设备规则
    fn phone_devices(&self) -> &RuleTable;
    /// 平板设备规则
    fn tablet_devices(&self) -> &RuleTable;
    /// 操作系统规则
    fn operating_systems(&self) -> &RuleTable;
    /// 浏览器规则
    fn browsers(&self) -> &RuleTable;
    /// 版本属性模板
    fn properties(&self) -> &RuleTable;
    /// 判定移动端的请求头
    fn mobile_headers(&self) -> &IndexMap<String, Option<HeaderMatch>>;
}

impl RuleProvider for RuleSource {
    fn phone_devices(&self) -> &RuleTable {
        &self.phone_devices
    }

    fn tablet_devices(&self) -> &RuleTable {
        &self.tablet_devices
    }

    fn operating_systems(&self) -> &RuleTable {
        &self.operating_systems
    }

    fn browsers(&self) -> &RuleTable {
        &self.browsers
    }

    fn properties(&self) -> &RuleTable {
        &self.properties
    }

    fn mobile_headers(&self) -> &IndexMap<String, Option<HeaderMatch>> {
        &self.mobile_headers
    }
}

/// 解析内置基础规则
pub fn parse_embedded_rules() -> AgentResult<RuleSource> {
    RuleLoader::from_json_str(EMBEDDED_BASE_RULES)
}
