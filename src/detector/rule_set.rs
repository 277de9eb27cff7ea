//! 合并后的规则集
//! 基础规则 + 扩展规则按固定顺序合并、编译，构建后只读

use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::compiler::{CompiledPropertyTable, CompiledRuleTable, RuleCompiler};
use crate::config::AgentConfig;
use crate::error::AgentResult;
use crate::rule::{builtin_extension, HeaderMatch, RuleLoader, RuleProvider, RuleSource, RuleTable};

/// 编译后的完整规则集
#[derive(Debug, Clone)]
pub struct RuleSet {
    // is(key) 使用的完整表
    extended: CompiledRuleTable,
    // 移动端判定表（不含桌面设备）
    mobile: CompiledRuleTable,
    tablets: CompiledRuleTable,
    browsers: CompiledRuleTable,
    platforms: CompiledRuleTable,
    devices: CompiledRuleTable,
    properties: CompiledPropertyTable,
    mobile_headers: IndexMap<String, Option<HeaderMatch>>,
}

impl RuleSet {
    /// 使用内置扩展规则（及配置中的扩展规则文件）构建规则集
    pub fn new(provider: &dyn RuleProvider, config: &AgentConfig) -> AgentResult<Self> {
        let mut extension = builtin_extension();
        if let Some(path) = &config.extension_rules_path {
            extension = extension.merged_with(&RuleLoader::load_file(path)?);
        }
        Self::with_extension(provider, &extension, config.strict_patterns)
    }

    /// 指定扩展规则源构建规则集
    pub fn with_extension(
        provider: &dyn RuleProvider,
        extension: &RuleSource,
        strict: bool,
    ) -> AgentResult<Self> {
        let start = Instant::now();
        let compiler = RuleCompiler::new(strict);

        // 扩展规则源中的手机/平板规则追加在基础规则之后
        let phones = RuleTable::merge(&[provider.phone_devices(), &extension.phone_devices]);
        let tablets = RuleTable::merge(&[provider.tablet_devices(), &extension.tablet_devices]);
        let base_os = provider.operating_systems();
        let base_browsers = provider.browsers();

        let extended = RuleTable::merge(&[
            &extension.desktop_devices,
            &phones,
            &tablets,
            base_os,
            &extension.operating_systems,
            base_browsers,
            &extension.browsers,
        ]);
        let mobile = RuleTable::merge(&[&phones, &tablets, base_os, base_browsers]);
        let browsers = RuleTable::merge(&[&extension.browsers, base_browsers]);
        let platforms = RuleTable::merge(&[base_os, &extension.operating_systems]);
        let devices = RuleTable::merge(&[&extension.desktop_devices, &phones, &tablets]);
        let properties = RuleTable::merge(&[&extension.properties, provider.properties()]);

        let mut mobile_headers = provider.mobile_headers().clone();
        for (header, matcher) in &extension.mobile_headers {
            mobile_headers.insert(header.clone(), matcher.clone());
        }

        let rule_set = Self {
            extended: compiler.compile_table(&extended)?,
            mobile: compiler.compile_table(&mobile)?,
            tablets: compiler.compile_table(&tablets)?,
            browsers: compiler.compile_table(&browsers)?,
            platforms: compiler.compile_table(&platforms)?,
            devices: compiler.compile_table(&devices)?,
            properties: compiler.compile_properties(&properties)?,
            mobile_headers,
        };

        debug!(
            "规则集统计：完整表{}条、移动端{}条、平板{}条、浏览器{}条、系统{}条、设备{}条、版本属性{}条",
            rule_set.extended.len(),
            rule_set.mobile.len(),
            rule_set.tablets.len(),
            rule_set.browsers.len(),
            rule_set.platforms.len(),
            rule_set.devices.len(),
            rule_set.properties.len()
        );
        info!("rule set compiled in {:?}", start.elapsed());

        Ok(rule_set)
    }

    pub fn extended(&self) -> &CompiledRuleTable {
        &self.extended
    }

    pub fn mobile(&self) -> &CompiledRuleTable {
        &self.mobile
    }

    pub fn tablets(&self) -> &CompiledRuleTable {
        &self.tablets
    }

    pub fn browsers(&self) -> &CompiledRuleTable {
        &self.browsers
    }

    pub fn platforms(&self) -> &CompiledRuleTable {
        &self.platforms
    }

    pub fn devices(&self) -> &CompiledRuleTable {
        &self.devices
    }

    pub fn properties(&self) -> &CompiledPropertyTable {
        &self.properties
    }

    pub fn mobile_headers(&self) -> &IndexMap<String, Option<HeaderMatch>> {
        &self.mobile_headers
    }
}
