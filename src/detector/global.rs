//! 全局单例管理
//! 内置规则源、默认规则集、默认爬虫识别器均只构建一次
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::crawler::{CrawlerDetector, PatternCrawlerDetector};
use super::rule_set::RuleSet;
use crate::config::{AgentConfig, ConfigManager};
use crate::error::AgentResult;
use crate::rule::{parse_embedded_rules, RuleSource};

static GLOBAL_CONFIG: OnceCell<Arc<AgentConfig>> = OnceCell::new();
static EMBEDDED_RULE_SOURCE: OnceCell<RuleSource> = OnceCell::new();
static GLOBAL_RULE_SET: OnceCell<Arc<RuleSet>> = OnceCell::new();
static GLOBAL_CRAWLER: OnceCell<Arc<dyn CrawlerDetector>> = OnceCell::new();

/// 带自定义配置初始化全局规则集
/// 只有第一次设置的配置生效；全局规则集已构建时直接返回
pub fn init_global_rules(config: AgentConfig) -> AgentResult<()> {
    if GLOBAL_RULE_SET.get().is_some() {
        debug!("全局规则集已初始化，忽略本次配置");
        return Ok(());
    }

    let config = GLOBAL_CONFIG.get_or_init(|| Arc::new(config));
    GLOBAL_RULE_SET.get_or_try_init(|| build_rule_set(config))?;
    Ok(())
}

/// 全局配置（未初始化时使用默认配置）
pub fn global_config() -> Arc<AgentConfig> {
    GLOBAL_CONFIG
        .get_or_init(|| Arc::new(ConfigManager::get_default()))
        .clone()
}

/// 内置基础规则源
pub fn embedded_rule_source() -> AgentResult<&'static RuleSource> {
    EMBEDDED_RULE_SOURCE.get_or_try_init(parse_embedded_rules)
}

/// 全局规则集（首次访问时按全局配置构建）
pub fn global_rule_set() -> AgentResult<Arc<RuleSet>> {
    GLOBAL_RULE_SET
        .get_or_try_init(|| build_rule_set(&global_config()))
        .cloned()
}

/// 全局爬虫识别器
pub fn global_crawler_detector() -> AgentResult<Arc<dyn CrawlerDetector>> {
    GLOBAL_CRAWLER
        .get_or_try_init(|| {
            let detector: Arc<dyn CrawlerDetector> = Arc::new(PatternCrawlerDetector::embedded()?);
            info!("global crawler detector initialized");
            Ok(detector)
        })
        .cloned()
}

fn build_rule_set(config: &AgentConfig) -> AgentResult<Arc<RuleSet>> {
    let source = embedded_rule_source()?;
    let rule_set = RuleSet::new(source, config)?;
    info!("global rule set initialized");
    Ok(Arc::new(rule_set))
}
