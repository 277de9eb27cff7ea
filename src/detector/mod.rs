//! 识别模块：规则集、爬虫识别与 User-Agent 识别器
pub mod rule_set;
pub mod crawler;
pub mod global;
pub mod detector;

// 导出核心接口
pub use self::rule_set::RuleSet;
pub use self::crawler::{CrawlerDetector, CrawlerList, PatternCrawlerDetector};
pub use self::global::{
    embedded_rule_source, global_config, global_crawler_detector, global_rule_set,
    init_global_rules,
};
pub use self::detector::Agent;
