//! rsagent - 基于正则优先级规则的 User-Agent 识别库
//! 识别设备类型、操作系统、浏览器及版本，解析 Accept-Language 优先级

// 导出全局错误类型
pub use self::error::{AgentError, AgentResult};

// 导出配置模块
pub use self::config::{AgentConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    AgentInfo, DeviceType, HeaderMatch, PatternValue, RuleLoader, RuleProvider, RuleSource,
    RuleTable, VersionKind, VersionValue,
};

// 导出工具模块核心接口
pub use self::utils::{HeaderConverter, VersionExtractor, parse_languages};

// 导出编译模块核心接口
pub use self::compiler::{CompiledPropertyTable, CompiledRule, CompiledRuleTable, RuleCompiler};

// 导出识别模块核心接口
pub use self::detector::{
    Agent,
    CrawlerDetector,
    PatternCrawlerDetector,
    RuleSet,
    global_rule_set,
    init_global_rules,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod detector;
