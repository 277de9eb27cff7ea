//! 规则模块：负责规则数据模型、规则源加载与合并
pub mod model;
pub mod source;
pub mod extension;
pub mod loader;

// 导出核心接口
pub use self::model::{
    AgentInfo, DeviceType, HeaderMatch, PatternValue, RuleSource, RuleTable, VersionKind,
    VersionValue,
};
pub use self::source::{RuleProvider, parse_embedded_rules};
pub use self::extension::builtin_extension;
pub use self::loader::RuleLoader;
