//! 规则编译器核心
//! 仅负责将规则表组装、编译为可执行的正则

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::pattern::{CompiledPropertyTable, CompiledRule, CompiledRuleTable};
use crate::error::{AgentError, AgentResult};
use crate::rule::RuleTable;
use crate::utils::version_extractor::VERSION_PLACEHOLDER;
use crate::utils::VERSION_REGEX;

/// 规则编译器
#[derive(Debug, Clone, Copy)]
pub struct RuleCompiler {
    // 严格模式：非法正则直接报错；否则跳过并记录警告
    strict: bool,
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl RuleCompiler {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// 编译规则表：列表片段以 `|` 组装，保持表顺序
    pub fn compile_table(&self, table: &RuleTable) -> AgentResult<CompiledRuleTable> {
        let mut rules = Vec::with_capacity(table.len());
        let mut skipped = 0usize;

        for (key, value) in table {
            if value.is_empty() {
                continue;
            }

            let pattern = value.assemble();
            match Self::build_regex(&pattern) {
                Ok(regex) => rules.push(CompiledRule { key: key.clone(), regex }),
                Err(source) if self.strict => {
                    return Err(AgentError::PatternCompileError { key: key.clone(), source });
                }
                Err(e) => {
                    skipped += 1;
                    warn!("skip malformed rule `{}`: {}", key, e);
                }
            }
        }

        if skipped > 0 {
            debug!("规则表编译完成，有效{}条，跳过{}条", rules.len(), skipped);
        }

        Ok(CompiledRuleTable::from_rules(rules))
    }

    /// 编译版本属性表：逐个模板替换版本占位符后编译
    pub fn compile_properties(&self, table: &RuleTable) -> AgentResult<CompiledPropertyTable> {
        let mut properties = IndexMap::with_capacity(table.len());

        for (key, value) in table {
            let mut regexes = Vec::new();
            for template in value.templates() {
                let pattern = Self::expand_version_template(&template);
                match Self::build_regex(&pattern) {
                    Ok(regex) => regexes.push(regex),
                    Err(source) if self.strict => {
                        return Err(AgentError::PatternCompileError { key: key.clone(), source });
                    }
                    Err(e) => warn!("skip malformed version template `{}` of `{}`: {}", template, key, e),
                }
            }
            properties.insert(key.clone(), regexes);
        }

        Ok(CompiledPropertyTable::from_properties(properties))
    }

    /// 替换模板中所有版本占位符为捕获组
    pub fn expand_version_template(template: &str) -> String {
        template.replace(VERSION_PLACEHOLDER, VERSION_REGEX)
    }

    /// 忽略大小写 + `.` 匹配换行，不做锚定
    pub fn build_regex(pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
    }
}
