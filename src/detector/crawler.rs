//! 爬虫识别
//! 先剔除常见浏览器标识，再在剩余文本中查找爬虫签名

use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compiler::RuleCompiler;
use crate::error::{AgentError, AgentResult};

/// 内置爬虫签名数据
pub(crate) const EMBEDDED_CRAWLERS: &str = include_str!("../../data/crawlers.json");

/// 爬虫识别接口
pub trait CrawlerDetector: Send + Sync {
    /// 返回命中的爬虫签名文本，未命中返回 None
    fn find_crawler(&self, user_agent: &str) -> Option<String>;

    fn is_crawler(&self, user_agent: &str) -> bool {
        self.find_crawler(user_agent).is_some()
    }
}

/// 爬虫签名列表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlerList {
    #[serde(default)]
    pub crawlers: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

/// 基于签名正则的爬虫识别
#[derive(Debug, Clone)]
pub struct PatternCrawlerDetector {
    crawlers: Regex,
    exclusions: Option<Regex>,
}

impl PatternCrawlerDetector {
    pub fn new(list: &CrawlerList) -> AgentResult<Self> {
        if list.crawlers.is_empty() {
            return Err(AgentError::InvalidInput("爬虫签名列表为空".to_string()));
        }

        let crawlers = RuleCompiler::build_regex(&format!("({})", list.crawlers.join("|")))?;
        let exclusions = if list.exclusions.is_empty() {
            None
        } else {
            Some(RuleCompiler::build_regex(&list.exclusions.join("|"))?)
        };

        debug!(
            "爬虫识别器构建完成：签名{}条、排除项{}条",
            list.crawlers.len(),
            list.exclusions.len()
        );

        Ok(Self { crawlers, exclusions })
    }

    /// 使用内置签名数据构建
    pub fn embedded() -> AgentResult<Self> {
        let list: CrawlerList = serde_json::from_str(EMBEDDED_CRAWLERS)?;
        Self::new(&list)
    }
}

impl CrawlerDetector for PatternCrawlerDetector {
    fn find_crawler(&self, user_agent: &str) -> Option<String> {
        let stripped = match &self.exclusions {
            Some(exclusions) => exclusions.replace_all(user_agent, ""),
            None => Cow::Borrowed(user_agent),
        };

        let remaining = stripped.trim();
        if remaining.is_empty() {
            return None;
        }

        self.crawlers
            .find(remaining)
            .map(|m| m.as_str().to_string())
    }
}
