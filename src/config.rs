//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认参与拼接 User-Agent 的请求头（CGI 形式，按顺序拼接）
pub const DEFAULT_UA_HEADERS: &[&str] = &[
    "HTTP_USER_AGENT",
    "HTTP_X_OPERAMINI_PHONE_UA",
    "HTTP_X_DEVICE_USER_AGENT",
    "HTTP_X_ORIGINAL_USER_AGENT",
    "HTTP_X_SKYFIRE_PHONE",
    "HTTP_X_BOLT_PHONE_UA",
    "HTTP_DEVICE_STOCK_UA",
    "HTTP_X_UCBROWSER_DEVICE_UA",
];

/// 全局配置
#[derive(Debug, Clone)]
pub struct AgentConfig {
    // 代理服务自身的 User-Agent（CloudFront 场景）
    pub desktop_proxy_agent: String,
    // 代理服务给出的桌面端判定头
    pub desktop_proxy_header: String,
    // 代理服务给出的移动端判定头
    pub mobile_proxy_header: String,
    // 代理服务给出的平板判定头
    pub tablet_proxy_header: String,
    // 拼接 User-Agent 的请求头列表
    pub user_agent_headers: Vec<String>,
    // Accept-Language 请求头名称
    pub accept_language_header: String,
    // User-Agent 最大长度（超出截断）
    pub max_user_agent_len: usize,
    // 严格模式：规则正则非法时直接报错；关闭后跳过该规则
    pub strict_patterns: bool,
    // 额外扩展规则文件（JSON）
    pub extension_rules_path: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            desktop_proxy_agent: "Amazon CloudFront".to_string(),
            desktop_proxy_header: "HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER".to_string(),
            mobile_proxy_header: "HTTP_CLOUDFRONT_IS_MOBILE_VIEWER".to_string(),
            tablet_proxy_header: "HTTP_CLOUDFRONT_IS_TABLET_VIEWER".to_string(),
            user_agent_headers: DEFAULT_UA_HEADERS.iter().map(|h| h.to_string()).collect(),
            accept_language_header: "HTTP_ACCEPT_LANGUAGE".to_string(),
            max_user_agent_len: 500,
            strict_patterns: true,
            extension_rules_path: None,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> AgentConfig {
        AgentConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: AgentConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desktop_proxy_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.desktop_proxy_agent = agent.into();
        self
    }

    pub fn desktop_proxy_header(mut self, header: impl Into<String>) -> Self {
        self.config.desktop_proxy_header = header.into();
        self
    }

    pub fn mobile_proxy_header(mut self, header: impl Into<String>) -> Self {
        self.config.mobile_proxy_header = header.into();
        self
    }

    pub fn tablet_proxy_header(mut self, header: impl Into<String>) -> Self {
        self.config.tablet_proxy_header = header.into();
        self
    }

    pub fn user_agent_headers(mut self, headers: Vec<String>) -> Self {
        self.config.user_agent_headers = headers;
        self
    }

    pub fn accept_language_header(mut self, header: impl Into<String>) -> Self {
        self.config.accept_language_header = header.into();
        self
    }

    pub fn max_user_agent_len(mut self, len: usize) -> Self {
        self.config.max_user_agent_len = len;
        self
    }

    pub fn strict_patterns(mut self, strict: bool) -> Self {
        self.config.strict_patterns = strict;
        self
    }

    pub fn extension_rules_path(mut self, path: PathBuf) -> Self {
        self.config.extension_rules_path = Some(path);
        self
    }

    pub fn build(self) -> AgentConfig {
        self.config
    }
}
