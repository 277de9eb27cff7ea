//! 识别器核心：组合规则集与爬虫识别，输出设备/系统/浏览器识别结果
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::header::HeaderMap;

use super::crawler::CrawlerDetector;
use super::global::{global_config, global_crawler_detector, global_rule_set};
use super::rule_set::RuleSet;
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::rule::{AgentInfo, DeviceType, VersionKind, VersionValue};
use crate::utils::{parse_languages, HeaderConverter, VersionExtractor};
use crate::utils::header_converter::HTTP_HEADER_PREFIX;

/// 动态判定方法前缀
const DISPATCH_PREFIX: &str = "is";

/// User-Agent 识别器
#[derive(Clone)]
pub struct Agent {
    rules: Arc<RuleSet>,
    crawler: Arc<dyn CrawlerDetector>,
    config: Arc<AgentConfig>,
    // CGI 形式的请求头
    http_headers: HashMap<String, String>,
    user_agent: String,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("user_agent", &self.user_agent)
            .field("http_headers", &self.http_headers)
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// 使用指定规则集、爬虫识别器和配置创建识别器
    pub fn new(
        rules: Arc<RuleSet>,
        crawler: Arc<dyn CrawlerDetector>,
        config: Arc<AgentConfig>,
    ) -> Self {
        Self {
            rules,
            crawler,
            config,
            http_headers: HashMap::new(),
            user_agent: String::new(),
        }
    }

    /// 使用全局默认规则集创建识别器
    pub fn with_defaults() -> AgentResult<Self> {
        Ok(Self::new(global_rule_set()?, global_crawler_detector()?, global_config()))
    }

    /// 直接识别 User-Agent 字符串
    pub fn from_user_agent(user_agent: &str) -> AgentResult<Self> {
        let mut agent = Self::with_defaults()?;
        agent.set_user_agent(Some(user_agent));
        Ok(agent)
    }

    /// 从请求头创建，User-Agent 由请求头推导
    pub fn from_headers(headers: &HeaderMap) -> AgentResult<Self> {
        let mut agent = Self::with_defaults()?;
        agent.set_header_map(headers);
        agent.set_user_agent(None);
        Ok(agent)
    }

    /// 从 CGI 形式的变量表创建（如 `HTTP_USER_AGENT`），非 `HTTP_` 前缀的键被忽略
    pub fn from_server_vars<I, K, V>(vars: I) -> AgentResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut agent = Self::with_defaults()?;
        agent.set_http_headers(vars);
        agent.set_user_agent(None);
        Ok(agent)
    }

    /// 替换请求头（CGI 形式），不会重新推导 User-Agent
    pub fn set_http_headers<I, K, V>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.http_headers = HeaderConverter::retain_http_vars(vars);
        self
    }

    /// 替换请求头（HeaderMap），不会重新推导 User-Agent
    pub fn set_header_map(&mut self, headers: &HeaderMap) -> &mut Self {
        self.http_headers = HeaderConverter::to_server_vars(headers);
        self
    }

    /// 设置 User-Agent；为空时从请求头推导
    /// 推导顺序：配置的 User-Agent 请求头依次以空格拼接；仍为空且存在代理判定头时，取代理标识
    pub fn set_user_agent(&mut self, user_agent: Option<&str>) -> &str {
        self.user_agent = match user_agent.filter(|ua| !ua.trim().is_empty()) {
            Some(ua) => self.prepare_user_agent(ua),
            None => self.derive_user_agent(),
        };
        &self.user_agent
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn http_headers(&self) -> &HashMap<String, String> {
        &self.http_headers
    }

    /// 读取请求头，支持 `HTTP_USER_AGENT` 和 `User-Agent` 两种写法
    pub fn http_header(&self, name: &str) -> Option<&str> {
        let value = if name.starts_with(HTTP_HEADER_PREFIX) {
            self.http_headers.get(name)
        } else {
            self.http_headers.get(&HeaderConverter::to_server_key(name))
        };
        value.map(String::as_str)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// 判定键是否命中当前 User-Agent（键忽略大小写）
    pub fn is(&self, key: &str) -> bool {
        self.rules.extended().matches_key(key, &self.user_agent)
    }

    /// 按方法名动态判定，如 `isMobile`、`isChrome`、`isiPhone`
    pub fn dispatch(&self, method: &str) -> AgentResult<bool> {
        let Some(key) = method.strip_prefix(DISPATCH_PREFIX) else {
            return Err(AgentError::InvalidInvocation(method.to_string()));
        };

        Ok(match key {
            "Mobile" => self.is_mobile(),
            "Tablet" => self.is_tablet(),
            "Desktop" => self.is_desktop(),
            "Phone" => self.is_phone(),
            "Robot" => self.is_robot(None),
            _ => self.is(key),
        })
    }

    /// 是否移动设备（手机或平板）
    pub fn is_mobile(&self) -> bool {
        if self.proxy_flag(&self.config.mobile_proxy_header) {
            return true;
        }
        if self.check_mobile_headers() {
            return true;
        }
        self.rules.mobile().find_first_match(&self.user_agent).is_some()
    }

    pub fn is_tablet(&self) -> bool {
        if self.proxy_flag(&self.config.tablet_proxy_header) {
            return true;
        }
        self.rules.tablets().find_first_match(&self.user_agent).is_some()
    }

    /// 是否桌面设备
    /// 代理标识下存在桌面判定头时直接采用该判定
    pub fn is_desktop(&self) -> bool {
        if self.is_proxy_agent() {
            if let Some(value) = self.http_header(&self.config.desktop_proxy_header) {
                return value == "true";
            }
        }
        !self.is_mobile() && !self.is_tablet() && !self.is_robot(None)
    }

    pub fn is_phone(&self) -> bool {
        self.is_mobile() && !self.is_tablet()
    }

    pub fn is_robot(&self, user_agent: Option<&str>) -> bool {
        self.crawler.is_crawler(self.subject(user_agent))
    }

    pub fn device_type(&self) -> DeviceType {
        if self.is_desktop() {
            DeviceType::Desktop
        } else if self.is_phone() {
            DeviceType::Phone
        } else if self.is_tablet() {
            DeviceType::Tablet
        } else if self.is_robot(None) {
            DeviceType::Robot
        } else {
            DeviceType::Other
        }
    }

    pub fn browser(&self, user_agent: Option<&str>) -> Option<&str> {
        self.rules.browsers().find_first_match(self.subject(user_agent))
    }

    pub fn platform(&self, user_agent: Option<&str>) -> Option<&str> {
        self.rules.platforms().find_first_match(self.subject(user_agent))
    }

    pub fn device(&self, user_agent: Option<&str>) -> Option<&str> {
        self.rules.devices().find_first_match(self.subject(user_agent))
    }

    /// 爬虫名称（首字母大写）
    pub fn robot(&self, user_agent: Option<&str>) -> Option<String> {
        self.crawler
            .find_crawler(self.subject(user_agent))
            .map(|name| capitalize_first(&name))
    }

    /// 按属性键提取当前 User-Agent 的版本号
    pub fn version(&self, property: &str, kind: VersionKind) -> Option<VersionValue> {
        VersionExtractor::extract(property, self.rules.properties(), &self.user_agent, kind)
    }

    /// 按优先级排序的语言列表；未传入时读取配置的 Accept-Language 请求头
    pub fn languages(&self, accept_language: Option<&str>) -> Vec<String> {
        accept_language
            .or_else(|| self.http_header(&self.config.accept_language_header))
            .map(parse_languages)
            .unwrap_or_default()
    }

    /// 汇总识别结果
    pub fn detect(&self) -> AgentInfo {
        let platform = self.platform(None);
        let browser = self.browser(None);

        AgentInfo {
            user_agent: self.user_agent.clone(),
            device_type: self.device_type(),
            device: self.device(None).map(str::to_string),
            platform: platform.map(str::to_string),
            platform_version: platform
                .and_then(|p| self.version(p, VersionKind::Text))
                .map(|v| v.to_string()),
            browser: browser.map(str::to_string),
            browser_version: browser
                .and_then(|b| self.version(b, VersionKind::Text))
                .map(|v| v.to_string()),
            robot: self.robot(None),
            languages: self.languages(None),
        }
    }

    // 未传入或为空时使用当前 User-Agent
    fn subject<'a>(&'a self, user_agent: Option<&'a str>) -> &'a str {
        user_agent
            .filter(|ua| !ua.is_empty())
            .unwrap_or(self.user_agent.as_str())
    }

    fn is_proxy_agent(&self) -> bool {
        self.user_agent == self.config.desktop_proxy_agent
    }

    // 代理标识下，指定判定头为 "true"
    fn proxy_flag(&self, header: &str) -> bool {
        self.is_proxy_agent() && self.http_header(header) == Some("true")
    }

    fn has_proxy_headers(&self) -> bool {
        [
            &self.config.desktop_proxy_header,
            &self.config.mobile_proxy_header,
            &self.config.tablet_proxy_header,
        ]
        .into_iter()
        .any(|header| self.http_headers.contains_key(header.as_str()))
    }

    // 移动端请求头：无匹配列表时存在即命中，否则值包含任一子串才命中
    fn check_mobile_headers(&self) -> bool {
        self.rules.mobile_headers().iter().any(|(header, matcher)| {
            let Some(value) = self.http_headers.get(header) else {
                return false;
            };
            match matcher {
                Some(m) if !m.matches.is_empty() => {
                    m.matches.iter().any(|needle| value.contains(needle.as_str()))
                }
                _ => true,
            }
        })
    }

    fn prepare_user_agent(&self, user_agent: &str) -> String {
        truncate_on_char_boundary(user_agent.trim(), self.config.max_user_agent_len).to_string()
    }

    fn derive_user_agent(&self) -> String {
        let joined = self
            .config
            .user_agent_headers
            .iter()
            .filter_map(|header| self.http_headers.get(header))
            .filter(|value| !value.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let user_agent = self.prepare_user_agent(&joined);
        if user_agent.is_empty() && self.has_proxy_headers() {
            return self.config.desktop_proxy_agent.clone();
        }
        user_agent
    }
}

// 兼容旧接口的判定方法
macro_rules! key_predicates {
    ($($name:ident => $key:literal),* $(,)?) => {
        impl Agent {
            $(
                #[doc = concat!("是否命中 `", $key, "` 规则")]
                pub fn $name(&self) -> bool {
                    self.is($key)
                }
            )*
        }
    };
}

key_predicates! {
    is_chrome => "Chrome",
    is_firefox => "Firefox",
    is_safari => "Safari",
    is_edge => "Edge",
    is_opera => "Opera",
    is_ie => "IE",
    is_uc_browser => "UCBrowser",
    is_wechat => "WeChat",
    is_windows => "Windows",
    is_os_x => "OS X",
    is_linux => "Linux",
    is_ubuntu => "Ubuntu",
    is_chrome_os => "ChromeOS",
    is_android_os => "AndroidOS",
    is_ios => "iOS",
    is_blackberry_os => "BlackBerryOS",
    is_windows_phone_os => "WindowsPhoneOS",
    is_macintosh => "Macintosh",
    is_iphone => "iPhone",
    is_ipad => "iPad",
    is_samsung => "Samsung",
    is_kindle => "Kindle",
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate_on_char_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

    use crate::config::ConfigManager;
    use crate::detector::crawler::PatternCrawlerDetector;
    use crate::rule::{builtin_extension, RuleSource};

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const SAFARI_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_4_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Mobile/15E148 Safari/604.1";
    const SAFARI_IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 16_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Mobile/15E148 Safari/604.1";
    const CHROME_PIXEL: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
    const CHROME_GALAXY_TAB: &str = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

    fn agent(user_agent: &str) -> Agent {
        Agent::from_user_agent(user_agent).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_device_type_corpus() {
        init_tracing();
        let corpus = [
            (CHROME_WINDOWS, DeviceType::Desktop),
            (EDGE_WINDOWS, DeviceType::Desktop),
            (FIREFOX_LINUX, DeviceType::Desktop),
            (SAFARI_MAC, DeviceType::Desktop),
            (SAFARI_IPHONE, DeviceType::Phone),
            (CHROME_PIXEL, DeviceType::Phone),
            (SAFARI_IPAD, DeviceType::Tablet),
            (CHROME_GALAXY_TAB, DeviceType::Tablet),
            (GOOGLEBOT, DeviceType::Robot),
            ("", DeviceType::Desktop),
        ];
        for (ua, expected) in corpus {
            assert_eq!(agent(ua).device_type(), expected, "ua: {}", ua);
        }
    }

    #[test]
    fn test_phone_is_mobile_and_not_tablet() {
        for ua in [CHROME_WINDOWS, SAFARI_MAC, SAFARI_IPHONE, SAFARI_IPAD, CHROME_PIXEL, CHROME_GALAXY_TAB, GOOGLEBOT] {
            let agent = agent(ua);
            assert_eq!(agent.is_phone(), agent.is_mobile() && !agent.is_tablet(), "ua: {}", ua);
        }
    }

    #[test]
    fn test_browser_platform_device() {
        let cases = [
            (CHROME_WINDOWS, Some("Chrome"), Some("Windows"), None),
            (EDGE_WINDOWS, Some("Edge"), Some("Windows"), None),
            (FIREFOX_LINUX, Some("Firefox"), Some("Ubuntu"), None),
            (SAFARI_MAC, Some("Safari"), Some("OS X"), Some("Macintosh")),
            (SAFARI_IPHONE, Some("Safari"), Some("iOS"), Some("iPhone")),
            (SAFARI_IPAD, Some("Safari"), Some("iOS"), Some("iPad")),
            (CHROME_PIXEL, Some("Chrome"), Some("AndroidOS"), Some("Pixel")),
            (CHROME_GALAXY_TAB, Some("Chrome"), Some("AndroidOS"), Some("SamsungTablet")),
        ];
        for (ua, browser, platform, device) in cases {
            let agent = agent(ua);
            assert_eq!(agent.browser(None), browser, "browser of {}", ua);
            assert_eq!(agent.platform(None), platform, "platform of {}", ua);
            assert_eq!(agent.device(None), device, "device of {}", ua);
        }
    }

    #[test]
    fn test_explicit_subject_overrides_current() {
        let agent = agent(CHROME_WINDOWS);
        assert_eq!(agent.browser(Some(FIREFOX_LINUX)), Some("Firefox"));
        assert_eq!(agent.browser(Some("")), Some("Chrome"));
        assert_eq!(agent.device(Some(SAFARI_IPHONE)), Some("iPhone"));
        assert!(agent.is_robot(Some(GOOGLEBOT)));
        assert!(!agent.is_robot(None));
    }

    #[test]
    fn test_versions() {
        let agent = agent(CHROME_WINDOWS);
        assert_eq!(
            agent.version("Chrome", VersionKind::Text),
            Some(VersionValue::Text("120.0.0.0".to_string()))
        );
        assert_eq!(
            agent.version("Windows", VersionKind::Float),
            Some(VersionValue::Float(10.0))
        );
        assert_eq!(agent.version("Firefox", VersionKind::Text), None);

        let iphone = self::agent(SAFARI_IPHONE);
        assert_eq!(iphone.version("iOS", VersionKind::Float), Some(VersionValue::Float(16.41)));
        assert_eq!(
            iphone.version("Safari", VersionKind::Text),
            Some(VersionValue::Text("16.4".to_string()))
        );

        let edge = self::agent(EDGE_WINDOWS);
        assert_eq!(
            edge.version("Edge", VersionKind::Text),
            Some(VersionValue::Text("120.0.2210.91".to_string()))
        );
    }

    #[test]
    fn test_robot_name_is_capitalized() {
        assert_eq!(agent(GOOGLEBOT).robot(None).as_deref(), Some("Googlebot"));
        let bing = "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";
        assert_eq!(agent(bing).robot(None).as_deref(), Some("Bingbot"));
        assert_eq!(agent(CHROME_WINDOWS).robot(None), None);
    }

    #[test]
    fn test_is_key_case_insensitive() {
        let agent = agent(SAFARI_IPHONE);
        assert!(agent.is("iPhone"));
        assert!(agent.is("IPHONE"));
        assert!(agent.is("iOS"));
        assert!(!agent.is("AndroidOS"));
        assert!(!agent.is("NoSuchKey"));
        assert!(agent.is_iphone());
        assert!(agent.is_safari());
        assert!(!agent.is_windows());
    }

    #[test]
    fn test_dispatch() {
        let agent = agent(SAFARI_IPHONE);
        assert!(agent.dispatch("isMobile").unwrap());
        assert!(agent.dispatch("isPhone").unwrap());
        assert!(!agent.dispatch("isDesktop").unwrap());
        assert!(!agent.dispatch("isTablet").unwrap());
        assert!(!agent.dispatch("isRobot").unwrap());
        assert!(agent.dispatch("isiPhone").unwrap());
        assert!(agent.dispatch("isSafari").unwrap());
        assert!(!agent.dispatch("isChrome").unwrap());
    }

    #[test]
    fn test_dispatch_requires_prefix() {
        let agent = agent(CHROME_WINDOWS);
        let err = agent.dispatch("foo").unwrap_err();
        assert!(matches!(err, AgentError::InvalidInvocation(ref name) if name == "foo"));
        assert!(agent.dispatch("Chrome").is_err());
    }

    #[test]
    fn test_cloudfront_desktop_header() {
        let desktop = Agent::from_server_vars([("HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER", "true")]).unwrap();
        assert_eq!(desktop.user_agent(), "Amazon CloudFront");
        assert!(desktop.is_desktop());
        assert_eq!(desktop.device_type(), DeviceType::Desktop);

        let not_desktop = Agent::from_server_vars([("HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER", "false")]).unwrap();
        assert!(!not_desktop.is_desktop());
        assert_ne!(not_desktop.device_type(), DeviceType::Desktop);
        assert_eq!(not_desktop.device_type(), DeviceType::Other);
    }

    #[test]
    fn test_cloudfront_mobile_and_tablet_headers() {
        let phone = Agent::from_server_vars([
            ("HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER", "false"),
            ("HTTP_CLOUDFRONT_IS_MOBILE_VIEWER", "true"),
            ("HTTP_CLOUDFRONT_IS_TABLET_VIEWER", "false"),
        ])
        .unwrap();
        assert_eq!(phone.device_type(), DeviceType::Phone);

        let tablet = Agent::from_server_vars([
            ("HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER", "false"),
            ("HTTP_CLOUDFRONT_IS_MOBILE_VIEWER", "true"),
            ("HTTP_CLOUDFRONT_IS_TABLET_VIEWER", "true"),
        ])
        .unwrap();
        assert_eq!(tablet.device_type(), DeviceType::Tablet);
    }

    #[test]
    fn test_proxy_headers_ignored_for_real_user_agent() {
        let agent = Agent::from_server_vars([
            ("HTTP_USER_AGENT", CHROME_WINDOWS),
            ("HTTP_CLOUDFRONT_IS_DESKTOP_VIEWER", "false"),
            ("HTTP_CLOUDFRONT_IS_MOBILE_VIEWER", "true"),
        ])
        .unwrap();
        assert_eq!(agent.user_agent(), CHROME_WINDOWS);
        assert!(!agent.is_mobile());
        assert!(agent.is_desktop());
    }

    #[test]
    fn test_user_agent_derived_from_headers() {
        let agent = Agent::from_server_vars([
            ("HTTP_USER_AGENT", "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80/191.283; U; en)"),
            ("HTTP_X_OPERAMINI_PHONE_UA", "  Nokia6300/2.0 (05.00) Profile/MIDP-2.0  "),
            ("REMOTE_ADDR", "127.0.0.1"),
        ])
        .unwrap();

        assert_eq!(
            agent.user_agent(),
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80/191.283; U; en)   Nokia6300/2.0 (05.00) Profile/MIDP-2.0"
        );
        assert!(agent.http_header("REMOTE_ADDR").is_none());
        assert!(agent.is_mobile());
        assert_eq!(agent.browser(None), Some("Opera Mini"));
    }

    #[test]
    fn test_mobile_headers() {
        let wap = Agent::from_server_vars([("HTTP_USER_AGENT", "Generic/1.0"), ("HTTP_X_WAP_PROFILE", "http://example.com/uaprof.xml")]).unwrap();
        assert!(wap.is_mobile());

        let accept = Agent::from_server_vars([("HTTP_USER_AGENT", "Generic/1.0"), ("HTTP_ACCEPT", "text/vnd.wap.wml, */*")]).unwrap();
        assert!(accept.is_mobile());

        let plain = Agent::from_server_vars([("HTTP_USER_AGENT", "Generic/1.0"), ("HTTP_ACCEPT", "text/html")]).unwrap();
        assert!(!plain.is_mobile());
    }

    #[test]
    fn test_user_agent_truncated() {
        let long = format!("Mozilla/5.0 {}", "é".repeat(400));
        let agent = agent(&long);
        assert!(agent.user_agent().len() <= 500);
        assert!(long.starts_with(agent.user_agent()));
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(SAFARI_IPAD));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5"));

        let agent = Agent::from_headers(&headers).unwrap();
        assert_eq!(agent.user_agent(), SAFARI_IPAD);
        assert_eq!(agent.http_header("Accept-Language"), agent.http_header("HTTP_ACCEPT_LANGUAGE"));
        assert_eq!(agent.languages(None), vec!["fr-ch", "fr", "en", "de", "*"]);
        assert_eq!(agent.languages(Some("nl;q=0.2,da")), vec!["da", "nl"]);
    }

    #[test]
    fn test_languages_without_header() {
        assert!(agent(CHROME_WINDOWS).languages(None).is_empty());
    }

    #[test]
    fn test_detect_summary() {
        let info = agent(SAFARI_IPHONE).detect();
        assert_eq!(info.device_type, DeviceType::Phone);
        assert_eq!(info.device.as_deref(), Some("iPhone"));
        assert_eq!(info.platform.as_deref(), Some("iOS"));
        assert_eq!(info.platform_version.as_deref(), Some("16_4_1"));
        assert_eq!(info.browser.as_deref(), Some("Safari"));
        assert_eq!(info.browser_version.as_deref(), Some("16.4"));
        assert!(info.robot.is_none());

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["device_type"], "phone");
    }

    #[test]
    fn test_injected_provider() {
        // 自定义规则提供方：只识别一种设备
        let provider = RuleSource {
            phone_devices: [("Communicator", "Communicator")].into_iter().collect(),
            ..Default::default()
        };
        let config = ConfigManager::custom().strict_patterns(true).build();
        let rules = RuleSet::new(&provider, &config).unwrap();
        let crawler = PatternCrawlerDetector::embedded().unwrap();

        let mut agent = Agent::new(Arc::new(rules), Arc::new(crawler), Arc::new(config));
        agent.set_user_agent(Some("Communicator/2.0 (Linux)"));

        assert_eq!(agent.device_type(), DeviceType::Phone);
        assert_eq!(agent.device(None), Some("Communicator"));
        assert_eq!(agent.platform(None), Some("Linux"));
        assert!(builtin_extension().operating_systems.contains_key("Linux"));
    }

    #[test]
    fn test_capitalize_and_truncate_helpers() {
        assert_eq!(capitalize_first("bingbot"), "Bingbot");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(truncate_on_char_boundary("abcdef", 3), "abc");
        assert_eq!(truncate_on_char_boundary("aé", 2), "a");
    }
}
