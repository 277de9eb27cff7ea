//! Header格式转换工具
//! 将 HTTP 请求头转换为 CGI 形式（`HTTP_USER_AGENT`）的键值表

use std::collections::HashMap;
use http::header::HeaderMap;
use tracing::debug;

/// CGI 形式请求头前缀
pub const HTTP_HEADER_PREFIX: &str = "HTTP_";

/// Header转换工具
pub struct HeaderConverter;

impl HeaderConverter {
    /// 请求头名称转 CGI 形式：`User-Agent` => `HTTP_USER_AGENT`
    pub fn to_server_key(name: &str) -> String {
        let mut key = String::with_capacity(HTTP_HEADER_PREFIX.len() + name.len());
        key.push_str(HTTP_HEADER_PREFIX);
        key.extend(name.chars().map(|c| match c {
            '-' => '_',
            c => c.to_ascii_uppercase(),
        }));
        key
    }

    /// 将HeaderMap转换为CGI形式的单值HashMap
    /// 同名多值时以 `, ` 拼接，非法 UTF-8 的值被忽略
    pub fn to_server_vars(header_map: &HeaderMap) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = HashMap::with_capacity(header_map.len());

        for (name, value) in header_map.iter() {
            let Ok(value_str) = value.to_str() else {
                debug!("ignore non-ascii header value: {}", name);
                continue;
            };

            map.entry(Self::to_server_key(name.as_str()))
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value_str);
                })
                .or_insert_with(|| value_str.to_string());
        }

        map
    }

    /// 过滤出 CGI 形式的请求头（仅保留 `HTTP_` 前缀的键）
    pub fn retain_http_vars<I, K, V>(vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        vars.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(HTTP_HEADER_PREFIX))
            .collect()
    }
}
