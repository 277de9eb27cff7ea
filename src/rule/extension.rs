//! 内置扩展规则
//! 在基础规则之上补充桌面设备、桌面系统、桌面浏览器及其版本模板

use super::model::{PatternValue, RuleSource, RuleTable};

/// 构建内置扩展规则源
pub fn builtin_extension() -> RuleSource {
    RuleSource {
        desktop_devices: desktop_devices(),
        operating_systems: additional_operating_systems(),
        browsers: additional_browsers(),
        properties: additional_properties(),
        ..Default::default()
    }
}

fn desktop_devices() -> RuleTable {
    [("Macintosh", "Macintosh")].into_iter().collect()
}

fn additional_operating_systems() -> RuleTable {
    [
        ("Windows", "Windows"),
        ("Windows NT", "Windows NT"),
        ("OS X", "Mac OS X"),
        ("Debian", "Debian"),
        ("Ubuntu", "Ubuntu"),
        ("Macintosh", "PPC"),
        ("OpenBSD", "OpenBSD"),
        ("Linux", "Linux"),
        ("ChromeOS", "CrOS"),
    ]
    .into_iter()
    .collect()
}

// 顺序即优先级：Opera Mini 先于 Opera，Edge 先于 Chrome，Chrome 先于 Safari
fn additional_browsers() -> RuleTable {
    [
        ("Opera Mini", "Opera Mini"),
        ("Opera", "Opera|OPR"),
        ("Edge", "Edge|Edg"),
        ("Coc Coc", "coc_coc_browser"),
        ("UCBrowser", "UCBrowser"),
        ("Vivaldi", "Vivaldi"),
        ("Chrome", "Chrome"),
        ("Firefox", "Firefox"),
        ("Safari", "Safari"),
        ("IE", r"MSIE|IEMobile|MSIEMobile|Trident/[.0-9]+"),
        ("Netscape", "Netscape"),
        ("Mozilla", "Mozilla"),
        ("WeChat", "MicroMessenger"),
    ]
    .into_iter()
    .collect()
}

fn additional_properties() -> RuleTable {
    let entries: Vec<(&str, PatternValue)> = vec![
        // 操作系统
        ("Windows", "Windows NT [VER]".into()),
        ("Windows NT", "Windows NT [VER]".into()),
        ("OS X", "OS X [VER]".into()),
        ("BlackBerryOS", [r"BlackBerry[\w]+/[VER]", "BlackBerry.*Version/[VER]", "Version/[VER]"].into()),
        ("AndroidOS", "Android [VER]".into()),
        ("ChromeOS", "CrOS x86_64 [VER]".into()),
        // 浏览器
        ("Opera Mini", "Opera Mini/[VER]".into()),
        ("Opera", [" OPR/[VER]", "Opera Mini/[VER]", "Version/[VER]", "Opera [VER]"].into()),
        ("Netscape", "Netscape/[VER]".into()),
        ("Mozilla", "rv:[VER]".into()),
        ("IE", ["IEMobile/[VER];", "IEMobile [VER]", "MSIE [VER];", "rv:[VER]"].into()),
        ("Edge", ["Edge/[VER]", "Edg/[VER]"].into()),
        ("Vivaldi", "Vivaldi/[VER]".into()),
        ("Coc Coc", "coc_coc_browser/[VER]".into()),
    ];
    entries.into_iter().collect()
}
