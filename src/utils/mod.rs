//! 工具模块：版本提取、请求头转换、语言解析
pub mod version_extractor;
pub mod header_converter;
pub mod language;

pub use self::version_extractor::{VersionExtractor, VERSION_REGEX, parse_leading_float};
pub use self::header_converter::HeaderConverter;
pub use self::language::parse_languages;
