//! 工具模块：提供通用数据结构与URL编解码函数
pub mod multimap;
pub mod hash_params;
pub mod url_codec;

pub use self::multimap::Multimap;
pub use self::hash_params::HashParams;
pub use self::url_codec::{decode_url, encode_uri_component};
