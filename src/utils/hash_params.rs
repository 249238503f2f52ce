//! URL片段（#之后部分）参数模型
//! 将 `a=1&b&c=2` 形式的片段解析为有序多值映射，值缺省时为 None

use std::fmt;

use indexmap::IndexSet;
use url::Url;

use super::multimap::Multimap;

/// URL片段参数
#[derive(Debug, Clone, Default)]
pub struct HashParams {
    params: Multimap<String, Option<String>>,
}

impl HashParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从URL对象提取片段参数
    pub fn from_url(url: &Url) -> Self {
        Self::parse(url.fragment().unwrap_or(""))
    }

    /// 解析片段字符串（可带前导 `#`）
    /// 空键被忽略；没有 `=`、值为空或含多个 `=` 的条目值为 None
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut params = Multimap::new();

        for pair in fragment.split('&') {
            let parts: Vec<&str> = pair.split('=').collect();
            let key = parts[0];
            if key.is_empty() {
                continue;
            }
            let value = match parts.as_slice() {
                [_, value] if !value.is_empty() => Some(value.to_string()),
                _ => None,
            };
            params.put(key.to_string(), value);
        }

        Self { params }
    }

    pub fn append(&mut self, name: &str, value: Option<&str>) {
        self.params.put(name.to_string(), value.map(str::to_string));
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.params.delete(name)
    }

    /// 返回该键的第一个非空值
    pub fn get(&self, name: &str) -> Option<String> {
        self.params
            .get(name)
            .into_iter()
            .next()
            .flatten()
            .filter(|value| !value.is_empty())
    }

    pub fn get_all(&self, name: &str) -> IndexSet<Option<String>> {
        self.params.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.params.keys().map(String::as_str)
    }

    /// 条目（键值对）总数
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for HashParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.params.entries().enumerate() {
            if idx > 0 {
                f.write_str("&")?;
            }
            match value {
                Some(value) if !value.is_empty() => write!(f, "{}={}", key, value)?,
                _ => f.write_str(key)?,
            }
        }
        Ok(())
    }
}
