//! 本地/内网地址判定
//! 默认按保留地址段判定，调用方可以注入自己的判定器

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use once_cell::sync::Lazy;
use url::{Host, Url};

/// 默认保留地址段（内网、运营商级NAT、链路本地、回环）
const RESERVED_RANGES: &[&str] = &[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "100.64.0.0/10",
    "169.254.0.0/16",
    "127.0.0.1",
];

static DEFAULT_RANGES: Lazy<Vec<Ipv4Net>> = Lazy::new(|| {
    RESERVED_RANGES
        .iter()
        .filter_map(|range| parse_range(range))
        .collect()
});

/// 解析 `a.b.c.d/n`，单个地址按 /32 处理
pub fn parse_range(range: &str) -> Option<Ipv4Net> {
    range
        .parse::<Ipv4Net>()
        .ok()
        .or_else(|| range.parse::<Ipv4Addr>().ok().map(Ipv4Net::from))
}

/// 主机判定器：返回 true 表示该URL指向本地地址，应跳过清理
pub trait HostClassifier: Send + Sync {
    fn is_local(&self, url: &Url) -> bool;
}

impl<F> HostClassifier for F
where
    F: Fn(&Url) -> bool + Send + Sync,
{
    fn is_local(&self, url: &Url) -> bool {
        self(url)
    }
}

/// 基于保留地址段的默认判定器
#[derive(Debug, Clone)]
pub struct ReservedRangeClassifier {
    ranges: Vec<Ipv4Net>,
}

impl Default for ReservedRangeClassifier {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES.clone(),
        }
    }
}

impl ReservedRangeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 自定义网段表，无法解析的条目返回 None
    pub fn with_ranges<S: AsRef<str>>(ranges: &[S]) -> Option<Self> {
        let ranges = ranges
            .iter()
            .map(|range| parse_range(range.as_ref()))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { ranges })
    }
}

impl HostClassifier for ReservedRangeClassifier {
    fn is_local(&self, url: &Url) -> bool {
        match url.host() {
            Some(Host::Ipv4(addr)) => self.ranges.iter().any(|range| range.contains(&addr)),
            Some(Host::Domain(domain)) => domain == "localhost",
            _ => false,
        }
    }
}
