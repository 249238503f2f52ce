//! 全局配置管理,存储清理引擎的所有开关

use serde::Deserialize;

/// 清理配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleanerConfig {
    // 跳过内网/本机地址
    pub local_hosts_skipping: bool,
    // 对完整追踪域名直接拦截
    pub domain_blocking: bool,
    // 是否记录原始规则/字段规则命中日志
    pub logging_status: bool,
    // 允许推广返利参数（为 false 时推广规则按普通字段规则剥离）
    pub referral_marketing: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            local_hosts_skipping: true,
            domain_blocking: true,
            logging_status: true,
            referral_marketing: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> CleanerConfig {
        CleanerConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: CleanerConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local_hosts_skipping(mut self, enabled: bool) -> Self {
        self.config.local_hosts_skipping = enabled;
        self
    }

    pub fn domain_blocking(mut self, enabled: bool) -> Self {
        self.config.domain_blocking = enabled;
        self
    }

    pub fn logging_status(mut self, enabled: bool) -> Self {
        self.config.logging_status = enabled;
        self
    }

    pub fn referral_marketing(mut self, allowed: bool) -> Self {
        self.config.referral_marketing = allowed;
        self
    }

    pub fn build(self) -> CleanerConfig {
        self.config
    }
}
