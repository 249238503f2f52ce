//! Provider 注册表
//! 保持目录顺序；顺序决定重定向/拦截的优先级。构建后只读，可通过 Arc 在线程间共享

use std::slice::Iter;

use crate::logging::debug;
use super::provider::Provider;

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Provider>) -> Self {
        let canceling = providers.iter().filter(|p| p.is_canceling()).count();
        debug!(
            "📊 Provider注册表构建完成：共{}个，其中完整拦截{}个",
            providers.len(),
            canceling
        );
        Self { providers }
    }

    pub fn iter(&self) -> Iter<'_, Provider> {
        self.providers.iter()
    }

    /// 按名称查找
    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(Provider::name).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl FromIterator<Provider> for ProviderRegistry {
    fn from_iter<I: IntoIterator<Item = Provider>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ProviderRegistry {
    type Item = &'a Provider;
    type IntoIter = Iter<'a, Provider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}
