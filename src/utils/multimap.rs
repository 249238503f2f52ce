//! 有序多值映射
//! 一个键对应一组互不重复的值，键按首次插入顺序排列，同一键下的值按插入顺序排列

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// 基于 IndexSet 的多值映射
/// `len` 统计的是 (键, 值) 对的总数，而不是键的数量
#[derive(Debug, Clone)]
pub struct Multimap<K, V> {
    map: IndexMap<K, IndexSet<V>>,
    size: usize,
}

impl<K, V> Default for Multimap<K, V> {
    fn default() -> Self {
        Self {
            map: IndexMap::new(),
            size: 0,
        }
    }
}

impl<K, V> Multimap<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// (键, 值) 对总数
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 获取某个键的全部值（副本），键不存在时返回空集合
    pub fn get<Q>(&self, key: &Q) -> IndexSet<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.map.get(key).cloned().unwrap_or_default()
    }

    /// 插入 (键, 值) 对，已存在时返回 false 且不改变大小
    pub fn put(&mut self, key: K, value: V) -> bool {
        let values = self.map.entry(key).or_default();
        if !values.insert(value) {
            return false;
        }
        self.size += 1;
        true
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub fn has_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map
            .get(key)
            .is_some_and(|values| values.contains(value))
    }

    /// 删除键及其全部值
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.shift_remove(key) {
            Some(values) => {
                self.size -= values.len();
                true
            }
            None => false,
        }
    }

    /// 删除单个 (键, 值) 对；值集合清空后键一并移除
    pub fn delete_entry<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(values) = self.map.get_mut(key) else {
            return false;
        };
        if !values.shift_remove(value) {
            return false;
        }
        self.size -= 1;
        if values.is_empty() {
            self.map.shift_remove(key);
        }
        true
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.size = 0;
    }

    /// 惰性遍历全部 (键, 值) 对，可重复调用
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.map
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries().map(|(_, value)| value)
    }
}

impl<'a, K, V> IntoIterator for &'a Multimap<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.entries())
    }
}
