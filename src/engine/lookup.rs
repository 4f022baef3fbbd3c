// ==========================================
// 造船工单时间线引擎 - 双键查找
// ==========================================
// 职责: "先按 ID,再按名称" 的关联查找
// 场景: StageInstance ↔ StageTemplate, PurchaseOrder ↔ StageInstance
// 说明: 上游模板与实例并非总有稳定 ID 关联,名称是容忍的回退键
// 规则: 同键多条时取首条（与输入顺序一致）
// ==========================================

use std::collections::HashMap;

/// 命中方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey {
    Id,
    Name,
}

/// 双键索引（借用原集合,不复制）
pub struct TwoKeyIndex<'a, T> {
    by_id: HashMap<&'a str, &'a T>,
    by_name: HashMap<&'a str, &'a T>,
}

impl<'a, T> TwoKeyIndex<'a, T> {
    /// 构建索引
    ///
    /// # 参数
    /// - items: 待索引集合
    /// - id_of: 取 ID 键（None/空串不入索引）
    /// - name_of: 取名称键（None/空串不入索引）
    pub fn build<I, N>(items: &'a [T], id_of: I, name_of: N) -> Self
    where
        I: Fn(&'a T) -> Option<&'a str>,
        N: Fn(&'a T) -> Option<&'a str>,
    {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());

        for item in items {
            if let Some(id) = id_of(item).filter(|k| !k.is_empty()) {
                by_id.entry(id).or_insert(item);
            }
            if let Some(name) = name_of(item).filter(|k| !k.is_empty()) {
                by_name.entry(name).or_insert(item);
            }
        }

        Self { by_id, by_name }
    }

    /// 查找: 先 ID,后名称
    pub fn find(&self, id: Option<&str>, name: Option<&str>) -> Option<&'a T> {
        self.find_with_key(id, name).map(|(item, _)| item)
    }

    /// 查找并返回命中方式
    pub fn find_with_key(&self, id: Option<&str>, name: Option<&str>) -> Option<(&'a T, MatchKey)> {
        if let Some(hit) = id
            .filter(|k| !k.is_empty())
            .and_then(|k| self.by_id.get(k))
        {
            return Some((*hit, MatchKey::Id));
        }
        name.filter(|k| !k.is_empty())
            .and_then(|k| self.by_name.get(k))
            .map(|hit| (*hit, MatchKey::Name))
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: Option<String>,
        name: String,
        tag: u32,
    }

    fn row(id: Option<&str>, name: &str, tag: u32) -> Row {
        Row {
            id: id.map(|s| s.to_string()),
            name: name.to_string(),
            tag,
        }
    }

    fn index(rows: &[Row]) -> TwoKeyIndex<'_, Row> {
        TwoKeyIndex::build(rows, |r| r.id.as_deref(), |r| Some(r.name.as_str()))
    }

    #[test]
    fn test_id_wins_over_name() {
        let rows = vec![row(None, "Motor", 1), row(Some("T2"), "Casco", 2)];
        let idx = index(&rows);
        let (hit, key) = idx.find_with_key(Some("T2"), Some("Motor")).unwrap();
        assert_eq!(hit.tag, 2);
        assert_eq!(key, MatchKey::Id);
    }

    #[test]
    fn test_name_fallback_when_id_missing_or_unknown() {
        let rows = vec![row(None, "Motor", 1)];
        let idx = index(&rows);
        assert_eq!(idx.find(None, Some("Motor")).map(|r| r.tag), Some(1));
        let (hit, key) = idx.find_with_key(Some("T9"), Some("Motor")).unwrap();
        assert_eq!(hit.tag, 1);
        assert_eq!(key, MatchKey::Name);
    }

    #[test]
    fn test_first_wins_on_duplicates() {
        let rows = vec![row(Some("A"), "Motor", 1), row(Some("A"), "Motor", 2)];
        let idx = index(&rows);
        assert_eq!(idx.find(Some("A"), None).map(|r| r.tag), Some(1));
        assert_eq!(idx.find(None, Some("Motor")).map(|r| r.tag), Some(1));
    }

    #[test]
    fn test_empty_keys_never_match() {
        let rows = vec![row(Some(""), "", 1)];
        let idx = index(&rows);
        assert!(idx.is_empty());
        assert!(idx.find(Some(""), Some("")).is_none());
        assert!(idx.find(None, None).is_none());
    }
}
