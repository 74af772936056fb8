// ==========================================
// 电解槽拆解工作流 - 选择暂存区
// ==========================================
// 职责: 持有尚未提交的操作意图
//   1. 每台电解槽已勾选的元件（保持勾选顺序）
//   2. 共享的拆解检查项集合
//   3. 按 (电解槽, 元件) 记录的草稿备注
// 红线: 只能勾选未禁用的元件
// 红线: 取消勾选/清空备注/提交后立即删除对应条目
// ==========================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::error::WorkflowResult;
use crate::engine::fleet_registry::FleetRegistry;

// ==========================================
// SelectionEntry - 汇总备注表中的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub unit_id: u32,
    pub part_id: String,
}

/// 单个元件勾选切换结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// 元件已禁用,忽略
    Ignored,
}

// ==========================================
// SelectionStore - 选择暂存区
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selected_parts: BTreeMap<u32, Vec<String>>,
    selected_checklist: Vec<String>,
    draft_comments: BTreeMap<u32, BTreeMap<String, String>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 元件勾选
    // ==========================================

    /// 切换元件勾选状态
    ///
    /// 已禁用元件静默忽略;取消勾选时同时删除该元件的草稿备注
    pub fn toggle(
        &mut self,
        fleet: &FleetRegistry,
        unit_id: u32,
        part_id: &str,
    ) -> WorkflowResult<ToggleOutcome> {
        let part = fleet.require_part(unit_id, part_id)?;
        if part.disabled {
            debug!("忽略已禁用元件: unit_id={}, part_id={}", unit_id, part_id);
            return Ok(ToggleOutcome::Ignored);
        }

        let selected = self.selected_parts.entry(unit_id).or_default();
        let outcome = if let Some(idx) = selected.iter().position(|id| id == part_id) {
            selected.remove(idx);
            ToggleOutcome::Deselected
        } else {
            selected.push(part_id.to_string());
            ToggleOutcome::Selected
        };

        if outcome == ToggleOutcome::Deselected {
            self.remove_comment(unit_id, part_id);
        }
        self.prune_unit(unit_id);

        debug!(
            "元件勾选切换: unit_id={}, part_id={}, outcome={:?}",
            unit_id, part_id, outcome
        );
        Ok(outcome)
    }

    /// 勾选电解槽上全部可选元件（幂等）
    ///
    /// # 返回
    /// - Ok(true): 选择集发生变化
    /// - Ok(false): 已全部勾选,未变化
    pub fn select_all(&mut self, fleet: &FleetRegistry, unit_id: u32) -> WorkflowResult<bool> {
        fleet.require_parts(unit_id)?;
        let enabled = fleet.enabled_part_ids(unit_id);
        if enabled.is_empty() || self.is_all_selected(fleet, unit_id) {
            return Ok(false);
        }

        self.selected_parts.insert(unit_id, enabled);
        debug!("全选元件: unit_id={}", unit_id);
        Ok(true)
    }

    /// 清除电解槽上全部可选元件的勾选（同时删除其草稿备注）
    pub fn clear_all(&mut self, fleet: &FleetRegistry, unit_id: u32) -> WorkflowResult<bool> {
        fleet.require_parts(unit_id)?;
        let enabled = fleet.enabled_part_ids(unit_id);
        let removed: Vec<String> = self
            .selected_for(unit_id)
            .iter()
            .filter(|id| enabled.contains(id))
            .cloned()
            .collect();
        if removed.is_empty() {
            return Ok(false);
        }

        self.release(unit_id, &removed);
        debug!("清除勾选: unit_id={}, count={}", unit_id, removed.len());
        Ok(true)
    }

    /// 电解槽上全部可选元件是否均已勾选
    ///
    /// 没有可选元件时返回 false
    pub fn is_all_selected(&self, fleet: &FleetRegistry, unit_id: u32) -> bool {
        let enabled = fleet.enabled_part_ids(unit_id);
        let selected = self.selected_for(unit_id);
        !enabled.is_empty() && enabled.iter().all(|id| selected.contains(id))
    }

    /// 电解槽已勾选的元件（勾选顺序）
    pub fn selected_for(&self, unit_id: u32) -> &[String] {
        self.selected_parts
            .get(&unit_id)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// 元件是否已勾选
    pub fn is_selected(&self, unit_id: u32, part_id: &str) -> bool {
        self.selected_for(unit_id).iter().any(|id| id == part_id)
    }

    /// 电解槽是否有勾选
    pub fn has_selection(&self, unit_id: u32) -> bool {
        !self.selected_for(unit_id).is_empty()
    }

    /// 汇总全部电解槽的勾选（电解槽编号为主序,勾选顺序为次序）
    pub fn all_selected_entries(&self) -> Vec<SelectionEntry> {
        self.selected_parts
            .iter()
            .flat_map(|(unit_id, ids)| {
                ids.iter().map(move |part_id| SelectionEntry {
                    unit_id: *unit_id,
                    part_id: part_id.clone(),
                })
            })
            .collect()
    }

    /// 移除指定元件的勾选与草稿备注（提交成功后调用）
    pub fn release(&mut self, unit_id: u32, part_ids: &[String]) {
        if let Some(selected) = self.selected_parts.get_mut(&unit_id) {
            selected.retain(|id| !part_ids.contains(id));
        }
        for part_id in part_ids {
            self.remove_comment(unit_id, part_id);
        }
        self.prune_unit(unit_id);
    }

    // ==========================================
    // 拆解检查项
    // ==========================================

    /// 切换检查项
    ///
    /// # 返回
    /// - true: 切换后为已勾选
    pub fn toggle_checklist_item(&mut self, label: &str) -> bool {
        if let Some(idx) = self.selected_checklist.iter().position(|l| l == label) {
            self.selected_checklist.remove(idx);
            false
        } else {
            self.selected_checklist.push(label.to_string());
            true
        }
    }

    /// 清空检查项
    pub fn clear_checklist(&mut self) {
        self.selected_checklist.clear();
    }

    /// 已勾选的检查项（勾选顺序）
    pub fn selected_checklist(&self) -> &[String] {
        &self.selected_checklist
    }

    // ==========================================
    // 草稿备注
    // ==========================================

    /// 写入草稿备注;空字符串等同删除
    pub fn set_comment(&mut self, unit_id: u32, part_id: &str, text: &str) {
        if text.is_empty() {
            self.remove_comment(unit_id, part_id);
            return;
        }
        self.draft_comments
            .entry(unit_id)
            .or_default()
            .insert(part_id.to_string(), text.to_string());
    }

    /// 查询草稿备注
    pub fn comment_for(&self, unit_id: u32, part_id: &str) -> Option<&str> {
        self.draft_comments
            .get(&unit_id)
            .and_then(|comments| comments.get(part_id))
            .map(|s| s.as_str())
    }

    /// 指定元件的草稿备注（缺失的元件不出现在结果中）
    pub fn comments_for(&self, unit_id: u32, part_ids: &[String]) -> BTreeMap<String, String> {
        self.draft_comments
            .get(&unit_id)
            .map(|comments| {
                comments
                    .iter()
                    .filter(|(id, _)| part_ids.contains(id))
                    .map(|(id, text)| (id.clone(), text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn remove_comment(&mut self, unit_id: u32, part_id: &str) {
        if let Some(comments) = self.draft_comments.get_mut(&unit_id) {
            comments.remove(part_id);
            if comments.is_empty() {
                self.draft_comments.remove(&unit_id);
            }
        }
    }

    // 空条目直接从映射中移除
    fn prune_unit(&mut self, unit_id: u32) {
        if self
            .selected_parts
            .get(&unit_id)
            .is_some_and(|ids| ids.is_empty())
        {
            self.selected_parts.remove(&unit_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::types::PartStatus;

    fn fleet() -> FleetRegistry {
        FleetRegistry::initialize(&Catalog::builtin())
    }

    #[test]
    fn test_toggle_勾选与取消() {
        let fleet = fleet();
        let mut store = SelectionStore::new();

        assert_eq!(store.toggle(&fleet, 6310, "TC080").unwrap(), ToggleOutcome::Selected);
        assert_eq!(store.toggle(&fleet, 6310, "2765").unwrap(), ToggleOutcome::Selected);
        assert_eq!(store.selected_for(6310), &["TC080".to_string(), "2765".to_string()]);

        store.set_comment(6310, "TC080", "seized");
        assert_eq!(store.toggle(&fleet, 6310, "TC080").unwrap(), ToggleOutcome::Deselected);
        assert_eq!(store.selected_for(6310), &["2765".to_string()]);
        assert_eq!(store.comment_for(6310, "TC080"), None);
    }

    #[test]
    fn test_toggle_已禁用元件无操作() {
        let mut fleet = fleet();
        fleet
            .commit(
                6310,
                &["TC080".to_string()],
                PartStatus::InRepair,
                1,
                &BTreeMap::new(),
            )
            .unwrap();

        let mut store = SelectionStore::new();
        for _ in 0..3 {
            assert_eq!(store.toggle(&fleet, 6310, "TC080").unwrap(), ToggleOutcome::Ignored);
        }
        assert!(!store.has_selection(6310));
        assert_eq!(store, SelectionStore::new());
    }

    #[test]
    fn test_toggle_未知元件报错() {
        let fleet = fleet();
        let mut store = SelectionStore::new();
        assert!(store.toggle(&fleet, 6310, "NOPE").is_err());
        assert!(store.toggle(&fleet, 1, "TC080").is_err());
    }

    #[test]
    fn test_select_all_幂等且跳过禁用元件() {
        let mut fleet = fleet();
        fleet
            .commit(
                6345,
                &["1869".to_string()],
                PartStatus::ReadyToAssemble,
                0,
                &BTreeMap::new(),
            )
            .unwrap();
        let mut store = SelectionStore::new();

        assert!(store.select_all(&fleet, 6345).unwrap());
        assert_eq!(store.selected_for(6345).len(), 12);
        assert!(!store.is_selected(6345, "1869"));
        assert!(store.is_all_selected(&fleet, 6345));

        let before = store.clone();
        assert!(!store.select_all(&fleet, 6345).unwrap());
        assert_eq!(store, before);
    }

    #[test]
    fn test_clear_all_删除备注() {
        let fleet = fleet();
        let mut store = SelectionStore::new();
        store.select_all(&fleet, 6310).unwrap();
        store.set_comment(6310, "BR307", "bent");

        assert!(store.clear_all(&fleet, 6310).unwrap());
        assert!(!store.has_selection(6310));
        assert_eq!(store.comment_for(6310, "BR307"), None);
        assert!(!store.clear_all(&fleet, 6310).unwrap());
    }

    #[test]
    fn test_set_comment_空字符串删除() {
        let mut store = SelectionStore::new();
        store.set_comment(6310, "TC080", "note");
        assert_eq!(store.comment_for(6310, "TC080"), Some("note"));
        store.set_comment(6310, "TC080", "");
        assert_eq!(store.comment_for(6310, "TC080"), None);
        assert_eq!(store, SelectionStore::new());
    }

    #[test]
    fn test_checklist_切换() {
        let mut store = SelectionStore::new();
        assert!(store.toggle_checklist_item("Anolyte Leaker"));
        assert!(store.toggle_checklist_item("Hydrogen Box"));
        assert!(!store.toggle_checklist_item("Anolyte Leaker"));
        assert_eq!(store.selected_checklist(), &["Hydrogen Box".to_string()]);
        store.clear_checklist();
        assert!(store.selected_checklist().is_empty());
    }

    #[test]
    fn test_all_selected_entries_跨电解槽排序() {
        let fleet = fleet();
        let mut store = SelectionStore::new();
        store.toggle(&fleet, 6388, "2013").unwrap();
        store.toggle(&fleet, 6310, "2765").unwrap();
        store.toggle(&fleet, 6310, "TC080").unwrap();

        let entries: Vec<(u32, String)> = store
            .all_selected_entries()
            .into_iter()
            .map(|e| (e.unit_id, e.part_id))
            .collect();
        assert_eq!(
            entries,
            vec![
                (6310, "2765".to_string()),
                (6310, "TC080".to_string()),
                (6388, "2013".to_string()),
            ]
        );
    }

    #[test]
    fn test_release_移除勾选与备注() {
        let fleet = fleet();
        let mut store = SelectionStore::new();
        store.toggle(&fleet, 6310, "TC080").unwrap();
        store.toggle(&fleet, 6310, "1869").unwrap();
        store.set_comment(6310, "TC080", "a");
        store.set_comment(6310, "1869", "b");

        store.release(6310, &["TC080".to_string()]);
        assert_eq!(store.selected_for(6310), &["1869".to_string()]);
        assert_eq!(store.comment_for(6310, "1869"), Some("b"));
        assert_eq!(
            store.comments_for(6310, &["TC080".to_string(), "1869".to_string()]).len(),
            1
        );
    }
}
