// ==========================================
// 电解槽拆解工作流 - 机群状态登记簿
// ==========================================
// 职责: 独占持有每台电解槽、每个元件的运行期状态
// 红线: commit 是唯一的写入入口,单向流转,不可回退
// 红线: 元件只在原位修改,不删除、不重排
// ==========================================

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::catalog::Catalog;
use crate::domain::part_state::PartRuntimeState;
use crate::domain::types::PartStatus;
use crate::engine::error::{WorkflowError, WorkflowResult};

// ==========================================
// FleetRegistry - 机群状态
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct FleetRegistry {
    // 目录顺序的电解槽编号
    unit_order: Vec<u32>,
    // 电解槽编号 → 按位置序号排列的元件状态
    units: HashMap<u32, Vec<PartRuntimeState>>,
}

impl FleetRegistry {
    /// 根据目录初始化机群状态
    ///
    /// 每台电解槽持有一份全部元件定义的副本,全部为可选状态
    pub fn initialize(catalog: &Catalog) -> Self {
        let base: Vec<PartRuntimeState> = catalog
            .parts_in_position_order()
            .into_iter()
            .map(PartRuntimeState::available)
            .collect();

        let unit_order: Vec<u32> = catalog.units.iter().map(|u| u.id).collect();
        let units = unit_order
            .iter()
            .map(|id| (*id, base.clone()))
            .collect();

        info!(
            "机群状态初始化完成: units={}, parts_per_unit={}",
            unit_order.len(),
            base.len()
        );

        Self { unit_order, units }
    }

    /// 目录顺序的电解槽编号
    pub fn unit_ids(&self) -> &[u32] {
        &self.unit_order
    }

    /// 查询电解槽的元件状态（按位置序号排列）
    pub fn parts(&self, unit_id: u32) -> Option<&[PartRuntimeState]> {
        self.units.get(&unit_id).map(|parts| parts.as_slice())
    }

    /// 查询电解槽的元件状态,不存在时报错
    pub fn require_parts(&self, unit_id: u32) -> WorkflowResult<&[PartRuntimeState]> {
        self.parts(unit_id).ok_or(WorkflowError::UnknownUnit(unit_id))
    }

    /// 查询单个元件
    pub fn part(&self, unit_id: u32, part_id: &str) -> Option<&PartRuntimeState> {
        self.units
            .get(&unit_id)
            .and_then(|parts| parts.iter().find(|p| p.id() == part_id))
    }

    /// 查询单个元件,不存在时报错
    pub fn require_part(&self, unit_id: u32, part_id: &str) -> WorkflowResult<&PartRuntimeState> {
        let parts = self.require_parts(unit_id)?;
        parts
            .iter()
            .find(|p| p.id() == part_id)
            .ok_or_else(|| WorkflowError::UnknownPart {
                unit_id,
                part_id: part_id.to_string(),
            })
    }

    /// 电解槽上仍可选择的元件编号（按位置序号）
    pub fn enabled_part_ids(&self, unit_id: u32) -> Vec<String> {
        self.parts(unit_id)
            .map(|parts| {
                parts
                    .iter()
                    .filter(|p| p.is_selectable())
                    .map(|p| p.id().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 提交状态转换
    ///
    /// # 参数
    /// - unit_id: 电解槽编号
    /// - part_ids: 目标元件编号
    /// - new_status: 目标状态（不能为 Available）
    /// - checklist_count: 检查项数量（待装配时由调用方传 0）
    /// - comments: 元件备注（缺失即不设置）
    ///
    /// # 返回
    /// - Ok(Vec<PartRuntimeState>): 提交后的元件状态
    /// - Err(InvalidTransition): 任一目标元件已不是可选状态（整批不生效）
    pub fn commit(
        &mut self,
        unit_id: u32,
        part_ids: &[String],
        new_status: PartStatus,
        checklist_count: u32,
        comments: &BTreeMap<String, String>,
    ) -> WorkflowResult<Vec<PartRuntimeState>> {
        let parts = self
            .units
            .get_mut(&unit_id)
            .ok_or(WorkflowError::UnknownUnit(unit_id))?;

        // 先整批校验,再整批写入
        for part_id in part_ids {
            let current = parts
                .iter()
                .find(|p| p.id() == part_id)
                .ok_or_else(|| WorkflowError::UnknownPart {
                    unit_id,
                    part_id: part_id.clone(),
                })?;

            if current.status.is_terminal() || !new_status.is_terminal() {
                warn!(
                    "拒绝状态转换: unit_id={}, part_id={}, from={}, to={}",
                    unit_id, part_id, current.status, new_status
                );
                return Err(WorkflowError::InvalidTransition {
                    unit_id,
                    part_id: part_id.clone(),
                    from: current.status,
                    to: new_status,
                });
            }
        }

        let committed_at = Utc::now();
        let mut committed = Vec::with_capacity(part_ids.len());
        for part in parts.iter_mut() {
            if !part_ids.iter().any(|id| id == part.id()) {
                continue;
            }
            part.status = new_status;
            part.disabled = true;
            part.checklist_count = checklist_count;
            part.comment = comments.get(part.id()).cloned();
            part.committed_at = Some(committed_at);
            committed.push(part.clone());
        }

        info!(
            "状态提交成功: unit_id={}, parts=[{}], status={}, checklist_count={}",
            unit_id,
            part_ids.join(", "),
            new_status,
            checklist_count
        );

        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FleetRegistry {
        FleetRegistry::initialize(&Catalog::builtin())
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initialize_全部可选且按位置排列() {
        let fleet = registry();
        assert_eq!(fleet.unit_ids(), &[6310, 6345, 6350, 6388, 6392]);

        for unit_id in fleet.unit_ids() {
            let parts = fleet.parts(*unit_id).unwrap();
            assert_eq!(parts.len(), 13);
            assert!(parts.iter().all(|p| p.status == PartStatus::Available));
            assert!(parts.iter().all(|p| !p.disabled && p.checklist_count == 0));
            let positions: Vec<u32> = parts.iter().map(|p| p.part.position).collect();
            assert_eq!(positions, (1..=13).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn test_commit_送修() {
        let mut fleet = registry();
        let mut comments = BTreeMap::new();
        comments.insert("TC080".to_string(), "clamp cracked".to_string());

        let committed = fleet
            .commit(6310, &ids(&["TC080", "1869"]), PartStatus::InRepair, 2, &comments)
            .unwrap();
        assert_eq!(committed.len(), 2);

        let tc080 = fleet.part(6310, "TC080").unwrap();
        assert_eq!(tc080.status, PartStatus::InRepair);
        assert!(tc080.disabled);
        assert_eq!(tc080.checklist_count, 2);
        assert_eq!(tc080.comment.as_deref(), Some("clamp cracked"));
        assert!(tc080.committed_at.is_some());

        let ring = fleet.part(6310, "1869").unwrap();
        assert_eq!(ring.comment, None);

        // 其他电解槽不受影响
        assert_eq!(fleet.part(6345, "TC080").unwrap().status, PartStatus::Available);
    }

    #[test]
    fn test_commit_已提交元件拒绝且整批不生效() {
        let mut fleet = registry();
        let empty = BTreeMap::new();
        fleet
            .commit(6310, &ids(&["TC080"]), PartStatus::ReadyToAssemble, 0, &empty)
            .unwrap();

        let result = fleet.commit(
            6310,
            &ids(&["1869", "TC080"]),
            PartStatus::InRepair,
            1,
            &empty,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { ref part_id, from: PartStatus::ReadyToAssemble, .. })
                if part_id == "TC080"
        ));
        // 1869 未被写入
        assert_eq!(fleet.part(6310, "1869").unwrap().status, PartStatus::Available);
        assert!(!fleet.part(6310, "1869").unwrap().disabled);
    }

    #[test]
    fn test_commit_目标状态不能为可选() {
        let mut fleet = registry();
        let result = fleet.commit(6310, &ids(&["TC080"]), PartStatus::Available, 0, &BTreeMap::new());
        assert!(matches!(result, Err(WorkflowError::InvalidTransition { .. })));
    }

    #[test]
    fn test_commit_未知电解槽与元件() {
        let mut fleet = registry();
        assert_eq!(
            fleet.commit(1, &ids(&["TC080"]), PartStatus::InRepair, 1, &BTreeMap::new()),
            Err(WorkflowError::UnknownUnit(1))
        );
        assert!(matches!(
            fleet.commit(6310, &ids(&["NOPE"]), PartStatus::InRepair, 1, &BTreeMap::new()),
            Err(WorkflowError::UnknownPart { .. })
        ));
    }

    #[test]
    fn test_enabled_part_ids_排除已禁用() {
        let mut fleet = registry();
        fleet
            .commit(6350, &ids(&["BR307"]), PartStatus::InRepair, 1, &BTreeMap::new())
            .unwrap();
        let enabled = fleet.enabled_part_ids(6350);
        assert_eq!(enabled.len(), 12);
        assert!(!enabled.contains(&"BR307".to_string()));
        assert!(fleet.enabled_part_ids(9999).is_empty());
    }
}
