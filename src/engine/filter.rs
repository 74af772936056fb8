// ==========================================
// 电解槽拆解工作流 - 筛选引擎
// ==========================================
// 职责:
//   1. 按搜索词筛选电解槽（编号/显示代码/位置,大小写不敏感子串匹配）
//   2. 搜索词变化时协调当前电解槽
// 协调优先级（不可调整）:
//   空结果 → 无当前电解槽
//   > 编号精确匹配 → 提升为当前
//   > 当前电解槽仍可见 → 保持
//   > 取筛选结果第一项
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::catalog::UnitDescriptor;
use crate::engine::error::{WorkflowError, WorkflowResult};

/// 筛选电解槽
///
/// 空白搜索词返回全部电解槽,保持目录顺序
pub fn filter_units<'a>(units: &'a [UnitDescriptor], search_term: &str) -> Vec<&'a UnitDescriptor> {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return units.iter().collect();
    }

    units
        .iter()
        .filter(|unit| {
            unit.id.to_string().contains(&term)
                || unit.tag.to_lowercase().contains(&term)
                || unit.location_label.to_lowercase().contains(&term)
        })
        .collect()
}

/// 协调当前电解槽
pub fn reconcile_active(
    filtered: &[&UnitDescriptor],
    search_term: &str,
    current: Option<u32>,
) -> Option<u32> {
    let first = filtered.first()?;

    let trimmed = search_term.trim();
    if let Some(exact) = filtered.iter().find(|u| u.id.to_string() == trimmed) {
        return Some(exact.id);
    }

    if let Some(current) = current {
        if filtered.iter().any(|u| u.id == current) {
            return Some(current);
        }
    }

    Some(first.id)
}

/// 当前电解槽变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUnitChange {
    pub previous: Option<u32>,
    pub current: Option<u32>,
}

impl ActiveUnitChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

// ==========================================
// FilterEngine - 筛选引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    search_term: String,
    active_unit: Option<u32>,
}

impl FilterEngine {
    /// 以目录第一台电解槽为当前电解槽
    pub fn new(units: &[UnitDescriptor]) -> Self {
        Self {
            search_term: String::new(),
            active_unit: units.first().map(|u| u.id),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn active_unit(&self) -> Option<u32> {
        self.active_unit
    }

    /// 当前筛选结果
    pub fn visible<'a>(&self, units: &'a [UnitDescriptor]) -> Vec<&'a UnitDescriptor> {
        filter_units(units, &self.search_term)
    }

    /// 更新搜索词并协调当前电解槽
    pub fn set_search_term(&mut self, units: &[UnitDescriptor], term: &str) -> ActiveUnitChange {
        self.search_term = term.to_string();
        let filtered = filter_units(units, &self.search_term);
        let previous = self.active_unit;
        self.active_unit = reconcile_active(&filtered, &self.search_term, previous);

        debug!(
            "搜索词更新: term={:?}, visible={}, active={:?} -> {:?}",
            self.search_term,
            filtered.len(),
            previous,
            self.active_unit
        );

        ActiveUnitChange {
            previous,
            current: self.active_unit,
        }
    }

    /// 人工选择当前电解槽（必须在当前筛选结果中）
    pub fn select_unit(
        &mut self,
        units: &[UnitDescriptor],
        unit_id: u32,
    ) -> WorkflowResult<ActiveUnitChange> {
        if !units.iter().any(|u| u.id == unit_id) {
            return Err(WorkflowError::UnknownUnit(unit_id));
        }
        if !self.visible(units).iter().any(|u| u.id == unit_id) {
            return Err(WorkflowError::UnitNotVisible(unit_id));
        }

        let previous = self.active_unit;
        self.active_unit = Some(unit_id);
        Ok(ActiveUnitChange {
            previous,
            current: self.active_unit,
        })
    }
}
