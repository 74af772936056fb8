// ==========================================
// 电解槽拆解工作流 - 操作意图校验器
// ==========================================
// 职责: 在修改暂存区之前校验意图引用的电解槽、元件、检查项
// ==========================================

use std::sync::Arc;

use crate::domain::catalog::Catalog;
use crate::engine::error::{WorkflowError, WorkflowResult};
use crate::engine::fleet_registry::FleetRegistry;

// ==========================================
// IntentValidator - 意图校验器
// ==========================================

/// 操作意图校验器
///
/// 职责：
/// 1. 电解槽必须存在于目录
/// 2. 元件必须存在于该电解槽
/// 3. 检查项必须来自固定检查清单
pub struct IntentValidator {
    catalog: Arc<Catalog>,
}

impl IntentValidator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// 校验电解槽
    pub fn validate_unit(&self, unit_id: u32) -> WorkflowResult<()> {
        self.catalog
            .find_unit(unit_id)
            .map(|_| ())
            .ok_or(WorkflowError::UnknownUnit(unit_id))
    }

    /// 校验元件
    pub fn validate_part(
        &self,
        fleet: &FleetRegistry,
        unit_id: u32,
        part_id: &str,
    ) -> WorkflowResult<()> {
        self.validate_unit(unit_id)?;
        fleet.require_part(unit_id, part_id).map(|_| ())
    }

    /// 校验检查项
    pub fn validate_checklist_item(&self, label: &str) -> WorkflowResult<()> {
        if self.catalog.has_checklist_item(label) {
            Ok(())
        } else {
            tracing::warn!("未知检查项: {}", label);
            Err(WorkflowError::UnknownChecklistItem(label.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator() {
        let catalog = Arc::new(Catalog::builtin());
        let fleet = FleetRegistry::initialize(&catalog);
        let validator = IntentValidator::new(catalog);

        assert!(validator.validate_unit(6310).is_ok());
        assert_eq!(validator.validate_unit(42), Err(WorkflowError::UnknownUnit(42)));
        assert!(validator.validate_part(&fleet, 6310, "TC080").is_ok());
        assert!(matches!(
            validator.validate_part(&fleet, 6310, "XX"),
            Err(WorkflowError::UnknownPart { .. })
        ));
        assert!(validator.validate_checklist_item("Hydrogen Box").is_ok());
        assert!(validator.validate_checklist_item("hydrogen box").is_err());
    }
}
