// ==========================================
// 电解槽拆解工作流 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 所有错误均可由操作人修正后重试,不存在致命错误
// ==========================================

use crate::domain::types::PartStatus;
use thiserror::Error;

/// 工作流错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    // ===== 请求校验错误 =====
    #[error("未选择元件: unit_id={unit_id}")]
    EmptySelection { unit_id: u32 },

    #[error("送修必须勾选至少一个拆解检查项: unit_id={unit_id}")]
    ChecklistRequired { unit_id: u32 },

    #[error("已有待确认操作: unit_id={unit_id}, action={action}")]
    ActionAlreadyPending { unit_id: u32, action: String },

    #[error("没有待确认操作")]
    NoPendingAction,

    // ===== 状态转换错误 =====
    #[error("无效的状态转换: unit_id={unit_id}, part_id={part_id}, from={from} to={to}")]
    InvalidTransition {
        unit_id: u32,
        part_id: String,
        from: PartStatus,
        to: PartStatus,
    },

    // ===== 引用错误 =====
    #[error("电解槽不存在: {0}")]
    UnknownUnit(u32),

    #[error("元件不存在: unit_id={unit_id}, part_id={part_id}")]
    UnknownPart { unit_id: u32, part_id: String },

    #[error("检查项不存在: {0}")]
    UnknownChecklistItem(String),

    #[error("电解槽不在当前筛选结果中: {0}")]
    UnitNotVisible(u32),

    // ===== 目录错误 =====
    #[error("目录无效: {0}")]
    InvalidCatalog(String),
}

impl WorkflowError {
    /// 稳定的错误代码（供前端识别）
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::EmptySelection { .. } => "EMPTY_SELECTION",
            WorkflowError::ChecklistRequired { .. } => "CHECKLIST_REQUIRED",
            WorkflowError::ActionAlreadyPending { .. } => "ACTION_ALREADY_PENDING",
            WorkflowError::NoPendingAction => "NO_PENDING_ACTION",
            WorkflowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            WorkflowError::UnknownUnit(_) => "UNKNOWN_UNIT",
            WorkflowError::UnknownPart { .. } => "UNKNOWN_PART",
            WorkflowError::UnknownChecklistItem(_) => "UNKNOWN_CHECKLIST_ITEM",
            WorkflowError::UnitNotVisible(_) => "UNIT_NOT_VISIBLE",
            WorkflowError::InvalidCatalog(_) => "INVALID_CATALOG",
        }
    }
}

/// Result 类型别名
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_error_codes_唯一() {
        let errors = vec![
            WorkflowError::EmptySelection { unit_id: 1 },
            WorkflowError::ChecklistRequired { unit_id: 1 },
            WorkflowError::ActionAlreadyPending {
                unit_id: 1,
                action: "REPAIR".to_string(),
            },
            WorkflowError::NoPendingAction,
            WorkflowError::InvalidTransition {
                unit_id: 1,
                part_id: "TC080".to_string(),
                from: PartStatus::InRepair,
                to: PartStatus::ReadyToAssemble,
            },
            WorkflowError::UnknownUnit(1),
            WorkflowError::UnknownPart {
                unit_id: 1,
                part_id: "X".to_string(),
            },
            WorkflowError::UnknownChecklistItem("X".to_string()),
            WorkflowError::UnitNotVisible(1),
            WorkflowError::InvalidCatalog(String::new()),
        ];

        let codes: HashSet<&str> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
