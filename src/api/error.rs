// ==========================================
// 电解槽拆解工作流 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎错误为操作人可读的提示
// 说明: 所有错误都可由操作人调整选择后重试
// ==========================================

use crate::engine::error::WorkflowError;
use crate::i18n::{t, t_with_args};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 工作流错误
    // ==========================================
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    // ==========================================
    // 输入错误（操作人可调整后重试）
    // ==========================================
    #[error("当前没有可操作的电解槽")]
    NoActiveUnit,

    #[error("元件未勾选,不能填写备注: unit_id={unit_id}, part_id={part_id}")]
    CommentRequiresSelection { unit_id: u32, part_id: String },

    #[error("未知操作: {0}")]
    UnknownAction(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 稳定的错误代码（返回给前端）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Workflow(e) => e.code(),
            ApiError::NoActiveUnit => "NO_ACTIVE_UNIT",
            ApiError::CommentRequiresSelection { .. } => "COMMENT_REQUIRES_SELECTION",
            ApiError::UnknownAction(_) => "UNKNOWN_ACTION",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 引擎错误（如有）
    pub fn as_workflow(&self) -> Option<&WorkflowError> {
        match self {
            ApiError::Workflow(e) => Some(e),
            _ => None,
        }
    }

    /// 操作人提示文案（按当前语言）
    pub fn feedback_message(&self) -> String {
        match self {
            ApiError::Workflow(e) => workflow_feedback(e),
            ApiError::NoActiveUnit => t("feedback.no_active_unit"),
            ApiError::CommentRequiresSelection { unit_id, part_id } => t_with_args(
                "feedback.comment_requires_selection",
                &[("unit_id", &unit_id.to_string()), ("part_id", part_id)],
            ),
            ApiError::UnknownAction(action) => {
                t_with_args("feedback.unknown_action", &[("action", action)])
            }
            ApiError::Other(e) => t_with_args("feedback.internal", &[("reason", &e.to_string())]),
        }
    }
}

fn workflow_feedback(err: &WorkflowError) -> String {
    match err {
        WorkflowError::EmptySelection { .. } => t("feedback.empty_selection"),
        WorkflowError::ChecklistRequired { .. } => t("feedback.checklist_required"),
        WorkflowError::ActionAlreadyPending { unit_id, .. } => t_with_args(
            "feedback.action_already_pending",
            &[("unit_id", &unit_id.to_string())],
        ),
        WorkflowError::NoPendingAction => t("feedback.no_pending_action"),
        WorkflowError::InvalidTransition {
            unit_id, part_id, ..
        } => t_with_args(
            "feedback.invalid_transition",
            &[("unit_id", &unit_id.to_string()), ("part_id", part_id)],
        ),
        WorkflowError::UnknownUnit(unit_id) => {
            t_with_args("feedback.unknown_unit", &[("unit_id", &unit_id.to_string())])
        }
        WorkflowError::UnknownPart { unit_id, part_id } => t_with_args(
            "feedback.unknown_part",
            &[("unit_id", &unit_id.to_string()), ("part_id", part_id)],
        ),
        WorkflowError::UnknownChecklistItem(label) => {
            t_with_args("feedback.unknown_checklist_item", &[("label", label)])
        }
        WorkflowError::UnitNotVisible(unit_id) => t_with_args(
            "feedback.unit_not_visible",
            &[("unit_id", &unit_id.to_string())],
        ),
        WorkflowError::InvalidCatalog(reason) => {
            t_with_args("feedback.invalid_catalog", &[("reason", reason)])
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
