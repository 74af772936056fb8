// ==========================================
// 电解槽拆解工作流 - 渲染视图 DTO
// ==========================================
// 职责: 提供给前端渲染的只读快照
// 说明: 视图只描述状态,不包含布局与样式
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::catalog::UnitDescriptor;
use crate::domain::part_state::PartRuntimeState;
use crate::domain::types::{Criticality, ElementAction, PartStatus};
use crate::engine::confirmation::PendingAction;
use crate::i18n::{t, t_with_args};

// ==========================================
// 电解槽列表
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitListView {
    pub search_term: String,
    pub units: Vec<UnitDescriptor>,
    pub active_unit_id: Option<u32>,
}

// ==========================================
// 元件行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRowView {
    pub position: u32,
    pub part_id: String,
    pub name: String,
    pub criticality: Criticality,
    pub status: PartStatus,
    pub status_label: Option<String>, // 已提交元件的状态文案
    pub disabled: bool,
    pub checked: bool,
    pub checklist_count: u32,
    pub comment: Option<String>,
}

impl PartRowView {
    pub fn from_state(state: &PartRuntimeState, checked: bool) -> Self {
        Self {
            position: state.part.position,
            part_id: state.part.id.clone(),
            name: state.part.name.clone(),
            criticality: state.part.criticality,
            status: state.status,
            status_label: status_label(state.status),
            disabled: state.disabled,
            checked,
            checklist_count: state.checklist_count,
            comment: state.comment.clone(),
        }
    }
}

/// 电解槽及其全部元件（汇总视图）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPartsView {
    pub unit: UnitDescriptor,
    pub parts: Vec<PartRowView>,
}

/// 全选复选框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectAllView {
    pub enabled: bool,
    pub checked: bool,
}

/// 汇总备注表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRowView {
    pub unit_id: u32,
    pub part_id: String,
    pub comment: String,
}

/// 检查项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItemView {
    pub label: String,
    pub selected: bool,
    pub enabled: bool,
}

// ==========================================
// 待确认操作
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingActionView {
    pub unit_id: u32,
    pub action: ElementAction,
    pub action_label: String,
    pub status_label: String,
    pub part_ids: Vec<String>,
    pub checklist_count: u32,
    pub title: String,
    pub message: String,
}

impl PendingActionView {
    pub fn from_pending(pending: &PendingAction) -> Self {
        let status_label = action_status_label(pending.action);
        let checklist_count = pending.checklist_count();

        Self {
            unit_id: pending.unit_id,
            action: pending.action,
            action_label: action_label(pending.action),
            message: confirm_message(pending.action, &pending.part_ids, checklist_count),
            status_label,
            part_ids: pending.part_ids.clone(),
            checklist_count,
            title: t("confirm.title"),
        }
    }
}

// ==========================================
// 工作台整体快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceView {
    pub unit_list: UnitListView,
    pub active_unit: Option<UnitDescriptor>,
    pub parts: Vec<PartRowView>,
    pub select_all: SelectAllView,
    pub comment_rows: Vec<CommentRowView>,
    pub checklist: Vec<ChecklistItemView>,
    pub checklist_selected_count: usize,
    pub cut_out_comment: String,
    pub can_request_repair: bool,
    pub can_request_assemble: bool,
    pub pending_action: Option<PendingActionView>,
    pub feedback: Option<String>,
}

// ==========================================
// 文案
// ==========================================

/// 操作按钮文案
pub fn action_label(action: ElementAction) -> String {
    match action {
        ElementAction::Repair => t("action.repair"),
        ElementAction::Assemble => t("action.assemble"),
    }
}

/// 操作目标状态文案
pub fn action_status_label(action: ElementAction) -> String {
    match action {
        ElementAction::Repair => t("status.repair"),
        ElementAction::Assemble => t("status.assemble"),
    }
}

/// 元件状态文案（可选状态无文案）
pub fn status_label(status: PartStatus) -> Option<String> {
    match status {
        PartStatus::Available => None,
        PartStatus::InRepair => Some(action_status_label(ElementAction::Repair)),
        PartStatus::ReadyToAssemble => Some(action_status_label(ElementAction::Assemble)),
    }
}

/// 确认提示文案
///
/// 送修时追加检查项数量（单复数区分）
pub fn confirm_message(action: ElementAction, part_ids: &[String], checklist_count: u32) -> String {
    let ids_label = if part_ids.is_empty() {
        t("confirm.ids_placeholder")
    } else {
        part_ids.join(", ")
    };

    let mut message = t_with_args(
        "confirm.message",
        &[("ids", &ids_label), ("status", &action_status_label(action))],
    );

    if action == ElementAction::Repair {
        let key = if checklist_count == 1 {
            "confirm.checklist_one"
        } else {
            "confirm.checklist_many"
        };
        message.push_str(&t_with_args(key, &[("count", &checklist_count.to_string())]));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_locale;
    use crate::i18n::tests::LOCALE_TEST_LOCK;

    #[test]
    fn test_confirm_message_送修() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let msg = confirm_message(ElementAction::Repair, &["TC080".to_string()], 1);
        assert_eq!(
            msg,
            "Update status of Element Part ID TC080 to “Ready for Repair” with 1 checklist item."
        );

        let msg = confirm_message(
            ElementAction::Repair,
            &["TC080".to_string(), "1869".to_string()],
            3,
        );
        assert!(msg.ends_with("with 3 checklist items."));
    }

    #[test]
    fn test_confirm_message_待装配() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let msg = confirm_message(ElementAction::Assemble, &[], 0);
        assert_eq!(
            msg,
            "Update status of Element Part ID selected element part IDs to “Ready for Assemble”"
        );
    }

    #[test]
    fn test_status_label_可选无文案() {
        assert!(status_label(PartStatus::Available).is_none());
        assert!(status_label(PartStatus::InRepair).is_some());
    }
}
