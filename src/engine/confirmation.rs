// ==========================================
// 电解槽拆解工作流 - 二阶段确认
// ==========================================
// 状态机: Idle → AwaitingConfirmation → Idle
// 红线: 请求时快照目标电解槽、元件集合与检查项,确认时不重新读取勾选
// 红线: 全系统同时最多一个待确认操作
// ==========================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::part_state::PartRuntimeState;
use crate::domain::types::{ElementAction, PartStatus};
use crate::engine::error::{WorkflowError, WorkflowResult};
use crate::engine::fleet_registry::FleetRegistry;
use crate::engine::selection::SelectionStore;

// ==========================================
// PendingAction - 待确认操作（请求时快照）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub unit_id: u32,
    pub action: ElementAction,
    pub part_ids: Vec<String>,
    pub checklist: Vec<String>,
    pub requested_at: DateTime<Utc>,
}

impl PendingAction {
    /// 提交时写入的检查项数量（待装配恒为 0）
    pub fn checklist_count(&self) -> u32 {
        match self.action {
            ElementAction::Repair => self.checklist.len() as u32,
            ElementAction::Assemble => 0,
        }
    }

    /// 提交后的目标状态
    pub fn target_status(&self) -> PartStatus {
        self.action.target_status()
    }
}

/// 工作流状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    AwaitingConfirmation(PendingAction),
}

// ==========================================
// CommitOutcome - 提交结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub unit_id: u32,
    pub action: ElementAction,
    pub status: PartStatus,
    pub checklist: Vec<String>,
    pub checklist_count: u32,
    pub comments: BTreeMap<String, String>,
    pub parts: Vec<PartRuntimeState>,
}

impl CommitOutcome {
    /// 已提交的元件编号
    pub fn part_ids(&self) -> Vec<String> {
        self.parts.iter().map(|p| p.id().to_string()).collect()
    }
}

// ==========================================
// ConfirmationWorkflow - 确认状态机
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfirmationWorkflow {
    state: WorkflowState,
}

impl ConfirmationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// 当前待确认操作
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::AwaitingConfirmation(pending) => Some(pending),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkflowState::Idle)
    }

    /// 请求操作（只允许在 Idle 状态）
    ///
    /// # 校验顺序
    /// 1. 已有待确认操作 → ActionAlreadyPending
    /// 2. 电解槽无勾选 → EmptySelection
    /// 3. 送修且检查项为空 → ChecklistRequired
    ///
    /// 校验失败时状态不变
    pub fn request_action(
        &mut self,
        selection: &SelectionStore,
        unit_id: u32,
        action: ElementAction,
    ) -> WorkflowResult<&PendingAction> {
        if let Some(pending) = self.pending() {
            return Err(WorkflowError::ActionAlreadyPending {
                unit_id: pending.unit_id,
                action: pending.action.to_string(),
            });
        }

        let part_ids = selection.selected_for(unit_id).to_vec();
        if part_ids.is_empty() {
            warn!("请求被拒绝（未选择元件）: unit_id={}, action={}", unit_id, action);
            return Err(WorkflowError::EmptySelection { unit_id });
        }

        let checklist = selection.selected_checklist().to_vec();
        if action.requires_checklist() && checklist.is_empty() {
            warn!("请求被拒绝（缺少检查项）: unit_id={}, action={}", unit_id, action);
            return Err(WorkflowError::ChecklistRequired { unit_id });
        }

        info!(
            "操作待确认: unit_id={}, action={}, parts=[{}], checklist_count={}",
            unit_id,
            action,
            part_ids.join(", "),
            checklist.len()
        );

        self.state = WorkflowState::AwaitingConfirmation(PendingAction {
            unit_id,
            action,
            part_ids,
            checklist,
            requested_at: Utc::now(),
        });

        self.pending().ok_or(WorkflowError::NoPendingAction)
    }

    /// 取消待确认操作（不修改机群状态与选择暂存区）
    pub fn cancel(&mut self) -> WorkflowResult<PendingAction> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Idle => Err(WorkflowError::NoPendingAction),
            WorkflowState::AwaitingConfirmation(pending) => {
                info!(
                    "取消待确认操作: unit_id={}, action={}",
                    pending.unit_id, pending.action
                );
                Ok(pending)
            }
        }
    }

    /// 确认并提交
    ///
    /// 无论成功与否均回到 Idle;失败时选择暂存区保持不变
    pub fn confirm(
        &mut self,
        fleet: &mut FleetRegistry,
        selection: &mut SelectionStore,
    ) -> WorkflowResult<CommitOutcome> {
        let pending = match std::mem::take(&mut self.state) {
            WorkflowState::Idle => return Err(WorkflowError::NoPendingAction),
            WorkflowState::AwaitingConfirmation(pending) => pending,
        };

        let status = pending.target_status();
        let checklist_count = pending.checklist_count();
        let comments = selection.comments_for(pending.unit_id, &pending.part_ids);

        let parts = fleet
            .commit(
                pending.unit_id,
                &pending.part_ids,
                status,
                checklist_count,
                &comments,
            )
            .inspect_err(|e| warn!("提交失败,回到 Idle: {}", e))?;

        selection.release(pending.unit_id, &pending.part_ids);
        selection.clear_checklist();

        Ok(CommitOutcome {
            unit_id: pending.unit_id,
            action: pending.action,
            status,
            checklist: pending.checklist,
            checklist_count,
            comments,
            parts,
        })
    }
}
