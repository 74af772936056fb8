// ==========================================
// 电解槽拆解工作流 - 操作日志领域模型
// ==========================================
// 红线: 所有提交必须记录
// 用途: 审计追踪（仅会话内保存）
// ==========================================

use crate::domain::types::ElementAction;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    // ===== 主键 =====
    pub action_id: String,        // 日志ID (UUID)
    pub action_type: ActionType,  // 操作类型
    pub action_ts: NaiveDateTime, // 操作时间戳
    pub actor: String,            // 操作人

    // ===== 操作对象 =====
    pub unit_id: u32,             // 电解槽编号
    pub part_ids: Vec<String>,    // 元件编号列表
    pub checklist: Vec<String>,   // 勾选的检查项

    // ===== 操作负载 =====
    pub payload_json: Option<JsonValue>, // 元件备注等 (JSON)
    pub detail: Option<String>,   // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    SendToRepair,    // 送修
    ReadyToAssemble, // 待装配
}

impl ActionType {
    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SendToRepair => "SendToRepair",
            ActionType::ReadyToAssemble => "ReadyToAssemble",
        }
    }
}

impl From<ElementAction> for ActionType {
    fn from(action: ElementAction) -> Self {
        match action {
            ElementAction::Repair => ActionType::SendToRepair,
            ElementAction::Assemble => ActionType::ReadyToAssemble,
        }
    }
}

impl ActionLog {
    /// 创建新的提交日志
    pub fn new_commit(
        actor: &str,
        unit_id: u32,
        action: ElementAction,
        part_ids: Vec<String>,
        checklist: Vec<String>,
        payload_json: Option<JsonValue>,
    ) -> Self {
        let action_type = ActionType::from(action);
        let detail = format!(
            "{}: 电解槽{} 元件[{}]",
            action_type.as_str(),
            unit_id,
            part_ids.join(", ")
        );

        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts: Utc::now().naive_utc(),
            actor: actor.to_string(),
            unit_id,
            part_ids,
            checklist,
            payload_json,
            detail: Some(detail),
        }
    }
}
