// ==========================================
// 电解槽拆解工作流 - 元件运行期状态
// ==========================================
// 红线: disabled == (status != Available)
// 红线: disabled 一旦为 true 即为终态
// 用途: FleetRegistry 独占写入
// ==========================================

use crate::domain::catalog::PartDescriptor;
use crate::domain::types::PartStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// PartRuntimeState - 单个电解槽上的单个元件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRuntimeState {
    // ===== 元件定义 =====
    #[serde(flatten)]
    pub part: PartDescriptor,

    // ===== 运行期状态 =====
    pub status: PartStatus,     // 当前状态
    pub disabled: bool,         // 是否禁用（已提交）
    pub checklist_count: u32,   // 送修时勾选的检查项数量
    pub comment: Option<String>, // 提交时快照的备注

    // ===== 审计字段 =====
    pub committed_at: Option<DateTime<Utc>>, // 提交时间
}

impl PartRuntimeState {
    /// 以可选状态初始化
    pub fn available(part: PartDescriptor) -> Self {
        Self {
            part,
            status: PartStatus::Available,
            disabled: false,
            checklist_count: 0,
            comment: None,
            committed_at: None,
        }
    }

    /// 元件编号
    pub fn id(&self) -> &str {
        &self.part.id
    }

    /// 是否仍可选择
    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }
}
