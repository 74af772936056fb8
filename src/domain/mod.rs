// ==========================================
// 电解槽拆解工作流 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、静态目录
// 红线: 不含工作流状态机逻辑
// ==========================================

pub mod action_log;
pub mod catalog;
pub mod part_state;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use catalog::{Catalog, PartDescriptor, UnitDescriptor};
pub use part_state::PartRuntimeState;
pub use types::{Criticality, ElementAction, PartStatus};
