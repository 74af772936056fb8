// ==========================================
// 电解槽拆解工作流 - 引擎层
// ==========================================
// 职责: 选择与状态转换工作流
//   FleetRegistry       机群状态（唯一写入入口 commit）
//   SelectionStore      选择暂存区
//   ConfirmationWorkflow 二阶段确认
//   FilterEngine        筛选与当前电解槽协调
// 红线: 单线程事件驱动,每个意图执行完毕后才处理下一个
// ==========================================

pub mod confirmation;
pub mod error;
pub mod filter;
pub mod fleet_registry;
pub mod selection;

// 重导出核心引擎
pub use confirmation::{CommitOutcome, ConfirmationWorkflow, PendingAction, WorkflowState};
pub use error::{WorkflowError, WorkflowResult};
pub use filter::{filter_units, reconcile_active, ActiveUnitChange, FilterEngine};
pub use fleet_registry::FleetRegistry;
pub use selection::{SelectionEntry, SelectionStore, ToggleOutcome};
