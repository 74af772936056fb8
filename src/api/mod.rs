// ==========================================
// 电解槽拆解工作流 - API 层
// ==========================================
// 职责: 提供会话 API 接口,供 Tauri 命令调用
// ==========================================

pub mod error;
pub mod validator;
pub mod view;
pub mod workflow_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use validator::IntentValidator;
pub use view::{
    ChecklistItemView, CommentRowView, PartRowView, PendingActionView, SelectAllView,
    UnitListView, UnitPartsView, WorkspaceView,
};
pub use workflow_api::DisassemblyApi;
