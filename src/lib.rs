// ==========================================
// 电解槽拆解工作流 - 核心库
// ==========================================
// 技术栈: Tauri + Rust
// 系统定位: 元件拆解状态录入（人工二次确认后提交）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 工作流规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 会话接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Criticality, ElementAction, PartStatus};

// 领域实体
pub use domain::{ActionLog, ActionType, Catalog, PartDescriptor, PartRuntimeState, UnitDescriptor};

// 引擎
pub use engine::{
    ConfirmationWorkflow, FilterEngine, FleetRegistry, SelectionStore, WorkflowError,
    WorkflowResult,
};

// API
pub use api::{ApiError, ApiResult, DisassemblyApi, WorkspaceView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Electrolyzer Disassembly";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
