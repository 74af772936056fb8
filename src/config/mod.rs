// ==========================================
// 电解槽拆解工作流 - 配置层
// ==========================================
// 职责: 语言、操作人、目录来源
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{get_default_config_path, ConfigManager, WorkflowConfig};
