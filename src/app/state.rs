// ==========================================
// 电解槽拆解工作流 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和会话API实例
// 说明: 会话状态只保存在内存中,重启后重新初始化
// ==========================================

use std::sync::{Mutex, MutexGuard};

use crate::api::workflow_api::DisassemblyApi;
use crate::config::config_manager::{ConfigManager, WorkflowConfig};
use crate::i18n;

pub use crate::config::config_manager::get_default_config_path;

/// 应用状态
///
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 配置文件路径
    pub config_path: String,

    /// 启动时加载的配置
    pub config: WorkflowConfig,

    /// 拆解会话API（命令串行访问）
    api: Mutex<DisassemblyApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 步骤
    /// 1. 应用语言
    /// 2. 加载目录
    /// 3. 初始化会话
    pub fn new(manager: ConfigManager) -> Result<Self, String> {
        let config = manager.config().clone();
        i18n::set_locale(&config.locale);

        let api = DisassemblyApi::from_config(&manager)
            .map_err(|e| format!("无法初始化拆解会话: {}", e))?;

        tracing::info!(
            "AppState初始化完成: config={}, locale={}, actor={}",
            manager.path().display(),
            config.locale,
            config.actor
        );

        Ok(Self {
            config_path: manager.path().display().to_string(),
            config,
            api: Mutex::new(api),
        })
    }

    /// 获取会话API
    ///
    /// 锁中毒时继续使用内部状态（会话状态在每个意图结束时保持一致）
    pub fn api(&self) -> MutexGuard<'_, DisassemblyApi> {
        self.api.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
