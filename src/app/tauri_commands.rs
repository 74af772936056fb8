// ==========================================
// 电解槽拆解工作流 - Tauri 命令
// ==========================================
// 职责: Tauri 命令定义,连接前端与会话 API
// ==========================================

#![cfg(feature = "tauri-app")]

mod common;
mod workflow;

pub use workflow::*;
