// ==========================================
// 电解槽拆解工作流 - 构建脚本
// ==========================================
// 仅在启用 tauri-app 特性时生成 Tauri 上下文
// ==========================================

fn main() {
    #[cfg(feature = "tauri-app")]
    tauri_build::build();
}
