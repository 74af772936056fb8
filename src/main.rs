// ==========================================
// 电解槽拆解工作流 - Tauri 主入口
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use electrolyzer_disassembly::app::tauri_commands::*;
    use electrolyzer_disassembly::app::AppState;
    use electrolyzer_disassembly::config::ConfigManager;
    use electrolyzer_disassembly::logging;

    // 初始化日志系统（ELECTROLYZER_LOG_FORMAT=json 输出 JSON）
    match std::env::var("ELECTROLYZER_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("==================================================");
    tracing::info!("{}", electrolyzer_disassembly::APP_NAME);
    tracing::info!("系统版本: {}", electrolyzer_disassembly::VERSION);
    tracing::info!("==================================================");

    let manager = match ConfigManager::load_default() {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!("配置加载失败: {:#}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("使用配置: {}", manager.path().display());

    let app_state = match AppState::new(manager) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("启动Tauri应用...");

    let result = tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 查询
            // ==========================================
            get_workspace,
            get_fleet_overview,
            list_action_logs,
            list_action_logs_by_unit,

            // ==========================================
            // 电解槽检索与元件勾选
            // ==========================================
            set_search_term,
            select_unit,
            toggle_part,
            toggle_select_all,
            set_part_comment,

            // ==========================================
            // 检查项与切除备注
            // ==========================================
            toggle_checklist_item,
            clear_checklist,
            set_cut_out_comment,

            // ==========================================
            // 二阶段确认
            // ==========================================
            request_action,
            confirm_action,
            cancel_action,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!("Tauri应用运行失败: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{}", electrolyzer_disassembly::APP_NAME);
    println!("系统版本: {}", electrolyzer_disassembly::VERSION);
    println!("==================================================");
    println!();
    println!("此可执行文件需要启用 tauri-app 特性");
    println!("使用: cargo run --features tauri-app");
    println!();
    println!("或者使用库模式:");
    println!("use electrolyzer_disassembly::api::DisassemblyApi;");
}
