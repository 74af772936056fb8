use serde::Serialize;

use crate::api::error::ApiResult;
use crate::api::workflow_api::DisassemblyApi;
use crate::app::state::AppState;

use super::common::{emit_frontend_event, map_api_error, to_json, WORKSPACE_CHANGED_EVENT};

// ==========================================
// 拆解工作流相关命令
// ==========================================

/// 执行意图并通知前端刷新工作台（失败时提示同样需要刷新）
fn apply_intent<T: Serialize>(
    app: &tauri::AppHandle,
    state: &AppState,
    intent_name: &str,
    intent: impl FnOnce(&mut DisassemblyApi) -> ApiResult<T>,
) -> Result<String, String> {
    let (result, workspace) = {
        let mut api = state.api();
        let result = intent(&mut *api);
        (result, api.workspace())
    };

    emit_frontend_event(
        app,
        WORKSPACE_CHANGED_EVENT,
        serde_json::json!({
            "intent": intent_name,
            "workspace": workspace,
        }),
    );

    let value = result.map_err(map_api_error)?;
    to_json(&value)
}

// ==========================================
// 查询
// ==========================================

/// 工作台快照
#[tauri::command(rename_all = "snake_case")]
pub fn get_workspace(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.api().workspace())
}

/// 全部电解槽元件概况
#[tauri::command(rename_all = "snake_case")]
pub fn get_fleet_overview(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.api().fleet_overview())
}

/// 会话内操作日志
#[tauri::command(rename_all = "snake_case")]
pub fn list_action_logs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.api().list_action_logs())
}

/// 指定电解槽的操作日志
#[tauri::command(rename_all = "snake_case")]
pub fn list_action_logs_by_unit(
    state: tauri::State<'_, AppState>,
    unit_id: u32,
) -> Result<String, String> {
    to_json(&state.api().list_action_logs_by_unit(unit_id))
}

// ==========================================
// 电解槽检索
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub fn set_search_term(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    term: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "set_search_term", |api| {
        api.set_search_term(&term)
    })
}

#[tauri::command(rename_all = "snake_case")]
pub fn select_unit(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    unit_id: u32,
) -> Result<String, String> {
    apply_intent(&app, &state, "select_unit", |api| api.select_unit(unit_id))
}

// ==========================================
// 元件勾选
// ==========================================

/// 切换当前电解槽上元件的勾选
#[tauri::command(rename_all = "snake_case")]
pub fn toggle_part(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    part_id: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "toggle_part", |api| api.toggle_part(&part_id))
}

#[tauri::command(rename_all = "snake_case")]
pub fn toggle_select_all(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    unit_id: u32,
) -> Result<String, String> {
    apply_intent(&app, &state, "toggle_select_all", |api| {
        api.toggle_select_all(unit_id)
    })
}

#[tauri::command(rename_all = "snake_case")]
pub fn set_part_comment(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    unit_id: u32,
    part_id: String,
    comment: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "set_part_comment", |api| {
        api.set_part_comment(unit_id, &part_id, &comment)
    })
}

// ==========================================
// 检查项与切除备注
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub fn toggle_checklist_item(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    label: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "toggle_checklist_item", |api| {
        api.toggle_checklist_item(&label)
    })
}

#[tauri::command(rename_all = "snake_case")]
pub fn clear_checklist(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<String, String> {
    apply_intent(&app, &state, "clear_checklist", |api| api.clear_checklist())
}

#[tauri::command(rename_all = "snake_case")]
pub fn set_cut_out_comment(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    comment: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "set_cut_out_comment", |api| {
        api.set_cut_out_comment(&comment)
    })
}

// ==========================================
// 二阶段确认
// ==========================================

/// 请求操作（action: "REPAIR" / "ASSEMBLE"）
#[tauri::command(rename_all = "snake_case")]
pub fn request_action(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    action: String,
) -> Result<String, String> {
    apply_intent(&app, &state, "request_action", |api| {
        api.request_action_named(&action)
    })
}

#[tauri::command(rename_all = "snake_case")]
pub fn confirm_action(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<String, String> {
    apply_intent(&app, &state, "confirm_action", |api| api.confirm_action())
}

#[tauri::command(rename_all = "snake_case")]
pub fn cancel_action(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<String, String> {
    apply_intent(&app, &state, "cancel_action", |api| api.cancel_action())
}
