// ==========================================
// 电解槽拆解工作流 - 会话 API
// ==========================================
// 职责: 接收操作人意图、维护会话状态、生成渲染视图
// 红线: 任一时刻最多一个待确认操作
// 红线: 已提交元件不可再勾选、不可再提交
// 红线: 检查项只在当前电解槽有勾选元件时保留
// ==========================================

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::IntentValidator;
use crate::api::view::{
    ChecklistItemView, CommentRowView, PartRowView, PendingActionView, SelectAllView,
    UnitListView, UnitPartsView, WorkspaceView,
};
use crate::config::config_manager::ConfigManager;
use crate::domain::action_log::ActionLog;
use crate::domain::catalog::{Catalog, UnitDescriptor};
use crate::domain::types::ElementAction;
use crate::engine::confirmation::{CommitOutcome, ConfirmationWorkflow, PendingAction, WorkflowState};
use crate::engine::filter::{ActiveUnitChange, FilterEngine};
use crate::engine::fleet_registry::FleetRegistry;
use crate::engine::selection::{SelectionStore, ToggleOutcome};

// ==========================================
// DisassemblyApi - 拆解会话 API
// ==========================================

/// 拆解会话API
///
/// 职责：
/// 1. 电解槽检索与当前电解槽协调
/// 2. 元件勾选、全选、备注
/// 3. 检查项与切除备注
/// 4. 送修/待装配二阶段确认
/// 5. 会话内操作日志
pub struct DisassemblyApi {
    catalog: Arc<Catalog>,
    validator: IntentValidator,
    fleet: FleetRegistry,
    selection: SelectionStore,
    filter: FilterEngine,
    workflow: ConfirmationWorkflow,
    cut_out_comment: String,
    feedback: Option<String>,
    action_logs: Vec<ActionLog>,
    actor: String,
}

impl DisassemblyApi {
    /// 创建新的会话
    ///
    /// 目录先校验;全部元件初始为可选,第一台电解槽为当前电解槽
    pub fn new(catalog: Catalog, actor: &str) -> ApiResult<Self> {
        catalog.validate()?;
        let catalog = Arc::new(catalog);
        let fleet = FleetRegistry::initialize(&catalog);
        let filter = FilterEngine::new(&catalog.units);

        info!(
            "拆解会话初始化: units={}, parts={}, actor={}",
            catalog.units.len(),
            catalog.parts.len(),
            actor
        );

        Ok(Self {
            validator: IntentValidator::new(catalog.clone()),
            catalog,
            fleet,
            selection: SelectionStore::new(),
            filter,
            workflow: ConfirmationWorkflow::new(),
            cut_out_comment: String::new(),
            feedback: None,
            action_logs: Vec::new(),
            actor: actor.to_string(),
        })
    }

    /// 按配置创建会话
    pub fn from_config(manager: &ConfigManager) -> ApiResult<Self> {
        let catalog = manager.load_catalog()?;
        Self::new(catalog, &manager.config().actor)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fleet(&self) -> &FleetRegistry {
        &self.fleet
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn workflow_state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.workflow.pending()
    }

    pub fn active_unit_id(&self) -> Option<u32> {
        self.filter.active_unit()
    }

    pub fn search_term(&self) -> &str {
        self.filter.search_term()
    }

    /// 最近一次意图失败的提示（成功后清空）
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn cut_out_comment(&self) -> &str {
        &self.cut_out_comment
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// 当前筛选结果
    pub fn visible_units(&self) -> Vec<&UnitDescriptor> {
        self.filter.visible(&self.catalog.units)
    }

    /// 当前电解槽的元件行
    pub fn active_parts(&self) -> Vec<PartRowView> {
        match self.active_unit_id() {
            Some(unit_id) => self.part_rows(unit_id),
            None => Vec::new(),
        }
    }

    /// 全部电解槽的元件概况（目录顺序）
    pub fn fleet_overview(&self) -> Vec<UnitPartsView> {
        self.catalog
            .units
            .iter()
            .map(|unit| UnitPartsView {
                unit: unit.clone(),
                parts: self.part_rows(unit.id),
            })
            .collect()
    }

    /// 全部勾选条目及其草稿备注（按电解槽编号升序）
    pub fn comment_rows(&self) -> Vec<CommentRowView> {
        self.selection
            .all_selected_entries()
            .into_iter()
            .map(|entry| CommentRowView {
                comment: self
                    .selection
                    .comment_for(entry.unit_id, &entry.part_id)
                    .unwrap_or_default()
                    .to_string(),
                unit_id: entry.unit_id,
                part_id: entry.part_id,
            })
            .collect()
    }

    /// 当前待确认提示
    pub fn pending_prompt(&self) -> Option<PendingActionView> {
        self.workflow.pending().map(PendingActionView::from_pending)
    }

    /// 当前电解槽是否可以请求指定操作
    pub fn can_request(&self, action: ElementAction) -> bool {
        let Some(unit_id) = self.active_unit_id() else {
            return false;
        };
        if !self.workflow.is_idle() || !self.selection.has_selection(unit_id) {
            return false;
        }
        !action.requires_checklist() || !self.selection.selected_checklist().is_empty()
    }

    /// 会话内操作日志（时间顺序）
    pub fn list_action_logs(&self) -> &[ActionLog] {
        &self.action_logs
    }

    /// 指定电解槽的操作日志
    pub fn list_action_logs_by_unit(&self, unit_id: u32) -> Vec<&ActionLog> {
        self.action_logs
            .iter()
            .filter(|log| log.unit_id == unit_id)
            .collect()
    }

    /// 工作台整体快照
    pub fn workspace(&self) -> WorkspaceView {
        let active_unit_id = self.active_unit_id();
        let has_selection = active_unit_id
            .map(|id| self.selection.has_selection(id))
            .unwrap_or(false);

        let select_all = match active_unit_id {
            Some(unit_id) => SelectAllView {
                enabled: !self.fleet.enabled_part_ids(unit_id).is_empty(),
                checked: self.selection.is_all_selected(&self.fleet, unit_id),
            },
            None => SelectAllView {
                enabled: false,
                checked: false,
            },
        };

        let selected_checklist = self.selection.selected_checklist();
        let checklist = self
            .catalog
            .checklist
            .iter()
            .map(|label| ChecklistItemView {
                label: label.clone(),
                selected: selected_checklist.contains(label),
                enabled: has_selection,
            })
            .collect();

        WorkspaceView {
            unit_list: UnitListView {
                search_term: self.search_term().to_string(),
                units: self.visible_units().into_iter().cloned().collect(),
                active_unit_id,
            },
            active_unit: active_unit_id
                .and_then(|id| self.catalog.find_unit(id))
                .cloned(),
            parts: self.active_parts(),
            select_all,
            comment_rows: self.comment_rows(),
            checklist,
            checklist_selected_count: selected_checklist.len(),
            cut_out_comment: self.cut_out_comment.clone(),
            can_request_repair: self.can_request(ElementAction::Repair),
            can_request_assemble: self.can_request(ElementAction::Assemble),
            pending_action: self.pending_prompt(),
            feedback: self.feedback.clone(),
        }
    }

    // ==========================================
    // 电解槽检索
    // ==========================================

    /// 更新搜索词（协调当前电解槽）
    pub fn set_search_term(&mut self, term: &str) -> ApiResult<ActiveUnitChange> {
        self.run_intent(|api| {
            let change = api.filter.set_search_term(&api.catalog.units, term);
            if change.changed() {
                info!(
                    "当前电解槽变更: {:?} -> {:?}",
                    change.previous, change.current
                );
            }
            Ok(change)
        })
    }

    /// 人工选择当前电解槽（重复选择当前电解槽为空操作）
    pub fn select_unit(&mut self, unit_id: u32) -> ApiResult<ActiveUnitChange> {
        self.run_intent(|api| {
            if api.active_unit_id() == Some(unit_id) {
                debug!("电解槽已是当前电解槽: {}", unit_id);
                return Ok(ActiveUnitChange {
                    previous: Some(unit_id),
                    current: Some(unit_id),
                });
            }
            let change = api.filter.select_unit(&api.catalog.units, unit_id)?;
            info!("选择电解槽: {:?} -> {}", change.previous, unit_id);
            Ok(change)
        })
    }

    // ==========================================
    // 元件勾选
    // ==========================================

    /// 切换当前电解槽上元件的勾选
    pub fn toggle_part(&mut self, part_id: &str) -> ApiResult<ToggleOutcome> {
        let unit_id = self.require_active_unit()?;
        self.toggle_part_on(unit_id, part_id)
    }

    /// 切换指定电解槽上元件的勾选
    pub fn toggle_part_on(&mut self, unit_id: u32, part_id: &str) -> ApiResult<ToggleOutcome> {
        self.run_intent(|api| {
            api.validator.validate_part(&api.fleet, unit_id, part_id)?;
            Ok(api.selection.toggle(&api.fleet, unit_id, part_id)?)
        })
    }

    /// 切换电解槽的全选
    ///
    /// # 返回
    /// - Ok(true): 全选
    /// - Ok(false): 全部取消
    pub fn toggle_select_all(&mut self, unit_id: u32) -> ApiResult<bool> {
        self.run_intent(|api| {
            api.validator.validate_unit(unit_id)?;
            if api.selection.is_all_selected(&api.fleet, unit_id) {
                api.selection.clear_all(&api.fleet, unit_id)?;
                Ok(false)
            } else {
                api.selection.select_all(&api.fleet, unit_id)?;
                Ok(true)
            }
        })
    }

    /// 勾选电解槽上全部可选元件
    pub fn select_all(&mut self, unit_id: u32) -> ApiResult<bool> {
        self.run_intent(|api| {
            api.validator.validate_unit(unit_id)?;
            Ok(api.selection.select_all(&api.fleet, unit_id)?)
        })
    }

    /// 清除电解槽上全部可选元件的勾选
    pub fn clear_all(&mut self, unit_id: u32) -> ApiResult<bool> {
        self.run_intent(|api| {
            api.validator.validate_unit(unit_id)?;
            Ok(api.selection.clear_all(&api.fleet, unit_id)?)
        })
    }

    /// 设置已勾选元件的草稿备注（空串删除）
    pub fn set_part_comment(&mut self, unit_id: u32, part_id: &str, text: &str) -> ApiResult<()> {
        self.run_intent(|api| {
            api.validator.validate_part(&api.fleet, unit_id, part_id)?;
            if !api.selection.is_selected(unit_id, part_id) {
                return Err(ApiError::CommentRequiresSelection {
                    unit_id,
                    part_id: part_id.to_string(),
                });
            }
            api.selection.set_comment(unit_id, part_id, text);
            Ok(())
        })
    }

    // ==========================================
    // 检查项与切除备注
    // ==========================================

    /// 切换检查项（当前电解槽须有勾选元件）
    ///
    /// # 返回
    /// - Ok(true): 已勾选
    /// - Ok(false): 已取消
    pub fn toggle_checklist_item(&mut self, label: &str) -> ApiResult<bool> {
        self.run_intent(|api| {
            api.validator.validate_checklist_item(label)?;
            api.require_active_selection()?;
            Ok(api.selection.toggle_checklist_item(label))
        })
    }

    /// 清空检查项
    pub fn clear_checklist(&mut self) -> ApiResult<()> {
        self.run_intent(|api| {
            api.selection.clear_checklist();
            Ok(())
        })
    }

    /// 设置切除备注（当前电解槽须有勾选元件）
    pub fn set_cut_out_comment(&mut self, text: &str) -> ApiResult<()> {
        self.run_intent(|api| {
            api.require_active_selection()?;
            api.cut_out_comment = text.to_string();
            Ok(())
        })
    }

    // ==========================================
    // 二阶段确认
    // ==========================================

    /// 请求对当前电解槽执行操作
    pub fn request_action(&mut self, action: ElementAction) -> ApiResult<PendingActionView> {
        let unit_id = self.require_active_unit()?;
        self.request_action_on(unit_id, action)
    }

    /// 按名称请求对当前电解槽执行操作（"REPAIR" / "ASSEMBLE",大小写不敏感）
    pub fn request_action_named(&mut self, action: &str) -> ApiResult<PendingActionView> {
        match ElementAction::parse(action) {
            Some(action) => self.request_action(action),
            None => self.run_intent(|_| Err(ApiError::UnknownAction(action.trim().to_string()))),
        }
    }

    /// 请求对指定电解槽执行操作
    pub fn request_action_on(
        &mut self,
        unit_id: u32,
        action: ElementAction,
    ) -> ApiResult<PendingActionView> {
        self.run_intent(|api| {
            api.validator.validate_unit(unit_id)?;
            let pending = api
                .workflow
                .request_action(&api.selection, unit_id, action)?;
            Ok(PendingActionView::from_pending(pending))
        })
    }

    /// 确认待确认操作并提交
    ///
    /// 成功后记录操作日志、清空检查项与切除备注
    pub fn confirm_action(&mut self) -> ApiResult<CommitOutcome> {
        self.run_intent(|api| {
            let outcome = api.workflow.confirm(&mut api.fleet, &mut api.selection)?;

            let cut_out_comment = std::mem::take(&mut api.cut_out_comment);
            let payload = json!({
                "comments": outcome.comments,
                "cut_out_comment": cut_out_comment,
                "checklist_count": outcome.checklist_count,
            });
            let log = ActionLog::new_commit(
                &api.actor,
                outcome.unit_id,
                outcome.action,
                outcome.part_ids(),
                outcome.checklist.clone(),
                Some(payload),
            );
            info!(
                "提交完成: unit_id={}, action={}, parts={}, action_id={}",
                outcome.unit_id,
                outcome.action,
                outcome.parts.len(),
                log.action_id
            );
            api.action_logs.push(log);

            Ok(outcome)
        })
    }

    /// 取消待确认操作（会话其余状态不变）
    pub fn cancel_action(&mut self) -> ApiResult<PendingAction> {
        self.run_intent(|api| Ok(api.workflow.cancel()?))
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 执行意图: 失败写入提示,成功清空提示,之后统一协调检查项
    fn run_intent<T>(
        &mut self,
        intent: impl FnOnce(&mut Self) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let result = intent(self);
        match &result {
            Ok(_) => self.feedback = None,
            Err(e) => {
                warn!("意图失败: code={}, {}", e.code(), e);
                self.feedback = Some(e.feedback_message());
            }
        }
        self.reconcile_checklist();
        result
    }

    /// 当前电解槽无勾选元件时清空检查项与切除备注
    fn reconcile_checklist(&mut self) {
        let has_selection = self
            .active_unit_id()
            .map(|id| self.selection.has_selection(id))
            .unwrap_or(false);
        if has_selection {
            return;
        }

        if !self.selection.selected_checklist().is_empty() || !self.cut_out_comment.is_empty() {
            debug!("当前电解槽无勾选元件,清空检查项与切除备注");
            self.selection.clear_checklist();
            self.cut_out_comment.clear();
        }
    }

    fn require_active_unit(&mut self) -> ApiResult<u32> {
        match self.active_unit_id() {
            Some(unit_id) => Ok(unit_id),
            None => {
                let err = ApiError::NoActiveUnit;
                self.feedback = Some(err.feedback_message());
                Err(err)
            }
        }
    }

    fn require_active_selection(&self) -> ApiResult<u32> {
        let unit_id = self
            .active_unit_id()
            .ok_or(ApiError::NoActiveUnit)?;
        if !self.selection.has_selection(unit_id) {
            return Err(crate::engine::error::WorkflowError::EmptySelection { unit_id }.into());
        }
        Ok(unit_id)
    }

    fn part_rows(&self, unit_id: u32) -> Vec<PartRowView> {
        self.fleet
            .parts(unit_id)
            .unwrap_or_default()
            .iter()
            .map(|state| {
                let checked = self.selection.is_selected(unit_id, state.id());
                PartRowView::from_state(state, checked)
            })
            .collect()
    }
}
