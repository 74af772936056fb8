// ==========================================
// 电解槽拆解工作流 - 静态目录
// ==========================================
// 用途: 电解槽清单、元件定义、拆解检查清单
// 红线: 运行期只读,不可修改
// ==========================================

use crate::domain::types::Criticality;
use crate::engine::error::{WorkflowError, WorkflowResult};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ==========================================
// UnitDescriptor - 电解槽描述
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub id: u32,                  // 电解槽编号（唯一）
    pub tag: String,              // 显示代码
    pub location_label: String,   // 所在位置
    pub installed_date: NaiveDate, // 安装日期
    pub status_label: String,     // 状态描述（自由文本）
}

// ==========================================
// PartDescriptor - 元件定义
// ==========================================
// 所有电解槽共享同一份元件定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDescriptor {
    pub position: u32,            // 位置序号（从1开始,决定显示顺序）
    pub id: String,               // 元件编号（唯一）
    pub name: String,             // 元件名称
    pub criticality: Criticality, // 关键度
}

// ==========================================
// Catalog - 目录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub units: Vec<UnitDescriptor>,
    pub parts: Vec<PartDescriptor>,
    pub checklist: Vec<String>,
}

impl Catalog {
    /// 创建并校验目录
    pub fn new(
        units: Vec<UnitDescriptor>,
        parts: Vec<PartDescriptor>,
        checklist: Vec<String>,
    ) -> WorkflowResult<Self> {
        let catalog = Self {
            units,
            parts,
            checklist,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 从 JSON 文件加载目录
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取目录文件: {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("目录文件格式错误: {}", path.display()))?;
        catalog.validate()?;

        tracing::info!(
            "目录加载完成: path={}, units={}, parts={}, checklist={}",
            path.display(),
            catalog.units.len(),
            catalog.parts.len(),
            catalog.checklist.len()
        );
        Ok(catalog)
    }

    /// 校验目录完整性
    ///
    /// # 规则
    /// - 电解槽、元件不能为空
    /// - 电解槽编号唯一
    /// - 元件编号唯一,位置序号唯一且从1开始
    /// - 检查项唯一且非空
    pub fn validate(&self) -> WorkflowResult<()> {
        if self.units.is_empty() {
            return Err(WorkflowError::InvalidCatalog("电解槽列表为空".to_string()));
        }
        if self.parts.is_empty() {
            return Err(WorkflowError::InvalidCatalog("元件列表为空".to_string()));
        }

        let mut unit_ids = HashSet::new();
        for unit in &self.units {
            if !unit_ids.insert(unit.id) {
                return Err(WorkflowError::InvalidCatalog(format!(
                    "电解槽编号重复: {}",
                    unit.id
                )));
            }
        }

        let mut part_ids = HashSet::new();
        let mut positions = HashSet::new();
        for part in &self.parts {
            if part.id.trim().is_empty() {
                return Err(WorkflowError::InvalidCatalog("元件编号为空".to_string()));
            }
            if part.position == 0 {
                return Err(WorkflowError::InvalidCatalog(format!(
                    "元件位置序号必须从1开始: {}",
                    part.id
                )));
            }
            if !part_ids.insert(part.id.as_str()) {
                return Err(WorkflowError::InvalidCatalog(format!(
                    "元件编号重复: {}",
                    part.id
                )));
            }
            if !positions.insert(part.position) {
                return Err(WorkflowError::InvalidCatalog(format!(
                    "元件位置序号重复: {}",
                    part.position
                )));
            }
        }

        let mut labels = HashSet::new();
        for label in &self.checklist {
            if label.trim().is_empty() {
                return Err(WorkflowError::InvalidCatalog("检查项为空".to_string()));
            }
            if !labels.insert(label.as_str()) {
                return Err(WorkflowError::InvalidCatalog(format!(
                    "检查项重复: {}",
                    label
                )));
            }
        }

        Ok(())
    }

    /// 按编号查找电解槽
    pub fn find_unit(&self, unit_id: u32) -> Option<&UnitDescriptor> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    /// 按位置序号排序的元件定义
    pub fn parts_in_position_order(&self) -> Vec<PartDescriptor> {
        let mut parts = self.parts.clone();
        parts.sort_by_key(|p| p.position);
        parts
    }

    /// 检查项是否存在
    pub fn has_checklist_item(&self, label: &str) -> bool {
        self.checklist.iter().any(|item| item == label)
    }

    /// 内置目录（装配线现场数据）
    pub fn builtin() -> Self {
        let unit = |id: u32, status: &str, location: &str, (y, m, d): (i32, u32, u32)| {
            UnitDescriptor {
                id,
                tag: format!("ELY-{}", id),
                location_label: location.to_string(),
                installed_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                status_label: status.to_string(),
            }
        };
        let part = |position: u32, id: &str, name: &str, criticality: Criticality| PartDescriptor {
            position,
            id: id.to_string(),
            name: name.to_string(),
            criticality,
        };

        Self {
            units: vec![
                unit(6310, "Idle • Awaiting inspection", "Assembly Line A", (2024, 2, 9)),
                unit(6345, "In diagnostics loop", "Assembly Line B", (2024, 3, 12)),
                unit(6350, "Assembly pending", "Assembly Line C", (2024, 3, 18)),
                unit(6388, "Repair backlog • 2 items", "Maintenance Bay", (2024, 3, 26)),
                unit(6392, "Quality check next", "QA Cell", (2024, 3, 31)),
            ],
            parts: vec![
                part(1, "TC080", "Thermal Coupler Clamp", Criticality::High),
                part(2, "1869", "Cathode Housing Ring", Criticality::High),
                part(3, "BR307", "Buffer Rod", Criticality::Medium),
                part(4, "2765", "Hydrogen Gasket", Criticality::High),
                part(5, "BR-165", "Buffer Rod (Short)", Criticality::Medium),
                part(6, "1716", "Alignment Stud", Criticality::Low),
                part(7, "2013", "Seal Spacer", Criticality::Medium),
                part(8, "2015", "Seal Spacer (Wide)", Criticality::Medium),
                part(9, "2329", "Hydrogen Channel Plate", Criticality::High),
                part(10, "2341", "Hydrogen Box Cover", Criticality::High),
                part(11, "1863", "Catholyte Valve Insert", Criticality::High),
                part(12, "BR-201", "Buffer Rod (Long)", Criticality::Medium),
                part(13, "TA-134", "Torque Adapter", Criticality::Low),
            ],
            checklist: [
                "Anolyte Leaker",
                "Catholyte Leaker",
                "1-1.5\" Nozzle",
                "2\" Nozzle",
                "4\" Nozzle",
                "8\" Nozzle",
                "Cathode screens",
                "Cathode perimeter screens",
                "Gasket surface",
                "Dye-Check Coupling",
                "Outside Steel",
                "Hydrogen Chamber",
                "Hydrogen Box",
                "Hydrogen Channel",
                "Anode Studs / Alignment",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
