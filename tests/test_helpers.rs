// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的目录构建、会话初始化等功能
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use electrolyzer_disassembly::api::DisassemblyApi;
use electrolyzer_disassembly::domain::catalog::{Catalog, PartDescriptor, UnitDescriptor};
use electrolyzer_disassembly::domain::types::Criticality;

// ==========================================
// Catalog 构建器
// ==========================================

pub struct CatalogBuilder {
    units: Vec<UnitDescriptor>,
    parts: Vec<PartDescriptor>,
    checklist: Vec<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            parts: Vec::new(),
            checklist: Vec::new(),
        }
    }

    pub fn unit(mut self, id: u32, location: &str) -> Self {
        self.units.push(UnitDescriptor {
            id,
            tag: format!("ELY-{}", id),
            location_label: location.to_string(),
            installed_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status_label: "Idle".to_string(),
        });
        self
    }

    pub fn part(mut self, id: &str, name: &str) -> Self {
        let position = self.parts.len() as u32 + 1;
        self.parts.push(PartDescriptor {
            position,
            id: id.to_string(),
            name: name.to_string(),
            criticality: Criticality::Medium,
        });
        self
    }

    pub fn checklist_item(mut self, label: &str) -> Self {
        self.checklist.push(label.to_string());
        self
    }

    pub fn build(self) -> Catalog {
        Catalog::new(self.units, self.parts, self.checklist).expect("测试目录无效")
    }
}

/// 两台电解槽、三个元件、两个检查项的小目录
pub fn small_catalog() -> Catalog {
    CatalogBuilder::new()
        .unit(100, "Line A")
        .unit(200, "Line B")
        .part("P1", "Plate")
        .part("P2", "Gasket")
        .part("P3", "Stud")
        .checklist_item("Gasket surface")
        .checklist_item("Hydrogen Box")
        .build()
}

/// 使用内置目录的会话
pub fn builtin_api() -> DisassemblyApi {
    electrolyzer_disassembly::logging::init_test();
    DisassemblyApi::new(Catalog::builtin(), "tester").expect("内置目录无效")
}

/// 使用小目录的会话
pub fn small_api() -> DisassemblyApi {
    DisassemblyApi::new(small_catalog(), "tester").expect("测试目录无效")
}
