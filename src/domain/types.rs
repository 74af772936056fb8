// ==========================================
// 电解槽拆解工作流 - 领域类型定义
// ==========================================
// 职责: 元件关键度、元件状态、操作类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 关键度 (Criticality)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criticality {
    High,   // 高
    Medium, // 中
    Low,    // 低
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criticality::High => write!(f, "High"),
            Criticality::Medium => write!(f, "Medium"),
            Criticality::Low => write!(f, "Low"),
        }
    }
}

// ==========================================
// 元件状态 (Part Status)
// ==========================================
// 红线: 只允许 Available → InRepair / ReadyToAssemble 单向流转
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartStatus {
    Available,       // 可选
    InRepair,        // 已送修
    ReadyToAssemble, // 待装配
}

impl PartStatus {
    /// 是否为终态（已提交，不可再选择）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PartStatus::Available)
    }

    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            PartStatus::Available => "AVAILABLE",
            PartStatus::InRepair => "IN_REPAIR",
            PartStatus::ReadyToAssemble => "READY_TO_ASSEMBLE",
        }
    }
}

impl fmt::Display for PartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 元件操作 (Element Action)
// ==========================================
// Repair: 送修（需拆解清单）
// Assemble: 待装配（无需清单）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementAction {
    Repair,
    Assemble,
}

impl ElementAction {
    /// 操作提交后的目标状态
    pub fn target_status(&self) -> PartStatus {
        match self {
            ElementAction::Repair => PartStatus::InRepair,
            ElementAction::Assemble => PartStatus::ReadyToAssemble,
        }
    }

    /// 是否需要拆解清单
    pub fn requires_checklist(&self) -> bool {
        matches!(self, ElementAction::Repair)
    }

    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementAction::Repair => "REPAIR",
            ElementAction::Assemble => "ASSEMBLE",
        }
    }

    /// 从字符串解析（大小写不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "REPAIR" => Some(ElementAction::Repair),
            "ASSEMBLE" => Some(ElementAction::Assemble),
            _ => None,
        }
    }
}

impl fmt::Display for ElementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
