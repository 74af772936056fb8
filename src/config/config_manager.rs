// ==========================================
// 电解槽拆解工作流 - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、目录来源解析
// 存储: JSON 文件（缺失时使用默认配置）
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::i18n;

/// 配置目录名
const CONFIG_DIR_NAME: &str = "electrolyzer-disassembly";
/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// WorkflowConfig - 工作流配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// 界面语言（"en" / "zh-CN"）
    pub locale: String,
    /// 操作人（写入操作日志）
    pub actor: String,
    /// 目录文件路径（None 使用内置目录）
    pub catalog_path: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            actor: "operator".to_string(),
            catalog_path: None,
        }
    }
}

impl WorkflowConfig {
    /// 校验配置
    pub fn validate(&self) -> anyhow::Result<()> {
        if !i18n::is_supported_locale(&self.locale) {
            bail!(
                "不支持的语言: {}（可选: {}）",
                self.locale,
                i18n::SUPPORTED_LOCALES.join(", ")
            );
        }
        if self.actor.trim().is_empty() {
            bail!("操作人不能为空");
        }
        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
    config: WorkflowConfig,
}

impl ConfigManager {
    /// 从指定路径加载配置
    ///
    /// 文件不存在时使用默认配置;文件存在但格式错误时报错
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
            serde_json::from_str::<WorkflowConfig>(&raw)
                .with_context(|| format!("配置文件格式错误: {}", path.display()))?
        } else {
            tracing::info!("配置文件不存在,使用默认配置: {}", path.display());
            WorkflowConfig::default()
        };
        config.validate()?;

        Ok(Self { path, config })
    }

    /// 从默认路径加载配置
    pub fn load_default() -> anyhow::Result<Self> {
        Self::load(get_default_config_path())
    }

    /// 配置文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 当前配置
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// 加载目录
    ///
    /// 相对路径以配置文件所在目录为基准
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.config.catalog_path {
            None => {
                tracing::info!("使用内置目录");
                Ok(Catalog::builtin())
            }
            Some(catalog_path) => {
                let resolved = if catalog_path.is_absolute() {
                    catalog_path.clone()
                } else {
                    self.path
                        .parent()
                        .map(|dir| dir.join(catalog_path))
                        .unwrap_or_else(|| catalog_path.clone())
                };
                Catalog::from_json_file(resolved)
            }
        }
    }

    /// 保存配置
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("无法创建配置目录: {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("无法写入配置文件: {}", self.path.display()))?;
        Ok(())
    }
}

/// 获取默认配置文件路径
///
/// 优先使用系统配置目录,不可用时回退到当前目录
pub fn get_default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkflowConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.actor, "operator");
        assert!(config.catalog_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_不支持的语言() {
        let config = WorkflowConfig {
            locale: "fr".to_string(),
            ..WorkflowConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_使用默认值() {
        let config: WorkflowConfig = serde_json::from_str(r#"{"actor":"Diso"}"#).unwrap();
        assert_eq!(config.actor, "Diso");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_default_config_path() {
        let path = get_default_config_path();
        assert!(path.ends_with("config.json"));
    }
}
