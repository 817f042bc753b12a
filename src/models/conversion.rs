use std::path::{Path, PathBuf};
use crate::error::ZoomifyResult;
use crate::models::permissions::{DirMode, FileMode, GroupId};
use crate::utils::utils::strip_extension;

/// 每次呼叫轉換器時共用的設定，建構後唯讀
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterSettings {
    pub debug: bool,
    pub file_mode: FileMode,
    pub dir_mode: DirMode,
    pub group: Option<GroupId>,
}

impl ConverterSettings {
    pub fn new(debug: bool, file_mode: &str, dir_mode: &str, group: Option<&str>) -> ZoomifyResult<Self> {
        Ok(ConverterSettings {
            debug,
            file_mode: file_mode.parse()?,
            dir_mode: dir_mode.parse()?,
            group: group.map(GroupId::resolve).transpose()?,
        })
    }
}

impl Default for ConverterSettings {
    fn default() -> Self {
        ConverterSettings {
            debug: false,
            file_mode: FileMode::default(),
            dir_mode: DirMode::default(),
            group: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub source_dir: PathBuf,
    pub file_name: String,
    pub target_name: String,
    pub target_dir: PathBuf,
}

impl ConversionJob {
    pub fn new(file_name: &str, source_dir: &Path) -> Self {
        let target_name = strip_extension(file_name);
        ConversionJob {
            input_path: source_dir.join(file_name),
            source_dir: source_dir.to_path_buf(),
            file_name: file_name.to_string(),
            target_dir: source_dir.join(&target_name),
            target_name,
        }
    }

    /// 目標目錄已存在即視為已轉換
    pub fn is_converted(&self) -> bool {
        self.target_dir.exists()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Converted,
    Skipped,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub source_dir: PathBuf,
    pub converted: usize,
    pub skipped: usize,
}
