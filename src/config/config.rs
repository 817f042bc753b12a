use clap::{Parser, ValueEnum};
use std::io;
use std::path::Path;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "zoomify_batch",
    about = "批次將目錄中的影像轉換為 Zoomify 圖磚金字塔",
    long_about = "掃描來源目錄中的每個檔案，若尚未存在同名（去除副檔名）的輸出目錄，就呼叫外部轉換器（預設為 vips dzsave --layout zoomify）產生圖磚，並設定輸出的權限與群組。\n--mode index 會列出已轉換的影像並產生檢視器連結。\n不帶任何參數執行則進入互動模式。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 來源影像目錄
    pub source: String,
    #[arg(long, default_value = "process")]
    pub mode: Mode,
    #[arg(long, default_value_t = false)]
    pub debug: bool,
    #[arg(long, default_value = "0644")]
    pub file_mode: String,
    #[arg(long, default_value = "0755")]
    pub dir_mode: String,
    #[arg(long, default_value = "www-data")]
    pub group: String,
    /// 不變更輸出的群組
    #[arg(long, default_value_t = false)]
    pub no_group: bool,
    #[arg(long, default_value = "vips")]
    pub converter: String,
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub converter_arg: Vec<String>,
    #[arg(long, default_value = "*", value_delimiter = ',')]
    pub include: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    #[arg(long, default_value = "viewer.php")]
    pub viewer: String,
    #[arg(long)]
    pub index_output: Option<String>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum Mode {
    /// 轉換尚未處理的影像
    Process,
    /// 輸出已轉換影像的 HTML 連結
    Index,
}

pub fn validate_source_dir(source: &str) -> io::Result<&Path> {
    let path = Path::new(source);
    if !path.is_dir() {
        log::error!("來源目錄不存在或不是目錄：{}", source);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("來源目錄 '{}' 不存在或不是目錄", source)
        ));
    }
    Ok(path)
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> io::Result<()> {
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的包含模式: {}", pattern)));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的排除模式: {}", pattern)));
            }
        }
    }
    Ok(())
}
