use std::io;
use std::path::PathBuf;
use crate::config::config::Mode;
use crate::models::conversion::ConverterSettings;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: PathBuf,
    pub mode: Mode,
    pub settings: ConverterSettings,
    pub converter: String,
    pub converter_args: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub viewer: String,
    pub index_output: Option<PathBuf>,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<String>;
}
