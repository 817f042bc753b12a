use std::io;
use std::path::PathBuf;
use crate::config::config::Mode;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::conversion::ConverterSettings;
use crate::models::permissions::GroupId;
use crate::service::converter::DEFAULT_CONVERTER;
use crate::service::index::DEFAULT_VIEWER;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：0644/0755、www-data 群組、vips 轉換器
pub struct DefaultConfigAdapter {
    source: String,
    mode: Mode,
}

impl DefaultConfigAdapter {
    pub fn new(source: String, mode: Mode) -> Self {
        DefaultConfigAdapter { source, mode }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        // 索引模式不會變更權限，不解析群組
        let group = match self.mode {
            Mode::Process => Some(GroupId::DEFAULT_NAME),
            Mode::Index => None,
        };
        let settings = ConverterSettings::new(false, "0644", "0755", group)?;
        Ok(AppConfig {
            source: PathBuf::from(&self.source),
            mode: self.mode,
            settings,
            converter: DEFAULT_CONVERTER.to_string(),
            converter_args: Vec::new(),
            include: vec!["*".to_string()],
            exclude: None,
            viewer: DEFAULT_VIEWER.to_string(),
            index_output: None,
            no_progress: false,
        })
    }
}
