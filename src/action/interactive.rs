use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::config::Mode;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::conversion_adapter::ConversionAdapter;
use crate::models::conversion::ConverterSettings;
use crate::models::permissions::{DirMode, FileMode, GroupId};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::converter::DEFAULT_CONVERTER;
use crate::service::index::DEFAULT_VIEWER;
use crate::utils::utils::setup_logging;

fn prompt_error(what: &str, e: dialoguer::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}失敗: {}", what, e))
}

pub fn process_interactive_mode() -> io::Result<String> {
    setup_logging("info")?;
    println!("=== 歡迎使用互動模式 ===");
    let source = get_source_dir()?;
    let mode = get_mode()?;
    let use_default_config = get_default_config_option()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：檔案 0644，目錄 0755，群組 www-data，轉換器 vips");
        Box::new(DefaultConfigAdapter::new(source.clone(), mode))
    } else {
        Box::new(InteractiveConfigAdapter::new(source.clone(), mode))
    };

    let config = ConfigService::new(config_port).get_config()?;
    println!("實際使用的配置：{:#?}", config);

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    conversion_port.execute(config)
}

pub fn get_source_dir() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入來源影像目錄（例如：./images）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).is_dir() { Ok(()) } else { Err(format!("目錄 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| prompt_error("來源目錄輸入", e))
}

pub fn get_mode() -> io::Result<Mode> {
    let selected = Select::new()
        .with_prompt("選擇執行模式（使用方向鍵選擇，按 Enter 確認）")
        .items(&["轉換 - 轉換尚未處理的影像", "索引 - 列出已轉換影像的檢視器連結"])
        .default(0)
        .interact()
        .map_err(|e| prompt_error("執行模式選擇", e))?;
    Ok(if selected == 1 { Mode::Index } else { Mode::Process })
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（檔案 0644、目錄 0755、群組 www-data、vips 轉換器）")
        .default(true)
        .interact()
        .map_err(|e| prompt_error("預設配置選擇", e))
}

// 互動式配置適配器，逐項詢問轉換設定
pub struct InteractiveConfigAdapter {
    source: String,
    mode: Mode,
}

impl InteractiveConfigAdapter {
    pub fn new(source: String, mode: Mode) -> Self {
        InteractiveConfigAdapter { source, mode }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        // 索引模式不呼叫轉換器，轉換設定沿用預設且不解析群組
        if self.mode == Mode::Index {
            return DefaultConfigAdapter::new(self.source.clone(), Mode::Index).get_config();
        }

        let debug = Confirm::new()
            .with_prompt("是否啟用除錯輸出？")
            .default(false)
            .interact()
            .map_err(|e| prompt_error("除錯選項", e))?;

        let file_mode: String = Input::new()
            .with_prompt("輸出檔案權限（八進位）")
            .default(FileMode::default().to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                input.parse::<FileMode>().map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| prompt_error("檔案權限輸入", e))?;

        let dir_mode: String = Input::new()
            .with_prompt("輸出目錄權限（八進位）")
            .default(DirMode::default().to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                input.parse::<DirMode>().map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| prompt_error("目錄權限輸入", e))?;

        let group: String = Input::new()
            .with_prompt("輸出群組（留空表示不變更）")
            .default(GroupId::DEFAULT_NAME.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| prompt_error("群組輸入", e))?;

        let converter: String = Input::new()
            .with_prompt("轉換器程式")
            .default(DEFAULT_CONVERTER.to_string())
            .interact_text()
            .map_err(|e| prompt_error("轉換器輸入", e))?;

        let group = group.trim();
        let settings = ConverterSettings::new(
            debug,
            &file_mode,
            &dir_mode,
            if group.is_empty() { None } else { Some(group) },
        )?;

        Ok(AppConfig {
            source: PathBuf::from(&self.source),
            mode: self.mode,
            settings,
            converter,
            converter_args: Vec::new(),
            include: vec!["*".to_string()],
            exclude: None,
            viewer: DEFAULT_VIEWER.to_string(),
            index_output: None,
            no_progress: false,
        })
    }
}
