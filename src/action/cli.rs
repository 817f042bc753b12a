use std::io;
use std::path::PathBuf;
use clap::Parser;
use crate::config::config::{Cli, Mode, validate_file_patterns, validate_source_dir};
use crate::action::interactive::process_interactive_mode;
use crate::utils::utils::setup_logging;
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::conversion_adapter::ConversionAdapter;
use crate::models::conversion::ConverterSettings;
use crate::service::config_service::ConfigService;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    conversion_port.execute(config)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        // 驗證來源目錄
        validate_source_dir(&self.cli.source)?;
        // 驗證檔案模式
        validate_file_patterns(&self.cli.include, &self.cli.exclude)?;

        // 索引模式不會變更權限，不解析群組
        let group = if self.cli.no_group || self.cli.mode == Mode::Index {
            None
        } else {
            Some(self.cli.group.as_str())
        };
        let settings = ConverterSettings::new(
            self.cli.debug,
            &self.cli.file_mode,
            &self.cli.dir_mode,
            group,
        )?;

        Ok(AppConfig {
            source: PathBuf::from(&self.cli.source),
            mode: self.cli.mode,
            settings,
            converter: self.cli.converter.clone(),
            converter_args: self.cli.converter_arg.clone(),
            include: self.cli.include.clone(),
            exclude: self.cli.exclude.clone(),
            viewer: self.cli.viewer.clone(),
            index_output: self.cli.index_output.as_ref().map(PathBuf::from),
            no_progress: self.cli.no_progress,
        })
    }
}
