use std::io;
use log::info;
use crate::config::config::Mode;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::facade::batch_coordinator::BatchCoordinator;
use crate::facade::traits::i_coordinator::BatchCoordinatorTrait;
use crate::service::converter::VipsConverter;
use crate::service::directory::FsDirectoryService;
use crate::service::index::{write_index_page, HtmlIndexService};

// 依配置組裝協調器並執行
pub struct ConversionAdapter;

impl ConversionAdapter {
    pub fn build_coordinator(config: &AppConfig) -> BatchCoordinator {
        BatchCoordinator::new(
            config.source.clone(),
            config.settings.clone(),
            Box::new(FsDirectoryService::new()),
            Box::new(VipsConverter::new(config.converter.clone(), config.converter_args.clone())),
            Box::new(HtmlIndexService::new(config.viewer.clone())),
        )
        .with_patterns(&config.include, config.exclude.as_deref().unwrap_or(&[]))
        .with_progress(!config.no_progress)
    }
}

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<String> {
        let coordinator = Self::build_coordinator(&config);

        match config.mode {
            Mode::Process => {
                let output = coordinator.process_all()?;
                Ok(format!(
                    "轉換 {} 個，跳過 {} 個，輸出位於：{}",
                    output.converted,
                    output.skipped,
                    output.source_dir.display()
                ))
            }
            Mode::Index => {
                let fragment = coordinator.render_index(&config.source)?;
                match &config.index_output {
                    Some(path) => {
                        write_index_page(&fragment, &config.source, path)?;
                        Ok(format!("索引頁位於：{}", path.display()))
                    }
                    None => {
                        info!("輸出索引片段，大小：{} 位元組", fragment.len());
                        print!("{}", fragment);
                        Ok(format!("已列出 {} 的轉換結果", config.source.display()))
                    }
                }
            }
        }
    }
}
