use std::path::{Path, PathBuf};
use log::{debug, error, info};
use regex::RegexSet;
use crate::error::{ZoomifyError, ZoomifyResult};
use crate::facade::traits::i_coordinator::BatchCoordinatorTrait;
use crate::models::conversion::{BatchOutput, ConversionJob, ConverterSettings, JobOutcome};
use crate::service::traits::i_service::{DirectoryServiceTrait, IndexServiceTrait, TileConverterTrait};
use crate::utils::utils::{create_regex_sets, is_name_selected, ProgressManager};

/// 批次轉換協調器
///
/// 來源目錄在建構時指定並保存為欄位，轉換設定建構後唯讀，
/// 每次呼叫轉換器都傳入同一份設定。
pub struct BatchCoordinator {
    source_dir: PathBuf,
    settings: ConverterSettings,
    directory_service: Box<dyn DirectoryServiceTrait>,
    converter: Box<dyn TileConverterTrait>,
    index_service: Box<dyn IndexServiceTrait>,
    include_set: RegexSet,
    exclude_set: RegexSet,
    no_progress: bool,
}

impl BatchCoordinator {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        settings: ConverterSettings,
        directory_service: Box<dyn DirectoryServiceTrait>,
        converter: Box<dyn TileConverterTrait>,
        index_service: Box<dyn IndexServiceTrait>,
    ) -> Self {
        let (include_set, exclude_set) = create_regex_sets(&["*".to_string()], &[]);
        BatchCoordinator {
            source_dir: source_dir.into(),
            settings,
            directory_service,
            converter,
            index_service,
            include_set,
            exclude_set,
            no_progress: true,
        }
    }

    /// 限制 `process_all` 只處理符合包含模式且不符合排除模式的檔名
    pub fn with_patterns(mut self, include: &[String], exclude: &[String]) -> Self {
        let (include_set, exclude_set) = create_regex_sets(include, exclude);
        self.include_set = include_set;
        self.exclude_set = exclude_set;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.no_progress = !show;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    pub fn list_all_entries(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.directory_service.list_all_entries(dir)
    }

    pub fn list_directories_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.directory_service.list_directories_only(dir)
    }

    pub fn list_files_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.directory_service.list_files_only(dir)
    }
}

impl BatchCoordinatorTrait for BatchCoordinator {
    fn convert_one(&self, file_name: &str, source_dir: &Path) -> ZoomifyResult<JobOutcome> {
        let job = ConversionJob::new(file_name, source_dir);

        if job.is_converted() {
            debug!("跳過 {}（{} 已存在）", job.input_path.display(), job.target_dir.display());
            return Ok(JobOutcome::Skipped);
        }

        info!("轉換 {} -> {}", job.input_path.display(), job.target_dir.display());
        self.converter
            .convert(&job, &self.settings)
            .map_err(|source| ZoomifyError::Conversion {
                path: job.input_path.clone(),
                source,
            })?;
        Ok(JobOutcome::Converted)
    }

    fn process_all(&self) -> ZoomifyResult<BatchOutput> {
        let files: Vec<String> = self
            .list_files_only(&self.source_dir)?
            .into_iter()
            .filter(|name| is_name_selected(name, &self.include_set, &self.exclude_set))
            .collect();
        info!("開始批次轉換，來源目錄：{}，檔案數：{}", self.source_dir.display(), files.len());

        let progress = ProgressManager::new(files.len() as u64, self.no_progress);
        let mut output = BatchOutput {
            source_dir: self.source_dir.clone(),
            converted: 0,
            skipped: 0,
        };

        for (idx, file_name) in files.iter().enumerate() {
            progress.update(idx as u64, file_name);
            match self.convert_one(file_name, &self.source_dir) {
                Ok(JobOutcome::Converted) => output.converted += 1,
                Ok(JobOutcome::Skipped) => output.skipped += 1,
                Err(e) => {
                    progress.abandon();
                    error!("批次轉換中止於 {}：{}", file_name, e);
                    return Err(e);
                }
            }
        }

        progress.finish(output.converted, output.skipped);
        info!(
            "批次轉換完成，轉換 {} 個，跳過 {} 個：{}",
            output.converted,
            output.skipped,
            self.source_dir.display()
        );
        Ok(output)
    }

    fn render_index(&self, dir: &Path) -> ZoomifyResult<String> {
        let entries = self.list_directories_only(dir)?;
        Ok(self.index_service.render_index(dir, &entries))
    }
}
