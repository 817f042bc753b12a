use std::io;
use std::path::Path;
use crate::error::ZoomifyResult;
use crate::models::conversion::{ConversionJob, ConverterSettings};

// 目錄服務接口，負責列出目錄項目
pub trait DirectoryServiceTrait: Send + Sync {
    /// 列出目錄中除 `.` 與 `..` 以外的所有項目，依名稱排序
    /// # 回傳
    /// - 目錄無法開啟時返回 `DirectoryUnreadable`
    fn list_all_entries(&self, dir: &Path) -> ZoomifyResult<Vec<String>>;

    /// 只列出子目錄
    fn list_directories_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>>;

    /// 只列出非目錄項目
    fn list_files_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>>;
}

// 轉換器接口，負責將單一影像轉為 Zoomify 圖磚金字塔
pub trait TileConverterTrait: Send + Sync {
    /// 轉換 `job.input_path`，輸出至 `job.target_dir`
    /// # 參數
    /// - job: 單一轉換工作
    /// - settings: 除錯旗標、檔案/目錄權限與群組
    fn convert(&self, job: &ConversionJob, settings: &ConverterSettings) -> io::Result<()>;
}

// 索引服務接口，負責產生已轉換影像的 HTML 連結
pub trait IndexServiceTrait: Send + Sync {
    /// 依子目錄名稱產生 HTML 片段
    fn render_index(&self, dir: &Path, entries: &[String]) -> String;
}
