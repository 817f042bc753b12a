use std::path::Path;
use crate::error::ZoomifyResult;
use crate::models::conversion::{BatchOutput, JobOutcome};

// Facade 接口，負責協調批次轉換流程
pub trait BatchCoordinatorTrait: Send + Sync {
    /// 轉換單一檔案；輸出目錄已存在時跳過，不呼叫轉換器
    fn convert_one(&self, file_name: &str, source_dir: &Path) -> ZoomifyResult<JobOutcome>;

    /// 依列表順序處理來源目錄中的所有檔案，第一個轉換錯誤即中止
    fn process_all(&self) -> ZoomifyResult<BatchOutput>;

    /// 產生目錄中已轉換影像的 HTML 連結
    fn render_index(&self, dir: &Path) -> ZoomifyResult<String>;
}
