use std::fs;
use std::path::Path;
use log::warn;
use crate::error::{ZoomifyError, ZoomifyResult};
use crate::service::traits::i_service::DirectoryServiceTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryFilter {
    All,
    DirectoriesOnly,
    FilesOnly,
}

/// 直接讀取檔案系統的目錄服務，每次呼叫都重新讀取，不做快取
pub struct FsDirectoryService;

impl FsDirectoryService {
    pub fn new() -> Self {
        FsDirectoryService
    }

    fn list(&self, dir: &Path, filter: EntryFilter) -> ZoomifyResult<Vec<String>> {
        let entries = fs::read_dir(dir).map_err(|e| ZoomifyError::directory_unreadable(dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ZoomifyError::directory_unreadable(dir, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("略過非 UTF-8 檔名：{:?}（{}）", raw, dir.display());
                    continue;
                }
            };
            if name == "." || name == ".." {
                continue;
            }
            let keep = match filter {
                EntryFilter::All => true,
                EntryFilter::DirectoriesOnly => is_dir(&entry.path()),
                EntryFilter::FilesOnly => !is_dir(&entry.path()),
            };
            if keep {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

impl Default for FsDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

// 跟隨符號連結，指向目錄的連結也算目錄
fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

impl DirectoryServiceTrait for FsDirectoryService {
    fn list_all_entries(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.list(dir, EntryFilter::All)
    }

    fn list_directories_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.list(dir, EntryFilter::DirectoriesOnly)
    }

    fn list_files_only(&self, dir: &Path) -> ZoomifyResult<Vec<String>> {
        self.list(dir, EntryFilter::FilesOnly)
    }
}
