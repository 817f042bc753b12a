use std::fs;
use std::io;
use std::os::unix::fs::{chown, PermissionsExt};
use std::path::Path;
use log::{debug, warn};
use walkdir::WalkDir;
use crate::models::conversion::ConverterSettings;

/// 遞迴設定轉換輸出的權限與群組
///
/// 目錄（含根目錄）套用 `dir_mode`，檔案套用 `file_mode`。
/// 變更群組失敗只記錄警告，不視為轉換失敗。
pub fn apply_output_permissions(root: &Path, settings: &ConverterSettings) -> io::Result<usize> {
    let mut touched = 0;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("走訪輸出目錄失敗: {}", e))
        })?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            continue;
        }
        let mode = if file_type.is_dir() {
            settings.dir_mode.bits()
        } else {
            settings.file_mode.bits()
        };
        fs::set_permissions(entry.path(), fs::Permissions::from_mode(mode))?;

        if let Some(group) = &settings.group {
            if let Err(e) = chown(entry.path(), None, Some(group.gid())) {
                warn!("無法將 {} 的群組設為 {}：{}", entry.path().display(), group, e);
            }
        }
        touched += 1;
    }
    debug!(
        "已設定 {} 個項目的權限（檔案 {}，目錄 {}）：{}",
        touched,
        settings.file_mode,
        settings.dir_mode,
        root.display()
    );
    Ok(touched)
}
