use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 批次轉換過程中可能發生的錯誤
#[derive(Error, Debug)]
pub enum ZoomifyError {
    /// 目錄無法開啟或讀取
    #[error("無法讀取目錄 '{}': {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 轉換器處理單一檔案失敗，會中止整個批次
    #[error("轉換失敗 '{}': {source}", path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("無效的權限模式: {0}")]
    InvalidMode(String),

    #[error("找不到群組: {0}")]
    UnknownGroup(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ZoomifyError {
    pub fn directory_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ZoomifyError::DirectoryUnreadable { path: path.into(), source }
    }
}

impl From<ZoomifyError> for io::Error {
    fn from(err: ZoomifyError) -> Self {
        match err {
            ZoomifyError::Io(e) => e,
            ZoomifyError::DirectoryUnreadable { ref source, .. } => {
                io::Error::new(source.kind(), err.to_string())
            }
            ZoomifyError::Conversion { ref source, .. } => {
                io::Error::new(source.kind(), err.to_string())
            }
            ZoomifyError::InvalidMode(_) | ZoomifyError::UnknownGroup(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
            }
        }
    }
}

pub type ZoomifyResult<T> = Result<T, ZoomifyError>;
