use std::fmt;
use std::str::FromStr;
use nix::unistd::Group;
use crate::error::{ZoomifyError, ZoomifyResult};

const MAX_MODE: u32 = 0o7777;

// 解析八進位權限字串，接受 "0644"、"644"、"0o644"
fn parse_octal_mode(raw: &str) -> ZoomifyResult<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(ZoomifyError::InvalidMode(raw.to_string()));
    }
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| ZoomifyError::InvalidMode(raw.to_string()))?;
    if mode > MAX_MODE {
        return Err(ZoomifyError::InvalidMode(raw.to_string()));
    }
    Ok(mode)
}

/// 輸出檔案的權限位元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(u32);

impl FileMode {
    pub fn new(mode: u32) -> ZoomifyResult<Self> {
        if mode > MAX_MODE {
            return Err(ZoomifyError::InvalidMode(format!("{:o}", mode)));
        }
        Ok(FileMode(mode))
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        FileMode(0o644)
    }
}

impl FromStr for FileMode {
    type Err = ZoomifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_octal_mode(s).map(FileMode)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// 輸出目錄的權限位元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirMode(u32);

impl DirMode {
    pub fn new(mode: u32) -> ZoomifyResult<Self> {
        if mode > MAX_MODE {
            return Err(ZoomifyError::InvalidMode(format!("{:o}", mode)));
        }
        Ok(DirMode(mode))
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for DirMode {
    fn default() -> Self {
        DirMode(0o755)
    }
}

impl FromStr for DirMode {
    type Err = ZoomifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_octal_mode(s).map(DirMode)
    }
}

impl fmt::Display for DirMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// 輸出檔案所屬群組，建構時即解析為數字 gid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupId {
    name: String,
    gid: u32,
}

impl GroupId {
    pub const DEFAULT_NAME: &'static str = "www-data";

    /// 解析群組名稱或數字 gid
    pub fn resolve(name: &str) -> ZoomifyResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ZoomifyError::UnknownGroup(name.to_string()));
        }
        if let Ok(gid) = name.parse::<u32>() {
            return Ok(GroupId::from_gid(gid));
        }
        match Group::from_name(name) {
            Ok(Some(group)) => Ok(GroupId {
                name: name.to_string(),
                gid: group.gid.as_raw(),
            }),
            Ok(None) => Err(ZoomifyError::UnknownGroup(name.to_string())),
            Err(e) => {
                log::warn!("查詢群組 {} 失敗：{}", name, e);
                Err(ZoomifyError::UnknownGroup(name.to_string()))
            }
        }
    }

    pub fn from_gid(gid: u32) -> Self {
        GroupId { name: gid.to_string(), gid }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gid(&self) -> u32 {
        self.gid
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.gid)
    }
}
