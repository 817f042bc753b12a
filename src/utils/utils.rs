use std::io;
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))?;
    Ok(())
}

/// 去除檔名最後一個副檔名，例如 `file.ext` -> `file`
///
/// 名稱中只要出現 `.` 就視為有副檔名，並截斷於最後一個 `.`；
/// `archive.tar.gz` 只會去掉 `.gz`。沒有 `.` 時原樣返回。
pub fn strip_extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) => file_name[..idx].to_string(),
        None => file_name.to_string(),
    }
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, count: u64, current: &str) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { count as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("處理中：{}，速度：{:.1} 檔案/秒", current, speed));
        self.pb.set_position(count);
    }

    pub fn finish(&self, converted: usize, skipped: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，轉換 {} 個檔案，跳過 {} 個已轉換檔案，耗時 {:.1} 秒",
            converted,
            skipped,
            self.start.elapsed().as_secs_f64()
        ));
    }

    pub fn abandon(&self) {
        if !self.no_progress {
            self.pb.abandon();
        }
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    format!("^{}$", regex::escape(pattern).replace("\\*", ".*"))
}

pub fn create_regex_sets(include: &[String], exclude: &[String]) -> (RegexSet, RegexSet) {
    let include_patterns: Vec<_> = include.iter().map(|p| wildcard_to_regex(p)).collect();
    let exclude_patterns: Vec<_> = exclude.iter().map(|p| wildcard_to_regex(p)).collect();

    let include_set = RegexSet::new(&include_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的包含模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    let exclude_set = RegexSet::new(&exclude_patterns)
        .unwrap_or_else(|e| {
            log::warn!("無效的排除模式: {}，使用空集作為回退", e);
            RegexSet::empty()
        });

    (include_set, exclude_set)
}

pub fn is_name_selected(file_name: &str, include_set: &RegexSet, exclude_set: &RegexSet) -> bool {
    include_set.is_match(file_name) && !exclude_set.is_match(file_name)
}
