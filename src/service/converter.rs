use std::io;
use std::process::Command;
use log::{debug, info};
use crate::models::conversion::{ConversionJob, ConverterSettings};
use crate::service::traits::i_service::TileConverterTrait;
use crate::utils::permissions::apply_output_permissions;

pub const DEFAULT_CONVERTER: &str = "vips";

/// 透過 libvips 的 `dzsave --layout zoomify` 產生圖磚金字塔
pub struct VipsConverter {
    program: String,
    extra_args: Vec<String>,
}

impl VipsConverter {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        VipsConverter {
            program: program.into(),
            extra_args,
        }
    }

    pub fn build_command(&self, job: &ConversionJob, settings: &ConverterSettings) -> Command {
        // vips 只取輸出參數的目錄部分；目錄名稱完全由 --basename 決定，
        // 避免多點檔名被截斷或 `[...]` 被當成儲存選項
        let mut cmd = Command::new(&self.program);
        cmd.arg("dzsave")
            .arg(&job.input_path)
            .arg(job.source_dir.join("."))
            .args(["--layout", "zoomify"])
            .arg("--basename")
            .arg(&job.target_name);
        if settings.debug {
            cmd.arg("--vips-progress");
        }
        cmd.args(&self.extra_args);
        cmd
    }
}

impl Default for VipsConverter {
    fn default() -> Self {
        VipsConverter::new(DEFAULT_CONVERTER, Vec::new())
    }
}

impl TileConverterTrait for VipsConverter {
    fn convert(&self, job: &ConversionJob, settings: &ConverterSettings) -> io::Result<()> {
        let mut cmd = self.build_command(job, settings);
        if settings.debug {
            debug!("執行轉換器：{:?}", cmd);
        }

        let output = cmd.output().map_err(|e| {
            io::Error::new(e.kind(), format!("無法啟動轉換器 '{}': {}", self.program, e))
        })?;

        if settings.debug {
            debug!("轉換器輸出：{}", String::from_utf8_lossy(&output.stdout).trim());
            debug!("轉換器錯誤輸出：{}", String::from_utf8_lossy(&output.stderr).trim());
        }

        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "轉換器結束狀態 {}：{}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        let touched = apply_output_permissions(&job.target_dir, settings)?;
        info!("已產生圖磚：{}（{} 個項目）", job.target_dir.display(), touched);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use crate::models::permissions::{DirMode, FileMode};

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|a: &OsStr| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn command_targets_sibling_directory() {
        let job = ConversionJob::new("photo.jpg", Path::new("/srv/images"));
        let converter = VipsConverter::default();
        let cmd = converter.build_command(&job, &ConverterSettings::default());

        assert_eq!(cmd.get_program(), "vips");
        assert_eq!(
            args_of(&cmd),
            vec![
                "dzsave", "/srv/images/photo.jpg", "/srv/images/.", "--layout", "zoomify", "--basename", "photo",
            ]
        );
    }

    #[test]
    fn multi_dot_name_keeps_full_basename() {
        let job = ConversionJob::new("map.v2.png", Path::new("/srv/images"));
        let cmd = VipsConverter::default().build_command(&job, &ConverterSettings::default());

        let args = args_of(&cmd);
        assert_eq!(&args[5..7], ["--basename", "map.v2"]);
        assert!(!args.iter().any(|a| a.ends_with("/map.v2")));
    }

    #[test]
    fn bracketed_name_is_not_part_of_output_path() {
        let job = ConversionJob::new("scan[1].tif", Path::new("/srv/images"));
        let cmd = VipsConverter::default().build_command(&job, &ConverterSettings::default());

        let args = args_of(&cmd);
        assert_eq!(args[2], "/srv/images/.");
        assert_eq!(&args[5..7], ["--basename", "scan[1]"]);
    }

    #[test]
    fn debug_and_extra_args_are_appended() {
        let job = ConversionJob::new("scan.tif", Path::new("/data"));
        let converter = VipsConverter::new("/opt/vips/bin/vips", vec!["--tile-size".into(), "512".into()]);
        let settings = ConverterSettings { debug: true, ..ConverterSettings::default() };
        let cmd = converter.build_command(&job, &settings);

        assert_eq!(cmd.get_program(), "/opt/vips/bin/vips");
        let args = args_of(&cmd);
        assert_eq!(&args[7..], ["--vips-progress", "--tile-size", "512"]);
    }

    #[test]
    fn missing_program_fails_the_job() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("photo.jpg"), b"jpg").unwrap();
        let job = ConversionJob::new("photo.jpg", tmp.path());
        let converter = VipsConverter::new("zoomify-batch-missing-converter", Vec::new());

        let err = converter.convert(&job, &ConverterSettings::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!job.target_dir.exists());
    }

    #[test]
    fn failing_program_reports_exit_status() {
        let tmp = tempfile::tempdir().unwrap();
        let job = ConversionJob::new("photo.jpg", tmp.path());
        let converter = VipsConverter::new("false", Vec::new());

        assert!(converter.convert(&job, &ConverterSettings::default()).is_err());
    }

    // 模擬 vips：$3 為輸出位置（取其目錄），$7 為 --basename 的值
    fn fake_vips(dir: &Path) -> String {
        let bin = dir.join("fake-vips");
        fs::write(
            &bin,
            "#!/bin/sh\nout=\"$(dirname \"$3\")/$7\"\nmkdir -p \"$out/TileGroup0\" && echo tile > \"$out/TileGroup0/0-0-0.jpg\"\n",
        )
        .unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        bin.to_string_lossy().to_string()
    }

    #[test]
    fn successful_run_applies_permissions() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_vips(tmp.path());

        let images = tmp.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("photo.jpg"), b"jpg").unwrap();
        let job = ConversionJob::new("photo.jpg", &images);
        let settings = ConverterSettings {
            file_mode: FileMode::new(0o600).unwrap(),
            dir_mode: DirMode::new(0o700).unwrap(),
            ..ConverterSettings::default()
        };

        VipsConverter::new(bin, Vec::new()).convert(&job, &settings).unwrap();

        let tile = job.target_dir.join("TileGroup0").join("0-0-0.jpg");
        assert_eq!(fs::metadata(&tile).unwrap().permissions().mode() & 0o777, 0o600);
        assert_eq!(fs::metadata(&job.target_dir).unwrap().permissions().mode() & 0o777, 0o700);
    }

    #[test]
    fn multi_dot_run_creates_stripped_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_vips(tmp.path());

        let images = tmp.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("map.v2.png"), b"png").unwrap();
        let job = ConversionJob::new("map.v2.png", &images);

        VipsConverter::new(bin, Vec::new())
            .convert(&job, &ConverterSettings::default())
            .unwrap();

        assert!(images.join("map.v2").join("TileGroup0").is_dir());
        assert!(!images.join("map").exists());
    }
}
