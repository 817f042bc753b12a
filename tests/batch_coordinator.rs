use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use zoomify_batch::error::ZoomifyError;
use zoomify_batch::facade::batch_coordinator::BatchCoordinator;
use zoomify_batch::facade::traits::i_coordinator::BatchCoordinatorTrait;
use zoomify_batch::models::conversion::{ConversionJob, ConverterSettings, JobOutcome};
use zoomify_batch::service::directory::FsDirectoryService;
use zoomify_batch::service::index::HtmlIndexService;
use zoomify_batch::service::traits::i_service::TileConverterTrait;

/// 記錄每次呼叫，並像真正的轉換器一樣建立目標目錄
#[derive(Clone, Default)]
struct RecordingConverter {
    calls: Arc<Mutex<Vec<PathBuf>>>,
    seen_settings: Arc<Mutex<Vec<ConverterSettings>>>,
    fail_on: Option<String>,
}

impl RecordingConverter {
    fn failing_on(name: &str) -> Self {
        RecordingConverter {
            fail_on: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl TileConverterTrait for RecordingConverter {
    fn convert(&self, job: &ConversionJob, settings: &ConverterSettings) -> io::Result<()> {
        self.calls.lock().unwrap().push(job.input_path.clone());
        self.seen_settings.lock().unwrap().push(settings.clone());
        if self.fail_on.as_deref() == Some(job.file_name.as_str()) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt image"));
        }
        fs::create_dir(&job.target_dir)?;
        fs::write(job.target_dir.join("ImageProperties.xml"), "<IMAGE_PROPERTIES/>")
    }
}

fn coordinator(dir: &Path, converter: RecordingConverter) -> BatchCoordinator {
    BatchCoordinator::new(
        dir,
        ConverterSettings::default(),
        Box::new(FsDirectoryService::new()),
        Box::new(converter),
        Box::new(HtmlIndexService::default()),
    )
}

fn image_dir(files: &[&str], dirs: &[&str]) -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    for f in files {
        fs::write(tmp.path().join(f), b"image").unwrap();
    }
    for d in dirs {
        fs::create_dir(tmp.path().join(d)).unwrap();
    }
    tmp
}

#[test]
fn converts_only_unconverted_images() {
    let tmp = image_dir(&["photo1.jpg", "photo2.png"], &["photo1"]);
    let spy = RecordingConverter::default();
    let batch = coordinator(tmp.path(), spy.clone());

    let output = batch.process_all().unwrap();

    assert_eq!(spy.calls(), vec![tmp.path().join("photo2.png")]);
    assert!(tmp.path().join("photo2").is_dir());
    assert_eq!(output.converted, 1);
    assert_eq!(output.skipped, 1);
}

#[test]
fn second_run_is_a_no_op() {
    let tmp = image_dir(&["a.jpg", "b.tif", "c.png"], &[]);
    let spy = RecordingConverter::default();
    let batch = coordinator(tmp.path(), spy.clone());

    let first = batch.process_all().unwrap();
    let second = batch.process_all().unwrap();

    assert_eq!(first.converted, 3);
    assert_eq!(second.converted, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(spy.calls().len(), 3);
}

#[test]
fn dispatches_in_listing_order() {
    let tmp = image_dir(&["c.jpg", "a.jpg", "b.jpg"], &[]);
    let spy = RecordingConverter::default();
    coordinator(tmp.path(), spy.clone()).process_all().unwrap();

    let names: Vec<_> = spy
        .calls()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
}

#[test]
fn convert_one_skips_existing_target() {
    let tmp = image_dir(&["photo.jpg"], &["photo"]);
    let spy = RecordingConverter::default();
    let batch = coordinator(tmp.path(), spy.clone());

    let outcome = batch.convert_one("photo.jpg", tmp.path()).unwrap();

    assert_eq!(outcome, JobOutcome::Skipped);
    assert!(spy.calls().is_empty());
}

#[test]
fn convert_one_passes_settings_through() {
    let tmp = image_dir(&["scan.tif"], &[]);
    let spy = RecordingConverter::default();
    let settings = ConverterSettings::new(true, "0600", "0700", Some("4242")).unwrap();
    let batch = BatchCoordinator::new(
        tmp.path(),
        settings.clone(),
        Box::new(FsDirectoryService::new()),
        Box::new(spy.clone()),
        Box::new(HtmlIndexService::default()),
    );

    assert_eq!(batch.convert_one("scan.tif", tmp.path()).unwrap(), JobOutcome::Converted);
    assert_eq!(spy.seen_settings.lock().unwrap().as_slice(), &[settings]);
}

#[test]
fn multi_dot_names_lose_only_last_segment() {
    let tmp = image_dir(&["map.v2.png"], &["map"]);
    let spy = RecordingConverter::default();
    coordinator(tmp.path(), spy.clone()).process_all().unwrap();

    assert_eq!(spy.calls(), vec![tmp.path().join("map.v2.png")]);
    assert!(tmp.path().join("map.v2").is_dir());
}

#[test]
fn extensionless_file_counts_as_its_own_marker() {
    let tmp = image_dir(&["README"], &[]);
    let spy = RecordingConverter::default();

    let output = coordinator(tmp.path(), spy.clone()).process_all().unwrap();

    assert_eq!(output.skipped, 1);
    assert!(spy.calls().is_empty());
}

#[test]
fn first_failure_halts_the_batch() {
    let tmp = image_dir(&["a.jpg", "b.jpg", "c.jpg"], &[]);
    let spy = RecordingConverter::failing_on("b.jpg");
    let batch = coordinator(tmp.path(), spy.clone());

    let err = batch.process_all().unwrap_err();

    match err {
        ZoomifyError::Conversion { path, .. } => assert_eq!(path, tmp.path().join("b.jpg")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(spy.calls().len(), 2);
    assert!(!tmp.path().join("c").exists());
}

#[test]
fn patterns_narrow_the_batch() {
    let tmp = image_dir(&["a.jpg", "notes.txt", "draft_b.jpg"], &[]);
    let spy = RecordingConverter::default();
    let batch = coordinator(tmp.path(), spy.clone())
        .with_patterns(&["*.jpg".to_string()], &["draft_*".to_string()]);

    batch.process_all().unwrap();

    assert_eq!(spy.calls(), vec![tmp.path().join("a.jpg")]);
}

#[test]
fn unreadable_source_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("gone");
    let batch = coordinator(&missing, RecordingConverter::default());

    assert!(matches!(
        batch.list_all_entries(&missing),
        Err(ZoomifyError::DirectoryUnreadable { .. })
    ));
    assert!(matches!(batch.process_all(), Err(ZoomifyError::DirectoryUnreadable { .. })));
    assert!(matches!(batch.render_index(&missing), Err(ZoomifyError::DirectoryUnreadable { .. })));
}

#[test]
fn index_links_converted_outputs_only() {
    let tmp = image_dir(&["photo1.jpg", "photo2.jpg"], &["photo1"]);
    let batch = coordinator(tmp.path(), RecordingConverter::default());

    let html = batch.render_index(tmp.path()).unwrap();

    assert_eq!(html.matches("<a href=").count(), 1);
    assert!(html.contains("viewer.php?file=photo1&amp;path="));
    assert!(html.contains(">photo1</a><br />"));
    assert!(!html.contains("photo2"));
}

#[test]
fn listings_cover_the_directory() {
    let tmp = image_dir(&["b.jpg", "a.jpg"], &["a", "c"]);
    let batch = coordinator(tmp.path(), RecordingConverter::default());

    assert_eq!(batch.list_all_entries(tmp.path()).unwrap(), vec!["a", "a.jpg", "b.jpg", "c"]);
    assert_eq!(batch.list_files_only(tmp.path()).unwrap(), vec!["a.jpg", "b.jpg"]);
    assert_eq!(batch.list_directories_only(tmp.path()).unwrap(), vec!["a", "c"]);
}
