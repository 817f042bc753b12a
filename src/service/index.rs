use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use chrono::Local;
use log::info;
use url::form_urlencoded;
use crate::service::traits::i_service::IndexServiceTrait;

pub const DEFAULT_VIEWER: &str = "viewer.php";

const PAGE_TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{{TITLE}}</title>
</head>
<body>
<h1>{{TITLE}}</h1>
{{LINKS}}<p><small>{{GENERATED_AT}}</small></p>
</body>
</html>
";

/// 產生指向 Zoomify 檢視器的 HTML 連結
pub struct HtmlIndexService {
    viewer: String,
}

impl HtmlIndexService {
    pub fn new(viewer: impl Into<String>) -> Self {
        HtmlIndexService { viewer: viewer.into() }
    }

    fn link(&self, name: &str, dir: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("file", name)
            .append_pair("path", dir)
            .finish();
        let href = format!("{}?{}", self.viewer, query);
        format!(
            "<a href=\"{}\">{}</a><br />\n",
            html_escape::encode_double_quoted_attribute(&href),
            html_escape::encode_text(name)
        )
    }
}

impl Default for HtmlIndexService {
    fn default() -> Self {
        HtmlIndexService::new(DEFAULT_VIEWER)
    }
}

impl IndexServiceTrait for HtmlIndexService {
    fn render_index(&self, dir: &Path, entries: &[String]) -> String {
        let dir = dir.to_string_lossy();
        entries.iter().map(|name| self.link(name, &dir)).collect()
    }
}

/// 將索引片段包成完整頁面並寫入檔案
pub fn write_index_page(fragment: &str, source_dir: &Path, output_path: &Path) -> io::Result<()> {
    let title = format!("Zoomify: {}", source_dir.display());
    let html = PAGE_TEMPLATE
        .replace("{{TITLE}}", &html_escape::encode_text(&title))
        .replace("{{GENERATED_AT}}", &Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .replace("{{LINKS}}", fragment);

    let file = fs::File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    info!("生成索引頁：{}，大小：{} 位元組", output_path.display(), html.len());
    Ok(())
}
