//! Writes the results container into a standalone HTML page.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use seek_core::markup::escape_text;
use tempfile::NamedTempFile;

use super::ui::constants::APP_TITLE;
use super::ui::surface::ElementId;

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> io::Result<PathBuf> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        let dir = if self.dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.dir.as_path()
        };

        let target = dir.join(filename);
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}

pub struct ResultsExporter {
    writer: AtomicFileWriter,
    filename: String,
}

impl ResultsExporter {
    pub fn new(target: &Path) -> Self {
        let dir = target.parent().map(Path::to_path_buf).unwrap_or_default();
        let filename = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "shallowseek_results.html".to_string());
        Self {
            writer: AtomicFileWriter::new(dir),
            filename,
        }
    }

    /// `results_html` is inserted as-is; it comes from the escaping markup module.
    pub fn write_page(
        &self,
        query: Option<&str>,
        doc_count: &str,
        results_html: &str,
    ) -> io::Result<PathBuf> {
        let page = results_page(query, doc_count, results_html);
        self.writer.write(&self.filename, &page)
    }
}

fn results_page(query: Option<&str>, doc_count: &str, results_html: &str) -> String {
    let query = escape_text(query.unwrap_or_default());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}: {query}</title>
</head>
<body>
<header>
    <h1>{title}</h1>
    <div>Documents: <span id="{count_id}">{doc_count}</span></div>
    <form id="searchForm"><input id="searchInput" type="text" value="{query}" readonly></form>
    <input id="{file_id}" type="file" multiple disabled>
</header>
<div id="{results_id}">
{results_html}
</div>
</body>
</html>
"#,
        title = APP_TITLE,
        query = query,
        count_id = ElementId::DocCount.dom_id(),
        doc_count = escape_text(doc_count),
        file_id = ElementId::FileInput.dom_id(),
        results_id = ElementId::Results.dom_id(),
        results_html = results_html,
    )
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn atomic_write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(temp.path().to_path_buf());

        let first = writer.write("page.html", "hello").unwrap();
        assert_eq!(first.file_name().unwrap(), "page.html");
        assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

        let second = writer.write("page.html", "world").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    }

    #[test]
    fn creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("out").join("pages");
        let writer = AtomicFileWriter::new(nested.clone());

        writer.write("page.html", "x").unwrap();
        assert!(nested.join("page.html").is_file());
    }

    #[test]
    fn page_embeds_results_and_escapes_query() {
        let temp = TempDir::new().unwrap();
        let exporter = ResultsExporter::new(&temp.path().join("results.html"));

        let path = exporter
            .write_page(
                Some("<b>q</b>"),
                "42",
                r#"<div class="no-results">No results found</div>"#,
            )
            .unwrap();
        let page = fs::read_to_string(path).unwrap();

        assert!(page.contains(r#"<div class="no-results">No results found</div>"#));
        assert!(page.contains(r#"value="&lt;b&gt;q&lt;/b&gt;""#));
        assert!(page.contains(r#"<span id="docCount">42</span>"#));
    }
}
