use std::path::PathBuf;

/// Where and how reports are written.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory receiving one page per procedure plus the index.
    pub output_dir: PathBuf,
    /// Stylesheet href linked from every page. Not generated here.
    pub stylesheet: String,
    /// File name of the index page, also the target of each page's
    /// "Index" link.
    pub index_file: String,
    /// Extension of per-procedure pages, including the dot.
    pub extension: String,
    /// Write pages on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("piggly/reports"),
            stylesheet: "piggly.css".to_string(),
            index_file: "index.html".to_string(),
            extension: ".html".to_string(),
            parallel: true,
        }
    }
}

impl ReportConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Default::default()
        }
    }
}
