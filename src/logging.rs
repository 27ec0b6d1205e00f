use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Send tracing output to a file; stdout belongs to the terminal UI.
///
/// Returns the log path, or `None` when logging could not be set up.
pub fn init(explicit: Option<&Path>, configured: Option<&Path>, filter: &str, debug: bool) -> Option<PathBuf> {
    let path = log_path(explicit, configured, default_log_path())?;
    let file = open_log_file(&path)?;

    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), debug, filter);
    let env_filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(debug)
        .try_init()
        .ok()?;

    Some(path)
}

/// `--log-file`, then the config's `logging.file`, then the cache default
fn log_path(explicit: Option<&Path>, configured: Option<&Path>, fallback: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or(configured).map(Path::to_path_buf).or(fallback)
}

/// `RUST_LOG` wins over `--debug`, which wins over the configured filter
fn filter_directive<'a>(rust_log: Option<&'a str>, debug: bool, configured: &'a str) -> &'a str {
    match rust_log {
        Some(env) if !env.trim().is_empty() => env,
        _ if debug => "debug",
        _ => configured,
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(path).ok()
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("paramedit").join("paramedit.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_precedence() {
        let cli = Path::new("/tmp/cli.log");
        let conf = Path::new("/tmp/conf.log");
        let cache = PathBuf::from("/tmp/cache.log");

        assert_eq!(log_path(Some(cli), Some(conf), Some(cache.clone())), Some(cli.to_path_buf()));
        assert_eq!(log_path(None, Some(conf), Some(cache.clone())), Some(conf.to_path_buf()));
        assert_eq!(log_path(None, None, Some(cache.clone())), Some(cache));
        assert_eq!(log_path(None, None, None), None);
    }

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_directive(Some("paramedit=trace"), true, "warn"), "paramedit=trace");
        assert_eq!(filter_directive(None, true, "warn"), "debug");
        assert_eq!(filter_directive(None, false, "warn"), "warn");
        // An empty RUST_LOG counts as unset
        assert_eq!(filter_directive(Some(""), false, "warn"), "warn");
    }

    #[test]
    fn test_log_file_created_with_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("paramedit.log");
        assert!(open_log_file(&path).is_some());
        assert!(path.is_file());
    }

    #[test]
    fn test_unopenable_log_file_skips_subscriber() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("paramedit.log");
        assert!(open_log_file(&path).is_none());
        assert_eq!(init(Some(&path), None, "info", false), None);
    }
}
