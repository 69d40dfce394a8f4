use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// File extensions recognized as route manifests.
pub const MANIFEST_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Scanner that discovers route manifest files.
///
/// The `ManifestScanner` accepts either a single manifest file or a directory. Directories are
/// walked recursively, collecting every `.json`, `.yaml` and `.yml` file. The `target`
/// directory and hidden directories (those starting with `.`) are skipped.
///
/// # Example
///
/// ```no_run
/// use route_swagger::scanner::ManifestScanner;
/// use std::path::PathBuf;
///
/// let scanner = ManifestScanner::new(PathBuf::from("./routes"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} manifests", result.manifest_files.len());
/// ```
pub struct ManifestScanner {
    root_path: PathBuf,
}

/// Result of a scan.
pub struct ScanResult {
    /// Manifest paths, sorted so that mounting order is stable across runs
    pub manifest_files: Vec<PathBuf>,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl ManifestScanner {
    /// Creates a new `ManifestScanner` rooted at a file or directory.
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Collects all manifest files below the root.
    ///
    /// A root that is itself a file is returned as the only manifest, whatever its extension.
    /// Inaccessible entries are logged and recorded as warnings; scanning continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the root path does not exist.
    pub fn scan(&self) -> Result<ScanResult> {
        if !self.root_path.exists() {
            anyhow::bail!("Manifest path does not exist: {}", self.root_path.display());
        }

        if self.root_path.is_file() {
            return Ok(ScanResult {
                manifest_files: vec![self.root_path.clone()],
                warnings: Vec::new(),
            });
        }

        let mut manifest_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                let is_hidden = file_name.starts_with('.');
                let is_target = file_name == "target";

                !is_hidden && !is_target
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let is_manifest = path
                        .extension()
                        .and_then(|s| s.to_str())
                        .map(|ext| MANIFEST_EXTENSIONS.contains(&ext))
                        .unwrap_or(false);

                    if path.is_file() && is_manifest {
                        manifest_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        manifest_files.sort();

        Ok(ScanResult {
            manifest_files,
            warnings,
        })
    }
}
