use crate::api::SnipzApi;
use crate::init::SnipzPaths;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Held so the directory outlives the test.
    pub _temp_dir: TempDir,
    pub paths: SnipzPaths,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            paths: SnipzPaths::new(&root),
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn backend(&self) -> FsBackend {
        FsBackend::new(&self.paths.catalog_file)
    }

    pub fn api(&self) -> SnipzApi<FsBackend> {
        SnipzApi::open(self.paths.clone()).expect("failed to open catalog")
    }
}
