//! Recording fakes for the install ports.
//!
//! The fakes share one in-memory tree so that a download is visible to a
//! later `read_to_string` and an extraction can make directories appear.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sharedrt_core::{
    Architecture, Downloader, Extractor, FileSystem, InstallRequest, Platform, RuntimeKind,
    StandaloneInstaller,
};

pub const CACHED_FEED: &str = "https://cached.example.com/dotnet";
pub const UNCACHED_FEED: &str = "https://uncached.example.com/dotnet";

// ============================================================================
// Filesystem
// ============================================================================

#[derive(Default)]
struct FsState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    removed: Vec<PathBuf>,
    created: Vec<PathBuf>,
    next_temp: usize,
}

/// In-memory filesystem that records mutations.
#[derive(Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<FsState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    pub fn write_file(&self, path: impl AsRef<Path>, content: &str) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.as_ref().to_path_buf(), content.to_string());
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().files.contains_key(path.as_ref())
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().removed.clone()
    }

    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().created.clone()
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn dir_exists(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    async fn list_dirs_with_prefix(&self, path: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        if !state.dirs.contains(path) {
            return Err(anyhow!("directory not found: {}", path.display()));
        }
        Ok(state
            .dirs
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter(|dir| {
                dir.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(prefix))
            })
            .cloned()
            .collect())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(path);
        self.state.lock().unwrap().created.push(path.to_path_buf());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.removed.push(path.to_path_buf());
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| anyhow!("file not found: {}", path.display()))
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("file not found: {}", path.display()))
    }

    async fn temp_file_path(&self) -> Result<PathBuf> {
        let mut state = self.state.lock().unwrap();
        state.next_temp += 1;
        Ok(PathBuf::from(format!("/tmp/sharedrt-test-{}", state.next_temp)))
    }
}

// ============================================================================
// Downloader
// ============================================================================

/// Serves canned bodies by exact URL and records every request.
#[derive(Clone)]
pub struct FakeDownloader {
    fs: MemoryFs,
    bodies: Arc<Mutex<HashMap<String, String>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl FakeDownloader {
    pub fn new(fs: &MemoryFs) -> Self {
        Self {
            fs: fs.clone(),
            bodies: Arc::default(),
            failures: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn serve(&self, url: &str, body: &str) -> &Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
        self
    }

    pub fn fail(&self, url: &str, reason: &str) -> &Self {
        self.failures
            .lock()
            .unwrap()
            .insert(url.to_string(), reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_path_buf()));
        // Suspend like a real transfer so concurrent installs interleave.
        tokio::task::yield_now().await;

        if let Some(reason) = self.failures.lock().unwrap().get(url) {
            return Err(anyhow!("{reason}"));
        }

        let body = self
            .bodies
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("HTTP 404 for {url}"))?;
        self.fs.write_file(destination, &body);
        Ok(())
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Records extraction calls and creates the configured directories.
#[derive(Clone)]
pub struct FakeExtractor {
    fs: MemoryFs,
    produces: Arc<Mutex<Vec<PathBuf>>>,
    produces_under_destination: Arc<Mutex<Vec<PathBuf>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(PathBuf, PathBuf, bool)>>>,
}

impl FakeExtractor {
    pub fn new(fs: &MemoryFs) -> Self {
        Self {
            fs: fs.clone(),
            produces: Arc::default(),
            produces_under_destination: Arc::default(),
            failure: Arc::default(),
            calls: Arc::default(),
        }
    }

    /// Directory that appears once an extraction succeeds.
    pub fn produces(&self, dir: impl Into<PathBuf>) -> &Self {
        self.produces.lock().unwrap().push(dir.into());
        self
    }

    /// Path, relative to the extraction destination, that appears once an
    /// extraction succeeds.
    pub fn produces_relative(&self, dir: impl Into<PathBuf>) -> &Self {
        self.produces_under_destination.lock().unwrap().push(dir.into());
        self
    }

    pub fn fail_with(&self, reason: &str) -> &Self {
        *self.failure.lock().unwrap() = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, archive: &Path, destination: &Path, overwrite: bool) -> Result<()> {
        self.calls.lock().unwrap().push((
            archive.to_path_buf(),
            destination.to_path_buf(),
            overwrite,
        ));

        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(anyhow!(reason));
        }

        tokio::task::yield_now().await;

        for dir in self.produces.lock().unwrap().iter() {
            self.fs.add_dir(dir);
        }
        for dir in self.produces_under_destination.lock().unwrap().iter() {
            self.fs.add_dir(destination.join(dir));
        }
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// An installer wired to shared fakes.
pub struct Harness {
    pub fs: MemoryFs,
    pub downloader: FakeDownloader,
    pub extractor: FakeExtractor,
    pub installer: StandaloneInstaller,
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        let fs = MemoryFs::new();
        let downloader = FakeDownloader::new(&fs);
        let extractor = FakeExtractor::new(&fs);
        let installer = StandaloneInstaller::new(
            Arc::new(downloader.clone()),
            Arc::new(extractor.clone()),
            Arc::new(fs.clone()),
        );

        Self {
            fs,
            downloader,
            extractor,
            installer,
            lines: Arc::default(),
        }
    }

    /// A request against the test feeds that logs into `self.lines`.
    pub fn request(
        &self,
        install_dir: &str,
        platform: Platform,
        runtime: RuntimeKind,
        version: &str,
    ) -> InstallRequest {
        let lines = Arc::clone(&self.lines);
        InstallRequest::new(install_dir, platform, Architecture::X64, runtime, version)
            .with_cached_feed(CACHED_FEED)
            .with_uncached_feed(UNCACHED_FEED)
            .with_log_sink(move |line| lines.lock().unwrap().push(line.to_string()))
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn logged(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}
