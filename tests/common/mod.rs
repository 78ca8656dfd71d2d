// tests/common/mod.rs

#![allow(dead_code)]

use std::fs;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Mutex;

use anyhow::Result;
use patternpipe::config::ConfigFile;
use patternpipe::engine::PatternEngine;

/// Config with every section at its defaults.
pub fn default_config() -> ConfigFile {
    toml::from_str("").expect("empty config must deserialize with defaults")
}

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("creating parent dirs");
    }
    fs::write(path, contents).expect("writing test file");
}

/// Read a file as bytes, panicking with the path on failure.
pub fn read_file(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| panic!("reading {:?}: {e}", path))
}

/// Engine fake recording the clean flags its build operation was called
/// with; every other operation succeeds without side effects.
#[derive(Default)]
pub struct FakeEngine {
    pub builds: Mutex<Vec<bool>>,
}

impl FakeEngine {
    pub fn build_count(&self) -> usize {
        self.builds.lock().unwrap().len()
    }
}

impl PatternEngine for FakeEngine {
    fn build(&self, clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        self.builds.lock().unwrap().push(clean);
        Box::pin(async { Ok(()) })
    }

    fn patterns_only(&self, _clean: bool) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn version(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn help(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn list_starter_kits(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn load_starter_kit<'a>(
        &'a self,
        _kit: &'a str,
        _clean: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }

    fn install_plugin<'a>(
        &'a self,
        _plugin: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }

    fn template_extensions(&self) -> Vec<String> {
        vec![".mustache".to_string()]
    }
}
