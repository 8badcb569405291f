use std::ffi::{c_char, CStr, CString};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap_sys::entry::clap_plugin_entry;
use clap_sys::factory::plugin_factory::{clap_plugin_factory, CLAP_PLUGIN_FACTORY_ID};
use libloading::Library;
use tracing::debug;

/// Represents a dynamically loaded CLAP library.
pub struct ClapLibrary {
    path: PathBuf,
    _lib: Library,
    entry: *const clap_plugin_entry,
    initialized: bool,
}

impl ClapLibrary {
    /// Load the shared library at `path` and run its entry `init`.
    ///
    /// # Safety
    /// Loading a library executes its initialisers; the caller must trust the binary.
    pub unsafe fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let lib = Library::new(&path_buf)
            .with_context(|| format!("Failed to load CLAP library: {}", path_buf.display()))?;
        let entry_sym: libloading::Symbol<*const clap_plugin_entry> =
            lib.get(b"clap_entry\0").with_context(|| {
                format!("CLAP library missing entry symbol: {}", path_buf.display())
            })?;
        let entry = *entry_sym;
        if entry.is_null() {
            bail!("CLAP library {} has null entry", path_buf.display());
        }

        let mut initialized = false;
        if let Some(init) = (*entry).init {
            let c_path = CString::new(path_buf.to_string_lossy().as_bytes())
                .with_context(|| format!("CLAP path contains NUL: {}", path_buf.display()))?;
            initialized = init(c_path.as_ptr());
            if !initialized {
                bail!("CLAP entry init failed for {}", path_buf.display());
            }
        }

        debug!(path = %path_buf.display(), "loaded CLAP library");
        Ok(Self {
            path: path_buf,
            _lib: lib,
            entry,
            initialized,
        })
    }

    pub fn factory(&self) -> Result<&clap_plugin_factory> {
        let get_factory = unsafe { (*self.entry).get_factory }
            .ok_or_else(|| anyhow::anyhow!("get_factory missing"))?;
        let ptr =
            unsafe { get_factory(CLAP_PLUGIN_FACTORY_ID.as_ptr()) } as *const clap_plugin_factory;
        if ptr.is_null() {
            bail!("CLAP library {} returned null factory", self.path.display());
        }
        Ok(unsafe { &*ptr })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ClapLibrary {
    fn drop(&mut self) {
        unsafe {
            if self.initialized {
                if let Some(deinit) = (*self.entry).deinit {
                    deinit();
                }
            }
        }
    }
}

/// Lightweight description of a plug-in discovered in a CLAP library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClapPluginDescriptor {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: String,
}

pub struct PluginDiscovery<'a> {
    factory: &'a clap_plugin_factory,
}

impl<'a> PluginDiscovery<'a> {
    pub fn new(factory: &'a clap_plugin_factory) -> Self {
        Self { factory }
    }

    pub fn list(self) -> Vec<ClapPluginDescriptor> {
        let Some(get_plugin_count) = self.factory.get_plugin_count else {
            return Vec::new();
        };
        let count = unsafe { get_plugin_count(self.factory) };
        let mut plugins = Vec::with_capacity(count as usize);
        for index in 0..count {
            let Some(get_plugin_descriptor) = self.factory.get_plugin_descriptor else {
                break;
            };
            unsafe {
                let descriptor = get_plugin_descriptor(self.factory, index);
                if descriptor.is_null() {
                    continue;
                }
                let descriptor = &*descriptor;
                plugins.push(ClapPluginDescriptor {
                    id: lossy_string(descriptor.id),
                    name: lossy_string(descriptor.name),
                    vendor: lossy_string(descriptor.vendor),
                    version: lossy_string(descriptor.version),
                });
            }
        }
        plugins
    }

    /// Pick the descriptor matching `id`, or the first one the factory exposes.
    pub fn select(self, id: Option<&str>) -> Option<ClapPluginDescriptor> {
        let mut plugins = self.list();
        match id {
            Some(id) => plugins.into_iter().find(|plugin| plugin.id == id),
            None if plugins.is_empty() => None,
            None => Some(plugins.swap_remove(0)),
        }
    }
}

pub(crate) fn lossy_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_string_handles_null() {
        assert_eq!(lossy_string(std::ptr::null()), "");
        assert_eq!(lossy_string(c"org.example.gain".as_ptr()), "org.example.gain");
    }
}
