use std::ffi::c_void;

use clap_sys::ext::state::{clap_plugin_state, CLAP_EXT_STATE};
use clap_sys::plugin::clap_plugin;
use clap_sys::stream::{clap_istream, clap_ostream};
use thiserror::Error;

use crate::instance::ClapInstance;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("plug-in does not implement clap.state")]
    Unsupported,
    #[error("plug-in failed to save its state")]
    SaveRejected,
    #[error("plug-in rejected the supplied state")]
    LoadRejected,
}

/// Thin wrapper over the plug-in's `clap.state` extension.
#[derive(Clone, Copy)]
pub struct ClapState {
    plugin: *const clap_plugin,
    state: *const clap_plugin_state,
}

impl ClapState {
    pub fn from_instance(instance: &ClapInstance) -> Option<Self> {
        let state = instance.extension(CLAP_EXT_STATE) as *const clap_plugin_state;
        if state.is_null() {
            return None;
        }
        Some(Self {
            plugin: instance.as_raw(),
            state,
        })
    }

    pub fn save(&self) -> Result<Vec<u8>, StateError> {
        let save = unsafe { (*self.state).save }.ok_or(StateError::Unsupported)?;
        let mut buffer = Vec::new();
        let stream = clap_ostream {
            ctx: &mut buffer as *mut Vec<u8> as *mut c_void,
            write: Some(write_to_vec),
        };
        if unsafe { save(self.plugin, &stream) } {
            Ok(buffer)
        } else {
            Err(StateError::SaveRejected)
        }
    }

    pub fn load(&self, data: &[u8]) -> Result<(), StateError> {
        let load = unsafe { (*self.state).load }.ok_or(StateError::Unsupported)?;
        let mut reader = SliceReader { data, position: 0 };
        let stream = clap_istream {
            ctx: &mut reader as *mut SliceReader<'_> as *mut c_void,
            read: Some(read_from_slice),
        };
        if unsafe { load(self.plugin, &stream) } {
            Ok(())
        } else {
            Err(StateError::LoadRejected)
        }
    }
}

struct SliceReader<'a> {
    data: &'a [u8],
    position: usize,
}

unsafe extern "C" fn write_to_vec(
    stream: *const clap_ostream,
    buffer: *const c_void,
    size: u64,
) -> i64 {
    if stream.is_null() || (buffer.is_null() && size > 0) {
        return -1;
    }
    let out = &mut *((*stream).ctx as *mut Vec<u8>);
    let data = std::slice::from_raw_parts(buffer as *const u8, size as usize);
    out.extend_from_slice(data);
    size as i64
}

unsafe extern "C" fn read_from_slice(
    stream: *const clap_istream,
    buffer: *mut c_void,
    size: u64,
) -> i64 {
    if stream.is_null() || (buffer.is_null() && size > 0) {
        return -1;
    }
    let reader = &mut *((*stream).ctx as *mut SliceReader<'_>);
    let remaining = reader.data.len() - reader.position;
    let to_read = (size as usize).min(remaining);
    if to_read == 0 {
        return 0;
    }
    let source = &reader.data[reader.position..reader.position + to_read];
    std::slice::from_raw_parts_mut(buffer as *mut u8, to_read).copy_from_slice(source);
    reader.position += to_read;
    to_read as i64
}
