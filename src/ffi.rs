// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! C ABI entry points for platform bindings.
//!
//! A JNI or Swift shim allocates one [`EdgeBridge`] per camera session with
//! [`edge_bridge_new`], drives it through init/process/release and frees it
//! with [`edge_bridge_free`]. Every function returns one of the `EDGE_*`
//! status codes and never unwinds into the caller.

use crate::{
    bridge::{panic_message, BufferBridge},
    error::Error,
};
use std::{
    panic::{self, AssertUnwindSafe},
    ptr::null_mut,
    slice::from_raw_parts,
    sync::{Mutex, MutexGuard},
};
use tracing::error;

pub const EDGE_OK: i32 = 0;
pub const EDGE_NOT_INITIALIZED: i32 = 1;
pub const EDGE_MALFORMED_BUFFER: i32 = 2;
pub const EDGE_CONVERSION_FAILED: i32 = 3;
pub const EDGE_INVALID_THRESHOLDS: i32 = 4;
pub const EDGE_INVALID_ARGUMENT: i32 = -1;

/// Opaque bridge handle shared with foreign code.
pub struct EdgeBridge {
    inner: Mutex<BufferBridge>,
}

impl EdgeBridge {
    fn lock(&self) -> MutexGuard<'_, BufferBridge> {
        // A poisoned lock only means an earlier call panicked mid-frame; the
        // bridge itself holds no partially written state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Processed frame handed to the caller. Free with [`edge_frame_free`].
#[repr(C)]
pub struct EdgeFrame {
    pub data: *mut u8,
    pub len: usize,
}

impl EdgeFrame {
    fn null() -> Self {
        Self {
            data: null_mut(),
            len: 0,
        }
    }
}

fn guarded(f: impl FnOnce() -> i32) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(code) => code,
        Err(payload) => {
            error!("panic at ffi boundary: {}", panic_message(payload.as_ref()));
            EDGE_CONVERSION_FAILED
        }
    }
}

/// Allocates a bridge in the uninitialized state.
#[no_mangle]
pub extern "C" fn edge_bridge_new() -> *mut EdgeBridge {
    Box::into_raw(Box::new(EdgeBridge {
        inner: Mutex::new(BufferBridge::new()),
    }))
}

/// Destroys a bridge created by [`edge_bridge_new`]. Null is ignored.
///
/// # Safety
///
/// `handle` must be null or a pointer returned by [`edge_bridge_new`] that has
/// not been freed, and no other thread may be using it.
#[no_mangle]
pub unsafe extern "C" fn edge_bridge_free(handle: *mut EdgeBridge) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Creates the detector with default thresholds. Idempotent.
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`edge_bridge_new`].
#[no_mangle]
pub unsafe extern "C" fn edge_bridge_init(handle: *const EdgeBridge) -> i32 {
    let Some(bridge) = handle.as_ref() else {
        return EDGE_INVALID_ARGUMENT;
    };
    guarded(|| {
        bridge.lock().init();
        EDGE_OK
    })
}

/// Drops the detector. Idempotent.
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`edge_bridge_new`].
#[no_mangle]
pub unsafe extern "C" fn edge_bridge_release(handle: *const EdgeBridge) -> i32 {
    let Some(bridge) = handle.as_ref() else {
        return EDGE_INVALID_ARGUMENT;
    };
    guarded(|| {
        bridge.lock().release();
        EDGE_OK
    })
}

/// Runs edge detection on a 4:2:0 camera buffer.
///
/// On success `out` receives an owned buffer of `width * height * 3` bytes.
/// On failure `out` is set to a null frame and the error status is returned.
///
/// # Safety
///
/// - `handle` must be null or a live pointer from [`edge_bridge_new`]
/// - `data` must be null or valid for reads of `len` bytes for the duration of
///   the call
/// - `out` must be null or valid for writes of one [`EdgeFrame`]
#[no_mangle]
pub unsafe extern "C" fn edge_bridge_process_frame(
    handle: *const EdgeBridge,
    data: *const u8,
    len: usize,
    width: i32,
    height: i32,
    format: i32,
    out: *mut EdgeFrame,
) -> i32 {
    let Some(out) = out.as_mut() else {
        return EDGE_INVALID_ARGUMENT;
    };
    *out = EdgeFrame::null();

    let Some(bridge) = handle.as_ref() else {
        return EDGE_INVALID_ARGUMENT;
    };
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return EDGE_INVALID_ARGUMENT;
    };
    let input: &[u8] = if len == 0 {
        &[]
    } else if data.is_null() {
        return EDGE_INVALID_ARGUMENT;
    } else {
        from_raw_parts(data, len)
    };

    guarded(|| match bridge.lock().process_frame(input, width, height, format) {
        Ok(bytes) => {
            let bytes = bytes.into_boxed_slice();
            out.len = bytes.len();
            out.data = Box::into_raw(bytes).cast::<u8>();
            EDGE_OK
        }
        Err(e) => status(&e),
    })
}

/// Frees a frame returned by [`edge_bridge_process_frame`] and nulls it.
///
/// # Safety
///
/// `frame` must be null or point to an [`EdgeFrame`] filled by
/// [`edge_bridge_process_frame`] that has not been freed.
#[no_mangle]
pub unsafe extern "C" fn edge_frame_free(frame: *mut EdgeFrame) {
    let Some(frame) = frame.as_mut() else {
        return;
    };
    if !frame.data.is_null() {
        let slice = std::ptr::slice_from_raw_parts_mut(frame.data, frame.len);
        drop(Box::from_raw(slice));
    }
    *frame = EdgeFrame::null();
}

fn status(err: &Error) -> i32 {
    let code = err.code();
    debug_assert!(matches!(
        code,
        EDGE_NOT_INITIALIZED | EDGE_MALFORMED_BUFFER | EDGE_CONVERSION_FAILED | EDGE_INVALID_THRESHOLDS
    ));
    code
}
