// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use edge_detector::{bridge::FORMAT_NV21, ffi::*};
use std::{ptr::null, ptr::null_mut, slice::from_raw_parts, sync::Arc, thread};

fn empty_frame() -> EdgeFrame {
    EdgeFrame {
        data: null_mut(),
        len: 0,
    }
}

#[test]
fn test_lifecycle() {
    let frame = vec![128u8; 4 * 4 * 3 / 2];
    let mut out = empty_frame();

    unsafe {
        let handle = edge_bridge_new();
        assert!(!handle.is_null());

        let status = edge_bridge_process_frame(
            handle,
            frame.as_ptr(),
            frame.len(),
            4,
            4,
            FORMAT_NV21,
            &mut out,
        );
        assert_eq!(status, EDGE_NOT_INITIALIZED);
        assert!(out.data.is_null());

        assert_eq!(edge_bridge_init(handle), EDGE_OK);
        assert_eq!(edge_bridge_init(handle), EDGE_OK);

        let status = edge_bridge_process_frame(
            handle,
            frame.as_ptr(),
            frame.len(),
            4,
            4,
            FORMAT_NV21,
            &mut out,
        );
        assert_eq!(status, EDGE_OK);
        assert_eq!(out.len, 48);
        assert!(from_raw_parts(out.data, out.len).iter().all(|&v| v == 0));

        edge_frame_free(&mut out);
        assert!(out.data.is_null());
        assert_eq!(out.len, 0);

        assert_eq!(edge_bridge_release(handle), EDGE_OK);
        assert_eq!(edge_bridge_release(handle), EDGE_OK);

        let status = edge_bridge_process_frame(
            handle,
            frame.as_ptr(),
            frame.len(),
            4,
            4,
            FORMAT_NV21,
            &mut out,
        );
        assert_eq!(status, EDGE_NOT_INITIALIZED);

        edge_bridge_free(handle);
    }
}

#[test]
fn test_error_codes() {
    let frame = vec![128u8; 24];
    let mut out = empty_frame();

    unsafe {
        let handle = edge_bridge_new();
        edge_bridge_init(handle);

        let status =
            edge_bridge_process_frame(handle, frame.as_ptr(), 20, 4, 4, FORMAT_NV21, &mut out);
        assert_eq!(status, EDGE_MALFORMED_BUFFER);

        let status = edge_bridge_process_frame(handle, frame.as_ptr(), 24, 4, 4, 9, &mut out);
        assert_eq!(status, EDGE_CONVERSION_FAILED);

        let status =
            edge_bridge_process_frame(handle, frame.as_ptr(), 24, -4, 4, FORMAT_NV21, &mut out);
        assert_eq!(status, EDGE_INVALID_ARGUMENT);

        let status = edge_bridge_process_frame(handle, null(), 24, 4, 4, FORMAT_NV21, &mut out);
        assert_eq!(status, EDGE_INVALID_ARGUMENT);

        let status = edge_bridge_process_frame(
            handle,
            frame.as_ptr(),
            24,
            4,
            4,
            FORMAT_NV21,
            null_mut(),
        );
        assert_eq!(status, EDGE_INVALID_ARGUMENT);

        assert!(out.data.is_null());
        edge_bridge_free(handle);
    }
}

#[test]
fn test_null_handle() {
    let frame = vec![0u8; 24];
    let mut out = empty_frame();
    unsafe {
        assert_eq!(edge_bridge_init(null()), EDGE_INVALID_ARGUMENT);
        assert_eq!(edge_bridge_release(null()), EDGE_INVALID_ARGUMENT);
        assert_eq!(
            edge_bridge_process_frame(null(), frame.as_ptr(), 24, 4, 4, FORMAT_NV21, &mut out),
            EDGE_INVALID_ARGUMENT
        );
        edge_bridge_free(null_mut());
        edge_frame_free(null_mut());
        edge_frame_free(&mut out);
    }
}

struct Handle(*mut EdgeBridge);

// The bridge serializes access internally.
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[test]
fn test_concurrent_callbacks() {
    let handle = Arc::new(Handle(edge_bridge_new()));
    unsafe {
        edge_bridge_init(handle.0);
    }

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                let frame = vec![128u8; 16 * 16 * 3 / 2];
                for _ in 0..10 {
                    let mut out = empty_frame();
                    let status = unsafe {
                        edge_bridge_process_frame(
                            handle.0,
                            frame.as_ptr(),
                            frame.len(),
                            16,
                            16,
                            FORMAT_NV21,
                            &mut out,
                        )
                    };
                    assert_eq!(status, EDGE_OK);
                    assert_eq!(out.len, 16 * 16 * 3);
                    unsafe { edge_frame_free(&mut out) };
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }

    unsafe {
        edge_bridge_release(handle.0);
        edge_bridge_free(handle.0);
    }
}
