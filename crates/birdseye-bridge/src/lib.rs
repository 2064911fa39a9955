// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// birdseye-bridge — Where frames come from and where results go.
//
// The scanner itself never touches files or cameras. Callers pull frames from
// a `FrameSource` and push results into a `FrameSink`; file-backed versions of
// both live here, along with PNG and base64 encoding.

pub mod encode;
pub mod file;
pub mod traits;

pub use encode::{Base64Sink, encode_png, encode_png_base64};
pub use file::{FileFrameSource, PngFileSink, decode_frame};
pub use traits::{Frame, FrameSink, FrameSource};
