//! Composition contracts: the opaque handle the core reads, source
//! descriptors, and the pass/fail listener shape of an asynchronous load.
//!
//! Loading itself is an external collaborator; the core never parses
//! animation data.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Frame bounds of a composition, in source units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBounds {
    pub width: f32,
    pub height: f32,
}

impl FrameBounds {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, used by hosts to size the container. None for
    /// degenerate bounds.
    #[inline]
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.height > 0.0 && self.width > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// A loaded, parsed animation definition. Produced by an external loader
/// and immutable afterwards; the core only reads duration and bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionHandle {
    duration_secs: f32,
    bounds: FrameBounds,
}

impl CompositionHandle {
    /// Wrap a loaded composition. Zero duration is allowed (it renders
    /// as a benign no-op), negative or non-finite durations are not.
    pub fn new(duration_secs: f32, bounds: FrameBounds) -> Result<Self, PlaybackError> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(PlaybackError::InvalidDuration {
                seconds: duration_secs,
            });
        }
        Ok(Self {
            duration_secs,
            bounds,
        })
    }

    #[inline]
    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }

    #[inline]
    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    /// Zero-duration compositions skip the advance/render path entirely.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.duration_secs > 0.0
    }
}

/// Payload format hinted by a source's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Json,
    Archive,
}

/// Where a composition comes from. Passed to the external loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompositionSource {
    /// Bundled raw resource id
    Resource { id: u32 },
    /// Remote URL
    Url { url: String },
    /// Local file path
    File { path: PathBuf },
    /// Named asset shipped with the host
    Asset { name: String },
}

impl CompositionSource {
    /// Archive vs plain JSON, decided by the `.zip` extension where a
    /// name is available. Resources carry no name and default to JSON.
    pub fn format_hint(&self) -> SourceFormat {
        let name = match self {
            Self::Resource { .. } => return SourceFormat::Json,
            Self::Url { url } => url.as_str(),
            Self::File { path } => return Self::hint_from_name(&path.to_string_lossy()),
            Self::Asset { name } => name.as_str(),
        };
        Self::hint_from_name(name)
    }

    fn hint_from_name(name: &str) -> SourceFormat {
        if name.to_ascii_lowercase().ends_with(".zip") {
            SourceFormat::Archive
        } else {
            SourceFormat::Json
        }
    }

    /// Short human-readable description for logs and errors
    pub fn describe(&self) -> String {
        match self {
            Self::Resource { id } => format!("resource {id}"),
            Self::Url { url } => format!("url {url}"),
            Self::File { path } => format!("file {}", path.display()),
            Self::Asset { name } => format!("asset {name}"),
        }
    }
}

type SuccessListener = Box<dyn FnOnce(&CompositionHandle)>;
type FailureListener = Box<dyn FnOnce(&PlaybackError)>;

/// Pass/fail callback shape of an asynchronous composition load.
///
/// Listeners registered after completion fire immediately; `complete`
/// resolves the task at most once.
#[derive(Default)]
pub struct CompositionTask {
    result: Option<Result<CompositionHandle, PlaybackError>>,
    on_success: Vec<SuccessListener>,
    on_failure: Vec<FailureListener>,
}

impl CompositionTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a success listener
    pub fn add_listener(&mut self, listener: impl FnOnce(&CompositionHandle) + 'static) {
        match &self.result {
            Some(Ok(handle)) => listener(handle),
            Some(Err(_)) => {}
            None => self.on_success.push(Box::new(listener)),
        }
    }

    /// Register a failure listener
    pub fn add_failure_listener(&mut self, listener: impl FnOnce(&PlaybackError) + 'static) {
        match &self.result {
            Some(Err(err)) => listener(err),
            Some(Ok(_)) => {}
            None => self.on_failure.push(Box::new(listener)),
        }
    }

    /// Resolve the task, firing registered listeners. Later completions
    /// are ignored.
    pub fn complete(&mut self, result: Result<CompositionHandle, PlaybackError>) {
        if self.result.is_some() {
            return;
        }
        match &result {
            Ok(handle) => {
                for listener in self.on_success.drain(..) {
                    listener(handle);
                }
            }
            Err(err) => {
                for listener in self.on_failure.drain(..) {
                    listener(err);
                }
            }
        }
        self.on_success.clear();
        self.on_failure.clear();
        self.result = Some(result);
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    #[inline]
    pub fn result(&self) -> Option<&Result<CompositionHandle, PlaybackError>> {
        self.result.as_ref()
    }
}

/// External collaborator that resolves a source descriptor into a
/// composition, asynchronously from the caller's point of view.
pub trait CompositionLoader {
    fn load(&mut self, source: &CompositionSource) -> CompositionTask;
}
