use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use super::paginator;
use super::{ImageRef, Mode};

/// The only inputs a collage depends on.
#[derive(Clone, Debug)]
pub struct CollageInputs {
    pub images: Arc<[ImageRef]>,
    pub mode: Mode,
}

/// A request to render `images` in `mode`, valid while `generation` is current.
#[derive(Clone, Debug)]
pub struct RenderTicket {
    pub generation: u64,
    pub images: Arc<[ImageRef]>,
    pub mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    NotStarted,
    Rendering,
    Idle,
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not generated yet"),
            Self::Rendering => write!(f, "rendering"),
            Self::Idle => write!(f, "ready"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    NoImages,
    NotGenerated,
    RenderInProgress,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImages => write!(f, "no images are loaded, open a folder first"),
            Self::NotGenerated => write!(f, "the collage hasn't been generated yet"),
            Self::RenderInProgress => write!(f, "pages are still rendering, try again when done"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Inputs plus the surfaces rendered from them.
///
/// Every change of the inputs (and every explicit start) opens a new generation and drops the
/// surfaces of the previous one. A render only gets published if its generation is still the
/// current one, so a slow stale render can never overwrite newer pages.
pub struct Session {
    inputs: CollageInputs,
    started: bool,
    generation: u64,
    published: Option<u64>,
    surfaces: BTreeMap<usize, Arc<RgbaImage>>,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            inputs: CollageInputs { images: Arc::from([]), mode },
            started: false,
            generation: 0,
            published: None,
            surfaces: BTreeMap::new(),
        }
    }

    pub const fn inputs(&self) -> &CollageInputs {
        &self.inputs
    }

    pub fn page_count(&self) -> usize {
        paginator::page_count(self.inputs.images.len(), self.inputs.mode.geometry().images_per_page)
    }

    pub fn status(&self) -> RenderStatus {
        if !self.started {
            RenderStatus::NotStarted
        } else if self.published == Some(self.generation) {
            RenderStatus::Idle
        } else {
            RenderStatus::Rendering
        }
    }

    /// Replaces the image list. Returns a ticket when the collage has already been started.
    pub fn set_images(&mut self, images: Vec<ImageRef>) -> Option<RenderTicket> {
        self.inputs.images = images.into();
        self.invalidate();
        self.started.then(|| self.ticket())
    }

    /// Switches the mode. Returns a ticket when the mode changed on a started collage.
    pub fn set_mode(&mut self, mode: Mode) -> Option<RenderTicket> {
        if mode == self.inputs.mode {
            return None;
        }

        self.inputs.mode = mode;
        self.invalidate();
        self.started.then(|| self.ticket())
    }

    /// Starts (or restarts) the collage, discarding anything rendered so far.
    pub fn start(&mut self) -> Result<RenderTicket, SessionError> {
        if self.inputs.images.is_empty() {
            return Err(SessionError::NoImages);
        }

        self.started = true;
        self.invalidate();
        Ok(self.ticket())
    }

    /// Stores the surfaces of a finished render. Returns `false` for a stale generation.
    pub fn publish(&mut self, generation: u64, surfaces: Vec<RgbaImage>) -> bool {
        if generation != self.generation {
            return false;
        }

        self.surfaces = surfaces.into_iter().map(Arc::new).enumerate().collect();
        self.published = Some(generation);
        true
    }

    /// The fully rendered pages, in order. Refused while a render is pending.
    pub fn export_snapshot(&self) -> Result<Vec<Arc<RgbaImage>>, SessionError> {
        if self.inputs.images.is_empty() {
            return Err(SessionError::NoImages);
        }

        match self.status() {
            RenderStatus::NotStarted => Err(SessionError::NotGenerated),
            RenderStatus::Rendering => Err(SessionError::RenderInProgress),
            RenderStatus::Idle => Ok(self.surfaces.values().cloned().collect()),
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.surfaces.clear();
    }

    fn ticket(&self) -> RenderTicket {
        RenderTicket {
            generation: self.generation,
            images: self.inputs.images.clone(),
            mode: self.inputs.mode,
        }
    }
}
