use std::fmt;
use std::mem;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::collage::exporter::{self, ExportError};
use crate::collage::rasterizer::{self, RenderOptions};
use crate::collage::session::{RenderTicket, Session, SessionError};
use crate::collage::{ImageRef, Mode};
use crate::utilities::folder_reader::{self, FolderError};
use crate::utilities::persistence::Persistence;
use crate::utilities::text_utils;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    WaitingToClose,
    Closed,
}

#[derive(Debug)]
pub enum DownloadError {
    Session(SessionError),
    Export(ExportError),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DownloadError {}

impl From<SessionError> for DownloadError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<ExportError> for DownloadError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

pub struct AppState {
    pub status: Mutex<AppStatus>,
    pub session: Mutex<Session>,
    render_options: RenderOptions,
    persistence: Arc<dyn Persistence>,
    archive_name: String,
    sort: bool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AppState {
    pub fn new(
        mode: Mode,
        render_options: RenderOptions,
        persistence: Arc<dyn Persistence>,
        archive_name: String,
        sort: bool,
    ) -> Self {
        Self {
            status: Mutex::new(AppStatus::Closed),
            session: Mutex::new(Session::new(mode)),
            render_options,
            persistence,
            archive_name,
            sort,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Imports a folder. On failure the previously loaded images stay untouched.
    pub async fn open_folder(self: &Arc<Self>, path: &Path) -> Result<usize, FolderError> {
        let images = folder_reader::read_folder(path, self.sort).await?;
        Ok(self.load_images(images))
    }

    pub fn load_images(self: &Arc<Self>, images: Vec<ImageRef>) -> usize {
        let count = images.len();
        let ticket = self.session.lock().unwrap().set_images(images);
        log::info!("loaded {count} image(s)");

        if let Some(ticket) = ticket {
            self.spawn_render(ticket);
        }

        count
    }

    /// Returns `true` when the change triggered a new render.
    pub fn set_mode(self: &Arc<Self>, mode: Mode) -> bool {
        let ticket = self.session.lock().unwrap().set_mode(mode);
        log::info!("mode set to {mode}");

        let Some(ticket) = ticket else {
            return false;
        };

        self.spawn_render(ticket);
        true
    }

    /// Starts rendering every page from scratch. Returns the number of pages being drawn.
    pub fn generate(self: &Arc<Self>) -> Result<usize, SessionError> {
        let (ticket, page_count) = {
            let mut session = self.session.lock().unwrap();
            (session.start()?, session.page_count())
        };

        self.spawn_render(ticket);

        Ok(page_count)
    }

    /// Exports the published pages. Refused while anything is still rendering.
    pub async fn download(&self) -> Result<usize, DownloadError> {
        let surfaces = self.session.lock().unwrap().export_snapshot()?;

        Ok(exporter::export_all(surfaces, self.persistence.as_ref(), &self.archive_name).await?)
    }

    /// Waits until every render started so far has settled.
    pub async fn wait_idle(&self) {
        loop {
            let tasks = mem::take(&mut *self.tasks.lock().unwrap());
            if tasks.is_empty() {
                break;
            }

            for task in tasks {
                if let Err(err) = task.await {
                    log::error!("render task failed: {err}");
                }
            }
        }
    }

    pub fn running_task_count(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.retain(|task| !task.is_finished());
        tasks.len()
    }

    fn spawn_render(self: &Arc<Self>, ticket: RenderTicket) {
        let state = self.clone();
        let task = tokio::spawn(async move {
            let RenderTicket { generation, images, mode } = ticket;
            log::debug!("rendering generation {generation}: {} image(s), {mode}", images.len());

            let start = Instant::now();
            let surfaces = rasterizer::render_all(&images, mode, &state.render_options).await;
            let page_count = surfaces.len();

            if state.session.lock().unwrap().publish(generation, surfaces) {
                log::info!(
                    "rendered {page_count} page(s) in {}",
                    text_utils::format_duration(start.elapsed().as_secs())
                );
            } else {
                log::info!("discarding stale render of generation {generation}");
            }
        });

        let mut tasks = self.tasks.lock().unwrap();
        tasks.retain(|task| !task.is_finished());
        tasks.push(task);
    }
}
