use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::app::AppState;
use crate::collage::Mode;
use crate::collage::exporter::ARCHIVE_NAME;
use crate::collage::rasterizer::RenderOptions;
use crate::utilities::persistence::DirectoryPersistence;

/// Lay a folder of images out on printable A4 pages and export them as a zip of JPEGs.
///
/// With a FOLDER the collage is generated and downloaded in one go. Without one (or with
/// --interactive) a small command shell is started instead.
#[derive(Parser, Debug)]
#[command(name = "a4-collage", version)]
pub struct CliArgs {
    /// Folder to import, subfolders included.
    pub folder: Option<PathBuf>,

    /// Grid per page: four (2×2, filling the page) or nine (3×3 cards of 63×88 mm).
    #[arg(short, long, env = "COLLAGE_MODE", default_value = "four", value_name = "MODE")]
    pub mode: Mode,

    /// Directory the archive is saved to.
    #[arg(short, long, env = "COLLAGE_OUTPUT_DIR", default_value = ".", value_name = "DIR")]
    pub output: PathBuf,

    /// File name of the archive.
    #[arg(long, env = "COLLAGE_ARCHIVE_NAME", default_value = ARCHIVE_NAME, value_name = "NAME")]
    pub archive_name: String,

    /// Seconds to wait for a single image before leaving its cell blank.
    #[arg(long, env = "COLLAGE_DECODE_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    pub decode_timeout: u64,

    /// How many images may be decoded at the same time.
    #[arg(long, env = "COLLAGE_MAX_DECODES", default_value = "4", value_name = "N")]
    pub max_decodes: NonZeroUsize,

    /// Order images by path instead of the order the file system lists them in.
    #[arg(long, env = "COLLAGE_SORT")]
    pub sort: bool,

    /// Start the command shell even when a FOLDER is given.
    #[arg(short, long)]
    pub interactive: bool,
}

impl CliArgs {
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.mode,
            RenderOptions::new(Duration::from_secs(self.decode_timeout), self.max_decodes.get()),
            Arc::new(DirectoryPersistence::new(self.output.clone())),
            self.archive_name.clone(),
            self.sort,
        )
    }
}

/// Opens `folder`, renders every page and downloads the archive.
pub async fn run_once(state: &Arc<AppState>, folder: &Path) -> ExitCode {
    let count = match state.open_folder(folder).await {
        Ok(count) => count,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if count == 0 {
        log::warn!("no images found in {}, nothing to export", folder.display());
        return ExitCode::FAILURE;
    }

    let page_count = match state.generate() {
        Ok(page_count) => page_count,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("drawing {page_count} page(s) from {count} image(s)…");
    state.wait_idle().await;

    match state.download().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
