use chrono::Local;
use log::info;
use rand::Rng;
use sha2::{ Digest, Sha256 };
use std::fs;
use std::io;
use std::path::{ Path, PathBuf };
use thiserror::Error;

use crate::models::turn::{ ConversationTurn, TurnRecord };

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write run artifact: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize run artifact: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub conversations_path: PathBuf,
    pub results_path: PathBuf,
}

/// Write the two per-run JSON artifacts: the full conversation log and the
/// flattened result records.
///
/// File names embed the run timestamp at one-second granularity, so two
/// runs started within the same second overwrite each other. The two writes
/// are independent; a crash between them leaves only the first file.
pub fn save_run(
    dir: &Path,
    conversations: &[ConversationTurn],
    results: &[TurnRecord]
) -> Result<RunArtifacts, PersistError> {
    fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    let conversations_path = dir.join(format!("conversations_{}.json", timestamp));
    fs::write(&conversations_path, serde_json::to_string_pretty(conversations)?)?;

    let results_path = dir.join(format!("results_{}.json", timestamp));
    fs::write(&results_path, serde_json::to_string_pretty(results)?)?;

    info!(
        "Saved run artifacts: {} and {}",
        conversations_path.display(),
        results_path.display()
    );

    Ok(RunArtifacts {
        conversations_path,
        results_path,
    })
}

/// SHA-256 content hash of a generated single-color placeholder image
/// buffer (800x600 RGB). Standalone helper; nothing in the simulation path
/// consumes it.
pub fn sample_image_hash() -> String {
    const WIDTH: usize = 800;
    const HEIGHT: usize = 600;

    let mut rng = rand::thread_rng();
    let color: [u8; 3] = [rng.gen(), rng.gen(), rng.gen()];

    let mut pixels = Vec::with_capacity(WIDTH * HEIGHT * 3);
    for _ in 0..WIDTH * HEIGHT {
        pixels.extend_from_slice(&color);
    }

    hex::encode(Sha256::digest(&pixels))
}
