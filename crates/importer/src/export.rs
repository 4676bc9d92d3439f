use std::path::{Path, PathBuf};

use chrono::Local;
use parser::CompetitionSnapshot;
use tracing::info;

use crate::error::Result;

/// Writes snapshots to disk as pretty-printed JSON, one file per
/// competition, timestamped so repeated runs never clobber each other.
pub struct SnapshotExporter {
    output_dir: PathBuf,
}

impl SnapshotExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn export(&self, snapshot: &CompetitionSnapshot) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(Self::file_name(&snapshot.name));
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, json)?;

        info!(path = %path.display(), "Exported snapshot");
        Ok(path)
    }

    pub fn export_all(&self, snapshots: &[CompetitionSnapshot]) -> Result<Vec<PathBuf>> {
        snapshots.iter().map(|s| self.export(s)).collect()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn file_name(competition_name: &str) -> String {
        let slug: String = competition_name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        format!("{}_{}.json", slug.to_lowercase(), timestamp)
    }
}
