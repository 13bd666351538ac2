//! A loaded catalog plus the session state stored next to it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use syllabus_engine::{JsonFileStateStore, Session};
use syllabus_model::{CatalogIndex, Topic};
use tracing::info;

pub struct Workspace {
    session: Session,
    state: JsonFileStateStore,
}

impl Workspace {
    /// Load the catalog and resume any saved session.
    ///
    /// An invalid catalog is fatal. A missing state file starts a fresh session.
    pub fn open(catalog_path: &Path, state_path: PathBuf) -> Result<Self> {
        let catalog = load_catalog(catalog_path)?;
        let state = JsonFileStateStore::new(state_path);
        let session = Session::load(Arc::new(catalog), &state)
            .with_context(|| format!("load session state from {}", state.path().display()))?;
        Ok(Self { session, state })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn state_path(&self) -> &Path {
        self.state.path()
    }

    /// Look up a topic, failing with a user-facing message when unknown.
    pub fn require_topic(&self, key: &str) -> Result<&Topic> {
        self.session
            .catalog()
            .topic(key)
            .ok_or_else(|| anyhow!("unknown topic `{key}`"))
    }

    pub fn save(&mut self) -> Result<()> {
        self.session
            .save(&mut self.state)
            .with_context(|| format!("save session state to {}", self.state.path().display()))
    }
}

pub fn load_catalog(path: &Path) -> Result<CatalogIndex> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read catalog {}", path.display()))?;
    let catalog = CatalogIndex::from_json_str(&text)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    info!(
        path = %path.display(),
        categories = catalog.categories().len(),
        topics = catalog.topic_count(),
        "loaded catalog"
    );
    Ok(catalog)
}
