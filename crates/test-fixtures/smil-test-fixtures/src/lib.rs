use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    requests: HashMap<String, String>,
    #[serde(rename = "timing-nodes")]
    timing_nodes: HashMap<String, String>,
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    source: String,
    objects: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Single dispatch requests (`AnimationRequest` JSON).
pub mod requests {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.requests.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.requests, "request", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.requests, "request", name)?;
        super::load_json(rel)
    }
}

/// Ingested timing nodes, as the document layer hands them over.
pub mod timing_nodes {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.timing_nodes.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.timing_nodes, "timing node", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.timing_nodes, "timing node", name)?;
        super::load_json(rel)
    }
}

/// Pages: click groups plus the geometry of the objects they animate.
pub mod pages {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.pages.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn source_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.pages, "page", name)?;
        read_to_string(&entry.source)
    }

    pub fn source<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.pages, "page", name)?;
        super::load_json(&entry.source)
    }

    pub fn objects<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.pages, "page", name)?;
        super::load_json(&entry.objects)
    }
}
