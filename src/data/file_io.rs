// Copyright 2025 the Morph Builder Authors
// SPDX-License-Identifier: Apache-2.0

//! Package load and save for EditorState.
//!
//! Reading and writing files is the host's job; these methods take and
//! return the document text. A load only replaces the current package
//! once the whole document has been parsed and migrated.

use super::EditorState;
use crate::model::{self, Package};
use anyhow::{Context, Result};
use chrono::Local;
use std::io::Read;

impl EditorState {
    /// Load a package document, replacing the current package on success.
    ///
    /// On failure the current package is left untouched and the error is
    /// also stored in `error_message`.
    pub fn load_from_str(&mut self, json: &str) -> Result<()> {
        match parse_package(json) {
            Ok(package) => {
                tracing::info!(
                    "Loaded package: {} ({} levels, {} textures)",
                    package.name,
                    package.levels.len(),
                    package.textures.len()
                );
                self.install(package);
                Ok(())
            }
            Err(e) => {
                let error = format!("Failed to load package: {:#}", e);
                tracing::error!("{}", error);
                self.error_message = Some(error);
                Err(e)
            }
        }
    }

    /// Read a whole package document from `reader`, then load it
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut json = String::new();
        if let Err(e) = reader.read_to_string(&mut json) {
            let e = anyhow::Error::new(e).context("Failed to read package");
            self.error_message = Some(format!("{:#}", e));
            tracing::error!("{:#}", e);
            return Err(e);
        }
        self.load_from_str(&json)
    }

    /// Serialize the package for the host to store
    pub fn save_to_string(&mut self) -> Result<String> {
        let json = serde_json::to_string(&self.package)
            .with_context(|| format!("Failed to serialize package {}", self.package.name))?;
        tracing::info!("Saved package: {} ({} bytes)", self.package.name, json.len());
        self.error_message = None;
        self.last_saved = Some(Local::now().format("%I:%M %p").to_string());
        Ok(json)
    }

    /// Suggested file name for the saved document
    pub fn package_file_name(&self) -> String {
        format!("{}.json", self.package.name)
    }

    /// Get the last saved time string
    pub fn last_saved_display(&self) -> Option<String> {
        self.last_saved.clone()
    }

    fn install(&mut self, package: Package) {
        self.clear();
        self.package = package;
        self.error_message = None;
        if !self.package.levels.is_empty() {
            self.select_level(0);
        }
    }
}

fn parse_package(json: &str) -> Result<Package> {
    model::migrate_str(json).context("Package could not be migrated")
}
