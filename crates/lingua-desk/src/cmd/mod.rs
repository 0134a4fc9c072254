#![cfg(feature = "cli")]

use anyhow::{Context, Result};
use lingua_catalog::{PlacementBank, TeacherDirectory};

use crate::config::DeskConfig;
use crate::contact::ContactChannel;
use crate::i18n::Catalog;

pub mod book;
pub mod link;
pub mod prompt;
pub mod quiz;
pub mod teachers;

/// Read-only data every command works against.
#[derive(Debug, Clone)]
pub struct DeskContext {
    pub catalog: Catalog,
    pub directory: TeacherDirectory,
    pub bank: PlacementBank,
    pub contact: ContactChannel,
}

impl DeskContext {
    pub fn load(config: &DeskConfig, locale: &str) -> Result<Self> {
        let directory = config
            .load_directory()
            .context("failed to load teacher directory")?;
        let bank = config
            .load_bank()
            .context("failed to load placement tests")?;
        Ok(Self {
            catalog: Catalog::for_locale(locale),
            directory,
            bank,
            contact: config.contact_channel(),
        })
    }
}
