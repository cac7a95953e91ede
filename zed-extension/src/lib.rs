use std::fs;
use zed_extension_api::{self as zed, LanguageServerId, Result};

const BINARY_NAME: &str = "tachyons-lsp";

struct TachyonsExtension {
    cached_binary_path: Option<String>,
}

impl TachyonsExtension {
    fn language_server_binary_path(
        &mut self,
        language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<String> {
        if let Some(path) = worktree.which(BINARY_NAME) {
            self.cached_binary_path = Some(path.clone());
            return Ok(path);
        }

        // The worktree may have moved to an environment without it on PATH.
        if let Some(path) = &self.cached_binary_path {
            if fs::metadata(path).is_ok_and(|stat| stat.is_file()) {
                return Ok(path.clone());
            }
        }

        zed::set_language_server_installation_status(
            language_server_id,
            &zed::LanguageServerInstallationStatus::Failed(format!(
                "{BINARY_NAME} not found on PATH; install it with `cargo install tachyons_lsp`"
            )),
        );
        Err(format!("{BINARY_NAME} not found on PATH"))
    }
}

impl zed::Extension for TachyonsExtension {
    fn new() -> Self {
        Self {
            cached_binary_path: None,
        }
    }

    fn language_server_command(
        &mut self,
        language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<zed::Command> {
        let binary_path = self.language_server_binary_path(language_server_id, worktree)?;

        Ok(zed::Command {
            command: binary_path,
            args: vec!["--stdio".to_string()],
            env: Default::default(),
        })
    }
}

zed::register_extension!(TachyonsExtension);
