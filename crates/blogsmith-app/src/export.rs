//! Markdown download and clipboard copy

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use blogsmith_core::prelude::*;
use blogsmith_core::{slugify, GenerationResult};

pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Title used for the file name when the result has no plan
const FALLBACK_TITLE: &str = "blog";

/// Largest base64 payload sent in one OSC 52 sequence
const MAX_OSC52_PAYLOAD: usize = 1 << 20;

/// A markdown file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl MarkdownExport {
    /// Name the file after the plan title and carry the markdown unchanged
    pub fn from_result(result: &GenerationResult) -> Self {
        let title = result
            .title()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(FALLBACK_TITLE);

        Self {
            file_name: format!("{}.md", slugify(title)),
            mime_type: MARKDOWN_MIME_TYPE,
            contents: result.final_markdown.clone(),
        }
    }

    /// Write into `dir` (created if needed) and return the file path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved markdown export to {}", path.display());
        Ok(path)
    }
}

/// System clipboard access
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Clipboard that asks the terminal to set the selection via OSC 52.
///
/// Works over SSH and inside multiplexers that forward OSC 52.
pub struct Osc52Clipboard<W: Write> {
    writer: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let sequence = osc52_sequence(text)?;
        self.writer
            .write_all(sequence.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::clipboard(format!("Failed to write to terminal: {}", e)))
    }
}

/// Build the `ESC ] 52 ; c ; <base64> BEL` sequence for `text`
pub fn osc52_sequence(text: &str) -> Result<String> {
    let payload = BASE64.encode(text.as_bytes());
    if payload.len() > MAX_OSC52_PAYLOAD {
        return Err(Error::clipboard("Markdown is too large for the terminal clipboard"));
    }
    Ok(format!("\x1b]52;c;{}\x07", payload))
}
