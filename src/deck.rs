use crate::flashcard::Flashcard;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A deck of cards loaded from a TSV file
#[derive(Debug, Clone)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Flashcard>,
}

impl Deck {
    /// Load a deck from a TSV file
    /// Format: front<TAB>back[<TAB>hint[<TAB>tag1,tag2]]
    /// Lines starting with # are comments
    /// Empty lines are skipped
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck file: {}", path.display()))?;

        let mut cards = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 2 || parts.len() > 4 {
                anyhow::bail!(
                    "Invalid line {} in {}: expected front<TAB>back[<TAB>hint[<TAB>tags]]",
                    line_num + 1,
                    path.display()
                );
            }

            let hint = parts.get(2).map(|h| h.trim()).unwrap_or("");
            let tags: Vec<String> = parts
                .get(3)
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let card = Flashcard::new(parts[0].trim(), parts[1].trim(), hint, tags)
                .with_context(|| {
                    format!(
                        "Invalid card on line {} in {}",
                        line_num + 1,
                        path.display()
                    )
                })?;
            cards.push(card);
        }

        log::info!("Loaded deck '{}' with {} cards", name, cards.len());

        Ok(Deck { name, cards })
    }
}

/// List available deck files in a directory
pub fn list_decks(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut decks = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read decks directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "tsv") {
            decks.push(path);
        } else {
            log::debug!("Skipping non-deck entry {}", path.display());
        }
    }

    decks.sort();
    Ok(decks)
}
