use std::{fs, path::Path};

use anyhow::Result;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Average length of a word, spaces and punctuation included.
pub const CHARACTERS_PER_WORD: usize = 6;

const FRONTMATTER_FENCE: &[u8] = b"---";

/// Estimates amount of words from the length of the text in bytes. Text doesn't have to be valid
/// UTF-8, files in legacy encodings are counted all the same.
pub fn count_words(content: &[u8]) -> u64 {
    let length = match std::str::from_utf8(content) {
        Ok(text) => text.trim().len(),
        Err(_) => content.trim_ascii().len(),
    };
    length.div_ceil(CHARACTERS_PER_WORD) as u64
}

/// Collects raw text of every markdown file below `folder`. Front matter is removed and files are
/// separated by a space. Files that can't be read are skipped.
pub fn read_markdown_content(folder: &Path) -> Result<Vec<u8>> {
    let mut content = Vec::new();

    for entry in WalkDir::new(folder) {
        let entry = match entry {
            Ok(v) => v,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                debug!("Skipping unreadable entry in {folder:?}: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        match fs::read(entry.path()) {
            Ok(text) => {
                content.extend_from_slice(strip_frontmatter(&text));
                content.push(b' ');
            }
            Err(e) => warn!("Failed to read {:?}: {e}", entry.path()),
        }
    }

    Ok(content)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn is_fence_line(line: &[u8]) -> bool {
    line.trim_ascii() == FRONTMATTER_FENCE
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|v| v == needle)
}

/// Removes a YAML front matter block from the start of a document.
pub fn strip_frontmatter(content: &[u8]) -> &[u8] {
    let mut lines = content.split(|v| *v == b'\n');

    if let Some(first) = lines.next().filter(|v| is_fence_line(v)) {
        // Start of the line following the one currently looked at.
        let mut next_line = first.len() + 1;
        for line in lines {
            next_line += line.len() + 1;
            if is_fence_line(line) {
                // Nothing follows a closing fence on the last line, fall back to the plain split.
                if let Some(body) = content.get(next_line..) {
                    return body;
                }
                break;
            }
        }
    }

    let content = content.trim_ascii();
    if content.starts_with(FRONTMATTER_FENCE) {
        let rest = &content[FRONTMATTER_FENCE.len()..];
        if let Some(closing) = find(rest, FRONTMATTER_FENCE) {
            return &rest[closing + FRONTMATTER_FENCE.len()..];
        }
    }

    content
}
