// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Vocabulary sources.
//!
//! A source is any named resource whose full content is a newline-delimited
//! list of terms. Reading is the only potentially blocking step of a reload,
//! and it always completes or fails before the trie is touched.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// A named resource holding one term per line.
#[cfg_attr(test, automock)]
pub trait VocabularySource {
    /// Name used in logs and error reports.
    fn name(&self) -> String;

    /// Reads the full content of the resource.
    fn read_to_string(&self) -> io::Result<String>;
}

/// Boxed source that can be shared with request-handling threads.
pub type BoxedSource = Box<dyn VocabularySource + Send + Sync>;

/// A word list stored in a UTF-8 file.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    /// Creates a source named after the file stem of `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    /// Creates a source with an explicit name.
    pub fn named<S: Into<String>, P: AsRef<Path>>(name: S, path: P) -> Self {
        Self {
            name: name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularySource for FileSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// A word list already held in memory.
#[derive(Clone)]
pub struct InlineSource {
    name: String,
    content: String,
}

impl InlineSource {
    /// Creates a source from newline-delimited `content`.
    pub fn new<S: Into<String>, C: Into<String>>(name: S, content: C) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Creates a source from individual terms.
    pub fn from_words<S, I>(name: S, words: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let content = words
            .into_iter()
            .map(|word| word.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(name, content)
    }
}

impl fmt::Debug for InlineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineSource")
            .field("name", &self.name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

impl VocabularySource for InlineSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read_to_string(&self) -> io::Result<String> {
        Ok(self.content.clone())
    }
}
