//! The book document and the lookup queries every surface reads from.
//!
//! The book is static data compiled into the binary. It is parsed and validated
//! once per process; all queries are linear scans over the ordered page list.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BOOK_JSON: &str = include_str!("../data/book.json");

/// Delimiter between paragraphs inside `Page::content`.
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static BOOK: Lazy<Book> = Lazy::new(|| match load() {
    Ok(book) => book,
    // the site cannot serve anything without its content
    Err(e) => panic!("embedded book data is malformed: {}", e),
});

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse book data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("book has no pages")]
    Empty,
    #[error("duplicate page id '{0}'")]
    DuplicatePageId(String),
    #[error("duplicate page number {0}")]
    DuplicatePageNumber(u32),
    #[error("page '{id}' (number {number}) is out of order")]
    Unsorted { id: String, number: u32 },
    #[error("chapter '{id}' starts at page {start} but ends at page {end}")]
    InvertedChapter { id: String, start: u32, end: u32 },
    #[error("page '{id}' annotates paragraph {paragraph}, but it has only {count}")]
    BlockOutOfRange {
        id: String,
        paragraph: usize,
        count: usize,
    },
    #[error("page '{id}' annotates paragraph {paragraph} more than once")]
    DuplicateBlock { id: String, paragraph: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub pages: Vec<Page>,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub page_number: u32,
    pub title: String,
    pub content: String,
    pub chapter: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub page_start: u32,
    pub page_end: u32,
}

/// Structural markup for a single paragraph, authored alongside the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAnnotation {
    pub paragraph: usize,
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockKind {
    Plain,
    Quote,
    Framework,
    Action { number: u32 },
}

/// A paragraph of a page together with how it should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub index: usize,
    pub text: &'a str,
    pub kind: BlockKind,
}

/// One chapter with the pages that fall inside its range.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterListing<'a> {
    pub chapter: &'a Chapter,
    pub pages: Vec<&'a Page>,
}

/// Parses and validates the embedded book.
pub fn load() -> Result<Book, ContentError> {
    Book::from_json(BOOK_JSON)
}

/// The process-wide book. Loaded on first use.
pub fn book() -> &'static Book {
    &BOOK
}

impl Book {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let book: Book = serde_json::from_str(raw)?;
        book.validate()?;
        Ok(book)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.pages.is_empty() {
            return Err(ContentError::Empty);
        }

        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();
        let mut previous: Option<u32> = None;
        for page in &self.pages {
            if !ids.insert(page.id.as_str()) {
                return Err(ContentError::DuplicatePageId(page.id.clone()));
            }
            if !numbers.insert(page.page_number) {
                return Err(ContentError::DuplicatePageNumber(page.page_number));
            }
            if previous.is_some_and(|prev| prev > page.page_number) {
                return Err(ContentError::Unsorted {
                    id: page.id.clone(),
                    number: page.page_number,
                });
            }
            previous = Some(page.page_number);
            page.validate_blocks()?;
        }

        for chapter in &self.chapters {
            if chapter.page_start > chapter.page_end {
                return Err(ContentError::InvertedChapter {
                    id: chapter.id.clone(),
                    start: chapter.page_start,
                    end: chapter.page_end,
                });
            }
        }

        Ok(())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    pub fn all_pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn page_by_id(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn page_by_number(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.page_number == number)
    }

    /// `None` when `id` is the last page or unknown.
    pub fn next_page(&self, id: &str) -> Option<&Page> {
        let index = self.index_of(id)?;
        self.pages.get(index + 1)
    }

    /// `None` when `id` is the first page or unknown.
    pub fn previous_page(&self, id: &str) -> Option<&Page> {
        let index = self.index_of(id)?;
        index.checked_sub(1).and_then(|prev| self.pages.get(prev))
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Percentage of the book read once `id` has been reached, 0 for unknown ids.
    pub fn reading_progress(&self, id: &str) -> u8 {
        match self.index_of(id) {
            Some(index) => {
                let ratio = (index + 1) as f64 / self.pages.len() as f64;
                (ratio * 100.0).round() as u8
            }
            None => 0,
        }
    }

    /// Pages grouped under each chapter by page-number range.
    ///
    /// Overlapping chapter ranges list a page more than once.
    pub fn table_of_contents(&self) -> Vec<ChapterListing<'_>> {
        self.chapters
            .iter()
            .map(|chapter| ChapterListing {
                chapter,
                pages: self
                    .pages
                    .iter()
                    .filter(|page| chapter.contains(page.page_number))
                    .collect(),
            })
            .collect()
    }
}

impl Chapter {
    pub fn contains(&self, page_number: u32) -> bool {
        (self.page_start..=self.page_end).contains(&page_number)
    }
}

impl Page {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split(PARAGRAPH_DELIMITER)
    }

    fn validate_blocks(&self) -> Result<(), ContentError> {
        let count = self.paragraphs().count();
        let mut seen = HashSet::new();
        for annotation in &self.blocks {
            if annotation.paragraph >= count {
                return Err(ContentError::BlockOutOfRange {
                    id: self.id.clone(),
                    paragraph: annotation.paragraph,
                    count,
                });
            }
            if !seen.insert(annotation.paragraph) {
                return Err(ContentError::DuplicateBlock {
                    id: self.id.clone(),
                    paragraph: annotation.paragraph,
                });
            }
        }
        Ok(())
    }

    pub fn blocks(&self) -> Vec<Block<'_>> {
        self.paragraphs()
            .enumerate()
            .map(|(index, text)| {
                let kind = self
                    .blocks
                    .iter()
                    .find(|annotation| annotation.paragraph == index)
                    .map(|annotation| annotation.kind)
                    .unwrap_or(BlockKind::Plain);
                Block { index, text, kind }
            })
            .collect()
    }

    /// First `max_chars` characters of the content as plain text, for
    /// description metadata. Inline markup is dropped and whitespace collapsed.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = TAG_RE.replace_all(&self.content, "");
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(max_chars)
            .collect()
    }

    pub fn document_title(&self, book_title: &str) -> String {
        format!("{} - Page {} | {}", self.title, self.page_number, book_title)
    }

    pub fn href(&self) -> String {
        format!("/book/{}", self.id)
    }
}
