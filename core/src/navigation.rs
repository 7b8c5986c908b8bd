use serde::Serialize;

use crate::access::{LinkOutcome, Session};
use crate::content::{Book, Page};

pub const CONTENTS_HREF: &str = "/book";

/// Everything a page view needs to render its navigation in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<'a> {
    pub current: &'a Page,
    pub previous: Option<&'a Page>,
    pub next: Option<&'a Page>,
    pub progress: u8,
}

/// Navigation targets after they have been passed through the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    pub previous: Option<LinkOutcome>,
    pub next: Option<LinkOutcome>,
    pub contents: LinkOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
    Toc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
            Direction::Toc => "toc",
        }
    }
}

/// `None` when the page id is unknown; callers turn that into a not-found view.
pub fn resolve<'a>(book: &'a Book, page_id: &str) -> Option<Navigation<'a>> {
    let current = book.page_by_id(page_id)?;
    Some(Navigation {
        current,
        previous: book.previous_page(page_id),
        next: book.next_page(page_id),
        progress: book.reading_progress(page_id),
    })
}

impl Navigation<'_> {
    pub fn links(&self, session: &Session) -> NavLinks {
        NavLinks {
            previous: self.previous.map(|page| session.guard(&page.href())),
            next: self.next.map(|page| session.guard(&page.href())),
            contents: session.guard(CONTENTS_HREF),
        }
    }

    pub fn target(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Next => self.next.map(|page| page.id.as_str()),
            Direction::Previous => self.previous.map(|page| page.id.as_str()),
            Direction::Toc => Some("toc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryStore;
    use crate::content::book;
    use chrono::Utc;

    #[test]
    fn unknown_page_resolves_to_none() {
        assert!(resolve(book(), "page-404").is_none());
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let nav = resolve(book(), "page-3").unwrap();
        assert_eq!(nav.previous.unwrap().id, "page-2");
        assert_eq!(nav.next.unwrap().id, "page-4");
        let expected = (3.0 / book().total_pages() as f64 * 100.0).round() as u8;
        assert_eq!(nav.progress, expected);
        assert_eq!(nav.target(Direction::Next), Some("page-4"));
        assert_eq!(nav.target(Direction::Toc), Some("toc"));
    }

    #[test]
    fn links_follow_the_session() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        let nav = resolve(book(), "page-2").unwrap();

        let denied = nav.links(&session);
        assert_eq!(denied.next, Some(LinkOutcome::Redirect("/".into())));
        assert_eq!(denied.contents, LinkOutcome::Redirect("/".into()));

        session.grant(&store, Utc::now());
        let granted = nav.links(&session);
        assert_eq!(
            granted.previous,
            Some(LinkOutcome::Proceed("/book/page-1".into()))
        );
        assert_eq!(granted.contents, LinkOutcome::Proceed("/book".into()));
    }

    #[test]
    fn first_page_has_no_previous_link() {
        let store = MemoryStore::new();
        let session = Session::read(&store);
        let first = book().first_page().unwrap();
        let nav = resolve(book(), &first.id).unwrap();
        assert!(nav.links(&session).previous.is_none());
    }
}
