//! Linked traversal view over the catalog.
//!
//! Nodes hold indices into the catalog's book vector rather than copies, so an
//! in-place edit of a book is seen through both. Traversal is a loop over the
//! `next` links, never recursion, so depth does not grow with the catalog.

use crate::models::Book;

#[derive(Debug, Clone, Copy)]
struct ViewNode {
    book: usize,
    next: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    nodes: Vec<ViewNode>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl CatalogView {
    /// View over books `0..len`, in order
    pub fn over(len: usize) -> Self {
        let mut view = Self::default();
        for index in 0..len {
            view.append(index);
        }
        view
    }

    /// Link a node for `book` at the tail
    pub fn append(&mut self, book: usize) {
        let node = self.nodes.len();
        self.nodes.push(ViewNode { book, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(node),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Catalog indices in link order
    pub fn indices(&self) -> Links<'_> {
        Links {
            view: self,
            cursor: self.head,
        }
    }

    /// Walk the links, resolving each node against `books`.
    /// Nodes pointing past the end of `books` are skipped.
    pub fn walk<'a>(&'a self, books: &'a [Book]) -> impl Iterator<Item = (usize, &'a Book)> + 'a {
        self.indices()
            .filter_map(move |index| books.get(index).map(|book| (index, book)))
    }
}

/// Iterator following `next` links from the head
pub struct Links<'a> {
    view: &'a CatalogView,
    cursor: Option<usize>,
}

impl Iterator for Links<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let node = self.view.nodes[self.cursor?];
        self.cursor = node.next;
        Some(node.book)
    }
}
