use async_trait::async_trait;

use super::domain::{Author, AuthorInput, Book, BookInput};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Persistence for authors. `update`/`delete` report a missing id as `None`/`false`.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Author>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Author>, ServiceError>;
    async fn create(&self, input: AuthorInput) -> Result<Author, ServiceError>;
    async fn update(&self, id: i32, input: AuthorInput) -> Result<Option<Author>, ServiceError>;
    /// Removing an author removes its books.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Persistence for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Book>, ServiceError>;
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Book>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Book>, ServiceError>;
    async fn create(&self, input: BookInput) -> Result<Book, ServiceError>;
    async fn update(&self, id: i32, input: BookInput) -> Result<Option<Book>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory catalog implementing both repositories, for tests and local runs.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        next_author: i32,
        next_book: i32,
        authors: BTreeMap<i32, Author>,
        books: BTreeMap<i32, Book>,
    }

    #[derive(Default)]
    pub struct InMemoryCatalog {
        state: Mutex<State>,
    }

    fn page_of<T: Clone>(items: impl Iterator<Item = T>, page: Pagination) -> Vec<T> {
        let (offset, limit) = page.bounds();
        items.skip(offset).take(limit).collect()
    }

    #[async_trait]
    impl AuthorRepository for InMemoryCatalog {
        async fn list(&self, page: Pagination) -> Result<Vec<Author>, ServiceError> {
            let st = self.state.lock().unwrap();
            Ok(page_of(st.authors.values().cloned(), page))
        }

        async fn find(&self, id: i32) -> Result<Option<Author>, ServiceError> {
            Ok(self.state.lock().unwrap().authors.get(&id).cloned())
        }

        async fn create(&self, input: AuthorInput) -> Result<Author, ServiceError> {
            let mut st = self.state.lock().unwrap();
            st.next_author += 1;
            let a = Author { id: st.next_author, firstname: input.firstname, lastname: input.lastname, bio: input.bio };
            st.authors.insert(a.id, a.clone());
            Ok(a)
        }

        async fn update(&self, id: i32, input: AuthorInput) -> Result<Option<Author>, ServiceError> {
            let mut st = self.state.lock().unwrap();
            Ok(st.authors.get_mut(&id).map(|a| {
                a.firstname = input.firstname;
                a.lastname = input.lastname;
                a.bio = input.bio;
                a.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state.lock().unwrap();
            let removed = st.authors.remove(&id).is_some();
            if removed {
                st.books.retain(|_, b| b.author_id != id);
            }
            Ok(removed)
        }
    }

    #[async_trait]
    impl BookRepository for InMemoryCatalog {
        async fn list(&self, page: Pagination) -> Result<Vec<Book>, ServiceError> {
            let st = self.state.lock().unwrap();
            Ok(page_of(st.books.values().cloned(), page))
        }

        async fn list_by_author(&self, author_id: i32) -> Result<Vec<Book>, ServiceError> {
            let st = self.state.lock().unwrap();
            Ok(st.books.values().filter(|b| b.author_id == author_id).cloned().collect())
        }

        async fn find(&self, id: i32) -> Result<Option<Book>, ServiceError> {
            Ok(self.state.lock().unwrap().books.get(&id).cloned())
        }

        async fn create(&self, input: BookInput) -> Result<Book, ServiceError> {
            let mut st = self.state.lock().unwrap();
            if !st.authors.contains_key(&input.author_id) {
                return Err(ServiceError::Db("foreign key violation: fk_book_author".into()));
            }
            st.next_book += 1;
            let b = book_from(st.next_book, input);
            st.books.insert(b.id, b.clone());
            Ok(b)
        }

        async fn update(&self, id: i32, input: BookInput) -> Result<Option<Book>, ServiceError> {
            let mut st = self.state.lock().unwrap();
            if !st.books.contains_key(&id) {
                return Ok(None);
            }
            let b = book_from(id, input);
            st.books.insert(id, b.clone());
            Ok(Some(b))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.state.lock().unwrap().books.remove(&id).is_some())
        }
    }

    fn book_from(id: i32, i: BookInput) -> Book {
        Book {
            id,
            title: i.title,
            year: i.year,
            isbn: i.isbn,
            summary: i.summary,
            image: i.image,
            price: i.price,
            author_id: i.author_id,
        }
    }
}
