use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::{Filter, Page};
use crate::entities::{authors, book_authors, book_genres, books, genres, prelude::*};
use crate::models::author::Author;
use crate::models::book::{Book, BookInput};
use crate::models::genre::Genre;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl From<Book> for BookInput {
    fn from(book: Book) -> Self {
        Self {
            czech_name: book.czech_name,
            original_name: book.original_name,
            issue_year: book.issue_year,
            note: book.note,
            authors: book.authors.iter().map(|a| a.id).collect(),
            genres: book.genres.iter().map(|g| g.id).collect(),
        }
    }
}

fn to_book(
    model: books::Model,
    mut authors: Vec<authors::Model>,
    mut genres: Vec<genres::Model>,
) -> Book {
    authors.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));
    genres.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));

    Book {
        id: model.id,
        czech_name: model.czech_name,
        original_name: model.original_name,
        issue_year: model.issue_year,
        note: model.note,
        authors: authors.into_iter().map(Author::from).collect(),
        genres: genres.into_iter().map(Genre::from).collect(),
    }
}

pub struct BookRepository {
    conn: DatabaseConnection,
}

impl BookRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Book>> {
        let mut query = Books::find()
            .order_by_asc(books::Column::NormalizedName)
            .order_by_asc(books::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                books::Column::NormalizedName,
                &[books::Column::CzechName, books::Column::OriginalName],
                name,
            ));
        }

        let mut page = fetch_page(&self.conn, query, filter.paging).await?;
        let models = std::mem::take(&mut page.data);
        let books = self.assemble(models).await?;

        Ok(page.with_data(books))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Book>> {
        let Some(model) = Books::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        Ok(self.assemble(vec![model]).await?.pop())
    }

    async fn assemble(&self, models: Vec<books::Model>) -> Result<Vec<Book>> {
        let authors = models
            .load_many_to_many(Authors, BookAuthors, &self.conn)
            .await?;
        let genres = models
            .load_many_to_many(Genres, BookGenres, &self.conn)
            .await?;

        Ok(models
            .into_iter()
            .zip(authors)
            .zip(genres)
            .map(|((book, authors), genres)| to_book(book, authors, genres))
            .collect())
    }

    pub async fn create(&self, input: &BookInput) -> Result<Book> {
        let txn = self.conn.begin().await?;

        let timestamp = now();
        let model = books::ActiveModel {
            czech_name: Set(input.czech_name.clone()),
            original_name: Set(input.original_name.clone()),
            normalized_name: Set(normalize(&input.czech_name)),
            issue_year: Set(input.issue_year),
            note: Set(input.note.clone()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        replace_links(&txn, model.id, input).await?;
        txn.commit().await?;

        self.get(model.id)
            .await?
            .context("Failed to retrieve created book")
    }

    pub async fn update(&self, id: i32, input: &BookInput) -> Result<Option<Book>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Books::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: books::ActiveModel = existing.into();
        active.czech_name = Set(input.czech_name.clone());
        active.original_name = Set(input.original_name.clone());
        active.normalized_name = Set(normalize(&input.czech_name));
        active.issue_year = Set(input.issue_year);
        active.note = Set(input.note.clone());
        active.updated_at = Set(now());
        active.update(&txn).await?;

        replace_links(&txn, id, input).await?;
        txn.commit().await?;

        self.get(id).await
    }

    pub async fn duplicate(&self, id: i32) -> Result<Option<Book>> {
        let Some(book) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&book.into()).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        BookAuthors::delete_many()
            .filter(book_authors::Column::BookId.eq(id))
            .exec(&txn)
            .await?;
        BookGenres::delete_many()
            .filter(book_genres::Column::BookId.eq(id))
            .exec(&txn)
            .await?;
        let result = Books::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Books::find().count(&self.conn).await?)
    }
}

/// Rewrites the author and genre links of a book.
async fn replace_links<C>(conn: &C, book_id: i32, input: &BookInput) -> Result<()>
where
    C: ConnectionTrait,
{
    BookAuthors::delete_many()
        .filter(book_authors::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    BookGenres::delete_many()
        .filter(book_genres::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;

    let authors = distinct(&input.authors);
    if !authors.is_empty() {
        let rows = authors.into_iter().map(|author_id| book_authors::ActiveModel {
            book_id: Set(book_id),
            author_id: Set(author_id),
        });
        BookAuthors::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    let genres = distinct(&input.genres);
    if !genres.is_empty() {
        let rows = genres.into_iter().map(|genre_id| book_genres::ActiveModel {
            book_id: Set(book_id),
            genre_id: Set(genre_id),
        });
        BookGenres::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

fn distinct(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
