//! Blog statistics
//!
//! Pure aggregations over a blog collection. Every function here is a
//! function of its input alone: no I/O, no shared state, safe to call
//! from any number of tasks at once.
//!
//! Ties are resolved by input order. For per-author aggregates the author
//! seen first while scanning the input wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::BlogRecord;

/// The most liked post, reduced to the fields clients display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePost {
    pub title: String,
    pub author: Option<String>,
    pub likes: u64,
}

/// Author with the largest number of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorPostCount {
    pub author: Option<String>,
    #[serde(rename = "blogs")]
    pub count: u64,
}

/// Author whose posts collected the most likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikeTotal {
    pub author: Option<String>,
    #[serde(rename = "likes")]
    pub total_likes: u64,
}

/// All four aggregates computed over the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_post: Option<FavoritePost>,
    pub most_blogs: Option<AuthorPostCount>,
    pub most_likes: Option<AuthorLikeTotal>,
}

/// Sum of likes over all records, saturating at `u64::MAX`.
pub fn total_likes(records: &[BlogRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |sum, blog| sum.saturating_add(blog.likes))
}

/// The record with the most likes. The earliest one wins a tie.
pub fn favorite_post(records: &[BlogRecord]) -> Option<FavoritePost> {
    let mut iter = records.iter();
    let first = iter.next()?;

    let best = iter.fold(first, |max, blog| if blog.likes > max.likes { blog } else { max });

    Some(FavoritePost {
        title: best.title.clone(),
        author: best.author.clone(),
        likes: best.likes,
    })
}

/// The author with the most posts.
pub fn author_with_most_posts(records: &[BlogRecord]) -> Option<AuthorPostCount> {
    AuthorTally::collect(records)
        .best_by(|entry| entry.posts)
        .map(|entry| AuthorPostCount {
            author: entry.author.map(str::to_owned),
            count: entry.posts,
        })
}

/// The author whose posts add up to the most likes.
pub fn author_with_most_likes(records: &[BlogRecord]) -> Option<AuthorLikeTotal> {
    AuthorTally::collect(records)
        .best_by(|entry| entry.likes)
        .map(|entry| AuthorLikeTotal {
            author: entry.author.map(str::to_owned),
            total_likes: entry.likes,
        })
}

/// Compute every aggregate at once.
pub fn summarize(records: &[BlogRecord]) -> BlogStats {
    BlogStats {
        total_likes: total_likes(records),
        favorite_post: favorite_post(records),
        most_blogs: author_with_most_posts(records),
        most_likes: author_with_most_likes(records),
    }
}

// =========================================================================
// Author grouping
// =========================================================================

#[derive(Debug, Clone, Copy)]
struct AuthorEntry<'a> {
    author: Option<&'a str>,
    posts: u64,
    likes: u64,
}

/// Per-author totals in first-seen order.
///
/// The index map only locates an author's slot; iteration always goes
/// through `entries`, so results never depend on hash order.
struct AuthorTally<'a> {
    entries: Vec<AuthorEntry<'a>>,
}

impl<'a> AuthorTally<'a> {
    fn collect(records: &'a [BlogRecord]) -> Self {
        let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
        let mut entries: Vec<AuthorEntry<'a>> = Vec::new();

        for blog in records {
            // Absent and empty authors share one group
            let author = blog.author.as_deref().filter(|name| !name.is_empty());

            let slot = *index.entry(author).or_insert_with(|| {
                entries.push(AuthorEntry {
                    author,
                    posts: 0,
                    likes: 0,
                });
                entries.len() - 1
            });

            let entry = &mut entries[slot];
            entry.posts += 1;
            entry.likes = entry.likes.saturating_add(blog.likes);
        }

        Self { entries }
    }

    fn best_by(self, key: impl Fn(&AuthorEntry<'a>) -> u64) -> Option<AuthorEntry<'a>> {
        let mut iter = self.entries.into_iter();
        let first = iter.next()?;

        Some(iter.fold(first, |max, entry| {
            if key(&entry) > key(&max) {
                entry
            } else {
                max
            }
        }))
    }
}
