//! Document validation: the only way to obtain a [`Document`].

use super::{Document, Normalized, Status};
use crate::utils::date::CalendarDate;
use crate::utils::slug::is_valid_slug;
use std::fmt;
use thiserror::Error;

/// Maximum excerpt length in characters, ellipsis included.
pub const EXCERPT_LIMIT: usize = 280;

/// Field a validation error refers to, named as authors write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Slug,
    Excerpt,
    PublishedDate,
    Status,
    Tags,
    SeoTitle,
    SeoDescription,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Slug => "slug",
            Self::Excerpt => "excerpt",
            Self::PublishedDate => "publishedDate",
            Self::Status => "status",
            Self::Tags => "tags",
            Self::SeoTitle => "seoTitle",
            Self::SeoDescription => "seoDescription",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("missing or blank")]
    Missing,
    #[error("`{0}` must be lowercase letters and digits separated by single hyphens")]
    InvalidSlug(String),
    #[error("at least one tag is required")]
    EmptyTags,
    #[error("`{0}` must be `draft` or `published`")]
    InvalidStatus(String),
    #[error("`{0}` is not a calendar date in YYYY-MM-DD form")]
    InvalidDate(String),
    #[error("is {0} characters long, at most {EXCERPT_LIMIT} allowed")]
    TooLong(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{field}` {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    const fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }
}

/// Check a normalized record, stopping at the first problem.
pub fn validate(doc: Normalized) -> Result<Document, ValidationError> {
    let required = [
        (Field::Title, &doc.title),
        (Field::Slug, &doc.slug),
        (Field::Excerpt, &doc.excerpt),
        (Field::PublishedDate, &doc.published_date),
        (Field::Status, &doc.status),
        (Field::SeoTitle, &doc.seo_title),
        (Field::SeoDescription, &doc.seo_description),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::new(*field, Reason::Missing));
    }

    if !is_valid_slug(&doc.slug) {
        return Err(ValidationError::new(
            Field::Slug,
            Reason::InvalidSlug(doc.slug),
        ));
    }

    let excerpt_len = doc.excerpt.chars().count();
    if excerpt_len > EXCERPT_LIMIT {
        return Err(ValidationError::new(
            Field::Excerpt,
            Reason::TooLong(excerpt_len),
        ));
    }

    if doc.tags.is_empty() {
        return Err(ValidationError::new(Field::Tags, Reason::EmptyTags));
    }

    let status: Status = doc.status.parse().map_err(|()| {
        ValidationError::new(Field::Status, Reason::InvalidStatus(doc.status.clone()))
    })?;

    if CalendarDate::parse(&doc.published_date).is_none() {
        return Err(ValidationError::new(
            Field::PublishedDate,
            Reason::InvalidDate(doc.published_date),
        ));
    }

    Ok(Document {
        source: doc.source,
        title: doc.title,
        slug: doc.slug,
        excerpt: doc.excerpt,
        published_date: doc.published_date,
        status,
        tags: doc.tags,
        seo_title: doc.seo_title,
        seo_description: doc.seo_description,
        canonical_url: doc.canonical_url,
        social_image_url: doc.social_image_url,
        body: doc.body,
        body_line: doc.body_line,
    })
}
