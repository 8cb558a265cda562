use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_lenient_datetime, deserialize_nullable_string, deserialize_nullable_vec, Comment};

/// A published article with its relations expanded (`populate=*`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Numeric id; the foreign key for new comments
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    /// Unique routing key for the detail view
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Body markup
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    /// Editorial publish date, separate from the CMS `publishedAt`
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub blogpublished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cover_image: Option<Vec<Image>>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Server-relative URL of the first cover image.
    pub fn cover_image_path(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .and_then(|images| images.first())
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Date shown on the article header: editorial date, then CMS publish
    /// date, then creation date.
    pub fn display_published_at(&self) -> Option<DateTime<Utc>> {
        self.blogpublished_at
            .or(self.published_at)
            .or(self.created_at)
    }
}

/// Uploaded media attached as a cover image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub url: String,
    #[serde(default)]
    pub formats: Option<ImageFormats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFormats {
    #[serde(default)]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default)]
    pub small: Option<ImageFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFormat {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    /// Rich-text blocks
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub bio: Vec<BioBlock>,
}

impl Author {
    /// Bio flattened to plain text, one paragraph per block.
    pub fn bio_text(&self) -> String {
        self.bio
            .iter()
            .map(|block| {
                block
                    .children
                    .iter()
                    .filter_map(|child| child.text.as_deref())
                    .collect::<String>()
            })
            .filter(|paragraph| !paragraph.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioBlock {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub children: Vec<BioChild>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioChild {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FULL_POST: &str = r#"{
        "id": 1,
        "documentId": "abc123",
        "title": "Hello World",
        "slug": "hello-world",
        "excerpt": "First post",
        "blogpublishedAt": null,
        "seoDescription": "seo",
        "con": "legacy",
        "content": "<p>Body</p>",
        "createdAt": "2025-01-10T08:00:00.000Z",
        "updatedAt": "2025-01-12T08:00:00.000Z",
        "publishedAt": "2025-01-11T08:00:00.000Z",
        "coverImage": [{
            "id": 5,
            "name": "cover.png",
            "alternativeText": null,
            "width": 1200,
            "height": 600,
            "url": "/uploads/cover_abc.png",
            "formats": {
                "thumbnail": { "url": "/uploads/thumbnail_cover_abc.png", "width": 245, "height": 122 }
            }
        }],
        "category": { "id": 2, "name": "Tech", "slug": "tech", "description": "" },
        "tags": [{ "id": 1, "name": "rust", "slug": "rust" }, { "id": 2, "name": "web", "slug": "web" }],
        "author": {
            "id": 9,
            "name": "Grace",
            "bio": [{ "type": "paragraph", "children": [{ "type": "text", "text": "Writes code." }] }]
        },
        "comments": []
    }"#;

    #[test]
    fn test_post_deserialize_full() {
        let post: Post = serde_json::from_str(FULL_POST).unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.cover_image_path(), Some("/uploads/cover_abc.png"));
        assert_eq!(post.category_name(), Some("Tech"));
        assert_eq!(post.author_name(), Some("Grace"));
        assert_eq!(post.tag_names(), vec!["rust", "web"]);
        assert_eq!(post.author.as_ref().unwrap().bio_text(), "Writes code.");
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_post_deserialize_minimal() {
        let post: Post =
            serde_json::from_str(r#"{"id": 2, "title": "Bare", "slug": "bare", "comments": null}"#)
                .unwrap();
        assert_eq!(post.cover_image_path(), None);
        assert_eq!(post.category_name(), None);
        assert_eq!(post.author_name(), None);
        assert!(post.tag_names().is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_display_published_at_fallbacks() {
        let post: Post = serde_json::from_str(FULL_POST).unwrap();
        assert_eq!(
            post.display_published_at(),
            Some(Utc.with_ymd_and_hms(2025, 1, 11, 8, 0, 0).unwrap())
        );

        let editorial = Post {
            blogpublished_at: Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
            ..post
        };
        assert_eq!(
            editorial.display_published_at(),
            Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_date_only_editorial_date() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"title":"T","slug":"t","blogpublishedAt":"2025-03-01"}"#)
                .unwrap();
        assert_eq!(
            post.display_published_at(),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_date_does_not_fail_the_list() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[{"id":1,"slug":"a","publishedAt":"not a date"},{"id":2,"slug":"b","blogpublishedAt":"2025-03-01"}]"#,
        )
        .unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].published_at, None);
    }

    #[test]
    fn test_empty_cover_image_list() {
        let post = Post {
            cover_image: Some(vec![]),
            ..Post::default()
        };
        assert_eq!(post.cover_image_path(), None);
    }
}
