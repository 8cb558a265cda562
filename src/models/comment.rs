use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_lenient_datetime, deserialize_nullable_string};

/// A reader comment attached to a post.
///
/// `id`, `approved` and the timestamps are assigned by the server and are
/// absent on comments that exist only locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub message: String,
    /// Moderation flag; only the server sets it.
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// A display-only copy of a just-submitted comment, stamped with the
    /// client's clock.
    pub fn local_shadow(new_comment: &NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            document_id: None,
            user_name: new_comment.user_name.clone(),
            email: new_comment.email.clone(),
            message: new_comment.message.clone(),
            approved: None,
            created_at: Some(now),
            updated_at: None,
            published_at: None,
        }
    }
}

/// Create payload for `POST /comments`.
///
/// `id` is the owning post's numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_name: String,
    pub email: String,
    pub message: String,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_comment_deserialize_server_record() {
        let json = r#"{
            "id": 11,
            "documentId": "c11",
            "userName": "Ada",
            "email": "ada@example.com",
            "message": "Great read",
            "approved": false,
            "createdAt": "2025-03-01T09:30:00.000Z",
            "updatedAt": "2025-03-01T09:30:00.000Z",
            "publishedAt": "2025-03-01T09:30:00.000Z"
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, Some(11));
        assert_eq!(comment.user_name, "Ada");
        assert_eq!(comment.approved, Some(false));
        assert_eq!(
            comment.created_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_comment_deserialize_null_fields() {
        let comment: Comment =
            serde_json::from_str(r#"{"userName": null, "message": "hi"}"#).unwrap();
        assert_eq!(comment.user_name, "");
        assert_eq!(comment.message, "hi");
        assert!(comment.id.is_none());
    }

    #[test]
    fn test_new_comment_serialize() {
        let body = serde_json::to_value(NewComment {
            user_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
            id: 4,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "userName": "Ada",
                "email": "ada@example.com",
                "message": "Hello",
                "id": 4
            })
        );
    }

    #[test]
    fn test_local_shadow_has_no_server_fields() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let new_comment = NewComment {
            user_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
            id: 4,
        };

        let shadow = Comment::local_shadow(&new_comment, now);
        assert_eq!(shadow.user_name, "Ada");
        assert_eq!(shadow.message, "Hello");
        assert_eq!(shadow.created_at, Some(now));
        assert!(shadow.id.is_none());
        assert!(shadow.approved.is_none());
    }
}
