use serde::{Deserialize, Serialize};

/// Answer to the "what is 2 + 2" question on every public form
pub const MAGIC_ANSWER: &str = "4";

/// Longest accepted free-text field
pub const MAX_FIELD_LEN: usize = 500;

/// Pub proposal from the public form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubmission {
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub public_transport: String,
    pub magic: String,
}

/// Comment on an existing pub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSubmission {
    pub id: String,
    pub author: String,
    pub text: String,
    pub magic: String,
}

fn check_magic(magic: &str) -> Result<(), String> {
    if magic.trim() != MAGIC_ANSWER {
        return Err("Wrong answer to the spam question".to_string());
    }
    Ok(())
}

fn check_length(field: &str, value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(format!("{} is longer than {} characters", field, MAX_FIELD_LEN));
    }
    Ok(())
}

/// Validates a pub proposal
pub fn validate_pub_submission(req: &PubSubmission) -> Result<(), String> {
    check_magic(&req.magic)?;

    if req.name.trim().is_empty() {
        return Err("Pub name is required".to_string());
    }

    check_length("Name", &req.name)?;
    check_length("Street", &req.street)?;
    check_length("City", &req.city)?;
    check_length("Public transport", &req.public_transport)?;

    Ok(())
}

/// Validates a comment
pub fn validate_comment_submission(req: &CommentSubmission) -> Result<(), String> {
    check_magic(&req.magic)?;

    if req.id.trim().is_empty() {
        return Err("Pub id is required".to_string());
    }
    if req.author.trim().is_empty() {
        return Err("Author is required".to_string());
    }
    if req.text.trim().is_empty() {
        return Err("Comment text is required".to_string());
    }

    check_length("Author", &req.author)?;
    check_length("Comment", &req.text)?;

    Ok(())
}
