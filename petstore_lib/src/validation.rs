use petstore_api::types::PetStatus;

use crate::error::PetStoreError;
use crate::form::PetForm;
use crate::pagination::{Filter, PageRequest};

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_LIMIT: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, PetStoreError> {
    if input.len() > max_len {
        return Err(PetStoreError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(PetStoreError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string. Blank input means "no search"; anything else is
/// sanitized and lower-cased.
pub fn validate_search(input: &str) -> Result<String, PetStoreError> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(sanitize_text(input, MAX_SEARCH_LENGTH)?.to_lowercase())
}

/// Validate a pet status: case-insensitive, one of available/pending/sold.
pub fn validate_status(input: &str) -> Result<PetStatus, PetStoreError> {
    input.trim().to_lowercase().parse::<PetStatus>().map_err(|_| {
        PetStoreError::InvalidInput(format!(
            "unknown status '{}'. Valid values: available, pending, sold",
            input
        ))
    })
}

/// Validate a listing filter: `all` or `my`.
pub fn validate_filter(input: &str) -> Result<Filter, PetStoreError> {
    input.trim().to_lowercase().parse::<Filter>().map_err(|_| {
        PetStoreError::InvalidInput(format!(
            "unknown filter '{}'. Valid values: all, my",
            input
        ))
    })
}

/// Validate listing parameters. `limit` must be 1..=100 and `page` at least 1.
pub fn validate_page_request(
    limit: i64,
    page: i64,
    search: &str,
    filter: &str,
) -> Result<PageRequest, PetStoreError> {
    if limit < 1 || limit > MAX_LIMIT as i64 {
        return Err(PetStoreError::InvalidInput(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    if page < 1 {
        return Err(PetStoreError::InvalidInput(format!(
            "page must be at least 1, got {}",
            page
        )));
    }
    Ok(PageRequest {
        limit: limit as usize,
        page: page as usize,
        search: validate_search(search)?,
        filter: validate_filter(filter)?,
    })
}

/// Raw create/update input before validation.
#[derive(Clone, Debug, Default)]
pub struct PetFormInput {
    pub name: String,
    pub status: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_urls: Vec<String>,
    pub tags: Vec<String>,
}

/// Validate a create/update form. Empty lists mean "not given".
pub fn validate_pet_form(input: &PetFormInput) -> Result<PetForm, PetStoreError> {
    let name = sanitize_text(&input.name, MAX_NAME_LENGTH)?;
    let status = validate_status(&input.status)?;

    let category_name = match &input.category_name {
        Some(category) if !category.trim().is_empty() => {
            Some(sanitize_text(category, MAX_NAME_LENGTH)?)
        }
        _ => None,
    };

    let photo_urls = if input.photo_urls.is_empty() {
        None
    } else {
        Some(
            input
                .photo_urls
                .iter()
                .map(|url| validate_photo_url(url))
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    let tags = if input.tags.is_empty() {
        None
    } else {
        Some(
            input
                .tags
                .iter()
                .map(|tag| sanitize_text(tag, MAX_NAME_LENGTH))
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    Ok(PetForm {
        name,
        status,
        category_id: input.category_id,
        category_name,
        photo_urls,
        tags,
    })
}

fn validate_photo_url(input: &str) -> Result<String, PetStoreError> {
    let url = input.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(PetStoreError::InvalidInput(format!(
            "photo URL must start with http:// or https://, got '{}'",
            input
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_text("Re\x07x\n", 50).unwrap(), "Rex");
        assert!(sanitize_text("\t\n", 50).is_err());
        assert!(sanitize_text(&"a".repeat(51), 50).is_err());
    }

    #[test]
    fn search_blank_is_no_search() {
        assert_eq!(validate_search("   ").unwrap(), "");
        assert_eq!(validate_search(" ReX ").unwrap(), "rex");
    }

    #[test]
    fn status_is_case_insensitive() {
        assert_eq!(validate_status("Sold").unwrap(), PetStatus::Sold);
        assert!(validate_status("adopted").is_err());
    }

    #[test]
    fn page_request_bounds() {
        let request = validate_page_request(10, 1, "", "all").unwrap();
        assert_eq!(request.filter, Filter::All);
        assert!(validate_page_request(0, 1, "", "my").is_err());
        assert!(validate_page_request(-5, 1, "", "my").is_err());
        assert!(validate_page_request(101, 1, "", "my").is_err());
        assert!(validate_page_request(10, 0, "", "my").is_err());
        assert!(validate_page_request(10, 1, "", "mine").is_err());
    }

    #[test]
    fn pet_form_requires_name_and_status() {
        let missing_name = PetFormInput {
            status: "available".to_string(),
            ..PetFormInput::default()
        };
        assert!(validate_pet_form(&missing_name).is_err());

        let bad_status = PetFormInput {
            name: "Rex".to_string(),
            status: "lost".to_string(),
            ..PetFormInput::default()
        };
        assert!(validate_pet_form(&bad_status).is_err());
    }

    #[test]
    fn pet_form_optional_fields() {
        let input = PetFormInput {
            name: " Rex ".to_string(),
            status: "pending".to_string(),
            category_id: Some(2),
            category_name: Some("  ".to_string()),
            photo_urls: vec!["https://example.com/rex.jpg".to_string()],
            tags: vec![],
        };
        let form = validate_pet_form(&input).unwrap();
        assert_eq!(form.name, "Rex");
        assert_eq!(form.category_id, Some(2));
        assert_eq!(form.category_name, None);
        assert_eq!(form.photo_urls.unwrap().len(), 1);
        assert_eq!(form.tags, None);
    }

    #[test]
    fn pet_form_rejects_bad_photo_url() {
        let input = PetFormInput {
            name: "Rex".to_string(),
            status: "available".to_string(),
            photo_urls: vec!["ftp://example.com/rex.jpg".to_string()],
            ..PetFormInput::default()
        };
        assert!(validate_pet_form(&input).is_err());
    }
}
